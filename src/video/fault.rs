//! Camera fault accounting and recovery escalation.
//!
//! Every frame cycle produces a [`FrameOutcome`].  The monitor turns runs of
//! bad outcomes into a single [`RecoveryAction`], and escalates to a fatal
//! restart when a recovery attempt has already been spent.

use log::warn;

/// Classification of one frame cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame acquired, transformed and displayed.
    Success,
    /// Driver returned no frame at all.
    MissingFrame,
    /// Frame arrived in an unexpected pixel format.
    FormatMismatch,
    /// Frame dimensions do not match the configured resolution.
    SizeMismatch,
    /// The display pixel buffer was not available.
    BufferUnavailable,
}

impl FrameOutcome {
    /// Whether this outcome counts against the camera (as opposed to the
    /// local pixel buffer).
    fn is_camera_fault(self) -> bool {
        matches!(
            self,
            Self::MissingFrame | Self::FormatMismatch | Self::SizeMismatch
        )
    }
}

/// What the control loop should do after recording an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Carry on, nothing to do.
    None,
    /// Tear down and rebuild the display pixel buffer.
    ReallocateBuffer,
    /// Full camera driver reinitialization.
    ReinitCamera,
    /// Recovery already failed once; restart the device.
    Fatal,
}

/// Tracks consecutive faults and decides when to escalate.
pub struct CameraFaultMonitor {
    consecutive_camera_faults: u8,
    consecutive_buffer_faults: u8,
    in_recovery: bool,
    threshold: u8,
}

impl CameraFaultMonitor {
    pub fn new(threshold: u8) -> Self {
        Self {
            consecutive_camera_faults: 0,
            consecutive_buffer_faults: 0,
            in_recovery: false,
            threshold,
        }
    }

    /// Record the outcome of one frame cycle and return the action to take.
    pub fn record_cycle_outcome(&mut self, outcome: FrameOutcome) -> RecoveryAction {
        match outcome {
            FrameOutcome::Success => {
                self.consecutive_camera_faults = 0;
                self.consecutive_buffer_faults = 0;
                self.in_recovery = false;
                RecoveryAction::None
            }
            FrameOutcome::BufferUnavailable => {
                self.consecutive_buffer_faults = self.consecutive_buffer_faults.saturating_add(1);
                RecoveryAction::ReallocateBuffer
            }
            fault => {
                debug_assert!(fault.is_camera_fault());
                self.consecutive_camera_faults = self.consecutive_camera_faults.saturating_add(1);
                warn!(
                    "camera fault {fault:?} ({} consecutive)",
                    self.consecutive_camera_faults
                );
                if self.in_recovery {
                    // A reinit was already attempted and faults keep coming.
                    RecoveryAction::Fatal
                } else if self.consecutive_camera_faults > self.threshold {
                    self.in_recovery = true;
                    RecoveryAction::ReinitCamera
                } else {
                    RecoveryAction::None
                }
            }
        }
    }

    /// Called after a camera reinitialization completed without error.  The
    /// next fault run starts fresh.
    pub fn recovery_succeeded(&mut self) {
        self.consecutive_camera_faults = 0;
        self.in_recovery = false;
    }

    pub fn consecutive_camera_faults(&self) -> u8 {
        self.consecutive_camera_faults
    }

    pub fn in_recovery(&self) -> bool {
        self.in_recovery
    }
}
