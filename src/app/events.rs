//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — today that is the serial log.

use crate::video::fault::FrameOutcome;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The application service has started.
    Started,

    /// An imaging session began (button press from standby).
    SessionStarted,

    /// A button press during an active session pushed the deadline out.
    SessionExtended,

    /// The inactivity timeout elapsed and the session ended.
    SessionEnded,

    /// A frame cycle failed.
    FrameFault {
        outcome: FrameOutcome,
        consecutive: u8,
    },

    /// The fault run crossed the threshold; a camera reinit is underway.
    CameraRecoveryStarted,

    /// Camera reinitialization completed.
    CameraRecovered,

    /// The display pixel buffer was rebuilt after an allocation fault.
    BufferReallocated,

    /// Frames completed in the last reporting window.
    FpsReport(u16),

    /// Unrecoverable fault; the device is about to restart.
    Fatal { code: u8, message: &'static str },
}
