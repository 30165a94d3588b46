//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the session FSM, the button debouncer, the fault
//! monitor, the pixel buffer, and the rate counter.  All I/O flows through
//! port traits injected at call sites, making the entire service testable
//! with mock adapters.
//!
//! ```text
//!  CameraPort ──▶ ┌────────────────────────┐ ──▶ DisplayPort
//!  ButtonPort ──▶ │       AppService        │ ──▶ EventSink
//!                 │  FSM · Faults · Video   │
//!  SystemPort ◀──▶└────────────────────────┘
//! ```

use log::{error, info, warn};

use crate::config::{SensorTuning, SystemConfig};
use crate::drivers::button::ButtonDebouncer;
use crate::error::FatalError;
use crate::fsm::context::{Banner, SessionContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::video::fault::{CameraFaultMonitor, FrameOutcome, RecoveryAction};
use crate::video::fps::FpsCounter;
use crate::video::framebuffer::{BufferAllocator, FrameBufferManager, HeapAllocator};
use crate::video::transform::{correct_and_convert, FRAME_HEIGHT, FRAME_WIDTH};

use super::events::AppEvent;
use super::ports::{
    with_frame, ButtonPort, CameraPort, DisplayPort, EventSink, PixelFormat, SystemPort,
};
use super::screens;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService<A: BufferAllocator = HeapAllocator> {
    fsm: Fsm,
    ctx: SessionContext,
    debouncer: ButtonDebouncer,
    monitor: CameraFaultMonitor,
    framebuffer: FrameBufferManager<A>,
    fps: FpsCounter,
    tuning: SensorTuning,
    /// Timestamp of the last frame cycle, for pacing.
    last_frame_ms: u32,
    config: SystemConfig,
}

impl AppService<HeapAllocator> {
    pub fn new(config: SystemConfig) -> Self {
        Self::with_allocator(config, HeapAllocator)
    }
}

impl<A: BufferAllocator> AppService<A> {
    /// Construct the service with a custom pixel-buffer allocator.
    pub fn with_allocator(config: SystemConfig, alloc: A) -> Self {
        let ctx = SessionContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Standby);
        Self {
            fsm,
            ctx,
            debouncer: ButtonDebouncer::new(config.button_debounce_ms),
            monitor: CameraFaultMonitor::new(config.camera_fault_threshold),
            framebuffer: FrameBufferManager::with_allocator(alloc),
            fps: FpsCounter::new(config.fps_report_interval_ms),
            tuning: SensorTuning::default(),
            last_frame_ms: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Allocate the display pixel buffer.  Call once at boot, before the
    /// control loop; a failure here is unrecoverable.
    pub fn ensure_startup_allocation(&mut self) -> Result<(), FatalError> {
        self.framebuffer
            .ensure_allocated()
            .map_err(|_| FatalError::StartupAllocation)
    }

    /// Start the FSM in standby and draw the initial screen.
    pub fn start(&mut self, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        screens::draw_init_splash(display);
        self.fsm.start(&mut self.ctx);
        self.apply_banner(display);
        sink.emit(&AppEvent::Started);
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    pub fn current_state(&self) -> StateId {
        self.fsm.current_state()
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: debounce → FSM → frame pipeline →
    /// fault recovery.
    ///
    /// The `hw` parameter satisfies **all four** hardware ports — this
    /// avoids a double mutable borrow while keeping the port boundary
    /// explicit.  Returns `Err` only for unrecoverable faults; the caller
    /// restarts the device.
    pub fn tick(
        &mut self,
        hw: &mut (impl CameraPort + DisplayPort + ButtonPort + SystemPort),
        sink: &mut impl EventSink,
        now_ms: u32,
    ) -> Result<(), FatalError> {
        // 1. Debounce the raw switch level.
        let raw = hw.is_pressed();
        let pressed = self.debouncer.tick(now_ms, raw);

        // 2. Session state machine.
        let prev_state = self.fsm.current_state();
        self.ctx.now_ms = now_ms;
        self.ctx.button_pressed = pressed;
        self.fsm.tick(&mut self.ctx);
        let state = self.fsm.current_state();

        match (prev_state, state) {
            (StateId::Standby, StateId::Active) => sink.emit(&AppEvent::SessionStarted),
            (StateId::Active, StateId::Standby) => sink.emit(&AppEvent::SessionEnded),
            (StateId::Active, StateId::Active) if pressed => {
                sink.emit(&AppEvent::SessionExtended);
            }
            _ => {}
        }

        // 3. Consume state outputs: banner and frame-clock reset.
        self.apply_banner(hw);
        if self.ctx.reset_frame_clock {
            self.ctx.reset_frame_clock = false;
            self.fps.reset(now_ms);
            self.last_frame_ms = now_ms;
        }

        // 4. Frame pipeline, paced independently of the control tick.
        if state == StateId::Active
            && now_ms.wrapping_sub(self.last_frame_ms) >= self.config.frame_period_ms
        {
            self.last_frame_ms = now_ms;
            let outcome = self.run_frame_cycle(hw, sink, now_ms);
            self.handle_outcome(outcome, hw, sink)?;
        }

        Ok(())
    }

    fn apply_banner(&mut self, display: &mut impl DisplayPort) {
        if let Some(banner) = self.ctx.banner_request.take() {
            match banner {
                Banner::Active => screens::draw_active_banner(display),
                Banner::Standby => screens::draw_standby_banner(display),
            }
        }
    }

    /// Acquire → validate → transform → display one frame.
    fn run_frame_cycle(
        &mut self,
        hw: &mut (impl CameraPort + DisplayPort),
        sink: &mut impl EventSink,
        now_ms: u32,
    ) -> FrameOutcome {
        let framebuffer = &mut self.framebuffer;
        let outcome = with_frame(hw, |frame| {
            let Some(frame) = frame else {
                return FrameOutcome::MissingFrame;
            };
            if frame.format != PixelFormat::Grayscale {
                return FrameOutcome::FormatMismatch;
            }
            let expected = frame.width as usize * frame.height as usize;
            if frame.width != FRAME_WIDTH as u16
                || frame.height != FRAME_HEIGHT as u16
                || frame.data.len() != expected
            {
                return FrameOutcome::SizeMismatch;
            }
            let Some(pixels) = framebuffer.pixels_mut() else {
                return FrameOutcome::BufferUnavailable;
            };
            correct_and_convert(frame.data, pixels);
            FrameOutcome::Success
        });

        // The camera frame is back with the driver; now push the converted
        // pixels to the panel.
        if outcome == FrameOutcome::Success {
            if let Some(pixels) = self.framebuffer.pixels() {
                let (x, y) = screens::VIDEO_ORIGIN;
                hw.blit(x, y, FRAME_WIDTH as u16, FRAME_HEIGHT as u16, pixels);
            }
            self.fps.record_frame();
            if let Some(frames) = self.fps.poll_report(now_ms) {
                screens::draw_fps(hw, frames);
                sink.emit(&AppEvent::FpsReport(frames));
            }
        }
        outcome
    }

    fn handle_outcome(
        &mut self,
        outcome: FrameOutcome,
        hw: &mut (impl CameraPort + DisplayPort + SystemPort),
        sink: &mut impl EventSink,
    ) -> Result<(), FatalError> {
        let action = self.monitor.record_cycle_outcome(outcome);
        if outcome != FrameOutcome::Success {
            sink.emit(&AppEvent::FrameFault {
                outcome,
                consecutive: self.monitor.consecutive_camera_faults(),
            });
        }

        match action {
            RecoveryAction::None => Ok(()),

            RecoveryAction::ReallocateBuffer => {
                warn!("display buffer lost, reallocating");
                match self
                    .framebuffer
                    .reallocate(self.config.realloc_settle_ms, hw)
                {
                    Ok(()) => {
                        sink.emit(&AppEvent::BufferReallocated);
                        Ok(())
                    }
                    Err(_) => self.fatal(FatalError::BufferReallocation, hw, sink),
                }
            }

            RecoveryAction::ReinitCamera => {
                warn!("camera fault threshold crossed, reinitializing driver");
                screens::draw_recovery_notice(hw);
                sink.emit(&AppEvent::CameraRecoveryStarted);
                hw.delay_ms(self.config.recovery_notice_ms);
                match hw.reinitialize().and_then(|()| hw.apply_tuning(&self.tuning)) {
                    Ok(()) => {
                        self.monitor.recovery_succeeded();
                        sink.emit(&AppEvent::CameraRecovered);
                        info!("camera reinitialized");
                        // Redraw the session banner the notice overwrote.
                        screens::draw_active_banner(hw);
                        Ok(())
                    }
                    Err(err) => {
                        error!("camera reinit failed: {err}");
                        self.fatal(FatalError::CameraRecovery, hw, sink)
                    }
                }
            }

            RecoveryAction::Fatal => self.fatal(FatalError::CameraRecovery, hw, sink),
        }
    }

    /// Show the red fault screen, emit the event, and hand the fault to the
    /// caller for a device restart.
    fn fatal(
        &mut self,
        fault: FatalError,
        hw: &mut (impl DisplayPort + SystemPort),
        sink: &mut impl EventSink,
    ) -> Result<(), FatalError> {
        error!("fatal: {} (code {})", fault.message(), fault.code());
        screens::draw_fatal(hw, fault);
        sink.emit(&AppEvent::Fatal {
            code: fault.code(),
            message: fault.message(),
        });
        hw.delay_ms(self.config.fatal_notice_ms);
        Err(fault)
    }
}
