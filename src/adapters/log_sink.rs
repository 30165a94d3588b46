//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | service up"),
            AppEvent::SessionStarted => info!("SESSION | started"),
            AppEvent::SessionExtended => info!("SESSION | extended"),
            AppEvent::SessionEnded => info!("SESSION | ended (inactivity)"),
            AppEvent::FrameFault {
                outcome,
                consecutive,
            } => {
                warn!("FRAME | fault {outcome:?} ({consecutive} consecutive)");
            }
            AppEvent::CameraRecoveryStarted => warn!("CAMERA | reinit started"),
            AppEvent::CameraRecovered => info!("CAMERA | reinit ok"),
            AppEvent::BufferReallocated => info!("BUFFER | reallocated"),
            AppEvent::FpsReport(frames) => info!("RATE | {frames} frames/window"),
            AppEvent::Fatal { code, message } => {
                warn!("FATAL | {message} (code {code}), restarting");
            }
        }
    }
}
