//! Frames-per-window counter for the on-screen rate readout.
//!
//! Counts frames completed since the last report and emits the raw count
//! once per reporting window.  The value shown is frames per window, not a
//! normalized per-second rate.

pub struct FpsCounter {
    frames_since_report: u16,
    last_report_ms: u32,
    interval_ms: u32,
}

impl FpsCounter {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            frames_since_report: 0,
            last_report_ms: 0,
            interval_ms,
        }
    }

    /// Count one completed frame.
    pub fn record_frame(&mut self) {
        self.frames_since_report = self.frames_since_report.saturating_add(1);
    }

    /// If the reporting window has elapsed, return the frame count and start
    /// a new window.
    pub fn poll_report(&mut self, now_ms: u32) -> Option<u16> {
        if now_ms.wrapping_sub(self.last_report_ms) >= self.interval_ms {
            let count = self.frames_since_report;
            self.frames_since_report = 0;
            self.last_report_ms = now_ms;
            Some(count)
        } else {
            None
        }
    }

    /// Restart the window, discarding any partial count.  Called when a new
    /// imaging session begins.
    pub fn reset(&mut self, now_ms: u32) {
        self.frames_since_report = 0;
        self.last_report_ms = now_ms;
    }
}
