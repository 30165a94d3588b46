//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (camera, display, button, system services, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::config::SensorTuning;
use crate::error::CameraError;

// ───────────────────────────────────────────────────────────────
// Camera port (driven adapter: sensor → domain)
// ───────────────────────────────────────────────────────────────

/// Pixel format reported with an acquired frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Grayscale,
    Rgb565,
    Jpeg,
    Other,
}

/// A borrowed view of one camera frame.  Valid only until the matching
/// [`CameraPort::release_frame`] call.
pub struct FrameView<'a> {
    pub data: &'a mut [u8],
    pub width: u16,
    pub height: u16,
    pub format: PixelFormat,
}

/// Frame source.  At most one frame may be in flight at a time.
pub trait CameraPort {
    /// Borrow the next frame from the driver, or `None` if the driver has
    /// nothing to hand out.
    fn acquire_frame(&mut self) -> Option<FrameView<'_>>;

    /// Return the in-flight frame to the driver.  No-op when no frame is
    /// held; never called twice for one acquire.
    fn release_frame(&mut self);

    /// Tear the driver down and bring it back up.
    fn reinitialize(&mut self) -> Result<(), CameraError>;

    /// Push low-light sensor settings to the driver.
    fn apply_tuning(&mut self, tuning: &SensorTuning) -> Result<(), CameraError>;
}

/// Run `body` against an acquired frame, releasing the frame on every path.
///
/// The frame borrow ends when `body` returns, so the release always follows
/// the acquire exactly once regardless of the outcome `body` computes.
pub fn with_frame<C, R>(camera: &mut C, body: impl FnOnce(Option<FrameView<'_>>) -> R) -> R
where
    C: CameraPort + ?Sized,
{
    let result = body(camera.acquire_frame());
    camera.release_frame();
    result
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the TFT panel.  Colours are RGB565.
pub trait DisplayPort {
    fn fill_screen(&mut self, color: u16);

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16);

    /// Position the text cursor for the next `print`.
    fn set_cursor(&mut self, x: u16, y: u16);

    fn set_text_color(&mut self, color: u16);

    fn print(&mut self, text: &str);

    /// Copy a rectangle of pixels to the panel at the given origin.
    /// `pixels.len()` must equal `w as usize * h as usize`.
    fn blit(&mut self, x: u16, y: u16, w: u16, h: u16, pixels: &[u16]);
}

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: switch → domain)
// ───────────────────────────────────────────────────────────────

/// Raw switch level, before debouncing.
pub trait ButtonPort {
    /// True while the switch is held down.
    fn is_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// System port (driven adapter: domain → platform services)
// ───────────────────────────────────────────────────────────────

/// Blocking delays and device restart.
pub trait SystemPort {
    fn delay_ms(&mut self, ms: u32);

    /// Reboot the device.  On hardware this does not return.
    fn restart(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
