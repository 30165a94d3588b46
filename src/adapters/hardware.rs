//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the camera and panel adapters and exposes them, together with the
//! button GPIO and platform services, through the four hardware ports.
//! This is the only module the main loop hands to the
//! [`AppService`](crate::app::service::AppService).

use crate::app::ports::{ButtonPort, CameraPort, DisplayPort, FrameView, SystemPort};
use crate::config::SensorTuning;
use crate::drivers::hw_init;
use crate::error::CameraError;
use crate::pins;

use super::camera::EspCamera;
use super::display::St7735Display;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    camera: EspCamera,
    display: St7735Display,
}

impl HardwareAdapter {
    pub fn new(camera: EspCamera, display: St7735Display) -> Self {
        Self { camera, display }
    }
}

// ── CameraPort implementation ─────────────────────────────────

impl CameraPort for HardwareAdapter {
    fn acquire_frame(&mut self) -> Option<FrameView<'_>> {
        self.camera.acquire_frame()
    }

    fn release_frame(&mut self) {
        self.camera.release_frame();
    }

    fn reinitialize(&mut self) -> Result<(), CameraError> {
        self.camera.reinitialize()
    }

    fn apply_tuning(&mut self, tuning: &SensorTuning) -> Result<(), CameraError> {
        self.camera.apply_tuning(tuning)
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn fill_screen(&mut self, color: u16) {
        self.display.fill_screen(color);
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) {
        self.display.fill_rect(x, y, w, h, color);
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.display.set_cursor(x, y);
    }

    fn set_text_color(&mut self, color: u16) {
        self.display.set_text_color(color);
    }

    fn print(&mut self, text: &str) {
        self.display.print(text);
    }

    fn blit(&mut self, x: u16, y: u16, w: u16, h: u16, pixels: &[u16]) {
        self.display.blit(x, y, w, h, pixels);
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl ButtonPort for HardwareAdapter {
    fn is_pressed(&mut self) -> bool {
        // Active-low switch with pull-up: low level means held.
        !hw_init::gpio_read(pins::BUTTON_GPIO)
    }
}

// ── SystemPort implementation ─────────────────────────────────

impl SystemPort for HardwareAdapter {
    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }

    #[cfg(target_os = "espidf")]
    fn restart(&mut self) {
        // SAFETY: esp_restart never returns; nothing to clean up.
        unsafe { esp_idf_svc::sys::esp_restart() };
    }

    #[cfg(not(target_os = "espidf"))]
    fn restart(&mut self) {
        log::warn!("system(sim): restart requested");
    }
}
