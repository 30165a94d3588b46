//! OV2640 camera adapter.
//!
//! Wraps the esp32-camera component (DVP interface, grayscale QQVGA) behind
//! [`CameraPort`].  Frame buffers stay owned by the driver; `acquire_frame`
//! borrows one and `release_frame` hands it back.  On non-espidf targets a
//! synthetic moving gradient stands in for the sensor.

use crate::app::ports::{CameraPort, FrameView, PixelFormat};
use crate::config::SensorTuning;
use crate::error::CameraError;
use crate::video::transform::{FRAME_HEIGHT, FRAME_PIXELS, FRAME_WIDTH};
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;
#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Settle time after driver init or deinit before the sensor is trusted.
#[cfg(target_os = "espidf")]
const CAMERA_SETTLE_MS: u32 = 500;

pub struct EspCamera {
    #[cfg(target_os = "espidf")]
    in_flight: *mut camera_fb_t,
    #[cfg(not(target_os = "espidf"))]
    sim_frame: Vec<u8>,
    #[cfg(not(target_os = "espidf"))]
    sim_phase: u8,
    #[cfg(not(target_os = "espidf"))]
    sim_held: bool,
}

#[cfg(target_os = "espidf")]
impl EspCamera {
    /// Initialise the camera driver.  Call once at boot.
    pub fn new() -> Result<Self, CameraError> {
        unsafe { Self::driver_init()? };
        Ok(Self {
            in_flight: core::ptr::null_mut(),
        })
    }

    unsafe fn driver_init() -> Result<(), CameraError> {
        let config = camera_config_t {
            pin_pwdn: pins::CAM_PWDN_GPIO,
            pin_reset: pins::CAM_RESET_GPIO,
            pin_xclk: pins::CAM_XCLK_GPIO,
            __bindgen_anon_1: camera_config_t__bindgen_ty_1 {
                pin_sccb_sda: pins::CAM_SIOD_GPIO,
            },
            __bindgen_anon_2: camera_config_t__bindgen_ty_2 {
                pin_sccb_scl: pins::CAM_SIOC_GPIO,
            },
            pin_d7: pins::CAM_D7_GPIO,
            pin_d6: pins::CAM_D6_GPIO,
            pin_d5: pins::CAM_D5_GPIO,
            pin_d4: pins::CAM_D4_GPIO,
            pin_d3: pins::CAM_D3_GPIO,
            pin_d2: pins::CAM_D2_GPIO,
            pin_d1: pins::CAM_D1_GPIO,
            pin_d0: pins::CAM_D0_GPIO,
            pin_vsync: pins::CAM_VSYNC_GPIO,
            pin_href: pins::CAM_HREF_GPIO,
            pin_pclk: pins::CAM_PCLK_GPIO,
            xclk_freq_hz: pins::CAM_XCLK_FREQ_HZ,
            ledc_timer: ledc_timer_t_LEDC_TIMER_0,
            ledc_channel: ledc_channel_t_LEDC_CHANNEL_0,
            pixel_format: pixformat_t_PIXFORMAT_GRAYSCALE,
            frame_size: framesize_t_FRAMESIZE_QQVGA,
            jpeg_quality: 12,
            fb_count: 1,
            fb_location: camera_fb_location_t_CAMERA_FB_IN_DRAM,
            grab_mode: camera_grab_mode_t_CAMERA_GRAB_WHEN_EMPTY,
            ..Default::default()
        };

        // SAFETY: config outlives the call; driver copies what it needs.
        let ret = unsafe { esp_camera_init(&config) };
        if ret != ESP_OK {
            return Err(CameraError::InitFailed(ret));
        }
        esp_idf_hal::delay::FreeRtos::delay_ms(CAMERA_SETTLE_MS);
        info!("camera: driver up (grayscale QQVGA)");
        Ok(())
    }
}

#[cfg(target_os = "espidf")]
impl CameraPort for EspCamera {
    fn acquire_frame(&mut self) -> Option<FrameView<'_>> {
        debug_assert!(self.in_flight.is_null(), "frame already in flight");
        // SAFETY: driver initialised in new(); fb stays valid until the
        // matching esp_camera_fb_return in release_frame.
        let fb = unsafe { esp_camera_fb_get() };
        if fb.is_null() {
            return None;
        }
        self.in_flight = fb;
        let fb = unsafe { &mut *fb };
        let format = match fb.format {
            f if f == pixformat_t_PIXFORMAT_GRAYSCALE => PixelFormat::Grayscale,
            f if f == pixformat_t_PIXFORMAT_RGB565 => PixelFormat::Rgb565,
            f if f == pixformat_t_PIXFORMAT_JPEG => PixelFormat::Jpeg,
            _ => PixelFormat::Other,
        };
        // SAFETY: buf/len describe the driver-owned frame buffer.
        let data = unsafe { core::slice::from_raw_parts_mut(fb.buf, fb.len) };
        Some(FrameView {
            data,
            width: fb.width as u16,
            height: fb.height as u16,
            format,
        })
    }

    fn release_frame(&mut self) {
        if self.in_flight.is_null() {
            return;
        }
        // SAFETY: in_flight came from esp_camera_fb_get and is returned once.
        unsafe { esp_camera_fb_return(self.in_flight) };
        self.in_flight = core::ptr::null_mut();
    }

    fn reinitialize(&mut self) -> Result<(), CameraError> {
        self.release_frame();
        // SAFETY: single-threaded; no frame in flight after the release.
        unsafe {
            esp_camera_deinit();
            esp_idf_hal::delay::FreeRtos::delay_ms(CAMERA_SETTLE_MS);
            Self::driver_init()
        }
    }

    fn apply_tuning(&mut self, tuning: &SensorTuning) -> Result<(), CameraError> {
        // SAFETY: driver initialised; sensor_t setters are table-driven C
        // callbacks that tolerate any in-range argument.
        unsafe {
            let sensor = esp_camera_sensor_get();
            if sensor.is_null() {
                return Err(CameraError::SensorUnavailable);
            }
            let s = &mut *sensor;
            if let Some(f) = s.set_brightness {
                f(sensor, tuning.brightness.into());
            }
            if let Some(f) = s.set_contrast {
                f(sensor, tuning.contrast.into());
            }
            if let Some(f) = s.set_saturation {
                f(sensor, tuning.saturation.into());
            }
            if let Some(f) = s.set_gainceiling {
                f(sensor, u32::from(tuning.gain_ceiling));
            }
            if let Some(f) = s.set_exposure_ctrl {
                f(sensor, i32::from(tuning.exposure_ctrl));
            }
            if let Some(f) = s.set_aec2 {
                f(sensor, i32::from(tuning.aec2));
            }
            if let Some(f) = s.set_ae_level {
                f(sensor, tuning.ae_level.into());
            }
            if let Some(f) = s.set_gain_ctrl {
                f(sensor, i32::from(tuning.gain_ctrl));
            }
        }
        info!("camera: low-light tuning applied");
        Ok(())
    }
}

// ── Simulation ────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl EspCamera {
    pub fn new() -> Result<Self, CameraError> {
        info!("camera(sim): synthetic gradient source");
        Ok(Self {
            sim_frame: vec![0u8; FRAME_PIXELS],
            sim_phase: 0,
            sim_held: false,
        })
    }
}

#[cfg(not(target_os = "espidf"))]
impl CameraPort for EspCamera {
    fn acquire_frame(&mut self) -> Option<FrameView<'_>> {
        debug_assert!(!self.sim_held, "frame already in flight");
        self.sim_phase = self.sim_phase.wrapping_add(1);
        let phase = self.sim_phase;
        for (i, px) in self.sim_frame.iter_mut().enumerate() {
            *px = ((i % FRAME_WIDTH) as u8).wrapping_add(phase);
        }
        self.sim_held = true;
        Some(FrameView {
            data: &mut self.sim_frame,
            width: FRAME_WIDTH as u16,
            height: FRAME_HEIGHT as u16,
            format: PixelFormat::Grayscale,
        })
    }

    fn release_frame(&mut self) {
        self.sim_held = false;
    }

    fn reinitialize(&mut self) -> Result<(), CameraError> {
        info!("camera(sim): reinitialized");
        Ok(())
    }

    fn apply_tuning(&mut self, _tuning: &SensorTuning) -> Result<(), CameraError> {
        info!("camera(sim): tuning applied");
        Ok(())
    }
}
