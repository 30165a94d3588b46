//! System configuration parameters
//!
//! All tunable parameters for the NightOwl viewer, plus the fixed sensor
//! tuning profile applied at camera init and reinit.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Session ---
    /// Session auto-off after this long without a button press (milliseconds)
    pub inactivity_timeout_ms: u32,
    /// Debounce guard window for the session button (milliseconds)
    pub button_debounce_ms: u32,

    // --- Frame pipeline ---
    /// Minimum spacing between processed frames (milliseconds)
    pub frame_period_ms: u32,
    /// Control loop tick interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// FPS readout window (milliseconds)
    pub fps_report_interval_ms: u32,

    // --- Fault recovery ---
    /// Consecutive camera faults tolerated before reinitialization
    pub camera_fault_threshold: u8,
    /// Heap settle delay before each buffer reallocation attempt (milliseconds)
    pub realloc_settle_ms: u32,
    /// How long the "camera ok" notice stays up after a successful reinit (milliseconds)
    pub recovery_notice_ms: u32,
    /// How long a fatal error screen stays up before restart (milliseconds)
    pub fatal_notice_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Session
            inactivity_timeout_ms: 5 * 60 * 1000, // 5 minutes
            button_debounce_ms: 50,

            // Frame pipeline
            frame_period_ms: 50,          // 20 Hz ceiling
            control_loop_interval_ms: 10, // 100 Hz tick
            fps_report_interval_ms: 5000,

            // Fault recovery
            camera_fault_threshold: 5,
            realloc_settle_ms: 100,
            recovery_notice_ms: 1000,
            fatal_notice_ms: 2000,
        }
    }
}

/// Fixed sensor tuning profile for low-light operation.
///
/// Applied once at camera init and again after every reinitialization.
/// These are board-level constants, not runtime-tunable by the control core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensorTuning {
    pub brightness: i8,
    pub contrast: i8,
    pub saturation: i8,
    pub gain_ceiling: u8,
    pub exposure_ctrl: bool,
    pub aec2: bool,
    pub ae_level: i8,
    pub gain_ctrl: bool,
}

impl Default for SensorTuning {
    fn default() -> Self {
        Self {
            brightness: 1,
            contrast: 2,
            saturation: -1, // desaturate — the green tint is applied in software
            gain_ceiling: 6,
            exposure_ctrl: true,
            aec2: false,
            ae_level: 0,
            gain_ctrl: true,
        }
    }
}
