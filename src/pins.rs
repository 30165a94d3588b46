//! GPIO / peripheral pin assignments for the NightOwl main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! The camera occupies the standard AI-Thinker ESP32-CAM DVP pinout; the
//! ST7735 display shares the remaining usable pins on the header.

// ---------------------------------------------------------------------------
// Camera sensor (OV2640, parallel DVP interface)
// ---------------------------------------------------------------------------

/// Camera power-down (active HIGH — held LOW during operation).
pub const CAM_PWDN_GPIO: i32 = 32;
/// Sensor reset line (not wired on this board).
pub const CAM_RESET_GPIO: i32 = -1;
/// Master clock output to the sensor.
pub const CAM_XCLK_GPIO: i32 = 0;
/// SCCB (I²C-like) data.
pub const CAM_SIOD_GPIO: i32 = 26;
/// SCCB clock.
pub const CAM_SIOC_GPIO: i32 = 27;

/// Parallel data bus D0–D7 (sensor Y2–Y9).
pub const CAM_D0_GPIO: i32 = 5;
pub const CAM_D1_GPIO: i32 = 18;
pub const CAM_D2_GPIO: i32 = 19;
pub const CAM_D3_GPIO: i32 = 21;
pub const CAM_D4_GPIO: i32 = 36;
pub const CAM_D5_GPIO: i32 = 39;
pub const CAM_D6_GPIO: i32 = 34;
pub const CAM_D7_GPIO: i32 = 35;

/// Frame sync signals.
pub const CAM_VSYNC_GPIO: i32 = 25;
pub const CAM_HREF_GPIO: i32 = 23;
pub const CAM_PCLK_GPIO: i32 = 22;

/// Sensor master clock frequency (20 MHz).
pub const CAM_XCLK_FREQ_HZ: i32 = 20_000_000;

// ---------------------------------------------------------------------------
// ST7735 TFT display (SPI, software CS)
// ---------------------------------------------------------------------------

pub const TFT_CS_GPIO: i32 = 12;
pub const TFT_RST_GPIO: i32 = 13;
pub const TFT_DC_GPIO: i32 = 2;
pub const TFT_SCLK_GPIO: i32 = 14;
pub const TFT_MOSI_GPIO: i32 = 15;

/// SPI clock for the panel (26 MHz — ST7735 maximum write rate).
pub const TFT_SPI_FREQ_HZ: u32 = 26_000_000;

// ---------------------------------------------------------------------------
// User button (active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button toggling the imaging session.
pub const BUTTON_GPIO: i32 = 4;
