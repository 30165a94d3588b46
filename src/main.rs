//! NightOwl Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single-threaded control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter          LogEventSink    MonotonicTime  │
//! │  (Camera+Display+Button)  (EventSink)     (uptime)       │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  Session FSM · Fault monitor · Video pipeline  │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
mod adapters;
pub mod app;
pub mod config;
mod drivers;
mod error;
pub mod fsm;
mod pins;
pub mod video;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{error, info};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::MonotonicTime;
use app::ports::{CameraPort, SystemPort};
use app::service::AppService;
use config::SystemConfig;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  NightOwl v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        error!("HAL init failed: {e} — halting");
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let mut hw = build_hardware()?;
    let watchdog = drivers::watchdog::Watchdog::new();
    let time = MonotonicTime::new();
    let mut log_sink = LogEventSink::new();

    // ── 3. Construct app service ──────────────────────────────
    let config = SystemConfig::default();
    let mut app = AppService::new(config);

    // The display buffer must exist before the first frame; without it the
    // device cannot do anything useful, so a failed allocation reboots.
    if let Err(fault) = app.ensure_startup_allocation() {
        error!("startup allocation failed: {}", fault.message());
        app::screens::draw_fatal(&mut hw, fault);
        hw.delay_ms(config.fatal_notice_ms);
        hw.restart();
        return Ok(());
    }

    if let Err(e) = hw.apply_tuning(&config::SensorTuning::default()) {
        // Degraded image quality, not a reason to refuse to boot.
        log::warn!("sensor tuning failed: {e}");
    }

    app.start(&mut hw, &mut log_sink);
    info!("System ready. Entering control loop.");

    // ── 4. Control loop ───────────────────────────────────────
    loop {
        let now_ms = time.uptime_ms();

        if let Err(fault) = app.tick(&mut hw, &mut log_sink, now_ms) {
            error!("unrecoverable fault: {} — restarting", fault.message());
            hw.restart();
            #[cfg(not(target_os = "espidf"))]
            break;
        }

        watchdog.feed();
        hw.delay_ms(config.control_loop_interval_ms);
    }

    #[allow(unreachable_code)]
    Ok(())
}

fn build_hardware() -> Result<HardwareAdapter> {
    #[cfg(target_os = "espidf")]
    {
        use esp_idf_hal::peripherals::Peripherals;

        // The typed peripheral API needs the concrete gpioN fields, so the
        // TFT wiring from pins.rs is repeated here.  Keep the two in sync.
        const _: () = assert!(
            pins::TFT_SCLK_GPIO == 14
                && pins::TFT_MOSI_GPIO == 15
                && pins::TFT_CS_GPIO == 12
                && pins::TFT_DC_GPIO == 2
                && pins::TFT_RST_GPIO == 13
        );

        let peripherals = Peripherals::take()?;
        let camera = adapters::camera::EspCamera::new()?;
        let display = adapters::display::St7735Display::new(
            peripherals.spi2,
            peripherals.pins.gpio14.into(),
            peripherals.pins.gpio15.into(),
            peripherals.pins.gpio12.into(),
            peripherals.pins.gpio2.into(),
            peripherals.pins.gpio13.into(),
        )?;
        Ok(HardwareAdapter::new(camera, display))
    }

    #[cfg(not(target_os = "espidf"))]
    {
        let camera = adapters::camera::EspCamera::new()?;
        let display = adapters::display::St7735Display::new()?;
        Ok(HardwareAdapter::new(camera, display))
    }
}
