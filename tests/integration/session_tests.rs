//! Session lifecycle tests: button activation, extension, and the
//! inactivity timeout, driven through the full `AppService` tick with
//! mock hardware.

use crate::mock_hw::{FrameScript, MockHardware, RecordingSink};
use nightowl::app::events::AppEvent;
use nightowl::app::service::AppService;
use nightowl::config::SystemConfig;
use nightowl::fsm::StateId;

const TICK_MS: u32 = 10;

struct Harness {
    app: AppService,
    hw: MockHardware,
    sink: RecordingSink,
    now_ms: u32,
    config: SystemConfig,
}

impl Harness {
    fn new() -> Self {
        let config = SystemConfig::default();
        let mut app = AppService::new(config);
        app.ensure_startup_allocation().unwrap();
        let mut hw = MockHardware::new();
        hw.default_frame = FrameScript::Valid(0);
        let mut sink = RecordingSink::new();
        app.start(&mut hw, &mut sink);
        Self {
            app,
            hw,
            sink,
            now_ms: 0,
            config,
        }
    }

    /// Advance time in control ticks with the given raw button level.
    fn run_for(&mut self, ms: u32, button_level: bool) {
        let ticks = ms / TICK_MS;
        for _ in 0..ticks {
            self.hw.button_level = button_level;
            self.app
                .tick(&mut self.hw, &mut self.sink, self.now_ms)
                .expect("no fatal fault expected");
            self.now_ms += TICK_MS;
        }
    }

    /// A full press: held past the debounce interval, then released.
    fn press_button(&mut self) {
        self.run_for(self.config.button_debounce_ms + TICK_MS, true);
        self.run_for(TICK_MS, false);
    }
}

#[test]
fn boots_into_standby() {
    let h = Harness::new();
    assert_eq!(h.app.current_state(), StateId::Standby);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::Started)), 1);
}

#[test]
fn press_starts_session() {
    let mut h = Harness::new();
    h.press_button();
    assert_eq!(h.app.current_state(), StateId::Active);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::SessionStarted)), 1);
    // The active banner was drawn.
    assert!(h.hw.printed().contains(&"NIGHT VISION ACTIVE"));
}

#[test]
fn short_glitch_does_not_start_session() {
    let mut h = Harness::new();
    // Held for less than the debounce interval.
    h.run_for(h.config.button_debounce_ms - TICK_MS, true);
    h.run_for(100, false);
    assert_eq!(h.app.current_state(), StateId::Standby);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::SessionStarted)), 0);
}

#[test]
fn holding_button_only_activates_once() {
    let mut h = Harness::new();
    h.run_for(2000, true);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::SessionStarted)), 1);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::SessionExtended)), 0);
}

#[test]
fn session_times_out_after_inactivity() {
    let mut h = Harness::new();
    h.press_button();
    let timeout = h.config.inactivity_timeout_ms;
    h.run_for(timeout + 100, false);
    assert_eq!(h.app.current_state(), StateId::Standby);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::SessionEnded)), 1);
    assert!(h.hw.printed().contains(&"STANDBY"));
}

#[test]
fn press_during_session_extends_deadline() {
    let mut h = Harness::new();
    h.press_button();
    let timeout = h.config.inactivity_timeout_ms;

    // Sit idle for most of the timeout, then press again.
    h.run_for(timeout - 10_000, false);
    assert_eq!(h.app.current_state(), StateId::Active);
    h.press_button();
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::SessionExtended)), 1);

    // The original deadline passes without ending the session.
    h.run_for(20_000, false);
    assert_eq!(h.app.current_state(), StateId::Active);

    // The extended deadline does end it.
    h.run_for(timeout, false);
    assert_eq!(h.app.current_state(), StateId::Standby);
}

#[test]
fn no_frames_acquired_while_in_standby() {
    let mut h = Harness::new();
    h.run_for(5000, false);
    assert_eq!(h.hw.acquires, 0);
    assert_eq!(h.hw.blits().count(), 0);
}

#[test]
fn restarted_session_draws_banner_again() {
    let mut h = Harness::new();
    h.press_button();
    h.run_for(h.config.inactivity_timeout_ms + 100, false);
    assert_eq!(h.app.current_state(), StateId::Standby);
    h.press_button();
    assert_eq!(h.app.current_state(), StateId::Active);
    assert_eq!(h.sink.count(|e| matches!(e, AppEvent::SessionStarted)), 2);
    let banners = h
        .hw
        .printed()
        .iter()
        .filter(|s| **s == "NIGHT VISION ACTIVE")
        .count();
    assert_eq!(banners, 2);
}
