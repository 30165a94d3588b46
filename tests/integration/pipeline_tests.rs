//! Frame pipeline and fault recovery tests: acquire/release discipline,
//! display output, camera reinitialization, and the fatal allocation
//! paths, all through the full `AppService` tick.

use crate::mock_hw::{DisplayCall, FrameScript, MockHardware, RecordingSink};
use nightowl::app::events::AppEvent;
use nightowl::app::screens::RED;
use nightowl::app::service::AppService;
use nightowl::config::SystemConfig;
use nightowl::error::FatalError;
use nightowl::video::framebuffer::BufferAllocator;
use nightowl::video::transform::{FRAME_HEIGHT, FRAME_WIDTH};
use std::collections::VecDeque;

const TICK_MS: u32 = 10;

/// Allocator whose responses are scripted per call; an exhausted script
/// always succeeds.
struct ScriptedAllocator {
    responses: VecDeque<bool>,
}

impl ScriptedAllocator {
    fn new(responses: impl IntoIterator<Item = bool>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
        }
    }
}

impl BufferAllocator for ScriptedAllocator {
    fn alloc_pixels(&mut self, len: usize) -> Option<Vec<u16>> {
        if self.responses.pop_front().unwrap_or(true) {
            Some(vec![0u16; len])
        } else {
            None
        }
    }
}

/// Build an active session with valid default frames, ready for scripting.
fn active_session() -> (AppService, MockHardware, RecordingSink, u32) {
    let config = SystemConfig::default();
    let mut app = AppService::new(config);
    app.ensure_startup_allocation().unwrap();
    let mut hw = MockHardware::new();
    hw.default_frame = FrameScript::Valid(7);
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);

    // Press the button through the debounce interval.
    let mut now_ms = 0;
    for _ in 0..=(config.button_debounce_ms / TICK_MS) {
        hw.button_level = true;
        app.tick(&mut hw, &mut sink, now_ms).unwrap();
        now_ms += TICK_MS;
    }
    hw.button_level = false;
    (app, hw, sink, now_ms)
}

/// Advance `ms` of session time; returns the first fatal fault, if any.
fn run_session<A: BufferAllocator>(
    app: &mut AppService<A>,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
    now_ms: &mut u32,
    ms: u32,
) -> Result<(), FatalError> {
    for _ in 0..(ms / TICK_MS) {
        app.tick(hw, sink, *now_ms)?;
        *now_ms += TICK_MS;
    }
    Ok(())
}

#[test]
fn frames_reach_the_display_at_frame_rate() {
    let (mut app, mut hw, mut sink, mut now) = active_session();
    run_session(&mut app, &mut hw, &mut sink, &mut now, 1000).unwrap();

    let blits: Vec<_> = hw.blits().collect();
    // One frame per 50ms period over one second, give or take pacing.
    assert!(
        (18..=21).contains(&blits.len()),
        "expected ~20 blits, got {}",
        blits.len()
    );
    for call in &blits {
        let DisplayCall::Blit { x, y, w, h, .. } = call else {
            unreachable!()
        };
        assert_eq!((*x, *y), (0, 20));
        assert_eq!((*w, *h), (FRAME_WIDTH as u16, FRAME_HEIGHT as u16));
    }
    assert_eq!(hw.acquires, hw.releases);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FrameFault { .. })), 0);
}

#[test]
fn fps_report_counts_frames_per_window() {
    let (mut app, mut hw, mut sink, mut now) = active_session();
    run_session(&mut app, &mut hw, &mut sink, &mut now, 6000).unwrap();

    let reports: Vec<u16> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::FpsReport(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert!(!reports.is_empty());
    // 5s window at one frame per 50ms.
    assert!(
        (95..=105).contains(&reports[0]),
        "unexpected frame count {}",
        reports[0]
    );

    // The readout is drawn with its label, not as a bare number.
    let expected = format!("FPS:{}", reports[0]);
    assert!(
        hw.printed().contains(&expected.as_str()),
        "no {expected:?} line reached the display"
    );
}

#[test]
fn every_acquire_is_released_even_for_bad_frames() {
    let (mut app, mut hw, mut sink, mut now) = active_session();
    hw.script([
        FrameScript::WrongFormat,
        FrameScript::Valid(1),
        FrameScript::WrongSize,
        FrameScript::Missing,
        FrameScript::Valid(2),
    ]);
    run_session(&mut app, &mut hw, &mut sink, &mut now, 400).unwrap();

    // Missing frames acquire nothing, so held-frame releases must match the
    // held-frame acquires exactly (mock_hw asserts on double release).
    assert!(hw.acquires > 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FrameFault { .. })), 3);
}

#[test]
fn sixth_consecutive_fault_reinitializes_camera_once() {
    let (mut app, mut hw, mut sink, mut now) = active_session();
    hw.script(std::iter::repeat_n(FrameScript::Missing, 6));
    run_session(&mut app, &mut hw, &mut sink, &mut now, 2000).unwrap();

    assert_eq!(hw.reinit_count, 1);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::CameraRecoveryStarted)),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CameraRecovered)), 1);
    // Recovery re-applies the low-light tuning.
    assert_eq!(hw.tuning_count, 1);
    // The operator notice stayed up for its configured duration.
    assert!(hw.delays.contains(&SystemConfig::default().recovery_notice_ms));
}

#[test]
fn below_threshold_fault_runs_do_not_reinitialize() {
    let (mut app, mut hw, mut sink, mut now) = active_session();
    hw.script([
        FrameScript::Missing,
        FrameScript::Missing,
        FrameScript::Missing,
        FrameScript::Valid(1),
        FrameScript::Missing,
        FrameScript::Missing,
        FrameScript::Missing,
    ]);
    run_session(&mut app, &mut hw, &mut sink, &mut now, 1000).unwrap();
    assert_eq!(hw.reinit_count, 0);
}

#[test]
fn failed_reinit_is_fatal_and_shows_error_screen() {
    let (mut app, mut hw, mut sink, mut now) = active_session();
    hw.reinit_ok = false;
    hw.script(std::iter::repeat_n(FrameScript::Missing, 6));

    let result = run_session(&mut app, &mut hw, &mut sink, &mut now, 2000);
    assert_eq!(result, Err(FatalError::CameraRecovery));
    assert!(hw
        .display_calls
        .contains(&DisplayCall::FillScreen(RED)));
    assert!(hw.printed().contains(&"CAMERA INIT"));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::Fatal { code: 3, .. })),
        1
    );
}

#[test]
fn fault_arriving_after_successful_recovery_starts_a_new_run() {
    let (mut app, mut hw, mut sink, mut now) = active_session();
    hw.script(std::iter::repeat_n(FrameScript::Missing, 6));
    run_session(&mut app, &mut hw, &mut sink, &mut now, 1000).unwrap();
    assert_eq!(hw.reinit_count, 1);

    // Healthy frames, then a second full fault run: another reinit, not a
    // restart.
    run_session(&mut app, &mut hw, &mut sink, &mut now, 500).unwrap();
    hw.script(std::iter::repeat_n(FrameScript::Missing, 6));
    run_session(&mut app, &mut hw, &mut sink, &mut now, 1000).unwrap();
    assert_eq!(hw.reinit_count, 2);
}

#[test]
fn startup_allocation_failure_is_fatal() {
    let mut app = AppService::with_allocator(
        SystemConfig::default(),
        ScriptedAllocator::new([false]),
    );
    assert_eq!(
        app.ensure_startup_allocation(),
        Err(FatalError::StartupAllocation)
    );
}

#[test]
fn missing_buffer_is_reallocated_mid_session() {
    // Startup allocation never ran, so the first frame cycle finds no
    // buffer and requests a reallocation, which succeeds.
    let config = SystemConfig::default();
    let mut app = AppService::with_allocator(config, ScriptedAllocator::new([]));
    let mut hw = MockHardware::new();
    hw.default_frame = FrameScript::Valid(3);
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);

    let mut now = 0;
    for _ in 0..=(config.button_debounce_ms / TICK_MS) {
        hw.button_level = true;
        app.tick(&mut hw, &mut sink, now).unwrap();
        now += TICK_MS;
    }
    hw.button_level = false;
    run_session(&mut app, &mut hw, &mut sink, &mut now, 500).unwrap();

    assert_eq!(sink.count(|e| matches!(e, AppEvent::BufferReallocated)), 1);
    // Frames flow once the buffer exists.
    assert!(hw.blits().count() > 0);
}

#[test]
fn double_allocation_failure_is_fatal() {
    let config = SystemConfig::default();
    let mut app = AppService::with_allocator(config, ScriptedAllocator::new([false, false]));
    let mut hw = MockHardware::new();
    hw.default_frame = FrameScript::Valid(3);
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);

    let mut now = 0;
    for _ in 0..=(config.button_debounce_ms / TICK_MS) {
        hw.button_level = true;
        app.tick(&mut hw, &mut sink, now).unwrap();
        now += TICK_MS;
    }
    hw.button_level = false;

    let result = run_session(&mut app, &mut hw, &mut sink, &mut now, 500);
    assert_eq!(result, Err(FatalError::BufferReallocation));
    // Two bounded attempts, each preceded by the settle delay.
    let settles = hw
        .delays
        .iter()
        .filter(|&&d| d == config.realloc_settle_ms)
        .count();
    assert_eq!(settles, 2);
    assert!(hw.printed().contains(&"BUFFER ALLOC"));
}
