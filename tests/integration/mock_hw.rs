//! Mock hardware adapter for integration tests.
//!
//! Implements all four hardware ports with scripted frame delivery and a
//! full display call history, so tests can assert on exactly what the
//! control loop did without touching real peripherals.

use nightowl::app::events::AppEvent;
use nightowl::app::ports::{
    ButtonPort, CameraPort, DisplayPort, EventSink, FrameView, PixelFormat, SystemPort,
};
use nightowl::config::SensorTuning;
use nightowl::error::CameraError;
use nightowl::video::transform::{FRAME_HEIGHT, FRAME_PIXELS, FRAME_WIDTH};
use std::collections::VecDeque;

// ── Frame script ──────────────────────────────────────────────

/// One scripted camera response.  `Valid(seed)` produces a full grayscale
/// frame whose pixels derive from the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameScript {
    Valid(u8),
    Missing,
    WrongFormat,
    WrongSize,
}

// ── Display call record ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    FillScreen(u16),
    FillRect { x: u16, y: u16, w: u16, h: u16, color: u16 },
    Print(String),
    Blit { x: u16, y: u16, w: u16, h: u16, first_pixel: u16 },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Frames handed out in order; an empty script falls back to
    /// `default_frame`.
    pub frames: VecDeque<FrameScript>,
    pub default_frame: FrameScript,
    backing: Vec<u8>,
    frame_held: bool,
    pub acquires: u32,
    pub releases: u32,

    pub display_calls: Vec<DisplayCall>,

    /// Raw switch level sampled by `is_pressed`.
    pub button_level: bool,

    pub reinit_ok: bool,
    pub reinit_count: u32,
    pub tuning_count: u32,

    pub delays: Vec<u32>,
    pub restarted: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
            default_frame: FrameScript::Missing,
            backing: vec![0u8; FRAME_PIXELS],
            frame_held: false,
            acquires: 0,
            releases: 0,
            display_calls: Vec::new(),
            button_level: false,
            reinit_ok: true,
            reinit_count: 0,
            tuning_count: 0,
            delays: Vec::new(),
            restarted: false,
        }
    }

    pub fn script(&mut self, frames: impl IntoIterator<Item = FrameScript>) {
        self.frames.extend(frames);
    }

    pub fn blits(&self) -> impl Iterator<Item = &DisplayCall> {
        self.display_calls
            .iter()
            .filter(|c| matches!(c, DisplayCall::Blit { .. }))
    }

    pub fn printed(&self) -> Vec<&str> {
        self.display_calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::Print(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraPort for MockHardware {
    fn acquire_frame(&mut self) -> Option<FrameView<'_>> {
        assert!(!self.frame_held, "acquire without matching release");
        self.acquires += 1;
        match self.frames.pop_front().unwrap_or(self.default_frame) {
            FrameScript::Missing => None,
            FrameScript::WrongFormat => {
                self.frame_held = true;
                Some(FrameView {
                    data: &mut self.backing,
                    width: FRAME_WIDTH as u16,
                    height: FRAME_HEIGHT as u16,
                    format: PixelFormat::Jpeg,
                })
            }
            FrameScript::WrongSize => {
                self.frame_held = true;
                Some(FrameView {
                    data: &mut self.backing[..64],
                    width: 8,
                    height: 8,
                    format: PixelFormat::Grayscale,
                })
            }
            FrameScript::Valid(seed) => {
                self.frame_held = true;
                for (i, px) in self.backing.iter_mut().enumerate() {
                    *px = seed.wrapping_add(i as u8);
                }
                Some(FrameView {
                    data: &mut self.backing,
                    width: FRAME_WIDTH as u16,
                    height: FRAME_HEIGHT as u16,
                    format: PixelFormat::Grayscale,
                })
            }
        }
    }

    fn release_frame(&mut self) {
        if self.frame_held {
            self.releases += 1;
            self.frame_held = false;
        }
    }

    fn reinitialize(&mut self) -> Result<(), CameraError> {
        self.reinit_count += 1;
        if self.reinit_ok {
            Ok(())
        } else {
            Err(CameraError::InitFailed(-1))
        }
    }

    fn apply_tuning(&mut self, _tuning: &SensorTuning) -> Result<(), CameraError> {
        self.tuning_count += 1;
        Ok(())
    }
}

impl DisplayPort for MockHardware {
    fn fill_screen(&mut self, color: u16) {
        self.display_calls.push(DisplayCall::FillScreen(color));
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) {
        self.display_calls
            .push(DisplayCall::FillRect { x, y, w, h, color });
    }

    fn set_cursor(&mut self, _x: u16, _y: u16) {}

    fn set_text_color(&mut self, _color: u16) {}

    fn print(&mut self, text: &str) {
        self.display_calls.push(DisplayCall::Print(text.to_string()));
    }

    fn blit(&mut self, x: u16, y: u16, w: u16, h: u16, pixels: &[u16]) {
        assert_eq!(pixels.len(), usize::from(w) * usize::from(h));
        self.display_calls.push(DisplayCall::Blit {
            x,
            y,
            w,
            h,
            first_pixel: pixels[0],
        });
    }
}

impl ButtonPort for MockHardware {
    fn is_pressed(&mut self) -> bool {
        self.button_level
    }
}

impl SystemPort for MockHardware {
    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }

    fn restart(&mut self) {
        self.restarted = true;
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
