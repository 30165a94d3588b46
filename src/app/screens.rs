//! Screen layout: fixed colours, coordinates, and draw routines for every
//! full-screen view.  All drawing goes through the
//! [`DisplayPort`](super::ports::DisplayPort) so these run identically on
//! hardware and in host tests.

use super::ports::DisplayPort;
use crate::error::FatalError;
use core::fmt::Write as _;

pub const BLACK: u16 = 0x0000;
pub const GREEN: u16 = 0x07E0;
pub const RED: u16 = 0xF800;
pub const WHITE: u16 = 0xFFFF;

/// Top-left corner of the video area, below the status strip.
pub const VIDEO_ORIGIN: (u16, u16) = (0, 20);

/// Area the rate readout occupies inside the status strip.
const FPS_RECT: (u16, u16, u16, u16) = (120, 5, 38, 10);

pub fn draw_init_splash(display: &mut impl DisplayPort) {
    display.fill_screen(BLACK);
    display.set_text_color(GREEN);
    display.set_cursor(10, 40);
    display.print("NIGHT VISION");
    display.set_cursor(25, 60);
    display.print("Starting...");
}

pub fn draw_active_banner(display: &mut impl DisplayPort) {
    display.fill_screen(BLACK);
    display.set_text_color(GREEN);
    display.set_cursor(5, 5);
    display.print("NIGHT VISION ACTIVE");
}

pub fn draw_standby_banner(display: &mut impl DisplayPort) {
    display.fill_screen(BLACK);
    display.set_text_color(GREEN);
    display.set_cursor(20, 40);
    display.print("NIGHT VISION");
    display.set_cursor(30, 60);
    display.print("STANDBY");
    display.set_cursor(25, 80);
    display.print("press button");
}

/// Shown while the camera driver is being torn down and rebuilt.
pub fn draw_recovery_notice(display: &mut impl DisplayPort) {
    display.fill_screen(BLACK);
    display.set_text_color(WHITE);
    display.set_cursor(10, 50);
    display.print("CAMERA RESET...");
}

pub fn draw_fatal(display: &mut impl DisplayPort, fault: FatalError) {
    display.fill_screen(RED);
    display.set_text_color(WHITE);
    display.set_cursor(10, 40);
    display.print(fault.message());
    display.set_cursor(10, 60);
    let mut line: heapless::String<16> = heapless::String::new();
    // Formatting a u8 into a 16-byte buffer cannot fail.
    let _ = write!(line, "code {}", fault.code());
    display.print(&line);
    display.set_cursor(10, 80);
    display.print("restarting");
}

/// Overwrite the rate readout in the status strip.
pub fn draw_fps(display: &mut impl DisplayPort, frames: u16) {
    let (x, y, w, h) = FPS_RECT;
    display.fill_rect(x, y, w, h, BLACK);
    display.set_text_color(GREEN);
    display.set_cursor(x, y);
    let mut line: heapless::String<16> = heapless::String::new();
    let _ = write!(line, "FPS:{frames}");
    display.print(&line);
}
