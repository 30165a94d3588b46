//! Pixel transform: orientation correction + night-vision color remap.
//!
//! The sensor is mounted upside-down relative to the panel, so every frame
//! gets its row order reversed in place before conversion.  The color remap
//! deliberately throws away chroma resolution to produce the green-dominant
//! "night vision" look — it is a fixed, lossy palette, not a defect.

/// Fixed sensor frame width in pixels.
pub const FRAME_WIDTH: usize = 160;
/// Fixed sensor frame height in pixels.
pub const FRAME_HEIGHT: usize = 120;
/// Samples per frame.
pub const FRAME_PIXELS: usize = FRAME_WIDTH * FRAME_HEIGHT;

/// Reverse the vertical row order of a row-major grayscale frame in place.
///
/// Uses a single row-sized scratch buffer rather than per-pixel swaps.
/// Handles odd and even heights; with an odd `height` the middle row is
/// left untouched.  Applying this twice restores the original frame.
pub fn flip_vertical(frame: &mut [u8], width: usize, height: usize) {
    debug_assert_eq!(frame.len(), width * height);
    debug_assert!(width <= FRAME_WIDTH);

    let mut row: heapless::Vec<u8, FRAME_WIDTH> = heapless::Vec::new();
    if row.resize(width, 0).is_err() {
        return;
    }

    for y in 0..height / 2 {
        let top = y * width;
        let bottom = (height - 1 - y) * width;
        row.copy_from_slice(&frame[top..top + width]);
        frame.copy_within(bottom..bottom + width, top);
        frame[bottom..bottom + width].copy_from_slice(&row);
    }
}

/// Map one luminance sample to a packed RGB565 color with the green tint:
/// red and blue get 4 significant bits, green keeps 6.
#[inline]
pub fn gray_to_rgb565(g: u8) -> u16 {
    let r = u16::from(g >> 4);
    let green = u16::from(g >> 2);
    let b = u16::from(g >> 4);
    (r << 11) | (green << 5) | b
}

/// Full per-frame transform: flip the frame vertically in place, then
/// convert every sample into `out`.
///
/// Both slices must be exactly [`FRAME_PIXELS`] long; the control loop
/// validates frame dimensions before calling this, so a mismatch here is
/// a programming error rather than a runtime fault.
pub fn correct_and_convert(frame: &mut [u8], out: &mut [u16]) {
    debug_assert_eq!(frame.len(), FRAME_PIXELS);
    debug_assert_eq!(out.len(), FRAME_PIXELS);

    flip_vertical(frame, FRAME_WIDTH, FRAME_HEIGHT);
    for (dst, &g) in out.iter_mut().zip(frame.iter()) {
        *dst = gray_to_rgb565(g);
    }
}
