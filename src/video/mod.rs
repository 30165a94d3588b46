//! Frame pipeline domain logic — pure, hardware-free.
//!
//! Everything the control loop needs between "a raw grayscale frame
//! arrived" and "RGB565 pixels are ready to blit": orientation
//! correction and color remap ([`transform`]), ownership of the single
//! display pixel buffer ([`framebuffer`]), the consecutive-fault
//! recovery policy ([`fault`]), and the observational frame-rate
//! counter ([`fps`]).

pub mod fault;
pub mod fps;
pub mod framebuffer;
pub mod transform;
