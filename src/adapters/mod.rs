//! Adapters — concrete implementations of the port traits.
//!
//! Everything that touches real hardware lives here, behind
//! `target_os = "espidf"` gates with simulation stubs for host builds.

pub mod camera;
pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
