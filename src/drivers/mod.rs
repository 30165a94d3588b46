//! Low-level drivers shared by the control loop and adapters.

pub mod button;
pub mod hw_init;
pub mod watchdog;
