//! Shared blackboard the state handlers read and write.

use crate::config::SystemConfig;

/// Full-screen banner a state wants drawn on entry.  The control loop
/// consumes the request after the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Active,
    Standby,
}

/// Inputs and outputs of one state-machine tick.
pub struct SessionContext {
    /// Monotonic milliseconds, refreshed by the control loop before each tick.
    pub now_ms: u32,
    /// Timestamp of the most recent session activation or extension.
    pub last_activation_ms: u32,
    /// Debounced button press registered this tick.
    pub button_pressed: bool,
    /// Banner the loop should draw after this tick, if any.
    pub banner_request: Option<Banner>,
    /// Set on session entry; tells the loop to restart frame pacing and the
    /// rate counter.
    pub reset_frame_clock: bool,
    pub config: SystemConfig,
}

impl SessionContext {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            now_ms: 0,
            last_activation_ms: 0,
            button_pressed: false,
            banner_request: None,
            reset_frame_clock: false,
            config,
        }
    }
}
