//! Level-polled button debouncer.
//!
//! ## Hardware
//!
//! Active-low momentary switch on an input with internal pull-up.  The main
//! loop samples the pin level every control tick and feeds it to `tick()`,
//! which emits exactly one press event once the level has been stable low
//! for the debounce interval.  The press must be released before another
//! event can fire, so holding the button yields a single event.

/// Internal debounce state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Released,
    Settling { since_ms: u32 },
    Held,
}

pub struct ButtonDebouncer {
    state: DebounceState,
    debounce_ms: u32,
}

impl ButtonDebouncer {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            state: DebounceState::Released,
            debounce_ms,
        }
    }

    /// Feed one raw level sample.  `pressed_level` is true while the switch
    /// is held down.  Returns true on the tick the press is accepted.
    pub fn tick(&mut self, now_ms: u32, pressed_level: bool) -> bool {
        match self.state {
            DebounceState::Released => {
                if pressed_level {
                    self.state = DebounceState::Settling { since_ms: now_ms };
                }
                false
            }

            DebounceState::Settling { since_ms } => {
                if !pressed_level {
                    // Bounce, re-arm.
                    self.state = DebounceState::Released;
                    false
                } else if now_ms.wrapping_sub(since_ms) >= self.debounce_ms {
                    self.state = DebounceState::Held;
                    true
                } else {
                    false
                }
            }

            DebounceState::Held => {
                if !pressed_level {
                    self.state = DebounceState::Released;
                }
                false
            }
        }
    }
}
