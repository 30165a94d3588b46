//! Session state machine.
//!
//! A fixed table of [`StateDescriptor`]s drives the standby/active session
//! lifecycle.  Handlers are plain function pointers over a shared
//! [`context::SessionContext`]; an `on_update` returning `Some(state)`
//! requests a transition, which runs the exit/enter hooks in order.

pub mod context;
pub mod states;

use context::SessionContext;
use log::info;

/// Identifiers for every session state.  Doubles as the state-table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateId {
    Standby = 0,
    Active = 1,
}

impl StateId {
    pub const COUNT: usize = 2;

    pub fn name(self) -> &'static str {
        match self {
            Self::Standby => "standby",
            Self::Active => "active",
        }
    }
}

/// Handlers for one state.  Any hook may be `None`.
pub struct StateDescriptor {
    pub on_enter: Option<fn(&mut SessionContext)>,
    pub on_exit: Option<fn(&mut SessionContext)>,
    pub on_update: Option<fn(&mut SessionContext) -> Option<StateId>>,
}

pub struct Fsm {
    table: [StateDescriptor; StateId::COUNT],
    current: StateId,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial,
        }
    }

    /// Run the initial state's enter hook.  Call once before ticking.
    pub fn start(&mut self, ctx: &mut SessionContext) {
        info!("fsm: starting in {}", self.current.name());
        if let Some(enter) = self.table[self.current as usize].on_enter {
            enter(ctx);
        }
    }

    /// Run the current state's update hook and perform at most one
    /// transition.
    pub fn tick(&mut self, ctx: &mut SessionContext) {
        let Some(update) = self.table[self.current as usize].on_update else {
            return;
        };
        if let Some(next) = update(ctx) {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    fn transition(&mut self, next: StateId, ctx: &mut SessionContext) {
        if next == self.current {
            return;
        }
        info!("fsm: {} -> {}", self.current.name(), next.name());
        if let Some(exit) = self.table[self.current as usize].on_exit {
            exit(ctx);
        }
        self.current = next;
        if let Some(enter) = self.table[self.current as usize].on_enter {
            enter(ctx);
        }
    }
}
