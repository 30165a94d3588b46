//! State handlers for the standby/active session lifecycle.

use super::context::{Banner, SessionContext};
use super::{StateDescriptor, StateId};
use log::info;

/// Build the state table in [`StateId`] index order.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Standby
        StateDescriptor {
            on_enter: Some(standby_enter),
            on_exit: None,
            on_update: Some(standby_update),
        },
        // Active
        StateDescriptor {
            on_enter: Some(active_enter),
            on_exit: None,
            on_update: Some(active_update),
        },
    ]
}

fn standby_enter(ctx: &mut SessionContext) {
    ctx.banner_request = Some(Banner::Standby);
}

fn standby_update(ctx: &mut SessionContext) -> Option<StateId> {
    if ctx.button_pressed {
        ctx.last_activation_ms = ctx.now_ms;
        Some(StateId::Active)
    } else {
        None
    }
}

fn active_enter(ctx: &mut SessionContext) {
    ctx.banner_request = Some(Banner::Active);
    ctx.reset_frame_clock = true;
}

fn active_update(ctx: &mut SessionContext) -> Option<StateId> {
    if ctx.button_pressed {
        info!("session extended");
        ctx.last_activation_ms = ctx.now_ms;
        return None;
    }
    let idle = ctx.now_ms.wrapping_sub(ctx.last_activation_ms);
    if idle > ctx.config.inactivity_timeout_ms {
        info!("session timed out after {idle} ms idle");
        Some(StateId::Standby)
    } else {
        None
    }
}
