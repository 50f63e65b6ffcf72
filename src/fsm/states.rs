//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  MENU ──[hold ≥ start_hold]──▶ PLAYING ──[remaining = 0]──▶ GAME OVER
//!   ▲  ↻ rotary: difficulty        │  ▲                           │
//!   │                       Pause  │  │ Resume                    │
//!   │                              ▼  │                           │
//!   │                             PAUSED                          │
//!   └───────────────────[hold > confirm_hold]─────────────────────┘
//! ```
//!
//! Paused is entered and left only through `Fsm::force_transition`
//! driven by an `AppCommand`; no handler returns it.

use log::{debug, info};

use super::context::{FsmContext, Notice};
use super::{StateDescriptor, StateId};
use crate::drivers::button::HoldRule;
use crate::error::Fault;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        StateDescriptor {
            id: StateId::Menu,
            on_enter: Some(menu_enter),
            on_exit: None,
            on_update: menu_update,
        },
        StateDescriptor {
            id: StateId::Playing,
            on_enter: None,
            on_exit: None,
            on_update: playing_update,
        },
        StateDescriptor {
            id: StateId::GameOver,
            on_enter: Some(game_over_enter),
            on_exit: None,
            on_update: game_over_update,
        },
        StateDescriptor {
            id: StateId::Paused,
            on_enter: None,
            on_exit: None,
            on_update: paused_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  MENU
// ═══════════════════════════════════════════════════════════════════════════

fn menu_enter(ctx: &mut FsmContext) {
    let rule = HoldRule::AtLeast(ctx.config.start_hold_secs);
    ctx.hold.rearm(rule, ctx.input.select_pressed);
    info!("MENU: {} selected", ctx.difficulty.name());
}

fn menu_update(ctx: &mut FsmContext) -> Option<StateId> {
    if let Some(delta) = ctx.input.encoder_delta {
        ctx.select_difficulty(delta);
    }

    let fired = ctx.hold.tick(ctx.input.select_pressed, ctx.input.now);
    if fired && ctx.active_level.is_none() {
        ctx.start_level();
        return Some(StateId::Playing);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  PLAYING
// ═══════════════════════════════════════════════════════════════════════════

fn playing_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.remaining() <= 0.0 {
        let (sliced, target) = (ctx.sliced_count, ctx.target());
        ctx.spawner.disarm();
        ctx.notify(Notice::LevelFinished { sliced, target });
        return Some(StateId::GameOver);
    }

    let elapsed = ctx.elapsed();
    match ctx.spawner.spawn_due(elapsed, &mut ctx.apples, &ctx.arena) {
        Ok(_) => {}
        Err(Fault::LevelExhausted) => {
            debug!("PLAYING: all {} apples spawned", ctx.apples.len());
            ctx.spawner.disarm();
            ctx.notify(Notice::SpawningStopped);
        }
        Err(fault) => debug!("PLAYING: spawn fault {fault}"),
    }

    let now = ctx.adjusted_now();
    let limit = ctx.config.cut_time_limit_secs;
    let arena = ctx.arena;
    for apple in ctx.apples.iter_mut() {
        apple.update(now, &arena, limit);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  GAME OVER
// ═══════════════════════════════════════════════════════════════════════════

fn game_over_enter(ctx: &mut FsmContext) {
    let rule = HoldRule::Exceeds(ctx.config.confirm_hold_secs);
    ctx.hold.rearm(rule, ctx.input.select_pressed);
    info!(
        "GAME OVER: {}/{} sliced",
        ctx.sliced_count,
        ctx.target()
    );
}

fn game_over_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.hold.tick(ctx.input.select_pressed, ctx.input.now) {
        ctx.reset_to_menu();
        return Some(StateId::Menu);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  PAUSED
// ═══════════════════════════════════════════════════════════════════════════

fn paused_update(_ctx: &mut FsmContext) -> Option<StateId> {
    None
}
