//! Session state machine engine.
//!
//! States are rows of plain function pointers indexed by [`StateId`]:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌──────────┬───────────┬──────────┬───────────────────┐ │
//! │  │ StateId  │ on_enter  │ on_exit  │ on_update         │ │
//! │  ├──────────┼───────────┼──────────┼───────────────────┤ │
//! │  │ Menu     │ fn(ctx)   │    —     │ fn(ctx)->Option<> │ │
//! │  │ Playing  │    —      │    —     │ fn(ctx)->Option<> │ │
//! │  │ GameOver │ fn(ctx)   │    —     │ fn(ctx)->Option<> │ │
//! │  │ Paused   │    —      │    —     │ fn(ctx)->Option<> │ │
//! │  └──────────┴───────────┴──────────┴───────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `tick` runs the current row's `on_update`; a `Some(next)` result
//! runs `on_exit`, switches, then runs the next row's `on_enter`.  Every
//! handler gets the caller's `&mut FsmContext` (inputs, session, config).

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

/// Session states.  The discriminant is the row in
/// [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Menu = 0,
    Playing = 1,
    GameOver = 2,
    Paused = 3,
}

impl StateId {
    /// Number of states; sizes the table array.
    pub const COUNT: usize = 4;

    pub const fn name(self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::Playing => "Playing",
            Self::GameOver => "GameOver",
            Self::Paused => "Paused",
        }
    }
}

/// `on_enter` / `on_exit` action, run once per transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Per-tick handler.  `Some(next)` requests a transition.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

/// One row of the state table, stored at index `id as usize`.
pub struct StateDescriptor {
    pub id: StateId,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

/// The engine: a fixed table of [`StateDescriptor`]s and the active id.
/// The [`FsmContext`] is owned by the caller and lent to every handler.
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

    fn row(&self, id: StateId) -> &StateDescriptor {
        &self.table[id as usize]
    }

    /// Run `on_enter` for the initial state.  Call once before `tick`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.current.name());
        if let Some(enter) = self.row(self.current).on_enter {
            enter(ctx);
        }
    }

    /// Run the current state's `on_update` and follow any transition
    /// it requests.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        if let Some(next) = (self.row(self.current).on_update)(ctx) {
            self.transition(next, ctx);
        }
    }

    /// Transition now, whatever `on_update` would say.  Pause and
    /// resume commands use this.  A no-op when already in `next`.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        if next != self.current {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    fn transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        info!("FSM transition: {} -> {}", self.current.name(), next.name());
        if let Some(exit) = self.row(self.current).on_exit {
            exit(ctx);
        }
        self.current = next;
        if let Some(enter) = self.row(next).on_enter {
            enter(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::context::{FsmContext, Notice};
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Difficulty;

    fn make_ctx() -> FsmContext {
        FsmContext::new(GameConfig::default(), 3)
    }

    fn make_fsm() -> Fsm {
        Fsm::new(states::build_state_table(), StateId::Menu)
    }

    /// Tick once at `now` with the given inputs.
    fn step(fsm: &mut Fsm, ctx: &mut FsmContext, now: f64, pressed: bool, delta: Option<i32>) {
        ctx.input.now = now;
        ctx.input.select_pressed = pressed;
        ctx.input.encoder_delta = delta;
        fsm.tick(ctx);
    }

    /// Hold select from `t0` until the menu starts a level.
    fn start_playing(fsm: &mut Fsm, ctx: &mut FsmContext, t0: f64) {
        step(fsm, ctx, t0, true, None);
        step(fsm, ctx, t0 + 1.0, true, None);
        step(fsm, ctx, t0 + 1.05, false, None);
        assert_eq!(fsm.current_state(), StateId::Playing);
    }

    #[test]
    fn starts_in_menu() {
        let fsm = make_fsm();
        assert_eq!(fsm.current_state(), StateId::Menu);
    }

    #[test]
    fn table_rows_sit_at_their_ids() {
        for (i, row) in states::build_state_table().iter().enumerate() {
            assert_eq!(row.id as usize, i, "{}", row.id.name());
        }
    }

    #[test]
    fn force_transition_to_current_state_is_a_no_op() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.force_transition(StateId::Menu, &mut ctx);
        assert_eq!(fsm.current_state(), StateId::Menu);
        assert!(ctx.take_outbox().is_empty());
    }

    #[test]
    fn rotary_cycles_difficulty_in_menu() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        step(&mut fsm, &mut ctx, 0.0, false, Some(2));
        assert_eq!(ctx.difficulty, Difficulty::Medium);
        assert_eq!(ctx.level_index, 4);
        step(&mut fsm, &mut ctx, 0.1, false, Some(-1));
        step(&mut fsm, &mut ctx, 0.2, false, Some(-1));
        assert_eq!(ctx.difficulty, Difficulty::Hard);
        assert_eq!(fsm.current_state(), StateId::Menu);
    }

    #[test]
    fn short_press_in_menu_does_not_start() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        step(&mut fsm, &mut ctx, 0.0, true, None);
        step(&mut fsm, &mut ctx, 0.9, true, None);
        step(&mut fsm, &mut ctx, 0.95, false, None);
        assert_eq!(fsm.current_state(), StateId::Menu);
    }

    #[test]
    fn long_press_starts_selected_level() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        start_playing(&mut fsm, &mut ctx, 5.0);
        assert_eq!(ctx.session_start, 6.0);
        assert_eq!(ctx.apples.len(), 1, "first apple spawns on the first playing tick");
        assert!(
            ctx.take_outbox()
                .contains(&Notice::LevelStarted { level_index: 0 })
        );
    }

    #[test]
    fn playing_ends_when_time_runs_out() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        start_playing(&mut fsm, &mut ctx, 0.0);
        step(&mut fsm, &mut ctx, 60.9, false, None);
        assert_eq!(fsm.current_state(), StateId::Playing);
        step(&mut fsm, &mut ctx, 61.0, false, None);
        assert_eq!(fsm.current_state(), StateId::GameOver);
        assert!(ctx.take_outbox().iter().any(|n| matches!(
            n,
            Notice::LevelFinished { sliced: 0, target: 10 }
        )));
    }

    #[test]
    fn spawns_stop_at_level_target() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        start_playing(&mut fsm, &mut ctx, 0.0);
        step(&mut fsm, &mut ctx, 60.5, false, None);
        assert_eq!(ctx.apples.len(), 10);
        step(&mut fsm, &mut ctx, 60.6, false, None);
        assert_eq!(ctx.apples.len(), 10);
        assert_eq!(ctx.spawner.target(), 0, "disarmed once exhausted");
    }

    #[test]
    fn game_over_short_press_returns_to_menu() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        step(&mut fsm, &mut ctx, 0.0, false, Some(1));
        start_playing(&mut fsm, &mut ctx, 0.0);
        step(&mut fsm, &mut ctx, 100.0, false, None);
        assert_eq!(fsm.current_state(), StateId::GameOver);

        step(&mut fsm, &mut ctx, 100.5, true, None);
        step(&mut fsm, &mut ctx, 100.625, true, None);
        assert_eq!(fsm.current_state(), StateId::GameOver, "hold too short");
        step(&mut fsm, &mut ctx, 100.75, true, None);
        assert_eq!(fsm.current_state(), StateId::Menu);
        assert_eq!(ctx.difficulty, Difficulty::Easy);
        assert!(ctx.active_level.is_none());
    }

    #[test]
    fn button_held_through_game_over_needs_release() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        start_playing(&mut fsm, &mut ctx, 0.0);
        step(&mut fsm, &mut ctx, 70.0, true, None);
        assert_eq!(fsm.current_state(), StateId::GameOver);
        step(&mut fsm, &mut ctx, 75.0, true, None);
        assert_eq!(fsm.current_state(), StateId::GameOver);
    }

    #[test]
    fn reset_then_restart_yields_clean_session() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        start_playing(&mut fsm, &mut ctx, 0.0);
        step(&mut fsm, &mut ctx, 30.0, false, None);
        ctx.sliced_count = 4;
        step(&mut fsm, &mut ctx, 70.0, false, None);
        step(&mut fsm, &mut ctx, 71.0, true, None);
        step(&mut fsm, &mut ctx, 71.3, true, None);
        assert_eq!(fsm.current_state(), StateId::Menu);

        // Still held on menu entry: release first, then a fresh long press.
        step(&mut fsm, &mut ctx, 71.4, false, None);
        ctx.input.now = 72.0;
        ctx.input.select_pressed = false;
        ctx.start_level();
        assert_eq!(ctx.sliced_count, 0);
        assert!(ctx.apples.is_empty());
    }

    #[test]
    fn paused_state_holds_the_session() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        start_playing(&mut fsm, &mut ctx, 0.0);
        ctx.begin_pause(10.0);
        fsm.force_transition(StateId::Paused, &mut ctx);
        step(&mut fsm, &mut ctx, 500.0, false, None);
        assert_eq!(fsm.current_state(), StateId::Paused);
        ctx.end_pause(500.0);
        fsm.force_transition(StateId::Playing, &mut ctx);
        step(&mut fsm, &mut ctx, 500.1, false, None);
        assert_eq!(fsm.current_state(), StateId::Playing);
        assert!((ctx.elapsed() - 9.1).abs() < 1e-9);
    }
}
