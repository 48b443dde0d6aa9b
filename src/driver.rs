//! Driver state: gravity cadence, soft drop and input grace.
//!
//! The engine has no clock. `Driver` owns the timers and turns elapsed time
//! and key actions into engine commands. It holds no terminal state so it can
//! be tested with a plain `Game`.

use tracing::debug;

use crate::core::{Game, RandomSource};
use crate::types::{Descent, GameAction, GRAVITY_MS, INPUT_GRACE_MS, SOFT_DROP_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    /// Time since the last drop step.
    since_drop_ms: u32,
    /// Time since the last lateral move.
    since_lateral_ms: u32,
    /// Remaining time the down key counts as held. Refreshed on every press
    /// because most terminals never report a key release.
    down_hold_ms: u32,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        Self {
            since_drop_ms: 0,
            since_lateral_ms: INPUT_GRACE_MS,
            down_hold_ms: 0,
        }
    }

    pub fn is_down_held(&self) -> bool {
        self.down_hold_ms > 0
    }

    /// Current interval between drop steps.
    pub fn drop_interval_ms(&self) -> u32 {
        if self.is_down_held() {
            SOFT_DROP_MS
        } else {
            GRAVITY_MS
        }
    }

    pub fn release_down(&mut self) {
        self.down_hold_ms = 0;
    }

    /// Apply a key action. Soft drop steps once right away and keeps the
    /// faster cadence while the key stays held.
    pub fn handle_action<R: RandomSource>(&mut self, game: &mut Game<R>, action: GameAction) -> bool {
        match action {
            GameAction::SoftDrop => {
                self.down_hold_ms = INPUT_GRACE_MS;
                self.step(game);
                true
            }
            GameAction::MoveLeft | GameAction::MoveRight => {
                self.since_lateral_ms = 0;
                game.apply_action(action)
            }
            GameAction::Restart => {
                *self = Self::new();
                game.apply_action(action)
            }
            _ => game.apply_action(action),
        }
    }

    /// Advance the timers; returns whether a drop step ran.
    pub fn advance<R: RandomSource>(&mut self, game: &mut Game<R>, elapsed_ms: u32) -> bool {
        self.since_drop_ms = self.since_drop_ms.saturating_add(elapsed_ms);
        self.since_lateral_ms = self.since_lateral_ms.saturating_add(elapsed_ms);
        self.down_hold_ms = self.down_hold_ms.saturating_sub(elapsed_ms);

        if self.since_drop_ms < self.drop_interval_ms() || self.since_lateral_ms < INPUT_GRACE_MS {
            return false;
        }
        self.since_drop_ms = 0;
        self.step(game);
        true
    }

    fn step<R: RandomSource>(&mut self, game: &mut Game<R>) {
        if game.has_active_piece() && game.soft_drop_tick() != Descent::Landed {
            return;
        }
        // No piece, or the piece just locked. Wait while down is held so a
        // held key does not push the next piece straight down.
        if !self.is_down_held() && game.spawn_next() {
            debug!("spawned on drop step");
        }
    }
}
