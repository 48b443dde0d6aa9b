//! Game state module - the command/query surface handed to a driver
//!
//! `Game` ties the board, the piece supply and the random source together.
//! It has no clock: the driver decides when to call [`Game::soft_drop_tick`]
//! and when to spawn. Commands are applied one at a time, in call order.
//!
//! After a lock the game clears full rows right away and adds the points to
//! the running score, but it does not spawn; the driver calls
//! [`Game::spawn_next`] when it is ready for the next piece.

use tracing::{debug, instrument, warn};

use crate::board::Board;
use crate::config::{ConfigError, EngineConfig};
use crate::piece::Piece;
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::PiecePreview;
use crate::supply::{HoldOutcome, PieceSupply};
use crate::types::{Cell, Descent, GameAction, GameEvent};

#[derive(Debug, Clone)]
pub struct Game<R = SimpleRng> {
    config: EngineConfig,
    board: Board,
    supply: PieceSupply,
    rng: R,
    score: u32,
    lines: u32,
    game_over: bool,
    /// Pending events, oldest first (consumed by the driver).
    events: Vec<GameEvent>,
}

impl Game<SimpleRng> {
    /// Create a new game seeded from `config.seed`
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SimpleRng::new(config.seed))
    }
}

impl<R: RandomSource> Game<R> {
    /// Create a new game drawing all randomness from `rng`
    pub fn with_rng(config: EngineConfig, mut rng: R) -> Result<Self, ConfigError> {
        let board = Board::from_config(&config)?;
        let supply = PieceSupply::new(config.palette, &mut rng);
        Ok(Self {
            config,
            board,
            supply,
            rng,
            score: 0,
            lines: 0,
            game_over: false,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_width(&self) -> u16 {
        self.board.width()
    }

    pub fn board_height(&self) -> u16 {
        self.board.height()
    }

    pub fn cell_at(&self, x: i16, y: i16) -> Option<Cell> {
        self.board.get(x, y)
    }

    pub fn has_active_piece(&self) -> bool {
        self.board.has_active_piece()
    }

    pub fn peek_next(&self) -> PiecePreview {
        PiecePreview::from(self.supply.peek_next())
    }

    pub fn peek_held(&self) -> Option<PiecePreview> {
        self.supply.peek_held().map(PiecePreview::from)
    }

    pub fn can_hold(&self) -> bool {
        self.supply.can_hold()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Take all pending events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn the upcoming piece
    ///
    /// No-op while a piece is still falling or after game over. A blocked
    /// spawn ends the game.
    #[instrument(skip(self), level = "debug")]
    pub fn spawn_next(&mut self) -> bool {
        if self.game_over || self.board.has_active_piece() {
            return false;
        }

        let piece = self.supply.take_next(&mut self.rng);
        self.install(piece)
    }

    pub fn move_left(&mut self) -> bool {
        !self.game_over && self.board.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        !self.game_over && self.board.move_right()
    }

    pub fn rotate_left(&mut self) -> bool {
        !self.game_over && self.board.rotate_left()
    }

    pub fn rotate_right(&mut self) -> bool {
        !self.game_over && self.board.rotate_right()
    }

    /// One gravity step. On landing, locks the piece and clears full rows.
    pub fn soft_drop_tick(&mut self) -> Descent {
        if self.game_over {
            return Descent::Idle;
        }

        let descent = self.board.move_down();
        if descent == Descent::Landed {
            self.events.push(GameEvent::PieceLocked);

            let clear = self.board.check_and_clear_lines();
            if !clear.is_empty() {
                self.score = self.score.saturating_add(clear.points);
                self.lines = self.lines.saturating_add(clear.rows);
                self.events.push(GameEvent::LinesCleared {
                    count: clear.rows,
                    points: clear.points,
                });
            }
        }
        descent
    }

    /// Swap the falling piece into the hold slot
    ///
    /// Allowed once per spawned piece. With an empty slot the upcoming piece
    /// is played instead; otherwise the held piece comes back into play.
    #[instrument(skip(self), level = "debug")]
    pub fn hold(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(current) = self.board.active_piece().copied() else {
            return false;
        };

        let replacement = match self.supply.hold(current, &mut self.rng) {
            HoldOutcome::Rejected(_) => return false,
            HoldOutcome::Stored { next } => next,
            HoldOutcome::Swapped { previous } => previous,
        };

        self.board.take_active();
        self.install(replacement);
        true
    }

    fn install(&mut self, piece: Piece) -> bool {
        if self.board.place(piece, &mut self.rng) {
            return true;
        }

        warn!(kind = ?piece.kind(), score = self.score, "spawn blocked, game over");
        self.game_over = true;
        self.events.push(GameEvent::GameOver);
        false
    }

    /// Reset board, supply and counters; the random source keeps running.
    pub fn restart(&mut self) {
        self.board.clear();
        self.supply = PieceSupply::new(self.config.palette, &mut self.rng);
        self.score = 0;
        self.lines = 0;
        self.game_over = false;
        self.events.clear();
        debug!("game restarted");
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop_tick() != Descent::Idle,
            GameAction::RotateLeft => self.rotate_left(),
            GameAction::RotateRight => self.rotate_right(),
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}
