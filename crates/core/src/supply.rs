//! Piece supply - the "next" preview and the hold slot
//!
//! One upcoming piece is always drawn and visible. Kinds are picked uniformly
//! from the five playable kinds, and each piece gets a uniformly drawn
//! starting orientation.
//!
//! Holding is allowed once per spawned piece: [`PieceSupply::take_next`] re-arms
//! it, [`PieceSupply::hold`] disarms it.

use tracing::debug;

use crate::config::Palette;
use crate::piece::Piece;
use crate::rng::RandomSource;
use crate::types::PieceKind;

/// What happened to the piece handed to [`PieceSupply::hold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Hold is not available; the piece is handed back untouched.
    Rejected(Piece),
    /// The slot was empty. The piece is parked and `next` should be played instead.
    Stored { next: Piece },
    /// The slot held `previous`, which should be played now.
    Swapped { previous: Piece },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSupply {
    palette: Palette,
    next: Piece,
    held: Option<Piece>,
    can_hold: bool,
}

impl PieceSupply {
    pub fn new<R: RandomSource + ?Sized>(palette: Palette, rng: &mut R) -> Self {
        let next = draw_piece(&palette, rng);
        Self {
            palette,
            next,
            held: None,
            can_hold: true,
        }
    }

    /// Hand out the upcoming piece, draw a fresh one, and re-arm hold.
    pub fn take_next<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Piece {
        let piece = self.advance(rng);
        self.can_hold = true;
        piece
    }

    /// Park `current` in the hold slot.
    pub fn hold<R: RandomSource + ?Sized>(&mut self, current: Piece, rng: &mut R) -> HoldOutcome {
        if !self.can_hold {
            return HoldOutcome::Rejected(current);
        }
        self.can_hold = false;

        match self.held.replace(current) {
            Some(previous) => {
                debug!(held = ?current.kind(), played = ?previous.kind(), "hold swap");
                HoldOutcome::Swapped { previous }
            }
            None => {
                // Replacement comes from the preview but does not count as a new spawn.
                let next = self.advance(rng);
                debug!(held = ?current.kind(), played = ?next.kind(), "hold stored");
                HoldOutcome::Stored { next }
            }
        }
    }

    fn advance<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Piece {
        let fresh = draw_piece(&self.palette, rng);
        std::mem::replace(&mut self.next, fresh)
    }

    pub fn peek_next(&self) -> &Piece {
        &self.next
    }

    pub fn peek_held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

/// Draw a uniformly random playable piece with a random orientation.
pub fn draw_piece<R: RandomSource + ?Sized>(palette: &Palette, rng: &mut R) -> Piece {
    let kind = PieceKind::PLAYABLE[rng.next_range(PieceKind::PLAYABLE.len() as u32) as usize];
    Piece::with_random_orientation(kind, palette.color(kind), rng)
}
