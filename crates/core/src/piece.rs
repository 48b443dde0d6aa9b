//! A concrete piece: kind, color and current orientation.
//!
//! The starting orientation is chosen by whoever creates the piece (normally
//! the piece supply, from the injected random source), so a piece never hides
//! randomness behind a getter.

use crate::catalog::{shapes_for, RotationSet, RotationShape};
use crate::rng::RandomSource;
use crate::types::{Color, Orientation, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    orientation: Orientation,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, orientation: Orientation) -> Self {
        Self {
            kind,
            color,
            orientation,
        }
    }

    /// Create a piece with a uniformly drawn starting orientation.
    pub fn with_random_orientation<R: RandomSource + ?Sized>(
        kind: PieceKind,
        color: Color,
        rng: &mut R,
    ) -> Self {
        let orientation = Orientation::ALL[rng.next_range(Orientation::ALL.len() as u32) as usize];
        Self::new(kind, color, orientation)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn rotations(&self) -> &'static RotationSet {
        shapes_for(self.kind)
    }

    /// Rotation for the current orientation
    pub fn shape(&self) -> &'static RotationShape {
        self.rotations().get(self.orientation)
    }

    /// Rotation this piece would have after rotating right.
    pub fn shape_after_right(&self) -> &'static RotationShape {
        self.rotations().right_of(self.orientation)
    }

    /// Rotation this piece would have after rotating left.
    pub fn shape_after_left(&self) -> &'static RotationShape {
        self.rotations().left_of(self.orientation)
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    const RED: Color = Color::new(200, 0, 0);

    #[test]
    fn new_piece_keeps_given_orientation() {
        let piece = Piece::new(PieceKind::T, RED, Orientation::Right);
        assert_eq!(piece.orientation(), Orientation::Right);
        assert_eq!(piece.shape().orientation(), Orientation::Right);
        assert_eq!(piece.color(), RED);
    }

    #[test]
    fn random_orientation_comes_from_source() {
        let mut rng = ScriptedRng::new(vec![3]);
        let piece = Piece::with_random_orientation(PieceKind::L, RED, &mut rng);
        assert_eq!(piece.orientation(), Orientation::Bottom);
    }

    #[test]
    fn prospective_shapes_follow_cycle() {
        let piece = Piece::new(PieceKind::MirrorL, RED, Orientation::Left);
        assert_eq!(piece.shape_after_right().orientation(), Orientation::Top);
        assert_eq!(piece.shape_after_left().orientation(), Orientation::Bottom);
        // Looking ahead does not rotate the piece.
        assert_eq!(piece.orientation(), Orientation::Left);
    }
}
