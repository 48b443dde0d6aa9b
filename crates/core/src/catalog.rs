//! Piece catalog - static shape definitions
//!
//! Every piece kind owns four rotations (`left`, `top`, `right`, `bottom`).
//! A rotation is a fixed list of offsets inside a rectangular bounding box;
//! each offset is either a filled cell or a hole, because several shapes do
//! not fill their box. Offsets are `(x, y)` with y growing downwards.
//!
//! There is no wall-kick data: a rotation either fits at the unmoved anchor or
//! is rejected.

use crate::types::{Orientation, PieceKind, Position};

/// One slot of a rotation's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeCell {
    pub offset: Position,
    pub filled: bool,
}

const fn b(x: i16, y: i16) -> ShapeCell {
    ShapeCell {
        offset: Position::new(x, y),
        filled: true,
    }
}

const fn h(x: i16, y: i16) -> ShapeCell {
    ShapeCell {
        offset: Position::new(x, y),
        filled: false,
    }
}

/// A single orientation of a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationShape {
    orientation: Orientation,
    cells: &'static [ShapeCell],
}

impl RotationShape {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// All offsets of the bounding box, holes included.
    pub fn cells(&self) -> &'static [ShapeCell] {
        self.cells
    }

    /// Offsets of the filled cells only.
    pub fn filled(&self) -> impl Iterator<Item = Position> + 'static {
        self.cells.iter().filter(|c| c.filled).map(|c| c.offset)
    }

    /// Largest x offset in the box (bounding width minus one).
    pub fn max_x(&self) -> i16 {
        self.cells.iter().map(|c| c.offset.x).max().unwrap_or(0)
    }

    /// Largest y offset in the box (bounding height minus one).
    pub fn max_y(&self) -> i16 {
        self.cells.iter().map(|c| c.offset.y).max().unwrap_or(0)
    }

    pub fn width(&self) -> i16 {
        self.max_x() + 1
    }

    pub fn height(&self) -> i16 {
        self.max_y() + 1
    }

    /// Look up the slot at `(x, y)` inside the bounding box.
    pub fn cell_at(&self, x: i16, y: i16) -> Option<ShapeCell> {
        self.cells
            .iter()
            .copied()
            .find(|c| c.offset == Position::new(x, y))
    }
}

/// The four rotations of one piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationSet {
    kind: PieceKind,
    rotations: [RotationShape; 4],
}

impl RotationSet {
    const fn new(
        kind: PieceKind,
        left: &'static [ShapeCell],
        top: &'static [ShapeCell],
        right: &'static [ShapeCell],
        bottom: &'static [ShapeCell],
    ) -> Self {
        Self {
            kind,
            rotations: [
                RotationShape {
                    orientation: Orientation::Left,
                    cells: left,
                },
                RotationShape {
                    orientation: Orientation::Top,
                    cells: top,
                },
                RotationShape {
                    orientation: Orientation::Right,
                    cells: right,
                },
                RotationShape {
                    orientation: Orientation::Bottom,
                    cells: bottom,
                },
            ],
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn get(&self, orientation: Orientation) -> &RotationShape {
        &self.rotations[orientation.index()]
    }

    /// Rotation reached by rotating right from `orientation`.
    pub fn right_of(&self, orientation: Orientation) -> &RotationShape {
        self.get(rotation_successor(orientation))
    }

    /// Rotation reached by rotating left from `orientation`.
    pub fn left_of(&self, orientation: Orientation) -> &RotationShape {
        self.get(rotation_predecessor(orientation))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RotationShape> {
        self.rotations.iter()
    }
}

const BACKGROUND: &[ShapeCell] = &[b(0, 0)];

const LINE_VERTICAL: &[ShapeCell] = &[b(0, 0), b(0, 1), b(0, 2), b(0, 3)];
const LINE_HORIZONTAL: &[ShapeCell] = &[b(0, 0), b(1, 0), b(2, 0), b(3, 0)];

const T_LEFT: &[ShapeCell] = &[h(0, 0), b(1, 0), b(0, 1), b(1, 1), h(0, 2), b(1, 2)];
const T_TOP: &[ShapeCell] = &[h(0, 0), b(1, 0), h(2, 0), b(0, 1), b(1, 1), b(2, 1)];
const T_RIGHT: &[ShapeCell] = &[b(0, 0), h(1, 0), b(0, 1), b(1, 1), b(0, 2), h(1, 2)];
const T_BOTTOM: &[ShapeCell] = &[b(0, 0), b(1, 0), b(2, 0), h(0, 1), b(1, 1), h(2, 1)];

const SQUARE: &[ShapeCell] = &[b(0, 0), b(1, 0), b(0, 1), b(1, 1)];

const L_LEFT: &[ShapeCell] = &[b(0, 0), h(1, 0), b(0, 1), h(1, 1), b(0, 2), b(1, 2)];
const L_TOP: &[ShapeCell] = &[b(0, 0), b(1, 0), b(2, 0), b(0, 1), h(1, 1), h(2, 1)];
const L_RIGHT: &[ShapeCell] = &[b(0, 0), b(1, 0), h(0, 1), b(1, 1), h(0, 2), b(1, 2)];
const L_BOTTOM: &[ShapeCell] = &[h(0, 0), h(1, 0), b(2, 0), b(0, 1), b(1, 1), b(2, 1)];

const MIRROR_L_LEFT: &[ShapeCell] = &[h(0, 0), b(1, 0), h(0, 1), b(1, 1), b(0, 2), b(1, 2)];
const MIRROR_L_TOP: &[ShapeCell] = &[b(0, 0), h(1, 0), h(2, 0), b(0, 1), b(1, 1), b(2, 1)];
const MIRROR_L_RIGHT: &[ShapeCell] = &[b(0, 0), b(1, 0), b(0, 1), h(1, 1), b(0, 2), h(1, 2)];
const MIRROR_L_BOTTOM: &[ShapeCell] = &[b(0, 0), b(1, 0), b(2, 0), h(0, 1), h(1, 1), b(2, 1)];

/// Indexed by [`PieceKind::index`].
static CATALOG: [RotationSet; 6] = [
    RotationSet::new(PieceKind::Background, BACKGROUND, BACKGROUND, BACKGROUND, BACKGROUND),
    RotationSet::new(
        PieceKind::Line,
        LINE_VERTICAL,
        LINE_HORIZONTAL,
        LINE_VERTICAL,
        LINE_HORIZONTAL,
    ),
    RotationSet::new(PieceKind::T, T_LEFT, T_TOP, T_RIGHT, T_BOTTOM),
    RotationSet::new(PieceKind::Square, SQUARE, SQUARE, SQUARE, SQUARE),
    RotationSet::new(PieceKind::L, L_LEFT, L_TOP, L_RIGHT, L_BOTTOM),
    RotationSet::new(
        PieceKind::MirrorL,
        MIRROR_L_LEFT,
        MIRROR_L_TOP,
        MIRROR_L_RIGHT,
        MIRROR_L_BOTTOM,
    ),
];

/// Rotation set for a piece kind
pub fn shapes_for(kind: PieceKind) -> &'static RotationSet {
    &CATALOG[kind.index()]
}

/// Shape (rotation) for a piece kind and orientation
pub fn get_shape(kind: PieceKind, orientation: Orientation) -> &'static RotationShape {
    shapes_for(kind).get(orientation)
}

pub fn rotation_successor(orientation: Orientation) -> Orientation {
    orientation.rotate_right()
}

pub fn rotation_predecessor(orientation: Orientation) -> Orientation {
    orientation.rotate_left()
}

/// Widest and tallest bounding box over every playable rotation.
pub fn max_playable_extent() -> (i16, i16) {
    PieceKind::PLAYABLE
        .iter()
        .flat_map(|&kind| shapes_for(kind).iter())
        .fold((0, 0), |(w, h), r| (w.max(r.width()), h.max(r.height())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(shapes_for(kind).kind(), kind);
        }
    }

    #[test]
    fn rotations_carry_their_orientation() {
        for kind in PieceKind::ALL {
            for o in Orientation::ALL {
                assert_eq!(get_shape(kind, o).orientation(), o);
            }
        }
    }

    #[test]
    fn every_playable_rotation_fills_four_cells() {
        for kind in PieceKind::PLAYABLE {
            for r in shapes_for(kind).iter() {
                assert_eq!(r.filled().count(), 4, "{:?} {:?}", kind, r.orientation());
            }
        }
    }

    #[test]
    fn bounding_boxes_are_fully_described() {
        for kind in PieceKind::ALL {
            for r in shapes_for(kind).iter() {
                assert_eq!(
                    r.cells().len() as i16,
                    r.width() * r.height(),
                    "{:?} {:?}",
                    kind,
                    r.orientation()
                );
                for y in 0..r.height() {
                    for x in 0..r.width() {
                        assert!(r.cell_at(x, y).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn max_extent_is_the_line() {
        assert_eq!(max_playable_extent(), (4, 4));
    }

    #[test]
    fn successor_and_predecessor_are_inverse() {
        for o in Orientation::ALL {
            assert_eq!(rotation_predecessor(rotation_successor(o)), o);
        }
        let set = shapes_for(PieceKind::T);
        assert_eq!(set.right_of(Orientation::Bottom).orientation(), Orientation::Left);
        assert_eq!(set.left_of(Orientation::Left).orientation(), Orientation::Bottom);
    }
}
