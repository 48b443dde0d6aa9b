use serde::Serialize;

use crate::piece::Piece;
use crate::types::{Color, Orientation, PieceKind, Position};

/// What a driver needs to draw a queued or held piece.
///
/// Previews always show the `left` rotation so the preview box does not jump
/// around with each piece's random starting orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PiecePreview {
    pub kind: PieceKind,
    pub color: Color,
    pub width: i16,
    pub height: i16,
    pub cells: Vec<Position>,
}

impl From<&Piece> for PiecePreview {
    fn from(piece: &Piece) -> Self {
        let shape = piece.rotations().get(Orientation::Left);
        Self {
            kind: piece.kind(),
            color: piece.color(),
            width: shape.width(),
            height: shape.height(),
            cells: shape.filled().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_uses_left_rotation() {
        let piece = Piece::new(PieceKind::Line, Color::new(1, 2, 3), Orientation::Top);
        let preview = PiecePreview::from(&piece);
        assert_eq!(preview.width, 1);
        assert_eq!(preview.height, 4);
        assert_eq!(preview.cells.len(), 4);
        assert!(preview.cells.iter().all(|p| p.x == 0));
    }

    #[test]
    fn preview_serializes() {
        let piece = Piece::new(PieceKind::Square, Color::new(9, 9, 9), Orientation::Left);
        let json = serde_json::to_value(PiecePreview::from(&piece)).unwrap();
        assert_eq!(json["kind"], "square");
        assert_eq!(json["color"]["r"], 9);
        assert_eq!(json["cells"].as_array().unwrap().len(), 4);
    }
}
