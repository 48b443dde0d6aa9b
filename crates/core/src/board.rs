//! Board module - the playing field and its single falling piece
//!
//! The board is a `width x height` grid stored as a flat, row-major `Vec<Cell>`.
//! Coordinates: (x, y) where x grows to the right and y grows downwards; row 0
//! is the top row and new pieces spawn there.
//!
//! The falling ("active") piece is written into the grid as Occupied cells, and
//! the board remembers exactly which cells those are. Overlap checks ignore the
//! active piece's own cells, so a piece never collides with itself.

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::catalog::RotationShape;
use crate::config::{ConfigError, EngineConfig};
use crate::piece::Piece;
use crate::rng::RandomSource;
use crate::scoring::LineClear;
use crate::types::{Cell, Color, Descent, Orientation, Position};

/// Upper bound on filled cells in any catalog rotation.
pub const MAX_PIECE_CELLS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u16,
    height: u16,
    background: Color,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    active: Option<Piece>,
    /// Absolute cells currently painted by `active`, in commit order.
    active_cells: ArrayVec<Position, MAX_PIECE_CELLS>,
}

impl Board {
    /// Create a new empty board
    ///
    /// Dimensions are not checked here; use [`Board::from_config`] to reject
    /// boards that cannot hold every piece.
    pub fn new(width: u16, height: u16, background: Color) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            background,
            cells: vec![Cell::empty(background); len],
            active: None,
            active_cells: ArrayVec::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.width,
            config.height,
            config.palette.background,
        ))
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set a locked cell at (x, y), e.g. to build up a position in tests.
    ///
    /// Returns false if out of bounds or if the cell belongs to the falling piece.
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        if self.is_active_cell(Position::new(x, y)) {
            return false;
        }
        self.write(Position::new(x, y), cell)
    }

    fn write(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos.x, pos.y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.is_occupied())
    }

    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn has_active_piece(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Absolute cells of the falling piece; empty when there is none.
    pub fn active_cells(&self) -> &[Position] {
        &self.active_cells
    }

    fn is_active_cell(&self, pos: Position) -> bool {
        self.active_cells.contains(&pos)
    }

    /// Top-left corner (min x, min y) of the falling piece's cells.
    pub fn anchor(&self) -> Option<Position> {
        let x = self.active_cells.iter().map(|p| p.x).min()?;
        let y = self.active_cells.iter().map(|p| p.y).min()?;
        Some(Position::new(x, y))
    }

    /// Install `piece` as the falling piece at row 0 and a random column.
    ///
    /// The column is drawn uniformly from `[0, width - 1 - max_x]` using the
    /// piece's current rotation. Returns false without touching the board when
    /// the rotation is wider than the board, and false with no active piece
    /// when the spawn cells are taken.
    pub fn place<R: RandomSource + ?Sized>(&mut self, piece: Piece, rng: &mut R) -> bool {
        let max_x = piece.shape().max_x();
        let span = self.width as i16 - max_x;
        if span <= 0 {
            debug!(kind = ?piece.kind(), width = self.width, "piece wider than board");
            return false;
        }
        let x = rng.next_range(span as u32) as i16;
        self.place_at(piece, x)
    }

    /// Install `piece` as the falling piece with its anchor at `(x, 0)`.
    ///
    /// A falling piece that is still on the board is removed first.
    pub fn place_at(&mut self, piece: Piece, x: i16) -> bool {
        self.discard_active();

        let shape = piece.shape();
        let anchor = self.clamp_anchor(shape, Position::new(x, 0));
        if !self.fits(shape, anchor) {
            debug!(kind = ?piece.kind(), x = anchor.x, "spawn blocked");
            return false;
        }

        self.active = Some(piece);
        self.commit(shape, piece.color(), anchor);
        debug!(kind = ?piece.kind(), orientation = ?piece.orientation(), x = anchor.x, "piece placed");
        true
    }

    /// Remove the falling piece from the grid and hand it back.
    pub fn take_active(&mut self) -> Option<Piece> {
        let piece = self.active.take()?;
        self.erase_active_cells();
        Some(piece)
    }

    fn discard_active(&mut self) {
        let _ = self.take_active();
    }

    pub fn move_left(&mut self) -> bool {
        self.try_translate(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_translate(1, 0)
    }

    /// Move the falling piece one row down, locking it when blocked.
    pub fn move_down(&mut self) -> Descent {
        if self.active.is_none() {
            return Descent::Idle;
        }
        if self.try_translate(0, 1) {
            return Descent::Falling;
        }

        // Locked: the cells stay Occupied, the board just forgets which piece they were.
        let piece = self.active.take();
        self.active_cells.clear();
        debug!(kind = ?piece.map(|p| p.kind()), "piece locked");
        Descent::Landed
    }

    pub fn rotate_left(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        self.try_rotate(piece.orientation().rotate_left())
    }

    pub fn rotate_right(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        self.try_rotate(piece.orientation().rotate_right())
    }

    fn try_translate(&mut self, dx: i16, dy: i16) -> bool {
        let (Some(piece), Some(anchor)) = (self.active, self.anchor()) else {
            return false;
        };

        let shape = piece.shape();
        let target = anchor.translate(dx, dy);
        if !self.fits(shape, target) {
            trace!(dx, dy, "move rejected");
            return false;
        }

        self.commit(shape, piece.color(), target);
        true
    }

    /// Rotate in place: no kicks, the target rotation must fit at the current anchor.
    fn try_rotate(&mut self, target: Orientation) -> bool {
        let (Some(mut piece), Some(anchor)) = (self.active, self.anchor()) else {
            return false;
        };

        let shape = piece.rotations().get(target);
        if !self.fits(shape, anchor) {
            trace!(to = ?target, "rotation rejected");
            return false;
        }

        piece.set_orientation(target);
        self.active = Some(piece);
        self.commit(shape, piece.color(), anchor);
        true
    }

    /// Check that every filled cell of `shape` at `anchor` is in bounds and
    /// either empty or already part of the falling piece.
    pub fn fits(&self, shape: &RotationShape, anchor: Position) -> bool {
        shape.filled().all(|offset| {
            let pos = anchor.translate(offset.x, offset.y);
            match self.get(pos.x, pos.y) {
                Some(cell) => !cell.is_occupied() || self.is_active_cell(pos),
                None => false,
            }
        })
    }

    /// Shift `anchor` left until the rotation's bounding box ends inside the board.
    fn clamp_anchor(&self, shape: &RotationShape, mut anchor: Position) -> Position {
        // Widened to i32: callers may pass any column.
        let last = i32::from(self.width) - 1 - i32::from(shape.max_x());
        if i32::from(anchor.x) > last {
            anchor.x = last.max(0) as i16;
        }
        anchor
    }

    /// Repaint the falling piece: erase its old cells, then paint `shape` at
    /// the clamped `anchor`.
    fn commit(&mut self, shape: &RotationShape, color: Color, anchor: Position) {
        self.erase_active_cells();
        let anchor = self.clamp_anchor(shape, anchor);
        for offset in shape.filled() {
            let pos = anchor.translate(offset.x, offset.y);
            if self.write(pos, Cell::occupied(color)) {
                self.active_cells.push(pos);
            }
        }
    }

    fn erase_active_cells(&mut self) {
        let empty = Cell::empty(self.background);
        for pos in std::mem::take(&mut self.active_cells) {
            self.write(pos, empty);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let width = self.width as usize;
        let start = y * width;
        self.cells[start..start + width]
            .iter()
            .all(|cell| cell.is_occupied())
    }

    /// Clear a row and shift all rows above down
    /// Returns the number of lines cleared (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= self.height as usize {
            return 0;
        }

        let width = self.width as usize;

        // Shift all rows above down by one
        // Note: copy_within handles overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        // Clear the top row
        let empty = Cell::empty(self.background);
        self.cells[..width].fill(empty);

        1
    }

    /// Remove every full row and score the result.
    ///
    /// Only runs while no piece is falling; otherwise returns an empty result
    /// without touching the grid. Rows are handled top to bottom, each clear
    /// pulling everything above it one row down.
    pub fn check_and_clear_lines(&mut self) -> LineClear {
        if self.has_active_piece() {
            return LineClear::default();
        }

        let mut rows = 0u32;
        for y in 0..self.height as usize {
            if self.is_row_full(y) {
                rows += self.clear_row(y) as u32;
            }
        }

        let clear = LineClear::new(self.width as u32, rows);
        if !clear.is_empty() {
            debug!(rows = clear.rows, points = clear.points, "lines cleared");
        }
        clear
    }

    /// Clear the entire board, falling piece included
    pub fn clear(&mut self) {
        self.active = None;
        self.active_cells.clear();
        self.cells.fill(Cell::empty(self.background));
    }
}

impl Default for Board {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self::new(config.width, config.height, config.palette.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::types::PieceKind;

    const BG: Color = Color::new(0, 0, 0);
    const RED: Color = Color::new(255, 0, 0);
    const GRAY: Color = Color::new(90, 90, 90);

    fn board() -> Board {
        Board::new(10, 22, BG)
    }

    fn square() -> Piece {
        Piece::new(PieceKind::Square, RED, Orientation::Left)
    }

    #[test]
    fn test_board_index_calculation() {
        let board = board();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 21), Some(219));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 22), None);
    }

    #[test]
    fn test_place_at_commits_cells() {
        let mut board = board();
        assert!(board.place_at(square(), 4));
        assert_eq!(
            board.active_cells(),
            &[
                Position::new(4, 0),
                Position::new(5, 0),
                Position::new(4, 1),
                Position::new(5, 1)
            ]
        );
        assert_eq!(board.anchor(), Some(Position::new(4, 0)));
        assert_eq!(board.get(5, 1), Some(Cell::occupied(RED)));
    }

    #[test]
    fn test_place_uses_rng_for_column() {
        let mut board = board();
        // Square has max_x 1, so the column is drawn from 0..9.
        let mut rng = ScriptedRng::new(vec![7]);
        assert!(board.place(square(), &mut rng));
        assert_eq!(board.anchor(), Some(Position::new(7, 0)));

        let mut rng = ScriptedRng::new(vec![9]);
        assert!(board.place(square(), &mut rng));
        assert_eq!(board.anchor(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_place_replaces_previous_active_piece() {
        let mut board = board();
        assert!(board.place_at(square(), 0));
        assert!(board.place_at(square(), 6));
        assert!(!board.is_occupied(0, 0));
        assert_eq!(board.active_cells().len(), 4);
        assert_eq!(board.cells().iter().filter(|c| c.is_occupied()).count(), 4);
    }

    #[test]
    fn test_place_at_clamps_wide_anchor() {
        let mut board = board();
        let line = Piece::new(PieceKind::Line, RED, Orientation::Top);
        assert!(board.place_at(line, 9));
        assert_eq!(board.anchor(), Some(Position::new(6, 0)));
        assert!(board.is_occupied(9, 0));
    }

    #[test]
    fn test_place_at_extreme_columns() {
        let mut board = board();
        let line = Piece::new(PieceKind::Line, RED, Orientation::Top);
        assert!(board.place_at(line, i16::MAX));
        assert_eq!(board.anchor(), Some(Position::new(6, 0)));

        // Negative columns are not shifted; the piece does not fit there.
        assert!(!board.place_at(line, i16::MIN));
        assert!(!board.has_active_piece());
        assert!(board.cells().iter().all(|c| !c.is_occupied()));
    }

    #[test]
    fn test_place_blocked_spawn() {
        let mut board = board();
        board.set(4, 1, Cell::occupied(GRAY));
        assert!(!board.place_at(square(), 4));
        assert!(!board.has_active_piece());
        assert_eq!(board.get(4, 1), Some(Cell::occupied(GRAY)));
        assert!(!board.is_occupied(4, 0));
    }

    #[test]
    fn test_set_refuses_active_cells() {
        let mut board = board();
        board.place_at(square(), 0);
        assert!(!board.set(0, 0, Cell::empty(BG)));
        assert!(board.set(5, 5, Cell::occupied(GRAY)));
        assert!(!board.set(-1, 5, Cell::occupied(GRAY)));
    }

    #[test]
    fn test_move_down_until_landed() {
        let mut board = Board::new(4, 4, BG);
        board.place_at(square(), 0);
        assert_eq!(board.move_down(), Descent::Falling);
        assert_eq!(board.move_down(), Descent::Falling);
        assert_eq!(board.move_down(), Descent::Landed);
        assert!(!board.has_active_piece());
        assert!(board.active_cells().is_empty());
        assert!(board.is_occupied(0, 3));
        assert!(board.is_occupied(1, 2));
        assert_eq!(board.move_down(), Descent::Idle);
    }

    #[test]
    fn test_take_active_erases_cells() {
        let mut board = board();
        board.place_at(square(), 3);
        let piece = board.take_active();
        assert_eq!(piece, Some(square()));
        assert!(board.cells().iter().all(|c| !c.is_occupied()));
        assert_eq!(board.take_active(), None);
    }

    #[test]
    fn test_rotation_in_place() {
        let mut board = board();
        let t = Piece::new(PieceKind::T, RED, Orientation::Top);
        board.place_at(t, 2);
        assert!(board.rotate_right());
        assert_eq!(board.active_piece().unwrap().orientation(), Orientation::Right);
        assert_eq!(board.anchor(), Some(Position::new(2, 0)));
        // T right: (0,0), (0,1), (1,1), (0,2)
        let mut cells = board.active_cells().to_vec();
        cells.sort_by_key(|p| (p.y, p.x));
        assert_eq!(
            cells,
            vec![
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(3, 1),
                Position::new(2, 2)
            ]
        );
        assert!(!board.is_occupied(4, 1));
    }

    #[test]
    fn test_rotation_rejected_without_kick() {
        let mut board = Board::new(10, 22, BG);
        // Vertical line at the right wall: horizontal needs 4 columns.
        let line = Piece::new(PieceKind::Line, RED, Orientation::Left);
        board.place_at(line, 9);
        assert_eq!(board.anchor(), Some(Position::new(9, 0)));
        assert!(!board.rotate_right());
        assert_eq!(board.active_piece().unwrap().orientation(), Orientation::Left);
        assert_eq!(board.anchor(), Some(Position::new(9, 0)));
    }

    #[test]
    fn test_clear_row_shifts_down() {
        let mut board = Board::new(4, 4, BG);
        board.set(1, 0, Cell::occupied(GRAY));
        for x in 0..4 {
            board.set(x, 1, Cell::occupied(RED));
        }
        assert!(board.is_row_full(1));
        board.clear_row(1);
        assert!(board.is_occupied(1, 1));
        assert!(!board.is_occupied(1, 0));
        assert!(!board.is_row_full(1));
    }

    #[test]
    fn test_check_and_clear_is_noop_while_falling() {
        let mut board = Board::new(4, 4, BG);
        for x in 0..4 {
            board.set(x, 3, Cell::occupied(GRAY));
        }
        board.place_at(square(), 0);
        assert_eq!(board.check_and_clear_lines(), LineClear::default());
        assert!(board.is_row_full(3));
    }
}
