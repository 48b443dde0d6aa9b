//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behavior beyond small conversions, making
//! them usable from the engine, the terminal renderer and the input mapper alike.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (overridable through the engine configuration):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21, row 0 at the top)
//! - **Spawn row**: 0, spawn column drawn at random per piece
//!
//! # Driver Timing Constants
//!
//! The engine itself has no notion of time. These values are consumed by the
//! driver that owns the gravity cadence:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame/input polling interval |
//! | `GRAVITY_MS` | 1000 | Interval between drop ticks |
//! | `SOFT_DROP_MS` | 50 | Drop tick interval while down is held |
//! | `INPUT_GRACE_MS` | 500 | Gravity is suppressed this long after a lateral move |
//!
//! # Examples
//!
//! ```
//! use fallblock_types::{GameAction, Orientation, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! assert_eq!(Orientation::Left.rotate_right(), Orientation::Top);
//! assert_eq!(Orientation::Left.rotate_left(), Orientation::Bottom);
//!
//! assert_eq!(GameAction::from_str("hold"), Some(GameAction::Hold));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Default board height in cells (22 rows)
pub const BOARD_HEIGHT: u16 = 22;

/// Driver polling interval in milliseconds
pub const TICK_MS: u32 = 16;

/// Gravity interval: one drop tick per second
pub const GRAVITY_MS: u32 = 1000;

/// Drop tick interval while the down key is held
pub const SOFT_DROP_MS: u32 = 50;

/// Gravity is held back this long after a lateral input
pub const INPUT_GRACE_MS: u32 = 500;

/// Clearing exactly this many rows at once squares the points.
pub const SQUARED_CLEAR_ROWS: u32 = 4;


/// The six piece kinds of the catalog
///
/// - **Background**: filler kind, only supplies the empty-cell color
/// - **Line**: 1x4 bar
/// - **T**: T-shaped
/// - **Square**: 2x2 block
/// - **L**: L-shaped
/// - **MirrorL**: mirrored L
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Background,
    Line,
    T,
    Square,
    L,
    MirrorL,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Background,
        PieceKind::Line,
        PieceKind::T,
        PieceKind::Square,
        PieceKind::L,
        PieceKind::MirrorL,
    ];

    /// Kinds that can be spawned as a falling piece.
    pub const PLAYABLE: [PieceKind; 5] = [
        PieceKind::Line,
        PieceKind::T,
        PieceKind::Square,
        PieceKind::L,
        PieceKind::MirrorL,
    ];

    /// Position in [`PieceKind::ALL`], used to index catalog and palette tables.
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Background => 0,
            PieceKind::Line => 1,
            PieceKind::T => 2,
            PieceKind::Square => 3,
            PieceKind::L => 4,
            PieceKind::MirrorL => 5,
        }
    }

    pub fn is_playable(self) -> bool {
        self != PieceKind::Background
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use fallblock_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("line"), Some(PieceKind::Line));
    /// assert_eq!(PieceKind::from_str("Mirror_L"), Some(PieceKind::MirrorL));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "background" => Some(PieceKind::Background),
            "line" => Some(PieceKind::Line),
            "t" => Some(PieceKind::T),
            "square" => Some(PieceKind::Square),
            "l" => Some(PieceKind::L),
            "mirror_l" | "mirrorl" => Some(PieceKind::MirrorL),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Background => "background",
            PieceKind::Line => "line",
            PieceKind::T => "t",
            PieceKind::Square => "square",
            PieceKind::L => "l",
            PieceKind::MirrorL => "mirror_l",
        }
    }
}

/// The four orientation labels of a rotation set
///
/// Rotating right walks the cycle `Left → Top → Right → Bottom → Left`;
/// rotating left walks it backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Left,
    Top,
    Right,
    Bottom,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Left,
        Orientation::Top,
        Orientation::Right,
        Orientation::Bottom,
    ];

    pub const fn index(self) -> usize {
        match self {
            Orientation::Left => 0,
            Orientation::Top => 1,
            Orientation::Right => 2,
            Orientation::Bottom => 3,
        }
    }

    /// Successor in the rotation cycle
    ///
    /// ```
    /// use fallblock_types::Orientation;
    ///
    /// assert_eq!(Orientation::Left.rotate_right(), Orientation::Top);
    /// assert_eq!(Orientation::Top.rotate_right(), Orientation::Right);
    /// assert_eq!(Orientation::Right.rotate_right(), Orientation::Bottom);
    /// assert_eq!(Orientation::Bottom.rotate_right(), Orientation::Left);
    /// ```
    pub fn rotate_right(&self) -> Self {
        match self {
            Orientation::Left => Orientation::Top,
            Orientation::Top => Orientation::Right,
            Orientation::Right => Orientation::Bottom,
            Orientation::Bottom => Orientation::Left,
        }
    }

    /// Predecessor in the rotation cycle
    ///
    /// ```
    /// use fallblock_types::Orientation;
    ///
    /// assert_eq!(Orientation::Left.rotate_left(), Orientation::Bottom);
    /// assert_eq!(Orientation::Bottom.rotate_left(), Orientation::Right);
    /// assert_eq!(Orientation::Right.rotate_left(), Orientation::Top);
    /// assert_eq!(Orientation::Top.rotate_left(), Orientation::Left);
    /// ```
    pub fn rotate_left(&self) -> Self {
        match self {
            Orientation::Left => Orientation::Bottom,
            Orientation::Bottom => Orientation::Right,
            Orientation::Right => Orientation::Top,
            Orientation::Top => Orientation::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Left => "left",
            Orientation::Top => "top",
            Orientation::Right => "right",
            Orientation::Bottom => "bottom",
        }
    }
}

/// An integer `(x, y)` pair
///
/// Used both for offsets inside a piece's bounding box and for absolute grid
/// coordinates; which one is meant follows from context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub const fn translate(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    Empty,
    Occupied,
}

/// A cell on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub color: Color,
    pub occupancy: Occupancy,
}

impl Cell {
    pub const fn empty(background: Color) -> Self {
        Self {
            color: background,
            occupancy: Occupancy::Empty,
        }
    }

    pub const fn occupied(color: Color) -> Self {
        Self {
            color,
            occupancy: Occupancy::Occupied,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupancy == Occupancy::Occupied
    }
}

/// Result of a single drop tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// The piece moved one row down and is still falling.
    Falling,
    /// The piece could not move down and is now locked in place.
    Landed,
    /// There was no falling piece.
    Idle,
}

/// Commands the driver can issue against the engine
///
/// These are produced by the input mapper and consumed by the game facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell (locks it when blocked)
    SoftDrop,
    /// Rotate piece along the reverse cycle
    RotateLeft,
    /// Rotate piece along the forward cycle
    RotateRight,
    /// Park the active piece in the hold slot
    Hold,
    /// Start over with the same configuration
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// ```
    /// use fallblock_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateRight"), Some(GameAction::RotateRight));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotateleft" => Some(GameAction::RotateLeft),
            "rotateright" => Some(GameAction::RotateRight),
            "hold" => Some(GameAction::Hold),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::RotateLeft => "rotateLeft",
            GameAction::RotateRight => "rotateRight",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}

/// Events surfaced to the driver, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// The falling piece was blocked on descent and is now part of the stack.
    PieceLocked,
    /// A line clear removed `count` rows and awarded `points`.
    LinesCleared { count: u32, points: u32 },
    /// A new piece could not be placed because its cells were occupied.
    GameOver,
}
