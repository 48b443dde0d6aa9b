//! Engine configuration.
//!
//! Board size, seed and palette are plain data, deserializable with `serde`
//! so a driver can load them from a file. [`EngineConfig::validate`] rejects
//! boards that cannot host every piece of the catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::shapes_for;
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Largest supported board side, so every coordinate fits in an `i16`.
pub const MAX_DIMENSION: u16 = i16::MAX as u16;

/// Largest supported board area in cells.
pub const MAX_CELLS: u32 = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u16, height: u16 },
    #[error(
        "board dimensions {width}x{height} exceed the maximum of {} per side or {} cells",
        MAX_DIMENSION,
        MAX_CELLS
    )]
    TooLarge { width: u16, height: u16 },
    #[error("{kind:?} needs {needed} columns but the board has {width}")]
    PieceTooWide {
        kind: PieceKind,
        needed: i16,
        width: u16,
    },
    #[error("{kind:?} needs {needed} rows but the board has {height}")]
    PieceTooTall {
        kind: PieceKind,
        needed: i16,
        height: u16,
    },
}

/// One color per piece kind; `background` paints empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub line: Color,
    pub t: Color,
    pub square: Color,
    pub l: Color,
    pub mirror_l: Color,
}

impl Palette {
    pub fn color(&self, kind: PieceKind) -> Color {
        match kind {
            PieceKind::Background => self.background,
            PieceKind::Line => self.line,
            PieceKind::T => self.t,
            PieceKind::Square => self.square,
            PieceKind::L => self.l,
            PieceKind::MirrorL => self.mirror_l,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::new(30, 30, 40),
            line: Color::new(0, 240, 240),
            t: Color::new(160, 0, 240),
            square: Color::new(240, 240, 0),
            l: Color::new(240, 160, 0),
            mirror_l: Color::new(0, 0, 240),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    /// Seed for the default random source.
    pub seed: u32,
    pub palette: Palette,
}

impl EngineConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Check that the board can host every playable rotation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        let cells = u32::from(self.width) * u32::from(self.height);
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION || cells > MAX_CELLS {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }

        for kind in PieceKind::PLAYABLE {
            for rotation in shapes_for(kind).iter() {
                if rotation.width() > self.width as i16 {
                    return Err(ConfigError::PieceTooWide {
                        kind,
                        needed: rotation.width(),
                        width: self.width,
                    });
                }
                if rotation.height() > self.height as i16 {
                    return Err(ConfigError::PieceTooTall {
                        kind,
                        needed: rotation.height(),
                        height: self.height,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: 1,
            palette: Palette::default(),
        }
    }
}
