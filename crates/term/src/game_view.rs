//! GameView: maps a `core::Game` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Game, PiecePreview, RandomSource};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the board and its side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into<R: RandomSource>(&self, game: &Game<R>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_w = game.board_width();
        let board_h = game.board_height();
        let board_px_w = board_w.saturating_mul(self.cell_w);
        let board_px_h = board_h.saturating_mul(self.cell_h);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Every cell carries its own color, the falling piece included.
        let background = Rgb::from(game.board().background());
        for y in 0..board_h {
            for x in 0..board_w {
                let Some(cell) = game.cell_at(x as i16, y as i16) else {
                    continue;
                };
                let (ch, style) = if cell.is_occupied() {
                    let style = CellStyle {
                        bold: true,
                        ..CellStyle::plain(Rgb::from(cell.color), background)
                    };
                    ('█', style)
                } else {
                    let style = CellStyle {
                        dim: true,
                        ..CellStyle::plain(Rgb::new(90, 90, 100), Rgb::from(cell.color))
                    };
                    ('·', style)
                };
                let px = self.cell_origin(start_x, x, self.cell_w);
                let py = self.cell_origin(start_y, y, self.cell_h);
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        self.draw_side_panel(fb, game, viewport, start_x, start_y, frame_w);

        if game.game_over() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Terminal column (or row) of board cell `i`, inside the border.
    fn cell_origin(&self, start: u16, i: u16, size: u16) -> u16 {
        start.saturating_add(1).saturating_add(i.saturating_mul(size))
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<R: RandomSource>(&self, game: &Game<R>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel<R: RandomSource>(
        &self,
        fb: &mut FrameBuffer,
        game: &Game<R>,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, game.score(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, game.lines(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = self.draw_preview(fb, panel_x, y, &game.peek_next(), false);
        y = y.saturating_add(1);

        // Dimmed while hold is spent for the current piece.
        fb.put_str(panel_x, y, "HOLD", CellStyle { dim: !game.can_hold(), ..label });
        y = y.saturating_add(1);
        match game.peek_held() {
            Some(held) => {
                self.draw_preview(fb, panel_x, y, &held, !game.can_hold());
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
    }

    /// Draw a preview box; returns the first row below it.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, preview: &PiecePreview, dim: bool) -> u16 {
        let style = CellStyle {
            dim,
            ..CellStyle::plain(Rgb::from(preview.color), PANEL_BG)
        };
        for p in &preview.cells {
            let px = x.saturating_add((p.x as u16).saturating_mul(self.cell_w));
            let py = y.saturating_add((p.y as u16).saturating_mul(self.cell_h));
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
        y.saturating_add((preview.height as u16).saturating_mul(self.cell_h))
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
        };
        fb.put_str(x, mid_y, text, style);
    }
}
