//! TerminalRenderer: presents rendered games on a crossterm terminal.
//!
//! The renderer owns two framebuffers. Each frame the [`GameView`] draws into
//! the back buffer, only the cells that differ from the front buffer are
//! written out, and the buffers swap. A resize or [`TerminalRenderer::invalidate`]
//! forces one full repaint.
//!
//! The output is any `Write`, so the encoded bytes can be inspected in tests.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{self, Attribute, Colors, Print, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::core::{Game, RandomSource};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport};

impl From<Rgb> for style::Color {
    fn from(rgb: Rgb) -> Self {
        style::Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// A horizontal span of cells to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// What the terminal currently shows; `None` until the first frame.
    front: Option<FrameBuffer>,
    back: FrameBuffer,
    bytes: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            front: None,
            back: FrameBuffer::new(0, 0),
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.out.flush()?;
        self.invalidate();
        Ok(())
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.out
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.out.flush()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Repaint everything on the next frame.
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Render `game` and write the changed cells. Returns the number of runs written.
    pub fn draw_game<R: RandomSource>(
        &mut self,
        view: &GameView,
        game: &Game<R>,
        viewport: Viewport,
    ) -> Result<usize> {
        view.render_into(game, viewport, &mut self.back);
        self.present()
    }

    fn present(&mut self) -> Result<usize> {
        self.bytes.clear();
        let runs = encode_frame(self.front.as_ref(), &self.back, &mut self.bytes)?;
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;

        match self.front.as_mut() {
            Some(front) => std::mem::swap(front, &mut self.back),
            None => self.front = Some(std::mem::replace(&mut self.back, FrameBuffer::new(0, 0))),
        }
        Ok(runs)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

/// Spans of `next` that differ from `prev`. Without a same-sized `prev`,
/// every row is one span.
pub fn dirty_runs(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> Vec<Run> {
    let width = next.width();
    if width == 0 {
        return Vec::new();
    }

    let prev = prev.filter(|p| p.width() == width && p.height() == next.height());
    let Some(prev) = prev else {
        return (0..next.height()).map(|y| Run { x: 0, y, len: width }).collect();
    };

    let mut runs = Vec::new();
    let rows = prev.cells().chunks(width as usize).zip(next.cells().chunks(width as usize));
    for (y, (old, new)) in rows.enumerate() {
        let mut open: Option<u16> = None;
        for (x, (a, b)) in old.iter().zip(new).enumerate() {
            match (open, a == b) {
                (None, false) => open = Some(x as u16),
                (Some(start), true) => {
                    runs.push(Run { x: start, y: y as u16, len: x as u16 - start });
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(start) = open {
            runs.push(Run { x: start, y: y as u16, len: width - start });
        }
    }
    runs
}

/// Encode the bytes that bring a terminal showing `prev` to `next`.
///
/// With no usable `prev` the screen is cleared and fully repainted.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    let full = !matches!(prev, Some(p) if p.width() == next.width() && p.height() == next.height());
    if full {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let runs = dirty_runs(prev, next);
    let mut pen: Option<CellStyle> = None;
    for run in &runs {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let cell = next.get(x, run.y).unwrap_or_default();
            if pen != Some(cell.style) {
                set_style(out, cell.style)?;
                pen = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    if pen.is_some() {
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(runs.len())
}

/// SGR reset also clears colors, so it goes first.
fn set_style(out: &mut Vec<u8>, cell: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetColors(Colors::new(cell.fg.into(), cell.bg.into())))?;
    if cell.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if cell.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}
