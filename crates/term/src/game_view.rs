//! GameView: maps `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

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

/// A lightweight terminal view of the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 gives roughly square tiles and room for a 4-digit value.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let n = snap.size as u16;
        let board_px_w = n * self.cell_w;
        let board_px_h = n * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        // One row of header above the frame, one row of hints below.
        let start_y = (viewport.height.saturating_sub(frame_h + 4) / 2).saturating_add(2);

        self.draw_header(fb, snap, start_x, start_y, frame_w);

        let felt = CellStyle {
            fg: Rgb::new(119, 110, 101),
            bg: Rgb::new(187, 173, 160),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(187, 173, 160),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', felt);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..snap.size {
            for col in 0..snap.size {
                let value = snap.value_at(row, col);
                if value == 0 {
                    self.draw_empty_tile(fb, start_x, start_y, row as u16, col as u16);
                } else {
                    self.draw_tile(fb, start_x, start_y, row as u16, col as u16, value);
                }
            }
        }

        self.draw_hints(fb, start_x, start_y + frame_h, frame_w);

        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER - r: new game");
        } else if snap.won {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "2048! KEEP GOING");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_header(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let y = start_y.saturating_sub(2);
        let title = CellStyle {
            fg: Rgb::new(237, 194, 46),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.put_str(start_x, y, "2048", title);

        // Right-aligned-ish score block after the title.
        let mut x = start_x + 6;
        fb.put_str(x, y, "SCORE", label);
        x += 6;
        fb.put_u32(x, y, snap.score, value);
        x += digits(snap.score) + 2;
        if x < start_x + frame_w {
            fb.put_str(x, y, "BEST", label);
            fb.put_u32(x + 5, y, snap.best_score, value);
        }
    }

    fn draw_hints(&self, fb: &mut FrameBuffer, start_x: u16, y: u16, _frame_w: u16) {
        let dim = CellStyle {
            fg: Rgb::new(140, 140, 140),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: true,
        };
        fb.put_str(start_x, y + 1, "arrows/hjkl move  r new game  q quit", dim);
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

    fn draw_empty_tile(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, row: u16, col: u16) {
        let style = CellStyle {
            fg: Rgb::new(160, 148, 136),
            bg: Rgb::new(205, 193, 180),
            bold: false,
            dim: true,
        };
        self.fill_tile_rect(fb, start_x, start_y, row, col, ' ', style);
        let (cx, cy) = self.tile_center(start_x, start_y, row, col, 1);
        fb.put_char(cx, cy, '·', style);
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        value: u32,
    ) {
        let style = tile_style(value);
        self.fill_tile_rect(fb, start_x, start_y, row, col, ' ', style);

        let text_w = digits(value);
        let (cx, cy) = self.tile_center(start_x, start_y, row, col, text_w);
        fb.put_u32(cx, cy, value, style);
    }

    fn fill_tile_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn tile_center(
        &self,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        text_w: u16,
    ) -> (u16, u16) {
        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        (
            px + self.cell_w.saturating_sub(text_w) / 2,
            py + self.cell_h / 2,
        )
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
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Tile colors follow the classic 2048 palette; values above 2048 reuse the
/// gold 2048 tone.
fn tile_style(value: u32) -> CellStyle {
    let (bg, dark_text) = match value {
        2 => (Rgb::new(238, 228, 218), true),
        4 => (Rgb::new(237, 224, 200), true),
        8 => (Rgb::new(242, 177, 121), false),
        16 => (Rgb::new(245, 149, 99), false),
        32 => (Rgb::new(246, 124, 95), false),
        64 => (Rgb::new(246, 94, 59), false),
        128 => (Rgb::new(237, 207, 114), false),
        256 => (Rgb::new(237, 204, 97), false),
        512 => (Rgb::new(237, 200, 80), false),
        1024 => (Rgb::new(237, 197, 63), false),
        _ => (Rgb::new(237, 194, 46), false),
    };
    let fg = if dark_text {
        Rgb::new(119, 110, 101)
    } else {
        Rgb::new(249, 246, 242)
    };
    CellStyle {
        fg,
        bg,
        bold: value >= 128,
        dim: false,
    }
}

fn digits(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        d += 1;
        n /= 10;
    }
    d
}
