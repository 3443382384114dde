//! FleetView: lays out every board snapshot side by side in a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::BoardSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};
use crate::types::ControlMode;

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

/// Session-wide facts shown alongside the boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FleetStatus {
    pub focused: Option<usize>,
    pub hard_drop_unlocked: bool,
    /// A force-next chord is waiting for its piece letter
    pub awaiting_piece: bool,
}

const GAP: u16 = 2;
/// Header row above and footer row below each frame
const LABEL_ROWS: u16 = 2;

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER: Rgb = Rgb::new(160, 160, 170);
const FOCUS: Rgb = Rgb::new(250, 210, 80);

pub struct FleetView {
    /// Preferred board cell width in terminal columns; drops to 1 when the
    /// boards would not fit otherwise.
    cell_w: u16,
}

impl Default for FleetView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl FleetView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn frame_width(boards: &[BoardSnapshot], cell_w: u16) -> u16 {
        boards
            .iter()
            .map(|b| b.width as u16 * cell_w + 2)
            .sum::<u16>()
            + GAP * boards.len().saturating_sub(1) as u16
    }

    /// Render all boards into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(
        &self,
        boards: &[BoardSnapshot],
        status: &FleetStatus,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let cell_w = if Self::frame_width(boards, self.cell_w) <= viewport.width {
            self.cell_w
        } else {
            1
        };
        let total_w = Self::frame_width(boards, cell_w);
        let tallest = boards.iter().map(|b| b.height as u16).max().unwrap_or(0);
        let total_h = tallest + 2 + LABEL_ROWS;

        let mut x = viewport.width.saturating_sub(total_w) / 2;
        let y = viewport.height.saturating_sub(total_h + 1) / 2;
        for board in boards {
            let focused = status.focused == Some(board.index);
            self.draw_board(fb, board, focused, cell_w, x, y);
            x = x.saturating_add(board.width as u16 * cell_w + 2 + GAP);
        }

        self.draw_status_line(fb, status, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, boards: &[BoardSnapshot], status: &FleetStatus, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(boards, status, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &BoardSnapshot, focused: bool, cell_w: u16, x: u16, y: u16) {
        let frame_w = snap.width as u16 * cell_w + 2;
        let frame_h = snap.height as u16 + 2;
        let border = if focused {
            CellStyle::fg(FOCUS).bold()
        } else {
            CellStyle::fg(BORDER)
        };

        // Header: number as typed to focus it, then the controller
        let mut hx = fb.put_u32(x, y, snap.index as u32 + 1, border);
        let mode = match (snap.mode, snap.override_remaining) {
            (_, Some(_)) => " OVERRIDE",
            (ControlMode::Human, None) => " HUMAN",
            (ControlMode::Autonomous, None) => " AUTO",
        };
        hx = fb.put_str(hx, y, mode, border);
        if let Some(left) = snap.override_remaining {
            hx = fb.put_char(hx, y, ' ', border);
            fb.put_u32(hx, y, left, border);
        }

        let top = y + 1;
        fb.draw_box(x, top, frame_w, frame_h, border);
        fb.fill_rect(x + 1, top + 1, frame_w - 2, frame_h - 2, ' ', CellStyle::default().on(PLAY_BG));

        for row in 0..snap.height {
            for col in 0..snap.width {
                let px = x + 1 + col as u16 * cell_w;
                let py = top + 1 + row as u16;
                match snap.color_at(col, row) {
                    Some(color) => {
                        let style = CellStyle::fg(Rgb::from(color)).on(PLAY_BG).bold();
                        fb.fill_rect(px, py, cell_w, 1, '█', style);
                    }
                    None => {
                        let style = CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAY_BG).dim();
                        fb.put_char(px, py, '·', style);
                    }
                }
            }
        }

        // Planned column for autonomous boards
        if let Some(target) = snap.target {
            let marker = CellStyle::fg(FOCUS.darker());
            if target.x >= 0 && (target.x as usize) < snap.width {
                fb.put_char(x + 1 + target.x as u16 * cell_w, top + frame_h - 1, '^', marker);
            }
        }

        let footer = top + frame_h;
        let label = CellStyle::fg(BORDER);
        let mut fx = fb.put_str(x, footer, "N:", label);
        fx = fb.put_char(fx, footer, snap.next.letter(), label.bold());
        fx = fb.put_str(fx, footer, " L:", label);
        fb.put_u32(fx, footer, snap.lines_cleared, label);

        if snap.game_over {
            let text = "GAME OVER";
            let tx = x + frame_w.saturating_sub(text.len() as u16) / 2;
            fb.put_str(tx, top + frame_h / 2, text, CellStyle::fg(Rgb::new(255, 255, 255)).bold());
        }
    }

    fn draw_status_line(&self, fb: &mut FrameBuffer, status: &FleetStatus, viewport: Viewport) {
        let Some(y) = viewport.height.checked_sub(1) else {
            return;
        };
        let style = CellStyle::fg(Rgb::new(150, 150, 160));
        let help = if status.awaiting_piece {
            "next piece: I O T S Z J L (esc cancels)"
        } else {
            "1-9 focus  m auto  o override  r reset  n next  u hard drop  q quit"
        };
        let x = fb.put_str(0, y, help, style);
        if status.hard_drop_unlocked {
            fb.put_str(x.saturating_add(2), y, "[HD]", style.bold());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Session, SessionConfig};

    fn row(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width()).filter_map(|x| fb.get(x, y)).map(|g| g.ch).collect()
    }

    fn snapshots(session: &Session) -> Vec<BoardSnapshot> {
        session.boards().map(|b| b.snapshot()).collect()
    }

    #[test]
    fn renders_every_board() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.add_board(ControlMode::Human).unwrap();
        session.add_board(ControlMode::Autonomous).unwrap();
        let status = FleetStatus {
            focused: session.focused(),
            ..FleetStatus::default()
        };

        let fb = FleetView::default().render(&snapshots(&session), &status, Viewport::new(80, 30));
        let text: String = (0..fb.height()).map(|y| row(&fb, y)).collect::<Vec<_>>().join("\n");
        assert!(text.contains("1 HUMAN"));
        assert!(text.contains("2 AUTO"));
        assert_eq!(text.matches('┌').count(), 2);
        assert!(text.contains('█'), "active pieces are drawn");
    }

    #[test]
    fn narrow_viewport_falls_back_to_single_width_cells() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        for _ in 0..4 {
            session.add_board(ControlMode::Human).unwrap();
        }
        // Four boards at 2 columns per cell need 94 columns; at 1 they need 54
        let fb = FleetView::default().render(&snapshots(&session), &FleetStatus::default(), Viewport::new(60, 30));
        let text: String = (0..fb.height()).map(|y| row(&fb, y)).collect();
        assert_eq!(text.matches('┌').count(), 4);
    }

    #[test]
    fn game_over_is_shown() {
        let mut session = Session::new(SessionConfig {
            board_width: 4,
            board_height: 4,
            ..SessionConfig::default()
        }).unwrap();
        let board = session.add_board(ControlMode::Human).unwrap();
        session.set_hard_drop_unlocked(true);
        while !session.board(board).unwrap().is_over() {
            session.apply_command(crate::types::Command::HardDrop);
        }
        let fb = FleetView::new(4).render(&snapshots(&session), &FleetStatus::default(), Viewport::new(40, 12));
        let text: String = (0..fb.height()).map(|y| row(&fb, y)).collect();
        assert!(text.contains("GAME OVER"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.add_board(ControlMode::Human).unwrap();
        FleetView::default().render(&snapshots(&session), &FleetStatus::default(), Viewport::new(3, 0));
    }
}
