//! Outward notifications
//!
//! Boards queue [`BoardEvent`]s while they are stepped; the session drains the
//! queue after each board and hands every event to the subscribed
//! [`SessionObserver`]s in order. Observers never see a board mid-step.

use crate::types::{ControlMode, PieceKind};

/// Something a board reported during its last step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// A lock completed this many rows (never zero)
    LinesCleared(u32),
    /// The queued next piece changed (spawn, forced next piece, reset)
    NextPieceChanged(PieceKind),
    /// A freshly spawned piece collided; the board stopped
    GameOver,
    /// An external reset finished
    ResetCompleted,
    /// The board switched between human and autonomous control
    ControlModeChanged(ControlMode),
}

/// Subscriber for session notifications. Every method defaults to a no-op.
pub trait SessionObserver {
    /// Grid or active piece changed; pull a snapshot to redraw
    fn on_board_changed(&mut self, _board: usize) {}

    fn on_lines_cleared(&mut self, _board: usize, _lines: u32) {}

    fn on_next_piece_changed(&mut self, _board: usize, _next: PieceKind) {}

    fn on_game_over(&mut self, _board: usize) {}

    fn on_reset(&mut self, _board: usize) {}

    fn on_control_mode_changed(&mut self, _board: usize, _mode: ControlMode) {}
}

/// Route one event to the matching observer method
pub(crate) fn dispatch(observer: &mut dyn SessionObserver, board: usize, event: BoardEvent) {
    match event {
        BoardEvent::LinesCleared(lines) => observer.on_lines_cleared(board, lines),
        BoardEvent::NextPieceChanged(next) => observer.on_next_piece_changed(board, next),
        BoardEvent::GameOver => observer.on_game_over(board),
        BoardEvent::ResetCompleted => observer.on_reset(board),
        BoardEvent::ControlModeChanged(mode) => observer.on_control_mode_changed(board, mode),
    }
}
