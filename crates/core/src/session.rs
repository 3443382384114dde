//! Session - the bounded board collection and its tick scheduler
//!
//! Boards are stepped in index order, one primitive action per board per tick
//! at most. After each board the session drains that board's queued events
//! and forwards them to every subscribed observer.

use crate::board::{Board, Capabilities};
use crate::config::SessionConfig;
use crate::error::{ConfigError, SessionError};
use crate::events::{self, BoardEvent, SessionObserver};
use crate::executor;
use crate::movement;
use crate::snapshot::BoardSnapshot;
use crate::types::{Command, ControlMode, PieceKind};

pub struct Session {
    config: SessionConfig,
    boards: Vec<Board>,
    focused: Option<usize>,
    hard_drop_unlocked: bool,
    observers: Vec<Box<dyn SessionObserver>>,
    /// Reused buffer for draining board events
    pending: Vec<BoardEvent>,
}

impl Session {
    /// Empty session; fails when `config` does not pass
    /// [`SessionConfig::validate`].
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            boards: Vec::with_capacity(config.max_boards),
            config,
            focused: None,
            hard_drop_unlocked: false,
            observers: Vec::new(),
            pending: Vec::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Create a started board under `mode` and return its index.
    ///
    /// The first human board becomes focused.
    pub fn add_board(&mut self, mode: ControlMode) -> Result<usize, SessionError> {
        if self.boards.len() >= self.config.max_boards {
            return Err(SessionError::BoardLimitReached {
                max: self.config.max_boards,
            });
        }

        let index = self.boards.len();
        let mut board = Board::new(
            index,
            self.config.board_width,
            self.config.board_height,
            self.config.seed.wrapping_add(index as u32),
        );
        board.set_gravity_ms(self.config.gravity_ms);
        board.set_autonomous_cadence_ms(self.config.autonomous_cadence_ms);
        board.set_capabilities(Capabilities {
            hard_drop: self.hard_drop_unlocked,
            autonomous_hard_drop: false,
        });
        board.start();
        if mode == ControlMode::Autonomous {
            board.set_mode(mode);
        }
        self.boards.push(board);

        if self.focused.is_none() && mode == ControlMode::Human {
            self.focused = Some(index);
        }
        self.flush(index);
        Ok(index)
    }

    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.iter()
    }

    fn board_mut(&mut self, index: usize) -> Result<&mut Board, SessionError> {
        let count = self.boards.len();
        self.boards
            .get_mut(index)
            .ok_or(SessionError::UnknownBoard { index, count })
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Direct player commands (and human gravity) to board `index`
    pub fn focus(&mut self, index: usize) -> Result<(), SessionError> {
        self.board_mut(index)?;
        self.focused = Some(index);
        Ok(())
    }

    /// Apply a player command to the focused board.
    ///
    /// Ignored unless that board is human-controlled and still playing.
    pub fn apply_command(&mut self, command: Command) -> bool {
        let Some(index) = self.focused else {
            return false;
        };
        let Some(board) = self.boards.get_mut(index) else {
            return false;
        };
        if board.mode() != ControlMode::Human {
            return false;
        }
        let applied = board.apply_command(command);
        self.flush(index);
        applied
    }

    /// Switch a board between human and autonomous control. Returns false for
    /// a board that is over.
    pub fn set_control_mode(&mut self, index: usize, mode: ControlMode) -> Result<bool, SessionError> {
        let changed = self.board_mut(index)?.set_mode(mode);
        self.flush(index);
        Ok(changed)
    }

    /// Hand an autonomous board to the player for `pieces` locks and focus it
    pub fn begin_manual_override(&mut self, index: usize, pieces: u32) -> Result<bool, SessionError> {
        let started = self.board_mut(index)?.begin_manual_override(pieces);
        if started {
            self.focused = Some(index);
        }
        self.flush(index);
        Ok(started)
    }

    pub fn reset_board(&mut self, index: usize, mode: ControlMode) -> Result<(), SessionError> {
        self.board_mut(index)?.reset(mode);
        self.flush(index);
        Ok(())
    }

    pub fn force_next_piece(&mut self, index: usize, kind: PieceKind) -> Result<(), SessionError> {
        self.board_mut(index)?.force_next_piece(kind);
        self.flush(index);
        Ok(())
    }

    pub fn hard_drop_unlocked(&self) -> bool {
        self.hard_drop_unlocked
    }

    /// Grant or revoke hard drop on every board, including boards added later
    pub fn set_hard_drop_unlocked(&mut self, unlocked: bool) {
        self.hard_drop_unlocked = unlocked;
        for board in &mut self.boards {
            let mut caps = board.capabilities();
            caps.hard_drop = unlocked;
            board.set_capabilities(caps);
        }
    }

    pub fn set_autonomous_hard_drop(&mut self, index: usize, enabled: bool) -> Result<(), SessionError> {
        let board = self.board_mut(index)?;
        let mut caps = board.capabilities();
        caps.autonomous_hard_drop = enabled;
        board.set_capabilities(caps);
        Ok(())
    }

    pub fn set_autonomous_cadence(&mut self, index: usize, cadence_ms: u32) -> Result<(), SessionError> {
        self.board_mut(index)?.set_autonomous_cadence_ms(cadence_ms.max(1));
        Ok(())
    }

    /// Advance every board by `elapsed_ms`.
    ///
    /// Autonomous boards run the executor on their cadence; the focused human
    /// board falls under gravity; other human boards are frozen.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for index in 0..self.boards.len() {
            let focused = self.focused == Some(index);
            let board = &mut self.boards[index];
            if board.is_over() {
                continue;
            }

            match board.mode() {
                ControlMode::Autonomous => {
                    executor::advance(
                        board,
                        elapsed_ms,
                        &self.config.planner,
                        self.config.stuck_piece_timeout_ms,
                    );
                }
                ControlMode::Human if focused => {
                    board.gravity_timer_ms = board.gravity_timer_ms.saturating_add(elapsed_ms);
                    if board.gravity_timer_ms >= board.gravity_ms() {
                        board.gravity_timer_ms = 0;
                        movement::drop_one(board);
                    }
                }
                ControlMode::Human => {}
            }

            self.flush(index);
        }
    }

    pub fn snapshot(&self, index: usize) -> Result<BoardSnapshot, SessionError> {
        self.boards
            .get(index)
            .map(Board::snapshot)
            .ok_or(SessionError::UnknownBoard {
                index,
                count: self.boards.len(),
            })
    }

    pub fn snapshot_into(&self, index: usize, out: &mut BoardSnapshot) -> Result<(), SessionError> {
        let board = self.boards.get(index).ok_or(SessionError::UnknownBoard {
            index,
            count: self.boards.len(),
        })?;
        board.snapshot_into(out);
        Ok(())
    }

    /// Forward whatever board `index` queued to the observers
    fn flush(&mut self, index: usize) {
        let Some(board) = self.boards.get_mut(index) else {
            return;
        };
        let changed = board.take_changed();
        self.pending.extend(board.take_events());

        for observer in &mut self.observers {
            if changed {
                observer.on_board_changed(index);
            }
            for &event in &self.pending {
                events::dispatch(observer.as_mut(), index, event);
            }
        }
        self.pending.clear();
    }
}
