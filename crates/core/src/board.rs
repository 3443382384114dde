//! Board state - one independent playfield
//!
//! A board owns its grid, active piece, next-piece queue, control mode and the
//! autonomous executor's bookkeeping. It handles spawning, locking, game over
//! and reset; moving the piece is done by [`crate::movement`] and deciding
//! where it goes by [`crate::executor`].

use serde::Serialize;

use crate::events::BoardEvent;
use crate::executor::ExecutorState;
use crate::grid::Grid;
use crate::lock::{self, LockOutcome};
use crate::movement::{self, would_collide, DropOutcome};
use crate::piece::ActivePiece;
use crate::rng::PieceBag;
use crate::snapshot::{ActiveSnapshot, BoardSnapshot};
use crate::types::*;

/// Unlocks granted to a board by outside collaborators. Reset keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    /// Human players may hard drop
    pub hard_drop: bool,
    /// The autonomous executor finishes placements with a hard drop
    pub autonomous_hard_drop: bool,
}

/// Complete state of one board.
///
/// Every mutation queues its notifications on the board. [`Session`] drains
/// the queue after each step; code that drives a `Board` directly (tests,
/// benches) owns that job and must call [`Board::take_events`], otherwise the
/// queue keeps growing.
///
/// [`Session`]: crate::session::Session
#[derive(Debug, Clone)]
pub struct Board {
    index: usize,
    pub(crate) grid: Grid,
    pub(crate) active: Option<ActivePiece>,
    next: PieceKind,
    bag: PieceBag,
    mode: ControlMode,
    over: bool,
    started: bool,
    pub(crate) capabilities: Capabilities,
    gravity_ms: u32,
    autonomous_cadence_ms: u32,
    pub(crate) gravity_timer_ms: u32,
    pub(crate) executor: ExecutorState,
    /// Pieces left before a manual override hands control back to the agent
    override_remaining: Option<u32>,
    lines_cleared: u32,
    pieces_locked: u32,
    /// Grid or active piece changed since the last `take_changed`
    pub(crate) changed: bool,
    events: Vec<BoardEvent>,
}

impl Board {
    /// Create an empty, human-controlled board. Call [`Board::start`] to
    /// spawn the first piece.
    pub fn new(index: usize, width: usize, height: usize, seed: u32) -> Self {
        let mut bag = PieceBag::new(seed);
        let next = bag.draw();
        Self {
            index,
            grid: Grid::new(width, height),
            active: None,
            next,
            bag,
            mode: ControlMode::Human,
            over: false,
            started: false,
            capabilities: Capabilities::default(),
            gravity_ms: DEFAULT_GRAVITY_MS,
            autonomous_cadence_ms: DEFAULT_AUTONOMOUS_CADENCE_MS,
            gravity_timer_ms: 0,
            executor: ExecutorState::default(),
            override_remaining: None,
            lines_cleared: 0,
            pieces_locked: 0,
            changed: false,
            events: Vec::new(),
        }
    }

    /// Spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn();
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn gravity_ms(&self) -> u32 {
        self.gravity_ms
    }

    pub fn autonomous_cadence_ms(&self) -> u32 {
        self.autonomous_cadence_ms
    }

    /// Placement the executor is currently working towards
    pub fn pending_target(&self) -> Option<MoveTarget> {
        self.executor.target
    }

    pub fn executor(&self) -> &ExecutorState {
        &self.executor
    }

    pub fn override_remaining(&self) -> Option<u32> {
        self.override_remaining
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn set_capabilities(&mut self, capabilities: Capabilities) {
        self.capabilities = capabilities;
    }

    pub fn set_gravity_ms(&mut self, ms: u32) {
        self.gravity_ms = ms;
    }

    pub fn set_autonomous_cadence_ms(&mut self, ms: u32) {
        self.autonomous_cadence_ms = ms;
    }

    /// Take the events queued since the last call, leaving the queue empty
    pub fn take_events(&mut self) -> std::vec::Drain<'_, BoardEvent> {
        self.events.drain(..)
    }

    /// Whether the grid or active piece changed since the last call
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Bring the queued kind into play and draw a new one.
    ///
    /// A spawn that collides immediately ends the board.
    pub(crate) fn spawn(&mut self) -> bool {
        let kind = self.next;
        self.next = self.bag.draw();
        self.events.push(BoardEvent::NextPieceChanged(self.next));

        self.executor.on_spawn();
        self.gravity_timer_ms = 0;
        self.changed = true;

        let piece = ActivePiece::spawn(kind, self.grid.width());
        if would_collide(&piece, &self.grid) {
            self.enter_game_over();
            return false;
        }
        self.active = Some(piece);
        true
    }

    fn enter_game_over(&mut self) {
        self.over = true;
        self.active = None;
        self.override_remaining = None;
        self.executor.clear_target();
        if self.mode == ControlMode::Autonomous {
            self.mode = ControlMode::Human;
            self.events
                .push(BoardEvent::ControlModeChanged(ControlMode::Human));
        }
        self.events.push(BoardEvent::GameOver);
    }

    /// Lock the active piece, clear rows, advance a manual override and spawn
    /// the next piece.
    pub(crate) fn settle(&mut self) -> LockOutcome {
        let Some(piece) = self.active.take() else {
            return LockOutcome::default();
        };

        let outcome = lock::lock_and_clear(&mut self.grid, &piece);
        self.pieces_locked += 1;
        self.lines_cleared += outcome.lines_cleared;
        if outcome.lines_cleared > 0 {
            self.events.push(BoardEvent::LinesCleared(outcome.lines_cleared));
        }
        self.changed = true;

        if let Some(remaining) = self.override_remaining {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                self.override_remaining = None;
                self.switch_mode(ControlMode::Autonomous);
            } else {
                self.override_remaining = Some(remaining);
            }
        }

        self.spawn();
        outcome
    }

    fn switch_mode(&mut self, mode: ControlMode) {
        // A plan made under the old mode must never run under the new one
        self.executor.clear_target();
        self.gravity_timer_ms = 0;
        if self.mode != mode {
            self.mode = mode;
            self.events.push(BoardEvent::ControlModeChanged(mode));
        }
    }

    /// Hand the board to the player or the agent. Cancels any manual override
    /// and pending plan. Ignored (false) once the board is over.
    pub fn set_mode(&mut self, mode: ControlMode) -> bool {
        if self.over {
            return false;
        }
        self.override_remaining = None;
        self.switch_mode(mode);
        true
    }

    /// Give an autonomous board to the player for `pieces` locks, after which
    /// it returns to autonomous control by itself.
    pub fn begin_manual_override(&mut self, pieces: u32) -> bool {
        if self.over || pieces == 0 || self.mode != ControlMode::Autonomous {
            return false;
        }
        self.switch_mode(ControlMode::Human);
        self.override_remaining = Some(pieces);
        true
    }

    /// Overwrite the queued next kind; the active piece is untouched
    pub fn force_next_piece(&mut self, kind: PieceKind) {
        self.next = kind;
        self.events.push(BoardEvent::NextPieceChanged(kind));
    }

    /// Reinitialize grid, piece, timers and counters and start again under
    /// `mode`. Capabilities, cadences and the board index survive.
    pub fn reset(&mut self, mode: ControlMode) {
        self.grid.clear();
        self.active = None;
        self.over = false;
        self.started = true;
        self.executor = ExecutorState::default();
        self.gravity_timer_ms = 0;
        self.override_remaining = None;
        self.lines_cleared = 0;
        self.pieces_locked = 0;
        self.switch_mode(mode);

        self.spawn();
        self.events.push(BoardEvent::ResetCompleted);
    }

    /// Apply a player command. Returns whether anything happened.
    pub fn apply_command(&mut self, command: Command) -> bool {
        if self.over || self.active.is_none() {
            return false;
        }
        match command {
            Command::MoveLeft => movement::translate(self, -1, 0),
            Command::MoveRight => movement::translate(self, 1, 0),
            Command::SoftDrop => movement::drop_one(self) != DropOutcome::Idle,
            Command::Rotate => movement::rotate(self),
            Command::HardDrop => {
                self.capabilities.hard_drop && movement::hard_drop(self).is_some()
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.index = self.index;
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        match (&mut out.active, self.active.as_ref()) {
            (Some(snap), Some(piece)) => snap.copy_from(piece),
            (slot, piece) => *slot = piece.map(ActiveSnapshot::from),
        }
        out.next = self.next;
        out.mode = self.mode;
        out.game_over = self.over;
        out.target = self.executor.target;
        out.capabilities = self.capabilities;
        out.override_remaining = self.override_remaining;
        out.lines_cleared = self.lines_cleared;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
