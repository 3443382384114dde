//! Autonomous executor - turns a planned placement into primitive moves
//!
//! Each call to [`step`] performs at most one primitive action on the board:
//! a rotation, a one-column shift, or a drop. Planning happens lazily inside a
//! step and does not count as an action. [`advance`] wraps `step` with the
//! cadence timer and the stuck-piece safety timeout.

use crate::board::Board;
use crate::movement::{self, DropOutcome};
use crate::planner::{plan_best_placement, PlannerWeights};
use crate::types::MoveTarget;

/// Per-board bookkeeping for the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutorState {
    /// Placement being worked towards
    pub target: Option<MoveTarget>,
    /// Clockwise turns already applied towards `target.rotation`
    pub rotations_applied: u8,
    /// Time the current piece has been in play
    pub piece_age_ms: u32,
    /// Time accumulated towards the next cadence step
    pub step_timer_ms: u32,
}

impl ExecutorState {
    pub(crate) fn clear_target(&mut self) {
        self.target = None;
        self.rotations_applied = 0;
    }

    pub(crate) fn on_spawn(&mut self) {
        self.clear_target();
        self.piece_age_ms = 0;
    }
}

/// What one executor invocation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoAction {
    /// Nothing to do (no active piece, board over, or cadence not reached)
    Idle,
    Rotated,
    /// Rotation failed; the remaining turns were skipped
    RotationAbandoned,
    Shifted,
    /// Shift failed; plan dropped and the piece moved down instead
    ShiftBlocked,
    HardDropped,
    Dropped,
    /// Planner found no legal placement; the piece moved down instead
    NoPlan,
    /// Stuck-piece timeout fired
    ForcedDrop,
}

/// Perform one primitive action towards the board's target
pub fn step(board: &mut Board, weights: &PlannerWeights) -> AutoAction {
    if board.is_over() {
        return AutoAction::Idle;
    }
    let Some(piece) = board.active.as_ref() else {
        return AutoAction::Idle;
    };

    let target = match board.executor.target {
        Some(target) => target,
        None => match plan_best_placement(&board.grid, piece, weights) {
            Some(target) => {
                board.executor.target = Some(target);
                board.executor.rotations_applied = 0;
                target
            }
            None => {
                movement::drop_one(board);
                return AutoAction::NoPlan;
            }
        },
    };

    if board.executor.rotations_applied < target.rotation {
        if movement::rotate(board) {
            board.executor.rotations_applied += 1;
            return AutoAction::Rotated;
        }
        board.executor.rotations_applied = target.rotation;
        return AutoAction::RotationAbandoned;
    }

    let x = board.active.as_ref().map_or(target.x, |p| p.x);
    if x != target.x {
        if movement::translate(board, (target.x - x).signum(), 0) {
            return AutoAction::Shifted;
        }
        board.executor.clear_target();
        movement::drop_one(board);
        return AutoAction::ShiftBlocked;
    }

    let action = if board.capabilities.autonomous_hard_drop {
        movement::hard_drop(board);
        AutoAction::HardDropped
    } else {
        movement::drop_one(board);
        AutoAction::Dropped
    };
    board.executor.clear_target();
    action
}

/// Advance an autonomous board by `elapsed_ms`.
///
/// The stuck-piece timeout is checked first; when it fires it forces one
/// downward step and discards the plan, and that is the board's only action
/// for this call. Otherwise one [`step`] runs each time the cadence timer
/// reaches the board's cadence.
pub fn advance(
    board: &mut Board,
    elapsed_ms: u32,
    weights: &PlannerWeights,
    stuck_timeout_ms: u32,
) -> AutoAction {
    if board.is_over() || board.active.is_none() {
        return AutoAction::Idle;
    }

    let cadence_ms = board.autonomous_cadence_ms();
    let state = &mut board.executor;
    state.piece_age_ms = state.piece_age_ms.saturating_add(elapsed_ms);
    if state.piece_age_ms > stuck_timeout_ms {
        // Age keeps counting until the next spawn, so a stuck piece is forced
        // down on every call past the timeout.
        state.clear_target();
        if movement::drop_one(board) != DropOutcome::Idle {
            return AutoAction::ForcedDrop;
        }
        return AutoAction::Idle;
    }

    state.step_timer_ms = state.step_timer_ms.saturating_add(elapsed_ms);
    if state.step_timer_ms < cadence_ms {
        return AutoAction::Idle;
    }
    state.step_timer_ms = 0;
    step(board, weights)
}
