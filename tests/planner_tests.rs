//! Planner and executor tests against whole boards

use tetris_fleet::core::executor::{self, AutoAction};
use tetris_fleet::core::{
    plan_best_placement, rotate_clockwise, would_collide, ActivePiece, Board, Capabilities, Grid,
    PlannerWeights, SimpleRng,
};
use tetris_fleet::types::{ControlMode, MoveTarget, PieceKind};

/// Random rubble in the bottom `rows` rows
fn rubble(rng: &mut SimpleRng, width: usize, height: usize, rows: usize) -> Grid {
    let mut grid = Grid::new(width, height);
    for y in height - rows..height {
        for x in 0..width {
            if rng.next_below(100) < 55 {
                grid.set(x as i32, y as i32, Some(PieceKind::O.color()));
            }
        }
    }
    grid
}

fn placed(piece: &ActivePiece, target: MoveTarget) -> ActivePiece {
    let mut candidate = piece.clone();
    for _ in 0..target.rotation {
        candidate.shape = rotate_clockwise(&candidate.shape);
    }
    candidate.x = target.x;
    candidate.y = 0;
    candidate
}

#[test]
fn test_plans_never_collide_at_the_top() {
    let mut rng = SimpleRng::new(77);
    let weights = PlannerWeights::default();
    for round in 0..60 {
        let width = 4 + rng.next_below(9) as usize;
        let height = 6 + rng.next_below(15) as usize;
        let rows = rng.next_below(height as u32 - 2) as usize;
        let grid = rubble(&mut rng, width, height, rows);

        for kind in PieceKind::ALL {
            let piece = ActivePiece::spawn(kind, width);
            if let Some(target) = plan_best_placement(&grid, &piece, &weights) {
                assert!(target.rotation < 4);
                assert!(
                    !would_collide(&placed(&piece, target), &grid),
                    "round {} {:?} {:?}",
                    round,
                    kind,
                    target
                );
            }
        }
    }
}

#[test]
fn test_flat_i_on_empty_board() {
    let grid = Grid::new(10, 20);
    let piece = ActivePiece::spawn(PieceKind::I, 10);
    let target = plan_best_placement(&grid, &piece, &PlannerWeights::default()).unwrap();
    assert_eq!(target.rotation % 2, 0, "I stays horizontal");
}

#[test]
fn test_vertical_i_into_the_well() {
    let mut rows = vec![".........."; 19];
    rows.push("#####.####");
    let grid = Grid::from_ascii(&rows);
    let piece = ActivePiece::spawn(PieceKind::I, 10);

    let target = plan_best_placement(&grid, &piece, &PlannerWeights::default()).unwrap();
    let cols: Vec<i32> = placed(&piece, target).cells().map(|(x, _)| x).collect();
    assert_eq!(cols, vec![5, 5, 5, 5]);
}

#[test]
fn test_weights_change_the_choice() {
    let mut rows = vec!["......"; 7];
    rows.push("##.###");
    let grid = Grid::from_ascii(&rows);
    let piece = ActivePiece::spawn(PieceKind::O, 6);

    // Default weights keep the O off the single gap
    let default = plan_best_placement(&grid, &piece, &PlannerWeights::default()).unwrap();
    assert_eq!(default, MoveTarget { x: 0, rotation: 0 });

    // Rewarding holes makes sealing the gap the best move
    let perverse = PlannerWeights {
        holes: 100,
        ..PlannerWeights::default()
    };
    let sealed = plan_best_placement(&grid, &piece, &perverse).unwrap();
    assert_eq!(sealed, MoveTarget { x: 1, rotation: 0 });
}

#[test]
fn test_executor_locks_within_width_plus_four_steps() {
    for seed in 1..20 {
        let mut board = Board::new(0, 10, 20, seed);
        board.start();
        board.set_mode(ControlMode::Autonomous);
        board.set_capabilities(Capabilities {
            hard_drop: true,
            autonomous_hard_drop: true,
        });

        let mut steps = 0;
        while board.pieces_locked() == 0 {
            let action = executor::step(&mut board, &PlannerWeights::default());
            assert_ne!(action, AutoAction::Idle);
            steps += 1;
            assert!(steps <= 14, "seed {} needed {} steps", seed, steps);
        }
    }
}
