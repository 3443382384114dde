//! RNG module - per-board 7-bag piece generation
//!
//! Every board owns its own bag so boards stay independent and a session seed
//! reproduces the same piece sequence on every board index.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would be a fixed point of the LCG's low bits
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`
    pub fn next_below(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Shuffled bag holding one of each kind; refilled when empty
#[derive(Debug, Clone)]
pub struct PieceBag {
    bag: [PieceKind; 7],
    drawn: usize,
    rng: SimpleRng,
    seed: u32,
}

impl PieceBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            drawn: 0,
            rng: SimpleRng::new(seed),
            seed,
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        // Fisher-Yates
        for i in (1..self.bag.len()).rev() {
            let j = self.rng.next_below(i as u32 + 1) as usize;
            self.bag.swap(i, j);
        }
        self.drawn = 0;
    }

    /// Take the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        if self.drawn == self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.drawn];
        self.drawn += 1;
        kind
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}
