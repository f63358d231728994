use core::mem;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;
pub use spawn::*;

mod spawn;

/// Colors that are spawned together after a move.
pub type Batch = SmallVec<[Color; BATCH_SIZE]>;

/// Keeps the next batch drawn ahead of time so it can be shown before it lands on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpcomingBalls {
    batch_size: usize,
    pending: Batch,
}

impl UpcomingBalls {
    pub fn new(batch_size: usize, rng: &mut SmallRng) -> Self {
        Self {
            batch_size,
            pending: draw_batch(batch_size, rng),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The batch the next [`consume`](Self::consume) will return.
    pub fn peek_next(&self) -> &[Color] {
        &self.pending
    }

    /// Hands out the pending batch and immediately draws its successor.
    pub fn consume(&mut self, rng: &mut SmallRng) -> Batch {
        let next = draw_batch(self.batch_size, rng);
        mem::replace(&mut self.pending, next)
    }
}

/// Independent uniform draw per slot, duplicates allowed.
fn draw_batch(batch_size: usize, rng: &mut SmallRng) -> Batch {
    (0..batch_size)
        .map(|_| BALL_COLORS[rng.random_range(0..BALL_COLORS.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_returns_previewed_batch() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut upcoming = UpcomingBalls::new(BATCH_SIZE, &mut rng);

        for _ in 0..20 {
            let previewed = Batch::from_slice(upcoming.peek_next());
            assert_eq!(upcoming.consume(&mut rng), previewed);
            assert_eq!(upcoming.peek_next().len(), BATCH_SIZE);
        }
    }

    #[test]
    fn batches_only_hold_ball_colors() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut upcoming = UpcomingBalls::new(5, &mut rng);

        for _ in 0..50 {
            assert!(upcoming.consume(&mut rng).iter().all(|c| c.is_ball()));
        }
    }

    #[test]
    fn every_color_eventually_drawn() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut upcoming = UpcomingBalls::new(BATCH_SIZE, &mut rng);
        let mut seen = [false; BALL_COLORS.len()];

        for _ in 0..200 {
            for color in upcoming.consume(&mut rng) {
                let index = BALL_COLORS.iter().position(|&c| c == color).unwrap();
                seen[index] = true;
            }
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn same_seed_same_batches() {
        let mut rng_a = SmallRng::seed_from_u64(99);
        let mut rng_b = SmallRng::seed_from_u64(99);
        let mut a = UpcomingBalls::new(BATCH_SIZE, &mut rng_a);
        let mut b = UpcomingBalls::new(BATCH_SIZE, &mut rng_b);

        for _ in 0..10 {
            assert_eq!(a.consume(&mut rng_a), b.consume(&mut rng_b));
        }
    }
}
