use rand::prelude::*;
use rand::rngs::SmallRng;
use smallvec::SmallVec;

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub enum SpawnOutcome {
    /// Where each color of the batch landed, in batch order.
    Placed(SmallVec<[Coords; BATCH_SIZE]>),
    /// Not enough room left for a batch, nothing was placed or consumed.
    BoardFull,
}

impl SpawnOutcome {
    pub const fn is_board_full(&self) -> bool {
        matches!(self, Self::BoardFull)
    }
}

/// Drops the next batch on random empty cells.
///
/// The board counts as full once the number of empty cells is not larger than the batch.
pub fn spawn_batch(board: &mut Board, upcoming: &mut UpcomingBalls, rng: &mut SmallRng) -> SpawnOutcome {
    let mut free_cells = board.empty_cells();
    if free_cells.len() <= upcoming.batch_size() {
        log::debug!(
            "board full, {} empty cells for a batch of {}",
            free_cells.len(),
            upcoming.batch_size()
        );
        return SpawnOutcome::BoardFull;
    }

    let placed: SmallVec<[Coords; BATCH_SIZE]> = upcoming
        .consume(rng)
        .into_iter()
        .map(|color| {
            let coords = free_cells.swap_remove(rng.random_range(0..free_cells.len()));
            board[coords] = color;
            coords
        })
        .collect();
    log::debug!("spawned {placed:?}");
    SpawnOutcome::Placed(placed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_fills_distinct_empty_cells() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut board = Board::new((9, 9));
        let mut upcoming = UpcomingBalls::new(BATCH_SIZE, &mut rng);
        let expected = Batch::from_slice(upcoming.peek_next());

        let SpawnOutcome::Placed(placed) = spawn_batch(&mut board, &mut upcoming, &mut rng) else {
            panic!("empty board should have room");
        };

        assert_eq!(placed.len(), BATCH_SIZE);
        let colors: Batch = placed.iter().map(|&coords| board[coords]).collect();
        assert_eq!(colors, expected);
        assert_eq!(board.empty_cells().len(), 81 - BATCH_SIZE);
    }

    #[test]
    fn never_overwrites_balls() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut board = Board::from_ascii(&["RRRR.", "RR.RR", "R.RR."]).unwrap();
        let before = board.clone();
        let mut upcoming = UpcomingBalls::new(BATCH_SIZE, &mut rng);

        assert!(!spawn_batch(&mut board, &mut upcoming, &mut rng).is_board_full());
        assert_eq!(board.count(Color::Empty), 1);
        for (coords, color) in before.iter().filter(|(_, color)| color.is_ball()) {
            assert_eq!(board[coords], color);
        }
    }

    #[test]
    fn three_free_cells_is_full() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut board = Board::from_ascii(&["RR.R", "R.R.", "RRRR"]).unwrap();
        let before = board.clone();
        let mut upcoming = UpcomingBalls::new(BATCH_SIZE, &mut rng);
        let pending = Batch::from_slice(upcoming.peek_next());

        assert_eq!(
            spawn_batch(&mut board, &mut upcoming, &mut rng),
            SpawnOutcome::BoardFull
        );
        assert_eq!(board, before);
        assert_eq!(upcoming.peek_next(), pending.as_slice());
    }
}
