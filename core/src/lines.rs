use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::*;

/// Accumulates one axis at a time and flushes finished runs into the deletion set.
struct RunScanner<'a> {
    min_run: usize,
    marked: &'a mut BTreeSet<Coords>,
    color: Option<Color>,
    run: Vec<Coords>,
}

impl<'a> RunScanner<'a> {
    fn new(min_run: usize, marked: &'a mut BTreeSet<Coords>) -> Self {
        Self {
            min_run,
            marked,
            color: None,
            run: Vec::new(),
        }
    }

    fn scan(&mut self, board: &Board, cells: impl IntoIterator<Item = Coords>) {
        self.color = None;
        self.run.clear();
        for coords in cells {
            let color = board[coords];
            if self.color != Some(color) {
                self.flush();
                self.color = Some(color);
            }
            self.run.push(coords);
        }
        // runs touching the far edge end here
        self.flush();
    }

    fn flush(&mut self) {
        let is_ball = self.color.is_some_and(Color::is_ball);
        if is_ball && self.run.len() >= self.min_run {
            self.marked.extend(self.run.iter().copied());
        }
        self.run.clear();
    }
}

/// Every cell that belongs to a run of at least `min_run` same-colored balls, horizontally, vertically or diagonally.
pub fn find_runs(board: &Board, min_run: usize) -> BTreeSet<Coords> {
    let (width, height) = board.size();
    let mut marked = BTreeSet::new();
    let mut scanner = RunScanner::new(min_run, &mut marked);

    for y in 0..height {
        scanner.scan(board, (0..width).map(|x| Coords::new(x, y)));
    }
    for x in 0..width {
        scanner.scan(board, (0..height).map(|y| Coords::new(x, y)));
    }

    for direction in [1, -1] {
        // every diagonal touches either the top edge or the side it starts from
        let side_x = if direction > 0 { 0 } else { width - 1 };
        let starts = (0..width)
            .map(|x| Coords::new(x, 0))
            .chain((1..height).map(|y| Coords::new(side_x, y)));
        for start in starts {
            let diagonal = core::iter::successors(Some(start), |coords| {
                coords.step((direction, 1), (width, height))
            });
            scanner.scan(board, diagonal);
        }
    }

    marked
}

/// Empties every cell in a qualifying run and returns how many were cleared.
///
/// A cell shared by several runs is counted once.
pub fn clear_runs(board: &mut Board, min_run: usize) -> CellCount {
    let mut cleared = 0;
    for coords in find_runs(board, min_run) {
        let cell = &mut board[coords];
        if !cell.is_empty() {
            *cell = Color::Empty;
            cleared += 1;
        }
    }
    if cleared > 0 {
        log::debug!("cleared {cleared} cells");
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN: usize = 5;

    fn nine_by_nine(rows: &[&str]) -> Board {
        let mut full = Vec::from(rows);
        full.resize(9, ".........");
        Board::from_ascii(&full).unwrap()
    }

    #[test]
    fn row_of_five_is_cleared() {
        let mut board = nine_by_nine(&["RRRRR...."]);

        assert_eq!(clear_runs(&mut board, RUN), 5);
        assert_eq!(board, Board::new((9, 9)));
    }

    #[test]
    fn row_of_four_is_kept() {
        let mut board = nine_by_nine(&["RRRR.RRRR"]);
        let before = board.clone();

        assert_eq!(clear_runs(&mut board, RUN), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn run_ending_at_edge_is_cleared() {
        let mut board = nine_by_nine(&["...BBBBBB"]);

        assert_eq!(clear_runs(&mut board, RUN), 6);
        assert_eq!(board.count(Color::Blue), 0);
    }

    #[test]
    fn interrupted_run_is_kept() {
        let mut board = nine_by_nine(&["RRGRRR..."]);

        assert_eq!(clear_runs(&mut board, RUN), 0);
    }

    #[test]
    fn column_is_cleared() {
        let mut board = nine_by_nine(&[
            "........Y",
            "........Y",
            "........Y",
            "........Y",
            "........Y",
        ]);

        assert_eq!(clear_runs(&mut board, RUN), 5);
    }

    #[test]
    fn down_right_diagonal_from_corner_is_cleared() {
        let mut board = nine_by_nine(&["G........", ".G.......", "..G......", "...G.....", "....G...."]);

        assert_eq!(clear_runs(&mut board, RUN), 5);
        assert_eq!(board.count(Color::Green), 0);
    }

    #[test]
    fn down_left_diagonal_from_side_is_cleared() {
        let mut board = nine_by_nine(&[
            ".........",
            ".........",
            ".........",
            ".........",
            "........M",
            ".......M.",
            "......M..",
            ".....M...",
            "....M....",
        ]);

        assert_eq!(
            find_runs(&board, RUN),
            BTreeSet::from([
                Coords::new(8, 4),
                Coords::new(7, 5),
                Coords::new(6, 6),
                Coords::new(5, 7),
                Coords::new(4, 8),
            ])
        );
        assert_eq!(clear_runs(&mut board, RUN), 5);
    }

    #[test]
    fn shared_cell_scores_once() {
        // row 4 and the main diagonal meet at (4, 4)
        let mut board = nine_by_nine(&[
            "C........",
            ".C.......",
            "..C......",
            "...C.....",
            "....CCCCC",
        ]);

        assert_eq!(clear_runs(&mut board, RUN), 9);
        assert_eq!(board.count(Color::Cyan), 0);
    }

    #[test]
    fn overlays_never_form_runs() {
        let board = nine_by_nine(&["~~~~~~...", "*****...."]);

        assert!(find_runs(&board, RUN).is_empty());
    }

    #[test]
    fn second_pass_finds_nothing() {
        let mut board = nine_by_nine(&["LLLLL...."]);

        assert_eq!(clear_runs(&mut board, RUN), 5);
        assert_eq!(clear_runs(&mut board, RUN), 0);
    }
}
