//! Shortest path search over the board, used both to validate moves and to preview them.

use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// A single search node: board data plus the bookkeeping of one search run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchCell {
    pub coords: Coords,
    pub color: Color,
    /// Cost from the start along the best known path.
    pub g: u32,
    /// Heuristic estimate to the goal.
    pub h: u32,
    pub parent: Option<Coords>,
    /// Ever added to the open list.
    pub visited: bool,
    /// Expanded, its `g` is final.
    pub closed: bool,
}

impl SearchCell {
    pub const fn new(coords: Coords, color: Color) -> Self {
        Self {
            coords,
            color,
            g: 0,
            h: 0,
            parent: None,
            visited: false,
            closed: false,
        }
    }

    pub const fn f(&self) -> u32 {
        self.g + self.h
    }

    pub const fn is_wall(&self) -> bool {
        self.color.is_wall()
    }
}

/// Fresh search state built from a board snapshot, consumed by [`SearchGrid::search`].
#[derive(Clone, Debug)]
pub struct SearchGrid {
    cells: Array2<SearchCell>,
}

impl SearchGrid {
    pub fn from_board(board: &Board) -> Self {
        let (width, height) = board.size();
        let cells = Array2::from_shape_fn((width as usize, height as usize), |(x, y)| {
            let coords = Coords::new(x as Coord, y as Coord);
            SearchCell::new(coords, board[coords])
        });
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.cells.dim();
        (width as Coord, height as Coord)
    }

    pub fn contains(&self, coords: Coords) -> bool {
        coords.is_within(self.size())
    }

    /// Out of bounds counts as a wall.
    pub fn is_wall(&self, coords: Coords) -> bool {
        self.cells
            .get(coords.to_nd_index())
            .is_none_or(SearchCell::is_wall)
    }

    /// A* from `start` to `goal` with a Manhattan heuristic.
    ///
    /// Returns the steps after `start` up to and including `goal`. The result is empty when either end is out of
    /// bounds, when no path exists, and when `start == goal`. The start cell itself is never checked for walls, so the
    /// ball being moved does not block its own path, but an occupied goal is unreachable.
    pub fn search(mut self, start: Coords, goal: Coords) -> Vec<Coords> {
        if !self.contains(start) || !self.contains(goal) {
            return Vec::new();
        }
        let bounds = self.size();

        {
            let start_cell = &mut self[start];
            start_cell.g = 0;
            start_cell.h = start.manhattan(goal);
        }

        let mut open = Vec::from([start]);
        let mut expanded = 0usize;

        while !open.is_empty() {
            // stable scan, first minimum wins
            let mut current_index = 0;
            for (i, &coords) in open.iter().enumerate() {
                if self[coords].f() < self[open[current_index]].f() {
                    current_index = i;
                }
            }

            let current = open[current_index];
            if current == goal {
                log::trace!("path {start} -> {goal} found after expanding {expanded} cells");
                return self.reconstruct(current);
            }

            open.remove(current_index);
            self[current].closed = true;
            expanded += 1;

            let current_g = self[current].g;
            for neighbor in current.neighbors(bounds) {
                let cell = &mut self[neighbor];
                if cell.closed || cell.is_wall() {
                    continue;
                }

                let tentative_g = current_g + 1;
                let improves = if !cell.visited {
                    cell.visited = true;
                    cell.h = neighbor.manhattan(goal);
                    open.push(neighbor);
                    true
                } else {
                    tentative_g < cell.g
                };

                if improves {
                    cell.parent = Some(current);
                    cell.g = tentative_g;
                }
            }
        }

        log::trace!("no path {start} -> {goal} after expanding {expanded} cells");
        Vec::new()
    }

    fn reconstruct(&self, end: Coords) -> Vec<Coords> {
        let mut path = Vec::new();
        let mut current = end;
        while let Some(parent) = self[current].parent {
            path.push(current);
            current = parent;
        }
        path.reverse();
        path
    }
}

impl core::ops::Index<Coords> for SearchGrid {
    type Output = SearchCell;

    fn index(&self, coords: Coords) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl core::ops::IndexMut<Coords> for SearchGrid {
    fn index_mut(&mut self, coords: Coords) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

/// Searches a snapshot of `board`, see [`SearchGrid::search`].
pub fn find_path(board: &Board, start: Coords, goal: Coords) -> Vec<Coords> {
    SearchGrid::from_board(board).search(start, goal)
}
