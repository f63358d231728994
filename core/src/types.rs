use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for cell counts.
pub type CellCount = u16;

/// Score accumulated by clearing runs, one point per cleared cell.
pub type Points = u32;

/// Two-dimensional size or position as a plain tuple `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Board position, `x` is the column and `y` the row, both 0-indexed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub x: Coord,
    pub y: Coord,
}

impl Coords {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Whether this position lies inside a board of `bounds` (width, height).
    pub const fn is_within(self, bounds: Coord2) -> bool {
        self.x < bounds.0 && self.y < bounds.1
    }

    /// Applies `delta`, returning a value only when it remains in bounds.
    pub fn step(self, delta: (isize, isize), bounds: Coord2) -> Option<Self> {
        let (dx, dy) = delta;
        let (max_x, max_y) = bounds;

        let x = self.x.checked_add_signed(dx.try_into().ok()?)?;
        if x >= max_x {
            return None;
        }

        let y = self.y.checked_add_signed(dy.try_into().ok()?)?;
        if y >= max_y {
            return None;
        }

        Some(Self { x, y })
    }

    /// Taxicab distance, the exact step count on an open 4-connected grid.
    pub const fn manhattan(self, other: Self) -> u32 {
        (self.x.abs_diff(other.x) as u32) + (self.y.abs_diff(other.y) as u32)
    }

    /// In-bounds orthogonal neighbors.
    pub fn neighbors(self, bounds: Coord2) -> NeighborIter {
        NeighborIter::new(self, bounds)
    }
}

impl From<Coord2> for Coords {
    fn from((x, y): Coord2) -> Self {
        Self { x, y }
    }
}

impl From<Coords> for Coord2 {
    fn from(coords: Coords) -> Self {
        (coords.x, coords.y)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coords {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.x.into(), self.y.into()]
    }
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Neighbor order matters: the search breaks `f` ties by insertion order.
const DISPLACEMENTS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[derive(Debug)]
pub struct NeighborIter {
    center: Coords,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coords, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coords;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = self
                .center
                .step(DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
