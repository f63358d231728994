use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Color grid indexed by `[x, y]`.
///
/// Cloning a board is how snapshots are taken: previews and searches work on a copy and never touch the board owned by
/// the [`Game`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<Color>", into = "Array2<Color>")]
pub struct Board {
    cells: Array2<Color>,
}

impl Board {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_cells(cells: Array2<Color>) -> Result<Self> {
        let (width, height) = cells.dim();
        if width == 0 || height == 0 || width > usize::from(Coord::MAX) || height > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    /// Parses one string per row using the same glyphs as the [`Display`](fmt::Display) impl.
    ///
    /// Whitespace is ignored, every row must have the same width.
    pub fn from_ascii(rows: &[&str]) -> Result<Self> {
        let parsed: Vec<Vec<Color>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .filter(|ch| !ch.is_whitespace())
                    .map(color_from_glyph)
                    .collect::<Option<Vec<_>>>()
                    .ok_or(GameError::InvalidBoardShape)
            })
            .collect::<Result<_>>()?;

        let height = parsed.len();
        let width = parsed.first().map_or(0, Vec::len);
        if parsed.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = Array2::default([width, height]);
        for (y, row) in parsed.iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                cells[[x, y]] = color;
            }
        }
        Self::from_cells(cells)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn contains(&self, coords: Coords) -> bool {
        coords.is_within(self.size())
    }

    pub fn validate_coords(&self, coords: Coords) -> Result<Coords> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Color at `coords`, `None` when outside of the board.
    pub fn get(&self, coords: Coords) -> Option<Color> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coords, Color)> + '_ {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| {
            (0..width).map(move |x| {
                let coords = Coords::new(x, y);
                (coords, self[coords])
            })
        })
    }

    pub fn empty_cells(&self) -> Vec<Coords> {
        self.iter()
            .filter(|(_, color)| color.is_empty())
            .map(|(coords, _)| coords)
            .collect()
    }

    pub fn count(&self, color: Color) -> CellCount {
        self.cells
            .iter()
            .filter(|&&cell| cell == color)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Replaces every `from` cell with `to`, returns how many changed.
    pub fn replace_all(&mut self, from: Color, to: Color) -> CellCount {
        let mut replaced = 0;
        for cell in self.cells.iter_mut().filter(|cell| **cell == from) {
            *cell = to;
            replaced += 1;
        }
        replaced
    }
}

impl TryFrom<Array2<Color>> for Board {
    type Error = GameError;

    fn try_from(cells: Array2<Color>) -> Result<Self> {
        Self::from_cells(cells)
    }
}

impl From<Board> for Array2<Color> {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl Index<Coords> for Board {
    type Output = Color;

    fn index(&self, coords: Coords) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coords> for Board {
    fn index_mut(&mut self, coords: Coords) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

const fn glyph(color: Color) -> char {
    use Color::*;
    match color {
        Empty => '.',
        Green => 'G',
        Red => 'R',
        Blue => 'B',
        Yellow => 'Y',
        Cyan => 'C',
        Magenta => 'M',
        Lime => 'L',
        Move => '*',
        Trace => '~',
    }
}

const fn color_from_glyph(ch: char) -> Option<Color> {
    use Color::*;
    Some(match ch {
        '.' => Empty,
        'G' => Green,
        'R' => Red,
        'B' => Blue,
        'Y' => Yellow,
        'C' => Cyan,
        'M' => Magenta,
        'L' => Lime,
        '*' => Move,
        '~' => Trace,
        _ => return None,
    })
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                write!(f, "{}", glyph(self[Coords::new(x, y)]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
