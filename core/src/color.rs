use serde::{Deserialize, Serialize};

/// Value held by a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Empty,
    Green,
    Red,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    Lime,
    /// Preview highlight, only ever present on preview snapshots.
    Move,
    /// Marks the path a ball just travelled, cleared before the move settles.
    Trace,
}

/// Colors a ball can have, in palette order.
pub const BALL_COLORS: [Color; 7] = [
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
    Color::Lime,
];

impl Color {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_ball(self) -> bool {
        use Color::*;
        match self {
            Green | Red | Blue | Yellow | Cyan | Magenta | Lime => true,
            Empty | Move | Trace => false,
        }
    }

    pub const fn is_overlay(self) -> bool {
        matches!(self, Self::Move | Self::Trace)
    }

    /// Anything that is not empty blocks the path finder.
    pub const fn is_wall(self) -> bool {
        !self.is_empty()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::Empty
    }
}
