//! Cardinal directions and their grid offsets
//!
//! The `+y` axis is named `Top` and `-y` is `Bottom`. Existing tile sets are
//! authored against this naming, so every offset/name conversion goes
//! through [`Direction::offset`] and [`Direction::from_offset`].

use std::fmt;

/// One of the four cardinal directions on the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// `+x`
    Right,
    /// `-x`
    Left,
    /// `+y`
    Top,
    /// `-y`
    Bottom,
}

impl Direction {
    /// All four directions in propagation order
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Top, Self::Bottom];

    /// Horizontal pair
    pub const HORIZONTAL: [Self; 2] = [Self::Right, Self::Left];

    /// Vertical pair
    pub const VERTICAL: [Self; 2] = [Self::Top, Self::Bottom];

    /// Grid offset `(dx, dy)` for this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Top => (0, 1),
            Self::Bottom => (0, -1),
        }
    }

    /// Inverse of [`Direction::offset`]
    pub const fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (1, 0) => Some(Self::Right),
            (-1, 0) => Some(Self::Left),
            (0, 1) => Some(Self::Top),
            (0, -1) => Some(Self::Bottom),
            _ => None,
        }
    }

    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Dense index used by per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Left => 1,
            Self::Top => 2,
            Self::Bottom => 3,
        }
    }

    /// Lowercase side name as used in tileset files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Neighbouring coordinates, or `None` when stepping off the grid
    pub const fn step(
        self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Option<(usize, usize)> {
        match self {
            Self::Right if x + 1 < width => Some((x + 1, y)),
            Self::Left if x > 0 => Some((x - 1, y)),
            Self::Top if y + 1 < height => Some((x, y + 1)),
            Self::Bottom if y > 0 => Some((x, y - 1)),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
