//! Tile prototypes and their rotated variants
//!
//! A prototype carries a socket and an antisocket per side. Rotations produce
//! independent prototypes whose ids carry a quarter-turn suffix; presentation
//! code recovers the orientation with [`Rotation::from_tile_id`].

use crate::io::configuration::{DEFAULT_WEIGHT, ROTATION_SEPARATOR};
use crate::spatial::direction::Direction;
use crate::tiles::socket::Socket;
use serde::{Deserialize, Serialize};

/// One value per side of a tile
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Sides<T> {
    /// `-x` side
    pub left: T,
    /// `+x` side
    pub right: T,
    /// `+y` side
    pub top: T,
    /// `-y` side
    pub bottom: T,
}

impl<T> Sides<T> {
    /// Build from explicit sides
    pub const fn new(left: T, right: T, top: T, bottom: T) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Value on the given side
    pub const fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Right => &self.right,
            Direction::Left => &self.left,
            Direction::Top => &self.top,
            Direction::Bottom => &self.bottom,
        }
    }
}

impl<T: Clone> Sides<T> {
    /// Same value on every side
    pub fn uniform(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value.clone(), value)
    }

    /// Quarter turn clockwise: the bottom edge comes round to the left
    #[must_use]
    pub fn turned_right(&self) -> Self {
        Self {
            left: self.bottom.clone(),
            top: self.left.clone(),
            right: self.top.clone(),
            bottom: self.right.clone(),
        }
    }

    /// Quarter turn counter-clockwise
    #[must_use]
    pub fn turned_left(&self) -> Self {
        Self {
            right: self.bottom.clone(),
            bottom: self.left.clone(),
            left: self.top.clone(),
            top: self.right.clone(),
        }
    }

    /// Half turn
    #[must_use]
    pub fn turned_around(&self) -> Self {
        Self {
            left: self.right.clone(),
            bottom: self.top.clone(),
            right: self.left.clone(),
            top: self.bottom.clone(),
        }
    }
}

impl Sides<Socket> {
    /// Parse four socket labels in `left, right, top, bottom` order
    pub fn parse(left: &str, right: &str, top: &str, bottom: &str) -> Self {
        Self::new(
            Socket::parse_label(left),
            Socket::parse_label(right),
            Socket::parse_label(top),
            Socket::parse_label(bottom),
        )
    }
}

/// Orientation encoded in a tile id suffix
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Base orientation, no suffix
    #[default]
    None,
    /// `_1`
    Right,
    /// `_2`
    Half,
    /// `_3`
    Left,
}

impl Rotation {
    /// Clockwise quarter turns
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Right => 1,
            Self::Half => 2,
            Self::Left => 3,
        }
    }

    /// Id suffix digit, `None` for the base orientation
    pub const fn suffix(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Right => Some('1'),
            Self::Half => Some('2'),
            Self::Left => Some('3'),
        }
    }

    /// Split a tile id into its base id and orientation
    pub fn from_tile_id(id: &str) -> (&str, Self) {
        let Some((base, digit)) = id.rsplit_once(ROTATION_SEPARATOR) else {
            return (id, Self::None);
        };
        let rotation = match digit {
            "1" => Self::Right,
            "2" => Self::Half,
            "3" => Self::Left,
            _ => return (id, Self::None),
        };
        if base.is_empty() {
            (id, Self::None)
        } else {
            (base, rotation)
        }
    }
}

/// A tile type with sockets, antisockets and a selection weight
#[derive(Clone, Debug, PartialEq)]
pub struct Prototype {
    /// Unique id within a registry
    pub id: String,
    /// Sockets tested for allowed adjacency
    pub sockets: Sides<Socket>,
    /// Sockets tested for forbidden adjacency; closed means unconstrained
    pub antisockets: Sides<Socket>,
    /// Relative selection weight, strictly positive
    pub weight: f64,
}

impl Prototype {
    /// Create a prototype with default weight and no antisockets
    pub fn new(id: impl Into<String>, sockets: Sides<Socket>) -> Self {
        Self {
            id: id.into(),
            sockets,
            antisockets: Sides::default(),
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Set the selection weight
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the antisockets
    #[must_use]
    pub fn with_antisockets(mut self, antisockets: Sides<Socket>) -> Self {
        self.antisockets = antisockets;
        self
    }

    fn derived(
        &self,
        rotation: Rotation,
        sockets: Sides<Socket>,
        antisockets: Sides<Socket>,
    ) -> Self {
        let id = rotation.suffix().map_or_else(
            || self.id.clone(),
            |digit| format!("{}{ROTATION_SEPARATOR}{digit}", self.id),
        );
        Self {
            id,
            sockets,
            antisockets,
            weight: self.weight,
        }
    }

    /// Quarter turn clockwise, id suffixed `_1`
    #[must_use]
    pub fn rotate_right(&self) -> Self {
        self.derived(
            Rotation::Right,
            self.sockets.turned_right(),
            self.antisockets.turned_right(),
        )
    }

    /// Half turn, id suffixed `_2`
    #[must_use]
    pub fn rotate_180(&self) -> Self {
        self.derived(
            Rotation::Half,
            self.sockets.turned_around(),
            self.antisockets.turned_around(),
        )
    }

    /// Quarter turn counter-clockwise, id suffixed `_3`
    #[must_use]
    pub fn rotate_left(&self) -> Self {
        self.derived(
            Rotation::Left,
            self.sockets.turned_left(),
            self.antisockets.turned_left(),
        )
    }

    /// The base prototype followed by its three rotations
    ///
    /// The four are independent; register all of them to use them.
    pub fn rotate_360(&self) -> [Self; 4] {
        [
            self.clone(),
            self.rotate_right(),
            self.rotate_180(),
            self.rotate_left(),
        ]
    }
}
