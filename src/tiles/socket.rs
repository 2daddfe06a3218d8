//! Socket kinds and the pairwise matching rule
//!
//! Tileset files write sockets as short labels. Two labels fit when they are
//! equal and end in [`SYMMETRIC_MARKER`], or when one is the other followed by
//! one [`FLIPPED_MARKER`]. Empty labels are closed.
//!
//! Parsing strips every trailing flip marker, so a label becomes a root plus a
//! flip count. Labels with the same root fit when their counts differ by one.

use crate::io::configuration::{FLIPPED_MARKER, SYMMETRIC_MARKER};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt::{self, Write};
use std::str::FromStr;

/// Connection type on one side of a tile
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Socket {
    /// Matches nothing
    #[default]
    Closed,
    /// Matches the same symmetric label, and its once-flipped form
    Symmetric(String),
    /// Matches the same root flipped one time more or one time less
    Directional {
        /// Label with every trailing flip marker removed
        label: String,
        /// Number of trailing flip markers
        flips: usize,
    },
}

impl Socket {
    /// Symmetric socket shorthand
    pub fn symmetric(label: impl Into<String>) -> Self {
        Self::Symmetric(label.into())
    }

    /// Unflipped directional socket shorthand
    pub fn directional(label: impl Into<String>) -> Self {
        Self::Directional {
            label: label.into(),
            flips: 0,
        }
    }

    /// Once-flipped directional socket shorthand
    pub fn flipped(label: impl Into<String>) -> Self {
        Self::Directional {
            label: label.into(),
            flips: 1,
        }
    }

    /// Whether a tile showing `self` may touch a tile showing `other` on the facing side
    pub fn matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Symmetric(a), Self::Symmetric(b)) => a == b,
            (
                Self::Directional {
                    label: a,
                    flips: fa,
                },
                Self::Directional {
                    label: b,
                    flips: fb,
                },
            ) => a == b && fa.abs_diff(*fb) == 1,
            (Self::Symmetric(stem), Self::Directional { label, flips })
            | (Self::Directional { label, flips }, Self::Symmetric(stem)) => {
                *flips == 1 && label.strip_suffix(SYMMETRIC_MARKER) == Some(stem.as_str())
            }
            _ => false,
        }
    }

    /// Test for the closed socket
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Parse the label convention; never fails
    pub fn parse_label(label: &str) -> Self {
        if label.is_empty() {
            return Self::Closed;
        }
        let root = label.trim_end_matches(FLIPPED_MARKER);
        let flips = label.len() - root.len();
        match root.strip_suffix(SYMMETRIC_MARKER) {
            Some(stem) if flips == 0 => Self::Symmetric(stem.to_string()),
            _ => Self::Directional {
                label: root.to_string(),
                flips,
            },
        }
    }
}

impl FromStr for Socket {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_label(s))
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => Ok(()),
            Self::Symmetric(label) => write!(f, "{label}{SYMMETRIC_MARKER}"),
            Self::Directional { label, flips } => {
                f.write_str(label)?;
                (0..*flips).try_for_each(|_| f.write_char(FLIPPED_MARKER))
            }
        }
    }
}

impl Serialize for Socket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Socket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse_label(&label))
    }
}
