//! Domino tiles and tile-set generation.
//!
//! ## Identity vs orientation
//!
//! A `Tile` remembers the order its two pip values were declared in, but its
//! identity is the unordered pair. `TileId` is that canonical key (`low-high`),
//! so `Tile::new(5, 2)` and `Tile::new(2, 5)` are the same domino.
//!
//! ```
//! use domino_engine::core::{Tile, TileId};
//!
//! let tile = Tile::new(5, 2);
//! assert_eq!(tile.id(), TileId::new(2, 5));
//! assert_eq!(tile.id().to_string(), "2-5");
//! assert!(!tile.is_double());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::EngineError;

/// A pip value on one half of a tile.
pub type Pip = u8;

/// Highest pip value of the standard double-six set.
pub const DOUBLE_SIX: Pip = 6;

/// Canonical identity of a tile: the unordered pair, stored low-high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId {
    low: Pip,
    high: Pip,
}

impl TileId {
    /// Create an id from two pip values in either order.
    #[must_use]
    pub const fn new(a: Pip, b: Pip) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    #[must_use]
    pub const fn low(self) -> Pip {
        self.low
    }

    #[must_use]
    pub const fn high(self) -> Pip {
        self.high
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl FromStr for TileId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidTileKey(s.to_string());
        let (a, b) = s.trim().split_once('-').ok_or_else(invalid)?;
        let a: Pip = a.trim().parse().map_err(|_| invalid())?;
        let b: Pip = b.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(a, b))
    }
}

/// A domino. Immutable value; `left`/`right` are the declared order only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    left: Pip,
    right: Pip,
}

impl Tile {
    /// Create a tile keeping the declared order of its values.
    #[must_use]
    pub const fn new(left: Pip, right: Pip) -> Self {
        Self { left, right }
    }

    /// Create a tile, rejecting pip values above `max_pip`.
    pub fn checked(left: Pip, right: Pip, max_pip: Pip) -> Result<Self, EngineError> {
        if left > max_pip || right > max_pip {
            return Err(EngineError::InvalidTile { left, right, max: max_pip });
        }
        Ok(Self::new(left, right))
    }

    #[must_use]
    pub const fn id(self) -> TileId {
        TileId::new(self.left, self.right)
    }

    /// Declared left value.
    #[must_use]
    pub const fn left(self) -> Pip {
        self.left
    }

    /// Declared right value.
    #[must_use]
    pub const fn right(self) -> Pip {
        self.right
    }

    #[must_use]
    pub const fn is_double(self) -> bool {
        self.left == self.right
    }

    /// Total pips on the tile.
    #[must_use]
    pub const fn pip_sum(self) -> u32 {
        self.left as u32 + self.right as u32
    }

    /// Whether either half shows `value`.
    #[must_use]
    pub const fn has(self, value: Pip) -> bool {
        self.left == value || self.right == value
    }

    /// The value on the opposite half from `value`, if the tile shows it.
    #[must_use]
    pub const fn other(self, value: Pip) -> Option<Pip> {
        if self.left == value {
            Some(self.right)
        } else if self.right == value {
            Some(self.left)
        } else {
            None
        }
    }

    /// The same tile with its declared halves swapped.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self { left: self.right, right: self.left }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}|{}]", self.left, self.right)
    }
}

impl From<TileId> for Tile {
    fn from(id: TileId) -> Self {
        Self::new(id.low, id.high)
    }
}

/// Generate every tile `(a, b)` with `a <= b <= max_pip`, in ascending order.
///
/// No randomness: the same `max_pip` always yields the same sequence.
#[must_use]
pub fn generate_tile_set_with(max_pip: Pip) -> Vec<Tile> {
    let n = max_pip as usize + 1;
    let mut tiles = Vec::with_capacity(n * (n + 1) / 2);
    for a in 0..=max_pip {
        for b in a..=max_pip {
            tiles.push(Tile::new(a, b));
        }
    }
    tiles
}

/// The 28 tiles of the standard double-six set.
///
/// ```
/// let set = domino_engine::core::generate_tile_set();
/// assert_eq!(set.len(), 28);
/// ```
#[must_use]
pub fn generate_tile_set() -> Vec<Tile> {
    generate_tile_set_with(DOUBLE_SIX)
}
