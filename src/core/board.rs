//! The chain of placed tiles and its two open ends.
//!
//! ## Orientation rule
//!
//! A tile joining the chain is turned so that the value matching the open end
//! touches the chain, and its other value becomes the new open end:
//!
//! ```
//! use domino_engine::core::{Board, Side, Tile};
//!
//! let board = Board::new().place(Tile::new(5, 5), Side::Left).unwrap();
//! let board = board.place(Tile::new(2, 5), Side::Right).unwrap();
//!
//! let ends = board.ends().unwrap();
//! assert_eq!((ends.left, ends.right), (5, 2));
//! assert!(board.rightmost().unwrap().is_flipped());
//! ```
//!
//! Board ends are never stored next to the chain: `ends()` always reads them
//! off the outermost placed tiles.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::EngineError;
use super::tile::{Pip, Tile, TileId};

/// One of the two open ends of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            _ => Err(EngineError::InvalidSide(s.to_string())),
        }
    }
}

/// How a placed tile is drawn. Rendering only; the rules never read it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Laid along the line of play.
    Straight,
    /// Laid across the line of play (doubles).
    Turned,
}

/// A tile on the board with the values it shows towards each end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    tile: Tile,
    left: Pip,
    right: Pip,
    orientation: Orientation,
}

impl PlacedTile {
    /// Orient `tile` for insertion on `side` against an open end value.
    ///
    /// With no open end (empty board) the declared order is kept. Returns
    /// `None` if the tile does not show `open`.
    #[must_use]
    pub fn orient(tile: Tile, side: Side, open: Option<Pip>) -> Option<Self> {
        let (left, right) = match (open, side) {
            (None, _) => (tile.left(), tile.right()),
            // Appended on the right: the matching value faces left, into the chain.
            (Some(end), Side::Right) => (end, tile.other(end)?),
            // Prepended on the left: the matching value faces right.
            (Some(end), Side::Left) => (tile.other(end)?, end),
        };
        let orientation = if tile.is_double() { Orientation::Turned } else { Orientation::Straight };
        Some(Self { tile, left, right, orientation })
    }

    #[must_use]
    pub fn tile(&self) -> Tile {
        self.tile
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.tile.id()
    }

    /// Value facing the left end of the chain.
    #[must_use]
    pub fn left(&self) -> Pip {
        self.left
    }

    /// Value facing the right end of the chain.
    #[must_use]
    pub fn right(&self) -> Pip {
        self.right
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether the tile lies reversed relative to its declared order.
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        !self.tile.is_double() && self.left != self.tile.left()
    }
}

/// The open values a new tile must match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardEnds {
    pub left: Pip,
    pub right: Pip,
}

impl BoardEnds {
    #[must_use]
    pub fn value(&self, side: Side) -> Pip {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// `[(Left, left), (Right, right)]`.
    #[must_use]
    pub fn iter(&self) -> [(Side, Pip); 2] {
        [(Side::Left, self.left), (Side::Right, self.right)]
    }
}

/// The chain, left to right, in a persistent vector so clones share structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    chain: Vector<PlacedTile>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedTile> {
        self.chain.iter()
    }

    #[must_use]
    pub fn leftmost(&self) -> Option<&PlacedTile> {
        self.chain.front()
    }

    #[must_use]
    pub fn rightmost(&self) -> Option<&PlacedTile> {
        self.chain.back()
    }

    /// Open ends, derived from the outermost placed tiles.
    #[must_use]
    pub fn ends(&self) -> Option<BoardEnds> {
        let left = self.leftmost()?.left();
        let right = self.rightmost()?.right();
        Some(BoardEnds { left, right })
    }

    /// Whether a tile with this id is already on the board.
    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.chain.iter().any(|p| p.id() == id)
    }

    /// Return a new board with `tile` joined on `side`.
    ///
    /// On an empty board the side is irrelevant and any tile is accepted.
    pub fn place(&self, tile: Tile, side: Side) -> Result<Self, EngineError> {
        let open = self.ends().map(|e| e.value(side));
        let placed = PlacedTile::orient(tile, side, open)
            .ok_or(EngineError::TileDoesNotMatch { tile: tile.id(), side })?;

        let mut chain = self.chain.clone();
        match side {
            Side::Left => chain.push_front(placed),
            Side::Right => chain.push_back(placed),
        }
        Ok(Self { chain })
    }

    /// Whether every pair of neighbours shows equal touching values.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.chain
            .iter()
            .zip(self.chain.iter().skip(1))
            .all(|(a, b)| a.right() == b.left())
    }
}
