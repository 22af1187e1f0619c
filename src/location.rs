//! Symbolic worker locations and the optional grid layout behind them.
//!
//! Planning happens over symbolic sites only: the drop-off point and the
//! resource nodes. Keeping the site set closed is what keeps the state space
//! finite. When movement should cost real distance, a [`Layout`] pins every
//! site to a grid [`Position`] and moves are priced by Chebyshev distance.

use crate::state::NodeId;
use std::collections::HashMap;
use std::fmt;

/// A place the worker can stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {
    /// Where cargo is deposited (the town hall).
    DropOff,
    /// The site of a resource node.
    Node(NodeId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::DropOff => write!(f, "drop-off"),
            Location::Node(id) => write!(f, "{}", id),
        }
    }
}

/// A tile on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Number of king moves between two tiles: `max(|dx|, |dy|)`.
    pub fn chebyshev(&self, other: &Position) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fixed mapping from symbolic locations to map positions.
///
/// ```
/// use harvest_planner::{Layout, Location, NodeId, Position};
///
/// let layout = Layout::new()
///     .with(Location::DropOff, Position::new(8, 9))
///     .with(Location::Node(NodeId(1)), Position::new(2, 3));
///
/// assert_eq!(layout.distance(Location::DropOff, Location::Node(NodeId(1))), Some(6));
/// assert_eq!(layout.distance(Location::DropOff, Location::Node(NodeId(2))), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    positions: HashMap<Location, Position>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: Location, position: Position) -> Self {
        self.insert(location, position);
        self
    }

    pub fn insert(&mut self, location: Location, position: Position) {
        self.positions.insert(location, position);
    }

    pub fn position(&self, location: Location) -> Option<Position> {
        self.positions.get(&location).copied()
    }

    /// Chebyshev distance between two locations, if both are placed.
    pub fn distance(&self, from: Location, to: Location) -> Option<u32> {
        let a = self.position(from)?;
        let b = self.position(to)?;
        Some(a.chebyshev(&b))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
