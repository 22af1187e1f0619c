//! # State Module
//!
//! This module provides the immutable [`State`] snapshot the planner searches
//! over, together with the [`ResourceNode`] records it carries.
//!
//! ## What goes into a State?
//!
//! A state holds only what matters for planning:
//!
//! - **Worker location**: the drop-off or one of the resource nodes
//! - **Cargo**: nothing, or exactly one unit load of a single kind
//! - **Banked totals**: what has already been delivered to the drop-off
//! - **Nodes**: every resource node with the amount it has left
//!
//! States are never mutated. Actions produce new states, and two states built
//! from the same facts compare equal and hash identically, which is what the
//! search relies on to recognise states it has already reached.
//!
//! ## Node ordering
//!
//! The node table is kept sorted by [`NodeId`], so the order in which the
//! caller listed the nodes never affects equality or hashing.
//!
//! ```
//! use harvest_planner::{Location, NodeId, ResourceKind, ResourceNode, State};
//!
//! let mine = ResourceNode::new(NodeId(1), ResourceKind::Gold, 200);
//! let forest = ResourceNode::new(NodeId(2), ResourceKind::Wood, 400);
//!
//! let a = State::new(Location::DropOff, vec![mine, forest]).unwrap();
//! let b = State::new(Location::DropOff, vec![forest, mine]).unwrap();
//! assert_eq!(a, b);
//!
//! assert_eq!(a.node(NodeId(2)).map(|n| n.remaining), Some(400));
//! assert!(a.cargo().is_none());
//! ```
//!
//! ## Sharing
//!
//! The node table sits behind an [`Arc`]. Moving and depositing leave it
//! untouched, so the successor shares the parent's table; only harvesting
//! builds a new table with the one depleted node replaced.

use crate::location::Location;
use crate::resource::{Cargo, ResourceKind, Stockpile};
use crate::{PlanError, Result};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied identifier of a resource node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A gold mine or forest and how much it has left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceNode {
    pub id: NodeId,
    pub kind: ResourceKind,
    pub remaining: u32,
}

impl ResourceNode {
    pub fn new(id: NodeId, kind: ResourceKind, remaining: u32) -> Self {
        Self {
            id,
            kind,
            remaining,
        }
    }

    /// Where the worker has to stand to harvest this node.
    pub fn location(&self) -> Location {
        Location::Node(self.id)
    }

    /// Whether one more unit load can be taken from this node.
    pub fn can_yield(&self, unit_load: u32) -> bool {
        self.remaining >= unit_load
    }
}

/// Planning-relevant snapshot of the world.
///
/// `State` is a value type: it implements `Eq` and `Hash` over every field,
/// and all transitions return a new `State`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    worker: Location,
    cargo: Option<Cargo>,
    banked: Stockpile,
    nodes: Arc<[ResourceNode]>,
}

impl State {
    /// Creates a state with an empty-handed worker and nothing banked.
    ///
    /// # Errors
    ///
    /// * [`PlanError::DuplicateNode`] if two nodes share an id
    /// * [`PlanError::UnknownNode`] if the worker stands at a node that is not listed
    pub fn new(worker: Location, nodes: impl IntoIterator<Item = ResourceNode>) -> Result<Self> {
        let mut nodes: Vec<ResourceNode> = nodes.into_iter().collect();
        nodes.sort_by_key(|node| node.id);

        if let Some(pair) = nodes.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(PlanError::DuplicateNode(pair[0].id));
        }

        if let Location::Node(id) = worker {
            if nodes.binary_search_by_key(&id, |node| node.id).is_err() {
                return Err(PlanError::UnknownNode(id));
            }
        }

        Ok(Self {
            worker,
            cargo: None,
            banked: Stockpile::new(),
            nodes: nodes.into(),
        })
    }

    /// Returns a copy with the given cargo on the worker.
    pub fn with_cargo(mut self, cargo: Option<Cargo>) -> Self {
        self.cargo = cargo;
        self
    }

    /// Returns a copy with the given banked totals.
    pub fn with_banked(mut self, banked: Stockpile) -> Self {
        self.banked = banked;
        self
    }

    pub fn worker(&self) -> Location {
        self.worker
    }

    pub fn cargo(&self) -> Option<Cargo> {
        self.cargo
    }

    pub fn is_carrying(&self) -> bool {
        self.cargo.is_some()
    }

    pub fn banked(&self) -> &Stockpile {
        &self.banked
    }

    /// All resource nodes, sorted by id.
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&ResourceNode> {
        self.node_index(id).map(|idx| &self.nodes[idx])
    }

    /// Sum of what is left across every node of `kind`.
    pub fn total_remaining(&self, kind: ResourceKind) -> u64 {
        self.nodes
            .iter()
            .filter(|node| node.kind == kind)
            .map(|node| u64::from(node.remaining))
            .sum()
    }

    fn node_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.binary_search_by_key(&id, |node| node.id).ok()
    }

    pub(crate) fn moved_to(&self, to: Location) -> Self {
        Self {
            worker: to,
            cargo: self.cargo,
            banked: self.banked,
            nodes: Arc::clone(&self.nodes),
        }
    }

    /// Takes `amount` from node `id` into the worker's hands. Returns `None`
    /// if the node is unknown or holds less than `amount`.
    pub(crate) fn harvested(&self, id: NodeId, amount: u32) -> Option<Self> {
        let idx = self.node_index(id)?;
        let node = self.nodes[idx];
        let remaining = node.remaining.checked_sub(amount)?;

        let mut nodes = self.nodes.to_vec();
        nodes[idx].remaining = remaining;

        Some(Self {
            worker: self.worker,
            cargo: Some(Cargo::new(node.kind, amount)),
            banked: self.banked,
            nodes: nodes.into(),
        })
    }

    /// Empties the worker's hands into the stockpile.
    pub(crate) fn unloaded(&self) -> Self {
        let banked = match self.cargo {
            Some(cargo) => self.banked.deposited(cargo.kind, cargo.amount),
            None => self.banked,
        };
        Self {
            worker: self.worker,
            cargo: None,
            banked,
            nodes: Arc::clone(&self.nodes),
        }
    }

    #[cfg(test)]
    pub(crate) fn shares_nodes_with(&self, other: &State) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker@{}", self.worker)?;
        match self.cargo {
            Some(cargo) => write!(f, " carrying {}", cargo)?,
            None => write!(f, " empty")?,
        }
        write!(f, ", banked {}, nodes [", self.banked)?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}={}", node.id, node.kind, node.remaining)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(state: &State) -> u64 {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        hasher.finish()
    }

    fn sample() -> State {
        State::new(
            Location::DropOff,
            vec![
                ResourceNode::new(NodeId(1), ResourceKind::Gold, 200),
                ResourceNode::new(NodeId(2), ResourceKind::Wood, 300),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_state_is_empty_handed() {
        let state = sample();
        assert_eq!(state.worker(), Location::DropOff);
        assert!(!state.is_carrying());
        assert_eq!(state.banked(), &Stockpile::new());
        assert_eq!(state.nodes().len(), 2);
    }

    #[test]
    fn test_equal_states_hash_identically_regardless_of_node_order() {
        let a = sample();
        let b = State::new(
            Location::DropOff,
            vec![
                ResourceNode::new(NodeId(2), ResourceKind::Wood, 300),
                ResourceNode::new(NodeId(1), ResourceKind::Gold, 200),
            ],
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_states_differ_on_every_field() {
        let base = sample();
        assert_ne!(base, base.moved_to(Location::Node(NodeId(1))));
        assert_ne!(
            base,
            base.clone()
                .with_cargo(Some(Cargo::new(ResourceKind::Gold, 100)))
        );
        assert_ne!(
            base,
            base.clone()
                .with_banked(Stockpile::new().with(ResourceKind::Wood, 100))
        );
        assert_ne!(base, base.harvested(NodeId(2), 100).unwrap().unloaded());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let result = State::new(
            Location::DropOff,
            vec![
                ResourceNode::new(NodeId(1), ResourceKind::Gold, 200),
                ResourceNode::new(NodeId(1), ResourceKind::Wood, 200),
            ],
        );
        assert!(matches!(result, Err(PlanError::DuplicateNode(NodeId(1)))));
    }

    #[test]
    fn test_worker_at_unknown_node_rejected() {
        let result = State::new(Location::Node(NodeId(9)), Vec::new());
        assert!(matches!(result, Err(PlanError::UnknownNode(NodeId(9)))));
    }

    #[test]
    fn test_harvested_depletes_one_node() {
        let state = sample().moved_to(Location::Node(NodeId(1)));
        let next = state.harvested(NodeId(1), 100).unwrap();
        assert_eq!(next.cargo(), Some(Cargo::new(ResourceKind::Gold, 100)));
        assert_eq!(next.node(NodeId(1)).unwrap().remaining, 100);
        assert_eq!(next.node(NodeId(2)).unwrap().remaining, 300);
        // the parent is untouched
        assert_eq!(state.node(NodeId(1)).unwrap().remaining, 200);
    }

    #[test]
    fn test_harvested_refuses_overdraw() {
        let state = sample();
        assert!(state.harvested(NodeId(1), 300).is_none());
        assert!(state.harvested(NodeId(5), 100).is_none());
    }

    #[test]
    fn test_move_and_unload_share_the_node_table() {
        let state = sample();
        let moved = state.moved_to(Location::Node(NodeId(2)));
        assert!(moved.shares_nodes_with(&state));

        let carrying = moved.harvested(NodeId(2), 100).unwrap();
        assert!(!carrying.shares_nodes_with(&moved));

        let back = carrying.moved_to(Location::DropOff).unloaded();
        assert!(back.shares_nodes_with(&carrying));
        assert_eq!(back.banked().get(ResourceKind::Wood), 100);
        assert!(back.cargo().is_none());
    }

    #[test]
    fn test_total_remaining() {
        let state = State::new(
            Location::DropOff,
            vec![
                ResourceNode::new(NodeId(1), ResourceKind::Gold, 200),
                ResourceNode::new(NodeId(2), ResourceKind::Gold, 50),
                ResourceNode::new(NodeId(3), ResourceKind::Wood, 400),
            ],
        )
        .unwrap();
        assert_eq!(state.total_remaining(ResourceKind::Gold), 250);
        assert_eq!(state.total_remaining(ResourceKind::Wood), 400);
    }

    #[test]
    fn test_display() {
        let state = sample();
        assert_eq!(
            state.to_string(),
            "worker@drop-off empty, banked {gold=0, wood=0}, nodes [node#1:gold=200, node#2:wood=300]"
        );
    }
}
