//! # Action Module
//!
//! This module provides the three STRIPS actions the worker can take.
//!
//! ## What is a STRIPS action?
//!
//! A STRIPS action is fully described by a precondition over the current
//! state and a deterministic effect that produces the next state. The planner
//! never mutates a state: applying an action always yields a fresh one.
//!
//! | Action | Preconditions | Effect |
//! |---|---|---|
//! | `Move { from, to }` | worker at `from`, `from != to` | worker at `to` |
//! | `Harvest { node }` | empty-handed, at the node, node holds a unit load | carry one load, node depleted by one load |
//! | `Deposit { kind }` | carrying one load of `kind`, at the drop-off | load banked, hands empty |
//!
//! ## Basic Usage
//!
//! ```
//! use harvest_planner::{Action, Domain, Location, NodeId, ResourceKind, ResourceNode, State};
//!
//! let domain = Domain::default();
//! let mine = NodeId(1);
//! let state = State::new(
//!     Location::DropOff,
//!     vec![ResourceNode::new(mine, ResourceKind::Gold, 200)],
//! )
//! .unwrap();
//!
//! // Harvesting from the drop-off is not allowed
//! let harvest = Action::harvest(mine);
//! assert!(!harvest.are_preconditions_met(&state, &domain));
//!
//! // Walk over first, then harvest
//! let walk = Action::move_to(Location::DropOff, Location::Node(mine));
//! let at_mine = walk.apply(&state, &domain).unwrap();
//! let loaded = harvest.apply(&at_mine, &domain).unwrap();
//!
//! assert_eq!(loaded.cargo().map(|c| c.kind), Some(ResourceKind::Gold));
//! assert_eq!(loaded.node(mine).map(|n| n.remaining), Some(100));
//! ```
//!
//! ## Costs
//!
//! Costs depend only on the action's own parameters and the domain's
//! [`CostModel`](crate::CostModel), never on the state it is applied to. That is
//! why `Move` carries its origin: under the Chebyshev model the distance is
//! part of the action.

use crate::domain::Domain;
use crate::location::Location;
use crate::resource::{Cargo, ResourceKind};
use crate::state::{NodeId, State};
use crate::{PlanError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move { from: Location, to: Location },
    Harvest { node: NodeId },
    Deposit { kind: ResourceKind },
}

impl Action {
    pub fn move_to(from: Location, to: Location) -> Self {
        Action::Move { from, to }
    }

    pub fn harvest(node: NodeId) -> Self {
        Action::Harvest { node }
    }

    pub fn deposit(kind: ResourceKind) -> Self {
        Action::Deposit { kind }
    }

    pub fn are_preconditions_met(&self, state: &State, domain: &Domain) -> bool {
        self.check_preconditions(state, domain).is_ok()
    }

    /// Applies the action's effect, returning the resulting state.
    ///
    /// # Errors
    ///
    /// [`PlanError::PreconditionNotMet`] when called on a state the action is
    /// not applicable to. Successor generation never produces such pairs, so
    /// this only fires on hand-built actions.
    pub fn apply(&self, state: &State, domain: &Domain) -> Result<State> {
        self.check_preconditions(state, domain)
            .map_err(|reason| PlanError::PreconditionNotMet(format!("{}: {}", self, reason)))?;

        match *self {
            Action::Move { to, .. } => Ok(state.moved_to(to)),
            Action::Harvest { node } => state
                .harvested(node, domain.unit_load())
                .ok_or_else(|| PlanError::PreconditionNotMet(format!("{}: node is depleted", self))),
            Action::Deposit { .. } => Ok(state.unloaded()),
        }
    }

    pub fn cost(&self, domain: &Domain) -> u32 {
        match *self {
            Action::Move { from, to } => domain.cost_model().move_cost(from, to),
            Action::Harvest { .. } | Action::Deposit { .. } => 1,
        }
    }

    fn check_preconditions(&self, state: &State, domain: &Domain) -> std::result::Result<(), String> {
        match *self {
            Action::Move { from, to } => {
                if state.worker() != from {
                    return Err(format!("worker is at {}", state.worker()));
                }
                if from == to {
                    return Err("already at the destination".to_string());
                }
                if let Location::Node(id) = to {
                    if state.node(id).is_none() {
                        return Err(format!("{} does not exist", id));
                    }
                }
                Ok(())
            }
            Action::Harvest { node } => {
                if let Some(cargo) = state.cargo() {
                    return Err(format!("worker already carries {}", cargo));
                }
                let target = state
                    .node(node)
                    .ok_or_else(|| format!("{} does not exist", node))?;
                if state.worker() != target.location() {
                    return Err(format!("worker is at {}", state.worker()));
                }
                if !target.can_yield(domain.unit_load()) {
                    return Err(format!("only {} left", target.remaining));
                }
                Ok(())
            }
            Action::Deposit { kind } => {
                let expected = Cargo::new(kind, domain.unit_load());
                match state.cargo() {
                    Some(cargo) if cargo == expected => {}
                    Some(cargo) => return Err(format!("worker carries {}", cargo)),
                    None => return Err("worker carries nothing".to_string()),
                }
                if state.worker() != Location::DropOff {
                    return Err(format!("worker is at {}", state.worker()));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { from, to } => write!(f, "Move({} -> {})", from, to),
            Action::Harvest { node } => write!(f, "Harvest({})", node),
            Action::Deposit { kind } => write!(f, "Deposit({})", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CostModel;
    use crate::location::{Layout, Position};
    use crate::resource::Stockpile;
    use crate::state::ResourceNode;

    const MINE: NodeId = NodeId(1);
    const FOREST: NodeId = NodeId(2);

    fn start() -> State {
        State::new(
            Location::DropOff,
            vec![
                ResourceNode::new(MINE, ResourceKind::Gold, 150),
                ResourceNode::new(FOREST, ResourceKind::Wood, 100),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_move_changes_only_location() {
        let domain = Domain::default();
        let state = start();
        let next = Action::move_to(Location::DropOff, Location::Node(FOREST))
            .apply(&state, &domain)
            .unwrap();
        assert_eq!(next.worker(), Location::Node(FOREST));
        assert_eq!(next.cargo(), state.cargo());
        assert_eq!(next.banked(), state.banked());
        assert_eq!(next.nodes(), state.nodes());
    }

    #[test]
    fn test_move_to_current_location_rejected() {
        let domain = Domain::default();
        let action = Action::move_to(Location::DropOff, Location::DropOff);
        assert!(!action.are_preconditions_met(&start(), &domain));
    }

    #[test]
    fn test_move_from_elsewhere_rejected() {
        let domain = Domain::default();
        let action = Action::move_to(Location::Node(MINE), Location::Node(FOREST));
        let result = action.apply(&start(), &domain);
        assert!(matches!(result, Err(PlanError::PreconditionNotMet(_))));
    }

    #[test]
    fn test_move_to_unknown_node_rejected() {
        let domain = Domain::default();
        let action = Action::move_to(Location::DropOff, Location::Node(NodeId(42)));
        assert!(!action.are_preconditions_met(&start(), &domain));
    }

    #[test]
    fn test_harvest_requires_being_at_node() {
        let domain = Domain::default();
        let result = Action::harvest(MINE).apply(&start(), &domain);
        match result {
            Err(PlanError::PreconditionNotMet(msg)) => {
                assert_eq!(msg, "Harvest(node#1): worker is at drop-off");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_harvest_requires_empty_hands() {
        let domain = Domain::default();
        let state = start()
            .moved_to(Location::Node(MINE))
            .with_cargo(Some(Cargo::new(ResourceKind::Wood, 100)));
        assert!(!Action::harvest(MINE).are_preconditions_met(&state, &domain));
    }

    #[test]
    fn test_harvest_requires_full_unit_load() {
        let domain = Domain::default();
        let at_mine = start().moved_to(Location::Node(MINE));
        let once = Action::harvest(MINE).apply(&at_mine, &domain).unwrap();
        assert_eq!(once.node(MINE).unwrap().remaining, 50);

        let emptied = once.moved_to(Location::DropOff).unloaded().moved_to(Location::Node(MINE));
        assert!(!Action::harvest(MINE).are_preconditions_met(&emptied, &domain));
    }

    #[test]
    fn test_deposit_banks_cargo() {
        let domain = Domain::default();
        let state = start().with_cargo(Some(Cargo::new(ResourceKind::Gold, 100)));
        let next = Action::deposit(ResourceKind::Gold).apply(&state, &domain).unwrap();
        assert!(next.cargo().is_none());
        assert_eq!(next.banked(), &Stockpile::new().with(ResourceKind::Gold, 100));
    }

    #[test]
    fn test_deposit_requires_matching_kind_and_drop_off() {
        let domain = Domain::default();
        let carrying = start().with_cargo(Some(Cargo::new(ResourceKind::Gold, 100)));
        assert!(!Action::deposit(ResourceKind::Wood).are_preconditions_met(&carrying, &domain));
        assert!(!Action::deposit(ResourceKind::Gold).are_preconditions_met(&start(), &domain));

        let away = carrying.moved_to(Location::Node(MINE));
        assert!(!Action::deposit(ResourceKind::Gold).are_preconditions_met(&away, &domain));
    }

    #[test]
    fn test_uniform_costs() {
        let domain = Domain::default();
        assert_eq!(Action::move_to(Location::DropOff, Location::Node(MINE)).cost(&domain), 1);
        assert_eq!(Action::harvest(MINE).cost(&domain), 1);
        assert_eq!(Action::deposit(ResourceKind::Gold).cost(&domain), 1);
    }

    #[test]
    fn test_chebyshev_move_cost() {
        let layout = Layout::new()
            .with(Location::DropOff, Position::new(8, 9))
            .with(Location::Node(MINE), Position::new(1, 2));
        let domain = Domain::new(100, CostModel::Chebyshev(layout)).unwrap();
        assert_eq!(Action::move_to(Location::DropOff, Location::Node(MINE)).cost(&domain), 7);
        assert_eq!(Action::harvest(MINE).cost(&domain), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Action::move_to(Location::DropOff, Location::Node(MINE)).to_string(),
            "Move(drop-off -> node#1)"
        );
        assert_eq!(Action::harvest(FOREST).to_string(), "Harvest(node#2)");
        assert_eq!(Action::deposit(ResourceKind::Wood).to_string(), "Deposit(wood)");
    }
}
