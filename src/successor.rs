//! Successor generation: the STRIPS rules of the harvesting domain.
//!
//! A loaded worker may only head home and deposit. An empty-handed worker may
//! walk to, or harvest from, any node that still holds a full unit load.
//! Depleted nodes never appear again, which keeps the reachable state space
//! finite.

use crate::action::Action;
use crate::domain::Domain;
use crate::location::Location;
use crate::state::State;

/// An applicable action and the state it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor {
    pub action: Action,
    pub state: State,
}

/// Enumerates every legal `(action, next state)` pair from `state`.
///
/// The result depends only on `state` and `domain`, and candidates come out
/// in node-id order, so search over it is reproducible.
pub fn successors(state: &State, domain: &Domain) -> Vec<Successor> {
    candidate_actions(state, domain)
        .into_iter()
        .filter_map(|action| {
            action
                .apply(state, domain)
                .ok()
                .map(|next| Successor { action, state: next })
        })
        .collect()
}

fn candidate_actions(state: &State, domain: &Domain) -> Vec<Action> {
    let here = state.worker();

    if let Some(cargo) = state.cargo() {
        let action = if here == Location::DropOff {
            Action::deposit(cargo.kind)
        } else {
            Action::move_to(here, Location::DropOff)
        };
        return vec![action];
    }

    state
        .nodes()
        .iter()
        .filter(|node| node.can_yield(domain.unit_load()))
        .map(|node| {
            if here == node.location() {
                Action::harvest(node.id)
            } else {
                Action::move_to(here, node.location())
            }
        })
        .collect()
}
