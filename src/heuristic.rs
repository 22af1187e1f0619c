//! Remaining-cost estimates used to steer the search.
//!
//! Every strategy here is admissible: it never exceeds the true cost of the
//! cheapest completion, which A* needs to return an optimal plan.

use crate::domain::Domain;
use crate::goal::Goal;
use crate::location::Location;
use crate::state::State;

/// A trait for heuristic functions used in search algorithms.
pub trait HeuristicStrategy: Send + Sync {
    /// Lower bound on the cost still needed to reach `goal` from `state`.
    fn calculate(&self, state: &State, goal: &Goal, domain: &Domain) -> u32;

    fn name(&self) -> &'static str;
}

/// Counts the harvests and deposits still owed.
///
/// Each missing unit load needs one `Harvest` and one `Deposit`. A worker
/// already carrying a load has paid for one harvest. Movement is ignored.
pub struct TripHeuristic;

impl HeuristicStrategy for TripHeuristic {
    fn calculate(&self, state: &State, goal: &Goal, domain: &Domain) -> u32 {
        let trips = goal.trips_required(state, domain.unit_load());
        let carrying = u32::from(state.is_carrying());
        trips.saturating_mul(2).saturating_sub(carrying)
    }

    fn name(&self) -> &'static str {
        "trips"
    }
}

/// [`TripHeuristic`] plus the walking every remaining trip must do.
///
/// A round trip is one leg out from the drop-off and one leg back. Legs the
/// worker is already part-way through are not counted again, and each leg is
/// priced at the cheapest drop-off to node move in the domain.
pub struct TravelHeuristic;

impl TravelHeuristic {
    fn legs(state: &State, trips: u32) -> u32 {
        let full = trips.saturating_mul(2);
        let done = match (state.is_carrying(), state.worker()) {
            (false, Location::DropOff) => 0,
            (false, Location::Node(_)) => 1,
            (true, Location::Node(_)) => 1,
            (true, Location::DropOff) => 2,
        };
        full.saturating_sub(done)
    }
}

impl HeuristicStrategy for TravelHeuristic {
    fn calculate(&self, state: &State, goal: &Goal, domain: &Domain) -> u32 {
        let trips = goal.trips_required(state, domain.unit_load());
        if trips == 0 {
            return 0;
        }
        let work = TripHeuristic.calculate(state, goal, domain);
        let walking = Self::legs(state, trips).saturating_mul(domain.cheapest_leg(state));
        work.saturating_add(walking)
    }

    fn name(&self) -> &'static str {
        "travel"
    }
}

/// Zero heuristic for algorithms like Dijkstra that don't use heuristics.
pub struct ZeroHeuristic;

impl HeuristicStrategy for ZeroHeuristic {
    fn calculate(&self, _state: &State, _goal: &Goal, _domain: &Domain) -> u32 {
        0
    }

    fn name(&self) -> &'static str {
        "zero"
    }
}
