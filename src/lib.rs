mod action;
mod domain;
mod error;
mod execution;
mod goal;
mod heuristic;
mod location;
mod plan;
mod planner;
mod resource;
mod search;
mod state;
mod successor;
mod visualizer;

pub use action::Action;
pub use domain::{CostModel, Domain, DEFAULT_UNIT_LOAD};
pub use error::{PlanError, Result};
pub use execution::{ExecutionStatus, Feedback, PlanExecutor};
pub use goal::Goal;
pub use heuristic::{HeuristicStrategy, TravelHeuristic, TripHeuristic, ZeroHeuristic};
pub use location::{Layout, Location, Position};
pub use plan::Plan;
pub use planner::{Planner, PlannerConfig};
pub use resource::{Cargo, ResourceKind, Stockpile};
pub use search::{AStarSearch, DijkstraSearch, SearchAlgorithm, SearchLimits, SearchOutcome, SearchStats};
pub use state::{NodeId, ResourceNode, State};
pub use successor::{successors, Successor};
pub use visualizer::PlanVisualizer;
