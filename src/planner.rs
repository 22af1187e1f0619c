//! # Planner Module
//!
//! The planner is the entry point of the crate. It is responsible for:
//! - Checking that the requested world and goal make sense
//! - Running a search algorithm over the harvesting domain
//! - Reporting a plan, or why there is none
//!
//! ## Overview
//!
//! 1. An observation collaborator builds the initial [`State`] and [`Goal`]
//! 2. The planner validates both against its [`Domain`]
//! 3. A [`SearchAlgorithm`] (A* by default) finds a minimal-cost plan
//! 4. An execution collaborator walks the plan one action at a time
//!
//! ## Basic Usage
//!
//! ```
//! use harvest_planner::{Goal, Location, NodeId, Planner, PlannerConfig, ResourceKind, ResourceNode, State};
//!
//! let mine = ResourceNode::new(NodeId(1), ResourceKind::Gold, 200);
//! let forest = ResourceNode::new(NodeId(2), ResourceKind::Wood, 200);
//! let initial = State::new(Location::DropOff, vec![mine, forest]).unwrap();
//! let goal = Goal::new(200, 200).unwrap();
//!
//! let planner = Planner::new(PlannerConfig::default()).unwrap();
//! let outcome = planner.plan(&initial, &goal).unwrap();
//!
//! let plan = outcome.into_plan().unwrap();
//! assert_eq!(plan.len(), 16);
//! for action in &plan {
//!     println!("Action: {}", action);
//! }
//! ```
//!
//! ## Unreachable goals
//!
//! Asking for more than the map holds is not an error. The search simply runs
//! out of states and the outcome says so:
//!
//! ```
//! use harvest_planner::{Goal, Location, NodeId, Planner, PlannerConfig, ResourceKind, ResourceNode, SearchOutcome, State};
//!
//! let mine = ResourceNode::new(NodeId(1), ResourceKind::Gold, 200);
//! let initial = State::new(Location::DropOff, vec![mine]).unwrap();
//! let goal = Goal::new(500, 0).unwrap();
//!
//! let planner = Planner::new(PlannerConfig::default()).unwrap();
//! let outcome = planner.plan(&initial, &goal).unwrap();
//! assert!(matches!(outcome, SearchOutcome::Exhausted { .. }));
//! ```

use crate::domain::{CostModel, Domain, DEFAULT_UNIT_LOAD};
use crate::goal::Goal;
use crate::search::{AStarSearch, SearchAlgorithm, SearchLimits, SearchOutcome};
use crate::state::State;
use crate::Result;

/// Settings for a [`Planner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Quantity moved by one harvest or deposit.
    pub unit_load: u32,
    pub cost_model: CostModel,
    /// Abandon a search after this many node expansions.
    pub max_expansions: Option<usize>,
}

impl PlannerConfig {
    pub fn with_unit_load(mut self, unit_load: u32) -> Self {
        self.unit_load = unit_load;
        self
    }

    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            unit_load: DEFAULT_UNIT_LOAD,
            cost_model: CostModel::Uniform,
            max_expansions: None,
        }
    }
}

pub struct Planner {
    domain: Domain,
    limits: SearchLimits,
    search_algorithm: Box<dyn SearchAlgorithm>,
}

impl Planner {
    /// Creates a planner using A* with the default heuristic.
    ///
    /// Fails with [`PlanError::InvalidUnitLoad`](crate::PlanError::InvalidUnitLoad)
    /// for a zero unit load.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        Self::with_search_algorithm(config, Box::new(AStarSearch::default()))
    }

    pub fn with_search_algorithm(
        config: PlannerConfig,
        search_algorithm: Box<dyn SearchAlgorithm>,
    ) -> Result<Self> {
        let domain = Domain::new(config.unit_load, config.cost_model)?;
        let limits = SearchLimits {
            max_expansions: config.max_expansions,
        };
        Ok(Self {
            domain,
            limits,
            search_algorithm,
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Searches for a minimal-cost plan from `initial` to `goal`.
    ///
    /// Returns `Err` only when the input is malformed (see
    /// [`Domain::validate`]). A goal that cannot be reached comes back as
    /// `Ok(SearchOutcome::Exhausted)`.
    pub fn plan(&self, initial: &State, goal: &Goal) -> Result<SearchOutcome> {
        self.domain.validate(initial)?;

        if !goal.is_attainable(initial) {
            log::info!("{} exceeds what the map holds; search will exhaust", goal);
        }

        let outcome = self
            .search_algorithm
            .search(initial, goal, &self.domain, &self.limits);

        match &outcome {
            SearchOutcome::Found { plan, stats } => {
                log::info!(
                    "{} produced a plan with {} actions (cost {}) after {} expansions",
                    self.search_algorithm.name(),
                    plan.len(),
                    plan.cost(),
                    stats.expanded
                );
                for (i, action) in plan.iter().enumerate() {
                    log::debug!("  Step {}: {}", i + 1, action);
                }
            }
            SearchOutcome::Exhausted { stats } => {
                log::warn!("No plan found after {} expansions", stats.expanded);
            }
            SearchOutcome::LimitReached { stats } => {
                log::warn!(
                    "Planning abandoned at the limit of {} expansions",
                    stats.expanded
                );
            }
        }

        Ok(outcome)
    }
}
