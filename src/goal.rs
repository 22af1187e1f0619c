//! Required banked totals and the goal predicate.

use crate::resource::{ResourceKind, Stockpile};
use crate::state::State;
use crate::{PlanError, Result};
use std::fmt;

/// Minimum banked amount per resource kind.
///
/// ```
/// use harvest_planner::{Goal, ResourceKind};
///
/// let goal = Goal::new(200, 400).unwrap();
/// assert_eq!(goal.required(ResourceKind::Wood), 400);
///
/// assert!(Goal::new(-1, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Goal {
    required: Stockpile,
}

impl Goal {
    /// Creates a goal from gold and wood thresholds.
    ///
    /// Thresholds arrive from outside as signed integers; anything negative or
    /// beyond `u32::MAX` is rejected with [`PlanError::InvalidGoal`].
    pub fn new(required_gold: i64, required_wood: i64) -> Result<Self> {
        Self::default()
            .with_requirement(ResourceKind::Gold, required_gold)?
            .with_requirement(ResourceKind::Wood, required_wood)
    }

    /// Returns a copy requiring `amount` of `kind`.
    pub fn with_requirement(self, kind: ResourceKind, amount: i64) -> Result<Self> {
        let amount = u32::try_from(amount).map_err(|_| PlanError::InvalidGoal { kind, amount })?;
        Ok(Self {
            required: self.required.with(kind, amount),
        })
    }

    pub fn required(&self, kind: ResourceKind) -> u32 {
        self.required.get(kind)
    }

    pub fn is_satisfied(&self, state: &State) -> bool {
        ResourceKind::ALL
            .iter()
            .all(|&kind| self.shortfall(state, kind) == 0)
    }

    /// How much of `kind` is still missing from the stockpile.
    pub fn shortfall(&self, state: &State, kind: ResourceKind) -> u32 {
        self.required(kind).saturating_sub(state.banked().get(kind))
    }

    /// Number of harvest-and-deposit round trips still needed.
    pub fn trips_required(&self, state: &State, unit_load: u32) -> u32 {
        if unit_load == 0 {
            return 0;
        }
        ResourceKind::ALL
            .iter()
            .map(|&kind| self.shortfall(state, kind).div_ceil(unit_load))
            .sum()
    }

    /// Whether the nodes still hold enough, counting what is already banked
    /// or carried, to ever reach the goal.
    pub fn is_attainable(&self, state: &State) -> bool {
        ResourceKind::ALL.iter().all(|&kind| {
            let carried = state
                .cargo()
                .filter(|cargo| cargo.kind == kind)
                .map_or(0, |cargo| u64::from(cargo.amount));
            let available = u64::from(state.banked().get(kind))
                + carried
                + state.total_remaining(kind);
            available >= u64::from(self.required(kind))
        })
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bank at least {}", self.required)
    }
}
