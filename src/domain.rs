//! The fixed rules of the harvesting world: how much one trip carries and how
//! much movement costs.

use crate::location::{Layout, Location};
use crate::state::State;
use crate::{PlanError, Result};

/// The quantity moved by one harvest or deposit.
pub const DEFAULT_UNIT_LOAD: u32 = 100;

/// How action costs are priced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CostModel {
    /// Every action costs 1; search minimises the number of actions.
    #[default]
    Uniform,
    /// `Move` costs the Chebyshev distance between the two locations in the
    /// layout; `Harvest` and `Deposit` cost 1.
    Chebyshev(Layout),
}

impl CostModel {
    /// Cost of walking from `from` to `to`. Locations missing from a layout
    /// fall back to 1; [`Domain::validate`] rejects such states up front.
    pub fn move_cost(&self, from: Location, to: Location) -> u32 {
        match self {
            CostModel::Uniform => 1,
            CostModel::Chebyshev(layout) => layout.distance(from, to).unwrap_or(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    unit_load: u32,
    cost_model: CostModel,
}

impl Domain {
    pub fn new(unit_load: u32, cost_model: CostModel) -> Result<Self> {
        if unit_load == 0 {
            return Err(PlanError::InvalidUnitLoad);
        }
        Ok(Self {
            unit_load,
            cost_model,
        })
    }

    pub fn unit_load(&self) -> u32 {
        self.unit_load
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Checks that `state` can be searched under these rules: cargo must be
    /// exactly one unit load, and a Chebyshev layout must place the drop-off
    /// and every node.
    pub fn validate(&self, state: &State) -> Result<()> {
        if let Some(cargo) = state.cargo() {
            if cargo.amount != self.unit_load {
                return Err(PlanError::InvalidCargo {
                    amount: cargo.amount,
                    unit_load: self.unit_load,
                });
            }
        }

        if let CostModel::Chebyshev(layout) = &self.cost_model {
            let locations = std::iter::once(Location::DropOff)
                .chain(state.nodes().iter().map(|node| node.location()));
            for location in locations {
                if layout.position(location).is_none() {
                    return Err(PlanError::MissingPosition(location));
                }
            }
        }

        Ok(())
    }

    /// Cheapest single move between the drop-off and any node of `state`.
    /// Every round trip pays at least this much per leg.
    pub fn cheapest_leg(&self, state: &State) -> u32 {
        match &self.cost_model {
            CostModel::Uniform => 1,
            CostModel::Chebyshev(_) => state
                .nodes()
                .iter()
                .map(|node| self.cost_model.move_cost(Location::DropOff, node.location()))
                .min()
                .unwrap_or(0),
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            unit_load: DEFAULT_UNIT_LOAD,
            cost_model: CostModel::Uniform,
        }
    }
}
