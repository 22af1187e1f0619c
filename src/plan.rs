use crate::action::Action;
use crate::domain::Domain;
use crate::state::State;
use crate::Result;
use std::fmt;

/// An ordered sequence of actions together with its total cost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    actions: Vec<Action>,
    cost: u32,
}

impl Plan {
    pub fn new(actions: Vec<Action>, cost: u32) -> Self {
        Self { actions, cost }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Replays the plan from `initial`, returning every state visited,
    /// starting with `initial` itself.
    ///
    /// Fails with [`PlanError::PreconditionNotMet`](crate::PlanError::PreconditionNotMet)
    /// at the first action that does not apply.
    pub fn simulate(&self, initial: &State, domain: &Domain) -> Result<Vec<State>> {
        let mut trajectory = Vec::with_capacity(self.actions.len() + 1);
        trajectory.push(initial.clone());
        let mut current = initial.clone();
        for action in &self.actions {
            current = action.apply(&current, domain)?;
            trajectory.push(current.clone());
        }
        Ok(trajectory)
    }

    /// The state reached by replaying the whole plan from `initial`.
    pub fn final_state(&self, initial: &State, domain: &Domain) -> Result<State> {
        self.actions
            .iter()
            .try_fold(initial.clone(), |state, action| action.apply(&state, domain))
    }

    /// Sum of the action costs under `domain`.
    pub fn recompute_cost(&self, domain: &Domain) -> u32 {
        self.actions.iter().map(|action| action.cost(domain)).sum()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "plan of {} actions, cost {}", self.actions.len(), self.cost)?;
        for (i, action) in self.actions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, action)?;
        }
        Ok(())
    }
}
