use crate::action::Action;
use crate::domain::Domain;
use crate::goal::Goal;
use crate::heuristic::{HeuristicStrategy, TravelHeuristic, ZeroHeuristic};
use crate::plan::Plan;
use crate::state::State;
use crate::successor::successors;
use crate::{PlanError, Result};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Trait defining the interface for search algorithms used by the planner.
///
/// Implementations find a minimal-cost sequence of actions that takes the
/// initial state to one satisfying the goal. Running out of states or hitting
/// a limit is reported through [`SearchOutcome`], never as an error.
///
/// # Examples
///
/// ```
/// use harvest_planner::{
///     successors, Domain, Goal, Plan, SearchAlgorithm, SearchLimits, SearchOutcome,
///     SearchStats, State,
/// };
///
/// /// Only looks one step ahead.
/// struct OneStepSearch;
///
/// impl SearchAlgorithm for OneStepSearch {
///     fn search(
///         &self,
///         initial: &State,
///         goal: &Goal,
///         domain: &Domain,
///         _limits: &SearchLimits,
///     ) -> SearchOutcome {
///         let stats = SearchStats::default();
///         for succ in successors(initial, domain) {
///             if goal.is_satisfied(&succ.state) {
///                 let cost = succ.action.cost(domain);
///                 let plan = Plan::new(vec![succ.action], cost);
///                 return SearchOutcome::Found { plan, stats };
///             }
///         }
///         SearchOutcome::Exhausted { stats }
///     }
///
///     fn name(&self) -> &'static str {
///         "one-step"
///     }
/// }
/// ```
pub trait SearchAlgorithm: Send + Sync {
    fn search(
        &self,
        initial: &State,
        goal: &Goal,
        domain: &Domain,
        limits: &SearchLimits,
    ) -> SearchOutcome;

    fn name(&self) -> &'static str;
}

/// Caps applied to a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Give up once this many nodes have been expanded.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub generated: usize,
    pub stale_skipped: usize,
    pub peak_frontier: usize,
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found { plan: Plan, stats: SearchStats },
    /// Every reachable state was explored without meeting the goal.
    Exhausted { stats: SearchStats },
    /// The expansion cap was hit first.
    LimitReached { stats: SearchStats },
}

impl SearchOutcome {
    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Found { stats, .. }
            | SearchOutcome::Exhausted { stats }
            | SearchOutcome::LimitReached { stats } => stats,
        }
    }

    pub fn plan(&self) -> Option<&Plan> {
        match self {
            SearchOutcome::Found { plan, .. } => Some(plan),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// Converts the outcome into a plan, mapping the two failure kinds onto
    /// [`PlanError::NoPlanFound`] and [`PlanError::ExpansionLimitReached`].
    pub fn into_plan(self) -> Result<Plan> {
        match self {
            SearchOutcome::Found { plan, .. } => Ok(plan),
            SearchOutcome::Exhausted { .. } => Err(PlanError::NoPlanFound),
            SearchOutcome::LimitReached { stats } => {
                Err(PlanError::ExpansionLimitReached(stats.expanded))
            }
        }
    }
}

/// Represents a node in the search tree.
#[derive(Debug, Clone)]
struct Node {
    state: State,
    /// Index of the parent node, `None` for the root
    parent: Option<usize>,
    /// Action that led here from the parent
    action: Option<Action>,
    g_cost: u32,
    h_cost: u32,
}

impl Node {
    fn f_cost(&self) -> u32 {
        self.g_cost.saturating_add(self.h_cost)
    }
}

/// Frontier key. Field order is the ordering: lower `f` first, then lower `h`
/// (closer to the goal), then the older node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    f_cost: u32,
    h_cost: u32,
    idx: usize,
}

/// Manages the state of a single search.
struct SearchContext<'a> {
    goal: &'a Goal,
    domain: &'a Domain,
    heuristic: &'a dyn HeuristicStrategy,
    /// Arena of every node created; parents are indices into it
    nodes: Vec<Node>,
    open_set: BinaryHeap<Reverse<FrontierEntry>>,
    /// Cheapest known cost to reach each state
    best_g: HashMap<State, u32>,
    stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    fn new(
        initial: &State,
        goal: &'a Goal,
        domain: &'a Domain,
        heuristic: &'a dyn HeuristicStrategy,
    ) -> Self {
        let mut context = Self {
            goal,
            domain,
            heuristic,
            nodes: Vec::new(),
            open_set: BinaryHeap::new(),
            best_g: HashMap::new(),
            stats: SearchStats::default(),
        };
        context.best_g.insert(initial.clone(), 0);
        context.push(Node {
            state: initial.clone(),
            parent: None,
            action: None,
            g_cost: 0,
            h_cost: heuristic.calculate(initial, goal, domain),
        });
        context
    }

    fn push(&mut self, node: Node) {
        let idx = self.nodes.len();
        self.open_set.push(Reverse(FrontierEntry {
            f_cost: node.f_cost(),
            h_cost: node.h_cost,
            idx,
        }));
        self.nodes.push(node);
        self.stats.peak_frontier = self.stats.peak_frontier.max(self.open_set.len());
    }

    /// Pops the best frontier entry, skipping entries superseded by a cheaper
    /// path to the same state.
    fn next_node(&mut self) -> Option<usize> {
        while let Some(Reverse(entry)) = self.open_set.pop() {
            let node = &self.nodes[entry.idx];
            let best = self.best_g.get(&node.state).copied().unwrap_or(u32::MAX);
            if node.g_cost > best {
                self.stats.stale_skipped += 1;
                continue;
            }
            return Some(entry.idx);
        }
        None
    }

    fn expand(&mut self, idx: usize) {
        self.stats.expanded += 1;
        let (state, g_cost) = {
            let node = &self.nodes[idx];
            (node.state.clone(), node.g_cost)
        };
        log::trace!("expanding g={} {}", g_cost, state);

        for succ in successors(&state, self.domain) {
            let new_g = g_cost.saturating_add(succ.action.cost(self.domain));
            if let Some(&best) = self.best_g.get(&succ.state) {
                if best <= new_g {
                    continue;
                }
            }

            let h_cost = self.heuristic.calculate(&succ.state, self.goal, self.domain);
            self.best_g.insert(succ.state.clone(), new_g);
            self.stats.generated += 1;
            self.push(Node {
                state: succ.state,
                parent: Some(idx),
                action: Some(succ.action),
                g_cost: new_g,
                h_cost,
            });
        }
    }

    /// Walks parent links from `idx` back to the root.
    fn reconstruct_path(&self, idx: usize) -> Vec<Action> {
        let mut path = Vec::new();
        let mut current = Some(idx);

        while let Some(node) = current.and_then(|i| self.nodes.get(i)) {
            if let Some(action) = node.action {
                path.push(action);
            }
            current = node.parent;
        }

        path.reverse();
        path
    }
}

/// A* search algorithm implementation.
pub struct AStarSearch {
    heuristic: Box<dyn HeuristicStrategy>,
}

impl AStarSearch {
    pub fn new(heuristic: Box<dyn HeuristicStrategy>) -> Self {
        Self { heuristic }
    }

    /// A* guided by [`TravelHeuristic`].
    pub fn with_default_heuristic() -> Self {
        Self {
            heuristic: Box::new(TravelHeuristic),
        }
    }

    pub fn heuristic_name(&self) -> &'static str {
        self.heuristic.name()
    }
}

impl Default for AStarSearch {
    fn default() -> Self {
        Self::with_default_heuristic()
    }
}

impl SearchAlgorithm for AStarSearch {
    fn search(
        &self,
        initial: &State,
        goal: &Goal,
        domain: &Domain,
        limits: &SearchLimits,
    ) -> SearchOutcome {
        log::debug!(
            "A* search ({} heuristic) from {} toward {}",
            self.heuristic.name(),
            initial,
            goal
        );
        let mut context = SearchContext::new(initial, goal, domain, self.heuristic.as_ref());

        while let Some(idx) = context.next_node() {
            if let Some(max) = limits.max_expansions {
                if context.stats.expanded >= max {
                    log::warn!("Search stopped after {} expansions", context.stats.expanded);
                    return SearchOutcome::LimitReached {
                        stats: context.stats,
                    };
                }
            }

            let node = &context.nodes[idx];
            if goal.is_satisfied(&node.state) {
                debug_assert_eq!(node.h_cost, 0, "heuristic must vanish at goal states");
                let plan = Plan::new(context.reconstruct_path(idx), node.g_cost);
                log::debug!(
                    "Found plan with {} actions (cost {}), {:?}",
                    plan.len(),
                    plan.cost(),
                    context.stats
                );
                return SearchOutcome::Found {
                    plan,
                    stats: context.stats,
                };
            }

            context.expand(idx);
        }

        log::warn!(
            "No plan reaches {}; explored {} states",
            goal,
            context.best_g.len()
        );
        SearchOutcome::Exhausted {
            stats: context.stats,
        }
    }

    fn name(&self) -> &'static str {
        "a-star"
    }
}

/// Dijkstra's algorithm implementation.
#[derive(Default)]
pub struct DijkstraSearch;

impl SearchAlgorithm for DijkstraSearch {
    fn search(
        &self,
        initial: &State,
        goal: &Goal,
        domain: &Domain,
        limits: &SearchLimits,
    ) -> SearchOutcome {
        // Dijkstra is A* with a zero heuristic
        let astar = AStarSearch::new(Box::new(ZeroHeuristic));
        astar.search(initial, goal, domain, limits)
    }

    fn name(&self) -> &'static str {
        "dijkstra"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::TripHeuristic;
    use crate::location::Location;
    use crate::resource::{Cargo, ResourceKind};
    use crate::state::{NodeId, ResourceNode};

    const MINE: NodeId = NodeId(1);
    const FOREST: NodeId = NodeId(2);

    fn start(gold: u32, wood: u32) -> State {
        State::new(
            Location::DropOff,
            vec![
                ResourceNode::new(MINE, ResourceKind::Gold, gold),
                ResourceNode::new(FOREST, ResourceKind::Wood, wood),
            ],
        )
        .unwrap()
    }

    fn run(search: &dyn SearchAlgorithm, initial: &State, goal: &Goal) -> SearchOutcome {
        search.search(initial, goal, &Domain::default(), &SearchLimits::unbounded())
    }

    #[test]
    fn test_frontier_entry_ordering() {
        let low_f = FrontierEntry { f_cost: 3, h_cost: 3, idx: 9 };
        let high_f = FrontierEntry { f_cost: 4, h_cost: 0, idx: 0 };
        assert!(low_f < high_f);

        let closer = FrontierEntry { f_cost: 4, h_cost: 1, idx: 9 };
        let farther = FrontierEntry { f_cost: 4, h_cost: 2, idx: 0 };
        assert!(closer < farther);

        let older = FrontierEntry { f_cost: 4, h_cost: 1, idx: 1 };
        assert!(older < closer);
    }

    #[test]
    fn test_astar_single_trip() {
        let goal = Goal::new(100, 0).unwrap();
        let outcome = run(&AStarSearch::default(), &start(200, 200), &goal);
        let plan = outcome.into_plan().unwrap();
        assert_eq!(
            plan.actions(),
            &[
                Action::move_to(Location::DropOff, Location::Node(MINE)),
                Action::harvest(MINE),
                Action::move_to(Location::Node(MINE), Location::DropOff),
                Action::deposit(ResourceKind::Gold),
            ]
        );
        assert_eq!(plan.cost(), 4);
    }

    #[test]
    fn test_goal_already_met_gives_empty_plan() {
        let goal = Goal::new(0, 0).unwrap();
        let outcome = run(&AStarSearch::default(), &start(200, 200), &goal);
        let plan = outcome.plan().unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.cost(), 0);
        assert_eq!(outcome.stats().expanded, 0);
    }

    #[test]
    fn test_unreachable_goal_exhausts() {
        let goal = Goal::new(500, 0).unwrap();
        let outcome = run(&AStarSearch::default(), &start(200, 200), &goal);
        assert!(matches!(outcome, SearchOutcome::Exhausted { .. }));
        assert!(outcome.stats().expanded > 0);
        assert!(matches!(outcome.into_plan(), Err(PlanError::NoPlanFound)));
    }

    #[test]
    fn test_expansion_limit() {
        let goal = Goal::new(200, 200).unwrap();
        let limits = SearchLimits::unbounded().with_max_expansions(3);
        let outcome =
            AStarSearch::default().search(&start(200, 200), &goal, &Domain::default(), &limits);
        assert!(matches!(outcome, SearchOutcome::LimitReached { .. }));
        assert_eq!(outcome.stats().expanded, 3);
        assert!(matches!(
            outcome.into_plan(),
            Err(PlanError::ExpansionLimitReached(3))
        ));
    }

    #[test]
    fn test_all_algorithms_agree_on_cost() {
        let goal = Goal::new(200, 100).unwrap();
        let initial = start(300, 300);
        let travel = run(&AStarSearch::default(), &initial, &goal);
        let trips = run(&AStarSearch::new(Box::new(TripHeuristic)), &initial, &goal);
        let dijkstra = run(&DijkstraSearch, &initial, &goal);

        let cost = |o: &SearchOutcome| o.plan().map(|p| p.cost());
        assert_eq!(cost(&travel), Some(12));
        assert_eq!(cost(&trips), Some(12));
        assert_eq!(cost(&dijkstra), Some(12));
    }

    #[test]
    fn test_better_heuristic_expands_fewer_nodes() {
        let goal = Goal::new(200, 200).unwrap();
        let initial = start(200, 200);
        let travel = run(&AStarSearch::default(), &initial, &goal);
        let dijkstra = run(&DijkstraSearch, &initial, &goal);
        assert!(travel.stats().expanded < dijkstra.stats().expanded);
    }

    #[test]
    fn test_carrying_worker_finishes_trip() {
        let goal = Goal::new(100, 0).unwrap();
        let initial = start(0, 0)
            .moved_to(Location::Node(MINE))
            .with_cargo(Some(Cargo::new(ResourceKind::Gold, 100)));
        let plan = run(&AStarSearch::default(), &initial, &goal)
            .into_plan()
            .unwrap();
        assert_eq!(
            plan.actions(),
            &[
                Action::move_to(Location::Node(MINE), Location::DropOff),
                Action::deposit(ResourceKind::Gold),
            ]
        );
    }

    #[test]
    fn test_search_is_repeatable() {
        let goal = Goal::new(300, 200).unwrap();
        let initial = start(400, 400);
        let first = run(&AStarSearch::default(), &initial, &goal);
        let second = run(&AStarSearch::default(), &initial, &goal);
        assert_eq!(first, second);
    }
}
