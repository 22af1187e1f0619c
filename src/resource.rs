//! Resource kinds, the banked stockpile at the drop-off, and worker cargo.

use std::fmt;

/// The kinds of resource a worker can gather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Gold,
    Wood,
}

impl ResourceKind {
    /// Every kind, in stockpile order.
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Gold, ResourceKind::Wood];

    pub const COUNT: usize = Self::ALL.len();

    fn index(self) -> usize {
        match self {
            ResourceKind::Gold => 0,
            ResourceKind::Wood => 1,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Gold => write!(f, "gold"),
            ResourceKind::Wood => write!(f, "wood"),
        }
    }
}

/// Totals already delivered to the drop-off, one counter per [`ResourceKind`].
///
/// ```
/// use harvest_planner::{ResourceKind, Stockpile};
///
/// let banked = Stockpile::new().with(ResourceKind::Gold, 300);
/// assert_eq!(banked.get(ResourceKind::Gold), 300);
/// assert_eq!(banked.get(ResourceKind::Wood), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Stockpile {
    amounts: [u32; ResourceKind::COUNT],
}

impl Stockpile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.amounts[kind.index()]
    }

    /// Returns a copy with `kind` set to `amount`.
    pub fn with(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.amounts[kind.index()] = amount;
        self
    }

    /// Returns a copy with `amount` added to `kind`, saturating at `u32::MAX`.
    pub fn deposited(mut self, kind: ResourceKind, amount: u32) -> Self {
        let slot = &mut self.amounts[kind.index()];
        *slot = slot.saturating_add(amount);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }
}

impl fmt::Display for Stockpile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(kind, amount)| format!("{}={}", kind, amount))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// A single load carried by the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cargo {
    pub kind: ResourceKind,
    pub amount: u32,
}

impl Cargo {
    pub fn new(kind: ResourceKind, amount: u32) -> Self {
        Self { kind, amount }
    }
}

impl fmt::Display for Cargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.kind)
    }
}
