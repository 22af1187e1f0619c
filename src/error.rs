use crate::location::Location;
use crate::resource::ResourceKind;
use crate::state::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid goal: required {kind} amount {amount} is out of range")]
    InvalidGoal { kind: ResourceKind, amount: i64 },
    #[error("Unit load must be positive")]
    InvalidUnitLoad,
    #[error("Worker cargo of {amount} does not match the unit load of {unit_load}")]
    InvalidCargo { amount: u32, unit_load: u32 },
    #[error("Resource node {0} appears more than once")]
    DuplicateNode(NodeId),
    #[error("Unknown resource node: {0}")]
    UnknownNode(NodeId),
    #[error("No position known for {0}")]
    MissingPosition(Location),
    #[error("Action precondition not met: {0}")]
    PreconditionNotMet(String),
    #[error("No valid plan found to achieve the goal")]
    NoPlanFound,
    #[error("Search gave up after {0} expansions")]
    ExpansionLimitReached(usize),
    #[error("Feedback reported while no action is in flight")]
    UnexpectedFeedback,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
