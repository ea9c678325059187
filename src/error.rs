use thiserror::Error;

/// Error types for the gardener planning system.
///
/// Recoverable outcomes (an invalid plan, a goal with no reachable plan) are
/// ordinary return values elsewhere in the crate; these variants cover load
/// failures, collaborator bugs, and IO.
#[derive(Error, Debug)]
pub enum GardenerError {
    /// Structural problem in the world description. Fatal at load time;
    /// no partially built world is retained.
    #[error("Malformed world description: {0}")]
    MalformedInput(String),

    /// A search strategy applied an action the problem never offered for
    /// that state. Indicates a bug in the strategy or the action generator.
    #[error("Search invariant violated: {0}")]
    InvariantViolation(String),

    /// The search exhausted the reachable state space without finding a
    /// goal. The planner converts this into an absent result.
    #[error("No valid plan found to water every plant")]
    NoPlanFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GardenerError>;
