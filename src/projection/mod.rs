//! Goal-based investment projection

mod state;
mod engine;
mod trajectory;

pub use state::ProjectionState;
pub use engine::{project, GoalProjectionInput, ProjectionEngine};
pub use trajectory::{ProjectionPoint, ProjectionResult, ProjectionSummary};
