mod confidence;
mod hypothesis;
mod ids;
mod progress;
mod results;

pub use confidence::Confidence;
pub use hypothesis::Hypothesis;
pub use ids::WorkerId;
pub use progress::SimulationProgress;
pub use results::{
    Archive, ArchiveKey, ResultRow, ResultTable, TrialFailure, TrialOutcome, is_covered,
};
