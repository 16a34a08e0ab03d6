use crate::error::Result;
use crate::models::ProposalState;

/// Trait for checkpoint backends. A checkpoint is the whole session state,
/// keyed by its thread id.
pub trait CheckpointStore: Send + Sync {
    /// Load the latest checkpoint for a thread
    fn load(&self, thread_id: &str) -> Option<ProposalState>;

    /// Save a checkpoint, replacing any earlier one for the same thread
    fn save(&self, state: &ProposalState) -> Result<()>;

    /// Thread ids that have a checkpoint, newest first
    fn list(&self) -> Vec<String>;
}
