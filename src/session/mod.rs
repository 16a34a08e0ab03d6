mod filesystem;
mod memory;
mod storage;

pub use filesystem::FilesystemCheckpointStore;
pub use memory::MemoryCheckpointStore;
pub use storage::CheckpointStore;

use crate::error::Result;
use crate::models::{Message, ProposalState};
use crate::storage::FileStore;

/// Start a session: stamp a folder and save the job text next to the
/// artifacts it will produce.
pub fn start_session(base_dir: &std::path::Path, job_description: &str) -> Result<(FileStore, ProposalState)> {
    let store = FileStore::create(base_dir)?;
    store.save_job_description(job_description)?;

    let mut state = ProposalState::new(store.timestamp(), Some(store.job_folder()));
    state.job_description = Some(job_description.to_string());
    Ok((store, state))
}

/// Reattach to a checkpointed session.
pub fn resume_session(
    checkpoints: &dyn CheckpointStore,
    base_dir: &std::path::Path,
    thread_id: &str,
) -> Result<(FileStore, ProposalState)> {
    let state = checkpoints.load(thread_id).ok_or_else(|| {
        crate::error::ProposalError::ConfigError(format!(
            "No checkpoint found for session '{}' under {}",
            thread_id,
            base_dir.display()
        ))
    })?;
    let store = FileStore::open(base_dir, thread_id)?;
    Ok((store, state))
}

/// The last assistant reply in the history, if any.
pub fn last_reply(messages: &[Message]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.is_final_reply())
        .and_then(|m| m.content.as_deref())
}
