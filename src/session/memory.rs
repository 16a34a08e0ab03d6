use super::storage::CheckpointStore;
use crate::error::Result;
use crate::models::ProposalState;
use std::collections::HashMap;
use std::sync::Mutex;

/// Keeps checkpoints for the lifetime of the process.
#[derive(Default)]
pub struct MemoryCheckpointStore {
    states: Mutex<HashMap<String, ProposalState>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn load(&self, thread_id: &str) -> Option<ProposalState> {
        let states = self.states.lock().ok()?;
        states.get(thread_id).cloned()
    }

    fn save(&self, state: &ProposalState) -> Result<()> {
        let mut states = self
            .states
            .lock()
            .map_err(|_| crate::error::ProposalError::Other("checkpoint lock poisoned".to_string()))?;
        states.insert(state.thread_id.clone(), state.clone());
        Ok(())
    }

    fn list(&self) -> Vec<String> {
        let Ok(states) = self.states.lock() else {
            return Vec::new();
        };
        let mut entries: Vec<&ProposalState> = states.values().collect();
        entries.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        entries.into_iter().map(|s| s.thread_id.clone()).collect()
    }
}
