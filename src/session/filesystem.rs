use super::storage::CheckpointStore;
use crate::error::Result;
use crate::models::ProposalState;
use crate::storage::FileStore;
use std::fs;
use std::path::PathBuf;

/// Stores each checkpoint as `<base>/<thread_id>/checkpoint.json`, next to
/// the session's artifacts.
pub struct FilesystemCheckpointStore {
    base_dir: PathBuf,
}

impl FilesystemCheckpointStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn checkpoint_path(&self, thread_id: &str) -> PathBuf {
        FileStore::at(&self.base_dir, thread_id).checkpoint_path()
    }
}

impl CheckpointStore for FilesystemCheckpointStore {
    fn load(&self, thread_id: &str) -> Option<ProposalState> {
        let content = fs::read_to_string(self.checkpoint_path(thread_id)).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn save(&self, state: &ProposalState) -> Result<()> {
        let path = self.checkpoint_path(&state.thread_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.base_dir) else {
            return Vec::new();
        };

        let mut sessions: Vec<ProposalState> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let thread_id = entry.file_name().to_str()?.to_string();
                self.load(&thread_id)
            })
            .collect();

        // Most recent first
        sessions.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        sessions.into_iter().map(|s| s.thread_id).collect()
    }
}
