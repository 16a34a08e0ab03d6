use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const GOOGLE_DOC_DIR: &str = "google_doc_proposal";
const MERMAID_DIR: &str = "mermaid_diagrams";
const CHECKPOINT_FILE: &str = "checkpoint.json";

/// Directory layout for one proposal session.
///
/// Every path is derived from the base directory and the session timestamp
/// alone, so repeated calls return identical paths:
///
/// ```text
/// <base>/<ts>/job_description_<ts>.txt
/// <base>/<ts>/cover_letter_<ts>.txt
/// <base>/<ts>/google_doc_proposal/proposal_<ts>.{md,docx}
/// <base>/<ts>/mermaid_diagrams/mermaid_code_<ts>.md
/// <base>/<ts>/mermaid_diagrams/mermaid_image_<ts>.png
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    base_dir: PathBuf,
    timestamp: String,
}

impl FileStore {
    /// Stamp a new session with the current local time and create its folders.
    pub fn create(base_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::open(base_dir, timestamp)
    }

    /// Attach to a session by timestamp, creating folders that are missing.
    pub fn open(base_dir: impl Into<PathBuf>, timestamp: impl Into<String>) -> io::Result<Self> {
        let store = Self::at(base_dir, timestamp);
        fs::create_dir_all(store.google_doc_dir())?;
        fs::create_dir_all(store.mermaid_dir())?;
        Ok(store)
    }

    /// Path arithmetic only; touches nothing on disk.
    pub fn at(base_dir: impl Into<PathBuf>, timestamp: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn job_folder(&self) -> PathBuf {
        self.base_dir.join(&self.timestamp)
    }

    pub fn google_doc_dir(&self) -> PathBuf {
        self.job_folder().join(GOOGLE_DOC_DIR)
    }

    pub fn mermaid_dir(&self) -> PathBuf {
        self.job_folder().join(MERMAID_DIR)
    }

    pub fn job_description_path(&self) -> PathBuf {
        self.job_folder()
            .join(format!("job_description_{}.txt", self.timestamp))
    }

    pub fn cover_letter_path(&self) -> PathBuf {
        self.job_folder()
            .join(format!("cover_letter_{}.txt", self.timestamp))
    }

    /// Markdown and docx paths of the long-form proposal.
    pub fn google_doc_paths(&self) -> (PathBuf, PathBuf) {
        let dir = self.google_doc_dir();
        (
            dir.join(format!("proposal_{}.md", self.timestamp)),
            dir.join(format!("proposal_{}.docx", self.timestamp)),
        )
    }

    /// Mermaid source and rendered image paths.
    pub fn mermaid_diagram_paths(&self) -> (PathBuf, PathBuf) {
        let dir = self.mermaid_dir();
        (
            dir.join(format!("mermaid_code_{}.md", self.timestamp)),
            dir.join(format!("mermaid_image_{}.png", self.timestamp)),
        )
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.job_folder().join(CHECKPOINT_FILE)
    }

    pub fn save_job_description(&self, content: &str) -> io::Result<PathBuf> {
        let path = self.job_description_path();
        fs::write(&path, content)?;
        Ok(path)
    }
}

/// Recover the store from a session's working directory.
///
/// The folder name is the timestamp and its parent is the base directory.
pub fn store_for_folder(job_folder: &Path) -> Option<FileStore> {
    let timestamp = job_folder.file_name()?.to_str()?.to_string();
    let base = job_folder
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Some(FileStore::at(base, timestamp))
}

/// Write a file, creating its parent directory when needed.
pub fn write_artifact(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}
