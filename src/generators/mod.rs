//! The three artifact writers the orchestrator can call.
//!
//! Each one checks the session has a working directory, prompts the model,
//! cleans the output, writes it to its fixed path and returns the artifact.
//! None of them touch the session state; the caller applies the artifact.

mod cover_letter;
mod diagram;
mod google_doc;

pub use cover_letter::{generate_cover_letter, CoverLetterRequest};
pub use diagram::{generate_mermaid_diagram, DiagramRequest};
pub use google_doc::{document_title, generate_google_doc, GoogleDocRequest};

use crate::api::ChatModel;
use crate::config::ModelsConfig;
use crate::convert::DocumentConverter;
use crate::error::{ProposalError, Result};
use crate::google::DocumentPublisher;
use crate::models::ProposalState;
use crate::prompts::ABOUT_ME;
use crate::render::DiagramRenderer;
use crate::storage::{store_for_folder, FileStore};
use std::sync::Arc;

/// External collaborators shared by the generators.
#[derive(Clone)]
pub struct Toolbox {
    pub model: Arc<dyn ChatModel>,
    pub converter: Arc<dyn DocumentConverter>,
    pub publisher: Arc<dyn DocumentPublisher>,
    pub renderer: Arc<dyn DiagramRenderer>,
    pub models: ModelsConfig,
    pub about_me: String,
    pub verbose: bool,
}

impl Toolbox {
    pub fn new(
        model: Arc<dyn ChatModel>,
        converter: Arc<dyn DocumentConverter>,
        publisher: Arc<dyn DocumentPublisher>,
        renderer: Arc<dyn DiagramRenderer>,
    ) -> Self {
        Self {
            model,
            converter,
            publisher,
            renderer,
            models: ModelsConfig::default(),
            about_me: ABOUT_ME.to_string(),
            verbose: false,
        }
    }

    pub fn with_models(mut self, models: ModelsConfig) -> Self {
        self.models = models;
        self
    }

    pub fn with_about_me(mut self, about_me: impl Into<String>) -> Self {
        self.about_me = about_me.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// The session's file layout, or an error when no working directory is set.
pub(crate) fn require_store(state: &ProposalState) -> Result<FileStore> {
    let folder = state
        .job_folder
        .as_deref()
        .ok_or_else(|| ProposalError::MissingState("job_folder".to_string()))?;
    store_for_folder(folder).ok_or_else(|| {
        ProposalError::MissingState(format!("job_folder ({} is not a session folder)", folder.display()))
    })
}

/// Remove one surrounding markdown code fence, with or without a language tag.
///
/// Text that does not start with a fence is only trimmed.
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    let body = match rest.find('\n') {
        Some(pos) if is_fence_tag(&rest[..pos]) => &rest[pos + 1..],
        _ => rest,
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

fn is_fence_tag(tag: &str) -> bool {
    tag.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '+')
}
