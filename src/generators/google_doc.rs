use super::{require_store, strip_code_fences, Toolbox};
use crate::api::response::require_content;
use crate::api::ChatRequest;
use crate::error::Result;
use crate::models::{Artifact, Message, ProposalState};
use crate::prompts::{google_doc_system_prompt, job_payload, revision_request};
use crate::storage::write_artifact;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoogleDocRequest {
    pub job_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_request: Option<String>,
}

/// Title for the published copy: the first level-one heading, if any.
pub fn document_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Write the long-form proposal, convert it to docx and publish it.
pub async fn generate_google_doc(
    toolbox: &Toolbox,
    state: &ProposalState,
    request: &GoogleDocRequest,
) -> Result<Artifact> {
    let store = require_store(state)?;
    toolbox.publisher.check_ready()?;

    let (markdown_path, docx_path) = store.google_doc_paths();

    let mut messages = vec![Message::system(google_doc_system_prompt(&toolbox.about_me))];
    if let Some(change) = request.change_request.as_deref() {
        // The live session only keeps the link; the last draft lives on disk
        match fs::read_to_string(&markdown_path) {
            Ok(previous) if !previous.trim().is_empty() => {
                messages.push(Message::user(revision_request(&previous, Some(change), "proposal")));
            }
            _ => messages.push(Message::user(format!(
                "Please incorporate the following changes: {}",
                change
            ))),
        }
    }
    messages.push(Message::user(job_payload(&request.job_description)));

    let chat = ChatRequest::new(&toolbox.models.google_doc, messages);
    let response = toolbox.model.complete(&chat).await?;
    let markdown = strip_code_fences(&require_content(&response)?);

    write_artifact(&markdown_path, markdown.as_bytes())?;
    if toolbox.verbose {
        eprintln!(
            "{}",
            format!("[tools] Proposal markdown saved to {}", markdown_path.display()).dimmed()
        );
    }

    toolbox
        .converter
        .markdown_to_docx(&markdown_path, &docx_path)
        .await?;

    let title = document_title(&markdown)
        .unwrap_or_else(|| format!("Proposal {}", store.timestamp()));
    let url = toolbox.publisher.publish(&title, &docx_path).await?;

    Ok(Artifact::GoogleDoc {
        url,
        markdown_path,
        docx_path,
    })
}
