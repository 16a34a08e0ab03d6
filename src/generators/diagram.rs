use super::{require_store, strip_code_fences, Toolbox};
use crate::api::response::require_content;
use crate::api::ChatRequest;
use crate::error::Result;
use crate::models::{Artifact, Message, ProposalState};
use crate::prompts::{revision_request, MERMAID_DIAGRAM_SYSTEM_PROMPT};
use crate::storage::write_artifact;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiagramRequest {
    pub workflow_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_request: Option<String>,
}

/// Draw the workflow as Mermaid and render it to PNG.
///
/// A render failure still yields the artifact; the error text travels in
/// `render_error`, no image path is recorded and any earlier image is gone.
pub async fn generate_mermaid_diagram(
    toolbox: &Toolbox,
    state: &ProposalState,
    request: &DiagramRequest,
) -> Result<Artifact> {
    let store = require_store(state)?;

    let mut messages = vec![Message::system(MERMAID_DIAGRAM_SYSTEM_PROMPT)];
    if let Some(previous) = state.mermaid_code.as_deref() {
        messages.push(Message::user(revision_request(
            previous,
            request.change_request.as_deref(),
            "diagram",
        )));
    }
    messages.push(Message::user(request.workflow_description.clone()));

    let chat = ChatRequest::new(&toolbox.models.diagram, messages);
    let response = toolbox.model.complete(&chat).await?;
    let code = strip_code_fences(&require_content(&response)?);

    let (code_path, image_path) = store.mermaid_diagram_paths();
    write_artifact(&code_path, code.as_bytes())?;
    if toolbox.verbose {
        eprintln!(
            "{}",
            format!("[tools] Mermaid code saved to {}", code_path.display()).dimmed()
        );
    }

    // A failed render must not leave the previous image looking current
    match fs::remove_file(&image_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let (image_path, render_error) = match toolbox.renderer.render(&code, &image_path).await {
        Ok(()) => (Some(image_path), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Ok(Artifact::Diagram {
        code,
        code_path,
        image_path,
        render_error,
    })
}
