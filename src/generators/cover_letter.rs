use super::{require_store, strip_code_fences, Toolbox};
use crate::api::response::require_content;
use crate::api::{ChatRequest, ResponseFormat};
use crate::error::Result;
use crate::models::{Artifact, Message, ProposalState};
use crate::prompts::{cover_letter_system_prompt, job_payload, revision_request};
use crate::storage::write_artifact;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoverLetterRequest {
    pub job_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_request: Option<String>,
}

#[derive(Deserialize)]
struct StructuredProposal {
    proposal: String,
}

fn proposal_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "proposal": {
                "type": "string",
                "description": "The customized proposal text based on the job description."
            }
        },
        "required": ["proposal"],
        "additionalProperties": false
    })
}

/// Write (or rewrite) the short cover letter.
///
/// A previous cover letter in the session turns this into a revision.
pub async fn generate_cover_letter(
    toolbox: &Toolbox,
    state: &ProposalState,
    request: &CoverLetterRequest,
) -> Result<Artifact> {
    let store = require_store(state)?;

    let mut messages = vec![Message::system(cover_letter_system_prompt(&toolbox.about_me))];
    if let Some(previous) = state.cover_letter.as_deref() {
        messages.push(Message::user(revision_request(
            previous,
            request.change_request.as_deref(),
            "proposal",
        )));
    }
    messages.push(Message::user(job_payload(&request.job_description)));

    let chat = ChatRequest::new(&toolbox.models.cover_letter, messages)
        .with_response_format(ResponseFormat::json_schema("proposal", proposal_schema()));
    let response = toolbox.model.complete(&chat).await?;
    let content = strip_code_fences(&require_content(&response)?);

    // Some backends ignore response_format and answer in plain text
    let text = match serde_json::from_str::<StructuredProposal>(&content) {
        Ok(structured) => structured.proposal.trim().to_string(),
        Err(_) => content,
    };

    let path = store.cover_letter_path();
    write_artifact(&path, text.as_bytes())?;

    Ok(Artifact::CoverLetter { text, path })
}
