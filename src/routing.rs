//! Deterministic routing: the rule table used instead of the model's choice.
//!
//! A turn with no artifacts yet drafts everything in order. A later turn is a
//! revision of exactly one artifact, picked by keywords, unless the user asks
//! for everything again.

use crate::generators::{CoverLetterRequest, DiagramRequest, GoogleDocRequest};
use crate::models::{ArtifactKind, ProposalState, Role};
use crate::prompts::LINK_PLACEHOLDER;
use crate::storage::store_for_folder;
use crate::tools::{ToolOutcome, ToolRequest};
use regex::Regex;
use std::fs;

/// Generation order for a full draft.
pub const DRAFT_ORDER: [ArtifactKind; 3] = [
    ArtifactKind::CoverLetter,
    ArtifactKind::GoogleDoc,
    ArtifactKind::Diagram,
];

const COVER_LETTER_KEYWORDS: &[&str] = &["cover letter", "cover", "letter", "bid"];
const DIAGRAM_KEYWORDS: &[&str] = &[
    "diagram", "mermaid", "chart", "flowchart", "flow", "graph", "visual", "image",
];
const DOC_KEYWORDS: &[&str] = &["google doc", "document", "doc", "docs", "detailed", "full proposal"];
// Phrases only: "everything" alone shows up in ordinary praise
const EVERYTHING_KEYWORDS: &[&str] = &[
    "redo everything",
    "regenerate everything",
    "rewrite everything",
    "everything again",
    "all of them",
    "all three",
    "start over",
    "from scratch",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Produce every artifact in `DRAFT_ORDER`.
    Draft { change_request: Option<String> },
    /// Regenerate one artifact with the user's feedback.
    Revise {
        kind: ArtifactKind,
        change_request: String,
    },
}

impl Intent {
    pub fn steps(&self) -> Vec<ArtifactKind> {
        match self {
            Intent::Draft { .. } => DRAFT_ORDER.to_vec(),
            Intent::Revise { kind, .. } => vec![*kind],
        }
    }

    pub fn change_request(&self) -> Option<&str> {
        match self {
            Intent::Draft { change_request } => change_request.as_deref(),
            Intent::Revise { change_request, .. } => Some(change_request),
        }
    }
}

/// Whole-word match, so "graph" does not fire on "paragraph".
fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| {
        Regex::new(&format!(r"\b{}\b", regex::escape(keyword)))
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    })
}

/// Which artifact a piece of feedback is about. Defaults to the cover letter.
pub fn classify_revision(user_text: &str) -> ArtifactKind {
    let text = user_text.to_lowercase();
    if mentions(&text, COVER_LETTER_KEYWORDS) {
        ArtifactKind::CoverLetter
    } else if mentions(&text, DIAGRAM_KEYWORDS) {
        ArtifactKind::Diagram
    } else if mentions(&text, DOC_KEYWORDS) {
        ArtifactKind::GoogleDoc
    } else {
        ArtifactKind::CoverLetter
    }
}

pub fn classify(state: &ProposalState, user_text: &str) -> Intent {
    if !state.has_artifacts() {
        return Intent::Draft {
            change_request: None,
        };
    }

    let change_request = user_text.trim().to_string();
    if mentions(&user_text.to_lowercase(), EVERYTHING_KEYWORDS) {
        return Intent::Draft {
            change_request: Some(change_request),
        };
    }

    Intent::Revise {
        kind: classify_revision(user_text),
        change_request,
    }
}

/// The job text for this session: the stored description, else the first
/// user turn.
pub fn job_description(state: &ProposalState) -> String {
    state
        .job_description
        .clone()
        .or_else(|| {
            state
                .messages
                .iter()
                .find(|m| m.role == Role::User)
                .and_then(|m| m.content.clone())
        })
        .unwrap_or_default()
}

/// What the diagram should depict: the saved long-form proposal if there is
/// one, else the job itself.
pub fn workflow_description(state: &ProposalState) -> String {
    state
        .job_folder
        .as_deref()
        .and_then(store_for_folder)
        .and_then(|store| fs::read_to_string(store.google_doc_paths().0).ok())
        .filter(|markdown| !markdown.trim().is_empty())
        .unwrap_or_else(|| job_description(state))
}

/// Build the concrete call for one step, reading inputs from the session as
/// it stands after the previous steps.
pub fn request_for(kind: ArtifactKind, state: &ProposalState, change_request: Option<&str>) -> ToolRequest {
    let change_request = change_request.map(str::to_string);
    match kind {
        ArtifactKind::CoverLetter => ToolRequest::GenerateCoverLetter(CoverLetterRequest {
            job_description: job_description(state),
            change_request,
        }),
        ArtifactKind::GoogleDoc => ToolRequest::GenerateGoogleDoc(GoogleDocRequest {
            job_description: job_description(state),
            change_request,
        }),
        ArtifactKind::Diagram => ToolRequest::GenerateMermaidDiagram(DiagramRequest {
            workflow_description: workflow_description(state),
            change_request,
        }),
    }
}

/// The reply the rule router gives after running its steps.
pub fn compose_reply(state: &ProposalState, outcomes: &[(ArtifactKind, ToolOutcome)]) -> String {
    let mut sections = Vec::new();

    if let Some(letter) = state.cover_letter.as_deref() {
        let letter = match state.google_doc_url.as_deref() {
            Some(url) => letter.replace(LINK_PLACEHOLDER, url),
            None => letter.to_string(),
        };
        sections.push(format!("Cover letter:\n\n{}", letter));
    }

    if let Some(url) = state.google_doc_url.as_deref() {
        sections.push(format!("Google Doc proposal: {}", url));
    }

    if let Some(image) = state.mermaid_image.as_deref() {
        sections.push(format!("Diagram image: {}", image.display()));
    }

    for (kind, outcome) in outcomes {
        if outcome.is_error() {
            sections.push(format!("The {} could not be generated. {}", kind, outcome.content));
        } else if let Some(crate::models::Artifact::Diagram {
            render_error: Some(err),
            ..
        }) = &outcome.artifact
        {
            sections.push(format!("The diagram code was saved but not rendered. {}", err));
        }
    }

    if sections.is_empty() {
        "Nothing was generated.".to_string()
    } else {
        sections.join("\n\n")
    }
}
