use super::artifact::Artifact;
use super::tool::ToolCall;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::text(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::text(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(Role::Assistant, content)
    }

    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content,
            tool_calls: Some(tool_calls),
            tool_call_id: None,
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// True for an assistant message that carries no tool calls.
    pub fn is_final_reply(&self) -> bool {
        self.role == Role::Assistant
            && self
                .tool_calls
                .as_ref()
                .map(|calls| calls.is_empty())
                .unwrap_or(true)
    }
}

/// Put the preamble at the head of the history unless a system message
/// already leads it. Returns whether a message was inserted.
pub fn ensure_system_preamble(messages: &mut Vec<Message>, preamble: &str) -> bool {
    if messages.first().map(|m| m.role) == Some(Role::System) {
        return false;
    }
    messages.insert(0, Message::system(preamble));
    true
}

/// Working state of one proposal conversation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProposalState {
    pub thread_id: String,
    pub job_folder: Option<PathBuf>,
    pub job_description: Option<String>,
    pub messages: Vec<Message>,
    pub cover_letter: Option<String>,
    pub google_doc_url: Option<String>,
    pub mermaid_code: Option<String>,
    pub mermaid_image: Option<PathBuf>,
    pub last_updated: DateTime<Local>,
}

impl ProposalState {
    pub fn new(thread_id: impl Into<String>, job_folder: Option<PathBuf>) -> Self {
        Self {
            thread_id: thread_id.into(),
            job_folder,
            job_description: None,
            messages: Vec::new(),
            cover_letter: None,
            google_doc_url: None,
            mermaid_code: None,
            mermaid_image: None,
            last_updated: Local::now(),
        }
    }

    /// Overwrite the field the artifact belongs to. Earlier values are not kept.
    pub fn apply(&mut self, artifact: &Artifact) {
        match artifact {
            Artifact::CoverLetter { text, .. } => {
                self.cover_letter = Some(text.clone());
            }
            Artifact::GoogleDoc { url, .. } => {
                self.google_doc_url = Some(url.clone());
            }
            Artifact::Diagram {
                code, image_path, ..
            } => {
                self.mermaid_code = Some(code.clone());
                self.mermaid_image = image_path.clone();
            }
        }
    }

    pub fn has_artifacts(&self) -> bool {
        self.cover_letter.is_some() || self.google_doc_url.is_some() || self.mermaid_code.is_some()
    }

    pub fn touch(&mut self) {
        self.last_updated = Local::now();
    }
}
