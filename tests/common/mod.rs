#![allow(dead_code)]

use async_trait::async_trait;
use proposal_agent::api::{ChatModel, ChatRequest};
use proposal_agent::convert::DocumentConverter;
use proposal_agent::error::{ProposalError, Result};
use proposal_agent::generators::Toolbox;
use proposal_agent::google::DocumentPublisher;
use proposal_agent::render::DiagramRenderer;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Replays canned completions in order and records every request.
#[derive(Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Value>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, request: &ChatRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ProposalError::Other("script exhausted".to_string()))
    }
}

pub fn text_response(content: &str) -> Value {
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": content
            }
        }]
    })
}

pub fn tool_call_response(calls: &[(&str, &str, Value)]) -> Value {
    let tool_calls: Vec<Value> = calls
        .iter()
        .map(|(id, name, args)| {
            json!({
                "id": id,
                "type": "function",
                "function": {
                    "name": name,
                    "arguments": args.to_string()
                }
            })
        })
        .collect();

    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": tool_calls
            }
        }]
    })
}

/// Copies the markdown to the docx path so the file exists.
pub struct CopyConverter;

#[async_trait]
impl DocumentConverter for CopyConverter {
    async fn markdown_to_docx(&self, markdown_path: &Path, docx_path: &Path) -> Result<()> {
        fs::copy(markdown_path, docx_path)?;
        Ok(())
    }
}

pub struct FakePublisher {
    pub ready: bool,
    pub titles: Mutex<Vec<String>>,
}

impl FakePublisher {
    pub fn new(ready: bool) -> Arc<Self> {
        Arc::new(Self {
            ready,
            titles: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl DocumentPublisher for FakePublisher {
    fn check_ready(&self) -> Result<()> {
        if self.ready {
            Ok(())
        } else {
            Err(ProposalError::ConfigError(
                "GOOGLE_DOC_TEMPLATE_ID environment variable not set.".to_string(),
            ))
        }
    }

    async fn publish(&self, title: &str, _docx_path: &Path) -> Result<String> {
        let mut titles = self.titles.lock().unwrap();
        titles.push(title.to_string());
        Ok(format!(
            "https://docs.google.com/document/d/doc-{}/edit",
            titles.len()
        ))
    }
}

/// Writes the diagram code as the "image".
pub struct FileRenderer;

#[async_trait]
impl DiagramRenderer for FileRenderer {
    async fn render(&self, code: &str, output_path: &Path) -> Result<()> {
        fs::write(output_path, code)?;
        Ok(())
    }
}

pub struct FailingRenderer;

#[async_trait]
impl DiagramRenderer for FailingRenderer {
    async fn render(&self, _code: &str, _output_path: &Path) -> Result<()> {
        Err(ProposalError::RenderError(
            "Error rendering Mermaid diagram. mmdc missing".to_string(),
        ))
    }
}

pub fn toolbox(model: Arc<ScriptedModel>) -> Toolbox {
    Toolbox::new(
        model,
        Arc::new(CopyConverter),
        FakePublisher::new(true),
        Arc::new(FileRenderer),
    )
}
