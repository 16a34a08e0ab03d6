use crate::api::ChatRequest;
use crate::error::{ProposalError, Result};
use async_trait::async_trait;
use colored::*;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

/// A chat-completions backend. Returns the raw response JSON.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<Value>;
}

pub struct OpenAiChatClient {
    client: reqwest::Client,
    endpoint: String,
    verbose: bool,
}

impl OpenAiChatClient {
    pub fn new(api_key: &str, endpoint: &str, timeout_secs: u64, verbose: bool) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                ProposalError::ConfigError(format!("Invalid authorization header: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            verbose,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<Value> {
        if self.verbose {
            eprintln!(
                "{}",
                format!(
                    "[AI] Request: model={}, messages={}, tools={}",
                    request.model,
                    request.messages.len(),
                    request.tools.as_ref().map(|t| t.len()).unwrap_or(0)
                )
                .dimmed()
            );
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProposalError::Timeout(format!("request to {}", self.endpoint))
                } else {
                    ProposalError::NetworkError(e)
                }
            })?;

        if self.verbose {
            eprintln!(
                "{}",
                format!("[AI] Response status: {}", response.status()).dimmed()
            );
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProposalError::ApiError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await?;
        if self.verbose {
            eprintln!(
                "{}",
                format!("[AI] Raw response: {}", response_text).dimmed()
            );
        }

        Ok(serde_json::from_str(&response_text)?)
    }
}
