use super::credentials::TokenSource;
use crate::config::GoogleSettings;
use crate::error::{ProposalError, Result};
use async_trait::async_trait;
use colored::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

const DRIVE_API: &str = "https://www.googleapis.com/drive/v3";
const DRIVE_UPLOAD_API: &str = "https://www.googleapis.com/upload/drive/v3";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Publishes a converted document and returns a shareable link.
#[async_trait]
pub trait DocumentPublisher: Send + Sync {
    /// Fails when required configuration is missing. Called before any
    /// generation work starts.
    fn check_ready(&self) -> Result<()> {
        Ok(())
    }

    async fn publish(&self, title: &str, docx_path: &Path) -> Result<String>;
}

pub fn document_url(doc_id: &str) -> String {
    format!("https://docs.google.com/document/d/{}/edit", doc_id)
}

/// Copies the template Doc, replaces its body with the docx, and opens it to
/// anyone with the link.
pub struct GoogleDrivePublisher {
    http: reqwest::Client,
    template_id: Option<String>,
    tokens: TokenSource,
    verbose: bool,
}

impl GoogleDrivePublisher {
    pub fn new(settings: &GoogleSettings, verbose: bool) -> Self {
        let tokens = match &settings.access_token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::File(settings.credentials_path.clone()),
        };
        Self {
            http: reqwest::Client::new(),
            template_id: settings.template_id.clone(),
            tokens,
            verbose,
        }
    }

    fn template_id(&self) -> Result<&str> {
        self.template_id.as_deref().ok_or_else(|| {
            ProposalError::ConfigError(
                "GOOGLE_DOC_TEMPLATE_ID environment variable not set.".to_string(),
            )
        })
    }

    async fn check_response(response: reqwest::Response) -> Result<Value> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProposalError::DriveError { status, message });
        }
        Ok(response.json().await?)
    }

    async fn copy_template(&self, token: &str, title: &str) -> Result<String> {
        let url = format!("{}/files/{}/copy", DRIVE_API, self.template_id()?);
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "name": title }))
            .send()
            .await?;
        let body = Self::check_response(response).await?;
        body.get("id")
            .and_then(|id| id.as_str())
            .map(|id| id.to_string())
            .ok_or_else(|| ProposalError::Other("Drive copy returned no file id".to_string()))
    }

    async fn upload_content(&self, token: &str, doc_id: &str, docx_path: &Path) -> Result<()> {
        let bytes = fs::read(docx_path)?;
        let url = format!("{}/files/{}?uploadType=media", DRIVE_UPLOAD_API, doc_id);
        let response = self
            .http
            .patch(url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, DOCX_MIME)
            .body(bytes)
            .send()
            .await?;
        Self::check_response(response).await.map(|_| ())
    }

    async fn share_with_link(&self, token: &str, doc_id: &str) -> Result<()> {
        let url = format!("{}/files/{}/permissions", DRIVE_API, doc_id);
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "type": "anyone", "role": "reader" }))
            .send()
            .await?;
        Self::check_response(response).await.map(|_| ())
    }
}

#[async_trait]
impl DocumentPublisher for GoogleDrivePublisher {
    fn check_ready(&self) -> Result<()> {
        self.template_id().map(|_| ())
    }

    async fn publish(&self, title: &str, docx_path: &Path) -> Result<String> {
        let token = self.tokens.access_token(&self.http).await?;

        let doc_id = self.copy_template(&token, title).await?;
        if self.verbose {
            eprintln!("{}", format!("[google] Copied template to {}", doc_id).dimmed());
        }

        self.upload_content(&token, &doc_id, docx_path).await?;
        self.share_with_link(&token, &doc_id).await?;
        if self.verbose {
            eprintln!("{}", "[google] Shared with anyone holding the link".dimmed());
        }

        Ok(document_url(&doc_id))
    }
}
