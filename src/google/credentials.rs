use crate::error::{ProposalError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// An authorized-user token file as written by Google's client libraries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthorizedUser {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthorizedUser {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ProposalError::ConfigError(format!(
                "Google credentials not readable at {} ({}). Authorize once with Google's tooling and save the authorized-user token there.",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// A token with less than a minute left counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expiry) {
            (None, _) => true,
            (Some(_), Some(expiry)) => expiry - Duration::seconds(60) <= now,
            (Some(_), None) => false,
        }
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some() && self.client_id.is_some() && self.client_secret.is_some()
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Source of bearer tokens for the Google APIs.
pub enum TokenSource {
    Static(String),
    File(PathBuf),
}

impl TokenSource {
    pub async fn access_token(&self, http: &reqwest::Client) -> Result<String> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::File(path) => {
                let mut user = AuthorizedUser::load(path)?;
                if !user.is_expired(Utc::now()) {
                    if let Some(token) = user.token.clone() {
                        return Ok(token);
                    }
                }
                if !user.can_refresh() {
                    return Err(ProposalError::ConfigError(format!(
                        "Google token in {} is expired and has no refresh token",
                        path.display()
                    )));
                }
                refresh(http, &mut user).await?;
                user.save(path)?;
                user.token
                    .ok_or_else(|| ProposalError::Other("Token refresh returned no token".to_string()))
            }
        }
    }
}

async fn refresh(http: &reqwest::Client, user: &mut AuthorizedUser) -> Result<()> {
    let token_uri = user
        .token_uri
        .clone()
        .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string());

    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", user.refresh_token.as_deref().unwrap_or_default()),
        ("client_id", user.client_id.as_deref().unwrap_or_default()),
        ("client_secret", user.client_secret.as_deref().unwrap_or_default()),
    ];

    let response = http.post(&token_uri).form(&params).send().await?;
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ProposalError::DriveError { status, message });
    }

    let refreshed: RefreshResponse = response.json().await?;
    user.token = Some(refreshed.access_token);
    user.expiry = refreshed
        .expires_in
        .map(|secs| Utc::now() + Duration::seconds(secs));
    Ok(())
}
