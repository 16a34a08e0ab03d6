use std::fmt;

#[derive(Debug)]
pub enum ProposalError {
    ApiError {
        status: u16,
        message: String,
    },
    DriveError {
        status: u16,
        message: String,
    },
    ConfigError(String),
    /// A session field a generator depends on is not set.
    MissingState(String),
    RenderError(String),
    ConvertError(String),
    NetworkError(reqwest::Error),
    Timeout(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl fmt::Display for ProposalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            ProposalError::DriveError { status, message } => {
                write!(f, "Google API error (status {}): {}", status, message)
            }
            ProposalError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ProposalError::MissingState(field) => {
                write!(f, "Session is missing required field '{}'", field)
            }
            ProposalError::RenderError(msg) => write!(f, "Render error: {}", msg),
            ProposalError::ConvertError(msg) => write!(f, "Conversion error: {}", msg),
            ProposalError::NetworkError(e) => write!(f, "Network error: {}", e),
            ProposalError::Timeout(what) => write!(f, "Timed out: {}", what),
            ProposalError::IoError(e) => write!(f, "IO error: {}", e),
            ProposalError::JsonError(e) => write!(f, "JSON error: {}", e),
            ProposalError::YamlError(e) => write!(f, "YAML error: {}", e),
            ProposalError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ProposalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProposalError::NetworkError(e) => Some(e),
            ProposalError::IoError(e) => Some(e),
            ProposalError::JsonError(e) => Some(e),
            ProposalError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProposalError {
    fn from(err: reqwest::Error) -> Self {
        ProposalError::NetworkError(err)
    }
}

impl From<std::io::Error> for ProposalError {
    fn from(err: std::io::Error) -> Self {
        ProposalError::IoError(err)
    }
}

impl From<serde_json::Error> for ProposalError {
    fn from(err: serde_json::Error) -> Self {
        ProposalError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for ProposalError {
    fn from(err: serde_yaml::Error) -> Self {
        ProposalError::YamlError(err)
    }
}

impl From<anyhow::Error> for ProposalError {
    fn from(err: anyhow::Error) -> Self {
        ProposalError::Other(format!("{:#}", err))
    }
}

impl From<String> for ProposalError {
    fn from(msg: String) -> Self {
        ProposalError::Other(msg)
    }
}

impl From<&str> for ProposalError {
    fn from(msg: &str) -> Self {
        ProposalError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProposalError>;
