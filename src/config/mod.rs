mod api;
mod defaults;
mod integrations;
mod validation;

use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use api::{normalize_endpoint, ApiConfig};
pub use defaults::{default_max_tool_rounds, DEFAULT_API_ENDPOINT, DEFAULT_BASE_DIR, DEFAULT_JOB_FILE};
pub use integrations::{ConverterConfig, GoogleConfig, ModelSpec, ModelsConfig, RendererConfig};
pub use validation::{expand_env_var_in_string, parse_flag};

use defaults::{default_request_timeout, DEFAULT_CREDENTIALS_PATH};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// The orchestrator model picks tools via function calling.
    #[default]
    Model,
    /// A fixed rule table picks tools; no model call for routing.
    Rules,
}

impl RoutingMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "model" | "llm" => Some(RoutingMode::Model),
            "rules" | "rule" => Some(RoutingMode::Rules),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub routing: Option<RoutingMode>,
    #[serde(default)]
    pub max_tool_rounds: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub base_dir: Option<String>,
    #[serde(default)]
    pub job_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleSettings {
    pub template_id: Option<String>,
    pub credentials_path: PathBuf,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_endpoint: String,
    pub request_timeout: u64,
    pub models: ModelsConfig,
    pub base_dir: PathBuf,
    pub job_file: PathBuf,
    pub routing: RoutingMode,
    pub max_tool_rounds: usize,
    pub verbose: bool,
    pub google: GoogleSettings,
    pub renderer: RendererConfig,
    pub converter: ConverterConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self, String> {
        let file_config = FileConfig::load().map_err(|e| format!("{:#}", e))?;
        Self::from_parts(args, file_config)
    }

    /// Resolve settings with precedence CLI args > env vars > config file > defaults.
    pub fn from_parts(args: &Args, file_config: FileConfig) -> Result<Self, String> {
        // Credentials only come from the environment
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| "Please set the OPENAI_API_KEY environment variable.")?;

        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env::var("AI_API_ENDPOINT").ok())
            .or(file_config.api.endpoint.clone())
            .map(|endpoint| normalize_endpoint(&endpoint))
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let request_timeout = env::var("AI_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.api.timeout_secs)
            .unwrap_or_else(default_request_timeout);

        let mut models = file_config.models.clone();
        if let Ok(name) = env::var("PROPOSAL_ORCHESTRATOR_MODEL") {
            models.orchestrator.name = name;
        }
        if let Ok(name) = env::var("PROPOSAL_WRITER_MODEL") {
            models.cover_letter.name = name;
        }
        if let Ok(name) = env::var("PROPOSAL_DOC_MODEL") {
            models.google_doc.name = name;
        }
        if let Ok(name) = env::var("PROPOSAL_DIAGRAM_MODEL") {
            models.diagram.name = name;
        }

        let base_dir = args
            .output_dir
            .clone()
            .or_else(|| {
                file_config
                    .storage
                    .base_dir
                    .as_deref()
                    .map(|dir| PathBuf::from(expand_env_var_in_string(dir)))
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR));

        let job_file = args
            .job_file
            .clone()
            .or_else(|| {
                file_config
                    .storage
                    .job_file
                    .as_deref()
                    .map(|file| PathBuf::from(expand_env_var_in_string(file)))
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JOB_FILE));

        let routing = match args.routing {
            Some(mode) => mode,
            None => match env::var("PROPOSAL_ROUTING").ok() {
                Some(value) => RoutingMode::parse(&value)
                    .ok_or_else(|| format!("Unknown routing mode '{}' in PROPOSAL_ROUTING", value))?,
                None => file_config.session.routing.unwrap_or_default(),
            },
        };

        let max_tool_rounds = file_config
            .session
            .max_tool_rounds
            .unwrap_or_else(default_max_tool_rounds);

        let verbose = args.verbose
            || env::var("AI_VERBOSE")
                .ok()
                .map(|v| parse_flag(&v))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        let google = GoogleSettings {
            template_id: env::var("GOOGLE_DOC_TEMPLATE_ID")
                .ok()
                .filter(|id| !id.is_empty())
                .or(file_config.google.template_id.clone()),
            credentials_path: env::var("GOOGLE_CREDENTIALS_PATH")
                .ok()
                .or(file_config.google.credentials_path.clone())
                .map(|path| PathBuf::from(expand_env_var_in_string(&path)))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH)),
            access_token: env::var("GOOGLE_ACCESS_TOKEN").ok().filter(|t| !t.is_empty()),
        };

        let mut renderer = file_config.renderer.clone();
        if let Ok(path) = env::var("MMDC_PATH") {
            renderer.mmdc_path = path;
        }

        let mut converter = file_config.converter.clone();
        if let Ok(path) = env::var("PANDOC_PATH") {
            converter.pandoc_path = path;
        }

        Ok(Config {
            api_key,
            api_endpoint,
            request_timeout,
            models,
            base_dir,
            job_file,
            routing,
            max_tool_rounds,
            verbose,
            google,
            renderer,
            converter,
        })
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        // No config file found, return default
        Ok(FileConfig::default())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory (highest priority - local override)
        paths.push(PathBuf::from(".proposal-agent.yaml"));
        paths.push(PathBuf::from(".proposal-agent.yml"));
        paths.push(PathBuf::from(".proposal-agent.json"));

        // 2. User's config directory (global config)
        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("proposal-agent");
            paths.push(config_dir.join("proposal-agent.yaml"));
            paths.push(config_dir.join("proposal-agent.yml"));
            paths.push(config_dir.join("proposal-agent.json"));
        }

        paths
    }
}
