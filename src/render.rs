use crate::config::RendererConfig;
use crate::error::{ProposalError, Result};
use crate::process::run_command;
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub const MERMAID_CLI_HINT: &str =
    "Please ensure you have mermaid-cli installed (`npm install -g @mermaid-js/mermaid-cli`).";

/// Rasterizes diagram markup to an image file.
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    async fn render(&self, code: &str, output_path: &Path) -> Result<()>;
}

/// Renders through the `mmdc` binary with fixed canvas geometry.
pub struct MermaidCli {
    config: RendererConfig,
    verbose: bool,
}

impl MermaidCli {
    pub fn new(config: RendererConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    fn command_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
            "-w".to_string(),
            self.config.width.to_string(),
            "-H".to_string(),
            self.config.height.to_string(),
            "--scale".to_string(),
            self.config.scale.to_string(),
        ]
    }
}

#[async_trait]
impl DiagramRenderer for MermaidCli {
    async fn render(&self, code: &str, output_path: &Path) -> Result<()> {
        // mmdc reads from a file; the input is scratch and removed afterwards
        let input = std::env::temp_dir().join(format!("proposal-{}.mmd", Uuid::new_v4()));
        fs::write(&input, code)?;

        let result = run_command(
            &self.config.mmdc_path,
            &self.command_args(&input, output_path),
            self.config.timeout_secs,
            self.verbose,
        )
        .await;

        let _ = fs::remove_file(&input);

        result.map(|_| ()).map_err(|e| {
            ProposalError::RenderError(format!(
                "Error rendering Mermaid diagram. {}\nOriginal error: {}",
                MERMAID_CLI_HINT, e
            ))
        })
    }
}
