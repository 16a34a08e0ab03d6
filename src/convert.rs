use crate::config::ConverterConfig;
use crate::error::{ProposalError, Result};
use crate::process::run_command;
use async_trait::async_trait;
use std::path::Path;

/// Converts a markdown file into a document format on disk.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn markdown_to_docx(&self, markdown_path: &Path, docx_path: &Path) -> Result<()>;
}

pub struct PandocConverter {
    config: ConverterConfig,
    verbose: bool,
}

impl PandocConverter {
    pub fn new(config: ConverterConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }
}

#[async_trait]
impl DocumentConverter for PandocConverter {
    async fn markdown_to_docx(&self, markdown_path: &Path, docx_path: &Path) -> Result<()> {
        let args = vec![
            "--from".to_string(),
            "markdown".to_string(),
            "--to".to_string(),
            "docx".to_string(),
            "--output".to_string(),
            docx_path.display().to_string(),
            markdown_path.display().to_string(),
        ];

        run_command(
            &self.config.pandoc_path,
            &args,
            self.config.timeout_secs,
            self.verbose,
        )
        .await
        .map(|_| ())
        .map_err(ProposalError::ConvertError)
    }
}
