use clap::Parser;
use std::path::PathBuf;

use crate::config::RoutingMode;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "proposal")]
#[command(
    about = "Drafts freelance job proposals: cover letter, Google Doc and workflow diagram",
    long_about = None
)]
pub struct Args {
    #[arg(
        short = 'j',
        long = "job-file",
        help = "Job description file [default: job_description.txt]"
    )]
    pub job_file: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "output-dir",
        help = "Directory generated sessions are written to [default: generated_content]"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        short = 'r',
        long = "resume",
        help = "Continue a checkpointed session by its timestamp"
    )]
    pub resume: Option<String>,

    #[arg(long = "list", help = "List checkpointed sessions and exit")]
    pub list_sessions: bool,

    #[arg(
        long = "routing",
        value_enum,
        help = "How the next tool is chosen: by the model or by fixed rules"
    )]
    pub routing: Option<RoutingMode>,

    #[arg(
        long = "api-endpoint",
        help = "Custom OpenAI-compatible API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(short = 'v', long = "verbose", help = "Print diagnostics to stderr")]
    pub verbose: bool,
}
