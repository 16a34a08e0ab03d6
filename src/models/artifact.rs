use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    CoverLetter,
    GoogleDoc,
    Diagram,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::CoverLetter => "cover letter",
            ArtifactKind::GoogleDoc => "Google Doc proposal",
            ArtifactKind::Diagram => "Mermaid diagram",
        };
        f.write_str(name)
    }
}

/// Output of a single generator run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    CoverLetter {
        text: String,
        path: PathBuf,
    },
    GoogleDoc {
        url: String,
        markdown_path: PathBuf,
        docx_path: PathBuf,
    },
    Diagram {
        code: String,
        code_path: PathBuf,
        image_path: Option<PathBuf>,
        render_error: Option<String>,
    },
}

impl Artifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::CoverLetter { .. } => ArtifactKind::CoverLetter,
            Artifact::GoogleDoc { .. } => ArtifactKind::GoogleDoc,
            Artifact::Diagram { .. } => ArtifactKind::Diagram,
        }
    }

    /// Text handed back to the orchestrator as the tool result.
    pub fn tool_output(&self) -> String {
        match self {
            Artifact::CoverLetter { text, .. } => text.clone(),
            Artifact::GoogleDoc { url, .. } => format!(
                "I have created the Google Doc proposal for you. You can view it here: {}",
                url
            ),
            Artifact::Diagram {
                code_path,
                image_path,
                render_error,
                ..
            } => match (image_path, render_error) {
                (Some(image), _) => format!(
                    "Mermaid code saved to {}\nDiagram saved to {}",
                    code_path.display(),
                    image.display()
                ),
                (None, Some(err)) => format!(
                    "Mermaid code saved to {}\n{}",
                    code_path.display(),
                    err
                ),
                (None, None) => format!("Mermaid code saved to {}", code_path.display()),
            },
        }
    }
}
