use super::definitions::{
    definition_for, tool_name, validate_arguments, GENERATE_COVER_LETTER, GENERATE_GOOGLE_DOC,
    GENERATE_MERMAID_DIAGRAM,
};
use crate::generators::{
    generate_cover_letter, generate_google_doc, generate_mermaid_diagram, CoverLetterRequest,
    DiagramRequest, GoogleDocRequest, Toolbox,
};
use crate::models::{Artifact, ArtifactKind, ProposalState};
use serde_json::Value;

/// A validated call to one of the three generators.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolRequest {
    GenerateCoverLetter(CoverLetterRequest),
    GenerateGoogleDoc(GoogleDocRequest),
    GenerateMermaidDiagram(DiagramRequest),
}

impl ToolRequest {
    /// Check the arguments against the tool's schema and decode them.
    pub fn parse(name: &str, arguments: &Value) -> Result<Self, String> {
        let definition = definition_for(name).ok_or_else(|| format!("Tool '{}' not found", name))?;
        validate_arguments(&definition, arguments)?;

        let decode_error = |e: serde_json::Error| format!("Invalid arguments for '{}': {}", name, e);
        match definition.name {
            GENERATE_COVER_LETTER => serde_json::from_value(arguments.clone())
                .map(ToolRequest::GenerateCoverLetter)
                .map_err(decode_error),
            GENERATE_GOOGLE_DOC => serde_json::from_value(arguments.clone())
                .map(ToolRequest::GenerateGoogleDoc)
                .map_err(decode_error),
            GENERATE_MERMAID_DIAGRAM => serde_json::from_value(arguments.clone())
                .map(ToolRequest::GenerateMermaidDiagram)
                .map_err(decode_error),
            other => Err(format!("Tool '{}' not found", other)),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            ToolRequest::GenerateCoverLetter(_) => ArtifactKind::CoverLetter,
            ToolRequest::GenerateGoogleDoc(_) => ArtifactKind::GoogleDoc,
            ToolRequest::GenerateMermaidDiagram(_) => ArtifactKind::Diagram,
        }
    }

    pub fn name(&self) -> &'static str {
        tool_name(self.kind())
    }

    /// Arguments as the JSON object a model would have sent.
    pub fn arguments(&self) -> Value {
        let encoded = match self {
            ToolRequest::GenerateCoverLetter(request) => serde_json::to_value(request),
            ToolRequest::GenerateGoogleDoc(request) => serde_json::to_value(request),
            ToolRequest::GenerateMermaidDiagram(request) => serde_json::to_value(request),
        };
        encoded.unwrap_or(Value::Null)
    }
}

/// What a tool call produced, ready to be appended as a tool message.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub content: String,
    pub artifact: Option<Artifact>,
}

impl ToolOutcome {
    pub fn failure(message: impl std::fmt::Display) -> Self {
        Self {
            content: format!("Error: {}", message),
            artifact: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.artifact.is_none()
    }
}

/// Run one tool and fold its artifact into the session.
///
/// Failures never escape: they come back as an `Error: ...` outcome and the
/// session is left untouched.
pub async fn execute_tool(
    toolbox: &Toolbox,
    state: &mut ProposalState,
    request: &ToolRequest,
) -> ToolOutcome {
    let result = match request {
        ToolRequest::GenerateCoverLetter(args) => generate_cover_letter(toolbox, state, args).await,
        ToolRequest::GenerateGoogleDoc(args) => generate_google_doc(toolbox, state, args).await,
        ToolRequest::GenerateMermaidDiagram(args) => {
            generate_mermaid_diagram(toolbox, state, args).await
        }
    };

    match result {
        Ok(artifact) => {
            state.apply(&artifact);
            ToolOutcome {
                content: artifact.tool_output(),
                artifact: Some(artifact),
            }
        }
        Err(e) => ToolOutcome::failure(e),
    }
}
