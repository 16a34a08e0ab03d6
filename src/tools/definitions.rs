use crate::models::ArtifactKind;
use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Value};

pub const GENERATE_COVER_LETTER: &str = "generate_cover_letter";
pub const GENERATE_GOOGLE_DOC: &str = "generate_google_doc_proposal";
pub const GENERATE_MERMAID_DIAGRAM: &str = "generate_mermaid_diagram";

pub struct ToolDefinition {
    pub name: &'static str,
    pub kind: ArtifactKind,
    pub description: &'static str,
    pub input_schema: Value,
}

/// The closed set of tools the orchestrator may call.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GENERATE_COVER_LETTER,
            kind: ArtifactKind::CoverLetter,
            description: "Generates a customized Upwork cover letter from a job description. Also refines the previously generated cover letter when given a change request.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "job_description": {
                        "type": "string",
                        "description": "The job description from the Upwork posting."
                    },
                    "change_request": {
                        "type": "string",
                        "description": "The changes the user asked for, when revising."
                    }
                },
                "required": ["job_description"],
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: GENERATE_GOOGLE_DOC,
            kind: ArtifactKind::GoogleDoc,
            description: "Generates a full, detailed proposal in a Google Doc and returns a public link. Slow and expensive. Can regenerate the document from a change request.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "job_description": {
                        "type": "string",
                        "description": "The job description from the Upwork posting."
                    },
                    "change_request": {
                        "type": "string",
                        "description": "The changes the user asked for, when revising."
                    }
                },
                "required": ["job_description"],
                "additionalProperties": false
            }),
        },
        ToolDefinition {
            name: GENERATE_MERMAID_DIAGRAM,
            kind: ArtifactKind::Diagram,
            description: "Generates a Mermaid diagram from a description of the proposed workflow, saves the code and renders a PNG. Returns the image path or an error.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "workflow_description": {
                        "type": "string",
                        "description": "Natural language description of the workflow to visualize, usually the Google Doc proposal text."
                    },
                    "change_request": {
                        "type": "string",
                        "description": "The changes the user asked for, when revising."
                    }
                },
                "required": ["workflow_description"],
                "additionalProperties": false
            }),
        },
    ]
}

pub fn definition_for(name: &str) -> Option<ToolDefinition> {
    tool_definitions().into_iter().find(|tool| tool.name == name)
}

pub fn tool_name(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::CoverLetter => GENERATE_COVER_LETTER,
        ArtifactKind::GoogleDoc => GENERATE_GOOGLE_DOC,
        ArtifactKind::Diagram => GENERATE_MERMAID_DIAGRAM,
    }
}

/// Function-calling entries in the OpenAI `tools` format.
pub fn format_tools_for_llm(tools: &[ToolDefinition]) -> Vec<Value> {
    tools
        .iter()
        .map(|tool| {
            json!({
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.input_schema,
                }
            })
        })
        .collect()
}

pub fn validate_arguments(tool: &ToolDefinition, arguments: &Value) -> Result<(), String> {
    let schema = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&tool.input_schema)
        .map_err(|e| format!("Invalid tool schema: {}", e))?;

    if let Err(errors) = schema.validate(arguments) {
        let error_messages: Vec<String> = errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();
        return Err(error_messages.join("; "));
    }

    Ok(())
}
