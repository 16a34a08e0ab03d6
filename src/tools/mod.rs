mod definitions;
mod dispatch;

pub use definitions::{
    definition_for, format_tools_for_llm, tool_definitions, tool_name, validate_arguments,
    ToolDefinition, GENERATE_COVER_LETTER, GENERATE_GOOGLE_DOC, GENERATE_MERMAID_DIAGRAM,
};
pub use dispatch::{execute_tool, ToolOutcome, ToolRequest};
