use crate::api::response::{extract_content, parse_tool_calls};
use crate::api::ChatRequest;
use crate::config::{default_max_tool_rounds, Config, ModelSpec, RoutingMode};
use crate::error::Result;
use crate::generators::Toolbox;
use crate::models::{ensure_system_preamble, ArtifactKind, Message, ProposalState, ToolCall};
use crate::prompts::ORCHESTRATOR_SYSTEM_PROMPT;
use crate::routing::{classify, compose_reply, request_for};
use crate::tools::{
    execute_tool, format_tools_for_llm, tool_definitions, ToolOutcome, ToolRequest,
};
use crate::ui::{display_tool_call, display_tool_error, display_tool_result};
use colored::*;
use serde_json::Value;
use uuid::Uuid;

/// Drives one user turn: route, run tools, fold results into the session,
/// and produce the reply.
pub struct Orchestrator {
    toolbox: Toolbox,
    router_model: ModelSpec,
    routing: RoutingMode,
    max_tool_rounds: usize,
    verbose: bool,
}

impl Orchestrator {
    pub fn new(toolbox: Toolbox, router_model: ModelSpec, routing: RoutingMode) -> Self {
        Self {
            verbose: toolbox.verbose,
            toolbox,
            router_model,
            routing,
            max_tool_rounds: default_max_tool_rounds(),
        }
    }

    pub fn from_config(toolbox: Toolbox, config: &Config) -> Self {
        Self::new(toolbox, config.models.orchestrator.clone(), config.routing)
            .with_max_tool_rounds(config.max_tool_rounds)
    }

    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds.max(1);
        self
    }

    pub fn routing(&self) -> RoutingMode {
        self.routing
    }

    /// Handle one user message and return the reply shown to the user.
    ///
    /// Tool failures are reported inside the conversation; only a failure of
    /// the routing model itself is returned as an error.
    pub async fn run_turn(&self, state: &mut ProposalState, user_text: &str) -> Result<String> {
        state.messages.push(Message::user(user_text));
        ensure_system_preamble(&mut state.messages, ORCHESTRATOR_SYSTEM_PROMPT);

        let reply = match self.routing {
            RoutingMode::Model => self.run_model_routed(state).await?,
            RoutingMode::Rules => self.run_rule_routed(state, user_text).await,
        };

        state.touch();
        Ok(reply)
    }

    async fn run_model_routed(&self, state: &mut ProposalState) -> Result<String> {
        let tools = format_tools_for_llm(&tool_definitions());

        for round in 0..self.max_tool_rounds {
            let request =
                ChatRequest::new(&self.router_model, state.messages.clone()).with_tools(tools.clone());

            if self.verbose {
                eprintln!(
                    "{}",
                    format!("[AI] Routing round {} with model {}", round + 1, self.router_model.name)
                        .dimmed()
                );
            }

            let response = self.toolbox.model.complete(&request).await?;

            let tool_calls = match parse_tool_calls(&response)? {
                Some(calls) => calls,
                None => {
                    let content = extract_content(&response)?.unwrap_or_else(|| {
                        if self.verbose {
                            eprintln!(
                                "{}",
                                "[AI] tool_calls array is empty and no content provided.".dimmed()
                            );
                        }
                        "No tool calls and no content in response".to_string()
                    });
                    state.messages.push(Message::assistant(content.clone()));
                    return Ok(content);
                }
            };

            let assistant_text = extract_content(&response)?;
            if !self.execute_tool_calls(state, assistant_text, &tool_calls).await {
                // Nothing was appended, so another round would resend the same history
                let notice = "Error: the model requested tools without call ids; no tool was run."
                    .to_string();
                state.messages.push(Message::assistant(notice.clone()));
                return Ok(notice);
            }
        }

        let notice = format!(
            "Stopped after {} tool rounds without a final answer. Ask again to continue.",
            self.max_tool_rounds
        );
        state.messages.push(Message::assistant(notice.clone()));
        Ok(notice)
    }

    /// Append the assistant's tool-call message and one tool message per call.
    /// Returns false when no call carried an id and nothing was appended.
    async fn execute_tool_calls(
        &self,
        state: &mut ProposalState,
        assistant_text: Option<String>,
        tool_calls: &[Value],
    ) -> bool {
        let mut accepted = Vec::new();
        let mut results = Vec::new();

        for tool_call in tool_calls {
            // Without an id there is nothing a tool message could answer
            let Some(id) = tool_call.get("id").and_then(|i| i.as_str()) else {
                eprintln!("{}", "Warning: Tool call missing 'id' field, skipping".yellow());
                continue;
            };

            let function = tool_call.get("function");
            let name = function
                .and_then(|f| f.get("name"))
                .and_then(|n| n.as_str())
                .unwrap_or_default();
            let arguments_str = function
                .and_then(|f| f.get("arguments"))
                .and_then(|a| a.as_str())
                .unwrap_or_default();

            accepted.push(ToolCall::function(id, name, arguments_str.to_string()));

            let content = if name.is_empty() {
                let error_text = format!("Error: Tool call {} missing required 'function.name' field", id);
                display_tool_error("unknown", &error_text);
                error_text
            } else {
                self.run_raw_tool_call(state, name, arguments_str).await
            };

            results.push(Message::tool_result(id, content));
        }

        if accepted.is_empty() {
            return false;
        }

        state
            .messages
            .push(Message::assistant_tool_calls(assistant_text, accepted));
        state.messages.extend(results);
        true
    }

    async fn run_raw_tool_call(&self, state: &mut ProposalState, name: &str, arguments_str: &str) -> String {
        if self.verbose {
            let args_preview: String = arguments_str.chars().take(100).collect();
            eprintln!(
                "{}",
                format!("[tools] Selected tool: '{}' with args: {}", name, args_preview).dimmed()
            );
        }

        let arguments = match serde_json::from_str::<Value>(arguments_str) {
            Ok(arguments) => arguments,
            Err(err) => {
                let error_text =
                    format!("Error: failed to parse arguments for tool '{}': {}", name, err);
                display_tool_error(name, &error_text);
                return error_text;
            }
        };

        match ToolRequest::parse(name, &arguments) {
            Ok(request) => self.run_tool(state, &request).await.content,
            Err(e) => {
                let error_text = format!("Error: {}", e);
                display_tool_error(name, &error_text);
                error_text
            }
        }
    }

    async fn run_tool(&self, state: &mut ProposalState, request: &ToolRequest) -> ToolOutcome {
        display_tool_call(request.name());
        let outcome = execute_tool(&self.toolbox, state, request).await;
        if outcome.is_error() {
            display_tool_error(request.name(), &outcome.content);
        } else {
            display_tool_result(request.name(), &outcome.content);
        }
        outcome
    }

    async fn run_rule_routed(&self, state: &mut ProposalState, user_text: &str) -> String {
        let intent = classify(state, user_text);
        if self.verbose {
            eprintln!("{}", format!("[AI] Rule routing: {:?}", intent).dimmed());
        }

        let mut outcomes: Vec<(ArtifactKind, ToolOutcome)> = Vec::new();
        for kind in intent.steps() {
            let request = request_for(kind, state, intent.change_request());
            let call_id = format!("call_{}", Uuid::new_v4().simple());

            state.messages.push(Message::assistant_tool_calls(
                None,
                vec![ToolCall::function(
                    call_id.clone(),
                    request.name(),
                    request.arguments().to_string(),
                )],
            ));

            let outcome = self.run_tool(state, &request).await;
            state
                .messages
                .push(Message::tool_result(call_id, outcome.content.clone()));
            outcomes.push((kind, outcome));
        }

        let reply = compose_reply(state, &outcomes);
        state.messages.push(Message::assistant(reply.clone()));
        reply
    }
}
