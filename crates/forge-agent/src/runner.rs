//! Running agents against a remote model
//!
//! [`OpenAiRunner`] talks to the OpenAI Responses API. A run is a loop:
//! send the prompt, and while the model answers with computer actions,
//! apply them, send back a screenshot and continue from the previous
//! response. The first response without actions ends the run.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::computer::{self, ComputerAction};
use crate::{Agent, AgentError, Computer, Result, Tool, TracingComputer};

/// Final result of one agent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Text of the last model message
    pub final_output: String,
    /// Number of model requests the run took
    pub turns: usize,
}

/// Executes an agent on a prompt.
pub trait Runner {
    fn run(&self, agent: &Agent, input: &str) -> Result<RunResult>;
}

/// Connection settings for [`OpenAiRunner`].
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// API base, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub api_key: String,
    pub max_turns: usize,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct ResponseRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: Value,
    tools: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_response_id: Option<&'a str>,
    truncation: &'static str,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    id: String,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    ComputerCall {
        call_id: String,
        action: ComputerAction,
        #[serde(default)]
        pending_safety_checks: Vec<Value>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl ResponseBody {
    fn output_text(&self) -> String {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::Message { content } => Some(content),
                _ => None,
            })
            .flatten()
            .filter_map(|part| match part {
                ContentPart::OutputText { text } => Some(text.as_str()),
                ContentPart::Other => None,
            })
            .collect()
    }
}

/// Runner backed by the OpenAI Responses API.
pub struct OpenAiRunner {
    client: Client,
    endpoint: String,
    api_key: String,
    max_turns: usize,
    computer: Box<dyn Computer>,
}

impl OpenAiRunner {
    /// Create a runner that drives [`TracingComputer`] for computer actions.
    pub fn new(config: RunnerConfig) -> Result<Self> {
        Self::with_computer(config, Box::new(TracingComputer))
    }

    pub fn with_computer(config: RunnerConfig, computer: Box<dyn Computer>) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/responses", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            max_turns: config.max_turns.max(1),
            computer,
        })
    }

    fn tool_declarations(&self, agent: &Agent) -> Vec<Value> {
        agent
            .tools
            .iter()
            .map(|tool| match tool {
                Tool::WebSearch => json!({ "type": "web_search_preview" }),
                Tool::Computer => {
                    let (width, height) = self.computer.dimensions();
                    json!({
                        "type": "computer_use_preview",
                        "display_width": width,
                        "display_height": height,
                        "environment": self.computer.environment().as_str(),
                    })
                }
            })
            .collect()
    }

    fn create_response(
        &self,
        agent: &Agent,
        input: Value,
        previous_response_id: Option<&str>,
    ) -> Result<ResponseBody> {
        let request = ResponseRequest {
            model: &agent.model,
            instructions: &agent.instructions,
            input,
            tools: self.tool_declarations(agent),
            previous_response_id,
            truncation: "auto",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json()?)
    }

    fn screenshot_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            STANDARD.encode(self.computer.screenshot())
        )
    }
}

impl Runner for OpenAiRunner {
    fn run(&self, agent: &Agent, input: &str) -> Result<RunResult> {
        tracing::debug!(agent = %agent.name, model = %agent.model, "Starting agent run");

        let mut next_input = Value::String(input.to_string());
        let mut previous: Option<String> = None;

        for turn in 1..=self.max_turns {
            let response = self.create_response(agent, next_input, previous.as_deref())?;

            let mut outputs = Vec::new();
            for item in &response.output {
                if let OutputItem::ComputerCall {
                    call_id,
                    action,
                    pending_safety_checks,
                } = item
                {
                    if !agent.has_tool(Tool::Computer) {
                        return Err(AgentError::ToolNotEnabled {
                            agent: agent.name.clone(),
                            tool: Tool::Computer.to_string(),
                        });
                    }
                    computer::dispatch(self.computer.as_ref(), action);
                    outputs.push(json!({
                        "type": "computer_call_output",
                        "call_id": call_id,
                        "acknowledged_safety_checks": pending_safety_checks,
                        "output": {
                            "type": "computer_screenshot",
                            "image_url": self.screenshot_url(),
                        },
                    }));
                }
            }

            if outputs.is_empty() {
                tracing::debug!(agent = %agent.name, turns = turn, "Agent run finished");
                return Ok(RunResult {
                    final_output: response.output_text(),
                    turns: turn,
                });
            }

            next_input = Value::Array(outputs);
            previous = Some(response.id);
        }

        Err(AgentError::MaxTurnsExceeded {
            agent: agent.name.clone(),
            max_turns: self.max_turns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_text_joins_message_parts() {
        let body: ResponseBody = serde_json::from_str(
            r#"{
                "id": "resp_1",
                "output": [
                    {"type": "reasoning", "summary": []},
                    {"type": "message", "content": [
                        {"type": "output_text", "text": "Hello, "},
                        {"type": "refusal", "refusal": "no"},
                        {"type": "output_text", "text": "world"}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(body.output_text(), "Hello, world");
    }

    #[test]
    fn test_output_text_empty_without_messages() {
        let body: ResponseBody = serde_json::from_str(r#"{"id": "resp_2"}"#).unwrap();
        assert_eq!(body.output_text(), "");
    }
}
