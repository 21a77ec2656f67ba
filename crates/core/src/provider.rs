//! Provider trait — the abstraction over the LLM backend.
//!
//! A Provider knows how to send a conversation (plus the tool schemas)
//! to a model and get back either a final text answer or an assistant
//! message requesting tool calls. The orchestrator treats this as a
//! black box: messages + tool definitions in, one message out.

use crate::error::ProviderError;
use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gpt-4o")
    pub model: String,

    /// The conversation messages
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Available tools the model can call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A tool definition sent to the LLM so it knows what tools it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// A complete response from a provider.
///
/// If `message.tool_calls` is non-empty the model is requesting tool
/// execution; otherwise `message.content` is the final answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated assistant message
    pub message: Message,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// The orchestrator calls `complete()` without knowing which backend is
/// in use. Implementations live in `daybook-providers`; tests use
/// scripted doubles.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_request_defaults() {
        let req = ProviderRequest {
            model: "gpt-4o".into(),
            messages: vec![],
            temperature: default_temperature(),
            max_tokens: None,
            tools: vec![],
        };
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!(req.tools.is_empty());
    }

    #[test]
    fn tool_definition_serialization() {
        let tool = ToolDefinition {
            name: "query_history".into(),
            description: "Query past day logs".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "start_key": { "type": "string", "description": "Start date, YYYYMMDD" }
                },
                "required": ["start_key"]
            }),
        };
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("query_history"));
        assert!(json.contains("start_key"));
    }
}
