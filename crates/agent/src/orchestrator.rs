//! The conversation orchestration loop.
//!
//! One `handle_turn` call takes the user's latest utterance (already
//! pushed onto the conversation), rebuilds the system context, and runs
//! the model/tool loop until the model produces plain text or the round
//! cap fires. It never returns an error: every failure mode degrades to
//! a user-facing `TurnOutcome`.

use daybook_core::format::format_today;
use daybook_core::message::{Conversation, Message, Role};
use daybook_core::provider::{Provider, ProviderRequest};
use daybook_core::store::RecordStore;
use daybook_core::tool::{ToolCall, ToolRegistry};
use daybook_core::{local_day_key, Error};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::guide::GuideCache;

/// Shown when no provider is wired up (missing API key).
pub const NOT_CONFIGURED_TEXT: &str =
    "I'm not set up yet. Add an API key to ~/.daybook/config.toml (or set \
     DAYBOOK_API_KEY) and try again.";

/// Shown when the turn dies on an unexpected error.
const APOLOGY_TEXT: &str =
    "Sorry, something went wrong while processing that. Please try again.";

/// Shown when the round cap fires and no assistant text was produced.
const ROUND_CAP_TEXT: &str =
    "I wasn't able to finish working through that. Could you rephrase or break it up?";

/// The result of one conversational turn. Always usable as a reply.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The text to show the user
    pub text: String,

    /// False when the turn degraded (misconfiguration or internal error)
    pub success: bool,

    /// Diagnostic detail for logs/debug surfaces; never shown raw to users
    pub error_detail: Option<String>,
}

impl TurnOutcome {
    fn reply(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
            error_detail: None,
        }
    }

    fn degraded(text: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
            error_detail: Some(detail.into()),
        }
    }
}

/// The day-log conversation orchestrator.
pub struct DayLogAgent {
    /// The LLM provider; None means the app is not configured
    provider: Option<Arc<dyn Provider>>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// The fixed tool catalog
    tools: Arc<ToolRegistry>,

    /// Record store, read here for the today-snapshot in the context
    store: Arc<dyn RecordStore>,

    /// The tracked subject's name
    subject: String,

    /// Cached reference guide
    guide: Arc<GuideCache>,

    /// Maximum model rounds per turn
    max_rounds: u32,
}

impl DayLogAgent {
    pub fn new(
        provider: Option<Arc<dyn Provider>>,
        model: impl Into<String>,
        tools: Arc<ToolRegistry>,
        store: Arc<dyn RecordStore>,
        subject: impl Into<String>,
        guide: Arc<GuideCache>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
            tools,
            store,
            subject: subject.into(),
            guide,
            max_rounds: 10,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the default max tokens per model response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set the maximum number of model rounds per turn.
    pub fn with_max_rounds(mut self, max: u32) -> Self {
        self.max_rounds = max;
        self
    }

    /// Build the system context: operating instructions, the reference
    /// guide, and a snapshot of today's record. Rebuilt every turn so
    /// the snapshot stays current.
    async fn build_system_context(&self) -> Result<String, Error> {
        let day_key = local_day_key();
        let today = self.store.get_or_create(&self.subject, &day_key).await?;
        let guide = self.guide.text().await;

        Ok(format!(
            "You are a helpful assistant that keeps {subject}'s daily sleep and \
             feeding log and answers questions about it.\n\
             \n\
             Use the update_record tool to record times and notes the user \
             mentions; batch all fields from one message into a single call. \
             Use the query_history tool to look up past days. Day keys are \
             YYYYMMDD strings; today's key is {day_key}. When you have nothing \
             left to record or look up, reply to the user in plain text. Keep \
             replies short and warm.\n\
             \n\
             ## Reference guide\n\
             {guide}\n\
             \n\
             ## Today's log\n\
             {today}",
            subject = self.subject,
            day_key = day_key,
            guide = guide,
            today = format_today(&today),
        ))
    }

    /// Process the user's latest message and produce a reply.
    ///
    /// Never fails: provider errors, store errors, and the round cap all
    /// collapse into a degraded-but-presentable `TurnOutcome`.
    pub async fn handle_turn(&self, conversation: &mut Conversation) -> TurnOutcome {
        let Some(provider) = self.provider.clone() else {
            info!("Turn received with no provider configured");
            return TurnOutcome::degraded(NOT_CONFIGURED_TEXT, "no provider configured");
        };

        match self.run_turn(provider, conversation).await {
            Ok(text) => TurnOutcome::reply(text),
            Err(e) => {
                warn!(error = %e, "Turn failed");
                TurnOutcome::degraded(APOLOGY_TEXT, e.to_string())
            }
        }
    }

    async fn run_turn(
        &self,
        provider: Arc<dyn Provider>,
        conversation: &mut Conversation,
    ) -> Result<String, Error> {
        let system_context = self.build_system_context().await?;

        // The system message is always the first message, refreshed in place.
        if conversation.messages.first().map(|m| m.role) == Some(Role::System) {
            conversation.messages[0] = Message::system(&system_context);
        } else {
            conversation.messages.insert(0, Message::system(&system_context));
        }

        let tool_definitions = self.tools.definitions();

        // Best partial answer from this turn only: assistant text that
        // arrived alongside tool calls. Prior turns' replies never qualify.
        let mut partial: Option<String> = None;

        for round in 1..=self.max_rounds {
            debug!(round, messages = conversation.messages.len(), "Model round");

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: conversation.messages.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            let response = provider.complete(request).await?;

            if response.message.tool_calls.is_empty() {
                let text = response.message.content.clone();
                conversation.push(response.message);
                return Ok(text);
            }

            if !response.message.content.is_empty() {
                partial = Some(response.message.content.clone());
            }

            // The assistant message goes into history verbatim, tool calls
            // and all, so the transcript the model sees next round is valid.
            let tool_calls = response.message.tool_calls.clone();
            conversation.push(response.message);

            for tc in &tool_calls {
                let call = ToolCall {
                    id: tc.id.clone(),
                    name: tc.name.clone(),
                    arguments: serde_json::from_str(&tc.arguments).unwrap_or_default(),
                };

                match self.tools.execute(&call).await {
                    Ok(result) => {
                        debug!(tool = %tc.name, success = result.success, "Tool executed");
                        conversation.push(Message::tool_result(&tc.id, &result.output));
                    }
                    Err(e) => {
                        // Unknown tools and argument errors are reported back
                        // to the model rather than aborting the turn.
                        warn!(tool = %tc.name, error = %e, "Tool dispatch failed");
                        conversation.push(Message::tool_result(&tc.id, format!("Error: {e}")));
                    }
                }
            }
        }

        warn!(max_rounds = self.max_rounds, "Round cap reached");
        Ok(partial.unwrap_or_else(|| ROUND_CAP_TEXT.to_string()))
    }
}
