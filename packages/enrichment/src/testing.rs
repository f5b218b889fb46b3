//! Testing utilities including mock implementations.
//!
//! Useful for exercising the enrichment pipeline without making real
//! search or LLM calls.

use std::sync::RwLock;

use async_trait::async_trait;
use chat_client::{ChatChoice, ChatError, ChatRequest, ChatResponse, ChoiceMessage, Role};

use crate::traits::completer::Completer;

pub use crate::traits::searcher::MockWebSearcher;

/// What the mock completer answers.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A single choice with this content.
    Content(String),
    /// A single choice whose content is null.
    NullContent,
    /// No choices at all.
    NoChoices,
    /// The call fails with a network error carrying this message.
    NetworkError(String),
}

impl MockReply {
    fn to_response(&self) -> chat_client::Result<ChatResponse> {
        match self {
            MockReply::Content(content) => Ok(ChatResponse::with_content(content.clone())),
            MockReply::NullContent => Ok(ChatResponse {
                choices: vec![ChatChoice {
                    index: 0,
                    message: ChoiceMessage {
                        role: Some(Role::Assistant),
                        content: None,
                    },
                    finish_reason: Some("stop".to_string()),
                }],
                ..Default::default()
            }),
            MockReply::NoChoices => Ok(ChatResponse::default()),
            MockReply::NetworkError(message) => Err(ChatError::Network(message.clone())),
        }
    }
}

/// A mock chat completer for testing.
///
/// Replies are chosen by the first rule whose needle occurs in the user
/// prompt; otherwise the default reply (no choices, unless configured).
/// Every request is recorded for assertions.
#[derive(Default)]
pub struct MockCompleter {
    rules: RwLock<Vec<(String, MockReply)>>,
    default: RwLock<Option<MockReply>>,
    requests: RwLock<Vec<ChatRequest>>,
}

impl MockCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply used when no rule matches.
    pub fn with_default(self, reply: MockReply) -> Self {
        *self.default.write().unwrap() = Some(reply);
        self
    }

    /// Answer every unmatched request with `content`.
    pub fn with_default_content(self, content: impl Into<String>) -> Self {
        self.with_default(MockReply::Content(content.into()))
    }

    /// Reply with `reply` when the user prompt contains `needle`.
    pub fn with_reply_containing(self, needle: impl Into<String>, reply: MockReply) -> Self {
        self.rules.write().unwrap().push((needle.into(), reply));
        self
    }

    /// Answer with `content` when the user prompt contains `needle`.
    pub fn with_content_containing(
        self,
        needle: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.with_reply_containing(needle, MockReply::Content(content.into()))
    }

    /// Fail with a network error when the user prompt contains `needle`.
    pub fn with_error_containing(
        self,
        needle: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.with_reply_containing(needle, MockReply::NetworkError(message.into()))
    }

    /// All requests received, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.read().unwrap().clone()
    }

    /// User prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.user_content().map(str::to_string))
            .collect()
    }

    fn reply_for(&self, request: &ChatRequest) -> MockReply {
        let prompt = request.user_content().unwrap_or_default();
        self.rules
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.default.read().unwrap().clone())
            .unwrap_or(MockReply::NoChoices)
    }
}

#[async_trait]
impl Completer for MockCompleter {
    async fn complete(&self, request: &ChatRequest) -> chat_client::Result<ChatResponse> {
        self.requests.write().unwrap().push(request.clone());
        self.reply_for(request).to_response()
    }
}
