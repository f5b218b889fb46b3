//! Extraction client: one chat completion per entity.

use chat_client::{ChatRequest, ChatResponse, Message};
use tracing::{debug, error};

use crate::pipeline::prompts::format_extraction_prompt;
use crate::pipeline::template::Template;
use crate::traits::completer::Completer;
use crate::types::config::ExtractionConfig;
use crate::types::outcome::{ExtractionFailure, ExtractionOutcome};

/// Sends extraction prompts to a [`Completer`].
pub struct Extractor<C> {
    completer: C,
    config: ExtractionConfig,
}

impl<C: Completer> Extractor<C> {
    /// Create an extractor with default settings.
    pub fn new(completer: C) -> Self {
        Self::with_config(completer, ExtractionConfig::default())
    }

    pub fn with_config(completer: C, config: ExtractionConfig) -> Self {
        Self { completer, config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn completer(&self) -> &C {
        &self.completer
    }

    /// The chat request sent for one entity.
    pub fn build_request(&self, template: &Template, entity: &str, snippet: &str) -> ChatRequest {
        let prompt = format_extraction_prompt(template, entity, snippet);

        ChatRequest::new(&self.config.model)
            .message(Message::system(&self.config.system_prompt))
            .message(Message::user(prompt))
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .top_p(self.config.top_p)
    }

    /// Extract the value the template asks for from `snippet`.
    ///
    /// Never fails: every problem becomes an [`ExtractionFailure`].
    /// A blank snippet short-circuits without calling the model.
    pub async fn extract(&self, entity: &str, snippet: &str, template: &Template) -> ExtractionOutcome {
        if snippet.trim().is_empty() {
            return ExtractionFailure::EmptySnippet.into();
        }

        debug!(entity, snippet, "Search snippet for entity");

        let request = self.build_request(template, entity, snippet);
        debug!(
            entity,
            prompt = request.user_content().unwrap_or_default(),
            "Prompt sent to completion API"
        );

        match self.completer.complete(&request).await {
            Ok(response) => {
                debug!(entity, choices = response.choices.len(), "Completion API response");
                classify_response(&response)
            }
            Err(e) => {
                error!(
                    entity,
                    error = %e,
                    timeout = e.is_timeout(),
                    "Error during completion API call"
                );
                ExtractionFailure::Api(e.to_string()).into()
            }
        }
    }
}

/// Map a completion response to an outcome.
pub fn classify_response(response: &ChatResponse) -> ExtractionOutcome {
    let Some(choice) = response.first_choice() else {
        return ExtractionFailure::EmptyResponse.into();
    };

    match choice.message.content.as_deref() {
        Some(content) if !content.trim().is_empty() => {
            ExtractionOutcome::Extracted(content.to_string())
        }
        _ => ExtractionFailure::EmptyContent.into(),
    }
}
