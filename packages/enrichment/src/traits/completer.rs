//! Chat completion seam.
//!
//! The extraction client talks to the model through this trait so that a
//! configured [`ChatClient`] can be swapped for a test double.

use async_trait::async_trait;
use chat_client::{ChatClient, ChatRequest, ChatResponse};

/// Anything that can answer a chat completion request.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> chat_client::Result<ChatResponse>;
}

#[async_trait]
impl Completer for ChatClient {
    async fn complete(&self, request: &ChatRequest) -> chat_client::Result<ChatResponse> {
        self.chat_completion(request).await
    }
}

#[async_trait]
impl<T: Completer + ?Sized> Completer for std::sync::Arc<T> {
    async fn complete(&self, request: &ChatRequest) -> chat_client::Result<ChatResponse> {
        (**self).complete(request).await
    }
}
