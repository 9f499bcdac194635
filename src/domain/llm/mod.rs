//! Chat completion domain models and traits

mod message;
mod provider;
mod request;
mod response;

pub use message::{Message, MessageRole};
pub use provider::{completion_fn, FnProvider, LlmProvider};
pub use request::{LlmRequest, LlmRequestBuilder, NO_PROMPT_PROVIDED};
pub use response::{Choice, FinishReason, LlmResponse, Usage};

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
