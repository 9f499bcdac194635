use std::fmt::{self, Debug};
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for chat completion backends (OpenAI, a plain function, a monitored wrapper)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<P: LlmProvider + ?Sized> LlmProvider for Arc<P> {
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        (**self).chat(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

/// Adapts an async function into an [`LlmProvider`]
pub struct FnProvider<F> {
    name: &'static str,
    f: F,
}

/// Wrap a plain async completion function so it can be monitored.
///
/// ```ignore
/// let provider = completion_fn(|request: LlmRequest| async move { client.create(request).await });
/// ```
pub fn completion_fn<F, Fut>(f: F) -> FnProvider<F>
where
    F: Fn(LlmRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<LlmResponse, DomainError>> + Send + 'static,
{
    FnProvider { name: "function", f }
}

impl<F> FnProvider<F> {
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl<F> Debug for FnProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProvider")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> LlmProvider for FnProvider<F>
where
    F: Fn(LlmRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<LlmResponse, DomainError>> + Send + 'static,
{
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        (self.f)(request).await
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    pub struct MockLlmProvider {
        name: &'static str,
        response: Option<LlmResponse>,
        error: Option<String>,
        requests: Mutex<Vec<LlmRequest>>,
    }

    impl MockLlmProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                response: None,
                error: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_response(mut self, response: LlmResponse) -> Self {
            self.response = Some(response);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn requests(&self) -> Vec<LlmRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, DomainError> {
            self.requests.lock().unwrap().push(request);

            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            self.response
                .clone()
                .ok_or_else(|| DomainError::provider(self.name, "No mock response configured"))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }
}
