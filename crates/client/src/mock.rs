//! Mock hub client for deterministic testing.
//!
//! Serves pre-configured pull results and records every request without
//! making any HTTP calls.

use crate::client::{HubClient, PulledPrompt, PushRequest, QualifiedName};
use prompthub_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A pre-configured pull outcome.
#[derive(Debug, Clone)]
enum MockPull {
    Prompt(PulledPrompt),
    Error(String),
}

/// In-memory `HubClient`.
///
/// # Example
/// ```
/// use prompthub_client::{MockHubClient, PulledPrompt};
/// let client = MockHubClient::new().with_pull(PulledPrompt::default());
/// ```
#[derive(Debug, Clone)]
pub struct MockHubClient {
    pulls: Arc<Mutex<VecDeque<MockPull>>>,
    push_error: Option<String>,
    push_url: String,
    /// Names passed to `pull`, in call order
    pub pulled: Arc<Mutex<Vec<QualifiedName>>>,
    /// Requests passed to `push`, in call order
    pub pushed: Arc<Mutex<Vec<PushRequest>>>,
}

impl Default for MockHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHubClient {
    pub fn new() -> Self {
        Self {
            pulls: Arc::new(Mutex::new(VecDeque::new())),
            push_error: None,
            push_url: "https://hub.example/prompts/mock".to_string(),
            pulled: Arc::new(Mutex::new(Vec::new())),
            pushed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful pull.
    pub fn with_pull(self, prompt: PulledPrompt) -> Self {
        self.queue(MockPull::Prompt(prompt));
        self
    }

    /// Queue a failing pull.
    pub fn with_pull_error(self, error: &str) -> Self {
        self.queue(MockPull::Error(error.to_string()));
        self
    }

    /// Make every push fail with this error.
    pub fn with_push_error(mut self, error: &str) -> Self {
        self.push_error = Some(error.to_string());
        self
    }

    /// URL returned by successful pushes.
    pub fn with_push_url(mut self, url: &str) -> Self {
        self.push_url = url.to_string();
        self
    }

    /// Snapshot of recorded push requests.
    pub fn pushed_requests(&self) -> Vec<PushRequest> {
        self.pushed.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Snapshot of recorded pull names.
    pub fn pulled_names(&self) -> Vec<QualifiedName> {
        self.pulled.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn queue(&self, pull: MockPull) {
        if let Ok(mut pulls) = self.pulls.lock() {
            pulls.push_back(pull);
        }
    }

    fn lock_error() -> AppError {
        AppError::Remote("mock hub state poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl HubClient for MockHubClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn pull(&self, name: &QualifiedName) -> AppResult<PulledPrompt> {
        self.pulled
            .lock()
            .map_err(|_| Self::lock_error())?
            .push(name.clone());

        let next = self.pulls.lock().map_err(|_| Self::lock_error())?.pop_front();

        match next {
            Some(MockPull::Prompt(prompt)) => Ok(prompt),
            Some(MockPull::Error(error)) => Err(AppError::Remote(error)),
            None => Err(AppError::Remote(format!("Prompt {} not found on the hub", name))),
        }
    }

    async fn push(&self, request: &PushRequest) -> AppResult<String> {
        self.pushed
            .lock()
            .map_err(|_| Self::lock_error())?
            .push(request.clone());

        match &self.push_error {
            Some(error) => Err(AppError::Remote(error.clone())),
            None => Ok(self.push_url.clone()),
        }
    }
}
