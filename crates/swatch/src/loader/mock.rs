//! Mock fetcher for testing.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Result, SwatchError};

use super::fetcher::DocumentFetcher;

#[derive(Debug, Clone)]
enum Scripted {
    Body(String),
    Failure(String),
    Delayed(Duration, String),
}

/// Fetcher that answers from a script of per-locator responses.
///
/// Locators without a scripted response fail as unreachable. Every call is
/// recorded so tests can assert the order locators were tried in.
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Create a mock where every locator is unreachable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `locator` with `body`.
    pub fn with_body(mut self, locator: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .insert(locator.into(), Scripted::Body(body.into()));
        self
    }

    /// Fail `locator` with `message`.
    pub fn with_failure(mut self, locator: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .insert(locator.into(), Scripted::Failure(message.into()));
        self
    }

    /// Answer `locator` with `body` after `delay`.
    pub fn with_delay(
        mut self,
        locator: impl Into<String>,
        delay: Duration,
        body: impl Into<String>,
    ) -> Self {
        self.responses
            .insert(locator.into(), Scripted::Delayed(delay, body.into()));
        self
    }

    /// Locators requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, locator: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(locator.to_string());
        }

        let failure = |message: &str| SwatchError::Fetch {
            locator: locator.to_string(),
            message: message.to_string(),
        };

        match self.responses.get(locator) {
            Some(Scripted::Body(body)) => Ok(body.clone()),
            Some(Scripted::Failure(message)) => Err(failure(message)),
            Some(Scripted::Delayed(delay, body)) => {
                tokio::time::sleep(*delay).await;
                Ok(body.clone())
            }
            None => Err(failure("unreachable")),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
