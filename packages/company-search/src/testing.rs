//! Testing utilities including a scripted model.
//!
//! Useful for exercising the resolver, the session and anything built on
//! them without network calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{ResolveError, Result};
use crate::traits::model::ModelClient;

/// One scripted model outcome.
#[derive(Debug, Clone)]
pub struct MockReply {
    outcome: std::result::Result<String, ResolveError>,
    delay: Option<Duration>,
}

impl MockReply {
    /// Reply with raw model text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            delay: None,
        }
    }

    /// Fail with the given error.
    pub fn fail(error: ResolveError) -> Self {
        Self {
            outcome: Err(error),
            delay: None,
        }
    }

    /// Sleep before answering (tokio time, so paused clocks apply).
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A mock model with scripted replies.
///
/// Replies keyed on a prompt fragment take precedence. Otherwise queued
/// replies are consumed in order and the last one repeats. With nothing
/// scripted every call fails with `ModelEmptyResponse`.
#[derive(Default)]
pub struct MockModel {
    /// Replies by prompt fragment
    keyed: Arc<RwLock<Vec<(String, MockReply)>>>,

    /// Replies in call order
    queue: Arc<RwLock<VecDeque<MockReply>>>,

    unconfigured: bool,

    /// Prompts received, for assertions
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A model that reports no credential.
    pub fn unconfigured() -> Self {
        Self {
            unconfigured: true,
            ..Default::default()
        }
    }

    /// Queue a reply.
    pub fn with_reply(self, reply: MockReply) -> Self {
        self.queue.write().unwrap().push_back(reply);
        self
    }

    /// Answer every prompt containing `fragment` with `reply`.
    pub fn with_reply_for(self, fragment: impl Into<String>, reply: MockReply) -> Self {
        self.keyed.write().unwrap().push((fragment.into(), reply));
        self
    }

    /// Prompts received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn next_reply(&self, prompt: &str) -> Option<MockReply> {
        let keyed = self.keyed.read().unwrap();
        if let Some((_, reply)) = keyed.iter().find(|(fragment, _)| prompt.contains(fragment.as_str())) {
            return Some(reply.clone());
        }
        drop(keyed);

        let mut queue = self.queue.write().unwrap();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl ModelClient for MockModel {
    fn is_configured(&self) -> bool {
        !self.unconfigured
    }

    async fn invoke(&self, prompt: &str) -> Result<String> {
        if self.unconfigured {
            return Err(ResolveError::ModelUnavailable);
        }

        self.calls.write().unwrap().push(prompt.to_string());

        let Some(reply) = self.next_reply(prompt) else {
            return Err(ResolveError::ModelEmptyResponse);
        };

        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        reply.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_then_repeat_last() {
        let model = MockModel::new()
            .with_reply(MockReply::text("first"))
            .with_reply(MockReply::fail(ResolveError::NoJsonFound));

        assert_eq!(model.invoke("a").await, Ok("first".to_string()));
        assert_eq!(model.invoke("b").await, Err(ResolveError::NoJsonFound));
        assert_eq!(model.invoke("c").await, Err(ResolveError::NoJsonFound));
        assert_eq!(model.calls(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_keyed_replies_win() {
        let model = MockModel::new()
            .with_reply(MockReply::text("queued"))
            .with_reply_for("india", MockReply::text("keyed"));

        assert_eq!(model.invoke("companies in india").await, Ok("keyed".to_string()));
        assert_eq!(model.invoke("anything").await, Ok("queued".to_string()));
    }

    #[tokio::test]
    async fn test_unscripted_and_unconfigured() {
        assert_eq!(
            MockModel::new().invoke("x").await,
            Err(ResolveError::ModelEmptyResponse)
        );

        let model = MockModel::unconfigured();
        assert!(!model.is_configured());
        assert_eq!(model.invoke("x").await, Err(ResolveError::ModelUnavailable));
        assert_eq!(model.call_count(), 0);
    }
}
