//! Effect traits for the outside world.
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `activities-web` (browser), `activities-testkit` (deterministic)
//! - **Usage**: [`crate::MutationClient`] (HTTP) and [`crate::Notifier`] (timers)
//!
//! Everything runs on a single-threaded event loop, so the traits are `?Send`
//! and timer tasks are plain `FnOnce` boxes.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Body text.
    pub body: String,
}

impl HttpResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport failure: no usable response was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The request could not be sent or was rejected by the runtime.
    #[error("{0}")]
    Request(String),
    /// The response arrived but its body could not be read as text.
    #[error("could not read response body: {0}")]
    Body(String),
}

/// Request/response transport.
#[async_trait(?Send)]
pub trait HttpEffects {
    /// `GET path`.
    async fn get(&self, path: &str) -> Result<HttpResponse, HttpError>;

    /// `POST path` with an empty body.
    async fn post(&self, path: &str) -> Result<HttpResponse, HttpError>;
}

/// Deferred work scheduled on the event loop.
pub type TimerTask = Box<dyn FnOnce()>;

/// One-shot timers.
pub trait TimerEffects {
    /// Run `task` once after `delay`. Tasks are never cancelled.
    fn schedule(&self, delay: Duration, task: TimerTask);
}
