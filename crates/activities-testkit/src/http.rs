//! Scripted HTTP transport.
//!
//! Responses are queued per `(method, path)` and consumed in order. A gated
//! response stays pending until the test releases it, which is how tests
//! interleave overlapping requests on a single-threaded executor.

use activities_app::{HttpEffects, HttpError, HttpResponse};
use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// A request the transport saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Method.
    pub method: Method,
    /// Path including query.
    pub path: String,
}

type Reply = Result<HttpResponse, HttpError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct Script {
    queued: HashMap<(Method, String), VecDeque<Scripted>>,
    requests: Vec<RecordedRequest>,
}

/// Releases one gated response.
pub struct Gate {
    sender: oneshot::Sender<Reply>,
}

impl Gate {
    /// Complete the pending request with `status` and `body`.
    pub fn release(self, status: u16, body: &str) {
        let _ = self.sender.send(Ok(HttpResponse::new(status, body)));
    }

    /// Complete the pending request with a transport failure.
    pub fn fail(self, error: HttpError) {
        let _ = self.sender.send(Err(error));
    }
}

/// [`HttpEffects`] handler driven by a per-test script. Clones share state.
#[derive(Clone, Default)]
pub struct ScriptedHttp {
    inner: Rc<RefCell<Script>>,
}

impl ScriptedHttp {
    /// Empty script: every request fails with "no scripted response".
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, reply: Scripted) {
        self.inner
            .borrow_mut()
            .queued
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Queue a response for `GET path`.
    pub fn on_get(&self, path: &str, status: u16, body: &str) -> &Self {
        self.push(
            Method::Get,
            path,
            Scripted::Ready(Ok(HttpResponse::new(status, body))),
        );
        self
    }

    /// Queue a response for `POST path`.
    pub fn on_post(&self, path: &str, status: u16, body: &str) -> &Self {
        self.push(
            Method::Post,
            path,
            Scripted::Ready(Ok(HttpResponse::new(status, body))),
        );
        self
    }

    /// Queue a transport failure.
    pub fn fail(&self, method: Method, path: &str, error: HttpError) -> &Self {
        self.push(method, path, Scripted::Ready(Err(error)));
        self
    }

    /// Queue a response for `POST path` that stays pending until released.
    pub fn gate_post(&self, path: &str) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.push(Method::Post, path, Scripted::Gated(receiver));
        Gate { sender }
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.borrow().requests.clone()
    }

    /// Number of `POST` requests seen so far.
    pub fn post_count(&self) -> usize {
        self.inner
            .borrow()
            .requests
            .iter()
            .filter(|r| r.method == Method::Post)
            .count()
    }

    async fn next(&self, method: Method, path: &str) -> Reply {
        let scripted = {
            let mut script = self.inner.borrow_mut();
            script.requests.push(RecordedRequest {
                method,
                path: path.to_string(),
            });
            script
                .queued
                .get_mut(&(method, path.to_string()))
                .and_then(VecDeque::pop_front)
        };

        match scripted {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(HttpError::Request("gate dropped".to_string()))),
            None => {
                tracing::warn!(?method, path, "no scripted response");
                Err(HttpError::Request(format!(
                    "no scripted response for {method:?} {path}"
                )))
            }
        }
    }
}

#[async_trait(?Send)]
impl HttpEffects for ScriptedHttp {
    async fn get(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.next(Method::Get, path).await
    }

    async fn post(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.next(Method::Post, path).await
    }
}
