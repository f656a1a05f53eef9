//! `fetch` transport.

use activities_app::{HttpEffects, HttpError, HttpResponse};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};

/// [`HttpEffects`] over the browser `fetch` API, relative to the page origin.
#[derive(Debug, Clone, Default)]
pub struct FetchHttp;

impl FetchHttp {
    /// Create the transport.
    pub fn new() -> Self {
        Self
    }

    async fn read(sent: Result<Response, gloo_net::Error>) -> Result<HttpResponse, HttpError> {
        let response = sent.map_err(|e| HttpError::Request(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

#[async_trait(?Send)]
impl HttpEffects for FetchHttp {
    async fn get(&self, path: &str) -> Result<HttpResponse, HttpError> {
        Self::read(Request::get(path).send().await).await
    }

    async fn post(&self, path: &str) -> Result<HttpResponse, HttpError> {
        Self::read(Request::post(path).send().await).await
    }
}
