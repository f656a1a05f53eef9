//! # Mutation Client
//!
//! Directory fetch plus the signup/unregister mutations.
//!
//! Bodies are decoded as JSON before the status is inspected, so a non-JSON
//! body is a [`AppError::MalformedResponse`] whatever the status. Error text is
//! taken from `detail`, then `message`.

use crate::config::{AppConfig, Messages};
use crate::effects::{HttpEffects, HttpResponse};
use crate::errors::{AppError, MutationError};
use crate::model::ActivityDirectory;
use serde_json::Value;

/// Which mutation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// `POST .../signup`
    Signup,
    /// `POST .../unregister`
    Unregister,
}

impl Mutation {
    /// Last path segment.
    pub fn action(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Unregister => "unregister",
        }
    }
}

/// Backend client.
pub struct MutationClient<H> {
    http: H,
    activities_root: String,
    messages: Messages,
}

impl<H: HttpEffects> MutationClient<H> {
    /// Create a client for the endpoints in `config`.
    pub fn new(http: H, config: &AppConfig) -> Self {
        Self {
            http,
            activities_root: config.directory_path(),
            messages: config.messages.clone(),
        }
    }

    /// Underlying transport.
    pub fn http(&self) -> &H {
        &self.http
    }

    /// `GET /activities`.
    pub async fn fetch_directory(&self) -> Result<ActivityDirectory, AppError> {
        let response = self
            .http
            .get(&self.activities_root)
            .await
            .map_err(|e| AppError::network(e.to_string()))?;

        if !response.is_success() {
            let message = serde_json::from_str::<Value>(&response.body)
                .ok()
                .as_ref()
                .and_then(extract_message);
            return Err(AppError::Application {
                status: response.status,
                message,
            });
        }

        ActivityDirectory::from_json(&response.body)
            .map_err(|e| AppError::malformed(response.status, e.to_string()))
    }

    /// Sign `email` up for `activity`. Returns the confirmation text.
    pub async fn signup(&self, activity: &str, email: &str) -> Result<String, MutationError> {
        self.mutate(Mutation::Signup, activity, email)
            .await
            .map(|m| m.unwrap_or_else(|| self.messages.signup_succeeded.clone()))
            .map_err(MutationError::Signup)
    }

    /// Remove `email` from `activity`. Returns the confirmation text.
    pub async fn unregister(&self, activity: &str, email: &str) -> Result<String, MutationError> {
        self.mutate(Mutation::Unregister, activity, email)
            .await
            .map(|m| m.unwrap_or_else(|| self.messages.unregister_succeeded.clone()))
            .map_err(MutationError::Unregister)
    }

    async fn mutate(
        &self,
        mutation: Mutation,
        activity: &str,
        email: &str,
    ) -> Result<Option<String>, AppError> {
        let path = mutation_path(&self.activities_root, mutation, activity, email);
        tracing::debug!(%path, "sending mutation");

        let response = self
            .http
            .post(&path)
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        interpret(&response)
    }
}

/// `{root}/{activity}/{action}?email={email}` with both values percent-encoded.
pub fn mutation_path(root: &str, mutation: Mutation, activity: &str, email: &str) -> String {
    format!(
        "{root}/{}/{}?email={}",
        urlencoding::encode(activity),
        mutation.action(),
        urlencoding::encode(email)
    )
}

fn interpret(response: &HttpResponse) -> Result<Option<String>, AppError> {
    let body: Value = serde_json::from_str(&response.body)
        .map_err(|e| AppError::malformed(response.status, e.to_string()))?;

    if !response.is_success() {
        return Err(AppError::Application {
            status: response.status,
            message: extract_message(&body),
        });
    }

    Ok(non_empty_str(body.get("message")))
}

/// Human-readable error text from a failure body.
///
/// Checks `detail` first (a string, or a list of `{"msg": ...}` validation
/// items), then `message`.
pub fn extract_message(body: &Value) -> Option<String> {
    let detail = match body.get("detail") {
        Some(Value::Array(items)) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .filter(|m| !m.trim().is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        other => non_empty_str(other),
    };
    detail.or_else(|| non_empty_str(body.get("message")))
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
