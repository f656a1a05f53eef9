//! Error type for the browser shell

use activities_app::SurfaceError;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Failures while mounting or driving the board in a page.
#[derive(Error, Debug)]
pub enum WebError {
    /// No `window` or `document` (not running in a page).
    #[error("no browser window available")]
    NoWindow,

    /// A required element id is absent from the page.
    #[error("element #{0} not found")]
    MissingElement(String),

    /// An element exists but is not the expected kind.
    #[error("element #{id} is not {expected}")]
    WrongElement {
        /// Element id.
        id: String,
        /// Expected interface, e.g. `HTMLInputElement`.
        expected: &'static str,
    },

    /// The mount configuration could not be read.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_wasm_bindgen::Error),

    /// JavaScript interop error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),
}

impl From<JsValue> for WebError {
    fn from(js_val: JsValue) -> Self {
        let message = js_val
            .as_string()
            .or_else(|| {
                js_val
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| "Unknown JavaScript error".to_string());
        WebError::JavaScript(message)
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<WebError> for SurfaceError {
    fn from(err: WebError) -> Self {
        match err {
            WebError::MissingElement(what) => SurfaceError::MissingElement(what),
            other => SurfaceError::Dom(other.to_string()),
        }
    }
}

/// Result type for browser shell operations.
pub type WebResult<T> = Result<T, WebError>;
