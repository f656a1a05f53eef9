//! Mount configuration.

use activities_app::AppConfig;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::WebResult;

/// Ids of the page elements the board binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    /// Container of the activity cards.
    pub activities_list: String,
    /// Activity `<select>`.
    pub activity_select: String,
    /// Signup `<form>`.
    pub signup_form: String,
    /// Email `<input>`.
    pub email_input: String,
    /// Notice area.
    pub message: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            activities_list: "activities-list".to_string(),
            activity_select: "activity".to_string(),
            signup_form: "signup-form".to_string(),
            email_input: "email".to_string(),
            message: "message".to_string(),
        }
    }
}

/// Everything `mount` accepts from JavaScript.
///
/// ```text
/// { "app": { "api_base": "/api", "messages": { ... } }, "dom": { "message": "notice" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Core settings.
    pub app: AppConfig,
    /// Page bindings.
    pub dom: DomConfig,
}

impl WidgetConfig {
    /// Read a JS options object. `undefined` and `null` give the defaults.
    pub fn from_js(value: JsValue) -> WebResult<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}
