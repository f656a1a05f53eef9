//! Board runtime configuration.
//!
//! Every field has a default matching the stock backend and page, so embedding
//! pages only pass what they change (`#[serde(default)]`).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration for [`crate::AppController`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix prepended to every request path, e.g. `""` or `"/api"`.
    pub api_base: String,
    /// Directory and mutation root, `/activities` on the stock backend.
    pub activities_path: String,
    /// How long a notice stays visible after each `show`.
    pub notice_hide_delay_ms: u64,
    /// Disable the submit control while a signup is pending and ignore
    /// duplicate submissions/removals already in flight.
    pub guard_in_flight: bool,
    /// User-visible strings.
    pub messages: Messages,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            activities_path: "/activities".to_string(),
            notice_hide_delay_ms: 4_500,
            guard_in_flight: true,
            messages: Messages::default(),
        }
    }
}

impl AppConfig {
    /// Notice auto-hide delay.
    pub fn notice_hide_delay(&self) -> Duration {
        Duration::from_millis(self.notice_hide_delay_ms)
    }

    /// Full path of the directory endpoint.
    pub fn directory_path(&self) -> String {
        format!("{}{}", self.api_base, self.activities_path)
    }
}

/// User-visible strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Neutral first option of the activity selector.
    pub select_placeholder: String,
    /// Placeholder entry for an empty roster.
    pub no_participants: String,
    /// Shown in place of the list when the directory cannot be loaded.
    pub load_failed: String,
    /// Validation notice for a missing email or activity.
    pub missing_input: String,
    /// Notice shown while a signup is pending.
    pub signing_up: String,
    /// Fallback success notice for signup.
    pub signup_succeeded: String,
    /// Fallback error notice for signup.
    pub signup_failed: String,
    /// Fallback success notice for unregister.
    pub unregister_succeeded: String,
    /// Fallback error notice for unregister.
    pub unregister_failed: String,
    /// Error notice when the server accepted a change the page could not show.
    pub page_out_of_date: String,
    /// Label on each remove control.
    pub remove_title: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            select_placeholder: "-- Select an activity --".to_string(),
            no_participants: "No participants yet".to_string(),
            load_failed: "Failed to load activities. Please try again later.".to_string(),
            missing_input: "Please enter your email and select an activity.".to_string(),
            signing_up: "Signing up...".to_string(),
            signup_succeeded: "Signed up successfully!".to_string(),
            signup_failed: "Signup failed".to_string(),
            unregister_succeeded: "Unregistered successfully.".to_string(),
            unregister_failed: "Unregister failed".to_string(),
            page_out_of_date: "Saved, but the page could not be updated. Please reload.".to_string(),
            remove_title: "Unregister".to_string(),
        }
    }
}
