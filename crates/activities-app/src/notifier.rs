//! # Notifier
//!
//! Transient status messages with a severity class.
//!
//! `show` replaces the current notice immediately (no queue) and schedules a
//! hide `hide_delay` after that call. Timers are never cancelled: when two
//! notices overlap, the first notice's timer still fires and hides whatever is
//! current at that moment, including the newer notice. That early hide is a
//! known limitation of this notice area.

use crate::effects::TimerEffects;
use crate::surface::NoticeSurface;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Notice severity. Doubles as the CSS class of the notice area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Progress or neutral information.
    #[default]
    Info,
    /// A mutation went through.
    Success,
    /// Anything that failed.
    Error,
}

impl Severity {
    /// CSS class applied next to `message`.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Shows notices and schedules their auto-hide.
pub struct Notifier<N, T> {
    surface: Rc<RefCell<N>>,
    timer: T,
    hide_delay: Duration,
}

impl<N, T> Notifier<N, T>
where
    N: NoticeSurface + 'static,
    T: TimerEffects,
{
    /// Create a notifier over a shared surface.
    pub fn new(surface: Rc<RefCell<N>>, timer: T, hide_delay: Duration) -> Self {
        Self {
            surface,
            timer,
            hide_delay,
        }
    }

    /// Show `text` now and hide the notice area after the configured delay.
    pub fn show(&self, text: &str, severity: Severity) {
        tracing::debug!(%severity, text, "showing notice");
        self.surface.borrow_mut().show_notice(text, severity);

        let surface = Rc::downgrade(&self.surface);
        self.timer.schedule(
            self.hide_delay,
            Box::new(move || {
                if let Some(surface) = surface.upgrade() {
                    surface.borrow_mut().hide_notice();
                }
            }),
        );
    }

    /// Shorthand for [`Severity::Info`].
    pub fn info(&self, text: &str) {
        self.show(text, Severity::Info);
    }

    /// Shorthand for [`Severity::Success`].
    pub fn success(&self, text: &str) {
        self.show(text, Severity::Success);
    }

    /// Shorthand for [`Severity::Error`].
    pub fn error(&self, text: &str) {
        self.show(text, Severity::Error);
    }

    /// Configured auto-hide delay.
    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }
}
