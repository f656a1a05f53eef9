//! `setTimeout` timers.

use activities_app::{TimerEffects, TimerTask};
use gloo_timers::callback::Timeout;
use std::time::Duration;

/// [`TimerEffects`] over `setTimeout`. Scheduled tasks outlive the handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl TimerEffects for BrowserTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let _handle = Timeout::new(millis, task).forget();
    }
}
