//! Manually advanced timer.

use activities_app::{TimerEffects, TimerTask};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

struct Pending {
    due: Duration,
    seq: u64,
    task: TimerTask,
}

#[derive(Default)]
struct TimerState {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// [`TimerEffects`] handler whose clock only moves on [`ManualTimer::advance`].
/// Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualTimer {
    state: Rc<RefCell<TimerState>>,
}

impl ManualTimer {
    /// Clock at zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Tasks not yet run.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Move the clock forward, running every task that becomes due in
    /// due-time order (ties in scheduling order).
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let task = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(i, _)| i);
                match next {
                    Some(i) => {
                        let pending = state.pending.remove(i);
                        state.now = pending.due;
                        pending.task
                    }
                    None => {
                        state.now = target;
                        break;
                    }
                }
            };
            task();
        }
    }
}

impl TimerEffects for ManualTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) {
        let mut state = self.state.borrow_mut();
        let due = state.now + delay;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push(Pending { due, seq, task });
    }
}
