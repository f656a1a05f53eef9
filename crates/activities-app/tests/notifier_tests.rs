//! Notice display and auto-hide timing.

use activities_app::{Notifier, Severity};
use activities_testkit::{ManualTimer, MemorySurface};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const HIDE: Duration = Duration::from_millis(4500);

fn notifier() -> (
    Notifier<MemorySurface, ManualTimer>,
    Rc<RefCell<MemorySurface>>,
    ManualTimer,
) {
    let surface = Rc::new(RefCell::new(MemorySurface::new()));
    let timer = ManualTimer::new();
    (
        Notifier::new(surface.clone(), timer.clone(), HIDE),
        surface,
        timer,
    )
}

#[test]
fn test_notice_hides_after_delay() {
    let (notifier, surface, timer) = notifier();

    notifier.success("Signed up b@x.com for Chess Club");
    {
        let view = surface.borrow();
        assert!(view.notice().visible);
        assert_eq!(view.notice().severity, Severity::Success);
        assert_eq!(view.notice().text, "Signed up b@x.com for Chess Club");
    }

    timer.advance(HIDE - Duration::from_millis(1));
    assert!(surface.borrow().notice().visible);

    timer.advance(Duration::from_millis(1));
    assert!(!surface.borrow().notice().visible);
    assert_eq!(timer.pending(), 0);
}

#[test]
fn test_new_notice_replaces_old_immediately() {
    let (notifier, surface, _timer) = notifier();

    notifier.info("Signing up...");
    notifier.error("Student already signed up");

    let view = surface.borrow();
    assert_eq!(view.notice().text, "Student already signed up");
    assert_eq!(view.notice().severity, Severity::Error);
    assert_eq!(view.notice_log().len(), 2);
}

#[test]
fn test_earlier_timer_hides_newer_notice() {
    let (notifier, surface, timer) = notifier();

    notifier.info("first");
    timer.advance(Duration::from_millis(3000));
    notifier.success("second");

    // The first notice's timer fires 1.5s into the second notice's life.
    timer.advance(Duration::from_millis(1500));
    assert!(!surface.borrow().notice().visible);
    assert_eq!(surface.borrow().notice().text, "second");

    // The second timer still fires later; hiding twice is harmless.
    timer.advance(Duration::from_millis(3000));
    assert!(!surface.borrow().notice().visible);
    assert_eq!(timer.pending(), 0);
}

#[test]
fn test_pending_hide_is_harmless_after_surface_drop() {
    let (notifier, surface, timer) = notifier();
    notifier.info("bye");
    drop(notifier);
    drop(surface);

    timer.advance(HIDE);
    assert_eq!(timer.pending(), 0);
}
