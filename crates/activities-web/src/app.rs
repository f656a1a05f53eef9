//! # Web App
//!
//! Binds the page to an [`AppController`]: one `submit` listener on the signup
//! form and one delegated `click` listener on the activity container. Every
//! listener is owned by [`WebApp`] and removed again by [`WebApp::teardown`].

use activities_app::surface::{attrs, classes};
use activities_app::{AppController, EntryId, SignupForm, UiEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, HtmlSelectElement};

use crate::config::WidgetConfig;
use crate::dom::{element_by_id, DomSurface};
use crate::error::{WebError, WebResult};
use crate::http::FetchHttp;
use crate::timer::BrowserTimer;

/// Controller wired to the browser handlers.
pub type WebController = AppController<DomSurface, FetchHttp, BrowserTimer>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> WebResult<Self> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            event,
            callback,
        })
    }

    fn detach(&self) -> WebResult<()> {
        self.target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())?;
        Ok(())
    }
}

/// A mounted board.
pub struct WebApp {
    controller: Rc<WebController>,
    listeners: RefCell<Vec<Listener>>,
}

impl WebApp {
    /// Bind to the page, register listeners and start the directory load.
    pub fn mount(document: Document, config: WidgetConfig) -> WebResult<Self> {
        let dom = &config.dom;
        let form = element_by_id(&document, &dom.signup_form)?;
        let list = element_by_id(&document, &dom.activities_list)?;
        let email: HtmlInputElement = typed(&document, &dom.email_input, "HTMLInputElement")?;
        let select: HtmlSelectElement =
            typed(&document, &dom.activity_select, "HTMLSelectElement")?;

        let surface = DomSurface::attach(document, dom)?;
        let controller = Rc::new(AppController::new(
            config.app,
            Rc::new(RefCell::new(surface)),
            FetchHttp::new(),
            BrowserTimer,
        ));
        let app = Self {
            controller,
            listeners: RefCell::new(Vec::new()),
        };

        let controller = app.controller.clone();
        app.listen(form.into(), "submit", move |event: Event| {
            event.prevent_default();
            let form = SignupForm::new(email.value(), select.value());
            dispatch(&controller, UiEvent::Submit(form));
        })?;

        let controller = app.controller.clone();
        app.listen(list.into(), "click", move |event: Event| {
            if let Some(entry) = remove_target(&event) {
                dispatch(&controller, UiEvent::RemoveParticipant(entry));
            }
        })?;

        let controller = app.controller.clone();
        spawn_local(async move {
            if let Err(error) = controller.init().await {
                tracing::warn!(%error, "activities unavailable");
            }
        });

        tracing::debug!(listeners = app.listeners.borrow().len(), "board mounted");
        Ok(app)
    }

    /// Remove every listener and stop the controller. Idempotent.
    pub fn teardown(&self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            if let Err(error) = listener.detach() {
                tracing::error!(%error, event = listener.event, "failed to remove listener");
            }
        }
        self.controller.teardown();
    }

    /// The controller behind the page.
    pub fn controller(&self) -> &Rc<WebController> {
        &self.controller
    }

    fn listen(
        &self,
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> WebResult<()> {
        let callback: Closure<dyn FnMut(Event)> = Closure::new(handler);
        let listener = Listener::attach(target, event, callback)?;
        self.listeners.borrow_mut().push(listener);
        Ok(())
    }
}

fn typed<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> WebResult<T> {
    element_by_id(document, id)?
        .dyn_into::<T>()
        .map_err(|_| WebError::WrongElement {
            id: id.to_string(),
            expected,
        })
}

/// Entry id of the remove control under a click, if any.
fn remove_target(event: &Event) -> Option<EntryId> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let control = target
        .closest(&format!(".{}", classes::PARTICIPANT_REMOVE))
        .ok()??;
    let raw = control.get_attribute(attrs::ENTRY_ID)?;
    match raw.parse() {
        Ok(entry) => Some(entry),
        Err(_) => {
            tracing::warn!(raw = %raw, "remove control with unreadable entry id");
            None
        }
    }
}

fn dispatch(controller: &Rc<WebController>, event: UiEvent) {
    let controller = Rc::clone(controller);
    spawn_local(async move {
        let outcome = controller.dispatch(event).await;
        tracing::debug!(?outcome, "event handled");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DomConfig;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page() -> Document {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(
            r#"<div id="activities-list"></div>
               <form id="signup-form">
                 <input type="email" id="email" />
                 <select id="activity"></select>
                 <button type="submit">Sign Up</button>
               </form>
               <div id="message" class="hidden"></div>"#,
        );
        document
    }

    fn submit(document: &Document) {
        let form = document.get_element_by_id("signup-form").unwrap();
        form.dispatch_event(&Event::new("submit").unwrap()).unwrap();
    }

    #[wasm_bindgen_test]
    async fn test_empty_submit_shows_validation_notice() {
        let document = page();
        let app = WebApp::mount(document.clone(), WidgetConfig::default()).unwrap();

        submit(&document);
        TimeoutFuture::new(0).await;

        let notice = document.get_element_by_id("message").unwrap();
        assert_eq!(
            notice.text_content().unwrap(),
            "Please enter your email and select an activity."
        );
        assert_eq!(notice.class_name(), "message error");
        app.teardown();
    }

    #[wasm_bindgen_test]
    async fn test_teardown_detaches_listeners() {
        let document = page();
        let app = WebApp::mount(document.clone(), WidgetConfig::default()).unwrap();
        app.teardown();
        app.teardown();

        submit(&document);
        TimeoutFuture::new(0).await;

        let notice = document.get_element_by_id("message").unwrap();
        assert_eq!(notice.text_content().unwrap_or_default(), "");
        assert!(!app.controller().is_active());
    }

    #[wasm_bindgen_test]
    fn test_wrong_element_kind_is_rejected() {
        let document = page();
        let config = WidgetConfig {
            dom: DomConfig {
                email_input: "message".into(),
                ..DomConfig::default()
            },
            ..WidgetConfig::default()
        };
        assert!(matches!(
            WebApp::mount(document, config),
            Err(WebError::WrongElement { expected: "HTMLInputElement", .. })
        ));
    }
}
