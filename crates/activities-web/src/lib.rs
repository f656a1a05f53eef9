//! # Activities Web
//!
//! Browser shell for the activities signup board.
//!
//! Implements the `activities-app` effect traits over the page:
//!
//! - [`DomSurface`]: card rendering and the notice area via `web-sys`
//! - [`FetchHttp`]: requests via `gloo-net`
//! - [`BrowserTimer`]: notice auto-hide via `gloo-timers`
//! - [`WebApp`]: listener registry and controller lifecycle
//!
//! The module start hook installs logging and mounts the board with the
//! default element ids once the document is parsed. Pages that need other ids
//! or endpoints call [`mount`] with an options object instead; a board mounted
//! that way before the document finished parsing is kept.

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod http;
pub mod logging;
pub mod timer;

pub use app::{WebApp, WebController};
pub use config::{DomConfig, WidgetConfig};
pub use dom::DomSurface;
pub use error::{WebError, WebResult};
pub use http::FetchHttp;
pub use timer::BrowserTimer;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

thread_local! {
    static MOUNTED: RefCell<Option<WebApp>> = const { RefCell::new(None) };
}

fn document() -> WebResult<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(WebError::NoWindow)
}

fn mount_with(config: WidgetConfig) -> WebResult<()> {
    unmount();
    let app = WebApp::mount(document()?, config)?;
    MOUNTED.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

fn unmount() {
    if let Some(app) = MOUNTED.with(|slot| slot.borrow_mut().take()) {
        app.teardown();
    }
}

fn is_mounted() -> bool {
    MOUNTED.with(|slot| slot.borrow().is_some())
}

/// Default mount from the start hook. A board the page already mounted with
/// [`mount`] before `DOMContentLoaded` is left in place.
fn mount_default() {
    if is_mounted() {
        tracing::debug!("board already mounted, skipping default mount");
        return;
    }
    if let Err(error) = mount_with(WidgetConfig::default()) {
        tracing::error!(%error, "failed to mount activities board");
    }
}

/// Module start hook.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init_logging();

    let document = document()?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(mount_default);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount_default();
    }
    Ok(())
}

/// Replace the mounted board with one built from `options`
/// (a [`WidgetConfig`]-shaped object, or `undefined` for the defaults).
#[wasm_bindgen]
pub fn mount(options: JsValue) -> Result<(), JsValue> {
    let config = WidgetConfig::from_js(options)?;
    mount_with(config)?;
    Ok(())
}

/// Remove the board's listeners and stop handling responses.
#[wasm_bindgen]
pub fn teardown() {
    unmount();
}
