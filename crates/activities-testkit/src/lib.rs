//! # Activities Testkit
//!
//! Deterministic handlers for the activities board effect traits:
//!
//! - [`MemorySurface`]: in-memory DOM with query helpers and fault injection
//! - [`ScriptedHttp`]: queued and gated HTTP responses, request log
//! - [`ManualTimer`]: virtual clock advanced by the test
//! - [`TestBoard`]: a controller wired to all three
//!
//! Everything is single-threaded (`Rc`/`RefCell`), like the browser.

pub mod fixtures;
pub mod http;
pub mod surface;
pub mod timer;

pub use fixtures::{
    chess_club_json, detail_body, directory_json, message_body, school_directory_json,
    ActivityFixture,
};
pub use http::{Gate, Method, RecordedRequest, ScriptedHttp};
pub use surface::{MemorySurface, NoticeState, SurfaceOp};
pub use timer::ManualTimer;

use activities_app::{AppConfig, AppController};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Controller type used across tests.
pub type TestController = AppController<MemorySurface, ScriptedHttp, ManualTimer>;

/// A controller plus handles on its handlers.
pub struct TestBoard {
    /// Controller under test.
    pub controller: TestController,
    /// Shared surface.
    pub surface: Rc<RefCell<MemorySurface>>,
    /// Transport script (shared with the controller).
    pub http: ScriptedHttp,
    /// Timer (shared with the controller).
    pub timer: ManualTimer,
}

impl TestBoard {
    /// Fresh board with `config` and nothing scripted.
    pub fn new(config: AppConfig) -> Self {
        let surface = Rc::new(RefCell::new(MemorySurface::new()));
        let http = ScriptedHttp::new();
        let timer = ManualTimer::new();
        let controller =
            AppController::new(config, surface.clone(), http.clone(), timer.clone());
        Self {
            controller,
            surface,
            http,
            timer,
        }
    }

    /// Default config with `body` scripted as the `GET /activities` reply.
    pub fn with_directory(body: &str) -> Self {
        let board = Self::new(AppConfig::default());
        board.http.on_get("/activities", 200, body);
        board
    }

    /// Borrow the surface for assertions.
    pub fn view(&self) -> Ref<'_, MemorySurface> {
        self.surface.borrow()
    }
}

/// Install a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
