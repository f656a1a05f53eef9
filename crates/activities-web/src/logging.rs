//! Console logging for the browser shell

use std::sync::Once;
use tracing_subscriber::layer::SubscriberExt;
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};

static INIT: Once = Once::new();

/// Route `tracing` events to the browser console and panics to
/// `console.error`. Later calls are no-ops.
pub fn init_logging() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();

        let level = if cfg!(debug_assertions) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        let layer = WASMLayer::new(
            WASMLayerConfigBuilder::new()
                .set_max_level(level)
                .set_report_logs_in_timings(false)
                .build(),
        );
        // Another subscriber may already be installed by the host page's bundle.
        let _ = tracing::subscriber::set_global_default(tracing_subscriber::registry().with(layer));
    });
}
