//! Tracing initialization for the authentication core.
//!
//! Console-only setup; the surrounding service layers its own exporters on
//! top when it embeds this core.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Filter defaults to `info` for this crate and can be overridden through
/// `RUST_LOG`. Calling this twice is an error; embedders that install their
/// own subscriber should skip it.
pub fn init_tracing() {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME")))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    tracing_subscriber::registry().with(console_layer).init();
}
