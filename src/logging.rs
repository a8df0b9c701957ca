//! Structured logging setup.
//!
//! Builds a layered tracing subscriber: an env-filter (honouring `RUST_LOG`),
//! bunyan-formatted JSON to the provided sink, and a `log` crate bridge so
//! the `log::` macros used in the scan pipeline flow into the same output.

use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

/// Composes the subscriber without installing it, so tests can build one per
/// harness.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs the subscriber process-wide and routes `log` records through it.
///
/// Call once at startup; a second call panics.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    LogTracer::init().expect("failed to set log tracer");
    set_global_default(subscriber).expect("failed to set tracing subscriber");
}
