//! Tracing setup for the story runtime.
//!
//! Library code only emits `tracing` events. The bootstrap calls
//! [`init_default_tracing`] once; hosts that already installed a subscriber keep it.

/// Installs a compact `tracing-subscriber` fmt subscriber filtered at `level`.
///
/// On `wasm32` events go to the browser console through `tracing-web`, one console
/// method per level. Returns `false` when a global subscriber was already set.
#[must_use]
pub fn init_default_tracing(level: &str) -> bool {
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .compact();

    #[cfg(target_arch = "wasm32")]
    let builder = builder.with_writer(tracing_web::MakeWebConsoleWriter::new());

    builder.try_init().is_ok()
}
