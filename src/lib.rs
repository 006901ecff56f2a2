pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod net;
pub mod renderer;
pub mod services;
pub mod state;

// Convenient re-exports (so call sites can do `prompt_share::Registry`, etc.)
pub use state::registry::Registry;

/// Installs the tracing subscriber and the color-eyre report handler.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    if let Err(e) = color_eyre::install() {
        eprintln!("cannot install color-eyre: {e}");
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();
}
