//! Process-wide error reporting and log output.

use crate::Environment;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const PRODUCTION_FILTER: &str = "info,sea_orm=warn,sqlx=warn";
const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,sea_orm=info,hyper=info";

/// Hook color-eyre into panics and error reports. Run before anything fallible.
pub fn install_color_eyre() {
    // Only the first install wins; later calls are harmless.
    let _ = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install();
}

/// Set the global subscriber: JSON lines in production, pretty output
/// otherwise. `RUST_LOG` replaces the default filter. The `ErrorLayer`
/// lets eyre reports show the active spans.
///
/// Later calls leave the first subscriber in place, so tests may call it freely.
pub fn init_tracing(environment: &Environment) {
    let default_filter = if environment.is_production() {
        PRODUCTION_FILTER
    } else {
        DEVELOPMENT_FILTER
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let output = if environment.is_production() {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .boxed()
    } else {
        fmt::layer().pretty().with_file(false).boxed()
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(?environment, "Logging ready");
    }
}
