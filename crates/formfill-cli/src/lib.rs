//! Shared plumbing for the `formfill` and `formfill-detect` binaries.

pub mod detect;
pub mod fill;

use anyhow::Context;
use formfill_core::AppSettings;
use std::path::Path;

/// Install the fmt subscriber on stderr so stdout stays for progress lines.
///
/// `RUST_LOG` wins over the verbosity flag.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "info,formfill=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(verbose).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Settings from an explicit file, or the user config file, plus environment
/// overrides.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<AppSettings> {
    AppSettings::load_with_env(path).context("failed to load settings")
}
