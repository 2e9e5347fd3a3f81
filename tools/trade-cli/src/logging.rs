//! Logging and tracing setup

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging for the CLI
///
/// `RUST_LOG` wins over `level` when set. Logs go to stderr so trade output
/// on stdout stays pipeable.
pub fn initialize_logging(level: &str, format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = match format {
        "json" => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        "pretty" => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
            .boxed(),
        _ => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
            .boxed(),
    };

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init()?;

    Ok(())
}
