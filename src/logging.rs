//! Tracing subscriber setup for the binary.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log output should go.
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    /// Drop all events; used while the terminal UI owns the screen.
    Disabled,
}

/// Map `-v` occurrences to a default filter. `RUST_LOG` takes precedence.
pub fn filter_for_verbosity(verbose: u8) -> EnvFilter {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global fmt subscriber.
pub fn init(verbose: u8, target: LogTarget<'_>) -> io::Result<()> {
    let builder = tracing_subscriber::fmt().with_target(false);

    match target {
        LogTarget::Stderr => builder
            .with_env_filter(filter_for_verbosity(verbose))
            .with_writer(io::stderr)
            .init(),
        LogTarget::File(path) => {
            let file = File::create(path)?;
            builder
                .with_env_filter(filter_for_verbosity(verbose))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        LogTarget::Disabled => builder
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init(),
    }

    Ok(())
}
