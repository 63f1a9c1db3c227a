//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the verbosity flag picks the level
//! for this crate. Output goes to stderr so command output stays clean.

use tracing_subscriber::EnvFilter;

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "walletline=warn",
        1 => "walletline=info",
        _ => "walletline=debug",
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
