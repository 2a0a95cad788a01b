//! Log subscriber for the `phybench` binary.
//!
//! Output goes to stderr so rendered charts and JSON on stdout can be piped.
//! `RUST_LOG` wins when set. Otherwise our own crates log at the requested
//! level and everything else (reqwest, hyper) stays at `warn`.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Targets that follow the requested level.
const OWN_TARGETS: [&str; 2] = ["phybench_core", "phybench"];

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    std::iter::once("warn".to_string())
        .chain(OWN_TARGETS.iter().map(|t| format!("{}={}", t, level)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber; `json` selects newline-delimited JSON.
///
/// A second call leaves the first subscriber in place.
pub fn init_tracing(json: bool, level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let layer = if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .ok();
}
