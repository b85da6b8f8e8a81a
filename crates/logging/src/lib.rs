#![warn(missing_docs)]

//! Shared logging helpers and CLI argument definitions for the keytable tools.
//!
//! - [`LogArgs`]: log level flags shared by every binary
//! - [`compute_spec`]: resolve flags and `RUST_LOG` into a filter directive
//! - [`init`]: install a `tracing` subscriber writing to stderr

use std::{env, io};

use clap::Args;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, global = true, conflicts_with_all = ["debug", "quiet", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, global = true, conflicts_with_all = ["trace", "quiet", "log_level", "log_filter"])]
    pub debug: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true, conflicts_with_all = ["trace", "debug"])]
    pub quiet: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "keytable=trace"
    #[arg(long, global = true)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// The filter spec these arguments select.
    pub fn spec(&self) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.quiet,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
        )
    }
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &["keytable", "keytable_cli", "logging"]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `quiet` (crate-scoped `warn`)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(
    trace: bool,
    debug: bool,
    quiet: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = log_level {
        return level_spec_for(lvl);
    }
    if quiet {
        return level_spec_for("warn");
    }
    env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("info"))
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install a stderr subscriber filtered by `spec`.
///
/// Does nothing if a global subscriber is already set.
pub fn init(spec: &str) {
    registry()
        .with(env_filter_from_spec(spec))
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_our_crates() {
        assert_eq!(
            level_spec_for("DEBUG"),
            "keytable=debug,keytable_cli=debug,logging=debug"
        );
    }

    #[test]
    fn explicit_filter_wins() {
        assert_eq!(
            compute_spec(true, false, false, Some("info"), Some("keytable=trace")),
            "keytable=trace"
        );
    }

    #[test]
    fn flags_take_precedence_over_quiet() {
        assert_eq!(
            compute_spec(false, true, true, None, None),
            level_spec_for("debug")
        );
        assert_eq!(
            compute_spec(false, false, true, Some("error"), None),
            level_spec_for("error")
        );
        assert_eq!(
            compute_spec(false, false, true, None, None),
            level_spec_for("warn")
        );
    }
}
