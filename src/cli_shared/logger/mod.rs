// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tracing_subscriber::{EnvFilter, prelude::*};

use crate::cli_shared::cli::LogConfig;
use crate::utils::misc::LoggingColor;

/// Logs to stderr, keeping stdout for command output.
pub fn setup_logger(color: &LoggingColor, log: &LogConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::new()
                .with_ansi(color.coloring_enabled())
                .with_writer(std::io::stderr)
                .with_filter(get_env_filter(default_env_filter(log))),
        )
        .init();
}

/// Returns an [`EnvFilter`] according to the `RUST_LOG` environment variable, or a default
/// - see [`default_env_filter`]
///
/// Note that [`tracing_subscriber::filter::Builder`] only allows a single default directive,
/// whereas we want to provide multiple.
/// See also <https://github.com/tokio-rs/tracing/blob/27f688efb72316a26f3ec1f952c82626692c08ff/tracing-subscriber/src/filter/env/builder.rs#L189-L194>
fn get_env_filter(def: EnvFilter) -> EnvFilter {
    use std::env::{
        self,
        VarError::{NotPresent, NotUnicode},
    };
    match env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV) {
        Ok(s) => EnvFilter::new(s),
        Err(NotPresent) => def,
        Err(NotUnicode(_)) => EnvFilter::default(),
    }
}

fn default_env_filter(log: &LogConfig) -> EnvFilter {
    let mut default_directives = vec!["info".to_owned()];
    let configured = log.to_filter_string();
    if !configured.is_empty() {
        default_directives.push(configured);
    }
    EnvFilter::try_new(default_directives.join(",")).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[test]
fn test_default_env_filter() {
    let filter = default_env_filter(&LogConfig::default()).to_string();
    assert!(filter.contains("reqwest=warn"), "{filter}");
    let filter = default_env_filter(&LogConfig { filters: vec![] }).to_string();
    assert_eq!(filter, "info");
}
