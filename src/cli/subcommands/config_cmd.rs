// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::Write;

use anyhow::Context as _;
use clap::Subcommand;

use crate::cli_shared::cli::Config;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Dump the effective configuration as TOML
    Show,
}

impl ConfigCommands {
    pub fn run(self, config: &Config, sink: &mut impl Write) -> anyhow::Result<()> {
        match self {
            Self::Show => writeln!(
                sink,
                "{}",
                toml::to_string(config).context("could not serialize the configuration")?
            )
            .context("couldn't write config to sink"),
        }
    }
}
