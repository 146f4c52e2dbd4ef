// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::ffi::OsString;

use crate::cli::subcommands::Cli;
use crate::cli_shared::{logger, read_config};
use clap::Parser;
use tracing::debug;

use super::subcommands::Subcommand;

pub fn main<ArgT>(args: impl IntoIterator<Item = ArgT>) -> anyhow::Result<()>
where
    ArgT: Into<OsString> + Clone,
{
    // Capture Cli inputs
    let Cli {
        config,
        token,
        color,
        cmd,
    } = Cli::parse_from(args);
    let (config_path, config) = read_config(config.as_ref())?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            logger::setup_logger(&color, &config.log);
            if let Some(path) = &config_path {
                debug!("using config file {}", path.to_path_buf().display());
            }
            // Run command
            match cmd {
                Subcommand::Sector(cmd) => {
                    let api = config.api_info()?.set_token(token);
                    cmd.run(api, &config, &mut std::io::stdout()).await
                }
                Subcommand::Config(cmd) => cmd.run(&config, &mut std::io::stdout()),
            }
        })
}
