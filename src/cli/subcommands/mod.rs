// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod config_cmd;
mod sector_cmd;

pub(super) use self::{config_cmd::ConfigCommands, sector_cmd::SectorCommands};
use crate::utils::misc::LoggingColor;
use clap::Parser;
use std::path::PathBuf;

/// Command-line options of the penalty calculator
#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), bin_name = "forest-sector-penalty", author = env!("CARGO_PKG_AUTHORS"), version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    /// A TOML file containing relevant configurations
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Client JWT token to use for JSON-RPC authentication
    #[arg(short, long)]
    pub token: Option<String>,
    /// Enable or disable colored logging in `stderr`
    #[arg(long, default_value_t = LoggingColor::Auto)]
    pub color: LoggingColor,
    #[command(subcommand)]
    pub cmd: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub enum Subcommand {
    /// Price the termination of storage sectors
    #[command(subcommand)]
    Sector(SectorCommands),

    /// Manage the configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}
