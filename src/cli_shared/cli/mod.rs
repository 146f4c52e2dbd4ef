// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod config;

pub use config::*;

use std::path::PathBuf;

/// Environment variable pointing at a configuration file.
pub const CONFIG_PATH_ENV: &str = "FOREST_SECTOR_PENALTY_CONFIG";

/// Where the configuration file came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPath {
    Cli(PathBuf),
    Env(PathBuf),
}

impl ConfigPath {
    pub fn to_path_buf(&self) -> &PathBuf {
        match self {
            ConfigPath::Cli(path) | ConfigPath::Env(path) => path,
        }
    }
}

/// The `--config` flag wins over [`CONFIG_PATH_ENV`]. Without either, no file
/// is read.
pub fn find_config_path(config: Option<&PathBuf>) -> Option<ConfigPath> {
    if let Some(s) = config {
        return Some(ConfigPath::Cli(s.to_owned()));
    }
    std::env::var_os(CONFIG_PATH_ENV).map(|s| ConfigPath::Env(PathBuf::from(s)))
}
