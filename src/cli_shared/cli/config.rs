// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::rpc_client::ApiInfo;
use crate::sector::SectorSize;
use anyhow::Context as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::level_filters::LevelFilter;

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct LogLevelFilter(pub LevelFilter);

impl Serialize for LogLevelFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0.to_string().to_uppercase())
    }
}

impl<'de> Deserialize<'de> for LogLevelFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Case insensitive.
        String::deserialize(deserializer)?
            .parse()
            .map(LogLevelFilter)
            .map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for LogLevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct LogConfig {
    pub filters: Vec<LogValue>,
}

impl LogConfig {
    pub(in crate::cli_shared) fn to_filter_string(&self) -> String {
        self.filters
            .iter()
            .map(|f| format!("{}={}", f.module, f.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filters: vec![
                LogValue::new("hyper_util", LogLevelFilter(LevelFilter::WARN)),
                LogValue::new("reqwest", LogLevelFilter(LevelFilter::WARN)),
            ],
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct LogValue {
    pub module: String,
    pub level: LogLevelFilter,
}

impl LogValue {
    pub fn new(module: &str, level: LogLevelFilter) -> Self {
        Self {
            module: module.to_string(),
            level,
        }
    }
}

/// Where to reach the node.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
#[serde(default)]
pub struct Client {
    /// `<token>:<multiaddr>`, as in `FULLNODE_API_INFO`
    pub api_info: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Overrides the sector size reported by the chain.
    pub sector_size: Option<SectorSize>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub client: Client,
    pub penalty: PenaltyConfig,
    pub log: LogConfig,
}

impl Config {
    /// The configured endpoint, falling back to `FULLNODE_API_INFO` and then
    /// to a local node.
    pub fn api_info(&self) -> anyhow::Result<ApiInfo> {
        match &self.client.api_info {
            Some(api_info) => api_info
                .parse()
                .context("malformed api_info in the configuration"),
            None => ApiInfo::from_env(),
        }
    }
}
