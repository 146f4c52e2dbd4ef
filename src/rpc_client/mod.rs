// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod chain_ops;
pub mod state_ops;

use crate::blocks::{Tipset, TipsetKey};
use crate::lotus_json::HasLotusJson;
use crate::provider::ChainDataProvider;
use crate::sector::{SectorNumber, SectorOnChainInfo, SectorSize};
use crate::smooth::FilterEstimate;
use crate::utils::net::global_http_client;
use anyhow::Context as _;
use async_trait::async_trait;
use multiaddr::{Multiaddr, Protocol};
use serde::Deserialize;
use std::{env, fmt, marker::PhantomData, str::FromStr, time::Duration};
use tracing::debug;
use url::Url;

pub const API_INFO_KEY: &str = "FULLNODE_API_INFO";
pub const DEFAULT_MULTIADDRESS: &str = "/ip4/127.0.0.1/tcp/1234/http";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Lotus serves the v0 API here, relative to the node URL.
pub const RPC_PATH: &str = "rpc/v0";

/// An error returned by the remote node, or raised while talking to it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Deserialize)]
#[error("JSON-RPC error {code}: {message}")]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcError {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INTERNAL_ERROR: i64 = -32603;

    pub fn internal_error(e: impl fmt::Display) -> Self {
        Self {
            code: Self::INTERNAL_ERROR,
            message: e.to_string(),
        }
    }

    pub fn parse_error(e: impl fmt::Display) -> Self {
        Self {
            code: Self::PARSE_ERROR,
            message: e.to_string(),
        }
    }
}

/// Token and URL of a Lotus-compatible JSON-RPC endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiInfo {
    multiaddr: Multiaddr,
    url: Url,
    pub token: Option<String>,
}

impl fmt::Display for ApiInfo {
    /// Convert an [`ApiInfo`] to a string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(token) = &self.token {
            token.fmt(f)?;
            write!(f, ":")?;
        }
        self.multiaddr.fmt(f)?;
        Ok(())
    }
}

impl FromStr for ApiInfo {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (token, host) = match s.split_once(':') {
            Some((token, host)) => (Some(token), host),
            None => (None, s),
        };
        let multiaddr: Multiaddr = host.parse()?;
        let url = multiaddr2url(&multiaddr).context("couldn't convert multiaddr to URL")?;
        Ok(ApiInfo {
            multiaddr,
            url,
            token: token.map(String::from),
        })
    }
}

impl Default for ApiInfo {
    fn default() -> Self {
        let multiaddr: Multiaddr = DEFAULT_MULTIADDRESS
            .parse()
            .expect("default multiaddr is valid");
        let url = multiaddr2url(&multiaddr).expect("default multiaddr maps to a URL");
        ApiInfo {
            multiaddr,
            url,
            token: None,
        }
    }
}

impl ApiInfo {
    pub fn url(&self) -> &Url {
        &self.url
    }

    // Update API handle with new (optional) token
    pub fn set_token(self, token: Option<String>) -> Self {
        ApiInfo {
            token: token.or(self.token),
            ..self
        }
    }

    // Get API_INFO environment variable if exists, otherwise, use default
    // multiaddress. Fails if the environment variable is malformed.
    pub fn from_env() -> anyhow::Result<Self> {
        match env::var(API_INFO_KEY) {
            Ok(it) => it
                .parse()
                .with_context(|| format!("malformed {API_INFO_KEY}")),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(it @ env::VarError::NotUnicode(_)) => Err(it.into()),
        }
    }

    pub async fn call<T: HasLotusJson>(&self, req: RpcRequest<T>) -> Result<T, JsonRpcError> {
        let url = self
            .url
            .join(RPC_PATH)
            .map_err(JsonRpcError::internal_error)?;
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": req.method_name,
            "params": req.params,
        });

        let mut request = global_http_client()
            .post(url)
            .timeout(req.timeout)
            .json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        debug!(method = req.method_name, "sending JSON-RPC request");
        let response = request.send().await.map_err(JsonRpcError::internal_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(JsonRpcError::internal_error(format!(
                "{} failed with HTTP status {status}",
                req.method_name
            )));
        }

        let response: JsonRpcResponse = response.json().await.map_err(JsonRpcError::parse_error)?;
        match response.error {
            Some(error) => Err(error),
            None => T::from_lotus_json_value(response.result).map_err(JsonRpcError::parse_error),
        }
    }
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

/// An `RpcRequest` is an at-rest description of a remote procedure call. It can
/// be invoked using `ApiInfo::call`.
#[derive(Debug, Clone)]
pub struct RpcRequest<T = serde_json::Value> {
    pub method_name: &'static str,
    pub params: serde_json::Value,
    pub result_type: PhantomData<T>,
    pub timeout: Duration,
}

impl<T> RpcRequest<T> {
    pub fn new<P: HasLotusJson>(method_name: &'static str, params: P) -> Self {
        let params = match params.into_lotus_json_value() {
            Ok(serde_json::Value::Null) => serde_json::Value::Array(vec![]),
            Ok(it) => it,
            Err(_) => serde_json::Value::String(
                "INTERNAL ERROR: Parameters could not be serialized as JSON".to_string(),
            ),
        };
        RpcRequest {
            method_name,
            params,
            result_type: PhantomData,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[async_trait]
impl ChainDataProvider for ApiInfo {
    async fn chain_head(&self) -> anyhow::Result<Tipset> {
        Ok(self.call(Self::chain_head_req()).await?)
    }

    async fn miner_sector_size(&self, miner: &str, tsk: &TipsetKey) -> anyhow::Result<SectorSize> {
        let info = self
            .call(Self::state_miner_info_req(miner.to_owned(), tsk.clone()))
            .await?;
        Ok(info.sector_size)
    }

    async fn sector_info(
        &self,
        miner: &str,
        sector_number: SectorNumber,
        tsk: &TipsetKey,
    ) -> anyhow::Result<Option<SectorOnChainInfo>> {
        Ok(self
            .call(Self::state_sector_get_info_req(
                miner.to_owned(),
                sector_number,
                tsk.clone(),
            ))
            .await?)
    }

    async fn reward_estimate(&self, tsk: &TipsetKey) -> anyhow::Result<FilterEstimate> {
        let state = self.call(Self::reward_state_req(tsk.clone())).await?;
        Ok(state.state.this_epoch_reward_smoothed)
    }

    async fn network_qa_power_estimate(&self, tsk: &TipsetKey) -> anyhow::Result<FilterEstimate> {
        let state = self.call(Self::power_state_req(tsk.clone())).await?;
        Ok(state.state.this_epoch_qa_power_smoothed)
    }
}

/// `"/dns/example.com/tcp/8080/http" -> "http://example.com:8080/"`
///
/// Returns [`None`] on unsupported formats, or if there is a URL parsing error.
///
/// Note that [`Multiaddr`]s do NOT support a (URL) `path`, so that must be handled
/// out-of-band.
fn multiaddr2url(m: &Multiaddr) -> Option<Url> {
    let mut components = m.iter().peekable();
    let host = match components.next()? {
        Protocol::Dns(it) | Protocol::Dns4(it) | Protocol::Dns6(it) | Protocol::Dnsaddr(it) => {
            it.to_string()
        }
        Protocol::Ip4(it) => it.to_string(),
        Protocol::Ip6(it) => format!("[{it}]"),
        _ => return None,
    };
    let port = match components.next_if(|it| matches!(it, Protocol::Tcp(_))) {
        Some(Protocol::Tcp(port)) => Some(port),
        _ => None,
    };
    let scheme = match components.next()? {
        Protocol::Http => "http",
        Protocol::Https => "https",
        _ => return None,
    };
    let None = components.next() else { return None };
    let parse_me = match port {
        Some(port) => format!("{scheme}://{host}:{port}"),
        None => format!("{scheme}://{host}"),
    };
    parse_me.parse().ok()
}
