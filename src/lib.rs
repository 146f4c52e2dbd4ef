// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Early termination penalties of Filecoin storage sectors.
//!
//! [`miner::termination_penalty`] is a pure function of a batch of
//! [`sector::SectorOnChainInfo`] records, the epoch and the smoothed network
//! estimates. [`provider`] gathers those inputs from a Lotus-compatible node
//! ([`rpc_client::ApiInfo`]) or from a snapshot file, and the
//! `forest-sector-penalty` binary prints the result.

pub mod blocks;
mod cli;
mod cli_shared;
pub mod econ;
pub mod error;
pub mod lotus_json;
pub mod math;
pub mod miner;
pub mod policy;
pub mod provider;
pub mod rpc_client;
pub mod sector;
pub mod smooth;
mod utils;

pub use cli::main::main;
pub use cli_shared::cli::{Client, Config, PenaltyConfig};
