// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::Write;
use std::path::PathBuf;

use crate::cli_shared::cli::Config;
use crate::econ::TokenAmount;
use crate::provider::{
    ChainDataProvider, PenaltyInputs, Snapshot, SnapshotProvider, load_penalty_inputs,
};
use crate::rpc_client::ApiInfo;
use crate::sector::{ChainEpoch, SectorNumber, SectorSize};
use anyhow::Context as _;
use clap::Subcommand;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum SectorCommands {
    /// Calculates the penalty for terminating sectors at the current head
    Terminate {
        /// Miner actor address, e.g. `f01234`
        miner: String,
        /// Sector numbers
        #[arg(required = true)]
        sectors: Vec<SectorNumber>,
        /// Read chain state from a snapshot file instead of a node
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Sector size to price the sectors with, e.g. `32GiB`. Defaults to
        /// the miner's own sector size
        #[arg(long)]
        sector_size: Option<SectorSize>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Saves the chain state needed to price sectors to a snapshot file
    Snapshot {
        /// Miner actor address, e.g. `f01234`
        miner: String,
        /// Sector numbers
        #[arg(required = true)]
        sectors: Vec<SectorNumber>,
        /// Snapshot file to write
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        sector_size: Option<SectorSize>,
    },
}

impl SectorCommands {
    pub async fn run(
        self,
        api: ApiInfo,
        config: &Config,
        sink: &mut impl Write,
    ) -> anyhow::Result<()> {
        match self {
            Self::Terminate {
                miner,
                sectors,
                snapshot,
                sector_size,
                format,
            } => {
                let provider: Box<dyn ChainDataProvider> = match snapshot {
                    Some(path) => Box::new(SnapshotProvider::from_path(&path)?),
                    None => Box::new(api),
                };
                let inputs = load_penalty_inputs(
                    provider.as_ref(),
                    &miner,
                    &sectors,
                    sector_size.or(config.penalty.sector_size),
                )
                .await?;
                let report = TerminationReport::new(&inputs)?;
                match format {
                    OutputFormat::Text => report.write_text(sink)?,
                    OutputFormat::Json => {
                        writeln!(sink, "{}", serde_json::to_string_pretty(&report)?)?
                    }
                }
            }
            Self::Snapshot {
                miner,
                sectors,
                output,
                sector_size,
            } => {
                let inputs = load_penalty_inputs(
                    &api,
                    &miner,
                    &sectors,
                    sector_size.or(config.penalty.sector_size),
                )
                .await?;
                let height = inputs.head.epoch();
                let json = Snapshot::from(inputs).to_json_string_pretty()?;
                std::fs::write(&output, json)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                writeln!(
                    sink,
                    "saved state at height {height} to {}",
                    output.display()
                )?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SectorReport {
    sector_number: SectorNumber,
    activation: ChainEpoch,
    expiration: ChainEpoch,
    #[serde(with = "crate::lotus_json")]
    expected_day_reward: TokenAmount,
    #[serde(with = "crate::lotus_json")]
    penalty: TokenAmount,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TerminationReport {
    miner: String,
    height: ChainEpoch,
    sector_size: SectorSize,
    sectors: Vec<SectorReport>,
    #[serde(with = "crate::lotus_json")]
    penalty: TokenAmount,
    #[serde(rename = "PenaltyFIL")]
    penalty_fil: String,
}

impl TerminationReport {
    fn new(inputs: &PenaltyInputs) -> anyhow::Result<Self> {
        let penalties = inputs.sector_penalties()?;
        let penalty = inputs.termination_penalty()?;
        let sectors = inputs
            .sectors
            .iter()
            .zip(penalties)
            .map(|(sector, (_, penalty))| SectorReport {
                sector_number: sector.sector_number,
                activation: sector.activation,
                expiration: sector.expiration,
                expected_day_reward: sector.expected_day_reward.clone(),
                penalty,
            })
            .collect();
        Ok(Self {
            miner: inputs.miner.clone(),
            height: inputs.head.epoch(),
            sector_size: inputs.sector_size,
            sectors,
            penalty_fil: penalty.to_fil_string(),
            penalty,
        })
    }

    fn write_text(&self, sink: &mut impl Write) -> std::io::Result<()> {
        for sector in &self.sectors {
            writeln!(
                sink,
                "miner: {} sector ID: {} , start height: {}  expiration height: {},  ExpectedDayReward: {} ",
                self.miner,
                sector.sector_number,
                sector.activation,
                sector.expiration,
                sector.expected_day_reward
            )?;
        }
        writeln!(
            sink,
            "penalty for terminating sector : {} attoFIL about {} FIL",
            self.penalty, self.penalty_fil
        )
    }
}
