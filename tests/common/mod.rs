// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::PathBuf;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use tempfile::TempDir;

pub fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("forest-sector-penalty");
    cmd.env_remove("FULLNODE_API_INFO")
        .env_remove("FOREST_SECTOR_PENALTY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Height 1_000_000 with a zero reward estimate, so that every sector pays
/// its storage pledge plus half a day reward per day of age:
/// sector 1 is 10 days old (25_000_000) and sector 2 is 200 days old
/// (90_000_000, capped at 140 days).
pub const SNAPSHOT: &str = r#"{
    "Miner": "f01000",
    "Height": 1000000,
    "ThisEpochRewardSmoothed": {
        "PositionEstimate": "0",
        "VelocityEstimate": "0"
    },
    "ThisEpochQAPowerSmoothed": {
        "PositionEstimate": "392318858461667547739736838950479151006397215279002157056",
        "VelocityEstimate": "0"
    },
    "Sectors": [
        {
            "SectorNumber": 1,
            "Activation": 971200,
            "Expiration": 2000000,
            "DealWeight": "0",
            "VerifiedDealWeight": "0",
            "InitialPledge": "0",
            "ExpectedDayReward": "1000000",
            "ExpectedStoragePledge": "20000000",
            "SealProof": 8,
            "ReplacedSectorAge": null,
            "ReplacedDayReward": null
        },
        {
            "SectorNumber": 2,
            "Activation": 424000,
            "Expiration": 2000000,
            "DealWeight": "0",
            "VerifiedDealWeight": "0",
            "InitialPledge": "0",
            "ExpectedDayReward": "1000000",
            "ExpectedStoragePledge": "20000000"
        }
    ]
}"#;

pub fn create_tmp_snapshot() -> (PathBuf, TempDir) {
    let temp_dir = tempfile::tempdir().expect("couldn't create temp dir");
    let snapshot_path = temp_dir.path().join("snapshot.json");
    std::fs::write(&snapshot_path, SNAPSHOT).expect("couldn't write snapshot");
    (snapshot_path, temp_dir)
}
