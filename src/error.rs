// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::sector::SectorNumber;

/// Failures of the penalty calculation.
///
/// Arithmetic is done on arbitrary-precision integers, so the only overflow
/// that can occur is in epoch arithmetic on [`crate::sector::ChainEpoch`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("arithmetic overflow: {0}")]
    Overflow(String),
    #[error("sector {sector_number}: {source}")]
    Sector {
        sector_number: SectorNumber,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    /// Attaches the identity of the sector whose computation failed.
    pub fn for_sector(self, sector_number: SectorNumber) -> Self {
        Self::Sector {
            sector_number,
            source: Box::new(self),
        }
    }

    /// The error with any sector context stripped.
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Sector { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
