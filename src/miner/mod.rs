// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod monies;
mod power;
mod termination;

pub use monies::*;
pub use power::*;
pub use termination::*;
