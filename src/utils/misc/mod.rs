// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use is_terminal::IsTerminal;

#[derive(Debug, Default, Clone, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum LoggingColor {
    Always,
    #[default]
    Auto,
    Never,
}

impl LoggingColor {
    /// Logs go to stderr, so that is the stream checked in `Auto` mode.
    pub fn coloring_enabled(&self) -> bool {
        match self {
            LoggingColor::Auto => std::io::stderr().is_terminal(),
            LoggingColor::Always => true,
            LoggingColor::Never => false,
        }
    }
}
