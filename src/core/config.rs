// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Emulator configuration
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. A TOML file (every key optional)
//! 2. Environment variables (`PSX_BIOS_PATH`, `PSX_INSTRUCTIONS`)
//! 3. Command line flags, applied by the binary
//!
//! ```toml
//! bios_path = "bios/SCPH1001.BIN"
//! instructions = 100000
//! log_level = "debug"
//! trace_path = "trace.log"
//! trace_limit = 5000
//! stop_on_halt = true
//! ```

use super::error::{EmulatorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable naming the BIOS image
pub const ENV_BIOS_PATH: &str = "PSX_BIOS_PATH";

/// Environment variable overriding the instruction count
pub const ENV_INSTRUCTIONS: &str = "PSX_INSTRUCTIONS";

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmulatorConfig {
    /// BIOS image to load (must be exactly 512KB)
    pub bios_path: Option<PathBuf>,

    /// Number of instructions to execute (0 = until the CPU stops)
    pub instructions: u64,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Write an instruction trace here when set
    pub trace_path: Option<PathBuf>,

    /// Maximum number of traced instructions (0 = unlimited)
    pub trace_limit: u64,

    /// Treat an undefined opcode as a failure. When false the runner
    /// reports the halt and finishes normally, which lets test programs
    /// use an undefined word as a terminator.
    pub stop_on_halt: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            bios_path: None,
            instructions: 100_000,
            log_level: "info".to_string(),
            trace_path: None,
            trace_limit: 0,
            stop_on_halt: true,
        }
    }
}

impl FromStr for EmulatorConfig {
    type Err = EmulatorError;

    fn from_str(s: &str) -> Result<Self> {
        let config: EmulatorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl EmulatorConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// - `EmulatorError::Io` if the file cannot be read
    /// - `EmulatorError::Config` on malformed TOML, unknown keys or
    ///   invalid values
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = text.parse::<Self>()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EmulatorError::Config(e.to_string()))
    }

    /// Apply `PSX_BIOS_PATH` / `PSX_INSTRUCTIONS` from the process
    /// environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = get(ENV_BIOS_PATH) {
            log::debug!("{} overrides BIOS path: {}", ENV_BIOS_PATH, path);
            self.bios_path = Some(PathBuf::from(path));
        }

        if let Some(count) = get(ENV_INSTRUCTIONS) {
            self.instructions = count.trim().parse().map_err(|_| {
                EmulatorError::Config(format!(
                    "{} must be a non-negative integer, got {:?}",
                    ENV_INSTRUCTIONS, count
                ))
            })?;
        }

        self.validate()
    }

    /// Parsed form of [`EmulatorConfig::log_level`]
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| EmulatorError::Config(format!("unknown log level {:?}", self.log_level)))
    }

    fn validate(&self) -> Result<()> {
        self.level_filter()?;
        if self.trace_limit > 0 && self.trace_path.is_none() {
            log::warn!("trace_limit is set but trace_path is not; tracing stays off");
        }
        Ok(())
    }
}
