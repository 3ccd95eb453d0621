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

//! Headless runner
//!
//! Loads a BIOS image and executes a number of instructions, logging
//! progress and dumping registers if the CPU stops.

use clap::Parser;
use log::{error, info};
use psx_core::core::config::EmulatorConfig;
use psx_core::core::error::{EmulatorError, Result};
use psx_core::core::system::{RunOutcome, System};
use std::path::PathBuf;

/// MIPS-I console CPU core runner
#[derive(Parser)]
#[command(name = "psx-core")]
#[command(about = "Run a BIOS image on the MIPS-I CPU core", long_about = None)]
struct Args {
    /// Path to BIOS file (e.g., SCPH1001.BIN); overrides config and PSX_BIOS_PATH
    bios_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Number of instructions to execute (0 = until the CPU halts)
    #[arg(short = 'n', long)]
    instructions: Option<u64>,

    /// Write an instruction trace to this file
    #[arg(short = 't', long)]
    trace: Option<PathBuf>,

    /// Maximum number of instructions to trace (0 = unlimited)
    #[arg(long)]
    trace_limit: Option<u64>,

    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Finish successfully when an undefined opcode halts the CPU
    #[arg(long)]
    continue_on_halt: bool,
}

/// Resolve configuration: file, then environment, then command line
fn load_config(args: &Args) -> Result<EmulatorConfig> {
    let mut config = match &args.config {
        Some(path) => EmulatorConfig::from_file(path)?,
        None => EmulatorConfig::default(),
    };

    config.apply_env_overrides()?;

    if let Some(path) = &args.bios_file {
        config.bios_path = Some(path.clone());
    }
    if let Some(count) = args.instructions {
        config.instructions = count;
    }
    if let Some(path) = &args.trace {
        config.trace_path = Some(path.clone());
    }
    if let Some(limit) = args.trace_limit {
        config.trace_limit = limit;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
        config.level_filter()?;
    }
    if args.continue_on_halt {
        config.stop_on_halt = false;
    }

    Ok(config)
}

fn main() -> Result<()> {
    // Load .env file if present (for development configuration)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let args = Args::parse();
    let config = load_config(&args)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    info!("psx-core v{}", env!("CARGO_PKG_VERSION"));

    let Some(bios_path) = config.bios_path.as_ref() else {
        error!("No BIOS image given (argument, config file or PSX_BIOS_PATH)");
        return Err(EmulatorError::Config("BIOS path not set".to_string()));
    };
    info!("Loading BIOS from: {}", bios_path.display());

    let mut system = match System::from_config(&config) {
        Ok(system) => system,
        Err(e) => {
            error!("Failed to initialize: {}", e);
            return Err(e);
        }
    };

    info!("Starting emulation...");
    system.reset();

    let outcome = system.run(config.instructions)?;

    info!("Total instructions: {}", system.instructions());
    info!("Total cycles: {}", system.cycles());
    info!("Final PC: 0x{:08X}", system.pc());

    match outcome {
        RunOutcome::Completed => {
            info!("Emulation completed successfully!");
            Ok(())
        }
        RunOutcome::Halted if config.stop_on_halt => Err(EmulatorError::CpuHalted {
            pc: system.cpu().current_pc(),
        }),
        RunOutcome::Halted => {
            info!("CPU halted at PC=0x{:08X}", system.cpu().current_pc());
            Ok(())
        }
    }
}
