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

//! System integration module
//!
//! Owns the CPU and the memory bus, keeps the running cycle count and
//! optionally traces every instruction to a file.

use super::config::EmulatorConfig;
use super::cpu::{CpuTracer, CPU};
use super::error::{EmulatorError, Result};
use super::memory::Bus;
use std::path::Path;

/// How a [`System::run`] call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The requested number of instructions ran
    Completed,
    /// The CPU reached an undefined opcode and stopped
    Halted,
}

/// Console system: CPU plus memory bus
///
/// # Example
/// ```
/// use psx_core::core::system::System;
///
/// let mut system = System::new();
/// system.load_bios_bytes(&vec![0u8; 0x80000]).unwrap();
/// system.step_n(4).unwrap(); // four NOPs
/// assert_eq!(system.pc(), 0xBFC00010);
/// assert_eq!(system.cycles(), 4);
/// ```
pub struct System {
    /// CPU instance
    cpu: CPU,
    /// Memory bus
    bus: Bus,
    /// Total cycles executed
    cycles: u64,
    /// Total `step()` calls that completed
    instructions: u64,
    /// CPU tracer for debugging (optional)
    tracer: Option<CpuTracer>,
}

impl System {
    /// Create a new System instance with all components at reset state
    pub fn new() -> Self {
        Self {
            cpu: CPU::new(),
            bus: Bus::new(),
            cycles: 0,
            instructions: 0,
            tracer: None,
        }
    }

    /// Build a system from configuration
    ///
    /// Loads the BIOS when `bios_path` is set and opens the trace file when
    /// `trace_path` is set.
    pub fn from_config(config: &EmulatorConfig) -> Result<Self> {
        let mut system = Self::new();

        if let Some(path) = &config.bios_path {
            system.load_bios(path)?;
        }

        if let Some(path) = &config.trace_path {
            system.enable_tracing(path, config.trace_limit)?;
        }

        Ok(system)
    }

    /// Load BIOS from file
    ///
    /// # Errors
    ///
    /// - `EmulatorError::BiosNotFound` if the file cannot be opened
    /// - `EmulatorError::InvalidBiosSize` if it is not exactly 512KB
    pub fn load_bios<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.bus.load_bios(path)
    }

    /// Load a BIOS image already in memory
    pub fn load_bios_bytes(&mut self, image: &[u8]) -> Result<()> {
        self.bus.load_bios_bytes(image)
    }

    /// Reset the CPU and memory; the BIOS image is kept
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.cycles = 0;
        self.instructions = 0;
        log::info!("System reset");
    }

    /// Execute one CPU step
    ///
    /// # Returns
    ///
    /// Cycles consumed, including a taken branch's delay slot
    pub fn step(&mut self) -> Result<u32> {
        if let Some(tracer) = self.tracer.as_mut() {
            if !tracer.is_exhausted() {
                if let Err(e) = tracer.trace(&self.cpu, &self.bus) {
                    log::warn!("Failed to write trace: {}", e);
                }

                let lines = tracer.lines_written();
                if lines.is_multiple_of(100) || tracer.is_exhausted() {
                    let _ = tracer.flush();
                }
                if tracer.is_exhausted() {
                    log::info!("Trace limit reached ({} instructions)", lines);
                }
            }
        }

        let cpu_cycles = self.cpu.step(&mut self.bus)?;
        self.cycles += cpu_cycles as u64;
        self.instructions += 1;

        Ok(cpu_cycles)
    }

    /// Execute exactly `n` steps unless an error occurs
    pub fn step_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Run `count` steps with progress logging (0 = until the CPU halts)
    ///
    /// An undefined opcode ends the run with [`RunOutcome::Halted`] instead
    /// of an error; registers are dumped to the log. Other errors are
    /// returned.
    pub fn run(&mut self, count: u64) -> Result<RunOutcome> {
        let log_interval = if count == 0 {
            1_000_000
        } else {
            (count / 10).max(1)
        };

        let mut executed = 0u64;
        while count == 0 || executed < count {
            if executed > 0 && executed % log_interval == 0 {
                log::info!(
                    "Progress: {} instructions | PC: 0x{:08X} | Cycles: {}",
                    executed,
                    self.pc(),
                    self.cycles
                );
            }

            match self.step() {
                Ok(_) => executed += 1,
                Err(e @ EmulatorError::UnsupportedInstruction { .. }) => {
                    log::error!("{}", e);
                    log::error!("Instruction count: {}", executed);
                    self.cpu.dump_registers();
                    self.flush_trace();
                    return Ok(RunOutcome::Halted);
                }
                Err(e) => {
                    self.flush_trace();
                    return Err(e);
                }
            }
        }

        self.flush_trace();
        Ok(RunOutcome::Completed)
    }

    /// Enable CPU execution tracing to a file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the trace file to write
    /// * `limit` - Maximum number of instructions to trace (0 = unlimited)
    pub fn enable_tracing<P: AsRef<Path>>(&mut self, path: P, limit: u64) -> Result<()> {
        let tracer = if limit == 0 {
            CpuTracer::new(path.as_ref())?
        } else {
            CpuTracer::with_limit(path.as_ref(), limit)?
        };
        log::info!("CPU tracing enabled: {}", path.as_ref().display());
        self.tracer = Some(tracer);
        Ok(())
    }

    /// Disable tracing, flushing anything buffered
    pub fn disable_tracing(&mut self) {
        self.flush_trace();
        self.tracer = None;
    }

    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }

    /// Number of instructions traced so far
    pub fn trace_count(&self) -> u64 {
        self.tracer.as_ref().map_or(0, CpuTracer::lines_written)
    }

    fn flush_trace(&mut self) {
        if let Some(tracer) = self.tracer.as_mut() {
            if let Err(e) = tracer.flush() {
                log::warn!("Failed to flush trace: {}", e);
            }
        }
    }

    /// Address of the next instruction to fetch
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Total cycles executed since the last reset
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Completed steps since the last reset
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
