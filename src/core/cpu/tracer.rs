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

//! CPU execution tracer for debugging
//!
//! Logs CPU execution state to a file for analysis and debugging.

use super::{Disassembler, CPU};
use crate::core::error::Result;
use crate::core::memory::Bus;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CPU execution tracer
///
/// Records the instruction about to execute, one line per call:
///
/// ```text
/// PC=0xBFC00000 [0x24080005] addiu r8, r0, 5               | r1=00000000 r2=00000000 r3=00000000
/// ```
///
/// Lines are written per [`CPU::step`] call. A taken branch and its delay
/// slot run in one step, so the delay slot instruction has no line of its
/// own; the next line is the branch target.
///
/// An optional line limit stops output once reached; further calls are
/// no-ops.
///
/// # Example
/// ```no_run
/// use psx_core::core::cpu::{CPU, CpuTracer};
/// use psx_core::core::memory::Bus;
///
/// let mut cpu = CPU::new();
/// let mut bus = Bus::new();
/// let mut tracer = CpuTracer::new("trace.log").unwrap();
///
/// // Trace, then execute
/// tracer.trace(&cpu, &bus).unwrap();
/// cpu.step(&mut bus).unwrap();
/// ```
pub struct CpuTracer {
    /// Enable/disable tracing
    enabled: bool,
    /// Buffered output file
    output: BufWriter<File>,
    /// Lines written so far
    lines: u64,
    /// Stop after this many lines (None = unlimited)
    limit: Option<u64>,
}

impl CpuTracer {
    /// Create a new CPU tracer
    ///
    /// Opens a file for writing trace output. If the file exists, it will
    /// be overwritten.
    ///
    /// # Errors
    ///
    /// Returns `EmulatorError::Io` if the file cannot be created
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let output = BufWriter::new(File::create(path.as_ref())?);
        log::debug!("CPU trace output: {}", path.as_ref().display());
        Ok(Self {
            enabled: true,
            output,
            lines: 0,
            limit: None,
        })
    }

    /// Create a tracer that stops after `limit` lines
    pub fn with_limit<P: AsRef<Path>>(path: P, limit: u64) -> Result<Self> {
        let mut tracer = Self::new(path)?;
        tracer.limit = Some(limit);
        Ok(tracer)
    }

    /// Enable or disable tracing
    ///
    /// When disabled, trace() calls return immediately without writing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of lines written so far
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Whether the line limit has been reached
    pub fn is_exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.lines >= limit)
    }

    /// Trace the instruction at the CPU's PC
    ///
    /// Shows r1-r3 alongside the disassembly. If tracing is disabled or the
    /// limit is reached, this returns immediately.
    pub fn trace(&mut self, cpu: &CPU, bus: &Bus) -> Result<()> {
        self.trace_with_regs(cpu, bus, &[1, 2, 3])
    }

    /// Trace with custom register selection
    ///
    /// # Arguments
    ///
    /// * `cpu` - CPU instance to trace
    /// * `bus` - Memory bus for fetching the instruction
    /// * `regs` - Register numbers to display (up to 8 registers)
    ///
    /// # Example
    /// ```no_run
    /// use psx_core::core::cpu::{CPU, CpuTracer};
    /// use psx_core::core::memory::Bus;
    ///
    /// let cpu = CPU::new();
    /// let bus = Bus::new();
    /// let mut tracer = CpuTracer::new("trace.log").unwrap();
    ///
    /// // Trace with registers 4, 5, 6
    /// tracer.trace_with_regs(&cpu, &bus, &[4, 5, 6]).unwrap();
    /// ```
    pub fn trace_with_regs(&mut self, cpu: &CPU, bus: &Bus, regs: &[u8]) -> Result<()> {
        if !self.enabled || self.is_exhausted() {
            return Ok(());
        }

        let pc = cpu.pc();
        let instruction = bus.peek_u32(pc);
        let disasm = Disassembler::disassemble(instruction, pc);

        write!(
            self.output,
            "PC=0x{:08X} [0x{:08X}] {:30} |",
            pc, instruction, disasm
        )?;

        for &reg in regs.iter().take(8) {
            write!(self.output, " r{}={:08X}", reg, cpu.reg(reg))?;
        }

        writeln!(self.output)?;
        self.lines += 1;

        Ok(())
    }

    /// Flush buffered trace data to disk
    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}
