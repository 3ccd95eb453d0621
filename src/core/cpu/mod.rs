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

use crate::core::error::Result;
use crate::core::memory::Bus;

/// Reset vector (BIOS entry point)
pub const RESET_VECTOR: u32 = 0xBFC0_0000;

/// CPU (MIPS R3000A) emulation implementation
///
/// # Specifications
/// - Architecture: MIPS I (32-bit), integer subset
/// - Registers: 32 general-purpose registers + PC, HI, LO
/// - One branch delay slot and one load delay slot
///
/// # Register banks
///
/// Two copies of the register file are kept. Instructions read `regs` and
/// write `out_regs`; `out_regs` is copied back into `regs` once the
/// instruction finishes. A pending load is committed into `out_regs`
/// before the next instruction runs, so that instruction still reads the
/// old value while a write it makes to the same register wins.
///
/// # Example
/// ```
/// use psx_core::core::cpu::CPU;
///
/// let mut cpu = CPU::new();
/// cpu.reset();
/// assert_eq!(cpu.reg(0), 0); // r0 is always 0
/// assert_eq!(cpu.pc(), 0xBFC00000);
/// ```
pub struct CPU {
    /// General purpose registers (r0-r31) as seen by the running instruction
    regs: [u32; 32],

    /// Register file being written by the running instruction
    out_regs: [u32; 32],

    /// Address of the next instruction to fetch
    pc: u32,

    /// Address of the instruction currently executing
    current_pc: u32,

    /// HI register (reserved for multiply/divide)
    hi: u32,

    /// LO register (reserved for multiply/divide)
    lo: u32,

    /// Branch delay slot state
    branch_delay: BranchDelay,

    /// Load delay slot state
    load_delay: LoadDelay,

    /// Current instruction (for debugging)
    current_instruction: Instruction,

    /// Undefined instruction that stopped the CPU, and its address
    halted_at: Option<(Instruction, u32)>,
}

// Module declarations
mod decode;
mod delay;
mod disassembler;
mod instructions;
pub mod opcodes;
#[cfg(test)]
mod tests;
mod tracer;

// Re-exports
pub use decode::Instruction;
pub use delay::{BranchDelay, LoadDelay};
pub use disassembler::Disassembler;
pub use tracer::CpuTracer;

impl CPU {
    /// Create a new CPU instance with initial state
    ///
    /// The CPU is initialized with the following state:
    /// - All general purpose registers: 0
    /// - PC: 0xBFC00000 (BIOS entry point)
    /// - No pending branch or load
    ///
    /// # Example
    /// ```
    /// use psx_core::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.reg(0), 0);
    /// assert!(!cpu.is_halted());
    /// ```
    pub fn new() -> Self {
        Self {
            regs: [0u32; 32],
            out_regs: [0u32; 32],
            pc: RESET_VECTOR,
            current_pc: RESET_VECTOR,
            hi: 0,
            lo: 0,
            branch_delay: BranchDelay::Idle,
            load_delay: LoadDelay::Idle,
            current_instruction: Instruction(0),
            halted_at: None,
        }
    }

    /// Reset CPU to initial state
    ///
    /// This mimics the behavior of power-on or hardware reset. It also
    /// clears the halted state left by an undefined opcode.
    pub fn reset(&mut self) {
        *self = Self::new();
        log::debug!("CPU reset, PC=0x{:08X}", self.pc);
    }

    /// Read from general purpose register
    ///
    /// Returns the value visible to the instruction currently executing.
    /// An index above 31 is reported and reads as 0.
    ///
    /// # Example
    /// ```
    /// use psx_core::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.reg(0), 0); // r0 is always 0
    /// assert_eq!(cpu.reg(40), 0); // out of range
    /// ```
    #[inline(always)]
    pub fn reg(&self, index: u8) -> u32 {
        match self.regs.get(index as usize) {
            Some(&value) => value,
            None => {
                log::error!("Read from invalid register index {}", index);
                0
            }
        }
    }

    /// Write to general purpose register from outside the pipeline
    ///
    /// Updates both register banks so the value is visible to the next
    /// instruction. Writes to r0 are ignored and an index above 31 is
    /// reported and dropped.
    ///
    /// # Example
    /// ```
    /// use psx_core::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_reg(1, 0x12345678);
    /// assert_eq!(cpu.reg(1), 0x12345678);
    ///
    /// // Writes to r0 are ignored
    /// cpu.set_reg(0, 0xDEADBEEF);
    /// assert_eq!(cpu.reg(0), 0);
    /// ```
    pub fn set_reg(&mut self, index: u8, value: u32) {
        self.write_reg(index, value);
        self.regs = self.out_regs;
    }

    /// Write a register result for the running instruction
    ///
    /// r0 is forced back to zero after every write.
    #[inline(always)]
    pub(in crate::core::cpu) fn write_reg(&mut self, index: u8, value: u32) {
        match self.out_regs.get_mut(index as usize) {
            Some(slot) => *slot = value,
            None => {
                log::error!("Write to invalid register index {}", index);
                return;
            }
        }
        self.out_regs[0] = 0;
    }

    /// Register value including a load committed this cycle
    ///
    /// Used by LWL/LWR, which merge into the value a load in flight is
    /// about to deliver.
    #[inline(always)]
    pub(in crate::core::cpu) fn in_flight_reg(&self, index: u8) -> u32 {
        self.out_regs.get(index as usize).copied().unwrap_or(0)
    }

    /// Queue a load result behind the load delay slot
    #[inline(always)]
    pub(in crate::core::cpu) fn schedule_load(&mut self, index: u8, value: u32) {
        self.load_delay.schedule(index, value);
    }

    /// Request a control transfer after the delay slot
    pub(in crate::core::cpu) fn jump_to(&mut self, target: u32) {
        if !self.branch_delay.take_branch(target) {
            log::warn!(
                "Branch to 0x{:08X} in delay slot at PC=0x{:08X} ignored",
                target,
                self.current_pc
            );
        }
    }

    /// Execute one instruction
    ///
    /// Fetches the word at PC and executes it. When the instruction takes a
    /// branch, the delay slot instruction runs in the same call and PC ends
    /// up at the branch target.
    ///
    /// # Arguments
    ///
    /// * `bus` - Memory bus for reading instructions and data
    ///
    /// # Returns
    ///
    /// Number of cycles consumed, including the delay slot when it ran
    ///
    /// # Errors
    ///
    /// [`EmulatorError::UnsupportedInstruction`] when an undefined opcode is
    /// reached. The CPU halts and returns the same error on every call after
    /// that until [`CPU::reset`].
    ///
    /// [`EmulatorError::UnsupportedInstruction`]: crate::core::error::EmulatorError::UnsupportedInstruction
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::cpu::CPU;
    /// use psx_core::core::memory::Bus;
    ///
    /// let mut cpu = CPU::new();
    /// let mut bus = Bus::new();
    ///
    /// // ori r1, r0, 0x42 in RAM
    /// bus.write_u32(0xA0000000, 0x3401_0042);
    /// cpu.set_pc(0xA0000000);
    ///
    /// let cycles = cpu.step(&mut bus).unwrap();
    /// assert_eq!(cycles, 1);
    /// assert_eq!(cpu.reg(1), 0x42);
    /// ```
    pub fn step(&mut self, bus: &mut Bus) -> Result<u32> {
        if let Some((instruction, pc)) = self.halted_at {
            return Err(Self::unsupported(instruction, pc));
        }

        // Instruction fetch
        self.current_pc = self.pc;
        let instruction = Instruction(bus.read_u32(self.pc));
        self.pc = self.pc.wrapping_add(4);

        // The following word is the delay slot if this is a taken branch
        self.branch_delay.prime(bus.peek_u32(self.pc));

        let mut cycles = self.execute(instruction, bus)?;

        if let Some((slot, target)) = self.branch_delay.resolve() {
            self.current_pc = self.pc;
            self.pc = self.pc.wrapping_add(4);
            cycles += self.execute(Instruction(slot), bus)?;
            self.pc = target;
        }

        Ok(cycles)
    }

    /// Run one instruction word through the dispatch tables
    fn execute(&mut self, instruction: Instruction, bus: &mut Bus) -> Result<u32> {
        self.current_instruction = instruction;

        // Resolve load delay from the previous instruction
        if let Some((reg, value)) = self.load_delay.take() {
            self.write_reg(reg, value);
        }

        let entry = opcodes::primary_entry(instruction.opcode());
        log::trace!(
            "0x{:08X}: 0x{:08X} {}",
            self.current_pc,
            instruction.raw(),
            entry.mnemonic()
        );

        let result = (entry.handler)(self, instruction, bus);
        self.regs = self.out_regs;
        result?;

        Ok(opcodes::entry_for(instruction).cycles())
    }

    /// Get current PC value (address of the next instruction to fetch)
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Redirect execution
    ///
    /// Any pending branch is dropped. A pending load is kept.
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
        self.branch_delay = BranchDelay::Idle;
    }

    /// Address of the most recently executed instruction
    pub fn current_pc(&self) -> u32 {
        self.current_pc
    }

    /// Most recently executed instruction word
    pub fn current_instruction(&self) -> Instruction {
        self.current_instruction
    }

    /// Load waiting to land in a register, as `(register, value)`
    pub fn pending_load(&self) -> Option<(u8, u32)> {
        self.load_delay.pending()
    }

    pub fn hi(&self) -> u32 {
        self.hi
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    /// Whether an undefined opcode stopped the CPU
    pub fn is_halted(&self) -> bool {
        self.halted_at.is_some()
    }

    /// Log all CPU registers at info level
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psx_core::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// cpu.dump_registers();
    /// ```
    pub fn dump_registers(&self) {
        log::info!("CPU Registers:");
        log::info!(
            "PC: 0x{:08X}  Current PC: 0x{:08X}",
            self.pc,
            self.current_pc
        );
        log::info!("HI: 0x{:08X}  LO: 0x{:08X}", self.hi, self.lo);

        // General-purpose registers in rows of 4
        for (index, values) in self.regs.chunks(4).enumerate() {
            let line = values
                .iter()
                .enumerate()
                .map(|(i, value)| format!("r{:2}: 0x{:08X}", index * 4 + i, value))
                .collect::<Vec<_>>()
                .join("  ");
            log::info!("{}", line);
        }

        if let Some((reg, value)) = self.load_delay.pending() {
            log::info!("Pending load: r{} <- 0x{:08X}", reg, value);
        }
        if let Some((instruction, pc)) = self.halted_at {
            log::info!("CPU halted on 0x{:08X} at 0x{:08X}", instruction.raw(), pc);
        }
    }
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}
