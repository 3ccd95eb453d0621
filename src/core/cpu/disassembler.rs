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

//! MIPS instruction disassembler for debugging
//!
//! Converts instruction words to assembly text using the same dispatch
//! tables the CPU executes from, so anything the disassembler names is
//! something the CPU can run.

use super::decode::Instruction;
use super::opcodes;

/// Operand layout of an instruction
enum Format {
    /// rd, rs, rt
    Register,
    /// rd, rt, shamt
    ShiftImmediate,
    /// rd, rt, rs
    ShiftVariable,
    /// rt, rs, signed imm
    ImmediateSigned,
    /// rt, rs, hex imm
    ImmediateLogical,
    /// rt, offset(rs)
    Memory,
    /// rs, rt, target
    BranchCompare,
    /// rs, target
    BranchZero,
    /// absolute target
    Jump,
}

fn format_of(instruction: Instruction) -> Format {
    match instruction.opcode() {
        0x00 => match instruction.function() {
            0x00..=0x03 => Format::ShiftImmediate,
            0x04..=0x07 => Format::ShiftVariable,
            _ => Format::Register,
        },
        0x01 | 0x06 | 0x07 => Format::BranchZero,
        0x02 | 0x03 => Format::Jump,
        0x04 | 0x05 => Format::BranchCompare,
        0x08..=0x0B => Format::ImmediateSigned,
        0x0C..=0x0F => Format::ImmediateLogical,
        _ => Format::Memory,
    }
}

/// Instruction disassembler
///
/// # Example
/// ```
/// use psx_core::core::cpu::Disassembler;
///
/// let disasm = Disassembler::disassemble(0x00000000, 0xBFC00000);
/// assert_eq!(disasm, "nop");
/// ```
pub struct Disassembler;

impl Disassembler {
    /// Disassemble a single instruction to human-readable format
    ///
    /// Branch and jump operands are printed as absolute target addresses.
    /// Words that do not decode to an implemented instruction come out as
    /// `.word 0x????????`.
    ///
    /// # Arguments
    ///
    /// * `instruction` - The 32-bit instruction to disassemble
    /// * `pc` - Address of the instruction (used for branch targets)
    ///
    /// # Example
    /// ```
    /// use psx_core::core::cpu::Disassembler;
    ///
    /// let disasm = Disassembler::disassemble(0x3C011234, 0xBFC00000);
    /// assert_eq!(disasm, "lui r1, 0x1234");
    /// ```
    pub fn disassemble(instruction: u32, pc: u32) -> String {
        let instr = Instruction(instruction);

        if instruction == 0 {
            return "nop".to_string();
        }

        let entry = opcodes::entry_for(instr);
        if !entry.is_defined() {
            return format!(".word 0x{:08X}", instruction);
        }

        let mnemonic = match instr.opcode() {
            0x01 => Self::bcond_mnemonic(instr),
            _ => entry.mnemonic(),
        };

        let (rs, rt, rd) = (instr.rs(), instr.rt(), instr.rd());
        let delay_slot = pc.wrapping_add(4);
        let branch_target = delay_slot.wrapping_add(instr.imm16_se() << 2);

        match format_of(instr) {
            Format::Register => match instr.function() {
                0x08 => format!("{} r{}", mnemonic, rs),
                0x09 if rd == 31 => format!("{} r{}", mnemonic, rs),
                0x09 => format!("{} r{}, r{}", mnemonic, rd, rs),
                _ => format!("{} r{}, r{}, r{}", mnemonic, rd, rs, rt),
            },
            Format::ShiftImmediate => {
                format!("{} r{}, r{}, {}", mnemonic, rd, rt, instr.shamt())
            }
            Format::ShiftVariable => format!("{} r{}, r{}, r{}", mnemonic, rd, rt, rs),
            Format::ImmediateSigned => {
                format!("{} r{}, r{}, {}", mnemonic, rt, rs, instr.imm16() as i16)
            }
            Format::ImmediateLogical if instr.opcode() == 0x0F => {
                format!("{} r{}, 0x{:04X}", mnemonic, rt, instr.imm16())
            }
            Format::ImmediateLogical => {
                format!("{} r{}, r{}, 0x{:04X}", mnemonic, rt, rs, instr.imm16())
            }
            Format::Memory => {
                format!("{} r{}, {}(r{})", mnemonic, rt, instr.imm16() as i16, rs)
            }
            Format::BranchCompare => {
                format!("{} r{}, r{}, 0x{:08X}", mnemonic, rs, rt, branch_target)
            }
            Format::BranchZero => format!("{} r{}, 0x{:08X}", mnemonic, rs, branch_target),
            Format::Jump => {
                let target = (delay_slot & 0xF000_0000) | (instr.imm26() << 2);
                format!("{} 0x{:08X}", mnemonic, target)
            }
        }
    }

    /// BCOND variant selected by the rt field
    fn bcond_mnemonic(instruction: Instruction) -> &'static str {
        let rt = instruction.rt();
        let link = (rt & 0x1E) == 0x10;
        match (rt & 0x01 != 0, link) {
            (false, false) => "bltz",
            (true, false) => "bgez",
            (false, true) => "bltzal",
            (true, true) => "bgezal",
        }
    }
}
