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

//! Opcode dispatch tables
//!
//! Two immutable 64-entry tables map a 6-bit opcode to its handler and
//! declared cycle cost:
//!
//! - `PRIMARY`, indexed by bits [31:26]
//! - `SECONDARY`, indexed by the function field for SPECIAL (opcode 0x00)
//!
//! Both are built at compile time. Every slot that is not filled in routes
//! to [`CPU::op_undefined`], which halts the CPU.

use super::decode::Instruction;
use super::CPU;
use crate::core::error::Result;
use crate::core::memory::Bus;
use std::fmt;

/// Instruction handler signature
///
/// Handlers get exclusive access to the CPU and bus for the duration of one
/// call and keep no references afterwards.
pub(super) type Handler = fn(&mut CPU, Instruction, &mut Bus) -> Result<()>;

/// One dispatch table slot
#[derive(Clone, Copy)]
pub struct OpcodeEntry {
    pub(super) handler: Handler,
    cycles: u32,
    mnemonic: &'static str,
    defined: bool,
}

impl OpcodeEntry {
    const fn new(handler: Handler, cycles: u32, mnemonic: &'static str) -> Self {
        Self {
            handler,
            cycles,
            mnemonic,
            defined: true,
        }
    }

    const fn undefined() -> Self {
        Self {
            handler: CPU::op_undefined,
            cycles: 1,
            mnemonic: "undefined",
            defined: false,
        }
    }

    /// Declared cycle cost
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Lower-case assembler mnemonic
    pub fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    /// Whether this slot holds a real instruction
    pub fn is_defined(&self) -> bool {
        self.defined
    }
}

impl fmt::Debug for OpcodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpcodeEntry")
            .field("mnemonic", &self.mnemonic)
            .field("cycles", &self.cycles)
            .field("defined", &self.defined)
            .finish()
    }
}

static PRIMARY: [OpcodeEntry; 64] = build_primary();
static SECONDARY: [OpcodeEntry; 64] = build_secondary();

const fn build_primary() -> [OpcodeEntry; 64] {
    let mut table = [OpcodeEntry::undefined(); 64];

    table[0x00] = OpcodeEntry::new(CPU::op_special, 1, "special");
    table[0x01] = OpcodeEntry::new(CPU::op_bcond, 1, "bcond");
    table[0x02] = OpcodeEntry::new(CPU::op_j, 1, "j");
    table[0x03] = OpcodeEntry::new(CPU::op_jal, 1, "jal");
    table[0x04] = OpcodeEntry::new(CPU::op_beq, 1, "beq");
    table[0x05] = OpcodeEntry::new(CPU::op_bne, 1, "bne");
    table[0x06] = OpcodeEntry::new(CPU::op_blez, 1, "blez");
    table[0x07] = OpcodeEntry::new(CPU::op_bgtz, 1, "bgtz");

    table[0x08] = OpcodeEntry::new(CPU::op_addi, 1, "addi");
    table[0x09] = OpcodeEntry::new(CPU::op_addiu, 1, "addiu");
    table[0x0A] = OpcodeEntry::new(CPU::op_slti, 1, "slti");
    table[0x0B] = OpcodeEntry::new(CPU::op_sltiu, 1, "sltiu");
    table[0x0C] = OpcodeEntry::new(CPU::op_andi, 1, "andi");
    table[0x0D] = OpcodeEntry::new(CPU::op_ori, 1, "ori");
    table[0x0E] = OpcodeEntry::new(CPU::op_xori, 1, "xori");
    table[0x0F] = OpcodeEntry::new(CPU::op_lui, 1, "lui");

    table[0x20] = OpcodeEntry::new(CPU::op_lb, 1, "lb");
    table[0x21] = OpcodeEntry::new(CPU::op_lh, 1, "lh");
    table[0x22] = OpcodeEntry::new(CPU::op_lwl, 1, "lwl");
    table[0x23] = OpcodeEntry::new(CPU::op_lw, 1, "lw");
    table[0x24] = OpcodeEntry::new(CPU::op_lbu, 1, "lbu");
    table[0x25] = OpcodeEntry::new(CPU::op_lhu, 1, "lhu");
    table[0x26] = OpcodeEntry::new(CPU::op_lwr, 1, "lwr");

    table[0x28] = OpcodeEntry::new(CPU::op_sb, 1, "sb");
    table[0x29] = OpcodeEntry::new(CPU::op_sh, 1, "sh");
    table[0x2A] = OpcodeEntry::new(CPU::op_swl, 1, "swl");
    table[0x2B] = OpcodeEntry::new(CPU::op_sw, 1, "sw");
    table[0x2E] = OpcodeEntry::new(CPU::op_swr, 1, "swr");

    table
}

const fn build_secondary() -> [OpcodeEntry; 64] {
    let mut table = [OpcodeEntry::undefined(); 64];

    table[0x00] = OpcodeEntry::new(CPU::op_sll, 1, "sll");
    table[0x02] = OpcodeEntry::new(CPU::op_srl, 1, "srl");
    table[0x03] = OpcodeEntry::new(CPU::op_sra, 1, "sra");
    table[0x04] = OpcodeEntry::new(CPU::op_sllv, 1, "sllv");
    table[0x06] = OpcodeEntry::new(CPU::op_srlv, 1, "srlv");
    table[0x07] = OpcodeEntry::new(CPU::op_srav, 1, "srav");

    table[0x08] = OpcodeEntry::new(CPU::op_jr, 1, "jr");
    table[0x09] = OpcodeEntry::new(CPU::op_jalr, 1, "jalr");

    table[0x20] = OpcodeEntry::new(CPU::op_add, 1, "add");
    table[0x21] = OpcodeEntry::new(CPU::op_addu, 1, "addu");
    table[0x22] = OpcodeEntry::new(CPU::op_sub, 1, "sub");
    table[0x23] = OpcodeEntry::new(CPU::op_subu, 1, "subu");
    table[0x24] = OpcodeEntry::new(CPU::op_and, 1, "and");
    table[0x25] = OpcodeEntry::new(CPU::op_or, 1, "or");
    table[0x26] = OpcodeEntry::new(CPU::op_xor, 1, "xor");
    table[0x27] = OpcodeEntry::new(CPU::op_nor, 1, "nor");
    table[0x2A] = OpcodeEntry::new(CPU::op_slt, 1, "slt");
    table[0x2B] = OpcodeEntry::new(CPU::op_sltu, 1, "sltu");

    table
}

/// Primary table entry for a 6-bit opcode
///
/// # Example
///
/// ```
/// use psx_core::core::cpu::opcodes;
///
/// assert_eq!(opcodes::primary_entry(0x09).mnemonic(), "addiu");
/// assert!(!opcodes::primary_entry(0x3F).is_defined());
/// ```
#[inline(always)]
pub fn primary_entry(opcode: u8) -> &'static OpcodeEntry {
    &PRIMARY[(opcode & 0x3F) as usize]
}

/// Secondary (SPECIAL) table entry for a 6-bit function field
#[inline(always)]
pub fn secondary_entry(function: u8) -> &'static OpcodeEntry {
    &SECONDARY[(function & 0x3F) as usize]
}

/// Final table entry an instruction dispatches to
///
/// SPECIAL instructions resolve through the secondary table.
pub fn entry_for(instruction: Instruction) -> &'static OpcodeEntry {
    match instruction.opcode() {
        0x00 => secondary_entry(instruction.function()),
        opcode => primary_entry(opcode),
    }
}
