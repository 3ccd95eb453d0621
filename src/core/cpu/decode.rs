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

//! Instruction bitfield decoding
//!
//! Field layout of a MIPS-I instruction word:
//!
//! ```text
//! R-type: | op (6) | rs (5) | rt (5) | rd (5) | shamt (5) | funct (6) |
//! I-type: | op (6) | rs (5) | rt (5) |        immediate (16)          |
//! J-type: | op (6) |                 target (26)                     |
//! ```
//!
//! Extraction performs no validation; every accessor is a shift and a mask.

use crate::core::sign_extend::sext_32;

/// Raw 32-bit instruction word with field accessors
///
/// # Example
///
/// ```
/// use psx_core::core::cpu::Instruction;
///
/// // addiu r8, r0, 5
/// let instr = Instruction(0x24080005);
/// assert_eq!(instr.opcode(), 0x09);
/// assert_eq!(instr.rs(), 0);
/// assert_eq!(instr.rt(), 8);
/// assert_eq!(instr.imm16(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Instruction(pub u32);

impl Instruction {
    /// Raw instruction word
    #[inline(always)]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Primary opcode, bits [31:26]
    #[inline(always)]
    pub fn opcode(self) -> u8 {
        (self.0 >> 26) as u8
    }

    /// Source register, bits [25:21]
    #[inline(always)]
    pub fn rs(self) -> u8 {
        ((self.0 >> 21) & 0x1F) as u8
    }

    /// Target register, bits [20:16]
    #[inline(always)]
    pub fn rt(self) -> u8 {
        ((self.0 >> 16) & 0x1F) as u8
    }

    /// Destination register, bits [15:11]
    #[inline(always)]
    pub fn rd(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }

    /// Shift amount, bits [10:6]
    #[inline(always)]
    pub fn shamt(self) -> u32 {
        (self.0 >> 6) & 0x1F
    }

    /// Secondary opcode (SPECIAL function field), bits [5:0]
    #[inline(always)]
    pub fn function(self) -> u8 {
        (self.0 & 0x3F) as u8
    }

    /// 16-bit immediate, bits [15:0]
    #[inline(always)]
    pub fn imm16(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// 16-bit immediate sign-extended to 32 bits
    #[inline(always)]
    pub fn imm16_se(self) -> u32 {
        sext_32(self.imm16() as u32, 16)
    }

    /// 26-bit jump target, bits [25:0]
    #[inline(always)]
    pub fn imm26(self) -> u32 {
        self.0 & 0x03FF_FFFF
    }
}

impl From<u32> for Instruction {
    fn from(word: u32) -> Self {
        Instruction(word)
    }
}
