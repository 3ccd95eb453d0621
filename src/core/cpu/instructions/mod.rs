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

//! CPU instruction implementations
//!
//! This module contains the MIPS R3000A instruction handlers, organized by
//! instruction type. Every handler has the [`Handler`](super::opcodes)
//! signature so it can sit in a dispatch table.

use super::decode::Instruction;
use super::opcodes;
use super::CPU;
use crate::core::error::{EmulatorError, Result};
use crate::core::memory::Bus;

// Instruction modules organized by type
mod arithmetic;
mod branch;
mod jump;
mod load;
mod logical;
mod shift;
mod store;

impl CPU {
    /// Handle SPECIAL instructions (opcode 0x00)
    ///
    /// SPECIAL instructions use the lower 6 bits (funct field) to select
    /// the operation from the secondary dispatch table.
    pub(in crate::core::cpu) fn op_special(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let entry = opcodes::secondary_entry(instruction.function());
        (entry.handler)(self, instruction, bus)
    }

    /// Undefined instruction
    ///
    /// There is no exception path yet, so an unimplemented opcode stops the
    /// CPU. Every following `step()` returns the same error until `reset()`.
    pub(in crate::core::cpu) fn op_undefined(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        self.halted_at = Some((instruction, self.current_pc));

        log::error!(
            "Undefined instruction 0x{:08X} (opcode 0x{:02X}, funct 0x{:02X}) at PC=0x{:08X}",
            instruction.raw(),
            instruction.opcode(),
            instruction.function(),
            self.current_pc
        );

        Err(Self::unsupported(instruction, self.current_pc))
    }

    /// Error reported for an undefined instruction at `pc`
    pub(in crate::core::cpu) fn unsupported(instruction: Instruction, pc: u32) -> EmulatorError {
        EmulatorError::UnsupportedInstruction {
            instruction: instruction.raw(),
            opcode: instruction.opcode(),
            function: instruction.function(),
            pc,
        }
    }

    /// Effective address for loads and stores: rs + sign_extend(imm16)
    #[inline(always)]
    pub(in crate::core::cpu) fn effective_address(&self, instruction: Instruction) -> u32 {
        self.reg(instruction.rs())
            .wrapping_add(instruction.imm16_se())
    }
}
