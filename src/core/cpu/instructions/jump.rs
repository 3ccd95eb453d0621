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

use super::super::decode::Instruction;
use super::super::CPU;
use crate::core::error::Result;
use crate::core::memory::Bus;

impl CPU {
    // === Jump Instructions ===

    /// J: Jump
    ///
    /// The target combines the upper 4 bits of the delay slot address with
    /// the 26-bit target field shifted left by 2.
    ///
    /// Format: j target
    /// Operation: PC = (PC & 0xF0000000) | (target << 2)
    pub(in crate::core::cpu) fn op_j(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let target = (self.pc & 0xF000_0000) | (instruction.imm26() << 2);
        self.jump_to(target);
        Ok(())
    }

    /// JAL: Jump and Link
    ///
    /// Saves the address of the instruction after the delay slot in r31.
    ///
    /// Format: jal target
    /// Operation: r31 = B + 8; PC = (PC & 0xF0000000) | (target << 2)
    pub(in crate::core::cpu) fn op_jal(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        self.write_reg(31, self.return_address());
        self.op_j(instruction, bus)
    }

    /// JR: Jump Register
    ///
    /// Format: jr rs
    /// Operation: PC = rs
    pub(in crate::core::cpu) fn op_jr(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let target = self.reg(instruction.rs());
        self.jump_to(target);
        Ok(())
    }

    /// JALR: Jump And Link Register
    ///
    /// The return address goes to rd (conventionally r31). The target is
    /// read before the link is written, so `jalr r31, r31` jumps to the old
    /// r31.
    ///
    /// Format: jalr rd, rs
    /// Operation: rd = B + 8; PC = rs
    pub(in crate::core::cpu) fn op_jalr(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let target = self.reg(instruction.rs());
        self.write_reg(instruction.rd(), self.return_address());
        self.jump_to(target);
        Ok(())
    }

    /// Address of the instruction after the delay slot
    #[inline(always)]
    pub(in crate::core::cpu) fn return_address(&self) -> u32 {
        self.pc.wrapping_add(4)
    }
}
