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
    // === Branch Instructions ===

    /// Handle BCOND instructions (opcode 0x01)
    ///
    /// BCOND instructions include BLTZ, BGEZ, BLTZAL, and BGEZAL.
    /// The rt field determines which specific branch instruction it is:
    /// - Bit 0: BGEZ (1) vs BLTZ (0)
    /// - rt = 0x10/0x11: link forms
    ///
    /// Other rt encodings behave like the plain compare, as on hardware.
    ///
    /// The link forms write r31 whether or not the branch is taken. The
    /// comparison reads rs as it was before this instruction.
    pub(in crate::core::cpu) fn op_bcond(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let rt = instruction.rt();
        let is_bgez = (rt & 0x01) != 0;
        let is_link = (rt & 0x1E) == 0x10;

        if is_link {
            self.write_reg(31, self.return_address());
        }

        let non_negative = (self.reg(instruction.rs()) as i32) >= 0;
        if non_negative == is_bgez {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BEQ: Branch on Equal
    ///
    /// Format: beq rs, rt, offset
    /// Operation: if (rs == rt) PC = delay_slot + (sign_extend(offset) << 2)
    pub(in crate::core::cpu) fn op_beq(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        if self.reg(instruction.rs()) == self.reg(instruction.rt()) {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BNE: Branch on Not Equal
    ///
    /// Format: bne rs, rt, offset
    pub(in crate::core::cpu) fn op_bne(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        if self.reg(instruction.rs()) != self.reg(instruction.rt()) {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BLEZ: Branch on Less Than or Equal to Zero (signed)
    ///
    /// Format: blez rs, offset
    pub(in crate::core::cpu) fn op_blez(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        if (self.reg(instruction.rs()) as i32) <= 0 {
            self.branch(instruction);
        }
        Ok(())
    }

    /// BGTZ: Branch on Greater Than Zero (signed)
    ///
    /// Format: bgtz rs, offset
    pub(in crate::core::cpu) fn op_bgtz(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        if (self.reg(instruction.rs()) as i32) > 0 {
            self.branch(instruction);
        }
        Ok(())
    }

    /// Take a PC-relative branch
    ///
    /// During execution `self.pc` already holds the delay slot address
    /// (B + 4), so the target is `(B + 4) + (sign_extend(offset) << 2)`.
    pub(in crate::core::cpu) fn branch(&mut self, instruction: Instruction) {
        let offset = instruction.imm16_se() << 2;
        let target = self.pc.wrapping_add(offset);
        self.jump_to(target);
    }
}
