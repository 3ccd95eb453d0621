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
    // === Arithmetic Instructions ===

    /// Report a signed overflow
    ///
    /// The overflow trap is not delivered; the destination keeps its value.
    fn overflow(&self, mnemonic: &str, a: u32, b: u32) {
        log::warn!(
            "{} overflow (0x{:08X}, 0x{:08X}) at PC=0x{:08X}, result discarded",
            mnemonic,
            a,
            b,
            self.current_pc
        );
    }

    /// ADD: Add (with overflow check)
    ///
    /// Format: add rd, rs, rt
    /// Operation: rd = rs + rt
    pub(in crate::core::cpu) fn op_add(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let a = self.reg(instruction.rs());
        let b = self.reg(instruction.rt());

        match (a as i32).checked_add(b as i32) {
            Some(result) => self.write_reg(instruction.rd(), result as u32),
            None => self.overflow("add", a, b),
        }
        Ok(())
    }

    /// ADDU: Add Unsigned (no overflow check)
    ///
    /// Format: addu rd, rs, rt
    /// Operation: rd = rs + rt (mod 2^32)
    pub(in crate::core::cpu) fn op_addu(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self
            .reg(instruction.rs())
            .wrapping_add(self.reg(instruction.rt()));
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// ADDI: Add Immediate (with overflow check)
    ///
    /// Format: addi rt, rs, imm
    /// Operation: rt = rs + sign_extend(imm)
    pub(in crate::core::cpu) fn op_addi(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let a = self.reg(instruction.rs());
        let imm = instruction.imm16_se();

        match (a as i32).checked_add(imm as i32) {
            Some(result) => self.write_reg(instruction.rt(), result as u32),
            None => self.overflow("addi", a, imm),
        }
        Ok(())
    }

    /// ADDIU: Add Immediate Unsigned (no overflow check)
    ///
    /// Despite the name, the immediate is sign-extended.
    ///
    /// Format: addiu rt, rs, imm
    /// Operation: rt = rs + sign_extend(imm)
    pub(in crate::core::cpu) fn op_addiu(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self
            .reg(instruction.rs())
            .wrapping_add(instruction.imm16_se());
        self.write_reg(instruction.rt(), result);
        Ok(())
    }

    /// SUB: Subtract (with overflow check)
    ///
    /// Format: sub rd, rs, rt
    /// Operation: rd = rs - rt
    pub(in crate::core::cpu) fn op_sub(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let a = self.reg(instruction.rs());
        let b = self.reg(instruction.rt());

        match (a as i32).checked_sub(b as i32) {
            Some(result) => self.write_reg(instruction.rd(), result as u32),
            None => self.overflow("sub", a, b),
        }
        Ok(())
    }

    /// SUBU: Subtract Unsigned (no overflow check)
    ///
    /// Format: subu rd, rs, rt
    /// Operation: rd = rs - rt (mod 2^32)
    pub(in crate::core::cpu) fn op_subu(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self
            .reg(instruction.rs())
            .wrapping_sub(self.reg(instruction.rt()));
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SLT: Set on Less Than (signed)
    ///
    /// Format: slt rd, rs, rt
    /// Operation: rd = (rs < rt) ? 1 : 0
    pub(in crate::core::cpu) fn op_slt(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let a = self.reg(instruction.rs()) as i32;
        let b = self.reg(instruction.rt()) as i32;
        self.write_reg(instruction.rd(), (a < b) as u32);
        Ok(())
    }

    /// SLTU: Set on Less Than Unsigned
    ///
    /// Format: sltu rd, rs, rt
    /// Operation: rd = (rs < rt) ? 1 : 0
    pub(in crate::core::cpu) fn op_sltu(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let a = self.reg(instruction.rs());
        let b = self.reg(instruction.rt());
        self.write_reg(instruction.rd(), (a < b) as u32);
        Ok(())
    }

    /// SLTI: Set on Less Than Immediate (signed)
    ///
    /// Format: slti rt, rs, imm
    /// Operation: rt = (rs < sign_extend(imm)) ? 1 : 0
    pub(in crate::core::cpu) fn op_slti(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let a = self.reg(instruction.rs()) as i32;
        let imm = instruction.imm16_se() as i32;
        self.write_reg(instruction.rt(), (a < imm) as u32);
        Ok(())
    }

    /// SLTIU: Set on Less Than Immediate Unsigned
    ///
    /// The immediate is sign-extended, then both sides compare unsigned.
    ///
    /// Format: sltiu rt, rs, imm
    /// Operation: rt = (rs < sign_extend(imm)) ? 1 : 0 (unsigned)
    pub(in crate::core::cpu) fn op_sltiu(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let a = self.reg(instruction.rs());
        let imm = instruction.imm16_se();
        self.write_reg(instruction.rt(), (a < imm) as u32);
        Ok(())
    }
}
