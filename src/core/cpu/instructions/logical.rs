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
    // === Logical Instructions ===
    //
    // Immediate forms zero-extend their 16-bit operand.

    /// AND: rd = rs & rt
    pub(in crate::core::cpu) fn op_and(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self.reg(instruction.rs()) & self.reg(instruction.rt());
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// OR: rd = rs | rt
    pub(in crate::core::cpu) fn op_or(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self.reg(instruction.rs()) | self.reg(instruction.rt());
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// XOR: rd = rs ^ rt
    pub(in crate::core::cpu) fn op_xor(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self.reg(instruction.rs()) ^ self.reg(instruction.rt());
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// NOR: rd = !(rs | rt)
    pub(in crate::core::cpu) fn op_nor(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = !(self.reg(instruction.rs()) | self.reg(instruction.rt()));
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// ANDI: rt = rs & zero_extend(imm)
    pub(in crate::core::cpu) fn op_andi(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self.reg(instruction.rs()) & instruction.imm16() as u32;
        self.write_reg(instruction.rt(), result);
        Ok(())
    }

    /// ORI: rt = rs | zero_extend(imm)
    pub(in crate::core::cpu) fn op_ori(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self.reg(instruction.rs()) | instruction.imm16() as u32;
        self.write_reg(instruction.rt(), result);
        Ok(())
    }

    /// XORI: rt = rs ^ zero_extend(imm)
    pub(in crate::core::cpu) fn op_xori(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self.reg(instruction.rs()) ^ instruction.imm16() as u32;
        self.write_reg(instruction.rt(), result);
        Ok(())
    }

    /// LUI: Load Upper Immediate
    ///
    /// Format: lui rt, imm
    /// Operation: rt = imm << 16
    pub(in crate::core::cpu) fn op_lui(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        self.write_reg(instruction.rt(), (instruction.imm16() as u32) << 16);
        Ok(())
    }
}
