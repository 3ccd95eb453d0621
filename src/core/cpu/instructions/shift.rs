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
    // === Shift Instructions ===

    /// SLL: Shift Left Logical
    ///
    /// `sll r0, r0, 0` (0x00000000) is the canonical NOP.
    ///
    /// Format: sll rd, rt, shamt
    /// Operation: rd = rt << shamt
    pub(in crate::core::cpu) fn op_sll(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self.reg(instruction.rt()) << instruction.shamt();
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SRL: Shift Right Logical
    ///
    /// Format: srl rd, rt, shamt
    /// Operation: rd = rt >> shamt (zero fill)
    pub(in crate::core::cpu) fn op_srl(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = self.reg(instruction.rt()) >> instruction.shamt();
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SRA: Shift Right Arithmetic
    ///
    /// Format: sra rd, rt, shamt
    /// Operation: rd = rt >> shamt (sign fill)
    pub(in crate::core::cpu) fn op_sra(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let result = (self.reg(instruction.rt()) as i32) >> instruction.shamt();
        self.write_reg(instruction.rd(), result as u32);
        Ok(())
    }

    /// SLLV: Shift Left Logical Variable
    ///
    /// Only the low 5 bits of rs are used as the shift amount.
    pub(in crate::core::cpu) fn op_sllv(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let shift = self.reg(instruction.rs()) & 0x1F;
        let result = self.reg(instruction.rt()) << shift;
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SRLV: Shift Right Logical Variable
    pub(in crate::core::cpu) fn op_srlv(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let shift = self.reg(instruction.rs()) & 0x1F;
        let result = self.reg(instruction.rt()) >> shift;
        self.write_reg(instruction.rd(), result);
        Ok(())
    }

    /// SRAV: Shift Right Arithmetic Variable
    pub(in crate::core::cpu) fn op_srav(
        &mut self,
        instruction: Instruction,
        _bus: &mut Bus,
    ) -> Result<()> {
        let shift = self.reg(instruction.rs()) & 0x1F;
        let result = (self.reg(instruction.rt()) as i32) >> shift;
        self.write_reg(instruction.rd(), result as u32);
        Ok(())
    }
}
