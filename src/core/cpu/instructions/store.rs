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
    // === Store Instructions ===

    /// SW: Store Word (32-bit)
    ///
    /// Format: sw rt, offset(rs)
    /// Operation: memory[rs + sign_extend(offset)] = rt
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction word
    /// * `bus` - Memory bus for writing
    pub(in crate::core::cpu) fn op_sw(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        bus.write_u32(addr, self.reg(instruction.rt()));
        Ok(())
    }

    /// SH: Store Halfword (low 16 bits of rt)
    ///
    /// Format: sh rt, offset(rs)
    pub(in crate::core::cpu) fn op_sh(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        bus.write_u16(addr, self.reg(instruction.rt()) as u16);
        Ok(())
    }

    /// SB: Store Byte (low 8 bits of rt)
    ///
    /// Format: sb rt, offset(rs)
    pub(in crate::core::cpu) fn op_sb(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        bus.write_u8(addr, self.reg(instruction.rt()) as u8);
        Ok(())
    }

    /// SWL: Store Word Left
    ///
    /// Read-modify-write of the aligned word containing the address, storing
    /// the upper bytes of rt.
    ///
    /// | addr & 3 | stored word                      |
    /// |----------|----------------------------------|
    /// | 0        | (mem & 0xFFFFFF00) \| (rt >> 24) |
    /// | 1        | (mem & 0xFFFF0000) \| (rt >> 16) |
    /// | 2        | (mem & 0xFF000000) \| (rt >> 8)  |
    /// | 3        | rt                               |
    pub(in crate::core::cpu) fn op_swl(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let aligned = addr & !3;
        let mem = bus.read_u32(aligned);
        let value = self.reg(instruction.rt());

        let merged = match addr & 3 {
            0 => (mem & 0xFFFF_FF00) | (value >> 24),
            1 => (mem & 0xFFFF_0000) | (value >> 16),
            2 => (mem & 0xFF00_0000) | (value >> 8),
            _ => value,
        };

        bus.write_u32(aligned, merged);
        Ok(())
    }

    /// SWR: Store Word Right
    ///
    /// | addr & 3 | stored word                      |
    /// |----------|----------------------------------|
    /// | 0        | rt                               |
    /// | 1        | (mem & 0x000000FF) \| (rt << 8)  |
    /// | 2        | (mem & 0x0000FFFF) \| (rt << 16) |
    /// | 3        | (mem & 0x00FFFFFF) \| (rt << 24) |
    pub(in crate::core::cpu) fn op_swr(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let aligned = addr & !3;
        let mem = bus.read_u32(aligned);
        let value = self.reg(instruction.rt());

        let merged = match addr & 3 {
            0 => value,
            1 => (mem & 0x0000_00FF) | (value << 8),
            2 => (mem & 0x0000_FFFF) | (value << 16),
            _ => (mem & 0x00FF_FFFF) | (value << 24),
        };

        bus.write_u32(aligned, merged);
        Ok(())
    }
}
