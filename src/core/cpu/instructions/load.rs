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
use crate::core::sign_extend::sext_32;

impl CPU {
    // === Load Instructions ===
    //
    // Every load goes through the load delay: the instruction right after
    // the load still sees the old register value.

    /// LW: Load Word (32-bit)
    ///
    /// Unaligned addresses are not trapped; the bus composes the word
    /// byte by byte.
    ///
    /// Format: lw rt, offset(rs)
    /// Operation: rt = memory[rs + sign_extend(offset)]
    ///
    /// # Arguments
    ///
    /// * `instruction` - The decoded instruction word
    /// * `bus` - Memory bus for reading
    pub(in crate::core::cpu) fn op_lw(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = bus.read_u32(addr);
        self.schedule_load(instruction.rt(), value);
        Ok(())
    }

    /// LH: Load Halfword (16-bit, sign-extended)
    ///
    /// Format: lh rt, offset(rs)
    /// Operation: rt = sign_extend(memory16[rs + sign_extend(offset)])
    pub(in crate::core::cpu) fn op_lh(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = sext_32(bus.read_u16(addr) as u32, 16);
        self.schedule_load(instruction.rt(), value);
        Ok(())
    }

    /// LHU: Load Halfword Unsigned (16-bit, zero-extended)
    pub(in crate::core::cpu) fn op_lhu(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = bus.read_u16(addr) as u32;
        self.schedule_load(instruction.rt(), value);
        Ok(())
    }

    /// LB: Load Byte (8-bit, sign-extended)
    ///
    /// Format: lb rt, offset(rs)
    /// Operation: rt = sign_extend(memory8[rs + sign_extend(offset)])
    pub(in crate::core::cpu) fn op_lb(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = sext_32(bus.read_u8(addr) as u32, 8);
        self.schedule_load(instruction.rt(), value);
        Ok(())
    }

    /// LBU: Load Byte Unsigned (8-bit, zero-extended)
    pub(in crate::core::cpu) fn op_lbu(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let value = bus.read_u8(addr) as u32;
        self.schedule_load(instruction.rt(), value);
        Ok(())
    }

    /// LWL: Load Word Left
    ///
    /// Merges the upper bytes of rt with the aligned word containing the
    /// effective address. The merge starts from the value rt will hold once
    /// any load already in flight lands, so `lwl`/`lwr` pairs can run back
    /// to back on the same register.
    ///
    /// | addr & 3 | result                            |
    /// |----------|-----------------------------------|
    /// | 0        | (rt & 0x00FFFFFF) \| (word << 24) |
    /// | 1        | (rt & 0x0000FFFF) \| (word << 16) |
    /// | 2        | (rt & 0x000000FF) \| (word << 8)  |
    /// | 3        | word                              |
    ///
    /// Format: lwl rt, offset(rs)
    pub(in crate::core::cpu) fn op_lwl(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let word = bus.read_u32(addr & !3);
        let current = self.in_flight_reg(instruction.rt());

        let value = match addr & 3 {
            0 => (current & 0x00FF_FFFF) | (word << 24),
            1 => (current & 0x0000_FFFF) | (word << 16),
            2 => (current & 0x0000_00FF) | (word << 8),
            _ => word,
        };

        self.schedule_load(instruction.rt(), value);
        Ok(())
    }

    /// LWR: Load Word Right
    ///
    /// Counterpart to LWL for the lower bytes of rt.
    ///
    /// | addr & 3 | result                            |
    /// |----------|-----------------------------------|
    /// | 0        | word                              |
    /// | 1        | (rt & 0xFF000000) \| (word >> 8)  |
    /// | 2        | (rt & 0xFFFF0000) \| (word >> 16) |
    /// | 3        | (rt & 0xFFFFFF00) \| (word >> 24) |
    ///
    /// Format: lwr rt, offset(rs)
    pub(in crate::core::cpu) fn op_lwr(
        &mut self,
        instruction: Instruction,
        bus: &mut Bus,
    ) -> Result<()> {
        let addr = self.effective_address(instruction);
        let word = bus.read_u32(addr & !3);
        let current = self.in_flight_reg(instruction.rt());

        let value = match addr & 3 {
            0 => word,
            1 => (current & 0xFF00_0000) | (word >> 8),
            2 => (current & 0xFFFF_0000) | (word >> 16),
            _ => (current & 0xFFFF_FF00) | (word >> 24),
        };

        self.schedule_load(instruction.rt(), value);
        Ok(())
    }
}
