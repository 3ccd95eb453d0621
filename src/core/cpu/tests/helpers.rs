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

//! Program builders shared by the CPU tests

use super::super::*;
use crate::core::memory::Bus;

/// Programs are placed at the start of main RAM
pub const PROGRAM_BASE: u32 = 0xA000_0000;

/// Scratch data area, clear of any test program
pub const DATA_BASE: u32 = 0xA000_1000;

/// Load `program` at [`PROGRAM_BASE`] and point the CPU at it
pub fn setup(program: &[u32]) -> (CPU, Bus) {
    let mut bus = Bus::new();
    for (i, &word) in program.iter().enumerate() {
        bus.write_u32(PROGRAM_BASE + (i as u32) * 4, word);
    }

    let mut cpu = CPU::new();
    cpu.set_pc(PROGRAM_BASE);
    (cpu, bus)
}

/// Step `count` times, returning the total cycles
pub fn run(cpu: &mut CPU, bus: &mut Bus, count: usize) -> u32 {
    (0..count)
        .map(|_| cpu.step(bus).expect("step failed"))
        .sum()
}

pub fn i_type(opcode: u32, rs: u8, rt: u8, imm: u16) -> u32 {
    (opcode << 26) | ((rs as u32) << 21) | ((rt as u32) << 16) | imm as u32
}

pub fn r_type(function: u32, rs: u8, rt: u8, rd: u8, shamt: u32) -> u32 {
    ((rs as u32) << 21) | ((rt as u32) << 16) | ((rd as u32) << 11) | (shamt << 6) | function
}

/// J-type encoding from an absolute target (upper nibble taken from PC)
pub fn j_type(opcode: u32, target: u32) -> u32 {
    (opcode << 26) | ((target >> 2) & 0x03FF_FFFF)
}

/// Branch encoding from a word offset relative to the delay slot
pub fn branch(opcode: u32, rs: u8, rt: u8, offset: i16) -> u32 {
    i_type(opcode, rs, rt, offset as u16)
}

pub const NOP: u32 = 0;

pub fn addiu(rt: u8, rs: u8, imm: i16) -> u32 {
    i_type(0x09, rs, rt, imm as u16)
}

pub fn addu(rd: u8, rs: u8, rt: u8) -> u32 {
    r_type(0x21, rs, rt, rd, 0)
}

pub fn load(opcode: u32, rt: u8, offset: i16, base: u8) -> u32 {
    i_type(opcode, base, rt, offset as u16)
}

pub fn store(opcode: u32, rt: u8, offset: i16, base: u8) -> u32 {
    i_type(opcode, base, rt, offset as u16)
}

pub mod op {
    pub const BCOND: u32 = 0x01;
    pub const J: u32 = 0x02;
    pub const JAL: u32 = 0x03;
    pub const BEQ: u32 = 0x04;
    pub const BNE: u32 = 0x05;
    pub const BLEZ: u32 = 0x06;
    pub const BGTZ: u32 = 0x07;
    pub const LB: u32 = 0x20;
    pub const LH: u32 = 0x21;
    pub const LWL: u32 = 0x22;
    pub const LW: u32 = 0x23;
    pub const LBU: u32 = 0x24;
    pub const LHU: u32 = 0x25;
    pub const LWR: u32 = 0x26;
    pub const SB: u32 = 0x28;
    pub const SH: u32 = 0x29;
    pub const SWL: u32 = 0x2A;
    pub const SW: u32 = 0x2B;
    pub const SWR: u32 = 0x2E;
}
