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

use super::helpers::*;

const MEMORY_WORD: u32 = 0x4433_2211;
const REGISTER_WORD: u32 = 0xAABB_CCDD;

/// Execute one partial load at `DATA_BASE + offset` into r2 and let it land
fn partial_load(opcode: u32, offset: i16) -> u32 {
    let (mut cpu, mut bus) = setup(&[load(opcode, 2, offset, 1), NOP]);
    bus.write_u32(DATA_BASE, MEMORY_WORD);
    cpu.set_reg(1, DATA_BASE);
    cpu.set_reg(2, REGISTER_WORD);
    run(&mut cpu, &mut bus, 2);
    cpu.reg(2)
}

/// Execute one partial store of r2 at `DATA_BASE + offset`
fn partial_store(opcode: u32, offset: i16) -> u32 {
    let (mut cpu, mut bus) = setup(&[store(opcode, 2, offset, 1)]);
    bus.write_u32(DATA_BASE, MEMORY_WORD);
    cpu.set_reg(1, DATA_BASE);
    cpu.set_reg(2, REGISTER_WORD);
    cpu.step(&mut bus).unwrap();
    bus.read_u32(DATA_BASE)
}

#[test]
fn test_lwl_alignments() {
    assert_eq!(partial_load(op::LWL, 0), 0x11BB_CCDD);
    assert_eq!(partial_load(op::LWL, 1), 0x2211_CCDD);
    assert_eq!(partial_load(op::LWL, 2), 0x3322_11DD);
    assert_eq!(partial_load(op::LWL, 3), 0x4433_2211);
}

#[test]
fn test_lwr_alignments() {
    assert_eq!(partial_load(op::LWR, 0), 0x4433_2211);
    assert_eq!(partial_load(op::LWR, 1), 0xAA44_3322);
    assert_eq!(partial_load(op::LWR, 2), 0xAABB_4433);
    assert_eq!(partial_load(op::LWR, 3), 0xAABB_CC44);
}

#[test]
fn test_swl_alignments() {
    assert_eq!(partial_store(op::SWL, 0), 0x4433_22AA);
    assert_eq!(partial_store(op::SWL, 1), 0x4433_AABB);
    assert_eq!(partial_store(op::SWL, 2), 0x44AA_BBCC);
    assert_eq!(partial_store(op::SWL, 3), 0xAABB_CCDD);
}

#[test]
fn test_swr_alignments() {
    assert_eq!(partial_store(op::SWR, 0), 0xAABB_CCDD);
    assert_eq!(partial_store(op::SWR, 1), 0xBBCC_DD11);
    assert_eq!(partial_store(op::SWR, 2), 0xCCDD_2211);
    assert_eq!(partial_store(op::SWR, 3), 0xDD33_2211);
}

#[test]
fn test_lwl_lwr_pair_reads_unaligned_word() {
    // lwr r2, 1(r1) ; lwl r2, 4(r1) ; nop
    let (mut cpu, mut bus) = setup(&[load(op::LWR, 2, 1, 1), load(op::LWL, 2, 4, 1), NOP]);
    bus.write_u32(DATA_BASE, 0x4433_2211);
    bus.write_u32(DATA_BASE + 4, 0x8877_6655);
    cpu.set_reg(1, DATA_BASE);

    run(&mut cpu, &mut bus, 3);
    assert_eq!(cpu.reg(2), 0x5544_3322);
}

#[test]
fn test_lwl_merges_with_in_flight_load() {
    // lw r2, 4(r1) ; lwl r2, 0(r1) ; nop
    let (mut cpu, mut bus) = setup(&[load(op::LW, 2, 4, 1), load(op::LWL, 2, 0, 1), NOP]);
    bus.write_u32(DATA_BASE, MEMORY_WORD);
    bus.write_u32(DATA_BASE + 4, 0x0077_6655);
    cpu.set_reg(1, DATA_BASE);
    cpu.set_reg(2, 0xFFFF_FFFF);

    run(&mut cpu, &mut bus, 3);
    assert_eq!(cpu.reg(2), 0x1177_6655);
}

#[test]
fn test_swl_swr_pair_writes_unaligned_word() {
    // swr r2, 1(r1) ; swl r2, 4(r1)
    let (mut cpu, mut bus) = setup(&[store(op::SWR, 2, 1, 1), store(op::SWL, 2, 4, 1)]);
    cpu.set_reg(1, DATA_BASE);
    cpu.set_reg(2, 0xAABB_CCDD);

    run(&mut cpu, &mut bus, 2);
    assert_eq!(bus.read_u32(DATA_BASE + 1), 0xAABB_CCDD);
    assert_eq!(bus.read_u8(DATA_BASE), 0);
    assert_eq!(bus.read_u8(DATA_BASE + 5), 0);
}
