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

//! Test fixtures for common test scenarios

use psx_core::core::cpu::CPU;
use psx_core::core::memory::Bus;
use psx_core::core::system::System;

/// Start of main RAM in the uncached mirror
#[allow(dead_code)]
pub const RAM_PROGRAM_BASE: u32 = 0xA000_0000;

/// Create a CPU with a program in RAM and PC pointing at it
#[allow(dead_code)]
pub fn create_cpu_with_program(program: &[u32]) -> (CPU, Bus) {
    let mut cpu = CPU::new();
    let mut bus = Bus::new();
    load_test_program(&mut bus, RAM_PROGRAM_BASE, program);
    cpu.set_pc(RAM_PROGRAM_BASE);
    (cpu, bus)
}

/// Build a 512KB BIOS image that starts with `program`
#[allow(dead_code)]
pub fn bios_image(program: &[u32]) -> Vec<u8> {
    let mut image = vec![0u8; Bus::BIOS_SIZE];
    for (chunk, word) in image.chunks_exact_mut(4).zip(program) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    image
}

/// Create a System booting `program` from the reset vector
#[allow(dead_code)]
pub fn create_system_with_bios(program: &[u32]) -> System {
    let mut system = System::new();
    system
        .load_bios_bytes(&bios_image(program))
        .expect("512KB image must load");
    system.reset();
    system
}

/// Load a test program into memory at specified address
#[allow(dead_code)]
pub fn load_test_program(bus: &mut Bus, start_addr: u32, program: &[u32]) {
    for (i, &instruction) in program.iter().enumerate() {
        let addr = start_addr + (i as u32 * 4);
        bus.write_u32(addr, instruction);
    }
}

/// Execute N CPU steps, panicking on the first error
#[allow(dead_code)]
pub fn execute_n_instructions(cpu: &mut CPU, bus: &mut Bus, n: usize) {
    for i in 0..n {
        if let Err(e) = cpu.step(bus) {
            panic!("step {} failed: {}", i, e);
        }
    }
}
