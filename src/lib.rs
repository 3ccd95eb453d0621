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

//! MIPS-I console CPU core library
//!
//! This library emulates the central processing unit (MIPS R3000A class)
//! and the region-mapped memory bus of a 32-bit game console. It decodes
//! and executes one instruction per step, including branch and load delay
//! slot behaviour.
//!
//! # Example
//!
//! ```
//! use psx_core::core::cpu::CPU;
//! use psx_core::core::memory::Bus;
//!
//! let mut cpu = CPU::new();
//! let mut bus = Bus::new();
//!
//! // addiu r8, r0, 5 placed at the start of main RAM
//! bus.write_u32(0xA0000000, 0x24080005);
//! cpu.set_pc(0xA0000000);
//!
//! let cycles = cpu.step(&mut bus).unwrap();
//! assert_eq!(cycles, 1);
//! assert_eq!(cpu.reg(8), 5);
//! ```

pub mod core;
