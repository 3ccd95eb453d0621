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

//! System module tests
//!
//! - `basic`: construction, reset, accessors
//! - `execution`: stepping, cycle accounting and `run`
//! - `bios`: BIOS loading and configuration-driven setup
//! - `tracing`: instruction trace output


use super::*;

/// 512KB BIOS image starting with `program`, rest zero (NOP)
fn bios_with_program(program: &[u32]) -> Vec<u8> {
    let mut image = vec![0u8; Bus::BIOS_SIZE];
    for (i, word) in program.iter().enumerate() {
        image[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }
    image
}

/// System with `program` loaded as its BIOS, PC at the reset vector
fn system_with_program(program: &[u32]) -> System {
    let mut system = System::new();
    system
        .load_bios_bytes(&bios_with_program(program))
        .expect("512KB image must load");
    system
}
