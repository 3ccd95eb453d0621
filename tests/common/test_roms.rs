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

//! Small test programs

/// Marks the end of a test program; the CPU halts on it
#[allow(dead_code)]
pub const HALT: u32 = 0xFC00_0000;

/// Register arithmetic
#[allow(dead_code)]
pub fn test_program_basic_arithmetic() -> Vec<u32> {
    vec![
        0x24010001, // ADDIU $1, $0, 1      ; $1 = 1
        0x24020002, // ADDIU $2, $0, 2      ; $2 = 2
        0x00221820, // ADD   $3, $1, $2     ; $3 = 3
        0x00031823, // SUBU  $3, $0, $3     ; $3 = -3
        0x00031843, // SRA   $3, $3, 1      ; $3 = -2
        HALT,
    ]
}

/// Scratchpad store then load, with the load delay observed
#[allow(dead_code)]
pub fn test_program_load_store() -> Vec<u32> {
    vec![
        0x3C01BF80, // LUI   $1, 0xBF80     ; $1 = 0xBF800000 (scratchpad)
        0x240200AA, // ADDIU $2, $0, 0xAA
        0xAC220000, // SW    $2, 0($1)
        0x8C230000, // LW    $3, 0($1)
        0x00032021, // ADDU  $4, $0, $3     ; load delay: old $3
        0x00032821, // ADDU  $5, $0, $3     ; $5 = 0xAA
        HALT,
    ]
}

/// Taken branch with a live delay slot
#[allow(dead_code)]
pub fn test_program_branch() -> Vec<u32> {
    vec![
        0x24010001, // ADDIU $1, $0, 1
        0x24020001, // ADDIU $2, $0, 1
        0x10220002, // BEQ   $1, $2, +2
        0x24050007, // ADDIU $5, $0, 7      ; delay slot, executes
        0x24030042, // ADDIU $3, $0, 0x42   ; skipped
        0x24040099, // ADDIU $4, $0, 0x99   ; branch target
        HALT,
    ]
}

/// Subroutine call and return through r31, for a program placed at `base`
#[allow(dead_code)]
pub fn test_program_call_return(base: u32) -> Vec<u32> {
    let jal = 0x0C00_0000 | (((base + 0x10) >> 2) & 0x03FF_FFFF);
    vec![
        jal,        // JAL   base + 0x10
        0x00000000, // NOP (delay slot)
        0x24060001, // ADDIU $6, $0, 1      ; after return
        HALT,       // end of caller
        0x03E00008, // JR    $31            ; subroutine at +0x10
        0x24070002, // ADDIU $7, $0, 2      ; delay slot
    ]
}

/// Get BIOS path from environment or default location
#[allow(dead_code)]
pub fn get_bios_path() -> Option<String> {
    std::env::var("PSX_BIOS_PATH").ok().or_else(|| {
        let default_path = "SCPH1001.BIN";
        if std::path::Path::new(default_path).exists() {
            Some(default_path.to_string())
        } else {
            None
        }
    })
}
