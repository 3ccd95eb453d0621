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

//! Pipeline hazard state
//!
//! The R3000A exposes two independent hazards to software:
//!
//! - **Branch delay**: the word after a branch always executes before the
//!   branch target.
//! - **Load delay**: a loaded value is not visible to the instruction that
//!   immediately follows the load.
//!
//! Each one is tracked by its own small state machine so the two can never
//! be mixed up.

/// Branch delay slot state
///
/// ```text
/// Idle --prime--> Primed --take_branch--> Taken --resolve--> Idle
///                   |                                 ^
///                   +-------------resolve-------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchDelay {
    /// No delay slot word is held
    #[default]
    Idle,
    /// The word after the current instruction has been read but not run
    Primed { instruction: u32 },
    /// The current instruction branched; run `instruction`, then jump
    Taken { instruction: u32, target: u32 },
}

impl BranchDelay {
    /// Hold the word following the instruction about to execute
    #[inline(always)]
    pub fn prime(&mut self, instruction: u32) {
        *self = BranchDelay::Primed { instruction };
    }

    /// Schedule a control transfer after the primed delay slot
    ///
    /// Returns `false` when nothing is primed, which happens when a branch
    /// sits in another branch's delay slot.
    pub fn take_branch(&mut self, target: u32) -> bool {
        match *self {
            BranchDelay::Idle => false,
            BranchDelay::Primed { instruction } | BranchDelay::Taken { instruction, .. } => {
                *self = BranchDelay::Taken {
                    instruction,
                    target,
                };
                true
            }
        }
    }

    /// Leave the delay slot state, yielding `(delay slot word, target)` if a
    /// branch was taken
    #[inline(always)]
    pub fn resolve(&mut self) -> Option<(u32, u32)> {
        match std::mem::take(self) {
            BranchDelay::Taken {
                instruction,
                target,
            } => Some((instruction, target)),
            BranchDelay::Idle | BranchDelay::Primed { .. } => None,
        }
    }
}

/// Load delay slot state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadDelay {
    /// No load in flight
    #[default]
    Idle,
    /// A load produced `value` for register `reg`
    Pending { reg: u8, value: u32 },
}

impl LoadDelay {
    /// Record a load result to be committed by the next instruction cycle
    #[inline(always)]
    pub fn schedule(&mut self, reg: u8, value: u32) {
        *self = LoadDelay::Pending { reg, value };
    }

    /// Take the pending write, leaving the state idle
    #[inline(always)]
    pub fn take(&mut self) -> Option<(u8, u32)> {
        match std::mem::take(self) {
            LoadDelay::Pending { reg, value } => Some((reg, value)),
            LoadDelay::Idle => None,
        }
    }

    /// Peek at the pending write without consuming it
    pub fn pending(&self) -> Option<(u8, u32)> {
        match *self {
            LoadDelay::Pending { reg, value } => Some((reg, value)),
            LoadDelay::Idle => None,
        }
    }
}
