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

//! Memory region identification and address routing
//!
//! Addresses are routed as-is (KSEG1 view, no segment translation). Each
//! backed region is described by a base and a size; the router picks the
//! smallest region containing the address so that narrow windows are never
//! shadowed by a broader one, whatever order the table is written in.

use super::Bus;

/// Memory region identification
///
/// Used to identify which memory region an address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryRegion {
    /// Main RAM (2MB)
    RAM,
    /// Expansion Region 1 (8MB)
    Expansion,
    /// Scratchpad (4KB)
    Scratchpad,
    /// I/O ports (8KB)
    IO,
    /// BIOS ROM (512KB, read-only)
    BIOS,
    /// Gap between the end of main RAM and Expansion Region 1
    OpenBus,
    /// Unmapped region
    Unmapped,
}

impl MemoryRegion {
    /// Whether accesses to this region reach a backing buffer
    pub fn is_backed(self) -> bool {
        !matches!(self, MemoryRegion::OpenBus | MemoryRegion::Unmapped)
    }
}

/// One entry of the address decode table
#[derive(Debug, Clone, Copy)]
pub(super) struct RegionMapping {
    pub(super) region: MemoryRegion,
    pub(super) base: u32,
    pub(super) size: u32,
}

impl RegionMapping {
    const fn new(region: MemoryRegion, base: u32, size: u32) -> Self {
        Self { region, base, size }
    }

    /// Offset of `address` inside this mapping, if it falls within it
    #[inline(always)]
    fn offset_of(&self, address: u32) -> Option<u32> {
        let offset = address.wrapping_sub(self.base);
        (address >= self.base && offset < self.size).then_some(offset)
    }
}

/// Address decode table
///
/// Order is not significant; [`Bus::resolve`] picks the smallest mapping
/// that contains the address.
pub(super) const REGION_MAP: [RegionMapping; 5] = [
    RegionMapping::new(
        MemoryRegion::Expansion,
        Bus::EXP1_BASE,
        Bus::EXP1_SIZE as u32,
    ),
    RegionMapping::new(MemoryRegion::RAM, Bus::RAM_BASE, Bus::RAM_SIZE as u32),
    RegionMapping::new(
        MemoryRegion::Scratchpad,
        Bus::SCRATCHPAD_BASE,
        Bus::SCRATCHPAD_SIZE as u32,
    ),
    RegionMapping::new(MemoryRegion::IO, Bus::IO_BASE, Bus::IO_SIZE as u32),
    RegionMapping::new(MemoryRegion::BIOS, Bus::BIOS_BASE, Bus::BIOS_SIZE as u32),
];

impl Bus {
    /// Resolve an address to its backing region and in-region offset
    ///
    /// Returns `None` for open bus and unmapped addresses.
    #[inline]
    pub(super) fn resolve(&self, address: u32) -> Option<(MemoryRegion, usize)> {
        REGION_MAP
            .iter()
            .filter_map(|mapping| {
                mapping
                    .offset_of(address)
                    .map(|offset| (mapping.size, mapping.region, offset as usize))
            })
            .min_by_key(|&(size, _, _)| size)
            .map(|(_, region, offset)| (region, offset))
    }

    /// Identify memory region for an address
    ///
    /// # Arguments
    ///
    /// * `address` - Address as seen by the CPU
    ///
    /// # Returns
    ///
    /// The memory region that contains this address
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::memory::{Bus, MemoryRegion};
    ///
    /// let bus = Bus::new();
    ///
    /// assert_eq!(bus.identify_region(0xA0000000), MemoryRegion::RAM);
    /// assert_eq!(bus.identify_region(0xBF800000), MemoryRegion::Scratchpad);
    /// assert_eq!(bus.identify_region(0xBF801000), MemoryRegion::IO);
    /// assert_eq!(bus.identify_region(0xBFC00000), MemoryRegion::BIOS);
    /// assert_eq!(bus.identify_region(0xA0200000), MemoryRegion::OpenBus);
    /// assert_eq!(bus.identify_region(0x00000000), MemoryRegion::Unmapped);
    /// ```
    pub fn identify_region(&self, address: u32) -> MemoryRegion {
        if let Some((region, _)) = self.resolve(address) {
            return region;
        }

        let ram_end = Self::RAM_BASE + Self::RAM_SIZE as u32;
        if (ram_end..Self::EXP1_BASE).contains(&address) {
            MemoryRegion::OpenBus
        } else {
            MemoryRegion::Unmapped
        }
    }
}
