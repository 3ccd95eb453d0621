// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Helper functions for memory tests

use super::*;

/// Build a 512KB BIOS image whose bytes follow a recognisable pattern
pub fn patterned_bios_image() -> Vec<u8> {
    (0..Bus::BIOS_SIZE).map(|i| (i % 251) as u8).collect()
}

/// Creates a Bus with [`patterned_bios_image`] loaded
pub fn create_bus_with_bios() -> Bus {
    let mut bus = Bus::new();
    bus.load_bios_bytes(&patterned_bios_image())
        .expect("512KB image must load");
    bus
}

/// Every backed region paired with its base address and size
pub fn backed_regions() -> [(MemoryRegion, u32, usize); 4] {
    [
        (MemoryRegion::RAM, Bus::RAM_BASE, Bus::RAM_SIZE),
        (MemoryRegion::Expansion, Bus::EXP1_BASE, Bus::EXP1_SIZE),
        (
            MemoryRegion::Scratchpad,
            Bus::SCRATCHPAD_BASE,
            Bus::SCRATCHPAD_SIZE,
        ),
        (MemoryRegion::IO, Bus::IO_BASE, Bus::IO_SIZE),
    ]
}
