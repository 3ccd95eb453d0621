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

//! Memory bus implementation
//!
//! The Bus owns every physically backed memory region and routes CPU
//! addresses to them. It has no knowledge of the CPU; it only answers
//! byte reads and writes.
//!
//! # Memory Map
//!
//! | Address Range           | Region             | Size   | Access |
//! |-------------------------|--------------------|--------|--------|
//! | 0xA0000000-0xA01FFFFF   | Main RAM           | 2MB    | R/W    |
//! | 0xA0200000-0xBEFFFFFF   | Open bus           | -      | -      |
//! | 0xBF000000-0xBF7FFFFF   | Expansion Region 1 | 8MB    | R/W    |
//! | 0xBF800000-0xBF800FFF   | Scratchpad         | 4KB    | R/W    |
//! | 0xBF801000-0xBF802FFF   | I/O Ports          | 8KB    | R/W    |
//! | 0xBFC00000-0xBFC7FFFF   | BIOS ROM           | 512KB  | R only |
//!
//! Anything else is unmapped. Open bus and unmapped reads return `0xFF` per
//! byte and writes are dropped; both are logged and never abort emulation.
//!
//! # Example
//!
//! ```
//! use psx_core::core::memory::Bus;
//!
//! let mut bus = Bus::new();
//!
//! bus.write_u32(0xA0000000, 0x12345678);
//! assert_eq!(bus.read_u32(0xA0000000), 0x12345678);
//! assert_eq!(bus.read_u8(0xA0000000), 0x78); // little-endian
//!
//! // Unmapped space reads back the open bus value
//! assert_eq!(bus.read_u8(0x00000000), 0xFF);
//! ```

use crate::core::error::{EmulatorError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

mod region;
#[cfg(test)]
mod tests;

pub use region::MemoryRegion;

/// Memory bus managing all memory accesses
///
/// Region buffers are allocated zeroed at construction and released when
/// the Bus is dropped.
pub struct Bus {
    /// Main RAM (2MB)
    ram: Vec<u8>,

    /// Expansion Region 1 (8MB)
    expansion1: Vec<u8>,

    /// Scratchpad (4KB fast RAM)
    scratchpad: Vec<u8>,

    /// I/O port window (8KB), plain storage for now
    io_ports: Vec<u8>,

    /// BIOS ROM (512KB)
    ///
    /// Only ever written by [`Bus::load_bios`]/[`Bus::load_bios_bytes`].
    bios: Vec<u8>,

    /// Set once a complete BIOS image has been copied in
    bios_loaded: bool,
}

impl Bus {
    /// Value returned for every byte read from open bus or unmapped space
    pub const OPEN_BUS_VALUE: u8 = 0xFF;

    /// Main RAM
    pub const RAM_BASE: u32 = 0xA000_0000;
    pub const RAM_SIZE: usize = 0x20_0000;

    /// Expansion Region 1
    pub const EXP1_BASE: u32 = 0xBF00_0000;
    pub const EXP1_SIZE: usize = 0x80_0000;

    /// Scratchpad
    pub const SCRATCHPAD_BASE: u32 = 0xBF80_0000;
    pub const SCRATCHPAD_SIZE: usize = 0x1000;

    /// I/O ports
    pub const IO_BASE: u32 = 0xBF80_1000;
    pub const IO_SIZE: usize = 0x2000;

    /// BIOS ROM
    pub const BIOS_BASE: u32 = 0xBFC0_0000;
    pub const BIOS_SIZE: usize = 0x8_0000;

    /// Create a new Bus instance
    ///
    /// All regions, including the BIOS buffer, start zero-filled.
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::memory::Bus;
    ///
    /// let bus = Bus::new();
    /// assert!(!bus.is_bios_loaded());
    /// ```
    pub fn new() -> Self {
        Self {
            ram: vec![0u8; Self::RAM_SIZE],
            expansion1: vec![0u8; Self::EXP1_SIZE],
            scratchpad: vec![0u8; Self::SCRATCHPAD_SIZE],
            io_ports: vec![0u8; Self::IO_SIZE],
            bios: vec![0u8; Self::BIOS_SIZE],
            bios_loaded: false,
        }
    }

    /// Reset the bus to initial state
    ///
    /// Clears every writable region. BIOS contents are preserved as they
    /// represent read-only ROM.
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write_u32(0xA0000000, 0x12345678);
    /// bus.reset();
    /// assert_eq!(bus.read_u32(0xA0000000), 0x00000000);
    /// ```
    pub fn reset(&mut self) {
        self.ram.fill(0);
        self.expansion1.fill(0);
        self.scratchpad.fill(0);
        self.io_ports.fill(0);
    }

    /// Load BIOS from file
    ///
    /// The file must be exactly 512KB. On any failure the BIOS buffer is
    /// left exactly as it was; a corrupt image is never partially loaded.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the BIOS file
    ///
    /// # Errors
    ///
    /// - `EmulatorError::BiosNotFound` if the file cannot be opened
    /// - `EmulatorError::InvalidBiosSize` if the file is not 512KB
    /// - `EmulatorError::Io` if reading fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psx_core::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.load_bios("SCPH1001.BIN").unwrap();
    /// ```
    pub fn load_bios<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|_| {
            log::error!("BIOS file {} failed to open", path.display());
            EmulatorError::BiosNotFound(path.display().to_string())
        })?;

        let len = file.metadata()?.len();
        if len != Self::BIOS_SIZE as u64 {
            log::error!(
                "BIOS file {} is {} bytes, expected {}",
                path.display(),
                len,
                Self::BIOS_SIZE
            );
            return Err(EmulatorError::InvalidBiosSize {
                expected: Self::BIOS_SIZE,
                got: len as usize,
            });
        }

        let mut image = vec![0u8; Self::BIOS_SIZE];
        file.read_exact(&mut image)?;

        self.bios.copy_from_slice(&image);
        self.bios_loaded = true;
        log::info!("BIOS loaded from {}", path.display());
        Ok(())
    }

    /// Load BIOS from an in-memory image
    ///
    /// Same contract as [`Bus::load_bios`] for callers that already hold
    /// the image bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// assert!(bus.load_bios_bytes(&[0u8; 16]).is_err());
    /// assert!(bus.load_bios_bytes(&vec![0u8; Bus::BIOS_SIZE]).is_ok());
    /// ```
    pub fn load_bios_bytes(&mut self, image: &[u8]) -> Result<()> {
        if image.len() != Self::BIOS_SIZE {
            log::error!(
                "BIOS image is {} bytes, expected {}",
                image.len(),
                Self::BIOS_SIZE
            );
            return Err(EmulatorError::InvalidBiosSize {
                expected: Self::BIOS_SIZE,
                got: image.len(),
            });
        }

        self.bios.copy_from_slice(image);
        self.bios_loaded = true;
        Ok(())
    }

    /// Whether a complete BIOS image has been loaded
    pub fn is_bios_loaded(&self) -> bool {
        self.bios_loaded
    }

    #[inline(always)]
    fn backing(&self, region: MemoryRegion) -> &[u8] {
        match region {
            MemoryRegion::RAM => &self.ram,
            MemoryRegion::Expansion => &self.expansion1,
            MemoryRegion::Scratchpad => &self.scratchpad,
            MemoryRegion::IO => &self.io_ports,
            MemoryRegion::BIOS => &self.bios,
            MemoryRegion::OpenBus | MemoryRegion::Unmapped => &[],
        }
    }

    /// Read 8-bit value from memory
    ///
    /// Open bus and unmapped addresses read as `0xFF`.
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write_u8(0xBF800010, 0x42);
    /// assert_eq!(bus.read_u8(0xBF800010), 0x42);
    /// ```
    pub fn read_u8(&self, address: u32) -> u8 {
        match self.resolve(address) {
            Some((region, offset)) => self.backing(region)[offset],
            None => {
                log::warn!(
                    "u8 read at {:?} address 0x{:08X} -> 0x{:02X}",
                    self.identify_region(address),
                    address,
                    Self::OPEN_BUS_VALUE
                );
                Self::OPEN_BUS_VALUE
            }
        }
    }

    /// Write 8-bit value to memory
    ///
    /// Writes to BIOS ROM, open bus and unmapped addresses are dropped.
    pub fn write_u8(&mut self, address: u32, value: u8) {
        let slot = match self.resolve(address) {
            Some((MemoryRegion::RAM, offset)) => &mut self.ram[offset],
            Some((MemoryRegion::Expansion, offset)) => &mut self.expansion1[offset],
            Some((MemoryRegion::Scratchpad, offset)) => &mut self.scratchpad[offset],
            Some((MemoryRegion::IO, offset)) => &mut self.io_ports[offset],
            Some((MemoryRegion::BIOS, _)) => {
                log::warn!(
                    "u8 write to BIOS ROM at 0x{:08X} = 0x{:02X} ignored",
                    address,
                    value
                );
                return;
            }
            Some((MemoryRegion::OpenBus | MemoryRegion::Unmapped, _)) | None => {
                log::warn!(
                    "u8 write at {:?} address 0x{:08X} = 0x{:02X} ignored",
                    self.identify_region(address),
                    address,
                    value
                );
                return;
            }
        };
        *slot = value;
    }

    /// Read 16-bit value from memory (little-endian)
    ///
    /// Composed from two byte reads; no alignment is required.
    pub fn read_u16(&self, address: u32) -> u16 {
        let lo = self.read_u8(address) as u16;
        let hi = self.read_u8(address.wrapping_add(1)) as u16;
        lo | (hi << 8)
    }

    /// Write 16-bit value to memory (little-endian)
    pub fn write_u16(&mut self, address: u32, value: u16) {
        self.write_u8(address, value as u8);
        self.write_u8(address.wrapping_add(1), (value >> 8) as u8);
    }

    /// Read 32-bit value from memory (little-endian)
    ///
    /// Composed from four byte reads, least-significant byte first.
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.write_u8(0xA0000000, 0x12);
    /// bus.write_u8(0xA0000001, 0x34);
    /// bus.write_u8(0xA0000002, 0x56);
    /// bus.write_u8(0xA0000003, 0x78);
    /// assert_eq!(bus.read_u32(0xA0000000), 0x78563412);
    /// ```
    pub fn read_u32(&self, address: u32) -> u32 {
        (0..4).fold(0u32, |word, i| {
            word | ((self.read_u8(address.wrapping_add(i)) as u32) << (i * 8))
        })
    }

    /// Read a 32-bit word without diagnostics
    ///
    /// Look-ahead reads that the running program did not issue, such as
    /// delay slot priming and trace output, go through here. The value is
    /// the same as [`Bus::read_u32`] would return.
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::memory::Bus;
    ///
    /// let bus = Bus::new();
    /// assert_eq!(bus.peek_u32(0x0000_1000), 0xFFFF_FFFF);
    /// ```
    pub fn peek_u32(&self, address: u32) -> u32 {
        (0..4).fold(0u32, |word, i| {
            word | ((self.peek_u8(address.wrapping_add(i)) as u32) << (i * 8))
        })
    }

    #[inline(always)]
    fn peek_u8(&self, address: u32) -> u8 {
        match self.resolve(address) {
            Some((region, offset)) => self.backing(region)[offset],
            None => Self::OPEN_BUS_VALUE,
        }
    }

    /// Write 32-bit value to memory (little-endian)
    pub fn write_u32(&mut self, address: u32, value: u32) {
        for i in 0..4 {
            self.write_u8(address.wrapping_add(i), (value >> (i * 8)) as u8);
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
