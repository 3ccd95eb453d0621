// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Basic bus tests
//!
//! Construction, reset and BIOS loading.

use super::helpers::*;
use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_new_bus_is_zeroed() {
    let bus = Bus::new();

    for (_, base, size) in backed_regions() {
        assert_eq!(bus.read_u32(base), 0);
        assert_eq!(bus.read_u32(base + size as u32 - 4), 0);
    }
    assert_eq!(bus.read_u32(Bus::BIOS_BASE), 0);
    assert!(!bus.is_bios_loaded());
}

#[test]
fn test_reset_clears_writable_regions() {
    let mut bus = create_bus_with_bios();

    for (_, base, _) in backed_regions() {
        bus.write_u32(base, 0xDEADBEEF);
    }

    bus.reset();

    for (_, base, _) in backed_regions() {
        assert_eq!(bus.read_u32(base), 0);
    }
}

#[test]
fn test_reset_preserves_bios() {
    let mut bus = create_bus_with_bios();
    let before = bus.read_u32(Bus::BIOS_BASE + 0x100);

    bus.reset();

    assert_eq!(bus.read_u32(Bus::BIOS_BASE + 0x100), before);
    assert!(bus.is_bios_loaded());
}

#[test]
fn test_load_bios_bytes_maps_image() {
    let bus = create_bus_with_bios();
    let image = patterned_bios_image();

    assert!(bus.is_bios_loaded());
    assert_eq!(bus.read_u8(Bus::BIOS_BASE), image[0]);
    assert_eq!(bus.read_u8(Bus::BIOS_BASE + 0x1234), image[0x1234]);
    assert_eq!(
        bus.read_u8(Bus::BIOS_BASE + Bus::BIOS_SIZE as u32 - 1),
        image[Bus::BIOS_SIZE - 1]
    );
}

#[test]
fn test_load_bios_bytes_rejects_wrong_sizes() {
    let mut bus = Bus::new();

    for len in [0usize, 1, Bus::BIOS_SIZE - 1, Bus::BIOS_SIZE + 1] {
        let image = vec![0xAAu8; len];
        match bus.load_bios_bytes(&image) {
            Err(EmulatorError::InvalidBiosSize { expected, got }) => {
                assert_eq!(expected, Bus::BIOS_SIZE);
                assert_eq!(got, len);
            }
            other => panic!("expected InvalidBiosSize, got {:?}", other),
        }
    }

    // Nothing was copied in
    assert!(!bus.is_bios_loaded());
    assert_eq!(bus.read_u8(Bus::BIOS_BASE), 0);
}

#[test]
fn test_failed_load_keeps_previous_image() {
    let mut bus = create_bus_with_bios();
    let before = bus.read_u32(Bus::BIOS_BASE + 0x40);

    assert!(bus.load_bios_bytes(&[0x55u8; 1024]).is_err());

    assert!(bus.is_bios_loaded());
    assert_eq!(bus.read_u32(Bus::BIOS_BASE + 0x40), before);
}

#[test]
fn test_load_bios_from_file() {
    let image = patterned_bios_image();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&image).unwrap();
    file.flush().unwrap();

    let mut bus = Bus::new();
    bus.load_bios(file.path()).unwrap();

    assert!(bus.is_bios_loaded());
    assert_eq!(bus.read_u8(Bus::BIOS_BASE + 0x777), image[0x777]);
}

#[test]
fn test_load_bios_file_too_large() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&vec![0x11u8; Bus::BIOS_SIZE + 4]).unwrap();
    file.flush().unwrap();

    let mut bus = Bus::new();
    let result = bus.load_bios(file.path());

    assert!(matches!(
        result,
        Err(EmulatorError::InvalidBiosSize { got, .. }) if got == Bus::BIOS_SIZE + 4
    ));
    assert!(!bus.is_bios_loaded());
    assert_eq!(bus.read_u8(Bus::BIOS_BASE), 0);
}

#[test]
fn test_load_bios_file_too_small() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[0x11u8; 1024]).unwrap();
    file.flush().unwrap();

    let mut bus = Bus::new();
    assert!(bus.load_bios(file.path()).is_err());
    assert!(!bus.is_bios_loaded());
}

#[test]
fn test_load_bios_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.bin");

    let mut bus = Bus::new();
    assert!(matches!(
        bus.load_bios(&missing),
        Err(EmulatorError::BiosNotFound(_))
    ));
    assert!(!bus.is_bios_loaded());
}
