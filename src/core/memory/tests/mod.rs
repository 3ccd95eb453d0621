// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Memory Bus Tests
//!
//! This module contains tests for the memory bus, organized into logical
//! categories:
//!
//! - `basic`: Construction, reset and BIOS loading
//! - `bus`: Read/write operations with various data sizes
//! - `regions`: Region identification and routing boundaries
//! - `helpers`: Common test utilities
//!
//! Tests cover:
//! - Little-endian composition of 16-bit and 32-bit accesses
//! - Most-specific region routing (scratchpad and I/O vs expansion)
//! - Open bus and unmapped fallbacks
//! - BIOS read-only behaviour and all-or-nothing loading

use super::*;
use crate::core::memory::MemoryRegion;

mod basic;
mod helpers;
