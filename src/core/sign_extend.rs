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

//! Sign extension helpers
//!
//! A value logically occupying the low `start` bits of a word is extended to
//! the full width of that word by moving its sign bit to the top and shifting
//! back arithmetically.
//!
//! # Example
//!
//! ```
//! use psx_core::core::sign_extend::{sext_32, SignExtend};
//!
//! assert_eq!(sext_32(0x80, 8), 0xFFFF_FF80);
//! assert_eq!(0x7Fu32.sign_extend(8), 0x7F);
//! assert_eq!(0x8000u32.sign_extend(16), 0xFFFF_8000);
//! ```

/// Sign extension from an arbitrary bit position
///
/// `start` is the number of meaningful low bits. A `start` of zero yields
/// zero; a `start` equal to or above the type width returns the value
/// unchanged.
pub trait SignExtend: Sized {
    /// Sign-extend the low `start` bits of `self` to the full width
    fn sign_extend(self, start: u32) -> Self;
}

macro_rules! impl_sign_extend {
    ($func:ident, $unsigned:ty, $signed:ty) => {
        /// Sign-extend the low `start` bits of `value` to the full width
        #[inline(always)]
        pub fn $func(value: $unsigned, start: u32) -> $unsigned {
            let width = <$unsigned>::BITS;
            if start == 0 {
                return 0;
            }
            if start >= width {
                return value;
            }

            let shift = width - start;
            (((value << shift) as $signed) >> shift) as $unsigned
        }

        impl SignExtend for $unsigned {
            #[inline(always)]
            fn sign_extend(self, start: u32) -> Self {
                $func(self, start)
            }
        }
    };
}

impl_sign_extend!(sext_8, u8, i8);
impl_sign_extend!(sext_16, u16, i16);
impl_sign_extend!(sext_32, u32, i32);
