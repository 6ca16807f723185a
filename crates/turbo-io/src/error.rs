// Copyright 2025 eraflo
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

use thiserror::Error;

/// Why a packaged file could not be decoded.
///
/// Every variant is deterministic and non-retryable: the caller must supply a
/// corrected buffer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The first four bytes are not `"TFB0"`.
    #[error("not a Turbo file: expected magic \"TFB0\", found {found:02x?}")]
    BadMagic {
        /// The bytes found at offset 0.
        found: [u8; 4],
    },
    /// The header names a version this decoder does not implement.
    #[error("unsupported Turbo file version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version in the header.
        found: u32,
        /// Version this decoder implements.
        supported: u32,
    },
    /// A read would go past the end of the buffer.
    #[error("truncated Turbo file: needed {needed} bytes at offset {offset}, only {available} available")]
    Truncated {
        /// Where the read started.
        offset: usize,
        /// How many bytes it needed.
        needed: usize,
        /// How many bytes remained.
        available: usize,
    },
    /// A section is structurally present but its contents are unusable.
    #[error("malformed section #{index} (tag 0x{tag:08x}): {reason}")]
    MalformedSection {
        /// Position of the section in the table.
        index: usize,
        /// Raw wire tag, including the compression bit.
        tag: u32,
        /// Human-readable cause.
        reason: String,
    },
}

/// Why a packaged file could not be written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// More sections than the `u32` section count can describe.
    #[error("too many sections: {count} (limit {})", u32::MAX)]
    TooManySections {
        /// Number of sections added.
        count: usize,
    },
    /// A stored payload does not fit the `u32` length field.
    #[error("section #{index} is {length} bytes, larger than the {} byte limit", u32::MAX)]
    SectionTooLarge {
        /// Position of the section in the table.
        index: usize,
        /// Stored payload length.
        length: usize,
    },
}
