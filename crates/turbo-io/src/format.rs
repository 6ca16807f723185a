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

//! Bit-level layout of the packaged file.
//!
//! ```text
//! header    := magic:[u8; 4] = "TFB0" | version:u32le
//! table     := count:u32le | section{count}
//! section   := tag:u32le | length:u32le | payload:[u8; length]
//! trailer   := any bytes, ignored
//! ```
//!
//! Bit 31 of a section tag marks a payload stored as size-prepended LZ4.

use bytemuck::{Pod, Zeroable};

/// The magic bytes at offset 0.
pub const MAGIC: [u8; 4] = *b"TFB0";

/// [`MAGIC`] read as a big-endian integer.
pub const MAGIC_TAG: u32 = 0x5446_4230;

/// The only format version this decoder accepts.
pub const SUPPORTED_VERSION: u32 = 0;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = std::mem::size_of::<RawHeader>();

/// Size of the section count that opens the section table.
pub const TABLE_COUNT_LEN: usize = 4;

/// Size of each section record header in bytes.
pub const SECTION_HEADER_LEN: usize = std::mem::size_of::<RawSectionHeader>();

/// Tag bit marking an LZ4-compressed payload.
pub const COMPRESSED_FLAG: u32 = 1 << 31;

/// Upper bound on a decompressed section, guarding against hostile size prefixes.
pub const MAX_DECOMPRESSED_LEN: usize = 512 * 1024 * 1024;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct RawHeader {
    pub magic: [u8; 4],
    pub version: [u8; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct RawSectionHeader {
    pub tag: [u8; 4],
    pub length: [u8; 4],
}

/// The type of a section's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Compiled game logic.
    Code,
    /// Sprite atlas bytes.
    Sprites,
    /// Audio bank bytes.
    Audio,
    /// Application metadata (JSON, see [`AppMetadata`](crate::AppMetadata)).
    Meta,
    /// Application configuration (JSON, see [`AppConfiguration`](crate::AppConfiguration)).
    Config,
    /// Shader source text.
    Shader,
    /// A tag this decoder does not know. Kept, never interpreted.
    Unknown(u32),
}

impl SectionKind {
    /// Maps a wire tag (with the compression bit already cleared) to a kind.
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            1 => SectionKind::Code,
            2 => SectionKind::Sprites,
            3 => SectionKind::Audio,
            4 => SectionKind::Meta,
            5 => SectionKind::Config,
            6 => SectionKind::Shader,
            other => SectionKind::Unknown(other),
        }
    }

    /// The wire tag for this kind, without the compression bit.
    pub fn tag(self) -> u32 {
        match self {
            SectionKind::Code => 1,
            SectionKind::Sprites => 2,
            SectionKind::Audio => 3,
            SectionKind::Meta => 4,
            SectionKind::Config => 5,
            SectionKind::Shader => 6,
            SectionKind::Unknown(tag) => tag & !COMPRESSED_FLAG,
        }
    }

    /// Kinds that may appear at most once per file.
    pub fn is_singleton(self) -> bool {
        matches!(
            self,
            SectionKind::Code | SectionKind::Meta | SectionKind::Config
        )
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Unknown(tag) => write!(f, "unknown(0x{tag:08x})"),
            known => write!(f, "{known:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_sizes() {
        assert_eq!(HEADER_LEN, 8);
        assert_eq!(SECTION_HEADER_LEN, 8);
        assert_eq!(u32::from_be_bytes(MAGIC), MAGIC_TAG);
    }

    #[test]
    fn tags_round_trip_for_known_kinds() {
        for kind in [
            SectionKind::Code,
            SectionKind::Sprites,
            SectionKind::Audio,
            SectionKind::Meta,
            SectionKind::Config,
            SectionKind::Shader,
        ] {
            assert_eq!(SectionKind::from_tag(kind.tag()), kind);
        }
        assert_eq!(SectionKind::from_tag(999), SectionKind::Unknown(999));
    }

    #[test]
    fn display_names() {
        assert_eq!(SectionKind::Meta.to_string(), "Meta");
        assert_eq!(SectionKind::Unknown(0x77).to_string(), "unknown(0x00000077)");
    }
}
