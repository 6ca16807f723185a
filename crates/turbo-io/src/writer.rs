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

use crate::error::EncodeError;
use crate::format::{RawHeader, RawSectionHeader, SectionKind, COMPRESSED_FLAG, MAGIC, SUPPORTED_VERSION};

/// Builds a packaged game file in memory.
///
/// Sections are written in the order they are added.
#[derive(Debug, Clone)]
pub struct PackageWriter {
    version: u32,
    sections: Vec<(u32, Vec<u8>)>,
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageWriter {
    /// Starts an empty file at the supported format version.
    pub fn new() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            sections: Vec::new(),
        }
    }

    /// Overrides the header version. Only useful for producing test fixtures.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Appends an uncompressed section.
    pub fn section(mut self, kind: SectionKind, payload: impl Into<Vec<u8>>) -> Self {
        self.sections.push((kind.tag(), payload.into()));
        self
    }

    /// Appends a section whose payload is stored as size-prepended LZ4.
    pub fn compressed_section(mut self, kind: SectionKind, payload: impl AsRef<[u8]>) -> Self {
        let stored = lz4_flex::compress_prepend_size(payload.as_ref());
        self.sections.push((kind.tag() | COMPRESSED_FLAG, stored));
        self
    }

    /// Appends a section with an arbitrary wire tag and stored bytes.
    pub fn raw_section(mut self, tag: u32, stored: impl Into<Vec<u8>>) -> Self {
        self.sections.push((tag, stored.into()));
        self
    }

    /// Number of sections added so far.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// `true` if no section has been added.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Serializes the file.
    ///
    /// Fails if the section count or a stored payload length does not fit the
    /// format's `u32` fields.
    pub fn finish(self) -> Result<Vec<u8>, EncodeError> {
        let count = u32::try_from(self.sections.len()).map_err(|_| EncodeError::TooManySections {
            count: self.sections.len(),
        })?;

        let body: usize = self.sections.iter().map(|(_, p)| 8 + p.len()).sum();
        let mut out = Vec::with_capacity(12 + body);

        let header = RawHeader {
            magic: MAGIC,
            version: self.version.to_le_bytes(),
        };
        out.extend_from_slice(bytemuck::bytes_of(&header));
        out.extend_from_slice(&count.to_le_bytes());

        for (index, (tag, payload)) in self.sections.iter().enumerate() {
            let record = RawSectionHeader {
                tag: tag.to_le_bytes(),
                length: length_field(index, payload.len())?.to_le_bytes(),
            };
            out.extend_from_slice(bytemuck::bytes_of(&record));
            out.extend_from_slice(payload);
        }
        Ok(out)
    }
}

fn length_field(index: usize, length: usize) -> Result<u32, EncodeError> {
    u32::try_from(length).map_err(|_| EncodeError::SectionTooLarge { index, length })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_layout() {
        let bytes = PackageWriter::new()
            .section(SectionKind::Meta, vec![1, 2, 3, 4])
            .finish()
            .unwrap();
        assert_eq!(
            bytes,
            vec![
                b'T', b'F', b'B', b'0', // magic
                0, 0, 0, 0, // version
                1, 0, 0, 0, // section count
                4, 0, 0, 0, // tag: Meta
                4, 0, 0, 0, // length
                1, 2, 3, 4, // payload
            ]
        );
    }

    #[test]
    fn compressed_tag_sets_flag() {
        let bytes = PackageWriter::new()
            .compressed_section(SectionKind::Code, [0u8; 64])
            .finish()
            .unwrap();
        let tag = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
        assert_eq!(tag, SectionKind::Code.tag() | COMPRESSED_FLAG);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_lengths_are_rejected() {
        assert_eq!(length_field(0, u32::MAX as usize), Ok(u32::MAX));
        let length = u32::MAX as usize + 1;
        assert_eq!(
            length_field(3, length),
            Err(EncodeError::SectionTooLarge { index: 3, length })
        );
    }
}
