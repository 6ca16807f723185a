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

use crate::content::{PackagedContent, Section};
use crate::error::DecodeError;
use crate::format::{
    RawHeader, RawSectionHeader, SectionKind, COMPRESSED_FLAG, HEADER_LEN, MAGIC,
    MAX_DECOMPRESSED_LEN, SECTION_HEADER_LEN, SUPPORTED_VERSION, TABLE_COUNT_LEN,
};
use std::sync::Arc;

/// Bounds-checked forward reader over the source buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns the range of the next `len` bytes and advances past them.
    fn take_range(&mut self, len: usize) -> Result<std::ops::Range<usize>, DecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(DecodeError::Truncated {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            })?;
        let range = self.pos..end;
        self.pos = end;
        Ok(range)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let range = self.take_range(len)?;
        Ok(&self.buf[range])
    }

    fn u32_le(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Decodes a packaged game file.
///
/// The fixed header is validated before anything else is read. Every section
/// is bounds-checked against the buffer before it is sliced. Unknown section
/// tags are kept and skipped by typed accessors. Bytes after the last section
/// are ignored.
///
/// Decoding is pure: no I/O, no global state, only allocation.
pub fn decode(bytes: impl Into<Arc<[u8]>>) -> Result<PackagedContent, DecodeError> {
    let source: Arc<[u8]> = bytes.into();
    let mut reader = Reader::new(&source);

    // Magic first, so a foreign file is rejected even if it is tiny.
    if source.len() >= MAGIC.len() {
        let mut found = [0u8; 4];
        found.copy_from_slice(&source[..MAGIC.len()]);
        if found != MAGIC {
            return Err(DecodeError::BadMagic { found });
        }
    }
    let header: RawHeader = bytemuck::pod_read_unaligned(reader.take(HEADER_LEN)?);
    debug_assert_eq!(header.magic, MAGIC);
    let version = u32::from_le_bytes(header.version);
    if version != SUPPORTED_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found: version,
            supported: SUPPORTED_VERSION,
        });
    }

    let count = reader.u32_le()? as usize;
    debug_assert_eq!(reader.pos, HEADER_LEN + TABLE_COUNT_LEN);
    let mut sections = Vec::with_capacity(count.min(reader.remaining() / SECTION_HEADER_LEN));
    let mut seen_singletons: Vec<SectionKind> = Vec::new();

    for index in 0..count {
        let record: RawSectionHeader =
            bytemuck::pod_read_unaligned(reader.take(SECTION_HEADER_LEN)?);
        let raw_tag = u32::from_le_bytes(record.tag);
        let length = u32::from_le_bytes(record.length) as usize;
        let range = reader.take_range(length)?;

        let compressed = raw_tag & COMPRESSED_FLAG != 0;
        let kind = SectionKind::from_tag(raw_tag & !COMPRESSED_FLAG);

        if kind.is_singleton() {
            if seen_singletons.contains(&kind) {
                return Err(DecodeError::MalformedSection {
                    index,
                    tag: raw_tag,
                    reason: format!("duplicate {kind} section"),
                });
            }
            seen_singletons.push(kind);
        }

        let section = match kind {
            SectionKind::Unknown(tag) => {
                log::debug!(
                    "Keeping unknown section #{index} (tag 0x{tag:08x}, {length} bytes) uninterpreted."
                );
                Section::shared(index, raw_tag, kind, compressed, source.clone(), range)
            }
            _ if compressed => {
                let bytes = decompress(&source[range], index, raw_tag)?;
                Section::owned(index, raw_tag, kind, bytes)
            }
            _ => Section::shared(index, raw_tag, kind, false, source.clone(), range),
        };
        log::trace!("Decoded section #{index}: {kind}, {} bytes.", section.len());
        sections.push(section);
    }

    if reader.remaining() > 0 {
        log::debug!(
            "Ignoring {} trailing bytes after the section table.",
            reader.remaining()
        );
    }
    log::debug!(
        "Decoded Turbo file v{version}: {} sections, {} bytes.",
        sections.len(),
        source.len()
    );

    Ok(PackagedContent::new(version, sections))
}

/// Decodes a version 0 packaged game file.
///
/// Stable entry point kept for hosts that bind to this name; it behaves
/// exactly like [`decode`].
pub fn decode_turbofile_v0_contents(
    bytes: impl Into<Arc<[u8]>>,
) -> Result<PackagedContent, DecodeError> {
    decode(bytes)
}

fn decompress(stored: &[u8], index: usize, raw_tag: u32) -> Result<Vec<u8>, DecodeError> {
    let malformed = |reason: String| DecodeError::MalformedSection {
        index,
        tag: raw_tag,
        reason,
    };

    let Some(prefix) = stored.get(..4) else {
        return Err(malformed(format!(
            "LZ4 payload of {} bytes has no size prefix",
            stored.len()
        )));
    };
    let size = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
    if size > MAX_DECOMPRESSED_LEN {
        return Err(malformed(format!(
            "declared decompressed size {size} exceeds limit {MAX_DECOMPRESSED_LEN}"
        )));
    }
    lz4_flex::decompress_size_prepended(stored)
        .map_err(|e| malformed(format!("LZ4 decompression failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::PackageWriter;

    #[test]
    fn empty_table_decodes() {
        let content = decode(PackageWriter::new().finish().unwrap()).unwrap();
        assert_eq!(content.format_version(), 0);
        assert!(content.sections().is_empty());
    }

    #[test]
    fn bad_magic_fails_fast() {
        let mut bytes = PackageWriter::new()
            .section(SectionKind::Code, vec![0; 16])
            .finish()
            .unwrap();
        bytes[0] = b'X';
        assert_eq!(
            decode(bytes).unwrap_err(),
            DecodeError::BadMagic {
                found: [b'X', b'F', b'B', b'0']
            }
        );
    }

    #[test]
    fn bad_magic_on_short_buffer() {
        let err = decode(&b"PNG\x89\x00"[..]).unwrap_err();
        assert!(matches!(err, DecodeError::BadMagic { .. }));
    }

    #[test]
    fn unsupported_version() {
        let bytes = PackageWriter::new()
            .with_version(1)
            .section(SectionKind::Meta, vec![1])
            .finish()
            .unwrap();
        assert_eq!(
            decode(bytes).unwrap_err(),
            DecodeError::UnsupportedVersion {
                found: 1,
                supported: 0
            }
        );
    }

    #[test]
    fn declared_length_past_end_is_truncated() {
        let mut bytes = PackageWriter::new()
            .section(SectionKind::Sprites, vec![7; 10])
            .finish()
            .unwrap();
        // Bump the declared length of the only section.
        let length_offset = HEADER_LEN + TABLE_COUNT_LEN + 4;
        bytes[length_offset..length_offset + 4].copy_from_slice(&11u32.to_le_bytes());
        assert_eq!(
            decode(bytes).unwrap_err(),
            DecodeError::Truncated {
                offset: HEADER_LEN + TABLE_COUNT_LEN + SECTION_HEADER_LEN,
                needed: 11,
                available: 10,
            }
        );
    }

    #[test]
    fn huge_count_does_not_overallocate() {
        let mut bytes = PackageWriter::new().finish().unwrap();
        bytes[HEADER_LEN..HEADER_LEN + 4].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(decode(bytes), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn duplicate_singleton_is_malformed() {
        let bytes = PackageWriter::new()
            .section(SectionKind::Code, vec![1])
            .section(SectionKind::Code, vec![2])
            .finish()
            .unwrap();
        match decode(bytes) {
            Err(DecodeError::MalformedSection { index, tag, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(tag, SectionKind::Code.tag());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn repeated_non_singletons_are_fine() {
        let bytes = PackageWriter::new()
            .section(SectionKind::Audio, vec![1])
            .section(SectionKind::Audio, vec![2])
            .finish()
            .unwrap();
        let content = decode(bytes).unwrap();
        assert_eq!(content.sections_of(SectionKind::Audio).count(), 2);
    }

    #[test]
    fn compressed_section_is_inflated() {
        let sprites: Vec<u8> = (0..4096u32).map(|i| (i % 7) as u8).collect();
        let bytes = PackageWriter::new()
            .compressed_section(SectionKind::Sprites, sprites.clone())
            .finish()
            .unwrap();
        assert!(bytes.len() < sprites.len());

        let content = decode(bytes).unwrap();
        let section = content.section(SectionKind::Sprites).unwrap();
        assert!(section.was_compressed());
        assert_eq!(section.payload(), sprites.as_slice());
    }

    #[test]
    fn corrupt_compressed_section_is_malformed() {
        let bytes = PackageWriter::new()
            .raw_section(SectionKind::Audio.tag() | COMPRESSED_FLAG, vec![0xff, 0xff])
            .finish()
            .unwrap();
        assert!(matches!(
            decode(bytes),
            Err(DecodeError::MalformedSection { index: 0, .. })
        ));
    }

    #[test]
    fn hostile_size_prefix_is_rejected() {
        let mut stored = (u32::MAX).to_le_bytes().to_vec();
        stored.extend_from_slice(&[0, 0, 0]);
        let bytes = PackageWriter::new()
            .raw_section(SectionKind::Code.tag() | COMPRESSED_FLAG, stored)
            .finish()
            .unwrap();
        match decode(bytes) {
            Err(DecodeError::MalformedSection { reason, .. }) => {
                assert!(reason.contains("exceeds limit"), "{reason}")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn compressed_unknown_section_is_kept_raw() {
        let stored = vec![0xde, 0xad];
        let bytes = PackageWriter::new()
            .raw_section(0x40 | COMPRESSED_FLAG, stored.clone())
            .finish()
            .unwrap();
        let content = decode(bytes).unwrap();
        let section = &content.sections()[0];
        assert_eq!(section.kind(), SectionKind::Unknown(0x40));
        assert!(section.was_compressed());
        assert_eq!(section.payload(), stored.as_slice());
    }
}
