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

use crate::error::DecodeError;
use crate::format::SectionKind;
use crate::metadata::{AppConfiguration, AppMetadata};
use std::ops::Range;
use std::sync::Arc;

#[derive(Debug)]
enum SectionData {
    /// A range of the original buffer.
    Shared {
        source: Arc<[u8]>,
        range: Range<usize>,
    },
    /// Bytes produced by decompression.
    Owned(Vec<u8>),
}

/// One typed payload block of a packaged file.
#[derive(Debug)]
pub struct Section {
    index: usize,
    raw_tag: u32,
    kind: SectionKind,
    compressed: bool,
    data: SectionData,
}

impl Section {
    pub(crate) fn shared(
        index: usize,
        raw_tag: u32,
        kind: SectionKind,
        compressed: bool,
        source: Arc<[u8]>,
        range: Range<usize>,
    ) -> Self {
        Self {
            index,
            raw_tag,
            kind,
            compressed,
            data: SectionData::Shared { source, range },
        }
    }

    pub(crate) fn owned(index: usize, raw_tag: u32, kind: SectionKind, bytes: Vec<u8>) -> Self {
        Self {
            index,
            raw_tag,
            kind,
            compressed: true,
            data: SectionData::Owned(bytes),
        }
    }

    /// Position of this section in the file's section table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The section's type.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// The tag exactly as stored, compression bit included.
    pub fn raw_tag(&self) -> u32 {
        self.raw_tag
    }

    /// `true` if the payload was stored compressed.
    ///
    /// Known kinds are decompressed during decode; unknown kinds keep the
    /// stored bytes as-is.
    pub fn was_compressed(&self) -> bool {
        self.compressed
    }

    /// The payload bytes.
    pub fn payload(&self) -> &[u8] {
        match &self.data {
            SectionData::Shared { source, range } => &source[range.clone()],
            SectionData::Owned(bytes) => bytes,
        }
    }

    /// The payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload().len()
    }

    /// `true` if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }

    pub(crate) fn malformed(&self, reason: impl Into<String>) -> DecodeError {
        DecodeError::MalformedSection {
            index: self.index,
            tag: self.raw_tag,
            reason: reason.into(),
        }
    }
}

/// The validated, immutable contents of a packaged game file.
///
/// Produced only by a successful [`decode`](crate::decode). It is
/// deliberately neither `Clone` nor `Copy`: the runtime takes it by value,
/// and the compiler rejects any use after that hand-off.
#[derive(Debug)]
pub struct PackagedContent {
    format_version: u32,
    sections: Vec<Section>,
}

impl PackagedContent {
    pub(crate) fn new(format_version: u32, sections: Vec<Section>) -> Self {
        Self {
            format_version,
            sections,
        }
    }

    /// Version from the file header.
    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    /// Every section, in file order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The first section of `kind`, if any.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Every section of `kind`, in file order.
    pub fn sections_of(&self, kind: SectionKind) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }

    /// Sections whose tag this decoder does not recognise.
    pub fn unknown_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(|s| matches!(s.kind, SectionKind::Unknown(_)))
    }

    /// The compiled game logic, if present.
    pub fn code(&self) -> Option<&[u8]> {
        self.section(SectionKind::Code).map(Section::payload)
    }

    /// Total payload size across all sections.
    pub fn total_payload_len(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Parses the `Meta` section as [`AppMetadata`].
    ///
    /// Decoding never looks inside payloads, so a file whose metadata is not
    /// valid JSON still decodes; the error surfaces here instead.
    pub fn metadata(&self) -> Result<Option<AppMetadata>, DecodeError> {
        self.parse_json(SectionKind::Meta)
    }

    /// Parses the `Config` section as [`AppConfiguration`].
    pub fn configuration(&self) -> Result<Option<AppConfiguration>, DecodeError> {
        self.parse_json(SectionKind::Config)
    }

    fn parse_json<T: serde::de::DeserializeOwned>(
        &self,
        kind: SectionKind,
    ) -> Result<Option<T>, DecodeError> {
        let Some(section) = self.section(kind) else {
            return Ok(None);
        };
        serde_json::from_slice(section.payload())
            .map(Some)
            .map_err(|e| section.malformed(format!("invalid {kind} JSON: {e}")))
    }
}
