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

//! # Turbo IO
//!
//! Decoding of the packaged game file (`.turbo`, format `TFB0`).
//!
//! A packaged file bundles a game's compiled logic, sprite atlas, audio,
//! shaders and descriptive metadata into one versioned binary blob. It is
//! fetched by the host, decoded once with [`decode`], and the resulting
//! [`PackagedContent`] is handed to the runtime by move.
//!
//! ```rust
//! use turbo_io::{decode, PackageWriter, SectionKind};
//!
//! let bytes = PackageWriter::new()
//!     .section(SectionKind::Meta, vec![1, 2, 3, 4])
//!     .finish()
//!     .unwrap();
//! let content = decode(bytes).unwrap();
//! assert_eq!(content.sections().len(), 1);
//! assert_eq!(content.sections()[0].payload(), &[1, 2, 3, 4]);
//! ```

#![warn(missing_docs)]

mod content;
mod decoder;
mod error;
pub mod format;
mod metadata;
mod writer;

pub use content::{PackagedContent, Section};
pub use decoder::{decode, decode_turbofile_v0_contents};
pub use error::{DecodeError, EncodeError};
pub use format::SectionKind;
pub use metadata::{AppConfiguration, AppMetadata, ShaderConfig};
pub use writer::PackageWriter;
