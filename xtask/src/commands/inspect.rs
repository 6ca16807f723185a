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

use crate::helpers::*;
use anyhow::{Context, Result};
use std::path::Path;

/// Decodes a `.turbo` file and lists its sections.
pub fn inspect(path: &Path) -> Result<()> {
    print_task_start("Inspecting Package", MAGNIFIER, CYAN);

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read '{}'", display(path)))?;
    let total = bytes.len() as u64;
    let content =
        turbo_io::decode(bytes).with_context(|| format!("'{}' is not a valid Turbo file", display(path)))?;

    println!(
        "{}Format:{} v{} ({}, {} sections)",
        BOLD,
        RESET,
        content.format_version(),
        human_size(total),
        content.sections().len()
    );

    match content.metadata() {
        Ok(Some(meta)) => {
            if let Some(name) = &meta.app_name {
                println!("{}App:{} {name}", BOLD, RESET);
            }
            if let Some(version) = &meta.app_version {
                println!("{}Version:{} {version}", BOLD, RESET);
            }
            if let Some(author) = &meta.app_author {
                println!("{}Author:{} {author}", BOLD, RESET);
            }
        }
        Ok(None) => print_info("No metadata section."),
        Err(e) => print_error(&format!("Metadata is unreadable: {e}")),
    }
    match content.configuration() {
        Ok(Some(config)) => println!(
            "{}Config:{} fps {:?}, resolution {:?}",
            BOLD, RESET, config.fps, config.resolution
        ),
        Ok(None) => print_info("No configuration section."),
        Err(e) => print_error(&format!("Configuration is unreadable: {e}")),
    }

    for section in content.sections() {
        println!(
            "  #{:<3} {:<12} {:>12}{}",
            section.index(),
            section.kind().to_string(),
            human_size(section.len() as u64),
            if section.was_compressed() { "  lz4" } else { "" }
        );
    }
    print_success("Package is well-formed.");
    Ok(())
}
