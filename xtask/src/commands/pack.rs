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

use crate::commands::manifest::{ContentSection, TurboManifest};
use crate::helpers::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use turbo_io::{AppConfiguration, AppMetadata, PackageWriter, SectionKind, ShaderConfig};
use walkdir::WalkDir;

/// Builds a `.turbo` file from the manifest at `manifest_path`.
///
/// Paths in the manifest are relative to the manifest's directory.
pub fn pack(manifest_path: &Path, out: Option<&Path>) -> Result<()> {
    print_task_start("Packing Game", PACKAGE, MAGENTA);

    let manifest = load_manifest(manifest_path)?;
    let base = manifest_path.parent().unwrap_or(Path::new("."));
    let bytes = build_package(&manifest, base)?;

    let out = match out {
        Some(path) => path.to_path_buf(),
        None => {
            let name = manifest.app.name.as_deref().unwrap_or("game");
            base.join(".dist").join(format!("{name}.turbo"))
        }
    };
    if let Some(dir) = out.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create '{}'", display(dir)))?;
    }
    fs::write(&out, &bytes).with_context(|| format!("Failed to write '{}'", display(&out)))?;

    print_success(&format!(
        "Wrote '{}' ({})",
        display(&out),
        human_size(bytes.len() as u64)
    ));
    Ok(())
}

/// Assembles the package bytes for `manifest`.
pub fn build_package(manifest: &TurboManifest, base: &Path) -> Result<Vec<u8>> {
    let meta = AppMetadata {
        app_name: manifest.app.name.clone(),
        app_version: manifest.app.version.clone(),
        app_author: manifest.app.author.clone(),
        app_description: manifest.app.description.clone(),
    };
    let config = AppConfiguration {
        fps: manifest.config.fps,
        resolution: manifest.config.resolution,
        tile_size: manifest.config.tile_size,
        shaders: ShaderConfig {
            main: read_optional(base, manifest.config.shaders.main.as_deref())?,
            surface: read_optional(base, manifest.config.shaders.surface.as_deref())?,
        },
    };

    let content = &manifest.content;
    let code_path = base.join(&content.code);
    let code = fs::read(&code_path)
        .with_context(|| format!("Failed to read code '{}'", display(&code_path)))?;

    let mut writer = PackageWriter::new()
        .section(
            SectionKind::Meta,
            serde_json::to_vec(&meta).context("Failed to serialize metadata")?,
        )
        .section(
            SectionKind::Config,
            serde_json::to_vec(&config).context("Failed to serialize configuration")?,
        );
    writer = add(writer, content, SectionKind::Code, code);

    for (kind, roots) in [
        (SectionKind::Sprites, &content.sprites),
        (SectionKind::Audio, &content.audio),
    ] {
        for file in collect_files(base, roots) {
            let bytes = fs::read(&file)
                .with_context(|| format!("Failed to read '{}'", display(&file)))?;
            println!("  {} {:<8} {}", CHECK, kind.to_string(), display(&file));
            writer = add(writer, content, kind, bytes);
        }
    }

    print_info(&format!("{} sections assembled.", writer.len()));
    writer.finish().context("Failed to serialize package")
}

fn add(writer: PackageWriter, content: &ContentSection, kind: SectionKind, bytes: Vec<u8>) -> PackageWriter {
    if content.compress {
        writer.compressed_section(kind, bytes)
    } else {
        writer.section(kind, bytes)
    }
}

fn read_optional(base: &Path, path: Option<&Path>) -> Result<Option<String>> {
    path.map(|p| {
        let full = base.join(p);
        fs::read_to_string(&full)
            .with_context(|| format!("Failed to read shader '{}'", display(&full)))
    })
    .transpose()
}

/// Lists the files under each root in a stable order. Missing roots are skipped.
fn collect_files(base: &Path, roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        let root = base.join(root);
        if !root.exists() {
            print_info(&format!("'{}' does not exist, skipping.", display(&root)));
            continue;
        }
        for entry in WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
    }
    files
}

/// Loads `Turbo.toml`, falling back to the conventional layout when absent.
fn load_manifest(manifest_path: &Path) -> Result<TurboManifest> {
    if !manifest_path.exists() {
        print_info(&format!(
            "No '{}' found. Using default configuration.",
            display(manifest_path)
        ));
        return Ok(TurboManifest::default());
    }
    print_info(&format!(
        "Found '{}'. Loading configuration.",
        display(manifest_path)
    ));
    let manifest_str = fs::read_to_string(manifest_path)
        .with_context(|| format!("Failed to read manifest '{}'", display(manifest_path)))?;
    toml::from_str(&manifest_str)
        .with_context(|| format!("Failed to parse TOML from '{}'", display(manifest_path)))
}
