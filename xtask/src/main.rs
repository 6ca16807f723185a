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

// Build automation for Turbo games
// Run with: cargo xtask <command>

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask", about = "Turbo build automation", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a .turbo file from a Turbo.toml manifest.
    Pack {
        /// Path to the manifest.
        #[arg(long, default_value = "Turbo.toml")]
        manifest: PathBuf,
        /// Output file. Defaults to `.dist/<name>.turbo` next to the manifest.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Decode a .turbo file and list its sections.
    Inspect {
        /// The file to inspect.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Pack { manifest, out } => commands::pack::pack(manifest, out.as_deref()),
        Commands::Inspect { file } => commands::inspect::inspect(file),
    };
    if let Err(e) = &result {
        helpers::print_error(&format!("{e:#}"));
    }
    result
}
