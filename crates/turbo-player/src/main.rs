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

//! Headless Turbo player.
//!
//! Loads a packaged game from disk, prints what it contains, and drives the
//! frame scheduler for a fixed number of simulated display refreshes with a
//! diagnostic simulation.

mod diagnostic;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use turbo_core::platform::HeadlessSurface;
use turbo_io::PackagedContent;
use turbo_runtime::{
    FileFetcher, FrameReport, HostCapabilities, Runtime, RuntimeConfig, SchedulerState,
};

use diagnostic::{DiagnosticSimulation, Observations};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// The .turbo file to play.
    file: PathBuf,

    /// Number of display refreshes to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Simulated display refresh rate in Hz.
    #[arg(long, default_value_t = 60)]
    refresh: u32,

    /// Every N-th refresh arrives this many milliseconds late.
    #[arg(long, value_names = ["N", "MS"], num_args = 2)]
    stall: Option<Vec<u64>>,

    /// Runtime configuration JSON file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Key codes held down from the first refresh (e.g. `ArrowUp`).
    #[arg(long = "hold")]
    held_keys: Vec<String>,

    /// Only print the content summary.
    #[arg(long)]
    inspect: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    turbo_runtime::logging::init("info");
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config '{}'", path.display()))?;
            RuntimeConfig::from_json(&json)
                .with_context(|| format!("Invalid config '{}'", path.display()))?
        }
        None => RuntimeConfig::default(),
    };

    let (root, name) = split_path(&cli.file)?;
    let fetcher = FileFetcher::new(root);
    let observations = Arc::new(Mutex::new(Observations::default()));
    let shared = observations.clone();
    let inspect_only = cli.inspect;

    let [width, height] = config.resolution;
    let mut runtime = Runtime::load(
        config,
        &fetcher,
        &name,
        Arc::new(HeadlessSurface::new(width, height)),
        HostCapabilities::default(),
        move |setup| {
            print_summary(&setup.content);
            let code_len = setup.content.code().map_or(0, <[u8]>::len);
            Ok(Box::new(DiagnosticSimulation::new(
                code_len,
                u64::from(setup.config.fps),
                shared,
            )))
        },
    )
    .await
    .with_context(|| format!("Failed to start '{}'", cli.file.display()))?;

    if let Some(ticket) = runtime.fit_surface() {
        let [width, height] = runtime.config().resolution;
        runtime.complete_resize(&ticket, Ok(()));
        println!("Surface resized to the game's {width}x{height}.");
    }

    if inspect_only {
        runtime.shutdown();
        return Ok(());
    }

    let recorder = runtime.recorder();
    for code in &cli.held_keys {
        recorder.key_down(code.as_str());
    }

    let refresh = Duration::from_secs(1) / cli.refresh.max(1);
    let (stall_every, stall_by) = match cli.stall.as_deref() {
        Some([every, ms]) => (*every, Duration::from_millis(*ms)),
        _ => (0, Duration::ZERO),
    };

    let mut now = Duration::ZERO;
    let mut capped = 0;
    for frame in 1..=cli.frames {
        now += refresh;
        if stall_every > 0 && frame % stall_every == 0 {
            now += stall_by;
        }
        let report: FrameReport = runtime.on_frame(now);
        if report.capped {
            capped += 1;
        }
        if runtime.state() == SchedulerState::Stopped {
            break;
        }
    }
    runtime.shutdown();

    let stats = runtime.stats();
    println!(
        "Ran {} callbacks: {} steps, {} renders ({} skipped), {} capped.",
        stats.callbacks, stats.steps, stats.rendered, stats.skipped_renders, capped
    );
    if let Ok(seen) = observations.lock() {
        println!(
            "Simulation saw {} steps, {} renders, {} button presses.",
            seen.steps,
            seen.renders,
            seen.presses.len()
        );
        if let Some((x, y)) = seen.last_pointer {
            println!("Last pointer position: ({x:.1}, {y:.1}).");
        }
    }
    if let Some(fault) = runtime.last_error() {
        anyhow::bail!("simulation stopped: {fault}");
    }
    Ok(())
}

fn split_path(path: &std::path::Path) -> Result<(PathBuf, String)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Content path has no valid file name")?
        .to_owned();
    let root = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((root, name))
}

fn print_summary(content: &PackagedContent) {
    println!("Turbo file v{}", content.format_version());
    match content.metadata() {
        Ok(Some(meta)) => println!(
            "  {} {} by {}",
            meta.app_name.as_deref().unwrap_or("<unnamed>"),
            meta.app_version.as_deref().unwrap_or("?"),
            meta.app_author.as_deref().unwrap_or("unknown")
        ),
        Ok(None) => println!("  (no metadata)"),
        Err(e) => println!("  metadata unreadable: {e}"),
    }
    for section in content.sections() {
        println!(
            "  #{:<3} {:<10} {:>10} bytes{}",
            section.index(),
            section.kind().to_string(),
            section.len(),
            if section.was_compressed() { " (lz4)" } else { "" }
        );
    }
}
