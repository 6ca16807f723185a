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

//! Getting packaged content from the host into a runtime.
//!
//! Loading is the only long-latency step: the bytes are fetched through a
//! [`ContentFetcher`], decoded in one synchronous pass, and handed over
//! exactly once. Any failure on the way leaves no runtime behind.

mod fetch;

pub use fetch::{FileFetcher, MemoryFetcher};

use std::sync::Arc;

use turbo_core::platform::{ConsoleHooks, ContentFetcher, Progress};
use turbo_io::PackagedContent;

use crate::error::BootstrapError;

/// Fetches `identifier` and decodes it.
pub async fn load_content(
    fetcher: &dyn ContentFetcher,
    identifier: &str,
    progress: &mut (dyn FnMut(Progress) + Send),
) -> Result<PackagedContent, BootstrapError> {
    log::info!("Fetching packaged content '{identifier}'...");
    let bytes = fetcher.fetch(identifier, progress).await?;
    log::debug!("Fetched {} bytes for '{identifier}'.", bytes.len());

    let content = turbo_io::decode(bytes)?;
    log::info!(
        "Decoded '{identifier}': format v{}, {} sections.",
        content.format_version(),
        content.sections().len()
    );
    Ok(content)
}

/// Returns a progress callback that shows a loading line on the host console.
///
/// Reports are only forwarded when the displayed percentage changes. Hosts
/// that do not know the total size get a single line without a percentage.
pub fn console_progress(
    console: Arc<dyn ConsoleHooks>,
) -> impl FnMut(Progress) + Send + 'static {
    let mut last: Option<Option<u8>> = None;
    move |progress: Progress| {
        let percent = progress.percent();
        if last == Some(percent) {
            return;
        }
        last = Some(percent);
        match percent {
            Some(pct) => console.status(&format!("Loading game data... {pct}%")),
            None => console.status("Loading game data..."),
        }
    }
}

/// Holds decoded content until a runtime takes ownership of it.
#[derive(Debug)]
pub struct ContentSlot {
    content: Option<PackagedContent>,
}

impl ContentSlot {
    /// Wraps freshly decoded content.
    pub fn new(content: PackagedContent) -> Self {
        Self {
            content: Some(content),
        }
    }

    /// Moves the content out. Every call after the first fails.
    pub fn take(&mut self) -> Result<PackagedContent, BootstrapError> {
        self.content.take().ok_or(BootstrapError::ContentAlreadyTaken)
    }

    /// Returns `true` once the content has been taken.
    pub fn is_taken(&self) -> bool {
        self.content.is_none()
    }
}

impl From<PackagedContent> for ContentSlot {
    fn from(content: PackagedContent) -> Self {
        Self::new(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use turbo_io::{PackageWriter, SectionKind};

    #[test]
    fn slot_hands_off_once() {
        let bytes = PackageWriter::new().section(SectionKind::Code, [1u8]).finish().unwrap();
        let mut slot = ContentSlot::new(turbo_io::decode(bytes).unwrap());
        assert!(slot.take().is_ok());
        assert!(slot.is_taken());
        assert!(matches!(slot.take(), Err(BootstrapError::ContentAlreadyTaken)));
    }

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl ConsoleHooks for Lines {
        fn status(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_owned());
        }
    }

    #[test]
    fn console_progress_skips_repeats() {
        let lines = Arc::new(Lines::default());
        let mut report = console_progress(lines.clone());
        for loaded in [0, 1, 40, 41, 100] {
            report(Progress {
                loaded,
                total: Some(100),
            });
        }
        report(Progress {
            loaded: 7,
            total: None,
        });
        assert_eq!(
            lines.0.lock().unwrap().as_slice(),
            [
                "Loading game data... 0%",
                "Loading game data... 1%",
                "Loading game data... 40%",
                "Loading game data... 41%",
                "Loading game data... 100%",
                "Loading game data...",
            ]
        );
    }
}
