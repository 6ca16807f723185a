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

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use turbo_core::platform::{ContentFetcher, FetchError, Progress};

const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Reads content from files under a root directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
    chunk_size: usize,
}

impl FileFetcher {
    /// Resolves identifiers relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets how many bytes are read between progress reports.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    fn io_error(identifier: &str, source: std::io::Error) -> FetchError {
        if source.kind() == ErrorKind::NotFound {
            FetchError::NotFound(identifier.to_owned())
        } else {
            FetchError::Io {
                identifier: identifier.to_owned(),
                source,
            }
        }
    }
}

#[async_trait]
impl ContentFetcher for FileFetcher {
    async fn fetch(
        &self,
        identifier: &str,
        progress: &mut (dyn FnMut(Progress) + Send),
    ) -> Result<Vec<u8>, FetchError> {
        let path = self.root.join(identifier);
        let mut file = tokio::fs::File::open(&path)
            .await
            .map_err(|e| Self::io_error(identifier, e))?;
        let total = file
            .metadata()
            .await
            .map_err(|e| Self::io_error(identifier, e))?
            .len();

        let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
        let mut chunk = vec![0u8; self.chunk_size];
        progress(Progress {
            loaded: 0,
            total: Some(total),
        });
        loop {
            let read = file
                .read(&mut chunk)
                .await
                .map_err(|e| Self::io_error(identifier, e))?;
            if read == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..read]);
            progress(Progress {
                loaded: bytes.len() as u64,
                total: Some(total),
            });
        }

        let loaded = bytes.len() as u64;
        if loaded < total {
            return Err(FetchError::Incomplete {
                identifier: identifier.to_owned(),
                loaded,
                expected: total,
            });
        }
        log::debug!("Read {loaded} bytes from {}.", path.display());
        Ok(bytes)
    }
}

/// Serves content from memory. Useful for tests and embedded games.
#[derive(Debug, Clone)]
pub struct MemoryFetcher {
    entries: HashMap<String, Arc<[u8]>>,
    report_total: bool,
}

impl MemoryFetcher {
    /// Creates an empty fetcher that reports the total size.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            report_total: true,
        }
    }

    /// Makes progress reports carry no total, like a host without a
    /// content length.
    pub fn without_total(mut self) -> Self {
        self.report_total = false;
        self
    }

    /// Registers `bytes` under `identifier`.
    pub fn insert(&mut self, identifier: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.entries.insert(identifier.into(), bytes.into());
    }

    /// Builder form of [`Self::insert`].
    pub fn with(mut self, identifier: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(identifier, bytes);
        self
    }
}

impl Default for MemoryFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for MemoryFetcher {
    async fn fetch(
        &self,
        identifier: &str,
        progress: &mut (dyn FnMut(Progress) + Send),
    ) -> Result<Vec<u8>, FetchError> {
        let bytes = self
            .entries
            .get(identifier)
            .ok_or_else(|| FetchError::NotFound(identifier.to_owned()))?;
        let len = bytes.len() as u64;
        progress(Progress {
            loaded: len,
            total: self.report_total.then_some(len),
        });
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn file_fetcher_reports_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("game.turbo")).unwrap();
        file.write_all(&[7u8; 10]).unwrap();
        drop(file);

        let fetcher = FileFetcher::new(dir.path()).with_chunk_size(4);
        let mut reports = Vec::new();
        let bytes = fetcher
            .fetch("game.turbo", &mut |p: Progress| reports.push(p.loaded))
            .await
            .unwrap();

        assert_eq!(bytes, vec![7u8; 10]);
        assert_eq!(reports, vec![0, 4, 8, 10]);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FileFetcher::new(dir.path());
        let err = fetcher.fetch("nope.turbo", &mut |_| {}).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(id) if id == "nope.turbo"));
    }

    #[tokio::test]
    async fn memory_fetcher_without_total() {
        let fetcher = MemoryFetcher::new()
            .without_total()
            .with("a", vec![1u8, 2, 3]);
        let mut seen = None;
        let bytes = fetcher
            .fetch("a", &mut |p: Progress| seen = Some(p))
            .await
            .unwrap();
        assert_eq!(bytes, [1, 2, 3]);
        assert_eq!(
            seen,
            Some(Progress {
                loaded: 3,
                total: None
            })
        );
        assert_eq!(seen.and_then(|p| p.percent()), None);
    }
}
