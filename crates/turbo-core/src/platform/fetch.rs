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

use async_trait::async_trait;
use thiserror::Error;

/// Download progress as reported by a fetch collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes received so far.
    pub loaded: u64,
    /// Total size, when the host knows it.
    pub total: Option<u64>,
}

impl Progress {
    /// Completion percentage, or `None` when the total is unknown or zero.
    pub fn percent(&self) -> Option<u8> {
        match self.total {
            Some(total) if total > 0 => {
                let pct = (self.loaded.min(total) as u128 * 100 + total as u128 / 2) / total as u128;
                Some(pct as u8)
            }
            _ => None,
        }
    }
}

/// Failure to obtain a byte sequence from the host.
///
/// Retrying is the collaborator's business; the core only reports.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Nothing exists under the requested identifier.
    #[error("'{0}' was not found")]
    NotFound(String),
    /// The transport failed.
    #[error("failed to read '{identifier}': {source}")]
    Io {
        /// The identifier being fetched.
        identifier: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The transfer ended before the announced size was received.
    #[error("'{identifier}' ended after {loaded} of {expected} bytes")]
    Incomplete {
        /// The identifier being fetched.
        identifier: String,
        /// Bytes received.
        loaded: u64,
        /// Bytes announced.
        expected: u64,
    },
}

/// Supplies raw bytes for an identifier (a URL, a path, an asset key).
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetches the whole resource.
    ///
    /// `progress` is invoked zero or more times while data arrives. Hosts that
    /// cannot determine the total size report `total: None` or skip progress
    /// entirely; the final buffer is still delivered whole.
    async fn fetch(
        &self,
        identifier: &str,
        progress: &mut (dyn FnMut(Progress) + Send),
    ) -> Result<Vec<u8>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_with_known_total() {
        let p = Progress {
            loaded: 50,
            total: Some(200),
        };
        assert_eq!(p.percent(), Some(25));
        let done = Progress {
            loaded: 200,
            total: Some(200),
        };
        assert_eq!(done.percent(), Some(100));
    }

    #[test]
    fn percent_is_clamped() {
        let p = Progress {
            loaded: 300,
            total: Some(200),
        };
        assert_eq!(p.percent(), Some(100));
    }

    #[test]
    fn percent_unknown_total() {
        let p = Progress {
            loaded: 10,
            total: None,
        };
        assert_eq!(p.percent(), None);
        let zero = Progress {
            loaded: 0,
            total: Some(0),
        };
        assert_eq!(zero.percent(), None);
    }
}
