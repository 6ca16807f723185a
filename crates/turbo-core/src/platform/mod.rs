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

//! Contracts the core expects from its host collaborators.
//!
//! Concrete implementations live with the embedding (browser loader, native
//! shell, test harness). Every optional hook has a no-op default so the
//! runtime degrades gracefully when a capability is absent.

pub mod fetch;
pub mod host;
pub mod surface;

pub use fetch::{ContentFetcher, FetchError, Progress};
pub use host::{ConsoleHooks, HostError, NoopConsole, NoopWallet, WalletHooks};
pub use surface::{HeadlessSurface, Surface};
