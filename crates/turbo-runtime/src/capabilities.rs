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

//! Optional host integrations resolved at startup.

use std::sync::Arc;

use turbo_core::platform::{ConsoleHooks, NoopConsole, NoopWallet, WalletHooks};
use turbo_core::CapabilityRegistry;

/// The host hooks a runtime was started with.
///
/// Anything the embedding did not register is replaced by a no-op stand-in,
/// so games can call every hook unconditionally.
#[derive(Clone)]
pub struct HostCapabilities {
    wallet: Arc<dyn WalletHooks>,
    console: Arc<dyn ConsoleHooks>,
    stubbed: Vec<&'static str>,
}

impl HostCapabilities {
    /// Resolves the capabilities in `registry`, stubbing the missing ones.
    pub fn from_registry(mut registry: CapabilityRegistry) -> Self {
        let wallet =
            registry.get_or_stub::<dyn WalletHooks>(|| Arc::new(NoopWallet) as Arc<dyn WalletHooks>);
        let console = registry
            .get_or_stub::<dyn ConsoleHooks>(|| Arc::new(NoopConsole) as Arc<dyn ConsoleHooks>);
        Self {
            wallet,
            console,
            stubbed: registry.stubbed(),
        }
    }

    /// Wallet hooks.
    pub fn wallet(&self) -> &Arc<dyn WalletHooks> {
        &self.wallet
    }

    /// Console hooks.
    pub fn console(&self) -> &Arc<dyn ConsoleHooks> {
        &self.console
    }

    /// Type names of the capabilities running as no-op stand-ins.
    pub fn stubbed(&self) -> &[&'static str] {
        &self.stubbed
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::from_registry(CapabilityRegistry::new())
    }
}

impl std::fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("stubbed", &self.stubbed)
            .finish_non_exhaustive()
    }
}
