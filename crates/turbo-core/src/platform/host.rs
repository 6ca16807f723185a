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

/// Failure reported by an optional host hook.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host does not provide this capability.
    #[error("host capability '{0}' is unavailable")]
    Unavailable(&'static str),
    /// The host attempted the operation and it failed.
    #[error("host operation failed: {0}")]
    Failed(String),
}

/// Optional wallet integration hooks exposed to games.
///
/// Every method has a safe default, so an embedding without a wallet can use
/// [`NoopWallet`] unchanged.
#[async_trait]
pub trait WalletHooks: Send + Sync {
    /// Public key of the signed-in user, if any.
    fn user(&self) -> Option<String> {
        None
    }

    /// Raw account data for `address`, if the account exists.
    async fn account(&self, _address: &str) -> Result<Option<Vec<u8>>, HostError> {
        Ok(None)
    }

    /// Signs and submits a serialized transaction, returning its signature.
    async fn sign_and_send_transaction(
        &self,
        _transaction: &[u8],
    ) -> Result<Option<String>, HostError> {
        Ok(None)
    }
}

/// Wallet hooks that report no user and accept nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWallet;

impl WalletHooks for NoopWallet {}

/// Optional hooks for surfacing loader status to the player.
pub trait ConsoleHooks: Send + Sync {
    /// Shows a short status line ("Loading game data... 40%").
    fn status(&self, _message: &str) {}
}

/// Console hooks that discard everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopConsole;

impl ConsoleHooks for NoopConsole {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_wallet_defaults() {
        let wallet = NoopWallet;
        assert_eq!(wallet.user(), None);
        assert_eq!(wallet.account("abc").await, Ok(None));
        assert_eq!(wallet.sign_and_send_transaction(&[1, 2]).await, Ok(None));
    }
}
