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

//! A type-keyed registry of optional host capabilities.
//!
//! The registry maps a capability interface (usually a trait object type such
//! as `dyn WalletHooks`) to a shared implementation. Each entry remembers
//! whether it is a real host implementation or a no-op stand-in, so the
//! runtime can select concrete-or-stub once at startup and report what it
//! degraded.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

struct Entry {
    name: &'static str,
    value: Box<dyn Any + Send + Sync>,
    stub: bool,
}

/// A capability registry keyed by the capability's [`TypeId`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use turbo_core::CapabilityRegistry;
///
/// trait Clock: Send + Sync { fn now(&self) -> u64; }
/// struct Fixed;
/// impl Clock for Fixed { fn now(&self) -> u64 { 42 } }
///
/// let mut registry = CapabilityRegistry::new();
/// registry.insert::<dyn Clock>(Arc::new(Fixed));
///
/// let clock = registry.get::<dyn Clock>().unwrap();
/// assert_eq!(clock.now(), 42);
/// ```
#[derive(Default)]
pub struct CapabilityRegistry {
    entries: HashMap<TypeId, Entry>,
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers a concrete implementation of `T`, replacing any previous one.
    pub fn insert<T: ?Sized + Send + Sync + 'static>(&mut self, capability: Arc<T>) {
        self.put(capability, false);
    }

    /// Registers a no-op stand-in for `T`, replacing any previous entry.
    pub fn insert_stub<T: ?Sized + Send + Sync + 'static>(&mut self, capability: Arc<T>) {
        self.put(capability, true);
    }

    fn put<T: ?Sized + Send + Sync + 'static>(&mut self, capability: Arc<T>, stub: bool) {
        self.entries.insert(
            TypeId::of::<T>(),
            Entry {
                name: type_name::<T>(),
                value: Box::new(capability),
                stub,
            },
        );
    }

    /// Returns the implementation registered for `T`, if any.
    #[must_use]
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// Returns the implementation registered for `T`, registering `stub()` first if absent.
    pub fn get_or_stub<T: ?Sized + Send + Sync + 'static>(
        &mut self,
        stub: impl FnOnce() -> Arc<T>,
    ) -> Arc<T> {
        if let Some(existing) = self.get::<T>() {
            return existing;
        }
        let capability = stub();
        log::info!(
            "Host capability '{}' not provided; using a no-op stand-in.",
            type_name::<T>()
        );
        self.insert_stub(capability.clone());
        capability
    }

    /// Returns `Some(true)` if `T` is backed by a stub, `None` if `T` is absent.
    #[must_use]
    pub fn is_stub<T: ?Sized + Send + Sync + 'static>(&self) -> Option<bool> {
        self.entries.get(&TypeId::of::<T>()).map(|entry| entry.stub)
    }

    /// Type names of every capability currently backed by a stub, sorted.
    #[must_use]
    pub fn stubbed(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .entries
            .values()
            .filter(|entry| entry.stub)
            .map(|entry| entry.name)
            .collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.entries.values().map(|e| (e.name, e.stub)).collect();
        names.sort_unstable();
        f.debug_struct("CapabilityRegistry")
            .field("entries", &names)
            .finish()
    }
}
