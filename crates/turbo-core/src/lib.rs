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

//! # Turbo Core
//!
//! Foundational crate containing the input vocabulary, host-facing contracts,
//! and the cooperative cancellation primitives shared by every other Turbo
//! crate. Nothing in here performs I/O or owns a thread.

#![warn(missing_docs)]

pub mod cancel;
pub mod capability_registry;
pub mod event;
pub mod input;
pub mod platform;

pub use cancel::{CancellationToken, LatestRequest, RequestTicket};
pub use capability_registry::CapabilityRegistry;
pub use event::{EventBus, EventPublisher};
