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

//! Provides the append-only event channel used to collect host events.
//!
//! Host callbacks may fire at any time and, on native embeddings, from any
//! thread. They push into an [`EventBus`] through cloneable
//! [`EventPublisher`]s; the owner of the bus drains everything that arrived
//! since the last drain in a single call at a tick boundary.

mod bus;

pub use self::bus::{EventBus, EventPublisher};
