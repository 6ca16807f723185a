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

/// A generic, thread-safe accumulation channel.
///
/// Publishing never blocks and never takes a lock held by the consumer. Events
/// from a single publisher are drained in the order they were published.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new bus backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Returns a new publisher handle for this bus.
    pub fn publisher(&self) -> EventPublisher<T> {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Removes and returns every event currently queued, oldest first.
    ///
    /// Events published concurrently with the drain are either included or
    /// left for the next drain, never lost.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of events waiting to be drained.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if nothing is waiting to be drained.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The producer side of an [`EventBus`].
///
/// Cheap to clone and safe to move to other threads.
#[derive(Debug)]
pub struct EventPublisher<T: Send + 'static> {
    sender: flume::Sender<T>,
}

impl<T: Send + 'static> Clone for EventPublisher<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Send + 'static> EventPublisher<T> {
    /// Appends an event to the bus.
    ///
    /// Returns `false` if the bus has been dropped. The event is discarded in
    /// that case.
    pub fn publish(&self, event: T) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(_) => {
                log::trace!("Event dropped: bus no longer exists.");
                false
            }
        }
    }

    /// Returns `true` if the bus this publisher feeds has been dropped.
    pub fn is_disconnected(&self) -> bool {
        self.sender.is_disconnected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Resized { width: u32, height: u32 },
        Key(&'static str),
        Shutdown,
    }

    #[test]
    fn drain_on_empty_bus_returns_nothing() {
        let bus = EventBus::<TestEvent>::new();
        assert!(bus.is_empty());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn drain_preserves_publish_order() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(TestEvent::Resized {
            width: 1,
            height: 2,
        });
        publisher.publish(TestEvent::Key("KeyZ"));
        publisher.publish(TestEvent::Shutdown);
        assert_eq!(bus.pending(), 3);

        let drained = bus.drain();
        assert_eq!(
            drained,
            vec![
                TestEvent::Resized {
                    width: 1,
                    height: 2
                },
                TestEvent::Key("KeyZ"),
                TestEvent::Shutdown,
            ]
        );
        assert!(bus.is_empty());
    }

    #[test]
    fn drain_clears_the_buffer() {
        let bus = EventBus::new();
        bus.publisher().publish(TestEvent::Shutdown);
        assert_eq!(bus.drain().len(), 1);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn publish_from_threads() {
        let bus = EventBus::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let publisher = bus.publisher();
                thread::spawn(move || {
                    for _ in 0..100 {
                        publisher.publish(TestEvent::Key("KeyX"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("publisher thread panicked");
        }
        assert_eq!(bus.drain().len(), 400);
    }

    #[test]
    fn publish_after_bus_drop_is_rejected() {
        let bus = EventBus::new();
        let publisher = bus.publisher();
        drop(bus);

        assert!(publisher.is_disconnected());
        assert!(!publisher.publish(TestEvent::Shutdown));
    }
}
