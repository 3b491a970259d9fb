//! Priority-ordered, path-deduplicated queue of pending load requests.
//!
//! Lower `priority` values are serviced first; equal priorities are serviced
//! in submission order. The heap may hold stale nodes left behind by
//! re-prioritisation or cancellation; they are skipped on dequeue and
//! compacted away once they dominate the heap.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// A pending request to render one thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub path: String,
    pub width: f32,
    pub height: f32,
    /// Lower value = serviced sooner (typically the grid cell index)
    pub priority: i32,
    /// Submission order, used to break priority ties
    pub sequence: u64,
}

/// Heap ordering key: (priority, sequence), smallest first via `Reverse`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct HeapKey {
    priority: i32,
    sequence: u64,
    path: String,
}

/// Request queue with O(log n) enqueue and dequeue.
#[derive(Debug, Default)]
pub struct RequestQueue {
    heap: BinaryHeap<Reverse<HeapKey>>,
    slots: HashMap<String, LoadRequest>,
    next_sequence: u64,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a request, or merge it into the one already queued for its path.
    ///
    /// A merge keeps the more urgent (lower) priority and the original
    /// sequence number, and adopts the newly requested size.
    pub fn enqueue(&mut self, path: &str, width: f32, height: f32, priority: i32) {
        if let Some(slot) = self.slots.get_mut(path) {
            slot.width = width;
            slot.height = height;
            if priority < slot.priority {
                slot.priority = priority;
                self.heap.push(Reverse(HeapKey {
                    priority,
                    sequence: slot.sequence,
                    path: path.to_string(),
                }));
                self.compact_if_needed();
            }
            return;
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(HeapKey {
            priority,
            sequence,
            path: path.to_string(),
        }));
        self.slots.insert(
            path.to_string(),
            LoadRequest {
                path: path.to_string(),
                width,
                height,
                priority,
                sequence,
            },
        );
        self.compact_if_needed();
    }

    /// Remove and return the most urgent request.
    pub fn dequeue_next(&mut self) -> Option<LoadRequest> {
        while let Some(Reverse(key)) = self.heap.pop() {
            let live = self
                .slots
                .get(&key.path)
                .is_some_and(|slot| slot.priority == key.priority && slot.sequence == key.sequence);
            if live {
                return self.slots.remove(&key.path);
            }
        }
        None
    }

    /// Drop the queued request for a path. Returns whether one was queued.
    pub fn cancel(&mut self, path: &str) -> bool {
        self.slots.remove(path).is_some()
    }

    /// Drop every queued request.
    pub fn cancel_all(&mut self) {
        self.slots.clear();
        self.heap.clear();
    }

    pub fn contains(&self, path: &str) -> bool {
        self.slots.contains_key(path)
    }

    /// The queued request for a path, if any.
    pub fn get(&self, path: &str) -> Option<&LoadRequest> {
        self.slots.get(path)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn compact_if_needed(&mut self) {
        if self.heap.len() <= 2 * self.slots.len() + 64 {
            return;
        }
        self.heap = self
            .slots
            .values()
            .map(|slot| {
                Reverse(HeapKey {
                    priority: slot.priority,
                    sequence: slot.sequence,
                    path: slot.path.clone(),
                })
            })
            .collect();
    }
}
