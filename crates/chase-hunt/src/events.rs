//! Queued mode triggers.
//!
//! Collision and pellet logic may ask for mode changes at any point between
//! ticks. Requests wait in a [`TriggerQueue`] and are applied together at
//! the start of the next pack tick, in a fixed precedence: every
//! [`EnterFrightened`](ModeTrigger::EnterFrightened) before any
//! [`TakeDown`](ModeTrigger::TakeDown), and those before any
//! [`ResetToSpawn`](ModeTrigger::ResetToSpawn). Requests of the same kind
//! keep their arrival order (FIFO).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// An externally requested mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeTrigger {
    /// The pursued agent ate a power pellet.
    EnterFrightened,
    /// The pursued agent caught a frightened hunter.
    TakeDown,
    /// Life lost or level restarted.
    ResetToSpawn,
}

impl ModeTrigger {
    /// Precedence: lower ranks are applied first.
    pub fn rank(self) -> i32 {
        match self {
            ModeTrigger::EnterFrightened => 0,
            ModeTrigger::TakeDown => 1,
            ModeTrigger::ResetToSpawn => 2,
        }
    }
}

/// Which hunters a trigger applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    All,
    /// One hunter, by roster index.
    Hunter(usize),
}

#[derive(Debug)]
struct Entry {
    trigger: ModeTrigger,
    target: Target,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.trigger.rank() == other.trigger.rank() && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap: smaller rank first, then
        // smaller seq.
        self.trigger
            .rank()
            .cmp(&other.trigger.rank())
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Pending mode triggers, popped by precedence then arrival order.
#[derive(Debug, Default)]
pub struct TriggerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `trigger` for `target`.
    pub fn push(&mut self, trigger: ModeTrigger, target: Target) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            trigger,
            target,
            seq,
        }));
    }

    /// Pop the next trigger to apply.
    pub fn pop(&mut self) -> Option<(ModeTrigger, Target)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.trigger, entry.target))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every pending trigger.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
