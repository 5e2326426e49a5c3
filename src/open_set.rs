//! The A* open set: a min-heap ordered by `f = g + h`, tie-broken by
//! lower `h` then FIFO insertion order, paired with a hash index for
//! membership/relax lookups and lazy invalidation on decrease-key.
//!
//! The heap-entry-plus-generation-counter shape is carried over from
//! the teacher's `d_star_lite_simple::QueueEntry`/`Key` pattern: rather
//! than mutating heap entries in place (impossible with
//! `std::collections::BinaryHeap`), a stale push is left in the heap
//! and silently skipped on pop once its generation no longer matches
//! the index's current record.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::state::{Identity, SearchState};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Key {
    f: OrderedFloat<f64>,
    h: OrderedFloat<f64>,
    seq: u64,
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse every field so the
        // smallest (f, then h, then earliest seq) sorts to the top.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: Key,
    identity: Identity,
    arena_idx: usize,
    generation: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for Entry {}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[derive(Debug, Clone, Copy)]
struct IndexRecord {
    arena_idx: usize,
    f: f64,
    generation: u64,
}

/// Priority structure over `SearchState`s, keyed by identity
/// `(pos, vel)`. States themselves live in the caller's arena; this
/// structure only ever stores arena indices.
#[derive(Default)]
pub struct OpenSet {
    heap: BinaryHeap<Entry>,
    index: FxHashMap<Identity, IndexRecord>,
    next_seq: u64,
    next_generation: u64,
}

impl OpenSet {
    pub fn new() -> Self {
        OpenSet::default()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Current best `f` recorded for `identity`, if it is a member.
    pub fn f_of(&self, identity: Identity) -> Option<f64> {
        self.index.get(&identity).map(|r| r.f)
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.index.contains_key(&identity)
    }

    /// Pushes `state` unconditionally, replacing any previous open-set
    /// entry for the same identity. Callers are expected to have
    /// already decided (via `f_of`) that this push should win.
    pub fn push(&mut self, state: &SearchState, arena_idx: usize) {
        let generation = self.next_generation;
        self.next_generation += 1;
        let seq = self.next_seq;
        self.next_seq += 1;

        self.index.insert(
            state.identity(),
            IndexRecord {
                arena_idx,
                f: state.f(),
                generation,
            },
        );
        self.heap.push(Entry {
            key: Key {
                f: OrderedFloat(state.f()),
                h: OrderedFloat(state.h),
                seq,
            },
            identity: state.identity(),
            arena_idx,
            generation,
        });
    }

    /// Pops the minimum-`f` state, tie-broken by lower `h` then FIFO
    /// order, skipping stale (superseded) heap entries.
    pub fn pop_min(&mut self) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            let is_current = self
                .index
                .get(&entry.identity)
                .is_some_and(|r| r.generation == entry.generation);
            if is_current {
                // Remove the index record now: the caller owns this
                // pop and will either close it or re-push it.
                self.index.remove(&entry.identity);
                return Some(entry.arena_idx);
            }
        }
        None
    }
}
