// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::hash::seeded_hash;
use crate::node::{NodeId, NodeStore};
use crate::util::{u64_from_usize, usize_from_u64};
use alloc::vec;
use alloc::vec::Vec;

/// One cell of the hash table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Slot {
    /// Never used.
    Empty,

    /// Previously used, vacated by a deletion. Transparent to the
    /// vacant-slot probe, opaque to the match probe.
    Tombstone,

    Occupied(NodeId),
}

/// Open-addressed hash index over the namespace tree.
///
/// The table maps (parent, name) to a node by linear probing from the
/// parent-seeded home slot. It holds ids only; node ownership lives in
/// the [`NodeStore`]. The load factor is kept at or below 2/3, which is
/// what guarantees that every probe terminates at an `Empty` slot.
#[derive(Debug)]
pub(crate) struct HashTable {
    slots: Vec<Slot>,
    occupied: usize,
}

impl HashTable {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; size],
            occupied: 0,
        }
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    /// True if placing one more node would push the load factor past
    /// 2/3, meaning the table must grow before the placement.
    ///
    /// Checked with integer cross-multiplication so no float creeps
    /// into the invariant: (occupied + 1) / size > 2/3.
    pub(crate) fn would_exceed_max_load(&self) -> bool {
        (self.occupied + 1) * 3 > self.size() * 2
    }

    /// Home slot for a child of the directory whose slot index is
    /// `parent_slot`: the parent-seeded hash of `name`, reduced by the
    /// current table size.
    pub(crate) fn home_slot(&self, parent_slot: usize, name: &[u8]) -> usize {
        let h = seeded_hash(name, u64_from_usize(parent_slot));
        // OK to unwrap (in usize_from_u64): the remainder is less than
        // the table size.
        usize_from_u64(h % u64_from_usize(self.size()))
    }

    /// Get the node occupying `slot`, if any.
    pub(crate) fn node_at(&self, slot: usize) -> Option<NodeId> {
        match self.slots[slot] {
            Slot::Occupied(id) => Some(id),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Find the slot holding the child of `parent` named `name`,
    /// probing linearly from `start`.
    ///
    /// Tombstones are skipped. Reaching an `Empty` slot proves the key
    /// is absent (every live node is reachable from its home slot
    /// without crossing `Empty`) and yields `None`.
    pub(crate) fn probe_existing(
        &self,
        store: &NodeStore,
        start: usize,
        name: &[u8],
        parent: NodeId,
    ) -> Option<usize> {
        let mut h = start;

        // Load <= 2/3 guarantees an `Empty` slot, so the walk below
        // cannot wrap past a full cycle; if it does, an invariant has
        // been broken and stopping is the only sane move.
        for _ in 0..self.size() {
            match self.slots[h] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(id) => {
                    let node = store.get(id);
                    if node.parent == Some(parent)
                        && node.name.as_bytes() == name
                    {
                        return Some(h);
                    }
                }
            }
            h = (h + 1) % self.size();
        }

        unreachable!("hash table probe wrapped: no empty slot in table");
    }

    /// Find a slot where a new child of `parent` named `name` can be
    /// placed, probing linearly from `start`.
    ///
    /// The scan stops at the first `Empty` or `Tombstone` slot. If an
    /// occupied slot with the same (parent, name) is encountered first,
    /// the key already exists and `None` is returned; the caller must
    /// report a duplicate, not insert.
    pub(crate) fn probe_vacant(
        &self,
        store: &NodeStore,
        start: usize,
        name: &[u8],
        parent: NodeId,
    ) -> Option<usize> {
        let mut h = start;

        for _ in 0..self.size() {
            match self.slots[h] {
                Slot::Empty | Slot::Tombstone => return Some(h),
                Slot::Occupied(id) => {
                    let node = store.get(id);
                    if node.parent == Some(parent)
                        && node.name.as_bytes() == name
                    {
                        return None;
                    }
                }
            }
            h = (h + 1) % self.size();
        }

        unreachable!("hash table probe wrapped: no empty slot in table");
    }

    /// Place `id` in `slot`.
    pub(crate) fn occupy(&mut self, slot: usize, id: NodeId) {
        debug_assert!(!matches!(self.slots[slot], Slot::Occupied(_)));
        self.slots[slot] = Slot::Occupied(id);
        self.occupied += 1;
    }

    /// Vacate `slot`, leaving a tombstone.
    pub(crate) fn vacate(&mut self, slot: usize) {
        debug_assert!(matches!(self.slots[slot], Slot::Occupied(_)));
        self.slots[slot] = Slot::Tombstone;
        self.occupied -= 1;
    }

    #[cfg(test)]
    pub(crate) fn slot(&self, index: usize) -> Slot {
        self.slots[index]
    }
}
