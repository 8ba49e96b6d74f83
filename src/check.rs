// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Test-only structural checks, asserted by unit tests after
//! mutations:
//!
//! * every occupied slot's node records that slot index;
//! * every non-root node is reachable by linear probing from its
//!   parent-seeded home slot without crossing an `Empty` slot;
//! * sibling names are unique within each directory;
//! * the tree and the table hold exactly the same set of nodes;
//! * the load factor does not exceed 2/3.

use crate::Memfs;
use crate::node::NodeId;
use crate::table::Slot;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;

impl Memfs {
    /// Panic if any structural invariant does not hold.
    pub(crate) fn check_invariants(&self) {
        // Collect every node reachable from the root, checking
        // uniqueness of sibling names and link consistency on the way.
        let mut reachable = BTreeSet::new();
        let mut stack = Vec::new();
        stack.push(NodeId::ROOT);
        while let Some(id) = stack.pop() {
            let node = self.store.get(id);

            let mut names = BTreeSet::new();
            let mut n_children = 0;
            let mut prev = None;
            let mut child = node.first_child();
            while let Some(c) = child {
                let child_node = self.store.get(c);
                assert_eq!(child_node.parent, Some(id));
                assert_eq!(child_node.l_sibling, prev);
                assert!(
                    names.insert(child_node.name.as_bytes().to_vec()),
                    "duplicate name under one directory"
                );

                assert!(reachable.insert(c), "node reachable twice");
                n_children += 1;
                stack.push(c);
                prev = Some(c);
                child = child_node.r_sibling;
            }
            assert_eq!(usize::from(node.n_children), n_children);
        }

        // The table holds exactly the reachable non-root nodes, each
        // recording its own slot index.
        let mut tabled = BTreeSet::new();
        for slot in 0..self.table.size() {
            if let Some(id) = self.table.node_at(slot) {
                assert_eq!(self.store.get(id).slot, slot);
                assert!(tabled.insert(id), "node occupies two slots");
            }
        }
        assert_eq!(reachable, tabled);
        assert_eq!(self.table.occupied(), tabled.len());

        // Probe reachability: walking from the home slot must reach the
        // node without crossing an `Empty` slot.
        for &id in &reachable {
            let node = self.store.get(id);
            // OK to unwrap: the root is not in `reachable`.
            let parent = node.parent.unwrap();
            let parent_slot = self.store.get(parent).slot;
            let start =
                self.table.home_slot(parent_slot, node.name.as_bytes());

            let mut h = start;
            loop {
                if h == node.slot {
                    break;
                }
                assert_ne!(
                    self.table.slot(h),
                    Slot::Empty,
                    "probe chain to a live node crosses an empty slot"
                );
                h = (h + 1) % self.table.size();
                assert_ne!(h, start, "probe chain never reaches the node");
            }
        }

        // Load bound: occupied / size <= 2/3.
        assert!(self.table.occupied() * 3 <= self.table.size() * 2);
    }
}
