// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Structural operations on the tree: sibling-list splicing, subtree
//! removal, growth rehashing, subtree search, and path materialisation.
//!
//! Recursive walks here are bounded by the namespace depth limit of
//! 255, so the call stack stays shallow even for worst-case trees.

use crate::Memfs;
use crate::name::NodeName;
use crate::node::NodeId;
use crate::path::{Path, PathBuf};
use crate::table::HashTable;
use alloc::vec::Vec;

impl Memfs {
    /// Splice `child` in at the head of `parent`'s child list.
    ///
    /// Insertion order is reverse chronological: the newest child is
    /// always first.
    pub(crate) fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        let old_head = self.store.get(parent).first_child();

        {
            let node = self.store.get_mut(child);
            node.l_sibling = None;
            node.r_sibling = old_head;
        }
        if let Some(head) = old_head {
            self.store.get_mut(head).l_sibling = Some(child);
        }

        let parent_node = self.store.get_mut(parent);
        parent_node.set_first_child(Some(child));
        parent_node.n_children += 1;
    }

    /// Remove `id` and everything below it.
    ///
    /// Children go first, so by the time a directory is released its
    /// child list is empty. Each removed node's slot becomes a
    /// tombstone and its parent's child count and sibling links are
    /// repaired.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) {
        debug_assert!(self.store.get(id).parent.is_some());

        while let Some(child) = self.store.get(id).first_child() {
            self.remove_subtree(child);
        }

        let node = self.store.get(id);
        let slot = node.slot;
        let parent = node.parent;
        let l_sibling = node.l_sibling;
        let r_sibling = node.r_sibling;

        self.table.vacate(slot);

        // Splice out of the sibling list. The left neighbour (or the
        // parent's list head, for a first child) skips past this node.
        if let Some(l) = l_sibling {
            self.store.get_mut(l).r_sibling = r_sibling;
        } else if let Some(p) = parent {
            self.store.get_mut(p).set_first_child(r_sibling);
        }
        if let Some(r) = r_sibling {
            self.store.get_mut(r).l_sibling = l_sibling;
        }
        if let Some(p) = parent {
            self.store.get_mut(p).n_children -= 1;
        }

        self.store.remove(id);
    }

    /// Replace the table with one of double size and re-place every
    /// node in pre-order from the root.
    ///
    /// A node's home slot depends on its parent's slot index, so a
    /// parent must have its new index recorded before any descendant is
    /// probed; pre-order gives exactly that. Tombstones do not carry
    /// over.
    pub(crate) fn expand(&mut self) {
        self.table = HashTable::new(self.table.size() * 2);
        self.rehash_subtree(NodeId::ROOT);
    }

    fn rehash_subtree(&mut self, id: NodeId) {
        // The root keeps slot 0 and stays out of the table; everything
        // else is re-probed against its parent's new index.
        if let Some(parent) = self.store.get(id).parent {
            let parent_slot = self.store.get(parent).slot;
            let start = self
                .table
                .home_slot(parent_slot, self.store.get(id).name.as_bytes());
            let slot = self
                .table
                .probe_vacant(
                    &self.store,
                    start,
                    self.store.get(id).name.as_bytes(),
                    parent,
                )
                // OK to unwrap: names are unique per directory, so the
                // probe cannot meet a duplicate while refilling.
                .unwrap();
            self.store.get_mut(id).slot = slot;
            self.table.occupy(slot, id);
        }

        let mut child = self.store.get(id).first_child();
        while let Some(c) = child {
            self.rehash_subtree(c);
            child = self.store.get(c).r_sibling;
        }
    }

    /// Collect every node in `id`'s subtree whose name equals `name`,
    /// in pre-order. Callers needing an ordering sort afterwards.
    pub(crate) fn find_in_subtree(
        &self,
        id: NodeId,
        name: NodeName<'_>,
        matches: &mut Vec<NodeId>,
    ) {
        let node = self.store.get(id);
        if node.name.as_bytes() == name.as_bytes() {
            matches.push(id);
        }

        let mut child = node.first_child();
        while let Some(c) = child {
            self.find_in_subtree(c, name, matches);
            child = self.store.get(c).r_sibling;
        }
    }

    /// Materialise the full path of `id`: a separator before each name
    /// on the way down from the root. The root contributes nothing, so
    /// its own path is the empty string.
    pub(crate) fn full_path(&self, id: NodeId) -> PathBuf {
        // Up-pass: collect the chain and the exact output length.
        let mut chain = Vec::new();
        let mut len = 0;
        let mut current = id;
        loop {
            let node = self.store.get(current);
            let Some(parent) = node.parent else { break };
            len += 1 + node.name.len();
            chain.push(current);
            current = parent;
        }

        // Down-pass: fill root-first.
        let mut bytes = Vec::with_capacity(len);
        for &ancestor in chain.iter().rev() {
            bytes.push(Path::SEPARATOR);
            bytes.extend_from_slice(self.store.get(ancestor).name.as_bytes());
        }
        PathBuf::from_vec_unchecked(bytes)
    }
}
