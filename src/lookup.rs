// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::Memfs;
use crate::error::FsError;
use crate::file_type::FileType;
use crate::name::{NodeName, NodeNameBuf};
use crate::node::{Node, NodeContent, NodeId};
use crate::path::Path;
use alloc::vec::Vec;

/// Where a path walk lands after every segment but the last: the node
/// that must act as the final segment's directory, the final segment
/// itself, and the directory's distance from the root.
struct ParentDir<'p> {
    id: NodeId,
    last: &'p [u8],
    depth: usize,
}

impl Memfs {
    /// Walk the interior segments of `path`.
    ///
    /// Each step costs one probe: the child's home slot is derived from
    /// the current directory's slot index, so no per-directory state is
    /// consulted beyond the node itself.
    ///
    /// Interior segments are matched as raw bytes. An invalid segment
    /// (such as the empty string produced by `//`) simply never
    /// matches, because no node can be created with such a name.
    fn walk_to_parent<'p>(
        &self,
        path: Path<'p>,
    ) -> Result<ParentDir<'p>, FsError> {
        let mut segments = path.segments();
        // OK to unwrap: a valid `Path` is non-empty and so yields at
        // least one segment.
        let mut current_seg = segments.next().unwrap();
        let mut current = NodeId::ROOT;
        let mut depth = 0;

        while let Some(next_seg) = segments.next() {
            let node = self.store.get(current);
            if !node.is_dir() {
                return Err(FsError::NotADirectory);
            }
            if node.n_children == 0 {
                // Nothing below this directory, so the child named by
                // the current segment certainly does not exist.
                return Err(FsError::NotFound);
            }
            if depth == Self::MAX_DEPTH {
                return Err(FsError::MaxDepthExceeded);
            }

            let start = self.table.home_slot(node.slot, current_seg);
            let slot = self
                .table
                .probe_existing(&self.store, start, current_seg, current)
                .ok_or(FsError::NotFound)?;
            // OK to unwrap: `probe_existing` only returns occupied
            // slots.
            current = self.table.node_at(slot).unwrap();
            depth += 1;
            current_seg = next_seg;
        }

        Ok(ParentDir {
            id: current,
            last: current_seg,
            depth,
        })
    }

    /// Locate the node at `path`.
    pub(crate) fn lookup(&self, path: Path<'_>) -> Result<NodeId, FsError> {
        let parent = self.walk_to_parent(path)?;
        let parent_node = self.store.get(parent.id);

        if !parent_node.is_dir() {
            return Err(FsError::NotADirectory);
        }
        if parent_node.n_children == 0 {
            return Err(FsError::NotFound);
        }

        let start = self.table.home_slot(parent_node.slot, parent.last);
        let slot = self
            .table
            .probe_existing(&self.store, start, parent.last, parent.id)
            .ok_or(FsError::NotFound)?;
        // OK to unwrap: `probe_existing` only returns occupied slots.
        Ok(self.table.node_at(slot).unwrap())
    }

    /// Create a node of the given kind at `path`.
    ///
    /// The parent directory must already exist; intermediate
    /// directories are never created implicitly.
    pub(crate) fn create_node(
        &mut self,
        path: Path<'_>,
        kind: FileType,
    ) -> Result<(), FsError> {
        let parent = self.walk_to_parent(path)?;
        let name = NodeName::try_from(parent.last)?;
        let parent_node = self.store.get(parent.id);

        if !parent_node.is_dir() {
            return Err(FsError::NotADirectory);
        }
        if usize::from(parent_node.n_children) == Self::MAX_CHILDREN {
            return Err(FsError::DirectoryFull);
        }
        if parent.depth == Self::MAX_DEPTH {
            return Err(FsError::MaxDepthExceeded);
        }

        let start = self.table.home_slot(parent_node.slot, name.as_bytes());
        let mut slot = self
            .table
            .probe_vacant(&self.store, start, name.as_bytes(), parent.id)
            .ok_or(FsError::AlreadyExists)?;

        // Grow before placement if the load bound would be broken. The
        // rehash moves the parent, so the slot must be re-derived from
        // the parent's new index.
        if self.table.would_exceed_max_load() {
            self.expand();
            let start = self
                .table
                .home_slot(self.store.get(parent.id).slot, name.as_bytes());
            // OK to unwrap: the key was absent before the rehash, and
            // rehashing adds no keys.
            slot = self
                .table
                .probe_vacant(&self.store, start, name.as_bytes(), parent.id)
                .unwrap();
        }

        let content = match kind {
            FileType::Directory => NodeContent::Dir { first_child: None },
            FileType::Regular => NodeContent::File { data: Vec::new() },
        };
        let id = self.store.insert(Node {
            slot,
            name: NodeNameBuf::from(name),
            parent: Some(parent.id),
            l_sibling: None,
            r_sibling: None,
            n_children: 0,
            content,
        });
        self.attach_child(parent.id, id);
        self.table.occupy(slot, id);

        Ok(())
    }
}
