// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod command;
mod error;
mod file_type;
mod format;
mod hash;
mod lookup;
mod name;
mod node;
mod path;
mod table;
mod tree;
mod util;

#[cfg(test)]
mod check;

use alloc::vec::Vec;
use node::{NodeContent, NodeId, NodeStore};
use table::HashTable;

pub use command::{Command, CommandError};
pub use error::FsError;
pub use file_type::FileType;
pub use format::BytesDisplay;
pub use name::{NodeName, NodeNameError};
pub use path::{Path, PathBuf, PathError, Segments};

/// An in-memory hierarchical namespace.
///
/// The namespace is a tree of named nodes (regular files and
/// directories) addressed by UNIX-like byte-string paths, coupled with
/// one open-addressed hash table that resolves a (parent, name) pair in
/// expected constant time. A child's table slot is probed from a hash
/// of its name seeded with its parent's slot index, so resolving a path
/// costs one probe per segment, and the whole table behaves as a
/// per-directory sub-namespace without any per-directory tables.
///
/// All state lives in the instance: multiple independent namespaces can
/// coexist in one process. The type is not internally synchronised;
/// mutation requires `&mut self`, which makes single-threaded use a
/// compile-time fact rather than a documentation note.
///
/// Allocation failure is fatal (the global allocator aborts), matching
/// the rule that only user-level failures are reported as errors.
#[derive(Debug)]
pub struct Memfs {
    table: HashTable,
    store: NodeStore,
}

impl Memfs {
    /// Maximum number of edges between the root and any node.
    pub const MAX_DEPTH: usize = 255;

    /// Maximum number of children of one directory.
    pub const MAX_CHILDREN: usize = 1024;

    const DEFAULT_TABLE_SIZE: usize = 131_072;

    /// Smallest permitted table size. Degenerate sizes leave no
    /// headroom between the load bound and a full table, so they are
    /// clamped up to keep the probe-termination argument simple.
    const MIN_TABLE_SIZE: usize = 8;

    /// Create an empty namespace (just the root directory) with the
    /// default table size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_table_size(Self::DEFAULT_TABLE_SIZE)
    }

    /// Create an empty namespace with a chosen initial table size.
    ///
    /// Sizes below a small minimum are clamped up. Mainly useful for
    /// exercising table growth without inserting tens of thousands of
    /// nodes.
    #[must_use]
    pub fn with_table_size(size: usize) -> Self {
        Self {
            table: HashTable::new(size.max(Self::MIN_TABLE_SIZE)),
            store: NodeStore::new(),
        }
    }

    /// Create a regular file at `path`, with an empty payload.
    ///
    /// Fails if any intermediate directory is missing, if a node
    /// already exists at `path`, or if a depth or fan-out limit would
    /// be broken.
    pub fn create_file(&mut self, path: Path<'_>) -> Result<(), FsError> {
        self.create_node(path, FileType::Regular)
    }

    /// Create a directory at `path`.
    ///
    /// Same failure rules as [`Self::create_file`]. Intermediate
    /// directories are never created implicitly.
    pub fn create_dir(&mut self, path: Path<'_>) -> Result<(), FsError> {
        self.create_node(path, FileType::Directory)
    }

    /// Remove the node at `path`.
    ///
    /// Fails with [`FsError::DirectoryNotEmpty`] if the node is a
    /// directory that still has children; use [`Self::remove_all`] for
    /// that. The root itself is not addressable and cannot be removed.
    pub fn remove(&mut self, path: Path<'_>) -> Result<(), FsError> {
        let id = self.lookup(path)?;
        if self.store.get(id).n_children > 0 {
            return Err(FsError::DirectoryNotEmpty);
        }
        self.remove_subtree(id);
        Ok(())
    }

    /// Remove the node at `path` together with its whole subtree.
    pub fn remove_all(&mut self, path: Path<'_>) -> Result<(), FsError> {
        let id = self.lookup(path)?;
        self.remove_subtree(id);
        Ok(())
    }

    /// Get the payload of the file at `path`.
    pub fn read(&self, path: Path<'_>) -> Result<&[u8], FsError> {
        let id = self.lookup(path)?;
        match &self.store.get(id).content {
            NodeContent::File { data } => Ok(data.as_slice()),
            NodeContent::Dir { .. } => Err(FsError::IsADirectory),
        }
    }

    /// Replace the payload of the file at `path`, returning the number
    /// of bytes written.
    pub fn write(
        &mut self,
        path: Path<'_>,
        contents: &[u8],
    ) -> Result<usize, FsError> {
        let id = self.lookup(path)?;
        match &mut self.store.get_mut(id).content {
            NodeContent::File { data } => {
                *data = contents.to_vec();
                Ok(contents.len())
            }
            NodeContent::Dir { .. } => Err(FsError::IsADirectory),
        }
    }

    /// Get the kind of the node at `path`.
    pub fn file_type(&self, path: Path<'_>) -> Result<FileType, FsError> {
        let id = self.lookup(path)?;
        Ok(self.store.get(id).file_type())
    }

    /// Collect the full path of every node named `name`, sorted
    /// ascending by byte comparison. An empty result is not an error.
    #[must_use]
    pub fn find(&self, name: NodeName<'_>) -> Vec<PathBuf> {
        let mut matches = Vec::new();
        self.find_in_subtree(NodeId::ROOT, name, &mut matches);

        let mut paths: Vec<PathBuf> =
            matches.into_iter().map(|id| self.full_path(id)).collect();
        paths.sort();
        paths
    }

    /// Tear the namespace down: every node is removed through the
    /// ordinary removal path (slots tombstoned, counters updated), then
    /// the instance is dropped and the table freed.
    ///
    /// Dropping a `Memfs` without calling this releases all memory just
    /// the same; the method exists so teardown is an explicit,
    /// observable operation.
    pub fn shutdown(mut self) {
        while let Some(child) = self.store.get(NodeId::ROOT).first_child() {
            self.remove_subtree(child);
        }
    }
}

impl Default for Memfs {
    fn default() -> Self {
        Self::new()
    }
}
