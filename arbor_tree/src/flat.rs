// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat/nested mapping: parent-keyed records in, forest out, and back.
//!
//! Flat records are the interchange form for hosts whose source of truth is
//! tabular (a database result, a config list). Record order is preserved
//! under each parent, so a stable input order yields a stable tree.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::node::{NodeFlags, TreeNode};
use crate::tree::Tree;

/// One flat record: a payload plus its key and optional parent key.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatRecord<T, K> {
    /// Caller payload.
    pub data: T,
    /// Key of this record, unique across the input.
    pub key: K,
    /// Key of the parent record; `None` for roots.
    pub parent: Option<K>,
    /// Expansion flag carried into the node.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expanded: bool,
    /// Capability flags carried into the node.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: NodeFlags,
}

impl<T, K> FlatRecord<T, K> {
    /// New collapsed record with default flags.
    pub fn new(key: K, parent: Option<K>, data: T) -> Self {
        Self {
            data,
            key,
            parent,
            expanded: false,
            flags: NodeFlags::default(),
        }
    }

    /// Builder: set the expansion flag.
    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Builder: replace the capability flags.
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Error while building a forest from flat records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlatError<K> {
    /// A record referenced a parent key that is not in the input.
    UnknownParent(K),
    /// Two records carried the same key.
    DuplicateKey(K),
    /// A record is its own ancestor through the parent chain.
    Cycle(K),
}

impl<K: core::fmt::Debug> core::fmt::Display for FlatError<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownParent(k) => write!(f, "record parent key {k:?} is not in the input"),
            Self::DuplicateKey(k) => write!(f, "record key {k:?} appears more than once"),
            Self::Cycle(k) => write!(f, "record {k:?} is its own ancestor"),
        }
    }
}

impl<K: core::fmt::Debug> core::error::Error for FlatError<K> {}

impl<T> Tree<T> {
    /// Build a forest from flat parent-keyed records.
    ///
    /// Records may arrive in any order (child before parent is fine); sibling
    /// order under each parent follows record order. Keys must be unique,
    /// every referenced parent must be present, and parent chains must be
    /// acyclic.
    pub fn from_flat<K: Ord + Clone>(records: Vec<FlatRecord<T, K>>) -> Result<Self, FlatError<K>> {
        let n = records.len();
        let mut by_key = BTreeMap::new();
        for (i, r) in records.iter().enumerate() {
            if by_key.insert(r.key.clone(), i).is_some() {
                return Err(FlatError::DuplicateKey(r.key.clone()));
            }
        }

        let mut root_slots = Vec::new();
        let mut child_slots: Vec<Vec<usize>> = Vec::new();
        child_slots.resize_with(n, Vec::new);
        for (i, r) in records.iter().enumerate() {
            match &r.parent {
                None => root_slots.push(i),
                Some(k) => {
                    let &p = by_key
                        .get(k)
                        .ok_or_else(|| FlatError::UnknownParent(k.clone()))?;
                    if p == i {
                        return Err(FlatError::Cycle(r.key.clone()));
                    }
                    child_slots[p].push(i);
                }
            }
        }

        // A record whose parent chain never reaches a root is part of a cycle.
        let mut visited = alloc::vec![false; n];
        let mut stack = root_slots.clone();
        while let Some(i) = stack.pop() {
            visited[i] = true;
            stack.extend_from_slice(&child_slots[i]);
        }
        if let Some(i) = visited.iter().position(|v| !v) {
            return Err(FlatError::Cycle(records[i].key.clone()));
        }

        let mut slots: Vec<Option<FlatRecord<T, K>>> = records.into_iter().map(Some).collect();
        let roots = root_slots
            .into_iter()
            .filter_map(|i| build_node(i, &child_slots, &mut slots))
            .collect();
        Ok(Self::from_roots(roots))
    }
}

impl<T: Clone> Tree<T> {
    /// Emit flat records in document order, collapsed nodes included.
    ///
    /// Keys come from the caller's accessor; each record's parent field holds
    /// the parent node's key. The output round-trips through
    /// [`Tree::from_flat`] unchanged.
    pub fn to_flat<K: Clone>(&self, key_of: impl Fn(&T) -> K) -> Vec<FlatRecord<T, K>> {
        let mut out = Vec::with_capacity(self.len());
        flatten_records(self.roots(), None, &key_of, &mut out);
        out
    }
}

fn build_node<T, K>(
    slot: usize,
    child_slots: &[Vec<usize>],
    slots: &mut Vec<Option<FlatRecord<T, K>>>,
) -> Option<TreeNode<T>> {
    let rec = slots[slot].take()?;
    let children = child_slots[slot]
        .iter()
        .filter_map(|&c| build_node(c, child_slots, slots))
        .collect();
    Some(TreeNode {
        data: rec.data,
        expanded: rec.expanded,
        flags: rec.flags,
        children,
    })
}

fn flatten_records<T: Clone, K: Clone>(
    nodes: &[TreeNode<T>],
    parent: Option<&K>,
    key_of: &impl Fn(&T) -> K,
    out: &mut Vec<FlatRecord<T, K>>,
) {
    for node in nodes {
        let key = key_of(&node.data);
        out.push(FlatRecord {
            data: node.data.clone(),
            key: key.clone(),
            parent: parent.cloned(),
            expanded: node.expanded,
            flags: node.flags,
        });
        flatten_records(&node.children, Some(&key), key_of, out);
    }
}
