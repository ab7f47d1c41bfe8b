//! The merger tree: a tree-owns-halos arena keyed on [`HaloId`], with a
//! snapshot index maintained alongside it.
//!
//! Cross-halo relations (`ascendants`, `descendant`) are plain ids, never
//! borrows, so the arena carries no lifetime parameter and individual
//! trees can be handed to separate worker threads without any shared
//! mutable state between them (see the concurrency model in §5 of the
//! specification this crate implements).

use crate::halo::Halo;
use crate::ids::{HaloId, Snapshot, TreeId};
use std::collections::{BTreeMap, HashMap};

/// The connected subgraph of halos linked by descendant edges back from a
/// single terminal-snapshot halo.
#[derive(Clone, Debug, Default)]
pub struct MergerTree {
    pub id: TreeId,
    halos: HashMap<HaloId, Halo>,
    by_snapshot: BTreeMap<Snapshot, Vec<HaloId>>,
}

impl MergerTree {
    pub fn new(id: TreeId) -> Self {
        MergerTree {
            id,
            halos: HashMap::new(),
            by_snapshot: BTreeMap::new(),
        }
    }

    /// Insert a halo into this tree, recording it under its snapshot.
    /// Overwrites any prior halo with the same id without touching the
    /// snapshot index (callers insert each halo exactly once).
    pub fn insert(&mut self, halo: Halo) {
        let snapshot = halo.snapshot;
        let id = halo.id;
        self.by_snapshot.entry(snapshot).or_default().push(id);
        self.halos.insert(id, halo);
    }

    pub fn get(&self, id: HaloId) -> Option<&Halo> {
        self.halos.get(&id)
    }

    pub fn get_mut(&mut self, id: HaloId) -> Option<&mut Halo> {
        self.halos.get_mut(&id)
    }

    pub fn contains(&self, id: HaloId) -> bool {
        self.halos.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.halos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.halos.is_empty()
    }

    /// Halo ids present at a given snapshot, in insertion order.
    pub fn halo_ids_at(&self, snapshot: Snapshot) -> &[HaloId] {
        self.by_snapshot
            .get(&snapshot)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Snapshots that contain at least one halo of this tree, ascending.
    pub fn snapshots(&self) -> impl Iterator<Item = Snapshot> + '_ {
        self.by_snapshot.keys().copied()
    }

    /// Every halo of this tree, in no particular order.
    pub fn halos(&self) -> impl Iterator<Item = &Halo> {
        self.halos.values()
    }

    /// Every halo of this tree, mutably, in no particular order.
    pub fn halos_mut(&mut self) -> impl Iterator<Item = &mut Halo> {
        self.halos.values_mut()
    }

    pub fn min_snapshot(&self) -> Option<Snapshot> {
        self.by_snapshot.keys().next().copied()
    }

    pub fn max_snapshot(&self) -> Option<Snapshot> {
        self.by_snapshot.keys().next_back().copied()
    }
}
