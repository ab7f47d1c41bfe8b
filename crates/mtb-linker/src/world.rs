//! The linker's working set: a flat, mutable index of every halo by id
//! and by snapshot.
//!
//! This is the "shared halo-by-id index" the linker mutates as it prunes
//! unreachable halos (§5): unlike [`mtb_core::MergerTree`], which owns
//! its halos once a tree is fully assembled, `HaloWorld` exists only for
//! the duration of seeding and linking, before halos are partitioned out
//! into their owning trees.

use mtb_core::{Halo, HaloId, Snapshot};
use std::collections::HashMap;

/// Flat, snapshot-indexed store of halos, mutated in place by the
/// seeder and linker.
#[derive(Debug, Default)]
pub struct HaloWorld {
    halos: HashMap<HaloId, Halo>,
    by_snapshot: HashMap<Snapshot, Vec<HaloId>>,
}

impl HaloWorld {
    /// Build the world from a flat input population. The snapshot index
    /// reflects input order and is never updated after construction —
    /// pruning only removes entries from the id index, so a pruned
    /// halo's descendant lookups correctly see it as absent without the
    /// snapshot index needing to change.
    pub fn from_halos(halos: Vec<Halo>) -> Self {
        let mut by_snapshot: HashMap<Snapshot, Vec<HaloId>> = HashMap::new();
        let mut index = HashMap::with_capacity(halos.len());
        for halo in halos {
            by_snapshot.entry(halo.snapshot).or_default().push(halo.id);
            index.insert(halo.id, halo);
        }
        HaloWorld {
            halos: index,
            by_snapshot,
        }
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

    /// Drop a halo from the id index, pruning its progenitor sub-DAG from
    /// reachability (any ascendant still pointing at it will find it
    /// absent on its own turn).
    pub fn remove(&mut self, id: HaloId) -> Option<Halo> {
        self.halos.remove(&id)
    }

    /// Halo ids present at a snapshot in the original input order.
    pub fn halo_ids_at(&self, snapshot: Snapshot) -> &[HaloId] {
        self.by_snapshot
            .get(&snapshot)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct snapshots present in the input population.
    pub fn snapshots(&self) -> impl Iterator<Item = Snapshot> + '_ {
        self.by_snapshot.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.halos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.halos.is_empty()
    }

    /// Consume the world, yielding every surviving halo. Called once
    /// linking completes, to partition halos into their owning trees.
    pub fn into_halos(self) -> impl Iterator<Item = Halo> {
        self.halos.into_values()
    }
}
