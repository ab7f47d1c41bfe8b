//! Halo entity: a dark-matter structure at a snapshot, hosting one or
//! more subhalos.

use crate::ids::{HaloId, Snapshot, SubhaloId, TreeId};
use crate::subhalo::{Subhalo, SubhaloType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A dark-matter structure identified at a single snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Halo {
    pub id: HaloId,
    pub snapshot: Snapshot,

    pub mvir: f64,
    pub vvir: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub concentration: f64,
    pub lambda: f64,

    pub central_subhalo: Option<Subhalo>,
    pub satellite_subhalos: Vec<Subhalo>,

    /// Progenitor halos (earlier snapshot) that link to this halo.
    pub ascendants: HashSet<HaloId>,
    /// The single halo this one links forward to, if any.
    pub descendant: Option<HaloId>,

    /// The tree that owns this halo. Set once the halo is reachable from
    /// a tree root; `None` before linking assigns it.
    pub merger_tree: Option<TreeId>,
}

impl Halo {
    /// A minimal halo with no subhalos and no relations, for tests and
    /// for the ingest layer to fill in.
    pub fn new(id: HaloId, snapshot: Snapshot) -> Self {
        Halo {
            id,
            snapshot,
            mvir: 0.0,
            vvir: 0.0,
            position: [0.0; 3],
            velocity: [0.0; 3],
            concentration: 0.0,
            lambda: 0.0,
            central_subhalo: None,
            satellite_subhalos: Vec::new(),
            ascendants: HashSet::new(),
            descendant: None,
            merger_tree: None,
        }
    }

    /// Total number of subhalos (central plus satellites).
    pub fn subhalo_count(&self) -> usize {
        self.central_subhalo.is_some() as usize + self.satellite_subhalos.len()
    }

    /// Look up a subhalo belonging to this halo by id, central or
    /// satellite.
    pub fn subhalo(&self, id: SubhaloId) -> Option<&Subhalo> {
        if let Some(central) = &self.central_subhalo {
            if central.id == id {
                return Some(central);
            }
        }
        self.satellite_subhalos.iter().find(|s| s.id == id)
    }

    /// Mutable lookup counterpart to [`Halo::subhalo`].
    pub fn subhalo_mut(&mut self, id: SubhaloId) -> Option<&mut Subhalo> {
        if let Some(central) = &mut self.central_subhalo {
            if central.id == id {
                return Some(central);
            }
        }
        self.satellite_subhalos.iter_mut().find(|s| s.id == id)
    }

    /// Iterate over every subhalo (central first, then satellites).
    pub fn subhalos(&self) -> impl Iterator<Item = &Subhalo> {
        self.central_subhalo.iter().chain(self.satellite_subhalos.iter())
    }

    /// Remove a subhalo (by id) from whichever list currently holds it.
    /// Returns the removed subhalo, or `None` if it wasn't present.
    pub fn remove_subhalo(&mut self, id: SubhaloId) -> Option<Subhalo> {
        if matches!(&self.central_subhalo, Some(s) if s.id == id) {
            return self.central_subhalo.take();
        }
        let position = self.satellite_subhalos.iter().position(|s| s.id == id)?;
        Some(self.satellite_subhalos.remove(position))
    }

    /// Count subhalos flagged as [`SubhaloType::Central`]. Used by the
    /// central-subhalo definer's validation pass (§4.5 Pass 2), which
    /// must see exactly one.
    pub fn central_count(&self) -> usize {
        self.subhalos()
            .filter(|s| matches!(s.subhalo_type, SubhaloType::Central))
            .count()
    }
}
