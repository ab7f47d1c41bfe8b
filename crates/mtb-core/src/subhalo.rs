//! Subhalo entity: the gravitationally bound substructure that drives
//! galaxy formation physics within a halo.

use crate::ids::{HaloId, Snapshot, SubhaloId};
use serde::{Deserialize, Serialize};

/// Classification of a subhalo's role within its host halo.
///
/// Every halo has exactly one `Central` subhalo once the central-subhalo
/// definer has run; all others are `Satellite`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubhaloType {
    Central,
    Satellite,
}

/// A gravitationally bound substructure within a halo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subhalo {
    pub id: SubhaloId,
    pub snapshot: Snapshot,

    /// The halo that currently owns this subhalo.
    pub host_halo: HaloId,

    pub mvir: f64,
    pub vvir: f64,
    pub angular_momentum: [f64; 3],
    pub concentration: f64,
    pub lambda: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],

    /// Whether the halo finder assigned this subhalo a nominal descendant.
    pub has_descendant: bool,
    /// Whether this subhalo is the main progenitor of its descendant.
    pub main_progenitor: bool,
    pub is_interpolated: bool,

    /// The nominal descendant halo, as reported by the halo finder, before
    /// the linker resolves it to a concrete object.
    pub nominal_descendant_halo_id: Option<HaloId>,
    /// The nominal descendant subhalo id, as reported by the halo finder.
    pub nominal_descendant_id: Option<SubhaloId>,

    /// The resolved descendant, once the linker has run. `None` until
    /// linked, and remains `None` forever for a subhalo the linker could
    /// not resolve (and was configured to skip).
    pub descendant: Option<(HaloId, SubhaloId)>,

    /// Direct progenitors that named this subhalo as their descendant.
    pub ascendants: Vec<(HaloId, SubhaloId)>,

    pub subhalo_type: SubhaloType,
    pub last_snapshot_identified: Snapshot,

    /// Baryonic mass accreted onto this subhalo's host halo, computed by
    /// the accretion calculator. Only meaningful for central subhalos.
    pub accreted_mass: f64,
}

impl Subhalo {
    /// A minimal subhalo with all optional/derived state left unset, for
    /// tests and for the ingest layer to fill in.
    pub fn new(id: SubhaloId, snapshot: Snapshot, host_halo: HaloId) -> Self {
        Subhalo {
            id,
            snapshot,
            host_halo,
            mvir: 0.0,
            vvir: 0.0,
            angular_momentum: [0.0; 3],
            concentration: 0.0,
            lambda: 0.0,
            position: [0.0; 3],
            velocity: [0.0; 3],
            has_descendant: false,
            main_progenitor: false,
            is_interpolated: false,
            nominal_descendant_halo_id: None,
            nominal_descendant_id: None,
            descendant: None,
            ascendants: Vec::new(),
            subhalo_type: SubhaloType::Satellite,
            last_snapshot_identified: snapshot,
            accreted_mass: 0.0,
        }
    }

    pub fn is_central(&self) -> bool {
        matches!(self.subhalo_type, SubhaloType::Central)
    }
}
