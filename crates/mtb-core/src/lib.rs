//! # mtb-core
//!
//! Entity model for the merger-tree builder: halos, subhalos, merger
//! trees, their identifiers, and the narrow trait interfaces onto the
//! external collaborators (simulation parameters, cosmology, the global
//! baryon accumulator) that the rest of the workspace depends on.
//!
//! ## Example
//!
//! ```rust
//! use mtb_core::{Halo, HaloId, MergerTree, Snapshot, TreeId};
//!
//! let mut tree = MergerTree::new(TreeId(0));
//! tree.insert(Halo::new(HaloId(1), Snapshot(0)));
//! assert_eq!(tree.len(), 1);
//! ```

mod error;
mod halo;
mod ids;
mod ports;
mod subhalo;
mod tree;

pub use error::{BuildError, Result};
pub use halo::Halo;
pub use ids::{HaloId, Snapshot, SubhaloId, TreeId};
pub use ports::{
    AllBaryons, BaryonTimeSeries, Cosmology, CosmologyConfig, ExecParams, ExecParamsConfig,
    ExecParamsConfigBuilder, GasCoolingParams, GasCoolingParamsConfig, SimParams, SimParamsConfig,
};
pub use subhalo::{Subhalo, SubhaloType};
pub use tree::MergerTree;
