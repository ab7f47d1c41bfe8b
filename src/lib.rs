//! # merger-tree-builder
//!
//! Public facade over the merger-tree builder workspace. Re-exports the
//! entity model, the external-collaborator traits, the ingest contract,
//! and the [`build`] orchestrator so a downstream crate can depend on
//! this single package instead of the individual `mtb-*` members.
//!
//! ```rust
//! use merger_tree_builder::{
//!     build, BaryonTimeSeries, CosmologyConfig, ExecParamsConfigBuilder, GasCoolingParamsConfig,
//!     Halo, HaloId, SimParamsConfig, Snapshot, ThreadPoolConfig,
//! };
//!
//! let halo = Halo::new(HaloId(0), Snapshot(0));
//! let sim_params = SimParamsConfig { min_snapshot: Snapshot(0), max_snapshot: Snapshot(0) };
//! let exec_params = ExecParamsConfigBuilder::new().output_snapshots(vec![Snapshot(0)]).build();
//! let gas_cooling = GasCoolingParamsConfig::default();
//! let cosmology = CosmologyConfig { universal_baryon_fraction: 0.17 };
//! let mut all_baryons = BaryonTimeSeries::zeroed(Snapshot(0), Snapshot(0));
//!
//! let trees = build(
//!     vec![halo],
//!     &sim_params,
//!     &exec_params,
//!     &gas_cooling,
//!     &cosmology,
//!     &mut all_baryons,
//!     ThreadPoolConfig::default(),
//! );
//! assert!(trees.is_ok());
//! ```

pub use mtb_build::{build, ThreadPoolConfig};
pub use mtb_core::{
    AllBaryons, BaryonTimeSeries, BuildError, Cosmology, CosmologyConfig, ExecParams, ExecParamsConfig,
    ExecParamsConfigBuilder, GasCoolingParams, GasCoolingParamsConfig, Halo, HaloId, MergerTree, Result,
    SimParams, SimParamsConfig, Snapshot, Subhalo, SubhaloId, SubhaloType, TreeId,
};
pub use mtb_ingest::{split_path, AttributeHandle, DatasetHandle, HierarchicalReader, IngestError, MemoryReader};
