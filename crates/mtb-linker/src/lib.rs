//! # mtb-linker
//!
//! Tree seeding and linking. Resolves every subhalo's nominal descendant
//! reference into a concrete bidirectional edge at both halo and subhalo
//! granularity, prunes progenitor sub-DAGs left unreachable by a missing
//! descendant, and assembles the result into owned [`mtb_core::MergerTree`]
//! values whose self-containment is then verified.
//!
//! The three public entry points are meant to be driven in sequence by an
//! orchestrator: [`seed_trees`] over a freshly built [`HaloWorld`], then
//! [`link`], then [`into_trees`] to partition the result, then
//! [`verify_self_contained`] over the partitioned trees.

mod link;
mod partition;
mod seed;
mod verify;
mod world;

pub use link::link;
pub use partition::into_trees;
pub use seed::seed_trees;
pub use verify::verify_self_contained;
pub use world::HaloWorld;
