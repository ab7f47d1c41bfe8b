//! # mtb-build
//!
//! Build orchestrator and public API of the merger-tree builder core.
//! Wires the fixed pipeline — seed, link, verify, (grow), centralize,
//! accrete — over a bounded worker pool, tracing each stage.

mod pool;

pub use pool::ThreadPoolConfig;

use mtb_core::{AllBaryons, Cosmology, ExecParams, GasCoolingParams, Halo, MergerTree, Result, SimParams};
use mtb_linker::HaloWorld;

/// Build the forest of merger trees for a flat population of halos.
///
/// Executes, in order: seed trees at the terminal snapshot, link
/// descendant references, verify self-containment, optionally enforce
/// monotonic mass growth, define central subhalos, and compute accretion.
/// Any step raising an invariant violation aborts the whole build —
/// nothing partial is returned.
pub fn build(
    halos: Vec<Halo>,
    sim_params: &dyn SimParams,
    exec_params: &dyn ExecParams,
    gas_cooling_params: &dyn GasCoolingParams,
    cosmology: &dyn Cosmology,
    all_baryons: &mut dyn AllBaryons,
    thread_pool_config: ThreadPoolConfig,
) -> Result<Vec<MergerTree>> {
    let pool = thread_pool_config.build()?;
    let span = tracing::info_span!("build", halo_count = halos.len());
    let _enter = span.enter();

    tracing::debug!("seeding trees at terminal snapshot");
    let mut world = HaloWorld::from_halos(halos);
    mtb_linker::seed_trees(&mut world, exec_params)?;

    tracing::debug!("linking descendant references");
    mtb_linker::link(&mut world, exec_params)?;

    let mut trees = mtb_linker::into_trees(world);
    tracing::debug!(tree_count = trees.len(), "verifying self-containment");
    mtb_linker::verify_self_contained(&trees, &pool)?;

    if exec_params.ensure_mass_growth() {
        tracing::debug!("enforcing monotonic mass growth");
        mtb_tree::enforce_mass_growth(&mut trees, &pool);
    }

    tracing::debug!("defining central subhalos");
    mtb_tree::promote_central_subhalos(&mut trees, &pool)?;
    mtb_tree::validate_exactly_one_central(&trees)?;
    mtb_tree::validate_interpolated_concentration(&trees)?;

    tracing::debug!("computing baryonic accretion");
    mtb_accretion::compute_accretion(
        &mut trees,
        sim_params,
        gas_cooling_params,
        cosmology,
        all_baryons,
        &pool,
    );

    tracing::info!(tree_count = trees.len(), "build complete");
    Ok(trees)
}
