//! Tree seeder (§4.2): finds roots at the terminal snapshot and assigns
//! each a fresh tree id.

use crate::world::HaloWorld;
use mtb_core::{BuildError, ExecParams, Result, TreeId};

/// Seed one tree per halo at the terminal snapshot (the first element of
/// `exec_params.output_snapshots()`), assigning incrementing tree ids in
/// input order. Returns the assigned tree ids.
///
/// Actual [`mtb_core::MergerTree`] assembly is deferred until linking
/// finishes (see [`crate::into_trees`]) — seeding only needs to stamp
/// `merger_tree` on the root halos so the linker can propagate it
/// backward through the link primitive.
pub fn seed_trees(world: &mut HaloWorld, exec_params: &dyn ExecParams) -> Result<Vec<TreeId>> {
    let terminal_snapshot = *exec_params.output_snapshots().first().ok_or_else(|| {
        BuildError::invalid_data("no configured output snapshots; cannot determine terminal snapshot")
    })?;

    let root_ids = world.halo_ids_at(terminal_snapshot).to_vec();
    if root_ids.is_empty() {
        let mut present: Vec<_> = world.snapshots().collect();
        present.sort();
        return Err(BuildError::invalid_data(format!(
            "no halo at configured terminal {terminal_snapshot}; snapshots present: {present:?}, \
             configured output snapshots: {:?}",
            exec_params.output_snapshots()
        )));
    }

    let mut tree_ids = Vec::with_capacity(root_ids.len());
    for (index, halo_id) in root_ids.into_iter().enumerate() {
        let tree_id = TreeId(index as u64);
        world
            .get_mut(halo_id)
            .expect("halo indexed under its own snapshot bucket must exist")
            .merger_tree = Some(tree_id);
        tree_ids.push(tree_id);
    }
    Ok(tree_ids)
}
