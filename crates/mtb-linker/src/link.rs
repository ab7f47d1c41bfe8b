//! Linker (§4.3): resolves every subhalo's nominal descendant reference
//! into a concrete bidirectional edge, pruning unreachable progenitors as
//! it goes.

use crate::world::HaloWorld;
use mtb_core::{BuildError, ExecParams, HaloId, Result, SubhaloId};

/// Run the linker to completion over `world`, mutating it in place.
///
/// Snapshots are visited strictly in descending order, skipping the
/// largest (already seeded as tree roots by [`crate::seed_trees`]).
/// Within a snapshot, halos are visited in their original input order,
/// which keeps the build deterministic for a given input.
pub fn link(world: &mut HaloWorld, exec_params: &dyn ExecParams) -> Result<()> {
    let mut snapshots: Vec<_> = world.snapshots().collect();
    snapshots.sort_unstable_by(|a, b| b.cmp(a));
    if !snapshots.is_empty() {
        snapshots.remove(0);
    }

    for snapshot in snapshots {
        let halo_ids = world.halo_ids_at(snapshot).to_vec();
        for halo_id in halo_ids {
            if world.contains(halo_id) {
                link_halo(world, halo_id, exec_params)?;
            }
        }
    }
    Ok(())
}

enum LinkOutcome {
    Linked,
    Removed,
    /// The whole parent halo was pruned while resolving this subhalo;
    /// its remaining subhalos must not be visited.
    HaloPruned,
}

fn link_halo(world: &mut HaloWorld, halo_id: HaloId, exec_params: &dyn ExecParams) -> Result<()> {
    let subhalo_ids: Vec<SubhaloId> = world
        .get(halo_id)
        .expect("caller checked presence")
        .subhalos()
        .map(|s| s.id)
        .collect();

    let mut linked_any = false;
    for subhalo_id in subhalo_ids {
        match link_subhalo(world, halo_id, subhalo_id, exec_params)? {
            LinkOutcome::Linked => linked_any = true,
            LinkOutcome::Removed => {}
            LinkOutcome::HaloPruned => return Ok(()),
        }
    }

    if !linked_any && world.contains(halo_id) {
        world.remove(halo_id);
    }
    Ok(())
}

fn link_subhalo(
    world: &mut HaloWorld,
    halo_id: HaloId,
    subhalo_id: SubhaloId,
    exec_params: &dyn ExecParams,
) -> Result<LinkOutcome> {
    let (has_descendant, nominal_descendant_halo_id, nominal_descendant_id, subhalo_snapshot) = {
        let sub = world
            .get(halo_id)
            .and_then(|h| h.subhalo(subhalo_id))
            .expect("subhalo id was just read off this halo");
        (
            sub.has_descendant,
            sub.nominal_descendant_halo_id,
            sub.nominal_descendant_id,
            sub.snapshot,
        )
    };

    if !has_descendant {
        world.get_mut(halo_id).unwrap().remove_subhalo(subhalo_id);
        return Ok(LinkOutcome::Removed);
    }

    let descendant_halo_id = nominal_descendant_halo_id.ok_or_else(|| {
        BuildError::invalid_data(format!(
            "{subhalo_id} in {halo_id} is flagged has_descendant but names no descendant halo"
        ))
    })?;

    if !world.contains(descendant_halo_id) {
        world.remove(halo_id);
        return Ok(LinkOutcome::HaloPruned);
    }

    let found = nominal_descendant_id.and_then(|id| {
        world
            .get(descendant_halo_id)
            .and_then(|h| h.subhalo(id))
            .map(|s| (id, s.snapshot))
    });

    match found {
        Some((descendant_subhalo_id, descendant_snapshot)) => {
            if descendant_snapshot != subhalo_snapshot.next() {
                return Err(BuildError::invalid_data(format!(
                    "{subhalo_id} at {subhalo_snapshot} names descendant {descendant_subhalo_id} \
                     at {descendant_snapshot}, which does not cross exactly one snapshot boundary"
                )));
            }
            link_primitive(world, halo_id, subhalo_id, descendant_halo_id, descendant_subhalo_id)?;
            Ok(LinkOutcome::Linked)
        }
        None => {
            if !exec_params.skip_missing_descendants() {
                let missing = nominal_descendant_id.unwrap_or(SubhaloId(0));
                return Err(BuildError::subhalo_not_found(
                    missing,
                    format!(
                        "{subhalo_id} in {halo_id} names a descendant subhalo not present in {descendant_halo_id}"
                    ),
                ));
            }
            if exec_params.warn_on_missing_descendants() {
                tracing::warn!(
                    %halo_id, %subhalo_id, %descendant_halo_id,
                    "skipping subhalo with unresolved descendant reference"
                );
            }
            world.get_mut(halo_id).unwrap().remove_subhalo(subhalo_id);
            Ok(LinkOutcome::Removed)
        }
    }
}

/// The link primitive: installs bidirectional edges at both subhalo and
/// halo granularity and propagates tree membership backward.
fn link_primitive(
    world: &mut HaloWorld,
    parent_halo_id: HaloId,
    parent_subhalo_id: SubhaloId,
    descendant_halo_id: HaloId,
    descendant_subhalo_id: SubhaloId,
) -> Result<()> {
    world
        .get_mut(descendant_halo_id)
        .unwrap()
        .subhalo_mut(descendant_subhalo_id)
        .unwrap()
        .ascendants
        .push((parent_halo_id, parent_subhalo_id));

    {
        let parent_sub = world
            .get_mut(parent_halo_id)
            .unwrap()
            .subhalo_mut(parent_subhalo_id)
            .unwrap();
        if parent_sub.descendant.is_some() {
            return Err(BuildError::invalid_data(format!(
                "{parent_subhalo_id} in {parent_halo_id} already has a descendant"
            )));
        }
        parent_sub.descendant = Some((descendant_halo_id, descendant_subhalo_id));
    }

    world
        .get_mut(descendant_halo_id)
        .unwrap()
        .ascendants
        .insert(parent_halo_id);

    {
        let parent_halo = world.get_mut(parent_halo_id).unwrap();
        if let Some(existing) = parent_halo.descendant {
            if existing != descendant_halo_id {
                return Err(BuildError::invalid_data(format!(
                    "{parent_halo_id} already has descendant {existing}, cannot also link to {descendant_halo_id}"
                )));
            }
        }
        parent_halo.descendant = Some(descendant_halo_id);
    }

    let tree_id = world.get(descendant_halo_id).unwrap().merger_tree.ok_or_else(|| {
        BuildError::invalid_data(format!("{descendant_halo_id} linked before its tree was assigned"))
    })?;

    world.get_mut(parent_halo_id).unwrap().merger_tree = Some(tree_id);

    Ok(())
}
