//! Central-subhalo definer (§4.5): two passes, both parallelizable
//! across trees, that promote exactly one subhalo per halo to `CENTRAL`
//! by walking each tree's main-progenitor branches backward from its
//! root.

use mtb_core::{BuildError, HaloId, MergerTree, Result, Snapshot, SubhaloId, SubhaloType};
use rayon::prelude::*;

/// Pass 1. For each tree, seed a central subhalo at every halo that
/// doesn't have one yet (processed from `max_snapshot` down to
/// `min_snapshot`, so a descendant's branch is always promoted before
/// its progenitors), then walk the main-progenitor branch backward,
/// promoting as it goes.
pub fn promote_central_subhalos(trees: &mut [MergerTree], pool: &rayon::ThreadPool) -> Result<()> {
    pool.install(|| trees.par_iter_mut().try_for_each(promote_tree))
}

fn promote_tree(tree: &mut MergerTree) -> Result<()> {
    let mut snapshots: Vec<Snapshot> = tree.snapshots().collect();
    snapshots.reverse();
    for snapshot in snapshots {
        let halo_ids = tree.halo_ids_at(snapshot).to_vec();
        for halo_id in halo_ids {
            if tree.get(halo_id).unwrap().central_subhalo.is_none() {
                seed_and_walk(tree, halo_id)?;
            }
        }
    }
    Ok(())
}

fn seed_and_walk(tree: &mut MergerTree, start_halo_id: HaloId) -> Result<()> {
    let seed_subhalo_id = match tree.get(start_halo_id).unwrap().subhalos().next() {
        Some(sub) => sub.id,
        None => return Ok(()), // no subhalos at all; Pass 2 reports this
    };
    define_central_subhalo(tree, start_halo_id, seed_subhalo_id)?;

    let mut current_halo_id = start_halo_id;
    let mut current_subhalo_id = seed_subhalo_id;

    loop {
        let ascendants = tree
            .get(current_halo_id)
            .unwrap()
            .subhalo(current_subhalo_id)
            .unwrap()
            .ascendants
            .clone();
        let ascendants = resolve_live_ascendants(tree, ascendants);
        if ascendants.is_empty() {
            break;
        }

        let main = find_or_select_main_progenitor(tree, &ascendants);
        let (main_halo_id, main_subhalo_id) = main;

        if tree.get(main_halo_id).unwrap().central_subhalo.is_some() {
            break;
        }
        define_central_subhalo(tree, main_halo_id, main_subhalo_id)?;

        for &(halo_id, subhalo_id) in &ascendants {
            if (halo_id, subhalo_id) != (main_halo_id, main_subhalo_id) {
                let sub = tree.get_mut(halo_id).unwrap().subhalo_mut(subhalo_id).unwrap();
                sub.last_snapshot_identified = sub.snapshot;
            }
        }

        current_halo_id = main_halo_id;
        current_subhalo_id = main_subhalo_id;
    }

    Ok(())
}

/// Drops ascendant references whose halo (or subhalo within it) isn't in
/// `tree`. A halo with one subhalo that links cleanly and a sibling
/// subhalo naming a missing descendant halo gets pruned entirely by the
/// linker's `HaloPruned` path after the first edge is already installed
/// on the descendant, so an ascendants list can legitimately point at a
/// halo that never made it into any tree.
fn resolve_live_ascendants(tree: &MergerTree, ascendants: Vec<(HaloId, SubhaloId)>) -> Vec<(HaloId, SubhaloId)> {
    ascendants
        .into_iter()
        .filter(|&(halo_id, subhalo_id)| {
            let present = tree.get(halo_id).and_then(|h| h.subhalo(subhalo_id)).is_some();
            if !present {
                tracing::warn!(%halo_id, %subhalo_id, tree = %tree.id, "dropping dangling ascendant left by a pruned halo");
            }
            present
        })
        .collect()
}

/// Identify the flagged main progenitor among `ascendants`, or, if none
/// is flagged, select the most massive (ties broken by first occurrence)
/// and flag it, emitting a warning. Callers must pass ascendants already
/// filtered by [`resolve_live_ascendants`]; every entry is assumed
/// present in `tree`.
fn find_or_select_main_progenitor(
    tree: &mut MergerTree,
    ascendants: &[(HaloId, SubhaloId)],
) -> (HaloId, SubhaloId) {
    if let Some(&flagged) = ascendants
        .iter()
        .find(|&&(h, s)| tree.get(h).unwrap().subhalo(s).unwrap().main_progenitor)
    {
        return flagged;
    }

    let mut best: Option<(HaloId, SubhaloId, f64)> = None;
    for &(halo_id, subhalo_id) in ascendants {
        let mvir = tree.get(halo_id).unwrap().subhalo(subhalo_id).unwrap().mvir;
        best = match best {
            Some((_, _, best_mvir)) if mvir <= best_mvir => best,
            _ => Some((halo_id, subhalo_id, mvir)),
        };
    }
    let (halo_id, subhalo_id, _) = best.expect("ascendants is non-empty");

    tree.get_mut(halo_id)
        .unwrap()
        .subhalo_mut(subhalo_id)
        .unwrap()
        .main_progenitor = true;
    tracing::warn!(
        %halo_id, %subhalo_id, tree = %tree.id,
        "no ascendant flagged as main progenitor; auto-selected by mass"
    );
    (halo_id, subhalo_id)
}

/// The promotion effect from §4.5: moves `subhalo_id` into the central
/// slot, copies its kinematic state onto the halo, and adopts its `Vvir`
/// if larger.
fn define_central_subhalo(tree: &mut MergerTree, halo_id: HaloId, subhalo_id: SubhaloId) -> Result<()> {
    let halo = tree.get_mut(halo_id).unwrap();
    let mut sub = halo.remove_subhalo(subhalo_id).ok_or_else(|| {
        BuildError::invalid_data(format!(
            "{subhalo_id} not present in {halo_id}'s subhalo list during central promotion"
        ))
    })?;

    sub.subhalo_type = SubhaloType::Central;
    halo.position = sub.position;
    halo.velocity = sub.velocity;
    halo.concentration = sub.concentration;
    halo.lambda = sub.lambda;
    if halo.vvir < sub.vvir {
        halo.vvir = sub.vvir;
    }
    halo.central_subhalo = Some(sub);
    Ok(())
}

/// Pass 2. For every halo of every tree, exactly one subhalo must carry
/// `subhalo_type == CENTRAL`.
///
/// The loop bounds here are the documented fix for the source algorithm's
/// off-by-construction bug (iterating `[min_snapshot, max_snapshot]` with
/// the wrong comparison operator, which runs zero iterations for
/// `min_snapshot < max_snapshot`): this walks every snapshot a tree
/// actually has halos at, inclusive of both ends.
pub fn validate_exactly_one_central(trees: &[MergerTree]) -> Result<()> {
    for tree in trees {
        for snapshot in tree.snapshots() {
            for &halo_id in tree.halo_ids_at(snapshot) {
                let halo = tree.get(halo_id).unwrap();
                let count = halo.central_count();
                if count != 1 {
                    return Err(BuildError::invalid_argument(format!(
                        "{halo_id} at {snapshot} in {} has {count} central subhalos, expected exactly one",
                        tree.id
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Sibling to [`validate_exactly_one_central`]: every interpolated
/// subhalo (one the halo finder synthesized rather than identified
/// directly) must carry a positive concentration.
pub fn validate_interpolated_concentration(trees: &[MergerTree]) -> Result<()> {
    for tree in trees {
        for halo in tree.halos() {
            for sub in halo.subhalos() {
                if sub.is_interpolated && sub.concentration <= 0.0 {
                    return Err(BuildError::invalid_argument(format!(
                        "{} in {} is interpolated but has non-positive concentration {}",
                        sub.id, halo.id, sub.concentration
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtb_core::{Halo, Subhalo, TreeId};

    fn pool() -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap()
    }

    fn chain(id: u64, host: u64, snapshot: i64) -> Subhalo {
        Subhalo::new(SubhaloId(id), Snapshot(snapshot), HaloId(host))
    }

    #[test]
    fn promotes_a_linear_chain_and_validates() {
        let mut tree = MergerTree::new(TreeId(0));
        let mut h0 = Halo::new(HaloId(0), Snapshot(0));
        h0.satellite_subhalos.push(chain(0, 0, 0));
        let mut h1 = Halo::new(HaloId(1), Snapshot(1));
        h1.satellite_subhalos.push(chain(1, 1, 1));
        h0.satellite_subhalos[0].descendant = Some((HaloId(1), SubhaloId(1)));
        h1.satellite_subhalos[0].ascendants.push((HaloId(0), SubhaloId(0)));

        tree.insert(h0);
        tree.insert(h1);

        let mut trees = vec![tree];
        promote_central_subhalos(&mut trees, &pool()).unwrap();
        validate_exactly_one_central(&trees).unwrap();

        assert!(trees[0].get(HaloId(0)).unwrap().central_subhalo.is_some());
        assert!(trees[0].get(HaloId(1)).unwrap().central_subhalo.is_some());
    }

    #[test]
    fn auto_selects_main_progenitor_by_mass_on_merger() {
        let mut tree = MergerTree::new(TreeId(0));

        let mut h1 = Halo::new(HaloId(1), Snapshot(1));
        h1.satellite_subhalos.push(chain(10, 1, 1));

        let mut h0a = Halo::new(HaloId(0), Snapshot(0));
        let mut sub_a = chain(0, 0, 0);
        sub_a.mvir = 5.0;
        sub_a.descendant = Some((HaloId(1), SubhaloId(10)));
        h0a.satellite_subhalos.push(sub_a);

        let mut h0b = Halo::new(HaloId(2), Snapshot(0));
        let mut sub_b = chain(1, 2, 0);
        sub_b.mvir = 50.0;
        sub_b.descendant = Some((HaloId(1), SubhaloId(10)));
        h0b.satellite_subhalos.push(sub_b);

        h1.satellite_subhalos[0]
            .ascendants
            .push((HaloId(0), SubhaloId(0)));
        h1.satellite_subhalos[0]
            .ascendants
            .push((HaloId(2), SubhaloId(1)));

        tree.insert(h1);
        tree.insert(h0a);
        tree.insert(h0b);

        let mut trees = vec![tree];
        promote_central_subhalos(&mut trees, &pool()).unwrap();
        validate_exactly_one_central(&trees).unwrap();

        // h0b's subhalo is heavier, so it is the auto-selected main
        // progenitor and the one promoted to central.
        let h0b = trees[0].get(HaloId(2)).unwrap();
        assert!(h0b.central_subhalo.is_some());
        let h0a = trees[0].get(HaloId(0)).unwrap();
        assert!(h0a.central_subhalo.is_none());
    }

    #[test]
    fn validation_rejects_a_halo_with_zero_centrals() {
        let mut tree = MergerTree::new(TreeId(0));
        tree.insert(Halo::new(HaloId(0), Snapshot(0)));
        let err = validate_exactly_one_central(&[tree]).unwrap_err();
        assert!(matches!(err, BuildError::InvalidArgument { .. }));
    }

    #[test]
    fn promotion_skips_a_dangling_ascendant_left_by_a_pruned_halo() {
        // Simulates the linker pruning HaloId(0) entirely (one of its
        // satellite subhalos named a missing descendant halo) after it
        // had already installed the ascendant edge for a sibling subhalo
        // that linked cleanly to h2. HaloId(0) never makes it into the
        // tree, but h2's subhalo still lists it as an ascendant.
        let mut tree = MergerTree::new(TreeId(0));

        let mut h2 = Halo::new(HaloId(2), Snapshot(1));
        let mut sub2 = chain(20, 2, 1);
        sub2.ascendants.push((HaloId(0), SubhaloId(0)));
        sub2.ascendants.push((HaloId(1), SubhaloId(1)));
        h2.satellite_subhalos.push(sub2);

        let mut h1 = Halo::new(HaloId(1), Snapshot(0));
        let mut sub1 = chain(1, 1, 0);
        sub1.mvir = 7.0;
        h1.satellite_subhalos.push(sub1);

        tree.insert(h2);
        tree.insert(h1);

        let mut trees = vec![tree];
        promote_central_subhalos(&mut trees, &pool()).unwrap();
        validate_exactly_one_central(&trees).unwrap();

        assert!(trees[0].get(HaloId(2)).unwrap().central_subhalo.is_some());
        assert!(trees[0].get(HaloId(1)).unwrap().central_subhalo.is_some());
        assert!(trees[0].get(HaloId(0)).is_none());
    }

    #[test]
    fn validation_rejects_an_interpolated_subhalo_with_non_positive_concentration() {
        let mut tree = MergerTree::new(TreeId(0));
        let mut halo = Halo::new(HaloId(0), Snapshot(0));
        let mut sub = chain(0, 0, 0);
        sub.is_interpolated = true;
        sub.concentration = 0.0;
        halo.satellite_subhalos.push(sub);
        tree.insert(halo);

        let err = validate_interpolated_concentration(&[tree]).unwrap_err();
        assert!(matches!(err, BuildError::InvalidArgument { .. }));
    }

    #[test]
    fn validation_accepts_a_non_interpolated_subhalo_with_zero_concentration() {
        let mut tree = MergerTree::new(TreeId(0));
        let mut halo = Halo::new(HaloId(0), Snapshot(0));
        halo.satellite_subhalos.push(chain(0, 0, 0));
        tree.insert(halo);

        validate_interpolated_concentration(&[tree]).unwrap();
    }
}
