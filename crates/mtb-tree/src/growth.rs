//! Mass-growth enforcer (§4.6): propagates a progenitor's virial mass
//! forward whenever its descendant is lighter.

use mtb_core::{MergerTree, Snapshot};
use rayon::prelude::*;

/// Walk each tree ascending in snapshot (a strict read-modify-write
/// dependency rules out parallelizing across snapshots within one tree),
/// overwriting a descendant's `Mvir` whenever a progenitor is heavier.
/// Trees themselves are independent and run across the supplied pool.
pub fn enforce_mass_growth(trees: &mut [MergerTree], pool: &rayon::ThreadPool) {
    pool.install(|| {
        trees.par_iter_mut().for_each(enforce_tree);
    });
}

fn enforce_tree(tree: &mut MergerTree) {
    let snapshots: Vec<Snapshot> = tree.snapshots().collect();
    for snapshot in snapshots {
        let halo_ids = tree.halo_ids_at(snapshot).to_vec();
        for halo_id in halo_ids {
            let (mvir, descendant) = {
                let halo = tree.get(halo_id).unwrap();
                (halo.mvir, halo.descendant)
            };
            let Some(descendant_id) = descendant else {
                continue;
            };
            let descendant_mvir = tree.get(descendant_id).unwrap().mvir;
            if mvir > descendant_mvir {
                tree.get_mut(descendant_id).unwrap().mvir = mvir;
            }
        }
    }
}
