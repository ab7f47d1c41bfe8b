//! Self-containment verifier (§4.4).

use mtb_core::{BuildError, MergerTree, Result};
use rayon::prelude::*;

/// Assert that every halo of every tree carries that tree's own id as its
/// `merger_tree` reference. Runs across trees on the supplied pool, since
/// trees share no mutable state once partitioned.
pub fn verify_self_contained(trees: &[MergerTree], pool: &rayon::ThreadPool) -> Result<()> {
    pool.install(|| {
        trees.par_iter().try_for_each(|tree| {
            for halo in tree.halos() {
                if halo.merger_tree != Some(tree.id) {
                    return Err(BuildError::invalid_data(format!(
                        "{} at {} claims owning {:?}, but is stored under {}",
                        halo.id, halo.snapshot, halo.merger_tree, tree.id
                    )));
                }
            }
            Ok(())
        })
    })
}
