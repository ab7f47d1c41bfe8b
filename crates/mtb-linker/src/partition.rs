//! Assembles the flat, linked [`HaloWorld`] into owned merger trees.

use crate::world::HaloWorld;
use mtb_core::{MergerTree, TreeId};
use std::collections::BTreeMap;

/// Partition every surviving halo into the [`MergerTree`] named by its
/// `merger_tree` id, returned in ascending tree-id order (which follows
/// terminal-snapshot input order, since the seeder assigns ids that way).
///
/// Every halo still present in `world` after a successful link carries a
/// `merger_tree`: either it is a seeded root, or it reached one through
/// the link primitive; halos that resolved to neither are pruned before
/// this point.
///
/// `world.into_halos()` drains a `HashMap` and so yields halos in an
/// arbitrary order; halos are sorted by id before insertion so a tree's
/// per-snapshot bucket order is a deterministic function of the input,
/// not of the hasher's iteration order.
pub fn into_trees(world: HaloWorld) -> Vec<MergerTree> {
    let mut halos: Vec<_> = world.into_halos().collect();
    halos.sort_unstable_by_key(|halo| halo.id);

    let mut trees: BTreeMap<TreeId, MergerTree> = BTreeMap::new();
    for halo in halos {
        let tree_id = halo
            .merger_tree
            .expect("every surviving halo is assigned a tree by seeding or linking");
        trees.entry(tree_id).or_insert_with(|| MergerTree::new(tree_id)).insert(halo);
    }
    trees.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtb_core::{Halo, HaloId, Snapshot};

    #[test]
    fn groups_halos_by_tree_id_in_ascending_order() {
        let mut a = Halo::new(HaloId(1), Snapshot(0));
        a.merger_tree = Some(TreeId(1));
        let mut b = Halo::new(HaloId(2), Snapshot(0));
        b.merger_tree = Some(TreeId(0));

        let world = HaloWorld::from_halos(vec![a, b]);
        let trees = into_trees(world);

        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].id, TreeId(0));
        assert_eq!(trees[1].id, TreeId(1));
        assert!(trees[0].contains(HaloId(2)));
        assert!(trees[1].contains(HaloId(1)));
    }
}
