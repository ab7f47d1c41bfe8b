//! # mtb-accretion
//!
//! Baryonic accretion calculator (§4.7): computes each halo's accreted
//! baryonic mass from its dark-matter growth over ascendants (Phase A,
//! parallel), then folds every halo's contribution into a global
//! per-snapshot running total (Phase B, serial on snapshot).

use mtb_core::{AllBaryons, Cosmology, GasCoolingParams, HaloId, MergerTree, SimParams, Snapshot};
use rayon::prelude::*;
use std::collections::HashMap;

/// Run both accretion phases. `gas_cooling_params` is accepted for
/// interface completeness with the rest of the orchestrator's inputs;
/// `max_fractional_accreted_mass` clamping is not wired into the active
/// code path (§9).
pub fn compute_accretion(
    trees: &mut [MergerTree],
    sim_params: &dyn SimParams,
    _gas_cooling_params: &dyn GasCoolingParams,
    cosmology: &dyn Cosmology,
    all_baryons: &mut dyn AllBaryons,
    pool: &rayon::ThreadPool,
) {
    phase_a(trees, cosmology, pool);
    phase_b(trees, sim_params, all_baryons);
}

/// Phase A: per halo, any order, compute `(Mvir - Σascendant.Mvir) × f_b`
/// and assign it to the halo's central subhalo, clamped at zero.
fn phase_a(trees: &mut [MergerTree], cosmology: &dyn Cosmology, pool: &rayon::ThreadPool) {
    let baryon_fraction = cosmology.universal_baryon_fraction();
    pool.install(|| {
        trees.par_iter_mut().for_each(|tree| {
            let ascendant_sums: Vec<(HaloId, f64)> = tree
                .halos()
                .map(|halo| {
                    let sum: f64 = halo
                        .ascendants
                        .iter()
                        .map(|id| tree.get(*id).map(|h| h.mvir).unwrap_or(0.0))
                        .sum();
                    (halo.id, sum)
                })
                .collect();

            for (halo_id, ascendant_mvir) in ascendant_sums {
                let halo = tree.get_mut(halo_id).unwrap();
                let accreted = ((halo.mvir - ascendant_mvir) * baryon_fraction).max(0.0);
                if let Some(central) = halo.central_subhalo.as_mut() {
                    central.accreted_mass = accreted;
                }
            }
        });
    });
}

/// Phase B: strict ascending snapshot order across the whole population.
/// Snapshots with no surviving halo still advance the running total
/// (carried forward unchanged) so `all_baryons` stays defined over the
/// full simulated range.
fn phase_b(trees: &[MergerTree], sim_params: &dyn SimParams, all_baryons: &mut dyn AllBaryons) {
    let mut per_snapshot: HashMap<Snapshot, f64> = HashMap::new();
    for tree in trees {
        for halo in tree.halos() {
            if let Some(central) = &halo.central_subhalo {
                *per_snapshot.entry(halo.snapshot).or_insert(0.0) += central.accreted_mass;
            }
        }
    }

    let mut running_total = 0.0;
    let mut snapshot = sim_params.min_snapshot();
    let max_snapshot = sim_params.max_snapshot();
    while snapshot <= max_snapshot {
        running_total += per_snapshot.get(&snapshot).copied().unwrap_or(0.0);
        all_baryons.set_baryon_total_created(snapshot, running_total);
        snapshot = snapshot.next();
    }
}
