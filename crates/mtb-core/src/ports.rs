//! Narrow interfaces onto the external collaborators named in §6 of the
//! specification: simulation parameters, execution switches, gas-cooling
//! parameters, cosmology, and the global baryon accumulator.
//!
//! None of these are implemented by this crate beyond the plain
//! `...Config` structs below — the real collaborators (configuration
//! parsing, cosmology computation) live outside the merger-tree builder
//! core and are expected to implement these traits.

use crate::ids::Snapshot;

/// Exposes the simulation's snapshot range.
pub trait SimParams {
    fn min_snapshot(&self) -> Snapshot;
    fn max_snapshot(&self) -> Snapshot;
}

/// Exposes the execution-time switches that govern linking and growth
/// enforcement.
pub trait ExecParams {
    /// Snapshots the orchestrator should build trees for; the first
    /// element is the terminal snapshot (§4.1).
    fn output_snapshots(&self) -> &[Snapshot];
    fn ensure_mass_growth(&self) -> bool;
    fn skip_missing_descendants(&self) -> bool;
    fn warn_on_missing_descendants(&self) -> bool;
}

/// Reserved for accretion clamping; `max_fractional_accreted_mass` is
/// currently unused by the active accretion code path (§4.7, §9).
pub trait GasCoolingParams {
    fn max_fractional_accreted_mass(&self) -> f64;
}

/// Supplies the scalar universal baryon fraction used by the accretion
/// calculator.
pub trait Cosmology {
    fn universal_baryon_fraction(&self) -> f64;
}

/// The global per-snapshot baryon accumulator written by accretion Phase
/// B (§4.7).
pub trait AllBaryons {
    fn set_baryon_total_created(&mut self, snapshot: Snapshot, value: f64);
    fn baryon_total_created(&self, snapshot: Snapshot) -> f64;
}

/// Plain implementation of [`SimParams`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimParamsConfig {
    pub min_snapshot: Snapshot,
    pub max_snapshot: Snapshot,
}

impl SimParams for SimParamsConfig {
    fn min_snapshot(&self) -> Snapshot {
        self.min_snapshot
    }

    fn max_snapshot(&self) -> Snapshot {
        self.max_snapshot
    }
}

/// Plain implementation of [`ExecParams`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExecParamsConfig {
    pub output_snapshots: Vec<Snapshot>,
    pub ensure_mass_growth: bool,
    pub skip_missing_descendants: bool,
    pub warn_on_missing_descendants: bool,
}

impl Default for ExecParamsConfig {
    fn default() -> Self {
        ExecParamsConfig {
            output_snapshots: Vec::new(),
            ensure_mass_growth: true,
            skip_missing_descendants: false,
            warn_on_missing_descendants: true,
        }
    }
}

/// Builder for [`ExecParamsConfig`], following the same
/// config-struct-plus-builder idiom used by the rest of the workspace.
#[derive(Default)]
pub struct ExecParamsConfigBuilder {
    config: ExecParamsConfig,
}

impl ExecParamsConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_snapshots(mut self, snapshots: Vec<Snapshot>) -> Self {
        self.config.output_snapshots = snapshots;
        self
    }

    pub fn ensure_mass_growth(mut self, enabled: bool) -> Self {
        self.config.ensure_mass_growth = enabled;
        self
    }

    pub fn skip_missing_descendants(mut self, enabled: bool) -> Self {
        self.config.skip_missing_descendants = enabled;
        self
    }

    pub fn warn_on_missing_descendants(mut self, enabled: bool) -> Self {
        self.config.warn_on_missing_descendants = enabled;
        self
    }

    pub fn build(self) -> ExecParamsConfig {
        self.config
    }
}

impl ExecParams for ExecParamsConfig {
    fn output_snapshots(&self) -> &[Snapshot] {
        &self.output_snapshots
    }

    fn ensure_mass_growth(&self) -> bool {
        self.ensure_mass_growth
    }

    fn skip_missing_descendants(&self) -> bool {
        self.skip_missing_descendants
    }

    fn warn_on_missing_descendants(&self) -> bool {
        self.warn_on_missing_descendants
    }
}

/// Plain implementation of [`GasCoolingParams`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasCoolingParamsConfig {
    pub max_fractional_accreted_mass: f64,
}

impl Default for GasCoolingParamsConfig {
    fn default() -> Self {
        GasCoolingParamsConfig {
            max_fractional_accreted_mass: 1.0,
        }
    }
}

impl GasCoolingParams for GasCoolingParamsConfig {
    fn max_fractional_accreted_mass(&self) -> f64 {
        self.max_fractional_accreted_mass
    }
}

/// Plain implementation of [`Cosmology`] holding a fixed baryon fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CosmologyConfig {
    pub universal_baryon_fraction: f64,
}

impl Cosmology for CosmologyConfig {
    fn universal_baryon_fraction(&self) -> f64 {
        self.universal_baryon_fraction
    }
}

/// Snapshot-indexed implementation of [`AllBaryons`]. Zero-filled across
/// `[min_snapshot, max_snapshot]` on construction, per the "Global
/// per-snapshot baryon accumulator" design note (§9).
#[derive(Clone, Debug, Default)]
pub struct BaryonTimeSeries {
    min_snapshot: i64,
    values: Vec<f64>,
}

impl BaryonTimeSeries {
    pub fn zeroed(min_snapshot: Snapshot, max_snapshot: Snapshot) -> Self {
        let span = (max_snapshot.0 - min_snapshot.0 + 1).max(0) as usize;
        BaryonTimeSeries {
            min_snapshot: min_snapshot.0,
            values: vec![0.0; span],
        }
    }

    fn index(&self, snapshot: Snapshot) -> usize {
        (snapshot.0 - self.min_snapshot) as usize
    }
}

impl AllBaryons for BaryonTimeSeries {
    fn set_baryon_total_created(&mut self, snapshot: Snapshot, value: f64) {
        let index = self.index(snapshot);
        self.values[index] = value;
    }

    fn baryon_total_created(&self, snapshot: Snapshot) -> f64 {
        self.values[self.index(snapshot)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baryon_time_series_is_zero_filled() {
        let series = BaryonTimeSeries::zeroed(Snapshot(0), Snapshot(3));
        for s in 0..4 {
            assert_eq!(series.baryon_total_created(Snapshot(s)), 0.0);
        }
    }

    #[test]
    fn baryon_time_series_set_and_get() {
        let mut series = BaryonTimeSeries::zeroed(Snapshot(-2), Snapshot(2));
        series.set_baryon_total_created(Snapshot(0), 42.0);
        assert_eq!(series.baryon_total_created(Snapshot(0)), 42.0);
        assert_eq!(series.baryon_total_created(Snapshot(-2)), 0.0);
    }

    #[test]
    fn exec_params_builder_matches_fields() {
        let config = ExecParamsConfigBuilder::new()
            .output_snapshots(vec![Snapshot(5), Snapshot(4)])
            .ensure_mass_growth(false)
            .skip_missing_descendants(true)
            .warn_on_missing_descendants(false)
            .build();

        assert_eq!(config.output_snapshots(), &[Snapshot(5), Snapshot(4)]);
        assert!(!config.ensure_mass_growth());
        assert!(config.skip_missing_descendants());
        assert!(!config.warn_on_missing_descendants());
    }
}
