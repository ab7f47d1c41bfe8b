//! Opaque identifiers used throughout the merger-tree builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation-wide unique identifier for a halo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HaloId(pub u64);

impl fmt::Display for HaloId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "halo#{}", self.0)
    }
}

/// Simulation-wide unique identifier for a subhalo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubhaloId(pub u64);

impl fmt::Display for SubhaloId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subhalo#{}", self.0)
    }
}

/// A time-slice index of the underlying N-body simulation.
///
/// Larger values are later cosmic times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Snapshot(pub i64);

impl Snapshot {
    /// The snapshot immediately following this one.
    pub fn next(self) -> Snapshot {
        Snapshot(self.0 + 1)
    }

    /// The snapshot immediately preceding this one.
    pub fn prev(self) -> Snapshot {
        Snapshot(self.0 - 1)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snapshot {}", self.0)
    }
}

/// Identifier for a merger tree, assigned by the seeder in input order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TreeId(pub u64);

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree#{}", self.0)
    }
}
