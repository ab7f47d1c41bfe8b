//! Error taxonomy for the merger-tree builder.
//!
//! Every fallible operation in the workspace returns
//! [`Result<T, BuildError>`](Result). All three variants are fatal: a
//! build that raises one aborts and returns no trees (§7 of the
//! specification).

use crate::ids::SubhaloId;
use thiserror::Error;

/// Errors raised while building merger trees.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// A structural violation in the inputs or during linking: multiple
    /// descendants, non-adjacent snapshots, a halo reaching a link
    /// primitive without a tree assignment, or a halo missing from its
    /// expected satellite list.
    #[error("invalid data: {message}")]
    InvalidData { message: String },

    /// A violated post-condition after central-subhalo definition: zero
    /// or more than one central subhalo per halo, or an interpolated
    /// subhalo with non-positive concentration.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A subhalo's nominal descendant could not be resolved, and the
    /// linker was not configured to skip it.
    #[error("descendant subhalo {descendant_id} not found: {message}")]
    SubhaloNotFound {
        descendant_id: SubhaloId,
        message: String,
    },
}

impl BuildError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        BuildError::InvalidData {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        BuildError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn subhalo_not_found(descendant_id: SubhaloId, message: impl Into<String>) -> Self {
        BuildError::SubhaloNotFound {
            descendant_id,
            message: message.into(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, BuildError>;
