//! # mtb-ingest
//!
//! The narrow interface the merger-tree builder core requires from the
//! hierarchical dataset reader (§6 of the specification). The reader
//! itself — turning raw simulation snapshot files into [`Halo`] and
//! [`Subhalo`] values — is an external collaborator and out of scope for
//! this crate; only the trait boundary and a test double live here.
//!
//! [`Halo`]: mtb_core::Halo
//! [`Subhalo`]: mtb_core::Subhalo

mod reader;

pub use reader::{split_path, AttributeHandle, DatasetHandle, HierarchicalReader, IngestError, MemoryReader};
