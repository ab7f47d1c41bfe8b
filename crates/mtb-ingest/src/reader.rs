//! Hierarchical dataset reader trait and an in-memory test double.
//!
//! A hierarchical namespace has path components separated by `/`. A path
//! with no separator resolves to a top-level dataset or attribute; a
//! path with separators traverses intermediate groups by component, the
//! final component naming the dataset or attribute.

use std::collections::HashMap;
use thiserror::Error;

/// An opaque value read back from the hierarchical namespace.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
    Text(String),
}

/// A handle returned by [`HierarchicalReader::get_dataset`].
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetHandle {
    pub path: String,
    pub value: Value,
}

/// A handle returned by [`HierarchicalReader::get_attribute`].
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeHandle {
    pub path: String,
    pub value: Value,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IngestError {
    #[error("no dataset at path '{0}'")]
    DatasetNotFound(String),
    #[error("no attribute at path '{0}'")]
    AttributeNotFound(String),
}

/// Split a `/`-separated hierarchical path into its components. A path
/// with no separator yields a single component (the top-level name).
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|c| !c.is_empty()).collect()
}

/// Narrow interface onto the ingest layer's hierarchical dataset reader.
pub trait HierarchicalReader {
    fn get_dataset(&self, path: &str) -> Result<DatasetHandle, IngestError>;
    fn get_attribute(&self, path: &str) -> Result<AttributeHandle, IngestError>;
}

/// In-memory reader used as a test double for [`HierarchicalReader`] in
/// the rest of the workspace's test suites; never used in production,
/// where a real HDF5-backed reader is supplied by the caller.
#[derive(Clone, Debug, Default)]
pub struct MemoryReader {
    datasets: HashMap<String, Value>,
    attributes: HashMap<String, Value>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, path: impl Into<String>, value: Value) -> Self {
        self.datasets.insert(path.into(), value);
        self
    }

    pub fn with_attribute(mut self, path: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(path.into(), value);
        self
    }
}

impl HierarchicalReader for MemoryReader {
    fn get_dataset(&self, path: &str) -> Result<DatasetHandle, IngestError> {
        self.datasets
            .get(path)
            .cloned()
            .map(|value| DatasetHandle {
                path: path.to_string(),
                value,
            })
            .ok_or_else(|| IngestError::DatasetNotFound(path.to_string()))
    }

    fn get_attribute(&self, path: &str) -> Result<AttributeHandle, IngestError> {
        self.attributes
            .get(path)
            .cloned()
            .map(|value| AttributeHandle {
                path: path.to_string(),
                value,
            })
            .ok_or_else(|| IngestError::AttributeNotFound(path.to_string()))
    }
}
