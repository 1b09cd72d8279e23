//! Minimal tabular value for bulky task inputs.

use serde::{Deserialize, Serialize};

use crate::error::QueueError;

/// Column-named rows of JSON values.
///
/// This is the shape that travels through the cache side channel: big
/// enough to matter, structured enough that both ends agree on columns.
/// Cell values are arbitrary JSON so nested structures survive losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    columns: Vec<String>,
    rows: Vec<Vec<serde_json::Value>>,
}

impl DataFrame {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<serde_json::Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<serde_json::Value>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Binary-safe encoding for the cache side channel.
    pub fn to_bytes(&self) -> Result<Vec<u8>, QueueError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, QueueError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
