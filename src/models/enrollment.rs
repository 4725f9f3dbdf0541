//! Face enrollment models.
//!
//! Embeddings arrive from an external extraction model as fixed-length
//! vectors; the engine never sees raw images.

use serde::{Deserialize, Serialize};

/// A fixed-length numeric vector representing a face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Wraps a raw vector produced by the extraction model.
    pub fn new(values: Vec<f32>) -> Self {
        Embedding(values)
    }

    /// The dimensionality of this embedding.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// The raw vector values.
    pub fn values(&self) -> &[f32] {
        &self.0
    }
}

/// The set of reference embeddings enrolled for one employee.
///
/// Owned exclusively by one [`Employee`](super::Employee); immutable once
/// captured except by re-enrollment, which replaces the whole set
/// atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceEnrollment {
    /// The employee this enrollment belongs to.
    pub employee_id: String,
    /// The reference embeddings captured at enrollment (typically 4).
    pub embeddings: Vec<Embedding>,
}

impl FaceEnrollment {
    /// Returns true if no reference embeddings are stored.
    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }
}
