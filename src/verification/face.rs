//! Face-match decisioning.
//!
//! Compares a freshly captured probe embedding against the enrolled
//! reference set of a claimed identity. The decision is deterministic:
//! identical inputs always produce identical accept/reject outcomes and
//! confidence values, so test fixtures are reproducible.

use serde::{Deserialize, Serialize};

use crate::config::FaceSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{Embedding, FaceEnrollment};

/// Why a match decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// The probe matched the claimed identity.
    Matched,
    /// The best similarity fell below the configured threshold.
    BelowThreshold,
    /// Another enrolled identity scored too close to the claimed one.
    CollisionMargin,
}

/// The outcome of comparing a probe against a claimed identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchDecision {
    /// Whether the probe is accepted as the claimed identity.
    pub accepted: bool,
    /// The best cosine similarity against the claimed enrollment set.
    pub confidence: f32,
    /// Why the decision came out this way.
    pub reason: MatchReason,
}

/// Cosine similarity between two embeddings, clamped to [-1, 1].
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &Embedding, b: &Embedding) -> f32 {
    let a = a.values();
    let b = b.values();
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Compares probe embeddings against enrolled identities.
///
/// Accepts when the best similarity against the claimed identity meets
/// the configured threshold and, when cross-checking is enabled, the
/// margin over the best-scoring *other* identity meets the
/// anti-collision margin.
#[derive(Debug, Clone)]
pub struct FaceMatcher {
    settings: FaceSettings,
}

impl FaceMatcher {
    /// Creates a matcher with the given thresholds.
    pub fn new(settings: FaceSettings) -> Self {
        FaceMatcher { settings }
    }

    /// Decides whether `probe` belongs to the claimed identity.
    ///
    /// `rivals` are the enrollment sets of every other enrolled identity,
    /// used for the anti-collision cross-check when enabled.
    ///
    /// # Errors
    ///
    /// - `NotEnrolled` when the claimed enrollment set is empty
    /// - `EmbeddingMalformed` when the probe dimensionality mismatches
    pub fn match_probe(
        &self,
        claimed: &FaceEnrollment,
        rivals: &[&FaceEnrollment],
        probe: &Embedding,
    ) -> EngineResult<MatchDecision> {
        self.check_dimensions(probe)?;

        if claimed.is_empty() {
            return Err(EngineError::NotEnrolled {
                employee_id: claimed.employee_id.clone(),
            });
        }

        let confidence = best_similarity(&claimed.embeddings, probe);

        if confidence < self.settings.match_threshold {
            return Ok(MatchDecision {
                accepted: false,
                confidence,
                reason: MatchReason::BelowThreshold,
            });
        }

        if self.settings.cross_check {
            let best_rival = rivals
                .iter()
                .filter(|r| r.employee_id != claimed.employee_id)
                .map(|r| best_similarity(&r.embeddings, probe))
                .fold(f32::NEG_INFINITY, f32::max);

            if best_rival.is_finite() && confidence - best_rival < self.settings.collision_margin {
                return Ok(MatchDecision {
                    accepted: false,
                    confidence,
                    reason: MatchReason::CollisionMargin,
                });
            }
        }

        Ok(MatchDecision {
            accepted: true,
            confidence,
            reason: MatchReason::Matched,
        })
    }

    /// Validates an enrollment capture set before it is stored.
    ///
    /// Every capture must have the configured dimensionality, and every
    /// pair of captures must score at least the consistency threshold,
    /// catching sets mixing more than one person.
    pub fn check_enrollment(&self, embeddings: &[Embedding]) -> EngineResult<()> {
        for embedding in embeddings {
            self.check_dimensions(embedding)?;
        }

        let mut min_similarity = f32::INFINITY;
        for (i, a) in embeddings.iter().enumerate() {
            for b in embeddings.iter().skip(i + 1) {
                min_similarity = min_similarity.min(cosine_similarity(a, b));
            }
        }

        if min_similarity.is_finite() && min_similarity < self.settings.consistency_threshold {
            return Err(EngineError::EnrollmentInconsistent { min_similarity });
        }

        Ok(())
    }

    fn check_dimensions(&self, embedding: &Embedding) -> EngineResult<()> {
        if embedding.dim() != self.settings.embedding_dim {
            return Err(EngineError::EmbeddingMalformed {
                expected: self.settings.embedding_dim,
                actual: embedding.dim(),
            });
        }
        Ok(())
    }
}

fn best_similarity(enrolled: &[Embedding], probe: &Embedding) -> f32 {
    enrolled
        .iter()
        .map(|e| cosine_similarity(e, probe))
        .fold(f32::NEG_INFINITY, f32::max)
}
