//! In-process cosine similarity ranking.
//!
//! Used when the database cannot rank for us. Candidates whose embeddings do
//! not normalize, or whose dimensionality differs from the query, are dropped
//! and counted. When nothing meets the threshold but comparable candidates
//! exist, the ranker degrades to the best `limit` candidates instead of
//! returning an empty list.

use thiserror::Error;

use crate::constants::SIMILARITY_DECIMALS;
use crate::embedding::StoredEmbedding;

/// The query vector cannot be ranked against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("query embedding is empty")]
    EmptyQuery,
    #[error("query embedding has a non-finite value at position {0}")]
    NonFiniteQuery(usize),
}

/// An item awaiting scoring, paired with its stored embedding.
#[derive(Debug, Clone)]
pub struct Candidate<T> {
    pub item: T,
    pub embedding: StoredEmbedding,
}

impl<T> Candidate<T> {
    pub fn new(item: T, embedding: StoredEmbedding) -> Self {
        Self { item, embedding }
    }
}

/// An item with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<T> {
    pub item: T,
    /// Rounded to four decimal places.
    pub similarity: f64,
}

/// Counters describing what happened to the candidate batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankDiagnostics {
    /// Candidates handed to the ranker.
    pub considered: usize,
    /// Dropped because the stored embedding did not normalize.
    pub parse_failures: usize,
    /// Dropped because the embedding length differed from the query.
    pub dimension_mismatches: usize,
    /// Survivors whose similarity met the threshold (before `limit`).
    pub above_threshold: usize,
}

impl RankDiagnostics {
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.parse_failures.saturating_add(self.dimension_mismatches)
    }

    #[must_use]
    pub const fn survivors(&self) -> usize {
        self.considered.saturating_sub(self.dropped())
    }
}

/// Ranked output of [`rank`].
#[derive(Debug, Clone)]
pub struct RankOutcome<T> {
    pub results: Vec<ScoredCandidate<T>>,
    /// `true` when no survivor met the threshold and the best available were returned instead.
    pub degraded: bool,
    pub diagnostics: RankDiagnostics,
}

impl<T> RankOutcome<T> {
    /// Lowest emitted similarity, if any result was emitted.
    #[must_use]
    pub fn lowest_similarity(&self) -> Option<f64> {
        self.results.last().map(|r| r.similarity)
    }
}

/// Cosine similarity in `[-1, 1]`.
///
/// Returns `0.0` when the lengths differ, either vector is empty, or either
/// norm is zero.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    let similarity = dot / denom;
    if similarity.is_finite() { similarity.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Round a similarity for presentation.
#[must_use]
pub fn round_similarity(similarity: f64) -> f64 {
    let factor = 10_f64.powi(SIMILARITY_DECIMALS);
    (similarity * factor).round() / factor
}

/// Check that a query vector can be compared against stored embeddings.
///
/// # Errors
/// Returns [`RankError`] if `query` is empty or contains a non-finite value.
pub fn validate_query(query: &[f64]) -> Result<(), RankError> {
    if query.is_empty() {
        return Err(RankError::EmptyQuery);
    }
    if let Some(position) = query.iter().position(|v| !v.is_finite()) {
        return Err(RankError::NonFiniteQuery(position));
    }
    Ok(())
}

/// Score, sort, threshold and truncate a candidate batch.
///
/// Ordering is by descending full-precision similarity; equal scores keep
/// their input order. Only the emitted similarity is rounded.
///
/// # Errors
/// Returns [`RankError`] if `query` is empty or contains a non-finite value.
pub fn rank<T, I>(
    query: &[f64],
    candidates: I,
    threshold: f64,
    limit: usize,
) -> Result<RankOutcome<T>, RankError>
where
    I: IntoIterator<Item = Candidate<T>>,
{
    validate_query(query)?;

    let mut diagnostics = RankDiagnostics::default();
    let mut scored: Vec<ScoredCandidate<T>> = Vec::new();

    for (position, candidate) in candidates.into_iter().enumerate() {
        diagnostics.considered += 1;
        let encoding = candidate.embedding.kind();
        let vector = match candidate.embedding.normalize() {
            Ok(vector) => vector,
            Err(e) => {
                diagnostics.parse_failures += 1;
                tracing::debug!(position, encoding, error = %e, "skipping candidate: unparseable embedding");
                continue;
            },
        };
        if vector.len() != query.len() {
            diagnostics.dimension_mismatches += 1;
            tracing::debug!(
                position,
                expected = query.len(),
                actual = vector.len(),
                "skipping candidate: embedding dimension mismatch"
            );
            continue;
        }
        scored.push(ScoredCandidate {
            similarity: cosine_similarity(query, &vector),
            item: candidate.item,
        });
    }

    // Stable: ties keep input order.
    scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    let above_threshold = scored.partition_point(|s| s.similarity >= threshold);
    diagnostics.above_threshold = above_threshold;

    let degraded = above_threshold == 0 && !scored.is_empty();
    let keep = if degraded { limit } else { above_threshold.min(limit) };
    scored.truncate(keep);
    for result in &mut scored {
        result.similarity = round_similarity(result.similarity);
    }

    tracing::debug!(
        considered = diagnostics.considered,
        parse_failures = diagnostics.parse_failures,
        dimension_mismatches = diagnostics.dimension_mismatches,
        above_threshold,
        emitted = scored.len(),
        degraded,
        "ranked candidates"
    );

    Ok(RankOutcome { results: scored, degraded, diagnostics })
}
