// src/utils.rs
use log::warn;
use ndarray::{Array1, ArrayView1};

/// Divides every score by their sum so the result sums to one.
///
/// A zero (or non-finite) sum cannot be normalized. The divisor falls back to
/// 1.0 and the scores come back unchanged instead of failing.
pub fn normalize(scores: ArrayView1<'_, f64>) -> Array1<f64> {
    let total = scores.sum();
    let divisor = if total > 0.0 && total.is_finite() {
        total
    } else {
        if !scores.is_empty() {
            warn!(
                "score sum is {} over {} classes; returning unnormalized scores",
                total,
                scores.len()
            );
        }
        1.0
    };
    scores.mapv(|s| s / divisor)
}
