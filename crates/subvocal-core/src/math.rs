//! Math utilities for signal features and embedding similarity
//!
//! Free functions shared by the feature extractor and the concept
//! grounder. Both fail explicitly on degenerate input instead of letting
//! NaN propagate through the pipeline.

use crate::error::{DecodeError, DecodeResult};

/// Mean squared amplitude of a channel, the whole-signal power proxy.
///
/// Fails with [`DecodeError::InvalidInput`] on an empty channel, where the
/// mean is undefined.
pub fn mean_power(samples: &[f64]) -> DecodeResult<f64> {
    if samples.is_empty() {
        return Err(DecodeError::InvalidInput {
            reason: "cannot compute power of an empty channel".into(),
        });
    }
    let sum_sq: f64 = samples.iter().map(|x| x * x).sum();
    Ok(sum_sq / samples.len() as f64)
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`.
///
/// Fails with [`DecodeError::DegenerateVector`] if either vector has zero
/// magnitude; similarity against a zero vector is undefined. Vectors of
/// unequal length compare over the shorter prefix for the dot product and
/// over their own full length for the norms, which only arises from a
/// malformed embedding table and will surface as a low score rather than
/// an index panic.
pub fn cosine_similarity(a: &[f64], b: &[f64], b_name: &str) -> DecodeResult<f64> {
    let norm_a = norm(a);
    let norm_b = norm(b);

    if norm_a == 0.0 {
        return Err(DecodeError::DegenerateVector {
            side: "query".into(),
        });
    }
    if norm_b == 0.0 {
        return Err(DecodeError::DegenerateVector {
            side: b_name.to_string(),
        });
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    Ok(dot / (norm_a * norm_b))
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_power() {
        assert!((mean_power(&[1.0, 1.0, 1.0, 1.0]).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!((mean_power(&[2.0, -2.0]).unwrap() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_power_empty_fails() {
        assert!(matches!(
            mean_power(&[]),
            Err(DecodeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let v = [1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v, "self").unwrap();
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0], "other").unwrap();
        assert!(sim.abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector_fails() {
        let err = cosine_similarity(&[0.0, 0.0], &[1.0, 0.0], "other").unwrap_err();
        assert!(matches!(err, DecodeError::DegenerateVector { side } if side == "query"));

        let err = cosine_similarity(&[1.0, 0.0], &[0.0, 0.0], "other").unwrap_err();
        assert!(matches!(err, DecodeError::DegenerateVector { side } if side == "other"));
    }
}
