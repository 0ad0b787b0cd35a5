//! Scalar vector primitives over `f64` slices.
//!
//! Plain portable implementations; callers guarantee equal lengths.

/// Dot product of two vectors.
#[inline]
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Squared L2 norm of a vector.
#[inline]
#[must_use]
pub fn norm_squared(v: &[f64]) -> f64 {
    dot(v, v)
}

/// L2 norm of a vector.
#[inline]
#[must_use]
pub fn norm(v: &[f64]) -> f64 {
    norm_squared(v).sqrt()
}

/// Squared Euclidean distance between two vectors.
///
/// Preferred over [`distance`] when only comparing distances.
#[inline]
#[must_use]
pub fn distance_squared(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// Euclidean distance between two vectors.
#[inline]
#[must_use]
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    distance_squared(a, b).sqrt()
}
