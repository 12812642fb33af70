use crate::Point;

/// Returns the squared Euclidean distance between two points.
///
/// This is exact: each squared axis difference fits in a `u64`,
/// but their sum may not, so it is returned as a `u128`.
#[inline]
#[must_use]
pub fn squared_distance(a: Point, b: Point) -> u128 {
    let dx = u64::from(a.x.abs_diff(b.x));
    let dy = u64::from(a.y.abs_diff(b.y));
    u128::from(dx * dx) + u128::from(dy * dy)
}

/// Returns the Euclidean distance between two points.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn distance(a: Point, b: Point) -> f64 {
    (squared_distance(a, b) as f64).sqrt()
}
