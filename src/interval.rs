//! Parameter ranges for ray intersection queries.

/// Interval (min, max) of acceptable ray parameters.
///
/// Both bounds are treated as exclusive by `surrounds`, which keeps
/// secondary rays from re-hitting the surface they start on.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    /// Lower bound of the interval.
    pub min: f32,
    /// Upper bound of the interval.
    pub max: f32,
}

impl Interval {
    /// Create a new interval with the given bounds.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check whether x lies strictly inside the interval.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }
}
