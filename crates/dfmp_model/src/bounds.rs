//! Layout bounds.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// The axis-aligned layout region macros are expected to occupy.
///
/// Positions outside the bounds are penalized by the placer, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub min_x: f64,
    /// Right edge.
    pub max_x: f64,
    /// Bottom edge.
    pub min_y: f64,
    /// Top edge.
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from their four edges.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Checks that every edge is finite and the region is not inverted.
    pub fn validate(&self) -> Result<(), ModelError> {
        let edges = [self.min_x, self.max_x, self.min_y, self.max_y];
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(ModelError::InvalidBounds(format!("{self} has a non-finite edge")));
        }
        if self.max_x < self.min_x || self.max_y < self.min_y {
            return Err(ModelError::InvalidBounds(format!("{self} is inverted")));
        }
        Ok(())
    }

    /// Returns the horizontal extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the vertical extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the layout area.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Returns the `(min, max)` range of the x axis.
    pub fn x_range(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    /// Returns the `(min, max)` range of the y axis.
    pub fn y_range(&self) -> (f64, f64) {
        (self.min_y, self.max_y)
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents() {
        let b = Bounds::new(0.0, 100.0, 0.0, 50.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 50.0);
        assert_eq!(b.area(), 5000.0);
        assert!(b.validate().is_ok());
    }

    #[test]
    fn degenerate_bounds_are_valid() {
        assert!(Bounds::new(5.0, 5.0, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn inverted_bounds_rejected() {
        let err = Bounds::new(10.0, 0.0, 0.0, 1.0).validate().unwrap_err();
        assert!(matches!(err, ModelError::InvalidBounds(_)));
    }

    #[test]
    fn nan_bounds_rejected() {
        assert!(Bounds::new(0.0, f64::NAN, 0.0, 1.0).validate().is_err());
    }
}
