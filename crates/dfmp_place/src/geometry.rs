//! Rectangle geometry for the placement cost.
//!
//! Macro rectangles follow the top-left convention of [`Macro`]: a macro at
//! `(x, y)` with rotation-aware dimensions `(w, h)` covers `x .. x + w` and
//! `y - h .. y`.

use dfmp_model::{Bounds, Design, Macro};

/// An axis-aligned rectangle given by its lower-left and upper-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub min_x: f64,
    /// Bottom edge.
    pub min_y: f64,
    /// Right edge.
    pub max_x: f64,
    /// Top edge.
    pub max_y: f64,
}

impl Rect {
    /// Creates a rectangle from two corners.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Returns the rectangle covered by the layout bounds.
    pub fn from_bounds(bounds: &Bounds) -> Self {
        Self::new(bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y)
    }

    /// Returns the area. Never negative.
    pub fn area(&self) -> f64 {
        (self.max_x - self.min_x).abs() * (self.max_y - self.min_y).abs()
    }

    /// Returns the area shared with `other`, or 0 when they do not overlap on
    /// both axes.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let x_dist = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let y_dist = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        if x_dist > 0.0 && y_dist > 0.0 {
            x_dist * y_dist
        } else {
            0.0
        }
    }

    /// Returns the smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

/// Returns `area(a) + area(b) - area(a ∩ b)`.
///
/// Disjoint rectangles yield the sum of their areas; identical rectangles
/// yield the area of one. Symmetric in its arguments.
pub fn overlap_area(a: &Rect, b: &Rect) -> f64 {
    a.area() + b.area() - a.intersection_area(b)
}

/// Returns the footprint of a macro at its current position and rotation.
pub fn macro_rect(m: &Macro) -> Rect {
    let (w, h) = m.dimensions();
    let p = m.position();
    Rect::new(p.x, p.y - h, p.x + w, p.y)
}

/// Sums [`overlap_area`] over every unordered pair of macros.
pub fn total_overlap(design: &Design) -> f64 {
    let rects: Vec<Rect> = design.macros().iter().map(macro_rect).collect();
    let mut total = 0.0;
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            total += overlap_area(a, b);
        }
    }
    total
}

/// Sums, over all macros, the layout area not covered by the macro.
///
/// A macro entirely outside the bounds contributes the full layout area; one
/// inside contributes the layout area minus its own footprint. Never
/// negative.
pub fn total_overflow(bounds: &Bounds, design: &Design) -> f64 {
    let layout = Rect::from_bounds(bounds);
    design
        .macros()
        .iter()
        .map(|m| layout.area() - layout.intersection_area(&macro_rect(m)))
        .sum()
}

/// Returns the smallest rectangle enclosing every macro, if there are any.
pub fn enclosing_rect(design: &Design) -> Option<Rect> {
    design
        .macros()
        .iter()
        .map(macro_rect)
        .reduce(|acc, r| acc.union(&r))
}

/// Returns the area of the bounding box of all macros (not the sum of their
/// areas). An empty design has zero area.
pub fn total_area(design: &Design) -> f64 {
    enclosing_rect(design).map_or(0.0, |r| r.area())
}
