//! CSS Box Model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use serde::{Deserialize, Serialize};
use trellis_style::PhysicalSides;

/// Edge sizes for padding, border, or margin, keyed by physical side.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
pub type EdgeSizes = PhysicalSides<f32>;

/// Sum of the left and right edges.
#[must_use]
pub fn horizontal_sum(edges: &EdgeSizes) -> f32 {
    edges.left + edges.right
}

/// Sum of the top and bottom edges.
#[must_use]
pub fn vertical_sum(edges: &EdgeSizes) -> f32 {
    edges.top + edges.bottom
}

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// Frame rects are stored in the coordinate space of the box's container;
/// overflow rects in the box's own border-box space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// A rect from its origin and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// A rect with no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// `other` lies entirely within this rect.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.max_x() >= other.max_x()
            && self.max_y() >= other.max_y()
    }

    /// Smallest rect containing both. Empty rects do not contribute.
    #[must_use]
    pub fn unite(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.max_x().max(other.max_x()) - x,
            height: self.max_y().max(other.max_y()) - y,
        }
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn moved_by(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Move the left edge to `x`, keeping the right edge in place.
    pub fn shift_x_edge_to(&mut self, x: f32) {
        let delta = x - self.x;
        self.x = x;
        self.width = (self.width - delta).max(0.0);
    }

    /// Move the right edge to `max_x`, keeping the left edge in place.
    pub fn shift_max_x_edge_to(&mut self, max_x: f32) {
        self.width = (max_x - self.x).max(0.0);
    }

    /// Move the top edge to `y`, keeping the bottom edge in place.
    pub fn shift_y_edge_to(&mut self, y: f32) {
        let delta = y - self.y;
        self.y = y;
        self.height = (self.height - delta).max(0.0);
    }

    /// Move the bottom edge to `max_y`, keeping the top edge in place.
    pub fn shift_max_y_edge_to(&mut self, max_y: f32) {
        self.height = (max_y - self.y).max(0.0);
    }

    /// Shrink by `edges` on each side.
    #[must_use]
    pub fn inset_by(&self, edges: &EdgeSizes) -> Self {
        Self {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - horizontal_sum(edges)).max(0.0),
            height: (self.height - vertical_sum(edges)).max(0.0),
        }
    }

    /// Grow by `edges` on each side.
    #[must_use]
    pub fn expand_by(&self, edges: &EdgeSizes) -> Self {
        Self {
            x: self.x - edges.left,
            y: self.y - edges.top,
            width: self.width + horizontal_sum(edges),
            height: self.height + vertical_sum(edges),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unite_ignores_empty() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.unite(&Rect::default()), a);
        assert_eq!(
            a.unite(&Rect::new(5.0, -5.0, 10.0, 10.0)),
            Rect::new(0.0, -5.0, 15.0, 15.0)
        );
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let outer = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(outer.contains(&Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert!(!outer.contains(&Rect::new(-1.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_shift_edges_keep_opposite_edge() {
        let mut r = Rect::new(10.0, 10.0, 100.0, 100.0);
        r.shift_x_edge_to(30.0);
        assert_eq!(r.max_x(), 110.0);
        r.shift_max_y_edge_to(60.0);
        assert_eq!(r.height, 50.0);
    }

    #[test]
    fn test_inset_by_clamps_at_zero() {
        let edges = EdgeSizes::uniform(8.0);
        let r = Rect::new(0.0, 0.0, 10.0, 40.0).inset_by(&edges);
        assert_eq!(r, Rect::new(8.0, 8.0, 0.0, 24.0));
    }
}
