//! Float exclusions.
//!
//! [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
//!
//! "A float is a box that is shifted to the left or right on the current line.
//! The most interesting characteristic of a float is that content may flow along
//! its side (or be prohibited from doing so by the 'clear' property)."
//!
//! A block that establishes a formatting context records the floats placed
//! in it here, in its logical content coordinates: `inline_start` runs from
//! the line-left content edge, `top` from the block-start content edge. The
//! width resolver asks this record how much inline space a float-avoiding
//! child has at a given block position.

use trellis_style::{Clear, Float};

/// Line-relative side a float hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatSide {
    /// `float: left`: the line-left edge.
    Left,
    /// `float: right`: the line-right edge.
    Right,
}

impl FloatSide {
    /// Map a computed `float` value; `none` has no side.
    #[must_use]
    pub const fn from_float(float: Float) -> Option<Self> {
        match float {
            Float::None => None,
            Float::Left => Some(Self::Left),
            Float::Right => Some(Self::Right),
        }
    }
}

/// The margin box of a placed float, in logical content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatRect {
    /// Offset from the line-left content edge.
    pub inline_start: f32,
    /// Offset from the block-start content edge.
    pub top: f32,
    /// Inline-axis size of the margin box.
    pub inline_size: f32,
    /// Block-axis size of the margin box.
    pub block_size: f32,
}

impl FloatRect {
    fn bottom(&self) -> f32 {
        self.top + self.block_size
    }

    fn inline_end(&self) -> f32 {
        self.inline_start + self.inline_size
    }

    fn overlaps_band(&self, top: f32, height: f32) -> bool {
        // A zero-height band still intersects a float that spans its top.
        let bottom = top + height.max(0.0);
        (self.top <= top || self.top < bottom) && self.bottom() > top
    }
}

/// Floats placed in one block formatting context.
///
/// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
///
/// "Since a float is not in the flow, non-positioned block boxes created
/// before and after the float box flow vertically as if the float did not
/// exist. However, the current and subsequent line boxes created next to
/// the float are shortened as necessary to make room for the margin box
/// of the float."
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatExclusions {
    left_floats: Vec<FloatRect>,
    right_floats: Vec<FloatRect>,
}

impl FloatExclusions {
    /// At least one float has been placed.
    #[must_use]
    pub fn contains_floats(&self) -> bool {
        !(self.left_floats.is_empty() && self.right_floats.is_empty())
    }

    /// Forget every placed float.
    pub fn clear_floats(&mut self) {
        self.left_floats.clear();
        self.right_floats.clear();
    }

    /// The lowest margin-box bottom among all floats.
    ///
    /// [§ 10.6.7](https://www.w3.org/TR/CSS2/visudet.html#root-height)
    ///
    /// "If the element has any floating descendants whose bottom margin edge
    /// is below the element's bottom content edge, then the height is
    /// increased to include those edges."
    #[must_use]
    pub fn lowest_float_logical_bottom(&self) -> f32 {
        self.left_floats
            .iter()
            .chain(&self.right_floats)
            .map(FloatRect::bottom)
            .fold(0.0_f32, f32::max)
    }

    /// [§ 9.5.1 Positioning the float](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    ///
    /// Place a float with the given margin-box size at or below
    /// `current_top` in a block whose content box is `logical_width` wide.
    ///
    /// - Rule 1: a float cannot extend past the containing block's edges.
    /// - Rules 4, 5, 8: it sits as high as possible, at or below `current_top`.
    /// - Rule 9: left floats go as far left as possible, right floats as far
    ///   right.
    /// - Rules 2, 3, 7: floats do not overlap each other.
    pub fn place_float(
        &mut self,
        side: FloatSide,
        inline_size: f32,
        block_size: f32,
        current_top: f32,
        logical_width: f32,
    ) -> FloatRect {
        // STEP 1: Start at the highest allowed position.
        //
        // "A floating box's outer top may not be higher than the top of
        // its containing block."
        let mut top = current_top.max(0.0);

        loop {
            // STEP 2: Find the line band at this position.
            let start = self.start_offset_for_line(top, block_size);
            let end = self.end_offset_for_line(top, block_size, logical_width);
            let available = (end - start).max(0.0);

            // STEP 3: Place the float if it fits, or if nothing further down
            // would make more room.
            let next_top = self.next_float_bottom_after(top);
            if available >= inline_size || available >= logical_width || next_top <= top {
                let inline_start = match side {
                    FloatSide::Left => start,
                    FloatSide::Right => (end - inline_size).max(start.min(end)),
                };
                let rect = FloatRect {
                    inline_start,
                    top,
                    inline_size,
                    block_size,
                };
                match side {
                    FloatSide::Left => self.left_floats.push(rect),
                    FloatSide::Right => self.right_floats.push(rect),
                }
                return rect;
            }

            // STEP 4: Move past the next float bottom and retry.
            top = next_top;
        }
    }

    /// [§ 9.5.2 'clear'](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
    ///
    /// "Requires that the top border edge of the box be below the bottom
    /// outer edge of any [left|right]-floating boxes."
    ///
    /// Returns the block position a box with `clear` must move to.
    #[must_use]
    pub fn clear(&self, clear: Clear, current_top: f32) -> f32 {
        let lowest = |floats: &[FloatRect]| {
            floats.iter().map(FloatRect::bottom).fold(current_top, f32::max)
        };
        match clear {
            Clear::None => current_top,
            Clear::Left => lowest(&self.left_floats),
            Clear::Right => lowest(&self.right_floats),
            Clear::Both => lowest(&self.left_floats).max(lowest(&self.right_floats)),
        }
    }

    /// Line-left edge of the space left by floats in the band
    /// `[top, top + height)`, relative to the content edge.
    #[must_use]
    pub fn start_offset_for_line(&self, top: f32, height: f32) -> f32 {
        self.left_floats
            .iter()
            .filter(|f| f.overlaps_band(top, height))
            .map(FloatRect::inline_end)
            .fold(0.0_f32, f32::max)
    }

    /// Line-right edge of the space left by floats in the band, relative to
    /// the line-left content edge of a `logical_width`-wide content box.
    #[must_use]
    pub fn end_offset_for_line(&self, top: f32, height: f32, logical_width: f32) -> f32 {
        self.right_floats
            .iter()
            .filter(|f| f.overlaps_band(top, height))
            .map(|f| f.inline_start)
            .fold(logical_width, f32::min)
    }

    /// Inline space between the floats in the band.
    #[must_use]
    pub fn available_logical_width_for_line(
        &self,
        top: f32,
        height: f32,
        logical_width: f32,
    ) -> f32 {
        (self.end_offset_for_line(top, height, logical_width)
            - self.start_offset_for_line(top, height))
        .max(0.0)
    }

    /// The smallest float bottom strictly below `top`, or `top` itself if
    /// there is none.
    fn next_float_bottom_after(&self, top: f32) -> f32 {
        self.left_floats
            .iter()
            .chain(&self.right_floats)
            .map(FloatRect::bottom)
            .filter(|&bottom| bottom > top)
            .reduce(f32::min)
            .unwrap_or(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_floats_stack_horizontally() {
        let mut floats = FloatExclusions::default();
        let a = floats.place_float(FloatSide::Left, 100.0, 50.0, 0.0, 400.0);
        let b = floats.place_float(FloatSide::Left, 100.0, 50.0, 0.0, 400.0);
        assert_eq!(a.inline_start, 0.0);
        assert_eq!(b.inline_start, 100.0);
        assert_eq!(b.top, 0.0);
    }

    #[test]
    fn test_right_float_hugs_line_right() {
        let mut floats = FloatExclusions::default();
        let r = floats.place_float(FloatSide::Right, 150.0, 40.0, 10.0, 400.0);
        assert_eq!(r.inline_start, 250.0);
        assert_eq!(r.top, 10.0);
        assert_eq!(floats.end_offset_for_line(20.0, 5.0, 400.0), 250.0);
        assert_eq!(floats.end_offset_for_line(60.0, 5.0, 400.0), 400.0);
    }

    #[test]
    fn test_float_moves_down_when_it_does_not_fit() {
        let mut floats = FloatExclusions::default();
        let _ = floats.place_float(FloatSide::Left, 300.0, 50.0, 0.0, 400.0);
        let second = floats.place_float(FloatSide::Left, 200.0, 20.0, 0.0, 400.0);
        assert_eq!(second.top, 50.0, "no room beside the first float");
        assert_eq!(second.inline_start, 0.0);
    }

    #[test]
    fn test_clear_moves_below_matching_side() {
        let mut floats = FloatExclusions::default();
        let _ = floats.place_float(FloatSide::Left, 50.0, 80.0, 0.0, 400.0);
        let _ = floats.place_float(FloatSide::Right, 50.0, 30.0, 0.0, 400.0);
        assert_eq!(floats.clear(Clear::Left, 0.0), 80.0);
        assert_eq!(floats.clear(Clear::Right, 0.0), 30.0);
        assert_eq!(floats.clear(Clear::Both, 100.0), 100.0);
        assert_eq!(floats.lowest_float_logical_bottom(), 80.0);
    }

    #[test]
    fn test_available_width_for_line_between_floats() {
        let mut floats = FloatExclusions::default();
        let _ = floats.place_float(FloatSide::Left, 100.0, 50.0, 0.0, 500.0);
        let _ = floats.place_float(FloatSide::Right, 120.0, 50.0, 0.0, 500.0);
        assert_eq!(floats.available_logical_width_for_line(0.0, 10.0, 500.0), 280.0);
        assert_eq!(floats.available_logical_width_for_line(50.0, 10.0, 500.0), 500.0);
        assert!(floats.contains_floats());
    }
}
