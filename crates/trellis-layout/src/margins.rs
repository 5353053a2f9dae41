//! The margin equation shared by the inline and block axes.
//!
//! [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
//!
//! "'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
//! 'padding-right' + 'border-right-width' + 'margin-right' = width of
//! containing block"

use trellis_style::{Length, TextAlign, minimum_value_for_length};

use crate::tree::{BoxId, LayoutTree};

/// The axis a margin pair is being resolved along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginDirection {
    /// Start/end margins; `auto` takes up free space.
    Inline,
    /// Before/after margins; `auto` is always 0.
    Block,
}

/// A resolved start/end (or before/after) margin pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarginPair {
    /// Start or before margin.
    pub start: f32,
    /// End or after margin.
    pub end: f32,
}

impl LayoutTree {
    /// Resolve a pair of margins for a box of `child_width` in a container
    /// `container_width` wide.
    ///
    /// Only in-flow block-level boxes along the inline axis see their `auto`
    /// margins absorb free space. Floats, inline-level boxes and the block
    /// axis resolve each margin on its own.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn compute_margins_for_direction(
        &self,
        id: BoxId,
        direction: MarginDirection,
        containing_block: BoxId,
        container_width: f32,
        child_width: f32,
        mut start_length: Length,
        mut end_length: Length,
    ) -> MarginPair {
        // [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
        //
        // "The percentage is calculated with respect to the width of the
        // generated box's containing block."
        if direction == MarginDirection::Block || self.is_floating(id) || self.is_inline(id) {
            return MarginPair {
                start: minimum_value_for_length(start_length, container_width),
                end: minimum_value_for_length(end_length, container_width),
            };
        }

        // Flex containers distribute free space to auto margins themselves.
        if self.is_flexible_box(containing_block) {
            if start_length.is_auto() {
                start_length = Length::px(0.0);
            }
            if end_length.is_auto() {
                end_length = Length::px(0.0);
            }
        }

        let start_width = minimum_value_for_length(start_length, container_width);
        let end_width = minimum_value_for_length(end_length, container_width);

        // Next to floats only the float-free part of the line is available.
        let mut available_width = container_width;
        if self.avoids_floats(id) && self.contains_floats(containing_block) {
            available_width = self.containing_block_available_line_width(id);
        }

        // "If 'width' is not 'auto' and ... (plus any of 'margin-left' or
        // 'margin-right' that are not 'auto') is larger than the width of the
        // containing block, then any 'auto' values for 'margin-left' or
        // 'margin-right' are, for the following rules, treated as zero."
        let margin_box_width = child_width
            + if self.style(id).width.is_auto() {
                0.0
            } else {
                start_width + end_width
            };
        if margin_box_width >= available_width {
            return MarginPair {
                start: start_width,
                end: end_width,
            };
        }

        let cb_style = self.style(containing_block);

        // "If both 'margin-left' and 'margin-right' are 'auto', their used
        // values are equal. This horizontally centers the element with
        // respect to the edges of the containing block."
        //
        // `-webkit-center` centers the margin box even without auto margins.
        if (start_length.is_auto() && end_length.is_auto())
            || (!start_length.is_auto()
                && !end_length.is_auto()
                && cb_style.text_align == TextAlign::WebkitCenter)
        {
            let centered_start =
                ((available_width - child_width - start_width - end_width) / 2.0).max(0.0);
            let start = centered_start + start_width;
            return MarginPair {
                start,
                end: available_width - child_width - start,
            };
        }

        // `-webkit-left` in RTL and `-webkit-right` in LTR push the box to
        // the far side by turning the margin on the near side into `auto`.
        let cb_ltr = cb_style.is_left_to_right_direction();
        if (!cb_ltr && cb_style.text_align == TextAlign::WebkitLeft)
            || (cb_ltr && cb_style.text_align == TextAlign::WebkitRight)
        {
            if cb_ltr == self.style(id).is_left_to_right_direction() {
                if !end_length.is_auto() {
                    start_length = Length::Auto;
                }
            } else if !start_length.is_auto() {
                end_length = Length::Auto;
            }
        }

        // "If there is exactly one value specified as 'auto', its used value
        // follows from the equality."
        if end_length.is_auto() {
            return MarginPair {
                start: start_width,
                end: available_width - child_width - start_width,
            };
        }
        if start_length.is_auto() {
            return MarginPair {
                start: available_width - child_width - end_width,
                end: end_width,
            };
        }

        MarginPair {
            start: start_width,
            end: end_width,
        }
    }

    /// Block-axis margins of `id` in `containing_block`'s writing mode.
    ///
    /// This is the positioning phase: margins are looked up and stored on
    /// the sides the containing block calls before and after, which differ
    /// from the box's own in orthogonal flows.
    #[must_use]
    pub fn compute_block_direction_margins(&self, id: BoxId, containing_block: BoxId) -> MarginPair {
        let cb_style = self.style(containing_block);
        let style = self.style(id);
        self.compute_margins_for_direction(
            id,
            MarginDirection::Block,
            containing_block,
            self.containing_block_logical_width_for_content(id),
            self.logical_height(id),
            style.margin_before_using(cb_style),
            style.margin_after_using(cb_style),
        )
    }

    /// [`LayoutTree::compute_block_direction_margins`] written into the
    /// geometry record.
    pub fn compute_and_set_block_direction_margins(&mut self, id: BoxId, containing_block: BoxId) {
        let margins = self.compute_block_direction_margins(id, containing_block);
        let wm = self.style(containing_block).writing_mode;
        let margin = &mut self.geometry_mut(id).margin;
        margin.set_before(wm, margins.start);
        margin.set_after(wm, margins.end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::box_model::Rect;
    use crate::settings::DocumentSettings;
    use crate::tree::BoxKind;
    use trellis_style::{ComputedStyle, Direction, Display, PhysicalSides};

    fn setup(cb_style: ComputedStyle, style: ComputedStyle) -> (LayoutTree, BoxId, BoxId) {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        tree.geometry_mut(BoxId::VIEW).frame = Rect::new(0.0, 0.0, 800.0, 600.0);
        let cb = tree
            .append_child(BoxId::VIEW, BoxKind::Block, None, cb_style)
            .unwrap();
        tree.geometry_mut(cb).frame = Rect::new(0.0, 0.0, 500.0, 100.0);
        let id = tree.append_child(cb, BoxKind::Block, None, style).unwrap();
        (tree, cb, id)
    }

    fn auto_margins() -> PhysicalSides<Length> {
        PhysicalSides {
            left: Length::Auto,
            right: Length::Auto,
            ..PhysicalSides::uniform(Length::px(0.0))
        }
    }

    #[test]
    fn test_both_auto_margins_center() {
        let style = ComputedStyle {
            width: Length::px(200.0),
            margin: auto_margins(),
            ..ComputedStyle::default()
        };
        let (tree, cb, id) = setup(ComputedStyle::default(), style);
        let m = tree.compute_margins_for_direction(
            id,
            MarginDirection::Inline,
            cb,
            500.0,
            200.0,
            Length::Auto,
            Length::Auto,
        );
        assert_eq!(m, MarginPair { start: 150.0, end: 150.0 });
    }

    #[test]
    fn test_one_auto_margin_takes_the_rest() {
        let (tree, cb, id) = setup(
            ComputedStyle::default(),
            ComputedStyle {
                width: Length::px(200.0),
                ..ComputedStyle::default()
            },
        );
        let m = tree.compute_margins_for_direction(
            id,
            MarginDirection::Inline,
            cb,
            500.0,
            200.0,
            Length::px(50.0),
            Length::Auto,
        );
        assert_eq!(m, MarginPair { start: 50.0, end: 250.0 });
    }

    #[test]
    fn test_overflowing_box_treats_auto_as_zero() {
        let (tree, cb, id) = setup(
            ComputedStyle::default(),
            ComputedStyle {
                width: Length::px(600.0),
                ..ComputedStyle::default()
            },
        );
        let m = tree.compute_margins_for_direction(
            id,
            MarginDirection::Inline,
            cb,
            500.0,
            600.0,
            Length::Auto,
            Length::px(-20.0),
        );
        assert_eq!(m, MarginPair { start: 0.0, end: -20.0 });
    }

    #[test]
    fn test_block_direction_ignores_auto() {
        let (tree, cb, id) = setup(ComputedStyle::default(), ComputedStyle::default());
        let m = tree.compute_margins_for_direction(
            id,
            MarginDirection::Block,
            cb,
            500.0,
            100.0,
            Length::Auto,
            Length::percent(10.0),
        );
        assert_eq!(m, MarginPair { start: 0.0, end: 50.0 });
    }

    #[test]
    fn test_webkit_center_centers_fixed_margins() {
        let (tree, cb, id) = setup(
            ComputedStyle {
                text_align: TextAlign::WebkitCenter,
                ..ComputedStyle::default()
            },
            ComputedStyle {
                width: Length::px(100.0),
                ..ComputedStyle::default()
            },
        );
        let m = tree.compute_margins_for_direction(
            id,
            MarginDirection::Inline,
            cb,
            500.0,
            100.0,
            Length::px(10.0),
            Length::px(30.0),
        );
        // The centered margin box spans the line; the end margin absorbs
        // what is left after the start margin and the box.
        assert_eq!(m, MarginPair { start: 190.0, end: 210.0 });
        assert_eq!(m.start + 100.0 + m.end, 500.0);
    }

    #[test]
    fn test_webkit_right_pushes_box_to_line_right() {
        let (tree, cb, id) = setup(
            ComputedStyle {
                text_align: TextAlign::WebkitRight,
                ..ComputedStyle::default()
            },
            ComputedStyle {
                width: Length::px(100.0),
                ..ComputedStyle::default()
            },
        );
        let m = tree.compute_margins_for_direction(
            id,
            MarginDirection::Inline,
            cb,
            500.0,
            100.0,
            Length::px(0.0),
            Length::px(0.0),
        );
        assert_eq!(m, MarginPair { start: 400.0, end: 0.0 });
    }

    #[test]
    fn test_inline_level_boxes_never_center() {
        let (tree, cb, id) = setup(
            ComputedStyle::default(),
            ComputedStyle {
                display: Display::InlineBlock,
                direction: Direction::Ltr,
                ..ComputedStyle::default()
            },
        );
        let m = tree.compute_margins_for_direction(
            id,
            MarginDirection::Inline,
            cb,
            500.0,
            100.0,
            Length::Auto,
            Length::Auto,
        );
        assert_eq!(m, MarginPair::default());
    }
}
