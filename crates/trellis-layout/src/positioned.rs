//! Absolutely positioned boxes.
//!
//! [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
//!
//! "The constraint that determines the used values for these elements is:
//!
//! 'left' + 'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
//! 'padding-right' + 'border-right-width' + 'margin-right' + 'right' =
//! width of containing block"
//!
//! [§ 10.6.4 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-height)
//! is the same equation along the block axis.
//!
//! Each axis is solved three times: for the preferred size, for the max
//! size, and for the min size. The max result replaces the preferred one
//! when the preferred extent is larger, then the min result replaces
//! whatever is left when it is larger still.
//!
//! Relative positioning lives here too: it is the one other place the
//! `top`/`right`/`bottom`/`left` properties are read.

#[cfg(feature = "layout-trace")]
use tracing::trace;
use trellis_style::{Direction, Length, Position, minimum_value_for_length, value_for_length};

use crate::margins::MarginPair;
use crate::tree::{BoxId, BoxKind, ContainingBlockChain, LayoutTree};
use crate::width::{LogicalExtent, SizeKind};

/// The inputs of one axis of the constraint equation, shared by the
/// preferred, max and min passes.
#[derive(Debug, Clone, Copy)]
struct PositionedAxis {
    /// The box the offsets are measured from.
    container: BoxId,
    /// Tie-break direction for over-constrained inline axes.
    container_direction: Direction,
    /// Padding-box size of the container along the axis.
    container_logical_size: f32,
    /// The box's own border and padding along the axis.
    borders_plus_padding: f32,
    /// `left` (or `top`), with any static position substituted in.
    start: Length,
    /// `right` (or `bottom`), with any static position substituted in.
    end: Length,
    /// Margin on the logical left (or before) side.
    margin_start: Length,
    /// Margin on the logical right (or after) side.
    margin_end: Length,
}

impl LayoutTree {
    /// Inline size of the padding box an out-of-flow box is placed in.
    ///
    /// [§ 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// "If the element has 'position: fixed', the containing block is
    /// established by the viewport in the case of continuous media or the
    /// page area in the case of paged media."
    ///
    /// With `check_perpendicular`, a containing block in an orthogonal
    /// writing mode answers with its block size instead.
    #[must_use]
    pub fn containing_block_logical_width_for_positioned(
        &self,
        id: BoxId,
        containing_block: BoxId,
        check_perpendicular: bool,
    ) -> f32 {
        if check_perpendicular && self.is_perpendicular_to(id, containing_block) {
            return self.containing_block_logical_height_for_positioned(id, containing_block, false);
        }

        if let Some(size) = self.visible_viewport_extent_for_fixed(id, containing_block, true) {
            return size;
        }

        if let Some(width) = self.geometry(id).overrides.containing_block_logical_width {
            return width;
        }

        self.client_logical_width(containing_block).max(0.0)
    }

    /// Block size of the padding box an out-of-flow box is placed in.
    #[must_use]
    pub fn containing_block_logical_height_for_positioned(
        &self,
        id: BoxId,
        containing_block: BoxId,
        check_perpendicular: bool,
    ) -> f32 {
        if check_perpendicular && self.is_perpendicular_to(id, containing_block) {
            return self.containing_block_logical_width_for_positioned(id, containing_block, false);
        }

        if let Some(size) = self.visible_viewport_extent_for_fixed(id, containing_block, false) {
            return size;
        }

        if let Some(height) = self.geometry(id).overrides.containing_block_logical_height {
            return height;
        }

        self.client_logical_height(containing_block)
    }

    /// A top-level fixed box anchors to the visible viewport, scrollbars
    /// excluded, rather than to the view's own box. Print layout uses the
    /// view.
    fn visible_viewport_extent_for_fixed(
        &self,
        id: BoxId,
        containing_block: BoxId,
        inline_axis: bool,
    ) -> Option<f32> {
        if self.style(id).position != Position::Fixed
            || !self.is_layout_view(containing_block)
            || self.settings().printing
        {
            return None;
        }
        let (width, height) = self.settings().visible_viewport_size();
        let horizontal = self.is_horizontal_writing_mode(containing_block);
        Some(if horizontal == inline_axis { width } else { height })
    }

    /// Inline offset contributed by a relatively positioned inline box on
    /// the way from a positioned box to its container.
    fn inline_ancestor_in_flow_offset(&self, inline: BoxId) -> f32 {
        let style = self.style(inline);
        let available = self
            .containing_block(inline)
            .map_or(0.0, |cb| self.available_logical_width(cb));
        if style.logical_left().is_auto() {
            -value_for_length(style.logical_right(), available)
        } else {
            value_for_length(style.logical_left(), available)
        }
    }

    /// Inline-axis part of a box's relative offset.
    fn in_flow_inline_offset(&self, id: BoxId) -> f32 {
        let (dx, dy) = self.geometry(id).in_flow_offset;
        if self.is_horizontal_writing_mode(id) { dx } else { dy }
    }

    /// [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
    ///
    /// "The static position for 'left' is the distance from the left edge of
    /// the containing block to the left margin edge of a hypothetical box
    /// that would have been the first box of the element if its 'position'
    /// property had been 'static' and 'float' had been 'none'."
    ///
    /// When both inline offsets are `auto`, returns them with the one on the
    /// parent's start side replaced by the static distance. Mixed writing
    /// modes along the way are not accounted for.
    #[must_use]
    pub fn compute_inline_static_distance(
        &self,
        id: BoxId,
        container: BoxId,
        container_logical_width: f32,
    ) -> (Length, Length) {
        let style = self.style(id);
        let (left, right) = (style.logical_left(), style.logical_right());
        if !left.is_auto() || !right.is_auto() {
            return (left, right);
        }
        let Some(parent) = self.parent_box(id) else {
            return (left, right);
        };

        let static_inline_position = self.geometry(id).static_inline_position;
        if self.style(parent).is_left_to_right_direction() {
            let mut static_position = static_inline_position - self.border_logical_left(container);
            let mut current = Some(parent);
            while let Some(curr) = current.filter(|&c| c != container) {
                if self.kind(curr) == BoxKind::Inline {
                    if self.is_in_flow_positioned(curr) {
                        static_position += self.inline_ancestor_in_flow_offset(curr);
                    }
                } else {
                    static_position += self.logical_left(curr);
                    if self.is_in_flow_positioned(curr) {
                        static_position += self.in_flow_inline_offset(curr);
                    }
                }
                current = self.container(curr);
            }
            (Length::px(static_position), right)
        } else {
            // Measured from the container's right padding edge.
            let enclosing_box = std::iter::once(parent)
                .chain(self.ancestors(parent))
                .find(|&b| self.kind(b) != BoxKind::Inline);
            let mut static_position = static_inline_position
                + container_logical_width
                + self.border_logical_left(container);
            let mut current = Some(parent);
            while let Some(curr) = current {
                if self.kind(curr) == BoxKind::Inline {
                    if self.is_in_flow_positioned(curr) {
                        static_position -= self.inline_ancestor_in_flow_offset(curr);
                    }
                } else {
                    if Some(curr) == enclosing_box {
                        static_position -= self.logical_width(curr);
                    }
                    if curr != container {
                        static_position -= self.logical_left(curr);
                        if self.is_in_flow_positioned(curr) {
                            static_position -= self.in_flow_inline_offset(curr);
                        }
                    }
                }
                if curr == container {
                    break;
                }
                current = self.container(curr);
            }
            (left, Length::px(static_position))
        }
    }

    /// [§ 10.6.4](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-height)
    ///
    /// "The static position for 'top' is the distance from the top edge of
    /// the containing block to the top margin edge of a hypothetical box
    /// that would have been the first box of the element if its specified
    /// 'position' value had been 'static'..."
    #[must_use]
    pub fn compute_block_static_distance(&self, id: BoxId, container: BoxId) -> (Length, Length) {
        let style = self.style(id);
        let (top, bottom) = (style.logical_top(), style.logical_bottom());
        if !top.is_auto() || !bottom.is_auto() {
            return (top, bottom);
        }

        let mut static_logical_top = self.geometry(id).static_block_position;
        let mut current = self.parent_box(id);
        while let Some(curr) = current.filter(|&c| c != container) {
            if self.kind(curr) != BoxKind::Inline {
                static_logical_top += self.logical_top(curr);
            }
            current = self.container(curr);
        }
        (
            Length::px(static_logical_top - self.border_before(container)),
            bottom,
        )
    }

    /// Solve the inline axis of an out-of-flow box: border-box extent,
    /// logical left in the container, and start/end margins.
    #[must_use]
    pub fn compute_positioned_logical_width(&self, id: BoxId) -> LogicalExtent {
        let Some(container) = self.container(id) else {
            return LogicalExtent::default();
        };
        let container_logical_width =
            self.containing_block_logical_width_for_positioned(id, container, true);

        let style = self.style(id);
        let horizontal = style.is_horizontal_writing_mode();
        let (margin_left, margin_right) = if horizontal {
            (style.margin.left, style.margin.right)
        } else {
            (style.margin.top, style.margin.bottom)
        };
        let (left, right) = self.compute_inline_static_distance(id, container, container_logical_width);
        let axis = PositionedAxis {
            container,
            container_direction: self.style(container).direction,
            container_logical_size: container_logical_width,
            borders_plus_padding: self.border_and_padding_logical_width(id),
            start: left,
            end: right,
            margin_start: margin_left,
            margin_end: margin_right,
        };

        let mut computed =
            self.compute_positioned_logical_width_using(id, SizeKind::Main, style.logical_width(), &axis);

        let max_width = style.logical_max_width();
        if !max_width.is_max_size_none() {
            let max_values =
                self.compute_positioned_logical_width_using(id, SizeKind::Max, max_width, &axis);
            if computed.extent > max_values.extent {
                computed = max_values;
            }
        }

        let min_width = style.logical_min_width();
        if !min_width.is_zero() || min_width.is_intrinsic() {
            let min_values =
                self.compute_positioned_logical_width_using(id, SizeKind::Min, min_width, &axis);
            if computed.extent < min_values.extent {
                computed = min_values;
            }
        }

        if !style.has_static_inline_position(horizontal) {
            computed.position += self.geometry(id).extra_inline_offset;
        }
        computed.extent += axis.borders_plus_padding;

        #[cfg(feature = "layout-trace")]
        trace!(
            target: "trellis::positioned",
            ?id,
            ?container,
            extent = computed.extent,
            position = computed.position,
            "positioned logical width"
        );
        computed
    }

    fn compute_positioned_logical_width_using(
        &self,
        id: BoxId,
        kind: SizeKind,
        logical_width: Length,
        axis: &PositionedAxis,
    ) -> LogicalExtent {
        let container_width = axis.container_logical_size;
        let bp = axis.borders_plus_padding;

        let width_value = if kind == SizeKind::Min && logical_width.is_auto() {
            0.0
        } else if logical_width.is_intrinsic() {
            self.compute_intrinsic_logical_width_using(id, logical_width, container_width, bp) - bp
        } else {
            self.adjust_content_box_logical_width_for_box_sizing(
                id,
                value_for_length(logical_width, container_width),
            )
        };

        let mut left_value = minimum_value_for_length(axis.start, container_width);
        let right_value = minimum_value_for_length(axis.end, container_width);

        // Margins resolve against the container as seen in its own writing
        // mode.
        let relative_width =
            self.containing_block_logical_width_for_positioned(id, axis.container, false);

        let width_is_auto = logical_width.is_auto();
        let left_is_auto = axis.start.is_auto();
        let right_is_auto = axis.end.is_auto();

        let mut extent = 0.0;
        let margin_left_value;
        let margin_right_value;

        if !left_is_auto && !width_is_auto && !right_is_auto {
            // "If none of the three is 'auto': If both 'margin-left' and
            // 'margin-right' are 'auto', solve the equation under the extra
            // constraint that the two margins get equal values, unless this
            // would make them negative, in which case when direction of the
            // containing block is 'ltr' ('rtl'), set 'margin-left'
            // ('margin-right') to zero and solve for 'margin-right'
            // ('margin-left')."
            extent = width_value;
            let available_space =
                container_width - (left_value + extent + right_value + bp);

            if axis.margin_start.is_auto() && axis.margin_end.is_auto() {
                if available_space >= 0.0 {
                    margin_left_value = available_space / 2.0;
                    margin_right_value = available_space - margin_left_value;
                } else if axis.container_direction == Direction::Ltr {
                    margin_left_value = 0.0;
                    margin_right_value = available_space;
                } else {
                    margin_left_value = available_space;
                    margin_right_value = 0.0;
                }
            } else if axis.margin_start.is_auto() {
                // "If one of 'margin-left' or 'margin-right' is 'auto',
                // solve the equation for that value."
                margin_right_value = value_for_length(axis.margin_end, relative_width);
                margin_left_value = available_space - margin_right_value;
            } else if axis.margin_end.is_auto() {
                margin_left_value = value_for_length(axis.margin_start, relative_width);
                margin_right_value = available_space - margin_left_value;
            } else {
                // "If the values are over-constrained, ignore the value for
                // 'left' (in case the 'direction' property of the containing
                // block is 'rtl') or 'right' (in case 'direction' is 'ltr')
                // and solve for that value."
                margin_left_value = value_for_length(axis.margin_start, relative_width);
                margin_right_value = value_for_length(axis.margin_end, relative_width);
                if axis.container_direction == Direction::Rtl {
                    left_value =
                        (available_space + left_value) - margin_left_value - margin_right_value;
                }
            }
        } else {
            // "Otherwise, set 'auto' values for 'margin-left' and
            // 'margin-right' to 0, and pick the one of the following six
            // rules that applies."
            margin_left_value = minimum_value_for_length(axis.margin_start, relative_width);
            margin_right_value = minimum_value_for_length(axis.margin_end, relative_width);

            let available_space = container_width
                - (margin_left_value + margin_right_value + left_value + right_value + bp);

            match (left_is_auto, width_is_auto, right_is_auto) {
                // "1. 'left' and 'width' are 'auto' and 'right' is not
                // 'auto', then the width is shrink-to-fit. Then solve for
                // 'left'"
                (true, true, false) => {
                    extent = self.shrink_to_fit_logical_width(id, available_space, bp);
                    left_value = available_space - extent;
                }
                // "3. 'width' and 'right' are 'auto' and 'left' is not
                // 'auto', then the width is shrink-to-fit."
                (false, true, true) => {
                    extent = self.shrink_to_fit_logical_width(id, available_space, bp);
                }
                // "4. 'left' is 'auto', 'width' and 'right' are not 'auto',
                // then solve for 'left'"
                (true, false, false) => {
                    extent = width_value;
                    left_value = available_space - extent;
                }
                // "5. 'width' is 'auto', 'left' and 'right' are not 'auto',
                // then solve for 'width'"
                (false, true, false) => {
                    extent = if self.auto_width_should_fit_content(id) {
                        self.shrink_to_fit_logical_width(id, available_space, bp)
                    } else {
                        available_space.max(0.0)
                    };
                }
                // "6. 'right' is 'auto', 'left' and 'width' are not 'auto',
                // then solve for 'right'"
                (false, false, true) => {
                    extent = width_value;
                }
                // Case 2 never applies: the static distance fills in 'left'
                // or 'right' whenever both are 'auto'.
                _ => {}
            }
        }

        // Offsets are measured from the padding edge, which a left-side
        // scrollbar pushes over.
        if self.scrolls_overflow_y(axis.container)
            && self.should_place_block_direction_scrollbar_on_logical_left(axis.container)
        {
            left_value += self.geometry(axis.container).vertical_scrollbar_width;
        }

        let position = self.compute_logical_left_positioned_offset(
            id,
            left_value + margin_left_value,
            extent,
            axis.container,
            container_width,
        );
        let margins = if self.style(id).is_left_to_right_direction() {
            (margin_left_value, margin_right_value)
        } else {
            (margin_right_value, margin_left_value)
        };
        LogicalExtent {
            extent,
            position,
            margins: MarginPair {
                start: margins.0,
                end: margins.1,
            },
        }
    }

    /// Move a logical left offset measured from the container's padding
    /// edge into the container's border-box coordinates. A container that
    /// is both orthogonal and in a flipped-blocks mode runs the other way.
    #[must_use]
    pub fn compute_logical_left_positioned_offset(
        &self,
        id: BoxId,
        logical_left: f32,
        logical_width: f32,
        container: BoxId,
        container_logical_width: f32,
    ) -> f32 {
        let border = self.border(container);
        let horizontal = self.is_horizontal_writing_mode(id);
        if self.is_perpendicular_to(id, container)
            && self.style(container).is_flipped_blocks_writing_mode()
        {
            container_logical_width - logical_width - logical_left
                + if horizontal { border.right } else { border.bottom }
        } else {
            logical_left + if horizontal { border.left } else { border.top }
        }
    }

    /// Solve the block axis of an out-of-flow box whose content is
    /// `logical_height` tall: border-box extent, logical top in the
    /// container, and before/after margins.
    #[must_use]
    pub fn compute_positioned_logical_height(&self, id: BoxId, logical_height: f32) -> LogicalExtent {
        let Some(container) = self.container(id) else {
            return LogicalExtent {
                extent: logical_height,
                ..LogicalExtent::default()
            };
        };
        let container_logical_height =
            self.containing_block_logical_height_for_positioned(id, container, true);

        let style = self.style(id);
        let (top, bottom) = self.compute_block_static_distance(id, container);
        let axis = PositionedAxis {
            container,
            container_direction: self.style(container).direction,
            container_logical_size: container_logical_height,
            borders_plus_padding: self.border_and_padding_logical_height(id),
            start: top,
            end: bottom,
            margin_start: style.margin_before(),
            margin_end: style.margin_after(),
        };

        let mut computed = self.compute_positioned_logical_height_using(
            id,
            SizeKind::Main,
            style.logical_height(),
            logical_height,
            &axis,
        );

        let max_height = style.logical_max_height();
        if !max_height.is_max_size_none() {
            let max_values = self.compute_positioned_logical_height_using(
                id,
                SizeKind::Max,
                max_height,
                logical_height,
                &axis,
            );
            if computed.extent > max_values.extent {
                computed = max_values;
            }
        }

        let min_height = style.logical_min_height();
        if !min_height.is_zero() || min_height.is_intrinsic() {
            let min_values = self.compute_positioned_logical_height_using(
                id,
                SizeKind::Min,
                min_height,
                logical_height,
                &axis,
            );
            if computed.extent < min_values.extent {
                computed = min_values;
            }
        }

        if !style.has_static_block_position(style.is_horizontal_writing_mode()) {
            computed.position += self.geometry(id).extra_block_offset;
        }
        computed.extent += axis.borders_plus_padding;

        #[cfg(feature = "layout-trace")]
        trace!(
            target: "trellis::positioned",
            ?id,
            ?container,
            extent = computed.extent,
            position = computed.position,
            "positioned logical height"
        );
        computed
    }

    fn compute_positioned_logical_height_using(
        &self,
        id: BoxId,
        kind: SizeKind,
        mut logical_height_length: Length,
        logical_height: f32,
        axis: &PositionedAxis,
    ) -> LogicalExtent {
        if kind == SizeKind::Min && logical_height_length.is_auto() {
            logical_height_length = Length::px(0.0);
        }

        let container_height = axis.container_logical_size;
        let bp = axis.borders_plus_padding;
        let content_logical_height = logical_height - bp;
        let relative_width =
            self.containing_block_logical_width_for_positioned(id, axis.container, false);

        let (top, bottom) = (axis.start, axis.end);
        let mut height_is_auto = logical_height_length.is_auto();
        let top_is_auto = top.is_auto();
        let bottom_is_auto = bottom.is_auto();

        // Tables size themselves; their content height is final.
        let resolved_logical_height = if self.is_table(id) {
            height_is_auto = false;
            content_logical_height
        } else if logical_height_length.is_intrinsic() {
            self.compute_intrinsic_logical_content_height_using(
                id,
                logical_height_length,
                content_logical_height,
                bp,
            )
        } else {
            self.adjust_content_box_logical_height_for_box_sizing(
                id,
                value_for_length(logical_height_length, container_height),
            )
        };

        let mut height_value = 0.0;
        let mut top_value = 0.0;
        let margin_before;
        let margin_after;

        if !top_is_auto && !height_is_auto && !bottom_is_auto {
            // "If none of the three are 'auto': If both 'margin-top' and
            // 'margin-bottom' are 'auto', solve the equation under the extra
            // constraint that the two margins get equal values. ... If the
            // values are over-constrained, ignore the value for 'bottom' and
            // solve for that value."
            height_value = resolved_logical_height;
            top_value = value_for_length(top, container_height);
            let available_space = container_height
                - (top_value + height_value + value_for_length(bottom, container_height) + bp);

            if axis.margin_start.is_auto() && axis.margin_end.is_auto() {
                margin_before = available_space / 2.0;
                margin_after = available_space - margin_before;
            } else if axis.margin_start.is_auto() {
                margin_after = value_for_length(axis.margin_end, relative_width);
                margin_before = available_space - margin_after;
            } else if axis.margin_end.is_auto() {
                margin_before = value_for_length(axis.margin_start, relative_width);
                margin_after = available_space - margin_before;
            } else {
                margin_before = value_for_length(axis.margin_start, relative_width);
                margin_after = value_for_length(axis.margin_end, relative_width);
            }
        } else {
            // "Otherwise, pick the one of the following six rules that
            // applies."
            margin_before = minimum_value_for_length(axis.margin_start, relative_width);
            margin_after = minimum_value_for_length(axis.margin_end, relative_width);
            let available_space = container_height - (margin_before + margin_after + bp);

            match (top_is_auto, height_is_auto, bottom_is_auto) {
                // "1. 'top' and 'height' are 'auto' and 'bottom' is not
                // 'auto', then the height is based on the content per
                // 10.6.7, set 'auto' values for 'margin-top' and
                // 'margin-bottom' to 0, and solve for 'top'"
                (true, true, false) => {
                    height_value = content_logical_height;
                    top_value = available_space
                        - (height_value + value_for_length(bottom, container_height));
                }
                // "3. 'height' and 'bottom' are 'auto' and 'top' is not
                // 'auto', then the height is based on the content"
                (false, true, true) => {
                    top_value = value_for_length(top, container_height);
                    height_value = content_logical_height;
                }
                // "4. 'top' is 'auto', 'height' and 'bottom' are not 'auto',
                // then solve for 'top'"
                (true, false, false) => {
                    height_value = resolved_logical_height;
                    top_value = available_space
                        - (height_value + value_for_length(bottom, container_height));
                }
                // "5. 'height' is 'auto', 'top' and 'bottom' are not 'auto',
                // then solve for 'height'"
                (false, true, false) => {
                    top_value = value_for_length(top, container_height);
                    height_value = (available_space
                        - (top_value + value_for_length(bottom, container_height)))
                    .max(0.0);
                }
                // "6. 'bottom' is 'auto', 'top' and 'height' are not 'auto',
                // then solve for 'bottom'"
                (false, false, true) => {
                    height_value = resolved_logical_height;
                    top_value = value_for_length(top, container_height);
                }
                _ => {}
            }
        }

        let position = self.compute_logical_top_positioned_offset(
            id,
            top_value + margin_before,
            height_value,
            axis.container,
            container_height,
        );
        LogicalExtent {
            extent: height_value,
            position,
            margins: MarginPair {
                start: margin_before,
                end: margin_after,
            },
        }
    }

    /// Move a logical top offset measured from the container's padding edge
    /// into the container's border-box coordinates, flipping it when the
    /// box's block axis runs against the container's.
    #[must_use]
    pub fn compute_logical_top_positioned_offset(
        &self,
        id: BoxId,
        logical_top: f32,
        logical_height: f32,
        container: BoxId,
        container_logical_height: f32,
    ) -> f32 {
        let style = self.style(id);
        let container_style = self.style(container);
        let horizontal = style.is_horizontal_writing_mode();
        let parallel = horizontal == container_style.is_horizontal_writing_mode();
        let flipped = style.is_flipped_blocks_writing_mode();
        let container_flipped = container_style.is_flipped_blocks_writing_mode();

        let mut position = logical_top;
        if (flipped && !parallel) || (flipped != container_flipped && parallel) {
            position = container_logical_height - logical_height - position;
        }

        let border = self.border(container);
        position
            + if container_flipped && parallel {
                if horizontal { border.bottom } else { border.right }
            } else if horizontal {
                border.top
            } else {
                border.left
            }
    }

    /// The containing block's height cannot be known before its content
    /// is, so percentage `top`/`bottom` do not apply.
    fn has_auto_height_or_containing_block_with_auto_height(&self, id: BoxId) -> bool {
        if self.is_layout_view(id) {
            return false;
        }
        if self.is_flex_item(id) && self.geometry(id).overrides.stretched_flex_height.is_some() {
            return false;
        }
        if self.is_grid_item(id)
            && self.geometry(id).overrides.containing_block_logical_height.is_some()
        {
            return false;
        }
        let style = self.style(id);
        let height = style.logical_height();
        let positioned_with_implicit_height = self.is_out_of_flow_positioned(id)
            && !style.logical_top().is_auto()
            && !style.logical_bottom().is_auto();
        if height.is_auto() && !positioned_with_implicit_height {
            return true;
        }
        if self.settings().quirks_mode {
            return false;
        }
        height.has_percent() && !self.percentage_logical_height_is_resolvable(id)
    }

    /// [§ 9.4.3 Relative positioning](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning)
    ///
    /// Physical `(dx, dy)` shift of a relatively positioned box.
    ///
    /// "If neither 'left' nor 'right' is 'auto', the position is
    /// over-constrained, and one of them has to be ignored. If the
    /// 'direction' property of the containing block is 'ltr', the value of
    /// 'left' wins and 'right' becomes -'left'. If 'direction' of the
    /// containing block is 'rtl', 'right' wins and 'left' is ignored."
    ///
    /// "If neither 'top' nor 'bottom' is 'auto', 'bottom' is ignored."
    /// Percentages of `top`/`bottom` only apply when the containing block
    /// has a definite height.
    #[must_use]
    pub fn offset_for_in_flow_position(&self, id: BoxId) -> (f32, f32) {
        if !self.is_in_flow_positioned(id) {
            return (0.0, 0.0);
        }
        let Some(cb) = self.containing_block(id) else {
            return (0.0, 0.0);
        };
        let style = self.style(id);
        let cb_style = self.style(cb);
        let g = self.geometry(cb);
        let border = self.border(cb);
        let padding = self.padding(cb);
        let available_width = (g.frame.width
            - border.left
            - border.right
            - padding.left
            - padding.right
            - g.vertical_scrollbar_width)
            .max(0.0);
        let available_height = (g.frame.height
            - border.top
            - border.bottom
            - padding.top
            - padding.bottom
            - g.horizontal_scrollbar_height)
            .max(0.0);

        let inset = style.inset;
        let mut dx = 0.0;
        if !inset.left.is_auto() {
            if !inset.right.is_auto() && !cb_style.is_left_to_right_direction() {
                dx = -value_for_length(inset.right, available_width);
            } else {
                dx = value_for_length(inset.left, available_width);
            }
        } else if !inset.right.is_auto() {
            dx = -value_for_length(inset.right, available_width);
        }

        let definite_height = !self.has_auto_height_or_containing_block_with_auto_height(cb)
            || self.stretches_to_viewport(cb);
        let mut dy = 0.0;
        if !inset.top.is_auto() && (definite_height || !inset.top.has_percent()) {
            dy = value_for_length(inset.top, available_height);
        } else if !inset.bottom.is_auto() && (definite_height || !inset.bottom.has_percent()) {
            dy = -value_for_length(inset.bottom, available_height);
        }
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PreferredLogicalWidths;
    use crate::settings::DocumentSettings;
    use crate::tree::Element;
    use trellis_style::{ComputedStyle, PhysicalSides, WritingMode};

    fn insets(top: Length, right: Length, bottom: Length, left: Length) -> PhysicalSides<Length> {
        PhysicalSides {
            top,
            right,
            bottom,
            left,
        }
    }

    /// A 500x400 relatively positioned containing block.
    fn container(style: ComputedStyle) -> (LayoutTree, BoxId) {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        tree.update_logical_width(BoxId::VIEW);
        tree.update_logical_height(BoxId::VIEW);
        let cb = tree
            .append_child(
                BoxId::VIEW,
                BoxKind::Block,
                Some(Element::Generic),
                ComputedStyle {
                    position: Position::Relative,
                    width: Length::px(500.0),
                    height: Length::px(400.0),
                    ..style
                },
            )
            .unwrap();
        tree.update_logical_width(cb);
        tree.update_logical_height(cb);
        (tree, cb)
    }

    fn absolute(tree: &mut LayoutTree, parent: BoxId, style: ComputedStyle) -> BoxId {
        tree.append_child(
            parent,
            BoxKind::Block,
            Some(Element::Generic),
            ComputedStyle {
                position: Position::Absolute,
                ..style
            },
        )
        .unwrap()
    }

    #[test]
    fn test_right_anchored_box_shrinks_to_fit() {
        let (mut tree, cb) = container(ComputedStyle::default());
        let id = absolute(
            &mut tree,
            cb,
            ComputedStyle {
                inset: insets(Length::Auto, Length::px(20.0), Length::Auto, Length::Auto),
                ..ComputedStyle::default()
            },
        );
        tree.geometry_mut(id).preferred_logical_widths =
            Some(PreferredLogicalWidths { min: 100.0, max: 100.0 });
        let computed = tree.compute_positioned_logical_width(id);
        assert_eq!(computed.extent, 100.0);
        assert_eq!(computed.position, 380.0);
    }

    #[test]
    fn test_both_offsets_stretch_auto_width() {
        let (mut tree, cb) = container(ComputedStyle {
            border: PhysicalSides::uniform(5.0),
            ..ComputedStyle::default()
        });
        let id = absolute(
            &mut tree,
            cb,
            ComputedStyle {
                inset: insets(Length::Auto, Length::px(30.0), Length::Auto, Length::px(20.0)),
                padding: PhysicalSides::uniform(Length::px(10.0)),
                ..ComputedStyle::default()
            },
        );
        let computed = tree.compute_positioned_logical_width(id);
        // 500 - 20 - 30 - 2 * 10 of padding, plus the padding back.
        assert_eq!(computed.extent, 450.0);
        assert_eq!(computed.position, 25.0, "offset from the padding edge");
    }

    #[test]
    fn test_over_constrained_ignores_right_in_ltr() {
        let (mut tree, cb) = container(ComputedStyle::default());
        let style = |right: f32| ComputedStyle {
            width: Length::px(100.0),
            inset: insets(Length::Auto, Length::px(right), Length::Auto, Length::px(50.0)),
            ..ComputedStyle::default()
        };
        let a = absolute(&mut tree, cb, style(400.0));
        let b = absolute(&mut tree, cb, style(10.0));
        assert_eq!(tree.compute_positioned_logical_width(a).position, 50.0);
        assert_eq!(tree.compute_positioned_logical_width(b).position, 50.0);
    }

    #[test]
    fn test_over_constrained_ignores_left_in_rtl() {
        let (mut tree, cb) = container(ComputedStyle {
            direction: Direction::Rtl,
            ..ComputedStyle::default()
        });
        let id = absolute(
            &mut tree,
            cb,
            ComputedStyle {
                width: Length::px(100.0),
                inset: insets(Length::Auto, Length::px(40.0), Length::Auto, Length::px(50.0)),
                ..ComputedStyle::default()
            },
        );
        assert_eq!(tree.compute_positioned_logical_width(id).position, 360.0);
    }

    #[test]
    fn test_auto_margins_center_between_offsets() {
        let (mut tree, cb) = container(ComputedStyle::default());
        let id = absolute(
            &mut tree,
            cb,
            ComputedStyle {
                width: Length::px(100.0),
                height: Length::px(100.0),
                inset: PhysicalSides::uniform(Length::px(0.0)),
                margin: PhysicalSides::uniform(Length::Auto),
                ..ComputedStyle::default()
            },
        );
        let width = tree.compute_positioned_logical_width(id);
        assert_eq!(width.position, 200.0);
        assert_eq!((width.margins.start, width.margins.end), (200.0, 200.0));
        let height = tree.compute_positioned_logical_height(id, 0.0);
        assert_eq!(height.position, 150.0);
        assert_eq!((height.margins.start, height.margins.end), (150.0, 150.0));
    }

    #[test]
    fn test_negative_auto_margins_fall_on_the_end_side() {
        let (mut tree, cb) = container(ComputedStyle::default());
        let id = absolute(
            &mut tree,
            cb,
            ComputedStyle {
                width: Length::px(600.0),
                inset: insets(Length::Auto, Length::px(0.0), Length::Auto, Length::px(0.0)),
                margin: PhysicalSides::uniform(Length::Auto),
                ..ComputedStyle::default()
            },
        );
        let computed = tree.compute_positioned_logical_width(id);
        assert_eq!((computed.margins.start, computed.margins.end), (0.0, -100.0));
    }

    #[test]
    fn test_min_width_wins_over_max_width() {
        let (mut tree, cb) = container(ComputedStyle::default());
        let id = absolute(
            &mut tree,
            cb,
            ComputedStyle {
                width: Length::px(50.0),
                min_width: Length::px(200.0),
                max_width: Length::px(100.0),
                inset: insets(Length::Auto, Length::Auto, Length::Auto, Length::px(0.0)),
                ..ComputedStyle::default()
            },
        );
        assert_eq!(tree.compute_positioned_logical_width(id).extent, 200.0);
    }

    #[test]
    fn test_static_position_fills_in_auto_offsets() {
        let (mut tree, cb) = container(ComputedStyle::default());
        let wrapper = tree
            .append_child(cb, BoxKind::Block, Some(Element::Generic), ComputedStyle::default())
            .unwrap();
        tree.geometry_mut(wrapper).frame = crate::box_model::Rect::new(15.0, 40.0, 300.0, 100.0);
        let id = absolute(&mut tree, wrapper, ComputedStyle::default());
        tree.geometry_mut(id).static_inline_position = 5.0;
        tree.geometry_mut(id).static_block_position = 7.0;

        let (left, right) = tree.compute_inline_static_distance(id, cb, 500.0);
        assert_eq!(left, Length::px(20.0));
        assert!(right.is_auto());
        let (top, _) = tree.compute_block_static_distance(id, cb);
        assert_eq!(top, Length::px(47.0));
    }

    #[test]
    fn test_top_and_bottom_solve_height() {
        let (mut tree, cb) = container(ComputedStyle::default());
        let id = absolute(
            &mut tree,
            cb,
            ComputedStyle {
                inset: insets(Length::px(50.0), Length::Auto, Length::percent(25.0), Length::px(0.0)),
                ..ComputedStyle::default()
            },
        );
        let computed = tree.compute_positioned_logical_height(id, 0.0);
        assert_eq!(computed.extent, 250.0);
        assert_eq!(computed.position, 50.0);
    }

    #[test]
    fn test_bottom_anchored_box_keeps_content_height() {
        let (mut tree, cb) = container(ComputedStyle::default());
        let id = absolute(
            &mut tree,
            cb,
            ComputedStyle {
                inset: insets(Length::Auto, Length::Auto, Length::px(10.0), Length::px(0.0)),
                ..ComputedStyle::default()
            },
        );
        let computed = tree.compute_positioned_logical_height(id, 60.0);
        assert_eq!(computed.extent, 60.0);
        assert_eq!(computed.position, 330.0);
    }

    #[test]
    fn test_fixed_box_uses_visible_viewport() {
        let settings = DocumentSettings {
            viewport_has_vertical_scrollbar: true,
            ..DocumentSettings::default()
        };
        let mut tree = LayoutTree::new(settings);
        let id = tree
            .append_child(
                BoxId::VIEW,
                BoxKind::Block,
                Some(Element::Generic),
                ComputedStyle {
                    position: Position::Fixed,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert_eq!(
            tree.containing_block_logical_width_for_positioned(id, BoxId::VIEW, true),
            785.0
        );
        tree.settings_mut().printing = true;
        assert_eq!(
            tree.containing_block_logical_width_for_positioned(id, BoxId::VIEW, true),
            0.0,
            "print layout measures the unlaid view"
        );
    }

    #[test]
    fn test_orthogonal_box_swaps_container_axes() {
        let (mut tree, cb) = container(ComputedStyle::default());
        let id = absolute(
            &mut tree,
            cb,
            ComputedStyle {
                writing_mode: WritingMode::VerticalLr,
                ..ComputedStyle::default()
            },
        );
        assert_eq!(tree.containing_block_logical_width_for_positioned(id, cb, true), 400.0);
        assert_eq!(tree.containing_block_logical_height_for_positioned(id, cb, true), 500.0);
    }

    #[test]
    fn test_relative_offsets() {
        let (mut tree, cb) = container(ComputedStyle {
            direction: Direction::Rtl,
            ..ComputedStyle::default()
        });
        let id = tree
            .append_child(
                cb,
                BoxKind::Block,
                Some(Element::Generic),
                ComputedStyle {
                    position: Position::Relative,
                    inset: insets(
                        Length::percent(10.0),
                        Length::px(30.0),
                        Length::px(5.0),
                        Length::px(20.0),
                    ),
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert_eq!(tree.offset_for_in_flow_position(id), (-30.0, 40.0));

        let auto_parent = tree
            .append_child(cb, BoxKind::Block, Some(Element::Generic), ComputedStyle::default())
            .unwrap();
        let inner = tree
            .append_child(
                auto_parent,
                BoxKind::Block,
                Some(Element::Generic),
                ComputedStyle {
                    position: Position::Relative,
                    inset: insets(Length::percent(10.0), Length::Auto, Length::px(5.0), Length::Auto),
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert_eq!(
            tree.offset_for_in_flow_position(inner),
            (0.0, -5.0),
            "percentage top needs a definite containing block height"
        );
    }
}
