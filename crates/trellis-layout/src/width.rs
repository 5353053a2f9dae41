//! Inline-axis sizing.
//!
//! [§ 10.3 Calculating widths and margins](https://www.w3.org/TR/CSS2/visudet.html#Computing_widths_and_margins)
//!
//! "The values of an element's 'width', 'margin-left', 'margin-right',
//! 'left' and 'right' properties as used for layout depend on the type of
//! box generated and on each other."
//!
//! Everything here works in logical terms: "width" is the inline size in
//! the box's own writing mode.

#[cfg(feature = "layout-trace")]
use tracing::trace;
use trellis_common::warning::warn_once;
use trellis_style::{
    FlexWrap, ItemPosition, Length, Overflow, minimum_value_for_length, value_for_length,
};

use crate::geometry::AvailableLogicalHeightType;
use crate::margins::{MarginDirection, MarginPair};
use crate::tree::{BoxId, BoxKind, ContainingBlockChain, Element, LayoutTree};

/// Natural size of replaced content that reports none.
pub const DEFAULT_REPLACED_SIZE: (f32, f32) = (300.0, 150.0);

/// Which sizing property a length came from.
///
/// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    /// `width` / `height`
    Main,
    /// `min-width` / `min-height`
    Min,
    /// `max-width` / `max-height`
    Max,
}

/// A resolved size along one axis, with the box's position and margins on
/// that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogicalExtent {
    /// Border-box size.
    pub extent: f32,
    /// Position of the border box in the containing block.
    pub position: f32,
    /// Start/end margins for the inline axis, before/after for the block
    /// axis.
    pub margins: MarginPair,
}

impl LayoutTree {
    /// Resolve the inline size and write it, with the inline position and
    /// margins, into the geometry record.
    pub fn update_logical_width(&mut self, id: BoxId) {
        let computed = self.compute_logical_width(id);
        let style = self.style(id);
        let (wm, dir) = (style.writing_mode, style.direction);
        let geometry = self.geometry_mut(id);
        geometry.set_logical_width(wm, computed.extent);
        geometry.set_logical_left(wm, computed.position);
        geometry.margin.set_start(wm, dir, computed.margins.start);
        geometry.margin.set_end(wm, dir, computed.margins.end);
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// Resolve the border-box inline size and the inline margins.
    /// Out-of-flow boxes go through the positioned equations instead.
    #[must_use]
    pub fn compute_logical_width(&self, id: BoxId) -> LogicalExtent {
        let style = self.style(id);
        let mut computed = LogicalExtent {
            extent: if style.contain.size {
                self.border_and_padding_logical_width(id)
            } else {
                self.logical_width(id)
            },
            position: self.logical_left(id),
            margins: MarginPair {
                start: self.margin_start(id),
                end: self.margin_end(id),
            },
        };

        // The initial containing block has the dimensions of the viewport.
        if self.is_layout_view(id) {
            computed.extent = self.settings().viewport_logical_width();
            return computed;
        }

        if self.is_out_of_flow_positioned(id) {
            return self.compute_positioned_logical_width(id);
        }

        let Some(cb) = self.containing_block(id) else {
            return computed;
        };

        // A flex container already decided this item's inline size.
        if let Some(width) = self.geometry(id).overrides.content_logical_width {
            if self.parent_box(id).is_some_and(|p| self.is_flexible_box(p)) {
                computed.extent = width + self.border_and_padding_logical_width(id);
                return computed;
            }
            warn_once(
                "trellis-layout",
                "content width override ignored: parent is not a flex container",
            );
        }

        let treat_as_replaced = self.should_compute_size_as_replaced(id)
            && (!self.is_grid_item(id) || !self.has_stretched_logical_width(id));
        let width_length = if treat_as_replaced {
            Length::px(self.compute_replaced_logical_width(id))
        } else {
            style.logical_width()
        };

        let container_logical_width = self.containing_block_logical_width_for_content(id).max(0.0);
        let has_perpendicular_containing_block = self.has_perpendicular_containing_block(id);

        // [§ 10.3.1 Inline, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-width)
        //
        // "The 'width' property does not apply. A computed value of 'auto' for
        // 'margin-left' or 'margin-right' becomes a used value of '0'."
        if self.is_inline(id) && !self.is_inline_block_or_inline_table(id) {
            computed.margins = MarginPair {
                start: minimum_value_for_length(style.margin_start(), container_logical_width),
                end: minimum_value_for_length(style.margin_end(), container_logical_width),
            };
            if treat_as_replaced {
                computed.extent = (value_for_length(width_length, 0.0)
                    + self.border_and_padding_logical_width(id))
                .max(self.min_preferred_logical_width(id));
            }
            return computed;
        }

        let container_width_in_inline_direction = if has_perpendicular_containing_block {
            self.perpendicular_containing_block_logical_height(id)
        } else {
            container_logical_width
        };

        if treat_as_replaced {
            computed.extent =
                value_for_length(width_length, 0.0) + self.border_and_padding_logical_width(id);
        } else if self.is_grid_item(id)
            && style.logical_width().is_auto()
            && style.logical_min_width().is_auto()
            && style.overflow_x == Overflow::Visible
            && container_width_in_inline_direction < self.min_preferred_logical_width(id)
        {
            // [§ 6.6 Automatic Minimum Size of Grid Items](https://www.w3.org/TR/css-grid-1/#min-size-auto)
            computed.extent = self.constrain_logical_width_by_min_max(
                id,
                self.min_preferred_logical_width(id),
                container_width_in_inline_direction,
                cb,
            );
        } else {
            let preferred = self.compute_logical_width_using(
                id,
                SizeKind::Main,
                style.logical_width(),
                container_width_in_inline_direction,
                cb,
            );
            computed.extent = self.constrain_logical_width_by_min_max(
                id,
                preferred,
                container_width_in_inline_direction,
                cb,
            );
        }

        computed.margins = self.compute_margins_for_direction(
            id,
            MarginDirection::Inline,
            cb,
            container_logical_width,
            computed.extent,
            style.margin_start(),
            style.margin_end(),
        );

        // An over- or under-constrained block-level box gives the difference
        // to its end margin: "If all of the above have a computed value
        // other than 'auto', the values are said to be 'over-constrained' and
        // one of the used values will have to be different from its computed
        // value."
        if !has_perpendicular_containing_block
            && container_logical_width != 0.0
            && container_logical_width
                != computed.extent + computed.margins.start + computed.margins.end
            && !self.is_floating(id)
            && !self.is_inline(id)
            && !self.is_flexible_box(cb)
            && !self.is_layout_grid(cb)
        {
            let new_margin = container_logical_width
                - computed.extent
                - self.margin_start_for_child(cb, id);
            let has_inverted_direction = self.style(cb).is_left_to_right_direction()
                != style.is_left_to_right_direction();
            if has_inverted_direction {
                computed.margins.start = new_margin;
            } else {
                computed.margins.end = new_margin;
            }
        }

        // Autosized list markers grow with the text; shift the list's
        // content so they are not cut off.
        if style.text_autosizing_multiplier != 1.0
            && style.margin_start().is_fixed()
            && matches!(self.element(id), Some(Element::Ol | Element::Ul))
        {
            let adjusted_margin = (1.0 - 1.0 / style.text_autosizing_multiplier)
                * self.max_list_marker_logical_width(id);
            let has_inverted_direction = self.style(cb).is_left_to_right_direction()
                != style.is_left_to_right_direction();
            if has_inverted_direction {
                computed.margins.end += adjusted_margin;
            } else {
                computed.margins.start += adjusted_margin;
            }
        }

        #[cfg(feature = "layout-trace")]
        trace!(
            target: "trellis::width",
            ?id,
            extent = computed.extent,
            margin_start = computed.margins.start,
            margin_end = computed.margins.end,
            "computed logical width"
        );
        computed
    }

    fn max_list_marker_logical_width(&self, list: BoxId) -> f32 {
        self.children(list)
            .iter()
            .filter(|&&item| self.kind(item) == BoxKind::ListItem)
            .filter_map(|&item| {
                self.children(item)
                    .iter()
                    .copied()
                    .find(|&c| self.kind(c) == BoxKind::ListMarker)
            })
            .map(|marker| self.logical_width(marker))
            .fold(0.0_f32, f32::max)
    }

    /// [§ 4.2 Automatic Block Sizes](https://www.w3.org/TR/css-sizing-3/#stretch-fit-size)
    ///
    /// The stretch-fit size: available inline space minus the box's
    /// margins, never negative. Returns the resolved margins too.
    #[must_use]
    pub fn fill_available_measure(&self, id: BoxId, available: f32) -> (f32, MarginPair) {
        let style = self.style(id);
        let margins = MarginPair {
            start: minimum_value_for_length(style.margin_start(), available),
            end: minimum_value_for_length(style.margin_end(), available),
        };
        ((available - margins.start - margins.end).max(0.0), margins)
    }

    /// [§ 5.1 Intrinsic Sizes](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
    ///
    /// Border-box inline size for an intrinsic sizing keyword.
    #[must_use]
    pub fn compute_intrinsic_logical_width_using(
        &self,
        id: BoxId,
        length: Length,
        available: f32,
        border_and_padding: f32,
    ) -> f32 {
        let min = self.min_preferred_logical_width(id);
        let max = self.max_preferred_logical_width(id);
        match length {
            Length::FillAvailable => border_and_padding.max(self.fill_available_measure(id, available).0),
            Length::MinContent => min + border_and_padding,
            Length::MaxContent => max + border_and_padding,
            // "fit-content: min(max-content, max(min-content, stretch-fit))"
            Length::FitContent => (min + border_and_padding)
                .max((max + border_and_padding).min(self.fill_available_measure(id, available).0)),
            _ => 0.0,
        }
    }

    /// Border-box inline size for one sizing property.
    ///
    /// `auto` fills the available space (narrowed next to floats), unless
    /// the box sizes to fit its content, in which case it shrinks to fit.
    #[must_use]
    pub fn compute_logical_width_using(
        &self,
        id: BoxId,
        kind: SizeKind,
        length: Length,
        available: f32,
        containing_block: BoxId,
    ) -> f32 {
        if kind == SizeKind::Min && length.is_auto() {
            return self.adjust_border_box_logical_width_for_box_sizing(id, 0.0);
        }

        if !length.is_intrinsic_or_auto() {
            return self
                .adjust_border_box_logical_width_for_box_sizing(id, value_for_length(length, available));
        }

        if length.is_intrinsic() {
            return self.compute_intrinsic_logical_width_using(
                id,
                length,
                available,
                self.border_and_padding_logical_width(id),
            );
        }

        let (mut result, margins) = self.fill_available_measure(id, available);
        if self.shrink_to_avoid_floats(id) && self.contains_floats(containing_block) {
            result = result.min(self.shrink_logical_width_to_avoid_floats(
                id,
                margins.start,
                margins.end,
                containing_block,
            ));
        }

        if kind == SizeKind::Main && self.sizes_logical_width_to_fit_content(id, length) {
            return self
                .min_preferred_logical_width(id)
                .max(self.max_preferred_logical_width(id).min(result));
        }
        result
    }

    /// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    ///
    /// "1. The tentative used width is calculated (without 'min-width' and
    /// 'max-width') ...
    /// 2. If the tentative used width is greater than 'max-width', the rules
    /// above are applied again using the computed value of 'max-width' as
    /// the computed value for 'width'.
    /// 3. If the resulting width is smaller than 'min-width', the rules above
    /// are applied again, but this time using the value of 'min-width' as the
    /// computed value for 'width'."
    #[must_use]
    pub fn constrain_logical_width_by_min_max(
        &self,
        id: BoxId,
        width: f32,
        available: f32,
        containing_block: BoxId,
    ) -> f32 {
        let style = self.style(id);
        let mut width = width;
        if !style.logical_max_width().is_max_size_none() {
            width = width.min(self.compute_logical_width_using(
                id,
                SizeKind::Max,
                style.logical_max_width(),
                available,
                containing_block,
            ));
        }
        width.max(self.compute_logical_width_using(
            id,
            SizeKind::Min,
            style.logical_min_width(),
            available,
            containing_block,
        ))
    }

    /// Inline size left for a float-avoiding box next to the floats of its
    /// containing block.
    ///
    /// Positive margins that reach past a float are partly "consumed" by
    /// it: only the part of the margin beyond the float still shrinks the
    /// box. Negative margins are never consumed.
    #[must_use]
    pub fn shrink_logical_width_to_avoid_floats(
        &self,
        id: BoxId,
        margin_start: f32,
        margin_end: f32,
        containing_block: BoxId,
    ) -> f32 {
        let cb = containing_block;
        let top = self.logical_top(id);
        let height = self.logical_height_for_child(cb, id);
        let width = self.logical_width(cb);

        // Both sides measured inward from their own border edge.
        let (content_left, content_right) = self.content_offsets(cb);
        let (line_left, line_right) = self.line_offsets(cb, top, height);
        let (mut start_content, mut end_content) = (content_left, width - content_right);
        let (mut start_line, mut end_line) = (line_left, width - line_right);
        if !self.style(cb).is_left_to_right_direction() {
            std::mem::swap(&mut start_content, &mut end_content);
            std::mem::swap(&mut start_line, &mut end_line);
        }

        let line_width = self.available_logical_width_for_line(cb, top, height);
        if start_content == start_line && end_content == end_line {
            return line_width - margin_start - margin_end;
        }

        let mut result = line_width - margin_start.max(0.0) - margin_end.max(0.0);
        result += portion_of_margin_not_consumed_by_float(margin_start, start_content, start_line);
        result += portion_of_margin_not_consumed_by_float(margin_end, end_content, end_line);
        result
    }

    /// The child's block-axis size as its containing block sees it.
    #[must_use]
    pub fn logical_height_for_child(&self, containing_block: BoxId, child: BoxId) -> f32 {
        if self.is_perpendicular_to(containing_block, child) {
            self.logical_width(child)
        } else {
            self.logical_height(child)
        }
    }

    /// `auto` width means shrink-to-fit rather than fill-available.
    ///
    /// Floats, inline blocks and orthogonal flows shrink to fit; so do flex
    /// and grid items that are not stretched, and form controls outside a
    /// stretching column flex container.
    #[must_use]
    pub fn sizes_logical_width_to_fit_content(&self, id: BoxId, length: Length) -> bool {
        if self.is_floating(id) || self.is_inline_block_or_inline_table(id) {
            return true;
        }

        if self.is_grid_item(id) {
            return !self.has_stretched_logical_width(id);
        }

        if let Some(parent) = self.parent_box(id).filter(|&p| self.is_flexible_box(p)) {
            let parent_style = self.style(parent);
            if !parent_style.is_column_flex_direction() || parent_style.flex_wrap != FlexWrap::Nowrap
            {
                return true;
            }
            if !self.column_flex_item_has_stretch_alignment(id) {
                return true;
            }
        }

        if length.is_auto()
            && !self.is_stretching_column_flex_item(id)
            && self.auto_width_should_fit_content(id)
        {
            return true;
        }

        self.has_perpendicular_containing_block(id)
    }

    /// The resolved `align-self` of an item is `stretch`.
    fn column_flex_item_has_stretch_alignment(&self, id: BoxId) -> bool {
        let style = self.style(id);
        if style.margin_start().is_auto() || style.margin_end().is_auto() {
            return false;
        }
        let Some(parent) = self.parent_box(id) else {
            return false;
        };
        style.resolve_alignment(self.style(parent), ItemPosition::Stretch) == ItemPosition::Stretch
    }

    /// Single-line column flex containers stretch their items across.
    #[must_use]
    pub fn is_stretching_column_flex_item(&self, id: BoxId) -> bool {
        self.parent_box(id).is_some_and(|p| {
            let style = self.style(p);
            self.is_flexible_box(p)
                && style.flex_wrap == FlexWrap::Nowrap
                && style.is_column_flex_direction()
                && self.column_flex_item_has_stretch_alignment(id)
        })
    }

    /// The box is stretched along its inline axis by its container's
    /// alignment.
    ///
    /// [§ 6.1 'justify-self'](https://www.w3.org/TR/css-align-3/#justify-self-property)
    /// applies when the container shares the box's inline axis;
    /// 'align-self' when it is orthogonal.
    #[must_use]
    pub fn has_stretched_logical_width(&self, id: BoxId) -> bool {
        let style = self.style(id);
        if !style.logical_width().is_auto()
            || style.margin_start().is_auto()
            || style.margin_end().is_auto()
        {
            return false;
        }
        let Some(cb) = self.containing_block(id) else {
            return false;
        };
        let normal = self.self_alignment_normal_behavior(cb);
        let cb_style = self.style(cb);
        let resolved = if self.is_perpendicular_to(cb, id) {
            style.resolve_alignment(cb_style, normal)
        } else {
            style.resolve_justification(cb_style, normal)
        };
        resolved == ItemPosition::Stretch
    }

    /// What `normal` means for items of `container`: flex and grid items
    /// stretch, everything else starts.
    #[must_use]
    pub fn self_alignment_normal_behavior(&self, container: BoxId) -> ItemPosition {
        if self.is_flexible_box(container) || self.is_layout_grid(container) {
            ItemPosition::Stretch
        } else {
            ItemPosition::Start
        }
    }

    /// [§ 10.3.5 Floating, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#float-width)
    ///
    /// "Then the shrink-to-fit width is: min(max(preferred minimum width,
    /// available width), preferred width)."
    ///
    /// The result is a content-box size when `border_and_padding` is the
    /// box's border plus padding.
    #[must_use]
    pub fn shrink_to_fit_logical_width(&self, id: BoxId, available: f32, border_and_padding: f32) -> f32 {
        let preferred = self.max_preferred_logical_width(id) - border_and_padding;
        let preferred_min = self.min_preferred_logical_width(id) - border_and_padding;
        preferred_min.max(available).min(preferred)
    }

    /// Block size of an orthogonal containing block, used as this box's
    /// inline space.
    ///
    /// Only fixed heights are honored; anything else falls back to the
    /// available height, capped by the visible viewport.
    #[must_use]
    pub fn perpendicular_containing_block_logical_height(&self, id: BoxId) -> f32 {
        if let Some(height) = self.geometry(id).overrides.containing_block_logical_height {
            return height;
        }
        let Some(cb) = self.containing_block(id) else {
            return self.settings().viewport_logical_height();
        };
        if let Some(height) = self.geometry(cb).overrides.content_logical_height {
            return height;
        }

        let cb_style = self.style(cb);
        let height = cb_style.logical_height();
        if let Length::Fixed(value) = height {
            return self.adjust_content_box_logical_height_for_box_sizing(cb, value);
        }

        let (visible_width, visible_height) = self.settings().visible_viewport_size();
        let fill_fallback = if cb_style.is_horizontal_writing_mode() {
            visible_height
        } else {
            visible_width
        };
        let fill_available =
            self.available_logical_height(cb, AvailableLogicalHeightType::ExcludeMarginBorderPadding);
        fill_available.min(fill_fallback)
    }

    /// Natural inline size of replaced content.
    #[must_use]
    pub fn intrinsic_logical_width(&self, id: BoxId) -> f32 {
        let (width, height) = self.geometry(id).intrinsic_size.unwrap_or(DEFAULT_REPLACED_SIZE);
        if self.is_horizontal_writing_mode(id) {
            width
        } else {
            height
        }
    }

    /// [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
    ///
    /// Content-box inline size of replaced content, clamped by min and max.
    #[must_use]
    pub fn compute_replaced_logical_width(&self, id: BoxId) -> f32 {
        let width = self.compute_replaced_logical_width_using(id, SizeKind::Main, self.style(id).logical_width());
        self.compute_replaced_logical_width_respecting_min_max_width(id, width)
    }

    /// Clamp a replaced inline size by `min-width` and `max-width`.
    #[must_use]
    pub fn compute_replaced_logical_width_respecting_min_max_width(&self, id: BoxId, width: f32) -> f32 {
        let style = self.style(id);
        let min = self.compute_replaced_logical_width_using(id, SizeKind::Min, style.logical_min_width());
        let max = if style.logical_max_width().is_max_size_none() {
            width
        } else {
            self.compute_replaced_logical_width_using(id, SizeKind::Max, style.logical_max_width())
        };
        min.max(width.min(max))
    }

    /// Content-box inline size of replaced content for one sizing property.
    #[must_use]
    pub fn compute_replaced_logical_width_using(&self, id: BoxId, kind: SizeKind, length: Length) -> f32 {
        if kind == SizeKind::Min && length.is_auto() {
            return self.adjust_content_box_logical_width_for_box_sizing(id, 0.0);
        }
        let bp = self.border_and_padding_logical_width(id);
        match length {
            Length::Fixed(value) => self.adjust_content_box_logical_width_for_box_sizing(id, value),
            Length::MinContent | Length::MaxContent => {
                self.compute_intrinsic_logical_width_using(id, length, 0.0, bp) - bp
            }
            Length::FitContent | Length::FillAvailable | Length::Percent(_) | Length::Calc { .. } => {
                let cw = if self.is_out_of_flow_positioned(id) {
                    self.container(id)
                        .map_or(0.0, |c| self.containing_block_logical_width_for_positioned(id, c, true))
                } else {
                    self.containing_block_logical_width_for_content(id)
                };
                if length.is_intrinsic() {
                    return self.compute_intrinsic_logical_width_using(id, length, cw, bp) - bp;
                }
                let container_length = self
                    .containing_block(id)
                    .map_or(Length::Auto, |cb| self.style(cb).logical_width());
                if cw > 0.0
                    || (cw == 0.0 && (container_length.is_fixed() || container_length.has_percent()))
                {
                    return self.adjust_content_box_logical_width_for_box_sizing(
                        id,
                        minimum_value_for_length(length, cw),
                    );
                }
                0.0
            }
            Length::Auto | Length::MaxSizeNone => self.intrinsic_logical_width(id),
        }
    }
}

/// How much of a positive margin still counts once a float has taken up
/// part of it.
fn portion_of_margin_not_consumed_by_float(child_margin: f32, content_side: f32, offset: f32) -> f32 {
    if child_margin <= 0.0 {
        return 0.0;
    }
    if offset > content_side + child_margin {
        return child_margin;
    }
    offset - content_side
}
