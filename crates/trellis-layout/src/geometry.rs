//! Per-box geometry record and the measures derived from it.
//!
//! [§ 8.1 Box dimensions](https://www.w3.org/TR/CSS2/box.html#box-dimensions)
//!
//! The record stores what layout writes: the frame rect, resolved margins,
//! and the side inputs parents hand to their children (override sizes,
//! static positions). Border widths are read straight from the computed
//! style; padding is resolved on demand against the containing block.
//!
//! Logical accessors map onto the physical frame through the box's own
//! writing mode. In vertical modes the inline axis is the physical
//! vertical axis and "logical left" is the physical top.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use trellis_style::{BoxSizing, Direction, WritingMode, minimum_value_for_length};

use crate::box_model::{EdgeSizes, Rect};
use crate::float::FloatExclusions;
use crate::overflow::OverflowModel;
use crate::tree::{BoxId, ContainingBlockChain, LayoutTree};

/// [§ 5.1 Intrinsic Sizes](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
///
/// Min- and max-content contributions along the inline axis, border box
/// included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferredLogicalWidths {
    /// The min-content inline size.
    pub min: f32,
    /// The max-content inline size.
    pub max: f32,
}

/// Sizes imposed on a box by its flex or grid parent.
///
/// The parent sets a slot before laying the child out and clears it once
/// the value no longer applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeOverrides {
    /// Forced content-box inline size.
    pub content_logical_width: Option<f32>,
    /// Forced content-box block size.
    pub content_logical_height: Option<f32>,
    /// Replaces the containing block's content inline size.
    pub containing_block_logical_width: Option<f32>,
    /// Replaces the containing block's content block size.
    pub containing_block_logical_height: Option<f32>,
    /// The block size a stretching flex container gives this item for the
    /// purpose of resolving its children's percentages.
    pub stretched_flex_height: Option<f32>,
}

impl SizeOverrides {
    /// Drop every override.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Percentage-height dependency edges.
///
/// A box whose percentage height was resolved through a containing block is
/// that block's percent-height descendant; the block must re-run the box's
/// layout once its own height is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PercentHeightLinks {
    /// Boxes registered with this box as a percent-height container.
    pub descendants: BTreeSet<BoxId>,
    /// Containers this box is registered with.
    pub containers: BTreeSet<BoxId>,
}

/// Mutable layout state of one box.
#[derive(Debug, Clone, Default)]
pub struct BoxGeometry {
    /// Border box in the container's coordinate space.
    pub frame: Rect,
    /// Resolved margins, keyed by physical side.
    pub margin: EdgeSizes,
    /// Intrinsic inline sizes. `None` until the intrinsic pass fills them;
    /// every layout pass recomputes them.
    pub preferred_logical_widths: Option<PreferredLogicalWidths>,
    /// Intrinsic inline sizes measured by a content pass layout does not
    /// run (inline text, table columns). When set, the intrinsic pass takes
    /// them instead of summing the children.
    pub measured_logical_widths: Option<PreferredLogicalWidths>,
    /// Sizes imposed by a flex or grid parent.
    pub overrides: SizeOverrides,
    /// Extra inline-axis shift applied after positioned placement.
    pub extra_inline_offset: f32,
    /// Extra block-axis shift applied after positioned placement.
    pub extra_block_offset: f32,
    /// Space inserted before the box to push it to the next fragmentainer.
    pub pagination_strut: f32,
    /// How far the box must move to start on the next page, when it does
    /// not fit in the remaining space of the current one.
    pub offset_to_next_page: f32,
    /// Distance from the parent's inline-start border edge to where the
    /// box's margin edge would have been in normal flow.
    pub static_inline_position: f32,
    /// Block position the box would have had in normal flow, in the
    /// parent's border-box coordinates.
    pub static_block_position: f32,
    /// Physical `(dx, dy)` shift from relative positioning.
    pub in_flow_offset: (f32, f32),
    /// Physical `(x, y)` scroll position of a scroll container.
    pub scroll_offset: (f32, f32),
    /// Width of the vertical scrollbar, if one is shown.
    pub vertical_scrollbar_width: f32,
    /// Height of the horizontal scrollbar, if one is shown.
    pub horizontal_scrollbar_height: f32,
    /// Content-box block size the content asked for before the height was
    /// resolved.
    pub intrinsic_content_logical_height: Option<f32>,
    /// Natural `(width, height)` of replaced content.
    pub intrinsic_size: Option<(f32, f32)>,
    /// Percentage-height dependency edges.
    pub percent_height: PercentHeightLinks,
    /// Floats placed in this block's formatting context.
    pub floats: FloatExclusions,
    /// Overflow rects, allocated once something overflows.
    pub overflow: Option<OverflowModel>,
}

impl BoxGeometry {
    /// Inline-axis size of the border box.
    #[must_use]
    pub const fn logical_width(&self, wm: WritingMode) -> f32 {
        if wm.is_horizontal() {
            self.frame.width
        } else {
            self.frame.height
        }
    }

    /// Block-axis size of the border box.
    #[must_use]
    pub const fn logical_height(&self, wm: WritingMode) -> f32 {
        if wm.is_horizontal() {
            self.frame.height
        } else {
            self.frame.width
        }
    }

    /// Inline-axis position in the container.
    #[must_use]
    pub const fn logical_left(&self, wm: WritingMode) -> f32 {
        if wm.is_horizontal() {
            self.frame.x
        } else {
            self.frame.y
        }
    }

    /// Block-axis position in the container.
    #[must_use]
    pub const fn logical_top(&self, wm: WritingMode) -> f32 {
        if wm.is_horizontal() {
            self.frame.y
        } else {
            self.frame.x
        }
    }

    /// Set the inline-axis size.
    pub const fn set_logical_width(&mut self, wm: WritingMode, value: f32) {
        if wm.is_horizontal() {
            self.frame.width = value;
        } else {
            self.frame.height = value;
        }
    }

    /// Set the block-axis size.
    pub const fn set_logical_height(&mut self, wm: WritingMode, value: f32) {
        if wm.is_horizontal() {
            self.frame.height = value;
        } else {
            self.frame.width = value;
        }
    }

    /// Set the inline-axis position.
    pub const fn set_logical_left(&mut self, wm: WritingMode, value: f32) {
        if wm.is_horizontal() {
            self.frame.x = value;
        } else {
            self.frame.y = value;
        }
    }

    /// Set the block-axis position.
    pub const fn set_logical_top(&mut self, wm: WritingMode, value: f32) {
        if wm.is_horizontal() {
            self.frame.y = value;
        } else {
            self.frame.x = value;
        }
    }

    /// Block-start margin in `wm`.
    #[must_use]
    pub const fn margin_before(&self, wm: WritingMode) -> f32 {
        self.margin.before(wm)
    }

    /// Block-end margin in `wm`.
    #[must_use]
    pub const fn margin_after(&self, wm: WritingMode) -> f32 {
        self.margin.after(wm)
    }

    /// Inline-start margin in `wm` / `dir`.
    #[must_use]
    pub const fn margin_start(&self, wm: WritingMode, dir: Direction) -> f32 {
        self.margin.start(wm, dir)
    }

    /// Inline-end margin in `wm` / `dir`.
    #[must_use]
    pub const fn margin_end(&self, wm: WritingMode, dir: Direction) -> f32 {
        self.margin.end(wm, dir)
    }

    /// Min-content inline size, or 0 before the intrinsic pass.
    #[must_use]
    pub fn min_preferred_logical_width(&self) -> f32 {
        self.preferred_logical_widths.map_or(0.0, |p| p.min)
    }

    /// Max-content inline size, or 0 before the intrinsic pass.
    #[must_use]
    pub fn max_preferred_logical_width(&self) -> f32 {
        self.preferred_logical_widths.map_or(0.0, |p| p.max)
    }
}

/// Which part of the box an available height includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailableLogicalHeightType {
    /// The containing block's content height as is.
    IncludeMarginBorderPadding,
    /// Minus this box's own block-axis margins, border and padding.
    ExcludeMarginBorderPadding,
}

impl LayoutTree {
    /// The frame in the box's own writing mode: inline-axis size.
    #[must_use]
    pub fn logical_width(&self, id: BoxId) -> f32 {
        self.geometry(id).logical_width(self.style(id).writing_mode)
    }

    /// Block-axis size of the border box.
    #[must_use]
    pub fn logical_height(&self, id: BoxId) -> f32 {
        self.geometry(id).logical_height(self.style(id).writing_mode)
    }

    /// Inline-axis position in the container.
    #[must_use]
    pub fn logical_left(&self, id: BoxId) -> f32 {
        self.geometry(id).logical_left(self.style(id).writing_mode)
    }

    /// Block-axis position in the container.
    #[must_use]
    pub fn logical_top(&self, id: BoxId) -> f32 {
        self.geometry(id).logical_top(self.style(id).writing_mode)
    }

    /// Block-start margin in the box's own flow.
    #[must_use]
    pub fn margin_before(&self, id: BoxId) -> f32 {
        self.geometry(id).margin_before(self.style(id).writing_mode)
    }

    /// Block-end margin in the box's own flow.
    #[must_use]
    pub fn margin_after(&self, id: BoxId) -> f32 {
        self.geometry(id).margin_after(self.style(id).writing_mode)
    }

    /// Inline-start margin in the box's own flow.
    #[must_use]
    pub fn margin_start(&self, id: BoxId) -> f32 {
        let style = self.style(id);
        self.geometry(id).margin_start(style.writing_mode, style.direction)
    }

    /// Inline-end margin in the box's own flow.
    #[must_use]
    pub fn margin_end(&self, id: BoxId) -> f32 {
        let style = self.style(id);
        self.geometry(id).margin_end(style.writing_mode, style.direction)
    }

    /// `child`'s inline-start margin in `container`'s flow.
    #[must_use]
    pub fn margin_start_for_child(&self, container: BoxId, child: BoxId) -> f32 {
        let style = self.style(container);
        self.geometry(child).margin_start(style.writing_mode, style.direction)
    }

    // [§ 8.5 Border properties](https://www.w3.org/TR/CSS2/box.html#border-properties)

    /// Border widths keyed by physical side.
    #[must_use]
    pub fn border(&self, id: BoxId) -> EdgeSizes {
        self.style(id).border
    }

    /// Block-start border width.
    #[must_use]
    pub fn border_before(&self, id: BoxId) -> f32 {
        let style = self.style(id);
        style.border.before(style.writing_mode)
    }

    /// Block-end border width.
    #[must_use]
    pub fn border_after(&self, id: BoxId) -> f32 {
        let style = self.style(id);
        style.border.after(style.writing_mode)
    }

    /// Border on the physical left in horizontal modes, the top in
    /// vertical ones.
    #[must_use]
    pub fn border_logical_left(&self, id: BoxId) -> f32 {
        let style = self.style(id);
        style.border.logical_left(style.writing_mode)
    }

    /// Border on the physical right in horizontal modes, the bottom in
    /// vertical ones.
    #[must_use]
    pub fn border_logical_right(&self, id: BoxId) -> f32 {
        let style = self.style(id);
        style.border.logical_right(style.writing_mode)
    }

    /// [§ 8.4 Padding properties](https://www.w3.org/TR/CSS2/box.html#padding-properties)
    ///
    /// "The percentage is calculated with respect to the width of the
    /// generated box's containing block, even for 'padding-top' and
    /// 'padding-bottom'."
    #[must_use]
    pub fn padding(&self, id: BoxId) -> EdgeSizes {
        let reference = if self.is_layout_view(id) {
            0.0
        } else {
            self.containing_block_logical_width_for_content(id)
        };
        self.style(id)
            .padding
            .map(|len| minimum_value_for_length(len, reference))
    }

    /// Inline-axis border plus padding.
    #[must_use]
    pub fn border_and_padding_logical_width(&self, id: BoxId) -> f32 {
        let style = self.style(id);
        let padding = self.padding(id);
        if style.is_horizontal_writing_mode() {
            style.border.left + style.border.right + padding.left + padding.right
        } else {
            style.border.top + style.border.bottom + padding.top + padding.bottom
        }
    }

    /// Block-axis border plus padding.
    #[must_use]
    pub fn border_and_padding_logical_height(&self, id: BoxId) -> f32 {
        let style = self.style(id);
        let padding = self.padding(id);
        if style.is_horizontal_writing_mode() {
            style.border.top + style.border.bottom + padding.top + padding.bottom
        } else {
            style.border.left + style.border.right + padding.left + padding.right
        }
    }

    /// Block-axis padding.
    #[must_use]
    pub fn padding_logical_height(&self, id: BoxId) -> f32 {
        let wm = self.style(id).writing_mode;
        let padding = self.padding(id);
        padding.before(wm) + padding.after(wm)
    }

    /// Space taken by the scrollbar that sits across the inline axis.
    #[must_use]
    pub fn scrollbar_logical_width(&self, id: BoxId) -> f32 {
        let g = self.geometry(id);
        if self.is_horizontal_writing_mode(id) {
            g.vertical_scrollbar_width
        } else {
            g.horizontal_scrollbar_height
        }
    }

    /// Space taken by the scrollbar that sits across the block axis.
    #[must_use]
    pub fn scrollbar_logical_height(&self, id: BoxId) -> f32 {
        let g = self.geometry(id);
        if self.is_horizontal_writing_mode(id) {
            g.horizontal_scrollbar_height
        } else {
            g.vertical_scrollbar_width
        }
    }

    /// Content-box inline size.
    #[must_use]
    pub fn content_logical_width(&self, id: BoxId) -> f32 {
        (self.logical_width(id)
            - self.border_and_padding_logical_width(id)
            - self.scrollbar_logical_width(id))
        .max(0.0)
    }

    /// Content-box block size.
    #[must_use]
    pub fn content_logical_height(&self, id: BoxId) -> f32 {
        (self.logical_height(id)
            - self.border_and_padding_logical_height(id)
            - self.scrollbar_logical_height(id))
        .max(0.0)
    }

    /// Inline space available to in-flow children.
    #[must_use]
    pub fn available_logical_width(&self, id: BoxId) -> f32 {
        self.content_logical_width(id)
    }

    /// Padding-box inline size minus the scrollbar.
    #[must_use]
    pub fn client_logical_width(&self, id: BoxId) -> f32 {
        (self.logical_width(id)
            - self.border_logical_left(id)
            - self.border_logical_right(id)
            - self.scrollbar_logical_width(id))
        .max(0.0)
    }

    /// Padding-box block size minus the scrollbar.
    #[must_use]
    pub fn client_logical_height(&self, id: BoxId) -> f32 {
        (self.logical_height(id)
            - self.border_before(id)
            - self.border_after(id)
            - self.scrollbar_logical_height(id))
        .max(0.0)
    }

    /// [CSSOM View § 6 'clientWidth'](https://drafts.csswg.org/cssom-view/#dom-element-clientwidth)
    #[must_use]
    pub fn client_width(&self, id: BoxId) -> f32 {
        let g = self.geometry(id);
        let border = self.border(id);
        (g.frame.width - border.left - border.right - g.vertical_scrollbar_width).max(0.0)
    }

    /// [CSSOM View § 6 'clientHeight'](https://drafts.csswg.org/cssom-view/#dom-element-clientheight)
    #[must_use]
    pub fn client_height(&self, id: BoxId) -> f32 {
        let g = self.geometry(id);
        let border = self.border(id);
        (g.frame.height - border.top - border.bottom - g.horizontal_scrollbar_height).max(0.0)
    }

    /// [CSSOM View § 6 'scrollWidth'](https://drafts.csswg.org/cssom-view/#dom-element-scrollwidth)
    ///
    /// Right-to-left boxes overflow to the left, so their scroll width
    /// grows with overflow past the left border edge.
    #[must_use]
    pub fn scroll_width(&self, id: BoxId) -> f32 {
        let overflow = self.layout_overflow_rect(id);
        let border_left = self.border(id).left;
        let client = self.client_width(id);
        if self.style(id).is_left_to_right_direction() {
            client.max(overflow.max_x() - border_left)
        } else {
            client - (overflow.x - border_left).min(0.0)
        }
    }

    /// [CSSOM View § 6 'scrollHeight'](https://drafts.csswg.org/cssom-view/#dom-element-scrollheight)
    #[must_use]
    pub fn scroll_height(&self, id: BoxId) -> f32 {
        let overflow = self.layout_overflow_rect(id);
        self.client_height(id)
            .max(overflow.max_y() - self.border(id).top)
    }

    /// Min-content inline size, or 0 before the intrinsic pass.
    #[must_use]
    pub fn min_preferred_logical_width(&self, id: BoxId) -> f32 {
        self.geometry(id).min_preferred_logical_width()
    }

    /// Max-content inline size, or 0 before the intrinsic pass.
    #[must_use]
    pub fn max_preferred_logical_width(&self, id: BoxId) -> f32 {
        self.geometry(id).max_preferred_logical_width()
    }

    // [§ 4.4 'box-sizing'](https://www.w3.org/TR/css-sizing-3/#box-sizing)
    //
    // "content-box: ... the width and height properties ... include only the
    // content. Border and padding are laid out outside of the specified
    // width and height."
    // "border-box: ... the width and height properties include the padding
    // and border ... the content width and height is calculated by
    // subtracting the border and padding widths ... (floored at 0)"

    /// Turn a sizing-property value into a border-box inline size.
    #[must_use]
    pub fn adjust_border_box_logical_width_for_box_sizing(&self, id: BoxId, width: f32) -> f32 {
        let bp = self.border_and_padding_logical_width(id);
        match self.style(id).box_sizing {
            BoxSizing::ContentBox => width + bp,
            BoxSizing::BorderBox => width.max(bp),
        }
    }

    /// Turn a sizing-property value into a border-box block size.
    #[must_use]
    pub fn adjust_border_box_logical_height_for_box_sizing(&self, id: BoxId, height: f32) -> f32 {
        let bp = self.border_and_padding_logical_height(id);
        match self.style(id).box_sizing {
            BoxSizing::ContentBox => height + bp,
            BoxSizing::BorderBox => height.max(bp),
        }
    }

    /// Turn a sizing-property value into a content-box inline size.
    #[must_use]
    pub fn adjust_content_box_logical_width_for_box_sizing(&self, id: BoxId, width: f32) -> f32 {
        let width = match self.style(id).box_sizing {
            BoxSizing::ContentBox => width,
            BoxSizing::BorderBox => width - self.border_and_padding_logical_width(id),
        };
        width.max(0.0)
    }

    /// Turn a sizing-property value into a content-box block size.
    #[must_use]
    pub fn adjust_content_box_logical_height_for_box_sizing(&self, id: BoxId, height: f32) -> f32 {
        let height = match self.style(id).box_sizing {
            BoxSizing::ContentBox => height,
            BoxSizing::BorderBox => height - self.border_and_padding_logical_height(id),
        };
        height.max(0.0)
    }

    /// Inline size percentages of an in-flow box resolve against: the
    /// override if a parent set one, the client box for out-of-flow boxes,
    /// the content box otherwise.
    #[must_use]
    pub fn containing_block_logical_width_for_content(&self, id: BoxId) -> f32 {
        if let Some(width) = self.geometry(id).overrides.containing_block_logical_width {
            return width;
        }
        let Some(cb) = self.containing_block(id) else {
            return self.settings().viewport_logical_width();
        };
        if self.is_out_of_flow_positioned(id) {
            self.client_logical_width(cb)
        } else {
            self.available_logical_width(cb)
        }
    }

    /// Block size available in the containing block.
    #[must_use]
    pub fn containing_block_logical_height_for_content(
        &self,
        id: BoxId,
        height_type: AvailableLogicalHeightType,
    ) -> f32 {
        if let Some(height) = self.geometry(id).overrides.containing_block_logical_height {
            return height;
        }
        match self.containing_block(id) {
            Some(cb) => self.available_logical_height(cb, height_type),
            None => self.settings().viewport_logical_height(),
        }
    }

    /// The containing block's inline space next to floats at the box's
    /// current block position.
    #[must_use]
    pub fn containing_block_available_line_width(&self, id: BoxId) -> f32 {
        let Some(cb) = self.containing_block(id) else {
            return 0.0;
        };
        let height =
            self.available_logical_height(id, AvailableLogicalHeightType::IncludeMarginBorderPadding);
        self.available_logical_width_for_line(cb, self.logical_top(id), height)
    }

    /// The block's inline-axis space at `[logical_top, logical_top + height)`
    /// once floats are subtracted.
    #[must_use]
    pub fn available_logical_width_for_line(
        &self,
        block: BoxId,
        logical_top: f32,
        height: f32,
    ) -> f32 {
        let (start, end) = self.line_offsets(block, logical_top, height);
        (end - start).max(0.0)
    }

    /// Inline-axis `(start, end)` of the line box at `logical_top`, in the
    /// block's border-box coordinates.
    #[must_use]
    pub fn line_offsets(&self, block: BoxId, logical_top: f32, height: f32) -> (f32, f32) {
        let start = self.border_logical_left(block) + self.padding_logical_left(block);
        let end = start + self.available_logical_width(block);
        let floats = &self.geometry(block).floats;
        let top = logical_top - self.border_before(block) - self.padding_before(block);
        let line_start = start + floats.start_offset_for_line(top, height);
        let line_end = start + floats.end_offset_for_line(top, height, end - start);
        (line_start, line_end)
    }

    /// Padding on the logical left side.
    #[must_use]
    pub fn padding_logical_left(&self, id: BoxId) -> f32 {
        self.padding(id).logical_left(self.style(id).writing_mode)
    }

    /// Block-start padding.
    #[must_use]
    pub fn padding_before(&self, id: BoxId) -> f32 {
        self.padding(id).before(self.style(id).writing_mode)
    }

    /// Content-box offsets of the block, `(start, end)`, ignoring floats.
    #[must_use]
    pub fn content_offsets(&self, block: BoxId) -> (f32, f32) {
        let start = self.border_logical_left(block) + self.padding_logical_left(block);
        (start, start + self.available_logical_width(block))
    }

    /// The box has at least one float placed in its formatting context.
    #[must_use]
    pub fn contains_floats(&self, id: BoxId) -> bool {
        self.geometry(id).floats.contains_floats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DocumentSettings;
    use crate::tree::BoxKind;
    use trellis_style::{ComputedStyle, Length, PhysicalSides};

    fn boxed(style: ComputedStyle, width: f32) -> (LayoutTree, BoxId) {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        tree.geometry_mut(BoxId::VIEW).frame = Rect::new(0.0, 0.0, 800.0, 600.0);
        let id = tree
            .append_child(BoxId::VIEW, BoxKind::Block, None, style)
            .unwrap();
        tree.geometry_mut(id).frame.width = width;
        (tree, id)
    }

    #[test]
    fn test_box_sizing_adjustments() {
        let style = ComputedStyle {
            border: PhysicalSides::uniform(5.0),
            padding: PhysicalSides::uniform(Length::px(10.0)),
            ..ComputedStyle::default()
        };
        let (tree, id) = boxed(style.clone(), 200.0);
        assert_eq!(tree.border_and_padding_logical_width(id), 30.0);
        assert_eq!(tree.adjust_border_box_logical_width_for_box_sizing(id, 100.0), 130.0);
        assert_eq!(tree.adjust_content_box_logical_width_for_box_sizing(id, 100.0), 100.0);

        let (tree, id) = boxed(
            ComputedStyle {
                box_sizing: BoxSizing::BorderBox,
                ..style
            },
            200.0,
        );
        assert_eq!(tree.adjust_border_box_logical_width_for_box_sizing(id, 10.0), 30.0);
        assert_eq!(tree.adjust_content_box_logical_width_for_box_sizing(id, 10.0), 0.0);
        assert_eq!(tree.adjust_content_box_logical_width_for_box_sizing(id, 100.0), 70.0);
    }

    #[test]
    fn test_percentage_padding_uses_containing_block_width() {
        let style = ComputedStyle {
            padding: PhysicalSides::uniform(Length::percent(10.0)),
            ..ComputedStyle::default()
        };
        let (tree, id) = boxed(style, 800.0);
        assert_eq!(
            tree.padding(id).top,
            80.0,
            "vertical padding percentages resolve against the inline size"
        );
    }

    #[test]
    fn test_client_width_subtracts_border_and_scrollbar() {
        let style = ComputedStyle {
            border: PhysicalSides::uniform(2.0),
            ..ComputedStyle::default()
        };
        let (mut tree, id) = boxed(style, 100.0);
        tree.geometry_mut(id).vertical_scrollbar_width = 15.0;
        assert_eq!(tree.client_width(id), 81.0);
        assert_eq!(tree.content_logical_width(id), 81.0);
    }
}
