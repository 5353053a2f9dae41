//! Block-flow driver.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the other,
//! vertically, beginning at the top of a containing block."
//!
//! The driver runs the resolvers over the whole tree: a bottom-up pass for
//! preferred widths, then a top-down pass that sizes each box, stacks its
//! in-flow children, places its floats, and finally lays out the positioned
//! boxes it is the containing block of.
//!
//! # Not Yet Implemented
//!
//! - Margin collapsing
//! - Inline formatting: inline-level children stack like blocks
//! - Table, flex and grid algorithms: those containers stack their children
//!   and rely on the override slots their caller fills in

use tracing::debug;
#[cfg(feature = "layout-trace")]
use tracing::trace;
use trellis_style::{BreakValue, Clear, Length, minimum_value_for_length};

use crate::box_model::Rect;
use crate::float::FloatSide;
use crate::geometry::PreferredLogicalWidths;
use crate::pagination::{PageBoundaryRule, PaginationBreakability};
use crate::tree::{BoxId, ContainingBlockChain, LayoutTree};

impl LayoutTree {
    /// Lay out the whole tree under the current settings.
    pub fn layout(&mut self) {
        debug!(target: "trellis::flow", boxes = self.len(), "layout start");
        self.sync_view_style();
        let reattached = self.reevaluate_detached_areas();
        if !reattached.is_empty() {
            debug!(target: "trellis::flow", count = reattached.len(), "snap areas found containers");
        }
        self.compute_preferred_logical_widths(BoxId::VIEW);
        self.layout_block(BoxId::VIEW);
        debug!(
            target: "trellis::flow",
            width = self.geometry(BoxId::VIEW).frame.width,
            height = self.geometry(BoxId::VIEW).frame.height,
            "layout finished"
        );
    }

    /// [§ 5.1 Intrinsic Sizes](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
    ///
    /// Fill in the preferred widths of `id` and its descendants, bottom up.
    /// Results of an earlier pass are discarded; measured widths supplied
    /// with the tree stand in for the children's contributions.
    ///
    /// A fixed `width` is its own contribution. Otherwise in-flow children
    /// contribute the larger of their widths and adjacent floats contribute
    /// their sum to the max-content width.
    pub fn compute_preferred_logical_widths(&mut self, id: BoxId) {
        let children = self.children(id).to_vec();
        for &child in &children {
            self.compute_preferred_logical_widths(child);
        }
        if self.is_layout_view(id) {
            return;
        }
        if let Some(measured) = self.geometry(id).measured_logical_widths {
            self.geometry_mut(id).preferred_logical_widths = Some(measured);
            return;
        }

        let bp = self.border_and_padding_logical_width(id) + self.scrollbar_logical_width(id);
        let style = self.style(id);
        let widths = if let Length::Fixed(width) = style.logical_width() {
            let width = self.adjust_border_box_logical_width_for_box_sizing(id, width);
            PreferredLogicalWidths {
                min: width,
                max: width,
            }
        } else if self.should_compute_size_as_replaced(id) {
            let natural = self.geometry(id).intrinsic_size.map_or(0.0, |(w, h)| {
                if style.is_horizontal_writing_mode() { w } else { h }
            });
            PreferredLogicalWidths {
                min: natural + bp,
                max: natural + bp,
            }
        } else {
            let mut min = 0.0_f32;
            let mut max = 0.0_f32;
            let mut float_line = 0.0_f32;
            for &child in &children {
                if self.is_out_of_flow_positioned(child) {
                    continue;
                }
                let child_style = self.style(child);
                let margins = minimum_value_for_length(child_style.margin_start_using(style), 0.0)
                    + minimum_value_for_length(child_style.margin_end_using(style), 0.0);
                let child_widths = self
                    .geometry(child)
                    .preferred_logical_widths
                    .unwrap_or_default();
                min = min.max(child_widths.min + margins);
                if self.is_floating(child) {
                    if child_style.clear != Clear::None {
                        max = max.max(float_line);
                        float_line = 0.0;
                    }
                    float_line += child_widths.max + margins;
                } else {
                    max = max.max(float_line).max(child_widths.max + margins);
                    float_line = 0.0;
                }
            }
            max = max.max(float_line);
            PreferredLogicalWidths {
                min: min + bp,
                max: max.max(min) + bp,
            }
        };

        // [§ 4.4 Min and max](https://www.w3.org/TR/css-sizing-3/#min-max-widths)
        let min_width = style.logical_min_width();
        let max_width = style.logical_max_width();
        let mut widths = widths;
        if let Length::Fixed(max_width) = max_width {
            let max_width = self.adjust_border_box_logical_width_for_box_sizing(id, max_width);
            widths.min = widths.min.min(max_width);
            widths.max = widths.max.min(max_width);
        }
        if let Length::Fixed(min_width) = min_width {
            let min_width = self.adjust_border_box_logical_width_for_box_sizing(id, min_width);
            widths.min = widths.min.max(min_width);
            widths.max = widths.max.max(min_width);
        }

        #[cfg(feature = "layout-trace")]
        trace!(target: "trellis::flow", ?id, min = widths.min, max = widths.max, "preferred widths");
        self.geometry_mut(id).preferred_logical_widths = Some(widths);
    }

    /// The box starts a new block formatting context: its floats stay inside
    /// and extend its height.
    fn creates_new_formatting_context(&self, id: BoxId) -> bool {
        self.is_layout_view(id)
            || self.avoids_floats(id)
            || self.is_floating(id)
            || self.is_out_of_flow_positioned(id)
            || self.is_inline_block_or_inline_table(id)
            || self.is_table_cell(id)
    }

    /// [§ 10.3.3](https://www.w3.org/TR/CSS2/visudet.html#blockwidth) and
    /// [§ 10.6.3](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    ///
    /// Lay out one box whose block position in its container is already set.
    pub fn layout_block(&mut self, id: BoxId) {
        #[cfg(feature = "layout-trace")]
        trace!(target: "trellis::flow", ?id, kind = %self.kind(id), "layout block");

        // STEP 1: Resolve the inline size.
        self.update_logical_width(id);

        // STEP 2: Lay out the in-flow children and floats.
        self.geometry_mut(id).floats.clear_floats();
        self.clear_all_overflows(id);
        let content_bottom = self.layout_block_children(id);

        // STEP 3: Resolve the block size from the content.
        //
        // [§ 10.6.7 'Auto' heights for block formatting context roots](https://www.w3.org/TR/CSS2/visudet.html#root-height)
        //
        // "In addition, if the element has any floating descendants whose
        // bottom margin edge is below the element's bottom content edge, then
        // the height is increased to include those edges."
        let wm = self.style(id).writing_mode;
        let content_top = self.border_before(id) + self.padding_before(id);
        let mut content_bottom = content_bottom;
        if self.creates_new_formatting_context(id) {
            content_bottom =
                content_bottom.max(content_top + self.geometry(id).floats.lowest_float_logical_bottom());
        }
        let padding_after = self.padding_logical_height(id) - self.padding_before(id);
        let height =
            content_bottom + padding_after + self.border_after(id) + self.scrollbar_logical_height(id);
        self.geometry_mut(id).set_logical_height(wm, height);
        self.update_logical_height(id);

        // STEP 4: Lay out the positioned boxes this box contains.
        //
        // [§ 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
        //
        // Their size and position depend on this box's final size, so they
        // come last.
        let positioned: Vec<BoxId> = self
            .subtree(id)
            .into_iter()
            .skip(1)
            .filter(|&d| self.is_out_of_flow_positioned(d) && self.containing_block(d) == Some(id))
            .collect();
        for &child in &positioned {
            self.compute_and_set_block_direction_margins(child, id);
            self.layout_block(child);
        }

        // STEP 5: Collect overflow from the children.
        let in_flow = self
            .children(id)
            .iter()
            .copied()
            .filter(|&c| !self.is_out_of_flow_positioned(c));
        let contributors: Vec<BoxId> = in_flow.chain(positioned).collect();
        for child in contributors {
            let frame = self.geometry(child).frame;
            self.add_overflow_from_child(id, child, (frame.x, frame.y));
        }
    }

    /// Stack the in-flow children of `id`, place its floats and record the
    /// static positions of its out-of-flow children. Returns the block
    /// position of the content bottom in `id`'s border-box coordinates.
    fn layout_block_children(&mut self, id: BoxId) -> f32 {
        let style = self.style(id);
        let wm = style.writing_mode;
        let is_ltr = style.is_left_to_right_direction();
        let content_top = self.border_before(id) + self.padding_before(id);
        let (content_start, content_end) = self.content_offsets(id);
        let available_width = self.available_logical_width(id);

        let mut logical_top = content_top;
        let mut previous_break_after = BreakValue::Auto;
        let mut first_in_flow = true;

        for child in self.children(id).to_vec() {
            // [§ 10.3.7](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
            //
            // The static position is where the box would have been had it
            // been in flow.
            if self.is_out_of_flow_positioned(child) {
                let static_inline_position = if is_ltr {
                    content_start
                } else {
                    self.logical_width(id) - content_end
                };
                let geometry = self.geometry_mut(child);
                geometry.static_inline_position = static_inline_position;
                geometry.static_block_position = logical_top;
                continue;
            }

            self.compute_and_set_block_direction_margins(child, id);

            // [§ 9.5.1 Positioning the float](https://www.w3.org/TR/CSS2/visuren.html#float-position)
            if let Some(side) = FloatSide::from_float(self.style(child).float)
                .filter(|_| self.is_floating(child))
            {
                self.layout_block(child);
                let geometry = self.geometry(child);
                let margin_left = geometry.margin.logical_left(wm);
                let margin_before = geometry.margin_before(wm);
                let inline_size =
                    geometry.logical_width(wm) + margin_left + geometry.margin.logical_right(wm);
                let block_size =
                    geometry.logical_height(wm) + margin_before + geometry.margin_after(wm);
                let rect = self.geometry_mut(id).floats.place_float(
                    side,
                    inline_size,
                    block_size,
                    logical_top - content_top,
                    available_width,
                );
                let left = content_start + rect.inline_start + margin_left;
                self.place_child(id, child, left, content_top + rect.top + margin_before);
                continue;
            }

            // [§ 9.5.2 Controlling flow next to floats](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
            let clear = self.style(child).clear;
            logical_top = content_top + self.geometry(id).floats.clear(clear, logical_top - content_top);

            // [§ 3.1 Forced breaks](https://www.w3.org/TR/css-break-3/#forced-breaks)
            if !first_in_flow && self.needs_forced_break_before(child, previous_break_after) {
                logical_top += self.page_remaining_logical_height_for_offset(
                    id,
                    logical_top,
                    PageBoundaryRule::AssociateWithFormerPage,
                );
            }
            first_in_flow = false;

            let mut child_top = logical_top + self.geometry(child).margin_before(wm);
            self.geometry_mut(child).set_logical_top(wm, child_top);
            self.geometry_mut(child).pagination_strut = 0.0;
            self.layout_block(child);

            // [§ 5.4.4 Monolithic elements](https://www.w3.org/TR/css-break-3/#monolithic)
            let child_height = self.geometry(child).logical_height(wm);
            if self.pagination_breakability(child) == PaginationBreakability::ForbidBreaks
                && self.crosses_page_boundary(id, child_top, child_height)
            {
                let remaining = self.page_remaining_logical_height_for_offset(
                    id,
                    child_top,
                    PageBoundaryRule::AssociateWithLatterPage,
                );
                // Content taller than a whole page stays where it is.
                if remaining < self.page_logical_height_for_offset(id, child_top) {
                    let strut = self.calculate_pagination_strut_to_fit_content(
                        id,
                        child_top,
                        remaining,
                        child_height,
                    );
                    self.set_pagination_strut(child, strut);
                    child_top += strut;
                    self.geometry_mut(child).set_logical_top(wm, child_top);
                    self.layout_block(child);
                }
            }

            let mut left = self.inline_position_for_child(id, child, content_start, content_end);
            if self.avoids_floats(child) && self.contains_floats(id) {
                let (line_start, line_end) = self.line_offsets(id, child_top, child_height);
                left = if is_ltr {
                    line_start + self.margin_start_for_child(id, child)
                } else {
                    line_end - self.margin_start_for_child(id, child) - self.geometry(child).logical_width(wm)
                };
            }
            self.place_child(id, child, left, child_top);
            self.update_fragmentation_info_for_child(id, child);

            logical_top = child_top + child_height + self.geometry(child).margin_after(wm);
            previous_break_after = self.break_after(child);
        }
        logical_top
    }

    /// Logical left of an in-flow child that does not avoid floats.
    fn inline_position_for_child(
        &self,
        id: BoxId,
        child: BoxId,
        content_start: f32,
        content_end: f32,
    ) -> f32 {
        let margin_start = self.margin_start_for_child(id, child);
        if self.style(id).is_left_to_right_direction() {
            content_start + margin_start
        } else {
            let wm = self.style(id).writing_mode;
            content_end - margin_start - self.geometry(child).logical_width(wm)
        }
    }

    /// Write the child's position in `id`'s flow and its relative offset,
    /// then register it as a percent-height descendant if it needs one.
    fn place_child(&mut self, id: BoxId, child: BoxId, logical_left: f32, logical_top: f32) {
        let wm = self.style(id).writing_mode;
        let in_flow_offset = if self.is_in_flow_positioned(child) {
            self.offset_for_in_flow_position(child)
        } else {
            (0.0, 0.0)
        };
        let geometry = self.geometry_mut(child);
        geometry.set_logical_left(wm, logical_left);
        geometry.set_logical_top(wm, logical_top);
        geometry.in_flow_offset = in_flow_offset;

        let style = self.style(child);
        if style.logical_height().has_percent()
            || style.logical_min_height().has_percent()
            || style.logical_max_height().has_percent()
        {
            self.register_percent_height_descendant(child);
        }
        #[cfg(feature = "layout-trace")]
        trace!(target: "trellis::flow", ?child, logical_left, logical_top, "placed");
    }

    /// Border box of `id` in the view's coordinates, relative offsets and
    /// scroll positions included.
    #[must_use]
    pub fn absolute_border_box_rect(&self, id: BoxId) -> Rect {
        let frame = self.geometry(id).frame;
        let mut x = 0.0;
        let mut y = 0.0;
        let mut current = Some(id);
        while let Some(curr) = current.filter(|&c| !self.is_layout_view(c)) {
            let g = self.geometry(curr);
            x += g.frame.x + g.in_flow_offset.0;
            y += g.frame.y + g.in_flow_offset.1;
            current = self.container(curr);
            if let Some(container) = current.filter(|&c| self.has_overflow_clip(c)) {
                let scroll = self.geometry(container).scroll_offset;
                x -= scroll.0;
                y -= scroll.1;
            }
        }
        Rect::new(x, y, frame.width, frame.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DocumentSettings;
    use crate::tree::{BoxKind, Element};
    use trellis_style::{ComputedStyle, Float, Overflow, PhysicalSides, Position};

    fn block(tree: &mut LayoutTree, parent: BoxId, style: ComputedStyle) -> BoxId {
        tree.append_child(parent, BoxKind::Block, Some(Element::Generic), style)
            .unwrap()
    }

    fn sized(width: f32, height: f32) -> ComputedStyle {
        ComputedStyle {
            width: Length::px(width),
            height: Length::px(height),
            ..ComputedStyle::default()
        }
    }

    #[test]
    fn test_blocks_stack_in_flow() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let outer = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                padding: PhysicalSides::uniform(Length::px(10.0)),
                ..ComputedStyle::default()
            },
        );
        let first = block(&mut tree, outer, sized(100.0, 50.0));
        let second = block(
            &mut tree,
            outer,
            ComputedStyle {
                height: Length::px(30.0),
                margin: PhysicalSides::uniform(Length::px(5.0)),
                ..ComputedStyle::default()
            },
        );
        tree.layout();

        assert_eq!(tree.geometry(outer).frame, Rect::new(0.0, 0.0, 800.0, 110.0));
        assert_eq!(tree.geometry(first).frame, Rect::new(10.0, 10.0, 100.0, 50.0));
        assert_eq!(
            tree.geometry(second).frame,
            Rect::new(15.0, 65.0, 770.0, 30.0),
            "margins do not collapse"
        );
    }

    #[test]
    fn test_preferred_widths_from_children() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let outer = block(&mut tree, BoxId::VIEW, ComputedStyle::default());
        let _ = block(&mut tree, outer, sized(120.0, 10.0));
        let left = ComputedStyle {
            float: Float::Left,
            ..sized(50.0, 10.0)
        };
        let _ = block(&mut tree, outer, left.clone());
        let _ = block(&mut tree, outer, left);
        tree.compute_preferred_logical_widths(BoxId::VIEW);

        assert_eq!(
            tree.geometry(outer).preferred_logical_widths,
            Some(PreferredLogicalWidths { min: 120.0, max: 120.0 })
        );
    }

    #[test]
    fn test_relayout_picks_up_new_intrinsic_widths() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let float = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                float: Float::Left,
                ..ComputedStyle::default()
            },
        );
        let child = block(&mut tree, float, sized(100.0, 10.0));
        tree.layout();
        assert_eq!(tree.geometry(float).frame.width, 100.0);

        let _ = tree.set_style(child, sized(300.0, 10.0)).unwrap();
        tree.layout();
        assert_eq!(tree.geometry(float).frame.width, 300.0, "after a style change");

        let _ = block(&mut tree, float, sized(500.0, 10.0));
        tree.layout();
        assert_eq!(tree.geometry(float).frame.width, 500.0, "after an append");
    }

    #[test]
    fn test_measured_widths_stand_in_for_children() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let float = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                float: Float::Left,
                ..ComputedStyle::default()
            },
        );
        let _ = block(&mut tree, float, sized(100.0, 10.0));
        tree.geometry_mut(float).measured_logical_widths =
            Some(PreferredLogicalWidths { min: 60.0, max: 240.0 });
        tree.layout();
        tree.layout();
        assert_eq!(tree.geometry(float).frame.width, 240.0);
    }

    #[test]
    fn test_floats_are_placed_and_contained() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let bfc = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                overflow_y: Overflow::Hidden,
                ..ComputedStyle::default()
            },
        );
        let left = block(
            &mut tree,
            bfc,
            ComputedStyle {
                float: Float::Left,
                ..sized(100.0, 80.0)
            },
        );
        let right = block(
            &mut tree,
            bfc,
            ComputedStyle {
                float: Float::Right,
                ..sized(200.0, 40.0)
            },
        );
        tree.layout();

        assert_eq!(tree.geometry(left).frame, Rect::new(0.0, 0.0, 100.0, 80.0));
        assert_eq!(tree.geometry(right).frame, Rect::new(600.0, 0.0, 200.0, 40.0));
        assert_eq!(tree.logical_height(bfc), 80.0, "floats extend a formatting context root");
    }

    #[test]
    fn test_positioned_child_uses_static_position() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let cb = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                position: Position::Relative,
                padding: PhysicalSides::uniform(Length::px(20.0)),
                ..sized(500.0, 300.0)
            },
        );
        let _ = block(&mut tree, cb, sized(100.0, 40.0));
        let abs = block(
            &mut tree,
            cb,
            ComputedStyle {
                position: Position::Absolute,
                ..sized(50.0, 50.0)
            },
        );
        tree.layout();

        assert_eq!(tree.geometry(abs).frame, Rect::new(20.0, 60.0, 50.0, 50.0));
    }

    #[test]
    fn test_forced_break_moves_to_next_page() {
        let mut tree = LayoutTree::new(DocumentSettings {
            page_logical_height: Some(500.0),
            ..DocumentSettings::default()
        });
        let first = block(&mut tree, BoxId::VIEW, sized(100.0, 120.0));
        let second = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                break_before: BreakValue::Page,
                ..sized(100.0, 100.0)
            },
        );
        tree.layout();

        assert_eq!(tree.logical_top(first), 0.0);
        assert_eq!(tree.logical_top(second), 500.0);
    }

    #[test]
    fn test_monolithic_child_gets_a_strut() {
        let mut tree = LayoutTree::new(DocumentSettings {
            page_logical_height: Some(500.0),
            ..DocumentSettings::default()
        });
        let _ = block(&mut tree, BoxId::VIEW, sized(100.0, 450.0));
        let scroller = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                overflow_y: Overflow::Auto,
                ..sized(100.0, 100.0)
            },
        );
        tree.layout();

        assert_eq!(tree.pagination_strut(scroller), 50.0);
        assert_eq!(tree.logical_top(scroller), 500.0);
    }

    #[test]
    fn test_relative_offset_is_applied_after_flow() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let shifted = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                position: Position::Relative,
                inset: PhysicalSides {
                    top: Length::px(10.0),
                    left: Length::px(-5.0),
                    ..PhysicalSides::uniform(Length::Auto)
                },
                ..sized(100.0, 100.0)
            },
        );
        let after = block(&mut tree, BoxId::VIEW, sized(100.0, 10.0));
        tree.layout();

        assert_eq!(tree.geometry(shifted).in_flow_offset, (-5.0, 10.0));
        assert_eq!(tree.logical_top(after), 100.0, "siblings ignore relative offsets");
        assert_eq!(tree.absolute_border_box_rect(shifted), Rect::new(-5.0, 10.0, 100.0, 100.0));
    }
}
