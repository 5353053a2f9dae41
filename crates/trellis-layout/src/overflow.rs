//! Overflow rects.
//!
//! [CSS Overflow Module Level 3 § 2 Types of Overflow](https://www.w3.org/TR/css-overflow-3/#overflow-concepts)
//!
//! "Ink overflow is the part of a box and its contents that creates a
//! visual effect outside of the box's border box."
//!
//! "Scrollable overflow is the set of boxes and text for which a box is
//! the scroll container..."
//!
//! A box keeps three rects, all in its own border-box coordinates with the
//! block axis flipped for `vertical-rl`:
//!
//! - layout (scrollable) overflow, starting as the client box
//! - self visual overflow, starting as the border box
//! - contents visual overflow, starting empty
//!
//! The model is only allocated once something actually overflows.

use trellis_style::ComputedStyle;

use crate::box_model::Rect;
use crate::tree::{BoxId, LayoutTree};

/// Overflow rects of one box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverflowModel {
    layout_overflow: Rect,
    self_visual_overflow: Rect,
    contents_visual_overflow: Rect,
}

impl OverflowModel {
    /// A model with nothing overflowing yet.
    #[must_use]
    pub const fn new(client_box: Rect, border_box: Rect) -> Self {
        Self {
            layout_overflow: client_box,
            self_visual_overflow: border_box,
            contents_visual_overflow: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Scrollable overflow.
    #[must_use]
    pub const fn layout_overflow_rect(&self) -> Rect {
        self.layout_overflow
    }

    /// Ink overflow of the box itself.
    #[must_use]
    pub const fn self_visual_overflow_rect(&self) -> Rect {
        self.self_visual_overflow
    }

    /// Ink overflow of the box's descendants.
    #[must_use]
    pub const fn contents_visual_overflow_rect(&self) -> Rect {
        self.contents_visual_overflow
    }

    fn add_layout_overflow(&mut self, rect: Rect) {
        let r = &mut self.layout_overflow;
        let min_x = rect.x.min(r.x);
        let min_y = rect.y.min(r.y);
        let max_x = rect.max_x().max(r.max_x());
        let max_y = rect.max_y().max(r.max_y());
        *r = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
    }

    fn add_self_visual_overflow(&mut self, rect: Rect) {
        self.self_visual_overflow = self.self_visual_overflow.unite(&rect);
    }

    fn add_contents_visual_overflow(&mut self, rect: Rect) {
        self.contents_visual_overflow = self.contents_visual_overflow.unite(&rect);
    }
}

impl LayoutTree {
    /// The border box in the box's own coordinates.
    #[must_use]
    pub fn border_box_rect(&self, id: BoxId) -> Rect {
        let frame = self.geometry(id).frame;
        Rect::new(0.0, 0.0, frame.width, frame.height)
    }

    /// The vertical scrollbar sits on the logical left (right-to-left
    /// horizontal boxes).
    #[must_use]
    pub fn should_place_block_direction_scrollbar_on_logical_left(&self, id: BoxId) -> bool {
        let style = self.style(id);
        !style.is_left_to_right_direction() && style.is_horizontal_writing_mode()
    }

    /// Mirror `rect` across the box's block axis in `vertical-rl`.
    #[must_use]
    pub fn flip_for_writing_mode(&self, id: BoxId, rect: Rect) -> Rect {
        if !self.style(id).is_flipped_blocks_writing_mode() {
            return rect;
        }
        Rect {
            x: self.geometry(id).frame.width - rect.max_x(),
            ..rect
        }
    }

    /// The client box with the block axis flipped for `vertical-rl`.
    ///
    /// The flip happens before the scrollbars are taken out, so in
    /// `vertical-rl` the vertical scrollbar still comes off the physical
    /// right.
    #[must_use]
    pub fn no_overflow_rect(&self, id: BoxId) -> Rect {
        let g = self.geometry(id);
        let border = self.border(id);
        let on_left = self.should_place_block_direction_scrollbar_on_logical_left(id);
        let left = border.left + if on_left { g.vertical_scrollbar_width } else { 0.0 };
        let top = border.top;
        let rect = Rect::new(
            left,
            top,
            g.frame.width - left - border.right,
            g.frame.height - top - border.bottom,
        );
        let mut rect = self.flip_for_writing_mode(id, rect);
        if !on_left {
            rect.width -= g.vertical_scrollbar_width;
        }
        rect.height -= g.horizontal_scrollbar_height;
        rect.width = rect.width.max(0.0);
        rect.height = rect.height.max(0.0);
        rect
    }

    /// Scrollable overflow rect, or the client box if nothing overflows.
    #[must_use]
    pub fn layout_overflow_rect(&self, id: BoxId) -> Rect {
        self.geometry(id)
            .overflow
            .map_or_else(|| self.no_overflow_rect(id), |o| o.layout_overflow)
    }

    /// Ink overflow of the box itself, or the border box.
    #[must_use]
    pub fn self_visual_overflow_rect(&self, id: BoxId) -> Rect {
        self.geometry(id)
            .overflow
            .map_or_else(|| self.border_box_rect(id), |o| o.self_visual_overflow)
    }

    /// Ink overflow of the descendants, or an empty rect.
    #[must_use]
    pub fn contents_visual_overflow_rect(&self, id: BoxId) -> Rect {
        self.geometry(id)
            .overflow
            .map_or_else(Rect::default, |o| o.contents_visual_overflow)
    }

    /// All ink overflow that paints outside the box. Clipping boxes only
    /// show their own.
    #[must_use]
    pub fn visual_overflow_rect(&self, id: BoxId) -> Rect {
        let Some(overflow) = self.geometry(id).overflow else {
            return self.border_box_rect(id);
        };
        if self.has_overflow_clip(id) {
            return overflow.self_visual_overflow;
        }
        overflow
            .self_visual_overflow
            .unite(&overflow.contents_visual_overflow)
    }

    /// Overflow in this box reaches toward the physical top (right-to-left
    /// vertical boxes).
    #[must_use]
    pub fn has_top_overflow(&self, id: BoxId) -> bool {
        let style = self.style(id);
        !style.is_left_to_right_direction() && !style.is_horizontal_writing_mode()
    }

    /// Overflow in this box reaches toward the physical left (right-to-left
    /// horizontal boxes).
    #[must_use]
    pub fn has_left_overflow(&self, id: BoxId) -> bool {
        let style = self.style(id);
        !style.is_left_to_right_direction() && style.is_horizontal_writing_mode()
    }

    fn ensure_overflow(&mut self, id: BoxId) -> &mut OverflowModel {
        let client_box = self.no_overflow_rect(id);
        let border_box = self.border_box_rect(id);
        self.geometry_mut(id)
            .overflow
            .get_or_insert_with(|| OverflowModel::new(client_box, border_box))
    }

    /// Record scrollable overflow.
    ///
    /// Rects inside the client box change nothing. Scroll containers and the
    /// view cannot scroll toward their start edges, so the unreachable part
    /// of the rect is cut off first.
    pub fn add_layout_overflow(&mut self, id: BoxId, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let client_box = self.no_overflow_rect(id);
        if client_box.contains(&rect) {
            return;
        }

        let mut overflow_rect = rect;
        if self.has_overflow_clip(id) || self.is_layout_view(id) {
            if self.has_top_overflow(id) {
                overflow_rect.shift_max_y_edge_to(overflow_rect.max_y().min(client_box.max_y()));
            } else {
                overflow_rect.shift_y_edge_to(overflow_rect.y.max(client_box.y));
            }
            if self.has_left_overflow(id) {
                overflow_rect.shift_max_x_edge_to(overflow_rect.max_x().min(client_box.max_x()));
            } else {
                overflow_rect.shift_x_edge_to(overflow_rect.x.max(client_box.x));
            }
            if client_box.contains(&overflow_rect) || overflow_rect.is_empty() {
                return;
            }
        }

        self.ensure_overflow(id).add_layout_overflow(overflow_rect);
    }

    /// Record ink overflow of the box itself (shadows, outlines).
    pub fn add_self_visual_overflow(&mut self, id: BoxId, rect: Rect) {
        if rect.is_empty() || self.border_box_rect(id).contains(&rect) {
            return;
        }
        self.ensure_overflow(id).add_self_visual_overflow(rect);
    }

    /// Record ink overflow of descendants. Clipping boxes keep it even when
    /// it stays inside the border box.
    pub fn add_contents_visual_overflow(&mut self, id: BoxId, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        if !self.has_overflow_clip(id) && self.border_box_rect(id).contains(&rect) {
            return;
        }
        self.ensure_overflow(id).add_contents_visual_overflow(rect);
    }

    /// Reset scrollable overflow to the client box, dropping the whole model
    /// when no ink overflow remains either.
    pub fn clear_layout_overflow(&mut self, id: BoxId) {
        let Some(overflow) = self.geometry(id).overflow else {
            return;
        };
        let has_self_visual = !self.border_box_rect(id).contains(&overflow.self_visual_overflow);
        if !has_self_visual && overflow.contents_visual_overflow.is_empty() {
            self.clear_all_overflows(id);
            return;
        }
        let client_box = self.no_overflow_rect(id);
        if let Some(model) = self.geometry_mut(id).overflow.as_mut() {
            model.layout_overflow = client_box;
        }
    }

    /// Drop the overflow model.
    pub fn clear_all_overflows(&mut self, id: BoxId) {
        self.geometry_mut(id).overflow = None;
    }

    /// The child's ink overflow in the coordinate space a parent with
    /// `parent_style` expects.
    #[must_use]
    pub fn visual_overflow_rect_for_propagation(
        &self,
        id: BoxId,
        parent_style: &ComputedStyle,
    ) -> Rect {
        let rect = self.visual_overflow_rect(id);
        self.flip_for_parent_writing_mode(id, parent_style, rect)
    }

    /// The child's contribution to its parent's scrollable overflow.
    ///
    /// The border box grows by the block-end margin, except for quirky
    /// margins and self-collapsing blocks. Inner overflow only escapes
    /// boxes that do not clip it. Relative offsets apply in physical space.
    #[must_use]
    pub fn layout_overflow_rect_for_propagation(
        &self,
        id: BoxId,
        parent_style: &ComputedStyle,
    ) -> Rect {
        let mut rect = self.border_box_rect(id);
        if !self.style(id).has_margin_after_quirk && !self.is_self_collapsing_block(id) {
            let margin_after = self.margin_after(id);
            if self.is_horizontal_writing_mode(id) {
                rect.height += margin_after;
            } else {
                rect.width += margin_after;
            }
        }

        if !self.has_overflow_clip(id) {
            let overflow = self.layout_overflow_rect(id);
            let min_x = rect.x.min(overflow.x);
            let min_y = rect.y.min(overflow.y);
            let max_x = rect.max_x().max(overflow.max_x());
            let max_y = rect.max_y().max(overflow.max_y());
            rect = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
        }

        if self.is_in_flow_positioned(id) {
            let (dx, dy) = self.geometry(id).in_flow_offset;
            let physical = self.flip_for_writing_mode(id, rect).moved_by(dx, dy);
            rect = self.flip_for_writing_mode(id, physical);
        }

        self.flip_for_parent_writing_mode(id, parent_style, rect)
    }

    fn flip_for_parent_writing_mode(
        &self,
        id: BoxId,
        parent_style: &ComputedStyle,
        rect: Rect,
    ) -> Rect {
        let own = self.style(id).writing_mode;
        if parent_style.writing_mode == own {
            return rect;
        }
        if own.is_flipped_blocks() || parent_style.writing_mode.is_flipped_blocks() {
            return Rect {
                x: self.geometry(id).frame.width - rect.max_x(),
                ..rect
            };
        }
        rect
    }

    /// Fold a child's overflow, offset by `delta`, into `id`'s.
    ///
    /// Flow threads never propagate overflow. Positioned children paint in
    /// their own layer and keep their ink overflow to themselves.
    pub fn add_overflow_from_child(&mut self, id: BoxId, child: BoxId, delta: (f32, f32)) {
        if self.flow_thread_kind(child).is_some() {
            return;
        }
        let parent_style = self.style(id).clone();
        let layout = self
            .layout_overflow_rect_for_propagation(child, &parent_style)
            .moved_by(delta.0, delta.1);
        self.add_layout_overflow(id, layout);

        if self.style(child).position.is_positioned() {
            return;
        }
        let visual = self
            .visual_overflow_rect_for_propagation(child, &parent_style)
            .moved_by(delta.0, delta.1);
        self.add_contents_visual_overflow(id, visual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DocumentSettings;
    use crate::tree::BoxKind;
    use trellis_style::{Direction, Overflow, PhysicalSides};

    fn single(style: ComputedStyle) -> (LayoutTree, BoxId) {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let id = tree
            .append_child(BoxId::VIEW, BoxKind::Block, None, style)
            .unwrap();
        tree.geometry_mut(id).frame = Rect::new(0.0, 0.0, 200.0, 100.0);
        (tree, id)
    }

    #[test]
    fn test_overflow_inside_client_box_is_ignored() {
        let (mut tree, id) = single(ComputedStyle::default());
        tree.add_layout_overflow(id, Rect::new(10.0, 10.0, 50.0, 50.0));
        assert!(tree.geometry(id).overflow.is_none());
        assert_eq!(tree.layout_overflow_rect(id), Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_visible_overflow_extends_layout_rect() {
        let (mut tree, id) = single(ComputedStyle::default());
        tree.add_layout_overflow(id, Rect::new(-20.0, 50.0, 50.0, 150.0));
        assert_eq!(tree.layout_overflow_rect(id), Rect::new(-20.0, 0.0, 220.0, 200.0));
    }

    #[test]
    fn test_scroll_container_clips_unreachable_overflow() {
        let (mut tree, id) = single(ComputedStyle {
            overflow_x: Overflow::Auto,
            overflow_y: Overflow::Auto,
            ..ComputedStyle::default()
        });
        tree.add_layout_overflow(id, Rect::new(-50.0, -50.0, 40.0, 40.0));
        assert!(
            tree.geometry(id).overflow.is_none(),
            "overflow above and left of the scroll origin is unreachable"
        );
        tree.add_layout_overflow(id, Rect::new(-50.0, 0.0, 300.0, 10.0));
        assert_eq!(tree.layout_overflow_rect(id), Rect::new(0.0, 0.0, 250.0, 100.0));
    }

    #[test]
    fn test_rtl_scroll_container_keeps_left_overflow() {
        let (mut tree, id) = single(ComputedStyle {
            overflow_x: Overflow::Scroll,
            direction: Direction::Rtl,
            ..ComputedStyle::default()
        });
        tree.add_layout_overflow(id, Rect::new(-50.0, 0.0, 100.0, 10.0));
        assert_eq!(tree.layout_overflow_rect(id).x, -50.0);
    }

    #[test]
    fn test_no_overflow_rect_excludes_border_and_scrollbars() {
        let (mut tree, id) = single(ComputedStyle {
            border: PhysicalSides::uniform(5.0),
            direction: Direction::Rtl,
            ..ComputedStyle::default()
        });
        tree.geometry_mut(id).vertical_scrollbar_width = 15.0;
        assert_eq!(tree.no_overflow_rect(id), Rect::new(20.0, 5.0, 175.0, 90.0));
    }

    #[test]
    fn test_contents_visual_overflow_always_kept_when_clipping() {
        let (mut tree, id) = single(ComputedStyle {
            overflow_y: Overflow::Hidden,
            ..ComputedStyle::default()
        });
        tree.add_contents_visual_overflow(id, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(tree.contents_visual_overflow_rect(id), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(
            tree.visual_overflow_rect(id),
            tree.border_box_rect(id),
            "a clipping box only paints its own overflow"
        );
        tree.clear_layout_overflow(id);
        assert!(tree.geometry(id).overflow.is_some());
    }
}
