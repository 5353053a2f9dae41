//! Fragmentation: break values and page geometry.
//!
//! [CSS Fragmentation Module Level 3](https://www.w3.org/TR/css-break-3/)
//!
//! A box is fragmented when the view is paginated (printing, or a scene
//! with a page height) or when it sits inside a flow thread. Flow threads
//! lay their content out in one tall strip and slice it into the
//! fragmentainers listed on the flow-thread box; the last fragmentainer
//! repeats for content that runs past it. A multicol flow thread inside a
//! paginated view lists the columns of every page, so columns on
//! different pages may have different heights.

use serde::{Deserialize, Serialize};
use strum_macros::Display;
#[cfg(feature = "layout-trace")]
use tracing::trace;
use trellis_common::warning::warn_once;
use trellis_style::{BreakValue, Length, Position};

use crate::tree::{
    BoxId, BoxKind, ContainingBlockChain, FlowThreadKind, Fragmentainer, LayoutTree,
};

/// How a fragmentation break may fall inside a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PaginationBreakability {
    /// Breaks may fall anywhere.
    AllowAnyBreaks,
    /// Breaks should be avoided but may still happen.
    AvoidBreaks,
    /// The box is monolithic: it is moved whole to the next fragmentainer.
    ForbidBreaks,
}

/// Which fragmentainer an offset exactly on a boundary belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBoundaryRule {
    /// The boundary ends the former fragmentainer: no space remains.
    AssociateWithFormerPage,
    /// The boundary starts the latter fragmentainer: a whole one remains.
    AssociateWithLatterPage,
}

/// [§ 4.4 Controlling Breaks](https://www.w3.org/TR/css-break-3/#break-propagation)
///
/// "When multiple values apply at a class A break point, forced break values
/// override avoid values, and more specific values override less specific
/// ones."
///
/// `auto` < `avoid-column` < `avoid-page` < `avoid` < `column` < `page` <
/// `left`/`right`/`recto`/`verso`.
#[must_use]
pub const fn fragmentainer_break_precedence(value: BreakValue) -> u8 {
    match value {
        BreakValue::Auto => 0,
        BreakValue::AvoidColumn => 1,
        BreakValue::AvoidPage => 2,
        BreakValue::Avoid => 3,
        BreakValue::Column => 4,
        BreakValue::Page => 5,
        BreakValue::Left | BreakValue::Right | BreakValue::Recto | BreakValue::Verso => 6,
    }
}

/// The break value that applies where `first` (a `break-after`) meets
/// `second` (the next `break-before`). Equal precedence goes to the later
/// value.
#[must_use]
pub const fn join_fragmentainer_break_values(first: BreakValue, second: BreakValue) -> BreakValue {
    if fragmentainer_break_precedence(second) >= fragmentainer_break_precedence(first) {
        second
    } else {
        first
    }
}

/// Find the fragmentainer holding `offset`, synthesizing repeats of the
/// last one. A boundary offset belongs to the later fragmentainer.
fn fragmentainer_at(fragmentainers: &[Fragmentainer], offset: f32) -> Option<Fragmentainer> {
    let (last, rest) = fragmentainers.split_last()?;
    if let Some(found) = rest
        .iter()
        .find(|f| offset < f.logical_top + f.logical_height)
    {
        return Some(*found);
    }
    if offset < last.logical_top + last.logical_height || last.logical_height <= 0.0 {
        return Some(*last);
    }
    let repeats = ((offset - last.logical_top) / last.logical_height).floor();
    Some(Fragmentainer {
        logical_top: last.logical_top + repeats * last.logical_height,
        ..*last
    })
}

impl LayoutTree {
    fn is_layout_block_flow(&self, id: BoxId) -> bool {
        matches!(
            self.kind(id),
            BoxKind::View
                | BoxKind::Block
                | BoxKind::ListItem
                | BoxKind::InlineBlock
                | BoxKind::TableCell
                | BoxKind::FlowThread(_)
        )
    }

    fn is_floating_or_out_of_flow_positioned(&self, id: BoxId) -> bool {
        self.is_floating(id) || self.is_out_of_flow_positioned(id)
    }

    /// [§ 3.1 Breaks Between Boxes](https://www.w3.org/TR/css-break-3/#break-between)
    ///
    /// Whether `value` can take effect as a `break-before`/`break-after`
    /// of this box. Only in-flow block-level boxes in a block container
    /// inside some fragmentation context qualify, and the column values
    /// need a multicol flow thread on the way out.
    #[must_use]
    pub fn is_break_between_controllable(&self, id: BoxId, value: BreakValue) -> bool {
        if value == BreakValue::Auto {
            return true;
        }
        if self.is_inline(id) || self.is_floating_or_out_of_flow_positioned(id) {
            return false;
        }
        let Some(mut current) = self.containing_block(id).filter(|&cb| self.is_layout_block_flow(cb)) else {
            return false;
        };
        let view_is_paginated = self.settings().is_paginated();
        if !view_is_paginated && self.flow_thread_containing_block(id).is_none() {
            return false;
        }
        loop {
            if self.is_layout_view(current) {
                return view_is_paginated && !value.is_column_value();
            }
            if let Some(kind) = self.flow_thread_kind(current) {
                // `avoid` applies in any kind of fragmentation context.
                if value == BreakValue::Avoid {
                    return true;
                }
                if kind == FlowThreadKind::Paged {
                    return !value.is_column_value();
                }
                if value.is_column_value() {
                    return true;
                }
                // A page value inside multicol needs an outer paged context.
            }
            if self.is_floating_or_out_of_flow_positioned(current) {
                return false;
            }
            match self.containing_block(current) {
                Some(next) => current = next,
                None => return false,
            }
        }
    }

    /// [§ 3.2 Breaks Within Boxes](https://www.w3.org/TR/css-break-3/#break-within)
    ///
    /// Whether `value` can take effect as this box's `break-inside`.
    #[must_use]
    pub fn is_break_inside_controllable(&self, id: BoxId, value: BreakValue) -> bool {
        if value == BreakValue::Auto {
            return true;
        }
        if value.is_forced() {
            return false;
        }
        let flow_thread = self.flow_thread_containing_block(id);
        // `avoid-column` only means something in multicol.
        if value == BreakValue::AvoidColumn {
            return flow_thread.is_some_and(|ft| self.flow_thread_kind(ft) != Some(FlowThreadKind::Paged));
        }
        if value == BreakValue::Avoid && flow_thread.is_some() {
            return true;
        }
        if self.settings().is_paginated() {
            return true;
        }
        let Some(flow_thread) = flow_thread else {
            return false;
        };
        // `avoid-page` needs a paged flow thread somewhere outside.
        std::iter::once(flow_thread)
            .chain(self.containing_blocks(flow_thread))
            .any(|block| self.flow_thread_kind(block) == Some(FlowThreadKind::Paged))
    }

    fn controllable_break_value(&self, id: BoxId, property: &str, value: BreakValue) -> BreakValue {
        if value == BreakValue::Auto || self.is_break_between_controllable(id, value) {
            return value;
        }
        warn_once(
            "Pagination",
            &format!("{property}: {value} ignored outside a matching fragmentation context"),
        );
        BreakValue::Auto
    }

    /// The box's `break-after`, or `auto` where it cannot apply.
    #[must_use]
    pub fn break_after(&self, id: BoxId) -> BreakValue {
        self.controllable_break_value(id, "break-after", self.style(id).break_after)
    }

    /// The box's `break-before`, or `auto` where it cannot apply.
    #[must_use]
    pub fn break_before(&self, id: BoxId) -> BreakValue {
        self.controllable_break_value(id, "break-before", self.style(id).break_before)
    }

    /// The box's `break-inside`, or `auto` where it cannot apply.
    #[must_use]
    pub fn break_inside(&self, id: BoxId) -> BreakValue {
        let value = self.style(id).break_inside;
        if value == BreakValue::Auto || self.is_break_inside_controllable(id, value) {
            return value;
        }
        warn_once(
            "Pagination",
            &format!("break-inside: {value} ignored outside a matching fragmentation context"),
        );
        BreakValue::Auto
    }

    /// [§ 4.1 Possible Break Points](https://drafts.csswg.org/css-break/#possible-breaks)
    ///
    /// The value in effect at the class A break point between the previous
    /// sibling (whose `break-after` is given) and this box.
    #[must_use]
    pub fn class_a_break_point_value(&self, id: BoxId, previous_break_after: BreakValue) -> BreakValue {
        join_fragmentainer_break_values(previous_break_after, self.break_before(id))
    }

    /// A forced break separates this box from the previous in-flow sibling.
    /// Floats and positioned boxes are not at a class A break point, but
    /// still move with the previous sibling's forced `break-after`.
    #[must_use]
    pub fn needs_forced_break_before(&self, id: BoxId, previous_break_after: BreakValue) -> bool {
        let value = if self.is_floating_or_out_of_flow_positioned(id) {
            previous_break_after
        } else {
            self.class_a_break_point_value(id, previous_break_after)
        };
        value.is_forced()
    }

    /// A scroller that keeps its own scrollbar along the fragmentation axis
    /// cannot be split, unless printing, or unless its height does not
    /// depend on a definite size.
    #[must_use]
    pub fn has_unsplittable_scrolling_overflow(&self, id: BoxId) -> bool {
        let scrolls = if self.is_horizontal_writing_mode(id) {
            self.scrolls_overflow_y(id)
        } else {
            self.scrolls_overflow_x(id)
        };
        if !scrolls || self.settings().printing {
            return false;
        }

        let style = self.style(id);
        let height = style.logical_height();
        let max_height = style.logical_max_height();
        let min_height = style.logical_min_height();
        let resolvable = |length: Length| {
            !length.has_percent() || self.percentage_logical_height_is_resolvable(id)
        };
        !height.is_intrinsic_or_auto()
            || (!max_height.is_intrinsic_or_auto() && !max_height.is_max_size_none() && resolvable(max_height))
            || (!min_height.is_intrinsic_or_auto() && min_height.is_positive() && resolvable(min_height))
    }

    /// [§ 5.4.4 Monolithic Elements](https://www.w3.org/TR/css-break-3/#monolithic)
    #[must_use]
    pub fn pagination_breakability(&self, id: BoxId) -> PaginationBreakability {
        if self.is_atomic_inline_level(id)
            || self.has_unsplittable_scrolling_overflow(id)
            || (self.parent_box(id).is_some() && self.is_writing_mode_root(id))
            || (self.is_out_of_flow_positioned(id) && self.style(id).position == Position::Fixed)
        {
            return PaginationBreakability::ForbidBreaks;
        }
        if self.break_inside(id).is_avoid() {
            return PaginationBreakability::AvoidBreaks;
        }
        PaginationBreakability::AllowAnyBreaks
    }

    /// Block offset of the box's border-box top from the start of its
    /// fragmentation context: the flow thread it is in, or the paginated
    /// view. Zero outside any fragmentation context.
    #[must_use]
    pub fn offset_from_logical_top_of_first_page(&self, id: BoxId) -> f32 {
        let flow_thread = self.flow_thread_containing_block(id);
        if flow_thread.is_none() && !self.settings().is_paginated() {
            return 0.0;
        }
        let root = flow_thread.unwrap_or(BoxId::VIEW);
        let mut offset = 0.0;
        let mut current = Some(id);
        while let Some(curr) = current.filter(|&c| c != root && !self.is_layout_view(c)) {
            offset += self.logical_top(curr);
            current = self.container(curr);
        }
        offset
    }

    /// Size of the fragmentainer at `offset`, an offset in this box's
    /// coordinates. Zero means there is no known fragmentainer height.
    #[must_use]
    pub fn page_logical_height_for_offset(&self, id: BoxId, offset: f32) -> f32 {
        let Some(flow_thread) = self.flow_thread_containing_block(id) else {
            return self.settings().page_logical_height.unwrap_or(0.0);
        };
        let offset = offset + self.offset_from_logical_top_of_first_page(id);
        fragmentainer_at(&self.node(flow_thread).fragmentainers, offset)
            .map_or(0.0, |f| f.logical_height)
    }

    /// Space left in the fragmentainer at `offset` (this box's
    /// coordinates).
    #[must_use]
    pub fn page_remaining_logical_height_for_offset(
        &self,
        id: BoxId,
        offset: f32,
        rule: PageBoundaryRule,
    ) -> f32 {
        let offset = offset + self.offset_from_logical_top_of_first_page(id);
        let (page_top, page_height) = match self.flow_thread_containing_block(id) {
            None => {
                let page_height = self.settings().page_logical_height.unwrap_or(0.0);
                if page_height <= 0.0 {
                    return 0.0;
                }
                (offset - offset.rem_euclid(page_height), page_height)
            }
            Some(flow_thread) => {
                match fragmentainer_at(&self.node(flow_thread).fragmentainers, offset) {
                    Some(f) if f.logical_height > 0.0 => (f.logical_top, f.logical_height),
                    _ => return 0.0,
                }
            }
        };
        let mut remaining = page_top + page_height - offset;
        if rule == PageBoundaryRule::AssociateWithFormerPage {
            // An offset exactly on a boundary ends the former page.
            remaining = remaining.rem_euclid(page_height);
        }
        remaining
    }

    /// Content `logical_height` tall starting at `offset` does not fit in
    /// what is left of its fragmentainer.
    #[must_use]
    pub fn crosses_page_boundary(&self, id: BoxId, offset: f32, logical_height: f32) -> bool {
        if self.page_logical_height_for_offset(id, offset) == 0.0 {
            return false;
        }
        self.page_remaining_logical_height_for_offset(id, offset, PageBoundaryRule::AssociateWithLatterPage)
            < logical_height
    }

    /// Flow-thread offset of the first fragmentainer at or after
    /// `flow_thread_offset` tall enough for `content_logical_height`, or
    /// `flow_thread_offset` itself when none is.
    #[must_use]
    pub fn next_logical_top_for_unbreakable_content(
        &self,
        flow_thread: BoxId,
        flow_thread_offset: f32,
        content_logical_height: f32,
    ) -> f32 {
        let fragmentainers = &self.node(flow_thread).fragmentainers;
        let Some(first) = fragmentainer_at(fragmentainers, flow_thread_offset) else {
            return flow_thread_offset;
        };
        if first.logical_height >= content_logical_height {
            return flow_thread_offset;
        }
        fragmentainers
            .iter()
            .find(|f| f.logical_top > first.logical_top && f.logical_height >= content_logical_height)
            .map_or(flow_thread_offset, |f| f.logical_top)
    }

    /// Strut that moves content `content_logical_height` tall at `offset`
    /// far enough to fit. `strut_to_next_page` is the distance to the next
    /// fragmentainer; in a nested context the search goes on to a later
    /// fragmentainer that is tall enough.
    #[must_use]
    pub fn calculate_pagination_strut_to_fit_content(
        &self,
        id: BoxId,
        offset: f32,
        strut_to_next_page: f32,
        content_logical_height: f32,
    ) -> f32 {
        let next_page_logical_top = offset + strut_to_next_page;
        if self.page_logical_height_for_offset(id, next_page_logical_top) >= content_logical_height {
            return strut_to_next_page;
        }
        // Pages of a paginated view are all the same height.
        let Some(flow_thread) = self.flow_thread_containing_block(id) else {
            return strut_to_next_page;
        };
        let flow_thread_offset = self.offset_from_logical_top_of_first_page(id) + next_page_logical_top;
        strut_to_next_page
            + self.next_logical_top_for_unbreakable_content(flow_thread, flow_thread_offset, content_logical_height)
            - flow_thread_offset
    }

    /// Space inserted before the box to push it to a later fragmentainer.
    #[must_use]
    pub fn pagination_strut(&self, id: BoxId) -> f32 {
        self.geometry(id).pagination_strut
    }

    /// Record the strut chosen for this box.
    pub fn set_pagination_strut(&mut self, id: BoxId, strut: f32) {
        self.geometry_mut(id).pagination_strut = strut;
        #[cfg(feature = "layout-trace")]
        trace!(target: "trellis::pagination", ?id, strut, "pagination strut");
    }

    /// Block size of the child including overflow that is not clipped.
    #[must_use]
    pub fn logical_height_with_visible_overflow(&self, id: BoxId) -> f32 {
        let height = self.logical_height(id);
        if self.has_overflow_clip(id) {
            return height;
        }
        let overflow = self.layout_overflow_rect(id);
        let bottom = if self.is_horizontal_writing_mode(id) {
            overflow.max_y()
        } else {
            overflow.max_x()
        };
        height.max(bottom)
    }

    /// Record how far `child` (already placed in `parent`) would have to
    /// move to start on the next page, or zero when it fits.
    pub fn update_fragmentation_info_for_child(&mut self, parent: BoxId, child: BoxId) {
        let logical_top = self.logical_top(child);
        let mut offset_to_next_page = 0.0;
        if self.page_logical_height_for_offset(parent, logical_top) > 0.0 {
            let logical_height = self.logical_height_with_visible_overflow(child);
            let space_left = self.page_remaining_logical_height_for_offset(
                parent,
                logical_top,
                PageBoundaryRule::AssociateWithLatterPage,
            );
            if space_left < logical_height {
                offset_to_next_page = space_left;
            }
        }
        self.geometry_mut(child).offset_to_next_page = offset_to_next_page;
    }
}
