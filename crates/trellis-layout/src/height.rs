//! Block-axis sizing.
//!
//! [§ 10.5 Content height: the 'height' property](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
//! [§ 10.7 Minimum and maximum heights](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
//!
//! Unlike widths, heights are often not known when they are asked for. Every
//! function that may fail to resolve returns `Option<f32>`, and `None` has
//! to be handled by the caller: a `min-height` that cannot be resolved acts
//! as 0, a `max-height` as `none`.

#[cfg(feature = "layout-trace")]
use tracing::trace;
use trellis_style::{Length, Overflow, value_for_length};

use crate::geometry::AvailableLogicalHeightType;
use crate::margins::MarginDirection;
use crate::tree::{BoxId, ContainingBlockChain, LayoutTree};
use crate::width::{DEFAULT_REPLACED_SIZE, LogicalExtent, SizeKind};

impl LayoutTree {
    /// What percentages of the view's height resolve against: the page when
    /// printing a paginated view, the visible viewport otherwise.
    #[must_use]
    pub fn view_logical_height_for_percentages(&self) -> f32 {
        let settings = self.settings();
        if settings.printing {
            if let Some(page_height) = settings.page_logical_height {
                return page_height;
            }
        }
        self.visible_view_logical_height()
    }

    fn visible_view_logical_height(&self) -> f32 {
        let (width, height) = self.settings().visible_viewport_size();
        if self.is_horizontal_writing_mode(BoxId::VIEW) {
            height
        } else {
            width
        }
    }

    /// [§ 10.5](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    ///
    /// The content height this box offers its children, clamped by its own
    /// min and max heights. Falls back to the containing block's available
    /// height when the box's own height is not definite.
    #[must_use]
    pub fn available_logical_height(
        &self,
        id: BoxId,
        height_type: AvailableLogicalHeightType,
    ) -> f32 {
        let available =
            self.available_logical_height_using(id, self.style(id).logical_height(), height_type);
        self.constrain_content_box_logical_height_by_min_max(id, available, None)
    }

    /// [`LayoutTree::available_logical_height`] for an arbitrary height
    /// length, without the min/max clamp.
    #[must_use]
    pub fn available_logical_height_using(
        &self,
        id: BoxId,
        height: Length,
        height_type: AvailableLogicalHeightType,
    ) -> f32 {
        if self.is_layout_view(id) {
            return self.visible_view_logical_height();
        }

        // Cells grow to whatever height the table gives them; until then
        // they only have what they currently hold.
        if self.is_table_cell(id) && (height.is_auto() || height.has_percent()) {
            if let Some(override_height) = self.geometry(id).overrides.content_logical_height {
                return override_height;
            }
            return self.logical_height(id) - self.border_and_padding_logical_height(id);
        }

        if self.is_flex_item(id) {
            if let Some(stretched) = self.geometry(id).overrides.stretched_flex_height {
                return stretched;
            }
        }

        if height.has_percent() && self.is_out_of_flow_positioned(id) {
            let available = self
                .containing_block(id)
                .map_or(0.0, |cb| self.containing_block_logical_height_for_positioned(id, cb, true));
            return self.adjust_content_box_logical_height_for_box_sizing(
                id,
                value_for_length(height, available),
            );
        }

        if let Some(with_scrollbar) =
            self.compute_content_and_scrollbar_logical_height_using(id, SizeKind::Main, height, None)
        {
            return (self.adjust_content_box_logical_height_for_box_sizing(id, with_scrollbar)
                - self.scrollbar_logical_height(id))
            .max(0.0);
        }

        // A positioned block with both block offsets set has a definite
        // height even though `height` is auto.
        let style = self.style(id);
        if self.is_layout_block(id)
            && self.is_out_of_flow_positioned(id)
            && style.height.is_auto()
            && !(style.inset.top.is_auto() || style.inset.bottom.is_auto())
        {
            let computed = self.compute_logical_height_from(id, self.logical_height(id), 0.0);
            let content = computed.extent
                - self.border_and_padding_logical_height(id)
                - self.scrollbar_logical_height(id);
            return self.adjust_content_box_logical_height_for_box_sizing(id, content);
        }

        let mut available = self.containing_block_logical_height_for_content(id, height_type);
        if height_type == AvailableLogicalHeightType::ExcludeMarginBorderPadding {
            available -= self.margin_before(id)
                + self.margin_after(id)
                + self.border_and_padding_logical_height(id);
        }
        available
    }

    /// [§ 10.7 Minimum and maximum heights](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    ///
    /// Clamp a border-box height. An unresolvable `max-height` is ignored.
    #[must_use]
    pub fn constrain_logical_height_by_min_max(
        &self,
        id: BoxId,
        height: f32,
        intrinsic_content_height: Option<f32>,
    ) -> f32 {
        let style = self.style(id);
        let mut height = height;
        if !style.logical_max_height().is_max_size_none() {
            if let Some(max) = self.compute_logical_height_using(
                id,
                SizeKind::Max,
                style.logical_max_height(),
                intrinsic_content_height,
            ) {
                height = height.min(max);
            }
        }
        let min = self
            .compute_logical_height_using(
                id,
                SizeKind::Min,
                style.logical_min_height(),
                intrinsic_content_height,
            )
            .unwrap_or(0.0);
        height.max(min)
    }

    /// Clamp a content-box height.
    ///
    /// When both the height and the limit are percentages, the limit is
    /// resolved against the basis already implied by the height instead of
    /// walking the containing blocks a second time.
    #[must_use]
    pub fn constrain_content_box_logical_height_by_min_max(
        &self,
        id: BoxId,
        height: f32,
        intrinsic_content_height: Option<f32>,
    ) -> f32 {
        let style = self.style(id);
        let mut height = height;
        let percent_basis = |height: f32| match style.logical_height() {
            Length::Percent(p) if p != 0.0 => Some(height / p * 100.0),
            _ => None,
        };

        let max = style.logical_max_height();
        if !max.is_max_size_none() {
            match (max, percent_basis(height)) {
                (Length::Percent(_), Some(basis)) => {
                    height = height.min(value_for_length(max, basis));
                }
                _ => {
                    if let Some(max_height) = self.compute_content_logical_height(
                        id,
                        SizeKind::Max,
                        max,
                        intrinsic_content_height,
                    ) {
                        height = height.min(max_height);
                    }
                }
            }
        }

        let min = style.logical_min_height();
        match (min, percent_basis(height)) {
            (Length::Percent(_), Some(basis)) => height.max(value_for_length(min, basis)),
            _ => height.max(
                self.compute_content_logical_height(id, SizeKind::Min, min, intrinsic_content_height)
                    .unwrap_or(0.0),
            ),
        }
    }

    /// Resolve the block size and write it, with the block position and
    /// margins, into the geometry record.
    ///
    /// The height the box had before (its laid-out content) becomes the
    /// intrinsic content height the intrinsic keywords resolve to.
    pub fn update_logical_height(&mut self, id: BoxId) {
        let content_height = self.content_logical_height(id);
        self.geometry_mut(id).intrinsic_content_logical_height = Some(content_height);

        let computed = self.compute_logical_height(id);
        let wm = self.style(id).writing_mode;
        let geometry = self.geometry_mut(id);
        geometry.set_logical_height(wm, computed.extent);
        geometry.set_logical_top(wm, computed.position);
        geometry.margin.set_before(wm, computed.margins.start);
        geometry.margin.set_after(wm, computed.margins.end);
    }

    /// Resolve the block size from the box's current height and position.
    #[must_use]
    pub fn compute_logical_height(&self, id: BoxId) -> LogicalExtent {
        let height = if self.style(id).contain.size {
            self.border_and_padding_logical_height(id)
        } else {
            self.logical_height(id)
        };
        self.compute_logical_height_from(id, height, self.logical_top(id))
    }

    /// [§ 10.6.3 Block-level non-replaced elements in normal flow when 'overflow' computes to 'visible'](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    ///
    /// Resolve the block size of a box whose content is `logical_height`
    /// tall at `logical_top`. Nothing is written; this is also the scratch
    /// pass used to find the height of a positioned box with both offsets
    /// set.
    #[must_use]
    pub fn compute_logical_height_from(
        &self,
        id: BoxId,
        logical_height: f32,
        logical_top: f32,
    ) -> LogicalExtent {
        let mut computed = LogicalExtent {
            extent: logical_height,
            position: logical_top,
            ..LogicalExtent::default()
        };

        if self.is_layout_view(id) {
            computed.extent = self.settings().viewport_logical_height();
            return computed;
        }

        // Cell height is managed by the table.
        if self.is_table_cell(id) {
            return computed;
        }

        let style = self.style(id);
        let mut height_length = Length::Auto;
        if self.is_out_of_flow_positioned(id) {
            computed = self.compute_positioned_logical_height(id, logical_height);
        } else {
            let Some(cb) = self.containing_block(id) else {
                return computed;
            };

            // An orthogonal box resolves its block-axis margins like inline
            // margins so `auto` centers it in the containing block's line.
            let flow_direction = if self.is_perpendicular_to(id, cb) {
                MarginDirection::Inline
            } else {
                MarginDirection::Block
            };

            if self.is_table(id) {
                computed.margins = self.compute_margins_for_direction(
                    id,
                    flow_direction,
                    cb,
                    self.containing_block_logical_width_for_content(id),
                    computed.extent,
                    style.margin_before(),
                    style.margin_after(),
                );
                return computed;
            }

            let bp = self.border_and_padding_logical_height(id);
            let intrinsic = Some(computed.extent - bp);
            let mut check_min_max_height = false;
            if let Some(mut content_height) = self.geometry(id).overrides.content_logical_height {
                // [§ 6.6 Automatic Minimum Size of Grid Items](https://www.w3.org/TR/css-grid-1/#min-size-auto)
                if self.is_grid_item(id)
                    && style.logical_min_height().is_auto()
                    && style.overflow_y == Overflow::Visible
                {
                    if let Some(min_content) = self.compute_content_logical_height(
                        id,
                        SizeKind::Min,
                        Length::MinContent,
                        intrinsic,
                    ) {
                        content_height = content_height.max(
                            self.constrain_content_box_logical_height_by_min_max(
                                id,
                                min_content,
                                intrinsic,
                            ),
                        );
                    }
                }
                height_length = Length::px(content_height);
            } else if self.should_compute_size_as_replaced(id) {
                height_length = Length::px(self.compute_replaced_logical_height(id));
            } else {
                height_length = style.logical_height();
                check_min_max_height = true;
            }

            computed.extent = if check_min_max_height {
                let preferred = self
                    .compute_logical_height_using(id, SizeKind::Main, height_length, intrinsic)
                    .unwrap_or(computed.extent);
                self.constrain_logical_height_by_min_max(id, preferred, intrinsic)
            } else {
                value_for_length(height_length, 0.0) + bp
            };

            computed.margins = self.compute_margins_for_direction(
                id,
                flow_direction,
                cb,
                self.containing_block_logical_width_for_content(id),
                computed.extent,
                style.margin_before(),
                style.margin_after(),
            );
        }

        // [§ 3.6 The html element fills the viewport quirk](https://quirks.spec.whatwg.org/#the-html-element-fills-the-viewport-quirk)
        //
        // Print layout needs the same stretch for percentage heights on the
        // root and body, since the printed view has no height of its own.
        let paginated_content_needs_base_height = self.settings().printing
            && height_length.has_percent()
            && (self.is_document_element(id)
                || (self.is_body(id)
                    && self
                        .viewport_defining_box()
                        .is_some_and(|html| self.style(html).logical_height().has_percent())))
            && !self.is_inline(id);
        if self.stretches_to_viewport(id) || paginated_content_needs_base_height {
            let margins = computed.margins.start + computed.margins.end;
            let visible_height = self.view_logical_height_for_percentages();
            if self.is_document_element(id) {
                computed.extent = computed.extent.max(visible_height - margins);
            } else if let Some(parent) = self.parent_box(id) {
                let margins_borders_padding = margins
                    + self.margin_before(parent)
                    + self.margin_after(parent)
                    + self.border_and_padding_logical_height(parent);
                computed.extent = computed.extent.max(visible_height - margins_borders_padding);
            }
        }

        #[cfg(feature = "layout-trace")]
        trace!(
            target: "trellis::height",
            ?id,
            extent = computed.extent,
            margin_before = computed.margins.start,
            margin_after = computed.margins.end,
            "computed logical height"
        );
        computed
    }

    /// Border-and-padding height of a box that has not been laid out,
    /// resolved as if its content were empty.
    #[must_use]
    pub fn compute_logical_height_without_layout(&self, id: BoxId) -> f32 {
        self.compute_logical_height_from(id, self.border_and_padding_logical_height(id), 0.0)
            .extent
    }

    /// Border-box block size for one sizing property, or `None` when it
    /// cannot be resolved.
    #[must_use]
    pub fn compute_logical_height_using(
        &self,
        id: BoxId,
        kind: SizeKind,
        height: Length,
        intrinsic_content_height: Option<f32>,
    ) -> Option<f32> {
        let logical_height = self.compute_content_and_scrollbar_logical_height_using(
            id,
            kind,
            height,
            intrinsic_content_height,
        )?;
        Some(if height.is_specified() {
            self.adjust_border_box_logical_height_for_box_sizing(id, logical_height)
        } else {
            logical_height + self.border_and_padding_logical_height(id)
        })
    }

    /// Content-box block size for one sizing property, without the
    /// scrollbar.
    #[must_use]
    pub fn compute_content_logical_height(
        &self,
        id: BoxId,
        kind: SizeKind,
        height: Length,
        intrinsic_content_height: Option<f32>,
    ) -> Option<f32> {
        let with_scrollbar = self.compute_content_and_scrollbar_logical_height_using(
            id,
            kind,
            height,
            intrinsic_content_height,
        )?;
        // Keywords are not adjusted for box-sizing.
        let adjusted = if height.is_specified() {
            self.adjust_content_box_logical_height_for_box_sizing(id, with_scrollbar)
        } else {
            with_scrollbar
        };
        Some((adjusted - self.scrollbar_logical_height(id)).max(0.0))
    }

    /// [§ 5.1 Intrinsic Sizes](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
    ///
    /// In the block axis the min-content, max-content and fit-content sizes
    /// are all the content height.
    #[must_use]
    pub fn compute_intrinsic_logical_content_height_using(
        &self,
        id: BoxId,
        height: Length,
        intrinsic_content_height: f32,
        border_and_padding: f32,
    ) -> f32 {
        match height {
            Length::MinContent | Length::MaxContent | Length::FitContent => {
                if self.is_atomic_inline_level(id) {
                    self.intrinsic_logical_height(id)
                } else {
                    intrinsic_content_height
                }
            }
            Length::FillAvailable => {
                self.containing_block(id).map_or(0.0, |cb| {
                    self.available_logical_height(
                        cb,
                        AvailableLogicalHeightType::ExcludeMarginBorderPadding,
                    )
                }) - border_and_padding
            }
            _ => 0.0,
        }
    }

    /// Content height including the scrollbar for one sizing property.
    ///
    /// `auto` resolves only as a minimum (to 0); intrinsic keywords need the
    /// intrinsic content height; percentages walk the containing blocks.
    #[must_use]
    pub fn compute_content_and_scrollbar_logical_height_using(
        &self,
        id: BoxId,
        kind: SizeKind,
        height: Length,
        intrinsic_content_height: Option<f32>,
    ) -> Option<f32> {
        match height {
            Length::Auto => (kind == SizeKind::Min).then_some(0.0),
            Length::MinContent | Length::MaxContent | Length::FitContent | Length::FillAvailable => {
                let intrinsic = intrinsic_content_height?;
                Some(
                    self.compute_intrinsic_logical_content_height_using(
                        id,
                        height,
                        intrinsic,
                        self.border_and_padding_logical_height(id),
                    ) + self.scrollbar_logical_height(id),
                )
            }
            Length::Fixed(value) => Some(value),
            Length::Percent(_) | Length::Calc { .. } => {
                self.compute_percentage_logical_height(id, height)
            }
            Length::MaxSizeNone => None,
        }
    }

    /// Natural block size of replaced content.
    #[must_use]
    pub fn intrinsic_logical_height(&self, id: BoxId) -> f32 {
        let (width, height) = self.geometry(id).intrinsic_size.unwrap_or(DEFAULT_REPLACED_SIZE);
        if self.is_horizontal_writing_mode(id) {
            height
        } else {
            width
        }
    }

    /// [§ 10.6.2 Inline replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-height)
    ///
    /// Content-box block size of replaced content, clamped by min and max.
    #[must_use]
    pub fn compute_replaced_logical_height(&self, id: BoxId) -> f32 {
        let height = self.compute_replaced_logical_height_using(
            id,
            SizeKind::Main,
            self.style(id).logical_height(),
        );
        self.compute_replaced_logical_height_respecting_min_max_height(id, height)
    }

    /// "If the height of the containing block is not specified explicitly
    /// (i.e., it depends on content height), and this element is not
    /// absolutely positioned, the percentage value is treated as '0' (for
    /// 'min-height') or 'none' (for 'max-height')."
    #[must_use]
    pub fn logical_height_computes_as_none(&self, id: BoxId, kind: SizeKind) -> bool {
        let style = self.style(id);
        let (height, initial) = match kind {
            SizeKind::Max => (style.logical_max_height(), Length::MaxSizeNone),
            _ => (style.logical_min_height(), Length::Auto),
        };
        if height == initial {
            return true;
        }
        height.has_percent()
            && !self.is_out_of_flow_positioned(id)
            && !self.percentage_logical_height_is_resolvable(id)
    }

    /// Clamp a replaced block size by `min-height` and `max-height`.
    #[must_use]
    pub fn compute_replaced_logical_height_respecting_min_max_height(
        &self,
        id: BoxId,
        height: f32,
    ) -> f32 {
        let style = self.style(id);
        let min = if self.logical_height_computes_as_none(id, SizeKind::Min) {
            0.0
        } else {
            self.compute_replaced_logical_height_using(id, SizeKind::Min, style.logical_min_height())
        };
        let max = if self.logical_height_computes_as_none(id, SizeKind::Max) {
            height
        } else {
            self.compute_replaced_logical_height_using(id, SizeKind::Max, style.logical_max_height())
        };
        min.max(height.min(max))
    }

    /// Content-box block size of replaced content for one sizing property.
    #[must_use]
    pub fn compute_replaced_logical_height_using(
        &self,
        id: BoxId,
        kind: SizeKind,
        height: Length,
    ) -> f32 {
        if kind == SizeKind::Min && height.is_auto() {
            return self.adjust_content_box_logical_height_for_box_sizing(id, 0.0);
        }
        match height {
            Length::Fixed(value) => self.adjust_content_box_logical_height_for_box_sizing(id, value),
            Length::Percent(_) | Length::Calc { .. } => {
                self.compute_replaced_percentage_logical_height(id, height)
            }
            Length::MinContent | Length::MaxContent | Length::FitContent | Length::FillAvailable => {
                let content = self.compute_intrinsic_logical_content_height_using(
                    id,
                    height,
                    self.intrinsic_logical_height(id),
                    self.border_and_padding_logical_height(id),
                );
                self.adjust_content_box_logical_height_for_box_sizing(id, content)
            }
            Length::Auto | Length::MaxSizeNone => self.intrinsic_logical_height(id),
        }
    }

    fn compute_replaced_percentage_logical_height(&self, id: BoxId, height: Length) -> f32 {
        let Some(cb) = self.replaced_percentage_containing_block(id) else {
            return 0.0;
        };

        let mut stretched_height = None;
        if self.is_layout_block(cb) {
            if self.is_flex_item(cb) {
                stretched_height = self.geometry(cb).overrides.stretched_flex_height;
            } else if self.is_grid_item(cb) {
                stretched_height = self.geometry(cb).overrides.content_logical_height;
            }
        }

        let cb_style = self.style(cb);
        if self.is_out_of_flow_positioned(cb)
            && cb_style.height.is_auto()
            && !(cb_style.inset.top.is_auto() || cb_style.inset.bottom.is_auto())
        {
            let computed = self.compute_logical_height_from(cb, self.logical_height(cb), 0.0);
            let new_content_height = computed.extent
                - self.border_and_padding_logical_height(cb)
                - self.scrollbar_logical_height(cb);
            let new_height = self.adjust_content_box_logical_height_for_box_sizing(cb, new_content_height);
            return self.adjust_content_box_logical_height_for_box_sizing(
                id,
                value_for_length(height, new_height),
            );
        }

        let available = if self.is_out_of_flow_positioned(id) {
            self.containing_block_logical_height_for_positioned(id, cb, true)
        } else if let Some(stretched) = stretched_height {
            stretched
        } else if let Some(override_height) =
            self.geometry(id).overrides.containing_block_logical_height
        {
            override_height
        } else {
            let mut available = self.containing_block_logical_height_for_content(
                id,
                AvailableLogicalHeightType::IncludeMarginBorderPadding,
            );
            // Walk out through containers without a definite height. A table
            // cell on the way never squeezes the content below its natural
            // size.
            let mut current = Some(cb);
            while let Some(block) = current.filter(|&b| !self.is_layout_view(b)) {
                let block_height = self.style(block).logical_height();
                if !(block_height.is_auto() || block_height.has_percent()) {
                    break;
                }
                if self.is_table_cell(block) {
                    available = available.max(self.intrinsic_logical_height(id));
                    return value_for_length(
                        height,
                        available - self.border_and_padding_logical_height(id),
                    );
                }
                current = self.containing_block(block);
            }
            available
        };
        self.adjust_content_box_logical_height_for_box_sizing(id, value_for_length(height, available))
    }

    /// The block a replaced box's percentage height refers to: its
    /// container, past any anonymous wrappers.
    pub(crate) fn replaced_percentage_containing_block(&self, id: BoxId) -> Option<BoxId> {
        let mut cb = if self.is_out_of_flow_positioned(id) {
            self.container(id)
        } else {
            self.containing_block(id)
        }?;
        while self.is_anonymous(cb) {
            cb = self.containing_block(cb)?;
        }
        Some(cb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DocumentSettings;
    use crate::tree::{BoxKind, Element};
    use trellis_style::{ComputedStyle, PhysicalSides};

    fn sized(height: Length) -> ComputedStyle {
        ComputedStyle {
            height,
            ..ComputedStyle::default()
        }
    }

    fn tree_with_container(height: Length) -> (LayoutTree, BoxId) {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        tree.update_logical_width(BoxId::VIEW);
        let cb = tree
            .append_child(BoxId::VIEW, BoxKind::Block, Some(Element::Generic), sized(height))
            .unwrap();
        tree.update_logical_width(cb);
        (tree, cb)
    }

    #[test]
    fn test_fixed_height_adds_border_and_padding() {
        let (mut tree, cb) = tree_with_container(Length::px(300.0));
        let id = tree
            .append_child(
                cb,
                BoxKind::Block,
                None,
                ComputedStyle {
                    height: Length::px(100.0),
                    padding: PhysicalSides::uniform(Length::px(5.0)),
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        tree.update_logical_width(id);
        assert_eq!(tree.compute_logical_height(id).extent, 110.0);
    }

    #[test]
    fn test_auto_height_keeps_content_height() {
        let (mut tree, cb) = tree_with_container(Length::Auto);
        let id = tree
            .append_child(
                cb,
                BoxKind::Block,
                None,
                ComputedStyle {
                    min_height: Length::px(20.0),
                    max_height: Length::px(40.0),
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        tree.geometry_mut(id).frame.height = 70.0;
        assert_eq!(tree.compute_logical_height(id).extent, 40.0, "max-height clamps content");
        tree.geometry_mut(id).frame.height = 5.0;
        assert_eq!(tree.compute_logical_height(id).extent, 20.0, "min-height raises content");
    }

    #[test]
    fn test_percentage_of_fixed_containing_block() {
        let (mut tree, cb) = tree_with_container(Length::px(300.0));
        let id = tree
            .append_child(cb, BoxKind::Block, None, sized(Length::percent(50.0)))
            .unwrap();
        assert_eq!(tree.compute_logical_height(id).extent, 150.0);
    }

    #[test]
    fn test_percentage_of_auto_height_is_unresolved() {
        let (mut tree, cb) = tree_with_container(Length::Auto);
        let id = tree
            .append_child(
                cb,
                BoxKind::Block,
                None,
                ComputedStyle {
                    height: Length::percent(50.0),
                    max_height: Length::percent(10.0),
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        tree.geometry_mut(id).frame.height = 42.0;
        assert_eq!(
            tree.compute_logical_height(id).extent,
            42.0,
            "falls back to the content height and ignores the max"
        );
    }

    #[test]
    fn test_percent_min_and_max_share_the_basis() {
        let (mut tree, cb) = tree_with_container(Length::px(400.0));
        let id = tree
            .append_child(
                cb,
                BoxKind::Block,
                None,
                ComputedStyle {
                    height: Length::percent(50.0),
                    max_height: Length::percent(25.0),
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert_eq!(tree.constrain_content_box_logical_height_by_min_max(id, 200.0, None), 100.0);
    }

    #[test]
    fn test_view_height_for_percentages_uses_page_when_printing() {
        let settings = DocumentSettings {
            printing: true,
            page_logical_height: Some(1000.0),
            ..DocumentSettings::default()
        };
        let tree = LayoutTree::new(settings);
        assert_eq!(tree.view_logical_height_for_percentages(), 1000.0);
        let screen = LayoutTree::new(DocumentSettings::default());
        assert_eq!(screen.view_logical_height_for_percentages(), 600.0);
    }

    #[test]
    fn test_quirks_html_and_body_fill_viewport() {
        let settings = DocumentSettings {
            quirks_mode: true,
            ..DocumentSettings::default()
        };
        let mut tree = LayoutTree::new(settings);
        tree.update_logical_width(BoxId::VIEW);
        let html = tree
            .append_child(BoxId::VIEW, BoxKind::Block, Some(Element::Html), ComputedStyle::default())
            .unwrap();
        let body = tree
            .append_child(
                html,
                BoxKind::Block,
                Some(Element::Body),
                ComputedStyle {
                    margin: PhysicalSides::uniform(Length::px(8.0)),
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        tree.update_logical_height(html);
        tree.update_logical_height(body);
        assert_eq!(tree.logical_height(html), 600.0);
        assert_eq!(tree.logical_height(body), 584.0);
    }

    #[test]
    fn test_intrinsic_keyword_needs_content_height() {
        let (mut tree, cb) = tree_with_container(Length::px(300.0));
        let id = tree
            .append_child(cb, BoxKind::Block, None, sized(Length::MinContent))
            .unwrap();
        assert_eq!(
            tree.compute_content_and_scrollbar_logical_height_using(id, SizeKind::Main, Length::MinContent, None),
            None
        );
        assert_eq!(
            tree.compute_content_and_scrollbar_logical_height_using(
                id,
                SizeKind::Main,
                Length::MinContent,
                Some(33.0)
            ),
            Some(33.0)
        );
        assert_eq!(
            tree.compute_content_and_scrollbar_logical_height_using(id, SizeKind::Min, Length::Auto, None),
            Some(0.0)
        );
    }

    #[test]
    fn test_available_height_excludes_own_box() {
        let (mut tree, cb) = tree_with_container(Length::px(300.0));
        let id = tree
            .append_child(
                cb,
                BoxKind::Block,
                None,
                ComputedStyle {
                    padding: PhysicalSides::uniform(Length::px(10.0)),
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        tree.update_logical_width(id);
        assert_eq!(
            tree.available_logical_height(id, AvailableLogicalHeightType::ExcludeMarginBorderPadding),
            280.0
        );
        assert_eq!(
            tree.available_logical_height(id, AvailableLogicalHeightType::IncludeMarginBorderPadding),
            300.0
        );
    }

    #[test]
    fn test_replaced_percentage_height_through_auto_ancestors() {
        let (mut tree, cb) = tree_with_container(Length::px(200.0));
        let wrapper = tree
            .append_child(cb, BoxKind::Block, Some(Element::Generic), ComputedStyle::default())
            .unwrap();
        let img = tree
            .append_child(wrapper, BoxKind::Replaced, Some(Element::Img), sized(Length::percent(50.0)))
            .unwrap();
        // The wrapper has no height yet, so its available height is the
        // containing block's.
        assert_eq!(tree.compute_replaced_logical_height(img), 100.0);
    }
}
