//! The box tree.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! Boxes live in an arena and refer to each other through [`BoxId`]
//! handles, the same way the DOM arena does. The tree owns the per-box
//! computed style and geometry record, the document settings, and the snap
//! coordinator's relation tables.
//!
//! Every box variant answers the containing-block questions through
//! [`ContainingBlockChain`]; the per-variant rules live in one `match` on
//! [`BoxKind`] instead of a class hierarchy.

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;
use trellis_style::{ComputedStyle, Position};

use crate::error::LayoutError;
use crate::geometry::BoxGeometry;
use crate::settings::DocumentSettings;
use crate::snap::SnapCoordinator;

/// A type-safe index into the box arena.
///
/// Handles stay valid after their box is removed; lookups through
/// [`LayoutTree::get`] then return `None`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BoxId(pub usize);

impl BoxId {
    /// The view box (the initial containing block) is always at index 0.
    pub const VIEW: Self = Self(0);
}

/// The kind of fragmentation context a flow thread establishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlowThreadKind {
    /// [CSS Paged Media](https://www.w3.org/TR/css-page-3/): content flows
    /// through pages.
    Paged,
    /// [CSS Multi-column Layout](https://www.w3.org/TR/css-multicol-1/):
    /// content flows through columns.
    Multicol,
}

/// One column or page of a flow thread, in flow-thread block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fragmentainer {
    /// Offset of the fragmentainer's block-start edge within the flow thread.
    pub logical_top: f32,
    /// Block-axis size of the fragmentainer.
    pub logical_height: f32,
}

/// The layout object variant a box was generated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BoxKind {
    /// The root of the tree; stands for the initial containing block.
    View,
    /// A block container in a block formatting context.
    Block,
    /// `display: list-item`
    ListItem,
    /// The marker box of a list item.
    ListMarker,
    /// An `inline-block` container.
    InlineBlock,
    /// A non-atomic inline box.
    Inline,
    /// A replaced element (image, embedded content, form control).
    Replaced,
    /// A table wrapper box.
    Table,
    /// A table cell.
    TableCell,
    /// A flex container.
    FlexBox,
    /// A grid container.
    Grid,
    /// An anonymous fragmentation context wrapper.
    FlowThread(FlowThreadKind),
}

impl BoxKind {
    /// Replaced content and list markers are leaves.
    #[must_use]
    pub const fn can_have_children(self) -> bool {
        !matches!(self, Self::Replaced | Self::ListMarker)
    }

    /// Block containers: everything that can be a containing block for
    /// in-flow content.
    #[must_use]
    pub const fn is_layout_block(self) -> bool {
        !matches!(self, Self::Inline | Self::Replaced | Self::ListMarker)
    }
}

/// The element that generated a box, for the handful of element-specific
/// rules layout has. Anonymous boxes have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Element {
    /// `<html>`
    Html,
    /// `<body>`
    Body,
    /// `<ol>`
    Ol,
    /// `<ul>`
    Ul,
    /// `<li>`
    Li,
    /// `<input>`
    Input,
    /// `<select>`
    Select,
    /// `<button>`
    Button,
    /// `<textarea>`
    TextArea,
    /// `<legend>`
    Legend,
    /// `<img>`
    Img,
    /// `<hr>`
    Hr,
    /// Any other element.
    Generic,
}

impl Element {
    /// [§ 4.10.2 Categories](https://html.spec.whatwg.org/multipage/forms.html#category-listed)
    /// restricted to the controls layout special-cases.
    #[must_use]
    pub const fn is_form_control(self) -> bool {
        matches!(
            self,
            Self::Input | Self::Select | Self::Button | Self::TextArea
        )
    }
}

/// One node of the box tree.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// The layout object variant.
    pub kind: BoxKind,
    /// Generating element; `None` for anonymous boxes.
    pub element: Option<Element>,
    /// Computed style. Replace it through [`LayoutTree::set_style`] so the
    /// caller gets the old value back for change notifications.
    pub style: ComputedStyle,
    /// Mutable per-pass geometry.
    pub geometry: BoxGeometry,
    /// Parent box, `None` only for the view.
    pub parent: Option<BoxId>,
    /// Children in document order.
    pub children: Vec<BoxId>,
    /// Columns or pages of a flow thread. The last entry repeats for
    /// content that runs past it. Empty for other kinds.
    pub fragmentainers: Vec<Fragmentainer>,
    removed: bool,
}

impl LayoutBox {
    fn new(kind: BoxKind, element: Option<Element>, style: ComputedStyle) -> Self {
        Self {
            kind,
            element,
            style,
            geometry: BoxGeometry::default(),
            parent: None,
            children: Vec::new(),
            fragmentainers: Vec::new(),
            removed: false,
        }
    }
}

/// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
///
/// "The position and size of an element's box(es) are sometimes calculated
/// relative to a certain rectangle, called the containing block of the
/// element."
pub trait ContainingBlockChain {
    /// The box's parent in the tree.
    fn parent_box(&self, id: BoxId) -> Option<BoxId>;

    /// The block that sizes and positions `id`.
    fn containing_block(&self, id: BoxId) -> Option<BoxId>;

    /// The box whose coordinate space `id`'s frame is expressed in: the
    /// containing block for out-of-flow boxes, the parent otherwise.
    fn container(&self, id: BoxId) -> Option<BoxId>;
}

/// The arena-backed box tree.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    boxes: Vec<LayoutBox>,
    settings: DocumentSettings,
    viewport_defining_box: Option<BoxId>,
    snap: SnapCoordinator,
}

impl LayoutTree {
    /// A tree holding only the view box.
    #[must_use]
    pub fn new(settings: DocumentSettings) -> Self {
        let style = ComputedStyle {
            writing_mode: settings.writing_mode,
            ..ComputedStyle::default()
        };
        Self {
            boxes: vec![LayoutBox::new(BoxKind::View, None, style)],
            settings,
            viewport_defining_box: None,
            snap: SnapCoordinator::default(),
        }
    }

    /// Document settings this tree lays out under.
    #[must_use]
    pub const fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    /// Mutable access to the settings. The view's writing mode follows
    /// [`DocumentSettings::writing_mode`] on the next call to
    /// [`LayoutTree::sync_view_style`].
    pub const fn settings_mut(&mut self) -> &mut DocumentSettings {
        &mut self.settings
    }

    /// Copy the settings' writing mode onto the view box.
    pub fn sync_view_style(&mut self) {
        self.boxes[BoxId::VIEW.0].style.writing_mode = self.settings.writing_mode;
    }

    /// Number of arena slots, removed boxes included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Always false: the view cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Look up a live box.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&LayoutBox> {
        self.boxes.get(id.0).filter(|b| !b.removed)
    }

    /// Access a box that is known to exist.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this tree.
    #[must_use]
    pub fn node(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }

    /// Mutable access to a live box.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownBox`] if `id` does not name a live box.
    pub fn box_mut(&mut self, id: BoxId) -> Result<&mut LayoutBox, LayoutError> {
        self.boxes
            .get_mut(id.0)
            .filter(|b| !b.removed)
            .ok_or(LayoutError::UnknownBox(id))
    }

    /// Computed style of a box.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this tree.
    #[must_use]
    pub fn style(&self, id: BoxId) -> &ComputedStyle {
        &self.boxes[id.0].style
    }

    /// Geometry record of a box.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this tree.
    #[must_use]
    pub fn geometry(&self, id: BoxId) -> &BoxGeometry {
        &self.boxes[id.0].geometry
    }

    /// Mutable geometry record of a box.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this tree.
    pub fn geometry_mut(&mut self, id: BoxId) -> &mut BoxGeometry {
        &mut self.boxes[id.0].geometry
    }

    /// Kind of a box.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this tree.
    #[must_use]
    pub fn kind(&self, id: BoxId) -> BoxKind {
        self.boxes[id.0].kind
    }

    /// Generating element of a box.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this tree.
    #[must_use]
    pub fn element(&self, id: BoxId) -> Option<Element> {
        self.boxes[id.0].element
    }

    /// Children of a box in document order.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.get(id).map_or(&[], |b| b.children.as_slice())
    }

    /// Snap container/area relation tables.
    #[must_use]
    pub const fn snap(&self) -> &SnapCoordinator {
        &self.snap
    }

    pub(crate) const fn snap_mut(&mut self) -> &mut SnapCoordinator {
        &mut self.snap
    }

    /// Create a box and append it as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::UnknownBox`] if `parent` is not live.
    /// - [`LayoutError::CannotHaveChildren`] if `parent` is a leaf kind.
    /// - [`LayoutError::SecondView`] if `kind` is [`BoxKind::View`].
    pub fn append_child(
        &mut self,
        parent: BoxId,
        kind: BoxKind,
        element: Option<Element>,
        style: ComputedStyle,
    ) -> Result<BoxId, LayoutError> {
        if kind == BoxKind::View {
            return Err(LayoutError::SecondView);
        }
        let parent_kind = self.get(parent).ok_or(LayoutError::UnknownBox(parent))?.kind;
        if !parent_kind.can_have_children() {
            return Err(LayoutError::CannotHaveChildren {
                parent,
                kind: parent_kind,
            });
        }

        let id = BoxId(self.boxes.len());
        let mut layout_box = LayoutBox::new(kind, element, style);
        layout_box.parent = Some(parent);
        self.boxes.push(layout_box);
        self.boxes[parent.0].children.push(id);
        debug!(target: "trellis::tree", ?id, %kind, ?parent, "appended box");
        self.add_scroll_snap_mapping(id);
        Ok(id)
    }

    /// Replace a box's computed style, returning the previous one. The snap
    /// registry follows the new `scroll-snap-*` values.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownBox`] if `id` is not live.
    pub fn set_style(
        &mut self,
        id: BoxId,
        style: ComputedStyle,
    ) -> Result<ComputedStyle, LayoutError> {
        let layout_box = self.box_mut(id)?;
        let old = std::mem::replace(&mut layout_box.style, style.clone());
        if id == BoxId::VIEW {
            self.settings.writing_mode = style.writing_mode;
        }
        self.update_scroll_snap_mapping_after_style_change(id, Some(&style), Some(&old));
        Ok(old)
    }

    /// Detach `id` and all its descendants from the tree.
    ///
    /// Removed boxes leave the snap registry, lose their snap container and
    /// snap areas, and drop out of every percent-height relation.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::RemoveView`] for the view.
    /// - [`LayoutError::UnknownBox`] if `id` is not live.
    pub fn remove_subtree(&mut self, id: BoxId) -> Result<(), LayoutError> {
        if id == BoxId::VIEW {
            return Err(LayoutError::RemoveView);
        }
        let parent = self.get(id).ok_or(LayoutError::UnknownBox(id))?.parent;
        if let Some(parent) = parent {
            self.boxes[parent.0].children.retain(|&c| c != id);
        }

        let removed = self.subtree(id);
        for &b in &removed {
            self.clear_scroll_snap_mapping(b);
            self.snap.forget_box(b);
            self.remove_from_percent_height_containers(b);
            let dependants = std::mem::take(&mut self.boxes[b.0].geometry.percent_height.descendants);
            for d in dependants {
                let _ = self.boxes[d.0].geometry.percent_height.containers.remove(&b);
            }
            if self.viewport_defining_box == Some(b) {
                self.viewport_defining_box = None;
            }
        }
        for &b in &removed {
            let node = &mut self.boxes[b.0];
            node.removed = true;
            node.parent = None;
            node.children.clear();
        }
        debug!(target: "trellis::tree", ?id, count = removed.len(), "removed subtree");
        Ok(())
    }

    /// `id` followed by all its descendants in pre-order.
    #[must_use]
    pub fn subtree(&self, id: BoxId) -> Vec<BoxId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Iterate over all ancestors of a box, from parent to the view.
    #[must_use]
    pub fn ancestors(&self, id: BoxId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent_box(id),
        }
    }

    /// Iterate over the containing-block chain, from the containing block
    /// up to the view.
    #[must_use]
    pub fn containing_blocks(&self, id: BoxId) -> ContainingBlockIterator<'_> {
        ContainingBlockIterator {
            tree: self,
            current: self.containing_block(id),
        }
    }

    /// The box of the viewport-defining element: an explicit override, or
    /// else the first `<html>` child of the view.
    #[must_use]
    pub fn viewport_defining_box(&self) -> Option<BoxId> {
        self.viewport_defining_box.or_else(|| {
            self.children(BoxId::VIEW)
                .iter()
                .copied()
                .find(|&c| self.element(c) == Some(Element::Html))
        })
    }

    /// Override which box defines the viewport.
    pub const fn set_viewport_defining_box(&mut self, id: Option<BoxId>) {
        self.viewport_defining_box = id;
    }

    // Classification predicates.

    /// The view box.
    #[must_use]
    pub fn is_layout_view(&self, id: BoxId) -> bool {
        self.kind(id) == BoxKind::View
    }

    /// A block container.
    #[must_use]
    pub fn is_layout_block(&self, id: BoxId) -> bool {
        self.kind(id).is_layout_block()
    }

    /// A box without a generating element.
    #[must_use]
    pub fn is_anonymous(&self, id: BoxId) -> bool {
        self.element(id).is_none() && !self.is_layout_view(id)
    }

    /// The `<html>` element's box.
    #[must_use]
    pub fn is_document_element(&self, id: BoxId) -> bool {
        self.element(id) == Some(Element::Html)
    }

    /// The `<body>` element's box.
    #[must_use]
    pub fn is_body(&self, id: BoxId) -> bool {
        self.element(id) == Some(Element::Body)
    }

    /// A table wrapper.
    #[must_use]
    pub fn is_table(&self, id: BoxId) -> bool {
        self.kind(id) == BoxKind::Table
    }

    /// A table cell.
    #[must_use]
    pub fn is_table_cell(&self, id: BoxId) -> bool {
        self.kind(id) == BoxKind::TableCell
    }

    /// A flex container.
    #[must_use]
    pub fn is_flexible_box(&self, id: BoxId) -> bool {
        self.kind(id) == BoxKind::FlexBox
    }

    /// A grid container.
    #[must_use]
    pub fn is_layout_grid(&self, id: BoxId) -> bool {
        self.kind(id) == BoxKind::Grid
    }

    /// A flow thread of either kind.
    #[must_use]
    pub fn flow_thread_kind(&self, id: BoxId) -> Option<FlowThreadKind> {
        match self.kind(id) {
            BoxKind::FlowThread(kind) => Some(kind),
            _ => None,
        }
    }

    /// `position: absolute | fixed`
    #[must_use]
    pub fn is_out_of_flow_positioned(&self, id: BoxId) -> bool {
        !self.is_layout_view(id) && self.style(id).has_out_of_flow_position()
    }

    /// `position: relative | sticky`
    #[must_use]
    pub fn is_in_flow_positioned(&self, id: BoxId) -> bool {
        self.style(id).position.is_in_flow_positioned()
    }

    /// A floated box. Out-of-flow positioning wins over `float`.
    #[must_use]
    pub fn is_floating(&self, id: BoxId) -> bool {
        !self.is_layout_view(id)
            && self.style(id).is_floating()
            && !self.style(id).has_out_of_flow_position()
    }

    /// The box participates in an inline formatting context.
    #[must_use]
    pub fn is_inline(&self, id: BoxId) -> bool {
        match self.kind(id) {
            BoxKind::Inline | BoxKind::ListMarker => true,
            BoxKind::View | BoxKind::FlowThread(_) => false,
            _ => {
                self.style(id).display.is_inline_level()
                    && !self.is_floating(id)
                    && !self.is_out_of_flow_positioned(id)
            }
        }
    }

    /// [§ 9.2.2 Inline-level elements](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    ///
    /// "Inline-level boxes that are not inline boxes (such as replaced
    /// inline-level elements, inline-block elements, and inline-table
    /// elements) are called atomic inline-level boxes because they
    /// participate in their inline formatting context as a single opaque box."
    #[must_use]
    pub fn is_atomic_inline_level(&self, id: BoxId) -> bool {
        self.is_inline(id) && !matches!(self.kind(id), BoxKind::Inline | BoxKind::ListMarker)
    }

    /// An atomic inline that is a block container rather than replaced
    /// content.
    #[must_use]
    pub fn is_inline_block_or_inline_table(&self, id: BoxId) -> bool {
        self.is_atomic_inline_level(id) && self.kind(id) != BoxKind::Replaced
    }

    /// Sized with the replaced-element rules.
    #[must_use]
    pub fn should_compute_size_as_replaced(&self, id: BoxId) -> bool {
        self.kind(id) == BoxKind::Replaced
    }

    /// Atomic inlines, form controls and images avoid floats like replaced
    /// content does.
    #[must_use]
    pub fn should_be_considered_as_replaced(&self, id: BoxId) -> bool {
        self.is_atomic_inline_level(id)
            || self
                .element(id)
                .is_some_and(|e| e.is_form_control() || e == Element::Img)
    }

    /// An in-flow child of a flex container.
    #[must_use]
    pub fn is_flex_item(&self, id: BoxId) -> bool {
        self.parent_box(id).is_some_and(|p| self.is_flexible_box(p))
            && !self.is_inline(id)
            && !self.is_floating(id)
            && !self.is_out_of_flow_positioned(id)
    }

    /// A child of a grid container.
    #[must_use]
    pub fn is_grid_item(&self, id: BoxId) -> bool {
        self.parent_box(id).is_some_and(|p| self.is_layout_grid(p))
    }

    /// The box's writing mode differs from its parent's, or it has no
    /// parent.
    #[must_use]
    pub fn is_writing_mode_root(&self, id: BoxId) -> bool {
        self.parent_box(id)
            .is_none_or(|p| self.style(p).writing_mode != self.style(id).writing_mode)
    }

    /// Lines run horizontally in the box's writing mode.
    #[must_use]
    pub fn is_horizontal_writing_mode(&self, id: BoxId) -> bool {
        self.style(id).is_horizontal_writing_mode()
    }

    /// `id` and `other` have orthogonal inline axes.
    #[must_use]
    pub fn is_perpendicular_to(&self, id: BoxId, other: BoxId) -> bool {
        self.is_horizontal_writing_mode(id) != self.is_horizontal_writing_mode(other)
    }

    /// The containing block's inline axis is orthogonal to the box's.
    #[must_use]
    pub fn has_perpendicular_containing_block(&self, id: BoxId) -> bool {
        self.containing_block(id)
            .is_some_and(|cb| self.is_perpendicular_to(id, cb))
    }

    /// [§ 3 Scrolling and Clipping Overflow](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    ///
    /// A block whose overflow is anything but `visible` on either axis. The
    /// view scrolls but is not counted here.
    #[must_use]
    pub fn has_overflow_clip(&self, id: BoxId) -> bool {
        let style = self.style(id);
        self.is_layout_block(id)
            && !self.is_layout_view(id)
            && (style.overflow_x.clips() || style.overflow_y.clips())
    }

    /// Clipped and user-scrollable horizontally.
    #[must_use]
    pub fn scrolls_overflow_x(&self, id: BoxId) -> bool {
        self.has_overflow_clip(id) && self.style(id).overflow_x.scrolls()
    }

    /// Clipped and user-scrollable vertically.
    #[must_use]
    pub fn scrolls_overflow_y(&self, id: BoxId) -> bool {
        self.has_overflow_clip(id) && self.style(id).overflow_y.scrolls()
    }

    /// Scrolls along its own block axis.
    #[must_use]
    pub fn scrolls_overflow_block(&self, id: BoxId) -> bool {
        if self.is_horizontal_writing_mode(id) {
            self.scrolls_overflow_y(id)
        } else {
            self.scrolls_overflow_x(id)
        }
    }

    /// [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
    ///
    /// "The border box of a table, a block-level replaced element, or an
    /// element in the normal flow that establishes a new block formatting
    /// context (such as an element with 'overflow' other than 'visible')
    /// must not overlap the margin box of any floats in the same block
    /// formatting context as the element itself."
    #[must_use]
    pub fn avoids_floats(&self, id: BoxId) -> bool {
        let style = self.style(id);
        self.should_be_considered_as_replaced(id)
            || self.has_overflow_clip(id)
            || matches!(self.element(id), Some(Element::Hr | Element::Legend))
            || self.is_writing_mode_root(id)
            || self.is_flex_item(id)
            || style.contain.paint
            || style.contain.layout
    }

    /// Only in-flow, non-inline, auto-width float avoiders narrow
    /// themselves next to floats.
    #[must_use]
    pub fn shrink_to_avoid_floats(&self, id: BoxId) -> bool {
        if self.is_inline(id) || !self.avoids_floats(id) || self.is_floating(id) {
            return false;
        }
        self.style(id).width.is_auto()
    }

    /// Controls whose `auto` width means "fit the content".
    #[must_use]
    pub fn auto_width_should_fit_content(&self, id: BoxId) -> bool {
        match self.element(id) {
            Some(e) if e.is_form_control() => true,
            Some(Element::Legend) => !self.is_out_of_flow_positioned(id),
            _ => false,
        }
    }

    /// [§ 3.6 The html element fills the viewport quirk](https://quirks.spec.whatwg.org/#the-html-element-fills-the-viewport-quirk)
    /// and [§ 3.7 The body element fills the html element quirk](https://quirks.spec.whatwg.org/#the-body-element-fills-the-html-element-quirk)
    #[must_use]
    pub fn stretches_to_viewport(&self, id: BoxId) -> bool {
        self.settings.quirks_mode
            && (self.is_document_element(id) || self.is_body(id))
            && self.style(id).logical_height().is_auto()
            && !self.is_floating(id)
            && !self.is_out_of_flow_positioned(id)
            && !self.is_inline(id)
            && self.flow_thread_containing_block(id).is_none()
    }

    /// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
    ///
    /// "... the top and bottom margins of a box that does not establish a new
    /// block formatting context and that has zero computed 'min-height',
    /// zero or 'auto' computed 'height', and no in-flow children" collapse
    /// through. Children that collapse through themselves do not count.
    #[must_use]
    pub fn is_self_collapsing_block(&self, id: BoxId) -> bool {
        if !matches!(self.kind(id), BoxKind::Block | BoxKind::ListItem)
            || self.is_inline(id)
            || self.is_floating(id)
            || self.is_out_of_flow_positioned(id)
            || self.has_overflow_clip(id)
        {
            return false;
        }
        let style = self.style(id);
        let height = style.logical_height();
        let height_is_zero = height.is_auto() || (height.is_fixed() && height.is_zero());
        let min_height_is_zero = style.logical_min_height().is_zero();
        if !height_is_zero || !min_height_is_zero {
            return false;
        }
        let wm = style.writing_mode;
        if style.border.before(wm) > 0.0 || style.border.after(wm) > 0.0 {
            return false;
        }
        if !style.padding.before(wm).is_zero() || !style.padding.after(wm).is_zero() {
            return false;
        }
        self.children(id).iter().all(|&child| {
            self.is_floating(child)
                || self.is_out_of_flow_positioned(child)
                || self.is_self_collapsing_block(child)
        })
    }

    /// The nearest enclosing flow thread, found along the containing-block
    /// chain.
    #[must_use]
    pub fn flow_thread_containing_block(&self, id: BoxId) -> Option<BoxId> {
        self.containing_blocks(id)
            .find(|&cb| self.flow_thread_kind(cb).is_some())
    }

    fn nearest_layout_block_ancestor(&self, id: BoxId) -> Option<BoxId> {
        self.ancestors(id).find(|&a| self.is_layout_block(a))
    }
}

impl ContainingBlockChain for LayoutTree {
    fn parent_box(&self, id: BoxId) -> Option<BoxId> {
        self.get(id).and_then(|b| b.parent)
    }

    fn containing_block(&self, id: BoxId) -> Option<BoxId> {
        let layout_box = self.get(id)?;
        if layout_box.kind == BoxKind::View {
            return None;
        }
        match layout_box.style.position {
            // [§ 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
            //
            // "If the element has 'position: fixed', the containing block is
            // established by the viewport..."
            Position::Fixed => Some(BoxId::VIEW),
            // "If the element has 'position: absolute', the containing block
            // is established by the nearest ancestor with a 'position' of
            // 'absolute', 'relative' or 'fixed'..."
            Position::Absolute => {
                let positioned = self.ancestors(id).find(|&a| {
                    self.is_layout_view(a) || self.style(a).position.is_positioned()
                })?;
                if self.is_layout_block(positioned) {
                    Some(positioned)
                } else {
                    // "In the case that the ancestor is an inline element..."
                    // the block that contains it stands in.
                    self.nearest_layout_block_ancestor(positioned)
                }
            }
            // "...the containing block is formed by the content edge of the
            // nearest ancestor box that is a block container..."
            _ => self.nearest_layout_block_ancestor(id),
        }
    }

    fn container(&self, id: BoxId) -> Option<BoxId> {
        if self.is_out_of_flow_positioned(id) {
            self.containing_block(id)
        } else {
            self.parent_box(id)
        }
    }
}

/// Iterator over ancestors of a box.
pub struct AncestorIterator<'a> {
    tree: &'a LayoutTree,
    current: Option<BoxId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent_box(id);
        Some(id)
    }
}

/// Iterator over a box's containing-block chain.
pub struct ContainingBlockIterator<'a> {
    tree: &'a LayoutTree,
    current: Option<BoxId>,
}

impl Iterator for ContainingBlockIterator<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.containing_block(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_style::{Display, Float};

    fn tree() -> LayoutTree {
        LayoutTree::new(DocumentSettings::default())
    }

    #[test]
    fn test_append_child_rejects_leaf_parent() {
        let mut t = tree();
        let img = t
            .append_child(BoxId::VIEW, BoxKind::Replaced, Some(Element::Img), ComputedStyle::default())
            .unwrap();
        let err = t
            .append_child(img, BoxKind::Block, None, ComputedStyle::default())
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::CannotHaveChildren {
                parent: img,
                kind: BoxKind::Replaced
            }
        );
        assert_eq!(
            t.append_child(BoxId::VIEW, BoxKind::View, None, ComputedStyle::default()),
            Err(LayoutError::SecondView)
        );
    }

    #[test]
    fn test_absolute_containing_block_is_nearest_positioned_ancestor() {
        let mut t = tree();
        let outer = t
            .append_child(
                BoxId::VIEW,
                BoxKind::Block,
                None,
                ComputedStyle {
                    position: Position::Relative,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        let inner = t
            .append_child(outer, BoxKind::Block, None, ComputedStyle::default())
            .unwrap();
        let abs = t
            .append_child(
                inner,
                BoxKind::Block,
                None,
                ComputedStyle {
                    position: Position::Absolute,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert_eq!(t.containing_block(abs), Some(outer));
        assert_eq!(t.container(abs), Some(outer));
        assert_eq!(t.containing_block(inner), Some(outer));
        assert_eq!(t.containing_block(BoxId::VIEW), None);
    }

    #[test]
    fn test_absolute_inside_relative_inline_uses_enclosing_block() {
        let mut t = tree();
        let block = t
            .append_child(BoxId::VIEW, BoxKind::Block, None, ComputedStyle::default())
            .unwrap();
        let span = t
            .append_child(
                block,
                BoxKind::Inline,
                None,
                ComputedStyle {
                    display: Display::Inline,
                    position: Position::Relative,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        let abs = t
            .append_child(
                span,
                BoxKind::Block,
                None,
                ComputedStyle {
                    position: Position::Absolute,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert_eq!(t.containing_block(abs), Some(block));
        assert_eq!(t.parent_box(abs), Some(span));
    }

    #[test]
    fn test_fixed_containing_block_is_view() {
        let mut t = tree();
        let outer = t
            .append_child(
                BoxId::VIEW,
                BoxKind::Block,
                None,
                ComputedStyle {
                    position: Position::Relative,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        let fixed = t
            .append_child(
                outer,
                BoxKind::Block,
                None,
                ComputedStyle {
                    position: Position::Fixed,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert_eq!(t.containing_block(fixed), Some(BoxId::VIEW));
    }

    #[test]
    fn test_inline_block_classification() {
        let mut t = tree();
        let block = t
            .append_child(BoxId::VIEW, BoxKind::Block, None, ComputedStyle::default())
            .unwrap();
        let inline_block = t
            .append_child(
                block,
                BoxKind::InlineBlock,
                None,
                ComputedStyle {
                    display: Display::InlineBlock,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        let image = t
            .append_child(
                block,
                BoxKind::Replaced,
                Some(Element::Img),
                ComputedStyle {
                    display: Display::Inline,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert!(t.is_inline_block_or_inline_table(inline_block));
        assert!(t.is_atomic_inline_level(image));
        assert!(!t.is_inline_block_or_inline_table(image));
        assert!(t.avoids_floats(image));

        let floated = t
            .append_child(
                block,
                BoxKind::InlineBlock,
                None,
                ComputedStyle {
                    display: Display::InlineBlock,
                    float: Float::Left,
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert!(!t.is_inline(floated), "floats are blockified");
    }

    #[test]
    fn test_remove_subtree_invalidates_handles() {
        let mut t = tree();
        let a = t
            .append_child(BoxId::VIEW, BoxKind::Block, None, ComputedStyle::default())
            .unwrap();
        let b = t
            .append_child(a, BoxKind::Block, None, ComputedStyle::default())
            .unwrap();
        t.remove_subtree(a).unwrap();
        assert!(t.get(a).is_none());
        assert!(t.get(b).is_none());
        assert!(t.children(BoxId::VIEW).is_empty());
        assert_eq!(t.remove_subtree(a), Err(LayoutError::UnknownBox(a)));
        assert_eq!(t.remove_subtree(BoxId::VIEW), Err(LayoutError::RemoveView));
    }

    #[test]
    fn test_viewport_defining_box_defaults_to_html() {
        let mut t = tree();
        let html = t
            .append_child(BoxId::VIEW, BoxKind::Block, Some(Element::Html), ComputedStyle::default())
            .unwrap();
        assert_eq!(t.viewport_defining_box(), Some(html));
        t.set_viewport_defining_box(None);
        assert_eq!(t.viewport_defining_box(), Some(html));
    }

    #[test]
    fn test_self_collapsing_block() {
        let mut t = tree();
        let empty = t
            .append_child(BoxId::VIEW, BoxKind::Block, None, ComputedStyle::default())
            .unwrap();
        assert!(t.is_self_collapsing_block(empty));
        let sized = t
            .append_child(
                BoxId::VIEW,
                BoxKind::Block,
                None,
                ComputedStyle {
                    height: trellis_style::Length::px(10.0),
                    ..ComputedStyle::default()
                },
            )
            .unwrap();
        assert!(!t.is_self_collapsing_block(sized));
    }
}
