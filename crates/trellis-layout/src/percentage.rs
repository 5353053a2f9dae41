//! Percentage heights.
//!
//! [§ 10.5 Content height](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
//!
//! "The percentage is calculated with respect to the height of the generated
//! box's containing block. If the height of the containing block is not
//! specified explicitly (i.e., it depends on content height), and this
//! element is not absolutely positioned, the value computes to 'auto'."
//!
//! Resolution walks up the containing-block chain past blocks that do not
//! get a say (anonymous wrappers, and auto-height blocks in quirks mode) and
//! asks the first one that does for its height. Resolving never records
//! anything; a caller that wants to be told when a container's height
//! changes registers the dependency separately with
//! [`LayoutTree::register_percent_height_descendant`].

#[cfg(feature = "layout-trace")]
use tracing::trace;
use trellis_style::{Display, Length, value_for_length};

use crate::tree::{BoxId, ContainingBlockChain, LayoutTree};

/// Result of walking past the containing blocks a percentage height skips.
struct PercentHeightWalk {
    /// The block the percentage resolves against.
    containing_block: BoxId,
    /// The last box on the way there: `containing_block`'s child on the
    /// walk.
    containing_block_child: BoxId,
    /// Every block walked, skipped or resolving.
    walked: Vec<BoxId>,
    skipped_auto_height_containing_block: bool,
    /// Margins, borders and padding of a skipped `<html>` or `<body>`.
    root_margin_border_padding_height: f32,
}

impl LayoutTree {
    /// [§ 3.5 The percentage height calculation quirk](https://quirks.spec.whatwg.org/#the-percentage-height-calculation-quirk)
    ///
    /// A containing block that percentages look through. Orthogonal
    /// containing blocks are never skipped: the percentage then refers to
    /// their width.
    #[must_use]
    pub fn skip_containing_block_for_percent_height_calculation(
        &self,
        id: BoxId,
        containing_block: BoxId,
    ) -> bool {
        if self.is_perpendicular_to(id, containing_block) {
            return false;
        }

        // Anonymous wrappers around inlines, and flow threads, should not
        // get in the way of their children's percentages.
        if self.is_anonymous(containing_block) {
            let display = self.style(containing_block).display;
            return display == Display::Block || display == Display::InlineBlock;
        }

        self.settings().quirks_mode
            && !self.is_table_cell(containing_block)
            && !self.is_out_of_flow_positioned(containing_block)
            && !self.is_layout_grid(containing_block)
            && self.style(containing_block).logical_height().is_auto()
    }

    fn walk_percent_height_containing_blocks(&self, id: BoxId) -> Option<PercentHeightWalk> {
        let mut cb = self.containing_block(id)?;
        let mut walk = PercentHeightWalk {
            containing_block: cb,
            containing_block_child: id,
            walked: vec![cb],
            skipped_auto_height_containing_block: false,
            root_margin_border_padding_height: 0.0,
        };
        while !self.is_layout_view(cb) && self.skip_containing_block_for_percent_height_calculation(id, cb)
        {
            if self.is_body(cb) || self.is_document_element(cb) {
                walk.root_margin_border_padding_height += self.margin_before(cb)
                    + self.margin_after(cb)
                    + self.border_and_padding_logical_height(cb);
            }
            walk.skipped_auto_height_containing_block = true;
            walk.containing_block_child = cb;
            let Some(next) = self.containing_block(cb) else {
                break;
            };
            cb = next;
            walk.walked.push(cb);
        }
        walk.containing_block = cb;
        Some(walk)
    }

    /// A positioned containing block whose height is known without laying
    /// out its content: it has a height, or both block offsets.
    fn is_out_of_flow_positioned_with_specified_height(&self, containing_block: BoxId) -> bool {
        let style = self.style(containing_block);
        self.is_out_of_flow_positioned(containing_block)
            && (!style.logical_height().is_auto()
                || (!style.logical_top().is_auto() && !style.logical_bottom().is_auto()))
    }

    /// Resolve a percentage (or calc) block size against the containing
    /// block chain. `None` means the percentage cannot be resolved here and
    /// behaves as `auto`.
    #[must_use]
    pub fn compute_percentage_logical_height(&self, id: BoxId, height: Length) -> Option<f32> {
        let walk = self.walk_percent_height_containing_blocks(id)?;
        let cb = walk.containing_block;
        let cb_style = self.style(cb);
        let cb_height = cb_style.logical_height();
        let specified_out_of_flow = self.is_out_of_flow_positioned_with_specified_height(cb);
        let mut include_border_padding = self.is_table(id);

        // STEP 1: Find the height the containing block makes available.
        let available_height = if self.is_perpendicular_to(id, cb) {
            Some(self.containing_block_logical_width_for_content(walk.containing_block_child))
        } else if let Some(stretched) = self
            .geometry(cb)
            .overrides
            .stretched_flex_height
            .filter(|_| self.is_flex_item(cb))
        {
            Some(stretched)
        } else if let Some(override_height) = self
            .geometry(id)
            .overrides
            .containing_block_logical_height
            .filter(|_| !specified_out_of_flow)
        {
            Some(override_height)
        } else if let Some(override_height) = self
            .geometry(cb)
            .overrides
            .content_logical_height
            .filter(|_| self.is_grid_item(cb))
        {
            Some(override_height)
        } else if self.is_table_cell(cb) {
            if walk.skipped_auto_height_containing_block {
                None
            } else if let Some(override_height) = self.geometry(cb).overrides.content_logical_height
            {
                include_border_padding = true;
                Some(override_height)
            } else {
                // Before the table has sized the cell, scrolling content
                // starts out empty if either the cell or its table has a
                // height to grow into; everything else sizes to content.
                let table_has_height = self
                    .ancestors(cb)
                    .find(|&a| self.is_table(a))
                    .is_some_and(|table| !self.style(table).logical_height().is_auto());
                if self.scrolls_overflow_y(id) && (!cb_height.is_auto() || table_has_height) {
                    return Some(0.0);
                }
                return None;
            }
        } else if let Length::Fixed(value) = cb_height {
            let content_box_height = self.adjust_content_box_logical_height_for_box_sizing(cb, value);
            Some(
                self.constrain_content_box_logical_height_by_min_max(
                    cb,
                    content_box_height - self.scrollbar_logical_height(cb),
                    None,
                )
                .max(0.0),
            )
        } else if cb_height.has_percent() && !specified_out_of_flow {
            // The containing block's own percentage, before its min and max
            // are applied.
            self.compute_percentage_logical_height(cb, cb_height)
                .map(|with_scrollbar| {
                    let content_box = self.adjust_content_box_logical_height_for_box_sizing(cb, with_scrollbar);
                    self.constrain_content_box_logical_height_by_min_max(
                        cb,
                        content_box - self.scrollbar_logical_height(cb),
                        None,
                    )
                    .max(0.0)
                })
        } else if specified_out_of_flow {
            // Scratch pass; the block may still be laying out its children.
            let computed = self.compute_logical_height_from(cb, self.logical_height(cb), 0.0);
            Some(
                computed.extent
                    - self.border_and_padding_logical_height(cb)
                    - self.scrollbar_logical_height(cb),
            )
        } else if self.is_layout_view(cb) {
            Some(self.view_logical_height_for_percentages())
        } else {
            None
        };

        // STEP 2: Take out what the skipped root boxes occupy and resolve.
        let mut available_height = available_height? - walk.root_margin_border_padding_height;
        if self.is_table(id) && self.is_out_of_flow_positioned(id) {
            available_height += self.padding_logical_height(cb);
        }

        let mut result = value_for_length(height, available_height);
        if include_border_padding {
            result = (result - self.border_and_padding_logical_height(id)).max(0.0);
        }

        #[cfg(feature = "layout-trace")]
        trace!(
            target: "trellis::percentage",
            ?id,
            containing_block = ?cb,
            available_height,
            result,
            "resolved percentage height"
        );
        Some(result)
    }

    /// `height: 100%` would resolve for this box.
    #[must_use]
    pub fn percentage_logical_height_is_resolvable(&self, id: BoxId) -> bool {
        self.compute_percentage_logical_height(id, Length::percent(100.0))
            .is_some()
    }

    /// The blocks whose height a percentage height of `id` depends on.
    ///
    /// For replaced content these are the blocks up to the first definite
    /// height; for everything else, the blocks walked while resolving,
    /// skipped ones included, plus the chain of a percentage-height
    /// containing block.
    #[must_use]
    pub fn percent_height_containing_blocks(&self, id: BoxId) -> Vec<BoxId> {
        let mut out = Vec::new();
        if self.should_compute_size_as_replaced(id) {
            let mut current = self.replaced_percentage_containing_block(id);
            while let Some(block) = current {
                out.push(block);
                let block_height = self.style(block).logical_height();
                if self.is_layout_view(block)
                    || self.is_table_cell(block)
                    || !(block_height.is_auto() || block_height.has_percent())
                {
                    break;
                }
                current = self.containing_block(block);
            }
            return out;
        }

        let Some(walk) = self.walk_percent_height_containing_blocks(id) else {
            return out;
        };
        let cb = walk.containing_block;
        out.extend(walk.walked);
        if self.style(cb).logical_height().has_percent()
            && !self.is_out_of_flow_positioned_with_specified_height(cb)
        {
            for outer in self.percent_height_containing_blocks(cb) {
                if !out.contains(&outer) {
                    out.push(outer);
                }
            }
        }
        out
    }

    /// Record that `id`'s percentage height depends on each of its
    /// [`LayoutTree::percent_height_containing_blocks`], so that they can
    /// re-lay it out once their own height is known.
    pub fn register_percent_height_descendant(&mut self, id: BoxId) {
        for container in self.percent_height_containing_blocks(id) {
            if container == id {
                continue;
            }
            let _ = self
                .geometry_mut(container)
                .percent_height
                .descendants
                .insert(id);
            let _ = self.geometry_mut(id).percent_height.containers.insert(container);
        }
        #[cfg(feature = "layout-trace")]
        trace!(
            target: "trellis::percentage",
            ?id,
            containers = self.geometry(id).percent_height.containers.len(),
            "registered percent-height descendant"
        );
    }

    /// Drop every registration of `id` as a percent-height descendant.
    pub fn remove_from_percent_height_containers(&mut self, id: BoxId) {
        let containers = std::mem::take(&mut self.geometry_mut(id).percent_height.containers);
        for container in containers {
            let _ = self
                .geometry_mut(container)
                .percent_height
                .descendants
                .remove(&id);
        }
    }

    /// Forget every percent-height descendant of `container`.
    pub fn clear_percent_height_descendants(&mut self, container: BoxId) {
        let descendants = std::mem::take(&mut self.geometry_mut(container).percent_height.descendants);
        for descendant in descendants {
            let _ = self
                .geometry_mut(descendant)
                .percent_height
                .containers
                .remove(&container);
        }
    }

    /// Boxes whose percentage height depends on `container`, in tree order
    /// of creation.
    #[must_use]
    pub fn percent_height_descendants(&self, container: BoxId) -> Vec<BoxId> {
        self.geometry(container)
            .percent_height
            .descendants
            .iter()
            .copied()
            .collect()
    }

    /// `container` has at least one percent-height dependant.
    #[must_use]
    pub fn has_percent_height_descendants(&self, container: BoxId) -> bool {
        !self.geometry(container).percent_height.descendants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DocumentSettings;
    use crate::tree::{BoxKind, Element};
    use trellis_style::{ComputedStyle, Overflow, PhysicalSides, Position, WritingMode};

    fn sized(height: Length) -> ComputedStyle {
        ComputedStyle {
            height,
            ..ComputedStyle::default()
        }
    }

    fn block(tree: &mut LayoutTree, parent: BoxId, style: ComputedStyle) -> BoxId {
        tree.append_child(parent, BoxKind::Block, Some(Element::Generic), style)
            .unwrap()
    }

    #[test]
    fn test_anonymous_wrapper_is_transparent() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let outer = block(&mut tree, BoxId::VIEW, sized(Length::px(200.0)));
        let anonymous = tree
            .append_child(outer, BoxKind::Block, None, ComputedStyle::default())
            .unwrap();
        let child = block(&mut tree, anonymous, sized(Length::percent(25.0)));
        assert_eq!(tree.compute_percentage_logical_height(child, Length::percent(25.0)), Some(50.0));
        assert_eq!(tree.percent_height_containing_blocks(child), vec![anonymous, outer]);
    }

    #[test]
    fn test_standards_mode_auto_height_is_unresolvable() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let outer = block(&mut tree, BoxId::VIEW, ComputedStyle::default());
        let child = block(&mut tree, outer, sized(Length::percent(50.0)));
        assert_eq!(tree.compute_percentage_logical_height(child, Length::percent(50.0)), None);
        assert!(!tree.percentage_logical_height_is_resolvable(child));
    }

    #[test]
    fn test_quirks_root_boxes_subtract_their_margins() {
        let settings = DocumentSettings {
            quirks_mode: true,
            ..DocumentSettings::default()
        };
        let mut tree = LayoutTree::new(settings);
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
        tree.compute_and_set_block_direction_margins(body, html);
        let child = block(&mut tree, body, sized(Length::percent(100.0)));
        assert_eq!(
            tree.compute_percentage_logical_height(child, Length::percent(100.0)),
            Some(584.0)
        );
    }

    #[test]
    fn test_nested_percentages_multiply() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let outer = block(&mut tree, BoxId::VIEW, sized(Length::px(400.0)));
        let middle = block(&mut tree, outer, sized(Length::percent(50.0)));
        let inner = block(&mut tree, middle, sized(Length::percent(50.0)));
        assert_eq!(tree.compute_percentage_logical_height(inner, Length::percent(50.0)), Some(100.0));
        assert_eq!(tree.percent_height_containing_blocks(inner), vec![middle, outer]);
    }

    #[test]
    fn test_orthogonal_containing_block_uses_width() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        tree.update_logical_width(BoxId::VIEW);
        let outer = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                width: Length::px(300.0),
                ..ComputedStyle::default()
            },
        );
        tree.update_logical_width(outer);
        let vertical = block(
            &mut tree,
            outer,
            ComputedStyle {
                writing_mode: WritingMode::VerticalRl,
                height: Length::percent(50.0),
                ..ComputedStyle::default()
            },
        );
        assert_eq!(
            tree.compute_percentage_logical_height(vertical, Length::percent(50.0)),
            Some(150.0)
        );
    }

    #[test]
    fn test_table_cell_defers_until_sized() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        let table = tree
            .append_child(BoxId::VIEW, BoxKind::Table, Some(Element::Generic), sized(Length::px(100.0)))
            .unwrap();
        let cell = tree
            .append_child(table, BoxKind::TableCell, Some(Element::Generic), ComputedStyle::default())
            .unwrap();
        let child = block(&mut tree, cell, sized(Length::percent(50.0)));
        assert_eq!(tree.compute_percentage_logical_height(child, Length::percent(50.0)), None);

        let scroller = block(
            &mut tree,
            cell,
            ComputedStyle {
                height: Length::percent(50.0),
                overflow_y: Overflow::Scroll,
                ..ComputedStyle::default()
            },
        );
        assert_eq!(
            tree.compute_percentage_logical_height(scroller, Length::percent(50.0)),
            Some(0.0),
            "scrolling content starts empty when the table has a height"
        );

        tree.geometry_mut(cell).overrides.content_logical_height = Some(80.0);
        let padded = block(
            &mut tree,
            cell,
            ComputedStyle {
                padding: PhysicalSides::uniform(Length::px(5.0)),
                ..ComputedStyle::default()
            },
        );
        assert_eq!(tree.compute_percentage_logical_height(padded, Length::percent(50.0)), Some(30.0));
    }

    #[test]
    fn test_positioned_containing_block_with_both_offsets() {
        let mut tree = LayoutTree::new(DocumentSettings::default());
        tree.update_logical_width(BoxId::VIEW);
        tree.update_logical_height(BoxId::VIEW);
        let positioned = block(
            &mut tree,
            BoxId::VIEW,
            ComputedStyle {
                position: Position::Absolute,
                inset: PhysicalSides {
                    top: Length::px(100.0),
                    bottom: Length::px(100.0),
                    ..PhysicalSides::uniform(Length::Auto)
                },
                ..ComputedStyle::default()
            },
        );
        let child = block(&mut tree, positioned, sized(Length::percent(50.0)));
        assert_eq!(tree.compute_percentage_logical_height(child, Length::percent(50.0)), Some(200.0));
    }

    #[test]
    fn test_registration_is_explicit_and_reversible() {
        let settings = DocumentSettings {
            quirks_mode: true,
            ..DocumentSettings::default()
        };
        let mut tree = LayoutTree::new(settings);
        let fixed = block(&mut tree, BoxId::VIEW, sized(Length::px(300.0)));
        let auto = block(&mut tree, fixed, ComputedStyle::default());
        let child = block(&mut tree, auto, sized(Length::percent(10.0)));

        let _ = tree.compute_percentage_logical_height(child, Length::percent(10.0));
        assert!(!tree.has_percent_height_descendants(fixed), "resolving alone records nothing");

        tree.register_percent_height_descendant(child);
        assert_eq!(tree.percent_height_descendants(auto), vec![child]);
        assert_eq!(tree.percent_height_descendants(fixed), vec![child]);

        tree.clear_percent_height_descendants(auto);
        assert!(!tree.has_percent_height_descendants(auto));
        assert!(tree.has_percent_height_descendants(fixed));

        tree.remove_from_percent_height_containers(child);
        assert!(!tree.has_percent_height_descendants(fixed));
    }
}
