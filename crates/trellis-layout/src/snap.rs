//! Scroll snap containers and snap areas.
//!
//! [CSS Scroll Snap Points (2015 draft)](https://www.w3.org/TR/2015/WD-css-snappoints-1-20150326/)
//!
//! A box with a `scroll-snap-type` other than `none` is a snap container.
//! A box with a non-empty `scroll-snap-coordinate` is a snap area and
//! belongs to the nearest scroll container on its containing-block chain.
//! The scrolling code asks [`LayoutTree::snap_offsets`] for the positions a
//! container may come to rest at.
//!
//! The relations live in [`SnapCoordinator`] as box handles in both
//! directions: each area knows its container and each container knows its
//! areas. Areas that found no container when their coordinates changed are
//! kept in a detached set until [`LayoutTree::reevaluate_detached_areas`]
//! runs.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;
#[cfg(feature = "layout-trace")]
use tracing::trace;
use trellis_style::{
    ComputedStyle, LengthPoint, ScrollAxis, ScrollSnapType, point_for_length_point,
    value_for_length,
};

use crate::tree::{BoxId, ContainingBlockChain, LayoutTree};

/// Registry of snap containers and the container/area relation.
#[derive(Debug, Clone, Default)]
pub struct SnapCoordinator {
    containers: BTreeSet<BoxId>,
    container_of: BTreeMap<BoxId, BoxId>,
    areas_of: BTreeMap<BoxId, BTreeSet<BoxId>>,
    detached: BTreeSet<BoxId>,
}

impl SnapCoordinator {
    /// Boxes whose resolved snap type is not `none`.
    pub fn containers(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.containers.iter().copied()
    }

    /// The box is registered as a snap container.
    #[must_use]
    pub fn is_snap_container(&self, id: BoxId) -> bool {
        self.containers.contains(&id)
    }

    /// The container an area is attached to.
    #[must_use]
    pub fn snap_container_of(&self, area: BoxId) -> Option<BoxId> {
        self.container_of.get(&area).copied()
    }

    /// Areas attached to a container, in box order.
    pub fn snap_areas_of(&self, container: BoxId) -> impl Iterator<Item = BoxId> + '_ {
        self.areas_of
            .get(&container)
            .into_iter()
            .flat_map(|areas| areas.iter().copied())
    }

    /// Areas with coordinates that found no container when they last changed.
    pub fn detached_areas(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.detached.iter().copied()
    }

    /// Move `area` to `container`, leaving its previous container's set.
    fn set_snap_container(&mut self, area: BoxId, container: Option<BoxId>) {
        let old = self.container_of.get(&area).copied();
        if old == container {
            return;
        }
        if let Some(old) = old {
            if let Some(areas) = self.areas_of.get_mut(&old) {
                let _ = areas.remove(&area);
                if areas.is_empty() {
                    let _ = self.areas_of.remove(&old);
                }
            }
            let _ = self.container_of.remove(&area);
        }
        if let Some(new) = container {
            let _ = self.container_of.insert(area, new);
            let _ = self.areas_of.entry(new).or_default().insert(area);
        }
    }

    /// Every area of `container` becomes ownerless.
    fn clear_snap_areas(&mut self, container: BoxId) {
        for area in self.areas_of.remove(&container).unwrap_or_default() {
            let _ = self.container_of.remove(&area);
        }
    }

    /// Drop every trace of a box that left the tree.
    pub(crate) fn forget_box(&mut self, id: BoxId) {
        let _ = self.containers.remove(&id);
        let _ = self.detached.remove(&id);
        self.clear_snap_areas(id);
        self.set_snap_container(id, None);
    }
}

impl LayoutTree {
    /// [§ 3.4 'scroll-snap-coordinate'](https://www.w3.org/TR/2015/WD-css-snappoints-1-20150326/#scroll-snap-coordinate)
    ///
    /// "Snap positions must only affect the nearest ancestor (on the
    /// element's containing block chain) scroll container."
    ///
    /// Reaching the viewport-defining element dispatches to the view.
    #[must_use]
    pub fn find_snap_container(&self, area: BoxId) -> Option<BoxId> {
        let viewport_defining_box = self.viewport_defining_box();
        let found = self.containing_blocks(area).find(|&cb| {
            self.has_overflow_clip(cb)
                || self.is_layout_view(cb)
                || Some(cb) == viewport_defining_box
        })?;
        if Some(found) == viewport_defining_box {
            return Some(BoxId::VIEW);
        }
        Some(found)
    }

    /// The area's coordinate list changed. An empty list detaches it;
    /// otherwise it joins the nearest scroll container, or the detached set
    /// when there is none.
    pub fn snap_area_did_change(&mut self, area: BoxId, coordinates: &[LengthPoint]) {
        if coordinates.is_empty() {
            let snap = self.snap_mut();
            let _ = snap.detached.remove(&area);
            snap.set_snap_container(area, None);
            debug!(target: "trellis::snap", ?area, "snap area detached");
            return;
        }
        match self.find_snap_container(area) {
            Some(container) => {
                let snap = self.snap_mut();
                let _ = snap.detached.remove(&area);
                snap.set_snap_container(area, Some(container));
                debug!(target: "trellis::snap", ?area, ?container, "snap area attached");
            }
            None => {
                let _ = self.snap_mut().detached.insert(area);
                debug!(target: "trellis::snap", ?area, "no snap container for area");
            }
        }
    }

    /// The container's resolved snap type changed. Going to `none` removes
    /// it from the registry and leaves its areas ownerless.
    pub fn snap_container_did_change(&mut self, container: BoxId, snap_type: ScrollSnapType) {
        let snap = self.snap_mut();
        if snap_type == ScrollSnapType::None {
            let _ = snap.containers.remove(&container);
            snap.clear_snap_areas(container);
            debug!(target: "trellis::snap", ?container, "snap container removed");
        } else {
            let _ = snap.containers.insert(container);
            debug!(target: "trellis::snap", ?container, %snap_type, "snap container registered");
        }
    }

    /// Re-establish the registry after a style change. `None` stands for a
    /// box entering (`old`) or leaving (`new`) the tree.
    ///
    /// `scroll-snap-type` has no effect on the viewport-defining element.
    pub fn update_scroll_snap_mapping_after_style_change(
        &mut self,
        id: BoxId,
        new: Option<&ComputedStyle>,
        old: Option<&ComputedStyle>,
    ) {
        let allows_snap_container = self.viewport_defining_box() != Some(id);
        let old_snap_type = old.map_or(ScrollSnapType::None, |s| s.scroll_snap_type);
        let new_snap_type = new
            .filter(|_| allows_snap_container)
            .map_or(ScrollSnapType::None, |s| s.scroll_snap_type);
        if old_snap_type != new_snap_type {
            self.snap_container_did_change(id, new_snap_type);
        }

        let old_coordinates = old.map_or(&[][..], |s| s.scroll_snap_coordinate.as_slice());
        let new_coordinates = new.map_or(&[][..], |s| s.scroll_snap_coordinate.as_slice());
        if old_coordinates != new_coordinates {
            self.snap_area_did_change(id, new_coordinates);
        }
    }

    /// Register the box's current snap properties, as on insertion.
    pub fn add_scroll_snap_mapping(&mut self, id: BoxId) {
        let style = self.style(id).clone();
        self.update_scroll_snap_mapping_after_style_change(id, Some(&style), None);
    }

    /// Withdraw the box's current snap properties, as on removal.
    pub fn clear_scroll_snap_mapping(&mut self, id: BoxId) {
        let style = self.style(id).clone();
        self.update_scroll_snap_mapping_after_style_change(id, None, Some(&style));
    }

    /// Try again to attach every detached area. Returns the areas that
    /// found a container.
    pub fn reevaluate_detached_areas(&mut self) -> Vec<BoxId> {
        let detached: Vec<BoxId> = self.snap().detached_areas().collect();
        let mut attached = Vec::new();
        for area in detached {
            if let Some(container) = self.find_snap_container(area) {
                let snap = self.snap_mut();
                let _ = snap.detached.remove(&area);
                snap.set_snap_container(area, Some(container));
                attached.push(area);
            }
        }
        if !attached.is_empty() {
            debug!(target: "trellis::snap", count = attached.len(), "reattached snap areas");
        }
        attached
    }

    /// Where `area`'s border-box origin sits in `container`'s border-box
    /// coordinates as currently scrolled.
    fn offset_in_snap_container(&self, area: BoxId, container: BoxId) -> (f32, f32) {
        let mut offset = (0.0, 0.0);
        let mut current = area;
        while current != container {
            let g = self.geometry(current);
            offset.0 += g.frame.x + g.in_flow_offset.0;
            offset.1 += g.frame.y + g.in_flow_offset.1;
            let Some(next) = self.container(current) else {
                break;
            };
            if self.has_overflow_clip(next) || self.is_layout_view(next) {
                let scroll = self.geometry(next).scroll_offset;
                offset.0 -= scroll.0;
                offset.1 -= scroll.1;
            }
            current = next;
        }
        offset
    }

    /// The area's snap coordinates in the container's scrolling content
    /// coordinates.
    fn local_to_ancestor_snap_coordinates(&self, area: BoxId, container: BoxId) -> Vec<(f32, f32)> {
        let frame = self.geometry(area).frame;
        let (dx, dy) = self.offset_in_snap_container(area, container);
        let scroll = self.geometry(container).scroll_offset;
        self.style(area)
            .scroll_snap_coordinate
            .iter()
            .map(|&coordinate| {
                let (x, y) = point_for_length_point(coordinate, frame.width, frame.height);
                (x + dx + scroll.0, y + dy + scroll.1)
            })
            .collect()
    }

    /// [§ 3.3 'scroll-snap-points'](https://www.w3.org/TR/2015/WD-css-snappoints-1-20150326/#scroll-snap-points)
    ///
    /// Candidate resting scroll offsets of `id` along `axis`, ascending.
    /// Empty unless the box's snap type is something other than `none`.
    ///
    /// STEP 1: "repeat(<length>)" produces offsets at every multiple of the
    ///   interval up to the maximum scroll position. Non-positive intervals
    ///   are clamped to one pixel.
    /// STEP 2: every attached area contributes its coordinates that do not
    ///   lie past the maximum scroll position.
    #[must_use]
    pub fn snap_offsets(&self, id: BoxId, axis: ScrollAxis) -> Vec<f32> {
        let style = self.style(id);
        if style.scroll_snap_type == ScrollSnapType::None {
            return Vec::new();
        }
        let (client_size, scroll_size) = match axis {
            ScrollAxis::X => (self.client_width(id), self.scroll_width(id)),
            ScrollAxis::Y => (self.client_height(id), self.scroll_height(id)),
        };
        let max_offset = scroll_size - client_size;

        let mut result = Vec::new();

        // STEP 1
        if let Some(repeat) = style.scroll_snap_points(axis).repeat {
            let repeat = value_for_length(repeat, client_size).max(1.0);
            // Offsets are exact multiples of `repeat`.
            let count = (max_offset / repeat).floor();
            let mut k = 1.0_f32;
            while k <= count {
                result.push(repeat * k);
                k += 1.0;
            }
        }

        // STEP 2
        let mut did_add_snap_area_offset = false;
        for area in self.snap().snap_areas_of(id) {
            for (x, y) in self.local_to_ancestor_snap_coordinates(area, id) {
                let snap_offset = match axis {
                    ScrollAxis::X => x,
                    ScrollAxis::Y => y,
                };
                if snap_offset > max_offset {
                    continue;
                }
                result.push(snap_offset);
                did_add_snap_area_offset = true;
            }
        }
        if did_add_snap_area_offset {
            result.sort_by(f32::total_cmp);
        }

        #[cfg(feature = "layout-trace")]
        trace!(target: "trellis::snap", ?id, %axis, ?result, "snap offsets");
        result
    }
}
