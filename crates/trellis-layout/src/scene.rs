//! Scene files.
//!
//! A scene is a JSON description of a box tree: the settings, each box's
//! kind and computed style, and the inputs layout takes from elsewhere
//! (intrinsic widths, natural sizes of replaced content, override slots set
//! by flex and grid parents, scroll positions, flow-thread fragmentainers).
//!
//! ```json
//! {
//!   "settings": { "viewport": { "width": 1000, "height": 600 } },
//!   "boxes": [
//!     { "name": "cb", "style": { "position": "relative", "width": { "fixed": 500 } },
//!       "children": [ { "name": "abs", "style": { "position": "absolute" } } ] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trellis_common::warning::clear_warnings;
use trellis_style::ComputedStyle;

use crate::box_model::{EdgeSizes, Rect};
use crate::error::LayoutError;
use crate::geometry::{PreferredLogicalWidths, SizeOverrides};
use crate::settings::DocumentSettings;
use crate::tree::{BoxId, BoxKind, Element, Fragmentainer, LayoutTree};

/// A whole scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scene {
    /// Document and device settings.
    pub settings: DocumentSettings,
    /// Style of the view box, for `scroll-snap-*` on the viewport.
    pub view_style: Option<ComputedStyle>,
    /// Children of the view, in order.
    pub boxes: Vec<SceneBox>,
}

/// One box of a scene and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneBox {
    /// Handle used to refer to the box from the command line and reports.
    pub name: Option<String>,
    /// Layout object variant.
    pub kind: BoxKind,
    /// Generating element, `None` for anonymous boxes.
    pub element: Option<Element>,
    /// Computed style.
    pub style: ComputedStyle,
    /// Intrinsic widths measured by a content pass.
    pub preferred_widths: Option<PreferredLogicalWidths>,
    /// Natural `[width, height]` of replaced content.
    pub intrinsic_size: Option<(f32, f32)>,
    /// Sizes a flex or grid parent imposes.
    pub overrides: SizeOverrides,
    /// Physical `[x, y]` scroll position.
    pub scroll_offset: (f32, f32),
    /// Columns or pages of a flow thread.
    pub fragmentainers: Vec<Fragmentainer>,
    /// Child boxes, in order.
    pub children: Vec<SceneBox>,
}

impl Default for SceneBox {
    fn default() -> Self {
        Self {
            name: None,
            kind: BoxKind::Block,
            element: Some(Element::Generic),
            style: ComputedStyle::default(),
            preferred_widths: None,
            intrinsic_size: None,
            overrides: SizeOverrides::default(),
            scroll_offset: (0.0, 0.0),
            fragmentainers: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// A tree built from a scene, with its named boxes.
#[derive(Debug, Clone)]
pub struct BuiltScene {
    /// The box tree, not yet laid out.
    pub tree: LayoutTree,
    /// Named boxes.
    pub names: BTreeMap<String, BoxId>,
}

impl BuiltScene {
    /// Find a box by name, or by its numeric handle.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<BoxId> {
        if let Some(&id) = self.names.get(key) {
            return Some(id);
        }
        let id = BoxId(key.parse().ok()?);
        self.tree.get(id).map(|_| id)
    }

    /// Name given to a box in the scene, if any.
    #[must_use]
    pub fn name_of(&self, id: BoxId) -> Option<&str> {
        self.names
            .iter()
            .find(|&(_, &named)| named == id)
            .map(|(name, _)| name.as_str())
    }
}

impl Scene {
    /// Parse a scene from JSON.
    ///
    /// # Errors
    ///
    /// [`LayoutError::MalformedScene`] if the text is not a valid scene.
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(text).map_err(|e| LayoutError::MalformedScene(e.to_string()))
    }

    /// Build the box tree. Warnings deduplicated for a previous scene are
    /// reported again.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::MalformedScene`] if two boxes share a name.
    /// - [`LayoutError::CannotHaveChildren`] if a leaf box lists children.
    /// - [`LayoutError::SecondView`] if a box claims to be the view.
    pub fn build(&self) -> Result<BuiltScene, LayoutError> {
        clear_warnings();
        let mut tree = LayoutTree::new(self.settings.clone());
        if let Some(style) = &self.view_style {
            let style = ComputedStyle {
                writing_mode: self.settings.writing_mode,
                ..style.clone()
            };
            let _ = tree.set_style(BoxId::VIEW, style)?;
        }
        let mut names = BTreeMap::new();
        for scene_box in &self.boxes {
            add_scene_box(&mut tree, &mut names, BoxId::VIEW, scene_box)?;
        }
        Ok(BuiltScene { tree, names })
    }
}

fn add_scene_box(
    tree: &mut LayoutTree,
    names: &mut BTreeMap<String, BoxId>,
    parent: BoxId,
    scene_box: &SceneBox,
) -> Result<(), LayoutError> {
    let id = tree.append_child(
        parent,
        scene_box.kind,
        scene_box.element,
        scene_box.style.clone(),
    )?;
    if let Some(name) = &scene_box.name {
        let previous = names.insert(name.clone(), id);
        if previous.is_some() {
            return Err(LayoutError::MalformedScene(format!(
                "duplicate box name {name:?}"
            )));
        }
    }

    let geometry = tree.geometry_mut(id);
    geometry.measured_logical_widths = scene_box.preferred_widths;
    geometry.intrinsic_size = scene_box.intrinsic_size;
    geometry.overrides = scene_box.overrides;
    geometry.scroll_offset = scene_box.scroll_offset;
    tree.box_mut(id)?
        .fragmentainers
        .clone_from(&scene_box.fragmentainers);

    for child in &scene_box.children {
        add_scene_box(tree, names, id, child)?;
    }
    Ok(())
}

/// Laid-out geometry of one box and its subtree, for printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxReport {
    /// Arena handle.
    pub id: BoxId,
    /// Scene name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Layout object variant.
    pub kind: BoxKind,
    /// Border box in the container's coordinates.
    pub frame: Rect,
    /// Border box in the view's coordinates.
    pub absolute: Rect,
    /// Resolved margins.
    pub margin: EdgeSizes,
    /// Relative-positioning shift.
    pub in_flow_offset: (f32, f32),
    /// Space inserted before the box to move it to a later page or column.
    pub pagination_strut: f32,
    /// Scrollable overflow rect.
    pub layout_overflow: Rect,
    /// Child boxes.
    pub children: Vec<BoxReport>,
}

impl BuiltScene {
    /// Report the geometry of `id` and its subtree.
    #[must_use]
    pub fn report(&self, id: BoxId) -> BoxReport {
        let tree = &self.tree;
        let geometry = tree.geometry(id);
        BoxReport {
            id,
            name: self.name_of(id).map(str::to_owned),
            kind: tree.kind(id),
            frame: geometry.frame,
            absolute: tree.absolute_border_box_rect(id),
            margin: geometry.margin,
            in_flow_offset: geometry.in_flow_offset,
            pagination_strut: geometry.pagination_strut,
            layout_overflow: tree.layout_overflow_rect(id),
            children: tree
                .children(id)
                .iter()
                .map(|&child| self.report(child))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_style::{Length, Position};

    const SCENE: &str = r#"{
        "settings": { "viewport": { "width": 1000, "height": 600 } },
        "boxes": [
            {
                "name": "cb",
                "style": { "position": "relative", "width": { "fixed": 500 }, "height": { "fixed": 300 } },
                "children": [
                    {
                        "name": "abs",
                        "style": {
                            "position": "absolute",
                            "inset": { "top": "auto", "right": { "fixed": 20 }, "bottom": "auto", "left": "auto" }
                        },
                        "preferred_widths": { "min": 100, "max": 100 }
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_scene_builds_named_tree() {
        let scene = Scene::from_json(SCENE).unwrap();
        let built = scene.build().unwrap();
        let cb = built.resolve("cb").unwrap();
        let abs = built.resolve("abs").unwrap();

        assert_eq!(built.tree.settings().viewport.width, 1000.0);
        assert_eq!(built.tree.style(cb).position, Position::Relative);
        assert_eq!(built.tree.style(cb).width, Length::px(500.0));
        assert_eq!(built.tree.children(cb), &[abs]);
        assert_eq!(
            built.tree.geometry(abs).measured_logical_widths,
            Some(PreferredLogicalWidths { min: 100.0, max: 100.0 })
        );
        assert_eq!(built.resolve(&abs.0.to_string()), Some(abs));
        assert_eq!(built.name_of(abs), Some("abs"));
    }

    #[test]
    fn test_scene_rejects_bad_input() {
        assert!(matches!(
            Scene::from_json(r#"{ "boxes": [ { "colour": "red" } ] }"#),
            Err(LayoutError::MalformedScene(_))
        ));

        let duplicate = Scene {
            boxes: vec![
                SceneBox {
                    name: Some("a".into()),
                    ..SceneBox::default()
                },
                SceneBox {
                    name: Some("a".into()),
                    ..SceneBox::default()
                },
            ],
            ..Scene::default()
        };
        assert!(matches!(duplicate.build(), Err(LayoutError::MalformedScene(_))));

        let leaf_with_children = Scene {
            boxes: vec![SceneBox {
                kind: BoxKind::Replaced,
                children: vec![SceneBox::default()],
                ..SceneBox::default()
            }],
            ..Scene::default()
        };
        assert!(matches!(
            leaf_with_children.build(),
            Err(LayoutError::CannotHaveChildren { .. })
        ));
    }

    #[test]
    fn test_report_after_layout() {
        let mut built = Scene::from_json(SCENE).unwrap().build().unwrap();
        built.tree.layout();
        let report = built.report(BoxId::VIEW);

        let cb = &report.children[0];
        assert_eq!(cb.name.as_deref(), Some("cb"));
        let abs = &cb.children[0];
        assert_eq!(abs.frame, Rect::new(380.0, 0.0, 100.0, 0.0));
        assert_eq!(abs.absolute.x, 380.0);
    }
}
