//! Integration tests for whole-tree layout of scene files.

use trellis_layout::{
    BoxId, BoxKind, BuiltScene, DocumentSettings, Element, LayoutTree, Rect, Scene,
};
use trellis_style::{ComputedStyle, Length, ScrollAxis};

fn lay_out(json: &str) -> BuiltScene {
    let mut built = Scene::from_json(json).unwrap().build().unwrap();
    built.tree.layout();
    built
}

fn frame(built: &BuiltScene, name: &str) -> Rect {
    built.tree.geometry(built.resolve(name).unwrap()).frame
}

#[test]
fn test_right_anchored_absolute_box() {
    let built = lay_out(
        r#"{
            "boxes": [{
                "name": "cb",
                "style": { "position": "relative", "width": { "fixed": 500 }, "height": { "fixed": 200 } },
                "children": [{
                    "name": "abs",
                    "style": {
                        "position": "absolute",
                        "inset": { "top": "auto", "right": { "fixed": 20 }, "bottom": "auto", "left": "auto" }
                    },
                    "preferred_widths": { "min": 100, "max": 100 }
                }]
            }]
        }"#,
    );
    let abs = frame(&built, "abs");
    assert_eq!(abs.x, 380.0);
    assert_eq!(abs.width, 100.0);
}

#[test]
fn test_over_constrained_insets_drop_the_end_side() {
    let scene = |direction: &str, left: u16, right: u16| {
        format!(
            r#"{{
                "boxes": [{{
                    "style": {{
                        "position": "relative",
                        "direction": "{direction}",
                        "width": {{ "fixed": 500 }},
                        "height": {{ "fixed": 200 }}
                    }},
                    "children": [{{
                        "name": "abs",
                        "style": {{
                            "position": "absolute",
                            "width": {{ "fixed": 100 }},
                            "inset": {{ "top": "auto", "right": {{ "fixed": {right} }}, "bottom": "auto", "left": {{ "fixed": {left} }} }}
                        }}
                    }}]
                }}]
            }}"#
        )
    };
    let x = |direction: &str, left: u16, right: u16| frame(&lay_out(&scene(direction, left, right)), "abs").x;

    assert_eq!(x("ltr", 10, 10), 10.0);
    assert_eq!(x("ltr", 10, 250), 10.0, "right is ignored");
    assert_eq!(x("ltr", 30, 10), 30.0);

    assert_eq!(x("rtl", 10, 10), 390.0);
    assert_eq!(x("rtl", 250, 10), 390.0, "left is ignored");
    assert_eq!(x("rtl", 10, 30), 370.0);
}

#[test]
fn test_auto_margins_center_a_block() {
    let built = lay_out(
        r#"{
            "boxes": [{
                "name": "centered",
                "style": {
                    "width": { "fixed": 200 },
                    "height": { "fixed": 10 },
                    "margin": { "top": { "fixed": 0 }, "right": "auto", "bottom": { "fixed": 0 }, "left": "auto" }
                }
            }]
        }"#,
    );
    let id = built.resolve("centered").unwrap();
    let geometry = built.tree.geometry(id);
    assert_eq!(geometry.frame, Rect::new(300.0, 0.0, 200.0, 10.0));
    assert_eq!(geometry.margin.left, 300.0);
    assert_eq!(geometry.margin.right, 300.0);
}

#[test]
fn test_scroller_snaps_to_repeated_offsets_after_layout() {
    let built = lay_out(
        r#"{
            "boxes": [{
                "name": "scroller",
                "style": {
                    "width": { "fixed": 200 },
                    "height": { "fixed": 100 },
                    "overflow_x": "scroll",
                    "overflow_y": "scroll",
                    "scroll_snap_type": "mandatory",
                    "scroll_snap_points_x": { "repeat": { "fixed": 200 } }
                },
                "children": [{ "style": { "width": { "fixed": 1000 }, "height": { "fixed": 50 } } }]
            }]
        }"#,
    );
    let scroller = built.resolve("scroller").unwrap();
    assert_eq!(built.tree.scroll_width(scroller), 1000.0);
    assert_eq!(
        built.tree.snap_offsets(scroller, ScrollAxis::X),
        vec![200.0, 400.0, 600.0, 800.0]
    );
    assert!(built.tree.snap_offsets(scroller, ScrollAxis::Y).is_empty());
}

#[test]
fn test_quirky_percentages_look_through_auto_height_blocks() {
    for quirks_mode in [false, true] {
        for depth in 0..4 {
            let mut tree = LayoutTree::new(DocumentSettings {
                quirks_mode,
                ..DocumentSettings::default()
            });
            let fixed = tree
                .append_child(
                    BoxId::VIEW,
                    BoxKind::Block,
                    Some(Element::Generic),
                    ComputedStyle {
                        height: Length::px(400.0),
                        ..ComputedStyle::default()
                    },
                )
                .unwrap();
            let mut parent = fixed;
            for _ in 0..depth {
                parent = tree
                    .append_child(parent, BoxKind::Block, Some(Element::Generic), ComputedStyle::default())
                    .unwrap();
            }
            let leaf = tree
                .append_child(parent, BoxKind::Block, Some(Element::Generic), ComputedStyle::default())
                .unwrap();

            let resolved = tree.compute_percentage_logical_height(leaf, Length::percent(50.0));
            let expected = if depth == 0 || quirks_mode {
                Some(200.0)
            } else {
                None
            };
            assert_eq!(resolved, expected, "quirks {quirks_mode}, depth {depth}");
        }
    }
}

#[test]
fn test_quirky_percentages_reach_the_viewport() {
    let mut tree = LayoutTree::new(DocumentSettings {
        quirks_mode: true,
        ..DocumentSettings::default()
    });
    let wrapper = tree
        .append_child(BoxId::VIEW, BoxKind::Block, Some(Element::Generic), ComputedStyle::default())
        .unwrap();
    let leaf = tree
        .append_child(wrapper, BoxKind::Block, Some(Element::Generic), ComputedStyle::default())
        .unwrap();
    assert_eq!(
        tree.compute_percentage_logical_height(leaf, Length::percent(50.0)),
        Some(300.0)
    );
}

#[test]
fn test_report_serializes() {
    let built = lay_out(r#"{ "boxes": [{ "name": "only", "style": { "height": { "fixed": 40 } } }] }"#);
    let report = built.report(BoxId::VIEW);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["children"][0]["name"], "only");
    assert_eq!(json["children"][0]["frame"]["height"], 40.0);
}

#[test]
fn test_gallery_scene_mixes_repeat_and_area_offsets() {
    let built = lay_out(include_str!("../../../trellis-cli/scenes/snap.json"));
    let gallery = built.resolve("gallery").unwrap();
    let featured = built.resolve("featured").unwrap();

    assert_eq!(built.tree.snap().snap_container_of(featured), Some(gallery));
    assert_eq!(
        built.tree.snap_offsets(gallery, ScrollAxis::X),
        vec![300.0, 450.0, 600.0, 900.0]
    );
}
