//! Integration tests for the computed style snapshot.

use trellis_style::{
    ComputedStyle, Direction, ItemPosition, Length, LengthPoint, PhysicalSides, ScrollAxis,
    ScrollSnapPoints, ScrollSnapType, WritingMode,
};

#[test]
fn test_initial_values() {
    let style = ComputedStyle::default();
    assert!(style.width.is_auto());
    assert!(style.max_width.is_max_size_none());
    assert_eq!(style.margin.left, Length::px(0.0));
    assert!(style.inset.top.is_auto());
    assert_eq!(style.text_autosizing_multiplier, 1.0);
    assert_eq!(style.scroll_snap_type, ScrollSnapType::None);
}

#[test]
fn test_logical_sizes_swap_in_vertical_modes() {
    let style = ComputedStyle {
        width: Length::px(100.0),
        height: Length::px(40.0),
        writing_mode: WritingMode::VerticalLr,
        ..ComputedStyle::default()
    };
    assert_eq!(style.logical_width(), Length::px(40.0));
    assert_eq!(style.logical_height(), Length::px(100.0));
}

#[test]
fn test_margin_start_follows_direction() {
    let style = ComputedStyle {
        margin: PhysicalSides {
            top: Length::px(1.0),
            right: Length::px(2.0),
            bottom: Length::px(3.0),
            left: Length::px(4.0),
        },
        direction: Direction::Rtl,
        ..ComputedStyle::default()
    };
    assert_eq!(style.margin_start(), Length::px(2.0));
    assert_eq!(style.margin_end(), Length::px(4.0));

    let vertical_container = ComputedStyle {
        writing_mode: WritingMode::VerticalRl,
        ..ComputedStyle::default()
    };
    assert_eq!(
        style.margin_before_using(&vertical_container),
        Length::px(2.0),
        "block-start of a vertical-rl container is the right edge"
    );
    assert_eq!(style.margin_start_using(&vertical_container), Length::px(1.0));
}

#[test]
fn test_logical_offsets() {
    let style = ComputedStyle {
        inset: PhysicalSides {
            top: Length::px(5.0),
            right: Length::Auto,
            bottom: Length::Auto,
            left: Length::px(7.0),
        },
        ..ComputedStyle::default()
    };
    assert_eq!(style.logical_left(), Length::px(7.0));
    assert_eq!(style.logical_top(), Length::px(5.0));
    assert!(!style.has_static_inline_position(true));
    assert!(!style.has_static_inline_position(false), "top is set");

    let left_only = ComputedStyle {
        inset: PhysicalSides {
            top: Length::Auto,
            right: Length::Auto,
            bottom: Length::Auto,
            left: Length::px(7.0),
        },
        ..ComputedStyle::default()
    };
    assert!(!left_only.has_static_inline_position(true));
    assert!(left_only.has_static_inline_position(false));
}

#[test]
fn test_resolve_alignment_uses_container_items() {
    let container = ComputedStyle {
        align_items: ItemPosition::Center,
        ..ComputedStyle::default()
    };
    let child = ComputedStyle::default();
    assert_eq!(
        child.resolve_alignment(&container, ItemPosition::Stretch),
        ItemPosition::Center
    );
    assert_eq!(
        child.resolve_justification(&container, ItemPosition::Stretch),
        ItemPosition::Stretch
    );
}

#[test]
fn test_scene_json_only_lists_differences() {
    let json = r#"{
        "width": {"fixed": 120},
        "max_height": "none",
        "scroll_snap_points_x": {"repeat": {"percent": 50}},
        "scroll_snap_coordinate": [{"x": {"fixed": 0}, "y": {"percent": 100}}]
    }"#;
    let style: ComputedStyle = serde_json::from_str(json).unwrap();
    assert_eq!(style.width, Length::px(120.0));
    assert!(style.max_height.is_max_size_none());
    assert_eq!(
        style.scroll_snap_points(ScrollAxis::X),
        ScrollSnapPoints::repeat(Length::percent(50.0))
    );
    assert_eq!(
        style.scroll_snap_coordinate,
        vec![LengthPoint::new(Length::px(0.0), Length::percent(100.0))]
    );
    assert!(style.height.is_auto());
}
