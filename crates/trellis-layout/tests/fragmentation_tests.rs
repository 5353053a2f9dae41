//! Integration tests for break values and page geometry.

use strum::IntoEnumIterator;
use trellis_common::warning::has_warned;
use trellis_layout::{
    BoxId, BoxKind, DocumentSettings, Element, LayoutTree, PageBoundaryRule,
    fragmentainer_break_precedence, join_fragmentainer_break_values,
};
use trellis_style::{BreakValue, ComputedStyle, Length};

#[test]
fn test_join_is_idempotent() {
    for value in BreakValue::iter() {
        assert_eq!(join_fragmentainer_break_values(value, value), value);
    }
    for first in BreakValue::iter() {
        for second in BreakValue::iter() {
            let joined = join_fragmentainer_break_values(first, second);
            assert_eq!(join_fragmentainer_break_values(joined, second), joined, "{first} + {second}");
        }
    }
}

#[test]
fn test_auto_never_wins_a_join() {
    for value in BreakValue::iter() {
        assert_eq!(join_fragmentainer_break_values(BreakValue::Auto, value), value);
        assert_eq!(join_fragmentainer_break_values(value, BreakValue::Auto), value);
    }
}

#[test]
fn test_join_picks_the_higher_precedence() {
    for first in BreakValue::iter() {
        for second in BreakValue::iter() {
            let joined = join_fragmentainer_break_values(first, second);
            let expected = fragmentainer_break_precedence(first).max(fragmentainer_break_precedence(second));
            assert_eq!(fragmentainer_break_precedence(joined), expected, "{first} + {second}");
        }
    }
}

#[test]
fn test_remaining_height_at_page_boundaries() {
    let mut tree = LayoutTree::new(DocumentSettings {
        page_logical_height: Some(500.0),
        ..DocumentSettings::default()
    });
    let block = tree
        .append_child(
            BoxId::VIEW,
            BoxKind::Block,
            Some(Element::Generic),
            ComputedStyle {
                height: Length::px(2000.0),
                ..ComputedStyle::default()
            },
        )
        .unwrap();
    tree.layout();

    for (offset, former, latter) in [
        (0.0, 0.0, 500.0),
        (120.0, 380.0, 380.0),
        (500.0, 0.0, 500.0),
        (1000.0, 0.0, 500.0),
        (1499.0, 1.0, 1.0),
    ] {
        assert_eq!(
            tree.page_remaining_logical_height_for_offset(
                block,
                offset,
                PageBoundaryRule::AssociateWithFormerPage
            ),
            former,
            "former page at {offset}"
        );
        assert_eq!(
            tree.page_remaining_logical_height_for_offset(
                block,
                offset,
                PageBoundaryRule::AssociateWithLatterPage
            ),
            latter,
            "latter page at {offset}"
        );
    }
}

#[test]
fn test_forced_breaks_need_a_paginated_context() {
    let style = ComputedStyle {
        break_before: BreakValue::Page,
        ..ComputedStyle::default()
    };
    for paginated in [false, true] {
        let mut tree = LayoutTree::new(DocumentSettings {
            page_logical_height: paginated.then_some(500.0),
            ..DocumentSettings::default()
        });
        let first = tree
            .append_child(BoxId::VIEW, BoxKind::Block, Some(Element::Generic), ComputedStyle::default())
            .unwrap();
        let second = tree
            .append_child(BoxId::VIEW, BoxKind::Block, Some(Element::Generic), style.clone())
            .unwrap();
        assert_eq!(tree.needs_forced_break_before(second, tree.break_after(first)), paginated);
    }
}

#[test]
fn test_uncontrollable_break_is_reported_and_ignored() {
    let mut tree = LayoutTree::new(DocumentSettings::default());
    let column_break = tree
        .append_child(
            BoxId::VIEW,
            BoxKind::Block,
            Some(Element::Generic),
            ComputedStyle {
                break_before: BreakValue::Column,
                ..ComputedStyle::default()
            },
        )
        .unwrap();
    assert_eq!(tree.break_before(column_break), BreakValue::Auto);
    assert!(has_warned(
        "Pagination",
        "break-before: column ignored outside a matching fragmentation context"
    ));
}
