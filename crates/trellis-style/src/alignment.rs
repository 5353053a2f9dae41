//! Text and box alignment properties that feed sizing decisions.
//!
//! [§ 16.2 'text-align'](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
//! [CSS Box Alignment Level 3](https://www.w3.org/TR/css-align-3/)
//! [§ 5 Ordering and Orientation](https://www.w3.org/TR/css-flexbox-1/#flow-order)

use serde::{Deserialize, Serialize};

/// Computed `text-align`, including the legacy `-webkit-*` keywords produced
/// by the HTML `align` attribute. Those legacy values move block boxes, not
/// just inline content, which is why layout needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    /// `start`
    #[default]
    Start,
    /// `end`
    End,
    /// `left`
    Left,
    /// `right`
    Right,
    /// `center`
    Center,
    /// `justify`
    Justify,
    /// `-webkit-left`
    WebkitLeft,
    /// `-webkit-right`
    WebkitRight,
    /// `-webkit-center`
    WebkitCenter,
}

/// Self/items alignment keyword for `align-*` and `justify-*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ItemPosition {
    /// `auto`: defer to the container's `*-items`.
    #[default]
    Auto,
    /// `normal`: layout-mode dependent behaviour.
    Normal,
    /// `stretch`
    Stretch,
    /// `start`
    Start,
    /// `end`
    End,
    /// `center`
    Center,
    /// `baseline`
    Baseline,
    /// `flex-start`
    FlexStart,
    /// `flex-end`
    FlexEnd,
}

impl ItemPosition {
    /// [§ 6.1 'align-self'](https://www.w3.org/TR/css-align-3/#align-self-property)
    ///
    /// Resolve a child's `*-self` against its container's `*-items`.
    /// "auto" defers to the container and "normal" means whatever the
    /// layout mode considers normal, supplied as `normal_behaviour`.
    #[must_use]
    pub const fn resolve(self, container_items: Self, normal_behaviour: Self) -> Self {
        let value = match self {
            Self::Auto => container_items,
            other => other,
        };
        match value {
            Self::Auto | Self::Normal => normal_behaviour,
            other => other,
        }
    }
}

/// [§ 5.1 'flex-direction'](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    /// `row`
    #[default]
    Row,
    /// `row-reverse`
    RowReverse,
    /// `column`
    Column,
    /// `column-reverse`
    ColumnReverse,
}

impl FlexDirection {
    /// `column` or `column-reverse`.
    #[must_use]
    pub const fn is_column(self) -> bool {
        matches!(self, Self::Column | Self::ColumnReverse)
    }
}

/// [§ 5.2 'flex-wrap'](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlexWrap {
    /// `nowrap`
    #[default]
    Nowrap,
    /// `wrap`
    Wrap,
    /// `wrap-reverse`
    WrapReverse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_defers_to_container_items() {
        assert_eq!(
            ItemPosition::Auto.resolve(ItemPosition::Center, ItemPosition::Stretch),
            ItemPosition::Center
        );
    }

    #[test]
    fn test_auto_and_normal_fall_back_to_default() {
        assert_eq!(
            ItemPosition::Auto.resolve(ItemPosition::Auto, ItemPosition::Stretch),
            ItemPosition::Stretch
        );
        assert_eq!(
            ItemPosition::Normal.resolve(ItemPosition::Start, ItemPosition::Stretch),
            ItemPosition::Stretch
        );
    }
}
