//! Box generation and positioning scheme properties.
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
//! [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)

use serde::{Deserialize, Serialize};
use strum_macros::Display as StrumDisplay;

/// Computed `display` value, flattened to the keywords layout distinguishes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, StrumDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Display {
    /// `display: block`
    #[default]
    Block,
    /// `display: inline`
    Inline,
    /// `display: inline-block`
    InlineBlock,
    /// `display: list-item`
    ListItem,
    /// `display: table`
    Table,
    /// `display: inline-table`
    InlineTable,
    /// `display: table-cell`
    TableCell,
    /// `display: flex`
    Flex,
    /// `display: inline-flex`
    InlineFlex,
    /// `display: grid`
    Grid,
    /// `display: inline-grid`
    InlineGrid,
    /// `display: none`
    None,
}

impl Display {
    /// The box participates in an inline formatting context.
    #[must_use]
    pub const fn is_inline_level(self) -> bool {
        matches!(
            self,
            Self::Inline | Self::InlineBlock | Self::InlineTable | Self::InlineFlex | Self::InlineGrid
        )
    }
}

/// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// "The 'position' and 'float' properties determine which of the CSS 2
/// positioning algorithms is used to calculate the position of a box."
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, StrumDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow.
    /// Then the box is offset relative to its normal position."
    Relative,
    /// "The box's position (and possibly size) is specified with the
    /// 'top', 'right', 'bottom', and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but the box is fixed with respect to some reference."
    Fixed,
    /// [CSS Positioned Layout Module Level 3 § 3.2](https://www.w3.org/TR/css-position-3/#sticky-position)
    Sticky,
}

impl Position {
    /// `absolute` or `fixed`.
    #[must_use]
    pub const fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }

    /// `relative` or `sticky`.
    #[must_use]
    pub const fn is_in_flow_positioned(self) -> bool {
        matches!(self, Self::Relative | Self::Sticky)
    }

    /// Anything but `static`.
    #[must_use]
    pub const fn is_positioned(self) -> bool {
        !matches!(self, Self::Static)
    }
}

/// [§ 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Float {
    /// Not floated.
    #[default]
    None,
    /// `float: left`
    Left,
    /// `float: right`
    Right,
}

/// [§ 9.5.2 'clear'](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Clear {
    /// No clearance.
    #[default]
    None,
    /// Clear left floats.
    Left,
    /// Clear right floats.
    Right,
    /// Clear both.
    Both,
}

/// [§ 4.4 'box-sizing'](https://www.w3.org/TR/css-sizing-3/#box-sizing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BoxSizing {
    /// Sizing properties measure the content box.
    #[default]
    ContentBox,
    /// Sizing properties measure the border box.
    BorderBox,
}

/// [§ 3 'overflow'](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    /// Content is not clipped.
    #[default]
    Visible,
    /// Clipped, programmatically scrollable.
    Hidden,
    /// Clipped, always shows scrollbars.
    Scroll,
    /// Clipped, scrollbars when needed.
    Auto,
    /// Clipped, not scrollable at all.
    Clip,
}

impl Overflow {
    /// Any value other than `visible` clips.
    #[must_use]
    pub const fn clips(self) -> bool {
        !matches!(self, Self::Visible)
    }

    /// The user can scroll along this axis.
    #[must_use]
    pub const fn scrolls(self) -> bool {
        matches!(self, Self::Scroll | Self::Auto)
    }
}

/// [§ 3 'contain'](https://www.w3.org/TR/css-contain-1/#contain-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Containment {
    /// `contain: size`
    pub size: bool,
    /// `contain: layout`
    pub layout: bool,
    /// `contain: paint`
    pub paint: bool,
}
