//! Fragmentation break properties.
//!
//! [CSS Fragmentation Level 3 § 3 Controlling Breaks](https://www.w3.org/TR/css-break-3/#breaking-controls)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// [§ 3.1 'break-before', 'break-after'](https://www.w3.org/TR/css-break-3/#break-between)
/// and [§ 3.2 'break-inside'](https://www.w3.org/TR/css-break-3/#break-within).
///
/// `break-inside` only accepts `auto` and the `avoid*` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BreakValue {
    /// "Neither force nor forbid a break."
    #[default]
    Auto,
    /// "Avoid a break."
    Avoid,
    /// "Avoid a column break."
    AvoidColumn,
    /// "Avoid a page break."
    AvoidPage,
    /// "Always force a break."
    Column,
    /// "Always force a page break."
    Page,
    /// "Force one or two page breaks so that the next page is formatted as a left page."
    Left,
    /// "... as a right page."
    Right,
    /// "... as a recto page."
    Recto,
    /// "... as a verso page."
    Verso,
}

impl BreakValue {
    /// [§ 3.1](https://www.w3.org/TR/css-break-3/#forced-break)
    ///
    /// "A forced break is one explicitly indicated by the style sheet author."
    #[must_use]
    pub const fn is_forced(self) -> bool {
        matches!(
            self,
            Self::Column | Self::Page | Self::Left | Self::Right | Self::Recto | Self::Verso
        )
    }

    /// One of the `avoid*` keywords.
    #[must_use]
    pub const fn is_avoid(self) -> bool {
        matches!(self, Self::Avoid | Self::AvoidColumn | Self::AvoidPage)
    }

    /// Values that only mean something inside a multicol container.
    #[must_use]
    pub const fn is_column_value(self) -> bool {
        matches!(self, Self::Column | Self::AvoidColumn)
    }
}
