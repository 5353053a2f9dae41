//! CSS length values as seen by layout.
//!
//! [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
//! [§ 3.2 Sizing Values](https://www.w3.org/TR/css-sizing-3/#sizing-values)
//!
//! Style resolution has already turned relative units into pixels, so the
//! only things left for layout are fixed pixel values, percentages (and
//! calc mixes of the two), `auto`, `none`, and the intrinsic sizing keywords.

use serde::{Deserialize, Serialize};

/// A computed length as consumed by layout.
///
/// Serialized externally tagged in kebab-case, so a scene file writes
/// `"auto"`, `{"fixed": 10}`, `{"percent": 50}` or `"none"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Length {
    /// `auto`
    #[default]
    Auto,
    /// A pixel length.
    Fixed(f32),
    /// A percentage of the reference size (`50.0` means 50%).
    Percent(f32),
    /// `calc(<px> + <percent>%)`. Negative results are clamped by the
    /// consumers that require it.
    Calc {
        /// Pixel part.
        px: f32,
        /// Percentage part.
        percent: f32,
    },
    /// [§ 3.2 'min-content'](https://www.w3.org/TR/css-sizing-3/#valdef-width-min-content)
    MinContent,
    /// [§ 3.2 'max-content'](https://www.w3.org/TR/css-sizing-3/#valdef-width-max-content)
    MaxContent,
    /// [§ 3.2 'fit-content'](https://www.w3.org/TR/css-sizing-3/#valdef-width-fit-content)
    FitContent,
    /// `-webkit-fill-available` / `stretch`
    FillAvailable,
    /// `none`, only valid for `max-width` / `max-height`.
    #[serde(rename = "none")]
    MaxSizeNone,
}

impl Length {
    /// Shorthand for `Length::Fixed(px)`.
    #[must_use]
    pub const fn px(px: f32) -> Self {
        Self::Fixed(px)
    }

    /// Shorthand for `Length::Percent(percent)`.
    #[must_use]
    pub const fn percent(percent: f32) -> Self {
        Self::Percent(percent)
    }

    /// `auto`
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// A plain pixel length.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// A percentage, or a calc expression with a percentage part.
    #[must_use]
    pub const fn has_percent(&self) -> bool {
        matches!(self, Self::Percent(_) | Self::Calc { .. })
    }

    /// One of the intrinsic sizing keywords.
    #[must_use]
    pub const fn is_intrinsic(&self) -> bool {
        matches!(
            self,
            Self::MinContent | Self::MaxContent | Self::FitContent | Self::FillAvailable
        )
    }

    /// `auto` or an intrinsic sizing keyword.
    #[must_use]
    pub const fn is_intrinsic_or_auto(&self) -> bool {
        self.is_auto() || self.is_intrinsic()
    }

    /// `none`
    #[must_use]
    pub const fn is_max_size_none(&self) -> bool {
        matches!(self, Self::MaxSizeNone)
    }

    /// A value that resolves to a number on its own: fixed, percent or calc.
    #[must_use]
    pub const fn is_specified(&self) -> bool {
        matches!(self, Self::Fixed(_) | Self::Percent(_) | Self::Calc { .. })
    }

    /// Whether the stored value is zero.
    ///
    /// Keywords carry no value and therefore count as zero; calc and `none`
    /// never do.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Fixed(v) | Self::Percent(v) => *v == 0.0,
            Self::Calc { .. } | Self::MaxSizeNone => false,
            _ => true,
        }
    }

    /// Whether the stored value is strictly positive. Calc counts as positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Fixed(v) | Self::Percent(v) => *v > 0.0,
            Self::Calc { .. } => true,
            _ => false,
        }
    }
}

/// Resolve `length` against `maximum`, treating keywords as 0.
///
/// Used for margins, padding and offsets, where `auto` has already been
/// handled by the caller.
#[must_use]
pub fn minimum_value_for_length(length: Length, maximum: f32) -> f32 {
    match length {
        Length::Fixed(px) => px,
        Length::Percent(p) => maximum * p / 100.0,
        Length::Calc { px, percent } => px + maximum * percent / 100.0,
        _ => 0.0,
    }
}

/// Resolve `length` against `maximum`; `auto` and `fill-available` take the
/// whole of `maximum`.
#[must_use]
pub fn value_for_length(length: Length, maximum: f32) -> f32 {
    match length {
        Length::Fixed(_) | Length::Percent(_) | Length::Calc { .. } => {
            minimum_value_for_length(length, maximum)
        }
        Length::Auto | Length::FillAvailable => maximum,
        _ => 0.0,
    }
}

/// A two-dimensional length, as used by `scroll-snap-coordinate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LengthPoint {
    /// Horizontal component, resolved against the box width.
    pub x: Length,
    /// Vertical component, resolved against the box height.
    pub y: Length,
}

impl LengthPoint {
    /// A point from two lengths.
    #[must_use]
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Resolve against a `(width, height)` reference size.
    #[must_use]
    pub fn resolve(&self, width: f32, height: f32) -> (f32, f32) {
        (
            value_for_length(self.x, width),
            value_for_length(self.y, height),
        )
    }
}

/// Resolve a [`LengthPoint`] against a `(width, height)` size.
#[must_use]
pub fn point_for_length_point(point: LengthPoint, width: f32, height: f32) -> (f32, f32) {
    point.resolve(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_for_length_auto_takes_maximum() {
        assert_eq!(value_for_length(Length::Auto, 300.0), 300.0);
        assert_eq!(minimum_value_for_length(Length::Auto, 300.0), 0.0);
    }

    #[test]
    fn test_percent_and_calc_resolve() {
        assert_eq!(value_for_length(Length::percent(25.0), 400.0), 100.0);
        let calc = Length::Calc {
            px: 10.0,
            percent: 50.0,
        };
        assert_eq!(minimum_value_for_length(calc, 200.0), 110.0);
    }

    #[test]
    fn test_intrinsic_keywords_resolve_to_zero() {
        assert_eq!(value_for_length(Length::MinContent, 500.0), 0.0);
        assert_eq!(value_for_length(Length::MaxSizeNone, 500.0), 0.0);
        assert_eq!(value_for_length(Length::FillAvailable, 500.0), 500.0);
    }

    #[test]
    fn test_is_zero_semantics() {
        assert!(Length::Auto.is_zero());
        assert!(Length::px(0.0).is_zero());
        assert!(!Length::px(1.0).is_zero());
        assert!(
            !Length::Calc {
                px: 0.0,
                percent: 0.0
            }
            .is_zero()
        );
    }

    #[test]
    fn test_length_point_resolves_per_axis() {
        let point = LengthPoint::new(Length::percent(50.0), Length::px(7.0));
        assert_eq!(point.resolve(200.0, 100.0), (100.0, 7.0));
    }
}
