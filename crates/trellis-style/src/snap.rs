//! Scroll snap properties.
//!
//! [CSS Scroll Snap Points (2015 draft)](https://www.w3.org/TR/2015/WD-css-snappoints-1-20150326/)
//!
//! This is the "snap points" generation of the feature: containers opt in with
//! `scroll-snap-type`, may declare a repeating grid with
//! `scroll-snap-points-x/y: repeat(<length>)`, and descendants contribute
//! element-based positions with `scroll-snap-coordinate`.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::length::Length;

/// [§ 3.1 'scroll-snap-type'](https://www.w3.org/TR/2015/WD-css-snappoints-1-20150326/#scroll-snap-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScrollSnapType {
    /// "The visual viewport of this scroll container must ignore snap points."
    #[default]
    None,
    /// "The visual viewport of this scroll container must come to rest on a snap point."
    Mandatory,
    /// "The visual viewport may come to rest on a snap point."
    Proximity,
}

/// [§ 3.2 'scroll-snap-points-x/y'](https://www.w3.org/TR/2015/WD-css-snappoints-1-20150326/#scroll-snap-points)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScrollSnapPoints {
    /// `repeat(<length>)`. Percentages resolve against the container's
    /// client size along the axis. `None` means `scroll-snap-points: none`.
    pub repeat: Option<Length>,
}

impl ScrollSnapPoints {
    /// `repeat(<length>)`
    #[must_use]
    pub const fn repeat(length: Length) -> Self {
        Self {
            repeat: Some(length),
        }
    }
}

/// Scroll axis a snap-offset query is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScrollAxis {
    /// Horizontal scrolling (`scroll-snap-points-x`).
    X,
    /// Vertical scrolling (`scroll-snap-points-y`).
    Y,
}
