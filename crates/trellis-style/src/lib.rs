//! Computed-style snapshot consumed by the trellis layout engine.
//!
//! # Scope
//!
//! Layout reads style, it never computes it. This crate holds the values a
//! cascade would hand over, already in computed form:
//!
//! - **Lengths** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/#lengths))
//!   - Fixed, percentage and calc values
//!   - `auto`, `none` and the intrinsic sizing keywords
//!   - Resolution against a reference size
//!
//! - **Writing modes** ([CSS Writing Modes Level 4](https://www.w3.org/TR/css-writing-modes-4/))
//!   - Block flow direction and inline direction
//!   - Logical-to-physical side mapping
//!
//! - **Box generation and positioning** ([CSS 2.1 § 9](https://www.w3.org/TR/CSS2/visuren.html))
//! - **Fragmentation** ([CSS Fragmentation Level 3](https://www.w3.org/TR/css-break-3/))
//! - **Scroll snap points** ([CSS Scroll Snap Points](https://www.w3.org/TR/2015/WD-css-snappoints-1-20150326/))
//!
//! # Not Yet Implemented
//!
//! - Font-relative units (the cascade resolves them before layout)
//! - `scroll-snap-destination`

/// Alignment keywords per [CSS Box Alignment Level 3](https://www.w3.org/TR/css-align-3/).
pub mod alignment;
/// The per-box computed style record.
pub mod computed;
/// `display`, `position`, `float`, `overflow` and friends.
pub mod display;
/// Break properties per [CSS Fragmentation Level 3](https://www.w3.org/TR/css-break-3/).
pub mod fragmentation;
/// Length values per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod length;
/// Scroll snap properties.
pub mod snap;
/// Writing modes per [CSS Writing Modes Level 4](https://www.w3.org/TR/css-writing-modes-4/).
pub mod writing_mode;

pub use alignment::{FlexDirection, FlexWrap, ItemPosition, TextAlign};
pub use computed::ComputedStyle;
pub use display::{BoxSizing, Clear, Containment, Display, Float, Overflow, Position};
pub use fragmentation::BreakValue;
pub use length::{
    Length, LengthPoint, minimum_value_for_length, point_for_length_point, value_for_length,
};
pub use snap::{ScrollAxis, ScrollSnapPoints, ScrollSnapType};
pub use writing_mode::{Direction, PhysicalSide, PhysicalSides, WritingMode};
