//! Box-model layout for the trellis engine.
//!
//! # Scope
//!
//! This crate sizes and positions the boxes of a box tree:
//! - **Width resolution** ([CSS 2.1 § 10.3](https://www.w3.org/TR/CSS2/visudet.html#Computing_widths_and_margins))
//!   - Fill-available, shrink-to-fit and intrinsic keywords
//!   - Auto margins, `text-align` quirks, float avoidance
//!   - Flex and grid override slots
//!
//! - **Height resolution** ([CSS 2.1 § 10.6](https://www.w3.org/TR/CSS2/visudet.html#Computing_heights_and_margins))
//!   - Percentage heights and the containing-block walk, quirks included
//!   - Replaced elements
//!   - Viewport stretching of `<html>` and `<body>` in quirks mode
//!
//! - **Positioned boxes** ([CSS 2.1 § 10.3.7, § 10.6.4](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width))
//!   - Static positions, over-constraint, RTL and orthogonal flows
//!   - Relative offsets
//!
//! - **Fragmentation** ([CSS Fragmentation Level 3](https://www.w3.org/TR/css-break-3/))
//!   - Break value controllability and precedence
//!   - Monolithic boxes and pagination struts
//!
//! - **Scroll snap** ([CSS Scroll Snap Points](https://www.w3.org/TR/2015/WD-css-snappoints-1-20150326/))
//!   - Snap container and area registry
//!   - Snap offsets along each axis
//!
//! - **Overflow and floats** ([CSS Overflow Level 3](https://www.w3.org/TR/css-overflow-3/), [CSS 2.1 § 9.5](https://www.w3.org/TR/CSS2/visuren.html#floats))
//!
//! # Not Yet Implemented
//!
//! - Margin collapsing
//! - Inline formatting and line boxes
//! - Table, flex and grid layout algorithms (their results arrive through
//!   override slots)

/// Rects and edge sizes.
pub mod box_model;
/// Errors surfaced by the box tree API.
pub mod error;
/// Float exclusions per [CSS 2.1 § 9.5](https://www.w3.org/TR/CSS2/visuren.html#floats).
pub mod float;
/// The block-flow driver.
pub mod flow;
/// The per-box geometry record.
pub mod geometry;
/// Block-size resolution per [CSS 2.1 § 10.6](https://www.w3.org/TR/CSS2/visudet.html#Computing_heights_and_margins).
pub mod height;
/// The shared margin equation.
pub mod margins;
/// Scrollable and ink overflow per [CSS Overflow Level 3](https://www.w3.org/TR/css-overflow-3/).
pub mod overflow;
/// Break values and page geometry per [CSS Fragmentation Level 3](https://www.w3.org/TR/css-break-3/).
pub mod pagination;
/// Percentage heights and their dependency edges.
pub mod percentage;
/// Absolute, fixed and relative positioning.
pub mod positioned;
/// Scene files.
pub mod scene;
/// Document-level settings.
pub mod settings;
/// Scroll snap containers and areas.
pub mod snap;
/// The box tree.
pub mod tree;
/// Inline-size resolution per [CSS 2.1 § 10.3](https://www.w3.org/TR/CSS2/visudet.html#Computing_widths_and_margins).
pub mod width;

// Re-exports for convenience
pub use box_model::{EdgeSizes, Rect};
pub use error::LayoutError;
pub use float::{FloatExclusions, FloatRect, FloatSide};
pub use geometry::{
    AvailableLogicalHeightType, BoxGeometry, PercentHeightLinks, PreferredLogicalWidths,
    SizeOverrides,
};
pub use margins::{MarginDirection, MarginPair};
pub use overflow::OverflowModel;
pub use pagination::{
    PageBoundaryRule, PaginationBreakability, fragmentainer_break_precedence,
    join_fragmentainer_break_values,
};
pub use scene::{BoxReport, BuiltScene, Scene, SceneBox};
pub use settings::{DocumentSettings, Viewport};
pub use snap::SnapCoordinator;
pub use tree::{
    BoxId, BoxKind, ContainingBlockChain, Element, FlowThreadKind, Fragmentainer, LayoutBox,
    LayoutTree,
};
pub use width::{LogicalExtent, SizeKind};
