//! Computed style snapshot.
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."
//!
//! Layout never mutates style. The cascade (outside this workspace) hands
//! each box a `ComputedStyle`; everything here is a plain value plus the
//! logical accessors that map physical properties onto the box's own
//! writing mode.

use serde::{Deserialize, Serialize};

use crate::alignment::{FlexDirection, FlexWrap, ItemPosition, TextAlign};
use crate::display::{BoxSizing, Clear, Containment, Display, Float, Overflow, Position};
use crate::fragmentation::BreakValue;
use crate::length::{Length, LengthPoint};
use crate::snap::{ScrollAxis, ScrollSnapPoints, ScrollSnapType};
use crate::writing_mode::{Direction, PhysicalSides, WritingMode};

/// Computed styles for one box.
///
/// Every field has its CSS initial value in [`ComputedStyle::default`], so a
/// scene file only lists what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    /// [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
    pub display: Display,
    /// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    pub position: Position,
    /// [§ 9.5.1 'float'](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    pub float: Float,
    /// [§ 9.5.2 'clear'](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
    pub clear: Clear,
    /// [§ 4.4 'box-sizing'](https://www.w3.org/TR/css-sizing-3/#box-sizing)
    pub box_sizing: BoxSizing,
    /// [§ 2 Block Flow Direction](https://www.w3.org/TR/css-writing-modes-4/#block-flow)
    ///
    /// Initial: horizontal-tb
    /// Inherited: yes
    pub writing_mode: WritingMode,
    /// [§ 2.1 'direction'](https://www.w3.org/TR/css-writing-modes-4/#direction)
    pub direction: Direction,

    /// [§ 10.2 'width'](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
    pub width: Length,
    /// [§ 10.5 'height'](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    pub height: Length,
    /// [§ 10.4 'min-width'](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    pub min_width: Length,
    /// [§ 10.4 'max-width'](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    pub max_width: Length,
    /// [§ 10.7 'min-height'](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    pub min_height: Length,
    /// [§ 10.7 'max-height'](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    pub max_height: Length,

    /// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    pub margin: PhysicalSides<Length>,
    /// [§ 8.4 Padding properties](https://www.w3.org/TR/CSS2/box.html#padding-properties)
    pub padding: PhysicalSides<Length>,
    /// [§ 8.5.1 Border width](https://www.w3.org/TR/CSS2/box.html#border-width-properties),
    /// already resolved to pixels (style `none` computes to 0).
    pub border: PhysicalSides<f32>,
    /// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS2/visuren.html#position-props):
    /// 'top', 'right', 'bottom', 'left'.
    pub inset: PhysicalSides<Length>,

    /// [§ 3 'overflow-x'](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    pub overflow_x: Overflow,
    /// [§ 3 'overflow-y'](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    pub overflow_y: Overflow,

    /// [§ 16.2 'text-align'](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
    pub text_align: TextAlign,
    /// [§ 6.1 'align-self'](https://www.w3.org/TR/css-align-3/#align-self-property)
    pub align_self: ItemPosition,
    /// [§ 6.3 'align-items'](https://www.w3.org/TR/css-align-3/#align-items-property)
    pub align_items: ItemPosition,
    /// [§ 6.1 'justify-self'](https://www.w3.org/TR/css-align-3/#justify-self-property)
    pub justify_self: ItemPosition,
    /// [§ 6.3 'justify-items'](https://www.w3.org/TR/css-align-3/#justify-items-property)
    pub justify_items: ItemPosition,
    /// [§ 5.1 'flex-direction'](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
    pub flex_direction: FlexDirection,
    /// [§ 5.2 'flex-wrap'](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
    pub flex_wrap: FlexWrap,

    /// [§ 3.1 'break-before'](https://www.w3.org/TR/css-break-3/#break-between)
    pub break_before: BreakValue,
    /// [§ 3.1 'break-after'](https://www.w3.org/TR/css-break-3/#break-between)
    pub break_after: BreakValue,
    /// [§ 3.2 'break-inside'](https://www.w3.org/TR/css-break-3/#break-within)
    pub break_inside: BreakValue,

    /// 'scroll-snap-type'
    pub scroll_snap_type: ScrollSnapType,
    /// 'scroll-snap-points-x'
    pub scroll_snap_points_x: ScrollSnapPoints,
    /// 'scroll-snap-points-y'
    pub scroll_snap_points_y: ScrollSnapPoints,
    /// 'scroll-snap-coordinate': points in the box's own border-box space.
    pub scroll_snap_coordinate: Vec<LengthPoint>,

    /// Font scale factor applied by text autosizing. 1.0 when inactive.
    pub text_autosizing_multiplier: f32,
    /// The before margin comes from the quirky UA stylesheet.
    pub has_margin_before_quirk: bool,
    /// The after margin comes from the quirky UA stylesheet.
    pub has_margin_after_quirk: bool,
    /// [§ 3 'contain'](https://www.w3.org/TR/css-contain-1/#contain-property)
    pub contain: Containment,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            position: Position::Static,
            float: Float::None,
            clear: Clear::None,
            box_sizing: BoxSizing::ContentBox,
            writing_mode: WritingMode::HorizontalTb,
            direction: Direction::Ltr,
            width: Length::Auto,
            height: Length::Auto,
            min_width: Length::Auto,
            max_width: Length::MaxSizeNone,
            min_height: Length::Auto,
            max_height: Length::MaxSizeNone,
            margin: PhysicalSides::uniform(Length::Fixed(0.0)),
            padding: PhysicalSides::uniform(Length::Fixed(0.0)),
            border: PhysicalSides::uniform(0.0),
            inset: PhysicalSides::uniform(Length::Auto),
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            text_align: TextAlign::Start,
            align_self: ItemPosition::Auto,
            align_items: ItemPosition::Auto,
            justify_self: ItemPosition::Auto,
            justify_items: ItemPosition::Auto,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Nowrap,
            break_before: BreakValue::Auto,
            break_after: BreakValue::Auto,
            break_inside: BreakValue::Auto,
            scroll_snap_type: ScrollSnapType::None,
            scroll_snap_points_x: ScrollSnapPoints::default(),
            scroll_snap_points_y: ScrollSnapPoints::default(),
            scroll_snap_coordinate: Vec::new(),
            text_autosizing_multiplier: 1.0,
            has_margin_before_quirk: false,
            has_margin_after_quirk: false,
            contain: Containment::default(),
        }
    }
}

impl ComputedStyle {
    /// Lines run horizontally in this style's writing mode.
    #[must_use]
    pub const fn is_horizontal_writing_mode(&self) -> bool {
        self.writing_mode.is_horizontal()
    }

    /// `vertical-rl`: the block axis is flipped relative to its physical axis.
    #[must_use]
    pub const fn is_flipped_blocks_writing_mode(&self) -> bool {
        self.writing_mode.is_flipped_blocks()
    }

    /// `direction: ltr`
    #[must_use]
    pub const fn is_left_to_right_direction(&self) -> bool {
        matches!(self.direction, Direction::Ltr)
    }

    /// `float` is not `none`.
    #[must_use]
    pub const fn is_floating(&self) -> bool {
        !matches!(self.float, Float::None)
    }

    /// `position: absolute | fixed`
    #[must_use]
    pub const fn has_out_of_flow_position(&self) -> bool {
        self.position.is_out_of_flow()
    }

    /// Column flex container.
    #[must_use]
    pub const fn is_column_flex_direction(&self) -> bool {
        self.flex_direction.is_column()
    }

    // [§ 6.2 Flow-relative Directions](https://www.w3.org/TR/css-writing-modes-4/#logical-directions)
    //
    // The sizing properties swap with the writing mode: in vertical modes the
    // inline axis is the physical vertical axis.

    /// 'width' in horizontal modes, 'height' in vertical ones.
    #[must_use]
    pub const fn logical_width(&self) -> Length {
        if self.is_horizontal_writing_mode() {
            self.width
        } else {
            self.height
        }
    }

    /// 'height' in horizontal modes, 'width' in vertical ones.
    #[must_use]
    pub const fn logical_height(&self) -> Length {
        if self.is_horizontal_writing_mode() {
            self.height
        } else {
            self.width
        }
    }

    /// Logical 'min-width'.
    #[must_use]
    pub const fn logical_min_width(&self) -> Length {
        if self.is_horizontal_writing_mode() {
            self.min_width
        } else {
            self.min_height
        }
    }

    /// Logical 'max-width'.
    #[must_use]
    pub const fn logical_max_width(&self) -> Length {
        if self.is_horizontal_writing_mode() {
            self.max_width
        } else {
            self.max_height
        }
    }

    /// Logical 'min-height'.
    #[must_use]
    pub const fn logical_min_height(&self) -> Length {
        if self.is_horizontal_writing_mode() {
            self.min_height
        } else {
            self.min_width
        }
    }

    /// Logical 'max-height'.
    #[must_use]
    pub const fn logical_max_height(&self) -> Length {
        if self.is_horizontal_writing_mode() {
            self.max_height
        } else {
            self.max_width
        }
    }

    /// 'left' in horizontal modes, 'top' in vertical ones.
    #[must_use]
    pub const fn logical_left(&self) -> Length {
        self.inset.logical_left(self.writing_mode)
    }

    /// 'right' in horizontal modes, 'bottom' in vertical ones.
    #[must_use]
    pub const fn logical_right(&self) -> Length {
        self.inset.logical_right(self.writing_mode)
    }

    /// The block-start offset ('top' in horizontal-tb, 'right' in vertical-rl).
    #[must_use]
    pub const fn logical_top(&self) -> Length {
        self.inset.before(self.writing_mode)
    }

    /// The block-end offset.
    #[must_use]
    pub const fn logical_bottom(&self) -> Length {
        self.inset.after(self.writing_mode)
    }

    /// Inline-start margin in this style's own flow.
    #[must_use]
    pub const fn margin_start(&self) -> Length {
        self.margin.start(self.writing_mode, self.direction)
    }

    /// Inline-end margin in this style's own flow.
    #[must_use]
    pub const fn margin_end(&self) -> Length {
        self.margin.end(self.writing_mode, self.direction)
    }

    /// Block-start margin in this style's own flow.
    #[must_use]
    pub const fn margin_before(&self) -> Length {
        self.margin.before(self.writing_mode)
    }

    /// Block-end margin in this style's own flow.
    #[must_use]
    pub const fn margin_after(&self) -> Length {
        self.margin.after(self.writing_mode)
    }

    /// Inline-start margin in another style's flow (usually the containing block's).
    #[must_use]
    pub const fn margin_start_using(&self, other: &Self) -> Length {
        self.margin.start(other.writing_mode, other.direction)
    }

    /// Inline-end margin in another style's flow.
    #[must_use]
    pub const fn margin_end_using(&self, other: &Self) -> Length {
        self.margin.end(other.writing_mode, other.direction)
    }

    /// Block-start margin in another style's flow.
    #[must_use]
    pub const fn margin_before_using(&self, other: &Self) -> Length {
        self.margin.before(other.writing_mode)
    }

    /// Block-end margin in another style's flow.
    #[must_use]
    pub const fn margin_after_using(&self, other: &Self) -> Length {
        self.margin.after(other.writing_mode)
    }

    /// Both inline-axis offsets are `auto`, so the box sits at its static
    /// inline position. `horizontal` is the box's own axis orientation.
    #[must_use]
    pub const fn has_static_inline_position(&self, horizontal: bool) -> bool {
        if horizontal {
            self.inset.left.is_auto() && self.inset.right.is_auto()
        } else {
            self.inset.top.is_auto() && self.inset.bottom.is_auto()
        }
    }

    /// Both block-axis offsets are `auto`.
    #[must_use]
    pub const fn has_static_block_position(&self, horizontal: bool) -> bool {
        if horizontal {
            self.inset.top.is_auto() && self.inset.bottom.is_auto()
        } else {
            self.inset.left.is_auto() && self.inset.right.is_auto()
        }
    }

    /// Overflow along the block axis.
    #[must_use]
    pub const fn logical_overflow_block(&self) -> Overflow {
        if self.is_horizontal_writing_mode() {
            self.overflow_y
        } else {
            self.overflow_x
        }
    }

    /// [§ 6.1 'align-self'](https://www.w3.org/TR/css-align-3/#align-self-property)
    /// resolved against `container`, with `normal` meaning `normal_behaviour`.
    #[must_use]
    pub const fn resolve_alignment(
        &self,
        container: &Self,
        normal_behaviour: ItemPosition,
    ) -> ItemPosition {
        self.align_self
            .resolve(container.align_items, normal_behaviour)
    }

    /// [§ 6.1 'justify-self'](https://www.w3.org/TR/css-align-3/#justify-self-property)
    /// resolved against `container`.
    #[must_use]
    pub const fn resolve_justification(
        &self,
        container: &Self,
        normal_behaviour: ItemPosition,
    ) -> ItemPosition {
        self.justify_self
            .resolve(container.justify_items, normal_behaviour)
    }

    /// Snap points declared for one scroll axis.
    #[must_use]
    pub const fn scroll_snap_points(&self, axis: ScrollAxis) -> ScrollSnapPoints {
        match axis {
            ScrollAxis::X => self.scroll_snap_points_x,
            ScrollAxis::Y => self.scroll_snap_points_y,
        }
    }
}
