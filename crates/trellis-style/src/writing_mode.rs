//! Writing modes, inline direction and the logical-to-physical side mapping.
//!
//! [§ 2 Block Flow Direction](https://www.w3.org/TR/css-writing-modes-4/#block-flow)
//! [§ 6 Abstract Box Terminology](https://www.w3.org/TR/css-writing-modes-4/#abstract-box)

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// [§ 2 Block Flow Direction](https://www.w3.org/TR/css-writing-modes-4/#block-flow)
///
/// "The writing-mode property specifies whether lines of text are laid out
/// horizontally or vertically and the direction in which blocks progress."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WritingMode {
    /// Mapping:
    ///   - block-start  → top
    ///   - block-end    → bottom
    ///   - inline-start → left  (in ltr)
    ///   - inline-end   → right (in ltr)
    #[default]
    HorizontalTb,

    /// Mapping:
    ///   - block-start  → right
    ///   - block-end    → left
    ///   - inline-start → top    (in ltr)
    ///   - inline-end   → bottom (in ltr)
    VerticalRl,

    /// Mapping:
    ///   - block-start  → left
    ///   - block-end    → right
    ///   - inline-start → top    (in ltr)
    ///   - inline-end   → bottom (in ltr)
    VerticalLr,
}

/// [§ 2.1 'direction'](https://www.w3.org/TR/css-writing-modes-4/#direction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    /// Left-to-right inline base direction.
    #[default]
    Ltr,
    /// Right-to-left inline base direction.
    Rtl,
}

/// Physical side of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalSide {
    /// Top edge of the box
    Top,
    /// Right edge of the box
    Right,
    /// Bottom edge of the box
    Bottom,
    /// Left edge of the box
    Left,
}

impl WritingMode {
    /// Lines run horizontally and blocks stack vertically.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::HorizontalTb)
    }

    /// The block axis runs against its physical axis (`vertical-rl`).
    #[must_use]
    pub const fn is_flipped_blocks(self) -> bool {
        matches!(self, Self::VerticalRl)
    }

    /// Map block-start to the corresponding physical side.
    ///
    /// | Writing Mode   | block-start |
    /// |----------------|-------------|
    /// | horizontal-tb  | top         |
    /// | vertical-rl    | right       |
    /// | vertical-lr    | left        |
    #[must_use]
    pub const fn block_start_physical(self) -> PhysicalSide {
        match self {
            Self::HorizontalTb => PhysicalSide::Top,
            Self::VerticalRl => PhysicalSide::Right,
            Self::VerticalLr => PhysicalSide::Left,
        }
    }

    /// Map block-end to the corresponding physical side.
    #[must_use]
    pub const fn block_end_physical(self) -> PhysicalSide {
        match self {
            Self::HorizontalTb => PhysicalSide::Bottom,
            Self::VerticalRl => PhysicalSide::Left,
            Self::VerticalLr => PhysicalSide::Right,
        }
    }

    /// Map inline-start to the corresponding physical side for `direction`.
    #[must_use]
    pub const fn inline_start_physical(self, direction: Direction) -> PhysicalSide {
        match (self.is_horizontal(), direction) {
            (true, Direction::Ltr) => PhysicalSide::Left,
            (true, Direction::Rtl) => PhysicalSide::Right,
            (false, Direction::Ltr) => PhysicalSide::Top,
            (false, Direction::Rtl) => PhysicalSide::Bottom,
        }
    }

    /// Map inline-end to the corresponding physical side for `direction`.
    #[must_use]
    pub const fn inline_end_physical(self, direction: Direction) -> PhysicalSide {
        match (self.is_horizontal(), direction) {
            (true, Direction::Ltr) => PhysicalSide::Right,
            (true, Direction::Rtl) => PhysicalSide::Left,
            (false, Direction::Ltr) => PhysicalSide::Bottom,
            (false, Direction::Rtl) => PhysicalSide::Top,
        }
    }
}

/// Four values keyed by physical side, with logical views on top.
///
/// Used for margins, padding, borders and box offsets alike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PhysicalSides<T> {
    /// Top side value
    pub top: T,
    /// Right side value
    pub right: T,
    /// Bottom side value
    pub bottom: T,
    /// Left side value
    pub left: T,
}

impl<T: Copy> PhysicalSides<T> {
    /// The same value on all four sides.
    #[must_use]
    pub const fn uniform(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Value on a physical side.
    #[must_use]
    pub const fn get(&self, side: PhysicalSide) -> T {
        match side {
            PhysicalSide::Top => self.top,
            PhysicalSide::Right => self.right,
            PhysicalSide::Bottom => self.bottom,
            PhysicalSide::Left => self.left,
        }
    }

    /// Overwrite the value on a physical side.
    pub const fn set(&mut self, side: PhysicalSide, value: T) {
        match side {
            PhysicalSide::Top => self.top = value,
            PhysicalSide::Right => self.right = value,
            PhysicalSide::Bottom => self.bottom = value,
            PhysicalSide::Left => self.left = value,
        }
    }

    /// Block-start side in `writing_mode`.
    #[must_use]
    pub const fn before(&self, writing_mode: WritingMode) -> T {
        self.get(writing_mode.block_start_physical())
    }

    /// Block-end side in `writing_mode`.
    #[must_use]
    pub const fn after(&self, writing_mode: WritingMode) -> T {
        self.get(writing_mode.block_end_physical())
    }

    /// Inline-start side in `writing_mode` / `direction`.
    #[must_use]
    pub const fn start(&self, writing_mode: WritingMode, direction: Direction) -> T {
        self.get(writing_mode.inline_start_physical(direction))
    }

    /// Inline-end side in `writing_mode` / `direction`.
    #[must_use]
    pub const fn end(&self, writing_mode: WritingMode, direction: Direction) -> T {
        self.get(writing_mode.inline_end_physical(direction))
    }

    /// Physical left in horizontal modes, top in vertical ones.
    #[must_use]
    pub const fn logical_left(&self, writing_mode: WritingMode) -> T {
        if writing_mode.is_horizontal() {
            self.left
        } else {
            self.top
        }
    }

    /// Physical right in horizontal modes, bottom in vertical ones.
    #[must_use]
    pub const fn logical_right(&self, writing_mode: WritingMode) -> T {
        if writing_mode.is_horizontal() {
            self.right
        } else {
            self.bottom
        }
    }

    /// Set the block-start side.
    pub const fn set_before(&mut self, writing_mode: WritingMode, value: T) {
        self.set(writing_mode.block_start_physical(), value);
    }

    /// Set the block-end side.
    pub const fn set_after(&mut self, writing_mode: WritingMode, value: T) {
        self.set(writing_mode.block_end_physical(), value);
    }

    /// Set the inline-start side.
    pub const fn set_start(&mut self, writing_mode: WritingMode, direction: Direction, value: T) {
        self.set(writing_mode.inline_start_physical(direction), value);
    }

    /// Set the inline-end side.
    pub const fn set_end(&mut self, writing_mode: WritingMode, direction: Direction, value: T) {
        self.set(writing_mode.inline_end_physical(direction), value);
    }

    /// Apply `f` to every side.
    #[must_use]
    pub fn map<U>(&self, mut f: impl FnMut(T) -> U) -> PhysicalSides<U> {
        PhysicalSides {
            top: f(self.top),
            right: f(self.right),
            bottom: f(self.bottom),
            left: f(self.left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sides() -> PhysicalSides<i32> {
        PhysicalSides {
            top: 1,
            right: 2,
            bottom: 3,
            left: 4,
        }
    }

    #[test]
    fn test_horizontal_logical_sides() {
        let s = sides();
        let wm = WritingMode::HorizontalTb;
        assert_eq!(s.before(wm), 1);
        assert_eq!(s.after(wm), 3);
        assert_eq!(s.start(wm, Direction::Ltr), 4);
        assert_eq!(s.end(wm, Direction::Ltr), 2);
        assert_eq!(s.start(wm, Direction::Rtl), 2);
    }

    #[test]
    fn test_vertical_rl_logical_sides() {
        let s = sides();
        let wm = WritingMode::VerticalRl;
        assert_eq!(s.before(wm), 2, "block-start is the right edge in vertical-rl");
        assert_eq!(s.after(wm), 4);
        assert_eq!(s.start(wm, Direction::Ltr), 1);
        assert_eq!(s.end(wm, Direction::Rtl), 1);
        assert_eq!(s.logical_left(wm), 1);
    }

    #[test]
    fn test_set_start_writes_physical_side() {
        let mut s = sides();
        s.set_start(WritingMode::HorizontalTb, Direction::Rtl, 9);
        assert_eq!(s.right, 9);
    }
}
