//! Errors surfaced by the box tree API.
//!
//! Geometry never fails: an unresolvable percentage is `None`, an
//! over-constrained equation drops one edge. Only misuse of the tree is an
//! error.

use thiserror::Error;

use crate::tree::{BoxId, BoxKind};

/// Failure of a tree mutation or lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The handle does not name a live box in this tree.
    #[error("unknown box {0:?}")]
    UnknownBox(BoxId),
    /// The parent's kind never has child boxes.
    #[error("{kind:?} box {parent:?} cannot have children")]
    CannotHaveChildren {
        /// The box children were attached to.
        parent: BoxId,
        /// Its kind.
        kind: BoxKind,
    },
    /// Only the tree root may be the view.
    #[error("a tree has exactly one view box")]
    SecondView,
    /// A box cannot be removed while it is the root.
    #[error("the view box cannot be removed")]
    RemoveView,
    /// A scene description does not describe a valid tree.
    #[error("malformed scene: {0}")]
    MalformedScene(String),
}
