//! lazytree is an array-backed segment tree supporting range sum and range minimum
//! queries together with range-assignment updates in `O(log n)`.
//!
//! Updates are applied lazily: assigning a value to a range only touches the nodes
//! whose ranges are fully covered, and the assignment is pushed further down the
//! tree once a later query or update needs to look inside those nodes.
//!
//! # Example
//!
//! ```
//! use lazytree::SegmentTree;
//!
//! let mut tree = SegmentTree::new(&[1i32, 4, 3, 6, 7, 5, 2, 0, 9, 8]).unwrap();
//! assert_eq!(tree.range_sum(1..=7), Ok(27));
//! assert_eq!(tree.range_min(1..=7), Ok(0));
//!
//! tree.update(2..=2, 5).unwrap();
//! assert_eq!(tree.range_sum(1..=7), Ok(29));
//! ```
//!
//! # Feature flags
//!
//! - `std` (default): links the standard library and implements `std::error::Error` for [Error].
//! - `serde`: serializes a [SegmentTree] as its plain array of values.
//! - `profiler`: records per-operation latencies and node visits, see [SegmentTree::stats].
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(nonstandard_style, missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

/// Inclusive index ranges and range conversion
pub mod span;
/// The lazy segment tree
pub mod tree;
/// Element types that can be stored in a [SegmentTree]
pub mod value;

pub use span::Span;
pub use tree::SegmentTree;
pub use value::Value;

#[cfg(doctest)]
#[doc = include_str!("../../../README.md")]
struct ReadmeDoctests;

use core::{fmt, matches, write};

/// A type containing error variants that may arise when using a [SegmentTree]
///
/// Errors are detected before any state is touched, so a failed call never
/// leaves the tree partially updated.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested range is empty, reversed, or reaches past the end of the array
    InvalidRange {
        /// First index of the requested range
        start: usize,
        /// Exclusive end of the requested range
        end: usize,
        /// Number of elements in the tree
        len: usize,
    },
    /// A tree cannot be built over zero elements
    Empty,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRange { start, end, len } => {
                write!(f, "invalid range {start}..{end} for a tree of length {len}")
            }
            Error::Empty => write!(f, "cannot build a segment tree over zero elements"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Returns `true` if the error represents [Error::InvalidRange]
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Error::InvalidRange { .. })
    }
    /// Returns `true` if the error represents [Error::Empty]
    pub fn is_empty(&self) -> bool {
        matches!(self, Error::Empty)
    }
}
