use crate::Error;
use core::ops::{Bound, RangeBounds};

/// An inclusive range of array positions `[from, to]`
///
/// A span always covers at least one position.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    from: usize,
    to: usize,
}

impl Span {
    /// Creates a span covering `from..=to`
    ///
    /// Returns `None` if `from > to`.
    #[inline]
    pub const fn new(from: usize, to: usize) -> Option<Self> {
        if from <= to {
            Some(Self { from, to })
        } else {
            None
        }
    }

    #[inline]
    pub(crate) const fn new_unchecked(from: usize, to: usize) -> Self {
        debug_assert!(from <= to);
        Self { from, to }
    }

    /// Creates a span covering a single position
    #[inline]
    pub const fn unit(index: usize) -> Self {
        Self {
            from: index,
            to: index,
        }
    }

    /// Converts a range into a span within an array of length `len`
    ///
    /// Fails with [Error::InvalidRange] if the range is empty, reversed or
    /// reaches past `len`.
    ///
    /// ```
    /// use lazytree::{Error, Span};
    ///
    /// assert_eq!(Span::from_range(2..5, 10), Ok(Span::new(2, 4).unwrap()));
    /// assert_eq!(Span::from_range(.., 10), Ok(Span::new(0, 9).unwrap()));
    /// assert!(Span::from_range(3..3, 10).is_err());
    /// assert!(Span::from_range(8..=10, 10).is_err());
    /// ```
    pub fn from_range(range: impl RangeBounds<usize>, len: usize) -> Result<Self, Error> {
        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&n) => n.saturating_add(1),
            Bound::Excluded(&n) => n,
            Bound::Unbounded => len,
        };
        if start < end && end <= len {
            Ok(Self {
                from: start,
                to: end - 1,
            })
        } else {
            Err(Error::InvalidRange { start, end, len })
        }
    }

    /// First position covered by the span
    #[inline]
    pub const fn from(&self) -> usize {
        self.from
    }

    /// Last position covered by the span
    #[inline]
    pub const fn to(&self) -> usize {
        self.to
    }

    /// Number of positions covered by the span
    #[allow(clippy::len_without_is_empty)]
    #[inline]
    pub const fn len(&self) -> usize {
        self.to - self.from + 1
    }

    /// Returns `true` if the span covers exactly one position
    #[inline]
    pub const fn is_unit(&self) -> bool {
        self.from == self.to
    }

    /// Returns `true` if `other` lies completely within this span
    #[inline]
    pub const fn contains(&self, other: &Span) -> bool {
        other.from >= self.from && other.to <= self.to
    }

    /// Returns `true` if the two spans share at least one position
    #[inline]
    pub const fn intersects(&self, other: &Span) -> bool {
        (self.from <= other.from && self.to >= other.from)
            || (self.from >= other.from && self.from <= other.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(from: usize, to: usize) -> Span {
        Span::new(from, to).unwrap()
    }

    #[test]
    fn new_rejects_reversed() {
        assert!(Span::new(3, 2).is_none());
        assert_eq!(Span::new(2, 2), Some(Span::unit(2)));
    }

    #[test]
    fn from_range_bounds() {
        assert_eq!(Span::from_range(0..10, 10), Ok(span(0, 9)));
        assert_eq!(Span::from_range(0..=9, 10), Ok(span(0, 9)));
        assert_eq!(Span::from_range(4.., 10), Ok(span(4, 9)));
        assert_eq!(Span::from_range(..=4, 10), Ok(span(0, 4)));
        assert_eq!(
            Span::from_range((Bound::Excluded(2), Bound::Included(5)), 10),
            Ok(span(3, 5))
        );
    }

    #[test]
    fn from_range_errors() {
        assert_eq!(
            Span::from_range(0..11, 10),
            Err(Error::InvalidRange {
                start: 0,
                end: 11,
                len: 10
            })
        );
        assert_eq!(
            Span::from_range(10..=10, 10),
            Err(Error::InvalidRange {
                start: 10,
                end: 11,
                len: 10
            })
        );
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = Span::from_range(5..=3, 10);
        assert!(reversed.unwrap_err().is_invalid_range());
        assert!(Span::from_range(..0, 10).is_err());
        assert!(Span::from_range(.., 0).is_err());
        assert!(Span::from_range(0..=usize::MAX, 10).is_err());
    }

    #[test]
    fn contains() {
        let outer = span(2, 8);
        assert!(outer.contains(&span(2, 8)));
        assert!(outer.contains(&span(3, 3)));
        assert!(!outer.contains(&span(1, 4)));
        assert!(!outer.contains(&span(7, 9)));
        assert!(!span(3, 3).contains(&outer));
    }

    #[test]
    fn intersects_is_symmetric() {
        let cases = [
            (span(0, 3), span(3, 5), true),
            (span(0, 3), span(4, 5), false),
            (span(2, 8), span(4, 5), true),
            (span(4, 4), span(4, 4), true),
            (span(6, 9), span(0, 5), false),
        ];
        for (a, b, expected) in cases {
            assert_eq!(a.intersects(&b), expected, "{a:?} {b:?}");
            assert_eq!(b.intersects(&a), expected, "{b:?} {a:?}");
        }
    }

    #[test]
    fn len_and_unit() {
        assert_eq!(span(3, 7).len(), 5);
        assert!(Span::unit(4).is_unit());
        assert!(!span(3, 4).is_unit());
    }
}
