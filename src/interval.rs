/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

A half-open continuous interval `[start, end)` over [`Ordinate`]s, the unit
every [`crate::mapping::Mapping`] and [`crate::topology::Topology`] bounds
itself by.

*/

use crate::ordinate::Ordinate;

/// A half-open interval `[start, end)`.
///
/// An interval with `start == end` is a degenerate, held instant rather than
/// an error: several edges in a composition graph (a held-frame warp, a
/// zero-duration transition) legitimately produce one. `start > end` is
/// never constructed by this crate's own algorithms; callers that need a
/// reversed interval should invert explicitly rather than relying on field
/// order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuousInterval {
    pub start: Ordinate,
    pub end: Ordinate,
}

impl ContinuousInterval {
    pub fn new(start: Ordinate, end: Ordinate) -> Self {
        ContinuousInterval { start, end }
    }

    /// A degenerate interval holding a single instant.
    pub fn instant(at: Ordinate) -> Self {
        ContinuousInterval { start: at, end: at }
    }

    pub fn duration(&self) -> Ordinate {
        self.end - self.start
    }

    pub fn is_degenerate(&self) -> bool {
        self.start.approx_eq(self.end)
    }

    /// Whether `t` falls within `[start, end)` -- the later of two adjacent
    /// intervals owns a shared boundary value, consistent with the
    /// half-open tie-break used throughout the crate's mapping and topology
    /// algebra.
    pub fn contains(&self, t: Ordinate) -> bool {
        if self.is_degenerate() {
            t.approx_eq(self.start)
        } else {
            t.ge(self.start) && t.lt(self.end)
        }
    }

    /// The intersection of two intervals, or `None` if they don't overlap.
    pub fn intersect(&self, other: &ContinuousInterval) -> Option<ContinuousInterval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start.gt(end) {
            None
        } else {
            Some(ContinuousInterval { start, end })
        }
    }

    /// The smallest interval containing both `self` and `other`.
    pub fn union_bounding(&self, other: &ContinuousInterval) -> ContinuousInterval {
        ContinuousInterval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Translate the interval by a fixed offset.
    pub fn shifted(&self, by: Ordinate) -> ContinuousInterval {
        ContinuousInterval {
            start: self.start + by,
            end: self.end + by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_and_degenerate() {
        let held = ContinuousInterval::instant(Ordinate::from_f64(3.0));
        assert!(held.is_degenerate());
        assert_eq!(held.duration(), Ordinate::ZERO);
    }

    #[test]
    fn half_open_contains() {
        let iv = ContinuousInterval::new(Ordinate::from_f64(0.0), Ordinate::from_f64(2.0));
        assert!(iv.contains(Ordinate::from_f64(0.0)));
        assert!(!iv.contains(Ordinate::from_f64(2.0)));
        assert!(iv.contains(Ordinate::from_f64(1.999)));
    }

    #[test]
    fn intersect_disjoint_is_none() {
        let a = ContinuousInterval::new(Ordinate::from_f64(0.0), Ordinate::from_f64(1.0));
        let b = ContinuousInterval::new(Ordinate::from_f64(2.0), Ordinate::from_f64(3.0));
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn intersect_overlapping() {
        let a = ContinuousInterval::new(Ordinate::from_f64(0.0), Ordinate::from_f64(2.0));
        let b = ContinuousInterval::new(Ordinate::from_f64(1.0), Ordinate::from_f64(3.0));
        let got = a.intersect(&b).unwrap();
        assert_eq!(got.start, Ordinate::from_f64(1.0));
        assert_eq!(got.end, Ordinate::from_f64(2.0));
    }

    #[test]
    fn union_bounding_spans_both() {
        let a = ContinuousInterval::new(Ordinate::from_f64(0.0), Ordinate::from_f64(1.0));
        let b = ContinuousInterval::new(Ordinate::from_f64(5.0), Ordinate::from_f64(6.0));
        let u = a.union_bounding(&b);
        assert_eq!(u.start, Ordinate::from_f64(0.0));
        assert_eq!(u.end, Ordinate::from_f64(6.0));
    }
}
