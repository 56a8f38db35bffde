/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Piecewise-linear mapping over a sequence of `(in, out)` knots, strictly
//! monotonic in `in` and monotonic (ascending or descending) in `out`.

use crate::error::{Result, TopologyError};
use crate::interval::ContinuousInterval;
use crate::ordinate::Ordinate;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearMonotonic {
    pub input_bounds: ContinuousInterval,
    /// Strictly increasing in `.0`; monotonic (either direction) in `.1`.
    pub knots: Vec<(Ordinate, Ordinate)>,
}

impl LinearMonotonic {
    /// Builds a monotonic piecewise-linear mapping, validating both
    /// monotonicity requirements.
    pub fn new(knots: Vec<(Ordinate, Ordinate)>) -> Result<Self> {
        if knots.len() < 2 {
            return Err(TopologyError::NoSplitForLinearization);
        }
        let ascending_out = knots[1].1.ge(knots[0].1);
        for w in knots.windows(2) {
            if !w[1].0.gt(w[0].0) {
                return Err(TopologyError::NoSplitForLinearization);
            }
            let this_ascending = w[1].1.ge(w[0].1);
            if this_ascending != ascending_out {
                return Err(TopologyError::NoSplitForLinearization);
            }
        }
        let input_bounds = ContinuousInterval::new(knots[0].0, knots[knots.len() - 1].0);
        Ok(LinearMonotonic { input_bounds, knots })
    }

    pub fn eval(&self, t: Ordinate) -> Result<Ordinate> {
        if !self.covers(t) {
            return Err(TopologyError::OutOfBounds);
        }
        for w in self.knots.windows(2) {
            let (in0, out0) = w[0];
            let (in1, out1) = w[1];
            if t.ge(in0) && t.le(in1) {
                if in1.approx_eq(in0) {
                    return Ok(out0);
                }
                let frac = (t - in0) / (in1 - in0);
                return Ok(out0 + frac * (out1 - out0));
            }
        }
        Err(TopologyError::OutOfBounds)
    }

    /// Half-open containment consistent with the crate's tie-break: the
    /// final knot's value is included since a `LinearMonotonic` mapping is
    /// evaluated over a closed knot sequence (there is no "next" piece to
    /// hand the boundary to), unlike the open end of a
    /// [`ContinuousInterval`].
    fn covers(&self, t: Ordinate) -> bool {
        t.ge(self.input_bounds.start) && t.le(self.input_bounds.end)
    }

    pub fn output_bounds(&self) -> ContinuousInterval {
        let first = self.knots.first().unwrap().1;
        let last = self.knots.last().unwrap().1;
        if first.le(last) {
            ContinuousInterval::new(first, last)
        } else {
            ContinuousInterval::new(last, first)
        }
    }

    /// Swaps the axes and re-sorts by the new `in` (old `out`) column.
    /// Always succeeds: the monotonicity invariant on `out` is exactly the
    /// strict-monotonicity-in-`in` requirement of the result.
    pub fn inverted(&self) -> LinearMonotonic {
        let mut knots: Vec<(Ordinate, Ordinate)> =
            self.knots.iter().map(|&(i, o)| (o, i)).collect();
        if knots.len() >= 2 && knots[1].0.lt(knots[0].0) {
            knots.reverse();
        }
        let input_bounds = ContinuousInterval::new(knots[0].0, knots[knots.len() - 1].0);
        LinearMonotonic { input_bounds, knots }
    }

    pub fn trim(&self, bounds: ContinuousInterval) -> Option<LinearMonotonic> {
        let trimmed = self.input_bounds.intersect(&bounds)?;
        if trimmed.is_degenerate() && !self.input_bounds.is_degenerate() {
            return None;
        }
        let mut knots = Vec::new();
        for w in self.knots.windows(2) {
            let (in0, out0) = w[0];
            let (in1, out1) = w[1];
            let seg = ContinuousInterval::new(in0, in1);
            if let Some(overlap) = seg.intersect(&trimmed) {
                if knots.is_empty() {
                    knots.push((overlap.start, self.eval(overlap.start).unwrap_or(out0)));
                }
                knots.push((overlap.end, self.eval(overlap.end).unwrap_or(out1)));
            }
        }
        knots.dedup_by(|a, b| a.0.approx_eq(b.0));
        if knots.len() < 2 {
            return None;
        }
        Some(LinearMonotonic {
            input_bounds: trimmed,
            knots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ord(v: f64) -> Ordinate {
        Ordinate::from_f64(v)
    }

    #[test]
    fn rejects_non_monotonic_output() {
        let knots = vec![(ord(0.0), ord(0.0)), (ord(1.0), ord(1.0)), (ord(2.0), ord(0.5))];
        assert!(LinearMonotonic::new(knots).is_err());
    }

    #[test]
    fn evaluates_between_knots() {
        let m = LinearMonotonic::new(vec![(ord(0.0), ord(0.0)), (ord(2.0), ord(4.0))]).unwrap();
        assert_eq!(m.eval(ord(1.0)).unwrap(), ord(2.0));
    }

    #[test]
    fn inversion_round_trips() {
        let m = LinearMonotonic::new(vec![(ord(0.0), ord(0.0)), (ord(2.0), ord(4.0))]).unwrap();
        let inv = m.inverted();
        let y = m.eval(ord(1.5)).unwrap();
        assert_eq!(inv.eval(y).unwrap(), ord(1.5));
    }

    #[test]
    fn descending_output_is_allowed() {
        let m = LinearMonotonic::new(vec![(ord(0.0), ord(10.0)), (ord(1.0), ord(0.0))]).unwrap();
        assert_eq!(m.eval(ord(0.5)).unwrap(), ord(5.0));
    }
}
