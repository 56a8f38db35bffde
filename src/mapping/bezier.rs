/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! An ordered sequence of cubic Bezier segments whose `in` endpoints are
//! strictly monotonic. Evaluation walks to the segment covering `t`, then
//! numerically root-finds the curve parameter via bisection (the crate
//! does not assume the caller linked a symbolic-root solver).

use crate::error::{Result, TopologyError};
use crate::interval::ContinuousInterval;
use crate::ordinate::Ordinate;

/// Four control points of a single cubic segment, `(in, out)` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicSegment {
    pub p0: (Ordinate, Ordinate),
    pub p1: (Ordinate, Ordinate),
    pub p2: (Ordinate, Ordinate),
    pub p3: (Ordinate, Ordinate),
}

impl CubicSegment {
    fn component_at(a: f64, b: f64, c: f64, d: f64, t: f64) -> f64 {
        let mt = 1.0 - t;
        mt * mt * mt * a + 3.0 * mt * mt * t * b + 3.0 * mt * t * t * c + t * t * t * d
    }

    pub fn x_at(&self, t: f64) -> f64 {
        Self::component_at(
            self.p0.0.as_f64(),
            self.p1.0.as_f64(),
            self.p2.0.as_f64(),
            self.p3.0.as_f64(),
            t,
        )
    }

    pub fn y_at(&self, t: f64) -> f64 {
        Self::component_at(
            self.p0.1.as_f64(),
            self.p1.1.as_f64(),
            self.p2.1.as_f64(),
            self.p3.1.as_f64(),
            t,
        )
    }

    /// Finds `t in [0,1]` with `x(t) == target` via bisection, assuming `x`
    /// is monotonic over the segment (an invariant of [`Bezier`]).
    fn solve_for_x(&self, target: f64) -> f64 {
        let (mut lo, mut hi) = (0.0f64, 1.0f64);
        let ascending = self.x_at(1.0) >= self.x_at(0.0);
        for _ in 0..60 {
            let mid = 0.5 * (lo + hi);
            let x_mid = self.x_at(mid);
            let too_high = if ascending { x_mid > target } else { x_mid < target };
            if too_high {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        0.5 * (lo + hi)
    }

    /// De Casteljau subdivision at parameter `t`, producing the segment
    /// before and after the split point.
    fn split_at_t(&self, t: f64) -> (CubicSegment, CubicSegment) {
        let lerp = |a: (Ordinate, Ordinate), b: (Ordinate, Ordinate)| {
            (
                Ordinate::from_f64(a.0.as_f64() * (1.0 - t) + b.0.as_f64() * t),
                Ordinate::from_f64(a.1.as_f64() * (1.0 - t) + b.1.as_f64() * t),
            )
        };
        let ab = lerp(self.p0, self.p1);
        let bc = lerp(self.p1, self.p2);
        let cd = lerp(self.p2, self.p3);
        let abc = lerp(ab, bc);
        let bcd = lerp(bc, cd);
        let abcd = lerp(abc, bcd);
        (
            CubicSegment {
                p0: self.p0,
                p1: ab,
                p2: abc,
                p3: abcd,
            },
            CubicSegment {
                p0: abcd,
                p1: bcd,
                p2: cd,
                p3: self.p3,
            },
        )
    }

    fn swap_axes(&self) -> CubicSegment {
        CubicSegment {
            p0: (self.p0.1, self.p0.0),
            p1: (self.p1.1, self.p1.0),
            p2: (self.p2.1, self.p2.0),
            p3: (self.p3.1, self.p3.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bezier {
    pub input_bounds: ContinuousInterval,
    pub segments: Vec<CubicSegment>,
}

impl Bezier {
    pub fn new(segments: Vec<CubicSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(TopologyError::NoSplitForLinearization);
        }
        for w in segments.windows(2) {
            if !w[0].p3.0.approx_eq(w[1].p0.0) {
                return Err(TopologyError::NoSplitForLinearization);
            }
        }
        let input_bounds = ContinuousInterval::new(
            segments[0].p0.0,
            segments[segments.len() - 1].p3.0,
        );
        Ok(Bezier {
            input_bounds,
            segments,
        })
    }

    fn segment_for(&self, t: Ordinate) -> Option<&CubicSegment> {
        self.segments.iter().find(|seg| {
            let lo = seg.p0.0.min(seg.p3.0);
            let hi = seg.p0.0.max(seg.p3.0);
            t.ge(lo) && t.le(hi)
        })
    }

    pub fn eval(&self, t: Ordinate) -> Result<Ordinate> {
        let seg = self.segment_for(t).ok_or(TopologyError::OutOfBounds)?;
        let param = seg.solve_for_x(t.as_f64());
        Ok(Ordinate::from_f64(seg.y_at(param)))
    }

    /// Whether `y` is monotonic along the whole curve, a precondition for
    /// [`Bezier::inverted`].
    pub fn is_output_monotonic(&self) -> bool {
        let mut last: Option<f64> = None;
        let mut ascending: Option<bool> = None;
        const SAMPLES: usize = 32;
        for seg in &self.segments {
            for i in 0..=SAMPLES {
                let t = i as f64 / SAMPLES as f64;
                let y = seg.y_at(t);
                if let Some(prev) = last {
                    if (y - prev).abs() > f64::EPSILON {
                        let dir = y > prev;
                        match ascending {
                            None => ascending = Some(dir),
                            Some(a) if a != dir => return false,
                            _ => {}
                        }
                    }
                }
                last = Some(y);
            }
        }
        true
    }

    /// Swaps axes on every segment. Valid exactly when
    /// [`Bezier::is_output_monotonic`] holds; callers that need to invert a
    /// non-monotonic curve must [`Bezier::split_at`] first.
    pub fn inverted(&self) -> Result<Bezier> {
        if !self.is_output_monotonic() {
            return Err(TopologyError::NoSplitForLinearization);
        }
        let mut segments: Vec<CubicSegment> =
            self.segments.iter().map(|s| s.swap_axes()).collect();
        if segments.len() >= 2 && segments[0].p0.0.gt(segments[1].p0.0) {
            segments.reverse();
        }
        Bezier::new(segments)
    }

    /// Splits the curve at ordinate `at`, returning the mapping before and
    /// after the split. This is the escape hatch [`TopologyError::
    /// NoSplitForLinearization`] asks the caller to use when a
    /// non-monotonic curve needs to be inverted piecewise.
    pub fn split_at(&self, at: Ordinate) -> Result<(Bezier, Bezier)> {
        if !self.input_bounds.contains(at) && !at.approx_eq(self.input_bounds.end) {
            return Err(TopologyError::OutOfBounds);
        }
        let idx = self
            .segments
            .iter()
            .position(|seg| {
                let lo = seg.p0.0.min(seg.p3.0);
                let hi = seg.p0.0.max(seg.p3.0);
                at.ge(lo) && at.le(hi)
            })
            .ok_or(TopologyError::OutOfBounds)?;
        let seg = &self.segments[idx];
        let t = seg.solve_for_x(at.as_f64());
        let (before, after) = seg.split_at_t(t);

        let mut before_segments: Vec<CubicSegment> = self.segments[..idx].to_vec();
        before_segments.push(before);
        let mut after_segments: Vec<CubicSegment> = vec![after];
        after_segments.extend(self.segments[idx + 1..].to_vec());

        Ok((Bezier::new(before_segments)?, Bezier::new(after_segments)?))
    }

    pub fn trim(&self, bounds: ContinuousInterval) -> Option<Bezier> {
        let trimmed = self.input_bounds.intersect(&bounds)?;
        let (_, after_start) = self.split_at(trimmed.start).ok()?;
        if trimmed.end.approx_eq(self.input_bounds.end) {
            return Some(after_start);
        }
        let (before_end, _) = after_start.split_at(trimmed.end).ok()?;
        Some(before_end)
    }
}
