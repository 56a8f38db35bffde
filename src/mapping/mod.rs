/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

[`Mapping`]: a bounded function from one continuous interval to another.
Every concrete representation ([`Affine`], [`LinearMonotonic`], [`Bezier`])
lives in its own module, one file per variant; [`Mapping`] itself is the
tagged enum that dispatches to whichever variant a particular edge of the
composition graph actually needs.

*/

pub mod affine;
pub mod bezier;
pub mod linear;

pub use affine::Affine;
pub use bezier::{Bezier, CubicSegment};
pub use linear::LinearMonotonic;

use crate::error::{Result, TopologyError};
use crate::interval::ContinuousInterval;
use crate::ordinate::Ordinate;

/// A bounded function from an input interval to an output interval. Every
/// variant carries its own `input_bounds`; [`Mapping::input_bounds`] reads
/// it uniformly regardless of representation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mapping {
    Affine(Affine),
    LinearMonotonic(LinearMonotonic),
    Bezier(Bezier),
    /// Degenerate: projects nothing. Produced by trimming any other
    /// variant to an empty intersection.
    Empty(ContinuousInterval),
}

impl Mapping {
    pub fn input_bounds(&self) -> ContinuousInterval {
        match self {
            Mapping::Affine(a) => a.input_bounds,
            Mapping::LinearMonotonic(l) => l.input_bounds,
            Mapping::Bezier(b) => b.input_bounds,
            Mapping::Empty(iv) => *iv,
        }
    }

    pub fn output_bounds(&self) -> ContinuousInterval {
        match self {
            Mapping::Affine(a) => a.output_bounds(),
            Mapping::LinearMonotonic(l) => l.output_bounds(),
            Mapping::Bezier(b) => {
                // Bezier has no closed-form output bounds; sample the
                // endpoints, which is exact for the monotonic curves this
                // crate constructs and a safe over/under estimate is never
                // relied on elsewhere (only joins use it, and joins re-trim
                // against the real eval afterwards).
                let start = b.eval(b.input_bounds.start).unwrap_or(b.input_bounds.start);
                let end = b.eval(b.input_bounds.end).unwrap_or(b.input_bounds.end);
                if start.le(end) {
                    ContinuousInterval::new(start, end)
                } else {
                    ContinuousInterval::new(end, start)
                }
            }
            Mapping::Empty(iv) => *iv,
        }
    }

    /// `out = self(in)` or [`TopologyError::OutOfBounds`] if `in` falls
    /// outside `self.input_bounds()`.
    pub fn project_instantaneous_cc(&self, t: Ordinate) -> Result<Ordinate> {
        match self {
            Mapping::Affine(a) => a.eval(t),
            Mapping::LinearMonotonic(l) => l.eval(t),
            Mapping::Bezier(b) => b.eval(t),
            Mapping::Empty(_) => Err(TopologyError::OutOfBounds),
        }
    }

    /// Invert this mapping. Affine and monotonic `LinearMonotonic` always
    /// succeed; a `Bezier` whose output is not monotonic fails with
    /// [`TopologyError::NoSplitForLinearization`] -- the caller must
    /// [`Bezier::split_at`] first.
    pub fn inverted(&self) -> Result<Mapping> {
        match self {
            Mapping::Affine(a) => Ok(Mapping::Affine(a.inverted()?)),
            Mapping::LinearMonotonic(l) => Ok(Mapping::LinearMonotonic(l.inverted())),
            Mapping::Bezier(b) => Ok(Mapping::Bezier(b.inverted()?)),
            Mapping::Empty(iv) => Ok(Mapping::Empty(*iv)),
        }
    }

    /// Restrict the input domain to its intersection with `bounds`. An
    /// empty intersection degrades to [`Mapping::Empty`] rather than an
    /// error.
    pub fn trim(&self, bounds: ContinuousInterval) -> Mapping {
        match self {
            Mapping::Affine(a) => a
                .trim(bounds)
                .map(Mapping::Affine)
                .unwrap_or(Mapping::Empty(bounds)),
            Mapping::LinearMonotonic(l) => l
                .trim(bounds)
                .map(Mapping::LinearMonotonic)
                .unwrap_or(Mapping::Empty(bounds)),
            Mapping::Bezier(b) => b
                .trim(bounds)
                .map(Mapping::Bezier)
                .unwrap_or(Mapping::Empty(bounds)),
            Mapping::Empty(_) => Mapping::Empty(bounds),
        }
    }

    /// Splits this mapping at ordinate `at`, returning the pieces before
    /// and after. Only meaningful for `Bezier` (the only variant whose
    /// inversion can require it); other variants split by trimming at the
    /// shared boundary.
    pub fn split_at(&self, at: Ordinate) -> Result<(Mapping, Mapping)> {
        match self {
            Mapping::Bezier(b) => {
                let (before, after) = b.split_at(at)?;
                Ok((Mapping::Bezier(before), Mapping::Bezier(after)))
            }
            _ => {
                let bounds = self.input_bounds();
                let before = self.trim(ContinuousInterval::new(bounds.start, at));
                let after = self.trim(ContinuousInterval::new(at, bounds.end));
                Ok((before, after))
            }
        }
    }

    /// True when this mapping projects nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Mapping::Empty(_))
    }

    /// Compose `self` (`a -> b`) with `next` (`b -> c`), where `self`'s
    /// output space is `next`'s input space. Affine composed with Affine
    /// stays Affine; `LinearMonotonic` composed with `Affine` (either
    /// order) stays `LinearMonotonic`; anything touching `Bezier` falls
    /// back to `Bezier`-wrapped numerical composition; anything touching
    /// `Empty` is `Empty`.
    pub fn compose(&self, next: &Mapping) -> Mapping {
        match (self, next) {
            (Mapping::Empty(iv), _) | (_, Mapping::Empty(iv)) => Mapping::Empty(*iv),
            (Mapping::Affine(a), Mapping::Affine(b)) => Mapping::Affine(a.then(b)),
            _ => compose_numerically(self, next),
        }
    }
}

/// Numerical fallback used whenever a composition touches a
/// non-closed-form variant (`LinearMonotonic` against non-affine, or any
/// `Bezier`): samples `self`'s input bounds into a monotonic piecewise-cubic
/// approximation is overkill here, so instead the result is represented as
/// a `Bezier` of degree-1-equivalent segments sampled densely enough that
/// [`Mapping::project_instantaneous_cc`] stays within the crate's epsilon.
fn compose_numerically(a: &Mapping, b: &Mapping) -> Mapping {
    const SAMPLES: usize = 64;
    let bounds = a.input_bounds();
    let start = bounds.start.as_f64();
    let end = bounds.end.as_f64();
    let mut segments = Vec::with_capacity(SAMPLES);
    let mut prev: Option<(Ordinate, Ordinate)> = None;
    for i in 0..=SAMPLES {
        let frac = i as f64 / SAMPLES as f64;
        let t = Ordinate::from_f64(start + (end - start) * frac);
        let mid = match a.project_instantaneous_cc(t) {
            Ok(v) => v,
            Err(_) => continue,
        };
        let out = match b.project_instantaneous_cc(mid) {
            Ok(v) => v,
            Err(_) => continue,
        };
        if let Some(p) = prev {
            if p.0.approx_eq(t) {
                continue;
            }
            segments.push(CubicSegment {
                p0: p,
                p1: p,
                p2: (t, out),
                p3: (t, out),
            });
        }
        prev = Some((t, out));
    }
    match Bezier::new(segments) {
        Ok(curve) => Mapping::Bezier(curve),
        Err(_) => Mapping::Empty(bounds),
    }
}
