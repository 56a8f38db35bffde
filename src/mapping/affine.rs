/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! `out = scale * in + offset`. Bijective whenever `scale != 0`, which every
//! affine mapping constructed by this crate's own composition-graph code
//! guarantees (trims and offsets never produce a zero-scale affine edge).

use crate::error::{Result, TopologyError};
use crate::interval::ContinuousInterval;
use crate::ordinate::Ordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine {
    pub input_bounds: ContinuousInterval,
    pub scale: Ordinate,
    pub offset: Ordinate,
}

impl Affine {
    pub fn identity(input_bounds: ContinuousInterval) -> Self {
        Affine {
            input_bounds,
            scale: Ordinate::ONE,
            offset: Ordinate::ZERO,
        }
    }

    pub fn eval(&self, t: Ordinate) -> Result<Ordinate> {
        if !self.input_bounds.contains(t) {
            return Err(TopologyError::OutOfBounds);
        }
        Ok(self.scale * t + self.offset)
    }

    pub fn output_bounds(&self) -> ContinuousInterval {
        let a = self.scale * self.input_bounds.start + self.offset;
        let b = self.scale * self.input_bounds.end + self.offset;
        if a.le(b) {
            ContinuousInterval::new(a, b)
        } else {
            ContinuousInterval::new(b, a)
        }
    }

    /// `in = (out - offset) / scale`, with the input/output bounds swapped.
    pub fn inverted(&self) -> Result<Affine> {
        if self.scale.approx_eq(Ordinate::ZERO) {
            return Err(TopologyError::NoInvertedTopologies);
        }
        Ok(Affine {
            input_bounds: self.output_bounds(),
            scale: Ordinate::ONE / self.scale,
            offset: -self.offset / self.scale,
        })
    }

    pub fn trim(&self, bounds: ContinuousInterval) -> Option<Affine> {
        self.input_bounds.intersect(&bounds).map(|b| Affine {
            input_bounds: b,
            ..*self
        })
    }

    /// Compose `self` (a -> b) with `next` (b -> c) where `self`'s output
    /// lands in `next`'s input space: `(c = next.scale*(self.scale*a +
    /// self.offset) + next.offset)`.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            input_bounds: self.input_bounds,
            scale: self.scale * next.scale,
            offset: next.scale * self.offset + next.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(a: f64, b: f64) -> ContinuousInterval {
        ContinuousInterval::new(Ordinate::from_f64(a), Ordinate::from_f64(b))
    }

    #[test]
    fn identity_is_a_no_op() {
        let m = Affine::identity(iv(0.0, 10.0));
        assert_eq!(m.eval(Ordinate::from_f64(3.0)).unwrap(), Ordinate::from_f64(3.0));
    }

    #[test]
    fn inversion_round_trips() {
        let m = Affine {
            input_bounds: iv(0.0, 10.0),
            scale: Ordinate::from_f64(2.0),
            offset: Ordinate::from_f64(1.0),
        };
        let inv = m.inverted().unwrap();
        let y = m.eval(Ordinate::from_f64(4.0)).unwrap();
        let back = inv.eval(y).unwrap();
        assert_eq!(back, Ordinate::from_f64(4.0));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let m = Affine::identity(iv(0.0, 10.0));
        assert_eq!(
            m.eval(Ordinate::from_f64(-1.0)),
            Err(TopologyError::OutOfBounds)
        );
    }
}
