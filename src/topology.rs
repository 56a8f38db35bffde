/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

[`Topology`]: an ordered, input-adjacent sequence of [`Mapping`]s covering
one input interval. Topologies are plain values -- built, composed,
cloned, or inverted to produce new values, never mutated in place once
constructed.

*/

use crate::error::{Result, TopologyError};
use crate::interval::ContinuousInterval;
use crate::mapping::Mapping;
use crate::ordinate::Ordinate;

/// An ordered sequence of [`Mapping`]s, each adjacent to the next in input
/// space: for `i > 0`, `mappings[i].input_bounds().start ==
/// mappings[i-1].input_bounds().end`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    mappings: Vec<Mapping>,
}

impl Topology {
    /// Builds a topology from an already input-adjacent sequence of
    /// mappings. `debug_assert`s the adjacency invariant in development
    /// builds; callers that assemble mappings out of order should sort by
    /// `input_bounds().start` first.
    pub fn new(mappings: Vec<Mapping>) -> Self {
        #[cfg(debug_assertions)]
        for w in mappings.windows(2) {
            debug_assert!(
                w[0].input_bounds().end.approx_eq(w[1].input_bounds().start),
                "Topology::new requires input-adjacent mappings"
            );
        }
        Topology { mappings }
    }

    /// A topology with a single mapping.
    pub fn single(mapping: Mapping) -> Self {
        Topology {
            mappings: vec![mapping],
        }
    }

    /// The identity topology over all ordinates, constructed lazily since
    /// `Ordinate` carries no `const`-friendly infinity of its own.
    pub fn init_identity_infinite() -> Self {
        let bounds = ContinuousInterval::new(
            Ordinate::from_f64(f64::NEG_INFINITY),
            Ordinate::from_f64(f64::INFINITY),
        );
        Topology::single(Mapping::Affine(crate::mapping::Affine::identity(bounds)))
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn is_identity_infinite(&self) -> bool {
        self.mappings.len() == 1
            && matches!(&self.mappings[0], Mapping::Affine(a)
                if a.scale.approx_eq(Ordinate::ONE)
                    && a.offset.approx_eq(Ordinate::ZERO)
                    && !a.input_bounds.start.is_finite()
                    && !a.input_bounds.end.is_finite())
    }

    pub fn input_bounds(&self) -> ContinuousInterval {
        let first = self.mappings.first().map(|m| m.input_bounds());
        let last = self.mappings.last().map(|m| m.input_bounds());
        match (first, last) {
            (Some(f), Some(l)) => ContinuousInterval::new(f.start, l.end),
            _ => ContinuousInterval::new(Ordinate::ZERO, Ordinate::ZERO),
        }
    }

    pub fn output_bounds(&self) -> ContinuousInterval {
        self.mappings
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| m.output_bounds())
            .reduce(|a, b| a.union_bounding(&b))
            .unwrap_or_else(|| ContinuousInterval::new(Ordinate::ZERO, Ordinate::ZERO))
    }

    pub fn project_instantaneous_cc(&self, t: Ordinate) -> Result<Ordinate> {
        for m in &self.mappings {
            if m.input_bounds().contains(t) {
                return m.project_instantaneous_cc(t);
            }
        }
        Err(TopologyError::OutOfBounds)
    }

    /// Restrict every mapping's input domain to `bounds`, dropping mappings
    /// that become entirely empty.
    pub fn trim(&self, bounds: ContinuousInterval) -> Topology {
        let mappings = self
            .mappings
            .iter()
            .filter_map(|m| {
                let trimmed = m.trim(bounds);
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            })
            .collect();
        Topology { mappings }
    }

    /// Inverts this topology. Because a non-monotonic topology can fold
    /// back over itself, inversion naturally produces *one topology per
    /// monotonic branch*. Each returned branch is itself input-adjacent and
    /// covers a disjoint slice of the original output space.
    pub fn inverted(&self) -> Result<Vec<Topology>> {
        let mut branches: Vec<Vec<Mapping>> = Vec::new();
        for m in &self.mappings {
            if m.is_empty() {
                continue;
            }
            let inv = m.inverted()?;
            // A branch is continued from the previous mapping only if the
            // new inverse's input bounds are adjacent to the running
            // branch's output bounds, i.e. the forward mapping did not
            // reverse direction between them.
            if let Some(last_branch) = branches.last_mut() {
                let tail = last_branch.last().unwrap().input_bounds();
                if tail.end.approx_eq(inv.input_bounds().start) {
                    last_branch.push(inv);
                    continue;
                }
            }
            branches.push(vec![inv]);
        }
        if branches.is_empty() {
            return Err(TopologyError::NoInvertedTopologies);
        }
        Ok(branches.into_iter().map(Topology::new).collect())
    }

    /// Inverts this topology, requiring exactly one branch. This is the
    /// entry point [`crate::projection::build_projection_operator`] uses;
    /// callers needing every branch should call [`Topology::inverted`]
    /// directly.
    pub fn inverted_single(&self) -> Result<Topology> {
        let mut branches = self.inverted()?;
        if branches.len() != 1 {
            return Err(TopologyError::MoreThanOneCurveIsNotImplemented);
        }
        Ok(branches.remove(0))
    }

    /// Composes `a2b` (`self`) with `b2c` (`next`) into `a2c`. Walks
    /// `self.output_bounds()` against `next.input_bounds()`: for each pair
    /// of overlapping mappings, the shared intermediate-space slice is
    /// intersected and the two mappings are composed over it. Gaps in
    /// coverage (either topology has no mapping over some slice of the
    /// shared intermediate space) become [`Mapping::Empty`]; the result is
    /// input-adjacent by construction because the a-space breakpoints are
    /// walked in order.
    pub fn join(a2b: &Topology, b2c: &Topology) -> Topology {
        log::debug!(
            "joining topologies ({} mapping(s) -> {} mapping(s))",
            a2b.mappings.len(),
            b2c.mappings.len()
        );
        if a2b.is_identity_infinite() {
            return b2c.clone();
        }
        if b2c.is_identity_infinite() {
            return a2b.clone();
        }
        let mut result = Vec::new();
        for m_ab in &a2b.mappings {
            if m_ab.is_empty() {
                result.push(Mapping::Empty(m_ab.input_bounds()));
                continue;
            }
            let b_bounds = m_ab.output_bounds();
            let mut covered_any = false;
            for m_bc in &b_bounds_overlapping(b2c, b_bounds) {
                let shared = match m_ab.output_bounds().intersect(&m_bc.input_bounds()) {
                    Some(s) => s,
                    None => continue,
                };
                if shared.is_degenerate() && !b_bounds.is_degenerate() {
                    continue;
                }
                // Restrict m_ab to the a-space slice whose image lands in
                // `shared`, then compose.
                let a_slice = restrict_domain_to_image(m_ab, shared);
                result.push(a_slice.compose(m_bc));
                covered_any = true;
            }
            if !covered_any {
                result.push(Mapping::Empty(m_ab.input_bounds()));
            }
        }
        log::trace!("join produced {} mapping(s)", result.len());
        merge_adjacent_empties(Topology::new(result))
    }

    /// Split this topology at ordinate `at`, returning the topology before
    /// and after the split point.
    pub fn split_at(&self, at: Ordinate) -> (Topology, Topology) {
        let mut before = Vec::new();
        let mut after = Vec::new();
        for m in &self.mappings {
            let bounds = m.input_bounds();
            if bounds.end.le(at) {
                before.push(m.clone());
            } else if bounds.start.ge(at) {
                after.push(m.clone());
            } else {
                match m.split_at(at) {
                    Ok((b, a)) => {
                        before.push(b);
                        after.push(a);
                    }
                    Err(_) => before.push(m.clone()),
                }
            }
        }
        (Topology::new(before), Topology::new(after))
    }
}

/// Mappings of `topo` whose output bounds overlap `slice`.
fn b_bounds_overlapping(topo: &Topology, slice: ContinuousInterval) -> Vec<Mapping> {
    topo.mappings
        .iter()
        .filter(|m| !m.is_empty() && m.input_bounds().intersect(&slice).is_some())
        .cloned()
        .collect()
}

/// Given `mapping: a -> b`, restrict its *domain* to the a-space slice
/// whose image lies in `b_slice`. For affine/linear mappings this inverts
/// to find the domain slice directly; for Bezier it falls back to trimming
/// the domain to the mapping's own bounds intersected with the preimage of
/// `b_slice` under a monotonic assumption (the preimage is computed via the
/// same bisection the mapping itself already uses for evaluation).
fn restrict_domain_to_image(mapping: &Mapping, b_slice: ContinuousInterval) -> Mapping {
    match mapping.inverted() {
        Ok(inv) => {
            let domain_slice = inv.trim(b_slice);
            if domain_slice.is_empty() {
                return Mapping::Empty(mapping.input_bounds());
            }
            match domain_slice.inverted() {
                Ok(back) => back,
                Err(_) => mapping.clone(),
            }
        }
        Err(_) => mapping.clone(),
    }
}

/// Collapses runs of adjacent [`Mapping::Empty`] into one, keeping the
/// result tidy without changing its semantics (an Empty mapping projects
/// nothing regardless of how many adjacent Empties it absorbs).
fn merge_adjacent_empties(topo: Topology) -> Topology {
    let mut out: Vec<Mapping> = Vec::with_capacity(topo.mappings.len());
    for m in topo.mappings {
        if let (Mapping::Empty(_), Some(Mapping::Empty(prev_bounds))) =
            (&m, out.last().cloned())
        {
            let merged = prev_bounds.union_bounding(&m.input_bounds());
            out.pop();
            out.push(Mapping::Empty(merged));
            continue;
        }
        out.push(m);
    }
    Topology { mappings: out }
}
