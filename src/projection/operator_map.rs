/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

[`ProjectionOperatorMap`]: an ordered partition over a source space whose
segments each carry zero or more [`ProjectionOperator`]s. Used by
[`projection_map_to_media_from`] to answer "what does every piece of media
under this object look like, all at once, in presentation-space
coordinates".

*/

use crate::composition::entities::{ComposedValueRef, SpaceLabel, SpaceReference};
use crate::composition::Composition;
use crate::error::Result;
use crate::ordinate::{Ordinate, EPSILON};
use crate::topological_map::TopologicalMap;
use crate::visit::TreenodeWalkingIterator;

use super::operator::{build_projection_operator, ProjectionOperator};

/// An ordered partition `end_points[0..N]` (strictly increasing) with
/// `operators[0..N-1]`, where `operators[i]` holds every operator valid
/// over `[end_points[i], end_points[i+1])`.
#[derive(Debug, Clone)]
pub struct ProjectionOperatorMap {
    end_points: Vec<Ordinate>,
    operators: Vec<Vec<ProjectionOperator>>,
}

impl ProjectionOperatorMap {
    /// A single-segment map covering exactly `op`'s own input bounds.
    pub fn init_operator(op: ProjectionOperator) -> Self {
        let bounds = op.topology().input_bounds();
        ProjectionOperatorMap {
            end_points: vec![bounds.start, bounds.end],
            operators: vec![vec![op]],
        }
    }

    pub fn end_points(&self) -> &[Ordinate] {
        &self.end_points
    }

    pub fn operators(&self) -> &[Vec<ProjectionOperator>] {
        &self.operators
    }

    fn empty_over(range: (Ordinate, Ordinate)) -> Self {
        ProjectionOperatorMap {
            end_points: vec![range.0, range.1],
            operators: vec![vec![]],
        }
    }

    /// Pads the partition with empty-operator segments so it covers all of
    /// `range`, leaving any existing coverage untouched.
    pub fn extend_to(&mut self, range: (Ordinate, Ordinate)) {
        if self.end_points.is_empty() {
            *self = Self::empty_over(range);
            return;
        }
        if range.0.lt(*self.end_points.first().unwrap()) {
            self.end_points.insert(0, range.0);
            self.operators.insert(0, vec![]);
        }
        if range.1.gt(*self.end_points.last().unwrap()) {
            self.end_points.push(range.1);
            self.operators.push(vec![]);
        }
    }

    /// Inserts new segment boundaries at the union of `self`'s own
    /// endpoints and `points`, duplicating each resulting slice's operator
    /// list across the split. Points within [`EPSILON`] of an existing
    /// endpoint are treated as the same point rather than creating a
    /// sliver segment.
    pub fn split_at_each(&mut self, points: &[Ordinate]) {
        let mut all: Vec<Ordinate> = self.end_points.clone();
        for &p in points {
            if !all.iter().any(|e| e.approx_eq_abs(p, EPSILON)) {
                all.push(p);
            }
        }
        all.sort_by(|a, b| a.as_f64().partial_cmp(&b.as_f64()).unwrap());

        let mut new_operators = Vec::with_capacity(all.len().saturating_sub(1));
        for w in all.windows(2) {
            let mid = Ordinate::from_f64((w[0].as_f64() + w[1].as_f64()) * 0.5);
            let owning_segment = self
                .end_points
                .windows(2)
                .position(|seg| mid.ge(seg[0]) && mid.lt(seg[1]));
            new_operators.push(match owning_segment {
                Some(i) => self.operators[i].clone(),
                None => vec![],
            });
        }
        self.end_points = all;
        self.operators = new_operators;
    }

    /// Aligns `over` and `under` onto the union of both maps' endpoints,
    /// then concatenates each segment's operator list (`over`'s operators
    /// first, matching the "overlay" semantics of projecting media from a
    /// stack of tracks).
    pub fn merge_composite(over: &ProjectionOperatorMap, under: &ProjectionOperatorMap) -> ProjectionOperatorMap {
        log::debug!(
            "merging projection operator maps ({} over {} slot(s))",
            over.end_points.len().saturating_sub(1),
            under.end_points.len().saturating_sub(1)
        );
        let mut a = over.clone();
        let mut b = under.clone();
        let lo = a
            .end_points
            .first()
            .copied()
            .unwrap_or(Ordinate::ZERO)
            .min(b.end_points.first().copied().unwrap_or(Ordinate::ZERO));
        let hi = a
            .end_points
            .last()
            .copied()
            .unwrap_or(Ordinate::ZERO)
            .max(b.end_points.last().copied().unwrap_or(Ordinate::ZERO));
        a.extend_to((lo, hi));
        b.extend_to((lo, hi));
        a.split_at_each(&b.end_points.clone());
        b.split_at_each(&a.end_points.clone());

        debug_assert_eq!(a.end_points.len(), b.end_points.len());
        let operators = a
            .operators
            .into_iter()
            .zip(b.operators)
            .map(|(mut over_ops, mut under_ops)| {
                over_ops.append(&mut under_ops);
                over_ops
            })
            .collect();
        ProjectionOperatorMap {
            end_points: a.end_points,
            operators,
        }
    }
}

/// Walks every node
/// reachable from `source`, builds a [`ProjectionOperator`] for each
/// `media` space it finds, and overlays them all via
/// [`ProjectionOperatorMap::merge_composite`].
pub fn projection_map_to_media_from(
    map: &TopologicalMap,
    composition: &Composition,
    source: SpaceReference,
) -> Result<ProjectionOperatorMap> {
    log::debug!("projection_map_to_media_from {:?}", source);
    let mut media_spaces: Vec<(ComposedValueRef, SpaceReference)> = Vec::new();
    for (_, space) in TreenodeWalkingIterator::new(map, source, None)? {
        if space.label == SpaceLabel::Media {
            media_spaces.push((space.object, space));
        }
    }

    let mut acc: Option<ProjectionOperatorMap> = None;
    for (_, space) in media_spaces {
        let op = build_projection_operator(map, composition, source, space)?;
        let single = ProjectionOperatorMap::init_operator(op);
        acc = Some(match acc {
            Some(existing) => ProjectionOperatorMap::merge_composite(&existing, &single),
            None => single,
        });
    }

    Ok(acc.unwrap_or_else(|| ProjectionOperatorMap {
        end_points: vec![],
        operators: vec![],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::entities::{Clip, CompositionNode, Gap, MediaReference, Track};
    use crate::interval::ContinuousInterval;
    use crate::topological_map::build_topological_map;

    fn clip_node(start: f64, end: f64) -> CompositionNode {
        CompositionNode::Clip(Clip {
            name: None,
            bounds_s: None,
            media: MediaReference::new(ContinuousInterval::new(
                Ordinate::from_f64(start),
                Ordinate::from_f64(end),
            )),
        })
    }

    #[test]
    fn track_with_gap_has_expected_partition() {
        let mut comp = Composition::new();
        let c1 = comp.insert(clip_node(1.0, 10.0));
        let gap = comp.insert(CompositionNode::Gap(Gap {
            name: None,
            bounds_s: ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_f64(5.0)),
        }));
        let c2 = comp.insert(clip_node(1.0, 10.0));
        let track = comp.insert(CompositionNode::Track(Track {
            name: None,
            children: vec![c1, gap, c2],
        }));
        let map = build_topological_map(&comp, track).unwrap();
        let source = SpaceReference::new(track, SpaceLabel::Presentation);
        let pm = projection_map_to_media_from(&map, &comp, source).unwrap();

        let ends: Vec<f64> = pm.end_points().iter().map(|o| o.as_f64()).collect();
        assert_eq!(ends, vec![0.0, 9.0, 14.0, 23.0]);
        let counts: Vec<usize> = pm.operators().iter().map(|v| v.len()).collect();
        assert_eq!(counts, vec![1, 0, 1]);
    }

    #[test]
    fn invariant_endpoints_one_more_than_operators() {
        let mut comp = Composition::new();
        let c1 = comp.insert(clip_node(0.0, 2.0));
        let track = comp.insert(CompositionNode::Track(Track {
            name: None,
            children: vec![c1],
        }));
        let map = build_topological_map(&comp, track).unwrap();
        let source = SpaceReference::new(track, SpaceLabel::Presentation);
        let pm = projection_map_to_media_from(&map, &comp, source).unwrap();
        assert_eq!(pm.end_points().len(), pm.operators().len() + 1);
    }
}
