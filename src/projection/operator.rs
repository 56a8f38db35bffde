/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

[`ProjectionOperator`]: a reified `(source, destination, topology)` triple
plus [`build_projection_operator`], the algorithm that
walks a [`TopologicalMap`] and composes per-edge topologies into one.

*/

use crate::composition::entities::SpaceReference;
use crate::composition::{build_transform, Composition};
use crate::error::{Result, TopologyError};
use crate::interval::ContinuousInterval;
use crate::mapping::{Affine, Mapping};
use crate::ordinate::Ordinate;
use crate::sample_index::SampleIndexGenerator;
use crate::topological_map::TopologicalMap;
use crate::topology::Topology;
use crate::treecode::Treecode;
use crate::visit::TreenodeWalkingIterator;

/// The non-error outcome of an instantaneous projection: either the unique
/// image ordinate, or (for a held/degenerate span) the full input
/// interval the instant maps back to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Instant(Ordinate),
    Interval(ContinuousInterval),
}

/// `{ source, destination, src_to_dst_topo }`. An immutable value;
/// cloning is cheap relative to rebuilding (the `Topology` it wraps is
/// typically a handful of mappings).
#[derive(Debug, Clone)]
pub struct ProjectionOperator {
    pub source: SpaceReference,
    pub destination: SpaceReference,
    src_to_dst_topo: Topology,
    /// Set only for the held-frame-warp edge case (a zero-length child
    /// span): when the *forward* (ancestor-to-descendant)
    /// topology collapses its whole domain to a single output ordinate,
    /// inverting it to build this (descendant-to-ancestor) operator has
    /// no single-valued answer. Rather than fail, the operator records the
    /// held domain here and [`ProjectionOperator::project_instantaneous_cc`]
    /// returns [`Projection::Interval`] for any instant landing on that
    /// single output point.
    held_interval: Option<ContinuousInterval>,
}

impl ProjectionOperator {
    pub fn topology(&self) -> &Topology {
        &self.src_to_dst_topo
    }

    /// Projects a single ordinate from this operator's source space into
    /// its destination space.
    pub fn project_instantaneous_cc(&self, t: Ordinate) -> Result<Projection> {
        if let Some(held) = self.held_interval {
            // `src_to_dst_topo` here is still the forward (ancestor ->
            // descendant) topology -- see the comment on `held_interval`.
            // The caller's `t` lives in *this operator's* source space,
            // which for a held operator is the descendant, i.e. the
            // forward topology's *output* space, not its input space.
            let domain = self.src_to_dst_topo.output_bounds();
            let matches = if domain.is_degenerate() {
                t.approx_eq(domain.start)
            } else {
                domain.contains(t)
            };
            return if matches {
                Ok(Projection::Interval(held))
            } else {
                Err(TopologyError::OutOfBounds)
            };
        }
        self.src_to_dst_topo.project_instantaneous_cc(t).map(Projection::Instant)
    }

    /// As [`Self::project_instantaneous_cc`] but through a
    /// for the destination space, supplied by the
    /// caller (this crate has no implicit lookup from `SpaceReference` to
    /// generator -- that association lives in the composition schema).
    pub fn project_instantaneous_cd(
        &self,
        t: Ordinate,
        destination_generator: &SampleIndexGenerator,
    ) -> Result<i64> {
        match self.project_instantaneous_cc(t)? {
            Projection::Instant(v) => Ok(destination_generator.ordinate_to_index(v)),
            Projection::Interval(iv) => Ok(destination_generator.ordinate_to_index(iv.start)),
        }
    }

    /// Composes an upstream
    /// `a -> source` topology with this operator's own `source ->
    /// destination` topology.
    pub fn project_topology_cc(&self, a_to_src: &Topology) -> Topology {
        Topology::join(a_to_src, &self.src_to_dst_topo)
    }

    /// As [`Self::project_topology_cc`]
    /// but discretized into destination sample indices via the same
    /// stepping rule as [`Self::project_range_cd`].
    pub fn project_topology_cd(
        &self,
        a_to_src: &Topology,
        destination_generator: &SampleIndexGenerator,
    ) -> Vec<i64> {
        let a_to_dst = self.project_topology_cc(a_to_src);
        discretize(&a_to_dst, a_to_dst.input_bounds(), destination_generator)
    }

    /// Projects a continuous source range into a topology over `[0,
    /// range.duration)` mapping into the destination.
    pub fn project_range_cc(&self, range: ContinuousInterval) -> Result<Topology> {
        if self.src_to_dst_topo.input_bounds().intersect(&range).is_none() {
            return Err(TopologyError::OutOfBounds);
        }
        let trimmed = self.src_to_dst_topo.trim(range);
        let shift = Topology::single(Mapping::Affine(Affine {
            input_bounds: ContinuousInterval::new(Ordinate::ZERO, range.duration()),
            scale: Ordinate::ONE,
            offset: range.start,
        }));
        Ok(Topology::join(&shift, &trimmed))
    }

    /// The discrete walking rule --
    /// step across `range` at `1 / destination_generator.sample_rate_hz`,
    /// project each step, convert to an index. Direction follows the sign
    /// of `range` itself (taken from the *source* space, never the
    /// output.
    pub fn project_range_cd(
        &self,
        range: ContinuousInterval,
        destination_generator: &SampleIndexGenerator,
    ) -> Result<Vec<i64>> {
        if self.src_to_dst_topo.input_bounds().intersect(&range).is_none() {
            return Err(TopologyError::OutOfBounds);
        }
        Ok(discretize(&self.src_to_dst_topo, range, destination_generator))
    }

    /// Projects the continuous interval of
    /// source sample index `k`, projected as a topology into destination.
    pub fn project_index_dc(&self, k: i64, source_generator: &SampleIndexGenerator) -> Result<Topology> {
        self.project_range_cc(source_generator.index_to_interval(k))
    }

    /// Destination sample indices
    /// overlapping source sample index `k`.
    pub fn project_index_dd(
        &self,
        k: i64,
        source_generator: &SampleIndexGenerator,
        destination_generator: &SampleIndexGenerator,
    ) -> Result<Vec<i64>> {
        self.project_range_cd(source_generator.index_to_interval(k), destination_generator)
    }
}

/// Shared discrete-walking core for [`ProjectionOperator::project_range_cd`]
/// and [`ProjectionOperator::project_topology_cd`].
fn discretize(
    topo: &Topology,
    range: ContinuousInterval,
    destination_generator: &SampleIndexGenerator,
) -> Vec<i64> {
    let step = 1.0 / destination_generator.sample_rate_hz;
    let (start, end) = (range.start.as_f64(), range.end.as_f64());
    let ascending = end >= start;
    let mut indices = Vec::new();
    let mut t = start;
    if ascending {
        while t < end {
            if let Ok(v) = topo.project_instantaneous_cc(Ordinate::from_f64(t)) {
                indices.push(destination_generator.ordinate_to_index(v));
            }
            t += step;
        }
    } else {
        while t > end {
            if let Ok(v) = topo.project_instantaneous_cc(Ordinate::from_f64(t)) {
                indices.push(destination_generator.ordinate_to_index(v));
            }
            t -= step;
        }
    }
    indices
}

/// Walks `map`'s shared path between `source` and `destination`, composing
/// a [`Topology`] per edge via [`build_transform`] and wraps the result.
/// Sibling child-slot spaces the walk passes through on the way to a
/// target child (child 0, 1, 2, ... on the same object) are collapsed into
/// a single hop from the object's own intrinsic/presentation space, since
/// each sibling's own slot domain is disjoint from its neighbors'.
pub fn build_projection_operator(
    map: &TopologicalMap,
    composition: &Composition,
    source: SpaceReference,
    destination: SpaceReference,
) -> Result<ProjectionOperator> {
    log::debug!("build_projection_operator {:?} -> {:?}", source, destination);

    if source == destination {
        let bounds = space_bounds(composition, source)?;
        return Ok(ProjectionOperator {
            source,
            destination,
            src_to_dst_topo: Topology::single(Mapping::Affine(Affine::identity(bounds))),
            held_interval: None,
        });
    }

    let source_code = map.code_of(source).map_err(|_| TopologyError::SourceNotInMap)?.clone();
    let destination_code = map
        .code_of(destination)
        .map_err(|_| TopologyError::DestinationNotInMap)?
        .clone();

    if !Treecode::path_exists(&source_code, &destination_code) {
        return Err(TopologyError::NoPathBetweenSpaces);
    }

    let inverted = source_code.length() > destination_code.length();
    let (walk_start, walk_end) = if inverted {
        (destination, source)
    } else {
        (source, destination)
    };

    let path: Vec<SpaceReference> = TreenodeWalkingIterator::new(map, walk_start, Some(walk_end))?
        .map(|(_, space)| space)
        .collect();

    let mut root_to_current = Topology::init_identity_infinite();
    let mut i = 0;
    while i + 1 < path.len() {
        let anchor = path[i];
        // A run of sibling child-slot spaces on the same object (the
        // treecode spine visits child 0, 1, 2, ... one bit at a time) is
        // not itself a coordinate change -- only the anchor (the object's
        // own intrinsic/presentation space) to the run's final slot is.
        // Collapse the whole run into that one hop instead of chaining
        // through each sibling's own (disjoint) slot domain.
        let mut j = i + 1;
        while j + 1 < path.len()
            && path[j].object == anchor.object
            && path[j].child_index.is_some()
            && path[j + 1].object == anchor.object
            && path[j + 1].child_index.is_some()
        {
            j += 1;
        }
        let hop = build_transform(composition, anchor, path[j])?;
        root_to_current = Topology::join(&root_to_current, &hop);
        i = j;
    }

    if !inverted {
        return Ok(ProjectionOperator {
            source,
            destination,
            src_to_dst_topo: root_to_current,
            held_interval: None,
        });
    }

    // `root_to_current` maps walk_start (the ancestor, == destination) to
    // walk_end (the descendant, == source); this operator needs the
    // reverse. A degenerate (zero-duration) output means the forward
    // mapping is a held span with no single-valued inverse -- see
    // `held_interval` above.
    if root_to_current.output_bounds().is_degenerate() {
        return Ok(ProjectionOperator {
            source,
            destination,
            held_interval: Some(root_to_current.input_bounds()),
            src_to_dst_topo: root_to_current,
        });
    }

    let inverted_topo = root_to_current.inverted_single()?;
    Ok(ProjectionOperator {
        source,
        destination,
        src_to_dst_topo: inverted_topo,
        held_interval: None,
    })
}

/// The bounds of a space reference, including `Child` labels (which
/// `Composition::bounds_of` alone doesn't resolve, since that needs the
/// parent's child-index arithmetic).
fn space_bounds(composition: &Composition, space: SpaceReference) -> Result<ContinuousInterval> {
    match space.child_index {
        Some(i) => composition.child_bounds_in_parent(space.object, i),
        None => composition.bounds_of(space.object, space.label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::entities::{Clip, CompositionNode, Gap, MediaReference, SpaceLabel, Track};
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
    fn single_clip_forward_projection() {
        let mut comp = Composition::new();
        let clip = comp.insert(clip_node(1.0, 10.0));
        let map = build_topological_map(&comp, clip).unwrap();
        let op = build_projection_operator(
            &map,
            &comp,
            SpaceReference::new(clip, SpaceLabel::Presentation),
            SpaceReference::new(clip, SpaceLabel::Media),
        )
        .unwrap();
        let got = op.project_instantaneous_cc(Ordinate::from_f64(3.0)).unwrap();
        assert_eq!(got, Projection::Instant(Ordinate::from_f64(4.0)));

        let err = op.project_instantaneous_cc(Ordinate::from_f64(-1.0));
        assert_eq!(err, Err(TopologyError::OutOfBounds));
    }

    #[test]
    fn track_with_one_clip_identity_path() {
        let mut comp = Composition::new();
        let clip = comp.insert(clip_node(1.0, 10.0));
        let track = comp.insert(CompositionNode::Track(Track {
            name: None,
            children: vec![clip],
        }));
        let map = build_topological_map(&comp, track).unwrap();
        let op = build_projection_operator(
            &map,
            &comp,
            SpaceReference::new(track, SpaceLabel::Presentation),
            SpaceReference::new(clip, SpaceLabel::Media),
        )
        .unwrap();
        let got = op.project_instantaneous_cc(Ordinate::from_f64(3.0)).unwrap();
        assert_eq!(got, Projection::Instant(Ordinate::from_f64(4.0)));
    }

    #[test]
    fn track_with_multiple_identical_clips() {
        let mut comp = Composition::new();
        let c0 = comp.insert(clip_node(0.0, 2.0));
        let c1 = comp.insert(clip_node(0.0, 2.0));
        let c2 = comp.insert(clip_node(0.0, 2.0));
        let track = comp.insert(CompositionNode::Track(Track {
            name: None,
            children: vec![c0, c1, c2],
        }));
        let map = build_topological_map(&comp, track).unwrap();
        let op = build_projection_operator(
            &map,
            &comp,
            SpaceReference::new(track, SpaceLabel::Presentation),
            SpaceReference::new(c1, SpaceLabel::Media),
        )
        .unwrap();
        let got = op.project_instantaneous_cc(Ordinate::from_f64(3.0)).unwrap();
        assert_eq!(got, Projection::Instant(Ordinate::from_f64(1.0)));
        assert_eq!(
            op.project_instantaneous_cc(Ordinate::from_f64(7.0)),
            Err(TopologyError::OutOfBounds)
        );
    }

    #[test]
    fn gap_in_track_has_no_media_operator_but_keeps_siblings_reachable() {
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
        let op = build_projection_operator(
            &map,
            &comp,
            SpaceReference::new(track, SpaceLabel::Presentation),
            SpaceReference::new(c2, SpaceLabel::Media),
        )
        .unwrap();
        // c1 occupies [0,9), gap [9,14), c2 [14,23) in track space.
        let got = op.project_instantaneous_cc(Ordinate::from_f64(15.0)).unwrap();
        assert_eq!(got, Projection::Instant(Ordinate::from_f64(2.0)));
    }
}
