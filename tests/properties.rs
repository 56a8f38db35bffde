/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Property tests for the quantified invariants this crate holds to,
//! e.g. "for all codes...", "for all source/destination pairs...".

use proptest::prelude::*;
use timeline_topology::composition::entities::{Clip, CompositionNode, MediaReference, SpaceLabel, SpaceReference, Track};
use timeline_topology::composition::Composition;
use timeline_topology::mapping::{Affine, Mapping};
use timeline_topology::ordinate::Ordinate;
use timeline_topology::projection::{build_projection_operator, Projection};
use timeline_topology::topological_map::build_topological_map;
use timeline_topology::topology::Topology;
use timeline_topology::ContinuousInterval;

fn track_of_clips(durations: &[f64]) -> (Composition, timeline_topology::composition::ComposedValueRef, Vec<timeline_topology::composition::ComposedValueRef>) {
    let mut comp = Composition::new();
    let mut clips = Vec::with_capacity(durations.len());
    for &d in durations {
        let clip = comp.insert(CompositionNode::Clip(Clip {
            name: None,
            bounds_s: None,
            media: MediaReference::new(ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_f64(d))),
        }));
        clips.push(clip);
    }
    let track = comp.insert(CompositionNode::Track(Track {
        name: None,
        children: clips.clone(),
    }));
    (comp, track, clips)
}

proptest! {
    /// Every `(space, code)` pair a `TopologicalMap` holds round-trips
    /// through both of its directions.
    #[test]
    fn topological_map_round_trips_every_entry(durations in prop::collection::vec(0.5f64..20.0, 1..8)) {
        let (comp, track, _clips) = track_of_clips(&durations);
        let map = build_topological_map(&comp, track).unwrap();
        for (space, code) in map.entries() {
            prop_assert_eq!(map.space_of(&code).unwrap(), space);
            prop_assert_eq!(map.code_of(space).unwrap(), &code);
        }
    }

    /// Forward-projecting an ordinate from a track's presentation space to
    /// one of its clips' media space, then inverting, recovers the
    /// original ordinate, for any affine-only composition where
    /// inversion is always single-branch.
    #[test]
    fn forward_then_inverse_projection_is_identity(
        durations in prop::collection::vec(0.5f64..20.0, 1..6),
        target_index in 0usize..6,
        frac in 0.0f64..1.0,
    ) {
        let (comp, track, clips) = track_of_clips(&durations);
        let idx = target_index % clips.len();
        let target = clips[idx];
        let map = build_topological_map(&comp, track).unwrap();

        let forward = build_projection_operator(
            &map,
            &comp,
            SpaceReference::new(track, SpaceLabel::Presentation),
            SpaceReference::new(target, SpaceLabel::Media),
        ).unwrap();
        let backward = build_projection_operator(
            &map,
            &comp,
            SpaceReference::new(target, SpaceLabel::Media),
            SpaceReference::new(track, SpaceLabel::Presentation),
        ).unwrap();

        let duration = durations[idx];
        let sample = (duration * 0.999 * frac).max(0.0);
        let offset: f64 = durations[..idx].iter().sum();
        let t = Ordinate::from_f64(offset + sample);

        let media = match forward.project_instantaneous_cc(t).unwrap() {
            Projection::Instant(v) => v,
            Projection::Interval(_) => unreachable!("affine-only composition never holds"),
        };
        let back = match backward.project_instantaneous_cc(media).unwrap() {
            Projection::Instant(v) => v,
            Projection::Interval(_) => unreachable!("affine-only composition never holds"),
        };
        prop_assert!((back.as_f64() - t.as_f64()).abs() < 1e-6);
    }

    /// `Topology::join(t, INFINITE_IDENTITY) == t` and the symmetric case,
    /// for any affine topology.
    #[test]
    fn join_with_infinite_identity_is_a_no_op(
        scale in 0.1f64..5.0,
        offset in -50.0f64..50.0,
        bound_end in 1.0f64..50.0,
        probe_frac in 0.0f64..1.0,
    ) {
        let bounds = ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_f64(bound_end));
        let t = Topology::single(Mapping::Affine(Affine {
            input_bounds: bounds,
            scale: Ordinate::from_f64(scale),
            offset: Ordinate::from_f64(offset),
        }));
        let ident = Topology::init_identity_infinite();
        let probe = Ordinate::from_f64(bound_end * probe_frac * 0.999);

        let joined_right = Topology::join(&t, &ident);
        let joined_left = Topology::join(&ident, &t);
        prop_assert!(
            (joined_right.project_instantaneous_cc(probe).unwrap().as_f64()
                - t.project_instantaneous_cc(probe).unwrap().as_f64())
            .abs() < 1e-9
        );
        prop_assert!(
            (joined_left.project_instantaneous_cc(probe).unwrap().as_f64()
                - t.project_instantaneous_cc(probe).unwrap().as_f64())
            .abs() < 1e-9
        );
    }

    /// A `ProjectionOperatorMap`'s partition always has exactly one more
    /// end point than it has operator slots.
    #[test]
    fn projection_operator_map_endpoints_outnumber_slots_by_one(
        durations in prop::collection::vec(0.5f64..20.0, 1..8),
    ) {
        use timeline_topology::projection::projection_map_to_media_from;
        let (comp, track, _clips) = track_of_clips(&durations);
        let map = build_topological_map(&comp, track).unwrap();
        let pm = projection_map_to_media_from(
            &map,
            &comp,
            SpaceReference::new(track, SpaceLabel::Presentation),
        ).unwrap();
        prop_assert_eq!(pm.end_points().len(), pm.operators().len() + 1);
    }
}

#[cfg(feature = "serde")]
mod serde_round_trip {
    use super::*;
    use timeline_topology::composition::entities::Timeline;
    use timeline_topology::sample_index::SampleIndexGenerator;

    #[test]
    fn timeline_round_trips_through_json() {
        let mut comp = Composition::new();
        let clip = comp.insert(CompositionNode::Clip(Clip {
            name: Some("a".to_string()),
            bounds_s: None,
            media: MediaReference::new(ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_f64(2.0))),
        }));
        let track = comp.insert(CompositionNode::Track(Track {
            name: Some("v1".to_string()),
            children: vec![clip],
        }));
        let timeline = CompositionNode::Timeline(Timeline {
            name: Some("t".to_string()),
            stack: track,
            picture_rate: Some(SampleIndexGenerator::new(24.0, 0)),
            audio_rate: None,
        });

        let json = serde_json::to_string(&timeline).unwrap();
        let back: CompositionNode = serde_json::from_str(&json).unwrap();
        assert_eq!(timeline, back);
    }
}
