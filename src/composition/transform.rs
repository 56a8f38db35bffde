/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

`build_transform`: given a single-bit hop of the
[`crate::topological_map::TopologicalMap`]'s walking iterator -- one
[`SpaceReference`] and the next -- produce the [`Topology`] that maps
coordinates across that one hop. This is the per-edge rule table
`build_projection_operator` folds together with [`crate::
topology::Topology::join`] to build a full source-to-destination topology.

*/

use super::entities::{CompositionNode, SpaceLabel, SpaceReference};
use super::Composition;
use crate::error::{Result, TopologyError};
use crate::mapping::{Affine, Mapping};
use crate::ordinate::Ordinate;
use crate::topology::Topology;

/// Builds the topology mapping `current`'s space to `next`'s space, where
/// `next` is one single treecode bit away from `current` in the
/// composition graph.
pub fn build_transform(
    composition: &Composition,
    current: SpaceReference,
    next: SpaceReference,
) -> Result<Topology> {
    // Cross-object hop: this is always the "descend into the child" edge
    // (a child-slot space handing off to the child's own presentation
    // space), which is always an infinite identity -- the child's own
    // internal topology is applied *inside* the child, not on the way in.
    if current.object != next.object {
        return match (current.label, next.label) {
            (SpaceLabel::Child, SpaceLabel::Presentation) => Ok(Topology::init_identity_infinite()),
            _ => Err(TopologyError::UnsupportedSpace),
        };
    }

    let node = composition.get(current.object)?;
    match (current.label, next.label, next.child_index) {
        // Track/Stack/Timeline: presentation and intrinsic are the same
        // coordinate system; children are what differ between them.
        (SpaceLabel::Presentation, SpaceLabel::Intrinsic, _) => match node {
            CompositionNode::Track(_) | CompositionNode::Stack(_) | CompositionNode::Timeline(_) => {
                Ok(Topology::init_identity_infinite())
            }
            _ => Err(TopologyError::UnsupportedSpace),
        },

        // Clip.presentation -> Clip.media: shift by the media's own start.
        (SpaceLabel::Presentation, SpaceLabel::Media, _) => match node {
            CompositionNode::Clip(c) => {
                let bounds = crate::interval::ContinuousInterval::new(
                    Ordinate::ZERO,
                    c.media.bounds_s.duration(),
                );
                Ok(Topology::single(Mapping::Affine(Affine {
                    input_bounds: bounds,
                    scale: Ordinate::ONE,
                    offset: c.media.bounds_s.start,
                })))
            }
            _ => Err(TopologyError::UnsupportedSpace),
        },

        // The child-slot edge: from the object's own intrinsic/presentation
        // space into child i's addressable slot. This is always expressed
        // as an absolute offset from that anchor space, never relative to
        // some other sibling's slot -- `build_projection_operator` is
        // responsible for always calling this with that anchor as
        // `current`, collapsing any sibling-to-sibling spine hops the walk
        // passes through on the way to child i.
        (_, SpaceLabel::Child, Some(index)) => match node {
            CompositionNode::Track(_) => {
                let child_bounds = composition.child_bounds_in_parent(current.object, index)?;
                Ok(Topology::single(Mapping::Affine(Affine {
                    input_bounds: child_bounds,
                    scale: Ordinate::ONE,
                    offset: -child_bounds.start,
                })))
            }
            CompositionNode::Stack(_) | CompositionNode::Timeline(_) | CompositionNode::Transition(_) => {
                Ok(Topology::init_identity_infinite())
            }
            // A Warp's single child carries the Warp's own transform: the
            // slot edge is where it lives, the subsequent descend edge
            // (handled above, cross-object) is identity, so composing the
            // two reproduces exactly "Warp.presentation -> Warp.child.
            // presentation: the Warp's own transform".
            CompositionNode::Warp(w) => {
                debug_assert_eq!(index, 0, "Warp has exactly one child");
                Ok(w.transform.clone())
            }
            _ => Err(TopologyError::UnsupportedSpace),
        },

        _ => Err(TopologyError::UnsupportedSpace),
    }
}
