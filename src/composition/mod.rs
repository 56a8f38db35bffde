/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

The composition tree this crate's topology algebra walks: [`Composition`]
is a `slotmap`-backed arena owning every [`CompositionNode`], addressed by
the non-owning [`ComposedValueRef`] handle. [`Composition`] is also where
the per-variant rules for enumerating internal spaces in a fixed order and
for building per-edge transforms live, since both need to walk children
that only the arena can resolve.

*/

pub mod entities;
mod transform;

pub use entities::{
    Clip, CompositionNode, ComposedValueRef, DataReference, Gap, Interpolating, MediaDomain,
    MediaReference, SpaceLabel, SpaceReference, Stack, Timeline, Topological, Track, Transition,
    Warp,
};
pub use transform::build_transform;

use crate::error::{Result, TopologyError};
use crate::interval::ContinuousInterval;
use crate::ordinate::Ordinate;
use crate::topology::Topology;
use slotmap::SlotMap;

/// The owning arena for a composition tree. Every [`ComposedValueRef`]
/// handed out by [`Composition::insert`] stays valid for the arena's
/// lifetime; there is no deletion API.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    arena: SlotMap<ComposedValueRef, CompositionNode>,
}

impl Composition {
    pub fn new() -> Self {
        Composition {
            arena: SlotMap::with_key(),
        }
    }

    pub fn insert(&mut self, node: CompositionNode) -> ComposedValueRef {
        self.arena.insert(node)
    }

    pub fn get(&self, r: ComposedValueRef) -> Result<&CompositionNode> {
        self.arena.get(r).ok_or(TopologyError::SpaceNotInMap)
    }

    pub fn name(&self, r: ComposedValueRef) -> Result<Option<&str>> {
        Ok(self.get(r)?.name())
    }

    pub fn kind(&self, r: ComposedValueRef) -> Result<&'static str> {
        Ok(self.get(r)?.kind())
    }

    /// The object's ordered child list, empty for leaves (`Clip`, `Gap`)
    /// and single-element for the "sole child" containers (`Warp`'s
    /// `child`, `Transition`'s `container`, `Timeline`'s implicit stack).
    pub fn children(&self, r: ComposedValueRef) -> Result<Vec<ComposedValueRef>> {
        Ok(match self.get(r)? {
            CompositionNode::Clip(_) | CompositionNode::Gap(_) => vec![],
            CompositionNode::Track(t) => t.children.clone(),
            CompositionNode::Stack(s) => s.children.clone(),
            CompositionNode::Warp(w) => vec![w.child],
            CompositionNode::Transition(t) => vec![t.container],
            CompositionNode::Timeline(t) => vec![t.stack],
        })
    }

    /// The internal spaces exposed directly on this object (not counting
    /// child-slot spaces), in the fixed order `TopologicalMap` construction
    /// requires.
    pub fn internal_spaces(&self, r: ComposedValueRef) -> Result<Vec<SpaceLabel>> {
        Ok(match self.get(r)? {
            CompositionNode::Clip(_) => vec![SpaceLabel::Presentation, SpaceLabel::Media],
            CompositionNode::Track(_) | CompositionNode::Stack(_) | CompositionNode::Timeline(_) => {
                vec![SpaceLabel::Presentation, SpaceLabel::Intrinsic]
            }
            CompositionNode::Gap(_) | CompositionNode::Warp(_) => vec![SpaceLabel::Presentation],
            CompositionNode::Transition(_) => vec![SpaceLabel::Presentation],
        })
    }

    /// The bounds of a named space on this object. Dispatches to the
    /// object's own [`Topological`]
    /// impl, which recurses back through this method for the container
    /// variants.
    pub fn bounds_of(&self, r: ComposedValueRef, label: SpaceLabel) -> Result<ContinuousInterval> {
        self.get(r)?.bounds_of(self, label)
    }

    /// The i-th child's bounds expressed in its parent's coordinate space:
    /// for a `Track`, children are laid end to end
    /// (`[sum_prev, sum_prev + duration)`); for a `Stack`/`Timeline`,
    /// children are overlaid, each starting at zero.
    pub fn child_bounds_in_parent(
        &self,
        parent: ComposedValueRef,
        index: usize,
    ) -> Result<ContinuousInterval> {
        let children = self.children(parent)?;
        let child = *children.get(index).ok_or(TopologyError::SpaceNotInMap)?;
        let duration = self.bounds_of(child, SpaceLabel::Presentation)?.duration();
        match self.get(parent)? {
            CompositionNode::Track(t) => {
                let mut offset = Ordinate::ZERO;
                for &c in &t.children[..index] {
                    offset = offset + self.bounds_of(c, SpaceLabel::Presentation)?.duration();
                }
                Ok(ContinuousInterval::new(offset, offset + duration))
            }
            CompositionNode::Stack(_)
            | CompositionNode::Timeline(_)
            | CompositionNode::Transition(_)
            | CompositionNode::Warp(_) => Ok(ContinuousInterval::new(Ordinate::ZERO, duration)),
            CompositionNode::Clip(_) | CompositionNode::Gap(_) => {
                Err(TopologyError::ObjectDoesNotSupportDiscreteSpaces)
            }
        }
    }

    /// The object's own declared topology: identity for everything
    /// except `Gap` (identity over its own
    /// duration, carried explicitly since a `Gap` has no children to
    /// delegate to) and `Warp` (its `transform`). Dispatches to the
    /// object's own [`Topological`] impl.
    pub fn own_topology(&self, r: ComposedValueRef) -> Result<Topology> {
        Ok(self.get(r)?.topology())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(media_start: f64, media_end: f64) -> CompositionNode {
        CompositionNode::Clip(Clip {
            name: None,
            bounds_s: None,
            media: MediaReference::new(ContinuousInterval::new(
                Ordinate::from_f64(media_start),
                Ordinate::from_f64(media_end),
            )),
        })
    }

    #[test]
    fn track_sums_child_durations() {
        let mut comp = Composition::new();
        let c1 = comp.insert(clip(0.0, 2.0));
        let c2 = comp.insert(clip(0.0, 3.0));
        let track = comp.insert(CompositionNode::Track(Track {
            name: None,
            children: vec![c1, c2],
        }));
        let bounds = comp.bounds_of(track, SpaceLabel::Presentation).unwrap();
        assert_eq!(bounds.duration(), Ordinate::from_f64(5.0));
    }

    #[test]
    fn stack_takes_longest_child() {
        let mut comp = Composition::new();
        let c1 = comp.insert(clip(0.0, 2.0));
        let c2 = comp.insert(clip(0.0, 7.0));
        let stack = comp.insert(CompositionNode::Stack(Stack {
            name: None,
            children: vec![c1, c2],
        }));
        let bounds = comp.bounds_of(stack, SpaceLabel::Presentation).unwrap();
        assert_eq!(bounds.duration(), Ordinate::from_f64(7.0));
    }

    #[test]
    fn child_bounds_in_track_are_offset() {
        let mut comp = Composition::new();
        let c1 = comp.insert(clip(0.0, 2.0));
        let c2 = comp.insert(clip(0.0, 3.0));
        let track = comp.insert(CompositionNode::Track(Track {
            name: None,
            children: vec![c1, c2],
        }));
        let b0 = comp.child_bounds_in_parent(track, 0).unwrap();
        let b1 = comp.child_bounds_in_parent(track, 1).unwrap();
        assert_eq!(b0, ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_f64(2.0)));
        assert_eq!(
            b1,
            ContinuousInterval::new(Ordinate::from_f64(2.0), Ordinate::from_f64(5.0))
        );
    }
}
