/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

[`TopologicalMap`]: a bidirectional `space <-> treecode` index over every
space exposed by every object in a composition, built by one iterative DFS
from a root. Construction uses an explicit `Vec`-backed stack of
`(object, entry_code)` frames rather than recursion.

Sealing is a type-state pattern: [`TopologicalMapBuilder`] is the only
place either hash map is ever written to, and [`TopologicalMapBuilder::seal`]
consumes it to produce the immutable [`TopologicalMap`] -- there is no API
on `TopologicalMap` itself that can mutate it again.

*/

use std::collections::HashMap;

use crate::composition::entities::{ComposedValueRef, SpaceLabel, SpaceReference};
use crate::composition::Composition;
use crate::error::{Result, TopologyError};
use crate::treecode::{Step, Treecode};

/// The mutable half of construction. Not exposed outside this module:
/// callers only ever see a finished, sealed [`TopologicalMap`].
struct TopologicalMapBuilder {
    space_to_code: HashMap<SpaceReference, Treecode>,
    code_to_space: HashMap<Treecode, SpaceReference>,
}

impl TopologicalMapBuilder {
    fn new() -> Self {
        TopologicalMapBuilder {
            space_to_code: HashMap::new(),
            code_to_space: HashMap::new(),
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        TopologicalMapBuilder {
            space_to_code: HashMap::with_capacity(capacity),
            code_to_space: HashMap::with_capacity(capacity),
        }
    }

    fn insert(&mut self, space: SpaceReference, code: Treecode) {
        log::trace!(
            "inserting space {:?} at code {}",
            space,
            code.to_binary_string()
        );
        self.space_to_code.insert(space, code.clone());
        self.code_to_space.insert(code, space);
    }

    fn seal(self, root: ComposedValueRef) -> TopologicalMap {
        TopologicalMap {
            space_to_code: self.space_to_code,
            code_to_space: self.code_to_space,
            root,
        }
    }
}

/// A sealed, bidirectional `space <-> treecode` index. Built once from a
/// root object and read-only thereafter; safe to share across threads as
/// an immutable value.
#[derive(Debug, Clone)]
pub struct TopologicalMap {
    space_to_code: HashMap<SpaceReference, Treecode>,
    code_to_space: HashMap<Treecode, SpaceReference>,
    root: ComposedValueRef,
}

impl TopologicalMap {
    pub fn root(&self) -> ComposedValueRef {
        self.root
    }

    pub fn code_of(&self, space: SpaceReference) -> Result<&Treecode> {
        self.space_to_code.get(&space).ok_or(TopologyError::SpaceNotInMap)
    }

    pub fn space_of(&self, code: &Treecode) -> Result<SpaceReference> {
        self.code_to_space
            .get(code)
            .copied()
            .ok_or(TopologyError::TreeCodeNotInMap)
    }

    pub fn contains_space(&self, space: SpaceReference) -> bool {
        self.space_to_code.contains_key(&space)
    }

    pub fn len(&self) -> usize {
        self.space_to_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.space_to_code.is_empty()
    }

    /// True iff one of `a`, `b` is an ancestor of the other -- i.e. a path
    /// exists between them in the composition graph.
    pub fn path_exists(&self, a: SpaceReference, b: SpaceReference) -> Result<bool> {
        let ca = self.code_of(a)?;
        let cb = self.code_of(b)?;
        Ok(Treecode::path_exists(ca, cb))
    }

    /// Every `(space, code)` pair held in the map, in arbitrary order.
    /// Used by the debug dot emitter and by `serde` round-tripping; not
    /// needed by the core projection algorithms themselves.
    pub fn entries(&self) -> Vec<(SpaceReference, Treecode)> {
        self.space_to_code
            .iter()
            .map(|(space, code)| (*space, code.clone()))
            .collect()
    }

    /// As [`build_topological_map`], but pre-sizes the map's two internal
    /// hash tables to `capacity` entries up front. An under-estimate just
    /// costs the usual amortized-growth reallocations.
    pub fn build_with_capacity(
        composition: &Composition,
        root: ComposedValueRef,
        capacity: usize,
    ) -> Result<TopologicalMap> {
        build_topological_map_with(composition, root, TopologicalMapBuilder::with_capacity(capacity))
    }

    /// Every `(code -> space)` entry reachable by appending a single bit to
    /// `code`, restricted to bits that are actually present in the map.
    /// Used directly by [`crate::visit::TreenodeWalkingIterator`].
    pub(crate) fn children_of_code(&self, code: &Treecode) -> Vec<(Treecode, SpaceReference)> {
        let mut out = Vec::with_capacity(2);
        for step in [Step::Left, Step::Right] {
            let next = code.appended(step);
            if let Some(space) = self.code_to_space.get(&next) {
                out.push((next, *space));
            }
        }
        out
    }
}

/// Builds a [`TopologicalMap`] over every space reachable from `root`.
///
/// Children are addressed with a right-spine encoding: the i-th child's
/// slot sits one more `right` step down the spine than the (i-1)-th, and
/// its presentation space is one `left` step off its own slot. This keeps
/// every hop exactly one bit, which is what [`crate::visit::
/// TreenodeWalkingIterator`] requires.
pub fn build_topological_map(composition: &Composition, root: ComposedValueRef) -> Result<TopologicalMap> {
    build_topological_map_with(composition, root, TopologicalMapBuilder::new())
}

fn build_topological_map_with(
    composition: &Composition,
    root: ComposedValueRef,
    mut builder: TopologicalMapBuilder,
) -> Result<TopologicalMap> {
    log::debug!("building topological map from root {:?}", root);
    let mut stack: Vec<(ComposedValueRef, Treecode)> = vec![(root, Treecode::init())];

    while let Some((object, entry_code)) = stack.pop() {
        log::trace!(
            "visiting object {:?} at code {}",
            object,
            entry_code.to_binary_string()
        );
        let internal_spaces = composition.internal_spaces(object)?;
        debug_assert!(!internal_spaces.is_empty());

        let mut code = entry_code;
        let mut last_code = code.clone();
        for (i, label) in internal_spaces.iter().enumerate() {
            if i > 0 {
                code = code.appended(Step::Left);
            }
            builder.insert(SpaceReference::new(object, *label), code.clone());
            last_code = code.clone();
        }

        let children = composition.children(object)?;
        let mut working = last_code;
        for (i, &child) in children.iter().enumerate() {
            working = working.appended(Step::Right);
            builder.insert(SpaceReference::child(object, i), working.clone());
            let descend = working.appended(Step::Left);
            stack.push((child, descend));
        }
    }

    Ok(builder.seal(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::entities::{Clip, CompositionNode, MediaReference, Track};
    use crate::interval::ContinuousInterval;
    use crate::ordinate::Ordinate;

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
    fn every_code_round_trips_through_both_maps() {
        let mut comp = Composition::new();
        let c0 = comp.insert(clip_node(0.0, 2.0));
        let c1 = comp.insert(clip_node(0.0, 3.0));
        let track = comp.insert(CompositionNode::Track(Track {
            name: None,
            children: vec![c0, c1],
        }));
        let map = build_topological_map(&comp, track).unwrap();
        for (space, code) in map.space_to_code.iter() {
            assert_eq!(map.code_to_space.get(code), Some(space));
        }
        for (code, space) in map.code_to_space.iter() {
            assert_eq!(map.space_to_code.get(space), Some(code));
        }
    }

    #[test]
    fn root_presentation_is_the_marker_code() {
        let mut comp = Composition::new();
        let c0 = comp.insert(clip_node(0.0, 2.0));
        let track = comp.insert(CompositionNode::Track(Track {
            name: None,
            children: vec![c0],
        }));
        let map = build_topological_map(&comp, track).unwrap();
        let code = map
            .code_of(SpaceReference::new(track, SpaceLabel::Presentation))
            .unwrap();
        assert_eq!(code.length(), 0);
    }

    #[test]
    fn distinct_children_get_distinct_codes() {
        let mut comp = Composition::new();
        let c0 = comp.insert(clip_node(0.0, 2.0));
        let c1 = comp.insert(clip_node(0.0, 2.0));
        let c2 = comp.insert(clip_node(0.0, 2.0));
        let track = comp.insert(CompositionNode::Track(Track {
            name: None,
            children: vec![c0, c1, c2],
        }));
        let map = build_topological_map(&comp, track).unwrap();
        let p0 = map.code_of(SpaceReference::new(c0, SpaceLabel::Presentation)).unwrap();
        let p1 = map.code_of(SpaceReference::new(c1, SpaceLabel::Presentation)).unwrap();
        let p2 = map.code_of(SpaceReference::new(c2, SpaceLabel::Presentation)).unwrap();
        assert_ne!(p0, p1);
        assert_ne!(p1, p2);
        assert_ne!(p0, p2);
    }
}
