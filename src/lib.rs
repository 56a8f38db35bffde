/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Coordinate-space reasoning over hierarchical media compositions.

A composition is a tree of [`composition::CompositionNode`]s -- clips,
gaps, tracks, stacks, warps, transitions, a timeline root -- each exposing
one or more named coordinate systems ([`composition::SpaceLabel`]). This
crate builds an addressable index over every such space
([`topological_map::TopologicalMap`]), derives the [`topology::Topology`]
that maps coordinates across any single edge of that graph
([`composition::build_transform`]), and composes edges end to end into
reusable [`projection::ProjectionOperator`]s a caller can evaluate, invert,
or discretize against a sample grid.

Module map:

- [`ordinate`] / [`interval`]: the scalar and interval types every other
  module is built from.
- [`mapping`]: bounded point-to-point functions (affine, monotonic linear,
  Bezier).
- [`topology`]: ordered sequences of mappings, with join/inversion/split.
- [`treecode`]: the variable-length binary path addressing scheme.
- [`composition`]: the composition entity model and its arena.
- [`topological_map`]: the `space <-> treecode` index and its builder.
- [`visit`]: the treecode-following iterator used to walk that index.
- [`projection`]: reified source-to-destination operators and the
  whole-graph overlay ([`projection::ProjectionOperatorMap`]).
- [`sample_index`]: the continuous/discrete bridge.
- [`schema`]: the seam a concrete persisted-form implementation plugs into.
- [`debug`] (behind the `graph-rendering` feature): a GraphViz dot emitter
  for a [`topological_map::TopologicalMap`].

Nothing in this crate performs file I/O, renders pixels, or decodes audio;
it is coordinate algebra only.

*/

pub mod composition;
pub mod error;
pub mod interval;
pub mod mapping;
pub mod ordinate;
pub mod projection;
pub mod sample_index;
pub mod schema;
pub mod topological_map;
pub mod topology;
pub mod treecode;
pub mod visit;

#[cfg(feature = "graph-rendering")]
pub mod debug;

pub use composition::{Composition, CompositionNode, SpaceLabel, SpaceReference, Topological};
pub use error::{Result, TopologyError};
pub use interval::ContinuousInterval;
pub use mapping::Mapping;
pub use ordinate::Ordinate;
pub use projection::{ProjectionOperator, ProjectionOperatorMap};
pub use topological_map::{build_topological_map, TopologicalMap};
pub use topology::Topology;
pub use treecode::Treecode;
