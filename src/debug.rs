/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The debug graph emitter, gated behind the `graph-rendering` feature.
//! Writes the textual (dot) graph description of a [`TopologicalMap`]: one
//! node per space, labeled `name.kind.path_code_binary` when the object has
//! a name or `kind.hash` otherwise, parent -> child edges, and point-shape
//! dummy nodes for leaves.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Write;

use crate::composition::entities::SpaceReference;
use crate::composition::Composition;
use crate::topological_map::TopologicalMap;
use crate::treecode::Treecode;

fn node_label(composition: &Composition, space: SpaceReference, code: &Treecode) -> anyhow::Result<String> {
    let kind = composition.kind(space.object)?;
    Ok(match composition.name(space.object)? {
        Some(name) => format!("{name}.{kind}.{}", code.to_binary_string()),
        None => {
            let mut hasher = DefaultHasher::new();
            code.hash(&mut hasher);
            format!("{kind}.{:x}", hasher.finish())
        }
    })
}

/// Writes `map`'s dot-format description to `writer`.
pub fn write_dot<W: Write>(
    map: &TopologicalMap,
    composition: &Composition,
    writer: &mut W,
) -> anyhow::Result<()> {
    writeln!(writer, "digraph topology {{")?;
    let entries = map.entries();

    for (space, code) in &entries {
        writeln!(writer, "  \"{}\";", node_label(composition, *space, code)?)?;
    }

    for (space, code) in &entries {
        let label = node_label(composition, *space, code)?;
        let children = map.children_of_code(code);
        if children.is_empty() {
            writeln!(writer, "  \"{label}_leaf\" [shape=point];")?;
            writeln!(writer, "  \"{label}\" -> \"{label}_leaf\";")?;
            continue;
        }
        for (child_code, child_space) in children {
            let child_label = node_label(composition, child_space, &child_code)?;
            writeln!(writer, "  \"{label}\" -> \"{child_label}\";")?;
        }
    }

    writeln!(writer, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::entities::{Clip, CompositionNode, MediaReference, Track};
    use crate::interval::ContinuousInterval;
    use crate::ordinate::Ordinate;
    use crate::topological_map::build_topological_map;

    #[test]
    fn emits_one_node_per_space_and_a_leaf_per_clip() {
        let mut comp = Composition::new();
        let clip = comp.insert(CompositionNode::Clip(Clip {
            name: Some("clip-a".to_string()),
            bounds_s: None,
            media: MediaReference::new(ContinuousInterval::new(
                Ordinate::from_f64(0.0),
                Ordinate::from_f64(2.0),
            )),
        }));
        let track = comp.insert(CompositionNode::Track(Track {
            name: Some("track-a".to_string()),
            children: vec![clip],
        }));
        let map = build_topological_map(&comp, track).unwrap();

        let mut out = Vec::new();
        write_dot(&map, &comp, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("digraph topology {"));
        assert!(text.contains("track-a.Track"));
        assert!(text.contains("clip-a.Clip"));
        assert!(text.contains("shape=point"));
    }
}
