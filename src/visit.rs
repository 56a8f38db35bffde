/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

[`TreenodeWalkingIterator`]: an `Iterator` that walks [`TopologicalMap`]
nodes starting at a source space, either straight towards an optional
destination or exhaustively over everything reachable. An explicit owned
stack of codes, one node yielded per `next()` call, no shared lifetime
beyond the borrowed map.

*/

use crate::composition::entities::SpaceReference;
use crate::error::Result;
use crate::topological_map::TopologicalMap;
use crate::treecode::Treecode;

/// Walks from `source`, either directly towards `destination` (one step
/// per node, following [`Treecode::next_step_towards`]) or exhaustively
/// over every space reachable from `source` when `destination` is `None`.
///
/// Not restartable: once exhausted, a new iterator must be constructed.
/// Dropping the iterator mid-walk is safe and cheap -- it owns only a
/// `Vec` of small cloned codes, released the ordinary way on drop.
pub struct TreenodeWalkingIterator<'a> {
    map: &'a TopologicalMap,
    destination: Option<Treecode>,
    stack: Vec<Treecode>,
}

impl<'a> TreenodeWalkingIterator<'a> {
    pub fn new(
        map: &'a TopologicalMap,
        source: SpaceReference,
        destination: Option<SpaceReference>,
    ) -> Result<Self> {
        let source_code = map.code_of(source)?.clone();
        let destination_code = match destination {
            Some(d) => Some(map.code_of(d)?.clone()),
            None => None,
        };
        Ok(TreenodeWalkingIterator {
            map,
            destination: destination_code,
            stack: vec![source_code],
        })
    }
}

impl<'a> Iterator for TreenodeWalkingIterator<'a> {
    type Item = (Treecode, SpaceReference);

    fn next(&mut self) -> Option<Self::Item> {
        let code = self.stack.pop()?;
        let space = self.map.space_of(&code).ok()?;
        log::trace!("walking iterator visiting {}", code.to_binary_string());
        match &self.destination {
            Some(dest) if &code != dest => {
                if let Ok(step) = code.next_step_towards(dest) {
                    self.stack.push(code.appended(step));
                }
            }
            Some(_) => {}
            None => {
                for (child_code, _) in self.map.children_of_code(&code) {
                    self.stack.push(child_code);
                }
            }
        }
        Some((code, space))
    }
}
