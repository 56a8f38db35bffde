/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Projection construction: [`ProjectionOperator`] and
//! [`ProjectionOperatorMap`], plus the algorithms that build them from a
//! [`crate::topological_map::TopologicalMap`].

pub mod operator;
pub mod operator_map;

pub use operator::{build_projection_operator, Projection, ProjectionOperator};
pub use operator_map::{projection_map_to_media_from, ProjectionOperatorMap};
