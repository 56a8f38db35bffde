/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

The crate's error taxonomy.

Every fallible operation in this crate returns [`Result<T>`], an alias for
`std::result::Result<T, TopologyError>`. The variants below are grouped
into four kinds: structural (the code/space graph itself is malformed or
the query makes no sense), domain (the query is well-formed but falls
outside some value's domain), algorithmic (the topology algebra cannot
represent the requested operation), and resource.

`SuccessInterval` is deliberately *not* a variant here: it is a non-error
outcome of an instantaneous projection (see [`crate::projection::Projection`]),
not a failure.

*/

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// The complete error taxonomy for this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    // --- Structural -----------------------------------------------------
    #[error("source space is not present in the topological map")]
    SourceNotInMap,

    #[error("destination space is not present in the topological map")]
    DestinationNotInMap,

    #[error("no path exists between the source and destination spaces")]
    NoPathBetweenSpaces,

    #[error("treecode is not present in the topological map")]
    TreeCodeNotInMap,

    #[error("space is not present in the topological map")]
    SpaceNotInMap,

    // --- Domain -----------------------------------------------------------
    #[error("ordinate or index is out of the bounds of the mapping/topology")]
    OutOfBounds,

    #[error("the requested space label is not supported by this object")]
    UnsupportedSpace,

    #[error("the space on this object cannot be made discrete")]
    SpaceOnObjectCannotBeDiscrete,

    #[error("this object does not support discrete spaces at all")]
    ObjectDoesNotSupportDiscreteSpaces,

    #[error("the space on this object has no discrete specification")]
    SpaceOnObjectHasNoDiscreteSpecification,

    #[error("no discrete info (SampleIndexGenerator) is available for this space")]
    NoDiscreteInfoForSpace,

    #[error("the projection operator map has no partition covering this range")]
    MissingDiscretePartition,

    // --- Algorithmic --------------------------------------------------------
    #[error("inversion produced more than one curve, which this operation cannot combine")]
    MoreThanOneCurveIsNotImplemented,

    #[error("this topology has no inverted branches")]
    NoInvertedTopologies,

    #[error("a non-monotonic Bezier mapping has no inverse; it must be split first")]
    NoSplitForLinearization,

    #[error("the projection produced no result")]
    NoProjectionResult,

    // --- Resource -----------------------------------------------------------
    #[error("allocation failed")]
    OutOfMemory,
}
