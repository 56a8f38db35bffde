/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The persisted-form *interface* surface. The full versioned, human-
//! readable serialization format is an external collaborator this crate
//! does not implement -- what's here is only the seam a concrete format
//! would plug into: [`Versioned`]
//! (the per-record `schema_name`/`schema_version` pair every composition
//! entity carries) and [`VersionRegistry`] (where named upgrade/downgrade
//! transforms would be registered). The *data* half of persistence --
//! field-level `Serialize`/`Deserialize` on the value types themselves --
//! is implemented directly via `#[cfg_attr(feature = "serde", ...)]`
//! derives throughout the crate, not through this module.

use std::collections::HashMap;

use crate::error::{Result, TopologyError};

/// A record that knows its own schema identity.
pub trait Versioned {
    fn schema_name(&self) -> &'static str;
    fn schema_version(&self) -> u32;
}

/// A function that upgrades or downgrades a serialized record by exactly
/// one version step. Kept as an opaque closure rather than a concrete
/// format type, since the concrete wire format is external to this crate.
pub type VersionTransform = Box<dyn Fn(&[u8]) -> Result<Vec<u8>> + Send + Sync>;

/// Where named, versioned transforms for a schema would be registered.
/// This is a documented stub: the persisted form's versioning registry is
/// out of scope for this crate, so `upgrade`/`downgrade` report
/// [`TopologyError::UnsupportedSpace`]-flavored "not wired to a concrete
/// format" errors rather than perform any conversion.
///
/// A caller-side implementation that wraps a real format is expected to
/// log a version up/downgrade failure and return the original record
/// unchanged rather than propagate the error to its own caller.
#[derive(Default)]
pub struct VersionRegistry {
    transforms: HashMap<(&'static str, u32, u32), VersionTransform>,
}

impl VersionRegistry {
    pub fn new() -> Self {
        VersionRegistry {
            transforms: HashMap::new(),
        }
    }

    /// Registers a transform from `from_version` to `to_version` for
    /// `schema_name`. `to_version` is conventionally `from_version + 1`
    /// (upgrade) or `from_version - 1` (downgrade).
    pub fn register(&mut self, schema_name: &'static str, from_version: u32, to_version: u32, transform: VersionTransform) {
        self.transforms.insert((schema_name, from_version, to_version), transform);
    }

    pub fn upgrade(&self, schema_name: &'static str, from_version: u32, bytes: &[u8]) -> Result<Vec<u8>> {
        self.transforms
            .get(&(schema_name, from_version, from_version + 1))
            .ok_or(TopologyError::UnsupportedSpace)
            .and_then(|f| f(bytes))
    }

    pub fn downgrade(&self, schema_name: &'static str, from_version: u32, bytes: &[u8]) -> Result<Vec<u8>> {
        self.transforms
            .get(&(schema_name, from_version, from_version.saturating_sub(1)))
            .ok_or(TopologyError::UnsupportedSpace)
            .and_then(|f| f(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_without_a_registered_transform_fails_cleanly() {
        let registry = VersionRegistry::new();
        let err = registry.upgrade("timeline", 1, b"{}");
        assert_eq!(err, Err(TopologyError::UnsupportedSpace));
    }
}
