/*
 * SPDX-FileCopyrightText: 2026 Temporal Topology Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

The composition entity model. Each
variant here is a node the topology algebra can be asked to project
between: [`Clip`], [`Gap`], [`Track`], [`Stack`], [`Warp`], [`Transition`],
[`Timeline`]. They're gathered under one tagged enum, [`CompositionNode`].

*/

use crate::error::{Result, TopologyError};
use crate::interval::ContinuousInterval;
use crate::ordinate::Ordinate;
use crate::sample_index::SampleIndexGenerator;
use crate::schema::Versioned;
use crate::topology::Topology;
use slotmap::new_key_type;

use super::Composition;

new_key_type! {
    /// A non-owning, tagged handle to an entity stored in a [`super::Composition`]
    /// arena. Equality is the underlying slot key's equality, which gives
    /// reference-equality semantics without the unstable-pointer problem a
    /// raw pointer would have across arena growth.
    pub struct ComposedValueRef;
}

/// The named coordinate systems a composition object can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpaceLabel {
    Presentation,
    Intrinsic,
    Media,
    Child,
}

/// `{ ref, label, child_index? }` -- a specific named space on a specific
/// object. Two references are equal iff `ref`, `label`, and (when
/// `label == Child`) `child_index` all agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceReference {
    pub object: ComposedValueRef,
    pub label: SpaceLabel,
    pub child_index: Option<usize>,
}

impl SpaceReference {
    pub fn new(object: ComposedValueRef, label: SpaceLabel) -> Self {
        SpaceReference {
            object,
            label,
            child_index: None,
        }
    }

    pub fn child(object: ComposedValueRef, index: usize) -> Self {
        SpaceReference {
            object,
            label: SpaceLabel::Child,
            child_index: Some(index),
        }
    }
}

/// The time-axis domain a piece of media lives in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaDomain {
    Time,
    Picture,
    Audio,
    Metadata,
    Other(String),
}

/// How a sample-and-hold gap between discrete samples is resolved when
/// evaluated continuously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolating {
    DefaultFromDomain,
    Snap,
    Linear,
}

/// Where the bytes backing a media reference actually come from. Neither
/// variant is resolved by this crate (file I/O and signal generation are
/// out of scope) -- the tag is kept purely so `MediaReference`
/// round-trips through the external schema untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataReference {
    Uri(String),
    Signal(String),
    Null,
}

/// The referenced source material's own time axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaReference {
    pub bounds_s: ContinuousInterval,
    pub domain: MediaDomain,
    pub discrete_info: Option<SampleIndexGenerator>,
    pub interpolating: Interpolating,
    pub data_reference: DataReference,
}

impl MediaReference {
    pub fn new(bounds_s: ContinuousInterval) -> Self {
        MediaReference {
            bounds_s,
            domain: MediaDomain::Time,
            discrete_info: None,
            interpolating: Interpolating::DefaultFromDomain,
            data_reference: DataReference::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clip {
    pub name: Option<String>,
    pub bounds_s: Option<ContinuousInterval>,
    pub media: MediaReference,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gap {
    pub name: Option<String>,
    pub bounds_s: ContinuousInterval,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub name: Option<String>,
    pub children: Vec<ComposedValueRef>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stack {
    pub name: Option<String>,
    pub children: Vec<ComposedValueRef>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warp {
    pub name: Option<String>,
    pub child: ComposedValueRef,
    pub transform: Topology,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub name: Option<String>,
    pub container: ComposedValueRef,
    pub kind: String,
    pub bounds_s: Option<ContinuousInterval>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    pub name: Option<String>,
    pub stack: ComposedValueRef,
    pub picture_rate: Option<SampleIndexGenerator>,
    pub audio_rate: Option<SampleIndexGenerator>,
}

/// The tagged sum of every composition entity variant, stored in a
/// [`super::Composition`] arena and addressed by [`ComposedValueRef`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompositionNode {
    Clip(Clip),
    Gap(Gap),
    Track(Track),
    Stack(Stack),
    Warp(Warp),
    Transition(Transition),
    Timeline(Timeline),
}

/// An object's own coordinate behavior: the topology it contributes on
/// its own presentation edge, and the
/// bounds of any named space it exposes. Bounds resolution for the
/// container variants (`Track`, `Stack`, `Timeline`) is recursive over
/// their children, so `bounds_of` takes the owning [`Composition`] as
/// context rather than being answerable from `&self` alone.
pub trait Topological {
    fn topology(&self) -> Topology;
    fn bounds_of(&self, composition: &Composition, label: SpaceLabel) -> Result<ContinuousInterval>;
}

impl Topological for Clip {
    fn topology(&self) -> Topology {
        Topology::init_identity_infinite()
    }

    fn bounds_of(&self, _composition: &Composition, label: SpaceLabel) -> Result<ContinuousInterval> {
        match label {
            SpaceLabel::Presentation => Ok(self
                .bounds_s
                .unwrap_or_else(|| ContinuousInterval::new(Ordinate::ZERO, self.media.bounds_s.duration()))),
            SpaceLabel::Media => Ok(self.media.bounds_s),
            // Known simplification: a Clip's intrinsic bounds alias its
            // media bounds rather than an independent intrinsic space.
            // Kept as-is rather than treated as canonical.
            SpaceLabel::Intrinsic => Ok(self.media.bounds_s),
            SpaceLabel::Child => Err(TopologyError::UnsupportedSpace),
        }
    }
}

impl Topological for Gap {
    fn topology(&self) -> Topology {
        Topology::single(crate::mapping::Mapping::Affine(crate::mapping::Affine::identity(
            self.bounds_s,
        )))
    }

    fn bounds_of(&self, _composition: &Composition, label: SpaceLabel) -> Result<ContinuousInterval> {
        match label {
            SpaceLabel::Presentation => Ok(self.bounds_s),
            _ => Err(TopologyError::UnsupportedSpace),
        }
    }
}

impl Topological for Track {
    fn topology(&self) -> Topology {
        Topology::init_identity_infinite()
    }

    fn bounds_of(&self, composition: &Composition, label: SpaceLabel) -> Result<ContinuousInterval> {
        match label {
            SpaceLabel::Presentation | SpaceLabel::Intrinsic => {
                let mut total = Ordinate::ZERO;
                for &child in &self.children {
                    total = total + composition.bounds_of(child, SpaceLabel::Presentation)?.duration();
                }
                Ok(ContinuousInterval::new(Ordinate::ZERO, total))
            }
            _ => Err(TopologyError::UnsupportedSpace),
        }
    }
}

impl Topological for Stack {
    fn topology(&self) -> Topology {
        Topology::init_identity_infinite()
    }

    fn bounds_of(&self, composition: &Composition, label: SpaceLabel) -> Result<ContinuousInterval> {
        match label {
            SpaceLabel::Presentation | SpaceLabel::Intrinsic => {
                let mut longest = Ordinate::ZERO;
                for &child in &self.children {
                    let d = composition.bounds_of(child, SpaceLabel::Presentation)?.duration();
                    longest = longest.max(d);
                }
                Ok(ContinuousInterval::new(Ordinate::ZERO, longest))
            }
            _ => Err(TopologyError::UnsupportedSpace),
        }
    }
}

impl Topological for Warp {
    fn topology(&self) -> Topology {
        self.transform.clone()
    }

    fn bounds_of(&self, _composition: &Composition, label: SpaceLabel) -> Result<ContinuousInterval> {
        match label {
            SpaceLabel::Presentation => Ok(self.transform.input_bounds()),
            _ => Err(TopologyError::UnsupportedSpace),
        }
    }
}

impl Topological for Transition {
    fn topology(&self) -> Topology {
        Topology::init_identity_infinite()
    }

    fn bounds_of(&self, composition: &Composition, label: SpaceLabel) -> Result<ContinuousInterval> {
        match label {
            SpaceLabel::Presentation => match self.bounds_s {
                Some(b) => Ok(b),
                None => composition.bounds_of(self.container, SpaceLabel::Presentation),
            },
            _ => Err(TopologyError::UnsupportedSpace),
        }
    }
}

impl Topological for Timeline {
    fn topology(&self) -> Topology {
        Topology::init_identity_infinite()
    }

    fn bounds_of(&self, composition: &Composition, label: SpaceLabel) -> Result<ContinuousInterval> {
        match label {
            SpaceLabel::Presentation | SpaceLabel::Intrinsic => {
                composition.bounds_of(self.stack, SpaceLabel::Presentation)
            }
            _ => Err(TopologyError::UnsupportedSpace),
        }
    }
}

impl CompositionNode {
    pub fn name(&self) -> Option<&str> {
        match self {
            CompositionNode::Clip(c) => c.name.as_deref(),
            CompositionNode::Gap(g) => g.name.as_deref(),
            CompositionNode::Track(t) => t.name.as_deref(),
            CompositionNode::Stack(s) => s.name.as_deref(),
            CompositionNode::Warp(w) => w.name.as_deref(),
            CompositionNode::Transition(t) => t.name.as_deref(),
            CompositionNode::Timeline(t) => t.name.as_deref(),
        }
    }

    /// Short tag used by the debug dot emitter.
    pub fn kind(&self) -> &'static str {
        match self {
            CompositionNode::Clip(_) => "Clip",
            CompositionNode::Gap(_) => "Gap",
            CompositionNode::Track(_) => "Track",
            CompositionNode::Stack(_) => "Stack",
            CompositionNode::Warp(_) => "Warp",
            CompositionNode::Transition(_) => "Transition",
            CompositionNode::Timeline(_) => "Timeline",
        }
    }
}

impl Versioned for CompositionNode {
    fn schema_name(&self) -> &'static str {
        self.kind()
    }

    fn schema_version(&self) -> u32 {
        1
    }
}

impl Topological for CompositionNode {
    fn topology(&self) -> Topology {
        match self {
            CompositionNode::Clip(c) => c.topology(),
            CompositionNode::Gap(g) => g.topology(),
            CompositionNode::Track(t) => t.topology(),
            CompositionNode::Stack(s) => s.topology(),
            CompositionNode::Warp(w) => w.topology(),
            CompositionNode::Transition(t) => t.topology(),
            CompositionNode::Timeline(t) => t.topology(),
        }
    }

    fn bounds_of(&self, composition: &Composition, label: SpaceLabel) -> Result<ContinuousInterval> {
        match self {
            CompositionNode::Clip(c) => c.bounds_of(composition, label),
            CompositionNode::Gap(g) => g.bounds_of(composition, label),
            CompositionNode::Track(t) => t.bounds_of(composition, label),
            CompositionNode::Stack(s) => s.bounds_of(composition, label),
            CompositionNode::Warp(w) => w.bounds_of(composition, label),
            CompositionNode::Transition(t) => t.bounds_of(composition, label),
            CompositionNode::Timeline(t) => t.bounds_of(composition, label),
        }
    }
}
