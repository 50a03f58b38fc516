//! Identity types for the pipeline system.
//!
//! Elements are keyed by a `Uuid` newtype used directly as a map key. Pads are
//! addressed by `(element, index)`, printed as `"<uuid>:<index>"` in documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable, unique identifier of an element. Assigned once at creation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub Uuid);

impl ElementId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0.hyphenated())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for ElementId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(ElementId)
    }
}

impl From<Uuid> for ElementId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Address of a pad: owning element plus the pad's index in its input or
/// output collection. Direction comes from context (source vs sink).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PadRef {
    pub element: ElementId,
    pub pad: usize,
}

impl PadRef {
    pub fn new(element: ElementId, pad: usize) -> Self {
        Self { element, pad }
    }
}

impl fmt::Debug for PadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PadRef(element={}, pad={})", self.element, self.pad)
    }
}

impl fmt::Display for PadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.element, self.pad)
    }
}

/// Failure parsing a `"<uuid>:<index>"` endpoint string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed pad reference '{0}'")]
pub struct ParsePadRefError(pub String);

impl FromStr for PadRef {
    type Err = ParsePadRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParsePadRefError(s.to_string());
        let (element, pad) = s.rsplit_once(':').ok_or_else(malformed)?;
        let element = element.trim().parse::<ElementId>().map_err(|_| malformed())?;
        let pad = pad.trim().parse::<usize>().map_err(|_| malformed())?;
        Ok(PadRef { element, pad })
    }
}
