//! Pad descriptors for the element system.
//!
//! Each element kind declares its pads via static `PadDescriptor` arrays.
//! When an element is built the descriptors become numbered `Pad`s; pads carry
//! no type of their own, types are assigned by the checker.

use std::borrow::Cow;

/// Whether a pad is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadDirection {
    Input,
    Output,
}

/// Static descriptor for one of an element kind's pads.
#[derive(Debug, Clone)]
pub struct PadDescriptor {
    pub name: Cow<'static, str>,
    pub description: Cow<'static, str>,
}

impl PadDescriptor {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            description: Cow::Borrowed(description),
        }
    }
}

/// A numbered connection point on an element. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pad {
    index: usize,
    name: String,
    description: String,
    direction: PadDirection,
}

impl Pad {
    pub(crate) fn from_descriptor(
        index: usize,
        direction: PadDirection,
        descriptor: &PadDescriptor,
    ) -> Self {
        Self {
            index,
            name: descriptor.name.to_string(),
            description: descriptor.description.to_string(),
            direction,
        }
    }

    /// Build the pad collection for one direction, numbered `0..n`.
    pub(crate) fn collection(direction: PadDirection, descriptors: &[PadDescriptor]) -> Vec<Pad> {
        descriptors
            .iter()
            .enumerate()
            .map(|(index, d)| Pad::from_descriptor(index, direction, d))
            .collect()
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Short label. May contain markup.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn direction(&self) -> PadDirection {
        self.direction
    }
}
