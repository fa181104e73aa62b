//! Stations and lines as seen by the topology engine.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::identifiers::{LineIdentifier, StationIdentifier};

/// A station issued by the station registry.
///
/// Two stations are the same station when their identifiers match; the
/// display name is carried along for rendering only.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub id: StationIdentifier,
    pub name: Arc<str>,
}

impl Station {
    pub fn new(id: impl Into<StationIdentifier>, name: impl AsRef<str>) -> Self {
        Self {
            id: id.into(),
            name: name.as_ref().into(),
        }
    }

    pub fn id(&self) -> &StationIdentifier {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Line metadata. The stations of a line live in its segments.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    pub id: LineIdentifier,
    pub name: Arc<str>,
    pub color: Arc<str>,
}

impl Line {
    pub fn is_named(&self, name: &str) -> bool {
        &*self.name == name
    }
}
