//! The segment collection of one line and the edits that keep it a single path.
//!
//! A [`Topology`] holds the segments of a line in no particular order. The
//! station order is derived on demand: the start is the only up station that
//! is never a down station, the end is the only down station that is never
//! an up station, and the path is the walk between them.
//!
//! Edits are all-or-nothing. The typical flow is:
//!
//! ```
//! use subway_topology::prelude::*;
//!
//! let a = Station::new("a", "A");
//! let b = Station::new("b", "B");
//! let c = Station::new("c", "C");
//! let d = Station::new("d", "D");
//!
//! let mut line = Topology::new(vec![
//!     Segment::new(a.clone(), b.clone(), 5).unwrap(),
//!     Segment::new(b.clone(), c.clone(), 5).unwrap(),
//! ])
//! .unwrap();
//! let before = line.copy();
//!
//! line.insert(Segment::new(b.clone(), d.clone(), 3).unwrap()).unwrap();
//!
//! let delta = line.delta_since(&before);
//! assert_eq!(delta.to_delete, vec![Segment::new(b.clone(), c.clone(), 5).unwrap()]);
//! assert_eq!(delta.to_create.len(), 2);
//! assert_eq!(line.sorted_stations().unwrap(), vec![a, b, d, c]);
//! ```

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::station::Station;
use crate::models::types::{Result, TopologyError};
use crate::segment::Segment;

const MIDDLE_STATION_SEGMENTS: usize = 2;
const MIN_SEGMENTS: usize = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    segments: Vec<Segment>,
}

/// Segments to persist so that storage goes from one snapshot to another.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentDelta {
    pub to_create: Vec<Segment>,
    pub to_delete: Vec<Segment>,
}

impl SegmentDelta {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty()
    }
}

impl Topology {
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(TopologyError::EmptyTopology);
        }
        Ok(Self { segments })
    }

    /// A freshly opened line: one segment, always a valid path.
    pub fn from_segment(segment: Segment) -> Self {
        Self {
            segments: vec![segment],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a constructed topology.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains_station(&self, station: &Station) -> bool {
        self.segments.iter().any(|s| s.has_station(station))
    }

    /// Distinct stations in first-seen order, not travel order.
    pub fn stations(&self) -> Vec<Station> {
        let mut seen = HashSet::new();
        self.segments
            .iter()
            .flat_map(|s| [s.up(), s.down()])
            .filter(|station| seen.insert(station.id().clone()))
            .cloned()
            .collect()
    }

    pub fn total_length(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.length())).sum()
    }

    /// Independent snapshot for diffing against later edits.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // ---- Edits ----

    /// Add a segment that touches the line, splitting an existing segment
    /// when the new one starts or ends inside it.
    pub fn insert(&mut self, segment: Segment) -> Result<()> {
        let connectable: Vec<&Segment> = self
            .segments
            .iter()
            .filter(|s| s.has_any_station_of(&segment))
            .collect();

        if connectable.is_empty() {
            return Err(TopologyError::DisconnectedSegment {
                up: segment.up().id().clone(),
                down: segment.down().id().clone(),
            });
        }

        let has_up = connectable.iter().any(|s| s.has_up_station_of(&segment));
        let has_down = connectable.iter().any(|s| s.has_down_station_of(&segment));
        if has_up && has_down {
            return Err(TopologyError::DuplicateSegment {
                up: segment.up().id().clone(),
                down: segment.down().id().clone(),
            });
        }

        let split_target = connectable
            .iter()
            .find(|s| s.shares_up_or_down_with(&segment))
            .map(|s| (*s).clone());

        match split_target {
            Some(existing) => self.insert_middle(existing, segment),
            None => {
                debug!(segment = %segment, "extending line");
                self.segments.push(segment);
                Ok(())
            }
        }
    }

    fn insert_middle(&mut self, existing: Segment, inserted: Segment) -> Result<()> {
        if existing.is_not_longer_than(&inserted) {
            return Err(TopologyError::SegmentTooLong {
                existing: existing.length(),
                inserted: inserted.length(),
            });
        }

        let remainder = existing.split(&inserted)?;
        debug!(
            existing = %existing,
            inserted = %inserted,
            remainder = %remainder,
            "splitting segment"
        );

        self.segments.retain(|s| *s != existing);
        self.segments.push(inserted);
        self.segments.push(remainder);
        Ok(())
    }

    /// Take a station off the line, joining its two neighbours when it sits
    /// between them.
    pub fn remove_station(&mut self, station: &Station) -> Result<()> {
        let touching: Vec<Segment> = self
            .segments
            .iter()
            .filter(|s| s.has_station(station))
            .cloned()
            .collect();

        if touching.is_empty() {
            return Err(TopologyError::StationNotInLine(station.id().clone()));
        }
        if self.segments.len() == MIN_SEGMENTS {
            return Err(TopologyError::SingleSegmentLine);
        }

        if touching.len() == MIDDLE_STATION_SEGMENTS {
            let merged = touching[0].combine(&touching[1], station)?;
            debug!(station = %station.id(), merged = %merged, "merging around station");
            self.segments.retain(|s| !touching.contains(s));
            self.segments.push(merged);
            return Ok(());
        }

        debug!(station = %station.id(), "removing terminal station");
        self.segments.retain(|s| *s != touching[0]);
        Ok(())
    }

    // ---- Queries ----

    /// Stations from the start of the line to its end.
    pub fn sorted_stations(&self) -> Result<Vec<Station>> {
        self.walk().inspect_err(|err| {
            warn!(error = %err, segments = self.segments.len(), "malformed line topology");
        })
    }

    fn walk(&self) -> Result<Vec<Station>> {
        let up_stations: HashSet<&Station> = self.segments.iter().map(Segment::up).collect();
        let down_stations: HashSet<&Station> = self.segments.iter().map(Segment::down).collect();

        let start = self
            .segments
            .iter()
            .map(Segment::up)
            .find(|s| !down_stations.contains(s))
            .ok_or(TopologyError::NoStartStation)?;
        let end = self
            .segments
            .iter()
            .map(Segment::down)
            .find(|s| !up_stations.contains(s))
            .ok_or(TopologyError::NoEndStation)?;

        let next: HashMap<&Station, &Station> = self
            .segments
            .iter()
            .map(|s| (s.up(), s.down()))
            .collect();

        let expected = self.segments.len() + 1;
        let mut stations = vec![start.clone()];
        let mut current = start;
        while current != end {
            if stations.len() == expected {
                return Err(TopologyError::BrokenChain(current.id().clone()));
            }
            current = next
                .get(current)
                .copied()
                .ok_or_else(|| TopologyError::BrokenChain(current.id().clone()))?;
            stations.push(current.clone());
        }

        if stations.len() != expected {
            return Err(TopologyError::UnreachableSegments {
                reached: stations.len(),
                expected,
            });
        }
        Ok(stations)
    }

    /// Check that the segments form one simple path.
    pub fn validate(&self) -> Result<()> {
        self.sorted_stations().map(|_| ())
    }

    /// Segments of `self` that `other` does not have.
    pub fn difference(&self, other: &Topology) -> Vec<Segment> {
        let theirs: HashSet<&Segment> = other.segments.iter().collect();
        self.segments
            .iter()
            .filter(|s| !theirs.contains(s))
            .cloned()
            .collect()
    }

    /// What to create and delete to turn `before` into `self`.
    pub fn delta_since(&self, before: &Topology) -> SegmentDelta {
        SegmentDelta {
            to_create: self.difference(before),
            to_delete: before.difference(self),
        }
    }
}
