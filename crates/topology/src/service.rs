//! Line service: the glue between storage and the topology engine.
//!
//! Every segment edit follows the same steps. Load the line's rows, wrap
//! them in a [`Topology`], keep a snapshot, edit, then persist the
//! [`SegmentDelta`] between the snapshot and the edited topology.

use tracing::{debug, info, warn};

use crate::identifiers::*;
use crate::models::station::{Line, Station};
use crate::models::traits::SubwayStore;
use crate::models::types::TopologyError;
use crate::segment::Segment;
use crate::topology::{SegmentDelta, Topology};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0} : no subway line with this id")]
    LineNotFound(LineIdentifier),

    #[error("{0} : no station with this id")]
    StationNotFound(StationIdentifier),

    #[error("{0} : a subway line with this name already exists")]
    DuplicateLineName(String),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Request to open a new line with its first segment
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: StationIdentifier,
    pub down_station_id: StationIdentifier,
    pub distance: u32,
}

/// Request to add a segment to an existing line
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionRequest {
    pub up_station_id: StationIdentifier,
    pub down_station_id: StationIdentifier,
    pub distance: u32,
}

/// A line with its stations in travel order
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineView {
    pub line: Line,
    pub stations: Vec<Station>,
}

pub struct LineService<S> {
    store: S,
}

impl<S: SubwayStore> LineService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_line(&mut self, request: LineRequest) -> Result<LineView> {
        if self.store.find_line_by_name(&request.name).is_some() {
            return Err(ServiceError::DuplicateLineName(request.name));
        }

        let up = self.find_station(&request.up_station_id)?;
        let down = self.find_station(&request.down_station_id)?;
        let topology = Topology::from_segment(Segment::new(up, down, request.distance)?);
        let stations = topology.sorted_stations()?;

        let line = self.store.save_line(&request.name, &request.color);
        for segment in topology.segments() {
            self.store.save_section(&line.id, segment.clone());
        }
        info!(line = %line.id, name = %line.name, "created line");

        Ok(LineView { line, stations })
    }

    pub fn find_line(&self, id: &LineIdentifier) -> Result<LineView> {
        let line = self.find_existing_line(id)?;
        self.view(line)
    }

    pub fn all_lines(&self) -> Result<Vec<LineView>> {
        self.store
            .all_lines()
            .into_iter()
            .map(|line| self.view(line))
            .collect()
    }

    /// Rename or recolor a line. Keeping the current name is allowed.
    pub fn update_line(&mut self, id: &LineIdentifier, name: &str, color: &str) -> Result<()> {
        let line = self.find_existing_line(id)?;
        if !line.is_named(name) && self.store.find_line_by_name(name).is_some() {
            return Err(ServiceError::DuplicateLineName(name.to_owned()));
        }

        self.store.update_line(&line.id, name, color);
        info!(line = %line.id, name, color, "updated line");
        Ok(())
    }

    pub fn delete_line(&mut self, id: &LineIdentifier) -> Result<()> {
        let line = self.find_existing_line(id)?;
        self.store.remove_sections_of(&line.id);
        self.store.delete_line(&line.id);
        info!(line = %line.id, "deleted line");
        Ok(())
    }

    pub fn add_section(
        &mut self,
        line_id: &LineIdentifier,
        request: SectionRequest,
    ) -> Result<SegmentDelta> {
        let line = self.find_existing_line(line_id)?;
        let up = self.find_station(&request.up_station_id)?;
        let down = self.find_station(&request.down_station_id)?;
        let segment = Segment::new(up, down, request.distance)?;

        let before = self.topology_of(&line)?;
        let mut after = before.copy();
        after.insert(segment)?;

        Ok(self.persist(&line, &before, &after))
    }

    pub fn delete_section(
        &mut self,
        line_id: &LineIdentifier,
        station_id: &StationIdentifier,
    ) -> Result<SegmentDelta> {
        let line = self.find_existing_line(line_id)?;
        let station = self.find_station(station_id)?;

        let before = self.topology_of(&line)?;
        let mut after = before.copy();
        after.remove_station(&station)?;

        Ok(self.persist(&line, &before, &after))
    }

    fn persist(&mut self, line: &Line, before: &Topology, after: &Topology) -> SegmentDelta {
        let delta = after.delta_since(before);

        for segment in &delta.to_delete {
            if !self.store.remove_section(&line.id, segment) {
                warn!(line = %line.id, segment = %segment, "segment row already missing");
            }
        }
        for segment in &delta.to_create {
            self.store.save_section(&line.id, segment.clone());
        }

        debug!(
            line = %line.id,
            created = delta.to_create.len(),
            deleted = delta.to_delete.len(),
            "persisted segment delta"
        );
        delta
    }

    fn topology_of(&self, line: &Line) -> Result<Topology> {
        Ok(Topology::new(self.store.sections_of(&line.id))?)
    }

    fn view(&self, line: Line) -> Result<LineView> {
        let stations = self.topology_of(&line)?.sorted_stations()?;
        Ok(LineView { line, stations })
    }

    fn find_existing_line(&self, id: &LineIdentifier) -> Result<Line> {
        self.store
            .find_line(id)
            .ok_or_else(|| ServiceError::LineNotFound(id.clone()))
    }

    fn find_station(&self, id: &StationIdentifier) -> Result<Station> {
        self.store
            .get_station(id)
            .ok_or_else(|| ServiceError::StationNotFound(id.clone()))
    }
}
