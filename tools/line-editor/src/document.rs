use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use subway_topology::prelude::*;

/// One segment row as stored in a line document
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmentRow {
    pub up: StationIdentifier,
    pub down: StationIdentifier,
    pub length: u32,
}

/// A line on disk: its metadata, the stations it may use, and its rows
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineDocument {
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub stations: Vec<Station>,
    pub segments: Vec<SegmentRow>,
}

impl LineDocument {
    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Invalid line document {}", path.display()))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self).context("Failed to serialize line document")?;
        std::fs::write(path, json_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Stations keyed by id. Duplicate ids are rejected.
    pub fn station_index(&self) -> Result<HashMap<StationIdentifier, Station>> {
        let mut index = HashMap::with_capacity(self.stations.len());
        for station in &self.stations {
            if index.insert(station.id.clone(), station.clone()).is_some() {
                bail!("Station {} is listed twice", station.id);
            }
        }
        Ok(index)
    }

    /// Resolve rows into a topology, failing on unknown stations.
    pub fn topology(&self, stations: &HashMap<StationIdentifier, Station>) -> Result<Topology> {
        let segments = self
            .segments
            .iter()
            .map(|row| {
                Segment::from_endpoints(
                    stations.get(&row.up).cloned(),
                    stations.get(&row.down).cloned(),
                    row.length,
                )
                .with_context(|| format!("Bad segment {} -> {}", row.up, row.down))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Topology::new(segments)?)
    }

    /// Replace the rows with those of `topology`.
    pub fn set_segments(&mut self, topology: &Topology) {
        self.segments = topology.segments().iter().map(SegmentRow::from).collect();
    }
}

impl From<&Segment> for SegmentRow {
    fn from(segment: &Segment) -> Self {
        Self {
            up: segment.up().id().clone(),
            down: segment.down().id().clone(),
            length: segment.length(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "name": "Line 2",
        "color": "green",
        "stations": [
            { "id": "sillim", "name": "Sillim" },
            { "id": "bongcheon", "name": "Bongcheon" },
            { "id": "snu", "name": "Seoul Nat'l Univ." }
        ],
        "segments": [
            { "up": "bongcheon", "down": "snu", "length": 10 },
            { "up": "sillim", "down": "bongcheon", "length": 5 }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let document: LineDocument = serde_json::from_str(DOCUMENT).unwrap();
        let stations = document.station_index().unwrap();
        let topology = document.topology(&stations).unwrap();

        let sorted = topology.sorted_stations().unwrap();
        let order: Vec<&str> = sorted.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(order, vec!["sillim", "bongcheon", "snu"]);
    }

    #[test]
    fn test_unknown_station() {
        let mut document: LineDocument = serde_json::from_str(DOCUMENT).unwrap();
        document.segments.push(SegmentRow {
            up: StationIdentifier::new("snu"),
            down: StationIdentifier::new("nowhere"),
            length: 3,
        });

        let stations = document.station_index().unwrap();
        assert!(document.topology(&stations).is_err());
    }

    #[test]
    fn test_segment_json_rejects_zero_length() {
        let json = r#"{
            "up": { "id": "a", "name": "A" },
            "down": { "id": "b", "name": "B" },
            "length": 0
        }"#;

        let err = serde_json::from_str::<Segment>(json).unwrap_err();
        assert!(err.to_string().contains("Segment length must be positive"));
    }

    #[test]
    fn test_segment_json_round_trip() {
        let json = r#"{
            "up": { "id": "a", "name": "A" },
            "down": { "id": "b", "name": "B" },
            "length": 4
        }"#;

        let segment: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.up().id().as_str(), "a");
        assert_eq!(segment.length(), 4);

        let encoded = serde_json::to_string(&segment).unwrap();
        assert_eq!(serde_json::from_str::<Segment>(&encoded).unwrap(), segment);
    }

    #[test]
    fn test_duplicate_station_ids() {
        let mut document: LineDocument = serde_json::from_str(DOCUMENT).unwrap();
        document.stations.push(Station::new("snu", "Again"));

        assert!(document.station_index().is_err());
    }
}
