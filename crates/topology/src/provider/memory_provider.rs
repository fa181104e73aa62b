//! In-memory subway store.
//!
//! Backs every collaborator trait with plain maps. Useful for tests, for the
//! command-line editor, and as the reference for real storage backends.

use std::collections::HashMap;

use crate::identifiers::*;
use crate::models::{station::*, traits::*};
use crate::segment::Segment;

// ============================================================================
// In-Memory Store
// ============================================================================

/// Stations, lines and segment rows held in memory.
///
/// Identifiers are issued from one counter per kind, starting at 1.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    // Core data
    stations: Vec<Station>,
    lines: Vec<Line>,

    // Lookup maps
    station_map: HashMap<StationIdentifier, Station>,
    section_map: HashMap<LineIdentifier, Vec<Segment>>,

    next_station_id: u64,
    next_line_id: u64,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-issued stations (used by loaders)
    pub fn from_stations(stations: Vec<Station>) -> Self {
        let station_map = stations
            .iter()
            .map(|s| (s.id.clone(), s.clone()))
            .collect();

        Self {
            stations,
            station_map,
            ..Self::default()
        }
    }

    fn issue_line_id(&mut self) -> LineIdentifier {
        self.next_line_id += 1;
        LineIdentifier::new(self.next_line_id.to_string())
    }

    fn issue_station_id(&mut self) -> StationIdentifier {
        loop {
            self.next_station_id += 1;
            let id = StationIdentifier::new(self.next_station_id.to_string());
            // Loaded stations may already use numeric ids.
            if !self.station_map.contains_key(&id) {
                return id;
            }
        }
    }
}

impl StationRegistry for InMemoryStore {
    fn get_station(&self, id: &StationIdentifier) -> Option<Station> {
        self.station_map.get(id).cloned()
    }

    fn all_stations(&self) -> Vec<Station> {
        self.stations.clone()
    }

    fn register_station(&mut self, name: &str) -> Station {
        let station = Station::new(self.issue_station_id(), name);
        self.station_map.insert(station.id.clone(), station.clone());
        self.stations.push(station.clone());
        station
    }
}

impl LineRepository for InMemoryStore {
    fn save_line(&mut self, name: &str, color: &str) -> Line {
        let line = Line {
            id: self.issue_line_id(),
            name: name.into(),
            color: color.into(),
        };
        self.lines.push(line.clone());
        line
    }

    fn find_line(&self, id: &LineIdentifier) -> Option<Line> {
        self.lines.iter().find(|l| l.id == *id).cloned()
    }

    fn find_line_by_name(&self, name: &str) -> Option<Line> {
        self.lines.iter().find(|l| l.is_named(name)).cloned()
    }

    fn all_lines(&self) -> Vec<Line> {
        self.lines.clone()
    }

    fn update_line(&mut self, id: &LineIdentifier, name: &str, color: &str) -> bool {
        match self.lines.iter_mut().find(|l| l.id == *id) {
            Some(line) => {
                line.name = name.into();
                line.color = color.into();
                true
            }
            None => false,
        }
    }

    fn delete_line(&mut self, id: &LineIdentifier) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != *id);
        self.lines.len() != before
    }
}

impl SectionRepository for InMemoryStore {
    fn sections_of(&self, line: &LineIdentifier) -> Vec<Segment> {
        self.section_map.get(line).cloned().unwrap_or_default()
    }

    fn save_section(&mut self, line: &LineIdentifier, segment: Segment) {
        self.section_map.entry(line.clone()).or_default().push(segment);
    }

    fn remove_section(&mut self, line: &LineIdentifier, segment: &Segment) -> bool {
        let Some(rows) = self.section_map.get_mut(line) else {
            return false;
        };
        match rows.iter().position(|s| s == segment) {
            Some(index) => {
                rows.swap_remove(index);
                true
            }
            None => false,
        }
    }

    fn remove_sections_of(&mut self, line: &LineIdentifier) {
        self.section_map.remove(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = InMemoryStore::new();
        assert_eq!(store.all_stations().len(), 0);
        assert_eq!(store.all_lines().len(), 0);
        assert!(store.sections_of(&LineIdentifier::new("1")).is_empty());
    }

    #[test]
    fn test_station_lookups() {
        let mut store = InMemoryStore::from_stations(vec![Station::new("1", "Sillim")]);

        let registered = store.register_station("Bongcheon");
        assert_eq!(registered.id().as_str(), "2");
        assert!(store.get_station(&StationIdentifier::new("1")).is_some());
        assert_eq!(
            store.get_station(registered.id()).map(|s| s.name().to_owned()),
            Some("Bongcheon".to_owned())
        );
        assert_eq!(store.all_stations().len(), 2);
    }

    #[test]
    fn test_line_crud() {
        let mut store = InMemoryStore::new();

        let line = store.save_line("Line 2", "green");
        assert_eq!(store.find_line_by_name("Line 2"), Some(line.clone()));

        assert!(store.update_line(&line.id, "Line 2 Loop", "lime"));
        let updated = store.find_line(&line.id).unwrap();
        assert_eq!(&*updated.name, "Line 2 Loop");
        assert!(store.find_line_by_name("Line 2").is_none());

        assert!(store.delete_line(&line.id));
        assert!(!store.delete_line(&line.id));
        assert!(!store.update_line(&line.id, "x", "y"));
    }

    #[test]
    fn test_section_rows() {
        let mut store = InMemoryStore::new();
        let line = store.save_line("Line 2", "green");
        let a = store.register_station("A");
        let b = store.register_station("B");
        let segment = Segment::new(a, b, 5).unwrap();

        store.save_section(&line.id, segment.clone());
        assert_eq!(store.sections_of(&line.id), vec![segment.clone()]);

        assert!(store.remove_section(&line.id, &segment));
        assert!(!store.remove_section(&line.id, &segment));
        assert!(store.sections_of(&line.id).is_empty());
    }
}
