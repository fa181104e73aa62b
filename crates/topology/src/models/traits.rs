//! Collaborator traits around the topology engine.
//!
//! The engine never touches storage. These traits describe what the line
//! service needs from the outside world: resolving stations, keeping line
//! metadata, and keeping the raw segment rows of each line. Implementations
//! can be in-memory, database-backed, or remote.

use crate::identifiers::*;
use crate::models::station::{Line, Station};
use crate::segment::Segment;

// ============================================================================
// Registries
// ============================================================================

/// Source of truth for stations
pub trait StationRegistry: Send + Sync {
    fn get_station(&self, id: &StationIdentifier) -> Option<Station>;

    fn all_stations(&self) -> Vec<Station>;

    /// Issue a new identifier for a station with this display name
    fn register_station(&mut self, name: &str) -> Station;
}

// ============================================================================
// Repositories
// ============================================================================

/// Line metadata storage
pub trait LineRepository: Send + Sync {
    fn save_line(&mut self, name: &str, color: &str) -> Line;

    fn find_line(&self, id: &LineIdentifier) -> Option<Line>;

    fn find_line_by_name(&self, name: &str) -> Option<Line>;

    /// All lines, in creation order
    fn all_lines(&self) -> Vec<Line>;

    /// Returns false if no such line exists
    fn update_line(&mut self, id: &LineIdentifier, name: &str, color: &str) -> bool;

    /// Returns false if no such line exists
    fn delete_line(&mut self, id: &LineIdentifier) -> bool;
}

/// Raw segment rows, keyed by line
///
/// Rows are matched by value: removing a segment removes the row with the
/// same endpoints and length.
pub trait SectionRepository: Send + Sync {
    fn sections_of(&self, line: &LineIdentifier) -> Vec<Segment>;

    fn save_section(&mut self, line: &LineIdentifier, segment: Segment);

    /// Returns false if the line had no such row
    fn remove_section(&mut self, line: &LineIdentifier, segment: &Segment) -> bool;

    fn remove_sections_of(&mut self, line: &LineIdentifier);
}

/// Everything the line service persists through
pub trait SubwayStore: StationRegistry + LineRepository + SectionRepository {}

impl<T: StationRegistry + LineRepository + SectionRepository> SubwayStore for T {}
