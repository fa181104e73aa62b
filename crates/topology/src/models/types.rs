//! Error types for the topology engine.

use crate::identifiers::StationIdentifier;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("Segment length must be positive, got {0}")]
    InvalidSegment(i64),

    #[error("Segment length {0} is out of range")]
    LengthOverflow(i64),

    #[error("Segment is missing an up or down station")]
    NullEndpoint,

    #[error("Segments do not both contain the connecting station {0}")]
    DisjointSegments(StationIdentifier),

    #[error("Neither {up} nor {down} is part of the line")]
    DisconnectedSegment {
        up: StationIdentifier,
        down: StationIdentifier,
    },

    #[error("Stations {up} and {down} are already registered on the line")]
    DuplicateSegment {
        up: StationIdentifier,
        down: StationIdentifier,
    },

    #[error("Inserted segment ({inserted}) must be shorter than the segment it splits ({existing})")]
    SegmentTooLong { existing: u32, inserted: u32 },

    #[error("Station {0} is not part of the line")]
    StationNotInLine(StationIdentifier),

    #[error("Cannot remove a station from a line with a single segment")]
    SingleSegmentLine,

    #[error("Line has no start station")]
    NoStartStation,

    #[error("Line has no end station")]
    NoEndStation,

    #[error("No segment continues the line after station {0}")]
    BrokenChain(StationIdentifier),

    #[error("Walk reached {reached} of {expected} stations")]
    UnreachableSegments { reached: usize, expected: usize },

    #[error("A line needs at least one segment")]
    EmptyTopology,
}

impl TopologyError {
    /// Errors that can only come from a malformed segment collection, never
    /// from a rejected edit.
    pub fn is_consistency_failure(&self) -> bool {
        matches!(
            self,
            Self::NoStartStation
                | Self::NoEndStation
                | Self::BrokenChain(_)
                | Self::UnreachableSegments { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TopologyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistency_failures() {
        assert!(TopologyError::NoStartStation.is_consistency_failure());
        assert!(TopologyError::BrokenChain(StationIdentifier::new("s1")).is_consistency_failure());
        assert!(!TopologyError::SingleSegmentLine.is_consistency_failure());
        assert!(!TopologyError::EmptyTopology.is_consistency_failure());
    }

    #[test]
    fn test_error_messages() {
        let err = TopologyError::SegmentTooLong {
            existing: 5,
            inserted: 7,
        };
        assert_eq!(
            err.to_string(),
            "Inserted segment (7) must be shorter than the segment it splits (5)"
        );
    }
}
