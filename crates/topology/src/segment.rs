//! A directed, positive-length edge between two stations.

use std::fmt;

use crate::models::station::Station;
use crate::models::types::{Result, TopologyError};

/// One station-to-station section of a line.
///
/// Segments are values: two segments with the same endpoints and length are
/// the same segment, whatever row they were loaded from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SegmentParts")
)]
pub struct Segment {
    up: Station,
    down: Station,
    length: u32,
}

/// Unchecked wire form, validated through [`Segment::new`] on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SegmentParts {
    up: Station,
    down: Station,
    length: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<SegmentParts> for Segment {
    type Error = TopologyError;

    fn try_from(parts: SegmentParts) -> Result<Self> {
        Self::new(parts.up, parts.down, parts.length)
    }
}

impl Segment {
    pub fn new(up: Station, down: Station, length: u32) -> Result<Self> {
        Self::with_length(up, down, i64::from(length))
    }

    /// Build a segment from endpoints that may not have resolved.
    pub fn from_endpoints(up: Option<Station>, down: Option<Station>, length: u32) -> Result<Self> {
        match (up, down) {
            (Some(up), Some(down)) => Self::new(up, down, length),
            _ => Err(TopologyError::NullEndpoint),
        }
    }

    fn with_length(up: Station, down: Station, length: i64) -> Result<Self> {
        if length <= 0 {
            return Err(TopologyError::InvalidSegment(length));
        }
        let length = u32::try_from(length).map_err(|_| TopologyError::LengthOverflow(length))?;

        Ok(Self { up, down, length })
    }

    pub fn up(&self) -> &Station {
        &self.up
    }

    pub fn down(&self) -> &Station {
        &self.down
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// The rest of `self` once `inserted` has been carved out of it.
    ///
    /// `inserted` must share its up or its down station with `self`. The
    /// caller checks that it is strictly shorter; a non-positive remainder
    /// is reported as [`TopologyError::InvalidSegment`].
    pub fn split(&self, inserted: &Segment) -> Result<Segment> {
        let remainder = i64::from(self.length) - i64::from(inserted.length);

        if self.is_down_station(&inserted.down) {
            return Self::with_length(self.up.clone(), inserted.up.clone(), remainder);
        }

        Self::with_length(inserted.down.clone(), self.down.clone(), remainder)
    }

    /// Merge two segments meeting at `connecting` into one.
    pub fn combine(&self, other: &Segment, connecting: &Station) -> Result<Segment> {
        if !self.has_station(connecting) || !other.has_station(connecting) {
            return Err(TopologyError::DisjointSegments(connecting.id.clone()));
        }

        let length = i64::from(self.length) + i64::from(other.length);
        if self.is_down_station(connecting) {
            return Self::with_length(self.up.clone(), other.down.clone(), length);
        }

        Self::with_length(other.up.clone(), self.down.clone(), length)
    }

    pub fn is_up_station(&self, station: &Station) -> bool {
        self.up == *station
    }

    pub fn is_down_station(&self, station: &Station) -> bool {
        self.down == *station
    }

    pub fn has_station(&self, station: &Station) -> bool {
        self.is_up_station(station) || self.is_down_station(station)
    }

    /// `other`'s up station is one of our endpoints.
    pub fn has_up_station_of(&self, other: &Segment) -> bool {
        self.has_station(&other.up)
    }

    /// `other`'s down station is one of our endpoints.
    pub fn has_down_station_of(&self, other: &Segment) -> bool {
        self.has_station(&other.down)
    }

    pub fn has_any_station_of(&self, other: &Segment) -> bool {
        self.has_up_station_of(other) || self.has_down_station_of(other)
    }

    /// Same up station, or same down station, as `other`.
    pub fn shares_up_or_down_with(&self, other: &Segment) -> bool {
        self.is_up_station(&other.up) || self.is_down_station(&other.down)
    }

    pub fn is_not_longer_than(&self, other: &Segment) -> bool {
        self.length <= other.length
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.up.id, self.down.id, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str) -> Station {
        Station::new(id, id.to_uppercase())
    }

    fn segment(up: &str, down: &str, length: u32) -> Segment {
        Segment::new(station(up), station(down), length).unwrap()
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = Segment::new(station("a"), station("b"), 0).unwrap_err();
        assert_eq!(err, TopologyError::InvalidSegment(0));
    }

    #[test]
    fn test_missing_endpoint_rejected() {
        let err = Segment::from_endpoints(Some(station("a")), None, 5).unwrap_err();
        assert_eq!(err, TopologyError::NullEndpoint);

        let ok = Segment::from_endpoints(Some(station("a")), Some(station("b")), 5).unwrap();
        assert_eq!(ok, segment("a", "b", 5));
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(segment("a", "b", 5), segment("a", "b", 5));
        assert_ne!(segment("a", "b", 5), segment("a", "b", 6));
        assert_ne!(segment("a", "b", 5), segment("b", "a", 5));
    }

    #[test]
    fn test_split_sharing_up_station() {
        let existing = segment("a", "c", 7);
        let inserted = segment("a", "b", 3);

        assert_eq!(existing.split(&inserted).unwrap(), segment("b", "c", 4));
    }

    #[test]
    fn test_split_sharing_down_station() {
        let existing = segment("a", "c", 5);
        let inserted = segment("b", "c", 3);

        assert_eq!(existing.split(&inserted).unwrap(), segment("a", "b", 2));
    }

    #[test]
    fn test_split_without_remainder_fails() {
        let existing = segment("a", "c", 5);
        let inserted = segment("a", "b", 5);

        assert_eq!(
            existing.split(&inserted).unwrap_err(),
            TopologyError::InvalidSegment(0)
        );

        let longer = segment("a", "b", 8);
        assert_eq!(
            existing.split(&longer).unwrap_err(),
            TopologyError::InvalidSegment(-3)
        );
    }

    #[test]
    fn test_combine_either_order() {
        let first = segment("a", "b", 5);
        let second = segment("b", "c", 3);
        let b = station("b");

        assert_eq!(first.combine(&second, &b).unwrap(), segment("a", "c", 8));
        assert_eq!(second.combine(&first, &b).unwrap(), segment("a", "c", 8));
    }

    #[test]
    fn test_combine_overflow() {
        let first = segment("a", "b", u32::MAX);
        let second = segment("b", "c", 1);

        let err = first.combine(&second, &station("b")).unwrap_err();
        assert_eq!(err, TopologyError::LengthOverflow(i64::from(u32::MAX) + 1));
        assert_eq!(err.to_string(), "Segment length 4294967296 is out of range");
    }

    #[test]
    fn test_combine_disjoint() {
        let first = segment("a", "b", 5);
        let second = segment("c", "d", 3);

        let err = first.combine(&second, &station("b")).unwrap_err();
        assert_eq!(err, TopologyError::DisjointSegments(station("b").id));
    }

    #[test]
    fn test_combine_then_split_round_trip() {
        let first = segment("a", "b", 5);
        let second = segment("b", "c", 3);

        let combined = first.combine(&second, &station("b")).unwrap();
        assert_eq!(combined.split(&first).unwrap(), second);
        assert_eq!(combined.split(&second).unwrap(), first);
    }

    #[test]
    fn test_predicates() {
        let s = segment("a", "b", 5);

        assert!(s.has_station(&station("a")));
        assert!(!s.has_station(&station("c")));
        assert!(s.has_any_station_of(&segment("b", "c", 1)));
        assert!(!s.has_any_station_of(&segment("c", "d", 1)));
        assert!(s.shares_up_or_down_with(&segment("a", "c", 1)));
        assert!(s.shares_up_or_down_with(&segment("c", "b", 1)));
        assert!(!s.shares_up_or_down_with(&segment("b", "c", 1)));
        assert!(s.is_not_longer_than(&segment("x", "y", 5)));
        assert!(!s.is_not_longer_than(&segment("x", "y", 4)));
    }
}
