//! Subway data models, error types, and collaborator traits.

pub mod station;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use station::{Line, Station};
pub use traits::{LineRepository, SectionRepository, StationRegistry, SubwayStore};
pub use types::{Result, TopologyError};
