//! # subway-topology
//!
//! Segment-topology engine for subway lines.
//!
//! A line is a chain of station-to-station segments. The engine keeps that
//! chain a single simple path while segments are inserted (splitting an
//! existing segment when needed) and stations are removed (merging the two
//! segments around them), and reports exactly which segment rows changed.
//!
//! ## Features
//!
//! - **No I/O**: the engine works on plain segment collections
//! - **Minimal deltas**: diff two snapshots into rows to create and delete
//! - **Pluggable storage**: implement the collaborator traits for your backend
//! - **serde** (optional): derive `Serialize`/`Deserialize` for the data model
//!
//! ## Example
//!
//! ```
//! use subway_topology::prelude::*;
//!
//! let mut store = InMemoryStore::new();
//! let sillim = store.register_station("Sillim");
//! let bongcheon = store.register_station("Bongcheon");
//! let snu = store.register_station("Seoul Nat'l Univ.");
//!
//! let mut service = LineService::new(store);
//! let line = service
//!     .create_line(LineRequest {
//!         name: "Line 2".into(),
//!         color: "green".into(),
//!         up_station_id: sillim.id().clone(),
//!         down_station_id: snu.id().clone(),
//!         distance: 10,
//!     })
//!     .unwrap();
//!
//! // Bongcheon lies between the two: the 10-long segment is split.
//! let delta = service
//!     .add_section(
//!         &line.line.id,
//!         SectionRequest {
//!             up_station_id: sillim.id().clone(),
//!             down_station_id: bongcheon.id().clone(),
//!             distance: 4,
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(delta.to_delete.len(), 1);
//! assert_eq!(delta.to_create.len(), 2);
//!
//! let view = service.find_line(&line.line.id).unwrap();
//! assert_eq!(view.stations, vec![sillim, bongcheon, snu]);
//! ```

pub mod identifiers;
pub mod models;
pub mod provider;
pub mod segment;
pub mod service;
pub mod topology;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{station::*, traits::*, types::*};
    pub use crate::provider::InMemoryStore;
    pub use crate::segment::Segment;
    pub use crate::service::{LineRequest, LineService, LineView, SectionRequest, ServiceError};
    pub use crate::topology::{SegmentDelta, Topology};
}

pub use prelude::*;
