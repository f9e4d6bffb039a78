//! Rota Algo - Route planning and field operations service for the Rota courier app
//!
//! This library provides the algorithmic core used by the Rota courier app:
//! nearest-neighbor route sequencing with traffic-aware travel metrics,
//! per-driver geofence monitoring with debounced entry/exit events, and
//! multi-pass pairing of scanned boxes with scanned invoices during manual
//! parcel sorting.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{distance_km, MonitorConfig, MonitorSession, Sequencer, SortMatcher};
pub use crate::models::{
    Coordinate, GeofenceEvent, MatchedPair, PlannedRoute, RouteMetrics, ScanItem, SortOutcome,
    Stop, Zone, ZoneGeometry,
};
