// Core engine exports
pub mod geo;
pub mod geofence;
pub mod report;
pub mod sequencer;
pub mod sorting;
pub mod traffic;

pub use geo::{distance_km, point_in_circle, point_in_polygon};
pub use geofence::{validate_zones, MonitorConfig, MonitorSession, ZoneConfigError};
pub use report::render_sort_report;
pub use sequencer::{RoutingParams, Sequencer};
pub use sorting::SortMatcher;
pub use traffic::{TrafficBand, TrafficSchedule};
