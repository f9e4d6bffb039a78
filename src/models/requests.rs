use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Coordinate, ScanItem, Stop, Zone};

/// Request to plan a delivery route
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlanRouteRequest {
    pub origin: Coordinate,
    #[validate(length(max = 200, message = "at most 200 stops per plan"))]
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(rename = "includeReturnToOrigin", default)]
    pub include_return: bool,
    #[serde(alias = "departure_time", rename = "departureTime", default)]
    pub departure_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// Request to open a geofence monitoring session for a driver
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StartSessionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "driver_id", rename = "driverId")]
    pub driver_id: String,
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// A single position sample for an open monitoring session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRequest {
    pub position: Coordinate,
    #[serde(default)]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

/// Request to pair scanned boxes with scanned invoices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortMatchRequest {
    #[serde(default)]
    pub boxes: Vec<ScanItem>,
    #[serde(default)]
    pub invoices: Vec<ScanItem>,
}
