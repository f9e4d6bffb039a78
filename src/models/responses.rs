use serde::{Deserialize, Serialize};

use crate::models::domain::{GeofenceEvent, MatchedPair, PlannedRoute, ScanItem};

/// Response for the route planning endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRouteResponse {
    pub route: PlannedRoute,
}

/// Response when a monitoring session is opened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: uuid::Uuid,
    #[serde(rename = "zoneCount")]
    pub zone_count: usize,
}

/// Response for a processed position sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleResponse {
    #[serde(rename = "activeZones")]
    pub active_zones: Vec<String>,
    pub events: Vec<GeofenceEvent>,
}

/// Response when a monitoring session is stopped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: uuid::Uuid,
    pub stopped: bool,
}

/// Recent events retained by a monitoring session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEventsResponse {
    pub events: Vec<GeofenceEvent>,
}

/// Response for the sort matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortMatchResponse {
    pub pairs: Vec<MatchedPair>,
    #[serde(rename = "unmatchedBoxes")]
    pub unmatched_boxes: Vec<ScanItem>,
    #[serde(rename = "unmatchedInvoices")]
    pub unmatched_invoices: Vec<ScanItem>,
    #[serde(rename = "totalItems")]
    pub total_items: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
