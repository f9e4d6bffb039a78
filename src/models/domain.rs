use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Helper to check the coordinate is within WGS84 ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A delivery destination to be visited on a route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub address: String,
    pub coordinate: Coordinate,
    #[serde(rename = "arrivalWindow", default)]
    pub arrival_window: Option<ArrivalWindow>,
}

/// Optional arrival-window metadata attached to a stop
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArrivalWindow {
    #[serde(rename = "opensAt")]
    pub opens_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "closesAt")]
    pub closes_at: chrono::DateTime<chrono::Utc>,
}

/// A stop with its assigned position and estimated arrival, produced by sequencing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencedStop {
    #[serde(flatten)]
    pub stop: Stop,
    /// 1-based visiting position
    pub position: usize,
    #[serde(rename = "etaMinutes")]
    pub eta_minutes: f64,
}

/// An ordered route with its derived metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedRoute {
    pub origin: Coordinate,
    pub stops: Vec<SequencedStop>,
    #[serde(rename = "includeReturnToOrigin")]
    pub include_return: bool,
    pub metrics: RouteMetrics,
}

impl PlannedRoute {
    /// Empty route for a plan request with no stops — distinguishable from
    /// "no route computed yet" on the consumer side
    pub fn empty(origin: Coordinate, include_return: bool) -> Self {
        Self {
            origin,
            stops: Vec::new(),
            include_return,
            metrics: RouteMetrics::default(),
        }
    }
}

/// Aggregate travel metrics, recomputed whenever the route changes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteMetrics {
    #[serde(rename = "totalDistanceKm")]
    pub total_distance_km: f64,
    #[serde(rename = "totalTimeMin")]
    pub total_time_min: f64,
    #[serde(rename = "fuelLiters")]
    pub fuel_liters: f64,
    #[serde(rename = "estimatedCost")]
    pub estimated_cost: f64,
    #[serde(rename = "perStopEtaMin")]
    pub per_stop_eta_min: Vec<f64>,
}

/// A monitored geographic zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub geometry: ZoneGeometry,
}

/// Zone geometry — the variant guarantees the data its kind needs is present
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum ZoneGeometry {
    Circle {
        center: Coordinate,
        #[serde(rename = "radiusKm")]
        radius_km: f64,
    },
    Polygon {
        vertices: Vec<Coordinate>,
    },
}

/// Zone entry/exit transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransitionKind {
    Enter,
    Exit,
}

/// Emitted when a driver crosses a zone boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeofenceEvent {
    pub kind: TransitionKind,
    #[serde(rename = "zoneId")]
    pub zone_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Result of processing one position sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleOutcome {
    #[serde(rename = "activeZones")]
    pub active_zones: Vec<String>,
    pub events: Vec<GeofenceEvent>,
}

impl SampleOutcome {
    pub fn empty() -> Self {
        Self {
            active_zones: Vec::new(),
            events: Vec::new(),
        }
    }
}

/// Recognition lifecycle of a scanned item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanStatus {
    Pending,
    Processing,
    Ready,
    Error,
}

impl Default for ScanStatus {
    // Items posted to the sorter have already been through recognition
    fn default() -> Self {
        ScanStatus::Ready
    }
}

/// Text fields extracted by the recognition pipeline — any field may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognizedFields {
    #[serde(rename = "orderCode", default)]
    pub order_code: Option<String>,
    #[serde(rename = "shipmentCode", default)]
    pub shipment_code: Option<String>,
    #[serde(rename = "subRouteCode", default)]
    pub sub_route_code: Option<String>,
    #[serde(rename = "postalCode", default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A scanned box or invoice with its recognized text fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanItem {
    pub id: String,
    #[serde(rename = "recognizedFields", default)]
    pub recognized_fields: RecognizedFields,
    #[serde(default)]
    pub status: ScanStatus,
}

impl ScanItem {
    /// Helper to check the item finished recognition and can be matched
    pub fn ready(&self) -> bool {
        self.status == ScanStatus::Ready
    }
}

/// A box/invoice pairing produced by the sort matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPair {
    pub id: uuid::Uuid,
    #[serde(rename = "box")]
    pub box_item: ScanItem,
    pub invoice: ScanItem,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    #[serde(rename = "matchedBy")]
    pub matched_by: Vec<String>,
    #[serde(rename = "visualTag")]
    pub visual_tag: String,
    #[serde(rename = "tagColor")]
    pub tag_color: String,
}

/// Complete result of a sort session — every input item appears in exactly
/// one of the three lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortOutcome {
    pub pairs: Vec<MatchedPair>,
    #[serde(rename = "unmatchedBoxes")]
    pub unmatched_boxes: Vec<ScanItem>,
    #[serde(rename = "unmatchedInvoices")]
    pub unmatched_invoices: Vec<ScanItem>,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}
