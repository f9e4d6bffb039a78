// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ArrivalWindow, BoundingBox, Coordinate, GeofenceEvent, MatchedPair, PlannedRoute, RecognizedFields,
    RouteMetrics, SampleOutcome, ScanItem, ScanStatus, SequencedStop, SortOutcome, Stop, TransitionKind,
    Zone, ZoneGeometry,
};
pub use requests::{PlanRouteRequest, SampleRequest, SortMatchRequest, StartSessionRequest};
pub use responses::{
    ErrorResponse, HealthResponse, PlanRouteResponse, SampleResponse, SessionEventsResponse,
    SortMatchResponse, StartSessionResponse, StopSessionResponse,
};
