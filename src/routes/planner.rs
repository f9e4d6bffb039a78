use std::collections::HashSet;

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{ErrorResponse, PlanRouteRequest, PlanRouteResponse};
use crate::routes::AppState;

/// Configure route planning endpoints
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/routes/plan", web::post().to(plan_route));
}

/// Plan a delivery route
///
/// POST /api/v1/routes/plan
///
/// Request body:
/// ```json
/// {
///   "origin": { "lat": -23.5505, "lng": -46.6333 },
///   "stops": [{ "id": "string", "address": "string", "coordinate": {...} }],
///   "includeReturnToOrigin": false,
///   "departureTime": "2024-06-03T12:00:00Z"
/// }
/// ```
async fn plan_route(
    state: web::Data<AppState>,
    req: web::Json<PlanRouteRequest>,
) -> impl Responder {
    // Validate request shape
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for plan request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if !req.origin.is_valid() || req.stops.iter().any(|stop| !stop.coordinate.is_valid()) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid coordinates".to_string(),
            message: "latitude must be within [-90, 90] and longitude within [-180, 180]"
                .to_string(),
            status_code: 400,
        });
    }

    // Stop ids must be unique within a route
    {
        let mut seen = HashSet::new();
        if let Some(duplicate) = req.stops.iter().find(|stop| !seen.insert(stop.id.as_str())) {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Duplicate stop id".to_string(),
                message: format!("stop id {} appears more than once", duplicate.id),
                status_code: 400,
            });
        }
    }

    let request = req.into_inner();
    let departure = request.departure_time.unwrap_or_else(chrono::Utc::now);

    tracing::info!(
        "Planning route with {} stops (return leg: {})",
        request.stops.len(),
        request.include_return
    );

    let route = state
        .sequencer
        .plan(request.origin, request.stops, request.include_return, departure);

    tracing::debug!(
        "Planned {:.1} km over {} stops in {:.0} min",
        route.metrics.total_distance_km,
        route.stops.len(),
        route.metrics.total_time_min
    );

    HttpResponse::Ok().json(PlanRouteResponse { route })
}
