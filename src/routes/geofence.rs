use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::core::geofence::MonitorSession;
use crate::models::{
    ErrorResponse, SampleRequest, SampleResponse, SessionEventsResponse, StartSessionRequest,
    StartSessionResponse, StopSessionResponse,
};
use crate::routes::AppState;

/// Configure geofence session endpoints
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/geofence/sessions", web::post().to(start_session))
        .route("/geofence/sessions/{id}/sample", web::post().to(process_sample))
        .route("/geofence/sessions/{id}/events", web::get().to(session_events))
        .route("/geofence/sessions/{id}", web::delete().to(stop_session));
}

/// Open a monitoring session for a driver
///
/// POST /api/v1/geofence/sessions
///
/// Zone definitions are validated before the session starts; a malformed
/// zone rejects the whole request so it cannot silently drop out of
/// monitoring.
async fn start_session(
    state: web::Data<AppState>,
    req: web::Json<StartSessionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request = req.into_inner();

    match MonitorSession::new(request.zones, state.monitor_config.clone()) {
        Ok(session) => {
            session.start();
            let session_id = Uuid::new_v4();
            let zone_count = session.zone_count();
            state
                .sessions
                .lock()
                .await
                .insert(session_id, Arc::new(session));

            tracing::info!(
                "Opened geofence session {} for driver {} ({} zones)",
                session_id,
                request.driver_id,
                zone_count
            );

            HttpResponse::Ok().json(StartSessionResponse {
                session_id,
                zone_count,
            })
        }
        Err(e) => {
            tracing::info!("Rejected zone configuration: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid zone configuration".to_string(),
                message: e.to_string(),
                status_code: 400,
            })
        }
    }
}

/// Feed one position sample to an open session
///
/// POST /api/v1/geofence/sessions/{id}/sample
///
/// Samples must be posted in chronological order; the timestamp defaults to
/// the server clock when the client omits it.
async fn process_sample(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SampleRequest>,
) -> impl Responder {
    let session_id = path.into_inner();

    if !req.position.is_valid() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid coordinates".to_string(),
            message: "latitude must be within [-90, 90] and longitude within [-180, 180]"
                .to_string(),
            status_code: 400,
        });
    }

    let session = state.sessions.lock().await.get(&session_id).cloned();
    match session {
        Some(session) => {
            let request = req.into_inner();
            let timestamp = request.timestamp.unwrap_or_else(chrono::Utc::now);
            let outcome = session.process_sample(request.position, timestamp);

            if !outcome.events.is_empty() {
                tracing::info!(
                    "Session {} emitted {} event(s)",
                    session_id,
                    outcome.events.len()
                );
            }

            HttpResponse::Ok().json(SampleResponse {
                active_zones: outcome.active_zones,
                events: outcome.events,
            })
        }
        None => unknown_session(session_id),
    }
}

/// Recent events retained by a session
///
/// GET /api/v1/geofence/sessions/{id}/events
async fn session_events(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();

    let session = state.sessions.lock().await.get(&session_id).cloned();
    match session {
        Some(session) => HttpResponse::Ok().json(SessionEventsResponse {
            events: session.recent_events(),
        }),
        None => unknown_session(session_id),
    }
}

/// Stop a session and release its state
///
/// DELETE /api/v1/geofence/sessions/{id}
async fn stop_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();

    let session = state.sessions.lock().await.remove(&session_id);
    match session {
        Some(session) => {
            session.stop();
            tracing::info!("Closed geofence session {}", session_id);
            HttpResponse::Ok().json(StopSessionResponse {
                session_id,
                stopped: true,
            })
        }
        None => unknown_session(session_id),
    }
}

fn unknown_session(session_id: Uuid) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Unknown session".to_string(),
        message: format!("no monitoring session with id {}", session_id),
        status_code: 404,
    })
}
