// Route exports
pub mod geofence;
pub mod planner;
pub mod sorting;

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::core::geofence::{MonitorConfig, MonitorSession};
use crate::core::{Sequencer, SortMatcher};
use crate::models::HealthResponse;

/// Application state shared across all handlers
///
/// Engines are stateless and shared; live geofence sessions are keyed by the
/// id handed out when they were opened.
#[derive(Clone)]
pub struct AppState {
    pub sequencer: Arc<Sequencer>,
    pub sorter: Arc<SortMatcher>,
    pub monitor_config: MonitorConfig,
    pub sessions: Arc<tokio::sync::Mutex<HashMap<Uuid, Arc<MonitorSession>>>>,
}

impl AppState {
    pub fn new(sequencer: Sequencer, sorter: SortMatcher, monitor_config: MonitorConfig) -> Self {
        Self {
            sequencer: Arc::new(sequencer),
            sorter: Arc::new(sorter),
            monitor_config,
            sessions: Arc::new(tokio::sync::Mutex::new(HashMap::new())),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(planner::configure)
            .configure(geofence::configure)
            .configure(sorting::configure),
    );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
