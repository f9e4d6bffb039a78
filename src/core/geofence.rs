use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::core::geo;
use crate::models::{
    BoundingBox, Coordinate, GeofenceEvent, SampleOutcome, TransitionKind, Zone, ZoneGeometry,
};

/// Errors raised when validating zone configuration
///
/// Surfaced at session construction, before any monitoring starts, so a bad
/// zone cannot silently disable monitoring for the rest of the set.
#[derive(Debug, Error)]
pub enum ZoneConfigError {
    #[error("zone {id}: polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { id: String, count: usize },

    #[error("zone {id}: circle radius must be positive, got {radius_km}")]
    NonPositiveRadius { id: String, radius_km: f64 },

    #[error("zone {id}: coordinate outside valid latitude/longitude ranges")]
    CoordinateOutOfRange { id: String },
}

/// Tuning knobs for a monitoring session
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Suppression window for repeated (zone, transition) events, in seconds
    pub debounce_window_secs: i64,
    /// How many recent events the session retains for observability
    pub event_buffer_size: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            debounce_window_secs: 30,
            event_buffer_size: 20,
        }
    }
}

/// Validate a zone list the way the monitor will require it
pub fn validate_zones(zones: &[Zone]) -> Result<(), ZoneConfigError> {
    for zone in zones {
        match &zone.geometry {
            ZoneGeometry::Circle { center, radius_km } => {
                if *radius_km <= 0.0 {
                    return Err(ZoneConfigError::NonPositiveRadius {
                        id: zone.id.clone(),
                        radius_km: *radius_km,
                    });
                }
                if !center.is_valid() {
                    return Err(ZoneConfigError::CoordinateOutOfRange { id: zone.id.clone() });
                }
            }
            ZoneGeometry::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(ZoneConfigError::TooFewVertices {
                        id: zone.id.clone(),
                        count: vertices.len(),
                    });
                }
                if vertices.iter().any(|v| !v.is_valid()) {
                    return Err(ZoneConfigError::CoordinateOutOfRange { id: zone.id.clone() });
                }
            }
        }
    }
    Ok(())
}

/// A zone with its precomputed pre-filter box
#[derive(Debug, Clone)]
struct MonitoredZone {
    zone: Zone,
    bbox: BoundingBox,
}

#[derive(Debug, Default)]
struct SessionState {
    running: bool,
    seeded: bool,
    active: HashSet<String>,
    last_emitted: HashMap<(String, TransitionKind), DateTime<Utc>>,
    recent: VecDeque<GeofenceEvent>,
}

/// A geofence monitoring session for one driver
///
/// Owns all of its transition state, so independent sessions coexist safely.
/// Samples must be fed in chronological order for the transition and
/// debounce logic to hold; the internal mutex only guarantees that `stop`
/// cannot race an in-flight `process_sample`.
#[derive(Debug)]
pub struct MonitorSession {
    zones: Vec<MonitoredZone>,
    config: MonitorConfig,
    state: Mutex<SessionState>,
}

impl MonitorSession {
    /// Build a session over a validated zone set
    pub fn new(zones: Vec<Zone>, config: MonitorConfig) -> Result<Self, ZoneConfigError> {
        validate_zones(&zones)?;

        let zones = zones
            .into_iter()
            .map(|zone| {
                let bbox = match &zone.geometry {
                    ZoneGeometry::Circle { center, radius_km } => {
                        geo::bounding_box_around(*center, *radius_km)
                    }
                    ZoneGeometry::Polygon { vertices } => geo::bounding_box_of(vertices),
                };
                MonitoredZone { zone, bbox }
            })
            .collect();

        Ok(Self {
            zones,
            config,
            state: Mutex::new(SessionState::default()),
        })
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn is_running(&self) -> bool {
        self.lock_state().running
    }

    /// Begin a monitoring session with clean state
    pub fn start(&self) {
        let mut state = self.lock_state();
        *state = SessionState {
            running: true,
            ..SessionState::default()
        };
    }

    /// End the session, releasing all transition and debounce state
    ///
    /// Safe to call at any time; a subsequent `start` begins clean.
    pub fn stop(&self) {
        let mut state = self.lock_state();
        *state = SessionState::default();
    }

    /// Evaluate one position sample against every configured zone
    ///
    /// Returns the zones currently containing the position and any
    /// entry/exit events the sample triggered. The first sample after
    /// `start` seeds the membership set without emitting — entry is only
    /// ever detected as a transition. A transition whose (zone, kind) was
    /// already emitted inside the debounce window is suppressed; membership
    /// is still updated so state never diverges from geometry.
    pub fn process_sample(&self, position: Coordinate, now: DateTime<Utc>) -> SampleOutcome {
        let mut state = self.lock_state();
        if !state.running {
            tracing::debug!("position sample ignored: session not running");
            return SampleOutcome::empty();
        }

        let mut active_zones = Vec::new();
        let mut current = HashSet::new();
        for monitored in &self.zones {
            if Self::zone_contains(monitored, position) {
                active_zones.push(monitored.zone.id.clone());
                current.insert(monitored.zone.id.clone());
            }
        }

        if !state.seeded {
            state.seeded = true;
            state.active = current;
            return SampleOutcome {
                active_zones,
                events: Vec::new(),
            };
        }

        let debounce = Duration::seconds(self.config.debounce_window_secs);
        let mut events = Vec::new();

        for monitored in &self.zones {
            let zone_id = &monitored.zone.id;
            let was_inside = state.active.contains(zone_id);
            let is_inside = current.contains(zone_id);
            if was_inside == is_inside {
                continue;
            }

            let kind = if is_inside {
                TransitionKind::Enter
            } else {
                TransitionKind::Exit
            };

            let key = (zone_id.clone(), kind);
            let suppressed = state
                .last_emitted
                .get(&key)
                .map_or(false, |last| now.signed_duration_since(*last) < debounce);
            if suppressed {
                tracing::debug!("debounced {:?} for zone {}", kind, zone_id);
                continue;
            }

            let event = GeofenceEvent {
                kind,
                zone_id: zone_id.clone(),
                timestamp: now,
            };
            state.last_emitted.insert(key, now);
            while state.recent.len() >= self.config.event_buffer_size.max(1) {
                state.recent.pop_front();
            }
            state.recent.push_back(event.clone());
            events.push(event);
        }

        state.active = current;

        SampleOutcome {
            active_zones,
            events,
        }
    }

    /// The most recent events retained by the session, oldest first
    pub fn recent_events(&self) -> Vec<GeofenceEvent> {
        self.lock_state().recent.iter().cloned().collect()
    }

    fn zone_contains(monitored: &MonitoredZone, position: Coordinate) -> bool {
        if !geo::is_within_bounding_box(position, &monitored.bbox) {
            return false;
        }
        match &monitored.zone.geometry {
            ZoneGeometry::Circle { center, radius_km } => {
                geo::point_in_circle(position, *center, *radius_km)
            }
            ZoneGeometry::Polygon { vertices } => geo::point_in_polygon(position, vertices),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
