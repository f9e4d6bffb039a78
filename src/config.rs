use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::geofence::MonitorConfig;
use crate::core::sequencer::RoutingParams;
use crate::core::traffic::{TrafficBand, TrafficSchedule};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub routing: RoutingSettings,
    #[serde(default)]
    pub geofence: GeofenceSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Travel assumptions and traffic bands for route metrics
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingSettings {
    #[serde(default = "default_urban_speed_kmh")]
    pub urban_speed_kmh: f64,
    #[serde(default = "default_per_stop_service_min")]
    pub per_stop_service_min: f64,
    #[serde(default = "default_buffer_min")]
    pub buffer_min: f64,
    #[serde(default = "default_consumption_km_per_liter")]
    pub consumption_km_per_liter: f64,
    #[serde(default = "default_fuel_price_per_liter")]
    pub fuel_price_per_liter: f64,
    #[serde(default = "default_traffic_bands")]
    pub traffic_bands: Vec<TrafficBandConfig>,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            urban_speed_kmh: default_urban_speed_kmh(),
            per_stop_service_min: default_per_stop_service_min(),
            buffer_min: default_buffer_min(),
            consumption_km_per_liter: default_consumption_km_per_liter(),
            fuel_price_per_liter: default_fuel_price_per_liter(),
            traffic_bands: default_traffic_bands(),
        }
    }
}

fn default_urban_speed_kmh() -> f64 { 28.0 }
fn default_per_stop_service_min() -> f64 { 5.0 }
fn default_buffer_min() -> f64 { 10.0 }
fn default_consumption_km_per_liter() -> f64 { 10.0 }
fn default_fuel_price_per_liter() -> f64 { 5.89 }

/// One configured traffic band; start > end wraps midnight
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficBandConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub factor: f64,
}

fn default_traffic_bands() -> Vec<TrafficBandConfig> {
    vec![
        TrafficBandConfig { start_hour: 7, end_hour: 10, factor: 1.35 },
        TrafficBandConfig { start_hour: 12, end_hour: 14, factor: 1.15 },
        TrafficBandConfig { start_hour: 17, end_hour: 20, factor: 1.45 },
        TrafficBandConfig { start_hour: 22, end_hour: 5, factor: 0.85 },
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeofenceSettings {
    #[serde(default = "default_debounce_window_secs")]
    pub debounce_window_secs: i64,
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
}

impl Default for GeofenceSettings {
    fn default() -> Self {
        Self {
            debounce_window_secs: default_debounce_window_secs(),
            event_buffer_size: default_event_buffer_size(),
        }
    }
}

fn default_debounce_window_secs() -> i64 { 30 }
fn default_event_buffer_size() -> usize { 20 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ROTA_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with ROTA_)
            // e.g., ROTA_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ROTA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ROTA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

impl RoutingSettings {
    /// Engine parameters derived from this configuration
    pub fn params(&self) -> RoutingParams {
        RoutingParams {
            urban_speed_kmh: self.urban_speed_kmh,
            per_stop_service_min: self.per_stop_service_min,
            buffer_min: self.buffer_min,
            consumption_km_per_liter: self.consumption_km_per_liter,
            fuel_price_per_liter: self.fuel_price_per_liter,
        }
    }

    pub fn schedule(&self) -> TrafficSchedule {
        TrafficSchedule::new(
            self.traffic_bands
                .iter()
                .map(|band| TrafficBand::new(band.start_hour, band.end_hour, band.factor))
                .collect(),
        )
    }
}

impl GeofenceSettings {
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            debounce_window_secs: self.debounce_window_secs,
            event_buffer_size: self.event_buffer_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routing_settings() {
        let routing = RoutingSettings::default();
        assert_eq!(routing.urban_speed_kmh, 28.0);
        assert_eq!(routing.per_stop_service_min, 5.0);
        assert_eq!(routing.buffer_min, 10.0);
        assert_eq!(routing.traffic_bands.len(), 4);
    }

    #[test]
    fn test_default_geofence_settings() {
        let geofence = GeofenceSettings::default();
        assert_eq!(geofence.debounce_window_secs, 30);
        assert_eq!(geofence.event_buffer_size, 20);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_schedule_from_settings() {
        let routing = RoutingSettings::default();
        let schedule = routing.schedule();
        assert_eq!(schedule.factor_at(8), 1.35);
        assert_eq!(schedule.factor_at(15), 1.0);
    }
}
