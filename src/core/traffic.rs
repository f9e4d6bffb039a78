use chrono::Timelike;

/// A time-of-day band with its travel-time multiplier
///
/// Hours use `[start, end)` semantics; `start_hour > end_hour` means the band
/// wraps midnight (e.g. 22–5 covers 22:00 through 04:59).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficBand {
    pub start_hour: u32,
    pub end_hour: u32,
    pub factor: f64,
}

impl TrafficBand {
    pub fn new(start_hour: u32, end_hour: u32, factor: f64) -> Self {
        Self { start_hour, end_hour, factor }
    }

    /// Check whether an hour of day falls inside this band
    #[inline]
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            // Non-wrapping band; start == end is a degenerate band matching nothing
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// Ordered lookup table of traffic bands
///
/// Bands are expected not to overlap; the first matching band wins. Hours
/// outside every band get a neutral 1.0 multiplier.
#[derive(Debug, Clone)]
pub struct TrafficSchedule {
    bands: Vec<TrafficBand>,
}

impl TrafficSchedule {
    pub fn new(bands: Vec<TrafficBand>) -> Self {
        Self { bands }
    }

    /// Multiplier for a given hour of day (0-23)
    pub fn factor_at(&self, hour: u32) -> f64 {
        self.bands
            .iter()
            .find(|band| band.contains(hour))
            .map(|band| band.factor)
            .unwrap_or(1.0)
    }

    /// Multiplier for the hour of a departure timestamp
    pub fn factor_for(&self, at: chrono::DateTime<chrono::Utc>) -> f64 {
        self.factor_at(at.hour())
    }
}

impl Default for TrafficSchedule {
    fn default() -> Self {
        Self::new(vec![
            // Morning peak
            TrafficBand::new(7, 10, 1.35),
            // Lunch
            TrafficBand::new(12, 14, 1.15),
            // Evening peak
            TrafficBand::new(17, 20, 1.45),
            // Late night, wraps midnight
            TrafficBand::new(22, 5, 0.85),
        ])
    }
}
