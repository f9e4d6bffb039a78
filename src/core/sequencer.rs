use chrono::{DateTime, Utc};

use crate::core::geo;
use crate::core::traffic::TrafficSchedule;
use crate::models::{Coordinate, PlannedRoute, RouteMetrics, SequencedStop, Stop};

/// Travel and cost assumptions used when deriving route metrics
#[derive(Debug, Clone)]
pub struct RoutingParams {
    /// Average urban driving speed in km/h
    pub urban_speed_kmh: f64,
    /// Handover time spent at each stop, in minutes
    pub per_stop_service_min: f64,
    /// Flat contingency added to the total time, in minutes
    pub buffer_min: f64,
    /// Average fuel consumption in km per liter
    pub consumption_km_per_liter: f64,
    /// Fuel price per liter, in the local currency
    pub fuel_price_per_liter: f64,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            urban_speed_kmh: 28.0,
            per_stop_service_min: 5.0,
            buffer_min: 10.0,
            consumption_km_per_liter: 10.0,
            fuel_price_per_liter: 5.89,
        }
    }
}

/// Route sequencing engine
///
/// Orders delivery stops with a nearest-neighbor heuristic over great-circle
/// distances and derives the aggregate travel metrics for the result. Pure
/// over its inputs; the engine never mutates the stops it is given.
#[derive(Debug, Clone)]
pub struct Sequencer {
    params: RoutingParams,
    schedule: TrafficSchedule,
}

impl Sequencer {
    pub fn new(params: RoutingParams, schedule: TrafficSchedule) -> Self {
        Self { params, schedule }
    }

    pub fn with_defaults() -> Self {
        Self {
            params: RoutingParams::default(),
            schedule: TrafficSchedule::default(),
        }
    }

    /// Order stops into a route starting from `origin`
    ///
    /// Nearest-neighbor heuristic: repeatedly visit the closest unvisited
    /// stop. Distance ties keep the stop that appeared first in the input,
    /// so the result is deterministic. When `include_return` is set the leg
    /// back to the origin is counted in the metrics but not numbered as a
    /// stop. An empty input produces an empty route with zero metrics.
    pub fn plan(
        &self,
        origin: Coordinate,
        stops: Vec<Stop>,
        include_return: bool,
        departure: DateTime<Utc>,
    ) -> PlannedRoute {
        if stops.is_empty() {
            return PlannedRoute::empty(origin, include_return);
        }

        let order = self.nearest_neighbor_order(origin, &stops);
        let ordered: Vec<Stop> = order.iter().map(|&index| stops[index].clone()).collect();
        let metrics = self.compute_metrics(origin, &ordered, include_return, departure);

        let sequenced = ordered
            .into_iter()
            .enumerate()
            .map(|(i, stop)| SequencedStop {
                stop,
                position: i + 1,
                eta_minutes: metrics.per_stop_eta_min.get(i).copied().unwrap_or(0.0),
            })
            .collect();

        PlannedRoute {
            origin,
            stops: sequenced,
            include_return,
            metrics,
        }
    }

    /// Derive travel metrics for an already-ordered sequence of stops
    ///
    /// - `totalDistanceKm` is the sum of consecutive great-circle legs
    ///   (plus the return leg when requested).
    /// - `totalTimeMin` = travel at urban speed scaled by the traffic factor
    ///   of the departure hour, plus per-stop service time, plus the buffer.
    /// - Per-stop ETA is the cumulative scaled travel plus the service time
    ///   of every stop already served; the factor is looked up once at the
    ///   departure hour and applied to all legs.
    pub fn compute_metrics(
        &self,
        origin: Coordinate,
        ordered: &[Stop],
        include_return: bool,
        departure: DateTime<Utc>,
    ) -> RouteMetrics {
        if ordered.is_empty() {
            return RouteMetrics::default();
        }

        let factor = self.schedule.factor_for(departure);
        let minutes_per_km = 60.0 / self.params.urban_speed_kmh;

        let mut total_distance_km = 0.0;
        let mut elapsed_min = 0.0;
        let mut per_stop_eta_min = Vec::with_capacity(ordered.len());
        let mut current = origin;

        for stop in ordered {
            let leg_km = geo::distance_km(current, stop.coordinate);
            total_distance_km += leg_km;
            elapsed_min += leg_km * minutes_per_km * factor;
            per_stop_eta_min.push(elapsed_min);
            // Service happens after arrival, so it delays the next stop only
            elapsed_min += self.params.per_stop_service_min;
            current = stop.coordinate;
        }

        if include_return {
            total_distance_km += geo::distance_km(current, origin);
        }

        let travel_min = total_distance_km * minutes_per_km * factor;
        let service_min = ordered.len() as f64 * self.params.per_stop_service_min;
        let total_time_min = travel_min + service_min + self.params.buffer_min;

        let fuel_liters = total_distance_km / self.params.consumption_km_per_liter;
        let estimated_cost = fuel_liters * self.params.fuel_price_per_liter;

        RouteMetrics {
            total_distance_km,
            total_time_min,
            fuel_liters,
            estimated_cost,
            per_stop_eta_min,
        }
    }

    fn nearest_neighbor_order(&self, origin: Coordinate, stops: &[Stop]) -> Vec<usize> {
        let mut order = Vec::with_capacity(stops.len());
        let mut used = vec![false; stops.len()];
        let mut current = origin;

        while order.len() < stops.len() {
            let mut best: Option<(usize, f64)> = None;
            for (i, stop) in stops.iter().enumerate() {
                if used[i] {
                    continue;
                }
                let d = geo::distance_km(current, stop.coordinate);
                // Strict < keeps the earliest input stop on equal distances
                let better = match best {
                    Some((_, best_d)) => d < best_d,
                    None => true,
                };
                if better {
                    best = Some((i, d));
                }
            }

            match best {
                Some((i, _)) => {
                    used[i] = true;
                    current = stops[i].coordinate;
                    order.push(i);
                }
                None => break,
            }
        }

        order
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
