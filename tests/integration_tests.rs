// Integration tests for Rota Algo

use chrono::{DateTime, Duration, TimeZone, Utc};
use rota_algo::core::geofence::{MonitorConfig, MonitorSession};
use rota_algo::core::report::render_sort_report;
use rota_algo::core::{distance_km, Sequencer, SortMatcher};
use rota_algo::models::{
    Coordinate, RecognizedFields, ScanItem, ScanStatus, Stop, TransitionKind, Zone, ZoneGeometry,
};

fn create_stop(id: &str, lat: f64, lng: f64) -> Stop {
    Stop {
        id: id.to_string(),
        address: format!("Rua {} 100", id),
        coordinate: Coordinate::new(lat, lng),
        arrival_window: None,
    }
}

fn create_item(id: &str, fields: RecognizedFields) -> ScanItem {
    ScanItem {
        id: id.to_string(),
        recognized_fields: fields,
        status: ScanStatus::Ready,
    }
}

fn departure() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap()
}

#[test]
fn test_end_to_end_route_planning() {
    let sequencer = Sequencer::with_defaults();
    let origin = Coordinate::new(-23.5505, -46.6333);

    let stops = vec![
        create_stop("paulista", -23.5610, -46.6558),
        create_stop("liberdade", -23.5400, -46.6400),
        create_stop("pinheiros", -23.5670, -46.7020),
        create_stop("moema", -23.6010, -46.6630),
    ];

    let route = sequencer.plan(origin, stops, true, departure());

    // All stops present, numbered 1..=4
    assert_eq!(route.stops.len(), 4);
    for (i, stop) in route.stops.iter().enumerate() {
        assert_eq!(stop.position, i + 1);
    }

    // The closest stop to the origin comes first
    let first = &route.stops[0];
    for other in &route.stops[1..] {
        assert!(
            distance_km(origin, first.stop.coordinate)
                <= distance_km(origin, other.stop.coordinate)
        );
    }

    // Metrics are populated and consistent
    assert!(route.metrics.total_distance_km > 0.0);
    assert!(route.metrics.total_time_min > 0.0);
    assert!(route.metrics.fuel_liters > 0.0);
    assert!(route.metrics.estimated_cost > 0.0);
    assert_eq!(route.metrics.per_stop_eta_min.len(), 4);
}

#[test]
fn test_route_planning_visits_closer_stop_first() {
    let sequencer = Sequencer::with_defaults();
    let origin = Coordinate::new(-23.5505, -46.6333);

    let a = Coordinate::new(-23.5610, -46.6558);
    let b = Coordinate::new(-23.5400, -46.6400);
    let stops = vec![create_stop("a", a.lat, a.lng), create_stop("b", b.lat, b.lng)];

    let route = sequencer.plan(origin, stops, false, departure());

    let expected_first = if distance_km(origin, a) < distance_km(origin, b) { "a" } else { "b" };
    assert_eq!(route.stops[0].stop.id, expected_first);
}

#[test]
fn test_driver_journey_through_zones() {
    let hub = Coordinate::new(-23.5505, -46.6333);
    let zones = vec![
        Zone {
            id: "hub".to_string(),
            name: "Distribution hub".to_string(),
            geometry: ZoneGeometry::Circle { center: hub, radius_km: 1.0 },
        },
        Zone {
            id: "center".to_string(),
            name: "City center".to_string(),
            geometry: ZoneGeometry::Polygon {
                vertices: vec![
                    Coordinate::new(-23.60, -46.70),
                    Coordinate::new(-23.60, -46.55),
                    Coordinate::new(-23.45, -46.55),
                    Coordinate::new(-23.45, -46.70),
                ],
            },
        },
    ];

    let session = MonitorSession::new(zones, MonitorConfig::default()).unwrap();
    session.start();

    let t0 = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
    let far_away = Coordinate::new(-23.30, -46.30);

    // Begin far from everything
    let seed = session.process_sample(far_away, t0);
    assert!(seed.active_zones.is_empty());
    assert!(seed.events.is_empty());

    // Drive to the hub: inside both the circle and the city polygon
    let arrived = session.process_sample(hub, t0 + Duration::minutes(5));
    assert_eq!(arrived.active_zones, vec!["hub".to_string(), "center".to_string()]);
    assert_eq!(arrived.events.len(), 2);
    assert!(arrived.events.iter().all(|e| e.kind == TransitionKind::Enter));

    // Leave the hub but stay in the city
    let nearby = Coordinate::new(-23.52, -46.60);
    let left_hub = session.process_sample(nearby, t0 + Duration::minutes(10));
    assert_eq!(left_hub.active_zones, vec!["center".to_string()]);
    assert_eq!(left_hub.events.len(), 1);
    assert_eq!(left_hub.events[0].kind, TransitionKind::Exit);
    assert_eq!(left_hub.events[0].zone_id, "hub");

    // The session retains the full event history, in order
    let recent = session.recent_events();
    assert_eq!(recent.len(), 3);
    assert!(recent[0].timestamp <= recent[1].timestamp);
}

#[test]
fn test_boundary_jitter_emits_a_single_enter() {
    let hub = Coordinate::new(-23.5505, -46.6333);
    let zone = Zone {
        id: "hub".to_string(),
        name: "Distribution hub".to_string(),
        geometry: ZoneGeometry::Circle { center: hub, radius_km: 1.0 },
    };

    let session = MonitorSession::new(vec![zone], MonitorConfig::default()).unwrap();
    session.start();

    let t0 = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
    let outside = Coordinate::new(-23.30, -46.30);

    session.process_sample(outside, t0);
    session.process_sample(hub, t0 + Duration::seconds(15));
    session.process_sample(outside, t0 + Duration::seconds(17));
    // Second crossing 5 seconds after the first: debounced
    session.process_sample(hub, t0 + Duration::seconds(20));

    let enters = session
        .recent_events()
        .iter()
        .filter(|e| e.kind == TransitionKind::Enter)
        .count();
    assert_eq!(enters, 1);
}

#[test]
fn test_bad_zone_fails_before_monitoring_starts() {
    let zones = vec![
        Zone {
            id: "good".to_string(),
            name: "Good zone".to_string(),
            geometry: ZoneGeometry::Circle {
                center: Coordinate::new(-23.5505, -46.6333),
                radius_km: 2.0,
            },
        },
        Zone {
            id: "bad".to_string(),
            name: "Degenerate polygon".to_string(),
            geometry: ZoneGeometry::Polygon {
                vertices: vec![Coordinate::new(-23.5, -46.6)],
            },
        },
    ];

    assert!(MonitorSession::new(zones, MonitorConfig::default()).is_err());
}

#[test]
fn test_end_to_end_sort_session() {
    let matcher = SortMatcher::new();

    let boxes = vec![
        create_item(
            "box-1",
            RecognizedFields {
                order_code: Some("PED104".to_string()),
                ..Default::default()
            },
        ),
        create_item(
            "box-2",
            RecognizedFields {
                sub_route_code: Some("rota-b2".to_string()),
                ..Default::default()
            },
        ),
        create_item(
            "box-3",
            RecognizedFields {
                postal_code: Some("04038-001".to_string()),
                ..Default::default()
            },
        ),
        create_item("box-4", RecognizedFields::default()),
    ];

    let invoices = vec![
        create_item(
            "inv-1",
            RecognizedFields {
                postal_code: Some("04038001".to_string()),
                recipient: Some("Ana Costa".to_string()),
                ..Default::default()
            },
        ),
        create_item(
            "inv-2",
            RecognizedFields {
                order_code: Some("PED104".to_string()),
                recipient: Some("Bruno Lima".to_string()),
                address: Some("Av. Paulista 900".to_string()),
                ..Default::default()
            },
        ),
        create_item(
            "inv-3",
            RecognizedFields {
                sub_route_code: Some("ROTA-B2".to_string()),
                ..Default::default()
            },
        ),
        create_item("inv-5", RecognizedFields::default()),
    ];

    let outcome = matcher.pair(boxes, invoices);

    // Three confident pairs, by decreasing criterion confidence
    assert_eq!(outcome.pairs.len(), 3);
    assert_eq!(outcome.pairs[0].box_item.id, "box-1");
    assert_eq!(outcome.pairs[0].invoice.id, "inv-2");
    assert_eq!(outcome.pairs[0].match_score, 50);
    assert_eq!(outcome.pairs[1].box_item.id, "box-2");
    assert_eq!(outcome.pairs[1].invoice.id, "inv-3");
    assert_eq!(outcome.pairs[1].match_score, 40);
    assert_eq!(outcome.pairs[2].box_item.id, "box-3");
    assert_eq!(outcome.pairs[2].invoice.id, "inv-1");
    assert_eq!(outcome.pairs[2].match_score, 30);

    // Leftovers are reported, never dropped
    assert_eq!(outcome.unmatched_boxes.len(), 1);
    assert_eq!(outcome.unmatched_boxes[0].id, "box-4");
    assert_eq!(outcome.unmatched_invoices.len(), 1);
    assert_eq!(outcome.unmatched_invoices[0].id, "inv-5");

    // Tags are unique and colors assigned
    let tags: Vec<&str> = outcome.pairs.iter().map(|p| p.visual_tag.as_str()).collect();
    assert_eq!(tags.len(), 3);
    assert!(tags.iter().all(|t| t.len() >= 10));
    assert!(outcome.pairs.iter().all(|p| p.tag_color.starts_with('#')));

    // The handoff report mentions every pair and leftover
    let report = render_sort_report(&outcome);
    assert!(report.contains("3 paired | 1 boxes left | 1 invoices left"));
    assert!(report.contains("recipient: Bruno Lima"));
    assert!(report.contains("  - box-4"));
    assert!(report.contains("  - inv-5"));
}

#[test]
fn test_plan_output_feeds_monitoring() {
    // A planned route's stops can seed the zones a driver is monitored in
    let sequencer = Sequencer::with_defaults();
    let origin = Coordinate::new(-23.5505, -46.6333);
    let stops = vec![
        create_stop("paulista", -23.5610, -46.6558),
        create_stop("liberdade", -23.5400, -46.6400),
    ];

    let route = sequencer.plan(origin, stops, false, departure());

    let zones: Vec<Zone> = route
        .stops
        .iter()
        .map(|s| Zone {
            id: s.stop.id.clone(),
            name: s.stop.address.clone(),
            geometry: ZoneGeometry::Circle {
                center: s.stop.coordinate,
                radius_km: 0.3,
            },
        })
        .collect();

    let session = MonitorSession::new(zones, MonitorConfig::default()).unwrap();
    session.start();

    let t0 = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
    session.process_sample(origin, t0);

    // Arriving at the first planned stop enters exactly its zone
    let first_stop = route.stops[0].stop.coordinate;
    let outcome = session.process_sample(first_stop, t0 + Duration::minutes(12));
    assert_eq!(outcome.active_zones, vec![route.stops[0].stop.id.clone()]);
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(outcome.events[0].kind, TransitionKind::Enter);
}
