use crate::models::{BoundingBox, Coordinate};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude (and of longitude at the equator)
const KM_PER_DEGREE: f64 = 111.0;

/// Calculate the great-circle (haversine) distance between two coordinates
///
/// # Returns
/// Distance in kilometers; always >= 0, symmetric in its arguments, and zero
/// for identical coordinates.
#[inline]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a_rad = a.lat.to_radians();
    let lat_b_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a_rad.cos() * lat_b_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Check whether a point lies within a circular zone
///
/// A non-positive radius never contains anything.
#[inline]
pub fn point_in_circle(point: Coordinate, center: Coordinate, radius_km: f64) -> bool {
    radius_km > 0.0 && distance_km(point, center) <= radius_km
}

/// Even-odd ray-casting containment test
///
/// Casts a ray from the point toward +longitude and counts edge crossings.
/// Fewer than 3 vertices never contain anything. Points exactly on an edge
/// are inherently ambiguous under ray casting; callers should not rely on
/// exact-edge membership.
pub fn point_in_polygon(point: Coordinate, vertices: &[Coordinate]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];

        // Edge straddles the point's latitude; lat equality makes the
        // straddle test false, so the division below is never by zero
        if (vi.lat > point.lat) != (vj.lat > point.lat) {
            let crossing_lng = (vj.lng - vi.lng) * (point.lat - vi.lat) / (vj.lat - vi.lat) + vi.lng;
            if point.lng < crossing_lng {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Calculate a bounding box around a center point
///
/// Much faster than exact containment for pre-filtering.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
pub fn bounding_box_around(center: Coordinate, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;
    let lng_delta = radius_km / (KM_PER_DEGREE * center.lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: center.lat - lat_delta,
        max_lat: center.lat + lat_delta,
        min_lng: center.lng - lng_delta,
        max_lng: center.lng + lng_delta,
    }
}

/// Calculate the bounding box enclosing a set of polygon vertices
///
/// An empty vertex list produces an inverted box that contains nothing.
pub fn bounding_box_of(vertices: &[Coordinate]) -> BoundingBox {
    let mut bbox = BoundingBox {
        min_lat: f64::INFINITY,
        max_lat: f64::NEG_INFINITY,
        min_lng: f64::INFINITY,
        max_lng: f64::NEG_INFINITY,
    };

    for vertex in vertices {
        bbox.min_lat = bbox.min_lat.min(vertex.lat);
        bbox.max_lat = bbox.max_lat.max(vertex.lat);
        bbox.min_lng = bbox.min_lng.min(vertex.lng);
        bbox.max_lng = bbox.max_lng.max(vertex.lng);
    }

    bbox
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: Coordinate, bbox: &BoundingBox) -> bool {
    point.lat >= bbox.min_lat
        && point.lat <= bbox.max_lat
        && point.lng >= bbox.min_lng
        && point.lng <= bbox.max_lng
}
