use serde::{Deserialize, Serialize};

/// A 2-D coordinate (longitude, latitude for map data).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ring without its closing vertex, if it repeats the first one
fn open_ring(ring: &[Point]) -> &[Point] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Shoelace signed area. Positive for counter-clockwise rings.
/// Works on open or closed rings.
pub fn signed_area(ring: &[Point]) -> f64 {
    let ring = open_ring(ring);
    if ring.len() < 3 {
        return 0.0;
    }
    let cross: f64 = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    cross / 2.0
}

pub fn area(ring: &[Point]) -> f64 {
    signed_area(ring).abs()
}

/// Arithmetic mean of the distinct vertices
fn vertex_mean(ring: &[Point]) -> Option<Point> {
    let ring = open_ring(ring);
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let (sx, sy) = ring
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Area-weighted centroid of a simple polygon ring.
///
/// A zero-area ring (collinear points, fewer than three vertices) falls
/// back to the vertex mean. An empty ring has no centroid.
pub fn polygon_centroid(ring: &[Point]) -> Option<Point> {
    let a = signed_area(ring);
    if a == 0.0 || !a.is_finite() {
        return vertex_mean(ring);
    }

    let open = open_ring(ring);
    let (cx, cy) = open
        .iter()
        .zip(open.iter().cycle().skip(1))
        .fold((0.0, 0.0), |(cx, cy), (p, q)| {
            let cross = p.x * q.y - q.x * p.y;
            (cx + (p.x + q.x) * cross, cy + (p.y + q.y) * cross)
        });

    let centroid = Point::new(cx / (6.0 * a), cy / (6.0 * a));
    if centroid.x.is_finite() && centroid.y.is_finite() {
        Some(centroid)
    } else {
        vertex_mean(ring)
    }
}

/// Centroid of the largest-area member of a multipolygon, given each
/// member's outer ring. Ties go to the first member.
pub fn multipolygon_centroid(polygons: &[Vec<Point>]) -> Option<Point> {
    let mut largest: Option<(&Vec<Point>, f64)> = None;
    for ring in polygons {
        let a = area(ring);
        match largest {
            Some((_, best)) if best >= a => {}
            _ => largest = Some((ring, a)),
        }
    }
    largest.and_then(|(ring, _)| polygon_centroid(ring))
}
