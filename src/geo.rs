//! Geometry primitives for flight planning.
//!
//! Positions are (longitude, latitude) pairs treated as plane coordinates;
//! at the scale of the service area the curvature error is negligible.
//! Headings follow the convention 0° = east, 90° = north, counterclockwise,
//! quantized to multiples of 10 degrees.

/// The fixed distance covered by one fly move, in degrees.
pub const STEP_LENGTH: f64 = 0.00015;

/// A position as (longitude, latitude) coordinates.
///
/// Immutable value type; all arithmetic returns new positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Position {
    pub lng: f64,
    pub lat: f64,
}

impl Position {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = self.lng - other.lng;
        let dy = self.lat - other.lat;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether this position counts as arrived at `other`:
    /// strictly within one step length.
    pub fn is_close_to(&self, other: Position) -> bool {
        self.distance_to(other) < STEP_LENGTH
    }

    /// Bearing from this position toward `target`, quantized to the
    /// nearest multiple of 10 degrees in [0, 360).
    ///
    /// The due-north/south case (zero longitude delta) is handled
    /// explicitly so no division by zero can occur.
    pub fn heading_to(&self, target: Position) -> i32 {
        let dlng = target.lng - self.lng;
        let dlat = target.lat - self.lat;

        if dlng == 0.0 {
            return if dlat >= 0.0 { 90 } else { 270 };
        }

        // Acute angle relative to the east-west axis, rounded to 10°.
        let acute = (dlat / dlng).abs().atan().to_degrees();
        let angle = ((acute / 10.0).round() * 10.0) as i32;

        match (dlng >= 0.0, dlat >= 0.0) {
            (true, true) => angle,                // north-east quadrant
            (false, true) => 180 - angle,         // north-west
            (false, false) => 180 + angle,        // south-west
            (true, false) => (360 - angle) % 360, // south-east
        }
    }

    /// Position after moving exactly one step length along `heading`.
    ///
    /// Cardinal headings use exact arithmetic; everything else goes
    /// through trigonometry. `Hover` leaves the position unchanged.
    pub fn step(&self, heading: Heading) -> Position {
        let angle = match heading {
            Heading::Hover => return *self,
            Heading::Fly(a) => a,
        };

        match angle {
            0 => Position::new(self.lng + STEP_LENGTH, self.lat),
            90 => Position::new(self.lng, self.lat + STEP_LENGTH),
            180 => Position::new(self.lng - STEP_LENGTH, self.lat),
            270 => Position::new(self.lng, self.lat - STEP_LENGTH),
            a => {
                let rad = (a as f64).to_radians();
                Position::new(
                    self.lng + STEP_LENGTH * rad.cos(),
                    self.lat + STEP_LENGTH * rad.sin(),
                )
            }
        }
    }
}

/// A travel heading: either a flight bearing (a multiple of 10 degrees
/// in [0, 360)) or an in-place hover move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Fly(i32),
    Hover,
}

/// A line segment between two positions.
///
/// Used both for no-fly-zone boundary edges and for single-move probes.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub a: Position,
    pub b: Position,
}

impl Segment {
    pub fn new(a: Position, b: Position) -> Self {
        Self { a, b }
    }

    /// Whether this segment properly crosses `other`.
    ///
    /// Segments that only touch at an endpoint (adjacent polygon corners)
    /// do not count as crossing.
    pub fn crosses(&self, other: &Segment) -> bool {
        let d1 = orient(other.a, other.b, self.a);
        let d2 = orient(other.a, other.b, self.b);
        let d3 = orient(self.a, self.b, other.a);
        let d4 = orient(self.a, self.b, other.b);

        d1 * d2 < 0.0 && d3 * d4 < 0.0
    }
}

/// Signed area of the triangle (p, q, r): positive when r lies to the
/// left of the directed line p -> q.
#[inline]
fn orient(p: Position, q: Position, r: Position) -> f64 {
    (q.lng - p.lng) * (r.lat - p.lat) - (q.lat - p.lat) * (r.lng - p.lng)
}
