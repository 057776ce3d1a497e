//! Static zone map: no-fly-zone boundary edges and detour landmarks.
//!
//! Built once from the data service's GeoJSON documents and shared by
//! reference across the real flight and every probe simulation. Polygon
//! identity is discarded at construction; only the flattened edge set
//! matters for collision testing.

use crate::geo::{Position, Segment};

/// A named detour way-point.
#[derive(Clone, Debug)]
pub struct Landmark {
    pub name: String,
    pub position: Position,
}

/// Immutable obstacle model for the whole planning run.
#[derive(Clone, Debug)]
pub struct ZoneMap {
    edges: Vec<Segment>,
    landmarks: Vec<Landmark>,
}

impl ZoneMap {
    /// Build the map from no-fly-zone polygon rings and landmark points.
    ///
    /// The home position is always appended as a landmark so the landmark
    /// set is never empty and a stranded drone can at least divert home.
    pub fn new(rings: &[Vec<Position>], mut landmarks: Vec<Landmark>, home: Position) -> Self {
        let mut edges = Vec::new();
        for ring in rings {
            for pair in ring.windows(2) {
                edges.push(Segment::new(pair[0], pair[1]));
            }
        }

        landmarks.push(Landmark {
            name: "home".to_string(),
            position: home,
        });

        Self { edges, landmarks }
    }

    /// Total number of boundary edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Whether the straight segment from `from` to `to` crosses any
    /// no-fly-zone boundary edge. O(E) over all edges.
    pub fn blocks_direct_route(&self, from: Position, to: Position) -> bool {
        let probe = Segment::new(from, to);
        self.edges.iter().any(|edge| probe.crosses(edge))
    }

    /// The landmark directly reachable from `from` that lies closest to
    /// `destination`, or `None` when no landmark is reachable.
    pub fn closest_landmark_towards(
        &self,
        from: Position,
        destination: Position,
    ) -> Option<Position> {
        self.landmarks
            .iter()
            .map(|lm| lm.position)
            .filter(|&p| !self.blocks_direct_route(from, p))
            .min_by(|a, b| {
                destination
                    .distance_to(*a)
                    .partial_cmp(&destination.distance_to(*b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_map(landmarks: Vec<Landmark>) -> ZoneMap {
        // A vertical wall at lng = 0.5 spanning lat 0..1.
        let ring = vec![
            Position::new(0.5, 0.0),
            Position::new(0.5, 1.0),
            Position::new(0.501, 1.0),
            Position::new(0.501, 0.0),
            Position::new(0.5, 0.0),
        ];
        ZoneMap::new(&[ring], landmarks, Position::new(0.0, 0.5))
    }

    #[test]
    fn open_segment_is_not_blocked() {
        let map = wall_map(Vec::new());
        assert!(!map.blocks_direct_route(
            Position::new(0.0, 2.0),
            Position::new(1.0, 2.0)
        ));
    }

    #[test]
    fn segment_through_wall_is_blocked() {
        let map = wall_map(Vec::new());
        assert!(map.blocks_direct_route(
            Position::new(0.0, 0.5),
            Position::new(1.0, 0.5)
        ));
    }

    #[test]
    fn home_is_always_a_landmark() {
        let map = wall_map(Vec::new());
        assert_eq!(map.landmarks().len(), 1);
        assert_eq!(map.landmarks()[0].name, "home");
    }

    #[test]
    fn closest_reachable_landmark_wins() {
        let landmarks = vec![
            Landmark {
                name: "near-but-walled".to_string(),
                position: Position::new(0.9, 0.5),
            },
            Landmark {
                name: "above-the-wall".to_string(),
                position: Position::new(0.4, 1.5),
            },
        ];
        let map = wall_map(landmarks);

        // From the west side, the landmark behind the wall is unreachable;
        // the detour point above the wall is the best reachable choice.
        let chosen = map
            .closest_landmark_towards(Position::new(0.0, 0.5), Position::new(1.0, 0.5))
            .unwrap();
        assert_eq!(chosen, Position::new(0.4, 1.5));
    }

    #[test]
    fn no_reachable_landmark_is_none() {
        // Box the start position in completely.
        let ring = vec![
            Position::new(-1.0, -1.0),
            Position::new(-1.0, 1.0),
            Position::new(1.0, 1.0),
            Position::new(1.0, -1.0),
            Position::new(-1.0, -1.0),
        ];
        let map = ZoneMap::new(&[ring], Vec::new(), Position::new(5.0, 5.0));
        assert_eq!(
            map.closest_landmark_towards(Position::new(0.0, 0.0), Position::new(5.0, 5.0)),
            None
        );
    }
}
