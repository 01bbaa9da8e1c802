//! # Path
//!
//! A path is a polyline of waypoints in the field frame. Each waypoint
//! carries the driving options used on the segment leaving it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::geom::Vector2d;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Driving options for a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathOptions {
    /// Units: inches/second
    pub max_speed_ins: f64,

    /// Units: inches/second^2
    pub accel_ins2: f64,

    /// Pure pursuit lookahead distance.
    ///
    /// Units: inches
    pub lookahead_in: f64,
}

/// A point on the path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Units: inches
    pub position: Vector2d,

    pub options: PathOptions,
}

/// A path to be followed by the robot.
#[derive(Debug, Clone, Serialize)]
pub struct Path {
    waypoints: Vec<Waypoint>,

    /// Distance along the path at each waypoint.
    ///
    /// Units: inches
    cumulative_in: Vec<f64>,

    /// If true the robot drives the path backwards.
    reverse: bool,
}

/// The robot's progress along a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathProgress {
    /// Index of the segment closest to the robot, the segment starting at
    /// waypoint `segment`.
    pub segment: usize,

    /// Closest point on the path.
    pub closest_point: Vector2d,

    /// Distance from the robot to the closest point.
    ///
    /// Units: inches
    pub cross_track_in: f64,

    /// Distance along the path to the closest point.
    ///
    /// Units: inches
    pub distance_along_in: f64,

    /// Distance left along the path from the closest point to the end.
    ///
    /// Units: inches
    pub remaining_in: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("A path needs at least two waypoints, {0} were given")]
    NotEnoughWaypoints(usize),

    #[error("Waypoints {0} and {1} are at the same position")]
    ZeroLengthSegment(usize, usize),

    #[error("Waypoint {0} is not finite")]
    NonFiniteWaypoint(usize),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PathOptions {
    pub fn new(max_speed_ins: f64, accel_ins2: f64, lookahead_in: f64) -> Self {
        Self {
            max_speed_ins,
            accel_ins2,
            lookahead_in,
        }
    }
}

impl Waypoint {
    pub fn new(position: Vector2d, options: PathOptions) -> Self {
        Self { position, options }
    }
}

impl Path {
    /// Create a new forwards path through the given waypoints.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::NotEnoughWaypoints(waypoints.len()));
        }

        let mut cumulative_in = Vec::with_capacity(waypoints.len());
        cumulative_in.push(0.0);

        for (i, w) in waypoints.iter().enumerate() {
            if !w.position.x().is_finite() || !w.position.y().is_finite() {
                return Err(PathError::NonFiniteWaypoint(i));
            }

            if i > 0 {
                let len = waypoints[i - 1].position.distance(w.position);
                if len <= 0.0 {
                    return Err(PathError::ZeroLengthSegment(i - 1, i));
                }
                cumulative_in.push(cumulative_in[i - 1] + len);
            }
        }

        Ok(Self {
            waypoints,
            cumulative_in,
            reverse: false,
        })
    }

    /// Drive this path backwards.
    pub fn with_reverse_direction(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn start(&self) -> Vector2d {
        self.waypoints[0].position
    }

    /// Total length of the path.
    ///
    /// Units: inches
    pub fn length(&self) -> f64 {
        self.cumulative_in[self.cumulative_in.len() - 1]
    }

    /// Number of segments in the path.
    pub fn num_segments(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// Options in force on the given segment.
    pub fn options(&self, segment: usize) -> PathOptions {
        self.waypoints[segment.min(self.num_segments() - 1)].options
    }

    /// Find the point on the path closest to the given position. On a tie the
    /// earlier segment wins.
    pub fn progress(&self, position: Vector2d) -> PathProgress {
        let mut best: Option<PathProgress> = None;

        for seg in 0..self.num_segments() {
            let a = self.waypoints[seg].position;
            let b = self.waypoints[seg + 1].position;
            let ab = b - a;
            let seg_len = self.cumulative_in[seg + 1] - self.cumulative_in[seg];

            let t = ((position - a).dot(ab) / (seg_len * seg_len)).max(0.0).min(1.0);
            let closest_point = a + ab * t;
            let cross_track_in = position.distance(closest_point);

            let is_better = match best {
                Some(ref b) => cross_track_in < b.cross_track_in,
                None => true,
            };

            if is_better {
                let distance_along_in = self.cumulative_in[seg] + t * seg_len;
                best = Some(PathProgress {
                    segment: seg,
                    closest_point,
                    cross_track_in,
                    distance_along_in,
                    remaining_in: (self.length() - distance_along_in).max(0.0),
                });
            }
        }

        // A valid path always has at least one segment
        best.unwrap_or(PathProgress {
            segment: 0,
            closest_point: self.start(),
            cross_track_in: position.distance(self.start()),
            distance_along_in: 0.0,
            remaining_in: self.length(),
        })
    }

    /// The point at the given distance along the path.
    ///
    /// Distances beyond the end continue along the direction of the last
    /// segment, so a lookahead point never folds back onto the end point.
    pub fn point_at(&self, distance_in: f64) -> Vector2d {
        let distance_in = distance_in.max(0.0);
        let last_seg = self.num_segments() - 1;

        let seg = (0..self.num_segments())
            .find(|&s| distance_in <= self.cumulative_in[s + 1])
            .unwrap_or(last_seg);

        let a = self.waypoints[seg].position;
        let b = self.waypoints[seg + 1].position;
        let seg_len = self.cumulative_in[seg + 1] - self.cumulative_in[seg];

        a + (b - a) * ((distance_in - self.cumulative_in[seg]) / seg_len)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
