//! # Geometry primitives
//!
//! Planar vector and pose types used throughout the robot. Positions are in
//! inches, angles in radians measured anticlockwise from the field X axis.
//!
//! The robot frame has X pointing forwards and Y pointing to the robot's
//! left, so a positive bearing means "target is to the left".

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A 2D vector.
///
/// Units: inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2d(Vector2<f64>);

/// A position and heading, describing the robot or a target frame in the
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Position in the field frame.
    ///
    /// Units: inches
    pub position: Vector2d,

    /// Heading, the angle between the field X axis and the frame's X axis.
    ///
    /// Units: radians
    pub heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Vector2d {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Vector2::new(x, y))
    }

    /// Unit vector pointing along the given angle.
    pub fn from_angle(angle_rad: f64) -> Self {
        Self::new(angle_rad.cos(), angle_rad.sin())
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// Euclidian length of the vector.
    pub fn length(&self) -> f64 {
        self.0.norm()
    }

    /// Angle of the vector from the X axis, in the range `[-pi, pi]`.
    pub fn angle(&self) -> f64 {
        self.0[1].atan2(self.0[0])
    }

    /// Rotate the vector anticlockwise by the given angle.
    pub fn rotate(&self, angle_rad: f64) -> Self {
        Self(Rotation2::new(angle_rad) * self.0)
    }

    pub fn dot(&self, other: Vector2d) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn distance(&self, other: Vector2d) -> f64 {
        (self.0 - other.0).norm()
    }
}

impl Default for Vector2d {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<Vector2<f64>> for Vector2d {
    fn from(v: Vector2<f64>) -> Self {
        Self(v)
    }
}

impl Add for Vector2d {
    type Output = Vector2d;

    fn add(self, rhs: Vector2d) -> Vector2d {
        Vector2d(self.0 + rhs.0)
    }
}

impl Sub for Vector2d {
    type Output = Vector2d;

    fn sub(self, rhs: Vector2d) -> Vector2d {
        Vector2d(self.0 - rhs.0)
    }
}

impl Neg for Vector2d {
    type Output = Vector2d;

    fn neg(self) -> Vector2d {
        Vector2d(-self.0)
    }
}

impl Mul<f64> for Vector2d {
    type Output = Vector2d;

    fn mul(self, rhs: f64) -> Vector2d {
        Vector2d(self.0 * rhs)
    }
}

impl Pose {
    pub fn new(x: f64, y: f64, heading_rad: f64) -> Self {
        Self {
            position: Vector2d::new(x, y),
            heading_rad,
        }
    }

    pub fn position(&self) -> Vector2d {
        self.position
    }

    /// Unit vector pointing along the pose's heading.
    pub fn forward(&self) -> Vector2d {
        Vector2d::from_angle(self.heading_rad)
    }

    /// Express a field-frame point in this pose's frame.
    pub fn to_local(&self, field_point: Vector2d) -> Vector2d {
        (field_point - self.position).rotate(-self.heading_rad)
    }

    /// Express a point in this pose's frame in the field frame.
    pub fn to_field(&self, local_point: Vector2d) -> Vector2d {
        self.position + local_point.rotate(self.heading_rad)
    }

    /// Return a new pose moved by the given field-frame translation.
    pub fn translated(&self, delta: Vector2d) -> Self {
        Self {
            position: self.position + delta,
            heading_rad: self.heading_rad,
        }
    }

    /// Return the same position facing the opposite way.
    pub fn reversed(&self) -> Self {
        Self {
            position: self.position,
            heading_rad: util::maths::wrap_pi(self.heading_rad + std::f64::consts::PI),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_vec_near(a: Vector2d, b: Vector2d) {
        assert!(
            a.distance(b) < 1e-9,
            "expected {:?} to be near {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_vector_ops() {
        let a = Vector2d::new(3.0, 4.0);
        let b = Vector2d::new(-1.0, 2.0);

        assert_eq!(a.length(), 5.0);
        assert_vec_near(a + b, Vector2d::new(2.0, 6.0));
        assert_vec_near(a - b, Vector2d::new(4.0, 2.0));
        assert_vec_near(-b, Vector2d::new(1.0, -2.0));
        assert_vec_near(b * 2.0, Vector2d::new(-2.0, 4.0));
        assert_eq!(a.dot(b), 5.0);

        assert!((Vector2d::new(0.0, 1.0).angle() - FRAC_PI_2).abs() < 1e-12);
        assert!((Vector2d::new(-1.0, 0.0).angle() - PI).abs() < 1e-12);
        assert_vec_near(Vector2d::new(1.0, 0.0).rotate(FRAC_PI_2), Vector2d::new(0.0, 1.0));
    }

    #[test]
    fn test_pose_frames() {
        let pose = Pose::new(10.0, 5.0, FRAC_PI_2);

        // A point 20 in "north" of the robot, which faces north, is straight ahead
        let local = pose.to_local(Vector2d::new(10.0, 25.0));
        assert_vec_near(local, Vector2d::new(20.0, 0.0));

        // A point to the west is on the robot's left
        let local = pose.to_local(Vector2d::new(0.0, 5.0));
        assert_vec_near(local, Vector2d::new(0.0, 10.0));
        assert!(local.angle() > 0.0);

        // Round trip
        let p = Vector2d::new(-3.0, 7.5);
        assert_vec_near(pose.to_field(pose.to_local(p)), p);

        assert_vec_near(pose.forward(), Vector2d::new(0.0, 1.0));
    }

    #[test]
    fn test_pose_reversed_translated() {
        let pose = Pose::new(0.0, 0.0, 0.0);
        let rev = pose.reversed();
        assert!((rev.heading_rad - PI).abs() < 1e-12);
        assert_eq!(rev.position, pose.position);

        let moved = pose.translated(Vector2d::new(-120.0, 0.0));
        assert_vec_near(moved.position, Vector2d::new(-120.0, 0.0));
        assert_eq!(moved.heading_rad, 0.0);
    }
}
