//! Fundamental geometric types for landmark placement.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Position on the image measured in pixels.
///
/// Screen convention applies: `x` grows to the right and `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate, increasing downward.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector in screen coordinates.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean distance to another point in pixels.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }

    /// Vector from `origin` to this point, flipped into a y-up frame.
    #[must_use]
    pub fn relative_to(self, origin: Point) -> Vector2<f64> {
        let delta = self.to_vector() - origin.to_vector();
        Vector2::new(delta.x, -delta.y)
    }

    /// Return the point shifted by the given pixel offsets.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

impl From<[f64; 2]> for Point {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(value: Point) -> Self {
        [value.x, value.y]
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use strapx::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Signed angle rotating `from` onto `to`, counter-clockwise positive, in `(-pi, pi]`.
#[must_use]
pub fn signed_angle(from: &Vector2<f64>, to: &Vector2<f64>) -> f64 {
    from.perp(to).atan2(from.dot(to))
}

/// The three markers a user places on the guitar image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Landmark {
    /// Primary strap button, usually the bottom/heel button.
    ButtonA,
    /// Centre of mass of the instrument.
    CenterOfMass,
    /// Secondary strap button, usually the top/horn button.
    ButtonB,
}

impl Landmark {
    /// All landmarks in their marker order.
    pub const ALL: [Landmark; 3] = [Landmark::ButtonA, Landmark::CenterOfMass, Landmark::ButtonB];

    /// Short label drawn on the marker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Landmark::ButtonA => "B1",
            Landmark::CenterOfMass => "COM",
            Landmark::ButtonB => "B2",
        }
    }
}

/// Pixel positions of the three landmarks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmarks {
    /// Primary strap button.
    pub button_a: Point,
    /// Centre of mass.
    pub center_of_mass: Point,
    /// Secondary strap button.
    pub button_b: Point,
}

impl Landmarks {
    /// Create a landmark set from its three positions.
    #[must_use]
    pub const fn new(button_a: Point, center_of_mass: Point, button_b: Point) -> Self {
        Self {
            button_a,
            center_of_mass,
            button_b,
        }
    }

    /// Position of one landmark.
    #[must_use]
    pub fn get(&self, landmark: Landmark) -> Point {
        match landmark {
            Landmark::ButtonA => self.button_a,
            Landmark::CenterOfMass => self.center_of_mass,
            Landmark::ButtonB => self.button_b,
        }
    }

    /// Mutable access to one landmark.
    pub fn get_mut(&mut self, landmark: Landmark) -> &mut Point {
        match landmark {
            Landmark::ButtonA => &mut self.button_a,
            Landmark::CenterOfMass => &mut self.center_of_mass,
            Landmark::ButtonB => &mut self.button_b,
        }
    }

    /// Pixel distance between the two strap buttons.
    #[must_use]
    pub fn button_span(&self) -> f64 {
        self.button_a.distance(self.button_b)
    }
}
