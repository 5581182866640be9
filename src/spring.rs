//! Hookean springs connecting two mesh points.

use crate::float::Float;
use crate::geometry::Coordinates;
use crate::vec::Vec2;

/// A spring between mesh points `a` and `b`.
///
/// The rest length is fixed at the distance between the endpoints when the
/// spring is created, so a freshly built mesh starts in equilibrium.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    pub a: usize,
    pub b: usize,
    pub rest_length: f64,
}

impl Spring {
    pub fn new(a: usize, b: usize, rest_length: f64) -> Self {
        Spring { a, b, rest_length }
    }

    /// Create a spring whose rest length is the current distance between
    /// the two endpoints.
    pub fn at_rest<P, Q>(a: usize, pa: &P, b: usize, pb: &Q) -> Self
    where
        P: Coordinates<Scalar = f64>,
        Q: Coordinates<Scalar = f64>,
    {
        Spring::new(a, b, crate::geometry::distance(pa, pb))
    }

    /// Force this spring exerts on endpoint `a`. Endpoint `b` receives the
    /// negation.
    ///
    /// Magnitude is `spring_constant * (length - rest_length)` along the
    /// spring, clamped to `maximum_range` either way.
    pub fn force_on_a<P, Q>(&self, pa: &P, pb: &Q, spring_constant: f64, maximum_range: f64) -> Vec2<f64>
    where
        P: Coordinates<Scalar = f64>,
        Q: Coordinates<Scalar = f64>,
    {
        let delta = pb.to_vec2() - pa.to_vec2();
        let length = delta.length();
        if length.is_near_zero(1e-10) {
            return Vec2::zero();
        }
        let magnitude = (spring_constant * (length - self.rest_length))
            .clamp(-maximum_range, maximum_range);
        delta.scale(magnitude / length)
    }

    /// The point on the other end of the spring, if `index` is an endpoint.
    pub fn other(&self, index: usize) -> Option<usize> {
        if self.a == index {
            Some(self.b)
        } else if self.b == index {
            Some(self.a)
        } else {
            None
        }
    }

    /// Rescale the rest length for an axis-independent stretch of the mesh,
    /// assuming the spring currently lies along `direction`.
    ///
    /// Exact for springs at rest; approximate for deformed ones.
    pub fn scale_rest_length(&mut self, direction: Vec2<f64>, sx: f64, sy: f64) {
        let unit = direction.normalize();
        if unit == Vec2::zero() {
            return;
        }
        self.rest_length *= unit.component_mul(Vec2::new(sx, sy)).length();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Point;

    #[test]
    fn at_rest_has_zero_force() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        let spring = Spring::at_rest(0, &a, 1, &b);
        assert_eq!(spring.rest_length, 5.0);
        assert_eq!(spring.force_on_a(&a, &b, 8.0, 500.0), Vec2::zero());
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let spring = Spring::new(0, 1, 1.0);
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 0.0);
        let f = spring.force_on_a(&a, &b, 2.0, 500.0);
        assert!((f.x - 4.0).abs() < 1e-12);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn compressed_spring_pushes_apart() {
        let spring = Spring::new(0, 1, 10.0);
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 4.0);
        let f = spring.force_on_a(&a, &b, 1.0, 500.0);
        assert!((f.y + 6.0).abs() < 1e-12);
    }

    #[test]
    fn force_is_clamped_to_maximum_range() {
        let spring = Spring::new(0, 1, 0.0);
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10_000.0, 0.0);
        let f = spring.force_on_a(&a, &b, 8.0, 500.0);
        assert!((f.length() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn coincident_endpoints_have_no_direction() {
        let spring = Spring::new(0, 1, 2.0);
        let p = Point::new(1.0, 1.0);
        assert_eq!(spring.force_on_a(&p, &p, 8.0, 500.0), Vec2::zero());
    }

    #[test]
    fn other_endpoint() {
        let spring = Spring::new(3, 7, 1.0);
        assert_eq!(spring.other(3), Some(7));
        assert_eq!(spring.other(7), Some(3));
        assert_eq!(spring.other(4), None);
    }

    #[test]
    fn scale_rest_length_per_axis() {
        let mut horizontal = Spring::new(0, 1, 10.0);
        horizontal.scale_rest_length(Vec2::new(10.0, 0.0), 2.0, 3.0);
        assert!((horizontal.rest_length - 20.0).abs() < 1e-12);

        let mut vertical = Spring::new(0, 1, 10.0);
        vertical.scale_rest_length(Vec2::new(0.0, -10.0), 2.0, 3.0);
        assert!((vertical.rest_length - 30.0).abs() < 1e-12);
    }
}
