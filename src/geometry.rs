//! Coordinate capability traits and the generic algorithms built on them.
//!
//! Anything exposing two Cartesian axes can take part in distance,
//! bounding-box and nearest-neighbour queries: owned [`Vec2`] values and
//! the borrowed views handed out by a mesh alike.

use crate::float::Float;
use crate::vec::Vec2;

/// Read access to a 2D Cartesian coordinate.
pub trait Coordinates {
    /// The scalar type of both axes.
    type Scalar: Float;

    fn x(&self) -> Self::Scalar;
    fn y(&self) -> Self::Scalar;

    /// Copy the coordinate out into an owned vector.
    fn to_vec2(&self) -> Vec2<Self::Scalar> {
        Vec2::new(self.x(), self.y())
    }
}

/// Write access to a 2D Cartesian coordinate.
pub trait CoordinatesMut: Coordinates {
    fn set_x(&mut self, value: Self::Scalar);
    fn set_y(&mut self, value: Self::Scalar);

    /// Overwrite both axes from another coordinate.
    fn assign<P: Coordinates<Scalar = Self::Scalar>>(&mut self, other: &P) {
        self.set_x(other.x());
        self.set_y(other.y());
    }

    /// Translate in place.
    fn translate(&mut self, delta: Vec2<Self::Scalar>) {
        let (x, y) = (self.x(), self.y());
        self.set_x(x + delta.x);
        self.set_y(y + delta.y);
    }
}

impl<F: Float> Coordinates for Vec2<F> {
    type Scalar = F;
    fn x(&self) -> F { self.x }
    fn y(&self) -> F { self.y }
}

impl<F: Float> CoordinatesMut for Vec2<F> {
    fn set_x(&mut self, value: F) { self.x = value; }
    fn set_y(&mut self, value: F) { self.y = value; }
}

/// Squared Euclidean distance between two coordinates.
pub fn distance_sq<A, B>(a: &A, b: &B) -> A::Scalar
where
    A: Coordinates,
    B: Coordinates<Scalar = A::Scalar>,
{
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    dx * dx + dy * dy
}

/// Euclidean distance between two coordinates.
pub fn distance<A, B>(a: &A, b: &B) -> A::Scalar
where
    A: Coordinates,
    B: Coordinates<Scalar = A::Scalar>,
{
    distance_sq(a, b).sqrt()
}

/// Axis-aligned bounding box as `(min, max)`. `None` for an empty input.
pub fn bounding_box<F, I, P>(points: I) -> Option<(Vec2<F>, Vec2<F>)>
where
    F: Float,
    I: IntoIterator<Item = P>,
    P: Coordinates<Scalar = F>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?.to_vec2();
    let (min, max) = iter.fold((first, first), |(min, max), p| {
        (
            Vec2::new(min.x.min(p.x()), min.y.min(p.y())),
            Vec2::new(max.x.max(p.x()), max.y.max(p.y())),
        )
    });
    Some((min, max))
}

/// Index of the coordinate closest to `target`. Ties keep the earliest.
pub fn nearest<I, P, Q>(points: I, target: &Q) -> Option<usize>
where
    I: IntoIterator<Item = P>,
    P: Coordinates,
    Q: Coordinates<Scalar = P::Scalar>,
{
    let mut best: Option<(usize, P::Scalar)> = None;
    for (index, p) in points.into_iter().enumerate() {
        let d = distance_sq(&p, target);
        match best {
            Some((_, best_d)) if best_d <= d => {}
            _ => best = Some((index, d)),
        }
    }
    best.map(|(index, _)| index)
}

/// Indices of the two coordinates closest to `target`, closest first.
pub fn nearest_two<I, P, Q>(points: I, target: &Q) -> [Option<usize>; 2]
where
    I: IntoIterator<Item = P>,
    P: Coordinates,
    Q: Coordinates<Scalar = P::Scalar>,
{
    let mut first: Option<(usize, P::Scalar)> = None;
    let mut second: Option<(usize, P::Scalar)> = None;
    for (index, p) in points.into_iter().enumerate() {
        let d = distance_sq(&p, target);
        match first {
            Some((_, first_d)) if first_d <= d => match second {
                Some((_, second_d)) if second_d <= d => {}
                _ => second = Some((index, d)),
            },
            _ => {
                second = first;
                first = Some((index, d));
            }
        }
    }
    [first.map(|(i, _)| i), second.map(|(i, _)| i)]
}
