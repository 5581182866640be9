//! Borrowed views of single points inside a flat, interleaved coordinate buffer.
//!
//! A mesh stores its points as `[x0, y0, x1, y1, ...]`. A view addresses one
//! of those pairs by index and gives it the same get/set surface as an owned
//! [`Vec2`], so geometric code never needs to copy the buffer out.
//!
//! Two flavours exist:
//!
//! - [`PointView`] borrows the buffer shared. It is `Copy`, so any number of
//!   readers can observe the same point.
//! - [`PointViewMut`] borrows the buffer exclusively. It is move-only, so at
//!   most one writer exists for a buffer at a time. It narrows into a
//!   [`PointView`] via `From`.
//!
//! Both carry the buffer's lifetime. Any structural change to the owning
//! mesh needs `&mut` access to it, which the borrow checker refuses while a
//! view is alive.

use crate::float::Float;
use crate::geometry::{Coordinates, CoordinatesMut};
use crate::vec::Vec2;

/// Read-only view of one point in a flat coordinate buffer.
#[derive(Clone, Copy, Debug)]
pub struct PointView<'a, F: Float = f64> {
    buffer: &'a [F],
    offset: usize,
}

impl<'a, F: Float> PointView<'a, F> {
    /// View point `index` of `buffer`.
    ///
    /// `index` must address a full pair inside `buffer`. Only debug builds
    /// check this.
    #[inline]
    pub fn new(buffer: &'a [F], index: usize) -> Self {
        debug_assert!(index * 2 + 1 < buffer.len(), "point index {} out of range", index);
        PointView { buffer, offset: index * 2 }
    }

    /// View point `index` of a fixed-size array.
    #[inline]
    pub fn from_array<const N: usize>(array: &'a [F; N], index: usize) -> Self {
        Self::new(array.as_slice(), index)
    }

    /// Logical point index within the buffer.
    pub fn index(&self) -> usize {
        self.offset / 2
    }

    /// Read axis `AXIS` (0 = x, 1 = y).
    #[inline]
    pub fn get<const AXIS: usize>(&self) -> F {
        const { assert!(AXIS < 2, "axis must be 0 or 1") };
        self.buffer[self.offset + AXIS]
    }

    /// Copy the coordinate out.
    pub fn to_point(&self) -> Vec2<F> {
        Vec2::new(self.get::<0>(), self.get::<1>())
    }

    /// Exchange what two views point at.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }
}

impl<F: Float> Coordinates for PointView<'_, F> {
    type Scalar = F;
    #[inline]
    fn x(&self) -> F { self.get::<0>() }
    #[inline]
    fn y(&self) -> F { self.get::<1>() }
}

/// Writable view of one point in a flat coordinate buffer.
///
/// Deliberately neither `Clone` nor `Copy`.
#[derive(Debug)]
pub struct PointViewMut<'a, F: Float = f64> {
    buffer: &'a mut [F],
    offset: usize,
}

impl<'a, F: Float> PointViewMut<'a, F> {
    /// Mutably view point `index` of `buffer`.
    ///
    /// Same precondition as [`PointView::new`].
    #[inline]
    pub fn new(buffer: &'a mut [F], index: usize) -> Self {
        debug_assert!(index * 2 + 1 < buffer.len(), "point index {} out of range", index);
        PointViewMut { buffer, offset: index * 2 }
    }

    /// Mutably view point `index` of a fixed-size array.
    #[inline]
    pub fn from_array<const N: usize>(array: &'a mut [F; N], index: usize) -> Self {
        Self::new(array.as_mut_slice(), index)
    }

    pub fn index(&self) -> usize {
        self.offset / 2
    }

    #[inline]
    pub fn get<const AXIS: usize>(&self) -> F {
        const { assert!(AXIS < 2, "axis must be 0 or 1") };
        self.buffer[self.offset + AXIS]
    }

    /// Write axis `AXIS` (0 = x, 1 = y).
    #[inline]
    pub fn set<const AXIS: usize>(&mut self, value: F) {
        const { assert!(AXIS < 2, "axis must be 0 or 1") };
        self.buffer[self.offset + AXIS] = value;
    }

    pub fn to_point(&self) -> Vec2<F> {
        Vec2::new(self.get::<0>(), self.get::<1>())
    }

    /// Short-lived read-only view of the same point.
    pub fn as_view(&self) -> PointView<'_, F> {
        PointView { buffer: &*self.buffer, offset: self.offset }
    }

    /// Short-lived writable view of the same point, leaving `self` usable
    /// once it is dropped.
    pub fn reborrow(&mut self) -> PointViewMut<'_, F> {
        PointViewMut { buffer: &mut *self.buffer, offset: self.offset }
    }

    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }
}

impl<'a, F: Float> From<PointViewMut<'a, F>> for PointView<'a, F> {
    fn from(view: PointViewMut<'a, F>) -> Self {
        PointView { buffer: view.buffer, offset: view.offset }
    }
}

impl<F: Float> Coordinates for PointViewMut<'_, F> {
    type Scalar = F;
    #[inline]
    fn x(&self) -> F { self.get::<0>() }
    #[inline]
    fn y(&self) -> F { self.get::<1>() }
}

impl<F: Float> CoordinatesMut for PointViewMut<'_, F> {
    #[inline]
    fn set_x(&mut self, value: F) { self.set::<0>(value); }
    #[inline]
    fn set_y(&mut self, value: F) { self.set::<1>(value); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;

    #[test]
    fn reads_interleaved_pairs() {
        let buffer = [1.0f64, 2.0, 3.0, 4.0];
        let view = PointView::new(&buffer, 1);
        assert_eq!(view.get::<0>(), 3.0);
        assert_eq!(view.get::<1>(), 4.0);
        assert_eq!(view.index(), 1);
    }

    #[test]
    fn from_array_matches_slice() {
        let array = [0.0f64, 0.5, 1.0, 1.5, 2.0, 2.5];
        let view = PointView::from_array(&array, 2);
        assert_eq!(view.to_point(), Vec2::new(2.0, 2.5));
    }

    #[test]
    fn writes_through_mutable_view() {
        let mut buffer = [0.0f64; 6];
        {
            let mut view = PointViewMut::new(&mut buffer, 2);
            view.set::<0>(7.0);
            view.set_y(-3.0);
        }
        assert_eq!(buffer, [0.0, 0.0, 0.0, 0.0, 7.0, -3.0]);
    }

    #[test]
    fn mutable_view_narrows_to_read_only() {
        let mut buffer = [5.0f64, 6.0];
        let view: PointView<'_, f64> = PointViewMut::new(&mut buffer, 0).into();
        let copy = view;
        assert_eq!(copy.x(), 5.0);
        assert_eq!(view.y(), 6.0);
    }

    #[test]
    fn swap_exchanges_targets() {
        let buffer = [1.0f64, 1.0, 2.0, 2.0];
        let mut a = PointView::new(&buffer, 0);
        let mut b = PointView::new(&buffer, 1);
        a.swap(&mut b);
        assert_eq!(a.x(), 2.0);
        assert_eq!(b.x(), 1.0);
    }

    #[test]
    fn views_work_with_generic_geometry() {
        let buffer = [0.0f64, 0.0, 3.0, 4.0];
        let a = PointView::new(&buffer, 0);
        let b = PointView::new(&buffer, 1);
        assert!((geometry::distance(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn assign_from_point() {
        let mut buffer = [0.0f64; 4];
        let mut view = PointViewMut::new(&mut buffer, 1);
        view.assign(&Vec2::new(9.0, 8.0));
        view.reborrow().translate(Vec2::new(1.0, 1.0));
        assert_eq!(view.as_view().to_point(), Vec2::new(10.0, 9.0));
    }
}
