//! Spring mesh: point storage, grid topology and structural growth.

use crate::float::Float;
use crate::geometry::{self, CoordinatesMut};
use crate::point_view::{PointView, PointViewMut};
use crate::spring::Spring;
use crate::vec::{Point, Vec2, Vector};
use alloc::vec::Vec as AllocVec;

/// A grid of point-masses joined by springs.
///
/// Positions and velocities live in flat interleaved buffers
/// (`[x0, y0, x1, y1, ...]`) addressed through [`PointView`]s. The first
/// `cols * rows` points form the texture grid, with point (col, row) at
/// index `row * cols + col`. Points inserted later are appended after the
/// grid and never move index.
#[derive(Clone, Debug)]
pub struct Mesh {
    positions: AllocVec<f64>,
    velocities: AllocVec<f64>,
    forces: AllocVec<f64>,
    anchored: AllocVec<bool>,
    springs: AllocVec<Spring>,
    degrees: AllocVec<usize>,
    cols: usize,
    rows: usize,
}

/// Disjoint borrows of the mesh buffers for one integration pass.
pub(crate) struct MeshBuffers<'a> {
    pub positions: &'a mut [f64],
    pub velocities: &'a mut [f64],
    pub forces: &'a mut [f64],
    pub anchored: &'a [bool],
    pub springs: &'a [Spring],
}

impl Mesh {
    /// Lay out an evenly spaced `cols x rows` grid spanning
    /// `[origin, origin + (width, height)]`.
    ///
    /// Springs join horizontal and vertical neighbours, each at rest.
    /// `cols` and `rows` are raised to at least 2.
    pub fn grid(origin: Point, width: f64, height: f64, cols: usize, rows: usize) -> Self {
        let cols = cols.max(2);
        let rows = rows.max(2);
        let count = cols * rows;

        let mut positions = AllocVec::with_capacity(count * 2);
        for row in 0..rows {
            let ty = f64::from_usize(row) / f64::from_usize(rows - 1);
            for col in 0..cols {
                let tx = f64::from_usize(col) / f64::from_usize(cols - 1);
                positions.push(origin.x + width * tx);
                positions.push(origin.y + height * ty);
            }
        }

        let mut springs = AllocVec::with_capacity(2 * count);
        {
            let buffer = positions.as_slice();
            let view = |index: usize| PointView::new(buffer, index);

            // Horizontal
            for row in 0..rows {
                for col in 0..(cols - 1) {
                    let a = row * cols + col;
                    let b = a + 1;
                    springs.push(Spring::at_rest(a, &view(a), b, &view(b)));
                }
            }

            // Vertical
            for row in 0..(rows - 1) {
                for col in 0..cols {
                    let a = row * cols + col;
                    let b = a + cols;
                    springs.push(Spring::at_rest(a, &view(a), b, &view(b)));
                }
            }
        }

        let mut degrees = alloc::vec![0; count];
        for spring in &springs {
            degrees[spring.a] += 1;
            degrees[spring.b] += 1;
        }

        Mesh {
            velocities: alloc::vec![0.0; count * 2],
            forces: alloc::vec![0.0; count * 2],
            anchored: alloc::vec![false; count],
            positions,
            springs,
            degrees,
            cols,
            rows,
        }
    }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
    pub fn point_count(&self) -> usize { self.anchored.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }
    pub fn springs(&self) -> &[Spring] { &self.springs }

    /// Number of springs attached to point `index`.
    pub fn degree(&self, index: usize) -> usize {
        self.degrees[index]
    }

    /// Largest number of springs attached to any single point.
    pub fn max_degree(&self) -> usize {
        self.degrees.iter().copied().max().unwrap_or(0)
    }

    /// Index of grid point (col, row).
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Read-only view of point `index`.
    pub fn point(&self, index: usize) -> PointView<'_> {
        PointView::new(&self.positions, index)
    }

    /// Writable view of point `index`.
    pub fn point_mut(&mut self, index: usize) -> PointViewMut<'_> {
        PointViewMut::new(&mut self.positions, index)
    }

    pub fn grid_point(&self, col: usize, row: usize) -> PointView<'_> {
        self.point(self.index(col, row))
    }

    /// Views of every point, grid first, then inserted points.
    pub fn points(&self) -> impl Iterator<Item = PointView<'_>> + '_ {
        (0..self.point_count()).map(move |index| self.point(index))
    }

    pub fn position(&self, index: usize) -> Point {
        self.point(index).to_point()
    }

    pub fn velocity(&self, index: usize) -> Vector {
        PointView::new(&self.velocities, index).to_point()
    }

    pub fn is_anchored(&self, index: usize) -> bool {
        self.anchored[index]
    }

    pub fn anchored_count(&self) -> usize {
        self.anchored.iter().filter(|a| **a).count()
    }

    /// Index of the point closest to `target`.
    pub fn nearest_point(&self, target: &Point) -> Option<usize> {
        geometry::nearest(self.points(), target)
    }

    /// Append a free point at `position`, joined by springs at rest to its
    /// two nearest existing points. Returns the new point's index.
    pub fn insert_point(&mut self, position: Point) -> usize {
        let neighbours = geometry::nearest_two(self.points(), &position);
        let index = self.point_count();

        self.positions.extend_from_slice(&[position.x, position.y]);
        self.velocities.extend_from_slice(&[0.0, 0.0]);
        self.forces.extend_from_slice(&[0.0, 0.0]);
        self.anchored.push(false);
        self.degrees.push(0);

        for neighbour in neighbours.into_iter().flatten() {
            let spring = Spring::at_rest(index, &position, neighbour, &self.point(neighbour));
            self.springs.push(spring);
            self.degrees[index] += 1;
            self.degrees[neighbour] += 1;
        }

        index
    }

    /// Make point `index` immobile and drop any velocity it had.
    pub fn pin(&mut self, index: usize) {
        self.anchored[index] = true;
        PointViewMut::new(&mut self.velocities, index).assign(&Vector::zero());
    }

    /// Return point `index` to integration. It starts from rest.
    pub fn unpin(&mut self, index: usize) {
        self.anchored[index] = false;
    }

    pub fn unpin_all(&mut self) {
        self.anchored.iter_mut().for_each(|a| *a = false);
    }

    /// Translate point `index` directly, bypassing integration.
    pub fn displace(&mut self, index: usize, delta: Vector) {
        self.point_mut(index).translate(delta);
    }

    /// Corners of the current axis-aligned bounding box:
    /// `[min, (max.x, min.y), (min.x, max.y), max]`.
    pub fn extremes(&self) -> [Point; 4] {
        let (min, max) = geometry::bounding_box(self.points())
            .unwrap_or((Point::zero(), Point::zero()));
        [min, Point::new(max.x, min.y), Point::new(min.x, max.y), max]
    }

    /// Move every point, pinned or not, by `delta`.
    pub fn translate(&mut self, delta: Vector) {
        for xy in self.positions.chunks_exact_mut(2) {
            xy[0] += delta.x;
            xy[1] += delta.y;
        }
    }

    /// Stretch every point away from `origin` by `sx` horizontally and `sy`
    /// vertically. Spring rest lengths follow along each spring's current
    /// direction, which is exact only for an undeformed mesh.
    pub fn scale(&mut self, origin: Point, sx: f64, sy: f64) {
        let factor = Vec2::new(sx, sy);
        for spring in self.springs.iter_mut() {
            let direction = PointView::new(&self.positions, spring.b).to_point()
                - PointView::new(&self.positions, spring.a).to_point();
            spring.scale_rest_length(direction, sx, sy);
        }
        for index in 0..self.point_count() {
            let mut view = PointViewMut::new(&mut self.positions, index);
            let offset = view.to_point() - origin;
            view.assign(&(origin + offset.component_mul(factor)));
        }
    }

    /// Position of normalized grid coordinate `uv`, bilinearly interpolated
    /// between the four surrounding grid points. `uv` is clamped to the unit
    /// square.
    pub fn deform(&self, uv: Point) -> Point {
        let (col, s) = cell(uv.x, self.cols);
        let (row, t) = cell(uv.y, self.rows);

        let top = weighted(
            self.grid_point(col, row).to_point(),
            self.grid_point(col + 1, row).to_point(),
            s,
        );
        let bottom = weighted(
            self.grid_point(col, row + 1).to_point(),
            self.grid_point(col + 1, row + 1).to_point(),
            s,
        );
        weighted(top, bottom, t)
    }

    pub(crate) fn buffers_mut(&mut self) -> MeshBuffers<'_> {
        MeshBuffers {
            positions: &mut self.positions,
            velocities: &mut self.velocities,
            forces: &mut self.forces,
            anchored: &self.anchored,
            springs: &self.springs,
        }
    }
}

/// Cell index and fractional offset of `coord` along an axis of `count`
/// grid points.
fn cell(coord: f64, count: usize) -> (usize, f64) {
    let scaled = coord.clamp(0.0, 1.0) * f64::from_usize(count - 1);
    let index = scaled.floor().to_usize().min(count - 2);
    (index, scaled - f64::from_usize(index))
}

// Weighted form keeps the endpoints exact at t = 0 and t = 1.
fn weighted(a: Point, b: Point, t: f64) -> Point {
    a.scale(1.0 - t) + b.scale(t)
}
