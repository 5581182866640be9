//! The model facade: mesh, anchors and integrator behind one type.

use crate::anchor::{Anchor, SharedMesh};
use crate::config::{Settings, GRID_RESOLUTION};
use crate::error::{Result, WobblyError};
use crate::integrator::Integrator;
use crate::mesh::Mesh;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::vec::{Point, Vector};
use alloc::rc::Rc;

/// A deformable rectangle backed by a [`GRID_RESOLUTION`]² spring mesh.
///
/// Cloning deep-copies the mesh, its springs and the integrator. Pins are
/// not carried over: anchors always belong to the model that issued them,
/// so every point of a clone starts free.
#[derive(Debug)]
pub struct Model {
    mesh: Rc<SharedMesh>,
    integrator: Integrator,
    settings: Settings,
}

impl Model {
    /// Create a model at rest covering `width x height` from `position`,
    /// using default [`Settings`].
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self::build(position, width, height, Settings::default())
    }

    /// Create a model with custom settings.
    pub fn with_settings(position: Point, width: f64, height: f64, settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build(position, width, height, settings))
    }

    fn build(position: Point, width: f64, height: f64, settings: Settings) -> Self {
        let mesh = Mesh::grid(position, width, height, GRID_RESOLUTION, GRID_RESOLUTION);
        log::debug!(
            "created {}x{} model at ({}, {}) with {} springs",
            width, height, position.x, position.y, mesh.spring_count()
        );
        Model {
            mesh: SharedMesh::new(mesh),
            integrator: Integrator::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Pin the mesh point nearest to `grab` and return a handle to it.
    ///
    /// Moving the handle and then stepping exerts force on every other
    /// point. Fails if the nearest point is already pinned.
    pub fn grab_anchor(&mut self, grab: Point) -> Result<Anchor> {
        if !grab.is_finite() {
            return Err(WobblyError::NonFinitePosition);
        }
        let index = {
            let mut mesh = self.mesh.borrow_mut();
            let index = mesh.nearest_point(&grab).ok_or(WobblyError::NoPointsAvailable)?;
            if mesh.is_anchored(index) {
                return Err(WobblyError::AlreadyAnchored { index });
            }
            mesh.pin(index);
            index
        };
        log::debug!("grabbed point {} near ({}, {})", index, grab.x, grab.y);
        Ok(Anchor::attach(index, &self.mesh))
    }

    /// Insert a new pinned point at `position`, joined by springs to its two
    /// nearest neighbours, and return a handle to it.
    pub fn insert_anchor(&mut self, position: Point) -> Result<Anchor> {
        if !position.is_finite() {
            return Err(WobblyError::NonFinitePosition);
        }
        let index = {
            let mut mesh = self.mesh.borrow_mut();
            if mesh.point_count() == 0 {
                return Err(WobblyError::NoPointsAvailable);
            }
            let index = mesh.insert_point(position);
            mesh.pin(index);
            index
        };
        log::debug!("inserted anchor point {} at ({}, {})", index, position.x, position.y);
        Ok(Anchor::attach(index, &self.mesh))
    }

    /// Integrate once per whole 16 ms contained in the accumulated time.
    ///
    /// Returns `true` while the mesh is still moving.
    pub fn step(&mut self, milliseconds: u32) -> bool {
        self.step_observed(milliseconds, &mut NoOpStepObserver)
    }

    /// [`step`](Self::step) with an observer.
    ///
    /// Anchors moved or dropped from the observer take effect after the
    /// step, before this returns.
    pub fn step_observed<O: StepObserver>(&mut self, milliseconds: u32, observer: &mut O) -> bool {
        let moving = {
            let mut mesh = self.mesh.borrow_mut();
            self.integrator.step(&mut mesh, &self.settings, milliseconds, observer)
        };
        self.mesh.flush();
        moving
    }

    /// Result of the most recent [`step`](Self::step). A fresh model is at
    /// rest.
    pub fn is_moving(&self) -> bool {
        self.integrator.is_moving()
    }

    /// On-screen position of normalized texture coordinate `normalized`
    /// under the current deformation.
    pub fn deform_texcoords(&self, normalized: Point) -> Point {
        self.mesh.borrow().deform(normalized)
    }

    /// Corners of the mesh's current bounding box:
    /// `[top-left, top-right, bottom-left, bottom-right]`.
    pub fn extremes(&self) -> [Point; 4] {
        self.mesh.borrow().extremes()
    }

    /// Translate the whole mesh so its bounding box starts at `point`.
    ///
    /// Anchored points move too. The result is only as precise as the
    /// current bounding box; re-create the model when exactness matters.
    pub fn move_model_to(&mut self, point: Point) {
        let [top_left, ..] = self.extremes();
        self.move_model_by(point - top_left);
    }

    /// Translate the whole mesh, anchored points included.
    pub fn move_model_by(&mut self, delta: Vector) {
        self.mesh.borrow_mut().translate(delta);
    }

    /// Stretch the mesh about its top-left corner so its bounding box
    /// becomes `width x height`. A flat axis is left as is.
    ///
    /// Approximate for a deformed mesh, see [`Mesh::scale`].
    pub fn resize_model(&mut self, width: f64, height: f64) {
        let mut mesh = self.mesh.borrow_mut();
        let [top_left, _, _, bottom_right] = mesh.extremes();
        let extent = bottom_right - top_left;
        let factor = |current: f64, target: f64| {
            if current > f64::EPSILON { target / current } else { 1.0 }
        };
        let (sx, sy) = (factor(extent.x, width), factor(extent.y, height));
        log::debug!("resizing model by ({}, {})", sx, sy);
        mesh.scale(top_left, sx, sy);
    }

    pub fn point_count(&self) -> usize {
        self.mesh.borrow().point_count()
    }

    pub fn spring_count(&self) -> usize {
        self.mesh.borrow().spring_count()
    }

    /// Current position of mesh point `index`.
    pub fn point(&self, index: usize) -> Point {
        self.mesh.borrow().position(index)
    }

    pub fn is_anchored(&self, index: usize) -> bool {
        self.mesh.borrow().is_anchored(index)
    }

    /// Run `f` with read access to the underlying mesh, e.g. to iterate
    /// point views without copying.
    ///
    /// Anchors moved or dropped inside `f` take effect once it returns.
    pub fn with_mesh<R>(&self, f: impl FnOnce(&Mesh) -> R) -> R {
        let result = f(&self.mesh.borrow());
        self.mesh.flush();
        result
    }
}

impl Clone for Model {
    fn clone(&self) -> Self {
        let mut mesh = self.mesh.borrow().clone();
        let released = mesh.anchored_count();
        mesh.unpin_all();
        log::debug!("copied model, {} pins left behind", released);
        Model {
            mesh: SharedMesh::new(mesh),
            integrator: self.integrator.clone(),
            settings: self.settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model::new(Point::new(10.0, 20.0), 300.0, 150.0)
    }

    #[test]
    fn new_model_covers_requested_area() {
        let [tl, tr, bl, br] = model().extremes();
        assert_eq!(tl, Point::new(10.0, 20.0));
        assert_eq!(tr, Point::new(310.0, 20.0));
        assert_eq!(bl, Point::new(10.0, 170.0));
        assert_eq!(br, Point::new(310.0, 170.0));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = Settings::new().with_maximum_range(-1.0);
        let err = Model::with_settings(Point::zero(), 1.0, 1.0, settings).unwrap_err();
        assert!(matches!(err, WobblyError::InvalidSettings(_)));
    }

    #[test]
    fn grab_pins_nearest_point() {
        let mut model = model();
        let anchor = model.grab_anchor(Point::new(305.0, 25.0)).unwrap();
        assert_eq!(anchor.index(), 3);
        assert!(model.is_anchored(3));
    }

    #[test]
    fn double_grab_is_rejected() {
        let mut model = model();
        let _first = model.grab_anchor(Point::new(10.0, 20.0)).unwrap();
        let err = model.grab_anchor(Point::new(11.0, 21.0)).unwrap_err();
        assert_eq!(err, WobblyError::AlreadyAnchored { index: 0 });
    }

    #[test]
    fn grab_again_after_release() {
        let mut model = model();
        model.grab_anchor(Point::new(10.0, 20.0)).unwrap().release();
        assert!(!model.is_anchored(0));
        assert!(model.grab_anchor(Point::new(10.0, 20.0)).is_ok());
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let mut model = model();
        let nan = Point::new(f64::NAN, 0.0);
        assert_eq!(model.grab_anchor(nan).unwrap_err(), WobblyError::NonFinitePosition);
        assert_eq!(model.insert_anchor(nan).unwrap_err(), WobblyError::NonFinitePosition);
        assert_eq!(model.point_count(), 16);
    }

    #[test]
    fn is_moving_tracks_last_step() {
        let mut model = model();
        assert!(!model.is_moving());
        let mut anchor = model.grab_anchor(Point::new(10.0, 20.0)).unwrap();
        anchor.move_by(Vector::new(5.0, 5.0));
        assert!(model.step(16));
        assert!(model.is_moving());
    }

    #[test]
    fn move_model_to_aligns_top_left() {
        let mut model = model();
        model.move_model_to(Point::new(-5.0, 0.0));
        let [tl, _, _, br] = model.extremes();
        assert!((tl.x + 5.0).abs() < 1e-9 && tl.y.abs() < 1e-9);
        assert!((br.x - 295.0).abs() < 1e-9 && (br.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn resize_keeps_mesh_at_rest() {
        let mut model = model();
        model.resize_model(600.0, 50.0);
        let [tl, _, _, br] = model.extremes();
        assert!((br.x - tl.x - 600.0).abs() < 1e-9);
        assert!((br.y - tl.y - 50.0).abs() < 1e-9);
        assert!(!model.step(16));
    }

    #[test]
    fn anchors_follow_rigid_moves() {
        let mut model = model();
        let anchor = model.grab_anchor(Point::new(10.0, 20.0)).unwrap();
        model.move_model_by(Vector::new(1.0, 1.0));
        assert_eq!(anchor.position(), Some(Point::new(11.0, 21.0)));
    }
}
