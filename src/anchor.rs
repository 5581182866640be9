//! Anchors: caller-held handles that pin and drag a single mesh point.

use crate::mesh::Mesh;
use crate::vec::{Point, Vector};
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};

/// Anchor operation that arrived while the mesh was borrowed.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Deferred {
    Move(usize, Vector),
    Release(usize),
}

/// A mesh shared by a model and its anchors.
///
/// Anchor moves and releases that find the mesh borrowed (an observer
/// dropping its anchor mid-step, say) are queued and applied in order by
/// [`flush`](Self::flush) once the borrow ends.
#[derive(Debug)]
pub(crate) struct SharedMesh {
    mesh: RefCell<Mesh>,
    deferred: RefCell<Vec<Deferred>>,
}

impl SharedMesh {
    pub fn new(mesh: Mesh) -> Rc<Self> {
        Rc::new(SharedMesh { mesh: RefCell::new(mesh), deferred: RefCell::new(Vec::new()) })
    }

    pub fn borrow(&self) -> Ref<'_, Mesh> {
        self.mesh.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Mesh> {
        self.mesh.borrow_mut()
    }

    /// Apply queued anchor operations. Does nothing while the mesh is still
    /// borrowed.
    pub fn flush(&self) {
        let Ok(mut mesh) = self.mesh.try_borrow_mut() else {
            return;
        };
        for op in self.deferred.borrow_mut().drain(..) {
            apply(&mut mesh, op);
        }
    }

    fn submit(&self, op: Deferred) {
        match self.mesh.try_borrow_mut() {
            Ok(mut mesh) => apply(&mut mesh, op),
            Err(_) => {
                log::debug!("mesh busy, deferring {:?}", op);
                self.deferred.borrow_mut().push(op);
            }
        }
    }
}

fn apply(mesh: &mut Mesh, op: Deferred) {
    match op {
        Deferred::Move(index, delta) => mesh.displace(index, delta),
        Deferred::Release(index) => {
            mesh.unpin(index);
            log::debug!("released anchor on point {}", index);
        }
    }
}

/// Pins one mesh point and lets the caller move it.
///
/// Obtained from [`Model::grab_anchor`](crate::Model::grab_anchor) or
/// [`Model::insert_anchor`](crate::Model::insert_anchor). Dropping the
/// anchor returns the point to normal integration where it currently is.
///
/// The anchor only holds a weak reference to its model's mesh. Once the
/// model is gone every operation is a no-op. Moving or dropping an anchor
/// while the model is busy, e.g. from a [`StepObserver`](crate::StepObserver)
/// or inside [`Model::with_mesh`](crate::Model::with_mesh), takes effect when
/// that call returns.
#[derive(Debug)]
pub struct Anchor {
    index: usize,
    mesh: Weak<SharedMesh>,
}

impl Anchor {
    pub(crate) fn attach(index: usize, mesh: &Rc<SharedMesh>) -> Self {
        Anchor { index, mesh: Rc::downgrade(mesh) }
    }

    /// A handle bound to nothing.
    pub fn detached() -> Self {
        Anchor { index: 0, mesh: Weak::new() }
    }

    /// Index of the pinned mesh point.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the owning model still exists.
    pub fn is_attached(&self) -> bool {
        self.mesh.strong_count() > 0
    }

    /// Current position of the pinned point. `None` once the model is gone
    /// or while it is being stepped.
    pub fn position(&self) -> Option<Point> {
        let shared = self.mesh.upgrade()?;
        let position = shared.mesh.try_borrow().ok()?.position(self.index);
        Some(position)
    }

    /// Translate the pinned point by `delta`.
    ///
    /// Neighbours are not touched here; they follow through spring forces on
    /// the next [`Model::step`](crate::Model::step).
    pub fn move_by(&mut self, delta: Vector) {
        if let Some(shared) = self.mesh.upgrade() {
            shared.submit(Deferred::Move(self.index, delta));
        }
    }

    /// Release the pin now. Equivalent to dropping the anchor.
    pub fn release(self) {}
}

impl Default for Anchor {
    fn default() -> Self {
        Self::detached()
    }
}

impl Drop for Anchor {
    fn drop(&mut self) {
        if let Some(shared) = self.mesh.upgrade() {
            shared.submit(Deferred::Release(self.index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_grid() -> Rc<SharedMesh> {
        SharedMesh::new(Mesh::grid(Point::zero(), 10.0, 10.0, 2, 2))
    }

    #[test]
    fn move_by_displaces_point() {
        let mesh = shared_grid();
        mesh.borrow_mut().pin(3);
        let mut anchor = Anchor::attach(3, &mesh);
        anchor.move_by(Vector::new(1.0, -2.0));
        assert_eq!(anchor.position(), Some(Point::new(11.0, 8.0)));
    }

    #[test]
    fn drop_releases_pin() {
        let mesh = shared_grid();
        mesh.borrow_mut().pin(1);
        let anchor = Anchor::attach(1, &mesh);
        assert!(mesh.borrow().is_anchored(1));
        drop(anchor);
        assert!(!mesh.borrow().is_anchored(1));
    }

    #[test]
    fn busy_mesh_defers_moves_and_releases() {
        let mesh = shared_grid();
        mesh.borrow_mut().pin(2);
        let mut anchor = Anchor::attach(2, &mesh);
        {
            let _busy = mesh.borrow();
            anchor.move_by(Vector::new(3.0, 0.0));
            drop(anchor);
            mesh.flush();
        }
        assert!(mesh.borrow().is_anchored(2));
        assert_eq!(mesh.borrow().position(2), Point::new(0.0, 10.0));

        mesh.flush();
        assert!(!mesh.borrow().is_anchored(2));
        assert_eq!(mesh.borrow().position(2), Point::new(3.0, 10.0));
    }

    #[test]
    fn outliving_the_mesh_is_harmless() {
        let mesh = shared_grid();
        let mut anchor = Anchor::attach(0, &mesh);
        drop(mesh);
        assert!(!anchor.is_attached());
        anchor.move_by(Vector::new(5.0, 5.0));
        assert_eq!(anchor.position(), None);
    }

    #[test]
    fn detached_anchor_does_nothing() {
        let mut anchor = Anchor::default();
        assert!(!anchor.is_attached());
        anchor.move_by(Vector::new(1.0, 1.0));
        anchor.release();
    }
}
