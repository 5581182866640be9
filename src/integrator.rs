//! Fixed-step integration of the spring mesh.

use crate::config::{Settings, MASS, SETTLE_EPSILON, STABLE_STIFFNESS, SUB_STEP_MS};
use crate::float::Float;
use crate::geometry::CoordinatesMut;
use crate::mesh::{Mesh, MeshBuffers};
use crate::observer::StepObserver;
use crate::point_view::{PointView, PointViewMut};
use crate::spring::Spring;

/// Advances a [`Mesh`] in fixed [`SUB_STEP_MS`] increments.
///
/// Elapsed time is accumulated across calls, so the outcome depends only on
/// the total time fed in, not on how it was split. One sub-step is the unit
/// of time for velocities.
///
/// Each sub-step is integrated in one or more equal slices. The slice count
/// grows with the largest number of springs meeting at one point, so a point
/// that collects many springs through inserted anchors stays stable.
#[derive(Clone, Debug, Default)]
pub struct Integrator {
    remainder_ms: u32,
    moving: bool,
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of the most recent [`step`](Self::step).
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Run every whole sub-step contained in the accumulated time and report
    /// whether any free point is still moving.
    pub fn step<O: StepObserver>(
        &mut self,
        mesh: &mut Mesh,
        settings: &Settings,
        delta_ms: u32,
        observer: &mut O,
    ) -> bool {
        self.remainder_ms = self.remainder_ms.saturating_add(delta_ms);
        let sub_steps = (self.remainder_ms / SUB_STEP_MS) as usize;
        self.remainder_ms %= SUB_STEP_MS;

        let slices = slices_per_sub_step(mesh.max_degree(), settings);
        let dt = 1.0 / f64::from_usize(slices);
        let mut buffers = mesh.buffers_mut();
        for index in 0..sub_steps {
            for _ in 0..slices {
                integrate(&mut buffers, settings, dt);
            }
            observer.on_sub_step(index);
        }

        let moving = still_moving(&mut buffers, settings);
        if self.moving && !moving {
            log::trace!("mesh settled after {} sub-steps", sub_steps);
            observer.on_settled();
        }
        self.moving = moving;
        observer.on_step_complete(moving);
        moving
    }
}

/// Slices needed so neither the stiffest point nor friction overshoots.
///
/// Semi-implicit Euler with step `dt` is stable while
/// `stiffness / mass * dt^2` stays below 4. [`STABLE_STIFFNESS`] keeps a
/// margin for coupling between neighbouring points.
fn slices_per_sub_step(max_degree: usize, settings: &Settings) -> usize {
    let stiffness = f64::from_usize(max_degree) * settings.spring_constant / MASS;
    let for_springs = (stiffness / STABLE_STIFFNESS).sqrt().ceil();
    let for_friction = (settings.friction / MASS).ceil();
    for_springs.max(for_friction).to_usize().max(1)
}

/// Sum every spring's force into `forces`, one pair per point.
fn accumulate_spring_forces(
    positions: &[f64],
    forces: &mut [f64],
    springs: &[Spring],
    settings: &Settings,
) {
    forces.fill(0.0);
    for spring in springs {
        let force = spring.force_on_a(
            &PointView::new(positions, spring.a),
            &PointView::new(positions, spring.b),
            settings.spring_constant,
            settings.maximum_range,
        );
        PointViewMut::new(forces, spring.a).translate(force);
        PointViewMut::new(forces, spring.b).translate(-force);
    }
}

/// One semi-implicit Euler slice of length `dt`: velocity from force, then
/// position from the new velocity. Anchored points are skipped.
fn integrate(buffers: &mut MeshBuffers<'_>, settings: &Settings, dt: f64) {
    accumulate_spring_forces(buffers.positions, buffers.forces, buffers.springs, settings);

    for (index, anchored) in buffers.anchored.iter().enumerate() {
        if *anchored {
            continue;
        }
        let force = PointView::new(buffers.forces, index).to_point();
        let mut velocity = PointViewMut::new(buffers.velocities, index);
        let current = velocity.to_point();
        let acceleration = (force - current.scale(settings.friction)).scale(1.0 / MASS);
        let next = current + acceleration.scale(dt);
        velocity.assign(&next);
        PointViewMut::new(buffers.positions, index).translate(next.scale(dt));
    }
}

fn still_moving(buffers: &mut MeshBuffers<'_>, settings: &Settings) -> bool {
    accumulate_spring_forces(buffers.positions, buffers.forces, buffers.springs, settings);

    let limit = SETTLE_EPSILON * SETTLE_EPSILON;
    buffers.anchored.iter().enumerate().any(|(index, anchored)| {
        if *anchored {
            return false;
        }
        let speed_sq = PointView::new(buffers.velocities, index).to_point().length_sq();
        let force_sq = PointView::new(buffers.forces, index).to_point().length_sq();
        speed_sq > limit || force_sq > limit
    })
}
