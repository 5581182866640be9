//! Mass-spring mesh deformation for "wobbly" textures.
//!
//! `wobbly` binds a texture to a small grid of point-masses joined by
//! springs. Anchors pin or drag individual mesh points, a fixed-step
//! integrator relaxes the mesh toward equilibrium, and texture coordinates
//! can be mapped to their deformed on-screen position for rendering.
//!
//! # Features
//!
//! - **Spring mesh**: 4x4 grid with axis-aligned springs, grows by inserting
//!   anchored points wired to their two nearest neighbours
//! - **Anchors**: grab an existing point or insert a new one, drag it, drop
//!   the handle to let go
//! - **Deterministic stepping**: fixed 16 ms sub-steps of semi-implicit Euler
//!   with per-spring force clamping; reports when the mesh has settled
//! - **Texture deformation**: O(1) bilinear lookup of any normalized
//!   coordinate
//! - **Zero-copy views**: `PointView` / `PointViewMut` borrow points straight
//!   out of the mesh's flat coordinate buffer
//! - **Observable**: monitor integration via the `StepObserver` trait
//! - **`no_std` compatible**: needs only `alloc`
//!
//! ```
//! use wobbly::{Model, Point, Vector};
//!
//! let mut model = Model::new(Point::new(0.0, 0.0), 200.0, 100.0);
//! let mut anchor = model.grab_anchor(Point::new(0.0, 0.0)).unwrap();
//! anchor.move_by(Vector::new(20.0, 10.0));
//!
//! let mut frames = 0;
//! while model.step(16) {
//!     frames += 1;
//! }
//! assert!(frames > 0);
//!
//! let corner = model.deform_texcoords(Point::new(0.0, 0.0));
//! assert_eq!(corner, Point::new(20.0, 10.0));
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod geometry;
pub mod point_view;
pub mod spring;
pub mod mesh;
pub mod integrator;
pub mod anchor;
pub mod model;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec2, Point, Vector};
pub use geometry::{Coordinates, CoordinatesMut};
pub use point_view::{PointView, PointViewMut};
pub use spring::Spring;
pub use mesh::Mesh;
pub use integrator::Integrator;
pub use anchor::Anchor;
pub use model::Model;
pub use config::Settings;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::{WobblyError, Result};
