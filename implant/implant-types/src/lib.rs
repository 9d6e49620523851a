//! Core value types for the implant catalog-scheme engine.
//!
//! This crate provides the foundational types shared by every product line:
//!
//! - [`ShapeLabel`] - Opaque ordered integer identifier for one catalog entity
//! - [`SubRange`] - A named family of stem sizes within a product line
//! - [`LandmarkSet`] - Calibrated landmark points for one stem size
//! - [`ImplantConfiguration`] - The caller-owned planning record
//! - [`Plane3`] - A plane as point + unit normal
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`RigidTransform`] - Rotation + translation, with composition and inverse
//!
//! # Layer 0
//!
//! This crate depends only on `nalgebra` (and optionally `serde`); it carries
//! no engine logic. All coordinates are `f64` millimeters in the component's
//! local frame unless stated otherwise.
//!
//! # Label stability
//!
//! Label integers are allocated once per product line at definition time and
//! never renumbered. Persisted surgical plans reference these integers
//! directly, so changing an existing label's value breaks saved plans.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod config;
mod label;
mod landmark;
mod plane;
mod side;
mod subrange;
mod transform;

pub use bounds::Aabb;
pub use config::ImplantConfiguration;
pub use label::ShapeLabel;
pub use landmark::LandmarkSet;
pub use plane::Plane3;
pub use side::AnatomSide;
pub use subrange::SubRange;
pub use transform::{axis_angle_deg, RigidTransform};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
