//! Plane cross-sections of triangle meshes, rendered to 2D images.
//!
//! This crate takes a triangulated OBJ mesh and a set of *locators*
//! (a named position plus Euler rotation) and, for each locator,
//! cuts the mesh with the plane the locator describes and rasterizes
//! the resulting cross-section into a PNG viewed along the plane
//! normal with an orthographic camera.
//!
//! # Coordinate System
//!
//! Right-handed, Z-up. A locator's rotation is Tait-Bryan, applied
//! Y-axis first and X-axis second to the reference normal `(0,0,1)`;
//! the Z component is an in-plane spin and does not move the normal.
//! Angles are in degrees, positions in the mesh's native units.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use crosscut::{process_locators, Locator};
//!
//! let locators = vec![Locator::at("mid", 0.5, 0.5, 0.5)];
//! let outcome = process_locators(
//!     Path::new("model.obj"),
//!     &locators,
//!     Path::new("out"),
//! );
//! for record in &outcome.records {
//!     println!("{}: {:?}", record.id, record.status);
//! }
//! ```
//!
//! # Logging
//!
//! The crate logs through `tracing`. Set `RUST_LOG=crosscut=debug`
//! for per-locator slicing detail.

pub mod batch;
pub mod error;
pub mod io;
pub mod orient;
pub mod render;
pub mod section;
pub mod types;

pub use batch::{
    process_locators, process_locators_with, BatchOutcome, DefaultEngine, SliceEngine,
};
pub use error::{ErrorCode, SliceError, SliceResult};
pub use io::load_mesh;
pub use orient::{camera_up, plane_normal};
pub use render::{render_section, RenderOptions};
pub use section::{cross_section, CrossSection};
pub use types::{Locator, Mesh, SliceRecord, SliceStatus, SLICE_RADIUS};
