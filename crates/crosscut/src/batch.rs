//! Per-locator batch processing.
//!
//! Iterates locators in input order, deriving a cutting plane from
//! each and driving the slicing/rendering back-end. Failures are
//! explicit result values recorded per locator; one bad locator
//! never aborts the rest of the batch.

use std::path::Path;

use nalgebra::{Point3, Vector3};
use tracing::{debug, info, warn};

use crate::error::SliceResult;
use crate::orient::plane_normal;
use crate::render::{render_section, RenderOptions};
use crate::section::{cross_section, CrossSection};
use crate::types::{Locator, Mesh, SliceRecord, SLICE_RADIUS};

/// Narrow interface over the geometry/render back-end.
///
/// The batch processor only sees this trait, so tests can swap in a
/// faulty or recording engine without touching the orchestration.
pub trait SliceEngine {
    /// Load a mesh from a file path.
    fn load_mesh(&self, path: &Path) -> SliceResult<Mesh>;

    /// Cut the mesh with a plane. An empty section is a valid result.
    fn slice(
        &self,
        mesh: &Mesh,
        origin: Point3<f64>,
        normal: Vector3<f64>,
    ) -> SliceResult<CrossSection>;

    /// Render a cross-section to an image file.
    fn render(&self, section: &CrossSection, radius: f64, output_path: &Path) -> SliceResult<()>;
}

/// Production engine backed by the crate's own loader, slicer, and
/// rasterizer.
#[derive(Debug, Default)]
pub struct DefaultEngine {
    pub options: RenderOptions,
}

impl SliceEngine for DefaultEngine {
    fn load_mesh(&self, path: &Path) -> SliceResult<Mesh> {
        crate::io::load_mesh(path)
    }

    fn slice(
        &self,
        mesh: &Mesh,
        origin: Point3<f64>,
        normal: Vector3<f64>,
    ) -> SliceResult<CrossSection> {
        Ok(cross_section(mesh, origin, normal))
    }

    fn render(&self, section: &CrossSection, radius: f64, output_path: &Path) -> SliceResult<()> {
        render_section(section, radius, output_path, &self.options)
    }
}

/// Result of processing a batch of locators.
#[derive(Debug)]
pub struct BatchOutcome {
    /// False only when the batch as a whole could not run, i.e. the
    /// mesh itself failed to load. Per-locator failures leave this
    /// true.
    pub ok: bool,

    /// One record per input locator, in input order.
    pub records: Vec<SliceRecord>,
}

/// Process a batch of locators with the default engine.
///
/// Writes one `<output_dir>/<locator_id>.png` per successful locator.
pub fn process_locators(mesh_path: &Path, locators: &[Locator], output_dir: &Path) -> BatchOutcome {
    process_locators_with(&DefaultEngine::default(), mesh_path, locators, output_dir)
}

/// Process a batch of locators with a caller-supplied engine.
pub fn process_locators_with<E: SliceEngine>(
    engine: &E,
    mesh_path: &Path,
    locators: &[Locator],
    output_dir: &Path,
) -> BatchOutcome {
    info!(
        "processing {} locators for {:?}",
        locators.len(),
        mesh_path
    );

    let mesh = match engine.load_mesh(mesh_path) {
        Ok(mesh) => mesh,
        Err(e) => {
            warn!("mesh load failed, aborting batch: {}", e);
            let message = format!("failed to load mesh: {}", e);
            let records = locators
                .iter()
                .enumerate()
                .map(|(index, locator)| {
                    SliceRecord::error(locator_id(locator, index), message.clone())
                })
                .collect();
            return BatchOutcome { ok: false, records };
        }
    };

    let mut records = Vec::with_capacity(locators.len());

    for (index, locator) in locators.iter().enumerate() {
        let id = locator_id(locator, index);
        let origin = locator.origin();
        let normal = plane_normal(locator.rx, locator.ry, locator.rz);
        let image_path = output_dir.join(format!("{}.png", id));

        debug!(
            "locator '{}': origin {:?}, normal {:?}",
            id, origin, normal
        );

        match slice_one(engine, &mesh, origin, normal, &image_path) {
            Ok(()) => {
                records.push(SliceRecord::success(id, image_path.display().to_string()));
            }
            Err(e) => {
                warn!("locator '{}' failed: {}", id, e);
                records.push(SliceRecord::error(
                    id.clone(),
                    format!("failed to create slice image for {}: {}", id, e),
                ));
            }
        }
    }

    BatchOutcome { ok: true, records }
}

fn slice_one<E: SliceEngine>(
    engine: &E,
    mesh: &Mesh,
    origin: Point3<f64>,
    normal: Vector3<f64>,
    image_path: &Path,
) -> SliceResult<()> {
    let section = engine.slice(mesh, origin, normal)?;
    if section.is_empty() {
        debug!("plane at {:?} misses the mesh", origin);
    }
    engine.render(&section, SLICE_RADIUS, image_path)
}

/// Locator id, falling back to an index-based name that is unique
/// within one batch.
fn locator_id(locator: &Locator, index: usize) -> String {
    match &locator.id {
        Some(id) if !id.is_empty() => id.clone(),
        _ => format!("locator_{}", index),
    }
}
