//! Permissive OBJ loading.
//!
//! Mesh files arriving from user uploads occasionally carry broken
//! text encodings. Loading therefore reads the file as raw bytes,
//! replaces undecodable sequences, and stages the cleaned text into
//! a scratch file that the parser consumes. The scratch file is
//! removed on every exit path, success or failure.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{SliceError, SliceResult};
use crate::types::Mesh;

/// Load a triangulated mesh from an OBJ file.
///
/// Fails with [`SliceError::EmptyMesh`] if the parsed mesh has no
/// vertices or faces.
pub fn load_mesh(path: &Path) -> SliceResult<Mesh> {
    let raw = std::fs::read(path).map_err(|e| SliceError::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Lossy decode: undecodable bytes become replacement characters
    // instead of failing the whole load.
    let text = String::from_utf8_lossy(&raw);

    let mut scratch = tempfile::Builder::new()
        .suffix(".obj")
        .tempfile()
        .map_err(|e| SliceError::ScratchFile { source: e })?;
    scratch
        .write_all(text.as_bytes())
        .map_err(|e| SliceError::ScratchFile { source: e })?;

    let (models, _materials) = tobj::load_obj(
        scratch.path(),
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| SliceError::ParseError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    // Scratch file is deleted when `scratch` drops, on every path.

    if models.is_empty() {
        return Err(SliceError::EmptyMesh {
            details: "OBJ file contains no models".to_string(),
        });
    }

    // Merge all models into a single mesh.
    let mut mesh = Mesh::new();
    let mut vertex_offset = 0u32;

    for model in &models {
        debug!("OBJ model '{}': loading", model.name);

        let obj_mesh = &model.mesh;

        for chunk in obj_mesh.positions.chunks(3) {
            if chunk.len() == 3 {
                mesh.vertices.push(nalgebra::Point3::new(
                    chunk[0] as f64,
                    chunk[1] as f64,
                    chunk[2] as f64,
                ));
            }
        }

        for chunk in obj_mesh.indices.chunks(3) {
            if chunk.len() == 3 {
                mesh.faces.push([
                    chunk[0] + vertex_offset,
                    chunk[1] + vertex_offset,
                    chunk[2] + vertex_offset,
                ]);
            }
        }

        vertex_offset = mesh.vertices.len() as u32;
    }

    if mesh.is_empty() {
        return Err(SliceError::EmptyMesh {
            details: "mesh has no vertices or faces".to_string(),
        });
    }

    info!(
        "Loaded mesh from {:?}: {} vertices, {} faces",
        path,
        mesh.vertex_count(),
        mesh.face_count()
    );
    if let Some((min, max)) = mesh.bounds() {
        debug!(
            "Bounding box: [{:.1}, {:.1}, {:.1}] to [{:.1}, {:.1}, {:.1}]",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    Ok(mesh)
}
