//! The `/slice` request handler: validation, path resolution, and
//! mapping of batch results onto HTTP responses.

use std::path::{Path, PathBuf};

use crosscut::{process_locators, Locator};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

/// Incoming request body. Both fields are validated by hand so that
/// absence surfaces as a 400, not a deserialization error.
#[derive(Deserialize)]
struct SliceRequest {
    #[serde(default)]
    obj_file_path: Option<String>,
    #[serde(default)]
    locators: Option<Vec<Locator>>,
}

/// Handle a `POST /slice` body. Returns the HTTP status code and the
/// JSON payload.
pub fn handle_slice(body: &str, base_dir: &Path) -> (u16, serde_json::Value) {
    let request: SliceRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => {
            return (400, json!({"error": format!("Invalid JSON payload: {}", e)}));
        }
    };

    let obj_file_path = request.obj_file_path.unwrap_or_default();
    let locators = request.locators.unwrap_or_default();
    if obj_file_path.is_empty() || locators.is_empty() {
        return (400, json!({"error": "Missing obj_file_path or locators"}));
    }

    // Resolve before touching the filesystem: an unresolvable mesh
    // path must not create the output directory.
    let mesh_path = match resolve_mesh_path(&obj_file_path, base_dir) {
        Some(path) => path,
        None => {
            return (
                404,
                json!({"error": format!("OBJ file not found at '{}'", obj_file_path)}),
            );
        }
    };

    info!(
        "processing {:?} with {} locators",
        mesh_path,
        locators.len()
    );

    let output_dir = base_dir.join("data").join("generated_slices");
    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        error!("failed to create output directory {:?}: {}", output_dir, e);
        return (
            500,
            json!({
                "error": "An unexpected server error occurred.",
                "details": e.to_string(),
            }),
        );
    }

    let outcome = process_locators(&mesh_path, &locators, &output_dir);

    if outcome.ok {
        let file_name = mesh_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| obj_file_path.clone());
        (
            200,
            json!({
                "message": format!("Slicing process completed for {}.", file_name),
                "obj_file_processed": mesh_path.display().to_string(),
                "num_locators_processed": locators.len(),
                "slice_results": outcome.records,
            }),
        )
    } else {
        (
            500,
            json!({
                "error": "Slicing process encountered errors.",
                "obj_file_processed": mesh_path.display().to_string(),
                "details": outcome.records,
            }),
        )
    }
}

/// Resolve a client-supplied mesh path: absolute as-is, then relative
/// to the base directory, then relative to `<base>/data`.
fn resolve_mesh_path(input: &str, base_dir: &Path) -> Option<PathBuf> {
    let path = Path::new(input);
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    let from_base = base_dir.join(input);
    if from_base.exists() {
        return Some(from_base);
    }

    let from_data = base_dir.join("data").join(input);
    from_data.exists().then_some(from_data)
}
