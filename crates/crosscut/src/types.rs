//! Core data types: mesh geometry, locators, and per-locator results.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Visual framing radius for rendered cross-sections, in mesh units.
///
/// Sets the orthographic camera's visible half-height and its offset
/// from the cutting plane. The cross-section itself is not clipped to
/// this radius.
pub const SLICE_RADIUS: f64 = 200.0;

/// A triangle mesh with indexed vertices and faces.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is [v0, v1, v2] with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Number of vertices in the mesh.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces (triangles) in the mesh.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty (no vertices or faces).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Compute the axis-aligned bounding box.
    /// Returns (min_corner, max_corner) or None if mesh is empty.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.vertices.is_empty() {
            return None;
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for p in &self.vertices[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some((min, max))
    }
}

/// A named 3D pose at which a cross-section is requested.
///
/// Every field may be omitted on the wire: missing coordinates and
/// rotations default to 0.0, a missing id gets a generated fallback
/// during batch processing. Rotations are in degrees.
#[derive(Debug, Clone, Deserialize)]
pub struct Locator {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub rx: f64,
    #[serde(default)]
    pub ry: f64,
    #[serde(default)]
    pub rz: f64,
}

impl Locator {
    /// Create a locator at a position with zero rotation.
    pub fn at(id: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: Some(id.to_string()),
            x,
            y,
            z,
            rx: 0.0,
            ry: 0.0,
            rz: 0.0,
        }
    }

    /// Plane origin derived from the position fields.
    #[inline]
    pub fn origin(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Outcome of processing one locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceStatus {
    Success,
    Error,
}

/// Per-locator result record, in input order within a batch.
///
/// Serializes as `{id, status, image_path}` on success and
/// `{id, status, message}` on error.
#[derive(Debug, Clone, Serialize)]
pub struct SliceRecord {
    pub id: String,
    pub status: SliceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SliceRecord {
    /// A successful record pointing at the rendered image.
    pub fn success(id: String, image_path: String) -> Self {
        Self {
            id,
            status: SliceStatus::Success,
            image_path: Some(image_path),
            message: None,
        }
    }

    /// A failed record with a descriptive message.
    pub fn error(id: String, message: String) -> Self {
        Self {
            id,
            status: SliceStatus::Error,
            image_path: None,
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_bounds() {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(10.0, 5.0, 3.0));
        mesh.vertices.push(Point3::new(-2.0, 8.0, 1.0));

        let (min, max) = mesh.bounds().expect("non-empty mesh");
        assert_eq!(min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(10.0, 8.0, 3.0));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());

        let mut with_verts = Mesh::new();
        with_verts.vertices.push(Point3::origin());
        assert!(with_verts.is_empty()); // no faces
    }

    #[test]
    fn test_locator_defaults_from_json() {
        let loc: Locator = serde_json::from_str(r#"{"id": "L1", "z": 2.5}"#).unwrap();
        assert_eq!(loc.id.as_deref(), Some("L1"));
        assert_eq!(loc.x, 0.0);
        assert_eq!(loc.y, 0.0);
        assert_eq!(loc.z, 2.5);
        assert_eq!(loc.rx, 0.0);

        let bare: Locator = serde_json::from_str("{}").unwrap();
        assert!(bare.id.is_none());
        assert_eq!(bare.origin(), Point3::origin());
    }

    #[test]
    fn test_slice_record_serialization() {
        let ok = SliceRecord::success("a".into(), "out/a.png".into());
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["image_path"], "out/a.png");
        assert!(json.get("message").is_none());

        let err = SliceRecord::error("b".into(), "boom".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "boom");
        assert!(json.get("image_path").is_none());
    }
}
