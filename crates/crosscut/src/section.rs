//! Plane/mesh intersection.
//!
//! Cutting a triangle mesh with a plane yields line segments, one
//! per crossed face, which are chained into polyline contours. A
//! plane that misses the mesh entirely yields an empty cross-section;
//! that is a valid outcome, not an error.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::types::Mesh;

/// Result of cutting a mesh with a plane.
#[derive(Debug, Clone)]
pub struct CrossSection {
    /// Chained polyline contours lying in the plane.
    pub contours: Vec<Vec<Point3<f64>>>,
    /// Plane origin point.
    pub plane_origin: Point3<f64>,
    /// Unit plane normal.
    pub plane_normal: Vector3<f64>,
}

impl CrossSection {
    /// Whether the plane missed the mesh.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Total number of points across all contours.
    pub fn point_count(&self) -> usize {
        self.contours.iter().map(|c| c.len()).sum()
    }
}

/// Cut a mesh with the plane given by an origin and normal.
///
/// The normal is normalized internally. Returns an empty
/// cross-section when no face crosses the plane.
pub fn cross_section(
    mesh: &Mesh,
    plane_origin: Point3<f64>,
    plane_normal: Vector3<f64>,
) -> CrossSection {
    let normal = plane_normal.normalize();
    let mut segments: Vec<(Point3<f64>, Point3<f64>)> = Vec::new();

    for face in &mesh.faces {
        let v0 = mesh.vertices[face[0] as usize];
        let v1 = mesh.vertices[face[1] as usize];
        let v2 = mesh.vertices[face[2] as usize];

        let mut intersections = Vec::new();
        for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
            if let Some(p) = plane_edge_intersection(plane_origin, normal, a, b) {
                intersections.push(p);
            }
        }

        // Exactly two edge crossings give a segment through the face.
        if intersections.len() == 2 {
            segments.push((intersections[0], intersections[1]));
        }
    }

    let contours = chain_segments(&segments);

    debug!(
        "cross-section at {:?}: {} segments, {} contours",
        plane_origin,
        segments.len(),
        contours.len()
    );

    CrossSection {
        contours,
        plane_origin,
        plane_normal: normal,
    }
}

fn plane_edge_intersection(
    plane_point: Point3<f64>,
    plane_normal: Vector3<f64>,
    a: Point3<f64>,
    b: Point3<f64>,
) -> Option<Point3<f64>> {
    let d_a = (a - plane_point).dot(&plane_normal);
    let d_b = (b - plane_point).dot(&plane_normal);

    if d_a * d_b > 0.0 {
        return None; // Same side of plane
    }

    if (d_a - d_b).abs() < 1e-10 {
        return None; // Edge parallel to plane
    }

    let t = d_a / (d_a - d_b);
    let direction = b - a;
    Some(Point3::from(a.coords + direction * t))
}

/// Chain loose segments into polyline contours by matching endpoints.
fn chain_segments(segments: &[(Point3<f64>, Point3<f64>)]) -> Vec<Vec<Point3<f64>>> {
    if segments.is_empty() {
        return Vec::new();
    }

    let mut remaining: Vec<_> = segments.to_vec();
    let mut contours = Vec::new();

    while !remaining.is_empty() {
        let mut contour = Vec::new();
        let first = remaining.remove(0);
        contour.push(first.0);
        contour.push(first.1);

        let mut changed = true;
        while changed {
            changed = false;

            let start = *contour.first().unwrap();
            let end = *contour.last().unwrap();
            let eps = 1e-6;

            for i in (0..remaining.len()).rev() {
                let seg = &remaining[i];

                if (seg.0 - end).norm() < eps {
                    contour.push(seg.1);
                    remaining.remove(i);
                    changed = true;
                } else if (seg.1 - end).norm() < eps {
                    contour.push(seg.0);
                    remaining.remove(i);
                    changed = true;
                } else if (seg.0 - start).norm() < eps {
                    contour.insert(0, seg.1);
                    remaining.remove(i);
                    changed = true;
                } else if (seg.1 - start).norm() < eps {
                    contour.insert(0, seg.0);
                    remaining.remove(i);
                    changed = true;
                }
            }
        }

        contours.push(contour);
    }

    contours
}
