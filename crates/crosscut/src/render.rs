//! Off-screen orthographic rendering of cross-sections.
//!
//! The camera sits on the plane normal at half the framing radius,
//! looking back at the plane origin, with the up vector from
//! [`camera_up`]. Projection is parallel (no perspective), with the
//! visible half-height equal to the radius so the rendered scale is
//! uniform across the image.

use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::debug;

use crate::error::{SliceError, SliceResult};
use crate::orient::camera_up;
use crate::section::CrossSection;

/// Raster output settings.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Contour line color.
    pub line_color: Rgb<u8>,
    /// Background fill color.
    pub background: Rgb<u8>,
    /// Half-width of drawn lines in pixels.
    pub line_half_width: i32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            line_color: Rgb([255, 0, 0]),
            background: Rgb([255, 255, 255]),
            line_half_width: 2,
        }
    }
}

/// Render a cross-section to a PNG file.
///
/// An empty cross-section is a successful no-op: nothing is written
/// and `Ok(())` is returned.
pub fn render_section(
    section: &CrossSection,
    radius: f64,
    output_path: &Path,
    options: &RenderOptions,
) -> SliceResult<()> {
    if section.is_empty() {
        debug!(
            "cross-section at {:?} is empty, skipping render",
            section.plane_origin
        );
        return Ok(());
    }

    // Orthonormal camera basis. The camera looks along -normal, so
    // `right` and `up` span the image plane.
    let up = camera_up(&section.plane_normal);
    let forward = -section.plane_normal;
    let right = forward.cross(&up).normalize();
    let up = right.cross(&forward);

    let half_height = options.height as f64 / 2.0;
    let half_width = options.width as f64 / 2.0;
    // Parallel projection: `radius` world units map to the visible half-height.
    let scale = half_height / radius;

    let mut img = RgbImage::from_pixel(options.width, options.height, options.background);

    for contour in &section.contours {
        for pair in contour.windows(2) {
            let a = project(&pair[0], section, right, up, scale, half_width, half_height);
            let b = project(&pair[1], section, right, up, scale, half_width, half_height);
            draw_segment(&mut img, a, b, options.line_half_width, options.line_color);
        }
    }

    img.save(output_path).map_err(|e| SliceError::ImageWrite {
        path: output_path.to_path_buf(),
        details: e.to_string(),
    })?;

    debug!("saved slice image to {:?}", output_path);
    Ok(())
}

fn project(
    point: &nalgebra::Point3<f64>,
    section: &CrossSection,
    right: nalgebra::Vector3<f64>,
    up: nalgebra::Vector3<f64>,
    scale: f64,
    half_width: f64,
    half_height: f64,
) -> (f64, f64) {
    let rel = point - section.plane_origin;
    let u = rel.dot(&right);
    let v = rel.dot(&up);
    // Screen Y grows downward.
    (half_width + u * scale, half_height - v * scale)
}

/// Stamp a thick line segment by sampling along its length.
fn draw_segment(
    img: &mut RgbImage,
    a: (f64, f64),
    b: (f64, f64),
    half_width: i32,
    color: Rgb<u8>,
) {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let steps = dx.abs().max(dy.abs()).ceil() as usize + 1;

    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = a.0 + dx * t;
        let y = a.1 + dy * t;
        stamp(img, x, y, half_width, color);
    }
}

fn stamp(img: &mut RgbImage, x: f64, y: f64, half_width: i32, color: Rgb<u8>) {
    let cx = x.round() as i64;
    let cy = y.round() as i64;
    let hw = half_width as i64;

    for py in (cy - hw)..=(cy + hw) {
        for px in (cx - hw)..=(cx + hw) {
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::cross_section;
    use crate::types::Mesh;
    use nalgebra::{Point3, Vector3};

    /// Unit cube from (0,0,0) to (1,1,1).
    fn make_unit_cube() -> Mesh {
        let mut mesh = Mesh::new();
        for &(x, y, z) in &[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 1.0),
            (1.0, 1.0, 1.0),
            (0.0, 1.0, 1.0),
        ] {
            mesh.vertices.push(Point3::new(x, y, z));
        }
        for &f in &[
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ] {
            mesh.faces.push(f);
        }
        mesh
    }

    #[test]
    fn test_render_cube_slice_writes_png() {
        let mesh = make_unit_cube();
        let section = cross_section(&mesh, Point3::new(0.5, 0.5, 0.5), Vector3::z());
        assert!(!section.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slice.png");
        render_section(&section, 2.0, &path, &RenderOptions::default()).unwrap();

        assert!(path.exists());
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (800, 600));

        // The outline must actually appear: some pixels are line-colored.
        let red = img.pixels().filter(|p| p.0 == [255, 0, 0]).count();
        assert!(red > 0, "expected line pixels in rendered slice");
    }

    #[test]
    fn test_render_empty_section_is_noop() {
        let mesh = make_unit_cube();
        let section = cross_section(&mesh, Point3::new(500.0, 500.0, 500.0), Vector3::z());
        assert!(section.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.png");
        render_section(&section, 200.0, &path, &RenderOptions::default()).unwrap();

        assert!(!path.exists(), "empty section must not write an image");
    }

    #[test]
    fn test_render_unwritable_path_fails() {
        let mesh = make_unit_cube();
        let section = cross_section(&mesh, Point3::new(0.5, 0.5, 0.5), Vector3::z());

        let err = render_section(
            &section,
            2.0,
            Path::new("/nonexistent-dir/slice.png"),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SliceError::ImageWrite { .. }));
    }
}
