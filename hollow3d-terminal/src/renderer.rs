//! Cell rasterizer for terminal rendering

use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use hollow3d_core::{Color, Shape, Transform};
use nalgebra::{Matrix4, Vector3, Vector4};
use std::io::Write;

const BLOCK: char = '\u{2588}';

/// Rasterizes shapes into a grid of colored terminal cells. Buffers are
/// cleared and rebuilt every frame.
pub struct CellRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    color_buffer: Vec<Option<(u8, u8, u8)>>,
}

impl CellRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::NEG_INFINITY; size],
            color_buffer: vec![None; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::NEG_INFINITY;
            self.color_buffer[i] = None;
        }
    }

    /// Cells covered by at least one triangle
    pub fn filled_cells(&self) -> usize {
        self.color_buffer.iter().filter(|c| c.is_some()).count()
    }

    /// Project the shape through its single per-draw matrix and rasterize
    /// every triangle
    pub fn render_shape(&mut self, shape: &Shape) {
        let matrix = shape.render_matrix(self.width as f32, self.height as f32);
        // Light direction is fixed at (0, 0, 1) in view space; normals are
        // carried there by the transposed-inverse of view * model.
        let normal_matrix = shape
            .shading
            .then(|| Transform::normal_matrix(&(shape.view_matrix() * shape.model_matrix())));

        for triangle in 0..shape.geometry.triangle_count() {
            self.render_triangle(shape, triangle, &matrix, normal_matrix.as_ref());
        }
    }

    fn render_triangle(
        &mut self,
        shape: &Shape,
        triangle: usize,
        matrix: &Matrix4<f32>,
        normal_matrix: Option<&Matrix4<f32>>,
    ) {
        let base = triangle * 3;
        let mut screen = [(0.0f32, 0.0f32, 0.0f32); 3];
        let mut colors = [Color::new(0.0, 0.0, 0.0, 0.0); 3];

        for i in 0..3 {
            let vertex = &shape.geometry.vertices[base + i];
            let clip = Transform::matvec(matrix, &vertex.position);
            if clip.w.abs() < 1e-6 {
                return;
            }
            let ndc = clip.xyz() / clip.w;
            screen[i] = (
                (ndc.x + 1.0) * 0.5 * self.width as f32,
                (1.0 - ndc.y) * 0.5 * self.height as f32,
                ndc.z,
            );
            colors[i] = vertex.color;
        }

        let brightness = match normal_matrix {
            Some(nm) => {
                let normal = shape.geometry.face_normal(triangle);
                let view_normal = Transform::matvec(nm, &Vector4::new(normal.x, normal.y, normal.z, 0.0))
                    .xyz()
                    .try_normalize(1e-12)
                    .unwrap_or_else(Vector3::zeros);
                view_normal.dot(&Vector3::new(0.0, 0.0, 1.0)).max(0.0)
            }
            None => 1.0,
        };

        self.rasterize_triangle(&screen, &colors, brightness);
    }

    fn rasterize_triangle(
        &mut self,
        screen: &[(f32, f32, f32); 3],
        colors: &[Color; 3],
        brightness: f32,
    ) {
        let (v0, v1, v2) = (screen[0], screen[1], screen[2]);

        // Bounding box, clipped to screen bounds
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        let idx = y as usize * self.width + x as usize;
                        // Camera looks down -z, so larger NDC depth is closer
                        if depth > self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            let color = Color::new(
                                w0 * colors[0].r + w1 * colors[1].r + w2 * colors[2].r,
                                w0 * colors[0].g + w1 * colors[1].g + w2 * colors[2].g,
                                w0 * colors[0].b + w1 * colors[1].b + w2 * colors[2].b,
                                1.0,
                            )
                            .shaded(brightness);
                            self.color_buffer[idx] = Some((
                                (color.r.clamp(0.0, 1.0) * 255.0) as u8,
                                (color.g.clamp(0.0, 1.0) * 255.0) as u8,
                                (color.b.clamp(0.0, 1.0) * 255.0) as u8,
                            ));
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                match self.color_buffer[y * self.width + x] {
                    Some((r, g, b)) => {
                        writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                        writer.queue(Print(BLOCK))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Barycentric coordinates of a point in a screen-space triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hollow3d_core::geometry::{position, Geometry};
    use nalgebra::Point3;

    fn quad_shape(z: f32, color: Color) -> Shape {
        // A quad covering the middle of an 80x40 canvas
        let mut geometry = Geometry::new(Point3::new(40.0, 20.0, z));
        geometry.push_quad(
            position(20.0, 10.0, z),
            position(60.0, 10.0, z),
            position(60.0, 30.0, z),
            position(20.0, 30.0, z),
            color,
        );
        Shape::new("quad", geometry)
    }

    #[test]
    fn test_quad_fills_cells() {
        let mut renderer = CellRenderer::new(80, 40);
        renderer.render_shape(&quad_shape(0.0, Color::new(1.0, 0.0, 0.0, 1.0)));
        // A 40x20 quad on an 80x40 grid covers roughly 800 cells
        assert!(renderer.filled_cells() > 600);
    }

    #[test]
    fn test_nearer_shape_wins_depth_test() {
        let mut renderer = CellRenderer::new(80, 40);
        renderer.render_shape(&quad_shape(-10.0, Color::new(1.0, 0.0, 0.0, 1.0)));
        // Larger z is closer to the camera (looking down -z)
        renderer.render_shape(&quad_shape(10.0, Color::new(0.0, 1.0, 0.0, 1.0)));
        let sample = renderer.color_buffer[20 * 80 + 40].unwrap();
        assert_eq!(sample, (0, 255, 0));
    }

    #[test]
    fn test_clear_empties_buffers() {
        let mut renderer = CellRenderer::new(80, 40);
        renderer.render_shape(&quad_shape(0.0, Color::new(1.0, 0.0, 0.0, 1.0)));
        renderer.clear();
        assert_eq!(renderer.filled_cells(), 0);
    }

    #[test]
    fn test_barycentric_centroid() {
        let (w0, w1, w2) =
            barycentric((0.0, 0.0), (3.0, 0.0), (0.0, 3.0), (1.0, 1.0)).unwrap();
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
    }

    #[test]
    fn test_barycentric_degenerate_triangle_is_rejected() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 0.0)).is_none());
    }
}
