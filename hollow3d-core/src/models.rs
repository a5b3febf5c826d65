//! Built-in polyhedra: a hollow rectangular frame, a hollow tetrahedron and a
//! triangular prism

use nalgebra::{Point3, Vector4};

use crate::geometry::{position, Color, Geometry};

/// Hollow rectangular frame ("zero hollow"): an outer box of extent
/// dx x dy x dz with a rectangular hole punched through along z, wall
/// thickness `thickness`. Anchored at `start` (its minimum corner).
pub fn zero_hollow(start: Point3<f32>, dx: f32, dy: f32, dz: f32, thickness: f32) -> Geometry {
    let (sx, sy, sz) = (start.x, start.y, start.z);
    let t = thickness;

    // 16 corners: outer/inner rectangle on the front plane, then the same on
    // the back plane.
    let p: [Vector4<f32>; 16] = [
        position(sx, sy, sz),
        position(sx + dx, sy, sz),
        position(sx + dx, sy + dy, sz),
        position(sx, sy + dy, sz),
        position(sx + t, sy + t, sz),
        position(sx + dx - t, sy + t, sz),
        position(sx + dx - t, sy + dy - t, sz),
        position(sx + t, sy + dy - t, sz),
        position(sx, sy, sz + dz),
        position(sx + dx, sy, sz + dz),
        position(sx + dx, sy + dy, sz + dz),
        position(sx, sy + dy, sz + dz),
        position(sx + t, sy + t, sz + dz),
        position(sx + dx - t, sy + t, sz + dz),
        position(sx + dx - t, sy + dy - t, sz + dz),
        position(sx + t, sy + dy - t, sz + dz),
    ];

    let center = Point3::new(sx + dx / 2.0, sy + dy / 2.0, sz + dz / 2.0);
    let mut geometry = Geometry::with_capacity(center, 16 * 6);

    let green = Color::new(0.0, 1.0, 0.0, 1.0);
    let yellow = Color::new(1.0, 1.0, 0.0, 1.0);
    let cyan = Color::new(0.0, 1.0, 1.0, 1.0);
    let blue = Color::new(0.0, 0.0, 1.0, 1.0);
    let red = Color::new(1.0, 0.0, 0.0, 1.0);
    let magenta = Color::new(1.0, 0.0, 1.0, 1.0);
    let orange = Color::new(1.0, 0.5, 0.0, 1.0);
    let violet = Color::new(0.5, 0.0, 1.0, 1.0);
    let grey = Color::new(0.4, 0.4, 0.4, 1.0);

    // Front ring
    geometry.push_quad(p[0], p[4], p[7], p[3], green);
    geometry.push_quad(p[1], p[2], p[6], p[5], yellow);
    geometry.push_quad(p[2], p[3], p[7], p[6], cyan);
    geometry.push_quad(p[0], p[1], p[5], p[4], blue);

    // Back ring
    geometry.push_quad(p[8], p[11], p[15], p[12], green);
    geometry.push_quad(p[9], p[13], p[14], p[10], yellow);
    geometry.push_quad(p[10], p[14], p[15], p[11], cyan);
    geometry.push_quad(p[8], p[12], p[13], p[9], blue);

    // Outer walls
    geometry.push_quad(p[0], p[3], p[11], p[8], red);
    geometry.push_quad(p[1], p[9], p[10], p[2], magenta);
    geometry.push_quad(p[2], p[10], p[11], p[3], orange);
    geometry.push_quad(p[0], p[8], p[9], p[1], violet);

    // Inner walls of the hole
    geometry.push_quad(p[4], p[12], p[15], p[7], grey);
    geometry.push_quad(p[5], p[6], p[14], p[13], grey);
    geometry.push_quad(p[6], p[7], p[15], p[14], grey);
    geometry.push_quad(p[4], p[5], p[13], p[12], grey);

    geometry
}

/// Hollow regular tetrahedron centered on `center`: four apexes on
/// alternating corners of a cube of half-extent sqrt(2)/2 * side, each face a
/// triangular ring of wall thickness `thickness`.
pub fn tetrahedron(center: Point3<f32>, side: f32, thickness: f32) -> Geometry {
    let big = std::f32::consts::SQRT_2 / 2.0 * side;
    let small = std::f32::consts::SQRT_2 / 2.0 * (side - thickness);
    let (b, s) = (big, small);

    let at = |x: f32, y: f32, z: f32| position(center.x + x, center.y + y, center.z + z);

    // 0..3: outer apexes; 4..15: the inner triangle corner nearest a given
    // apex on a given face.
    let p: [Vector4<f32>; 16] = [
        at(b, b, b),
        at(-b, -b, b),
        at(b, -b, -b),
        at(-b, b, -b),
        at(s, 2.0 * s - b, s),
        at(2.0 * s - b, s, s),
        at(s, s, 2.0 * s - b),
        at(-s, -s, 2.0 * s - b),
        at(b - 2.0 * s, -s, s),
        at(-s, b - 2.0 * s, s),
        at(s, b - 2.0 * s, -s),
        at(s, -s, b - 2.0 * s),
        at(2.0 * s - b, -s, -s),
        at(-s, s, b - 2.0 * s),
        at(-s, 2.0 * s - b, -s),
        at(b - 2.0 * s, s, -s),
    ];

    let outer = Color::new(0.0, 0.0, 1.0, 1.0);
    let inner = Color::new(0.0, 0.0, 0.5, 1.0);

    let mut geometry = Geometry::with_capacity(center, 120);

    // Each face is a ring of three quads between the outer edge and the
    // face's inner triangle.
    let mut ring = |apexes: [usize; 3], hole: [usize; 3]| {
        let [a, b, c] = apexes;
        let [na, nb, nc] = hole;
        geometry.push_quad(p[a], p[b], p[nb], p[na], outer);
        geometry.push_quad(p[b], p[c], p[nc], p[nb], outer);
        geometry.push_quad(p[c], p[a], p[na], p[nc], outer);
    };
    ring([0, 2, 1], [4, 11, 8]);
    ring([1, 2, 3], [7, 12, 14]);
    ring([2, 0, 3], [10, 6, 15]);
    ring([3, 0, 1], [13, 5, 9]);

    // Caps behind each apex
    geometry.push_triangle(p[6], p[5], p[4], inner);
    geometry.push_triangle(p[7], p[8], p[9], inner);
    geometry.push_triangle(p[10], p[11], p[12], inner);
    geometry.push_triangle(p[15], p[14], p[13], inner);

    // Walls along each edge of the solid
    geometry.push_quad(p[4], p[5], p[9], p[8], inner);
    geometry.push_quad(p[7], p[9], p[13], p[14], inner);
    geometry.push_quad(p[5], p[6], p[15], p[13], inner);
    geometry.push_quad(p[8], p[7], p[12], p[11], inner);
    geometry.push_quad(p[6], p[4], p[11], p[10], inner);
    geometry.push_quad(p[10], p[12], p[14], p[15], inner);

    geometry
}

/// Solid triangular prism centered on `center`: an equilateral cross-section
/// of edge `side` in the xy plane, extruded over `length` along z.
pub fn triangular_prism(center: Point3<f32>, side: f32, length: f32) -> Geometry {
    let radius = side / 3.0_f32.sqrt();
    let half = length / 2.0;

    let corner = |angle: f32, z: f32| {
        position(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
            center.z + z,
        )
    };

    use std::f32::consts::{FRAC_PI_2, PI};
    let step = 2.0 * PI / 3.0;
    let angles = [FRAC_PI_2, FRAC_PI_2 + step, FRAC_PI_2 + 2.0 * step];
    let front: Vec<Vector4<f32>> = angles.iter().map(|&a| corner(a, half)).collect();
    let back: Vec<Vector4<f32>> = angles.iter().map(|&a| corner(a, -half)).collect();

    let red = Color::new(1.0, 0.2, 0.2, 1.0);
    let green = Color::new(0.2, 1.0, 0.2, 1.0);
    let blue = Color::new(0.2, 0.2, 1.0, 1.0);
    let yellow = Color::new(1.0, 1.0, 0.2, 1.0);
    let cyan = Color::new(0.2, 1.0, 1.0, 1.0);

    let mut geometry = Geometry::with_capacity(center, 24);
    geometry.push_triangle(front[0], front[1], front[2], red);
    geometry.push_triangle(back[0], back[2], back[1], green);
    geometry.push_quad(front[0], back[0], back[1], front[1], blue);
    geometry.push_quad(front[1], back[1], back[2], front[2], yellow);
    geometry.push_quad(front[2], back[2], back[0], front[0], cyan);

    geometry
}
