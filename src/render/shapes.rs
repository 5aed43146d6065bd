//! The basic shape meshes the scene is built from.
//!
//! Geometry is generated on the CPU as indexed triangles with a position, normal and UV per
//! vertex. [`ShapeMeshes`] uploads every [`Primitive`] at most once and draws it as often as the
//! scene asks.

use std::{collections::HashMap, f32::consts::TAU, sync::Arc};

use glam::{Vec2, Vec3};
use glow::HasContext;

use crate::abs::{Mesh, Vertex};

const ROUND_SEGMENTS: u32 = 36;
const TORUS_MAIN_SEGMENTS: u32 = 48;
const TORUS_TUBE_SEGMENTS: u32 = 16;
const TORUS_TUBE_RADIUS: f32 = 0.1;
const TAPERED_TOP_RADIUS: f32 = 0.5;

/// The kinds of shapes available to the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// XZ plane at y = 0 spanning -1..1, facing +Y.
    Plane,
    /// Unit cube centered on the origin.
    Box,
    /// Radius 1, from y = 0 to y = 1, capped.
    Cylinder,
    /// Bottom radius 1, top radius 0.5, from y = 0 to y = 1, capped.
    TaperedCylinder,
    /// Main radius 1, tube radius 0.1, lying in the XY plane.
    Torus,
}

impl Primitive {
    pub const ALL: [Primitive; 5] = [
        Primitive::Plane,
        Primitive::Cylinder,
        Primitive::Torus,
        Primitive::Box,
        Primitive::TaperedCylinder,
    ];

    /// Generates the geometry for this primitive.
    pub fn geometry(self) -> ShapeData {
        match self {
            Primitive::Plane => plane(),
            Primitive::Box => cuboid(),
            Primitive::Cylinder => frustum(1.0, 1.0, ROUND_SEGMENTS),
            Primitive::TaperedCylinder => frustum(1.0, TAPERED_TOP_RADIUS, ROUND_SEGMENTS),
            Primitive::Torus => torus(
                1.0,
                TORUS_TUBE_RADIUS,
                TORUS_MAIN_SEGMENTS,
                TORUS_TUBE_SEGMENTS,
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct ShapeVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex for ShapeVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<ShapeVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            // Normal attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                3,
                glow::FLOAT,
                false,
                stride,
                std::mem::size_of::<Vec3>() as i32,
            );

            // UV attribute
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                (2 * std::mem::size_of::<Vec3>()) as i32,
            );
        }
    }
}

/// CPU-side geometry of a shape.
#[derive(Clone, Debug, Default)]
pub struct ShapeData {
    pub vertices: Vec<ShapeVertex>,
    pub indices: Vec<u32>,
}

impl ShapeData {
    fn push(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(ShapeVertex {
            position,
            normal,
            uv,
        });
        index
    }

    /// Two triangles for a counter-clockwise quad `a b c d`.
    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
}

fn plane() -> ShapeData {
    let mut data = ShapeData::default();
    let a = data.push(Vec3::new(-1.0, 0.0, 1.0), Vec3::Y, Vec2::new(0.0, 0.0));
    let b = data.push(Vec3::new(1.0, 0.0, 1.0), Vec3::Y, Vec2::new(1.0, 0.0));
    let c = data.push(Vec3::new(1.0, 0.0, -1.0), Vec3::Y, Vec2::new(1.0, 1.0));
    let d = data.push(Vec3::new(-1.0, 0.0, -1.0), Vec3::Y, Vec2::new(0.0, 1.0));
    data.quad(a, b, c, d);
    data
}

fn cuboid() -> ShapeData {
    // (normal, u axis, v axis) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut data = ShapeData::default();
    for (normal, u, v) in faces {
        let center = normal * 0.5;
        let corner = |su: f32, sv: f32| center + u * (0.5 * su) + v * (0.5 * sv);
        let a = data.push(corner(-1.0, -1.0), normal, Vec2::new(0.0, 0.0));
        let b = data.push(corner(1.0, -1.0), normal, Vec2::new(1.0, 0.0));
        let c = data.push(corner(1.0, 1.0), normal, Vec2::new(1.0, 1.0));
        let d = data.push(corner(-1.0, 1.0), normal, Vec2::new(0.0, 1.0));
        data.quad(a, b, c, d);
    }
    data
}

/// A capped cone segment from y = 0 to y = 1. Equal radii give a cylinder.
fn frustum(bottom_radius: f32, top_radius: f32, segments: u32) -> ShapeData {
    let mut data = ShapeData::default();
    let slope = bottom_radius - top_radius;
    let ring = |i: u32| {
        let theta = i as f32 / segments as f32 * TAU;
        (theta.cos(), theta.sin())
    };

    // Side. The seam is duplicated so UVs wrap cleanly.
    let mut columns = Vec::with_capacity(segments as usize + 1);
    for i in 0..=segments {
        let (c, s) = ring(i);
        let normal = Vec3::new(c, slope, s).normalize();
        let u = i as f32 / segments as f32;
        let bottom = data.push(
            Vec3::new(bottom_radius * c, 0.0, bottom_radius * s),
            normal,
            Vec2::new(u, 0.0),
        );
        let top = data.push(
            Vec3::new(top_radius * c, 1.0, top_radius * s),
            normal,
            Vec2::new(u, 1.0),
        );
        columns.push((bottom, top));
    }
    for pair in columns.windows(2) {
        let (b0, t0) = pair[0];
        let (b1, t1) = pair[1];
        data.quad(b0, t0, t1, b1);
    }

    // Caps
    for (y, radius, normal) in [(0.0, bottom_radius, Vec3::NEG_Y), (1.0, top_radius, Vec3::Y)] {
        let center = data.push(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5));
        let first = data.vertices.len() as u32;
        for i in 0..segments {
            let (c, s) = ring(i);
            data.push(
                Vec3::new(radius * c, y, radius * s),
                normal,
                Vec2::new(0.5 + 0.5 * c, 0.5 + 0.5 * s),
            );
        }
        for i in 0..segments {
            let p0 = first + i;
            let p1 = first + (i + 1) % segments;
            if normal.y > 0.0 {
                data.indices.extend_from_slice(&[center, p1, p0]);
            } else {
                data.indices.extend_from_slice(&[center, p0, p1]);
            }
        }
    }

    data
}

fn torus(main_radius: f32, tube_radius: f32, main_segments: u32, tube_segments: u32) -> ShapeData {
    let mut data = ShapeData::default();
    for i in 0..=main_segments {
        let phi = i as f32 / main_segments as f32 * TAU;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let ring_center = Vec3::new(main_radius * cos_phi, main_radius * sin_phi, 0.0);
        for j in 0..=tube_segments {
            let theta = j as f32 / tube_segments as f32 * TAU;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let normal = Vec3::new(cos_theta * cos_phi, cos_theta * sin_phi, sin_theta);
            data.push(
                ring_center + normal * tube_radius,
                normal,
                Vec2::new(
                    i as f32 / main_segments as f32,
                    j as f32 / tube_segments as f32,
                ),
            );
        }
    }

    let row = tube_segments + 1;
    for i in 0..main_segments {
        for j in 0..tube_segments {
            let a = i * row + j;
            let b = (i + 1) * row + j;
            data.quad(a, b, b + 1, a + 1);
        }
    }
    data
}

/// The mesh-primitive boundary the scene draws through.
pub trait MeshLibrary {
    /// Makes `primitive` drawable. Loading an already loaded primitive is a no-op.
    fn load(&mut self, primitive: Primitive) -> Result<(), String>;

    /// Draws `primitive` with the currently bound program and uniforms.
    fn draw(&self, primitive: Primitive);
}

/// GPU meshes for the basic shapes, each uploaded once and shared by every draw.
pub struct ShapeMeshes {
    gl: Arc<glow::Context>,
    meshes: HashMap<Primitive, Mesh>,
}

impl ShapeMeshes {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self {
            gl: Arc::clone(gl),
            meshes: HashMap::new(),
        }
    }
}

impl MeshLibrary for ShapeMeshes {
    fn load(&mut self, primitive: Primitive) -> Result<(), String> {
        if self.meshes.contains_key(&primitive) {
            return Ok(());
        }
        let data = primitive.geometry();
        let mesh = Mesh::new(&self.gl, &data.vertices, &data.indices, glow::TRIANGLES)?;
        log::debug!(
            "loaded {primitive:?} mesh ({} vertices, {} indices)",
            data.vertices.len(),
            mesh.index_count()
        );
        self.meshes.insert(primitive, mesh);
        Ok(())
    }

    fn draw(&self, primitive: Primitive) {
        match self.meshes.get(&primitive) {
            Some(mesh) => mesh.draw(),
            None => log::warn!("{primitive:?} mesh drawn before it was loaded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(data: &ShapeData) {
        assert!(!data.vertices.is_empty());
        assert_eq!(data.indices.len() % 3, 0);
        let count = data.vertices.len() as u32;
        assert!(data.indices.iter().all(|&i| i < count));
        for v in &data.vertices {
            assert!((v.normal.length() - 1.0).abs() < 1e-4, "{:?}", v.normal);
        }
    }

    /// Every non-degenerate triangle winds counter-clockwise around its vertex normals.
    fn assert_front_faces_out(data: &ShapeData) {
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| data.vertices[tri[k] as usize]);
            let face = (b.position - a.position).cross(c.position - a.position);
            if face.length() < 1e-6 {
                continue;
            }
            let normal = a.normal + b.normal + c.normal;
            assert!(face.dot(normal) > 0.0, "triangle {tri:?} faces inward");
        }
    }

    #[test]
    fn test_all_primitives_well_formed() {
        for primitive in Primitive::ALL {
            let data = primitive.geometry();
            assert_well_formed(&data);
            assert_front_faces_out(&data);
        }
    }

    #[test]
    fn test_plane_and_box_counts() {
        let plane = Primitive::Plane.geometry();
        assert_eq!((plane.vertices.len(), plane.indices.len()), (4, 6));
        assert!(plane.vertices.iter().all(|v| v.position.y == 0.0));

        let cube = Primitive::Box.geometry();
        assert_eq!((cube.vertices.len(), cube.indices.len()), (24, 36));
        assert!(
            cube.vertices
                .iter()
                .all(|v| v.position.abs().max_element() <= 0.5 + 1e-6)
        );
    }

    #[test]
    fn test_cylinder_extents() {
        let data = Primitive::Cylinder.geometry();
        assert_eq!(data.indices.len(), 12 * ROUND_SEGMENTS as usize);
        for v in &data.vertices {
            assert!((0.0..=1.0).contains(&v.position.y));
            assert!(Vec2::new(v.position.x, v.position.z).length() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_tapered_cylinder_narrows_at_top() {
        let data = Primitive::TaperedCylinder.geometry();
        let widest_top = data
            .vertices
            .iter()
            .filter(|v| v.position.y == 1.0)
            .map(|v| Vec2::new(v.position.x, v.position.z).length())
            .fold(0.0, f32::max);
        let widest_bottom = data
            .vertices
            .iter()
            .filter(|v| v.position.y == 0.0)
            .map(|v| Vec2::new(v.position.x, v.position.z).length())
            .fold(0.0, f32::max);
        assert!((widest_top - TAPERED_TOP_RADIUS).abs() < 1e-5);
        assert!((widest_bottom - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_torus_lies_around_z_axis() {
        let data = Primitive::Torus.geometry();
        assert_eq!(
            data.indices.len(),
            (6 * TORUS_MAIN_SEGMENTS * TORUS_TUBE_SEGMENTS) as usize
        );
        for v in &data.vertices {
            assert!(v.position.z.abs() <= TORUS_TUBE_RADIUS + 1e-5);
            let ring = Vec2::new(v.position.x, v.position.y).length();
            assert!((ring - 1.0).abs() <= TORUS_TUBE_RADIUS + 1e-5);
        }
    }
}
