//! The tabletop scene: a table plane with a mug, an ink bottle, a collectible box and a bowl.
//!
//! Everything here is literal scene content.

use glam::{Vec3, Vec4};

use crate::{
    render::shapes::Primitive,
    scene::{
        draw::DrawCommand,
        lighting::{DirectionalLight, PointLight},
        materials::Material,
        transform::Transform,
    },
};

/// Image files (relative to the texture directory) and the tag each is registered under.
pub const SCENE_TEXTURES: [(&str, &str); 15] = [
    ("stones.jpg", "stones"),
    ("green.jpg", "green"),
    ("wood.jpg", "wood"),
    ("metal.jpg", "metal"),
    ("lava.jpg", "lava"),
    ("brick.jpg", "brick"),
    ("glass.jpg", "glass"),
    ("marble.jpg", "marble"),
    ("funko.jpg", "funko"),
    ("top.jpeg", "top"),
    ("bottom.jpeg", "bottom"),
    ("left.jpeg", "left"),
    ("right.jpeg", "right"),
    ("front.jpeg", "front"),
    ("back.jpeg", "back"),
];

pub fn scene_materials() -> Vec<Material> {
    // Grey materials: (tag, ambient, ambient strength, diffuse, specular, shininess)
    let material = |tag: &str, ambient: f32, strength: f32, diffuse: f32, specular: f32, shininess| {
        Material {
            tag: tag.to_string(),
            ambient_color: Vec3::splat(ambient),
            ambient_strength: strength,
            diffuse_color: Vec3::splat(diffuse),
            specular_color: Vec3::splat(specular),
            shininess,
        }
    };

    vec![
        material("stone", 0.2, 0.3, 0.8, 0.5, 32.0),
        Material {
            tag: "glass".to_string(),
            ambient_color: Vec3::new(0.1, 0.3, 0.2),
            ambient_strength: 0.4,
            diffuse_color: Vec3::new(0.2, 0.6, 0.4),
            specular_color: Vec3::splat(0.9),
            shininess: 128.0,
        },
        material("metal", 0.3, 0.2, 0.5, 0.8, 64.0),
        // Bright and matte so the printed box art reads clearly.
        material("funko", 0.8, 0.4, 0.9, 0.3, 16.0),
        material("marble", 0.25, 0.4, 0.9, 0.7, 96.0),
    ]
}

/// Aims down at both the mug and the ink well.
pub const KEY_LIGHT: DirectionalLight = DirectionalLight {
    direction: Vec3::new(-1.0, -1.0, -0.9),
    ambient: Vec3::splat(0.3),
    diffuse: Vec3::splat(0.8),
    specular: Vec3::splat(1.0),
    position: Vec3::splat(20.0),
};

/// Fill light high above the table.
pub const FILL_LIGHT: PointLight = PointLight {
    position: Vec3::splat(20.0),
    ambient: Vec3::splat(0.2),
    diffuse: Vec3::splat(0.5),
    specular: Vec3::splat(0.7),
    constant: 1.0,
    linear: 0.09,
    quadratic: 0.032,
};

/// Viewer position used for specular highlights.
pub const VIEW_POSITION: Vec3 = Vec3::new(0.0, 5.0, 10.0);

// The box is modeled on a 6.25" x 4.5" x 3.5" package scaled to 4 units tall.
const BOX_SCALE: f32 = 4.0 / 6.25;
const BOX_HEIGHT: f32 = 4.0;
const BOX_WIDTH: f32 = 4.5 * BOX_SCALE;
const BOX_DEPTH: f32 = 3.5 * BOX_SCALE;

const fn at(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Transform {
    Transform::new(scale, rotation_degrees, translation)
}

const NO_ROTATION: Vec3 = Vec3::ZERO;

/// The draw calls of the scene, in the order they are issued.
pub static TABLETOP_DRAWS: [DrawCommand; 12] = [
    DrawCommand::new("table", Primitive::Plane)
        .transform(at(Vec3::new(20.0, 1.0, 10.0), NO_ROTATION, Vec3::ZERO))
        .color(Vec4::ONE),
    DrawCommand::new("mug body", Primitive::Cylinder)
        .transform(at(Vec3::new(1.0, 2.0, 1.0), NO_ROTATION, Vec3::new(-3.0, 0.63, 2.0)))
        .texture("stones")
        .uv_scale(2.0, 3.0)
        .material("stone"),
    DrawCommand::new("mug handle", Primitive::Torus)
        .transform(at(
            Vec3::new(0.6, 0.6, 0.2),
            Vec3::new(0.0, 0.0, 90.0),
            Vec3::new(-2.0, 1.63, 2.0),
        ))
        .texture("stones")
        .uv_scale(1.5, 1.5)
        .material("stone"),
    DrawCommand::new("ink well base", Primitive::Cylinder)
        .transform(at(Vec3::new(1.2, 1.26, 1.2), NO_ROTATION, Vec3::new(3.0, 0.63, 1.0)))
        .texture("green")
        .uv_scale(1.0, 1.0)
        .material("glass"),
    DrawCommand::new("ink well top", Primitive::Cylinder)
        .transform(at(Vec3::new(1.201, 0.14, 1.201), NO_ROTATION, Vec3::new(3.0, 1.82, 1.0)))
        .texture("glass")
        .uv_scale(1.0, 1.0)
        .material("glass"),
    DrawCommand::new("ink well cap", Primitive::Cylinder)
        .transform(at(Vec3::new(0.8, 0.5, 0.8), NO_ROTATION, Vec3::new(3.0, 1.8, 1.0)))
        .color(Vec4::new(0.3, 0.3, 0.3, 1.0))
        .material("metal"),
    // Box faces are planes stood up by a 90 degree turn about X.
    DrawCommand::new("box front", Primitive::Plane)
        .transform(at(
            Vec3::new(BOX_WIDTH, 1.0, BOX_HEIGHT),
            Vec3::new(90.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, -3.0),
        ))
        .texture("front")
        .uv_scale(1.0, 1.0)
        .uv_offset(0.0, 0.0)
        .material("funko"),
    DrawCommand::new("box left", Primitive::Plane)
        .transform(at(
            Vec3::new(BOX_DEPTH, 1.0, BOX_HEIGHT),
            Vec3::new(90.0, 0.0, -90.0),
            Vec3::new(2.85, 4.0, -5.25),
        ))
        .texture("left"),
    DrawCommand::new("box right", Primitive::Plane)
        .transform(at(
            Vec3::new(BOX_DEPTH, 1.0, BOX_HEIGHT),
            Vec3::new(90.0, 0.0, -90.0),
            Vec3::new(-2.85, 4.0, -5.25),
        ))
        .texture("right"),
    DrawCommand::new("box back", Primitive::Plane)
        .transform(at(
            Vec3::new(BOX_WIDTH, 1.0, BOX_HEIGHT),
            Vec3::new(90.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, -7.4),
        ))
        .texture("back"),
    DrawCommand::new("box top", Primitive::Plane)
        .transform(at(
            Vec3::new(BOX_WIDTH, BOX_DEPTH, BOX_DEPTH),
            NO_ROTATION,
            Vec3::new(0.0, 8.0, -5.25),
        ))
        .texture("top"),
    // Upside down so the wide end is the rim.
    DrawCommand::new("bowl", Primitive::TaperedCylinder)
        .transform(at(
            Vec3::new(2.5, 1.5, 2.5),
            Vec3::new(180.0, 0.0, 0.0),
            Vec3::new(-6.0, 1.5, -2.0),
        ))
        .texture("marble")
        .uv_scale(2.0, 1.5)
        .uv_offset(0.0, 0.0)
        .material("marble"),
];
