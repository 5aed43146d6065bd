//! Descriptors for the hand-authored draw calls of a scene.

use glam::{Vec2, Vec4};

use crate::{render::shapes::Primitive, scene::transform::Transform};

/// What a draw is colored with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Surface {
    /// Sample the texture registered under this tag.
    Texture(&'static str),
    /// A flat RGBA color.
    Color(Vec4),
}

/// One draw call and the shader state it needs.
///
/// `uv_scale`, `uv_offset` and `material` are only pushed when set; otherwise whatever the
/// previous draw left in the shader stays in effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub label: &'static str,
    pub transform: Transform,
    pub surface: Surface,
    pub uv_scale: Option<Vec2>,
    pub uv_offset: Option<Vec2>,
    pub material: Option<&'static str>,
    pub primitive: Primitive,
}

impl DrawCommand {
    /// Starts a draw of `primitive` with an identity transform and a white surface.
    pub const fn new(label: &'static str, primitive: Primitive) -> Self {
        Self {
            label,
            transform: Transform::IDENTITY,
            surface: Surface::Color(Vec4::ONE),
            uv_scale: None,
            uv_offset: None,
            material: None,
            primitive,
        }
    }

    pub const fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub const fn texture(mut self, tag: &'static str) -> Self {
        self.surface = Surface::Texture(tag);
        self
    }

    pub const fn color(mut self, color: Vec4) -> Self {
        self.surface = Surface::Color(color);
        self
    }

    pub const fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Some(Vec2::new(u, v));
        self
    }

    pub const fn uv_offset(mut self, u: f32, v: f32) -> Self {
        self.uv_offset = Some(Vec2::new(u, v));
        self
    }

    pub const fn material(mut self, tag: &'static str) -> Self {
        self.material = Some(tag);
        self
    }
}
