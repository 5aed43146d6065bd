//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! Uniforms are pushed either through the typed [`Uniform`] trait, or through the object-safe
//! [`UniformSink`] trait which the scene layer uses so that it never has to know about GL.

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;

use crate::error::ShaderError;

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader of `shader_type` (e.g. [`glow::VERTEX_SHADER`]) from source.
    pub fn new(gl: &Arc<glow::Context>, shader_type: u32, source: &str) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl.create_shader(shader_type).map_err(ShaderError::Create)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let info = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile(info));
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// A value that can be written to a uniform variable of a shader program.
pub trait Uniform {
    /// Writes the value to the uniform `name` of `program`. Unknown names are ignored.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

macro_rules! impl_uniform {
    ($ty:ty, |$gl:ident, $loc:ident, $value:ident| $body:expr) => {
        impl Uniform for $ty {
            fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
                unsafe {
                    if let Some(loc) = gl.get_uniform_location(program, name) {
                        let $gl = gl;
                        let $loc = Some(&loc);
                        let $value = self;
                        $body;
                    }
                }
            }
        }
    };
}

impl_uniform!(bool, |gl, loc, v| gl.uniform_1_i32(loc, *v as i32));
impl_uniform!(i32, |gl, loc, v| gl.uniform_1_i32(loc, *v));
impl_uniform!(f32, |gl, loc, v| gl.uniform_1_f32(loc, *v));
impl_uniform!(Vec2, |gl, loc, v| gl.uniform_2_f32(loc, v.x, v.y));
impl_uniform!(Vec3, |gl, loc, v| gl.uniform_3_f32(loc, v.x, v.y, v.z));
impl_uniform!(Vec4, |gl, loc, v| gl.uniform_4_f32(loc, v.x, v.y, v.z, v.w));
impl_uniform!(Mat4, |gl, loc, v| gl.uniform_matrix_4_f32_slice(
    loc,
    false,
    v.as_ref()
));

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        (*self).set_uniform(gl, program, name);
    }
}

/// A single uniform value of any kind the scene shader understands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    /// Texture unit index for a `sampler2D`; `-1` means "no texture".
    Sampler(i32),
}

impl Uniform for UniformValue {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        match self {
            UniformValue::Bool(v) => v.set_uniform(gl, program, name),
            UniformValue::Int(v) | UniformValue::Sampler(v) => v.set_uniform(gl, program, name),
            UniformValue::Float(v) => v.set_uniform(gl, program, name),
            UniformValue::Vec2(v) => v.set_uniform(gl, program, name),
            UniformValue::Vec3(v) => v.set_uniform(gl, program, name),
            UniformValue::Vec4(v) => v.set_uniform(gl, program, name),
            UniformValue::Mat4(v) => v.set_uniform(gl, program, name),
        }
    }
}

impl From<bool> for UniformValue {
    fn from(value: bool) -> Self {
        UniformValue::Bool(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        UniformValue::Vec2(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

/// Anything that accepts named uniform values.
///
/// The scene holds a `&dyn UniformSink` and never touches GL directly, which lets tests record
/// every value it pushes.
pub trait UniformSink {
    fn set_uniform_value(&self, name: &str, value: UniformValue);
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let info = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link(info));
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl UniformSink for ShaderProgram {
    fn set_uniform_value(&self, name: &str, value: UniformValue) {
        self.set_uniform(name, value);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
