//! Thin wrappers over the OpenGL objects the scene needs: the application window and context,
//! shader programs and uniforms, static meshes and textures.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
