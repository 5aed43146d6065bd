//! A static tabletop scene rendered with OpenGL.
//!
//! [`scene::SceneManager`] loads textures, tracks materials, composes model transforms and
//! issues the scene's draw calls. It talks to the GPU only through the
//! [`abs::UniformSink`], [`abs::TextureDevice`] and [`render::shapes::MeshLibrary`] traits.

pub mod abs;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod scene;
