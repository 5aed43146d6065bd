//! Error types for every fallible part of the scene layer.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning an image file into a registered GPU texture.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("could not load image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture ({width}x{height}) exceeds the maximum texture size ({max})")]
    ExceedsMaxSize { width: u32, height: u32, max: u32 },

    #[error("not implemented to handle image with {0} channels")]
    UnsupportedChannels(u8),

    #[error("texture registry is full ({0} slots in use)")]
    RegistryFull(usize),

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    PixelDataMismatch { expected: usize, actual: usize },

    #[error("{call} failed with OpenGL error 0x{code:04X}")]
    Gl { call: &'static str, code: u32 },
}

/// Failure to copy a material out of the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterialError {
    #[error("no materials are defined")]
    EmptyRegistry,

    #[error("no material tagged '{0}'")]
    UnknownTag(String),
}

/// Shader creation, compilation and linking failures.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("could not create GL object: {0}")]
    Create(String),

    #[error("shader compilation failed: {0}")]
    Compile(String),

    #[error("program link failed: {0}")]
    Link(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
