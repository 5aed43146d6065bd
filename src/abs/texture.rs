//! Structs and functions for handling textures.
//!
//! [`TextureImage`] is decoded pixel data on the CPU side, [`TextureId`] names a texture living on
//! the GPU, and [`TextureDevice`] is the boundary that turns one into the other. The OpenGL
//! implementation is [`GlTextureDevice`].

use std::{num::NonZero, path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

use crate::error::TextureError;

/// Opaque handle to a texture stored on the GPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub NonZero<u32>);

impl TextureId {
    /// Returns the raw numeric handle.
    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

/// Decoded, tightly packed 8-bit pixel data ready for upload.
#[derive(Clone, Debug)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decodes an image file, flipping it vertically so row 0 is the bottom of the image as GL
    /// expects.
    pub fn load(path: &Path) -> Result<Self, TextureError> {
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_dynamic(&image.flipv()))
    }

    /// Converts a decoded image, keeping its channel count.
    ///
    /// Three and four channel images become RGB8 and RGBA8. Any other layout keeps its channel
    /// count with no pixel data, so the upload path rejects it.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let channels = image.color().channel_count();
        let pixels = match channels {
            3 => image.to_rgb8().into_raw(),
            4 => image.to_rgba8().into_raw(),
            _ => Vec::new(),
        };
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Number of bytes the image occupies once uploaded.
    pub fn byte_size(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }
}

/// The GPU side of texture handling.
pub trait TextureDevice {
    /// Largest width or height the device accepts.
    fn max_texture_size(&self) -> u32;

    /// Uploads an RGB or RGBA image as a mipmapped, repeat-wrapped, linearly filtered 2D
    /// texture.
    fn upload(&mut self, image: &TextureImage) -> Result<TextureId, TextureError>;

    /// Binds the texture to the given texture unit.
    fn bind(&mut self, unit: u32, id: TextureId);

    /// Frees the GPU texture.
    fn release(&mut self, id: TextureId);
}

/// [`TextureDevice`] backed by an OpenGL context.
pub struct GlTextureDevice {
    gl: Arc<glow::Context>,
}

impl GlTextureDevice {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self { gl: Arc::clone(gl) }
    }

    fn check(&self, call: &'static str) -> Result<(), TextureError> {
        let code = unsafe { self.gl.get_error() };
        if code == glow::NO_ERROR {
            Ok(())
        } else {
            Err(TextureError::Gl { call, code })
        }
    }
}

impl TextureDevice for GlTextureDevice {
    fn max_texture_size(&self) -> u32 {
        let size = unsafe { self.gl.get_parameter_i32(glow::MAX_TEXTURE_SIZE) };
        size.max(0) as u32
    }

    fn upload(&mut self, image: &TextureImage) -> Result<TextureId, TextureError> {
        let (internal_format, format) = match image.channels {
            3 => (glow::RGB8, glow::RGB),
            4 => (glow::RGBA8, glow::RGBA),
            other => return Err(TextureError::UnsupportedChannels(other)),
        };

        unsafe {
            let texture = self.gl.create_texture().map_err(|e| {
                log::error!("glCreateTexture failed: {e}");
                TextureError::Gl {
                    call: "glGenTextures",
                    code: self.gl.get_error(),
                }
            })?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            let result = (|| -> Result<(), TextureError> {
                self.check("glGenTextures/glBindTexture")?;

                self.gl
                    .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
                self.gl
                    .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
                self.gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::LINEAR as i32,
                );
                self.gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MAG_FILTER,
                    glow::LINEAR as i32,
                );
                self.check("glTexParameteri")?;

                self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
                self.gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    internal_format as i32,
                    image.width as i32,
                    image.height as i32,
                    0,
                    format,
                    glow::UNSIGNED_BYTE,
                    glow::PixelUnpackData::Slice(Some(image.pixels.as_slice())),
                );
                self.check("glTexImage2D")?;

                self.gl.generate_mipmap(glow::TEXTURE_2D);
                if let Err(e) = self.check("glGenerateMipmap") {
                    // The base level is still usable.
                    log::warn!("{e}");
                }
                Ok(())
            })();

            self.gl.bind_texture(glow::TEXTURE_2D, None);

            match result {
                Ok(()) => Ok(TextureId(texture.0)),
                Err(e) => {
                    self.gl.delete_texture(texture);
                    Err(e)
                }
            }
        }
    }

    fn bind(&mut self, unit: u32, id: TextureId) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl
                .bind_texture(glow::TEXTURE_2D, Some(glow::NativeTexture(id.0)));
        }
    }

    fn release(&mut self, id: TextureId) {
        unsafe {
            self.gl.delete_texture(glow::NativeTexture(id.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_png(name: &str, image: &DynamicImage) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tabletop-{}-{}.png",
            std::process::id(),
            name
        ));
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn test_from_dynamic_keeps_rgb_and_rgba() {
        let rgb = TextureImage::from_dynamic(&DynamicImage::new_rgb8(4, 2));
        assert_eq!((rgb.width, rgb.height, rgb.channels), (4, 2, 3));
        assert_eq!(rgb.pixels.len(), rgb.byte_size());

        let rgba = TextureImage::from_dynamic(&DynamicImage::new_rgba8(3, 3));
        assert_eq!(rgba.channels, 4);
        assert_eq!(rgba.pixels.len(), 36);
    }

    #[test]
    fn test_from_dynamic_grayscale_has_no_pixels() {
        let gray = TextureImage::from_dynamic(&DynamicImage::new_luma8(2, 2));
        assert_eq!(gray.channels, 1);
        assert!(gray.pixels.is_empty());

        let gray_alpha = TextureImage::from_dynamic(&DynamicImage::new_luma_a8(2, 2));
        assert_eq!(gray_alpha.channels, 2);
    }

    #[test]
    fn test_load_flips_vertically() {
        let mut img = image::RgbImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        let path = temp_png("flip", &DynamicImage::ImageRgb8(img));

        let loaded = TextureImage::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.channels, 3);
        assert_eq!(&loaded.pixels[0..3], &[0, 0, 255]);
        assert_eq!(&loaded.pixels[3..6], &[255, 0, 0]);
    }

    #[test]
    fn test_load_missing_file_is_decode_error() {
        let result = TextureImage::load(Path::new("definitely/not/here.jpg"));
        assert!(matches!(result, Err(TextureError::Decode { .. })));
    }
}
