//! The registry of textures the scene has uploaded.
//!
//! Entries keep insertion order: an entry's index is also the texture unit it is bound to while
//! rendering (its *slot*). Lookups are linear scans and the first matching tag wins.

use crate::{
    abs::{TextureDevice, TextureId, TextureImage},
    error::TextureError,
};

/// Number of texture units the scene binds, and so the most textures it can hold.
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// Above this many megabytes a texture is loaded with a warning.
const MAX_REASONABLE_TEXTURE_MB: f32 = 50.0;

/// Above this width or height a texture is loaded with a warning.
const MAX_SAFE_DIMENSION: u32 = 2048;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureEntry {
    pub id: TextureId,
    pub tag: String,
}

#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `image` against the device limits, uploads it and registers it under `tag`.
    ///
    /// On failure nothing is registered and no GPU texture is left behind.
    pub fn create_texture<D: TextureDevice>(
        &mut self,
        device: &mut D,
        image: &TextureImage,
        tag: &str,
    ) -> Result<TextureId, TextureError> {
        if self.entries.len() >= MAX_TEXTURE_SLOTS {
            return Err(TextureError::RegistryFull(self.entries.len()));
        }

        validate(image, device.max_texture_size())?;

        if self.find_slot(tag).is_some() {
            log::warn!("texture tag '{tag}' is already registered, lookups will keep the first one");
        }

        let id = device.upload(image)?;
        self.entries.push(TextureEntry {
            id,
            tag: tag.to_string(),
        });
        log::info!(
            "registered texture '{tag}' (id {}) in slot {}",
            id.get(),
            self.entries.len() - 1
        );
        Ok(id)
    }

    /// The GPU handle registered under `tag`.
    pub fn find_id(&self, tag: &str) -> Option<TextureId> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| e.id)
    }

    /// The slot (texture unit) of the texture registered under `tag`.
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.tag == tag)
    }

    /// Binds every texture to the unit matching its slot.
    pub fn bind_all<D: TextureDevice>(&self, device: &mut D) {
        for (slot, entry) in self.entries.iter().enumerate() {
            device.bind(slot as u32, entry.id);
        }
    }

    /// Frees every texture and empties the registry.
    pub fn release_all<D: TextureDevice>(&mut self, device: &mut D) {
        for entry in self.entries.drain(..) {
            log::debug!("releasing texture '{}' (id {})", entry.tag, entry.id.get());
            device.release(entry.id);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Checks an image against the device limits, logging the non-fatal size warnings.
fn validate(image: &TextureImage, max_texture_size: u32) -> Result<(), TextureError> {
    let bytes = image.byte_size();
    let megabytes = bytes as f32 / (1024.0 * 1024.0);
    log::info!(
        "image is {}x{} with {} channels, needs {megabytes:.2} MB ({bytes} bytes), max texture size is {max_texture_size}",
        image.width,
        image.height,
        image.channels
    );

    if image.width > max_texture_size || image.height > max_texture_size {
        return Err(TextureError::ExceedsMaxSize {
            width: image.width,
            height: image.height,
            max: max_texture_size,
        });
    }

    if megabytes > MAX_REASONABLE_TEXTURE_MB {
        log::warn!(
            "texture is very large ({megabytes:.2} MB), consider resizing it to a smaller resolution"
        );
    }
    if image.width > MAX_SAFE_DIMENSION || image.height > MAX_SAFE_DIMENSION {
        log::warn!(
            "texture ({}x{}) exceeds the safe dimension of {MAX_SAFE_DIMENSION}, some drivers may be unstable",
            image.width,
            image.height
        );
    }

    if !matches!(image.channels, 3 | 4) {
        return Err(TextureError::UnsupportedChannels(image.channels));
    }

    if image.pixels.len() != bytes {
        return Err(TextureError::PixelDataMismatch {
            expected: bytes,
            actual: image.pixels.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::testing::{FakeDevice, solid_image};

    #[test]
    fn test_supported_channels_register_one_entry() {
        for channels in [3, 4] {
            let mut device = FakeDevice::new(4096);
            let mut registry = TextureRegistry::new();
            let id = registry
                .create_texture(&mut device, &solid_image(8, 8, channels), "tex")
                .unwrap();
            assert_eq!(registry.len(), 1);
            assert_eq!(registry.find_id("tex"), Some(id));
        }
    }

    #[test]
    fn test_unsupported_channels_register_nothing() {
        for channels in [1, 2, 5] {
            let mut device = FakeDevice::new(4096);
            let mut registry = TextureRegistry::new();
            let result = registry.create_texture(&mut device, &solid_image(8, 8, channels), "tex");
            assert!(matches!(result, Err(TextureError::UnsupportedChannels(c)) if c == channels));
            assert!(registry.is_empty());
            assert!(device.uploaded.is_empty());
        }
    }

    #[test]
    fn test_512_rgb_loads_and_binds() {
        let mut device = FakeDevice::new(4096);
        let mut registry = TextureRegistry::new();
        let before = registry.len();
        let id = registry
            .create_texture(&mut device, &solid_image(512, 512, 3), "stones")
            .unwrap();
        assert_eq!(registry.len(), before + 1);

        registry.bind_all(&mut device);
        assert_eq!(device.bound, vec![(0, id)]);
    }

    #[test]
    fn test_oversized_texture_is_rejected() {
        let mut device = FakeDevice::new(4096);
        let mut registry = TextureRegistry::new();
        // Dimensions are checked before the pixel buffer, so no need to allocate one.
        let image = TextureImage {
            width: 9000,
            height: 9000,
            channels: 3,
            pixels: Vec::new(),
        };
        let result = registry.create_texture(&mut device, &image, "huge");
        assert!(matches!(
            result,
            Err(TextureError::ExceedsMaxSize {
                width: 9000,
                height: 9000,
                max: 4096
            })
        ));
        assert!(registry.is_empty());
        assert!(device.uploaded.is_empty());
    }

    #[test]
    fn test_large_but_allowed_texture_loads() {
        let mut device = FakeDevice::new(8192);
        let mut registry = TextureRegistry::new();
        registry
            .create_texture(&mut device, &solid_image(4096, 16, 4), "wide")
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_pixel_mismatch_is_rejected() {
        let mut device = FakeDevice::new(4096);
        let mut registry = TextureRegistry::new();
        let mut image = solid_image(4, 4, 3);
        image.pixels.pop();
        let result = registry.create_texture(&mut device, &image, "short");
        assert!(matches!(
            result,
            Err(TextureError::PixelDataMismatch {
                expected: 48,
                actual: 47
            })
        ));
    }

    #[test]
    fn test_failed_upload_registers_nothing() {
        let mut device = FakeDevice::new(4096);
        device.fail_upload = true;
        let mut registry = TextureRegistry::new();
        let result = registry.create_texture(&mut device, &solid_image(4, 4, 3), "tex");
        assert!(matches!(result, Err(TextureError::Gl { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_is_bounded() {
        let mut device = FakeDevice::new(4096);
        let mut registry = TextureRegistry::new();
        let image = solid_image(2, 2, 3);
        for i in 0..MAX_TEXTURE_SLOTS {
            registry
                .create_texture(&mut device, &image, &format!("t{i}"))
                .unwrap();
        }
        let result = registry.create_texture(&mut device, &image, "one-too-many");
        assert!(matches!(result, Err(TextureError::RegistryFull(16))));
        assert_eq!(registry.len(), MAX_TEXTURE_SLOTS);
    }

    #[test]
    fn test_lookup_is_order_independent_and_first_match_wins() {
        let mut device = FakeDevice::new(4096);
        let mut registry = TextureRegistry::new();
        let image = solid_image(2, 2, 4);
        let wood = registry.create_texture(&mut device, &image, "wood").unwrap();
        let metal = registry.create_texture(&mut device, &image, "metal").unwrap();
        let second_wood = registry.create_texture(&mut device, &image, "wood").unwrap();
        assert_ne!(wood, second_wood);

        for _ in 0..2 {
            assert_eq!(registry.find_id("metal"), Some(metal));
            assert_eq!(registry.find_id("wood"), Some(wood));
            assert_eq!(registry.find_slot("metal"), Some(1));
            assert_eq!(registry.find_slot("wood"), Some(0));
        }
        assert_eq!(registry.find_id("lava"), None);
        assert_eq!(registry.find_slot("lava"), None);
    }

    #[test]
    fn test_release_all_empties_registry() {
        let mut device = FakeDevice::new(4096);
        let mut registry = TextureRegistry::new();
        let image = solid_image(2, 2, 3);
        let a = registry.create_texture(&mut device, &image, "a").unwrap();
        let b = registry.create_texture(&mut device, &image, "b").unwrap();

        registry.release_all(&mut device);
        assert!(registry.is_empty());
        assert_eq!(*device.released.borrow(), vec![a, b]);

        registry.release_all(&mut device);
        assert_eq!(device.released.borrow().len(), 2);
    }
}
