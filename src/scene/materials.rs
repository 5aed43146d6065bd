//! Named surface materials for the lighting model.

use glam::Vec3;

use crate::error::MaterialError;

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_color: Vec3,
    pub ambient_strength: f32,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            tag: String::new(),
            ambient_color: Vec3::ZERO,
            ambient_strength: 0.0,
            diffuse_color: Vec3::ZERO,
            specular_color: Vec3::ZERO,
            shininess: 1.0,
        }
    }
}

/// Materials in definition order. Lookups are linear and the first matching tag wins.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, material: Material) {
        if self.find(&material.tag).is_some() {
            log::warn!(
                "material tag '{}' is already defined, lookups will keep the first one",
                material.tag
            );
        }
        self.materials.push(material);
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.tag == tag)
    }

    /// Copies the lighting fields of the material tagged `tag` into `out`.
    ///
    /// `out.tag` is left alone, and on error nothing in `out` changes.
    pub fn copy_into(&self, tag: &str, out: &mut Material) -> Result<(), MaterialError> {
        if self.materials.is_empty() {
            return Err(MaterialError::EmptyRegistry);
        }
        let found = self
            .find(tag)
            .ok_or_else(|| MaterialError::UnknownTag(tag.to_string()))?;
        out.ambient_color = found.ambient_color;
        out.ambient_strength = found.ambient_strength;
        out.diffuse_color = found.diffuse_color;
        out.specular_color = found.specular_color;
        out.shininess = found.shininess;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
