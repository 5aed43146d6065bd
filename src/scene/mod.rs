//! Scene preparation and rendering.
//!
//! The [`SceneManager`] owns the mesh library, the texture device and the texture and material
//! registries. It borrows the uniform sink it pushes shader state to, so the shader program must
//! outlive it. Textures are released when the scene is dropped.

pub mod draw;
pub mod lighting;
pub mod materials;
pub mod tabletop;
pub mod textures;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec4};

use crate::{
    abs::{TextureDevice, TextureId, TextureImage, UniformSink, UniformValue},
    error::TextureError,
    render::shapes::{MeshLibrary, Primitive},
    scene::{
        draw::{DrawCommand, Surface},
        materials::{Material, MaterialRegistry},
        tabletop::{FILL_LIGHT, KEY_LIGHT, SCENE_TEXTURES, TABLETOP_DRAWS, VIEW_POSITION},
        textures::TextureRegistry,
        transform::Transform,
    },
};

const MODEL_UNIFORM: &str = "model";
const COLOR_UNIFORM: &str = "objectColor";
const TEXTURE_UNIFORM: &str = "objectTexture";
const USE_TEXTURE_UNIFORM: &str = "bUseTexture";
const USE_LIGHTING_UNIFORM: &str = "bUseLighting";
const UV_SCALE_UNIFORM: &str = "UVscale";
const UV_OFFSET_UNIFORM: &str = "UVoffset";
const VIEW_POSITION_UNIFORM: &str = "viewPosition";

pub struct SceneManager<'a, D: TextureDevice, M: MeshLibrary> {
    shader: &'a dyn UniformSink,
    device: D,
    meshes: M,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    texture_dir: PathBuf,
}

impl<'a, D: TextureDevice, M: MeshLibrary> SceneManager<'a, D, M> {
    /// Creates an empty scene. Texture paths given to [`Self::create_texture`] are resolved
    /// against `texture_dir`.
    pub fn new(
        shader: &'a dyn UniformSink,
        device: D,
        meshes: M,
        texture_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            shader,
            device,
            meshes,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            texture_dir: texture_dir.into(),
        }
    }

    /// Decodes the image at `filename`, uploads it and registers it under `tag`.
    pub fn create_texture(
        &mut self,
        filename: impl AsRef<Path>,
        tag: &str,
    ) -> Result<TextureId, TextureError> {
        let path = self.texture_dir.join(filename);
        let image = TextureImage::load(&path)?;
        log::info!("successfully loaded image {}", path.display());
        self.create_texture_from_image(&image, tag)
    }

    /// Uploads already decoded pixels and registers them under `tag`.
    pub fn create_texture_from_image(
        &mut self,
        image: &TextureImage,
        tag: &str,
    ) -> Result<TextureId, TextureError> {
        self.textures.create_texture(&mut self.device, image, tag)
    }

    /// Binds every loaded texture to the texture unit matching its slot.
    pub fn bind_textures(&mut self) {
        self.textures.bind_all(&mut self.device);
    }

    /// Frees every loaded texture.
    pub fn destroy_textures(&mut self) {
        self.textures.release_all(&mut self.device);
    }

    pub fn find_texture_id(&self, tag: &str) -> Option<TextureId> {
        self.textures.find_id(tag)
    }

    pub fn find_texture_slot(&self, tag: &str) -> Option<usize> {
        self.textures.find_slot(tag)
    }

    pub fn find_material(&self, tag: &str) -> Option<&Material> {
        self.materials.find(tag)
    }

    pub fn define_material(&mut self, material: Material) {
        self.materials.define(material);
    }

    /// Pushes the model matrix for the next draw.
    pub fn set_transformations(&self, transform: &Transform) {
        self.shader
            .set_uniform_value(MODEL_UNIFORM, transform.model_matrix().into());
    }

    /// Draws the next object with a flat color instead of a texture.
    pub fn set_shader_color(&self, color: Vec4) {
        self.shader
            .set_uniform_value(USE_TEXTURE_UNIFORM, UniformValue::Bool(false));
        self.shader.set_uniform_value(COLOR_UNIFORM, color.into());
    }

    /// Draws the next object with the texture registered under `tag`.
    ///
    /// An unknown tag still enables texturing, with the sampler pointed at unit `-1`.
    pub fn set_shader_texture(&self, tag: &str) {
        self.shader
            .set_uniform_value(USE_TEXTURE_UNIFORM, UniformValue::Bool(true));

        let slot = match self.find_texture_slot(tag) {
            Some(slot) => slot as i32,
            None => {
                log::warn!("no texture tagged '{tag}' is loaded");
                -1
            }
        };
        self.shader
            .set_uniform_value(TEXTURE_UNIFORM, UniformValue::Sampler(slot));
    }

    pub fn set_texture_uv_scale(&self, u: f32, v: f32) {
        self.shader
            .set_uniform_value(UV_SCALE_UNIFORM, Vec2::new(u, v).into());
    }

    pub fn set_texture_uv_offset(&self, u: f32, v: f32) {
        self.shader
            .set_uniform_value(UV_OFFSET_UNIFORM, Vec2::new(u, v).into());
    }

    /// Pushes the lighting fields of the material tagged `tag`.
    ///
    /// Nothing is pushed when no materials exist or the tag is unknown.
    pub fn set_shader_material(&self, tag: &str) {
        if self.materials.is_empty() {
            return;
        }

        let mut material = Material::default();
        if let Err(e) = self.materials.copy_into(tag, &mut material) {
            log::warn!("{e}");
            return;
        }

        let shader = self.shader;
        shader.set_uniform_value("material.ambientColor", material.ambient_color.into());
        shader.set_uniform_value("material.ambientStrength", material.ambient_strength.into());
        shader.set_uniform_value("material.diffuseColor", material.diffuse_color.into());
        shader.set_uniform_value("material.specularColor", material.specular_color.into());
        shader.set_uniform_value("material.shininess", material.shininess.into());
    }

    /// Loads every mesh, texture and material the scene uses.
    ///
    /// A texture that fails to load is logged and skipped; draws using its tag will sample
    /// nothing.
    pub fn prepare_scene(&mut self) {
        self.load_meshes();
        self.load_textures();
        self.define_materials();
        log::info!(
            "scene prepared with {} textures and {} materials",
            self.textures.len(),
            self.materials.len()
        );
    }

    /// Loads each mesh primitive once; every draw of that kind shares it.
    pub fn load_meshes(&mut self) {
        for primitive in Primitive::ALL {
            if let Err(e) = self.meshes.load(primitive) {
                log::error!("could not load {primitive:?} mesh: {e}");
            }
        }
    }

    pub fn load_textures(&mut self) {
        for (filename, tag) in SCENE_TEXTURES {
            if let Err(e) = self.create_texture(filename, tag) {
                log::error!("texture '{tag}': {e}");
            }
        }
    }

    pub fn define_materials(&mut self) {
        for material in tabletop::scene_materials() {
            self.define_material(material);
        }
    }

    /// Renders the tabletop scene with the current program, view and projection.
    pub fn render_scene(&mut self) {
        self.bind_textures();

        self.shader
            .set_uniform_value(USE_LIGHTING_UNIFORM, UniformValue::Bool(true));
        KEY_LIGHT.apply(self.shader);
        FILL_LIGHT.apply(self.shader);
        self.shader
            .set_uniform_value(VIEW_POSITION_UNIFORM, VIEW_POSITION.into());

        for command in &TABLETOP_DRAWS {
            self.draw(command);
        }
    }

    /// Pushes the state `command` needs and issues its draw.
    pub fn draw(&self, command: &DrawCommand) {
        self.set_transformations(&command.transform);
        match command.surface {
            Surface::Texture(tag) => self.set_shader_texture(tag),
            Surface::Color(color) => self.set_shader_color(color),
        }
        if let Some(scale) = command.uv_scale {
            self.set_texture_uv_scale(scale.x, scale.y);
        }
        if let Some(offset) = command.uv_offset {
            self.set_texture_uv_offset(offset.x, offset.y);
        }
        if let Some(material) = command.material {
            self.set_shader_material(material);
        }
        self.meshes.draw(command.primitive);
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn meshes(&self) -> &M {
        &self.meshes
    }
}

impl<D: TextureDevice, M: MeshLibrary> Drop for SceneManager<'_, D, M> {
    fn drop(&mut self) {
        self.destroy_textures();
    }
}
