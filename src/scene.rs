//! Scene preparation and per-frame draw issuing.
//!
//! [`SceneManager`] owns the texture and material registries and turns
//! [`DrawRequest`]s into uniform writes followed by a mesh draw. The shader
//! sink and mesh library are plugged in from outside so the same manager
//! runs against a GPU pipeline or headless recorders.
//!
//! # Lifecycle
//!
//! 1. [`SceneManager::prepare_scene`] is called once. It loads and binds all
//!    textures, registers the materials, writes the lights and loads every
//!    primitive mesh, in that order.
//! 2. [`SceneManager::render_scene`] is called every frame. For every part of
//!    every object it writes the model matrix, then the shading mode and
//!    texture unit or colour, then the UV scale, then the material, and
//!    finally draws the mesh.
//! 3. Dropping the manager (or [`SceneManager::release`]) frees the textures.
//!
//! The `set_*` methods are the individual steps of a draw and can also be
//! used on their own. All of them silently do nothing while no shader is
//! attached.

use std::collections::BTreeSet;

use crate::{
    config::SceneConfig,
    data_structures::{
        light::LightSource,
        material::{Material, MaterialRegistry},
        texture::{NOT_FOUND, TextureRegistry},
        transform::Transform,
    },
    error::{Result, SceneError},
    render::{DrawRequest, SceneObject, Shading},
    resources::{
        mesh::{MeshLibrary, PrimitiveKind},
        texture::TextureBackend,
    },
    shader::{ShaderSink, names},
};

/// An image file (relative to the asset root) and the tag it is registered
/// under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureAsset<'a> {
    pub file: &'a str,
    pub tag: &'a str,
}

/// Everything needed to prepare and render one scene.
#[derive(Clone, Debug)]
pub struct SceneDescription<'a> {
    pub textures: &'a [TextureAsset<'a>],
    pub materials: Vec<Material>,
    pub lights: &'a [LightSource],
    pub primitives: &'a [PrimitiveKind],
    pub objects: &'a [SceneObject<'a>],
}

impl SceneDescription<'_> {
    pub fn object(&self, name: &str) -> Option<&SceneObject<'_>> {
        self.objects.iter().find(|o| o.name == name)
    }
}

pub struct SceneManager<B: TextureBackend, M: MeshLibrary, S: ShaderSink> {
    config: SceneConfig,
    textures: TextureRegistry<B>,
    materials: MaterialRegistry,
    meshes: M,
    loaded_meshes: BTreeSet<PrimitiveKind>,
    shader: Option<S>,
    prepared: bool,
}

impl<B: TextureBackend, M: MeshLibrary, S: ShaderSink> SceneManager<B, M, S> {
    pub fn new(config: SceneConfig, textures: B, meshes: M, shader: Option<S>) -> Self {
        Self {
            config,
            textures: TextureRegistry::new(textures),
            materials: MaterialRegistry::new(),
            meshes,
            loaded_meshes: BTreeSet::new(),
            shader,
            prepared: false,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn textures(&self) -> &TextureRegistry<B> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn meshes(&self) -> &M {
        &self.meshes
    }

    pub fn shader(&self) -> Option<&S> {
        self.shader.as_ref()
    }

    pub fn shader_mut(&mut self) -> Option<&mut S> {
        self.shader.as_mut()
    }

    /// Attaches a new shader (or detaches with `None`), returning the old one.
    pub fn set_shader(&mut self, shader: Option<S>) -> Option<S> {
        std::mem::replace(&mut self.shader, shader)
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    fn attached_shader(&mut self, step: &str) -> Option<&mut S> {
        if self.shader.is_none() {
            log::trace!("no shader attached, skipping {step}");
        }
        self.shader.as_mut()
    }

    /// Loads `file` from the asset root into the texture registry.
    pub fn load_texture(&mut self, file: &str, tag: &str) -> Result<usize> {
        let path = self.config.asset_path(file);
        self.textures.load(path, tag)
    }

    pub fn register_material(&mut self, material: Material) {
        self.materials.register(material);
    }

    /// Writes every light to `lightSources[i]` and sets the lighting switch.
    pub fn setup_lights(&mut self, lights: &[LightSource]) {
        let lighting = self.config.lighting;
        let Some(shader) = self.attached_shader("light setup") else {
            return;
        };
        for (index, light) in lights.iter().enumerate() {
            light.write_uniforms(index, shader);
        }
        shader.set_bool(names::USE_LIGHTING, lighting);
    }

    /// Loads the geometry for `kind` unless that already happened.
    pub fn load_mesh(&mut self, kind: PrimitiveKind) {
        if self.loaded_meshes.insert(kind) {
            self.meshes.load(kind);
        }
    }

    /// Loads every resource of `scene`. Textures that fail to load are
    /// logged and skipped unless [`SceneConfig::strict_textures`] is set, in
    /// which case the textures loaded so far are released again and the
    /// manager stays unprepared, so the call can simply be retried.
    ///
    /// Preparing twice is a no-op.
    pub fn prepare_scene(&mut self, scene: &SceneDescription) -> Result<()> {
        if self.prepared {
            log::warn!("scene is already prepared");
            return Ok(());
        }

        for asset in scene.textures {
            if let Err(e) = self.load_texture(asset.file, asset.tag) {
                if self.config.strict_textures {
                    self.textures.release_all();
                    return Err(e);
                }
            }
        }
        // Binding has to happen after all loads, every slot maps to its unit.
        self.textures.bind_all();

        self.materials.extend(scene.materials.iter().cloned());
        self.setup_lights(scene.lights);

        for &kind in scene.primitives {
            self.load_mesh(kind);
        }

        log::info!(
            "scene prepared: {} textures, {} materials, {} lights, {} meshes",
            self.textures.len(),
            self.materials.len(),
            scene.lights.len(),
            self.loaded_meshes.len()
        );
        self.prepared = true;
        Ok(())
    }

    /// Writes the model matrix `T · Rx · Ry · Rz · S` of `transform`.
    pub fn set_transformations(&mut self, transform: &Transform) {
        let model = transform.to_matrix();
        if let Some(shader) = self.attached_shader("model matrix") {
            shader.set_mat4(names::MODEL, &model);
        }
    }

    /// Switches to flat shading with `rgba`.
    pub fn set_shader_color(&mut self, rgba: [f32; 4]) {
        if let Some(shader) = self.attached_shader("flat colour") {
            shader.set_bool(names::USE_TEXTURE, false);
            shader.set_vec4(names::OBJECT_COLOR, rgba);
        }
    }

    /// Switches to texture sampling from the unit `tag` is bound to.
    ///
    /// An unknown tag still switches to texture mode but selects unit `-1`.
    pub fn set_shader_texture(&mut self, tag: &str) {
        let unit = match self.textures.find_slot(tag) {
            Some(slot) => slot as i32,
            None => {
                log::warn!("texture \"{tag}\" is not registered");
                NOT_FOUND
            }
        };
        if let Some(shader) = self.attached_shader("texture") {
            shader.set_bool(names::USE_TEXTURE, true);
            shader.set_sampler(names::OBJECT_TEXTURE, unit);
        }
    }

    pub fn set_texture_uv_scale(&mut self, u: f32, v: f32) {
        if let Some(shader) = self.attached_shader("uv scale") {
            shader.set_vec2(names::UV_SCALE, [u, v]);
        }
    }

    /// Writes the coefficients of the material registered under `tag`.
    ///
    /// Returns whether the tag was found. When it was not, nothing is
    /// written and the shader keeps whatever material it had before.
    pub fn set_shader_material(&mut self, tag: &str) -> bool {
        let Some(material) = self.materials.find(tag) else {
            log::debug!("material \"{tag}\" is not registered");
            return false;
        };
        match self.shader.as_mut() {
            Some(shader) => material.write_uniforms(shader),
            None => log::trace!("no shader attached, skipping material"),
        }
        true
    }

    /// Applies the complete state of `request` and draws its primitive.
    ///
    /// Unlike the individual `set_*` steps this never inherits anything from
    /// an earlier draw: an unregistered texture falls back to the configured
    /// flat colour and a missing material to [`Material::default`].
    pub fn draw(&mut self, request: &DrawRequest) -> Result<()> {
        if !self.loaded_meshes.contains(&request.primitive) {
            return Err(SceneError::PrimitiveNotLoaded(request.primitive));
        }

        self.set_transformations(&request.transform);
        match request.shading {
            Shading::Texture(tag) if self.textures.find_slot(tag).is_some() => {
                self.set_shader_texture(tag)
            }
            Shading::Texture(tag) => {
                log::debug!("texture \"{tag}\" is missing, drawing flat");
                self.set_shader_color(self.config.fallback_color);
            }
            Shading::Flat(rgba) => self.set_shader_color(rgba),
        }
        let [u, v] = request.uv_scale;
        self.set_texture_uv_scale(u, v);

        let has_material = request
            .material
            .is_some_and(|tag| self.set_shader_material(tag));
        if !has_material {
            if let Some(shader) = self.attached_shader("default material") {
                Material::default().write_uniforms(shader);
            }
        }

        self.meshes.draw(request.primitive);
        Ok(())
    }

    /// Draws every part of `object` in order.
    pub fn render_object(&mut self, object: &SceneObject) -> Result<()> {
        log::trace!("rendering {}", object.name);
        object.parts.iter().try_for_each(|part| self.draw(part))
    }

    /// Draws one frame of `scene`. The scene must have been prepared.
    pub fn render_scene(&mut self, scene: &SceneDescription) -> Result<()> {
        if !self.prepared {
            return Err(SceneError::NotPrepared);
        }
        scene
            .objects
            .iter()
            .try_for_each(|object| self.render_object(object))
    }

    /// Frees all textures and forgets the materials. The manager has to be
    /// prepared again afterwards.
    pub fn release(&mut self) {
        self.textures.release_all();
        self.materials = MaterialRegistry::new();
        self.prepared = false;
    }
}
