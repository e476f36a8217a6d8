//! Lighting materials and the tag-addressed material registry.
//!
//! A [`Material`] only carries the coefficients the fragment shader's
//! lighting model consumes. Lighting itself is evaluated on the GPU.

use crate::shader::{ShaderSink, names};

/// Ambient, diffuse and specular coefficients addressed by a tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

impl Default for Material {
    /// Neutral grey, dimly lit, no highlight.
    fn default() -> Self {
        Self {
            tag: "default".to_string(),
            ambient_color: [0.5, 0.5, 0.5],
            ambient_strength: 0.1,
            diffuse_color: [0.5, 0.5, 0.5],
            specular_color: [0.0, 0.0, 0.0],
            shininess: 1.0,
        }
    }
}

impl Material {
    /// Creates a material with the default coefficients under `tag`.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, color: [f32; 3], strength: f32) -> Self {
        self.ambient_color = color;
        self.ambient_strength = strength;
        self
    }

    pub fn with_diffuse(mut self, color: [f32; 3]) -> Self {
        self.diffuse_color = color;
        self
    }

    pub fn with_specular(mut self, color: [f32; 3]) -> Self {
        self.specular_color = color;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    /// Pushes the five `material.*` uniforms.
    pub fn write_uniforms(&self, shader: &mut dyn ShaderSink) {
        shader.set_vec3(names::MATERIAL_AMBIENT_COLOR, self.ambient_color);
        shader.set_float(names::MATERIAL_AMBIENT_STRENGTH, self.ambient_strength);
        shader.set_vec3(names::MATERIAL_DIFFUSE_COLOR, self.diffuse_color);
        shader.set_vec3(names::MATERIAL_SPECULAR_COLOR, self.specular_color);
        shader.set_float(names::MATERIAL_SHININESS, self.shininess);
    }
}

/// Append-only list of materials.
///
/// Tags are not checked for uniqueness. Lookups scan in registration order
/// and return the first match, so a later material with an already used tag
/// is never found.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, material: Material) {
        log::debug!("registered material \"{}\"", material.tag);
        self.materials.push(material);
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        if self.materials.is_empty() {
            return None;
        }
        self.materials.iter().find(|m| m.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

impl Extend<Material> for MaterialRegistry {
    fn extend<T: IntoIterator<Item = Material>>(&mut self, iter: T) {
        iter.into_iter().for_each(|m| self.register(m));
    }
}
