use crate::shader::{ShaderSink, names};

/// A point light as the fragment shader's `lightSources[]` array expects it.
///
/// Lights are not stored by the scene manager; they are written once during
/// scene preparation and stay in the shader's uniforms from then on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub position: [f32; 3],
    pub ambient_color: [f32; 3],
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl LightSource {
    /// Writes all six fields of `lightSources[index]`.
    pub fn write_uniforms(&self, index: usize, shader: &mut dyn ShaderSink) {
        let field = |name| names::light_field(index, name);
        shader.set_vec3(&field("position"), self.position);
        shader.set_vec3(&field("ambientColor"), self.ambient_color);
        shader.set_vec3(&field("diffuseColor"), self.diffuse_color);
        shader.set_vec3(&field("specularColor"), self.specular_color);
        shader.set_float(&field("focalStrength"), self.focal_strength);
        shader.set_float(&field("specularIntensity"), self.specular_intensity);
    }
}
