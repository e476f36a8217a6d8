//! The write-only shader uniform interface.
//!
//! The scene manager never talks to a pipeline directly. Everything it wants
//! the shader to know (model matrix, shading mode, sampler unit, material and
//! light coefficients) is pushed as a named uniform through a [`ShaderSink`].
//! Nothing is ever read back.
//!
//! [`RecordingShader`] is a headless sink that keeps the ordered call log. It
//! is what the `scene-dump` binary prints and what the tests assert against.

use std::collections::HashMap;

/// Uniform names the scene manager writes to.
pub mod names {
    pub const MODEL: &str = "model";
    pub const OBJECT_COLOR: &str = "objectColor";
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    pub const USE_TEXTURE: &str = "bUseTexture";
    pub const USE_LIGHTING: &str = "bUseLighting";
    pub const UV_SCALE: &str = "UVscale";

    pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
    pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
    pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
    pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
    pub const MATERIAL_SHININESS: &str = "material.shininess";

    /// Name of a field of the `index`-th entry of the `lightSources` array.
    pub fn light_field(index: usize, field: &str) -> String {
        format!("lightSources[{index}].{field}")
    }
}

/// A single typed uniform value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Bool(bool),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4([[f32; 4]; 4]),
    /// Texture unit a sampler reads from. `-1` means "nothing resolved".
    Sampler(i32),
}

impl UniformValue {
    /// Raw little-endian-in-memory bytes of the value, as they would be
    /// uploaded. Used to compare uniform streams exactly.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            UniformValue::Float(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Bool(v) => bytemuck::bytes_of(&u32::from(*v)).to_vec(),
            UniformValue::Int(v) | UniformValue::Sampler(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Vec2(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Vec3(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Vec4(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Mat4(m) => bytemuck::bytes_of(m).to_vec(),
        }
    }
}

/// Destination for named uniform writes.
///
/// Implementors only provide [`write`](Self::write); the typed helpers are
/// conveniences on top of it.
pub trait ShaderSink {
    fn write(&mut self, name: &str, value: UniformValue);

    fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, UniformValue::Float(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.write(name, UniformValue::Bool(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.write(name, UniformValue::Int(value));
    }

    fn set_vec2(&mut self, name: &str, value: [f32; 2]) {
        self.write(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.write(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        self.write(name, UniformValue::Vec4(value));
    }

    fn set_mat4(&mut self, name: &str, value: &cgmath::Matrix4<f32>) {
        self.write(name, UniformValue::Mat4((*value).into()));
    }

    fn set_sampler(&mut self, name: &str, unit: i32) {
        self.write(name, UniformValue::Sampler(unit));
    }
}

impl<S: ShaderSink + ?Sized> ShaderSink for &mut S {
    fn write(&mut self, name: &str, value: UniformValue) {
        (**self).write(name, value);
    }
}

/// One recorded uniform write.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformWrite {
    pub name: String,
    pub value: UniformValue,
}

/// Headless [`ShaderSink`] that remembers every write in order and the
/// current value of every uniform.
#[derive(Debug, Default)]
pub struct RecordingShader {
    writes: Vec<UniformWrite>,
    current: HashMap<String, UniformValue>,
}

impl RecordingShader {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes since creation or the last [`clear`](Self::clear).
    pub fn writes(&self) -> &[UniformWrite] {
        &self.writes
    }

    /// The value the shader would currently see for `name`.
    pub fn current(&self, name: &str) -> Option<&UniformValue> {
        self.current.get(name)
    }

    /// Drops the call log but keeps the current uniform values, like a real
    /// program would between frames.
    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Takes the call log, leaving it empty.
    pub fn take(&mut self) -> Vec<UniformWrite> {
        std::mem::take(&mut self.writes)
    }

    /// Concatenated name and value bytes of the whole log.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.writes
            .iter()
            .flat_map(|w| {
                let mut bytes = w.name.as_bytes().to_vec();
                bytes.extend(w.value.to_bytes());
                bytes
            })
            .collect()
    }
}

impl ShaderSink for RecordingShader {
    fn write(&mut self, name: &str, value: UniformValue) {
        log::trace!("uniform {name} = {value:?}");
        self.current.insert(name.to_string(), value);
        self.writes.push(UniformWrite {
            name: name.to_string(),
            value,
        });
    }
}
