//! Scene data structures: transforms, materials, lights and textures.
//!
//! - `transform` composes scale, rotation and position into a model matrix
//! - `material` holds lighting coefficients and the tag-addressed registry
//! - `light` describes the light sources written to the shader once
//! - `texture` is the fixed-capacity tag to texture-unit registry

pub mod light;
pub mod material;
pub mod texture;
pub mod transform;
