//! Declarative draw requests.
//!
//! A scene is a list of [`SceneObject`]s, each a fixed list of
//! [`DrawRequest`]s. A request carries the complete state of one mesh draw
//! (which primitive, where, how it is shaded and which material lights it),
//! so nothing set for one draw can leak into the next one.
//!
//! # Key types
//!
//! - [`DrawRequest`] is one primitive draw with its transform and state
//! - [`Shading`] selects between a registered texture and a flat colour
//! - [`SceneObject`] groups the requests of a compound object under a name
//!

use crate::{data_structures::transform::Transform, resources::mesh::PrimitiveKind};

/// How the fragment shader colours a draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shading<'a> {
    /// Sample the texture registered under the tag.
    Texture(&'a str),
    /// Use a single RGBA colour.
    Flat([f32; 4]),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRequest<'a> {
    pub primitive: PrimitiveKind,
    pub transform: Transform,
    pub shading: Shading<'a>,
    /// Texture coordinate tiling; ignored by flat shading.
    pub uv_scale: [f32; 2],
    pub material: Option<&'a str>,
}

impl<'a> DrawRequest<'a> {
    /// A white, untextured, unit-tiled draw without a material.
    pub const fn new(primitive: PrimitiveKind, transform: Transform) -> Self {
        Self {
            primitive,
            transform,
            shading: Shading::Flat([1.0, 1.0, 1.0, 1.0]),
            uv_scale: [1.0, 1.0],
            material: None,
        }
    }

    pub const fn textured(mut self, tag: &'a str) -> Self {
        self.shading = Shading::Texture(tag);
        self
    }

    pub const fn flat(mut self, rgba: [f32; 4]) -> Self {
        self.shading = Shading::Flat(rgba);
        self
    }

    pub const fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = [u, v];
        self
    }

    pub const fn material(mut self, tag: &'a str) -> Self {
        self.material = Some(tag);
        self
    }
}

/// A named compound object: the draws are issued in order, every frame,
/// and are always the same.
#[derive(Clone, Copy, Debug)]
pub struct SceneObject<'a> {
    pub name: &'a str,
    pub parts: &'a [DrawRequest<'a>],
}

impl<'a> SceneObject<'a> {
    pub const fn new(name: &'a str, parts: &'a [DrawRequest<'a>]) -> Self {
        Self { name, parts }
    }

    pub fn primitives(&self) -> impl Iterator<Item = PrimitiveKind> + '_ {
        self.parts.iter().map(|p| p.primitive)
    }
}
