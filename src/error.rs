//! Error types shared by the registries and the scene manager.

use std::path::PathBuf;

use thiserror::Error;

use crate::resources::mesh::PrimitiveKind;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("could not load image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {} has {channels} colour channels, only RGB (3) and RGBA (4) are supported", path.display())]
    UnsupportedChannels { path: PathBuf, channels: u8 },

    #[error("texture \"{tag}\" has {channels} colour channels, only RGB (3) and RGBA (4) are supported")]
    UnsupportedTextureChannels { tag: String, channels: u8 },

    #[error("texture registry is full ({capacity} slots), \"{tag}\" was not registered")]
    CapacityExhausted { tag: String, capacity: usize },

    #[error("a texture tagged \"{0}\" is already registered")]
    DuplicateTag(String),

    #[error("graphics backend could not upload \"{tag}\": {reason}")]
    Upload { tag: String, reason: String },

    #[error("{0:?} mesh was drawn before it was loaded")]
    PrimitiveNotLoaded(PrimitiveKind),

    #[error("render_scene called before prepare_scene")]
    NotPrepared,
}

pub type Result<T, E = SceneError> = std::result::Result<T, E>;
