//! Fixed-capacity texture registry.
//!
//! This module provides [`TextureRegistry`], which maps caller-chosen tags to
//! uploaded textures. Every registered texture lives in a slot, and the slot
//! index is also the texture unit the texture gets bound to, so a shader can
//! select a texture by writing the slot number into its sampler uniform.
//!
//! The graphics API behind it is a [`TextureBackend`]; see
//! [`WgpuTextures`](crate::resources::texture::WgpuTextures).

use std::path::Path;

use crate::{
    error::{Result, SceneError},
    resources::{
        DecodedImage, load_image,
        texture::{TextureBackend, TextureHandle},
    },
};

/// The number of texture units every target is guaranteed to have.
pub const TEXTURE_CAPACITY: usize = 16;

/// Value written to a sampler uniform when a tag does not resolve.
pub const NOT_FOUND: i32 = -1;

/// An occupied registry slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureSlot {
    pub tag: String,
    pub handle: TextureHandle,
}

/// Tag to texture table with at most [`TEXTURE_CAPACITY`] entries.
///
/// Slots are only ever appended. They are all released together by
/// [`release_all`](Self::release_all) (also called on drop).
#[derive(Debug)]
pub struct TextureRegistry<B: TextureBackend> {
    backend: B,
    slots: Vec<TextureSlot>,
}

impl<B: TextureBackend> TextureRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            slots: Vec::with_capacity(TEXTURE_CAPACITY),
        }
    }

    /// Decodes the image at `path` and registers it under `tag`.
    ///
    /// Returns the slot the texture landed in. On any failure the registry
    /// is left exactly as it was.
    pub fn load(&mut self, path: impl AsRef<Path>, tag: &str) -> Result<usize> {
        let path = path.as_ref();
        let loaded = self
            .check_insertable(tag)
            .and_then(|()| load_image(path))
            .and_then(|image| self.insert(tag, image));
        if let Err(e) = &loaded {
            log::error!("Could not load texture \"{tag}\" from {}: {e}", path.display());
        }
        loaded
    }

    /// Uploads an already decoded image and registers it under `tag`.
    pub fn insert(&mut self, tag: &str, image: DecodedImage) -> Result<usize> {
        self.check_insertable(tag)?;
        if !matches!(image.channels, 3 | 4) {
            return Err(SceneError::UnsupportedTextureChannels {
                tag: tag.to_string(),
                channels: image.channels,
            });
        }

        // The decoded pixels are handed over and dropped by the backend.
        let handle = self
            .backend
            .upload(image, tag)
            .map_err(|e| SceneError::Upload {
                tag: tag.to_string(),
                reason: format!("{e:#}"),
            })?;

        let slot = self.slots.len();
        self.slots.push(TextureSlot {
            tag: tag.to_string(),
            handle,
        });
        Ok(slot)
    }

    fn check_insertable(&self, tag: &str) -> Result<()> {
        if self.is_full() {
            log::warn!("texture registry is full, \"{tag}\" is rejected");
            return Err(SceneError::CapacityExhausted {
                tag: tag.to_string(),
                capacity: TEXTURE_CAPACITY,
            });
        }
        if self.find_slot(tag).is_some() {
            log::warn!("texture tag \"{tag}\" is already taken");
            return Err(SceneError::DuplicateTag(tag.to_string()));
        }
        Ok(())
    }

    /// Binds every slot's texture to the unit with the slot's index.
    pub fn bind_all(&mut self) {
        for (unit, slot) in self.slots.iter().enumerate() {
            self.backend.bind(unit as u32, slot.handle);
        }
    }

    pub fn find_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.slots.iter().find(|s| s.tag == tag).map(|s| s.handle)
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.tag == tag)
    }

    /// Frees every texture and empties the registry.
    pub fn release_all(&mut self) {
        for slot in self.slots.drain(..) {
            log::debug!("releasing texture \"{}\"", slot.tag);
            self.backend.release(slot.handle);
        }
    }

    pub fn slots(&self) -> &[TextureSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= TEXTURE_CAPACITY
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: TextureBackend> Drop for TextureRegistry<B> {
    fn drop(&mut self) {
        self.release_all();
    }
}
