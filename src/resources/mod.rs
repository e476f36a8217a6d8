use std::path::Path;

use crate::error::{Result, SceneError};

/**
 * This module contains all logic for getting external data into the scene:
 * image decoding, the GPU texture backend and the mesh library seam.
 */
pub mod mesh;
pub mod texture;

/// A decoded image, tightly packed, rows bottom to top.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// 3 for RGB, 4 for RGBA.
    pub channels: u8,
}

impl DecodedImage {
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            pixels,
            width,
            height,
            channels: 3,
        }
    }

    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            pixels,
            width,
            height,
            channels: 4,
        }
    }
}

/// Decodes the image at `path`, flipped vertically so the first row is the
/// bottom one (texture coordinates start at the bottom left).
///
/// Only RGB and RGBA images are accepted. Anything else (grey, grey+alpha)
/// is an error rather than being converted.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| SceneError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let img = img.flipv();
    let (width, height) = (img.width(), img.height());
    let channels = img.color().channel_count();

    let pixels = match channels {
        3 => img.into_rgb8().into_raw(),
        4 => img.into_rgba8().into_raw(),
        _ => {
            return Err(SceneError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels,
            });
        }
    };

    log::info!(
        "Loaded image {}, width: {width}, height: {height}, channels: {channels}",
        path.display()
    );
    Ok(DecodedImage {
        pixels,
        width,
        height,
        channels,
    })
}
