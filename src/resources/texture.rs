//! Graphics-API side of the texture registry.
//!
//! [`TextureBackend`] is the seam between the registry (which only knows
//! tags, slots and opaque handles) and the API that owns GPU memory.
//! [`WgpuTextures`] is the wgpu implementation, [`RecordingTextures`] a
//! headless one.

use anyhow::{Context as _, anyhow};
use image::{RgbaImage, imageops::FilterType};

use crate::{context::GpuContext, data_structures::texture::TEXTURE_CAPACITY, resources::DecodedImage};

/// Opaque id of an uploaded texture. Only meaningful to the backend that
/// produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

pub trait TextureBackend {
    /// Uploads `image` as a 2D, mipmapped, repeat-wrapped, linearly filtered
    /// texture. The pixel buffer is consumed.
    fn upload(&mut self, image: DecodedImage, label: &str) -> anyhow::Result<TextureHandle>;

    /// Makes `handle` the texture sampled from `unit`.
    fn bind(&mut self, unit: u32, handle: TextureHandle);

    /// Frees the GPU memory behind `handle`.
    fn release(&mut self, handle: TextureHandle);
}

impl<B: TextureBackend + ?Sized> TextureBackend for &mut B {
    fn upload(&mut self, image: DecodedImage, label: &str) -> anyhow::Result<TextureHandle> {
        (**self).upload(image, label)
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        (**self).bind(unit, handle);
    }

    fn release(&mut self, handle: TextureHandle) {
        (**self).release(handle);
    }
}

#[derive(Debug)]
struct Texture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// wgpu texture storage with a fixed table of texture units.
///
/// wgpu has no global texture units, so "binding" records the handle in a
/// unit table. Pipelines pick the unit up through
/// [`bind_group`](Self::bind_group).
#[derive(Debug)]
pub struct WgpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    sampler: wgpu::Sampler,
    textures: Vec<Option<Texture>>,
    units: [Option<TextureHandle>; TEXTURE_CAPACITY],
}

impl WgpuTextures {
    pub fn new(ctx: &GpuContext) -> Self {
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("scene texture sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            sampler,
            textures: Vec::new(),
            units: [None; TEXTURE_CAPACITY],
        }
    }

    /// Layout with the texture at binding 0 and the sampler at binding 1.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("scene texture_bind_group_layout"),
        })
    }

    /// Bind group for whatever is bound to `unit`, if anything.
    pub fn bind_group(&self, layout: &wgpu::BindGroupLayout, unit: u32) -> Option<wgpu::BindGroup> {
        let view = self.view(unit)?;
        Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
            label: Some(&format!("texture unit {unit}")),
        }))
    }

    pub fn view(&self, unit: u32) -> Option<&wgpu::TextureView> {
        let handle = (*self.units.get(unit as usize)?)?;
        self.textures
            .get(handle.0 as usize)?
            .as_ref()
            .map(|t| &t.view)
    }

    pub fn bound(&self, unit: u32) -> Option<TextureHandle> {
        self.units.get(unit as usize).copied().flatten()
    }

    /// Number of textures currently holding GPU memory.
    pub fn live_textures(&self) -> usize {
        self.textures.iter().filter(|t| t.is_some()).count()
    }
}

/// Number of levels in a full mip chain down to 1x1.
fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Rejects images the device cannot hold as a single 2D texture.
fn check_dimensions(width: u32, height: u32, max: u32) -> anyhow::Result<()> {
    if width == 0 || height == 0 {
        return Err(anyhow!("cannot upload an empty {width}x{height} image"));
    }
    if width > max || height > max {
        return Err(anyhow!(
            "{width}x{height} exceeds the device's 2D texture limit of {max}"
        ));
    }
    Ok(())
}

/// Stores `value` in the first free entry and returns its index.
fn store<T>(entries: &mut Vec<Option<T>>, value: T) -> usize {
    match entries.iter().position(Option::is_none) {
        Some(index) => {
            entries[index] = Some(value);
            index
        }
        None => {
            entries.push(Some(value));
            entries.len() - 1
        }
    }
}

fn to_rgba(decoded: DecodedImage) -> anyhow::Result<RgbaImage> {
    let DecodedImage {
        pixels,
        width,
        height,
        channels,
    } = decoded;
    match channels {
        4 => RgbaImage::from_raw(width, height, pixels),
        3 => image::RgbImage::from_raw(width, height, pixels)
            .map(|rgb| image::DynamicImage::ImageRgb8(rgb).into_rgba8()),
        n => return Err(anyhow!("cannot upload an image with {n} channels")),
    }
    .with_context(|| format!("pixel buffer does not match {width}x{height}x{channels}"))
}

impl TextureBackend for WgpuTextures {
    fn upload(&mut self, decoded: DecodedImage, label: &str) -> anyhow::Result<TextureHandle> {
        // wgpu has no 3-channel formats, so everything is widened to RGBA.
        let rgba = to_rgba(decoded)?;
        let (width, height) = rgba.dimensions();
        check_dimensions(width, height, self.device.limits().max_texture_dimension_2d)?;
        let mip_level_count = mip_level_count(width, height);

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for level in 0..mip_level_count {
            let level_width = (width >> level).max(1);
            let level_height = (height >> level).max(1);
            let resized;
            let level_data: &[u8] = if level == 0 {
                &rgba
            } else {
                resized = image::imageops::resize(&rgba, level_width, level_height, FilterType::Triangle);
                &resized
            };
            self.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: level,
                    origin: wgpu::Origin3d::ZERO,
                },
                level_data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level_width),
                    rows_per_image: Some(level_height),
                },
                wgpu::Extent3d {
                    width: level_width,
                    height: level_height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Released entries are reused, so handles stay below the number of
        // textures alive at the same time.
        let handle = TextureHandle(store(&mut self.textures, Texture { texture, view }) as u32);
        log::debug!("uploaded \"{label}\" as {handle:?} with {mip_level_count} mip levels");
        Ok(handle)
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        match self.units.get_mut(unit as usize) {
            Some(slot) => *slot = Some(handle),
            None => log::warn!("texture unit {unit} does not exist, {handle:?} stays unbound"),
        }
    }

    fn release(&mut self, handle: TextureHandle) {
        let Some(texture) = self
            .textures
            .get_mut(handle.0 as usize)
            .and_then(Option::take)
        else {
            log::warn!("{handle:?} was already released");
            return;
        };
        texture.texture.destroy();
        self.units
            .iter_mut()
            .filter(|unit| **unit == Some(handle))
            .for_each(|unit| *unit = None);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextureCall {
    Upload {
        label: String,
        width: u32,
        height: u32,
        channels: u8,
        handle: TextureHandle,
    },
    Bind(u32, TextureHandle),
    Release(TextureHandle),
}

/// Headless texture backend that hands out sequential handles and logs
/// every call. Uploads can be made to fail for a label.
#[derive(Debug, Default)]
pub struct RecordingTextures {
    calls: Vec<TextureCall>,
    next: u32,
    failing: Vec<String>,
}

impl RecordingTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every upload labelled `label` fail.
    pub fn fail_uploads_of(mut self, label: &str) -> Self {
        self.failing.push(label.to_string());
        self
    }

    pub fn calls(&self) -> &[TextureCall] {
        &self.calls
    }

    pub fn uploads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, TextureCall::Upload { .. }))
            .count()
    }

    pub fn released(&self) -> Vec<TextureHandle> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                TextureCall::Release(handle) => Some(*handle),
                _ => None,
            })
            .collect()
    }
}

impl TextureBackend for RecordingTextures {
    fn upload(&mut self, decoded: DecodedImage, label: &str) -> anyhow::Result<TextureHandle> {
        if self.failing.iter().any(|l| l == label) {
            return Err(anyhow!("refusing to upload \"{label}\""));
        }
        let handle = TextureHandle(self.next);
        self.next += 1;
        self.calls.push(TextureCall::Upload {
            label: label.to_string(),
            width: decoded.width,
            height: decoded.height,
            channels: decoded.channels,
            handle,
        });
        Ok(handle)
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        self.calls.push(TextureCall::Bind(unit, handle));
    }

    fn release(&mut self, handle: TextureHandle) {
        self.calls.push(TextureCall::Release(handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_chain_reaches_one_pixel() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(300, 20), 9);
        assert_eq!(mip_level_count(0, 0), 1);
    }

    #[test]
    fn oversized_images_are_refused() {
        assert!(check_dimensions(8192, 8192, 8192).is_ok());
        assert!(check_dimensions(8193, 16, 8192).is_err());
        assert!(check_dimensions(16, 10_000, 8192).is_err());
        assert!(check_dimensions(0, 16, 8192).is_err());
    }

    #[test]
    fn freed_entries_are_reused() {
        let mut entries = Vec::new();
        assert_eq!(store(&mut entries, 'a'), 0);
        assert_eq!(store(&mut entries, 'b'), 1);
        entries[0] = None;
        assert_eq!(store(&mut entries, 'c'), 0);
        assert_eq!(store(&mut entries, 'd'), 2);
        assert_eq!(entries, vec![Some('c'), Some('b'), Some('d')]);
    }

    #[test]
    fn rgb_is_widened_to_opaque_rgba() {
        let rgba = to_rgba(DecodedImage::from_rgb(2, 1, vec![10, 20, 30, 40, 50, 60])).unwrap();
        assert_eq!(rgba.into_raw(), vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn short_pixel_buffer_is_rejected() {
        assert!(to_rgba(DecodedImage::from_rgba(2, 2, vec![0; 4])).is_err());
    }
}
