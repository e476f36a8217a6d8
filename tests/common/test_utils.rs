use std::path::{Path, PathBuf};

use desk_ngin::{
    SceneConfig, SceneManager,
    resources::{mesh::RecordingMeshes, texture::RecordingTextures},
    shader::{RecordingShader, UniformValue, UniformWrite},
};
use image::{GrayImage, Luma, Rgb, RgbImage};
use tempfile::TempDir;

pub type TestManager = SceneManager<RecordingTextures, RecordingMeshes, RecordingShader>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Writes a solid-colour RGB image. The format follows the extension.
pub fn write_rgb(dir: &Path, file: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(file);
    RgbImage::from_pixel(width, height, Rgb([200, 120, 40]))
        .save(&path)
        .expect("could not write fixture image");
    path
}

/// Writes a single-channel image, which the texture loader must refuse.
pub fn write_grey(dir: &Path, file: &str) -> PathBuf {
    let path = dir.join(file);
    GrayImage::from_pixel(4, 4, Luma([128]))
        .save(&path)
        .expect("could not write fixture image");
    path
}

/// A temporary asset directory holding the given image files.
pub fn asset_dir(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("could not create asset dir");
    for file in files {
        write_rgb(dir.path(), file, 8, 8);
    }
    dir
}

/// All four desk textures.
pub fn desk_assets() -> TempDir {
    asset_dir(&["brick.jpg", "desk.jpg", "wood.jpg", "plastic.jpg"])
}

pub fn manager(config: SceneConfig) -> TestManager {
    SceneManager::new(
        config,
        RecordingTextures::new(),
        RecordingMeshes::new(),
        Some(RecordingShader::new()),
    )
}

pub fn shader(manager: &TestManager) -> &RecordingShader {
    manager.shader().expect("test managers have a shader")
}

pub fn take_writes(manager: &mut TestManager) -> Vec<UniformWrite> {
    manager
        .shader_mut()
        .map(RecordingShader::take)
        .unwrap_or_default()
}

pub fn names(writes: &[UniformWrite]) -> Vec<&str> {
    writes.iter().map(|w| w.name.as_str()).collect()
}

/// The last value written to `name` in `writes`.
pub fn last_value(writes: &[UniformWrite], name: &str) -> Option<UniformValue> {
    writes.iter().rev().find(|w| w.name == name).map(|w| w.value)
}
