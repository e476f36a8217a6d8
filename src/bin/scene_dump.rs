//! Prepares the desk scene, renders one frame into recorders and prints the
//! uniform writes and mesh draws it produced.
//!
//! Textures go to the GPU when an adapter is available and to a recorder
//! otherwise. Configuration comes from `DESK_ASSET_ROOT`,
//! `DESK_STRICT_TEXTURES` and `DESK_LIGHTING`, log output from `RUST_LOG`.

use anyhow::Context as _;
use desk_ngin::{
    SceneConfig, SceneDescription, SceneManager,
    context::GpuContext,
    desk,
    resources::{
        mesh::RecordingMeshes,
        texture::{RecordingTextures, TextureBackend, WgpuTextures},
    },
    shader::{RecordingShader, UniformWrite},
};

fn main() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let config = SceneConfig::from_env();
    let scene = desk::scene();
    match futures::executor::block_on(GpuContext::headless()) {
        Ok(ctx) => dump(config, WgpuTextures::new(&ctx), &scene),
        Err(e) => {
            log::warn!("no GPU available ({e:#}), recording texture calls instead");
            dump(config, RecordingTextures::new(), &scene)
        }
    }
}

fn dump<B: TextureBackend>(config: SceneConfig, textures: B, scene: &SceneDescription) -> anyhow::Result<()> {
    let mut manager = SceneManager::new(config, textures, RecordingMeshes::new(), Some(RecordingShader::new()));
    manager
        .prepare_scene(scene)
        .context("failed to prepare the desk scene")?;

    println!("textures:");
    for (unit, slot) in manager.textures().slots().iter().enumerate() {
        println!("  unit {unit}: {}", slot.tag);
    }
    println!("setup:");
    print_writes(&take_writes(&mut manager));

    for object in scene.objects {
        manager
            .render_object(object)
            .with_context(|| format!("failed to render {}", object.name))?;
        let writes = take_writes(&mut manager);
        println!("{} ({} parts):", object.name, object.parts.len());
        print_writes(&writes);
    }

    let draws: Vec<_> = manager.meshes().draws().collect();
    println!("{} draws: {draws:?}", draws.len());
    Ok(())
}

fn take_writes<B: TextureBackend>(manager: &mut SceneManager<B, RecordingMeshes, RecordingShader>) -> Vec<UniformWrite> {
    manager
        .shader_mut()
        .map(RecordingShader::take)
        .unwrap_or_default()
}

fn print_writes(writes: &[UniformWrite]) {
    for write in writes {
        println!("  {} = {:?}", write.name, write.value);
    }
}
