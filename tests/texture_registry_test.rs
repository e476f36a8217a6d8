use desk_ngin::{
    SceneError,
    data_structures::texture::{TEXTURE_CAPACITY, TextureRegistry},
    resources::{
        DecodedImage,
        texture::{RecordingTextures, TextureCall, TextureHandle},
    },
};

use crate::common::test_utils::{init_logger, write_grey, write_rgb};

mod common;

fn red_pixel() -> DecodedImage {
    DecodedImage::from_rgb(1, 1, vec![255, 0, 0])
}

#[test]
fn seventeenth_texture_is_rejected() {
    init_logger();
    let mut registry = TextureRegistry::new(RecordingTextures::new());
    for i in 0..TEXTURE_CAPACITY {
        let slot = registry.insert(&format!("texture{i}"), red_pixel()).unwrap();
        assert_eq!(slot, i);
    }
    assert!(registry.is_full());

    let err = registry.insert("one_too_many", red_pixel()).unwrap_err();
    assert!(matches!(err, SceneError::CapacityExhausted { capacity: 16, .. }));
    assert_eq!(registry.len(), TEXTURE_CAPACITY);
    assert_eq!(registry.backend().uploads(), TEXTURE_CAPACITY);
    assert_eq!(registry.find_slot("one_too_many"), None);
}

#[test]
fn full_registry_does_not_decode_the_file() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TextureRegistry::new(RecordingTextures::new());
    for i in 0..TEXTURE_CAPACITY {
        registry.insert(&format!("texture{i}"), red_pixel()).unwrap();
    }

    // The file does not exist, so reaching the decoder would be a Decode error.
    let err = registry.load(dir.path().join("absent.jpg"), "absent").unwrap_err();
    assert!(matches!(err, SceneError::CapacityExhausted { capacity: 16, .. }));
    assert_eq!(registry.len(), TEXTURE_CAPACITY);
    assert_eq!(registry.backend().uploads(), TEXTURE_CAPACITY);
}

#[test]
fn loaded_files_get_consecutive_slots() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let wood = write_rgb(dir.path(), "wood.png", 4, 2);
    let brick = write_rgb(dir.path(), "brick.jpg", 3, 3);

    let mut registry = TextureRegistry::new(RecordingTextures::new());
    assert_eq!(registry.load(&wood, "wood").unwrap(), 0);
    assert_eq!(registry.load(&brick, "brick").unwrap(), 1);

    assert_eq!(registry.find_slot("wood"), Some(0));
    assert_eq!(registry.find_slot("brick"), Some(1));
    assert_eq!(registry.find_slot("glass"), None);
    assert_eq!(registry.find_handle("brick"), Some(TextureHandle(1)));

    match &registry.backend().calls()[0] {
        TextureCall::Upload {
            label,
            width,
            height,
            channels,
            ..
        } => {
            assert_eq!(label, "wood");
            assert_eq!((*width, *height, *channels), (4, 2, 3));
        }
        other => panic!("expected an upload, got {other:?}"),
    }
}

#[test]
fn grey_images_are_refused() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let grey = write_grey(dir.path(), "grey.png");

    let mut registry = TextureRegistry::new(RecordingTextures::new());
    let err = registry.load(&grey, "grey").unwrap_err();
    assert!(matches!(err, SceneError::UnsupportedChannels { channels: 1, .. }));
    assert!(registry.is_empty());
    assert_eq!(registry.backend().uploads(), 0);
}

#[test]
fn missing_file_is_a_decode_error() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let mut registry = TextureRegistry::new(RecordingTextures::new());
    let err = registry.load(dir.path().join("nope.jpg"), "nope").unwrap_err();
    assert!(matches!(err, SceneError::Decode { .. }));
    assert!(registry.is_empty());
}

#[test]
fn two_channel_buffers_are_refused() {
    let mut registry = TextureRegistry::new(RecordingTextures::new());
    let grey_alpha = DecodedImage {
        pixels: vec![0; 8],
        width: 2,
        height: 2,
        channels: 2,
    };
    let err = registry.insert("grey_alpha", grey_alpha).unwrap_err();
    assert!(matches!(err, SceneError::UnsupportedTextureChannels { channels: 2, .. }));
    assert_eq!(
        err.to_string(),
        "texture \"grey_alpha\" has 2 colour channels, only RGB (3) and RGBA (4) are supported"
    );
}

#[test]
fn rgba_is_accepted() {
    let mut registry = TextureRegistry::new(RecordingTextures::new());
    let slot = registry
        .insert("glass", DecodedImage::from_rgba(1, 1, vec![0, 0, 0, 128]))
        .unwrap();
    assert_eq!(slot, 0);
}

#[test]
fn duplicate_tag_is_rejected() {
    let mut registry = TextureRegistry::new(RecordingTextures::new());
    registry.insert("desk", red_pixel()).unwrap();
    let err = registry.insert("desk", red_pixel()).unwrap_err();
    assert!(matches!(err, SceneError::DuplicateTag(tag) if tag == "desk"));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.backend().uploads(), 1);
}

#[test]
fn failed_upload_leaves_registry_unchanged() {
    let mut registry = TextureRegistry::new(RecordingTextures::new().fail_uploads_of("broken"));
    registry.insert("desk", red_pixel()).unwrap();
    let err = registry.insert("broken", red_pixel()).unwrap_err();
    assert!(matches!(err, SceneError::Upload { .. }));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.find_slot("broken"), None);
}

#[test]
fn slots_are_bound_to_their_index() {
    let mut registry = TextureRegistry::new(RecordingTextures::new());
    registry.insert("brick", red_pixel()).unwrap();
    registry.insert("desk", red_pixel()).unwrap();
    registry.bind_all();

    let binds: Vec<_> = registry
        .backend()
        .calls()
        .iter()
        .filter(|c| matches!(c, TextureCall::Bind(..)))
        .cloned()
        .collect();
    assert_eq!(
        binds,
        vec![
            TextureCall::Bind(0, TextureHandle(0)),
            TextureCall::Bind(1, TextureHandle(1)),
        ]
    );
}

#[test]
fn dropping_the_registry_releases_every_texture() {
    let mut backend = RecordingTextures::new();
    {
        let mut registry = TextureRegistry::new(&mut backend);
        registry.insert("brick", red_pixel()).unwrap();
        registry.insert("desk", red_pixel()).unwrap();
    }
    assert_eq!(backend.released(), vec![TextureHandle(0), TextureHandle(1)]);
    // Releasing must not allocate anything new.
    assert_eq!(backend.uploads(), 2);
}

#[test]
fn release_all_empties_the_registry() {
    let mut registry = TextureRegistry::new(RecordingTextures::new());
    registry.insert("brick", red_pixel()).unwrap();
    registry.release_all();
    assert!(registry.is_empty());
    assert_eq!(registry.find_slot("brick"), None);
    assert_eq!(registry.backend().released(), vec![TextureHandle(0)]);

    registry.release_all();
    assert_eq!(registry.backend().released().len(), 1);
}
