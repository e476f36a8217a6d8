//! The desk scene: a desk against a brick wall with a monitor stand, a mug,
//! a pair of books, a desk lamp and a pen holder.
//!
//! Units are arbitrary with +Y up; the desk top is the plane `y = 0` and the
//! wall stands at `z = -10`.

use crate::{
    data_structures::{light::LightSource, material::Material, transform::Transform},
    render::{DrawRequest, SceneObject},
    resources::mesh::PrimitiveKind::{self, Box as Cuboid, Cone, Cylinder, Plane, TaperedCylinder},
    scene::{SceneDescription, TextureAsset},
};

/// Scales the ambient strength of most materials.
const AMBIENT_SCALE: f32 = 0.25;

pub const TEXTURES: &[TextureAsset<'static>] = &[
    TextureAsset { file: "brick.jpg", tag: "brick" },
    TextureAsset { file: "desk.jpg", tag: "desk" },
    TextureAsset { file: "wood.jpg", tag: "wood" },
    TextureAsset { file: "plastic.jpg", tag: "plastic" },
];

pub const PRIMITIVES: &[PrimitiveKind] = &[Cuboid, Cylinder, Plane, TaperedCylinder, Cone];

pub const LIGHTS: &[LightSource] = &[
    // dim overhead fill
    LightSource {
        position: [3.0, 6.0, 0.0],
        ambient_color: [0.01, 0.01, 0.01],
        diffuse_color: [0.01, 0.01, 0.01],
        specular_color: [0.1, 0.1, 0.1],
        focal_strength: 0.1,
        specular_intensity: 0.05,
    },
    // warm key light in front of the desk
    LightSource {
        position: [0.0, 1.0, 3.0],
        ambient_color: [0.08, 0.08, 0.113],
        diffuse_color: [0.568, 0.388, 0.133],
        specular_color: [0.588, 0.408, 0.153],
        focal_strength: 20.1,
        specular_intensity: 1.01,
    },
];

pub fn materials() -> Vec<Material> {
    let grey_diffuse = [0.84, 0.84, 0.84];
    let grey_specular = [0.92, 0.92, 0.92];
    vec![
        Material::new("wood")
            .with_ambient([0.38, 0.26, 0.1], 0.2 * AMBIENT_SCALE)
            .with_diffuse([0.36, 0.24, 0.12])
            .with_specular([0.12, 0.14, 0.08])
            .with_shininess(0.3),
        Material::new("plastic")
            .with_ambient([0.0005, 0.0005, 0.0005], 0.3)
            .with_diffuse([0.05, 0.05, 0.06])
            .with_specular([0.06, 0.05, 0.05])
            .with_shininess(0.2),
        Material::new("rubber")
            .with_ambient([0.92, 0.24, 0.90], 0.3 * AMBIENT_SCALE)
            .with_diffuse([0.93, 0.28, 0.92])
            .with_specular([0.94, 0.30, 0.93])
            .with_shininess(0.0),
        Material::new("glass")
            .with_ambient([0.7, 0.7, 0.7], 0.1 * AMBIENT_SCALE)
            .with_diffuse(grey_diffuse)
            .with_specular(grey_specular)
            .with_shininess(32.0),
        Material::new("brick")
            .with_ambient([0.8, 0.8, 0.8], 0.2 * AMBIENT_SCALE)
            .with_diffuse(grey_diffuse)
            .with_specular(grey_specular)
            .with_shininess(0.1),
        Material::new("paper")
            .with_ambient([0.8, 0.8, 0.8], 0.3 * AMBIENT_SCALE)
            .with_diffuse(grey_diffuse)
            .with_specular(grey_specular)
            .with_shininess(0.1),
        Material::new("top_cover")
            .with_ambient([0.3, 0.3, 0.3], 0.5 * AMBIENT_SCALE)
            .with_diffuse([0.0, 0.3, 0.3])
            .with_specular([0.3, 0.3, 0.3])
            .with_shininess(0.4),
        Material::new("bottom_cover")
            .with_ambient([0.84, 0.726, 0.012], 0.5 * AMBIENT_SCALE)
            .with_diffuse([0.89, 0.73, 0.02])
            .with_specular([0.895, 0.73, 0.03])
            .with_shininess(0.4),
    ]
}

const fn part(
    primitive: PrimitiveKind,
    scale: [f32; 3],
    rotation: [f32; 3],
    position: [f32; 3],
) -> DrawRequest<'static> {
    DrawRequest::new(primitive, Transform::new(scale, rotation, position))
}

const fn offset(position: [f32; 3], by: [f32; 3]) -> [f32; 3] {
    [position[0] + by[0], position[1] + by[1], position[2] + by[2]]
}

const NONE: [f32; 3] = [0.0, 0.0, 0.0];

const DESK: &[DrawRequest<'static>] = &[part(Plane, [30.0, 1.0, 10.0], NONE, NONE)
    .textured("desk")
    .uv_scale(2.0, 2.0)
    .material("wood")];

const BACK_WALL: &[DrawRequest<'static>] = &[part(
    Plane,
    [30.0, 1.0, 10.0],
    [90.0, 0.0, 0.0],
    [0.0, 10.0, -10.0],
)
.textured("brick")
.uv_scale(7.0, 3.0)
.material("brick")];

const fn stand_part(scale: [f32; 3], position: [f32; 3]) -> DrawRequest<'static> {
    part(Cuboid, scale, NONE, position)
        .textured("desk")
        .material("wood")
}

const DESK_STAND: &[DrawRequest<'static>] = &[
    stand_part([14.0, 1.0, 4.0], [0.0, 2.0, -6.0]),
    stand_part([1.0, 2.0, 4.0], [6.5, 1.0, -6.0]),
    stand_part([1.0, 2.0, 4.0], [-6.5, 1.0, -6.0]),
];

const fn mug_part(
    primitive: PrimitiveKind,
    scale: [f32; 3],
    rotation: [f32; 3],
    position: [f32; 3],
) -> DrawRequest<'static> {
    part(primitive, scale, rotation, position)
        .textured("plastic")
        .material("glass")
}

const MUG: &[DrawRequest<'static>] = &[
    // handle: two horizontal struts and the slanted grip between them
    mug_part(Cylinder, [0.125, 0.75, 0.125], [0.0, 0.0, 90.0], [1.5, 4.1, -5.0]),
    mug_part(Cylinder, [0.125, 0.75, 0.125], [0.0, 0.0, 90.0], [1.25, 3.1, -5.0]),
    mug_part(Cylinder, [0.125, 1.3, 0.125], [0.0, 0.0, 165.86], [1.5, 4.2, -5.0]),
    // body, upside down so it widens towards the rim
    mug_part(TaperedCylinder, [1.0, 2.0, 1.0], [0.0, 0.0, 180.0], [0.0, 4.5, -5.0]),
];

const fn book_part(
    primitive: PrimitiveKind,
    scale: [f32; 3],
    rotation: [f32; 3],
    position: [f32; 3],
    material: &'static str,
) -> DrawRequest<'static> {
    part(primitive, scale, rotation, position)
        .textured("plastic")
        .material(material)
}

const BOOKS: &[DrawRequest<'static>] = &[
    // lower book: pages, cover, spine
    book_part(Cuboid, [3.0, 1.0, 4.0], [0.0, 20.0, 0.0], [-2.5, 0.5, 0.0], "paper"),
    book_part(Plane, [1.5, 0.5, 2.0], [0.0, 20.0, 0.0], [-2.5, 1.001, 0.0], "bottom_cover"),
    book_part(Plane, [0.5, 1.0, 2.0], [0.0, 20.0, 90.0], [-3.93, 0.5, 0.495], "bottom_cover"),
    // upper book: pages, front cover, spine, back cover
    book_part(Cuboid, [2.6, 1.0, 3.467], [0.0, -20.0, 0.0], [-2.5, 1.5, 0.0], "paper"),
    book_part(Plane, [1.35, 0.5, 1.75], [0.0, -20.0, 0.0], [-2.5, 2.001, 0.0], "top_cover"),
    book_part(Plane, [0.5, 1.0, 1.75], [0.0, -20.0, 90.0], [-3.73, 1.5, -0.535], "top_cover"),
    book_part(Plane, [1.35, 0.5, 1.75], [0.0, -20.0, 0.0], [-2.5, 0.999, 0.0], "top_cover"),
];

const LAMP_AT: [f32; 3] = [4.0, 0.0, -1.0];

const fn lamp_part(
    primitive: PrimitiveKind,
    scale: [f32; 3],
    rotation: [f32; 3],
    position: [f32; 3],
) -> DrawRequest<'static> {
    part(primitive, scale, rotation, offset(position, LAMP_AT))
        .textured("plastic")
        .material("plastic")
}

const LAMP: &[DrawRequest<'static>] = &[
    lamp_part(Cylinder, [1.5, 0.35, 1.5], NONE, [-0.65, 0.0, 0.0]),
    lamp_part(Cuboid, [0.25, 3.75, 0.25], [0.0, 0.0, 60.0], [1.0, 3.3, 0.0]),
    lamp_part(Cuboid, [0.25, 4.0, 0.25], [0.0, 0.0, -60.0], [1.0, 1.3, 0.0]),
    lamp_part(Cone, [1.25, 2.0, 1.25], [-15.0, 0.0, -30.0], [-1.0, 3.0, 0.25]),
];

const PEN_HOLDER_AT: [f32; 3] = [-3.0, 3.5, -6.0];

const fn holder_wall(scale: [f32; 3], position: [f32; 3]) -> DrawRequest<'static> {
    part(Cuboid, scale, NONE, offset(position, PEN_HOLDER_AT))
        .textured("wood")
        .uv_scale(0.25, 0.25)
        .material("wood")
}

const fn pen_part(
    scale: [f32; 3],
    rotation: [f32; 3],
    position: [f32; 3],
    material: &'static str,
) -> DrawRequest<'static> {
    part(Cylinder, scale, rotation, offset(position, PEN_HOLDER_AT))
        .textured("plastic")
        .uv_scale(0.25, 0.25)
        .material(material)
}

const PEN_HOLDER: &[DrawRequest<'static>] = &[
    holder_wall([1.5, 2.0, 0.25], [0.0, 0.0, 0.6]),
    holder_wall([0.25, 2.0, 1.4], [0.6, 0.0, 0.0]),
    holder_wall([0.25, 2.0, 1.4], [-0.6, 0.0, 0.0]),
    holder_wall([1.5, 2.0, 0.25], [0.0, 0.0, -0.6]),
    // pens
    pen_part([0.125, 3.0, 0.125], [0.0, 0.0, 15.0], [0.1, -0.5, 0.0], "wood"),
    pen_part([0.125, 3.0, 0.125], [20.0, 0.0, -10.0], [0.1, -0.5, -0.5], "wood"),
    // caps
    pen_part([0.12, 0.2, 0.12], [0.0, 0.0, 15.0], [-0.66, 2.35, 0.0], "rubber"),
    pen_part([0.12, 0.2, 0.12], [20.0, 0.0, -10.0], [0.61, 2.21, 0.49], "rubber"),
];

/// Objects in the order they are drawn each frame.
pub static OBJECTS: &[SceneObject<'static>] = &[
    SceneObject::new("desk", DESK),
    SceneObject::new("back wall", BACK_WALL),
    SceneObject::new("desk stand", DESK_STAND),
    SceneObject::new("mug", MUG),
    SceneObject::new("books", BOOKS),
    SceneObject::new("lamp", LAMP),
    SceneObject::new("pen holder", PEN_HOLDER),
];

pub fn scene() -> SceneDescription<'static> {
    SceneDescription {
        textures: TEXTURES,
        materials: materials(),
        lights: LIGHTS,
        primitives: PRIMITIVES,
        objects: OBJECTS,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn every_referenced_tag_is_defined() {
        let textures: BTreeSet<_> = TEXTURES.iter().map(|t| t.tag).collect();
        let materials = materials();
        for request in OBJECTS.iter().flat_map(|o| o.parts) {
            if let crate::render::Shading::Texture(tag) = request.shading {
                assert!(textures.contains(tag), "unknown texture {tag}");
            }
            let material = request.material.expect("every part has a material");
            assert!(
                materials.iter().any(|m| m.tag == material),
                "unknown material {material}"
            );
        }
    }

    #[test]
    fn scene_uses_every_loaded_primitive() {
        let used: BTreeSet<_> = OBJECTS.iter().flat_map(|o| o.primitives()).collect();
        let loaded: BTreeSet<_> = PRIMITIVES.iter().copied().collect();
        assert_eq!(used, loaded);
    }

    #[test]
    fn lamp_parts_are_offset() {
        let [x, y, z] = LAMP[0].transform.position;
        assert!((x - 3.35).abs() < 1e-5);
        assert_eq!((y, z), (0.0, -1.0));
    }
}
