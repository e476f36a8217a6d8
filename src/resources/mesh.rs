use std::collections::HashSet;

/// The primitive shapes a scene can be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Box,
    Cylinder,
    TaperedCylinder,
    Cone,
    Plane,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Box,
        PrimitiveKind::Cylinder,
        PrimitiveKind::TaperedCylinder,
        PrimitiveKind::Cone,
        PrimitiveKind::Plane,
    ];
}

/**
 * A mesh library owns ready-to-draw geometry for every `PrimitiveKind`.
 *
 * `load` builds the geometry once; `draw` issues the draw call with whatever
 * model matrix, texture and material the shader currently holds. Loading the
 * same kind twice is the caller's mistake, the scene manager never does it.
 */
pub trait MeshLibrary {
    fn load(&mut self, kind: PrimitiveKind);
    fn draw(&mut self, kind: PrimitiveKind);
}

impl<M: MeshLibrary + ?Sized> MeshLibrary for &mut M {
    fn load(&mut self, kind: PrimitiveKind) {
        (**self).load(kind);
    }

    fn draw(&mut self, kind: PrimitiveKind) {
        (**self).draw(kind);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshCall {
    Load(PrimitiveKind),
    Draw(PrimitiveKind),
}

/// Headless mesh library that keeps a log of loads and draws.
#[derive(Debug, Default)]
pub struct RecordingMeshes {
    calls: Vec<MeshCall>,
}

impl RecordingMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[MeshCall] {
        &self.calls
    }

    pub fn loaded(&self) -> HashSet<PrimitiveKind> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MeshCall::Load(kind) => Some(*kind),
                MeshCall::Draw(_) => None,
            })
            .collect()
    }

    pub fn draws(&self) -> impl Iterator<Item = PrimitiveKind> + '_ {
        self.calls.iter().filter_map(|c| match c {
            MeshCall::Draw(kind) => Some(*kind),
            MeshCall::Load(_) => None,
        })
    }
}

impl MeshLibrary for RecordingMeshes {
    fn load(&mut self, kind: PrimitiveKind) {
        log::debug!("load {kind:?} mesh");
        self.calls.push(MeshCall::Load(kind));
    }

    fn draw(&mut self, kind: PrimitiveKind) {
        log::trace!("draw {kind:?} mesh");
        self.calls.push(MeshCall::Draw(kind));
    }
}
