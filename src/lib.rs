//! desk-ngin
//!
//! A small scene layer that sits between static scene data and a shader
//! program. It loads textures into a fixed number of texture units, keeps a
//! table of lighting materials, and for every draw writes the model matrix,
//! shading mode, UV tiling and material to the shader before asking a mesh
//! library to draw a primitive.
//!
//! High-level modules
//! - `config`: runtime knobs (asset root, strict texture loading, lighting)
//! - `context`: a headless wgpu device and queue
//! - `data_structures`: transforms, materials, lights and the texture registry
//! - `desk`: the desk scene data
//! - `error`: the crate's error type
//! - `render`: declarative draw requests and scene objects
//! - `resources`: image decoding, the wgpu texture backend and the mesh seam
//! - `scene`: the scene manager that prepares and renders a scene
//! - `shader`: uniform names, values and the shader sink trait
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod desk;
pub mod error;
pub mod render;
pub mod resources;
pub mod scene;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use config::SceneConfig;
pub use error::{Result, SceneError};
pub use scene::{SceneDescription, SceneManager};
