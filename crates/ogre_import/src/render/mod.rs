//! Assembly of parsed meshes into renderable form
//!
//! The [`MeshAssembler`] flattens a [`Mesh`](crate::assets::Mesh) into a
//! [`FlattenedMesh`] and a [`SceneBuilder`] turns that into whatever the host
//! application renders.

pub mod flattened;
pub mod assembler;
pub mod scene_builder;

pub use flattened::{FlatFace, FlatSubmesh, FlatVertex, FlattenedMesh, MaterialSlot};
pub use assembler::MeshAssembler;
pub use scene_builder::{InMemoryScene, SceneBuilder, SceneObjectHandle, TextureHandle, TextureResolver};
