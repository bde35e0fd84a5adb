//! Scene builder interface
//!
//! The host application owns scene graphs, native meshes and texture
//! binding. The importer only needs two things from it: a way to turn a
//! texture path into a handle, and a way to create an object from a
//! flattened mesh.

use std::path::{Path, PathBuf};

use crate::assets::{ImageData, ImportError};
use crate::render::FlattenedMesh;

/// Handle for a texture resolved by the scene builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Handle for an object created by the scene builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneObjectHandle(pub u32);

/// Turns texture paths into handles
pub trait TextureResolver {
    /// Load or look up the texture at `path`
    fn resolve_texture(&mut self, path: &Path) -> Result<TextureHandle, ImportError>;
}

/// Creates renderable objects from flattened meshes
pub trait SceneBuilder: TextureResolver {
    /// Create an object called `name` from `mesh`
    fn create_object(&mut self, name: &str, mesh: FlattenedMesh) -> Result<SceneObjectHandle, ImportError>;
}

/// Scene builder that keeps decoded textures and objects in memory
#[derive(Debug, Default)]
pub struct InMemoryScene {
    textures: Vec<(PathBuf, ImageData)>,
    objects: Vec<(String, FlattenedMesh)>,
}

impl InMemoryScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a created object
    pub fn object(&self, handle: SceneObjectHandle) -> Option<(&str, &FlattenedMesh)> {
        self.objects
            .get(handle.0 as usize)
            .map(|(name, mesh)| (name.as_str(), mesh))
    }

    /// Look up a decoded texture
    pub fn texture(&self, handle: TextureHandle) -> Option<&ImageData> {
        self.textures.get(handle.0 as usize).map(|(_, image)| image)
    }

    /// Number of decoded textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of created objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

impl TextureResolver for InMemoryScene {
    fn resolve_texture(&mut self, path: &Path) -> Result<TextureHandle, ImportError> {
        if let Some(index) = self.textures.iter().position(|(p, _)| p == path) {
            return Ok(TextureHandle(index as u32));
        }

        let image = ImageData::from_file(path)?;
        self.textures.push((path.to_path_buf(), image));
        Ok(TextureHandle(self.textures.len() as u32 - 1))
    }
}

impl SceneBuilder for InMemoryScene {
    fn create_object(&mut self, name: &str, mesh: FlattenedMesh) -> Result<SceneObjectHandle, ImportError> {
        self.objects.push((name.to_string(), mesh));
        Ok(SceneObjectHandle(self.objects.len() as u32 - 1))
    }
}
