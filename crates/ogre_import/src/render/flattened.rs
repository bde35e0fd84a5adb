//! Flattened mesh handed to the scene builder
//!
//! One vertex list shared by every submesh; faces index into it directly.
//! Optional attributes are `None` when the source buffer was absent.

use std::path::PathBuf;

use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::render::TextureHandle;

/// Vertex of the flattened mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVertex {
    /// Position in target space
    pub position: Vec3,
    /// Normal, if the source buffer had normals
    pub normal: Option<Vec3>,
    /// Per-vertex texture coordinate, if the source buffer had any
    pub uv: Option<Vec2>,
}

/// Triangle of the flattened mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatFace {
    /// Indices into [`FlattenedMesh::vertices`]
    pub indices: [u32; 3],
    /// Texture coordinate per corner
    pub uvs: Option<[Vec2; 3]>,
    /// 8-bit RGBA colour per corner
    pub colours: Option<[[u8; 4]; 3]>,
    /// Index into [`FlattenedMesh::materials`]
    pub material: Option<usize>,
}

/// Faces contributed by one source submesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatSubmesh {
    /// Triangles, already rebased
    pub faces: Vec<FlatFace>,
    /// Material slot shared by every face, if the material resolved
    pub material: Option<usize>,
}

/// Material as bound to the flattened mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSlot {
    /// Material name
    pub name: String,
    /// Diffuse colour with alpha
    pub diffuse: Vec4,
    /// Specular colour
    pub specular: Vec4,
    /// Texture file, if the material names one
    pub texture_path: Option<PathBuf>,
    /// Resolved texture, if it could be loaded
    pub texture: Option<TextureHandle>,
}

/// Mesh ready for the scene builder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedMesh {
    /// Shared vertices first, then every non-shared submesh's vertices
    pub vertices: Vec<FlatVertex>,
    /// One entry per source submesh, in document order
    pub submeshes: Vec<FlatSubmesh>,
    /// Distinct materials referenced by the submeshes
    pub materials: Vec<MaterialSlot>,
}

impl FlattenedMesh {
    /// Iterate over every face of every submesh
    pub fn faces(&self) -> impl Iterator<Item = &FlatFace> {
        self.submeshes.iter().flat_map(|s| s.faces.iter())
    }

    /// Total number of faces
    pub fn face_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.faces.len()).sum()
    }

    /// Whether any vertex carries a normal
    pub fn has_normals(&self) -> bool {
        self.vertices.iter().any(|v| v.normal.is_some())
    }

    /// Whether any face carries texture coordinates
    pub fn has_face_uvs(&self) -> bool {
        self.faces().any(|f| f.uvs.is_some())
    }
}
