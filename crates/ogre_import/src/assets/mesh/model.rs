//! Mesh representation as read from an OGRE mesh XML document
//!
//! Pure data: a [`Mesh`] owns an optional shared vertex buffer and an ordered
//! list of [`Submesh`]es, each of which either indexes the shared buffer or
//! owns its own. Coordinates are already in target space (see
//! [`remap_axes`](crate::foundation::math::remap_axes)).
//!
//! Empty normal, UV or colour buffers mean the attribute is absent, never
//! zero-filled data.

use crate::assets::ImportError;
use crate::foundation::math::{Vec2, Vec3, Vec4};

/// Three vertex indices into the submesh's active buffer
pub type Triangle = [u32; 3];

/// Topology of a submesh's index buffer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationType {
    /// Independent triangles, three indices each
    #[default]
    TriangleList,
    /// Triangle strip (unsupported)
    TriangleStrip,
    /// Triangle fan (unsupported)
    TriangleFan,
    /// Anything else the document declares (unsupported)
    Other(String),
}

impl OperationType {
    /// Interpret the `operationtype` attribute. Missing or empty means triangle list.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | "triangle_list") => Self::TriangleList,
            Some("triangle_strip") => Self::TriangleStrip,
            Some("triangle_fan") => Self::TriangleFan,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Whether faces can be decoded as plain triples
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::TriangleList)
    }

    /// Attribute spelling of this operation type
    pub fn as_str(&self) -> &str {
        match self {
            Self::TriangleList => "triangle_list",
            Self::TriangleStrip => "triangle_strip",
            Self::TriangleFan => "triangle_fan",
            Self::Other(other) => other,
        }
    }
}

/// Per-vertex attribute buffers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexData {
    /// Positions, axis-remapped and scaled
    pub positions: Vec<Vec3>,
    /// Normals, axis-remapped
    pub normals: Vec<Vec3>,
    /// First texture coordinate set, vertically flipped
    pub uvs: Vec<Vec2>,
    /// Diffuse vertex colours (RGBA, alpha 1.0 when omitted)
    pub colours: Vec<Vec4>,
}

impl VertexData {
    /// Number of vertices in this buffer
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the buffer holds no vertices
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Reserve room for `additional` vertices
    pub fn reserve(&mut self, additional: usize) {
        self.positions.reserve(additional);
    }

    /// Check that every present attribute buffer matches the position count
    pub fn validate(&self, owner: &str) -> Result<(), ImportError> {
        let expected = self.positions.len();
        let lengths = [
            ("normal", self.normals.len()),
            ("texcoord", self.uvs.len()),
            ("colour", self.colours.len()),
        ];

        for (attribute, actual) in lengths {
            if actual != 0 && actual != expected {
                return Err(ImportError::InconsistentBuffers {
                    owner: owner.to_string(),
                    attribute,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// An independently indexed part of a mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submesh {
    /// Name of the material this submesh uses, possibly unresolvable
    pub material_name: String,
    /// Declared index topology
    pub operation_type: OperationType,
    /// Whether faces index the mesh's shared buffer instead of `geometry`
    pub uses_shared_vertices: bool,
    /// Triangles in document order
    pub faces: Vec<Triangle>,
    /// Local buffers; empty when `uses_shared_vertices` is set
    pub geometry: VertexData,
}

impl Submesh {
    /// Number of vertices this submesh adds to the flattened mesh
    pub fn local_vertex_count(&self) -> usize {
        if self.uses_shared_vertices {
            0
        } else {
            self.geometry.vertex_count()
        }
    }
}

/// Root container built by one parse pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Buffers of the single `sharedgeometry` block, if any
    pub shared: VertexData,
    /// Submeshes in document order
    pub submeshes: Vec<Submesh>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Total vertices after flattening: shared plus every non-shared submesh
    pub fn flattened_vertex_count(&self) -> usize {
        self.shared.vertex_count()
            + self.submeshes.iter().map(Submesh::local_vertex_count).sum::<usize>()
    }

    /// Total triangles over all submeshes
    pub fn face_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.faces.len()).sum()
    }
}
