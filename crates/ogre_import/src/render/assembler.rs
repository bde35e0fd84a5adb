//! Mesh assembly
//!
//! Concatenates the shared buffer and every non-shared submesh buffer into a
//! single vertex list and rebases face indices onto it:
//!
//! ```text
//! [ shared 0..S | submesh A 0..a | submesh C 0..c ]
//!                 ^ offset S       ^ offset S + a
//! ```
//!
//! A submesh that uses shared vertices contributes nothing to the list and
//! keeps its indices as they are.

use std::collections::HashMap;

use crate::assets::{ImportError, MaterialLibrary, Mesh, Triangle, VertexData};
use crate::foundation::logging::{ImportLog, Level};
use crate::foundation::math::colour_to_rgba8;
use crate::render::{FlatFace, FlatSubmesh, FlatVertex, FlattenedMesh, MaterialSlot, TextureResolver};

/// Flattens parsed meshes and binds their materials
pub struct MeshAssembler<'a> {
    log: &'a dyn ImportLog,
}

/// Material slots assigned so far, by material name
type SlotIndex = HashMap<String, usize>;

impl<'a> MeshAssembler<'a> {
    /// Create an assembler reporting to `log`
    pub fn new(log: &'a dyn ImportLog) -> Self {
        Self { log }
    }

    /// Flatten `mesh`, resolving material textures through `textures`
    ///
    /// Fails when an attribute buffer disagrees with its position count or
    /// a face points outside its buffer. Unknown materials and textures that
    /// fail to load only leave the binding empty.
    pub fn assemble<R>(
        &self,
        mesh: &Mesh,
        materials: &mut MaterialLibrary,
        textures: &mut R,
    ) -> Result<FlattenedMesh, ImportError>
    where
        R: TextureResolver + ?Sized,
    {
        let mut flattened = FlattenedMesh {
            vertices: Vec::with_capacity(mesh.flattened_vertex_count()),
            ..Default::default()
        };
        let mut slots = SlotIndex::new();

        mesh.shared.validate("shared geometry")?;
        Self::append_vertices(&mut flattened.vertices, &mesh.shared);

        let mut vertex_offset = mesh.shared.vertex_count();

        for (index, submesh) in mesh.submeshes.iter().enumerate() {
            let (buffer, base) = if submesh.uses_shared_vertices {
                if !submesh.geometry.is_empty() {
                    self.log.warn(&format!(
                        "Submesh {} uses shared vertices; ignoring its own {} vertices",
                        index,
                        submesh.geometry.vertex_count()
                    ));
                }
                (&mesh.shared, 0)
            } else {
                submesh.geometry.validate(&format!("submesh {}", index))?;
                Self::append_vertices(&mut flattened.vertices, &submesh.geometry);
                (&submesh.geometry, vertex_offset)
            };

            let material = self.bind_material(
                index,
                &submesh.material_name,
                materials,
                textures,
                &mut slots,
                &mut flattened.materials,
            );

            let faces = submesh
                .faces
                .iter()
                .enumerate()
                .map(|(face_index, triangle)| {
                    self.flatten_face(index, face_index, triangle, buffer, base, material)
                })
                .collect::<Result<Vec<_>, _>>()?;

            self.log.debug(&format!(
                "Submesh {} assembled at vertex offset {} with {} faces",
                index,
                base,
                faces.len()
            ));

            flattened.submeshes.push(FlatSubmesh { faces, material });
            vertex_offset += submesh.local_vertex_count();
        }

        Ok(flattened)
    }

    fn append_vertices(out: &mut Vec<FlatVertex>, buffer: &VertexData) {
        out.extend(buffer.positions.iter().enumerate().map(|(i, position)| FlatVertex {
            position: *position,
            normal: buffer.normals.get(i).copied(),
            uv: buffer.uvs.get(i).copied(),
        }));
    }

    fn flatten_face(
        &self,
        submesh: usize,
        face: usize,
        triangle: &Triangle,
        buffer: &VertexData,
        base: usize,
        material: Option<usize>,
    ) -> Result<FlatFace, ImportError> {
        let vertex_count = buffer.vertex_count();
        if let Some(&index) = triangle.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(ImportError::IndexOutOfBounds {
                submesh,
                face,
                index,
                vertex_count,
            });
        }

        let [a, b, c] = triangle.map(|i| i as usize);
        let indices = [(a + base) as u32, (b + base) as u32, (c + base) as u32];
        if self.log.enabled(Level::Trace) {
            self.log.trace(&format!("face {} : {}/{}/{}", face, indices[0], indices[1], indices[2]));
        }

        let uvs = (!buffer.uvs.is_empty()).then(|| [buffer.uvs[a], buffer.uvs[b], buffer.uvs[c]]);
        let colours = (!buffer.colours.is_empty()).then(|| {
            [
                colour_to_rgba8(&buffer.colours[a]),
                colour_to_rgba8(&buffer.colours[b]),
                colour_to_rgba8(&buffer.colours[c]),
            ]
        });

        Ok(FlatFace {
            indices,
            uvs,
            colours,
            material,
        })
    }

    fn bind_material<R>(
        &self,
        submesh: usize,
        name: &str,
        materials: &mut MaterialLibrary,
        textures: &mut R,
        slots: &mut SlotIndex,
        out: &mut Vec<MaterialSlot>,
    ) -> Option<usize>
    where
        R: TextureResolver + ?Sized,
    {
        if let Some(&slot) = slots.get(name) {
            return Some(slot);
        }

        let Some(material) = materials.get_mut(name) else {
            if !name.is_empty() {
                self.log.info(&format!(
                    "Submesh {} references unknown material '{}'; rendering without material",
                    submesh, name
                ));
            }
            return None;
        };

        let texture = material.texture(textures, self.log);
        out.push(MaterialSlot {
            name: material.name.clone(),
            diffuse: material.diffuse,
            specular: material.specular,
            texture_path: material.texture_path.clone(),
            texture,
        });

        let slot = out.len() - 1;
        slots.insert(name.to_string(), slot);
        Some(slot)
    }
}
