//! Wavefront OBJ export of a flattened mesh
//!
//! Positions and normals are written once per vertex. Texture coordinates
//! live on face corners in the flattened mesh, so each textured face writes
//! its own three `vt` lines.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ogre_import::foundation::math::Vec3;
use ogre_import::render::FlattenedMesh;

/// Write `mesh` as an OBJ file at `path`
pub fn write_file(path: &Path, name: &str, mesh: &FlattenedMesh) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(&mut writer, name, mesh)?;
    writer.flush()
}

/// Write `mesh` in OBJ format
pub fn write_obj<W: Write>(out: &mut W, name: &str, mesh: &FlattenedMesh) -> io::Result<()> {
    writeln!(out, "# Exported by ogre-import")?;
    writeln!(out, "o {}", name)?;

    for vertex in &mesh.vertices {
        let p = vertex.position;
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }

    let has_normals = mesh.has_normals();
    if has_normals {
        for vertex in &mesh.vertices {
            let n = vertex.normal.unwrap_or_else(Vec3::zeros);
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    let mut next_uv = 1;
    for submesh in &mesh.submeshes {
        let material = submesh.material.and_then(|slot| mesh.materials.get(slot));
        match material {
            Some(material) => writeln!(out, "usemtl {}", material.name)?,
            None => writeln!(out, "usemtl default")?,
        }

        for face in &submesh.faces {
            let uv_base = if let Some(uvs) = face.uvs {
                for uv in uvs {
                    writeln!(out, "vt {} {}", uv.x, uv.y)?;
                }
                next_uv += 3;
                Some(next_uv - 3)
            } else {
                None
            };

            write!(out, "f")?;
            for (corner, &index) in face.indices.iter().enumerate() {
                let v = index + 1;
                match (uv_base, has_normals) {
                    (Some(t), true) => write!(out, " {}/{}/{}", v, t + corner, v)?,
                    (Some(t), false) => write!(out, " {}/{}", v, t + corner)?,
                    (None, true) => write!(out, " {}//{}", v, v)?,
                    (None, false) => write!(out, " {}", v)?,
                }
            }
            writeln!(out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ogre_import::foundation::math::{Vec2, Vec4};
    use ogre_import::render::{FlatFace, FlatSubmesh, FlatVertex, MaterialSlot};

    fn vertex(x: f32, normal: Option<Vec3>) -> FlatVertex {
        FlatVertex {
            position: Vec3::new(x, 0.0, 0.0),
            normal,
            uv: None,
        }
    }

    fn export(mesh: &FlattenedMesh) -> String {
        let mut out = Vec::new();
        write_obj(&mut out, "ship", mesh).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_faces_are_one_based() {
        let mesh = FlattenedMesh {
            vertices: vec![vertex(0.0, None), vertex(1.0, None), vertex(2.0, None)],
            submeshes: vec![FlatSubmesh {
                faces: vec![FlatFace {
                    indices: [0, 1, 2],
                    uvs: None,
                    colours: None,
                    material: None,
                }],
                material: None,
            }],
            materials: Vec::new(),
        };

        let obj = export(&mesh);
        assert!(obj.contains("o ship\n"));
        assert!(obj.contains("v 2 0 0\n"));
        assert!(obj.contains("usemtl default\n"));
        assert!(obj.contains("f 1 2 3\n"));
        assert!(!obj.contains("vn "));
    }

    #[test]
    fn test_textured_faces_reference_their_own_uvs() {
        let up = Some(Vec3::z());
        let face = FlatFace {
            indices: [2, 1, 0],
            uvs: Some([Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]),
            colours: None,
            material: Some(0),
        };
        let mesh = FlattenedMesh {
            vertices: vec![vertex(0.0, up), vertex(1.0, up), vertex(2.0, up)],
            submeshes: vec![FlatSubmesh {
                faces: vec![face, face],
                material: Some(0),
            }],
            materials: vec![MaterialSlot {
                name: "Hull".to_string(),
                diffuse: Vec4::new(1.0, 1.0, 1.0, 1.0),
                specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
                texture_path: None,
                texture: None,
            }],
        };

        let obj = export(&mesh);
        assert!(obj.contains("usemtl Hull\n"));
        assert_eq!(obj.matches("vn 0 0 1\n").count(), 3);
        assert_eq!(obj.matches("vt ").count(), 6);
        assert!(obj.contains("f 3/1/3 2/2/2 1/3/1\n"));
        assert!(obj.contains("f 3/4/3 2/5/2 1/6/1\n"));
    }
}
