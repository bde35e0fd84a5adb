//! End-to-end import of a mesh directory
//!
//! Writes a mesh, two material scripts and a texture into a temporary
//! directory and imports them into an in-memory scene.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use std::path::Path;

    use crate::foundation::logging::{CapturedLog, Level};
    use crate::prelude::*;

    const MESH: &str = r#"<?xml version="1.0"?>
<mesh>
    <sharedgeometry vertexcount="4">
        <vertexbuffer positions="true" normals="true" colours_diffuse="true" texture_coords="1">
            <vertex>
                <position x="0" y="0" z="0"/>
                <normal x="0" y="1" z="0"/>
                <colour_diffuse value="1 0 0"/>
                <texcoord u="0" v="0"/>
            </vertex>
            <vertex>
                <position x="1" y="2" z="3"/>
                <normal x="0" y="1" z="0"/>
                <colour_diffuse value="1 0 0"/>
                <texcoord u="0.25" v="0.75"/>
            </vertex>
            <vertex>
                <position x="1" y="0" z="1"/>
                <normal x="0" y="1" z="0"/>
                <colour_diffuse value="1 0 0"/>
                <texcoord u="1" v="1"/>
            </vertex>
            <vertex>
                <position x="0" y="0" z="1"/>
                <normal x="0" y="1" z="0"/>
                <colour_diffuse value="1 0 0"/>
                <texcoord u="0" v="1"/>
            </vertex>
        </vertexbuffer>
    </sharedgeometry>
    <submeshes>
        <submesh material="Textured" usesharedvertices="true">
            <faces count="2">
                <face v1="0" v2="1" v3="2"/>
                <face v1="0" v2="2" v3="3"/>
            </faces>
        </submesh>
        <submesh material="Broken" usesharedvertices="false">
            <faces count="1"><face v1="0" v2="1" v3="2"/></faces>
            <geometry vertexcount="3">
                <vertexbuffer positions="true">
                    <vertex><position x="0" y="0" z="0"/></vertex>
                    <vertex><position x="1" y="0" z="0"/></vertex>
                    <vertex><position x="0" y="1" z="0"/></vertex>
                </vertexbuffer>
            </geometry>
        </submesh>
        <submesh material="Textured" usesharedvertices="false">
            <faces count="1"><face v1="2" v2="1" v3="0"/></faces>
            <geometry vertexcount="3">
                <vertexbuffer positions="true">
                    <vertex><position x="0" y="0" z="0"/></vertex>
                    <vertex><position x="0" y="0" z="1"/></vertex>
                    <vertex><position x="5" y="0" z="0"/></vertex>
                </vertexbuffer>
            </geometry>
        </submesh>
    </submeshes>
    <skeletonlink name="ship.skeleton"/>
</mesh>
"#;

    const TEXTURED: &str = "// hull material\nmaterial Textured\n{\n    technique\n    {\n        pass\n        {\n            diffuse 0.8 0.6 0.4 0.5\n            specular 0.1 0.1 0.1 12\n            texture_unit\n            {\n                texture wood.png\n            }\n        }\n    }\n}\n";

    const BROKEN: &str = "material Broken\n{\n    technique\n    {\n        pass\n        {\n            texture missing.png\n        }\n    }\n}\n";

    fn write_fixture(dir: &Path) -> std::path::PathBuf {
        let mesh_path = dir.join("ship.mesh.xml");
        std::fs::write(&mesh_path, MESH).unwrap();
        std::fs::write(dir.join("a_textured.material"), TEXTURED).unwrap();
        std::fs::write(dir.join("b_broken.material"), BROKEN).unwrap();
        std::fs::write(dir.join("notes.txt"), "material Ignored\n").unwrap();
        image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 150, 100, 255]))
            .save(dir.join("wood.png"))
            .unwrap();
        mesh_path
    }

    #[test]
    fn test_import_mesh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mesh_path = write_fixture(dir.path());

        let log = CapturedLog::new();
        let mut scene = InMemoryScene::new();
        let importer = MeshImporter::new(ImportConfig::default().with_scale_factor(2.0), &log);
        let handle = importer.import(&mesh_path, &mut scene).unwrap();

        let (name, mesh) = scene.object(handle).unwrap();
        assert_eq!(name, "ship");

        // Shared vertices first, then each local buffer in order
        assert_eq!(mesh.vertices.len(), 4 + 3 + 3);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.submeshes[0].faces[1].indices, [0, 2, 3]);
        assert_eq!(mesh.submeshes[1].faces[0].indices, [4, 5, 6]);
        assert_eq!(mesh.submeshes[2].faces[0].indices, [9, 8, 7]);

        // Axis remap and scale
        assert_relative_eq!(mesh.vertices[1].position, Vec3::new(2.0, -6.0, 4.0));
        assert_relative_eq!(mesh.vertices[9].position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[0].normal, Some(Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(mesh.vertices[4].normal, None);

        // UVs flipped vertically, colours as 8-bit RGBA
        let first = &mesh.submeshes[0].faces[0];
        let uvs = first.uvs.unwrap();
        assert_relative_eq!(uvs[1], Vec2::new(0.25, 0.25));
        assert_eq!(first.colours, Some([[255, 0, 0, 255]; 3]));
        assert!(mesh.submeshes[1].faces[0].uvs.is_none());

        // Materials bound once each, broken texture left empty
        assert_eq!(mesh.materials.len(), 2);
        let textured = &mesh.materials[mesh.submeshes[0].material.unwrap()];
        assert_eq!(textured.name, "Textured");
        assert_relative_eq!(textured.diffuse, Vec4::new(0.8, 0.6, 0.4, 0.5));
        assert_relative_eq!(textured.specular, Vec4::new(0.1, 0.1, 0.1, 1.0));
        assert_eq!(textured.texture_path.as_deref(), Some(dir.path().join("wood.png").as_path()));
        let texture = scene.texture(textured.texture.unwrap()).unwrap();
        assert_eq!((texture.width, texture.height), (4, 4));

        assert_eq!(mesh.submeshes[2].material, mesh.submeshes[0].material);
        let broken = &mesh.materials[mesh.submeshes[1].material.unwrap()];
        assert_eq!(broken.name, "Broken");
        assert_eq!(broken.texture, None);
        assert_eq!(scene.texture_count(), 1);

        // Diagnostics
        assert!(log.contains(Level::Info, "Couldn't open"));
        assert!(log.contains(Level::Warn, "skeleton links"));
        assert!(log.contains(Level::Info, "import completed."));
    }

    #[test]
    fn test_import_without_materials() {
        let dir = tempfile::tempdir().unwrap();
        let mesh_path = dir.path().join("bare.mesh.xml");
        std::fs::write(&mesh_path, MESH).unwrap();

        let log = CapturedLog::new();
        let mut scene = InMemoryScene::new();
        let handle = MeshImporter::new(ImportConfig::default(), &log)
            .import(&mesh_path, &mut scene)
            .unwrap();

        let (name, mesh) = scene.object(handle).unwrap();
        assert_eq!(name, "bare");
        assert!(mesh.materials.is_empty());
        assert!(mesh.submeshes.iter().all(|s| s.material.is_none()));
        assert_eq!(scene.texture_count(), 0);
    }

    #[test]
    fn test_strip_submesh_keeps_offsets() {
        let dir = tempfile::tempdir().unwrap();
        let mesh_path = dir.path().join("strip.mesh.xml");
        let strip = MESH.replacen(
            r#"<submesh material="Broken" usesharedvertices="false">"#,
            r#"<submesh material="Broken" usesharedvertices="false" operationtype="triangle_strip">"#,
            1,
        );
        std::fs::write(&mesh_path, strip).unwrap();

        let log = CapturedLog::new();
        let mut scene = InMemoryScene::new();
        let handle = MeshImporter::new(ImportConfig::default(), &log)
            .import(&mesh_path, &mut scene)
            .unwrap();

        let (_, mesh) = scene.object(handle).unwrap();
        assert_eq!(mesh.vertices.len(), 10);
        assert!(mesh.submeshes[1].faces.is_empty());
        assert_eq!(mesh.submeshes[2].faces[0].indices, [9, 8, 7]);
        assert!(log.contains(Level::Warn, "triangle_strip"));

        let rejecting = MeshImporter::new(
            ImportConfig::default().with_unsupported_operation(UnsupportedOperationPolicy::Reject),
            &log,
        );
        assert!(rejecting.import(&mesh_path, &mut scene).is_err());
        assert_eq!(scene.object_count(), 1);
    }
}
