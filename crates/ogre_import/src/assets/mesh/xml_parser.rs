//! Streaming parser for OGRE mesh XML
//!
//! Walks the token stream once, start tag by start tag, and grows a [`Mesh`]
//! as it goes. Nothing is buffered beyond the tag being processed, so large
//! meshes never need a document tree.
//!
//! Two pieces of state steer where data lands:
//! - the **target**: the shared geometry block, the open submesh, or nothing
//! - the **UV state**: only the first `<texcoord>` of each `<vertex>` is kept

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::assets::ImportError;
use crate::assets::mesh::elements::{
    ColourParams, CountParams, ElementAttributes, ElementKind, ElementParams, FaceParams,
    SubmeshParams, TexcoordParams, VectorParams,
};
use crate::assets::mesh::model::{Mesh, Submesh, VertexData};
use crate::config::{ImportConfig, UnsupportedOperationPolicy};
use crate::foundation::logging::{ImportLog, Level};
use crate::foundation::math::{flip_uv, remap_axes};

/// Upper bound on the capacity reserved from a `vertexcount` or `count` hint.
/// Larger meshes still load, they just grow their buffers on demand.
const MAX_RESERVED_ELEMENTS: usize = 1 << 20;

/// Where geometry elements are currently written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Outside any geometry-bearing block
    Detached,
    /// Inside `<sharedgeometry>`
    Shared,
    /// Inside `<submesh>`
    Submesh,
}

/// Whether the open vertex still accepts a texture coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UvState {
    Idle,
    AwaitingUv,
}

/// Streaming OGRE mesh XML parser
pub struct MeshXmlParser<'a> {
    scale_factor: f32,
    unsupported_operation: UnsupportedOperationPolicy,
    log: &'a dyn ImportLog,
}

impl<'a> MeshXmlParser<'a> {
    /// Create a parser using the scale and topology policy of `config`
    pub fn new(config: &ImportConfig, log: &'a dyn ImportLog) -> Self {
        Self {
            scale_factor: config.scale_factor,
            unsupported_operation: config.unsupported_operation,
            log,
        }
    }

    /// Parse a `.mesh.xml` file
    ///
    /// Errors are wrapped with the file path.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Mesh, ImportError> {
        let path = path.as_ref();
        self.log.info(&format!("Reading mesh file {}...", path.display()));

        let file = File::open(path).map_err(|e| ImportError::from(e).in_file(path))?;
        self.parse_reader(BufReader::new(file))
            .map_err(|e| e.in_file(path))
    }

    /// Parse an in-memory document
    pub fn parse_str(&self, xml: &str) -> Result<Mesh, ImportError> {
        self.parse_reader(xml.as_bytes())
    }

    /// Parse a document from any buffered reader in a single forward pass
    pub fn parse_reader<R: BufRead>(&self, source: R) -> Result<Mesh, ImportError> {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);

        let mut state = ParseState::new(self);
        let mut buf = Vec::new();

        loop {
            let event = reader.read_event_into(&mut buf)?;
            // The reader sits just past the closing `>` of the event
            let end = reader.buffer_position() as u64;
            match event {
                Event::Start(ref e) => state.start_element(e, end.saturating_sub(e.len() as u64 + 2))?,
                Event::Empty(ref e) => {
                    state.start_element(e, end.saturating_sub(e.len() as u64 + 3))?;
                    state.end_element(ElementKind::from_name(e.local_name().as_ref()));
                }
                Event::End(ref e) => state.end_element(ElementKind::from_name(e.local_name().as_ref())),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(state.finish())
    }
}

/// Mutable state of one parse pass
struct ParseState<'p, 'a> {
    parser: &'p MeshXmlParser<'a>,
    mesh: Mesh,
    current: Option<Submesh>,
    target: Target,
    uv_state: UvState,
    seen_shared_geometry: bool,
    reported: HashSet<&'static str>,
}

impl<'p, 'a> ParseState<'p, 'a> {
    fn new(parser: &'p MeshXmlParser<'a>) -> Self {
        Self {
            parser,
            mesh: Mesh::new(),
            current: None,
            target: Target::Detached,
            uv_state: UvState::Idle,
            seen_shared_geometry: false,
            reported: HashSet::new(),
        }
    }

    fn log(&self) -> &'a dyn ImportLog {
        self.parser.log
    }

    /// Warn about a kind of ignored content, once per document
    fn report_once(&mut self, what: &'static str) {
        if self.reported.insert(what) {
            self.log().warn(&format!("Ignoring unsupported content: {}", what));
        }
    }

    fn target_buffer(&mut self) -> Option<&mut VertexData> {
        match self.target {
            Target::Shared => Some(&mut self.mesh.shared),
            Target::Submesh => self.current.as_mut().map(|submesh| &mut submesh.geometry),
            Target::Detached => None,
        }
    }

    fn params<P: ElementParams>(kind: ElementKind, e: &BytesStart<'_>, position: u64) -> Result<P, ImportError> {
        P::from_attributes(&ElementAttributes::read(kind, e, position)?)
    }

    fn start_element(&mut self, e: &BytesStart<'_>, position: u64) -> Result<(), ImportError> {
        let kind = ElementKind::from_name(e.local_name().as_ref());

        match kind {
            ElementKind::SharedGeometry => {
                if self.seen_shared_geometry {
                    return Err(ImportError::DuplicateSharedGeometry { position });
                }
                self.seen_shared_geometry = true;
                self.target = Target::Shared;

                let hint = CountParams::from_attributes(&ElementAttributes::read(kind, e, position)?, "vertexcount")?;
                if let Some(count) = hint.count {
                    self.mesh.shared.reserve(count.min(MAX_RESERVED_ELEMENTS));
                }
            }

            ElementKind::Submesh => {
                let params: SubmeshParams = Self::params(kind, e, position)?;
                let index = self.mesh.submeshes.len();

                if !params.operation_type.is_supported() {
                    match self.parser.unsupported_operation {
                        UnsupportedOperationPolicy::Reject => {
                            return Err(ImportError::UnsupportedOperation {
                                submesh: index,
                                operation: params.operation_type.as_str().to_string(),
                            });
                        }
                        UnsupportedOperationPolicy::Skip => self.log().warn(&format!(
                            "Submesh {} uses unsupported operation type '{}'; its faces are skipped",
                            index,
                            params.operation_type.as_str()
                        )),
                    }
                }

                self.log().debug(&format!(
                    "Submesh {} with material '{}'{}",
                    index,
                    params.material,
                    if params.uses_shared_vertices { " using shared vertices" } else { "" }
                ));

                self.current = Some(Submesh {
                    material_name: params.material,
                    operation_type: params.operation_type,
                    uses_shared_vertices: params.uses_shared_vertices,
                    ..Default::default()
                });
                self.target = Target::Submesh;
            }

            ElementKind::Geometry => {
                let hint = CountParams::from_attributes(&ElementAttributes::read(kind, e, position)?, "vertexcount")?;
                if let (Some(count), Some(buffer)) = (hint.count, self.target_buffer()) {
                    buffer.reserve(count.min(MAX_RESERVED_ELEMENTS));
                }
            }

            ElementKind::Faces => {
                let hint = CountParams::from_attributes(&ElementAttributes::read(kind, e, position)?, "count")?;
                if let (Some(count), Some(submesh)) = (hint.count, self.current.as_mut()) {
                    submesh.faces.reserve(count.min(MAX_RESERVED_ELEMENTS));
                }
            }

            ElementKind::Vertex => self.uv_state = UvState::AwaitingUv,

            ElementKind::Position => {
                let params: VectorParams = Self::params(kind, e, position)?;
                let scale = self.parser.scale_factor;
                let vertex = remap_axes(params.x, params.y, params.z, scale);
                match self.target_buffer() {
                    Some(buffer) => {
                        buffer.positions.push(vertex);
                        let index = buffer.positions.len() - 1;
                        if self.log().enabled(Level::Trace) {
                            self.log().trace(&format!(
                                "   vertex {} with XYZ: {} {} {}",
                                index, vertex.x, vertex.y, vertex.z
                            ));
                        }
                    }
                    None => self.report_once("geometry outside a geometry block"),
                }
            }

            ElementKind::Normal => {
                let params: VectorParams = Self::params(kind, e, position)?;
                let normal = remap_axes(params.x, params.y, params.z, 1.0);
                match self.target_buffer() {
                    Some(buffer) => buffer.normals.push(normal),
                    None => self.report_once("geometry outside a geometry block"),
                }
            }

            ElementKind::Texcoord => {
                if self.uv_state == UvState::AwaitingUv {
                    let params: TexcoordParams = Self::params(kind, e, position)?;
                    let uv = flip_uv(params.u, params.v);
                    match self.target_buffer() {
                        Some(buffer) => buffer.uvs.push(uv),
                        None => self.report_once("geometry outside a geometry block"),
                    }
                    self.uv_state = UvState::Idle;
                } else {
                    self.report_once("additional texture coordinate sets");
                }
            }

            ElementKind::ColourDiffuse => {
                let params: ColourParams = Self::params(kind, e, position)?;
                match self.target_buffer() {
                    Some(buffer) => buffer.colours.push(params.rgba),
                    None => self.report_once("geometry outside a geometry block"),
                }
            }

            ElementKind::Face => {
                let params: FaceParams = Self::params(kind, e, position)?;
                if let Some(submesh) = self.current.as_mut() {
                    if submesh.operation_type.is_supported() {
                        submesh.faces.push(params.indices);
                    }
                }
            }

            ElementKind::Unsupported(what) => self.report_once(what),

            ElementKind::Other => {}
        }

        Ok(())
    }

    fn end_element(&mut self, kind: ElementKind) {
        match kind {
            ElementKind::Vertex => self.uv_state = UvState::Idle,
            ElementKind::SharedGeometry => {
                self.log().info(&format!(
                    "Mesh with {} shared vertices.",
                    self.mesh.shared.vertex_count()
                ));
                self.target = Target::Detached;
            }
            ElementKind::Submesh => {
                if let Some(submesh) = self.current.take() {
                    self.log().info(&format!(
                        "Submesh {} with {} vertices and {} faces...",
                        self.mesh.submeshes.len(),
                        submesh.geometry.vertex_count(),
                        submesh.faces.len()
                    ));
                    self.mesh.submeshes.push(submesh);
                }
                self.target = Target::Detached;
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Mesh {
        // A truncated document may leave a submesh open
        if let Some(submesh) = self.current.take() {
            self.log().warn("Document ended inside a submesh; keeping what was read");
            self.mesh.submeshes.push(submesh);
        }
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::logging::{CapturedLog, LevelFilter};
    use crate::foundation::math::{Vec2, Vec3, Vec4};
    use approx::assert_relative_eq;

    fn parse(xml: &str) -> Result<Mesh, ImportError> {
        let log = CapturedLog::new();
        MeshXmlParser::new(&ImportConfig::default(), &log).parse_str(xml)
    }

    const SINGLE_TRIANGLE: &str = r#"<?xml version="1.0"?>
<mesh>
    <submeshes>
        <submesh material="Red" usesharedvertices="false" use32bitindexes="false" operationtype="triangle_list">
            <faces count="1">
                <face v1="0" v2="1" v3="2" />
            </faces>
            <geometry vertexcount="3">
                <vertexbuffer positions="true" normals="true" texture_coords="1">
                    <vertex>
                        <position x="0" y="0" z="0" />
                        <normal x="0" y="1" z="0" />
                        <texcoord u="0" v="0" />
                    </vertex>
                    <vertex>
                        <position x="1" y="0" z="0" />
                        <normal x="0" y="1" z="0" />
                        <texcoord u="1" v="0" />
                    </vertex>
                    <vertex>
                        <position x="0" y="2" z="3" />
                        <normal x="0" y="1" z="0" />
                        <texcoord u="0" v="0.25" />
                    </vertex>
                </vertexbuffer>
            </geometry>
        </submesh>
    </submeshes>
</mesh>
"#;

    #[test]
    fn test_single_submesh() {
        let mesh = parse(SINGLE_TRIANGLE).unwrap();

        assert!(mesh.shared.is_empty());
        assert_eq!(mesh.submeshes.len(), 1);

        let submesh = &mesh.submeshes[0];
        assert_eq!(submesh.material_name, "Red");
        assert!(!submesh.uses_shared_vertices);
        assert_eq!(submesh.faces, vec![[0, 1, 2]]);
        assert_eq!(submesh.geometry.vertex_count(), 3);
        assert_eq!(submesh.geometry.normals.len(), 3);
        assert!(submesh.geometry.colours.is_empty());
    }

    #[test]
    fn test_axis_remap_and_uv_flip_on_ingestion() {
        let mesh = parse(SINGLE_TRIANGLE).unwrap();
        let geometry = &mesh.submeshes[0].geometry;

        // (0, 2, 3) -> (0, -3, 2)
        assert_eq!(geometry.positions[2], Vec3::new(0.0, -3.0, 2.0));
        // normal (0, 1, 0) -> (0, 0, 1)
        assert_eq!(geometry.normals[0], Vec3::new(0.0, 0.0, 1.0));
        // v -> 1 - v
        assert_eq!(geometry.uvs[0], Vec2::new(0.0, 1.0));
        assert_relative_eq!(geometry.uvs[2].y, 0.75);
    }

    #[test]
    fn test_scale_applies_to_positions_only() {
        let log = CapturedLog::new();
        let config = ImportConfig::default().with_scale_factor(2.0);
        let mesh = MeshXmlParser::new(&config, &log).parse_str(SINGLE_TRIANGLE).unwrap();
        let geometry = &mesh.submeshes[0].geometry;

        assert_eq!(geometry.positions[2], Vec3::new(0.0, -6.0, 4.0));
        assert_eq!(geometry.normals[2], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_shared_geometry_and_shared_submesh() {
        let xml = r#"<mesh>
    <sharedgeometry vertexcount="4">
        <vertexbuffer positions="true">
            <vertex><position x="0" y="0" z="0" /></vertex>
            <vertex><position x="1" y="0" z="0" /></vertex>
            <vertex><position x="1" y="1" z="0" /></vertex>
            <vertex><position x="0" y="1" z="0" /></vertex>
        </vertexbuffer>
    </sharedgeometry>
    <submeshes>
        <submesh material="Quad" usesharedvertices="true">
            <faces count="2">
                <face v1="0" v2="1" v3="2" />
                <face v1="0" v2="2" v3="3" />
            </faces>
        </submesh>
    </submeshes>
</mesh>"#;
        let mesh = parse(xml).unwrap();

        assert_eq!(mesh.shared.vertex_count(), 4);
        assert!(mesh.shared.normals.is_empty());
        assert!(mesh.shared.uvs.is_empty());
        assert_eq!(mesh.submeshes.len(), 1);
        assert!(mesh.submeshes[0].uses_shared_vertices);
        assert!(mesh.submeshes[0].geometry.is_empty());
        assert_eq!(mesh.submeshes[0].faces.len(), 2);
    }

    #[test]
    fn test_only_first_texcoord_per_vertex_is_kept() {
        let xml = r#"<mesh><submeshes><submesh material="M">
            <geometry vertexcount="2"><vertexbuffer positions="true" texture_coords="2">
                <vertex>
                    <position x="0" y="0" z="0" />
                    <texcoord u="0.1" v="0.2" />
                    <texcoord u="0.9" v="0.9" />
                </vertex>
                <vertex>
                    <position x="1" y="0" z="0" />
                    <texcoord u="0.3" v="0.4" />
                    <texcoord u="0.9" v="0.9" />
                </vertex>
            </vertexbuffer></geometry>
        </submesh></submeshes></mesh>"#;
        let log = CapturedLog::new();
        let mesh = MeshXmlParser::new(&ImportConfig::default(), &log).parse_str(xml).unwrap();
        let uvs = &mesh.submeshes[0].geometry.uvs;

        assert_eq!(uvs.len(), 2);
        assert_relative_eq!(uvs[0].x, 0.1);
        assert_relative_eq!(uvs[0].y, 0.8);
        assert_relative_eq!(uvs[1].x, 0.3);
        assert_relative_eq!(uvs[1].y, 0.6);
        assert_eq!(log.count(Level::Warn), 1);
    }

    #[test]
    fn test_texcoords_in_separate_vertex_buffer() {
        let xml = r#"<mesh><sharedgeometry vertexcount="2">
            <vertexbuffer positions="true" normals="true">
                <vertex><position x="0" y="0" z="0" /><normal x="0" y="0" z="1" /></vertex>
                <vertex><position x="1" y="0" z="0" /><normal x="0" y="0" z="1" /></vertex>
            </vertexbuffer>
            <vertexbuffer texture_coords="1">
                <vertex><texcoord u="0" v="0" /></vertex>
                <vertex><texcoord u="1" v="1" /></vertex>
            </vertexbuffer>
        </sharedgeometry></mesh>"#;
        let mesh = parse(xml).unwrap();

        assert_eq!(mesh.shared.vertex_count(), 2);
        assert_eq!(mesh.shared.uvs, vec![Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)]);
        assert_eq!(mesh.shared.normals[0], Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_vertex_colours() {
        let xml = r#"<mesh><submeshes><submesh material="M"><geometry>
            <vertexbuffer positions="true" colours_diffuse="true">
                <vertex><position x="0" y="0" z="0" /><colour_diffuse value="1 0 0" /></vertex>
                <vertex><position x="0" y="0" z="0" /><colour_diffuse value="0 1 0 0.5" /></vertex>
            </vertexbuffer></geometry></submesh></submeshes></mesh>"#;
        let mesh = parse(xml).unwrap();
        let colours = &mesh.submeshes[0].geometry.colours;

        assert_eq!(colours[0], Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(colours[1], Vec4::new(0.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn test_malformed_number_fails_import() {
        let xml = r#"<mesh><submeshes><submesh material="M"><geometry><vertexbuffer>
            <vertex><position x="0" y="zero" z="0" /></vertex>
        </vertexbuffer></geometry></submesh></submeshes></mesh>"#;

        match parse(xml) {
            Err(ImportError::MalformedAttribute { element, attribute, value, position }) => {
                assert_eq!(element, "position");
                assert_eq!(attribute, "y");
                assert_eq!(value, "zero");
                assert!(xml[position as usize..].starts_with(r#"<position x="0" y="zero""#));
            }
            other => panic!("expected malformed attribute, got {other:?}"),
        }
    }

    #[test]
    fn test_error_position_points_at_open_tag() {
        let xml = r#"<mesh><submeshes><submesh material="M"><faces count="1"><face v1="0" v2="1"></face></faces></submesh></submeshes></mesh>"#;

        match parse(xml) {
            Err(ImportError::MissingAttribute { element: "face", attribute: "v3", position }) => {
                assert_eq!(&xml[position as usize..position as usize + 5], "<face");
            }
            other => panic!("expected missing attribute, got {other:?}"),
        }
    }

    #[test]
    fn test_absurd_capacity_hints_are_capped() {
        let xml = r#"<mesh>
            <sharedgeometry vertexcount="18446744073709551615">
                <vertexbuffer positions="true">
                    <vertex><position x="0" y="0" z="0" /></vertex>
                </vertexbuffer>
            </sharedgeometry>
            <submeshes><submesh material="M" usesharedvertices="true">
                <faces count="4611686018427387904"><face v1="0" v2="0" v3="0" /></faces>
            </submesh>
            <submesh material="N">
                <faces count="100000000000"><face v1="0" v2="0" v3="0" /></faces>
                <geometry vertexcount="100000000000"><vertexbuffer positions="true">
                    <vertex><position x="0" y="0" z="0" /></vertex>
                </vertexbuffer></geometry>
            </submesh></submeshes>
        </mesh>"#;

        let mesh = parse(xml).unwrap();
        assert_eq!(mesh.shared.vertex_count(), 1);
        assert_eq!(mesh.submeshes[0].faces.len(), 1);
        assert_eq!(mesh.submeshes[1].geometry.vertex_count(), 1);
    }

    #[test]
    fn test_texcoord_after_vertex_close_is_dropped() {
        let xml = r#"<mesh><submeshes><submesh material="M">
            <geometry vertexcount="1"><vertexbuffer positions="true">
                <vertex><position x="0" y="0" z="0" /></vertex>
                <texcoord u="0.5" v="0.5" />
            </vertexbuffer></geometry>
        </submesh></submeshes></mesh>"#;
        let log = CapturedLog::new();
        let mesh = MeshXmlParser::new(&ImportConfig::default(), &log).parse_str(xml).unwrap();

        let geometry = &mesh.submeshes[0].geometry;
        assert_eq!(geometry.vertex_count(), 1);
        assert!(geometry.uvs.is_empty());
        assert_eq!(log.count(Level::Warn), 1);
        assert!(log.contains(Level::Warn, "additional texture coordinate sets"));
    }

    #[test]
    fn test_vertex_dumps_skipped_below_trace() {
        let log = CapturedLog::with_max_level(LevelFilter::Info);
        let mesh = MeshXmlParser::new(&ImportConfig::default(), &log)
            .parse_str(SINGLE_TRIANGLE)
            .unwrap();

        assert_eq!(mesh.submeshes[0].geometry.vertex_count(), 3);
        assert_eq!(log.count(Level::Trace), 0);
        assert!(log.contains(Level::Info, "Submesh 0 with 3 vertices"));
    }

    #[test]
    fn test_malformed_face_index_fails_import() {
        let xml = r#"<mesh><submeshes><submesh material="M"><faces>
            <face v1="0" v2="-1" v3="2" />
        </faces></submesh></submeshes></mesh>"#;
        assert!(matches!(
            parse(xml),
            Err(ImportError::MalformedAttribute { element: "face", attribute: "v2", .. })
        ));
    }

    #[test]
    fn test_face_outside_submesh_is_ignored() {
        let xml = r#"<mesh><faces><face v1="0" v2="1" v3="2" /></faces></mesh>"#;
        let mesh = parse(xml).unwrap();
        assert!(mesh.submeshes.is_empty());
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_second_shared_geometry_is_rejected() {
        let xml = r#"<mesh><sharedgeometry vertexcount="0"></sharedgeometry>
            <sharedgeometry vertexcount="0"></sharedgeometry></mesh>"#;
        assert!(matches!(parse(xml), Err(ImportError::DuplicateSharedGeometry { .. })));
    }

    const STRIP_THEN_LIST: &str = r#"<mesh><submeshes>
        <submesh material="Strip" operationtype="triangle_strip">
            <faces><face v1="0" v2="1" v3="2" /><face v1="3" v2="0" v3="0" /></faces>
            <geometry><vertexbuffer>
                <vertex><position x="0" y="0" z="0" /></vertex>
                <vertex><position x="1" y="0" z="0" /></vertex>
                <vertex><position x="1" y="1" z="0" /></vertex>
                <vertex><position x="0" y="1" z="0" /></vertex>
            </vertexbuffer></geometry>
        </submesh>
        <submesh material="List" operationtype="triangle_list">
            <faces><face v1="0" v2="1" v3="2" /></faces>
            <geometry><vertexbuffer>
                <vertex><position x="0" y="0" z="0" /></vertex>
                <vertex><position x="1" y="0" z="0" /></vertex>
                <vertex><position x="1" y="1" z="0" /></vertex>
            </vertexbuffer></geometry>
        </submesh>
    </submeshes></mesh>"#;

    #[test]
    fn test_unsupported_operation_is_skipped_with_warning() {
        let log = CapturedLog::new();
        let mesh = MeshXmlParser::new(&ImportConfig::default(), &log)
            .parse_str(STRIP_THEN_LIST)
            .unwrap();

        assert_eq!(mesh.submeshes.len(), 2);
        assert!(mesh.submeshes[0].faces.is_empty());
        assert_eq!(mesh.submeshes[0].geometry.vertex_count(), 4);
        assert_eq!(mesh.submeshes[1].faces.len(), 1);
        assert!(log.contains(Level::Warn, "triangle_strip"));
    }

    #[test]
    fn test_unsupported_operation_can_be_rejected() {
        let log = CapturedLog::new();
        let config = ImportConfig::default().with_unsupported_operation(UnsupportedOperationPolicy::Reject);
        let result = MeshXmlParser::new(&config, &log).parse_str(STRIP_THEN_LIST);

        assert!(matches!(
            result,
            Err(ImportError::UnsupportedOperation { submesh: 0, ref operation }) if operation == "triangle_strip"
        ));
    }

    #[test]
    fn test_skeleton_content_is_reported_once() {
        let xml = r#"<mesh>
            <submeshes><submesh material="M">
                <boneassignments>
                    <vertexboneassignment vertexindex="0" boneindex="0" weight="1" />
                    <vertexboneassignment vertexindex="1" boneindex="0" weight="1" />
                </boneassignments>
            </submesh></submeshes>
            <skeletonlink name="ship.skeleton" />
        </mesh>"#;
        let log = CapturedLog::new();
        let mesh = MeshXmlParser::new(&ImportConfig::default(), &log).parse_str(xml).unwrap();

        assert_eq!(mesh.submeshes.len(), 1);
        assert_eq!(log.count(Level::Warn), 2);
        assert!(log.contains(Level::Warn, "bone assignments"));
        assert!(log.contains(Level::Warn, "skeleton links"));
    }

    #[test]
    fn test_parse_file_wraps_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mesh.xml");
        std::fs::write(&path, r#"<mesh><submeshes><submesh><faces><face v1="x" v2="1" v3="2"/></faces></submesh></submeshes></mesh>"#).unwrap();

        let log = CapturedLog::new();
        let err = MeshXmlParser::new(&ImportConfig::default(), &log).parse_file(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("broken.mesh.xml"), "{message}");
        assert!(message.contains("v1"), "{message}");
    }
}
