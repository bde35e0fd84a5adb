//! Element kinds of the mesh XML schema and one typed parameter record per kind

use quick_xml::events::BytesStart;

use crate::assets::ImportError;
use crate::assets::mesh::model::{OperationType, Triangle};
use crate::foundation::math::Vec4;

/// Elements the parser reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<sharedgeometry vertexcount="..">`
    SharedGeometry,
    /// `<submesh material=".." operationtype=".." usesharedvertices="..">`
    Submesh,
    /// `<geometry vertexcount="..">` inside a submesh
    Geometry,
    /// `<faces count="..">`
    Faces,
    /// `<face v1=".." v2=".." v3="..">`
    Face,
    /// `<vertex>`
    Vertex,
    /// `<position x=".." y=".." z="..">`
    Position,
    /// `<normal x=".." y=".." z="..">`
    Normal,
    /// `<texcoord u=".." v="..">`
    Texcoord,
    /// `<colour_diffuse value="r g b [a]">`
    ColourDiffuse,
    /// Recognised but unsupported content, reported once and skipped
    Unsupported(&'static str),
    /// Everything else
    Other,
}

impl ElementKind {
    /// Classify an element by its local name
    pub fn from_name(name: &[u8]) -> Self {
        match name {
            b"sharedgeometry" => Self::SharedGeometry,
            b"submesh" => Self::Submesh,
            b"geometry" => Self::Geometry,
            b"faces" => Self::Faces,
            b"face" => Self::Face,
            b"vertex" => Self::Vertex,
            b"position" => Self::Position,
            b"normal" => Self::Normal,
            b"texcoord" => Self::Texcoord,
            b"colour_diffuse" => Self::ColourDiffuse,
            b"skeletonlink" => Self::Unsupported("skeleton links"),
            b"boneassignments" | b"vertexboneassignment" => Self::Unsupported("bone assignments"),
            b"levelofdetail" => Self::Unsupported("levels of detail"),
            b"poses" => Self::Unsupported("poses"),
            b"animations" => Self::Unsupported("animations"),
            _ => Self::Other,
        }
    }

    /// Element name as written in the document
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SharedGeometry => "sharedgeometry",
            Self::Submesh => "submesh",
            Self::Geometry => "geometry",
            Self::Faces => "faces",
            Self::Face => "face",
            Self::Vertex => "vertex",
            Self::Position => "position",
            Self::Normal => "normal",
            Self::Texcoord => "texcoord",
            Self::ColourDiffuse => "colour_diffuse",
            Self::Unsupported(_) | Self::Other => "element",
        }
    }
}

/// Decoded attributes of one start tag
#[derive(Debug)]
pub struct ElementAttributes {
    element: &'static str,
    position: u64,
    pairs: Vec<(String, String)>,
}

impl ElementAttributes {
    /// Decode and unescape every attribute of `start`
    pub fn read(element: ElementKind, start: &BytesStart<'_>, position: u64) -> Result<Self, ImportError> {
        let mut pairs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            pairs.push((key, value));
        }

        Ok(Self {
            element: element.tag(),
            position,
            pairs,
        })
    }

    /// Raw value of an attribute, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn required(&self, name: &'static str) -> Result<&str, ImportError> {
        self.get(name).ok_or(ImportError::MissingAttribute {
            element: self.element,
            attribute: name,
            position: self.position,
        })
    }

    fn malformed(&self, name: &'static str, value: &str) -> ImportError {
        ImportError::MalformedAttribute {
            element: self.element,
            attribute: name,
            value: value.to_string(),
            position: self.position,
        }
    }

    /// Required floating point attribute
    pub fn f32(&self, name: &'static str) -> Result<f32, ImportError> {
        let raw = self.required(name)?;
        raw.trim().parse().map_err(|_| self.malformed(name, raw))
    }

    /// Required non-negative integer attribute
    pub fn u32(&self, name: &'static str) -> Result<u32, ImportError> {
        let raw = self.required(name)?;
        raw.trim().parse().map_err(|_| self.malformed(name, raw))
    }

    /// Optional count attribute
    pub fn optional_count(&self, name: &'static str) -> Result<Option<usize>, ImportError> {
        self.get(name)
            .map(|raw| raw.trim().parse().map_err(|_| self.malformed(name, raw)))
            .transpose()
    }
}

/// Typed parameters of a single element kind
pub trait ElementParams: Sized {
    /// Extract the parameters from decoded attributes
    fn from_attributes(attrs: &ElementAttributes) -> Result<Self, ImportError>;
}

/// Parameters of `<submesh>`
#[derive(Debug, Clone, PartialEq)]
pub struct SubmeshParams {
    /// `material`, empty when absent
    pub material: String,
    /// `operationtype`
    pub operation_type: OperationType,
    /// `usesharedvertices == "true"`
    pub uses_shared_vertices: bool,
}

impl ElementParams for SubmeshParams {
    fn from_attributes(attrs: &ElementAttributes) -> Result<Self, ImportError> {
        Ok(Self {
            material: attrs.get("material").unwrap_or_default().to_string(),
            operation_type: OperationType::from_attribute(attrs.get("operationtype")),
            uses_shared_vertices: attrs.get("usesharedvertices") == Some("true"),
        })
    }
}

/// Capacity hint of `<sharedgeometry>`, `<geometry>` and `<faces>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountParams {
    /// Declared element count
    pub count: Option<usize>,
}

impl CountParams {
    /// Read the hint from `vertexcount` or `count`, whichever the element uses
    pub fn from_attributes(attrs: &ElementAttributes, name: &'static str) -> Result<Self, ImportError> {
        Ok(Self {
            count: attrs.optional_count(name)?,
        })
    }
}

/// Parameters of `<position>` and `<normal>`, still in OGRE space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorParams {
    /// `x`
    pub x: f32,
    /// `y`
    pub y: f32,
    /// `z`
    pub z: f32,
}

impl ElementParams for VectorParams {
    fn from_attributes(attrs: &ElementAttributes) -> Result<Self, ImportError> {
        Ok(Self {
            x: attrs.f32("x")?,
            y: attrs.f32("y")?,
            z: attrs.f32("z")?,
        })
    }
}

/// Parameters of `<texcoord>`, still top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexcoordParams {
    /// `u`
    pub u: f32,
    /// `v`
    pub v: f32,
}

impl ElementParams for TexcoordParams {
    fn from_attributes(attrs: &ElementAttributes) -> Result<Self, ImportError> {
        Ok(Self {
            u: attrs.f32("u")?,
            v: attrs.f32("v")?,
        })
    }
}

/// Parameters of `<face>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceParams {
    /// `v1`, `v2`, `v3`
    pub indices: Triangle,
}

impl ElementParams for FaceParams {
    fn from_attributes(attrs: &ElementAttributes) -> Result<Self, ImportError> {
        Ok(Self {
            indices: [attrs.u32("v1")?, attrs.u32("v2")?, attrs.u32("v3")?],
        })
    }
}

/// Parameters of `<colour_diffuse>`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourParams {
    /// RGBA, alpha 1.0 when the value lists three components
    pub rgba: Vec4,
}

impl ElementParams for ColourParams {
    fn from_attributes(attrs: &ElementAttributes) -> Result<Self, ImportError> {
        let raw = attrs.required("value")?;
        let components = raw
            .split_whitespace()
            .map(str::parse::<f32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| attrs.malformed("value", raw))?;

        match components.as_slice() {
            [r, g, b] => Ok(Self { rgba: Vec4::new(*r, *g, *b, 1.0) }),
            [r, g, b, a, ..] => Ok(Self { rgba: Vec4::new(*r, *g, *b, *a) }),
            _ => Err(attrs.malformed("value", raw)),
        }
    }
}
