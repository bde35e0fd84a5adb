//! Asset loading: mesh XML, material scripts and texture images

pub mod image_loader;
pub mod materials;
pub mod mesh;

pub use image_loader::ImageData;
pub use materials::{Material, MaterialLibrary, MaterialScriptParser, TextureState};
pub use mesh::{Mesh, MeshXmlParser, OperationType, Submesh, Triangle, VertexData};

#[cfg(test)]
mod test_import_pipeline;

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Import errors
#[derive(Error, Debug)]
pub enum ImportError {
    /// IO error during loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The XML token stream could not be read
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A required attribute is absent
    #[error("<{element}> at byte {position} is missing attribute '{attribute}'")]
    MissingAttribute {
        /// Element name
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
        /// Byte offset of the element in the document
        position: u64,
    },

    /// An attribute value is not a valid number
    #[error("<{element}> at byte {position} has malformed {attribute}=\"{value}\"")]
    MalformedAttribute {
        /// Element name
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
        /// Raw attribute value
        value: String,
        /// Byte offset of the element in the document
        position: u64,
    },

    /// The document declares more than one shared geometry block
    #[error("Second <sharedgeometry> block at byte {position}; only one is allowed")]
    DuplicateSharedGeometry {
        /// Byte offset of the offending block
        position: u64,
    },

    /// A submesh uses a topology other than a triangle list
    #[error("Submesh {submesh} uses unsupported operation type '{operation}'")]
    UnsupportedOperation {
        /// Submesh index in document order
        submesh: usize,
        /// Declared operation type
        operation: String,
    },

    /// Attribute buffers of one vertex buffer disagree in length
    #[error("{owner}: {attribute} buffer has {actual} entries but there are {expected} positions")]
    InconsistentBuffers {
        /// Buffer owner, e.g. "shared geometry" or "submesh 2"
        owner: String,
        /// Attribute name
        attribute: &'static str,
        /// Number of positions
        expected: usize,
        /// Number of attribute entries
        actual: usize,
    },

    /// A face references a vertex outside the active buffer
    #[error("Submesh {submesh} face {face} references vertex {index} but only {vertex_count} are available")]
    IndexOutOfBounds {
        /// Submesh index in document order
        submesh: usize,
        /// Face index within the submesh
        face: usize,
        /// Offending vertex index
        index: u32,
        /// Size of the active buffer
        vertex_count: usize,
    },

    /// The external mesh converter failed
    #[error("Converter '{executable}' failed: {reason}")]
    Converter {
        /// Converter executable
        executable: String,
        /// Failure description
        reason: String,
    },

    /// The external mesh converter ran but produced no XML file
    #[error("Converted mesh file not found: {0}")]
    ConvertedFileMissing(PathBuf),

    /// A texture image could not be decoded
    #[error("Failed to load texture: {0}")]
    Texture(String),

    /// A material pattern failed to compile
    #[error("Invalid material pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error raised while processing a specific file
    #[error("{}: {source}", path.display())]
    File {
        /// File being processed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: Box<ImportError>,
    },
}

impl ImportError {
    /// Attach the file being processed to this error
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
