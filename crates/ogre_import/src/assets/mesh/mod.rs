//! OGRE mesh model and its streaming XML parser

pub mod model;
pub mod elements;
pub mod xml_parser;

pub use model::{Mesh, OperationType, Submesh, Triangle, VertexData};
pub use xml_parser::MeshXmlParser;
