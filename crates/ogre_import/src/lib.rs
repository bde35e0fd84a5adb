//! # OGRE Import
//!
//! Imports meshes authored in the OGRE mesh XML format, together with the
//! material scripts that sit next to them, into a flattened mesh ready to be
//! handed to a scene builder.
//!
//! ## Pipeline
//!
//! - **Material scripts**: every `*.material` file in the mesh directory is
//!   scanned line by line into a [`MaterialLibrary`](assets::MaterialLibrary)
//! - **Mesh XML**: a single streaming pass builds the [`Mesh`](assets::Mesh)
//!   model, converting axes and texture orientation on the way in
//! - **Assembly**: shared and per-submesh vertex buffers are concatenated
//!   and face indices rebased by the [`MeshAssembler`](render::MeshAssembler)
//! - **Scene building**: the result goes to a [`SceneBuilder`](render::SceneBuilder)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ogre_import::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = LogFacade;
//!     let importer = MeshImporter::new(ImportConfig::default(), &log);
//!     let mut scene = InMemoryScene::new();
//!     let handle = importer.import("models/ship.mesh.xml", &mut scene)?;
//!     println!("created object {:?}", handle);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;

mod importer;

pub use importer::MeshImporter;

/// Common imports for importer users
pub mod prelude {
    pub use crate::{
        MeshImporter,
        assets::{ImportError, Material, MaterialLibrary, Mesh, MeshXmlParser, Submesh},
        config::{Config, ImportConfig, UnsupportedOperationPolicy},
        foundation::{
            logging::{CapturedLog, ImportLog, LogFacade},
            math::{Vec2, Vec3, Vec4},
        },
        render::{
            FlattenedMesh, InMemoryScene, MeshAssembler, SceneBuilder, SceneObjectHandle,
            TextureHandle, TextureResolver,
        },
    };
}
