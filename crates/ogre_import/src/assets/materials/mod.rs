//! Material script loading
//!
//! Scans material scripts into a [`MaterialLibrary`] of [`Material`]s whose
//! textures are resolved lazily on first use.

pub mod material;
pub mod material_parser;
pub mod material_library;

pub use material::{Material, TextureState};
pub use material_parser::MaterialScriptParser;
pub use material_library::MaterialLibrary;
