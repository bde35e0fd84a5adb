//! Name-keyed collection of the materials found next to a mesh

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::material::Material;
use super::material_parser::MaterialScriptParser;
use crate::assets::ImportError;
use crate::foundation::logging::ImportLog;

/// Materials keyed by their unique name
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
}

impl MaterialLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every `*.<extension>` file in `dir`
    ///
    /// Scripts are read in sorted path order, so when two scripts define the
    /// same material the one whose path sorts last wins. Unreadable scripts
    /// and malformed lines are logged and skipped; only an unreadable
    /// directory is an error.
    pub fn load_directory(dir: impl AsRef<Path>, extension: &str, log: &dyn ImportLog) -> Result<Self, ImportError> {
        let dir = dir.as_ref();
        let parser = MaterialScriptParser::new()?;
        let mut library = Self::new();

        for path in Self::script_paths(dir, extension)? {
            match fs::read_to_string(&path) {
                Ok(contents) => parser.parse(&contents, &path, &mut library, log),
                Err(e) => log.warn(&format!("Skipping material file {}: {}", path.display(), e)),
            }
        }

        log.info(&format!("Found {} material(s) in {}", library.len(), dir.display()));
        Ok(library)
    }

    fn script_paths(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ImportError> {
        let entries = fs::read_dir(dir).map_err(|e| ImportError::from(e).in_file(dir))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ImportError::from(e).in_file(dir))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Insert a material, returning any previous one with the same name
    pub fn insert(&mut self, material: Material) -> Option<Material> {
        self.materials.insert(material.name.clone(), material)
    }

    /// Look up a material
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Look up a material for texture caching
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials.get_mut(name)
    }

    /// Whether a material is defined
    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the library is empty
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate over all materials in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }
}
