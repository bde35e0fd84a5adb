//! Import orchestration
//!
//! Resolves the input file, loads the material scripts next to it, parses
//! and assembles the mesh and hands the result to a scene builder.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::assets::{ImportError, MaterialLibrary, MeshXmlParser};
use crate::config::ImportConfig;
use crate::foundation::logging::ImportLog;
use crate::render::{MeshAssembler, SceneBuilder, SceneObjectHandle};

const MESH_XML_SUFFIX: &str = ".mesh.xml";

/// Imports OGRE meshes into a scene builder
pub struct MeshImporter<'a> {
    config: ImportConfig,
    log: &'a dyn ImportLog,
}

impl<'a> MeshImporter<'a> {
    /// Create an importer with `config`, reporting to `log`
    pub fn new(config: ImportConfig, log: &'a dyn ImportLog) -> Self {
        Self { config, log }
    }

    /// Active configuration
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import the mesh at `path` and create one object in `scene`
    ///
    /// Binary meshes are converted to XML first. Material scripts are read
    /// from the directory holding the XML file.
    pub fn import<S>(&self, path: impl AsRef<Path>, scene: &mut S) -> Result<SceneObjectHandle, ImportError>
    where
        S: SceneBuilder + ?Sized,
    {
        self.config.validate()?;

        let xml_path = self.resolve_xml_path(path.as_ref())?;
        let directory = material_directory(&xml_path);

        let mut materials =
            MaterialLibrary::load_directory(directory, &self.config.material_extension, self.log)?;

        let mesh = MeshXmlParser::new(&self.config, self.log).parse_file(&xml_path)?;
        let flattened = MeshAssembler::new(self.log)
            .assemble(&mesh, &mut materials, &mut *scene)
            .map_err(|e| e.in_file(&xml_path))?;

        let name = mesh_name(&xml_path);
        self.log.info(&format!(
            "Creating object '{}' with {} vertices and {} faces",
            name,
            flattened.vertices.len(),
            flattened.face_count()
        ));
        let handle = scene.create_object(&name, flattened)?;

        self.log.info("import completed.");
        Ok(handle)
    }

    /// Return the XML file to parse, running the converter for binary meshes
    pub fn resolve_xml_path(&self, path: &Path) -> Result<PathBuf, ImportError> {
        if is_xml_path(path) {
            return Ok(path.to_path_buf());
        }

        let executable = &self.config.converter_executable;
        self.log.info(&format!("Converting {} with {}...", path.display(), executable));

        let status = Command::new(executable)
            .arg(path)
            .status()
            .map_err(|e| ImportError::Converter {
                executable: executable.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ImportError::Converter {
                executable: executable.clone(),
                reason: format!("exited with {}", status),
            });
        }

        let converted = converted_path(path);
        if !converted.is_file() {
            return Err(ImportError::ConvertedFileMissing(converted));
        }
        Ok(converted)
    }
}

/// Whether the file name mentions `.xml`, ignoring case
fn is_xml_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase().contains(".xml"))
        .unwrap_or(false)
}

/// `<path>.xml`, the converter's output for `path`
fn converted_path(path: &Path) -> PathBuf {
    let mut converted = OsString::from(path.as_os_str());
    converted.push(".xml");
    PathBuf::from(converted)
}

fn material_directory(xml_path: &Path) -> &Path {
    match xml_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Object name for a mesh file
///
/// `ship.mesh.xml` and `ship.MESH.XML` become `ship`, `hull.xml` becomes
/// `hull`, anything else falls back to the file stem.
pub fn mesh_name(path: &Path) -> String {
    let Some(file_name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return String::new();
    };

    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(MESH_XML_SUFFIX) && lower.len() > MESH_XML_SUFFIX.len() {
        return file_name[..file_name.len() - MESH_XML_SUFFIX.len()].to_string();
    }

    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
