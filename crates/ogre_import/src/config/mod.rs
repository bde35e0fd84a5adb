//! Configuration system

use std::path::Path;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Out-of-range setting
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// What to do with a submesh whose `operationtype` is not a triangle list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedOperationPolicy {
    /// Keep the submesh's vertices, drop its faces and warn
    #[default]
    Skip,
    /// Fail the whole import
    Reject,
}

/// # Import Configuration
///
/// Settings shared by every stage of an import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Uniform scale applied to positions (not normals)
    pub scale_factor: f32,
    /// Executable that converts binary `.mesh` files to `.mesh.xml`
    pub converter_executable: String,
    /// Extension of material script files, without the dot
    pub material_extension: String,
    /// Logging verbosity, 0 (fatal only) to 3 (vertex dumps)
    pub verbosity: u8,
    /// Handling of strip/fan submeshes
    pub unsupported_operation: UnsupportedOperationPolicy,
}

impl ImportConfig {
    /// Set the position scale factor
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the converter executable
    pub fn with_converter(mut self, executable: impl Into<String>) -> Self {
        self.converter_executable = executable.into();
        self
    }

    /// Set the unsupported operation policy
    pub fn with_unsupported_operation(mut self, policy: UnsupportedOperationPolicy) -> Self {
        self.unsupported_operation = policy;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale_factor.is_finite() || self.scale_factor == 0.0 {
            return Err(ConfigError::Invalid(format!(
                "Scale factor must be finite and non-zero, got {}",
                self.scale_factor
            )));
        }
        if self.material_extension.is_empty() {
            return Err(ConfigError::Invalid("Material extension must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            converter_executable: "OgreXMLConverter".to_string(),
            material_extension: "material".to_string(),
            verbosity: 1,
            unsupported_operation: UnsupportedOperationPolicy::Skip,
        }
    }
}

impl Config for ImportConfig {}
