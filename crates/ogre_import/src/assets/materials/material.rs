//! Material descriptor read from an OGRE material script

use std::path::PathBuf;

use crate::foundation::logging::ImportLog;
use crate::foundation::math::Vec4;
use crate::render::{TextureHandle, TextureResolver};

/// Lazily resolved texture of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureState {
    /// Not requested yet
    #[default]
    Unloaded,
    /// Resolved successfully
    Loaded(TextureHandle),
    /// Resolution failed; never retried
    FailedPermanently,
}

/// Colours and texture of one named material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Unique material name
    pub name: String,
    /// Diffuse colour, alpha included
    pub diffuse: Vec4,
    /// Specular colour, alpha fixed at 1.0
    pub specular: Vec4,
    /// Ambient colour. Never written by the script parser.
    pub ambient: Vec4,
    /// Texture of the first texture unit, resolved against the script directory
    pub texture_path: Option<PathBuf>,
    texture: TextureState,
}

impl Material {
    /// Create a material with default colours
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse: Vec4::new(1.0, 1.0, 1.0, 1.0),
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
            ambient: Vec4::new(1.0, 1.0, 1.0, 1.0),
            texture_path: None,
            texture: TextureState::Unloaded,
        }
    }

    /// Current texture cache state
    pub fn texture_state(&self) -> TextureState {
        self.texture
    }

    /// Resolve the texture, at most once
    ///
    /// The first call asks `resolver`; a failure is logged and remembered so
    /// later calls return `None` without touching the file system again.
    pub fn texture<R>(&mut self, resolver: &mut R, log: &dyn ImportLog) -> Option<TextureHandle>
    where
        R: TextureResolver + ?Sized,
    {
        match self.texture {
            TextureState::Loaded(handle) => Some(handle),
            TextureState::FailedPermanently => None,
            TextureState::Unloaded => {
                let path = self.texture_path.as_ref()?;
                match resolver.resolve_texture(path) {
                    Ok(handle) => {
                        log.debug(&format!("Loaded texture {} for material {}", path.display(), self.name));
                        self.texture = TextureState::Loaded(handle);
                        Some(handle)
                    }
                    Err(e) => {
                        log.info(&format!("Couldn't open {}: {}", path.display(), e));
                        self.texture = TextureState::FailedPermanently;
                        None
                    }
                }
            }
        }
    }
}
