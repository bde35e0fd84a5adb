//! OGRE material script parser
//!
//! Material scripts are only loosely structured, so this is not a grammar.
//! Every line is tried against a fixed list of patterns in priority order:
//!
//! 1. `material <name>`
//! 2. `texture <path>` (first one per material wins)
//! 3. `diffuse <r> <g> <b> <a>`
//! 4. `diffuse <r> <g> <b>`
//! 5. `specular <r> <g> <b>`
//!
//! Anything else is ignored. A line that matches but fails to parse is
//! logged with its file and line number and skipped.

use std::path::Path;

use regex::{Captures, Regex};

use super::material::Material;
use super::material_library::MaterialLibrary;
use crate::assets::ImportError;
use crate::foundation::logging::ImportLog;
use crate::foundation::math::Vec4;

/// Compiled line patterns
#[derive(Debug, Clone)]
pub struct MaterialScriptParser {
    material_name: Regex,
    texture_name: Regex,
    diffuse_alpha: Regex,
    diffuse: Regex,
    specular: Regex,
}

/// What a single line contributed
enum Directive<'l> {
    Material(&'l str),
    Texture(&'l str),
    Diffuse(Captures<'l>),
    Specular(Captures<'l>),
}

impl MaterialScriptParser {
    /// Compile the line patterns
    pub fn new() -> Result<Self, ImportError> {
        Ok(Self {
            material_name: Regex::new(r"^\s*material\s+(.*?)\s*\{?\s*$")?,
            texture_name: Regex::new(r"^\s*texture\s+(.*?)\s*$")?,
            diffuse_alpha: Regex::new(r"^\s*diffuse\s+(\S+?)\s+(\S+?)\s+(\S+?)\s+(\S+).*$")?,
            diffuse: Regex::new(r"^\s*diffuse\s+(\S+?)\s+(\S+?)\s+(\S+).*$")?,
            specular: Regex::new(r"^\s*specular\s+(\S+?)\s+(\S+?)\s+(\S+).*$")?,
        })
    }

    /// Parse one script into `library`
    ///
    /// `source` names the script in diagnostics; texture paths are resolved
    /// against its parent directory.
    pub fn parse(&self, contents: &str, source: &Path, library: &mut MaterialLibrary, log: &dyn ImportLog) {
        let base_dir = source.parent().unwrap_or_else(|| Path::new(""));
        let mut current: Option<String> = None;

        for (index, raw_line) in contents.lines().enumerate() {
            let line_number = index + 1;
            let line = strip_comment(raw_line);
            log.trace(&format!("line to be matched: {}", line));

            let Some(directive) = self.classify(line) else {
                continue;
            };

            if let Directive::Material(name) = directive {
                log.debug(&format!("parsing material {}", name));
                if library.insert(Material::new(name)).is_some() {
                    log.debug(&format!("material {} redefined in {}", name, source.display()));
                }
                current = Some(name.to_string());
                continue;
            }

            let material = current.as_deref().and_then(|name| library.get_mut(name));
            let result = match material {
                Some(material) => Self::apply(directive, material, base_dir, log),
                None => Err("directive outside of a material block".to_string()),
            };

            if let Err(reason) = result {
                log.warn(&format!(
                    "error parsing material {} in {} on line {}: {}",
                    current.as_deref().unwrap_or("<none>"),
                    source.display(),
                    line_number,
                    reason
                ));
            }
        }
    }

    fn classify<'l>(&self, line: &'l str) -> Option<Directive<'l>> {
        if let Some(caps) = self.material_name.captures(line) {
            return caps.get(1).map(|m| Directive::Material(m.as_str()));
        }
        if let Some(caps) = self.texture_name.captures(line) {
            return caps.get(1).map(|m| Directive::Texture(m.as_str()));
        }
        if let Some(caps) = self.diffuse_alpha.captures(line).or_else(|| self.diffuse.captures(line)) {
            return Some(Directive::Diffuse(caps));
        }
        self.specular.captures(line).map(Directive::Specular)
    }

    fn apply(directive: Directive<'_>, material: &mut Material, base_dir: &Path, log: &dyn ImportLog) -> Result<(), String> {
        match directive {
            Directive::Material(_) => {}
            Directive::Texture(name) => {
                if material.texture_path.is_none() {
                    material.texture_path = Some(base_dir.join(name));
                } else {
                    log.debug(&format!("    ignoring additional texture {} of {}", name, material.name));
                }
            }
            Directive::Diffuse(groups) => {
                let r = parse_group(&groups, 1)?;
                let g = parse_group(&groups, 2)?;
                let b = parse_group(&groups, 3)?;
                let a = if groups.get(4).is_some() { parse_group(&groups, 4)? } else { 1.0 };
                material.diffuse = Vec4::new(r, g, b, a);
                log.debug(&format!("   diffuse: {:?}", material.diffuse.as_slice()));
            }
            Directive::Specular(groups) => {
                let r = parse_group(&groups, 1)?;
                let g = parse_group(&groups, 2)?;
                let b = parse_group(&groups, 3)?;
                material.specular = Vec4::new(r, g, b, 1.0);
                log.debug(&format!("   specular: {:?}", material.specular.as_slice()));
            }
        }
        Ok(())
    }
}

fn parse_group(groups: &Captures<'_>, index: usize) -> Result<f32, String> {
    let raw = groups.get(index).map_or("", |m| m.as_str());
    raw.parse::<f32>()
        .map_err(|_| format!("invalid float value '{}'", raw))
}

/// Drop a trailing `//` comment
fn strip_comment(line: &str) -> &str {
    line.find("//").map_or(line, |pos| &line[..pos])
}
