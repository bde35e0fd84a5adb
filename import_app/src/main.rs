//! OGRE mesh import tool
//!
//! Imports a `.mesh.xml` (or a binary `.mesh`, through the configured
//! converter) together with the material scripts next to it, prints a
//! summary and optionally writes the flattened result as Wavefront OBJ.
//!
//! Usage: ogre-import models/ship.mesh.xml --scale 0.5 --obj ship.obj -v

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use ogre_import::foundation::logging::{self, LogFacade};
use ogre_import::prelude::*;

mod obj_export;

fn cli() -> Command {
    Command::new("ogre-import")
        .about("Imports OGRE mesh XML files and their material scripts")
        .arg(
            Arg::new("input")
                .value_name("MESH")
                .help("Mesh file (.mesh.xml, or a binary .mesh to convert first)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Import settings (.toml or .ron)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("scale")
                .short('s')
                .long("scale")
                .value_name("FACTOR")
                .help("Uniform scale applied to positions")
                .value_parser(clap::value_parser!(f32)),
        )
        .arg(
            Arg::new("converter")
                .long("converter")
                .value_name("EXECUTABLE")
                .help("Binary mesh to XML converter"),
        )
        .arg(
            Arg::new("reject-unsupported")
                .long("reject-unsupported")
                .help("Fail on triangle strips and fans instead of skipping their faces")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("obj")
                .short('o')
                .long("obj")
                .value_name("FILE")
                .help("Write the imported mesh as Wavefront OBJ")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only report fatal errors")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
}

/// Build the import settings from the config file and command line overrides
fn import_config(matches: &ArgMatches) -> Result<ImportConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ImportConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ImportConfig::default(),
    };

    if let Some(&scale) = matches.get_one::<f32>("scale") {
        config = config.with_scale_factor(scale);
    }
    if let Some(converter) = matches.get_one::<String>("converter") {
        config = config.with_converter(converter.as_str());
    }
    if matches.get_flag("reject-unsupported") {
        config = config.with_unsupported_operation(UnsupportedOperationPolicy::Reject);
    }

    let verbose = matches.get_count("verbose");
    if matches.get_flag("quiet") {
        config.verbosity = 0;
    } else if verbose > 0 {
        config.verbosity = config.verbosity.max(1).saturating_add(verbose);
    }

    Ok(config)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    let config = import_config(&matches)?;
    logging::init(config.verbosity);

    let input = matches
        .get_one::<PathBuf>("input")
        .context("No input mesh given")?;

    let facade = LogFacade;
    let importer = MeshImporter::new(config, &facade);
    let mut scene = InMemoryScene::new();
    let handle = importer
        .import(input, &mut scene)
        .with_context(|| format!("Failed to import {}", input.display()))?;

    let (name, mesh) = scene
        .object(handle)
        .context("Scene lost the imported object")?;

    log::info!(
        "'{}': {} vertices, {} faces, {} submeshes, {} materials, {} textures",
        name,
        mesh.vertices.len(),
        mesh.face_count(),
        mesh.submeshes.len(),
        mesh.materials.len(),
        scene.texture_count()
    );

    if let Some(path) = matches.get_one::<PathBuf>("obj") {
        obj_export::write_file(path, name, mesh)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {}", path.display());
    }

    Ok(())
}
