//! toy-export - scene exporter
//!
//! Converts host documents (TOML scene descriptions, glTF/GLB) into `.toy`
//! scene containers, and inspects existing containers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Use modules from library
use toy_export::{DedupStrategy, ExportConfig, ExportOptions, ExportOutcome, export_file};

#[derive(Parser)]
#[command(name = "toy-export")]
#[command(about = "Toy scene exporter")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every scene of a document to a .toy container
    Export {
        /// Input document (.toml scene description, .gltf, or .glb)
        input: PathBuf,

        /// Output .toy file (defaults to the input with a .toy extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a human-readable JSON dump instead of the binary container
        #[arg(long)]
        debug: bool,

        /// Exporter config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Vertex deduplication strategy (linear or hashed)
        #[arg(long)]
        dedup: Option<DedupStrategy>,
    },

    /// Decode a .toy container and print a summary
    Inspect {
        /// Input .toy file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Export {
            input,
            output,
            debug,
            config,
            dedup,
        } => {
            let mut config = match config {
                Some(path) => ExportConfig::load(&path)?,
                None => ExportConfig::default(),
            };
            if debug {
                config.debug = true;
            }
            if let Some(dedup) = dedup {
                config.dedup = dedup;
            }

            let output = output.unwrap_or_else(|| input.with_extension(toy_format::TOY_EXTENSION));
            tracing::info!("Exporting {:?} -> {:?}", input, output);

            let options = ExportOptions::new(output).with_config(config);
            match export_file(&input, &options)? {
                ExportOutcome::Completed { path, bytes } => {
                    tracing::info!("Done! {} bytes written to {:?}", bytes, path);
                }
                ExportOutcome::CancelledEmptyPath => {
                    anyhow::bail!("Export cancelled: empty destination path");
                }
            }
        }

        Commands::Inspect { input } => {
            let data = std::fs::read(&input).with_context(|| format!("Failed to read {:?}", input))?;
            let file = toy_format::read_toy_file(&data)
                .with_context(|| format!("Failed to decode {:?}", input))?;

            tracing::info!(
                "{:?}: {} meshes, {} entities, {} scenes",
                input,
                file.meshes.len(),
                file.entities.len(),
                file.scenes.len()
            );
            for (i, mesh) in file.meshes.iter().enumerate() {
                let layers: Vec<&str> = mesh.layers.iter().map(|l| l.name.as_str()).collect();
                tracing::info!(
                    "  mesh {}: {} vertices, {} triangles, {:?} indices, layers {:?}",
                    i + 1,
                    mesh.vertex_count(),
                    mesh.triangle_count(),
                    mesh.index_width(),
                    layers
                );
            }
            for (i, entity) in file.entities.iter().enumerate() {
                tracing::info!(
                    "  entity {}: '{}' mesh={} pos={:?} rot={:?} scale={:?}",
                    i + 1,
                    entity.name,
                    entity.mesh_id,
                    entity.position,
                    entity.rotation,
                    entity.scale
                );
            }
            for scene in &file.scenes {
                tracing::info!("  scene '{}': entities {:?}", scene.name, scene.entity_ids);
            }
        }
    }

    Ok(())
}
