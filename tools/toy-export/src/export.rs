//! Export entry point

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::ExportConfig;
use crate::document::HostDocument;
use crate::error::ExportError;
use crate::output::{resolve_destination, write_atomically};
use crate::session::ExportSession;

/// What to export and how
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Destination file; `.toy` is appended when missing (see [`ExportConfig`])
    pub destination: PathBuf,
    pub config: ExportConfig,
}

impl ExportOptions {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            config: ExportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }
}

/// Result of an export that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Completed {
        /// Final destination, including any appended extension
        path: PathBuf,
        /// Size of the written file
        bytes: usize,
    },
    /// Destination was empty; nothing was done
    CancelledEmptyPath,
}

/// Export every scene of `document` to a `.toy` container (or JSON dump in debug mode)
pub fn export_document(
    document: &dyn HostDocument,
    options: &ExportOptions,
) -> Result<ExportOutcome, ExportError> {
    let path = match resolve_destination(&options.destination, options.config.append_extension) {
        Ok(path) => path,
        Err(ExportError::EmptyDestinationPath) => {
            error!("Empty destination path, export cancelled");
            return Ok(ExportOutcome::CancelledEmptyPath);
        }
        Err(e) => return Err(e),
    };

    let mut session = ExportSession::for_document(document, options.config.dedup);
    session.collect(document)?;

    let bytes = if options.config.debug {
        session.debug_dump()?.into_bytes()
    } else {
        let file = session.into_toy_file();
        let bytes = file.to_bytes()?;
        info!(
            "Encoded {} meshes, {} entities, {} scenes",
            file.meshes.len(),
            file.entities.len(),
            file.scenes.len()
        );
        bytes
    };

    write_atomically(&path, &bytes)?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());

    Ok(ExportOutcome::Completed {
        path,
        bytes: bytes.len(),
    })
}

/// Export a host document file (`.toml` scene description, `.gltf`, `.glb`)
pub fn export_file(input: &Path, options: &ExportOptions) -> Result<ExportOutcome, ExportError> {
    let document = crate::document::open_document(input)?;
    export_document(document.as_ref(), options)
}
