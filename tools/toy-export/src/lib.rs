//! toy-export library
//!
//! Converts scenes from a host authoring document into the `.toy` binary
//! container. The binary (`toy-export`) wraps this crate; runtimes read the
//! output with `toy_format::read_toy_file`.
//!
//! Pipeline: host document -> coordinate mapping -> per-mesh deduplication ->
//! MESH records, per-object transforms -> ENTY records, scenes -> SCNE records.

pub mod config;
pub mod coords;
pub mod dedup;
pub mod document;
pub mod entity;
pub mod error;
pub mod export;
pub mod mesh;
pub mod output;
pub mod session;

// Re-export key types for the export pipeline
pub use config::ExportConfig;
pub use coords::{CoordinateMapper, UpAxis};
pub use dedup::{DedupStrategy, dedup};
pub use document::{
    Face, FaceCorner, GltfDocument, HostDocument, MemoryDocument, MeshDataId, ObjectKind,
    Rotation, SourceObject, SourceScene, TriangulatedMesh, open_document,
};
pub use error::ExportError;
pub use export::{ExportOptions, ExportOutcome, export_document, export_file};
pub use session::ExportSession;

// Re-export the wire format
pub use toy_format;
