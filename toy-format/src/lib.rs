//! Binary layout of the `.toy` scene container
//!
//! This crate is shared between:
//! - `toy-export` (scene exporter)
//! - runtime loaders that read `.toy` files back
//!
//! # Modules
//!
//! - [`formats`] - record types, encoders and the container decoder
//! - [`error`] - validation and decode errors

pub mod error;
pub mod formats;

pub use error::FormatError;

// Re-export commonly used format items
pub use formats::{
    // Constants
    ENTITY_TAG,
    EntityRecord,
    IndexWidth,
    LayerData,
    MAX_COUNT,
    MAX_LAYER_COUNT,
    MAX_STRING_LEN,
    MAX_VERTEX_COUNT,
    MESH_TAG,
    // Records
    MeshRecord,
    NO_MESH,
    SCENE_TAG,
    SceneRecord,
    TOY_EXTENSION,
    TOY_MAGIC,
    TOY_VERSION,
    ToyFile,
    // Reading and writing
    read_toy_file,
    write_toy_file,
};
