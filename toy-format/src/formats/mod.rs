//! `.toy` container format
//!
//! All integers are little-endian with fixed widths. Every record starts with
//! a 4-byte ASCII tag; the container itself starts with a 3-byte magic and a
//! version byte.
//!
//! # Layout
//! ```text
//! "TOY"             3-byte magic
//! version      u8   (= 1)
//! mesh_count   u16  mesh_count × MESH record
//! entity_count u16  entity_count × ENTY record
//! scene_count  u16  scene_count × SCNE record
//! ```

mod binary;
pub mod container;
pub mod entity;
pub mod mesh;
pub mod reader;
pub mod scene;

pub use container::*;
pub use entity::*;
pub use mesh::*;
pub use reader::read_toy_file;
pub use scene::*;

/// Magic bytes at the start of every container
pub const TOY_MAGIC: &[u8; 3] = b"TOY";

/// Container version written by this crate
pub const TOY_VERSION: u8 = 1;

/// Container file extension without dot
pub const TOY_EXTENSION: &str = "toy";

pub const MESH_TAG: &[u8; 4] = b"MESH";
pub const ENTITY_TAG: &[u8; 4] = b"ENTY";
pub const SCENE_TAG: &[u8; 4] = b"SCNE";

/// Largest vertex count a mesh may have (indices must fit in u16)
pub const MAX_VERTEX_COUNT: usize = u16::MAX as usize;

/// Largest value of any u16 count field (meshes, entities, scenes, triangles, refs)
pub const MAX_COUNT: usize = u16::MAX as usize;

/// Largest number of extra layers per mesh (u8 count field)
pub const MAX_LAYER_COUNT: usize = u8::MAX as usize;

/// Longest string in bytes (u8 length prefix)
pub const MAX_STRING_LEN: usize = u8::MAX as usize;

/// Mesh id stored in entities that carry no geometry
pub const NO_MESH: u16 = 0;
