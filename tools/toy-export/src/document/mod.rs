//! Host document interface
//!
//! The exporter never talks to an authoring tool directly. A host exposes its
//! scenes and objects through [`HostDocument`], and evaluates mesh objects into
//! triangulated face corners on request.
//!
//! Two hosts ship with the exporter:
//! - [`MemoryDocument`] - built in code or loaded from a TOML scene description
//! - [`GltfDocument`] - a glTF 2.0 file

mod gltf;
mod memory;

use std::path::Path;

use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

pub use self::gltf::GltfDocument;
pub use memory::MemoryDocument;

use crate::coords::{UpAxis, euler_xyz_to_quat};
use crate::error::ExportError;

/// Stable identity of a mesh datablock for the duration of one export
///
/// Objects sharing geometry carry the same id. The id is opaque and is never
/// written to the container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshDataId(pub String);

impl MeshDataId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MeshDataId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host object type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Mesh,
    Empty,
    Other(String),
}

impl ObjectKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "mesh" => ObjectKind::Mesh,
            "empty" => ObjectKind::Empty,
            _ => ObjectKind::Other(tag.to_string()),
        }
    }
}

/// Object orientation as the host stores it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation {
    /// XYZ Euler angles in radians
    Euler(Vec3),
    Quaternion(Quat),
}

impl Rotation {
    pub fn to_quat(self) -> Quat {
        match self {
            Rotation::Euler(angles) => euler_xyz_to_quat(angles),
            Rotation::Quaternion(q) => q,
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Quaternion(Quat::IDENTITY)
    }
}

/// One object of a host scene
#[derive(Debug, Clone, PartialEq)]
pub struct SourceObject {
    pub name: String,
    pub kind: ObjectKind,
    pub position: Vec3,
    pub rotation: Rotation,
    pub scale: Vec3,
    pub mesh_data: Option<MeshDataId>,
}

impl SourceObject {
    /// Object without geometry at the origin
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Empty,
            position: Vec3::ZERO,
            rotation: Rotation::default(),
            scale: Vec3::ONE,
            mesh_data: None,
        }
    }

    /// Mesh object at the origin referencing `mesh_data`
    pub fn mesh(name: impl Into<String>, mesh_data: MeshDataId) -> Self {
        Self {
            kind: ObjectKind::Mesh,
            mesh_data: Some(mesh_data),
            ..Self::empty(name)
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// One host scene, objects in host order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceScene {
    pub name: String,
    pub objects: Vec<SourceObject>,
}

impl SourceScene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn with_object(mut self, object: SourceObject) -> Self {
        self.objects.push(object);
        self
    }
}

/// One triangle corner with its own attribute values
#[derive(Debug, Clone, PartialEq)]
pub struct FaceCorner {
    /// Host-space position
    pub position: Vec3,
    /// One value per color layer, in layer order
    pub color_layers: Vec<Vec4>,
}

impl FaceCorner {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color_layers: Vec::new(),
        }
    }

    pub fn with_colors(position: Vec3, color_layers: Vec<Vec4>) -> Self {
        Self {
            position,
            color_layers,
        }
    }
}

/// One face of an evaluated mesh; the exporter requires exactly three corners
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Face {
    pub corners: Vec<FaceCorner>,
}

impl Face {
    pub fn triangle(a: FaceCorner, b: FaceCorner, c: FaceCorner) -> Self {
        Self {
            corners: vec![a, b, c],
        }
    }
}

/// Deformed, triangulated mesh as produced by the host's mesh kernel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangulatedMesh {
    pub layer_names: Vec<String>,
    pub faces: Vec<Face>,
}

impl TriangulatedMesh {
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(|f| f.corners.len()).sum()
    }
}

/// Upstream document model
pub trait HostDocument {
    /// Coordinate convention of positions and rotations
    fn up_axis(&self) -> UpAxis;

    /// All scenes, in host order
    fn scenes(&self) -> Vec<SourceScene>;

    /// Evaluates and triangulates the geometry of a mesh object
    fn evaluate_mesh(&self, object: &SourceObject) -> Result<TriangulatedMesh, ExportError>;
}

/// Opens a host document, picking the loader from the file extension
///
/// `.toml` files are scene descriptions, `.gltf` / `.glb` are glTF 2.0.
pub fn open_document(path: &Path) -> Result<Box<dyn HostDocument>, ExportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "toml" => Ok(Box::new(MemoryDocument::load(path)?)),
        "gltf" | "glb" => Ok(Box::new(GltfDocument::open(path)?)),
        _ => Err(ExportError::Document(format!(
            "unsupported input {:?} (use .toml, .gltf, or .glb)",
            path
        ))),
    }
}
