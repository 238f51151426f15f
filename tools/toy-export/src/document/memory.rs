//! In-memory host document and its TOML scene description
//!
//! ```toml
//! up_axis = "z"
//!
//! [[scenes]]
//! name = "Scene"
//!
//! [[scenes.objects]]
//! name = "Cube"
//! mesh = "CubeData"
//! position = [0.0, 0.0, 1.0]
//! rotation_euler = [0.0, 0.0, 0.7853982]
//!
//! [meshes.CubeData]
//! layers = ["Col"]
//!
//! [[meshes.CubeData.faces]]
//! corners = [
//!     { position = [0.0, 0.0, 0.0], colors = [[1.0, 0.0, 0.0, 1.0]] },
//!     { position = [1.0, 0.0, 0.0], colors = [[0.0, 1.0, 0.0, 1.0]] },
//!     { position = [0.0, 1.0, 0.0], colors = [[0.0, 0.0, 1.0, 1.0]] },
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use glam::{Quat, Vec3, Vec4};
use hashbrown::HashMap;
use serde::Deserialize;

use super::{
    Face, FaceCorner, HostDocument, MeshDataId, ObjectKind, Rotation, SourceObject, SourceScene,
    TriangulatedMesh,
};
use crate::coords::UpAxis;
use crate::error::ExportError;

/// Host document held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    up_axis: UpAxis,
    scenes: Vec<SourceScene>,
    meshes: HashMap<MeshDataId, TriangulatedMesh>,
}

impl MemoryDocument {
    pub fn new(up_axis: UpAxis) -> Self {
        Self {
            up_axis,
            ..Default::default()
        }
    }

    pub fn with_scene(mut self, scene: SourceScene) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn with_mesh(mut self, id: MeshDataId, mesh: TriangulatedMesh) -> Self {
        self.meshes.insert(id, mesh);
        self
    }

    pub fn add_scene(&mut self, scene: SourceScene) {
        self.scenes.push(scene);
    }

    pub fn insert_mesh(&mut self, id: MeshDataId, mesh: TriangulatedMesh) {
        self.meshes.insert(id, mesh);
    }

    /// Load a TOML scene description from disk
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        Self::parse(&content)
            .map_err(|e| ExportError::Document(format!("{}: {}", path.display(), e)))
    }

    /// Parse a TOML scene description
    pub fn parse(content: &str) -> Result<Self, ExportError> {
        let description: SceneDescription = toml::from_str(content)
            .map_err(|e| ExportError::Document(format!("invalid scene description: {e}")))?;
        description.into_document()
    }
}

impl HostDocument for MemoryDocument {
    fn up_axis(&self) -> UpAxis {
        self.up_axis
    }

    fn scenes(&self) -> Vec<SourceScene> {
        self.scenes.clone()
    }

    fn evaluate_mesh(&self, object: &SourceObject) -> Result<TriangulatedMesh, ExportError> {
        let id = object.mesh_data.as_ref().ok_or_else(|| {
            ExportError::Document(format!("object '{}' has no mesh data", object.name))
        })?;
        self.meshes.get(id).cloned().ok_or_else(|| {
            ExportError::Document(format!(
                "mesh data '{}' of object '{}' has no geometry",
                id, object.name
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneDescription {
    #[serde(default)]
    up_axis: UpAxis,
    #[serde(default)]
    scenes: Vec<SceneEntry>,
    #[serde(default)]
    meshes: BTreeMap<String, MeshEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneEntry {
    name: String,
    #[serde(default)]
    objects: Vec<ObjectEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ObjectEntry {
    name: String,
    /// Defaults to "mesh" when `mesh` is set, "empty" otherwise
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    mesh: Option<String>,
    #[serde(default)]
    position: [f32; 3],
    #[serde(default)]
    rotation_euler: Option<[f32; 3]>,
    /// (x, y, z, w)
    #[serde(default)]
    rotation_quat: Option<[f32; 4]>,
    #[serde(default = "default_scale")]
    scale: [f32; 3],
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeshEntry {
    #[serde(default)]
    layers: Vec<String>,
    #[serde(default)]
    faces: Vec<FaceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FaceEntry {
    corners: Vec<CornerEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CornerEntry {
    position: [f32; 3],
    #[serde(default)]
    colors: Vec<[f32; 4]>,
}

impl SceneDescription {
    fn into_document(self) -> Result<MemoryDocument, ExportError> {
        let mut document = MemoryDocument::new(self.up_axis);

        for scene in self.scenes {
            let objects = scene
                .objects
                .into_iter()
                .map(ObjectEntry::into_object)
                .collect::<Result<Vec<_>, _>>()?;
            document.add_scene(SourceScene {
                name: scene.name,
                objects,
            });
        }

        for (id, mesh) in self.meshes {
            let faces = mesh
                .faces
                .into_iter()
                .map(|face| Face {
                    corners: face
                        .corners
                        .into_iter()
                        .map(|c| FaceCorner {
                            position: Vec3::from(c.position),
                            color_layers: c.colors.into_iter().map(Vec4::from).collect(),
                        })
                        .collect(),
                })
                .collect();
            document.insert_mesh(
                MeshDataId(id),
                TriangulatedMesh {
                    layer_names: mesh.layers,
                    faces,
                },
            );
        }

        Ok(document)
    }
}

impl ObjectEntry {
    fn into_object(self) -> Result<SourceObject, ExportError> {
        let rotation = match (self.rotation_euler, self.rotation_quat) {
            (Some(_), Some(_)) => {
                return Err(ExportError::Document(format!(
                    "object '{}' sets both rotation_euler and rotation_quat",
                    self.name
                )));
            }
            (Some(euler), None) => Rotation::Euler(Vec3::from(euler)),
            (None, Some(q)) => Rotation::Quaternion(Quat::from_array(q)),
            (None, None) => Rotation::default(),
        };

        let kind = match (&self.kind, &self.mesh) {
            (Some(tag), _) => ObjectKind::from_tag(tag),
            (None, Some(_)) => ObjectKind::Mesh,
            (None, None) => ObjectKind::Empty,
        };

        Ok(SourceObject {
            name: self.name,
            kind,
            position: Vec3::from(self.position),
            rotation,
            scale: Vec3::from(self.scale),
            mesh_data: self.mesh.map(MeshDataId),
        })
    }
}
