//! glTF 2.0 host document
//!
//! glTF is already Y-up, so no axis conversion happens on export. Node
//! hierarchies are flattened depth-first and each node keeps its local
//! transform. All primitives of a glTF mesh become one exported mesh.

use std::path::Path;

use ::gltf::mesh::Mode;
use glam::{Quat, Vec3, Vec4};
use hashbrown::HashMap;
use tracing::debug;

use super::{
    Face, FaceCorner, HostDocument, MeshDataId, ObjectKind, Rotation, SourceObject, SourceScene,
    TriangulatedMesh,
};
use crate::coords::UpAxis;
use crate::error::ExportError;

/// Layer value used when a primitive lacks a color set another primitive has
const DEFAULT_COLOR: Vec4 = Vec4::ONE;

/// Host document backed by a loaded glTF file
pub struct GltfDocument {
    document: ::gltf::Document,
    buffers: Vec<::gltf::buffer::Data>,
    mesh_lookup: HashMap<MeshDataId, usize>,
}

impl GltfDocument {
    /// Load a `.gltf` or `.glb` file
    pub fn open(path: &Path) -> Result<Self, ExportError> {
        let (document, buffers, _images) = ::gltf::import(path).map_err(|e| {
            ExportError::Document(format!("failed to load glTF {}: {}", path.display(), e))
        })?;
        Ok(Self::new(document, buffers))
    }

    /// Load a glTF from memory (GLB or self-contained JSON)
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ExportError> {
        let (document, buffers, _images) = ::gltf::import_slice(bytes)
            .map_err(|e| ExportError::Document(format!("failed to load glTF: {}", e)))?;
        Ok(Self::new(document, buffers))
    }

    fn new(document: ::gltf::Document, buffers: Vec<::gltf::buffer::Data>) -> Self {
        let mesh_lookup = document
            .meshes()
            .map(|mesh| (mesh_data_id(&mesh), mesh.index()))
            .collect();
        Self {
            document,
            buffers,
            mesh_lookup,
        }
    }

    fn push_node(&self, node: ::gltf::Node, objects: &mut Vec<SourceObject>) {
        let (translation, rotation, scale) = node.transform().decomposed();
        let mesh_data = node.mesh().map(|m| mesh_data_id(&m));

        objects.push(SourceObject {
            name: node
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("node_{}", node.index())),
            kind: if mesh_data.is_some() {
                ObjectKind::Mesh
            } else {
                ObjectKind::Empty
            },
            position: Vec3::from(translation),
            rotation: Rotation::Quaternion(Quat::from_array(rotation)),
            scale: Vec3::from(scale),
            mesh_data,
        });

        for child in node.children() {
            self.push_node(child, objects);
        }
    }
}

fn mesh_data_id(mesh: &::gltf::Mesh) -> MeshDataId {
    MeshDataId(format!("mesh:{}", mesh.index()))
}

impl HostDocument for GltfDocument {
    fn up_axis(&self) -> UpAxis {
        UpAxis::Y
    }

    fn scenes(&self) -> Vec<SourceScene> {
        self.document
            .scenes()
            .map(|scene| {
                let mut objects = Vec::new();
                for node in scene.nodes() {
                    self.push_node(node, &mut objects);
                }
                SourceScene {
                    name: scene
                        .name()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("scene_{}", scene.index())),
                    objects,
                }
            })
            .collect()
    }

    fn evaluate_mesh(&self, object: &SourceObject) -> Result<TriangulatedMesh, ExportError> {
        let index = object
            .mesh_data
            .as_ref()
            .and_then(|id| self.mesh_lookup.get(id))
            .copied()
            .ok_or_else(|| {
                ExportError::Document(format!("object '{}' has no glTF mesh", object.name))
            })?;
        let mesh = self
            .document
            .meshes()
            .nth(index)
            .ok_or_else(|| ExportError::Document(format!("glTF mesh {} is missing", index)))?;
        let mesh_name = mesh.name().unwrap_or(object.name.as_str()).to_string();

        let mut primitives = Vec::new();
        for primitive in mesh.primitives() {
            if primitive.mode() != Mode::Triangles {
                return Err(ExportError::Document(format!(
                    "mesh '{}': primitive mode {:?} is not a triangle list",
                    mesh_name,
                    primitive.mode()
                )));
            }

            let reader = primitive.reader(|buffer| Some(&self.buffers[buffer.index()]));

            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or_else(|| {
                    ExportError::Document(format!("mesh '{}': primitive has no positions", mesh_name))
                })?
                .map(Vec3::from)
                .collect();

            let mut color_sets: Vec<Vec<Vec4>> = Vec::new();
            while let Some(colors) = reader.read_colors(color_sets.len() as u32) {
                color_sets.push(colors.into_rgba_f32().map(Vec4::from).collect());
            }

            let indices: Vec<u32> = match reader.read_indices() {
                Some(iter) => iter.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            primitives.push((positions, color_sets, indices));
        }

        let layer_count = primitives
            .iter()
            .map(|(_, sets, _)| sets.len())
            .max()
            .unwrap_or(0);
        let layer_names = (0..layer_count).map(|i| format!("COLOR_{}", i)).collect();

        let mut faces = Vec::new();
        for (positions, color_sets, indices) in &primitives {
            for triangle in indices.chunks(3) {
                let corners = triangle
                    .iter()
                    .map(|&i| -> Result<FaceCorner, ExportError> {
                        let i = i as usize;
                        let position = *positions.get(i).ok_or_else(|| {
                            ExportError::Document(format!(
                                "mesh '{}': index {} out of range for {} positions",
                                mesh_name,
                                i,
                                positions.len()
                            ))
                        })?;
                        let color_layers = (0..layer_count)
                            .map(|set| {
                                color_sets
                                    .get(set)
                                    .and_then(|values| values.get(i))
                                    .copied()
                                    .unwrap_or(DEFAULT_COLOR)
                            })
                            .collect();
                        Ok(FaceCorner {
                            position,
                            color_layers,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                faces.push(Face { corners });
            }
        }

        debug!(
            "Evaluated glTF mesh '{}': {} primitives, {} faces, {} color layers",
            mesh_name,
            primitives.len(),
            faces.len(),
            layer_count
        );

        Ok(TriangulatedMesh { layer_names, faces })
    }
}
