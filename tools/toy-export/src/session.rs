//! One export run
//!
//! [`ExportSession`] owns every piece of accumulated state: the global mesh
//! table, the entity list and the scene index lists. It is created per
//! invocation and dropped once the container has been encoded.
//!
//! Traversal order:
//! 1. scenes in host order
//! 2. per scene, register the meshes of its mesh objects in first-encounter
//!    order across all scenes so far (known mesh-data ids are not re-evaluated)
//! 3. per scene, create one entity per object in object order

use hashbrown::HashMap;
use serde::Serialize;
use toy_format::{EntityRecord, MAX_COUNT, MeshRecord, NO_MESH, SceneRecord, ToyFile};
use tracing::{debug, warn};

use crate::coords::CoordinateMapper;
use crate::dedup::DedupStrategy;
use crate::document::{HostDocument, MeshDataId, ObjectKind, SourceScene};
use crate::entity::build_entity;
use crate::error::ExportError;
use crate::mesh::build_mesh;

/// Accumulated state of a single export
#[derive(Debug)]
pub struct ExportSession {
    mapper: CoordinateMapper,
    strategy: DedupStrategy,
    meshes: Vec<MeshRecord>,
    mesh_ids: HashMap<MeshDataId, u16>,
    entities: Vec<EntityRecord>,
    scenes: Vec<SceneRecord>,
}

impl ExportSession {
    pub fn new(mapper: CoordinateMapper, strategy: DedupStrategy) -> Self {
        Self {
            mapper,
            strategy,
            meshes: Vec::new(),
            mesh_ids: HashMap::new(),
            entities: Vec::new(),
            scenes: Vec::new(),
        }
    }

    /// Session for `document`'s coordinate convention
    pub fn for_document(document: &dyn HostDocument, strategy: DedupStrategy) -> Self {
        Self::new(CoordinateMapper::new(document.up_axis()), strategy)
    }

    /// Walks every scene of `document`
    pub fn collect(&mut self, document: &dyn HostDocument) -> Result<(), ExportError> {
        for scene in document.scenes() {
            self.collect_meshes(document, &scene)?;
            self.collect_entities(&scene)?;
        }
        Ok(())
    }

    /// Registers the meshes referenced by `scene` that are not in the table yet
    pub fn collect_meshes(
        &mut self,
        document: &dyn HostDocument,
        scene: &SourceScene,
    ) -> Result<(), ExportError> {
        for object in &scene.objects {
            if object.kind != ObjectKind::Mesh {
                continue;
            }
            let Some(id) = &object.mesh_data else {
                warn!("Mesh object '{}' has no mesh data, skipping geometry", object.name);
                continue;
            };
            if self.mesh_ids.contains_key(id) {
                continue;
            }

            let evaluated = document.evaluate_mesh(object)?;
            let record = build_mesh(id.as_str(), &evaluated, &self.mapper, self.strategy)?;

            // ids start at 1
            let mesh_id = next_id("meshes", self.meshes.len())?;
            self.meshes.push(record);
            self.mesh_ids.insert(id.clone(), mesh_id);
            debug!("Registered mesh '{}' as id {}", id, mesh_id);
        }
        Ok(())
    }

    /// Creates one entity per object of `scene` and records the scene
    pub fn collect_entities(&mut self, scene: &SourceScene) -> Result<(), ExportError> {
        let mut record = SceneRecord::new(scene.name.clone());

        for object in &scene.objects {
            let mesh_id = object
                .mesh_data
                .as_ref()
                .and_then(|id| self.mesh_ids.get(id))
                .copied()
                .unwrap_or(NO_MESH);

            // entity ids start at 1
            let entity_id = next_id("entities", self.entities.len())?;
            self.entities
                .push(build_entity(object, mesh_id, &self.mapper));
            record.entity_ids.push(entity_id);
        }

        debug!(
            "Scene '{}': {} entities",
            record.name,
            record.entity_ids.len()
        );
        self.scenes.push(record);
        Ok(())
    }

    pub fn meshes(&self) -> &[MeshRecord] {
        &self.meshes
    }

    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }

    pub fn scenes(&self) -> &[SceneRecord] {
        &self.scenes
    }

    /// Mesh table id of a mesh-data identity
    pub fn mesh_id(&self, id: &MeshDataId) -> Option<u16> {
        self.mesh_ids.get(id).copied()
    }

    /// Human-readable dump of the session state (not a stable format)
    pub fn debug_dump(&self) -> Result<String, serde_json::Error> {
        let mut mesh_ids: Vec<(&str, u16)> = self
            .mesh_ids
            .iter()
            .map(|(id, &mesh_id)| (id.as_str(), mesh_id))
            .collect();
        mesh_ids.sort_by_key(|&(_, mesh_id)| mesh_id);

        let dump = DebugDump {
            format: "TOY",
            scenes: &self.scenes,
            meshes: &self.meshes,
            mesh_ids: mesh_ids
                .into_iter()
                .map(|(name, mesh_id)| MeshIdEntry { name, mesh_id })
                .collect(),
            entities: &self.entities,
        };
        serde_json::to_string_pretty(&dump)
    }

    pub fn into_toy_file(self) -> ToyFile {
        ToyFile {
            meshes: self.meshes,
            entities: self.entities,
            scenes: self.scenes,
        }
    }
}

/// Next 1-based id for a table that currently holds `len` entries
fn next_id(what: &'static str, len: usize) -> Result<u16, ExportError> {
    if len >= MAX_COUNT {
        return Err(toy_format::FormatError::CountOverflow {
            what,
            count: len + 1,
            max: MAX_COUNT,
        }
        .into());
    }
    Ok(len as u16 + 1)
}

#[derive(Serialize)]
struct DebugDump<'a> {
    format: &'static str,
    scenes: &'a [SceneRecord],
    meshes: &'a [MeshRecord],
    mesh_ids: Vec<MeshIdEntry<'a>>,
    entities: &'a [EntityRecord],
}

#[derive(Serialize)]
struct MeshIdEntry<'a> {
    name: &'a str,
    mesh_id: u16,
}
