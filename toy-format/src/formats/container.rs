//! Top-level `.toy` container

use std::io::Write;

use serde::Serialize;

use super::binary::{ToyWriter, check_count};
use super::{EntityRecord, MeshRecord, NO_MESH, SceneRecord, TOY_MAGIC, TOY_VERSION};
use crate::FormatError;

/// Every mesh, entity and scene produced by one export run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToyFile {
    pub meshes: Vec<MeshRecord>,
    pub entities: Vec<EntityRecord>,
    pub scenes: Vec<SceneRecord>,
}

impl ToyFile {
    /// Size of the encoded container in bytes
    pub fn encoded_len(&self) -> usize {
        4 + 2
            + self.meshes.iter().map(MeshRecord::encoded_len).sum::<usize>()
            + 2
            + self.entities.iter().map(EntityRecord::encoded_len).sum::<usize>()
            + 2
            + self.scenes.iter().map(SceneRecord::encoded_len).sum::<usize>()
    }

    /// Looks up a mesh by its 1-based id
    pub fn mesh(&self, id: u16) -> Option<&MeshRecord> {
        (id as usize).checked_sub(1).and_then(|i| self.meshes.get(i))
    }

    /// Looks up an entity by its 1-based id
    pub fn entity(&self, id: u16) -> Option<&EntityRecord> {
        (id as usize).checked_sub(1).and_then(|i| self.entities.get(i))
    }

    /// Checks every record plus the cross-references between them
    pub fn validate(&self) -> Result<(), FormatError> {
        check_count("meshes", self.meshes.len())?;
        check_count("entities", self.entities.len())?;
        check_count("scenes", self.scenes.len())?;

        for mesh in &self.meshes {
            mesh.validate()?;
        }
        for entity in &self.entities {
            entity.validate()?;
            if entity.mesh_id != NO_MESH && self.mesh(entity.mesh_id).is_none() {
                return Err(FormatError::DanglingReference {
                    what: "mesh",
                    id: entity.mesh_id,
                    count: self.meshes.len(),
                });
            }
        }
        for scene in &self.scenes {
            scene.validate()?;
            if let Some(&id) = scene.entity_ids.iter().find(|&&id| self.entity(id).is_none()) {
                return Err(FormatError::DanglingReference {
                    what: "entity",
                    id,
                    count: self.entities.len(),
                });
            }
        }
        Ok(())
    }

    /// Encodes the whole container into memory
    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        write_toy_file(&mut out, self)?;
        Ok(out)
    }
}

/// Write a complete `.toy` container
///
/// The whole file is validated before the first byte is written, so a sink
/// never receives a truncated container because of a format violation.
pub fn write_toy_file<W: Write>(w: &mut W, file: &ToyFile) -> Result<(), FormatError> {
    file.validate()?;

    {
        let mut w = ToyWriter::new(w);
        w.bytes(TOY_MAGIC)?;
        w.u8(TOY_VERSION)?;
        w.u16(file.meshes.len() as u16)?;
    }
    for mesh in &file.meshes {
        mesh.write_to(w)?;
    }

    ToyWriter::new(w).u16(file.entities.len() as u16)?;
    for entity in &file.entities {
        entity.write_to(w)?;
    }

    ToyWriter::new(w).u16(file.scenes.len() as u16)?;
    for scene in &file.scenes {
        scene.write_to(w)?;
    }

    Ok(())
}
