//! Host object -> ENTY record

use toy_format::EntityRecord;

use crate::coords::CoordinateMapper;
use crate::document::SourceObject;

/// Converts an object's transform into runtime space and attaches `mesh_id`
pub fn build_entity(object: &SourceObject, mesh_id: u16, mapper: &CoordinateMapper) -> EntityRecord {
    let rotation = mapper.map_rotation(object.rotation.to_quat());
    EntityRecord {
        name: object.name.clone(),
        mesh_id,
        position: mapper.map_point(object.position).to_array(),
        rotation: rotation.to_array(),
        scale: mapper.map_scale(object.scale).to_array(),
    }
}
