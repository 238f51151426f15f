//! `.toy` container decoder
//!
//! Mirrors the writer field for field. The index width of every mesh is
//! re-derived from that mesh's vertex count.

use super::binary::ByteReader;
use super::{
    ENTITY_TAG, EntityRecord, IndexWidth, LayerData, MESH_TAG, MeshRecord, SCENE_TAG, SceneRecord,
    TOY_MAGIC, TOY_VERSION, ToyFile,
};
use crate::FormatError;

/// Parse a complete `.toy` container
pub fn read_toy_file(data: &[u8]) -> Result<ToyFile, FormatError> {
    let mut r = ByteReader::new(data);

    if r.take(TOY_MAGIC.len(), "magic")? != TOY_MAGIC {
        return Err(FormatError::BadMagic);
    }
    let version = r.u8("version")?;
    if version != TOY_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }

    let mesh_count = r.u16("mesh count")? as usize;
    let mut meshes = Vec::with_capacity(mesh_count);
    for _ in 0..mesh_count {
        meshes.push(read_mesh(&mut r)?);
    }

    let entity_count = r.u16("entity count")? as usize;
    let mut entities = Vec::with_capacity(entity_count);
    for _ in 0..entity_count {
        entities.push(read_entity(&mut r)?);
    }

    let scene_count = r.u16("scene count")? as usize;
    let mut scenes = Vec::with_capacity(scene_count);
    for _ in 0..scene_count {
        scenes.push(read_scene(&mut r)?);
    }

    if r.remaining() != 0 {
        return Err(FormatError::TrailingBytes(r.remaining()));
    }

    Ok(ToyFile {
        meshes,
        entities,
        scenes,
    })
}

fn read_mesh(r: &mut ByteReader) -> Result<MeshRecord, FormatError> {
    r.expect_tag(MESH_TAG)?;

    let vertex_count = r.u16("vertex count")? as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        positions.push(r.vec3("vertex position")?);
    }

    let index_count = r.u16("triangle count")? as usize * 3;
    let mut indices = Vec::with_capacity(index_count);
    match IndexWidth::for_vertex_count(vertex_count) {
        IndexWidth::U8 => {
            for _ in 0..index_count {
                indices.push(r.u8("triangle index")? as u32);
            }
        }
        IndexWidth::U16 => {
            for _ in 0..index_count {
                indices.push(r.u16("triangle index")? as u32);
            }
        }
    }

    let layer_count = r.u8("layer count")? as usize;
    let mut layers = Vec::with_capacity(layer_count);
    for _ in 0..layer_count {
        let name = r.string("layer name")?;
        let value_count = r.u16("layer value count")? as usize;
        if value_count != vertex_count {
            return Err(FormatError::LayerLengthMismatch {
                name,
                len: value_count,
                vertex_count,
            });
        }
        let mut values = Vec::with_capacity(value_count);
        for _ in 0..value_count {
            values.push(r.vec4("layer value")?);
        }
        layers.push(LayerData { name, values });
    }

    Ok(MeshRecord {
        positions,
        indices,
        layers,
    })
}

fn read_entity(r: &mut ByteReader) -> Result<EntityRecord, FormatError> {
    r.expect_tag(ENTITY_TAG)?;

    Ok(EntityRecord {
        name: r.string("entity name")?,
        position: r.vec3("entity position")?,
        rotation: r.vec4("entity rotation")?,
        scale: r.vec3("entity scale")?,
        mesh_id: r.u16("entity mesh id")?,
    })
}

fn read_scene(r: &mut ByteReader) -> Result<SceneRecord, FormatError> {
    r.expect_tag(SCENE_TAG)?;

    let name = r.string("scene name")?;
    let ref_count = r.u16("scene entity count")? as usize;
    let mut entity_ids = Vec::with_capacity(ref_count);
    for _ in 0..ref_count {
        entity_ids.push(r.u16("scene entity id")?);
    }

    Ok(SceneRecord { name, entity_ids })
}
