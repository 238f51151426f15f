//! ENTY record
//!
//! # Layout
//! ```text
//! "ENTY"
//! name_len u8, name [u8; name_len]
//! position 3 × f32
//! rotation 4 × f32   (x, y, z, w)
//! scale    3 × f32
//! mesh_id  u16       (0 = no mesh)
//! ```

use std::io::Write;

use serde::Serialize;

use super::binary::{ToyWriter, check_string};
use super::{ENTITY_TAG, NO_MESH};
use crate::FormatError;

/// One placed object in runtime space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    pub name: String,
    /// 1-based mesh table id, [`NO_MESH`] for objects without geometry
    pub mesh_id: u16,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl EntityRecord {
    /// Entity at the origin with identity rotation and unit scale
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh_id: NO_MESH,
            position: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }

    pub fn has_mesh(&self) -> bool {
        self.mesh_id != NO_MESH
    }

    pub fn encoded_len(&self) -> usize {
        4 + 1 + self.name.len() + 10 * 4 + 2
    }

    pub fn validate(&self) -> Result<(), FormatError> {
        check_string("entity name", &self.name)
    }

    /// Validates and writes the record. Nothing reaches `w` if validation fails.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), FormatError> {
        self.validate()?;

        let mut w = ToyWriter::new(w);
        w.bytes(ENTITY_TAG)?;
        w.string(&self.name)?;
        w.floats(&self.position)?;
        w.floats(&self.rotation)?;
        w.floats(&self.scale)?;
        w.u16(self.mesh_id)?;
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_layout() {
        let entity = EntityRecord {
            name: "Cube".to_string(),
            mesh_id: 3,
            position: [1.0, 2.0, 3.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [2.0, 2.0, 2.0],
        };
        let bytes = entity.encode().unwrap();

        assert_eq!(bytes.len(), entity.encoded_len());
        assert_eq!(&bytes[0..4], b"ENTY");
        assert_eq!(bytes[4], 4);
        assert_eq!(&bytes[5..9], b"Cube");
        assert_eq!(&bytes[9..13], &1.0f32.to_le_bytes());
        // w component of the rotation
        assert_eq!(&bytes[33..37], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 2..], &[3, 0]);
    }

    #[test]
    fn test_empty_name() {
        let bytes = EntityRecord::new("").encode().unwrap();
        assert_eq!(bytes.len(), 4 + 1 + 40 + 2);
        assert_eq!(bytes[4], 0);
    }

    #[test]
    fn test_name_too_long() {
        let entity = EntityRecord::new("n".repeat(256));
        assert!(matches!(
            entity.encode(),
            Err(FormatError::StringTooLong {
                field: "entity name",
                len: 256
            })
        ));
    }

    #[test]
    fn test_default_has_no_mesh() {
        assert!(!EntityRecord::new("Empty").has_mesh());
    }
}
