//! SCNE record
//!
//! # Layout
//! ```text
//! "SCNE"
//! name_len u8, name [u8; name_len]
//! entity_ref_count u16
//! entity_ref_count × entity_id u16   (1-based)
//! ```

use std::io::Write;

use serde::Serialize;

use super::SCENE_TAG;
use super::binary::{ToyWriter, check_count, check_string};
use crate::FormatError;

/// Named list of the entities that belong to one scene
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneRecord {
    pub name: String,
    /// 1-based entity ids in object order
    pub entity_ids: Vec<u16>,
}

impl SceneRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_ids: Vec::new(),
        }
    }

    pub fn encoded_len(&self) -> usize {
        4 + 1 + self.name.len() + 2 + self.entity_ids.len() * 2
    }

    pub fn validate(&self) -> Result<(), FormatError> {
        check_string("scene name", &self.name)?;
        check_count("scene entity refs", self.entity_ids.len())?;
        Ok(())
    }

    /// Validates and writes the record. Nothing reaches `w` if validation fails.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), FormatError> {
        self.validate()?;

        let mut w = ToyWriter::new(w);
        w.bytes(SCENE_TAG)?;
        w.string(&self.name)?;
        w.u16(self.entity_ids.len() as u16)?;
        for &id in &self.entity_ids {
            w.u16(id)?;
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        Ok(out)
    }
}
