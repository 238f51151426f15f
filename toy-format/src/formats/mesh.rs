//! MESH record
//!
//! # Layout
//! ```text
//! "MESH"
//! vertex_count    u16
//! vertex_count × (x f32, y f32, z f32)
//! triangle_count  u16
//! triangle_count*3 × index   (u8 if vertex_count < 256, else u16)
//! layer_count     u8
//! layer_count × {
//!     name_len u8, name [u8; name_len]
//!     value_count u16 (= vertex_count)
//!     value_count × (r f32, g f32, b f32, a f32)
//! }
//! ```
//!
//! The index width depends only on the mesh's own vertex count, so loaders must
//! re-derive it for every mesh.

use std::io::Write;

use serde::Serialize;

use super::binary::{ToyWriter, check_count, check_string};
use super::{MAX_LAYER_COUNT, MAX_VERTEX_COUNT, MESH_TAG};
use crate::FormatError;

/// Width of one triangle index in a mesh record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndexWidth {
    U8,
    U16,
}

impl IndexWidth {
    /// Picks the index width for a mesh with `vertex_count` vertices
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count < 256 {
            IndexWidth::U8
        } else {
            IndexWidth::U16
        }
    }

    /// Size of one index in bytes
    pub fn size(self) -> usize {
        match self {
            IndexWidth::U8 => 1,
            IndexWidth::U16 => 2,
        }
    }
}

/// Named per-vertex color channel, one value per vertex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerData {
    pub name: String,
    pub values: Vec<[f32; 4]>,
}

/// Deduplicated mesh ready to encode
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeshRecord {
    /// Vertex positions, already in runtime space
    pub positions: Vec<[f32; 3]>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
    /// Extra per-vertex layers aligned 1:1 with `positions`
    pub layers: Vec<LayerData>,
}

impl MeshRecord {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn index_width(&self) -> IndexWidth {
        IndexWidth::for_vertex_count(self.vertex_count())
    }

    /// Size of the encoded record in bytes
    pub fn encoded_len(&self) -> usize {
        let layers: usize = self
            .layers
            .iter()
            .map(|l| 1 + l.name.len() + 2 + l.values.len() * 16)
            .sum();
        4 + 2 + self.positions.len() * 12 + 2 + self.indices.len() * self.index_width().size() + 1 + layers
    }

    /// Checks every precondition of the encoder
    pub fn validate(&self) -> Result<(), FormatError> {
        let vertex_count = self.vertex_count();
        if vertex_count > MAX_VERTEX_COUNT {
            return Err(FormatError::VertexBudgetExceeded {
                vertex_count,
                max: MAX_VERTEX_COUNT,
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(FormatError::IndexCountNotTriangles(self.indices.len()));
        }
        check_count("triangles", self.triangle_count())?;
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(FormatError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }
        if self.layers.len() > MAX_LAYER_COUNT {
            return Err(FormatError::CountOverflow {
                what: "mesh layers",
                count: self.layers.len(),
                max: MAX_LAYER_COUNT,
            });
        }
        for layer in &self.layers {
            check_string("layer name", &layer.name)?;
            if layer.values.len() != vertex_count {
                return Err(FormatError::LayerLengthMismatch {
                    name: layer.name.clone(),
                    len: layer.values.len(),
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Validates and writes the record. Nothing reaches `w` if validation fails.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), FormatError> {
        self.validate()?;

        let mut w = ToyWriter::new(w);
        w.bytes(MESH_TAG)?;

        w.u16(self.vertex_count() as u16)?;
        for p in &self.positions {
            w.floats(p)?;
        }

        w.u16(self.triangle_count() as u16)?;
        match self.index_width() {
            IndexWidth::U8 => {
                for &i in &self.indices {
                    w.u8(i as u8)?;
                }
            }
            IndexWidth::U16 => {
                for &i in &self.indices {
                    w.u16(i as u16)?;
                }
            }
        }

        w.u8(self.layers.len() as u8)?;
        for layer in &self.layers {
            w.string(&layer.name)?;
            w.u16(layer.values.len() as u16)?;
            for v in &layer.values {
                w.floats(v)?;
            }
        }

        Ok(())
    }

    /// Encodes the record into a fresh buffer
    pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        Ok(out)
    }
}
