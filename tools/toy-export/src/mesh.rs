//! Evaluated mesh -> MESH record

use toy_format::{FormatError, LayerData, MAX_VERTEX_COUNT, MeshRecord};
use tracing::debug;

use crate::coords::CoordinateMapper;
use crate::dedup::{DedupStrategy, dedup};
use crate::document::TriangulatedMesh;
use crate::error::ExportError;

/// Builds the deduplicated mesh record for one evaluated mesh
///
/// Fails if a face is not a triangle, if a corner's layer count disagrees with
/// the mesh's layer list, or if more than [`MAX_VERTEX_COUNT`] unique vertices
/// remain after deduplication.
pub fn build_mesh(
    name: &str,
    mesh: &TriangulatedMesh,
    mapper: &CoordinateMapper,
    strategy: DedupStrategy,
) -> Result<MeshRecord, ExportError> {
    if let Some((face, f)) = mesh
        .faces
        .iter()
        .enumerate()
        .find(|(_, f)| f.corners.len() != 3)
    {
        return Err(ExportError::MalformedFaceTopology {
            mesh: name.to_string(),
            face,
            corners: f.corners.len(),
        });
    }

    let layer_count = mesh.layer_names.len();
    let corners: Vec<_> = mesh
        .faces
        .iter()
        .flat_map(|f| f.corners.iter().cloned())
        .collect();

    if let Some((corner, c)) = corners
        .iter()
        .enumerate()
        .find(|(_, c)| c.color_layers.len() != layer_count)
    {
        return Err(ExportError::LayerCountMismatch {
            mesh: name.to_string(),
            corner,
            found: c.color_layers.len(),
            expected: layer_count,
        });
    }

    let deduped = dedup(&corners, mapper, strategy);
    if deduped.vertices.len() > MAX_VERTEX_COUNT {
        return Err(FormatError::VertexBudgetExceeded {
            vertex_count: deduped.vertices.len(),
            max: MAX_VERTEX_COUNT,
        }
        .into());
    }

    let layers = mesh
        .layer_names
        .iter()
        .enumerate()
        .map(|(i, layer_name)| LayerData {
            name: layer_name.clone(),
            values: deduped
                .vertices
                .iter()
                .map(|v| v.color_layers[i].to_array())
                .collect(),
        })
        .collect();

    let record = MeshRecord {
        positions: deduped.vertices.iter().map(|v| v.position.to_array()).collect(),
        indices: deduped.indices,
        layers,
    };

    // Catch string and count limits here so the error names the mesh's stage
    record.validate()?;

    debug!(
        "Mesh '{}': {} corners -> {} vertices, {} triangles, {} layers",
        name,
        corners.len(),
        record.vertex_count(),
        record.triangle_count(),
        record.layers.len()
    );

    Ok(record)
}
