//! Face-corner deduplication
//!
//! Collapses structurally identical face corners into one vertex and rewrites
//! the triangle list to reference the unique set. Two corners are the same
//! vertex iff their positions and every color layer value compare equal
//! component by component (`==`), layer by layer in order. No epsilon: the
//! host guarantees that shared vertices are exactly equal after deformation.
//! Float semantics apply, so `0.0` and `-0.0` merge and a corner holding a NaN
//! never matches anything.
//!
//! Vertices are emitted in first-seen order, so both strategies produce the
//! same output.

use glam::{Vec3, Vec4};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::coords::CoordinateMapper;
use crate::document::FaceCorner;

/// How the unique vertex set is searched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupStrategy {
    /// Linear scan of the unique set per corner, O(n²). Fine for small meshes.
    Linear,
    /// Hash map keyed on the exact attribute bits
    #[default]
    Hashed,
}

impl std::str::FromStr for DedupStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(DedupStrategy::Linear),
            "hashed" => Ok(DedupStrategy::Hashed),
            _ => Err(format!("unknown dedup strategy '{s}' (use linear or hashed)")),
        }
    }
}

/// Unique attribute bundle
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// Runtime-space position
    pub position: Vec3,
    pub color_layers: Vec<Vec4>,
}

/// Result of deduplicating one mesh's corners
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deduplicated {
    pub vertices: Vec<Vertex>,
    /// One entry per input corner
    pub indices: Vec<u32>,
}

/// Hash key of a corner; equal keys iff the corners compare equal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CornerKey {
    position: [u32; 3],
    layers: Vec<[u32; 4]>,
}

/// Bits of `v` with both zeros folded onto `+0.0`
fn key_bits(v: f32) -> u32 {
    if v == 0.0 { 0.0f32.to_bits() } else { v.to_bits() }
}

impl CornerKey {
    /// `None` if any component is NaN
    fn of(corner: &FaceCorner) -> Option<Self> {
        if corner.position.is_nan() || corner.color_layers.iter().any(|c| c.is_nan()) {
            return None;
        }
        Some(Self {
            position: corner.position.to_array().map(key_bits),
            layers: corner
                .color_layers
                .iter()
                .map(|c| c.to_array().map(key_bits))
                .collect(),
        })
    }
}

fn same_corner(a: &FaceCorner, b: &FaceCorner) -> bool {
    a.position == b.position
        && a.color_layers.len() == b.color_layers.len()
        && a.color_layers.iter().zip(&b.color_layers).all(|(x, y)| x == y)
}

/// Deduplicates `corners`, mapping each new vertex's position into runtime space
pub fn dedup(
    corners: &[FaceCorner],
    mapper: &CoordinateMapper,
    strategy: DedupStrategy,
) -> Deduplicated {
    match strategy {
        DedupStrategy::Linear => dedup_linear(corners, mapper),
        DedupStrategy::Hashed => dedup_hashed(corners, mapper),
    }
}

fn new_vertex(corner: &FaceCorner, mapper: &CoordinateMapper) -> Vertex {
    Vertex {
        position: mapper.map_point(corner.position),
        color_layers: corner.color_layers.clone(),
    }
}

fn dedup_linear(corners: &[FaceCorner], mapper: &CoordinateMapper) -> Deduplicated {
    // Raw host-space corners of the unique set, compared before mapping
    let mut seen: Vec<&FaceCorner> = Vec::new();
    let mut out = Deduplicated {
        vertices: Vec::new(),
        indices: Vec::with_capacity(corners.len()),
    };

    for corner in corners {
        let found = seen.iter().position(|other| same_corner(corner, other));

        let index = match found {
            Some(i) => i,
            None => {
                seen.push(corner);
                out.vertices.push(new_vertex(corner, mapper));
                seen.len() - 1
            }
        };
        out.indices.push(index as u32);
    }

    out
}

fn dedup_hashed(corners: &[FaceCorner], mapper: &CoordinateMapper) -> Deduplicated {
    let mut lookup: HashMap<CornerKey, u32> = HashMap::new();
    let mut out = Deduplicated {
        vertices: Vec::new(),
        indices: Vec::with_capacity(corners.len()),
    };

    for corner in corners {
        let next = out.vertices.len() as u32;
        let index = match CornerKey::of(corner) {
            Some(key) => *lookup.entry(key).or_insert_with(|| {
                out.vertices.push(new_vertex(corner, mapper));
                next
            }),
            None => {
                out.vertices.push(new_vertex(corner, mapper));
                next
            }
        };
        out.indices.push(index);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::UpAxis;

    const STRATEGIES: [DedupStrategy; 2] = [DedupStrategy::Linear, DedupStrategy::Hashed];

    fn corner(p: [f32; 3], colors: &[[f32; 4]]) -> FaceCorner {
        FaceCorner::with_colors(
            Vec3::from(p),
            colors.iter().copied().map(Vec4::from).collect(),
        )
    }

    fn z_up() -> CoordinateMapper {
        CoordinateMapper::new(UpAxis::Z)
    }

    /// Two triangles of a quad sharing an edge
    fn quad() -> Vec<FaceCorner> {
        let red = [1.0, 0.0, 0.0, 1.0];
        vec![
            corner([0.0, 0.0, 0.0], &[red]),
            corner([1.0, 0.0, 0.0], &[red]),
            corner([1.0, 1.0, 0.0], &[red]),
            corner([0.0, 0.0, 0.0], &[red]),
            corner([1.0, 1.0, 0.0], &[red]),
            corner([0.0, 1.0, 0.0], &[red]),
        ]
    }

    #[test]
    fn test_empty_input() {
        for strategy in STRATEGIES {
            let out = dedup(&[], &z_up(), strategy);
            assert!(out.vertices.is_empty());
            assert!(out.indices.is_empty());
        }
    }

    #[test]
    fn test_shared_edge_collapses() {
        for strategy in STRATEGIES {
            let out = dedup(&quad(), &z_up(), strategy);
            assert_eq!(out.vertices.len(), 4);
            assert_eq!(out.indices, [0, 1, 2, 0, 2, 3]);
        }
    }

    #[test]
    fn test_positions_are_mapped() {
        let out = dedup(&quad(), &z_up(), DedupStrategy::Hashed);
        // Host (1, 1, 0) -> runtime (1, 0, -1)
        assert_eq!(out.vertices[2].position, Vec3::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn test_single_vertex_repeated() {
        let corners = vec![corner([0.5, 0.5, 0.5], &[]); 12];
        for strategy in STRATEGIES {
            let out = dedup(&corners, &z_up(), strategy);
            assert_eq!(out.vertices.len(), 1);
            assert_eq!(out.indices, [0; 12]);
        }
    }

    #[test]
    fn test_layer_difference_splits_vertex() {
        let corners = vec![
            corner([0.0; 3], &[[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 1.0]]),
            corner([0.0; 3], &[[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 0.5]]),
            corner([0.0; 3], &[[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 1.0]]),
        ];
        for strategy in STRATEGIES {
            let out = dedup(&corners, &z_up(), strategy);
            assert_eq!(out.vertices.len(), 2);
            assert_eq!(out.indices, [0, 1, 0]);
            assert_eq!(out.vertices[1].color_layers[1].w, 0.5);
        }
    }

    #[test]
    fn test_last_bit_difference_is_distinct() {
        let a = 1.0f32;
        let b = f32::from_bits(a.to_bits() + 1);
        let corners = vec![corner([a, 0.0, 0.0], &[]), corner([b, 0.0, 0.0], &[])];
        for strategy in STRATEGIES {
            assert_eq!(dedup(&corners, &z_up(), strategy).vertices.len(), 2);
        }
    }

    #[test]
    fn test_signed_zero_merges() {
        let corners = vec![
            corner([0.0, 0.0, 0.0], &[[0.0, 0.0, 0.0, 1.0]]),
            corner([-0.0, 0.0, 0.0], &[[-0.0, 0.0, 0.0, 1.0]]),
            corner([0.0, 0.0, 0.0], &[[0.0, 0.0, 0.0, 1.0]]),
        ];
        for strategy in STRATEGIES {
            let out = dedup(&corners, &z_up(), strategy);
            assert_eq!(out.vertices.len(), 1);
            assert_eq!(out.indices, [0, 0, 0]);
        }
    }

    #[test]
    fn test_nan_never_merges() {
        let corners = vec![
            corner([f32::NAN, 0.0, 0.0], &[]),
            corner([f32::NAN, 0.0, 0.0], &[]),
            corner([0.0, 0.0, 0.0], &[[f32::NAN, 0.0, 0.0, 1.0]]),
            corner([0.0, 0.0, 0.0], &[[f32::NAN, 0.0, 0.0, 1.0]]),
        ];
        for strategy in STRATEGIES {
            let out = dedup(&corners, &z_up(), strategy);
            assert_eq!(out.vertices.len(), 4);
            assert_eq!(out.indices, [0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_every_index_matches_its_corner() {
        // Small lattice with repeats and per-corner color variation
        let corners: Vec<FaceCorner> = (0..300)
            .map(|i| {
                let p = [(i % 7) as f32, (i % 5) as f32, 0.0];
                let c = [(i % 3) as f32 / 2.0, 0.0, 0.0, 1.0];
                corner(p, &[c])
            })
            .collect();
        let mapper = z_up();

        let linear = dedup(&corners, &mapper, DedupStrategy::Linear);
        let hashed = dedup(&corners, &mapper, DedupStrategy::Hashed);
        assert_eq!(linear, hashed);

        for (corner, &index) in corners.iter().zip(&linear.indices) {
            let vertex = &linear.vertices[index as usize];
            assert_eq!(vertex.position, mapper.map_point(corner.position));
            assert_eq!(vertex.color_layers, corner.color_layers);
        }
        // 7 * 5 * 3 = 105 combinations; lcm is 105 so all appear in 300 corners
        assert_eq!(linear.vertices.len(), 105);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Linear".parse::<DedupStrategy>(), Ok(DedupStrategy::Linear));
        assert_eq!("hashed".parse::<DedupStrategy>(), Ok(DedupStrategy::Hashed));
        assert!("fast".parse::<DedupStrategy>().is_err());
    }
}
