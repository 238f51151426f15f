//! Test mesh data.

/// Vertex colors of the quad, one per corner
pub const QUAD_COLORS: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 0.5],
];

/// Indexed mesh data
pub(crate) struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Axis-aligned bounds of the positions (required on POSITION accessors)
    pub(crate) fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for pos in &self.positions {
            for i in 0..3 {
                min[i] = min[i].min(pos[i]);
                max[i] = max[i].max(pos[i]);
            }
        }
        (min, max)
    }
}

/// Unit quad in the XY plane as two triangles
pub(crate) fn create_quad() -> MeshData {
    MeshData {
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        colors: QUAD_COLORS.to_vec(),
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}
