//! Programmatic GLB generation for integration tests.
//!
//! Generates a GLB file with:
//! - One quad mesh (positions, COLOR_0, u16 indices)
//! - Scene "Main": Parent (empty) -> Child (quad, translated and scaled)
//! - Scene "Alt": Other (same quad)

mod binary_packing;
mod glb_assembly;
mod gltf_json;
mod mesh_data;

pub use mesh_data::QUAD_COLORS;

/// Generate the two-scene GLB.
pub fn generate_scene_glb() -> Vec<u8> {
    let mesh = mesh_data::create_quad();
    let (buffer_data, buffer_views, accessors) = binary_packing::pack_binary_data(&mesh);
    let root = gltf_json::build_gltf_json(&buffer_views, &accessors);
    glb_assembly::assemble_glb(&root, &buffer_data)
}
