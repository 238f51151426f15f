//! glTF JSON structure building.

use super::binary_packing::{COLOR_ACCESSOR, INDICES_ACCESSOR, POS_ACCESSOR};
use gltf_json as json;
use json::validation::Checked::Valid;

/// Node indices
const PARENT_NODE: u32 = 0;
const CHILD_NODE: u32 = 1;
const OTHER_NODE: u32 = 2;

fn node(
    name: &str,
    mesh: Option<u32>,
    children: Option<Vec<u32>>,
    translation: Option<[f32; 3]>,
    scale: Option<[f32; 3]>,
) -> json::Node {
    json::Node {
        camera: None,
        children: children.map(|c| c.into_iter().map(json::Index::new).collect()),
        extensions: Default::default(),
        extras: Default::default(),
        matrix: None,
        mesh: mesh.map(json::Index::new),
        name: Some(name.to_string()),
        rotation: None,
        scale,
        translation,
        skin: None,
        weights: None,
    }
}

/// Build the glTF JSON structure
///
/// Scene "Main" holds Parent -> Child (quad), scene "Alt" holds Other (same quad).
pub(crate) fn build_gltf_json(
    buffer_views: &[json::buffer::View],
    accessors: &[json::Accessor],
) -> json::Root {
    let nodes = vec![
        node(
            "Parent",
            None,
            Some(vec![CHILD_NODE]),
            Some([0.0, 1.0, 0.0]),
            None,
        ),
        node(
            "Child",
            Some(0),
            None,
            Some([1.0, 2.0, 3.0]),
            Some([2.0, 3.0, 4.0]),
        ),
        node("Other", Some(0), None, None, None),
    ];

    let mut attributes = std::collections::BTreeMap::new();
    attributes.insert(
        Valid(json::mesh::Semantic::Positions),
        json::Index::new(POS_ACCESSOR),
    );
    attributes.insert(
        Valid(json::mesh::Semantic::Colors(0)),
        json::Index::new(COLOR_ACCESSOR),
    );

    let meshes = vec![json::Mesh {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some("Quad".to_string()),
        primitives: vec![json::mesh::Primitive {
            attributes,
            extensions: Default::default(),
            extras: Default::default(),
            indices: Some(json::Index::new(INDICES_ACCESSOR)),
            material: None,
            mode: Valid(json::mesh::Mode::Triangles),
            targets: None,
        }],
        weights: None,
    }];

    let scenes = vec![
        json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some("Main".to_string()),
            nodes: vec![json::Index::new(PARENT_NODE)],
        },
        json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some("Alt".to_string()),
            nodes: vec![json::Index::new(OTHER_NODE)],
        },
    ];

    // Byte length is set by assemble_glb
    let buffers = vec![json::Buffer {
        byte_length: 0u64.into(),
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        uri: None,
    }];

    json::Root {
        accessors: accessors.to_vec(),
        animations: Vec::new(),
        asset: json::Asset {
            copyright: None,
            extensions: Default::default(),
            extras: Default::default(),
            generator: Some("toy-export-test".to_string()),
            min_version: None,
            version: "2.0".to_string(),
        },
        buffers,
        buffer_views: buffer_views.to_vec(),
        cameras: Vec::new(),
        extensions: Default::default(),
        extras: Default::default(),
        extensions_required: Vec::new(),
        extensions_used: Vec::new(),
        images: Vec::new(),
        materials: Vec::new(),
        meshes,
        nodes,
        samplers: Vec::new(),
        scene: Some(json::Index::new(0)),
        scenes,
        skins: Vec::new(),
        textures: Vec::new(),
    }
}
