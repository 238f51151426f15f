//! Binary data packing for glTF buffers.

use super::mesh_data::MeshData;
use gltf_json as json;
use json::validation::Checked::Valid;

/// Accessor indices, in packing order
pub(crate) const POS_ACCESSOR: u32 = 0;
pub(crate) const COLOR_ACCESSOR: u32 = 1;
pub(crate) const INDICES_ACCESSOR: u32 = 2;

fn align_buffer(buffer: &mut Vec<u8>) {
    while !buffer.len().is_multiple_of(4) {
        buffer.push(0);
    }
}

fn push_view(
    views: &mut Vec<json::buffer::View>,
    offset: usize,
    length: usize,
    target: json::buffer::Target,
) -> json::Index<json::buffer::View> {
    views.push(json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: length.into(),
        byte_offset: Some(offset.into()),
        byte_stride: None,
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        target: Some(Valid(target)),
    });
    json::Index::new(views.len() as u32 - 1)
}

fn accessor(
    view: json::Index<json::buffer::View>,
    count: usize,
    component: json::accessor::ComponentType,
    type_: json::accessor::Type,
    bounds: Option<([f32; 3], [f32; 3])>,
) -> json::Accessor {
    let to_value = |v: [f32; 3]| json::Value::Array(v.into_iter().map(json::Value::from).collect());
    json::Accessor {
        buffer_view: Some(view),
        byte_offset: Some(0u64.into()),
        count: count.into(),
        component_type: Valid(json::accessor::GenericComponentType(component)),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Valid(type_),
        min: bounds.map(|(min, _)| to_value(min)),
        max: bounds.map(|(_, max)| to_value(max)),
        name: None,
        normalized: false,
        sparse: None,
    }
}

/// Pack positions, COLOR_0 and u16 indices into a single buffer
pub(crate) fn pack_binary_data(
    mesh: &MeshData,
) -> (Vec<u8>, Vec<json::buffer::View>, Vec<json::Accessor>) {
    let mut buffer = Vec::new();
    let mut views = Vec::new();
    let mut accessors = Vec::new();

    // Positions
    let offset = buffer.len();
    for pos in &mesh.positions {
        for c in pos {
            buffer.extend_from_slice(&c.to_le_bytes());
        }
    }
    let view = push_view(
        &mut views,
        offset,
        buffer.len() - offset,
        json::buffer::Target::ArrayBuffer,
    );
    accessors.push(accessor(
        view,
        mesh.positions.len(),
        json::accessor::ComponentType::F32,
        json::accessor::Type::Vec3,
        Some(mesh.bounds()),
    ));
    align_buffer(&mut buffer);

    // Colors
    let offset = buffer.len();
    for color in &mesh.colors {
        for c in color {
            buffer.extend_from_slice(&c.to_le_bytes());
        }
    }
    let view = push_view(
        &mut views,
        offset,
        buffer.len() - offset,
        json::buffer::Target::ArrayBuffer,
    );
    accessors.push(accessor(
        view,
        mesh.colors.len(),
        json::accessor::ComponentType::F32,
        json::accessor::Type::Vec4,
        None,
    ));
    align_buffer(&mut buffer);

    // Indices
    let offset = buffer.len();
    for idx in &mesh.indices {
        buffer.extend_from_slice(&idx.to_le_bytes());
    }
    let view = push_view(
        &mut views,
        offset,
        buffer.len() - offset,
        json::buffer::Target::ElementArrayBuffer,
    );
    accessors.push(accessor(
        view,
        mesh.indices.len(),
        json::accessor::ComponentType::U16,
        json::accessor::Type::Scalar,
        None,
    ));
    align_buffer(&mut buffer);

    (buffer, views, accessors)
}
