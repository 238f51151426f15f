//! GLB container assembly.

use std::borrow::Cow;

use gltf::binary::{Glb, Header};
use gltf_json as json;

/// Wrap the JSON document and its single binary buffer into a GLB
///
/// Chunk padding and the total length are filled in by the `gltf` writer.
pub(crate) fn assemble_glb(root: &json::Root, buffer_data: &[u8]) -> Vec<u8> {
    let mut root = root.clone();
    root.buffers[0].byte_length = buffer_data.len().into();
    let json_bytes = json::serialize::to_vec(&root).expect("Failed to serialize glTF JSON");

    let glb = Glb {
        header: Header {
            magic: *b"glTF",
            version: 2,
            // Recomputed on write
            length: 0,
        },
        json: Cow::Owned(json_bytes),
        bin: Some(Cow::Borrowed(buffer_data)),
    };
    glb.to_vec().expect("Failed to write GLB")
}
