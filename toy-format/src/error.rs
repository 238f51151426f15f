use std::str::Utf8Error;

/// Errors raised while validating, encoding or decoding `.toy` records.
///
/// Encoding errors are precondition violations of the format: the writer
/// refuses to emit anything rather than produce a container a loader would
/// misread.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("mesh has {vertex_count} unique vertices, the format allows at most {max}")]
    VertexBudgetExceeded { vertex_count: usize, max: usize },

    #[error("{field} is {len} bytes long, strings must be shorter than 256 bytes")]
    StringTooLong { field: &'static str, len: usize },

    #[error("mesh has {0} triangle indices, which is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("too many {what}: {count} (maximum {max})")]
    CountOverflow {
        what: &'static str,
        count: usize,
        max: usize,
    },

    #[error("layer '{name}' has {len} values but the mesh has {vertex_count} vertices")]
    LayerLengthMismatch {
        name: String,
        len: usize,
        vertex_count: usize,
    },

    #[error("{what} id {id} does not refer to one of the {count} written {what}s")]
    DanglingReference {
        what: &'static str,
        id: u16,
        count: usize,
    },

    #[error("unexpected end of data while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("not a .toy container (bad magic)")]
    BadMagic,

    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),

    #[error("expected tag {expected:?}, found {found:?}")]
    BadTag { expected: String, found: String },

    #[error("string is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("{0} trailing bytes after the last scene record")]
    TrailingBytes(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
