//! Little-endian primitives shared by the record encoders and the decoder.

use std::io::Write;

use super::{MAX_COUNT, MAX_STRING_LEN};
use crate::FormatError;

/// Checks a string against the u8 length prefix
pub(crate) fn check_string(field: &'static str, s: &str) -> Result<(), FormatError> {
    if s.len() > MAX_STRING_LEN {
        return Err(FormatError::StringTooLong {
            field,
            len: s.len(),
        });
    }
    Ok(())
}

/// Checks a count against a u16 count field
pub(crate) fn check_count(what: &'static str, count: usize) -> Result<u16, FormatError> {
    u16::try_from(count).map_err(|_| FormatError::CountOverflow {
        what,
        count,
        max: MAX_COUNT,
    })
}

/// Thin writer over any [`Write`] sink with the container's field encodings.
pub(crate) struct ToyWriter<'w, W: Write> {
    inner: &'w mut W,
}

impl<'w, W: Write> ToyWriter<'w, W> {
    pub(crate) fn new(inner: &'w mut W) -> Self {
        Self { inner }
    }

    pub(crate) fn bytes(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(bytes)
    }

    pub(crate) fn u8(&mut self, v: u8) -> std::io::Result<()> {
        self.inner.write_all(&[v])
    }

    pub(crate) fn u16(&mut self, v: u16) -> std::io::Result<()> {
        self.inner.write_all(&v.to_le_bytes())
    }

    pub(crate) fn f32(&mut self, v: f32) -> std::io::Result<()> {
        self.inner.write_all(&v.to_le_bytes())
    }

    pub(crate) fn floats(&mut self, v: &[f32]) -> std::io::Result<()> {
        for f in v {
            self.f32(*f)?;
        }
        Ok(())
    }

    /// Writes a u8-length-prefixed UTF-8 string. Callers validate the length first.
    pub(crate) fn string(&mut self, s: &str) -> std::io::Result<()> {
        debug_assert!(s.len() <= MAX_STRING_LEN);
        self.u8(s.len() as u8)?;
        self.bytes(s.as_bytes())
    }
}

/// Cursor over an in-memory container.
pub(crate) struct ByteReader<'data> {
    buf: &'data [u8],
}

impl<'data> ByteReader<'data> {
    pub(crate) fn new(buf: &'data [u8]) -> Self {
        Self { buf }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn take(&mut self, len: usize, what: &'static str) -> Result<&'data [u8], FormatError> {
        if self.buf.len() < len {
            return Err(FormatError::UnexpectedEof(what));
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    pub(crate) fn expect_tag(&mut self, tag: &[u8; 4]) -> Result<(), FormatError> {
        let found = self.take(4, "record tag")?;
        if found != tag {
            return Err(FormatError::BadTag {
                expected: String::from_utf8_lossy(tag).into_owned(),
                found: String::from_utf8_lossy(found).into_owned(),
            });
        }
        Ok(())
    }

    pub(crate) fn u8(&mut self, what: &'static str) -> Result<u8, FormatError> {
        Ok(self.take(1, what)?[0])
    }

    pub(crate) fn u16(&mut self, what: &'static str) -> Result<u16, FormatError> {
        let b = self.take(2, what)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn f32(&mut self, what: &'static str) -> Result<f32, FormatError> {
        let b = self.take(4, what)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn vec3(&mut self, what: &'static str) -> Result<[f32; 3], FormatError> {
        Ok([self.f32(what)?, self.f32(what)?, self.f32(what)?])
    }

    pub(crate) fn vec4(&mut self, what: &'static str) -> Result<[f32; 4], FormatError> {
        Ok([
            self.f32(what)?,
            self.f32(what)?,
            self.f32(what)?,
            self.f32(what)?,
        ])
    }

    pub(crate) fn string(&mut self, what: &'static str) -> Result<String, FormatError> {
        let len = self.u8(what)? as usize;
        let bytes = self.take(len, what)?;
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_limit() {
        assert!(check_string("name", &"a".repeat(255)).is_ok());
        assert!(matches!(
            check_string("name", &"a".repeat(256)),
            Err(FormatError::StringTooLong { len: 256, .. })
        ));
    }

    #[test]
    fn test_string_limit_counts_bytes_not_chars() {
        // 128 two-byte characters = 256 bytes
        let s = "é".repeat(128);
        assert_eq!(s.chars().count(), 128);
        assert!(check_string("name", &s).is_err());
    }

    #[test]
    fn test_count_limit() {
        assert_eq!(check_count("meshes", 65535).unwrap(), 65535);
        assert!(matches!(
            check_count("meshes", 65536),
            Err(FormatError::CountOverflow { count: 65536, .. })
        ));
    }

    #[test]
    fn test_writer_little_endian() {
        let mut out = Vec::new();
        let mut w = ToyWriter::new(&mut out);
        w.u16(0x0102).unwrap();
        w.f32(1.0).unwrap();
        w.string("ab").unwrap();
        assert_eq!(out, [0x02, 0x01, 0x00, 0x00, 0x80, 0x3f, 2, b'a', b'b']);
    }

    #[test]
    fn test_reader_eof() {
        let mut r = ByteReader::new(&[1]);
        assert!(matches!(r.u16("count"), Err(FormatError::UnexpectedEof("count"))));
    }

    #[test]
    fn test_reader_bad_tag() {
        let mut r = ByteReader::new(b"MESX");
        assert!(matches!(r.expect_tag(b"MESH"), Err(FormatError::BadTag { .. })));
    }

    #[test]
    fn test_reader_invalid_utf8() {
        let mut r = ByteReader::new(&[2, 0xff, 0xfe]);
        assert!(matches!(r.string("name"), Err(FormatError::InvalidUtf8(_))));
    }
}
