//! SaveWriter - little-endian primitive encoder

use crate::{Persist, SaveError, SaveResult};
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// Writes save primitives to any `Write` sink
#[derive(Debug)]
pub struct SaveWriter<W: Write> {
    inner: W,
}

impl<W: Write> SaveWriter<W> {
    pub fn new(inner: W) -> Self {
        SaveWriter { inner }
    }

    /// Give back the underlying sink
    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_i32(&mut self, value: i32) -> SaveResult<()> {
        self.inner.write_i32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> SaveResult<()> {
        self.inner.write_u32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> SaveResult<()> {
        self.inner.write_u64::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> SaveResult<()> {
        self.inner.write_f64::<LittleEndian>(value)?;
        Ok(())
    }

    /// One byte, 0 or 1
    pub fn write_bool(&mut self, value: bool) -> SaveResult<()> {
        self.inner.write_u8(u8::from(value))?;
        Ok(())
    }

    /// Collection length as an `i32`
    pub fn write_len(&mut self, len: usize) -> SaveResult<()> {
        let len = i32::try_from(len).map_err(|_| SaveError::InvalidLength(len as i64))?;
        self.write_i32(len)
    }

    /// `[i32 length][utf-8 bytes]`
    pub fn write_str(&mut self, value: &str) -> SaveResult<()> {
        self.write_len(value.len())?;
        self.inner.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Optional name reference; `None` is written as the empty string
    pub fn write_opt_str(&mut self, value: Option<&str>) -> SaveResult<()> {
        self.write_str(value.unwrap_or(""))
    }

    /// Write a nested object with its own version header
    pub fn write<T: Persist>(&mut self, value: &T) -> SaveResult<()> {
        value.save(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_i32() {
        let mut writer = SaveWriter::new(Vec::new());
        writer.write_i32(0x0102_0304).unwrap();
        assert_eq!(writer.into_inner(), vec![0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_string_is_length_prefixed() {
        let mut writer = SaveWriter::new(Vec::new());
        writer.write_str("Hyrule").unwrap();
        let bytes = writer.into_inner();
        assert_eq!(&bytes[..4], &6i32.to_le_bytes());
        assert_eq!(&bytes[4..], b"Hyrule");
    }

    #[test]
    fn test_none_writes_empty_string() {
        let mut writer = SaveWriter::new(Vec::new());
        writer.write_opt_str(None).unwrap();
        assert_eq!(writer.into_inner(), 0i32.to_le_bytes().to_vec());
    }

    #[test]
    fn test_bool_is_single_byte() {
        let mut writer = SaveWriter::new(Vec::new());
        writer.write_bool(true).unwrap();
        writer.write_bool(false).unwrap();
        assert_eq!(writer.into_inner(), vec![1, 0]);
    }
}
