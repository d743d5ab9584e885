//! SaveReader - little-endian primitive decoder

use crate::version::check_version;
use crate::{Persist, SaveError, SaveResult, MAX_NESTING, MAX_STRING_LEN};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// Reads save primitives from any `Read` source
#[derive(Debug)]
pub struct SaveReader<R: Read> {
    inner: R,
    /// Nested objects currently being read
    depth: u32,
}

impl<R: Read> SaveReader<R> {
    pub fn new(inner: R) -> Self {
        SaveReader { inner, depth: 0 }
    }

    /// Give back the underlying source
    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read_i32(&mut self) -> SaveResult<i32> {
        Ok(self.inner.read_i32::<LittleEndian>()?)
    }

    pub fn read_u32(&mut self) -> SaveResult<u32> {
        Ok(self.inner.read_u32::<LittleEndian>()?)
    }

    pub fn read_u64(&mut self) -> SaveResult<u64> {
        Ok(self.inner.read_u64::<LittleEndian>()?)
    }

    pub fn read_f64(&mut self) -> SaveResult<f64> {
        Ok(self.inner.read_f64::<LittleEndian>()?)
    }

    pub fn read_bool(&mut self) -> SaveResult<bool> {
        match self.inner.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(SaveError::InvalidBool(other)),
        }
    }

    /// Collection length; negative values are corrupt data
    pub fn read_len(&mut self) -> SaveResult<usize> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| SaveError::InvalidLength(len as i64))
    }

    pub fn read_string(&mut self) -> SaveResult<String> {
        let len = self.read_len()?;
        if len > MAX_STRING_LEN {
            return Err(SaveError::StringTooLong(len));
        }
        let mut bytes = vec![0u8; len];
        self.inner.read_exact(&mut bytes)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Optional name reference; the empty string reads back as `None`
    pub fn read_opt_string(&mut self) -> SaveResult<Option<String>> {
        let value = self.read_string()?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    /// Read a version header and check it against what `T` supports
    pub fn read_version<T: Persist>(&mut self) -> SaveResult<i32> {
        let found = self.read_i32()?;
        check_version(T::TYPE_NAME, found, T::VERSION)
    }

    /// Read a nested object with its own version header
    ///
    /// Fails with `NestingTooDeep` past `MAX_NESTING` levels instead of
    /// recursing without bound on corrupt data.
    pub fn read<T: Persist>(&mut self) -> SaveResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(SaveError::NestingTooDeep(MAX_NESTING));
        }
        self.depth += 1;
        let value = T::load(self);
        self.depth -= 1;
        value
    }
}
