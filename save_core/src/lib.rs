//! save_core - Versioned binary save format
//!
//! Every persisted type writes its own `i32` version first and then its fields
//! in a fixed order. Versions are local to each type, not global to the file.
//! On load the version gates which fields are present, so a newer build can
//! still read older data. Data written by a newer build than the reader is a
//! hard error.
//!
//! ```rust,ignore
//! use save_core::{from_bytes, to_bytes};
//!
//! let bytes = to_bytes(&statable)?;
//! let restored: Statable = from_bytes(&bytes)?;
//! ```

mod reader;
mod version;
mod writer;

pub use reader::SaveReader;
pub use version::check_version;
pub use writer::SaveWriter;

use std::io::{Read, Write};
use thiserror::Error;

/// Longest string accepted when reading. Anything above this is treated as corruption.
pub const MAX_STRING_LEN: usize = 1 << 20;

/// Deepest chain of nested objects `SaveReader::read` will follow
pub const MAX_NESTING: u32 = 32;

/// Error reading or writing save data
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{type_name} version {found} is newer than the supported version {supported}")]
    VersionMismatch {
        type_name: &'static str,
        found: i32,
        supported: i32,
    },
    #[error("{type_name} has invalid version {found}")]
    InvalidVersion { type_name: &'static str, found: i32 },
    #[error("Invalid length: {0}")]
    InvalidLength(i64),
    #[error("String of {0} bytes exceeds the maximum length")]
    StringTooLong(usize),
    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("Invalid bool byte: {0}")]
    InvalidBool(u8),
    #[error("Unknown {type_name} tag: {tag}")]
    UnknownTag { type_name: &'static str, tag: i32 },
    #[error("Duplicate {type_name} id {id}")]
    DuplicateId { type_name: &'static str, id: u64 },
    #[error("Objects nested deeper than {0} levels")]
    NestingTooDeep(u32),
    #[error("{0} unread bytes after the last object")]
    TrailingBytes(usize),
}

pub type SaveResult<T> = Result<T, SaveError>;

/// A type with a versioned binary layout
///
/// Implementors write only their fields. `save` and `load` take care of the
/// version header.
pub trait Persist: Sized {
    /// Name used in error messages
    const TYPE_NAME: &'static str;
    /// Version written by `save` and the highest version `load` accepts
    const VERSION: i32;

    /// Write all fields in the current layout
    fn write_fields<W: Write>(&self, writer: &mut SaveWriter<W>) -> SaveResult<()>;

    /// Read fields laid out as `version`, which is always in `1..=VERSION`
    fn read_fields<R: Read>(reader: &mut SaveReader<R>, version: i32) -> SaveResult<Self>;

    /// Write the version header followed by the fields
    fn save<W: Write>(&self, writer: &mut SaveWriter<W>) -> SaveResult<()> {
        writer.write_i32(Self::VERSION)?;
        self.write_fields(writer)
    }

    /// Read and check the version header, then read the fields for that version
    fn load<R: Read>(reader: &mut SaveReader<R>) -> SaveResult<Self> {
        let version = reader.read_version::<Self>()?;
        Self::read_fields(reader, version)
    }
}

/// Encode a single object into a byte buffer
pub fn to_bytes<T: Persist>(value: &T) -> SaveResult<Vec<u8>> {
    let mut writer = SaveWriter::new(Vec::new());
    value.save(&mut writer)?;
    Ok(writer.into_inner())
}

/// Decode a single object that spans the whole buffer
pub fn from_bytes<T: Persist>(bytes: &[u8]) -> SaveResult<T> {
    let mut reader = SaveReader::new(bytes);
    let value = T::load(&mut reader)?;
    let rest = reader.into_inner();
    if !rest.is_empty() {
        return Err(SaveError::TrailingBytes(rest.len()));
    }
    Ok(value)
}
