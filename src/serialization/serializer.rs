//! The serializer contract.
//!
//! Formats implement `serialize`/`deserialize` against `std::io` streams.
//! Everything else is a default method built on those two, so every format
//! answers the byte and string call shapes the same way.

use std::fmt;
use std::io::{self, Cursor, Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::format::SerializationFormat;

/// Format-specific cause carried by a deserialization failure.
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by every serializer call shape.
#[derive(Debug)]
pub enum SerializerError {
    /// The value has no representation in this format.
    Serialization {
        format: SerializationFormat,
        message: String,
    },
    /// The input was malformed. Never recovered internally.
    Deserialization {
        format: SerializationFormat,
        cause: Cause,
    },
    /// The caller's stream failed.
    Io(io::Error),
}

impl SerializerError {
    /// Encoding failure with a plain message.
    pub fn serialization(format: SerializationFormat, message: impl fmt::Display) -> Self {
        SerializerError::Serialization {
            format,
            message: message.to_string(),
        }
    }

    /// Malformed-input failure wrapping the format's own error.
    pub fn deserialization(format: SerializationFormat, cause: impl Into<Cause>) -> Self {
        SerializerError::Deserialization {
            format,
            cause: cause.into(),
        }
    }

    /// True for malformed input, false for encode and stream failures.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, SerializerError::Deserialization { .. })
    }
}

impl fmt::Display for SerializerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializerError::Serialization { format, message } => {
                write!(f, "{format} serialization error: {message}")
            }
            SerializerError::Deserialization { format, cause } => {
                write!(f, "{format} deserialization error: {cause}")
            }
            SerializerError::Io(e) => write!(f, "serializer I/O error: {e}"),
        }
    }
}

impl std::error::Error for SerializerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializerError::Serialization { .. } => None,
            SerializerError::Deserialization { cause, .. } => Some(cause.as_ref()),
            SerializerError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for SerializerError {
    fn from(e: io::Error) -> Self {
        SerializerError::Io(e)
    }
}

/// A serializer for one fixed wire format.
///
/// Instances are meant to be owned by one caller at a time; nothing here is
/// synchronized. Streams passed in stay owned by the caller and are never
/// closed by the serializer.
pub trait StreamSerializer {
    /// The wire format this instance produces.
    fn format(&self) -> SerializationFormat;

    /// Writes the encoding of `value` into `writer`.
    fn serialize<T, W>(&mut self, value: &T, writer: W) -> Result<(), SerializerError>
    where
        T: Serialize + ?Sized,
        W: Write;

    /// Reads one encoded value from `reader`.
    fn deserialize<T, R>(&mut self, reader: R) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
        R: Read;

    /// Releases internal buffers. Calling it repeatedly is the same as
    /// calling it once.
    fn flush(&mut self);

    fn serialize_to_bytes<T>(&mut self, value: &T) -> Result<Vec<u8>, SerializerError>
    where
        T: Serialize + ?Sized,
    {
        let mut buffer = Vec::new();
        self.serialize(value, &mut buffer)?;
        Ok(buffer)
    }

    fn deserialize_from_bytes<T>(&mut self, data: &[u8]) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
    {
        self.deserialize(Cursor::new(data))
    }

    /// String projection of the byte form. Text formats use UTF-8 as is;
    /// formats with arbitrary bytes override this.
    fn serialize_to_string<T>(&mut self, value: &T) -> Result<String, SerializerError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = self.serialize_to_bytes(value)?;
        String::from_utf8(bytes).map_err(|e| SerializerError::serialization(self.format(), e))
    }

    fn deserialize_from_string<T>(&mut self, data: &str) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
    {
        self.deserialize_from_bytes(data.as_bytes())
    }
}
