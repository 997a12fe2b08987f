use std::io::{ErrorKind, Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bincode::config::Config;
use bincode::error::{DecodeError, EncodeError};
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::serialization::{SerializationFormat, SerializerError, StreamSerializer};

/// Default cap on the bytes a single decode may claim (16 MiB). Length
/// prefixes above it are rejected before anything is allocated.
pub const DEFAULT_DECODE_LIMIT: usize = 16 * 1024 * 1024;

fn encode_config() -> impl Config {
    bincode::config::standard()
}

fn decode_config<const LIMIT: usize>() -> impl Config {
    bincode::config::standard().with_limit::<LIMIT>()
}

fn encode_error(e: EncodeError) -> SerializerError {
    match e {
        EncodeError::Io { inner, .. } => SerializerError::Io(inner),
        other => SerializerError::serialization(SerializationFormat::Binary, other),
    }
}

fn decode_error(e: DecodeError) -> SerializerError {
    match e {
        DecodeError::LimitExceeded => {
            warn!("binary input claims more than the decode limit");
            SerializerError::deserialization(SerializationFormat::Binary, DecodeError::LimitExceeded)
        }
        // A short read means truncated input.
        DecodeError::Io { inner, .. } if inner.kind() != ErrorKind::UnexpectedEof => {
            SerializerError::Io(inner)
        }
        other => SerializerError::deserialization(SerializationFormat::Binary, other),
    }
}

/// Compact binary encoding via `bincode` (standard config, varint integers).
///
/// Not self-describing: the reader must know the type it expects. The
/// string projection is standard base64 of the byte form.
///
/// `LIMIT` caps the bytes one decode may claim; pick a different cap with
/// `BinarySerializer::<{ 1024 }>::with_limit()`.
#[derive(Debug, Default)]
pub struct BinarySerializer<const LIMIT: usize = DEFAULT_DECODE_LIMIT> {
    scratch: Vec<u8>,
}

impl BinarySerializer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<const LIMIT: usize> BinarySerializer<LIMIT> {
    /// A serializer whose decodes are capped at `LIMIT` bytes.
    pub fn with_limit() -> Self {
        Self {
            scratch: Vec::new(),
        }
    }

    pub fn decode_limit(&self) -> usize {
        LIMIT
    }

    /// Capacity currently held by the reusable encode buffer.
    pub fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }
}

impl<const LIMIT: usize> StreamSerializer for BinarySerializer<LIMIT> {
    fn format(&self) -> SerializationFormat {
        SerializationFormat::Binary
    }

    fn serialize<T, W>(&mut self, value: &T, mut writer: W) -> Result<(), SerializerError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        bincode::serde::encode_into_std_write(value, &mut writer, encode_config())
            .map(|_| ())
            .map_err(encode_error)
    }

    /// Reads exactly one value; bytes after it stay in the reader.
    fn deserialize<T, R>(&mut self, mut reader: R) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        bincode::serde::decode_from_std_read(&mut reader, decode_config::<LIMIT>())
            .map_err(decode_error)
    }

    fn flush(&mut self) {
        if self.scratch.capacity() > 0 {
            debug!("binary serializer releasing {} byte buffer", self.scratch.capacity());
        }
        self.scratch = Vec::new();
    }

    fn serialize_to_bytes<T>(&mut self, value: &T) -> Result<Vec<u8>, SerializerError>
    where
        T: Serialize + ?Sized,
    {
        self.scratch.clear();
        bincode::serde::encode_into_std_write(value, &mut self.scratch, encode_config())
            .map_err(encode_error)?;
        Ok(self.scratch.clone())
    }

    /// The whole buffer must be one value; trailing bytes are malformed input.
    fn deserialize_from_bytes<T>(&mut self, data: &[u8]) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
    {
        let (value, consumed) =
            bincode::serde::decode_from_slice::<T, _>(data, decode_config::<LIMIT>())
                .map_err(decode_error)?;
        if consumed != data.len() {
            return Err(SerializerError::deserialization(
                SerializationFormat::Binary,
                format!("{} trailing bytes after value", data.len() - consumed),
            ));
        }
        Ok(value)
    }

    fn serialize_to_string<T>(&mut self, value: &T) -> Result<String, SerializerError>
    where
        T: Serialize + ?Sized,
    {
        let bytes = self.serialize_to_bytes(value)?;
        Ok(STANDARD.encode(bytes))
    }

    fn deserialize_from_string<T>(&mut self, data: &str) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
    {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| SerializerError::deserialization(SerializationFormat::Binary, e))?;
        self.deserialize_from_bytes(&bytes)
    }
}
