//! Concrete wire formats.
//!
//! `StreamSerializer` has generic methods and so cannot be a trait object.
//! Runtime format selection goes through [`AnySerializer`] instead.

pub mod binary;
pub mod json;
pub mod toml;

use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use binary::BinarySerializer;
pub use json::JsonSerializer;
pub use self::toml::TomlSerializer;

use super::{SerializationFormat, SerializerError, StreamSerializer};

/// One of the built-in formats, picked at runtime.
#[derive(Debug)]
pub enum AnySerializer {
    Json(JsonSerializer),
    Toml(TomlSerializer),
    Binary(BinarySerializer),
}

/// Builds the serializer for `format`. `pretty` only affects text formats.
pub fn serializer_for(format: SerializationFormat, pretty: bool) -> AnySerializer {
    match format {
        SerializationFormat::Json if pretty => AnySerializer::Json(JsonSerializer::pretty()),
        SerializationFormat::Json => AnySerializer::Json(JsonSerializer::new()),
        SerializationFormat::Toml if pretty => AnySerializer::Toml(TomlSerializer::pretty()),
        SerializationFormat::Toml => AnySerializer::Toml(TomlSerializer::new()),
        SerializationFormat::Binary => AnySerializer::Binary(BinarySerializer::new()),
    }
}

macro_rules! dispatch {
    ($self:ident, $s:ident => $call:expr) => {
        match $self {
            AnySerializer::Json($s) => $call,
            AnySerializer::Toml($s) => $call,
            AnySerializer::Binary($s) => $call,
        }
    };
}

// Every method is forwarded, including the defaulted ones, so per-format
// overrides (binary's base64 string form) are honored.
impl StreamSerializer for AnySerializer {
    fn format(&self) -> SerializationFormat {
        dispatch!(self, s => s.format())
    }

    fn serialize<T, W>(&mut self, value: &T, writer: W) -> Result<(), SerializerError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        dispatch!(self, s => s.serialize(value, writer))
    }

    fn deserialize<T, R>(&mut self, reader: R) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        dispatch!(self, s => s.deserialize(reader))
    }

    fn flush(&mut self) {
        dispatch!(self, s => s.flush())
    }

    fn serialize_to_bytes<T>(&mut self, value: &T) -> Result<Vec<u8>, SerializerError>
    where
        T: Serialize + ?Sized,
    {
        dispatch!(self, s => s.serialize_to_bytes(value))
    }

    fn deserialize_from_bytes<T>(&mut self, data: &[u8]) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
    {
        dispatch!(self, s => s.deserialize_from_bytes(data))
    }

    fn serialize_to_string<T>(&mut self, value: &T) -> Result<String, SerializerError>
    where
        T: Serialize + ?Sized,
    {
        dispatch!(self, s => s.serialize_to_string(value))
    }

    fn deserialize_from_string<T>(&mut self, data: &str) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
    {
        dispatch!(self, s => s.deserialize_from_string(data))
    }
}
