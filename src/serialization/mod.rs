//! # Serialization
//!
//! One trait, three formats. A format implements the two stream primitives
//! of [`StreamSerializer`] and gets the byte and string call shapes for free.
//!
//! ```text
//! serialize_to_bytes / serialize_to_string           ──► serialize(value, Write)
//! deserialize_from_bytes / deserialize_from_string   ──► deserialize(Read)
//! ```

pub mod format;
pub mod formats;
pub mod serializer;

pub use format::SerializationFormat;
pub use formats::{AnySerializer, BinarySerializer, JsonSerializer, TomlSerializer, serializer_for};
pub use serializer::{SerializerError, StreamSerializer};
