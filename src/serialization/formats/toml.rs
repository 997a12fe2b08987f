use std::io::{ErrorKind, Read, Write};

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::serialization::{SerializationFormat, SerializerError, StreamSerializer};

/// TOML via the `toml` crate.
///
/// A TOML document is always a table, so only struct- or map-shaped values
/// can be encoded. Anything else fails with a serialization error.
#[derive(Debug, Clone, Default)]
pub struct TomlSerializer {
    pretty: bool,
}

impl TomlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl StreamSerializer for TomlSerializer {
    fn format(&self) -> SerializationFormat {
        SerializationFormat::Toml
    }

    fn serialize<T, W>(&mut self, value: &T, mut writer: W) -> Result<(), SerializerError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let encoded = if self.pretty {
            ::toml::to_string_pretty(value)
        } else {
            ::toml::to_string(value)
        }
        .map_err(|e| SerializerError::serialization(SerializationFormat::Toml, e))?;
        writer.write_all(encoded.as_bytes())?;
        Ok(())
    }

    fn deserialize<T, R>(&mut self, mut reader: R) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|e| {
            // Non UTF-8 input is malformed, not a stream failure.
            if e.kind() == ErrorKind::InvalidData {
                SerializerError::deserialization(SerializationFormat::Toml, e)
            } else {
                SerializerError::Io(e)
            }
        })?;
        ::toml::from_str(&text).map_err(|e| SerializerError::deserialization(SerializationFormat::Toml, e))
    }

    fn flush(&mut self) {
        debug!("toml serializer flushed (no buffers held)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Window {
        title: String,
        width: u32,
        resizable: bool,
    }

    #[test]
    fn test_table_round_trip() {
        let mut s = TomlSerializer::new();
        let window = Window {
            title: "Main".into(),
            width: 640,
            resizable: true,
        };
        let text = s.serialize_to_string(&window).unwrap();
        assert!(text.contains("title = \"Main\""));
        assert_eq!(s.deserialize_from_string::<Window>(&text).unwrap(), window);
    }

    #[test]
    fn test_bare_scalar_is_not_representable() {
        let mut s = TomlSerializer::new();
        let err = s.serialize_to_string(&42u32).unwrap_err();
        assert!(matches!(
            err,
            SerializerError::Serialization {
                format: SerializationFormat::Toml,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_deserialization_error() {
        let mut s = TomlSerializer::new();
        let err = s.deserialize_from_bytes::<Window>(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(err.is_deserialization());
    }

    #[test]
    fn test_missing_field_is_deserialization_error() {
        let mut s = TomlSerializer::new();
        let err = s
            .deserialize_from_string::<Window>("title = \"Main\"\n")
            .unwrap_err();
        assert!(err.is_deserialization());
    }
}
