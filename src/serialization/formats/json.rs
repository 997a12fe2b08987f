use std::io::{Read, Write};

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::serialization::{SerializationFormat, SerializerError, StreamSerializer};

/// JSON via `serde_json`. Stateless apart from the output style.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-printed output. Parsing accepts either style.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

fn map_error(e: serde_json::Error, deserializing: bool) -> SerializerError {
    if e.is_io() {
        return SerializerError::Io(e.into());
    }
    if deserializing {
        SerializerError::deserialization(SerializationFormat::Json, e)
    } else {
        SerializerError::serialization(SerializationFormat::Json, e)
    }
}

impl StreamSerializer for JsonSerializer {
    fn format(&self) -> SerializationFormat {
        SerializationFormat::Json
    }

    fn serialize<T, W>(&mut self, value: &T, mut writer: W) -> Result<(), SerializerError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)
        } else {
            serde_json::to_writer(&mut writer, value)
        };
        result.map_err(|e| map_error(e, false))
    }

    fn deserialize<T, R>(&mut self, reader: R) -> Result<T, SerializerError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        serde_json::from_reader(reader).map_err(|e| map_error(e, true))
    }

    fn flush(&mut self) {
        debug!("json serializer flushed (no buffers held)");
    }
}
