use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Wire format produced by a serializer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    #[default]
    Json,
    Toml,
    Binary,
}

impl SerializationFormat {
    /// True if a document in this format can be decoded without knowing its
    /// type up front (i.e. into a generic value tree).
    pub fn is_self_describing(self) -> bool {
        match self {
            SerializationFormat::Json | SerializationFormat::Toml => true,
            SerializationFormat::Binary => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SerializationFormat::Json => "json",
            SerializationFormat::Toml => "toml",
            SerializationFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown serialization format: {}", self.0)
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for SerializationFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(SerializationFormat::Json),
            "toml" => Ok(SerializationFormat::Toml),
            "binary" | "bin" => Ok(SerializationFormat::Binary),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
