//! Shared types for the mdtransform format graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serialization kind of values held in a format.
///
/// Only used to choose how payloads are rendered in traces and listings; it is
/// never enforced against the payload actually produced by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Utf8,
    Json,
    Binary,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Utf8 => "utf8",
            FileFormat::Json => "json",
            FileFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "utf8" => Ok(FileFormat::Utf8),
            "json" => Ok(FileFormat::Json),
            "binary" => Ok(FileFormat::Binary),
            _ => Err(format!(
                "invalid file format '{}'; supported values are utf8, json, binary",
                value
            )),
        }
    }
}

/// Serializable summary of a registered format, used for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSummary {
    pub name: String,
    pub docs: String,
    pub file_format: FileFormat,
    pub targets: Vec<String>,
}
