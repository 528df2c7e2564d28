use mdtransform_types::FileFormat;
use serde_json::{Map, Value};

/// Caller-supplied context threaded unchanged through every hop.
pub type Parameters = Map<String, Value>;

/// Engine and format toggles threaded unchanged through every hop.
pub type Options = Map<String, Value>;

/// Option key enabling per-hop tracing.
pub const VERBOSE_OPTION: &str = "verbose";

/// Option key carrying the original markdown text.
pub const SOURCE_OPTION: &str = "source";

/// A document value travelling along a transformation path.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Json(Value),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Render the payload for a trace line according to the declared file format.
    ///
    /// The declared format wins over the payload variant: text in a `json`
    /// format is printed as a JSON string, and anything in a `binary` format is
    /// redacted.
    pub fn render(&self, file_format: FileFormat) -> String {
        if file_format == FileFormat::Binary {
            return format!("<binary: {} bytes>", self.byte_len());
        }
        match self {
            Payload::Text(text) if file_format == FileFormat::Json => {
                Value::String(text.clone()).to_string()
            }
            Payload::Text(text) => text.clone(),
            Payload::Json(value) => value.to_string(),
            Payload::Binary(bytes) => format!("<binary: {} bytes>", bytes.len()),
        }
    }

    fn byte_len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Json(value) => value.to_string().len(),
            Payload::Binary(bytes) => bytes.len(),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Binary(value)
    }
}

/// Returns `true` when `options.verbose` is set to `true`.
pub fn is_verbose(options: &Options) -> bool {
    options
        .get(VERBOSE_OPTION)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
