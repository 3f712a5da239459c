use base64::{Engine as _, engine::general_purpose};

/// A schematic photo as an opaque base64 payload. The bytes are never
/// decoded or inspected; the only transformation anywhere in the system is
/// the encoding itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchematicImage(String);

impl SchematicImage {
    pub fn from_base64(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(general_purpose::STANDARD.encode(bytes))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// Data URI in the form the completion API expects for inline images.
    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.0)
    }
}
