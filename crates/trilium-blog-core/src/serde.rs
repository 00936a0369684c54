//! Serde helpers.

/// Serializes `Vec<u8>` as a standard base64 string.
///
/// Binary blobs inside JSON payloads otherwise become arrays of numbers.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Blob {
///     #[serde(with = "trilium_blog_core::serde::base64_bytes")]
///     content: Vec<u8>,
/// }
/// ```
pub mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
