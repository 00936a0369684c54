//! Attachment models.

use serde::{Deserialize, Serialize};

/// Attachment metadata from the note service.
///
/// Content is fetched separately, and only after the owning note has been
/// checked for the blog label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDetail {
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub mime: String,
}

/// Cached shape for attachment content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPayload {
    #[serde(with = "trilium_blog_core::serde::base64_bytes")]
    pub content: Vec<u8>,
    pub mime: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_attachment_detail() {
        let json = r#"{
            "attachmentId": "att1",
            "ownerId": "note1",
            "role": "image",
            "mime": "image/png",
            "title": "diagram.png"
        }"#;
        let detail: AttachmentDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.owner_id, "note1");
        assert_eq!(detail.mime, "image/png");
    }

    #[test]
    fn test_payload_content_is_base64() {
        let payload = AttachmentPayload {
            content: b"PNG".to_vec(),
            mime: "image/png".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["content"], "UE5H");
        assert_eq!(json["mime"], "image/png");
    }
}
