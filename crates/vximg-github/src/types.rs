//! Wire types for the GitHub Contents API.

use serde::{Deserialize, Serialize};

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
///
/// Field order matters: GitHub does not care, but the serialized body
/// is part of this crate's observable behavior (`message` then
/// `content`).
#[derive(Debug, Serialize)]
pub(crate) struct CreateFile {
    /// Commit message recorded for the upload.
    pub message: String,
    /// Base64-encoded file content.
    pub content: String,
}

/// Body of `DELETE /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteFile {
    /// Commit message recorded for the removal.
    pub message: String,
    /// Current content SHA of the file being deleted.
    pub sha: String,
}

/// The slice of a successful create response we care about.
///
/// Every field is optional: a 2xx with an unexpected shape must fail
/// the create rather than panic.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CreateResponse {
    #[serde(default)]
    pub content: Option<FileContent>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FileContent {
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Metadata returned by the existence/SHA probe.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FileMetadata {
    #[serde(default)]
    pub sha: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_file_serializes_message_then_content() {
        let body = CreateFile {
            message: "VX_ADD: img.png".to_string(),
            content: "aGk=".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"message":"VX_ADD: img.png","content":"aGk="}"#
        );
    }

    #[test]
    fn test_delete_file_serializes_message_then_sha() {
        let body = DeleteFile {
            message: "VX_DEL: img.png".to_string(),
            sha: "abc123".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"message":"VX_DEL: img.png","sha":"abc123"}"#
        );
    }

    #[test]
    fn test_create_response_tolerates_missing_fields() {
        let parsed: CreateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.content.is_none());

        let parsed: CreateResponse =
            serde_json::from_str(r#"{"content":{"name":"img.png"}}"#).unwrap();
        assert!(parsed.content.unwrap().download_url.is_none());
    }

    #[test]
    fn test_file_metadata_parses_sha() {
        let parsed: FileMetadata =
            serde_json::from_str(r#"{"sha":"deadbeef","size":42}"#).unwrap();
        assert_eq!(parsed.sha.as_deref(), Some("deadbeef"));
    }
}
