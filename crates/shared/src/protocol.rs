use serde::{Deserialize, Serialize};

/// Reply shape for `POST /submit_rating`. Anything other than
/// `status == "success"` counts as a declined submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRatingResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitRatingResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Secondary upload outcome relayed inside an export reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Success,
    NoToken,
    Failed,
    #[serde(other)]
    Unrecognized,
}

/// Reply shape for `GET /export_data`. The client never exports anything
/// itself; it only renders this status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub record_count: u64,
    #[serde(default = "unrecognized_upload_status")]
    pub huggingface_status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub huggingface_message: Option<String>,
}

impl ExportResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

fn unrecognized_upload_status() -> UploadStatus {
    UploadStatus::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn export_reply_defaults_missing_upload_fields() {
        let reply: ExportResponse =
            serde_json::from_value(json!({"status": "success", "record_count": 4}))
                .expect("parse");
        assert!(reply.is_success());
        assert_eq!(reply.huggingface_status, UploadStatus::Unrecognized);
        assert!(reply.huggingface_message.is_none());
    }

    #[test]
    fn unknown_upload_status_strings_parse_as_unrecognized() {
        let reply: ExportResponse = serde_json::from_value(json!({
            "status": "success",
            "record_count": 2,
            "huggingface_status": "rate_limited"
        }))
        .expect("parse");
        assert_eq!(reply.huggingface_status, UploadStatus::Unrecognized);
    }

    #[test]
    fn error_envelope_parses_into_export_reply() {
        let reply: ExportResponse =
            serde_json::from_value(json!({"status": "error", "message": "No data to export"}))
                .expect("parse");
        assert!(!reply.is_success());
        assert_eq!(reply.message.as_deref(), Some("No data to export"));
        assert_eq!(reply.record_count, 0);
    }
}
