use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Uploads larger than this are rejected before touching the blob store.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const SUFFIX_LENGTH: usize = 7;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub blob_url: String,
}

/// POST /api/upload-image -- store a customization image and return its
/// public URL. Accepts a single multipart `file` field; only image content
/// types up to 5 MB are allowed.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = sanitize_filename(field.file_name().unwrap_or("upload"));
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest("Only image uploads are allowed".into()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".into()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(
                "Uploaded file exceeds the 5 MB limit".into(),
            ));
        }

        let pathname = format!(
            "product_images/{}-{}-{filename}",
            Utc::now().timestamp_millis(),
            random_suffix()
        );
        let blob_url = state
            .blob
            .upload(&pathname, &content_type, bytes.to_vec())
            .await?;
        tracing::info!(%pathname, size = bytes.len(), "Stored customization image");

        return Ok(Json(UploadResponse {
            success: true,
            blob_url,
        }));
    }

    Err(AppError::BadRequest("Missing 'file' field".into()))
}

/// Collision-avoidance suffix between the timestamp and the original name.
fn random_suffix() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SUFFIX_LENGTH)
        .map(char::from)
        .collect()
}

/// Keep only path-safe characters from a client-supplied filename.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_path_safe() {
        assert_eq!(sanitize_filename("photo.png"), "photo.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_filename(""), "upload");
    }

    #[test]
    fn suffixes_are_short_and_alphanumeric() {
        let s = random_suffix();
        assert_eq!(s.len(), SUFFIX_LENGTH);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
