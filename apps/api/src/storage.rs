//! Original-upload storage.
//!
//! Every accepted upload is archived before it is decoded. `AppState` holds an
//! `Arc<dyn ResumeStore>`: `S3ResumeStore` when `S3_BUCKET` is configured,
//! `DisabledStore` otherwise.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Stores `data` under `key`. Returns the stored location, or `None` when
    /// the backend does not keep uploads.
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<Option<String>, AppError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// S3 / MinIO
// ────────────────────────────────────────────────────────────────────────────

pub struct S3ResumeStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ResumeStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ResumeStore for S3ResumeStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<Option<String>, AppError> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        let location = format!("s3://{}/{}", self.bucket, key);
        info!(size, "Uploaded resume to {location}");
        Ok(Some(location))
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// No storage configured
// ────────────────────────────────────────────────────────────────────────────

pub struct DisabledStore;

#[async_trait]
impl ResumeStore for DisabledStore {
    async fn put(
        &self,
        key: &str,
        _data: Bytes,
        _content_type: &str,
    ) -> Result<Option<String>, AppError> {
        debug!("Storage disabled; not archiving {key}");
        Ok(None)
    }

    fn backend_name(&self) -> &'static str {
        "disabled"
    }
}

/// `resumes/<uuid>/<filename>` with the filename reduced to a safe basename.
pub fn object_key(filename: &str) -> String {
    format!("resumes/{}/{}", Uuid::new_v4(), sanitize_filename(filename))
}

fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
pub mod memory {
    //! In-process store for handler tests.

    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryStore {
        pub objects: Mutex<Vec<(String, Bytes, String)>>,
        pub fail: bool,
    }

    #[async_trait]
    impl ResumeStore for MemoryStore {
        async fn put(
            &self,
            key: &str,
            data: Bytes,
            content_type: &str,
        ) -> Result<Option<String>, AppError> {
            if self.fail {
                return Err(AppError::Storage("bucket unavailable".to_string()));
            }
            self.objects
                .lock()
                .unwrap()
                .push((key.to_string(), data, content_type.to_string()));
            Ok(Some(format!("memory://{key}")))
        }

        fn backend_name(&self) -> &'static str {
            "memory"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        let key = object_key("Jane Tan CV.pdf");
        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "resumes");
        assert!(Uuid::parse_str(parts[1]).is_ok());
        assert_eq!(parts[2], "Jane_Tan_CV.pdf");
    }

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\cv.docx"), "cv.docx");
        assert_eq!(sanitize_filename(".hidden.pdf"), "hidden.pdf");
        assert_eq!(sanitize_filename("简历.pdf"), "__.pdf");
        assert_eq!(sanitize_filename(""), "resume");
        assert_eq!(sanitize_filename("dir/"), "resume");
    }

    #[tokio::test]
    async fn test_disabled_store_skips() {
        let location = DisabledStore
            .put("resumes/x/cv.pdf", Bytes::from_static(b"%PDF"), "application/pdf")
            .await
            .unwrap();
        assert_eq!(location, None);
    }
}
