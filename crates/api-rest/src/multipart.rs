//! Decoding of `multipart/form-data` project requests.
//!
//! Text fields are collected by name. The file field `images` is streamed into a
//! [`TempUpload`] inside the upload directory, so the request body is never held in memory
//! and the temporary file is removed on every path where the upload is not stored.

use crate::error::ApiError;
use axum::extract::Multipart;
use folio_core::TempUpload;
use std::collections::HashMap;
use std::path::Path;

/// Name of the multipart field carrying the project logo.
pub const IMAGE_FIELD: &str = "images";

#[derive(Debug, Default)]
pub struct ProjectForm {
    fields: HashMap<String, String>,
    image: Option<TempUpload>,
}

impl ProjectForm {
    /// Reads every part of `multipart`.
    ///
    /// A file part with no filename and no bytes is what browsers send for an empty file
    /// input, so it is treated as no image at all. When several image parts are sent the
    /// last one wins.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] for a malformed stream and [`ApiError::Internal`] if
    /// the temporary file cannot be written.
    pub async fn read(mut multipart: Multipart, upload_dir: &Path) -> Result<Self, ApiError> {
        let mut form = ProjectForm::default();

        while let Some(mut field) = multipart.next_field().await.map_err(bad_request)? {
            let name = field.name().unwrap_or_default().to_string();

            if name != IMAGE_FIELD {
                let value = field.text().await.map_err(bad_request)?;
                form.fields.insert(name, value);
                continue;
            }

            let file_name = field
                .file_name()
                .map(str::to_string)
                .filter(|n| !n.is_empty());
            let unnamed = file_name.is_none();
            let mut upload = TempUpload::new_in(upload_dir, file_name).map_err(|e| {
                ApiError::Internal(format!(
                    "cannot create upload in {}: {e}",
                    upload_dir.display()
                ))
            })?;

            let mut size = 0usize;
            while let Some(chunk) = field.chunk().await.map_err(bad_request)? {
                size += chunk.len();
                upload
                    .append(&chunk)
                    .map_err(|e| ApiError::Internal(format!("cannot write upload: {e}")))?;
            }

            if unnamed && size == 0 {
                tracing::debug!("ignoring empty image part");
                continue;
            }
            form.image = Some(upload);
        }

        Ok(form)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn take_image(&mut self) -> Option<TempUpload> {
        self.image.take()
    }
}

fn bad_request(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("invalid multipart body: {}", e.body_text()))
}
