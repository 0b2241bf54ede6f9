// Chapter upload: ask the API for a single-use presigned POST, send the file
// to object storage with that policy, then describe the stored object as a
// new chapter. The caller appends the chapter; nothing here touches a tonie,
// so any failure leaves the chapter list exactly as it was.

use crate::config::Endpoints;
use crate::error::{Result, TonieError};
use crate::models::Chapter;
use crate::request::RequestHandler;
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Presigned destination issued by the file endpoint; consumed once.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub file_id: String,
    pub request: UploadRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub url: String,
    pub fields: StorageFields,
}

/// Signed policy fields that must accompany the file in the form.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageFields {
    pub key: String,
    #[serde(default)]
    pub policy: String,
    #[serde(rename = "x-amz-algorithm", default)]
    pub algorithm: String,
    #[serde(rename = "x-amz-credential", default)]
    pub credential: String,
    #[serde(rename = "x-amz-date", default)]
    pub date: String,
    #[serde(rename = "x-amz-signature", default)]
    pub signature: String,
    #[serde(rename = "x-amz-security-token", default)]
    pub security_token: String,
}

impl StorageFields {
    /// Form fields in the order object storage receives them.
    pub fn form_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("key", self.key.as_str()),
            ("x-amz-algorithm", self.algorithm.as_str()),
            ("x-amz-credential", self.credential.as_str()),
            ("x-amz-date", self.date.as_str()),
            ("policy", self.policy.as_str()),
            ("x-amz-signature", self.signature.as_str()),
            ("x-amz-security-token", self.security_token.as_str()),
        ]
    }
}

/// Runs the three upload steps and returns the chapter to append.
pub(crate) fn upload_chapter(
    handler: &RequestHandler,
    endpoints: &Endpoints,
    path: &Path,
    title: &str,
) -> Result<Chapter> {
    // Fail on an unreadable source before spending a ticket.
    let file_error = |source| TonieError::File {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(file_error)?;
    let length = file.metadata().map_err(file_error)?.len();

    let ticket = request_ticket(handler, endpoints)?;
    debug!(file_id = %ticket.file_id, key = %ticket.request.fields.key, "received upload ticket");

    let form = signed_form(&ticket.request.fields, file, length)?;
    handler.post_multipart(&endpoints.storage_url, form)?;

    info!(
        file_id = %ticket.file_id,
        bytes = length,
        path = %path.display(),
        "uploaded chapter file"
    );

    Ok(Chapter {
        id: ticket.request.fields.key,
        file: ticket.file_id,
        title: title.to_string(),
        ..Chapter::default()
    })
}

fn request_ticket(handler: &RequestHandler, endpoints: &Endpoints) -> Result<UploadTicket> {
    let body = serde_json::json!({ "headers": {} });
    handler.post_json(&endpoints.file(), &body)
}

fn signed_form(fields: &StorageFields, file: File, length: u64) -> Result<Form> {
    let form = fields
        .form_fields()
        .into_iter()
        .fold(Form::new(), |form, (name, value)| {
            form.text(name, value.to_string())
        });

    let part = Part::reader_with_length(file, length)
        .file_name(fields.key.clone())
        .mime_str("application/octet-stream")?;

    Ok(form.part("file", part))
}
