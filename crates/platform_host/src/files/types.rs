//! File-store data types and backend route helpers.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Number of records the backend returns per `GET /files` page.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Multipart form field carrying the uploaded file.
pub const UPLOAD_FORM_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Descriptor of one stored file as returned by the backend.
pub struct FileRecord {
    /// Backend-assigned id (a UUID string).
    pub id: String,
    /// Original file name.
    pub name: String,
    /// Owning user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Upload timestamp as sent by the backend (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Content type recorded at upload.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileRecord {
    /// Builds a record carrying only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            user_id: None,
            created_at: None,
            size: None,
            content_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the contents of an [`UploadFile`] live.
pub enum UploadSource {
    /// Contents held in memory.
    Bytes(Rc<[u8]>),
    /// Browser `Blob`/`File` handle. The browser streams it when the request is sent, so the
    /// contents never enter wasm memory.
    Blob(js_sys::Object),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One file picked by the user, ready to be sent as multipart form data.
pub struct UploadFile {
    /// File name reported by the picker.
    pub name: String,
    /// MIME type reported by the picker (may be empty).
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    /// File contents.
    pub source: UploadSource,
}

impl UploadFile {
    /// Builds an upload payload from in-memory bytes.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            source: UploadSource::Bytes(bytes.into()),
        }
    }

    /// Builds an upload payload backed by a browser `Blob` or `File`.
    pub fn from_blob(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        blob: js_sys::Object,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            source: UploadSource::Blob(blob),
        }
    }

    /// Payload size in bytes.
    pub fn len(&self) -> u64 {
        self.size
    }

    /// Returns `true` for an empty file.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// `POST /login` body asking the backend to move an anonymous user's files to a new user.
pub struct LoginMergeRequest {
    /// Token of the anonymous identity being left.
    pub from: String,
    /// Token of the identity that just signed in.
    pub to: String,
}

fn trimmed_base(api_base: &str) -> &str {
    api_base.trim_end_matches('/')
}

/// Route for listing files. Page zero carries no query string.
pub fn files_path(api_base: &str, page: u32) -> String {
    let base = trimmed_base(api_base);
    if page == 0 {
        format!("{base}/files")
    } else {
        format!("{base}/files?page={page}")
    }
}

/// Route for downloading or deleting one file.
pub fn file_path(api_base: &str, file_id: &str) -> String {
    format!("{}/files/{file_id}", trimmed_base(api_base))
}

/// Route for merging an anonymous session into a signed-in one.
pub fn login_path(api_base: &str) -> String {
    format!("{}/login", trimmed_base(api_base))
}
