//! File-store host-service adapter backed by the REST backend.

use platform_host::{
    file_path, files_path, login_path, FileRecord, FileStoreFuture, FileStoreService,
    LoginMergeRequest, ServiceError, UploadFile,
};

use crate::bridge;

#[derive(Debug, Clone, Default)]
/// Browser file-store adapter issuing `fetch` requests against `/files` and `/login`.
pub struct HttpFileStoreService {
    api_base: String,
}

impl HttpFileStoreService {
    /// Creates an adapter whose routes are prefixed with `api_base` (empty for same origin).
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    /// Returns the configured route prefix.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

impl FileStoreService for HttpFileStoreService {
    fn list_files<'a>(
        &'a self,
        token: &'a str,
        page: u32,
    ) -> FileStoreFuture<'a, Result<Vec<FileRecord>, ServiceError>> {
        Box::pin(async move {
            bridge::http::get_files(&files_path(&self.api_base, page), token).await
        })
    }

    fn upload_file<'a>(
        &'a self,
        token: &'a str,
        file: &'a UploadFile,
    ) -> FileStoreFuture<'a, Result<FileRecord, ServiceError>> {
        Box::pin(async move {
            bridge::http::post_file(&files_path(&self.api_base, 0), token, file).await
        })
    }

    fn delete_file<'a>(
        &'a self,
        token: &'a str,
        file_id: &'a str,
    ) -> FileStoreFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            bridge::http::delete_file(&file_path(&self.api_base, file_id), token).await
        })
    }

    fn merge_anonymous_session<'a>(
        &'a self,
        request: &'a LoginMergeRequest,
    ) -> FileStoreFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move { bridge::http::post_login(&login_path(&self.api_base), request).await })
    }
}
