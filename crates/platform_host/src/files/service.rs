//! File-store service contracts and the in-memory backend double.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use super::types::{FileRecord, LoginMergeRequest, UploadFile, DEFAULT_PAGE_SIZE};
use crate::ServiceError;

/// Object-safe boxed future used by [`FileStoreService`] async methods.
pub type FileStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for the file-storage REST backend.
pub trait FileStoreService {
    /// Lists one page of the token owner's files, newest first.
    fn list_files<'a>(
        &'a self,
        token: &'a str,
        page: u32,
    ) -> FileStoreFuture<'a, Result<Vec<FileRecord>, ServiceError>>;

    /// Uploads one file and returns the stored record.
    fn upload_file<'a>(
        &'a self,
        token: &'a str,
        file: &'a UploadFile,
    ) -> FileStoreFuture<'a, Result<FileRecord, ServiceError>>;

    /// Deletes one file owned by the token's user.
    fn delete_file<'a>(
        &'a self,
        token: &'a str,
        file_id: &'a str,
    ) -> FileStoreFuture<'a, Result<(), ServiceError>>;

    /// Moves every file of the anonymous `from` identity to the `to` identity.
    fn merge_anonymous_session<'a>(
        &'a self,
        request: &'a LoginMergeRequest,
    ) -> FileStoreFuture<'a, Result<(), ServiceError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Call recorded by [`MemoryFileStore`].
pub enum FileStoreCall {
    /// `GET /files`.
    List {
        /// Authorization token.
        token: String,
        /// Requested page.
        page: u32,
    },
    /// `POST /files`.
    Upload {
        /// Authorization token.
        token: String,
        /// Uploaded file name.
        name: String,
    },
    /// `DELETE /files/{id}`.
    Delete {
        /// Authorization token.
        token: String,
        /// Deleted file id.
        file_id: String,
    },
    /// `POST /login`.
    Merge {
        /// Anonymous token.
        from: String,
        /// Signed-in token.
        to: String,
    },
}

#[derive(Debug)]
struct MemoryFileStoreState {
    // Newest first, keyed by the owning token.
    files: Vec<(String, FileRecord)>,
    next_id: u64,
    page_size: usize,
    calls: Vec<FileStoreCall>,
    fail_next: Option<ServiceError>,
}

impl Default for MemoryFileStoreState {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            next_id: 0,
            page_size: DEFAULT_PAGE_SIZE,
            calls: Vec::new(),
            fail_next: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory file store mirroring the backend's ownership, ordering and paging rules.
///
/// Ownership is tracked per access token rather than per verified user id.
pub struct MemoryFileStore {
    inner: Rc<RefCell<MemoryFileStoreState>>,
}

impl MemoryFileStore {
    /// Overrides the page size used by [`FileStoreService::list_files`].
    pub fn with_page_size(self, page_size: usize) -> Self {
        self.inner.borrow_mut().page_size = page_size.max(1);
        self
    }

    /// Stores `records` for `token`, keeping their order ahead of older files.
    pub fn seed(&self, token: &str, records: impl IntoIterator<Item = FileRecord>) {
        let mut inner = self.inner.borrow_mut();
        let seeded: Vec<_> = records
            .into_iter()
            .map(|record| (token.to_string(), record))
            .collect();
        inner.files.splice(0..0, seeded);
    }

    /// Returns every file owned by `token`, newest first.
    pub fn files_for(&self, token: &str) -> Vec<FileRecord> {
        self.inner
            .borrow()
            .files
            .iter()
            .filter(|(owner, _)| owner == token)
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Returns every call made so far, in order.
    pub fn calls(&self) -> Vec<FileStoreCall> {
        self.inner.borrow().calls.clone()
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&self, error: ServiceError) {
        self.inner.borrow_mut().fail_next = Some(error);
    }

    fn record(&self, call: FileStoreCall) -> Result<(), ServiceError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(call);
        match inner.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl FileStoreService for MemoryFileStore {
    fn list_files<'a>(
        &'a self,
        token: &'a str,
        page: u32,
    ) -> FileStoreFuture<'a, Result<Vec<FileRecord>, ServiceError>> {
        Box::pin(async move {
            self.record(FileStoreCall::List {
                token: token.to_string(),
                page,
            })?;
            let inner = self.inner.borrow();
            Ok(inner
                .files
                .iter()
                .filter(|(owner, _)| owner == token)
                .skip(page as usize * inner.page_size)
                .take(inner.page_size)
                .map(|(_, record)| record.clone())
                .collect())
        })
    }

    fn upload_file<'a>(
        &'a self,
        token: &'a str,
        file: &'a UploadFile,
    ) -> FileStoreFuture<'a, Result<FileRecord, ServiceError>> {
        Box::pin(async move {
            self.record(FileStoreCall::Upload {
                token: token.to_string(),
                name: file.name.clone(),
            })?;
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let record = FileRecord {
                size: Some(file.len()),
                content_type: (!file.mime_type.is_empty()).then(|| file.mime_type.clone()),
                ..FileRecord::new(format!("file-{}", inner.next_id), file.name.clone())
            };
            inner.files.insert(0, (token.to_string(), record.clone()));
            Ok(record)
        })
    }

    fn delete_file<'a>(
        &'a self,
        token: &'a str,
        file_id: &'a str,
    ) -> FileStoreFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            self.record(FileStoreCall::Delete {
                token: token.to_string(),
                file_id: file_id.to_string(),
            })?;
            let mut inner = self.inner.borrow_mut();
            let Some(idx) = inner.files.iter().position(|(_, r)| r.id == file_id) else {
                return Err(ServiceError::Status { status: 404 });
            };
            if inner.files[idx].0 != token {
                return Err(ServiceError::Status { status: 401 });
            }
            inner.files.remove(idx);
            Ok(())
        })
    }

    fn merge_anonymous_session<'a>(
        &'a self,
        request: &'a LoginMergeRequest,
    ) -> FileStoreFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move {
            self.record(FileStoreCall::Merge {
                from: request.from.clone(),
                to: request.to.clone(),
            })?;
            if request.from.is_empty() {
                return Ok(());
            }
            for (owner, _) in self.inner.borrow_mut().files.iter_mut() {
                if *owner == request.from {
                    owner.clone_from(&request.to);
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn uploads_are_listed_newest_first_per_owner() {
        let store = MemoryFileStore::default();
        let svc: &dyn FileStoreService = &store;

        let first = block_on(svc.upload_file("t1", &UploadFile::new("a.txt", "text/plain", b"aa".to_vec())))
            .expect("upload a");
        let second = block_on(svc.upload_file("t1", &UploadFile::new("b.bin", "", vec![1, 2, 3])))
            .expect("upload b");
        block_on(svc.upload_file("t2", &UploadFile::new("c.txt", "", Vec::new()))).expect("upload c");

        assert_eq!(first.size, Some(2));
        assert_eq!(second.content_type, None);
        assert_eq!(
            block_on(svc.list_files("t1", 0)).expect("list"),
            vec![second, first]
        );
    }

    #[test]
    fn listing_pages_through_the_owner_files() {
        let store = MemoryFileStore::default().with_page_size(2);
        store.seed(
            "t",
            (1..=5).map(|n| FileRecord::new(format!("f{n}"), format!("{n}.txt"))),
        );

        let ids = |page| {
            block_on(store.list_files("t", page))
                .expect("list")
                .into_iter()
                .map(|r| r.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(0), vec!["f1", "f2"]);
        assert_eq!(ids(2), vec!["f5"]);
        assert!(ids(3).is_empty());
    }

    #[test]
    fn delete_enforces_ownership() {
        let store = MemoryFileStore::default();
        store.seed("owner", [FileRecord::new("a", "foo.txt")]);

        assert_eq!(
            block_on(store.delete_file("intruder", "a")),
            Err(ServiceError::Status { status: 401 })
        );
        assert_eq!(
            block_on(store.delete_file("owner", "missing")),
            Err(ServiceError::Status { status: 404 })
        );
        block_on(store.delete_file("owner", "a")).expect("delete");
        assert!(store.files_for("owner").is_empty());
    }

    #[test]
    fn merge_moves_anonymous_files_and_ignores_empty_source() {
        let store = MemoryFileStore::default();
        store.seed("anon", [FileRecord::new("a", "foo.txt")]);
        store.seed("user", [FileRecord::new("b", "bar.txt")]);

        block_on(store.merge_anonymous_session(&LoginMergeRequest {
            from: String::new(),
            to: "user".to_string(),
        }))
        .expect("empty merge");
        assert_eq!(store.files_for("anon").len(), 1);

        block_on(store.merge_anonymous_session(&LoginMergeRequest {
            from: "anon".to_string(),
            to: "user".to_string(),
        }))
        .expect("merge");
        assert!(store.files_for("anon").is_empty());
        assert_eq!(store.files_for("user").len(), 2);
    }

    #[test]
    fn fail_next_fails_exactly_one_call() {
        let store = MemoryFileStore::default();
        store.fail_next(ServiceError::Network("offline".to_string()));
        assert!(block_on(store.list_files("t", 0)).is_err());
        assert!(block_on(store.list_files("t", 0)).is_ok());
        assert_eq!(store.calls().len(), 2);
    }
}
