//! Host service bundle injected into the session runtime.

use std::rc::Rc;

use crate::{FileStoreService, IdentityService, SiteConfig};

/// Runtime-selected service bundle.
///
/// The entry layer picks browser or in-memory implementations; the runtime only sees the
/// traits.
#[derive(Clone)]
pub struct HostServices {
    /// Identity platform.
    pub identity: Rc<dyn IdentityService>,
    /// File-storage backend.
    pub files: Rc<dyn FileStoreService>,
    /// Site configuration the services were built from.
    pub config: SiteConfig,
}

impl HostServices {
    /// Bundles the given services with `config`.
    pub fn new(
        identity: Rc<dyn IdentityService>,
        files: Rc<dyn FileStoreService>,
        config: SiteConfig,
    ) -> Self {
        Self {
            identity,
            files,
            config,
        }
    }

    /// Download link for a stored file.
    pub fn download_url(&self, file_id: &str) -> String {
        crate::file_path(&self.config.api_base, file_id)
    }
}
