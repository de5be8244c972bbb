//! Concrete adapter factories used by the entry layer to assemble [`HostServices`].

use std::rc::Rc;

use platform_host::{HostServices, ServiceError, SiteConfig};

use crate::{FirebaseIdentityService, HttpFileStoreService};

/// Stable name of the host strategy this crate provides, for diagnostics.
pub const fn host_strategy_name() -> &'static str {
    if cfg!(target_arch = "wasm32") {
        "browser"
    } else {
        "native-unsupported"
    }
}

/// Builds the identity adapter for `config`.
///
/// # Errors
///
/// Propagates [`FirebaseIdentityService::new`] failures.
pub fn identity_service(config: &SiteConfig) -> Result<FirebaseIdentityService, ServiceError> {
    FirebaseIdentityService::new(&config.firebase)
}

/// Builds the REST file-store adapter for `config`.
pub fn file_store_service(config: &SiteConfig) -> HttpFileStoreService {
    HttpFileStoreService::new(config.api_base.clone())
}

/// Assembles the browser [`HostServices`] bundle.
///
/// # Errors
///
/// Returns an error when the identity adapter cannot be built.
pub fn build_host_services(config: SiteConfig) -> Result<HostServices, ServiceError> {
    let identity = identity_service(&config)?;
    let files = file_store_service(&config);
    Ok(HostServices::new(Rc::new(identity), Rc::new(files), config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_host_services_keeps_the_site_config() {
        let config = SiteConfig {
            api_base: "/api".to_string(),
            ..SiteConfig::default()
        };
        let services = build_host_services(config.clone()).expect("services");
        assert_eq!(services.config, config);
        assert_eq!(services.download_url("x"), "/api/files/x");
        assert_eq!(file_store_service(&config).api_base(), "/api");
    }
}
