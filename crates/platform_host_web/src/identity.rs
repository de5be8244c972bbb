//! Identity host-service adapter backed by Firebase Authentication.

use platform_host::{FirebaseConfig, IdentityFuture, IdentityListener, IdentityService, ServiceError};

use crate::bridge;

#[derive(Debug, Clone)]
/// Browser identity adapter driving the Firebase JS SDK.
pub struct FirebaseIdentityService {
    config_json: String,
}

impl FirebaseIdentityService {
    /// Creates an adapter for the given Firebase web-app configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Decode`] when the configuration cannot be serialized.
    pub fn new(config: &FirebaseConfig) -> Result<Self, ServiceError> {
        let config_json =
            serde_json::to_string(config).map_err(|e| ServiceError::Decode(e.to_string()))?;
        Ok(Self { config_json })
    }
}

impl IdentityService for FirebaseIdentityService {
    fn subscribe<'a>(
        &'a self,
        listener: IdentityListener,
    ) -> IdentityFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move { bridge::firebase::subscribe(&self.config_json, listener).await })
    }

    fn sign_in_anonymously<'a>(&'a self) -> IdentityFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move { bridge::firebase::sign_in_anonymously(&self.config_json).await })
    }

    fn sign_in_with_google<'a>(&'a self) -> IdentityFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move { bridge::firebase::sign_in_with_google(&self.config_json).await })
    }

    fn sign_out<'a>(&'a self) -> IdentityFuture<'a, Result<(), ServiceError>> {
        Box::pin(async move { bridge::firebase::sign_out(&self.config_json).await })
    }
}
