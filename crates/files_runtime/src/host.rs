//! Host-side runtime helpers that run reducer effects on the browser event loop.

use std::rc::Rc;

use leptos::{logging, spawn_local, Callable, Callback};
use platform_host::{HostServices, IdentityListener};

use crate::{
    effects::execute_effect,
    reducer::{RuntimeEffect, SessionAction},
};

#[derive(Clone)]
/// Host service bundle for session runtime side effects.
pub struct FilesHostContext {
    services: HostServices,
}

impl FilesHostContext {
    /// Wraps the injected host services.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Download link for a stored file.
    pub fn download_url(&self, file_id: &str) -> String {
        self.services.download_url(file_id)
    }

    /// Subscribes to identity changes and forwards every notification to `dispatch`.
    pub fn install_identity_subscription(&self, dispatch: Callback<SessionAction>) {
        let services = self.services.clone();
        spawn_local(async move {
            let listener: IdentityListener = Rc::new(move |identity| {
                dispatch.call(SessionAction::IdentityChanged { identity });
            });
            if let Err(err) = services.identity.subscribe(listener).await {
                logging::warn!("identity subscription failed: {err}");
                dispatch.call(SessionAction::IdentityRequestFailed { error: err });
            }
        });
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect, dispatch: Callback<SessionAction>) {
        let services = self.services.clone();
        spawn_local(async move {
            if let Some(action) = execute_effect(&services, effect).await {
                log_failure(&action);
                dispatch.call(action);
            }
        });
    }
}

fn log_failure(action: &SessionAction) {
    match action {
        SessionAction::IdentityRequestFailed { error } => {
            logging::warn!("identity request failed: {error}")
        }
        SessionAction::MergeCompleted { result: Err(err), .. } => {
            logging::warn!("anonymous session merge failed: {err}")
        }
        SessionAction::FilesLoaded {
            page,
            result: Err(err),
            ..
        } => logging::warn!("file list page {page} failed: {err}"),
        SessionAction::UploadCompleted { result: Err(err), .. } => {
            logging::warn!("upload failed: {err}")
        }
        SessionAction::DeleteCompleted {
            file_id,
            result: Err(err),
            ..
        } => logging::warn!("delete of {file_id} failed: {err}"),
        _ => {}
    }
}
