//! Interpreter that runs [`RuntimeEffect`] intents against the host services.
//!
//! Kept free of Leptos so the full request/response cycle can be driven natively in tests.

use platform_host::HostServices;

use crate::reducer::{RuntimeEffect, SessionAction};

/// Executes one effect and returns the completion action to dispatch, if any.
///
/// Identity effects only start a flow; their success is observed through the identity
/// subscription, so only failures produce an action here.
pub async fn execute_effect(services: &HostServices, effect: RuntimeEffect) -> Option<SessionAction> {
    match effect {
        RuntimeEffect::SignInAnonymously => services
            .identity
            .sign_in_anonymously()
            .await
            .err()
            .map(|error| SessionAction::IdentityRequestFailed { error }),
        RuntimeEffect::SignInWithGoogle => services
            .identity
            .sign_in_with_google()
            .await
            .err()
            .map(|error| SessionAction::IdentityRequestFailed { error }),
        RuntimeEffect::SignOut => services
            .identity
            .sign_out()
            .await
            .err()
            .map(|error| SessionAction::IdentityRequestFailed { error }),
        RuntimeEffect::MergeAnonymousSession {
            request,
            generation,
        } => {
            let result = services.files.merge_anonymous_session(&request).await;
            Some(SessionAction::MergeCompleted { generation, result })
        }
        RuntimeEffect::FetchFiles {
            token,
            page,
            generation,
        } => {
            let result = services.files.list_files(&token, page).await;
            Some(SessionAction::FilesLoaded {
                generation,
                page,
                result,
            })
        }
        RuntimeEffect::UploadFile {
            token,
            owner_uid,
            file,
        } => {
            let result = services.files.upload_file(&token, &file).await;
            Some(SessionAction::UploadCompleted { owner_uid, result })
        }
        RuntimeEffect::DeleteFile {
            token,
            owner_uid,
            file_id,
        } => {
            let result = services.files.delete_file(&token, &file_id).await;
            Some(SessionAction::DeleteCompleted {
                owner_uid,
                file_id,
                result,
            })
        }
    }
}
