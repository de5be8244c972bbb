//! Reducer actions, side-effect intents, and transition logic for the file-box session.

use platform_host::{FileRecord, Identity, LoginMergeRequest, ServiceError, UploadFile};
use thiserror::Error;

use crate::model::{AccountLabels, InteractionState, SessionState, UploadZoneEvent};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_session`] to mutate [`SessionState`].
pub enum SessionAction {
    /// The identity platform reported a new identity state.
    IdentityChanged {
        /// New identity, `None` when signed out.
        identity: Option<Identity>,
    },
    /// The account subtext was clicked: sign in with Google when anonymous, otherwise sign out.
    SignInOrOut,
    /// The user picked files to upload, in picker order.
    FilesPicked {
        /// Picked file contents.
        files: Vec<UploadFile>,
    },
    /// The delete affordance of a row was clicked.
    DeleteRequested {
        /// Id of the file to delete.
        file_id: String,
    },
    /// The "load more" control was clicked.
    LoadMoreRequested,
    /// Pointer, drag or focus event on the upload zone.
    UploadZone(UploadZoneEvent),
    /// Hide the error banner.
    DismissError,
    /// Show an error that happened outside the service calls (for example reading a file).
    ReportError {
        /// User-facing message.
        message: String,
    },
    /// `POST /login` finished.
    MergeCompleted {
        /// Listing generation the merge was issued for.
        generation: u64,
        /// Outcome.
        result: Result<(), ServiceError>,
    },
    /// `GET /files` finished.
    FilesLoaded {
        /// Listing generation the fetch was issued for.
        generation: u64,
        /// Requested page.
        page: u32,
        /// Outcome.
        result: Result<Vec<FileRecord>, ServiceError>,
    },
    /// `POST /files` finished.
    UploadCompleted {
        /// User the upload was issued for.
        owner_uid: String,
        /// Outcome.
        result: Result<FileRecord, ServiceError>,
    },
    /// `DELETE /files/{id}` finished.
    DeleteCompleted {
        /// User the delete was issued for.
        owner_uid: String,
        /// Deleted file id.
        file_id: String,
        /// Outcome.
        result: Result<(), ServiceError>,
    },
    /// A sign-in or sign-out request was rejected by the identity platform.
    IdentityRequestFailed {
        /// Platform error.
        error: ServiceError,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_session`] for the host layer to execute.
pub enum RuntimeEffect {
    /// Start an anonymous session.
    SignInAnonymously,
    /// Open the Google popup sign-in.
    SignInWithGoogle,
    /// End the current session.
    SignOut,
    /// Ask the backend to move the anonymous user's files to the new user.
    MergeAnonymousSession {
        /// `{from, to}` token pair.
        request: LoginMergeRequest,
        /// Listing generation waiting on the merge.
        generation: u64,
    },
    /// Fetch one page of the file list.
    FetchFiles {
        /// Authorization token.
        token: String,
        /// Page to fetch.
        page: u32,
        /// Listing generation.
        generation: u64,
    },
    /// Upload one file.
    UploadFile {
        /// Authorization token.
        token: String,
        /// User the upload is issued for.
        owner_uid: String,
        /// File contents.
        file: UploadFile,
    },
    /// Delete one file.
    DeleteFile {
        /// Authorization token.
        token: String,
        /// User the delete is issued for.
        owner_uid: String,
        /// File id.
        file_id: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that cannot apply to the current state.
pub enum ReducerError {
    /// The action needs a signed-in identity.
    #[error("no identity is signed in")]
    NotSignedIn,
    /// The referenced file is not in the list.
    #[error("file not found: {0}")]
    FileNotFound(String),
}

/// Applies a [`SessionAction`] to the session state and collects resulting side effects.
///
/// Backend completions are folded into the current state (prepend, filter, append) rather than
/// replacing it with a snapshot, so completions arriving in any order compose.
///
/// # Errors
///
/// Returns [`ReducerError`] when a user action references state that does not exist.
pub fn reduce_session(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    action: SessionAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        SessionAction::IdentityChanged { identity: None } => {
            state.identity = None;
            effects.push(RuntimeEffect::SignInAnonymously);
        }
        SessionAction::IdentityChanged {
            identity: Some(next),
        } => {
            let previous = state.identity.take();
            let uid_changed = previous.as_ref().map(|p| p.uid.as_str()) != Some(next.uid.as_str());
            state.account = Some(AccountLabels::for_identity(&next));

            if uid_changed {
                let listing = &mut state.listing;
                listing.generation += 1;
                listing.has_more = false;
                listing.loading = true;
                listing.first_page_loaded = false;
                listing.awaiting_merge = false;
                state.pending_deletes.clear();
            }

            match previous {
                Some(previous) if previous.is_anonymous && !next.is_anonymous => {
                    state.listing.awaiting_merge = uid_changed;
                    effects.push(RuntimeEffect::MergeAnonymousSession {
                        request: LoginMergeRequest {
                            from: previous.access_token,
                            to: next.access_token.clone(),
                        },
                        generation: state.listing.generation,
                    });
                }
                _ if uid_changed => {
                    effects.push(RuntimeEffect::FetchFiles {
                        token: next.access_token.clone(),
                        page: 0,
                        generation: state.listing.generation,
                    });
                }
                _ => {}
            }

            state.identity = Some(next);
            start_next_upload(state, &mut effects);
        }
        SessionAction::SignInOrOut => match state.identity.as_ref() {
            Some(identity) if identity.is_anonymous => {
                effects.push(RuntimeEffect::SignInWithGoogle);
            }
            Some(_) => effects.push(RuntimeEffect::SignOut),
            None => {}
        },
        SessionAction::FilesPicked { files } => {
            state.uploads.queued.extend(files);
            start_next_upload(state, &mut effects);
        }
        SessionAction::DeleteRequested { file_id } => {
            let identity = state.identity.as_ref().ok_or(ReducerError::NotSignedIn)?;
            if !state.files.iter().any(|f| f.id == file_id) {
                return Err(ReducerError::FileNotFound(file_id));
            }
            if state.pending_deletes.insert(file_id.clone()) {
                effects.push(RuntimeEffect::DeleteFile {
                    token: identity.access_token.clone(),
                    owner_uid: identity.uid.clone(),
                    file_id,
                });
            }
        }
        SessionAction::LoadMoreRequested => {
            let listing = &state.listing;
            if listing.loading || listing.awaiting_merge || !listing.has_more {
                return Ok(effects);
            }
            let token = state.access_token().ok_or(ReducerError::NotSignedIn)?;
            effects.push(RuntimeEffect::FetchFiles {
                token: token.to_string(),
                page: state.next_page(),
                generation: listing.generation,
            });
            state.listing.loading = true;
        }
        SessionAction::UploadZone(event) => {
            interaction.upload_zone_active = event.highlights();
        }
        SessionAction::DismissError => state.last_error = None,
        SessionAction::ReportError { message } => state.last_error = Some(message),
        SessionAction::MergeCompleted { generation, result } => {
            if let Err(err) = result {
                state.last_error = Some(format!("Could not move your anonymous files: {err}"));
            }
            if generation == state.listing.generation && state.listing.awaiting_merge {
                state.listing.awaiting_merge = false;
                if let Some(token) = state.access_token() {
                    effects.push(RuntimeEffect::FetchFiles {
                        token: token.to_string(),
                        page: 0,
                        generation,
                    });
                }
            }
        }
        SessionAction::FilesLoaded {
            generation,
            result,
            ..
        } => {
            if generation != state.listing.generation {
                return Ok(effects);
            }
            state.listing.loading = false;
            match result {
                Ok(records) => {
                    state.listing.has_more = records.len() >= state.listing.page_size;
                    if !state.listing.first_page_loaded {
                        state.listing.first_page_loaded = true;
                        state.files = records;
                    } else {
                        append_unseen(&mut state.files, records);
                    }
                }
                Err(err) => state.last_error = Some(format!("Could not load files: {err}")),
            }
        }
        SessionAction::UploadCompleted { owner_uid, result } => {
            state.uploads.in_flight = None;
            match result {
                Ok(record) if state.uid() == Some(owner_uid.as_str()) => {
                    state.files.retain(|f| f.id != record.id);
                    state.files.insert(0, record);
                }
                Ok(_) => {}
                Err(err) => state.last_error = Some(format!("Upload failed: {err}")),
            }
            start_next_upload(state, &mut effects);
        }
        SessionAction::DeleteCompleted {
            owner_uid,
            file_id,
            result,
        } => {
            if state.uid() != Some(owner_uid.as_str()) {
                return Ok(effects);
            }
            state.pending_deletes.remove(&file_id);
            match result {
                Ok(()) => state.files.retain(|f| f.id != file_id),
                Err(err) => state.last_error = Some(format!("Delete failed: {err}")),
            }
        }
        SessionAction::IdentityRequestFailed { error } => {
            state.last_error = Some(format!("Sign-in failed: {error}"));
        }
    }
    Ok(effects)
}

fn start_next_upload(state: &mut SessionState, effects: &mut Vec<RuntimeEffect>) {
    if state.uploads.in_flight.is_some() {
        return;
    }
    let Some(identity) = state.identity.as_ref() else {
        return;
    };
    let Some(file) = state.uploads.queued.pop_front() else {
        return;
    };
    state.uploads.in_flight = Some(file.name.clone());
    effects.push(RuntimeEffect::UploadFile {
        token: identity.access_token.clone(),
        owner_uid: identity.uid.clone(),
        file,
    });
}

fn append_unseen(files: &mut Vec<FileRecord>, records: Vec<FileRecord>) {
    for record in records {
        if !files.iter().any(|f| f.id == record.id) {
            files.push(record);
        }
    }
}
