//! Session and interaction state for the file box runtime.

use std::collections::{BTreeSet, VecDeque};

use platform_host::{FileRecord, Identity, UploadFile, DEFAULT_PAGE_SIZE};

pub const ANONYMOUS_NAME: &str = "Anonymous";
pub const LOG_IN_SUBTEXT: &str = "(log in)";
pub const LOG_OUT_SUBTEXT: &str = "(log out)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLabels {
    pub name: String,
    pub subtext: &'static str,
}

impl AccountLabels {
    pub fn for_identity(identity: &Identity) -> Self {
        Self {
            name: identity
                .visible_name()
                .unwrap_or(ANONYMOUS_NAME)
                .to_string(),
            subtext: if identity.is_anonymous {
                LOG_IN_SUBTEXT
            } else {
                LOG_OUT_SUBTEXT
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    /// Bumped on every user-id change; list responses for older generations are dropped.
    pub generation: u64,
    pub page_size: usize,
    pub has_more: bool,
    pub loading: bool,
    /// The current generation's first page has replaced the list; later pages append.
    pub first_page_loaded: bool,
    /// The first page of the current generation waits for an in-flight `/login` merge.
    pub awaiting_merge: bool,
}

impl ListingState {
    fn new(page_size: usize) -> Self {
        Self {
            generation: 0,
            page_size: page_size.max(1),
            has_more: false,
            loading: false,
            first_page_loaded: false,
            awaiting_merge: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadQueue {
    pub queued: VecDeque<UploadFile>,
    /// Name of the file whose `POST /files` is outstanding.
    pub in_flight: Option<String>,
}

impl UploadQueue {
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.queued.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queued.len() + usize::from(self.in_flight.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub account: Option<AccountLabels>,
    pub files: Vec<FileRecord>,
    pub listing: ListingState,
    pub uploads: UploadQueue,
    pub pending_deletes: BTreeSet<String>,
    pub last_error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SessionState {
    pub fn new(page_size: usize) -> Self {
        Self {
            identity: None,
            account: None,
            files: Vec::new(),
            listing: ListingState::new(page_size),
            uploads: UploadQueue::default(),
            pending_deletes: BTreeSet::new(),
            last_error: None,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.uid.as_str())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.identity
            .as_ref()
            .map(|identity| identity.access_token.as_str())
    }

    /// Backend page holding the first record not yet in the list.
    ///
    /// The list mirrors a prefix of the backend's newest-first order (uploads are prepended,
    /// deletes are removed on both sides), so the first unseen record sits at offset
    /// `files.len()`. The page containing it may repeat records already shown.
    pub fn next_page(&self) -> u32 {
        u32::try_from(self.files.len() / self.listing.page_size).unwrap_or(u32::MAX)
    }

    pub fn is_delete_pending(&self, file_id: &str) -> bool {
        self.pending_deletes.contains(file_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadZoneEvent {
    MouseEnter,
    DragEnter,
    Focus,
    Click,
    MouseLeave,
    DragLeave,
    Blur,
    Drop,
}

impl UploadZoneEvent {
    pub const fn highlights(self) -> bool {
        matches!(
            self,
            Self::MouseEnter | Self::DragEnter | Self::Focus | Self::Click
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub upload_zone_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_labels_follow_identity_kind() {
        let anon = AccountLabels::for_identity(&Identity::anonymous("a", "t"));
        assert_eq!(anon.name, "Anonymous");
        assert_eq!(anon.subtext, "(log in)");

        let ada = AccountLabels::for_identity(&Identity::federated(
            "g",
            "t",
            Some("Ada Lovelace".to_string()),
        ));
        assert_eq!(ada.name, "Ada Lovelace");
        assert_eq!(ada.subtext, "(log out)");

        let nameless = AccountLabels::for_identity(&Identity::federated("g", "t", None));
        assert_eq!(nameless.name, "Anonymous");
        assert_eq!(nameless.subtext, "(log out)");

        let empty = AccountLabels::for_identity(&Identity::federated("g", "t", Some(String::new())));
        assert_eq!(empty.name, "Anonymous");
    }

    #[test]
    fn upload_zone_events_split_into_highlight_and_clear() {
        let on = [
            UploadZoneEvent::MouseEnter,
            UploadZoneEvent::DragEnter,
            UploadZoneEvent::Focus,
            UploadZoneEvent::Click,
        ];
        let off = [
            UploadZoneEvent::MouseLeave,
            UploadZoneEvent::DragLeave,
            UploadZoneEvent::Blur,
            UploadZoneEvent::Drop,
        ];
        assert!(on.iter().all(|event| event.highlights()));
        assert!(off.iter().all(|event| !event.highlights()));
    }

    #[test]
    fn new_state_clamps_page_size() {
        assert_eq!(SessionState::new(0).listing.page_size, 1);
        assert_eq!(SessionState::default().listing.page_size, 20);
    }
}
