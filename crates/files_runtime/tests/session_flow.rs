//! End-to-end session flows over the in-memory identity platform and file store.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use files_runtime::{
    execute_effect, reduce_session, InteractionState, SessionAction, SessionState,
};
use futures::executor::block_on;
use platform_host::{
    FileRecord, FileStoreCall, HostServices, Identity, IdentityCall, IdentityListener,
    MemoryFileStore, MemoryIdentityService, ServiceError, SiteConfig, UploadFile,
};
use pretty_assertions::assert_eq;

struct Harness {
    services: HostServices,
    identity: MemoryIdentityService,
    store: MemoryFileStore,
    state: SessionState,
    interaction: InteractionState,
    inbox: Rc<RefCell<VecDeque<SessionAction>>>,
}

impl Harness {
    fn new(identity: MemoryIdentityService, store: MemoryFileStore, page_size: usize) -> Self {
        let services = HostServices::new(
            Rc::new(identity.clone()),
            Rc::new(store.clone()),
            SiteConfig::default(),
        );
        Self {
            services,
            identity,
            store,
            state: SessionState::new(page_size),
            interaction: InteractionState::default(),
            inbox: Rc::default(),
        }
    }

    fn boot(mut self) -> Self {
        let inbox = self.inbox.clone();
        let listener: IdentityListener = Rc::new(move |identity| {
            inbox
                .borrow_mut()
                .push_back(SessionAction::IdentityChanged { identity });
        });
        block_on(self.services.identity.subscribe(listener)).expect("subscribe");
        self.settle();
        self
    }

    fn dispatch(&mut self, action: SessionAction) {
        self.inbox.borrow_mut().push_back(action);
        self.settle();
    }

    fn settle(&mut self) {
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            let effects = reduce_session(&mut self.state, &mut self.interaction, action)
                .expect("reduce");
            for effect in effects {
                if let Some(done) = block_on(execute_effect(&self.services, effect)) {
                    self.inbox.borrow_mut().push_back(done);
                }
            }
        }
    }

    fn file_names(&self) -> Vec<&str> {
        self.state.files.iter().map(|f| f.name.as_str()).collect()
    }

    fn labels(&self) -> (String, &'static str) {
        let account = self.state.account.clone().expect("account labels");
        (account.name, account.subtext)
    }
}

fn ada() -> Identity {
    Identity::federated("g-1", "g-token", Some("Ada".to_string()))
}

fn text_file(name: &str) -> UploadFile {
    UploadFile::new(name, "text/plain", name.as_bytes().to_vec())
}

fn booted_with(records: Vec<FileRecord>) -> Harness {
    let store = MemoryFileStore::default();
    store.seed("anon-token-1", records);
    Harness::new(MemoryIdentityService::default(), store, 20).boot()
}

#[test]
fn boot_signs_in_anonymously_and_loads_the_file_list() {
    let harness = booted_with(vec![FileRecord::new("a", "foo.txt")]);

    assert_eq!(
        harness.identity.calls(),
        vec![IdentityCall::Subscribe, IdentityCall::SignInAnonymously]
    );
    assert_eq!(
        harness.store.calls(),
        vec![FileStoreCall::List {
            token: "anon-token-1".to_string(),
            page: 0,
        }]
    );
    assert_eq!(harness.state.files, vec![FileRecord::new("a", "foo.txt")]);
    assert_eq!(harness.labels(), ("Anonymous".to_string(), "(log in)"));
}

#[test]
fn google_login_merges_before_refreshing() {
    let identity = MemoryIdentityService::default().with_google_account(ada());
    let mut harness = Harness::new(identity, MemoryFileStore::default(), 20).boot();
    harness.dispatch(SessionAction::FilesPicked {
        files: vec![text_file("notes.txt")],
    });

    harness.dispatch(SessionAction::SignInOrOut);

    let calls = harness.store.calls();
    assert_eq!(
        calls[2..].to_vec(),
        vec![
            FileStoreCall::Merge {
                from: "anon-token-1".to_string(),
                to: "g-token".to_string(),
            },
            FileStoreCall::List {
                token: "g-token".to_string(),
                page: 0,
            },
        ]
    );
    assert_eq!(
        calls
            .iter()
            .filter(|call| matches!(call, FileStoreCall::Merge { .. }))
            .count(),
        1
    );
    assert_eq!(harness.file_names(), vec!["notes.txt"]);
    assert_eq!(harness.labels(), ("Ada".to_string(), "(log out)"));
}

#[test]
fn sign_out_starts_a_fresh_anonymous_session_without_merging() {
    let identity = MemoryIdentityService::default().with_google_account(ada());
    let mut harness = Harness::new(identity, MemoryFileStore::default(), 20).boot();
    harness.dispatch(SessionAction::SignInOrOut);
    harness.dispatch(SessionAction::SignInOrOut);

    assert_eq!(
        harness.identity.calls(),
        vec![
            IdentityCall::Subscribe,
            IdentityCall::SignInAnonymously,
            IdentityCall::SignInWithGoogle,
            IdentityCall::SignOut,
            IdentityCall::SignInAnonymously,
        ]
    );
    assert_eq!(harness.state.uid(), Some("anon-2"));
    assert_eq!(
        harness.store.calls().last(),
        Some(&FileStoreCall::List {
            token: "anon-token-2".to_string(),
            page: 0,
        })
    );
    assert_eq!(
        harness
            .store
            .calls()
            .iter()
            .filter(|call| matches!(call, FileStoreCall::Merge { .. }))
            .count(),
        1
    );
    assert_eq!(harness.labels(), ("Anonymous".to_string(), "(log in)"));
}

#[test]
fn closed_popup_keeps_the_anonymous_session_and_reports() {
    let mut harness = booted_with(Vec::new());
    harness.dispatch(SessionAction::SignInOrOut);

    assert_eq!(harness.state.uid(), Some("anon-1"));
    assert!(harness
        .state
        .last_error
        .as_deref()
        .is_some_and(|msg| msg.starts_with("Sign-in failed")));

    harness.dispatch(SessionAction::DismissError);
    assert_eq!(harness.state.last_error, None);
}

#[test]
fn picked_files_upload_sequentially_and_prepend_in_completion_order() {
    let mut harness = booted_with(vec![FileRecord::new("a", "foo.txt")]);
    harness.dispatch(SessionAction::FilesPicked {
        files: vec![text_file("one.txt"), text_file("two.txt"), text_file("three.txt")],
    });

    let uploads: Vec<_> = harness
        .store
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            FileStoreCall::Upload { name, .. } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(uploads, vec!["one.txt", "two.txt", "three.txt"]);
    assert_eq!(
        harness.file_names(),
        vec!["three.txt", "two.txt", "one.txt", "foo.txt"]
    );
    assert!(harness.state.uploads.is_idle());
}

#[test]
fn failed_upload_is_reported_and_the_queue_continues() {
    let mut harness = booted_with(vec![FileRecord::new("a", "foo.txt")]);
    harness.store.fail_next(ServiceError::Status { status: 500 });
    harness.dispatch(SessionAction::FilesPicked {
        files: vec![text_file("broken.txt"), text_file("fine.txt")],
    });

    assert_eq!(harness.file_names(), vec!["fine.txt", "foo.txt"]);
    assert!(harness
        .state
        .last_error
        .as_deref()
        .is_some_and(|msg| msg.contains("500")));
}

#[test]
fn deleting_a_file_removes_exactly_that_record() {
    let mut harness = booted_with(vec![FileRecord::new("a", "foo.txt")]);
    harness.dispatch(SessionAction::DeleteRequested {
        file_id: "a".to_string(),
    });

    assert_eq!(
        harness.store.calls().last(),
        Some(&FileStoreCall::Delete {
            token: "anon-token-1".to_string(),
            file_id: "a".to_string(),
        })
    );
    assert!(harness.state.files.is_empty());
    assert!(harness.state.pending_deletes.is_empty());
}

#[test]
fn upload_into_an_existing_list_prepends_the_backend_record() {
    let mut harness = booted_with(vec![FileRecord::new("a", "foo.txt")]);
    harness.dispatch(SessionAction::FilesPicked {
        files: vec![text_file("bar.txt")],
    });

    let ids: Vec<_> = harness.state.files.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["file-1", "a"]);
    assert_eq!(harness.state.files[0].size, Some(7));
}

#[test]
fn load_more_walks_the_remaining_pages() {
    let store = MemoryFileStore::default().with_page_size(2);
    store.seed(
        "anon-token-1",
        vec![
            FileRecord::new("c", "3.txt"),
            FileRecord::new("b", "2.txt"),
            FileRecord::new("a", "1.txt"),
        ],
    );
    let mut harness = Harness::new(MemoryIdentityService::default(), store, 2).boot();
    assert_eq!(harness.file_names(), vec!["3.txt", "2.txt"]);
    assert!(harness.state.listing.has_more);

    harness.dispatch(SessionAction::LoadMoreRequested);
    assert_eq!(harness.file_names(), vec!["3.txt", "2.txt", "1.txt"]);
    assert!(!harness.state.listing.has_more);

    harness.dispatch(SessionAction::LoadMoreRequested);
    assert_eq!(
        harness
            .store
            .calls()
            .iter()
            .filter(|call| matches!(call, FileStoreCall::List { .. }))
            .count(),
        2
    );
}

#[test]
fn load_more_after_a_delete_still_reaches_every_record() {
    let store = MemoryFileStore::default().with_page_size(2);
    store.seed(
        "anon-token-1",
        vec![
            FileRecord::new("c", "3.txt"),
            FileRecord::new("b", "2.txt"),
            FileRecord::new("a", "1.txt"),
        ],
    );
    let mut harness = Harness::new(MemoryIdentityService::default(), store, 2).boot();
    harness.dispatch(SessionAction::DeleteRequested {
        file_id: "c".to_string(),
    });
    assert_eq!(harness.file_names(), vec!["2.txt"]);

    harness.dispatch(SessionAction::LoadMoreRequested);
    assert_eq!(harness.file_names(), vec!["2.txt", "1.txt"]);
    assert_eq!(harness.state.files, harness.store.files_for("anon-token-1"));

    harness.dispatch(SessionAction::LoadMoreRequested);
    assert_eq!(harness.file_names(), vec!["2.txt", "1.txt"]);
    assert!(!harness.state.listing.has_more);
}

#[test]
fn load_more_after_uploads_skips_records_already_shown() {
    let store = MemoryFileStore::default().with_page_size(2);
    store.seed(
        "anon-token-1",
        vec![
            FileRecord::new("c", "3.txt"),
            FileRecord::new("b", "2.txt"),
            FileRecord::new("a", "1.txt"),
        ],
    );
    let mut harness = Harness::new(MemoryIdentityService::default(), store, 2).boot();
    harness.dispatch(SessionAction::FilesPicked {
        files: vec![text_file("new.txt")],
    });
    harness.dispatch(SessionAction::LoadMoreRequested);

    assert_eq!(
        harness.file_names(),
        vec!["new.txt", "3.txt", "2.txt", "1.txt"]
    );
}

#[test]
fn refreshed_tokens_are_sent_with_later_requests() {
    let mut harness = booted_with(vec![FileRecord::new("a", "foo.txt")]);
    harness.identity.refresh_token("anon-token-1b");
    harness.settle();
    harness.dispatch(SessionAction::FilesPicked {
        files: vec![text_file("late.txt")],
    });

    assert_eq!(
        harness.store.calls(),
        vec![
            FileStoreCall::List {
                token: "anon-token-1".to_string(),
                page: 0,
            },
            FileStoreCall::Upload {
                token: "anon-token-1b".to_string(),
                name: "late.txt".to_string(),
            },
        ]
    );
    assert_eq!(harness.file_names(), vec!["late.txt", "foo.txt"]);
}
