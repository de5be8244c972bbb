//! File box UI composition: account badge, upload zone, and the keyed file list.

mod account;
mod file_list;
mod upload_zone;

use leptos::*;

use self::{account::AccountBadge, file_list::FileList, upload_zone::UploadZone};
use crate::{reducer::SessionAction, runtime_context::use_files_runtime};

#[component]
/// Top-level file box view. Must be rendered inside [`crate::FilesProvider`].
pub fn FilesShell() -> impl IntoView {
    let runtime = use_files_runtime();
    let last_error = create_memo(move |_| runtime.state.get().last_error);

    view! {
        <main class="bigbox">
            <header class="account-bar">
                <AccountBadge />
            </header>
            {move || {
                last_error
                    .get()
                    .map(|message| {
                        view! {
                            <div class="error-banner" role="alert">
                                <span class="error-message">{message}</span>
                                <button
                                    type="button"
                                    class="error-dismiss"
                                    on:click=move |_| runtime.dispatch_action(SessionAction::DismissError)
                                >
                                    "Dismiss"
                                </button>
                            </div>
                        }
                    })
            }}
            <UploadZone />
            <FileList />
        </main>
    }
}
