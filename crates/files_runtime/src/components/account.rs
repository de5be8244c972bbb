use super::*;

#[component]
pub(super) fn AccountBadge() -> impl IntoView {
    let runtime = use_files_runtime();
    let account = create_memo(move |_| runtime.state.get().account);

    view! {
        <div class="account">
            <span id="name" class="name">
                {move || account.get().map(|labels| labels.name).unwrap_or_default()}
            </span>
            <button
                id="subtext"
                type="button"
                class="subtext"
                disabled=move || account.get().is_none()
                on:click=move |_| runtime.dispatch_action(SessionAction::SignInOrOut)
            >
                {move || account.get().map(|labels| labels.subtext).unwrap_or_default()}
            </button>
        </div>
    }
}
