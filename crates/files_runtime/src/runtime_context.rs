//! Runtime provider and context wiring for the file box.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, and the identity
//! subscription bootstrap. UI composition stays in [`crate::components`].

use leptos::*;
use platform_host::HostServices;

use crate::{
    effect_executor,
    host::FilesHostContext,
    model::{InteractionState, SessionState},
    reducer::{reduce_session, RuntimeEffect, SessionAction},
};

#[derive(Clone, Copy)]
/// Leptos context for reading session state and dispatching [`SessionAction`] values.
pub struct FilesRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<FilesHostContext>,
    /// Reactive session state signal.
    pub state: RwSignal<SessionState>,
    /// Reactive upload-zone interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<SessionAction>,
}

impl FilesRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: SessionAction) {
        self.dispatch.call(action);
    }
}

#[component]
/// Provides [`FilesRuntimeContext`] to descendant components and subscribes to identity changes.
pub fn FilesProvider(
    /// Injected browser host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let page_size = host_services.config.page_size;
    let host = store_value(FilesHostContext::new(host_services));
    let state = create_rw_signal(SessionState::new(page_size));
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: SessionAction| {
        let mut session = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_session = session.clone();
        let previous_ui = ui.clone();

        match reduce_session(&mut session, &mut ui, action) {
            Ok(new_effects) => {
                if session != previous_session {
                    state.set(session);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("session reducer error: {err}"),
        }
    });

    let runtime = FilesRuntimeContext {
        host,
        state,
        interaction,
        effects,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    runtime.host.get_value().install_identity_subscription(dispatch);

    children().into_view()
}

/// Returns the current [`FilesRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`FilesProvider`].
pub fn use_files_runtime() -> FilesRuntimeContext {
    use_context::<FilesRuntimeContext>().expect("FilesRuntimeContext not provided")
}
