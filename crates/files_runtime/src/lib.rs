//! Session runtime for the file box.
//!
//! [`reduce_session`] is a pure transition function over [`SessionState`]; the side effects it
//! emits are executed by [`execute_effect`] against the injected [`platform_host::HostServices`]
//! and fed back as completion actions. [`FilesProvider`] wires both into Leptos signals and
//! [`FilesShell`] renders the state.

pub mod components;
mod effect_executor;
pub mod effects;
pub mod host;
pub mod model;
pub mod reducer;
mod runtime_context;

pub use components::FilesShell;
pub use effects::execute_effect;
pub use model::*;
pub use reducer::{reduce_session, ReducerError, RuntimeEffect, SessionAction};
pub use runtime_context::{use_files_runtime, FilesProvider, FilesRuntimeContext};
