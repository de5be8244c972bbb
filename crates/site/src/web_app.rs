use files_runtime::{FilesProvider, FilesShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host_web::{build_host_services, host_strategy_name};

use crate::config::site_config;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="bigbox" />
        <Meta name="description" content="Upload, list, and share your files." />

        <Router>
            <Routes>
                <Route path="" view=FilesEntry />
                <Route path="/*any" view=NotFound />
            </Routes>
        </Router>
    }
}

#[component]
fn FilesEntry() -> impl IntoView {
    match build_host_services(site_config()) {
        Ok(host_services) => {
            logging::log!("bigbox host strategy: {}", host_strategy_name());
            view! {
                <FilesProvider host_services=host_services>
                    <FilesShell />
                </FilesProvider>
            }
            .into_view()
        }
        Err(err) => {
            logging::warn!("host services unavailable: {err}");
            view! {
                <section class="startup-error" role="alert">
                    <h1>"bigbox is unavailable"</h1>
                    <p>{err.to_string()}</p>
                </section>
            }
            .into_view()
        }
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Not found"</h1>
            <A href="/">"Back to your files"</A>
        </section>
    }
}
