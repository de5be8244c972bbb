use platform_host_web::selected_files;
use web_sys::HtmlInputElement;

use super::*;
use crate::model::UploadZoneEvent;

fn upload_label(remaining: usize) -> String {
    match remaining {
        0 => "Drop files here or click to upload".to_string(),
        1 => "Uploading 1 file...".to_string(),
        n => format!("Uploading {n} files..."),
    }
}

#[component]
pub(super) fn UploadZone() -> impl IntoView {
    let runtime = use_files_runtime();
    let active = create_memo(move |_| runtime.interaction.get().upload_zone_active);
    let remaining = create_memo(move |_| runtime.state.get().uploads.remaining());
    let zone = move |event: UploadZoneEvent| {
        runtime.dispatch_action(SessionAction::UploadZone(event));
    };

    let on_change = move |ev: ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        match selected_files(&input) {
            Ok(files) if files.is_empty() => {}
            Ok(files) => runtime.dispatch_action(SessionAction::FilesPicked { files }),
            Err(err) => {
                logging::warn!("reading picked files failed: {err}");
                runtime.dispatch_action(SessionAction::ReportError {
                    message: format!("Could not read the selected files: {err}"),
                });
            }
        }
        // Allow picking the same file again; queued payloads keep their own handles.
        input.set_value("");
    };

    view! {
        <section class="upload-zone">
            <label
                id="upload-label"
                for="upload"
                class="upload-label"
                class:active=move || active.get()
            >
                {move || upload_label(remaining.get())}
            </label>
            <input
                id="upload"
                type="file"
                multiple=true
                on:mouseenter=move |_| zone(UploadZoneEvent::MouseEnter)
                on:dragenter=move |_| zone(UploadZoneEvent::DragEnter)
                on:focus=move |_| zone(UploadZoneEvent::Focus)
                on:click=move |_| zone(UploadZoneEvent::Click)
                on:mouseleave=move |_| zone(UploadZoneEvent::MouseLeave)
                on:dragleave=move |_| zone(UploadZoneEvent::DragLeave)
                on:blur=move |_| zone(UploadZoneEvent::Blur)
                on:drop=move |_| zone(UploadZoneEvent::Drop)
                on:change=on_change
            />
        </section>
    }
}
