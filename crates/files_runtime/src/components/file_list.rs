use platform_host::FileRecord;

use super::*;

const SIZE_UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Human-readable byte count, one decimal above a kilobyte.
pub(super) fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", SIZE_UNITS[unit])
}

#[component]
pub(super) fn FileList() -> impl IntoView {
    let runtime = use_files_runtime();
    let state = runtime.state;
    let loading = create_memo(move |_| state.get().listing.loading);
    let has_more = create_memo(move |_| state.get().listing.has_more);

    view! {
        <div class="file-list">
            <div id="files" class="files">
                <For each=move || state.get().files key=|file| file.id.clone() let:file>
                    <FileRow file=file />
                </For>
            </div>
            <Show when=move || loading.get()>
                <p class="files-loading">"Loading..."</p>
            </Show>
            <Show when=move || has_more.get() && !loading.get()>
                <button
                    type="button"
                    class="load-more"
                    on:click=move |_| runtime.dispatch_action(SessionAction::LoadMoreRequested)
                >
                    "Load more"
                </button>
            </Show>
        </div>
    }
}

#[component]
fn FileRow(file: FileRecord) -> impl IntoView {
    let runtime = use_files_runtime();
    let href = runtime.host.get_value().download_url(&file.id);
    let size = file.size.map(format_size);
    let pending = {
        let file_id = file.id.clone();
        create_memo(move |_| runtime.state.with(|state| state.is_delete_pending(&file_id)))
    };
    let file_id = file.id;

    view! {
        <div class="file-row" class:pending=move || pending.get()>
            <a href=href class="name" target="_blank" rel="noopener">
                {file.name}
            </a>
            {size.map(|size| view! { <span class="size">{size}</span> })}
            <button
                type="button"
                class="delete"
                title="Delete"
                disabled=move || pending.get()
                on:click=move |_| {
                    runtime
                        .dispatch_action(SessionAction::DeleteRequested {
                            file_id: file_id.clone(),
                        })
                }
            >
                <svg
                    fill="currentColor"
                    width="24"
                    height="24"
                    viewBox="0 0 24 24"
                    xmlns="http://www.w3.org/2000/svg"
                >
                    <path
                        fill-rule="nonzero"
                        d="m4.015 5.494h-.253c-.413 0-.747-.335-.747-.747s.334-.747.747-.747h5.253v-1c0-.535.474-1 1-1h4c.526 0 1 .465 1 1v1h5.254c.412 0 .746.335.746.747s-.334.747-.746.747h-.254v15.435c0 .591-.448 1.071-1 1.071-2.873 0-11.127 0-14 0-.552 0-1-.48-1-1.071zm14.5 0h-13v15.006h13zm-4.25 2.506c-.414 0-.75.336-.75.75v8.5c0 .414.336.75.75.75s.75-.336.75-.75v-8.5c0-.414-.336-.75-.75-.75zm-4.5 0c-.414 0-.75.336-.75.75v8.5c0 .414.336.75.75.75s.75-.336.75-.75v-8.5c0-.414-.336-.75-.75-.75zm3.75-4v-.5h-3v.5z"
                    ></path>
                </svg>
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_rendered_with_binary_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024_u64.pow(5)), "3072.0 TB");
    }
}
