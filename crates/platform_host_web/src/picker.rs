//! Collecting user-picked files out of an `<input type="file">` element.

use platform_host::{ServiceError, UploadFile};
use web_sys::HtmlInputElement;

/// Returns every file currently selected in `input`, in the order the browser lists them.
///
/// Each payload keeps the browser `File` handle; contents are streamed by the browser when the
/// upload request is sent.
///
/// # Errors
///
/// Returns [`ServiceError::Unsupported`] outside the browser.
pub fn selected_files(input: &HtmlInputElement) -> Result<Vec<UploadFile>, ServiceError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let Some(list) = input.files() else {
            return Ok(Vec::new());
        };
        Ok((0..list.length())
            .filter_map(|index| list.get(index))
            .map(|file| {
                UploadFile::from_blob(
                    file.name(),
                    file.type_(),
                    file.size() as u64,
                    file.unchecked_into::<js_sys::Object>(),
                )
            })
            .collect())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = input;
        Err(ServiceError::Unsupported("file selection"))
    }
}
