//! REST transport for the file-storage backend.

use platform_host::{FileRecord, LoginMergeRequest, ServiceError, UploadFile};

#[cfg(target_arch = "wasm32")]
mod imp {
    use gloo_net::http::{Request, Response};
    use js_sys::{Array, Uint8Array};
    use platform_host::{
        FileRecord, LoginMergeRequest, ServiceError, UploadFile, UploadSource, UPLOAD_FORM_FIELD,
    };
    use serde::de::DeserializeOwned;
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, FormData};

    use crate::bridge::interop::js_error_to_string;

    fn network(err: gloo_net::Error) -> ServiceError {
        ServiceError::Network(err.to_string())
    }

    fn ensure_success(response: &Response) -> Result<(), ServiceError> {
        if response.ok() {
            Ok(())
        } else {
            Err(ServiceError::Status {
                status: response.status(),
            })
        }
    }

    async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        ensure_success(&response)?;
        response
            .json::<T>()
            .await
            .map_err(|err| ServiceError::Decode(err.to_string()))
    }

    fn upload_form(file: &UploadFile) -> Result<FormData, ServiceError> {
        let js_err = |err| ServiceError::Decode(js_error_to_string(err));
        let blob = match &file.source {
            UploadSource::Blob(handle) => handle.clone().unchecked_into::<Blob>(),
            UploadSource::Bytes(bytes) => {
                let parts = Array::of1(&Uint8Array::from(bytes.as_ref()));
                let options = BlobPropertyBag::new();
                options.set_type(&file.mime_type);
                Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?
            }
        };
        let form = FormData::new().map_err(js_err)?;
        form.append_with_blob_and_filename(UPLOAD_FORM_FIELD, &blob, &file.name)
            .map_err(js_err)?;
        Ok(form)
    }

    pub async fn get_files(url: &str, token: &str) -> Result<Vec<FileRecord>, ServiceError> {
        let response = Request::get(url)
            .header("Authorization", token)
            .send()
            .await
            .map_err(network)?;
        decode_json(response).await
    }

    pub async fn post_file(
        url: &str,
        token: &str,
        file: &UploadFile,
    ) -> Result<FileRecord, ServiceError> {
        let form = upload_form(file)?;
        let response = Request::post(url)
            .header("Authorization", token)
            .body(form)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        decode_json(response).await
    }

    pub async fn delete_file(url: &str, token: &str) -> Result<(), ServiceError> {
        let response = Request::delete(url)
            .header("Authorization", token)
            .send()
            .await
            .map_err(network)?;
        ensure_success(&response)
    }

    pub async fn post_login(url: &str, body: &LoginMergeRequest) -> Result<(), ServiceError> {
        let response = Request::post(url)
            .json(body)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        ensure_success(&response)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use platform_host::{FileRecord, LoginMergeRequest, ServiceError, UploadFile};

    const UNSUPPORTED: ServiceError = ServiceError::Unsupported("the file-storage backend");

    pub async fn get_files(_url: &str, _token: &str) -> Result<Vec<FileRecord>, ServiceError> {
        Err(UNSUPPORTED)
    }

    pub async fn post_file(
        _url: &str,
        _token: &str,
        _file: &UploadFile,
    ) -> Result<FileRecord, ServiceError> {
        Err(UNSUPPORTED)
    }

    pub async fn delete_file(_url: &str, _token: &str) -> Result<(), ServiceError> {
        Err(UNSUPPORTED)
    }

    pub async fn post_login(_url: &str, _body: &LoginMergeRequest) -> Result<(), ServiceError> {
        Err(UNSUPPORTED)
    }
}

pub async fn get_files(url: &str, token: &str) -> Result<Vec<FileRecord>, ServiceError> {
    imp::get_files(url, token).await
}

pub async fn post_file(
    url: &str,
    token: &str,
    file: &UploadFile,
) -> Result<FileRecord, ServiceError> {
    imp::post_file(url, token, file).await
}

pub async fn delete_file(url: &str, token: &str) -> Result<(), ServiceError> {
    imp::delete_file(url, token).await
}

pub async fn post_login(url: &str, body: &LoginMergeRequest) -> Result<(), ServiceError> {
    imp::post_login(url, body).await
}
