//! Error taxonomy shared by every host service contract.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure returned by identity and file-store services.
pub enum ServiceError {
    /// The request never produced an HTTP response (offline, CORS, aborted).
    #[error("network request failed: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The response body could not be decoded into the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The identity platform rejected a sign-in, sign-out, or subscription call.
    #[error("identity platform error: {0}")]
    Identity(String),
    /// The operation needs a browser host and the crate was built for another target.
    #[error("{0} is only available in the browser")]
    Unsupported(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_user_readable() {
        assert_eq!(
            ServiceError::Status { status: 404 }.to_string(),
            "server responded with status 404"
        );
        assert_eq!(
            ServiceError::Unsupported("file upload").to_string(),
            "file upload is only available in the browser"
        );
    }
}
