/// Protocol-level failure categories shared by every endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedRequest,
    UnknownClient,
    InvalidClient,
    InvalidCode,
    ServerError,
}

/// A rejection with a machine-readable reason string.
pub trait Reason {
    fn kind(&self) -> ErrorKind;
    fn reason(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl<R: Reason> From<&R> for ErrorResponse {
    fn from(r: &R) -> Self {
        Self { error: r.reason() }
    }
}
