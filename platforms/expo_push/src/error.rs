use std::collections::HashMap;

use common::{HttpResponse, TransportError};

use crate::SendResponse;

/// 请求级错误类型
///
/// Any of these aborts the whole batch; no tickets are returned alongside
/// them. Per-recipient failures are reported through
/// [`PushTicket::validate_response`](crate::PushTicket::validate_response)
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid response ({code} {reason})")]
    Status { code: u16, reason: String },

    #[error("Protocol error: {0}")]
    Protocol(#[source] serde_json::Error),

    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Server(#[from] Box<PushServerError>),
}

/// Problems found in a batch before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No recipients in message {index}")]
    NoRecipients { index: usize },

    #[error("Invalid push token {token:?}, should start with ExponentPushToken")]
    MalformedToken { token: String },
}

/// The service answered, but not with something usable.
///
/// For example, invalid request arguments produce an `errors` array instead
/// of the per-recipient `data` array:
///
/// ```json
/// {"errors": [{"code": "API_ERROR", "message": "\"to\" must be a string"}]}
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct PushServerError {
    pub message: String,
    /// The raw HTTP response.
    pub response: HttpResponse,
    /// The decoded body.
    pub data: SendResponse,
    /// Request-level errors, empty unless the service sent some.
    pub errors: Vec<HashMap<String, String>>,
}

impl PushServerError {
    pub fn new(
        message: impl Into<String>,
        response: HttpResponse,
        data: SendResponse,
        errors: Vec<HashMap<String, String>>,
    ) -> Self {
        Self {
            message: message.into(),
            response,
            data,
            errors,
        }
    }
}

impl From<PushServerError> for PushError {
    fn from(err: PushServerError) -> Self {
        PushError::Server(Box::new(err))
    }
}
