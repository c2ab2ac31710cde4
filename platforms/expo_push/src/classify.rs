use std::fmt;

use serde_json::Value;

use crate::PushTicket;

/// The push token is no longer valid; stop sending to it.
pub const ERROR_DEVICE_NOT_REGISTERED: &str = "DeviceNotRegistered";
/// The payload exceeded 4096 bytes.
pub const ERROR_MESSAGE_TOO_BIG: &str = "MessageTooBig";
/// Messages are being sent to the device too often; back off before retrying.
pub const ERROR_MESSAGE_RATE_EXCEEDED: &str = "MessageRateExceeded";
/// FCM or APNs answered with an error of its own.
pub const ERROR_PROVIDER_ERROR: &str = "ProviderError";
/// The FCM credentials do not match the sender of the token.
pub const ERROR_MISMATCH_SENDER_ID: &str = "MismatchSenderId";
/// The push credentials of the standalone app are invalid.
pub const ERROR_INVALID_CREDENTIALS: &str = "InvalidCredentials";

/// Failure category of a ticket, without the borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryErrorKind {
    DeviceNotRegistered,
    MessageTooBig,
    MessageRateExceeded,
    ProviderError,
    MismatchSenderId,
    InvalidCredentials,
    Unspecified,
}

impl DeliveryErrorKind {
    /// Map a `details.error` value; anything unknown is [`Self::Unspecified`].
    pub fn from_detail(detail: &str) -> Self {
        match detail {
            ERROR_DEVICE_NOT_REGISTERED => Self::DeviceNotRegistered,
            ERROR_MESSAGE_TOO_BIG => Self::MessageTooBig,
            ERROR_MESSAGE_RATE_EXCEEDED => Self::MessageRateExceeded,
            ERROR_PROVIDER_ERROR => Self::ProviderError,
            ERROR_MISMATCH_SENDER_ID => Self::MismatchSenderId,
            ERROR_INVALID_CREDENTIALS => Self::InvalidCredentials,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeviceNotRegistered => ERROR_DEVICE_NOT_REGISTERED,
            Self::MessageTooBig => ERROR_MESSAGE_TOO_BIG,
            Self::MessageRateExceeded => ERROR_MESSAGE_RATE_EXCEEDED,
            Self::ProviderError => ERROR_PROVIDER_ERROR,
            Self::MismatchSenderId => ERROR_MISMATCH_SENDER_ID,
            Self::InvalidCredentials => ERROR_INVALID_CREDENTIALS,
            Self::Unspecified => "Unspecified",
        }
    }
}

/// A failed ticket, classified. Every variant borrows the ticket it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeliveryError<'a> {
    DeviceNotRegistered(&'a PushTicket),
    MessageTooBig(&'a PushTicket),
    MessageRateExceeded(&'a PushTicket),
    ProviderError(&'a PushTicket),
    MismatchSenderId(&'a PushTicket),
    InvalidCredentials(&'a PushTicket),
    Unspecified(&'a PushTicket),
}

impl<'a> DeliveryError<'a> {
    pub fn new(kind: DeliveryErrorKind, ticket: &'a PushTicket) -> Self {
        match kind {
            DeliveryErrorKind::DeviceNotRegistered => Self::DeviceNotRegistered(ticket),
            DeliveryErrorKind::MessageTooBig => Self::MessageTooBig(ticket),
            DeliveryErrorKind::MessageRateExceeded => Self::MessageRateExceeded(ticket),
            DeliveryErrorKind::ProviderError => Self::ProviderError(ticket),
            DeliveryErrorKind::MismatchSenderId => Self::MismatchSenderId(ticket),
            DeliveryErrorKind::InvalidCredentials => Self::InvalidCredentials(ticket),
            DeliveryErrorKind::Unspecified => Self::Unspecified(ticket),
        }
    }

    pub fn kind(&self) -> DeliveryErrorKind {
        match self {
            Self::DeviceNotRegistered(_) => DeliveryErrorKind::DeviceNotRegistered,
            Self::MessageTooBig(_) => DeliveryErrorKind::MessageTooBig,
            Self::MessageRateExceeded(_) => DeliveryErrorKind::MessageRateExceeded,
            Self::ProviderError(_) => DeliveryErrorKind::ProviderError,
            Self::MismatchSenderId(_) => DeliveryErrorKind::MismatchSenderId,
            Self::InvalidCredentials(_) => DeliveryErrorKind::InvalidCredentials,
            Self::Unspecified(_) => DeliveryErrorKind::Unspecified,
        }
    }

    /// The ticket this error was derived from.
    pub fn ticket(&self) -> &'a PushTicket {
        match *self {
            Self::DeviceNotRegistered(ticket)
            | Self::MessageTooBig(ticket)
            | Self::MessageRateExceeded(ticket)
            | Self::ProviderError(ticket)
            | Self::MismatchSenderId(ticket)
            | Self::InvalidCredentials(ticket)
            | Self::Unspecified(ticket) => ticket,
        }
    }
}

impl fmt::Display for DeliveryError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = &self.ticket().message;
        if message.is_empty() {
            f.write_str("Unknown push response error")
        } else {
            f.write_str(message)
        }
    }
}

impl std::error::Error for DeliveryError<'_> {}

impl PushTicket {
    /// Classify this ticket. `Ok(())` for a delivered message.
    ///
    /// Callers should handle these errors; most of them need custom handling
    /// such as dropping the token or backing off.
    pub fn validate_response(&self) -> Result<(), DeliveryError<'_>> {
        if self.is_success() {
            return Ok(());
        }

        let kind = self
            .details
            .as_ref()
            .and_then(|details| details.get("error"))
            .and_then(Value::as_str)
            .map_or(DeliveryErrorKind::Unspecified, DeliveryErrorKind::from_detail);
        Err(DeliveryError::new(kind, self))
    }
}
