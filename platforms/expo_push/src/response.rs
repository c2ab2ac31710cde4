use std::collections::HashMap;

use common::HttpResponse;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{PushError, PushMessage, PushServerError};

/// Ticket status value for a delivered message.
pub const SUCCESS_STATUS: &str = "ok";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Ok,
    Error,
}

/// The outcome for one (message, recipient) pair.
///
/// A failed ticket looks like
/// `{"status": "error", "message": "\"adsf\" is not a registered push notification recipient"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushTicket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: TicketStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
    /// The message this ticket answers for, narrowed to its one recipient.
    #[serde(
        rename = "pushMessage",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub push_message: Option<PushMessage>,
}

impl PushTicket {
    pub fn is_success(&self) -> bool {
        self.status == TicketStatus::Ok
    }

    /// The recipient this ticket belongs to, once reconciled.
    pub fn recipient(&self) -> Option<&str> {
        self.push_message
            .as_ref()
            .and_then(|message| message.to.first())
            .map(String::as_str)
    }
}

/// Top-level body of a send response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub data: Option<Vec<PushTicket>>,
    #[serde(default)]
    pub errors: Option<Vec<HashMap<String, String>>>,
}

pub(crate) fn check_status(response: &HttpResponse) -> Result<(), PushError> {
    if response.is_success() {
        return Ok(());
    }
    Err(PushError::Status {
        code: response.status,
        reason: response.reason.clone().unwrap_or_default(),
    })
}

/// Turn the raw response into one ticket per submitted recipient.
///
/// The service answers in submission order, flattened across messages, so
/// tickets are matched to recipients purely by position. A count mismatch
/// makes that matching meaningless and fails the whole batch.
pub(crate) fn reconcile(
    response: HttpResponse,
    messages: &[PushMessage],
    expected: usize,
) -> Result<Vec<PushTicket>, PushError> {
    check_status(&response)?;

    let decoded: SendResponse =
        serde_json::from_slice(&response.body).map_err(PushError::Protocol)?;

    // Request-level errors take precedence over any data sent with them.
    if let Some(errors) = decoded.errors.as_ref().filter(|errors| !errors.is_empty()) {
        warn!("Push service rejected the request: {errors:?}");
        let errors = errors.clone();
        return Err(PushServerError::new("Invalid server response", response, decoded, errors).into());
    }

    let Some(received) = decoded.data.as_ref().map(Vec::len) else {
        warn!("Push service response has no data field");
        return Err(PushServerError::new(
            "Invalid server response: missing data",
            response,
            decoded,
            Vec::new(),
        )
        .into());
    };

    if received != expected {
        let message = format!(
            "Mismatched response length. Expected {expected} receipts but only received {received}"
        );
        warn!("{message}");
        return Err(PushServerError::new(message, response, decoded, Vec::new()).into());
    }

    let mut tickets = decoded.data.unwrap_or_default();
    let recipients = messages
        .iter()
        .flat_map(|message| message.to.iter().map(move |to| message.for_recipient(to)));
    for (ticket, push_message) in tickets.iter_mut().zip(recipients) {
        ticket.push_message = Some(push_message);
    }
    Ok(tickets)
}
