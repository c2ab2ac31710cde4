//! Expo push notification client.
//!
//! Batches [`PushMessage`]s into a single request to the Expo push service and
//! hands back one [`PushTicket`] per recipient, in submission order.

mod classify;
mod client;
mod error;
mod message;
mod request;
mod response;
mod token;
mod transport;
mod validate;

#[cfg(test)]
mod test_support;

pub use classify::*;
pub use client::*;
pub use error::*;
pub use message::*;
pub use response::*;
pub use token::*;
pub use transport::*;
pub use validate::validate;

pub use common::{HttpRequest, HttpResponse, HttpTransport, TransportError};
