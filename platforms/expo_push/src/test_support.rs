//! In-memory transport for exercising the client without a network.

use std::sync::Mutex;

use async_trait::async_trait;
use common::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use serde_json::Value;

#[derive(Debug)]
enum Reply {
    Respond(HttpResponse),
    Fail(String),
    Hang,
}

/// Records every request it sees and answers each one the same way.
#[derive(Debug)]
pub(crate) struct ScriptedTransport {
    reply: Reply,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(response: HttpResponse) -> Self {
        Self::with_reply(Reply::Respond(response))
    }

    pub(crate) fn json(status: u16, body: Value) -> Self {
        Self::respond(HttpResponse::new(status, serde_json::to_vec(&body).unwrap()))
    }

    pub(crate) fn fail(message: &str) -> Self {
        Self::with_reply(Reply::Fail(message.to_string()))
    }

    /// Never answers.
    pub(crate) fn hang() -> Self {
        Self::with_reply(Reply::Hang)
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(message) => Err(TransportError::NetworkError(message.clone())),
            Reply::Hang => std::future::pending().await,
        }
    }
}
