use common::HttpRequest;
use log::debug;

use crate::{PushError, PushMessage};

/// `{host}{api_url}/push/send`
pub fn send_endpoint(host: &str, api_url: &str) -> String {
    format!("{host}{api_url}/push/send")
}

/// Serialize a validated batch into the single outbound request.
pub(crate) fn build_request(
    endpoint: &str,
    access_token: Option<&str>,
    messages: &[PushMessage],
) -> Result<HttpRequest, PushError> {
    let body = serde_json::to_vec(messages).map_err(PushError::Encode)?;
    debug!("Built push request for {} message(s), {} bytes", messages.len(), body.len());

    let mut request = HttpRequest::post(endpoint, body).header("Content-Type", "application/json");
    if let Some(token) = access_token {
        request = request.header("Authorization", format!("Bearer {token}"));
    }
    Ok(request)
}
