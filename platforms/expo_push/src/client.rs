use std::sync::{Arc, LazyLock};
use std::time::Duration;

use common::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::request::{build_request, send_endpoint};
use crate::response::reconcile;
use crate::{PushError, PushMessage, PushTicket, ReqwestTransport, validate};

/// Default Expo host.
pub const DEFAULT_HOST: &str = "https://exp.host";
/// Default path prefix for API requests.
pub const DEFAULT_BASE_API_URL: &str = "/--/api/v2";

static DEFAULT_TRANSPORT: LazyLock<Arc<dyn HttpTransport>> =
    LazyLock::new(|| Arc::new(ReqwestTransport::default()));

/// The process-wide transport used when a config does not name one.
pub fn default_transport() -> Arc<dyn HttpTransport> {
    Arc::clone(&*DEFAULT_TRANSPORT)
}

/// Optional overrides for [`PushClient`]. Unset or empty fields fall back to
/// the defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub host: Option<String>,
    pub api_url: Option<String>,
    pub access_token: Option<String>,
    pub transport: Option<Arc<dyn HttpTransport>>,
    /// Upper bound on a single exchange with the service.
    pub timeout: Option<Duration>,
}

/// Client for the Expo push API.
///
/// Configuration is fixed at construction, so one instance can serve any
/// number of concurrent publish calls.
/// See <https://docs.expo.dev/push-notifications/sending-notifications/>.
#[derive(Debug, Clone)]
pub struct PushClient {
    endpoint: String,
    access_token: Option<String>,
    transport: Arc<dyn HttpTransport>,
    timeout: Option<Duration>,
}

impl Default for PushClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl PushClient {
    pub fn new(config: ClientConfig) -> Self {
        let host = non_empty(config.host).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let api_url = non_empty(config.api_url).unwrap_or_else(|| DEFAULT_BASE_API_URL.to_string());

        Self {
            endpoint: send_endpoint(&host, &api_url),
            access_token: non_empty(config.access_token),
            transport: config.transport.unwrap_or_else(default_transport),
            timeout: config.timeout,
        }
    }

    /// The URL every batch is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a single message. One ticket comes back per recipient.
    pub async fn publish(&self, message: &PushMessage) -> Result<Vec<PushTicket>, PushError> {
        self.publish_multiple(std::slice::from_ref(message)).await
    }

    /// Send several messages in one request.
    ///
    /// Tickets are flattened across messages in submission order, each one
    /// carrying the single-recipient message it answers for. Per-recipient
    /// failures are not errors here; inspect each ticket with
    /// [`PushTicket::validate_response`].
    pub async fn publish_multiple(
        &self,
        messages: &[PushMessage],
    ) -> Result<Vec<PushTicket>, PushError> {
        self.publish_internal(messages, None).await
    }

    /// Like [`Self::publish_multiple`], but gives up as soon as `cancel` fires.
    pub async fn publish_multiple_with_cancel(
        &self,
        messages: &[PushMessage],
        cancel: &CancellationToken,
    ) -> Result<Vec<PushTicket>, PushError> {
        self.publish_internal(messages, Some(cancel)).await
    }

    async fn publish_internal(
        &self,
        messages: &[PushMessage],
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<PushTicket>, PushError> {
        let expected = validate(messages)?;
        if messages.is_empty() {
            return Ok(Vec::new());
        }

        let request = build_request(&self.endpoint, self.access_token.as_deref(), messages)?;
        debug!(
            "Sending {} message(s) for {} recipient(s) to {}",
            messages.len(),
            expected,
            self.endpoint
        );

        let response = self.send(request, cancel).await?;
        let tickets = reconcile(response, messages, expected)?;

        let failed = tickets.iter().filter(|ticket| !ticket.is_success()).count();
        info!("Push batch accepted: {} ticket(s), {} failed", tickets.len(), failed);
        Ok(tickets)
    }

    async fn send(
        &self,
        request: HttpRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponse, TransportError> {
        let exchange = self.exchange(request);
        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Push request to {} cancelled", self.endpoint);
                    Err(TransportError::Cancelled)
                }
                response = exchange => response,
            },
            None => exchange.await,
        }
    }

    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let call = self.transport.execute(request);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| TransportError::Timeout)?,
            None => call.await,
        }
    }
}
