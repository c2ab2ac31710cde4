use crate::api::{ErrorResponse, PushRequest, PushResponse, TicketReport};
use crate::config::Settings;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, http::StatusCode, post, web};
use expo_push::{PushClient, PushError, TransportError};
use log::*;

mod api;
mod config;

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[post("/push")]
async fn push(req: web::Json<PushRequest>, client: web::Data<PushClient>) -> HttpResponse {
    let messages = req.into_inner().messages;
    info!("Received push request with {} message(s)", messages.len());

    match client.publish_multiple(&messages).await {
        Ok(tickets) => {
            let tickets: Vec<TicketReport> = tickets.into_iter().map(TicketReport::from).collect();
            let failed = tickets.iter().filter(|t| t.error.is_some()).count();
            if failed > 0 {
                warn!("{failed} of {} recipient(s) were not delivered", tickets.len());
            }
            HttpResponse::Ok().json(PushResponse { tickets })
        }
        Err(e) => {
            error!("Push request failed: {e}");
            HttpResponse::build(status_for(&e)).json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

fn status_for(error: &PushError) -> StatusCode {
    match error {
        PushError::Validation(_) => StatusCode::BAD_REQUEST,
        PushError::Transport(TransportError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
        PushError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PushError::Transport(_)
        | PushError::Status { .. }
        | PushError::Protocol(_)
        | PushError::Server(_) => StatusCode::BAD_GATEWAY,
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env()?;
    let client = PushClient::new(settings.client);
    info!("Publishing to {}", client.endpoint());

    let client_data = web::Data::new(client);

    info!("Listening on {}", settings.bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(client_data.clone())
            .service(health)
            .service(push)
    })
    .bind(&settings.bind_addr)?
    .run()
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use async_trait::async_trait;
    use expo_push::{ClientConfig, HttpRequest, HttpTransport};
    use serde_json::{Value, json};
    use std::sync::Arc;

    /// Answers every request with the same JSON body.
    #[derive(Debug)]
    struct CannedTransport {
        status: u16,
        body: Value,
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn execute(
            &self,
            _request: HttpRequest,
        ) -> Result<expo_push::HttpResponse, TransportError> {
            Ok(expo_push::HttpResponse::new(
                self.status,
                serde_json::to_vec(&self.body).unwrap(),
            ))
        }
    }

    fn client(status: u16, body: Value) -> web::Data<PushClient> {
        web::Data::new(PushClient::new(ClientConfig {
            transport: Some(Arc::new(CannedTransport { status, body })),
            ..Default::default()
        }))
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().service(health)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "ok");
    }

    #[actix_web::test]
    async fn test_push_reports_tickets() {
        let data = client(
            200,
            json!({"data": [
                {"status": "ok", "id": "a"},
                {"status": "error", "message": "too big", "details": {"error": "MessageTooBig"}}
            ]}),
        );
        let app = test::init_service(App::new().app_data(data).service(push)).await;

        let req = test::TestRequest::post()
            .uri("/push")
            .set_json(json!({"messages": [
                {"to": ["ExponentPushToken[a]", "ExponentPushToken[b]"], "body": "hello"}
            ]}))
            .to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        let tickets = resp["tickets"].as_array().unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0]["status"], "ok");
        assert!(tickets[0]["error"].is_null());
        assert_eq!(tickets[0]["pushMessage"]["to"], json!(["ExponentPushToken[a]"]));
        assert_eq!(tickets[1]["error"]["kind"], "MessageTooBig");
        assert_eq!(tickets[1]["error"]["message"], "too big");
        assert_eq!(tickets[1]["pushMessage"]["to"], json!(["ExponentPushToken[b]"]));
    }

    #[actix_web::test]
    async fn test_push_rejects_invalid_token() {
        let data = client(200, json!({"data": []}));
        let app = test::init_service(App::new().app_data(data).service(push)).await;

        let req = test::TestRequest::post()
            .uri("/push")
            .set_json(json!({"messages": [{"to": ["bogus"], "body": "hello"}]}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_push_maps_server_errors() {
        let data = client(200, json!({"errors": [{"code": "API_ERROR", "message": "bad"}]}));
        let app = test::init_service(App::new().app_data(data).service(push)).await;

        let req = test::TestRequest::post()
            .uri("/push")
            .set_json(json!({"messages": [{"to": ["ExponentPushToken[a]"], "body": "hello"}]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid server response");
    }
}
