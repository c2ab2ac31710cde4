use expo_push::{PushMessage, PushTicket};
use serde::{Deserialize, Serialize};

/// 推送请求体
#[derive(Debug, Clone, Deserialize)]
pub struct PushRequest {
    /// 一次批量发送的消息
    pub messages: Vec<PushMessage>,
}

/// 推送响应体
#[derive(Debug, Clone, Serialize)]
pub struct PushResponse {
    /// 每个接收者一条结果，顺序与提交顺序一致
    pub tickets: Vec<TicketReport>,
}

/// 单个接收者的推送结果及其错误分类
#[derive(Debug, Clone, Serialize)]
pub struct TicketReport {
    #[serde(flatten)]
    pub ticket: PushTicket,
    pub error: Option<TicketError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketError {
    pub kind: &'static str,
    pub message: String,
}

impl From<PushTicket> for TicketReport {
    fn from(ticket: PushTicket) -> Self {
        let error = ticket.validate_response().err().map(|e| TicketError {
            kind: e.kind().as_str(),
            message: e.to_string(),
        });
        Self { ticket, error }
    }
}

/// 请求失败时的响应体
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
