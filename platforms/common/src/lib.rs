use async_trait::async_trait;

/// 传输层错误类型
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Request cancelled")]
    Cancelled,
}

/// 出站 HTTP 请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// 请求方法
    pub method: String,
    /// 完整的目标 URL
    pub url: String,
    /// 请求头，按添加顺序保存
    pub headers: Vec<(String, String)>,
    /// 请求体
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// 创建 POST 请求
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// 添加请求头
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// 按名称查找请求头（不区分大小写）
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// 入站 HTTP 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// 状态码
    pub status: u16,
    /// 状态描述，例如 "Not Found"
    pub reason: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: None,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// 状态码是否在 2xx 范围内
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// 响应体文本（非 UTF-8 字节会被替换）
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// HTTP 传输层trait
///
/// 实现必须可以被多个并发调用安全共享，不能在调用之间保存可变状态。
#[async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    /// 执行一次请求/响应交换
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
