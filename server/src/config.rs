use std::env;
use std::time::Duration;

use anyhow::Context;
use expo_push::ClientConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8888";

/// 服务配置，从环境变量读取
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub client: ClientConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let timeout = lookup("EXPO_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("EXPO_TIMEOUT_SECS is not a number: {secs:?}"))
            })
            .transpose()?;

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            client: ClientConfig {
                host: lookup("EXPO_HOST"),
                api_url: lookup("EXPO_API_URL"),
                access_token: lookup("EXPO_ACCESS_TOKEN"),
                transport: None,
                timeout,
            },
        })
    }
}
