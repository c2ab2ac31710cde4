use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 消息优先级
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Default,
    Normal,
    High,
}

/// A push notification request, possibly addressed to several recipients.
///
/// Unset optionals are left out of the wire form entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    /// Expo push tokens this message goes to.
    #[serde(default)]
    pub to: Vec<String>,
    /// Text shown in the notification.
    #[serde(default)]
    pub body: String,
    /// JSON object delivered to the app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Seconds the message may be kept around for redelivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Unix timestamp after which the message is dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<u32>,
    /// Android notification channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Lets the app intercept the notification before display (iOS).
    #[serde(default, skip_serializing_if = "is_false")]
    pub mutable_content: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl PushMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    /// Add a recipient.
    pub fn to(mut self, token: impl Into<String>) -> Self {
        self.to.push(token.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Insert one key into the data payload.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn ttl(mut self, seconds: u32) -> Self {
        self.ttl = Some(seconds);
        self
    }

    pub fn expiration(mut self, timestamp: i64) -> Self {
        self.expiration = Some(timestamp);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn badge(mut self, badge: u32) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn mutable_content(mut self, mutable_content: bool) -> Self {
        self.mutable_content = mutable_content;
        self
    }

    /// A copy of this message narrowed to a single recipient.
    pub fn for_recipient(&self, recipient: &str) -> Self {
        Self {
            to: vec![recipient.to_string()],
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_wire_form() {
        let message = PushMessage::new("hello").to("ExponentPushToken[a]");
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value, json!({"to": ["ExponentPushToken[a]"], "body": "hello"}));
    }

    #[test]
    fn test_full_wire_form() {
        let message = PushMessage::new("hello")
            .to("ExponentPushToken[a]")
            .title("greeting")
            .data("order", 42)
            .sound("default")
            .ttl(60)
            .expiration(1_700_000_000)
            .priority(Priority::High)
            .badge(3)
            .channel_id("orders")
            .category_id("reply")
            .mutable_content(true);

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "to": ["ExponentPushToken[a]"],
                "body": "hello",
                "title": "greeting",
                "data": {"order": 42},
                "sound": "default",
                "ttl": 60,
                "expiration": 1_700_000_000,
                "priority": "high",
                "badge": 3,
                "channelId": "orders",
                "categoryId": "reply",
                "mutableContent": true
            })
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let message: PushMessage = serde_json::from_value(json!({"body": "hi"})).unwrap();
        assert!(message.to.is_empty());
        assert!(!message.mutable_content);
        assert_eq!(message.priority, None);

        let message: PushMessage =
            serde_json::from_value(json!({"to": ["ExponentPushToken[a]"], "priority": "normal"}))
                .unwrap();
        assert_eq!(message.priority, Some(Priority::Normal));
    }

    #[test]
    fn test_for_recipient() {
        let message = PushMessage::new("hello")
            .to("ExponentPushToken[a]")
            .to("ExponentPushToken[b]")
            .title("t");

        let single = message.for_recipient("ExponentPushToken[b]");
        assert_eq!(single.to, vec!["ExponentPushToken[b]".to_string()]);
        assert_eq!(single.title.as_deref(), Some("t"));
        assert_eq!(message.to.len(), 2);
    }
}
