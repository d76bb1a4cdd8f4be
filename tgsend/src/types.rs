//! Result payloads returned by the bot API.
//!
//! Only the fields this crate reads are modelled; anything else in the response
//! is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// A message as returned by `sendAudio` and friends.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    /// Unix timestamp the message was sent at
    pub date: i64,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Set when the message can't be forwarded
    #[serde(default)]
    pub has_protected_content: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
    /// "private", "group", "supergroup" or "channel"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// An audio file stored on the platform's servers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Audio {
    pub file_id: String,
    pub file_unique_id: String,
    /// Duration in seconds as reported by the sender
    #[serde(default)]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_audio_deserializes() {
        let message: Message = serde_json::from_value(serde_json::json!({
            "message_id": 42,
            "date": 1700000000,
            "from": {"id": 1, "is_bot": true, "first_name": "Uploader", "username": "uploader_bot"},
            "chat": {"id": 123456789, "type": "private", "first_name": "Ada"},
            "has_protected_content": true,
            "audio": {
                "file_id": "CQACAgQAAxkDAAI",
                "file_unique_id": "AgADXQ",
                "duration": 3,
                "file_name": "sample.mp3",
                "mime_type": "audio/mpeg",
                "file_size": 10240
            },
            "forward_origin": {"ignored": true}
        }))
        .unwrap();

        assert_eq!(message.message_id, 42);
        assert_eq!(message.chat.kind, "private");
        assert!(message.has_protected_content);
        assert!(message.from.unwrap().is_bot);

        let audio = message.audio.unwrap();
        assert_eq!(audio.file_name.as_deref(), Some("sample.mp3"));
        assert_eq!(audio.file_size, Some(10240));
    }

    #[test]
    fn test_minimal_message_uses_defaults() {
        let message: Message = serde_json::from_str(
            r#"{"message_id":7,"date":0,"chat":{"id":-100123,"type":"channel","title":"Releases"}}"#,
        )
        .unwrap();

        assert!(!message.has_protected_content);
        assert!(message.audio.is_none());
        assert_eq!(message.chat.title.as_deref(), Some("Releases"));
    }

    #[test]
    fn test_message_serializes_chat_type_field() {
        let chat = Chat {
            id: 5,
            kind: "group".to_string(),
            title: None,
            username: None,
            first_name: None,
        };
        let value = serde_json::to_value(&chat).unwrap();
        assert_eq!(value, serde_json::json!({"id": 5, "type": "group"}));
    }
}
