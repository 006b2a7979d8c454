use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Enter,
    Talk,
    Leave,
}

/// Message relayed over the room chat socket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    pub room_id: String,
    pub sender: String,
    pub message: String,
    #[serde(default = "Utc::now")]
    pub time: DateTime<Utc>,
}

impl ChatMessage {
    pub fn enter(room_id: &str, sender: &str) -> Self {
        Self::system(MessageType::Enter, room_id, sender, "has entered.")
    }

    pub fn leave(room_id: &str, sender: &str) -> Self {
        Self::system(MessageType::Leave, room_id, sender, "has left.")
    }

    pub fn talk(room_id: &str, sender: &str, message: String) -> Self {
        Self {
            msg_type: MessageType::Talk,
            room_id: room_id.to_string(),
            sender: sender.to_string(),
            message,
            time: Utc::now(),
        }
    }

    fn system(msg_type: MessageType, room_id: &str, sender: &str, suffix: &str) -> Self {
        Self {
            msg_type,
            room_id: room_id.to_string(),
            sender: sender.to_string(),
            message: format!("{} {}", sender, suffix),
            time: Utc::now(),
        }
    }
}

/// Frame a client sends over the chat socket
#[derive(Debug, Clone, Deserialize)]
pub struct ChatInput {
    pub message: String,
}
