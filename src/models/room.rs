use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of chat a room hosts. Serialized with the lobby form values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatType {
    #[serde(rename = "msgChat")]
    Message,
    #[serde(rename = "rtcChat")]
    RealtimeAudioVideo,
}

impl ChatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatType::Message => "msgChat",
            ChatType::RealtimeAudioVideo => "rtcChat",
        }
    }

    /// Human label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            ChatType::Message => "Message chat",
            ChatType::RealtimeAudioVideo => "Video chat",
        }
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ChatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "msgChat" | "message" => Ok(ChatType::Message),
            "rtcChat" | "realtime-audio-video" => Ok(ChatType::RealtimeAudioVideo),
            other => Err(format!("unknown chat type '{}'", other)),
        }
    }
}

/// Room as persisted by the store. Password material never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_id: String,
    pub room_name: String,
    pub pwd_hash: String,
    pub pwd_salt: String,
    pub chat_type: ChatType,
    pub max_user_cnt: u32,
    pub secret_chk: bool,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(
        room_name: String,
        pwd_hash: String,
        pwd_salt: String,
        chat_type: ChatType,
        max_user_cnt: u32,
        secret_chk: bool,
    ) -> Self {
        Self {
            room_id: uuid::Uuid::new_v4().to_string(),
            room_name,
            pwd_hash,
            pwd_salt,
            chat_type,
            max_user_cnt,
            secret_chk,
            created_at: Utc::now(),
        }
    }

    /// Whether one more user fits given the current occupancy.
    pub fn has_space(&self, user_count: usize) -> bool {
        user_count < self.max_user_cnt as usize
    }

    pub fn summary(&self, user_count: usize) -> RoomSummary {
        RoomSummary {
            room_id: self.room_id.clone(),
            room_name: self.room_name.clone(),
            chat_type: self.chat_type,
            max_user_cnt: self.max_user_cnt,
            user_count,
            secret_chk: self.secret_chk,
            created_at: self.created_at,
        }
    }
}

/// Room information returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room_id: String,
    pub room_name: String,
    pub chat_type: ChatType,
    pub max_user_cnt: u32,
    pub user_count: usize,
    pub secret_chk: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to create a room, as sent by the lobby form.
///
/// `maxUserCnt` is accepted as a JSON string or number so the server can
/// run the same validation rules as the client on raw input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub room_pwd: String,
    #[serde(default)]
    pub secret_chk: bool,
    #[serde(default)]
    pub chat_type: Option<ChatType>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub max_user_cnt: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "maxUserCnt must be a string or number, got {}",
            other
        ))),
    }
}

/// Password confirmation body for `/chat/confirmPwd/{roomId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPasswordRequest {
    pub room_pwd: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomIdQuery {
    pub room_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateNameQuery {
    pub room_id: String,
    pub username: String,
}
