//! Room creation rules shared by the lobby client and the server.
//!
//! Rules run in a fixed order and the first failing one wins:
//! name, name uniqueness, password, chat type, minimum capacity,
//! per-type maximum capacity, numeric capacity.

use crate::models::{ChatType, CreateRoomRequest};

/// Minimum participants in any room.
pub const MIN_USERS: u32 = 2;

/// Per chat type upper bound on participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityLimits {
    pub msg_chat: u32,
    pub rtc_chat: u32,
}

impl CapacityLimits {
    pub fn max_for(&self, chat_type: ChatType) -> u32 {
        match chat_type {
            ChatType::Message => self.msg_chat,
            ChatType::RealtimeAudioVideo => self.rtc_chat,
        }
    }
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self {
            msg_chat: 100,
            rtc_chat: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Room name is required")]
    NameRequired,

    #[error("A room with this name already exists")]
    DuplicateName,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Chat type is required")]
    ChatTypeRequired,

    #[error("A chat needs at least 2 participants")]
    TooFewUsers,

    #[error("{} allows at most {max} participants", .chat_type.label())]
    TooManyUsers { chat_type: ChatType, max: u32 },

    #[error("Participant count must be a number")]
    NotANumber,
}

/// Raw room form input, before any rule has run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomDraft {
    pub name: String,
    pub password: String,
    pub chat_type: Option<ChatType>,
    pub max_user_cnt: String,
    pub secret: bool,
}

impl From<CreateRoomRequest> for RoomDraft {
    fn from(req: CreateRoomRequest) -> Self {
        Self {
            name: req.room_name,
            password: req.room_pwd,
            chat_type: req.chat_type,
            max_user_cnt: req.max_user_cnt,
            secret: req.secret_chk,
        }
    }
}

/// A draft that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRoom {
    pub name: String,
    pub password: String,
    pub chat_type: ChatType,
    pub max_user_cnt: u32,
    pub secret: bool,
}

impl From<&ValidRoom> for CreateRoomRequest {
    fn from(room: &ValidRoom) -> Self {
        Self {
            room_name: room.name.clone(),
            room_pwd: room.password.clone(),
            secret_chk: room.secret,
            chat_type: Some(room.chat_type),
            max_user_cnt: room.max_user_cnt.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RoomCreationValidator {
    limits: CapacityLimits,
}

impl RoomCreationValidator {
    pub fn new(limits: CapacityLimits) -> Self {
        Self { limits }
    }

    /// Run every rule against `draft`. `existing_names` are the rooms the
    /// caller currently knows about; the client's list may be stale.
    pub fn validate<'a, I>(
        &self,
        draft: &RoomDraft,
        existing_names: I,
    ) -> Result<ValidRoom, ValidationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if draft.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if existing_names.into_iter().any(|name| name == draft.name) {
            return Err(ValidationError::DuplicateName);
        }
        if draft.password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        let chat_type = draft.chat_type.ok_or(ValidationError::ChatTypeRequired)?;

        // Range rules only see input that reads as a number at all;
        // everything else falls through to the digits rule.
        if let Some(count) = lenient_number(&draft.max_user_cnt) {
            if count < MIN_USERS as f64 {
                return Err(ValidationError::TooFewUsers);
            }
            let max = self.limits.max_for(chat_type);
            if count > max as f64 {
                return Err(ValidationError::TooManyUsers { chat_type, max });
            }
        }

        let max_user_cnt = strict_count(&draft.max_user_cnt)?;

        Ok(ValidRoom {
            name: draft.name.clone(),
            password: draft.password.clone(),
            chat_type,
            max_user_cnt,
            secret: draft.secret,
        })
    }
}

/// Loose numeric reading of form input, as a browser's `Number()` does.
/// Empty input reads as zero; `Infinity` and `0x`/`0o`/`0b` literals count.
fn lenient_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    match trimmed {
        "" => return Some(0.0),
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        });
    }

    // Rust also parses "inf" and "NaN", which a browser would not.
    if trimmed
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn strict_count(raw: &str) -> Result<u32, ValidationError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotANumber);
    }
    raw.parse().map_err(|_| ValidationError::NotANumber)
}
