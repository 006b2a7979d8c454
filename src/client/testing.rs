//! In-memory doubles for the lobby flow tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::api::{ApiError, RoomApi};
use super::ui::LobbyUi;
use crate::error::ErrorBody;
use crate::models::{CreateRoomRequest, RoomSummary};

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Server(u16, Option<ErrorBody>),
    Transport,
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Server(status, body) => Err(ApiError::Server {
                status: *status,
                body: body.clone(),
            }),
            Reply::Transport => Err(ApiError::Transport("connection refused".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ConfirmPassword(String, String),
    CheckUserCount(String),
    DeleteRoom(String),
    CreateRoom(String),
    ListRooms,
}

pub struct FakeRoomApi {
    confirm: Reply<bool>,
    space: Reply<bool>,
    delete: Reply<()>,
    create: Reply<RoomSummary>,
    rooms: Reply<Vec<RoomSummary>>,
    cancel_during_confirm: Option<CancellationToken>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRoomApi {
    pub fn new(confirm: Reply<bool>, space: Reply<bool>) -> Self {
        Self {
            confirm,
            space,
            delete: Reply::Ok(()),
            create: Reply::Transport,
            rooms: Reply::Ok(Vec::new()),
            cancel_during_confirm: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delete(mut self, delete: Reply<()>) -> Self {
        self.delete = delete;
        self
    }

    pub fn with_create(mut self, create: Reply<RoomSummary>) -> Self {
        self.create = create;
        self
    }

    /// Simulates the user closing the dialog while confirmation is in flight.
    pub fn cancel_during_confirm(mut self, token: CancellationToken) -> Self {
        self.cancel_during_confirm = Some(token);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RoomApi for FakeRoomApi {
    async fn confirm_password(&self, room_id: &str, password: &str) -> Result<bool, ApiError> {
        self.record(Call::ConfirmPassword(
            room_id.to_string(),
            password.to_string(),
        ));
        if let Some(token) = &self.cancel_during_confirm {
            token.cancel();
        }
        self.confirm.get()
    }

    async fn check_user_count(&self, room_id: &str) -> Result<bool, ApiError> {
        self.record(Call::CheckUserCount(room_id.to_string()));
        self.space.get()
    }

    async fn delete_room(&self, room_id: &str) -> Result<(), ApiError> {
        self.record(Call::DeleteRoom(room_id.to_string()));
        self.delete.get()
    }

    async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomSummary, ApiError> {
        self.record(Call::CreateRoom(request.room_name.clone()));
        self.create.get()
    }

    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, ApiError> {
        self.record(Call::ListRooms);
        self.rooms.get()
    }
}

#[derive(Default)]
pub struct RecordingUi {
    alerts: Mutex<Vec<String>>,
    navigations: Mutex<Vec<String>>,
}

impl RecordingUi {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

impl LobbyUi for RecordingUi {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn navigate(&self, location: &str) {
        self.navigations.lock().unwrap().push(location.to_string());
    }
}
