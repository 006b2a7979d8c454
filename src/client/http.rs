use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::api::{ApiError, RoomApi};
use crate::error::ErrorBody;
use crate::models::{ConfirmPasswordRequest, CreateRoomRequest, RoomSummary};

/// [`RoomApi`] over HTTP
#[derive(Clone)]
pub struct HttpRoomApi {
    client: Client,
    base_url: String,
}

impl HttpRoomApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a success body, or turn the `{ code, message }` error body into
/// [`ApiError::Server`].
async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }

    let text = res.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ErrorBody>(&text).ok();
    tracing::debug!(status = status.as_u16(), body = %text, "Room service error");

    Err(ApiError::Server {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RoomApi for HttpRoomApi {
    async fn confirm_password(&self, room_id: &str, password: &str) -> Result<bool, ApiError> {
        let res = self
            .client
            .post(self.url(&format!("/chat/confirmPwd/{}", room_id)))
            .json(&ConfirmPasswordRequest {
                room_pwd: password.to_string(),
            })
            .send()
            .await?;
        read_json(res).await
    }

    async fn check_user_count(&self, room_id: &str) -> Result<bool, ApiError> {
        let res = self
            .client
            .get(self.url(&format!("/chat/chkUserCnt/{}", room_id)))
            .send()
            .await?;
        read_json(res).await
    }

    async fn delete_room(&self, room_id: &str) -> Result<(), ApiError> {
        let res = self
            .client
            .get(self.url(&format!("/chat/delRoom/{}", room_id)))
            .send()
            .await?;
        read_json::<bool>(res).await.map(|_| ())
    }

    async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomSummary, ApiError> {
        let res = self
            .client
            .post(self.url("/chat/createroom"))
            .json(request)
            .send()
            .await?;
        read_json(res).await
    }

    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, ApiError> {
        let res = self.client.get(self.url("/chat/rooms")).send().await?;
        read_json(res).await
    }
}
