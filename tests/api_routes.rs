//! Router tests against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use chat_lobby::api::create_router;
use chat_lobby::config::Config;
use chat_lobby::state::AppState;
use chat_lobby::store::{Member, MemoryRoomStore, RoomStore};

struct TestApp {
    router: Router,
    store: Arc<MemoryRoomStore>,
}

struct TestResponse {
    status: StatusCode,
    body: Value,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryRoomStore::new());
        let state = AppState::new(Config::default(), store.clone());
        Self {
            router: create_router(state),
            store,
        }
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body = body
            .map(|b| Body::from(b.to_string()))
            .unwrap_or_else(Body::empty);
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(body)
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Router call failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    async fn create_room(&self, name: &str, pwd: &str, max: u32) -> String {
        let res = self
            .request(
                "POST",
                "/chat/createroom",
                Some(json!({
                    "roomName": name,
                    "roomPwd": pwd,
                    "chatType": "msgChat",
                    "maxUserCnt": max.to_string(),
                })),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "create failed: {:?}", res.body);
        res.body["roomId"].as_str().expect("roomId").to_string()
    }

    async fn fill(&self, room_id: &str, n: usize) {
        for i in 0..n {
            let member = Member {
                user_id: format!("u{i}"),
                username: format!("user{i}"),
            };
            assert!(self
                .store
                .add_member_if_space(room_id, &member, u32::MAX)
                .await
                .unwrap());
        }
    }
}

#[tokio::test]
async fn test_create_and_list_rooms() {
    let app = TestApp::new();
    app.create_room("first", "pw", 10).await;
    app.create_room("second", "pw", 4).await;

    let res = app.request("GET", "/chat/rooms", None).await;
    assert_eq!(res.status, StatusCode::OK);

    let rooms = res.body.as_array().unwrap();
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0]["roomName"], "second");
    assert_eq!(rooms[1]["roomName"], "first");
    assert_eq!(rooms[0]["chatType"], "msgChat");
    assert_eq!(rooms[0]["userCount"], 0);
    assert!(rooms[0].get("pwdHash").is_none());
}

#[tokio::test]
async fn test_create_rejects_invalid_draft() {
    let app = TestApp::new();
    app.create_room("taken", "pw", 10).await;

    let cases = [
        (json!({"roomName": "", "roomPwd": "pw", "chatType": "msgChat", "maxUserCnt": "5"}),
         "Room name is required"),
        (json!({"roomName": "taken", "roomPwd": "pw", "chatType": "msgChat", "maxUserCnt": "5"}),
         "A room with this name already exists"),
        (json!({"roomName": "new", "roomPwd": "pw", "maxUserCnt": "5"}),
         "Chat type is required"),
        (json!({"roomName": "new", "roomPwd": "pw", "chatType": "rtcChat", "maxUserCnt": 7}),
         "Video chat allows at most 6 participants"),
        (json!({"roomName": "new", "roomPwd": "pw", "chatType": "msgChat", "maxUserCnt": "abc"}),
         "Participant count must be a number"),
    ];

    for (body, message) in cases {
        let res = app.request("POST", "/chat/createroom", Some(body)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "40001");
        assert_eq!(res.body["message"], message);
    }
}

#[tokio::test]
async fn test_confirm_password() {
    let app = TestApp::new();
    let room_id = app.create_room("locked", "open sesame", 10).await;
    let path = format!("/chat/confirmPwd/{room_id}");

    let res = app
        .request("POST", &path, Some(json!({"roomPwd": "open sesame"})))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!(true));

    let res = app
        .request("POST", &path, Some(json!({"roomPwd": "wrong"})))
        .await;
    assert_eq!(res.body, json!(false));

    let res = app
        .request("POST", "/chat/confirmPwd/missing", Some(json!({"roomPwd": "x"})))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "40400");
}

#[tokio::test]
async fn test_check_user_count() {
    let app = TestApp::new();
    let room_id = app.create_room("pair", "pw", 2).await;
    let path = format!("/chat/chkUserCnt/{room_id}");

    app.fill(&room_id, 1).await;
    assert_eq!(app.request("GET", &path, None).await.body, json!(true));

    app.fill(&room_id, 1).await;
    assert_eq!(app.request("GET", &path, None).await.body, json!(false));
}

#[tokio::test]
async fn test_delete_room() {
    let app = TestApp::new();
    let occupied = app.create_room("busy", "pw", 5).await;
    let empty = app.create_room("quiet", "pw", 5).await;
    app.fill(&occupied, 1).await;

    let res = app
        .request("GET", &format!("/chat/delRoom/{occupied}"), None)
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["code"], "40041");
    assert!(res.body["message"].as_str().unwrap().contains("cannot be deleted"));

    let res = app.request("GET", &format!("/chat/delRoom/{empty}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!(true));

    let res = app
        .request("GET", &format!("/chat/room?roomId={empty}"), None)
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_list_and_duplicate_name() {
    let app = TestApp::new();
    let room_id = app.create_room("names", "pw", 5).await;
    app.fill(&room_id, 2).await;

    let res = app
        .request("GET", &format!("/chat/userlist?roomId={room_id}"), None)
        .await;
    assert_eq!(res.body, json!(["user0", "user1"]));

    let res = app
        .request(
            "GET",
            &format!("/chat/duplicateName?roomId={room_id}&username=newbie"),
            None,
        )
        .await;
    assert_eq!(res.body, json!("newbie"));

    let res = app
        .request(
            "GET",
            &format!("/chat/duplicateName?roomId={room_id}&username=user0"),
            None,
        )
        .await;
    let renamed = res.body.as_str().unwrap();
    assert!(renamed.starts_with("user0") && renamed != "user0");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let res = app.request("GET", "/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "healthy");
    assert_eq!(res.body["store"], "connected");
}
