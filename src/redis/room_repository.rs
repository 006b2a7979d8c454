use async_trait::async_trait;
use deadpool_redis::Pool;
use redis::AsyncCommands;

use crate::error::{AppError, Result};
use crate::models::Room;
use crate::store::{Member, RoomStore};

const ROOM_INDEX_KEY: &str = "rooms:index";

/// Checks occupancy and inserts the member in one round trip.
/// KEYS[1] = members hash; ARGV = user_id, username, max_users, ttl
const ADD_MEMBER_IF_SPACE: &str = r#"
if redis.call('HLEN', KEYS[1]) >= tonumber(ARGV[3]) then
    return 0
end
redis.call('HSET', KEYS[1], ARGV[1], ARGV[2])
redis.call('EXPIRE', KEYS[1], ARGV[4])
return 1
"#;

fn room_key(room_id: &str) -> String {
    format!("room:{}", room_id)
}

fn members_key(room_id: &str) -> String {
    format!("room:{}:members", room_id)
}

/// Room repository for Redis operations
#[derive(Clone)]
pub struct RoomRepository {
    pool: Pool,
    ttl_seconds: u64,
}

impl RoomRepository {
    pub fn new(pool: Pool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }
}

#[async_trait]
impl RoomStore for RoomRepository {
    // ==================== Room Operations ====================

    async fn create_room(&self, room: &Room) -> Result<()> {
        let mut conn = self.pool.get().await?;
        let json = serde_json::to_string(room)?;

        redis::cmd("SETEX")
            .arg(room_key(&room.room_id))
            .arg(self.ttl_seconds as i64)
            .arg(&json)
            .query_async::<()>(&mut *conn)
            .await?;

        conn.zadd::<_, _, _, ()>(
            ROOM_INDEX_KEY,
            &room.room_id,
            room.created_at.timestamp_millis(),
        )
        .await?;

        tracing::info!(room_id = %room.room_id, "Room created");
        Ok(())
    }

    async fn get_room(&self, room_id: &str) -> Result<Option<Room>> {
        let mut conn = self.pool.get().await?;

        let json: Option<String> = conn.get(room_key(room_id)).await?;

        match json {
            Some(data) => {
                let room: Room = serde_json::from_str(&data)?;
                Ok(Some(room))
            }
            None => Ok(None),
        }
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        let mut conn = self.pool.get().await?;

        let ids: Vec<String> = conn.zrevrange(ROOM_INDEX_KEY, 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| room_key(id)).collect();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut *conn)
            .await?;

        let mut rooms = Vec::with_capacity(ids.len());
        let mut expired = Vec::new();
        for (id, value) in ids.into_iter().zip(values) {
            match value {
                Some(data) => rooms.push(serde_json::from_str::<Room>(&data)?),
                None => expired.push(id),
            }
        }

        // Rooms expire by TTL; drop their index entries lazily.
        if !expired.is_empty() {
            conn.zrem::<_, _, ()>(ROOM_INDEX_KEY, &expired).await?;
            tracing::debug!(count = expired.len(), "Pruned expired rooms from index");
        }

        Ok(rooms)
    }

    async fn delete_room(&self, room_id: &str) -> Result<()> {
        let mut conn = self.pool.get().await?;

        let keys = vec![room_key(room_id), members_key(room_id)];

        redis::cmd("DEL")
            .arg(&keys)
            .query_async::<()>(&mut *conn)
            .await?;
        conn.zrem::<_, _, ()>(ROOM_INDEX_KEY, room_id).await?;

        tracing::info!(room_id = %room_id, "Room deleted");
        Ok(())
    }

    // ==================== Member Operations ====================

    async fn add_member_if_space(
        &self,
        room_id: &str,
        member: &Member,
        max_users: u32,
    ) -> Result<bool> {
        let mut conn = self.pool.get().await?;

        let added: i64 = redis::Script::new(ADD_MEMBER_IF_SPACE)
            .key(members_key(room_id))
            .arg(&member.user_id)
            .arg(&member.username)
            .arg(max_users)
            .arg(self.ttl_seconds as i64)
            .invoke_async(&mut *conn)
            .await?;

        tracing::debug!(room_id = %room_id, user_id = %member.user_id, added, "Member add");
        Ok(added == 1)
    }

    async fn remove_member(&self, room_id: &str, user_id: &str) -> Result<Option<String>> {
        let mut conn = self.pool.get().await?;
        let key = members_key(room_id);

        let username: Option<String> = conn.hget(&key, user_id).await?;
        conn.hdel::<_, _, ()>(&key, user_id).await?;

        tracing::debug!(room_id = %room_id, user_id = %user_id, "Member removed");
        Ok(username)
    }

    async fn get_members(&self, room_id: &str) -> Result<Vec<Member>> {
        let mut conn = self.pool.get().await?;

        let data: Vec<(String, String)> = conn.hgetall(members_key(room_id)).await?;

        Ok(data
            .into_iter()
            .map(|(user_id, username)| Member { user_id, username })
            .collect())
    }

    async fn get_member_count(&self, room_id: &str) -> Result<usize> {
        let mut conn = self.pool.get().await?;

        let count: usize = conn.hlen(members_key(room_id)).await?;
        Ok(count)
    }

    // ==================== Health Check ====================

    async fn health_check(&self) -> Result<bool> {
        let mut conn = self.pool.get().await?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(pong == "PONG")
    }
}
