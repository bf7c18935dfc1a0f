//! Database row types — these map directly to the Postgres tables.
//! The applier itself never reads or writes rows; these exist for
//! consumers of the schema and for the integration tests that
//! exercise its constraints.

use chrono::{DateTime, Utc};
use tokio_postgres::Row;
use uuid::Uuid;

pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct HuddleRow {
    pub id: Uuid,
    pub host_id: Uuid,
    pub title: String,
    pub is_private: bool,
    pub join_code: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct ParticipantRow {
    pub id: Uuid,
    pub huddle_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
    pub is_muted: bool,
    pub is_camera_on: bool,
}

pub struct ChatMessageRow {
    pub id: Uuid,
    pub huddle_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub message_type: String,
    pub content: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

pub struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub huddle_id: Option<Uuid>,
    pub notif_type: String,
    pub title: String,
    pub body: Option<String>,
    pub data: serde_json::Value,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            email: row.get("email"),
            display_name: row.get("display_name"),
            avatar_url: row.get("avatar_url"),
            password_hash: row.get("password_hash"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

impl HuddleRow {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            host_id: row.get("host_id"),
            title: row.get("title"),
            is_private: row.get("is_private"),
            join_code: row.get("join_code"),
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

impl ParticipantRow {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            huddle_id: row.get("huddle_id"),
            user_id: row.get("user_id"),
            role: row.get("role"),
            joined_at: row.get("joined_at"),
            left_at: row.get("left_at"),
            is_muted: row.get("is_muted"),
            is_camera_on: row.get("is_camera_on"),
        }
    }
}

impl ChatMessageRow {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            huddle_id: row.get("huddle_id"),
            sender_id: row.get("sender_id"),
            message_type: row.get("message_type"),
            content: row.get("content"),
            metadata: row.get("metadata"),
            created_at: row.get("created_at"),
        }
    }
}

impl NotificationRow {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            user_id: row.get("user_id"),
            huddle_id: row.get("huddle_id"),
            notif_type: row.get("notif_type"),
            title: row.get("title"),
            body: row.get("body"),
            data: row.get("data"),
            is_read: row.get("is_read"),
            read_at: row.get("read_at"),
            created_at: row.get("created_at"),
        }
    }
}
