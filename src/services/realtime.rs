//! Real-time notification channels
//!
//! Notifications are pushed to a per-user channel keyed by the recipient's id.
//! Delivery is best effort: the notification service logs and drops publish
//! failures.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use uuid::Uuid;
use crate::models::NotificationEnvelope;
use crate::utils::errors::{CampusEventsError, Result};

/// Publisher half of the real-time transport
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, user_id: Uuid, payload: &NotificationEnvelope) -> Result<()>;
}

/// Publishes JSON payloads on `{prefix}notifications:{user_id}`
#[derive(Clone)]
pub struct RedisNotificationSink {
    connection: ConnectionManager,
    prefix: String,
}

impl RedisNotificationSink {
    pub async fn connect(url: &str, prefix: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self {
            connection,
            prefix: prefix.to_string(),
        })
    }

    pub fn channel_for(prefix: &str, user_id: Uuid) -> String {
        format!("{}notifications:{}", prefix, user_id)
    }

    /// Round-trip a PING to verify the connection
    pub async fn health_check(&self) -> Result<bool> {
        let mut conn = self.connection.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

#[async_trait]
impl NotificationSink for RedisNotificationSink {
    async fn publish(&self, user_id: Uuid, payload: &NotificationEnvelope) -> Result<()> {
        let channel = Self::channel_for(&self.prefix, user_id);
        let serialized = serde_json::to_string(payload)?;

        let mut conn = self.connection.clone();
        let receivers: i64 = conn.publish(&channel, serialized).await?;
        debug!(channel = %channel, receivers = receivers, "Published notification");
        Ok(())
    }
}

/// In-process per-user broadcast channels
///
/// A connection handler subscribes with the authenticated user's id and
/// forwards every received envelope to its client.
#[derive(Debug, Clone)]
pub struct LocalChannelHub {
    channels: Arc<RwLock<HashMap<Uuid, broadcast::Sender<NotificationEnvelope>>>>,
    capacity: usize,
}

impl LocalChannelHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Join the channel for `user_id`
    pub async fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<NotificationEnvelope> {
        let mut channels = self.channels.write().await;
        channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    pub async fn subscriber_count(&self, user_id: Uuid) -> usize {
        let channels = self.channels.read().await;
        channels.get(&user_id).map_or(0, |tx| tx.receiver_count())
    }
}

impl Default for LocalChannelHub {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl NotificationSink for LocalChannelHub {
    async fn publish(&self, user_id: Uuid, payload: &NotificationEnvelope) -> Result<()> {
        let sent = {
            let channels = self.channels.read().await;
            match channels.get(&user_id) {
                Some(tx) => tx.send(payload.clone()).is_ok(),
                None => false,
            }
        };

        if sent {
            return Ok(());
        }

        // Drop channels whose subscribers have all disconnected
        let mut channels = self.channels.write().await;
        if channels.get(&user_id).is_some_and(|tx| tx.receiver_count() == 0) {
            channels.remove(&user_id);
        }
        Err(CampusEventsError::ChannelUnavailable(format!("No subscribers for user {}", user_id)))
    }
}

/// Sink that discards every payload
#[derive(Debug, Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl NotificationSink for NoopSink {
    async fn publish(&self, _user_id: Uuid, _payload: &NotificationEnvelope) -> Result<()> {
        Ok(())
    }
}
