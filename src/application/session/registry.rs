//! Registry of live charge point WebSocket connections
//!
//! Shared between the WS delivery layer (register/unregister on connect and
//! disconnect) and the command layer (send_to routes outbound OCPP calls to
//! the right socket).

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;

use super::connection::Connection;

pub struct SessionRegistry {
    connections: DashMap<String, Connection>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn shared() -> SharedSessionRegistry {
        Arc::new(Self::new())
    }

    pub fn register(&self, charge_point_id: &str, sender: mpsc::UnboundedSender<String>) {
        self.connections
            .insert(charge_point_id.to_string(), Connection::new(sender));
    }

    pub fn unregister(&self, charge_point_id: &str) {
        self.connections.remove(charge_point_id);
    }

    pub fn touch(&self, charge_point_id: &str) {
        if let Some(mut conn) = self.connections.get_mut(charge_point_id) {
            conn.touch();
        }
    }

    /// Send a raw OCPP-J frame to the named charge point's socket.
    pub fn send_to(&self, charge_point_id: &str, message: String) -> Result<(), String> {
        let conn = self
            .connections
            .get(charge_point_id)
            .ok_or_else(|| charge_point_id.to_string())?;

        conn.sender
            .send(message)
            .map_err(|e| format!("channel closed for {}: {}", charge_point_id, e))
    }

    pub fn is_connected(&self, charge_point_id: &str) -> bool {
        self.connections.contains_key(charge_point_id)
    }

    pub fn connected_ids(&self) -> Vec<String> {
        self.connections
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedSessionRegistry = Arc<SessionRegistry>;
