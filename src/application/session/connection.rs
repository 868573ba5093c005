//! A single charge point's live WebSocket connection handle

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// Handle to an open WebSocket connection for one charge point.
///
/// The registry hands out clones of the sender side; the WS delivery task
/// owns the receiver and forwards frames to the socket.
#[derive(Clone)]
pub struct Connection {
    pub sender: mpsc::UnboundedSender<String>,
    pub connected_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Connection {
    pub fn new(sender: mpsc::UnboundedSender<String>) -> Self {
        let now = Utc::now();
        Self {
            sender,
            connected_at: now,
            last_seen: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}
