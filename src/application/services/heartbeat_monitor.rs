//! Heartbeat Monitor Service
//!
//! Monitors charge point heartbeats and marks stations as offline
//! when they stop responding.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::application::session::SharedSessionRegistry;
use crate::domain::{ChargePointStatus, DomainResult, RepositoryProvider};
use crate::support::shutdown::ShutdownSignal;

/// Configuration for heartbeat monitoring
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// How often to check for stale connections (in seconds)
    pub check_interval_secs: u64,
    /// How long before a station is considered offline (in seconds)
    pub offline_threshold_secs: i64,
    /// How long before a station is considered unavailable (in seconds)
    pub unavailable_threshold_secs: i64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 60,
            offline_threshold_secs: 180,
            unavailable_threshold_secs: 600,
        }
    }
}

/// Information about a charge point's heartbeat status
#[derive(Debug, Clone)]
pub struct HeartbeatStatus {
    pub charge_point_id: String,
    pub last_heartbeat: Option<DateTime<Utc>>,
    pub is_connected: bool,
    pub status: ChargePointStatus,
    pub seconds_since_heartbeat: Option<i64>,
}

/// Runs in the background and monitors charge point heartbeats,
/// updating their status when they go offline.
pub struct HeartbeatMonitor {
    repos: Arc<dyn RepositoryProvider>,
    session_registry: SharedSessionRegistry,
    config: HeartbeatConfig,
    running: Arc<RwLock<bool>>,
}

impl HeartbeatMonitor {
    pub fn new(repos: Arc<dyn RepositoryProvider>, session_registry: SharedSessionRegistry) -> Self {
        Self {
            repos,
            session_registry,
            config: HeartbeatConfig::default(),
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub fn with_config(mut self, config: HeartbeatConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the heartbeat monitor background task
    pub fn start(&self, shutdown: ShutdownSignal) {
        let repos = self.repos.clone();
        let session_registry = self.session_registry.clone();
        let config = self.config.clone();
        let running = self.running.clone();

        tokio::spawn(async move {
            {
                let mut r = running.write().await;
                *r = true;
            }

            info!(
                check_interval_secs = config.check_interval_secs,
                offline_threshold_secs = config.offline_threshold_secs,
                "heartbeat monitor started"
            );

            let mut interval = tokio::time::interval(Duration::from_secs(config.check_interval_secs));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = check_heartbeats(&repos, &session_registry, &config).await {
                            warn!(error = %e, "heartbeat check failed");
                        }
                    }
                    _ = shutdown.notified().wait() => {
                        info!("heartbeat monitor shutting down");
                        break;
                    }
                }
            }

            {
                let mut r = running.write().await;
                *r = false;
            }

            info!("heartbeat monitor stopped");
        });
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    pub async fn get_all_statuses(&self) -> DomainResult<Vec<HeartbeatStatus>> {
        let charge_points = self.repos.charge_points().find_all().await?;
        let now = Utc::now();

        Ok(charge_points
            .into_iter()
            .map(|cp| {
                let is_connected = self.session_registry.is_connected(&cp.id);
                let seconds_since = cp
                    .last_heartbeat
                    .map(|hb| now.signed_duration_since(hb).num_seconds());

                HeartbeatStatus {
                    charge_point_id: cp.id.clone(),
                    last_heartbeat: cp.last_heartbeat,
                    is_connected,
                    status: cp.status,
                    seconds_since_heartbeat: seconds_since,
                }
            })
            .collect())
    }

    pub async fn get_status(&self, charge_point_id: &str) -> DomainResult<Option<HeartbeatStatus>> {
        let cp = self.repos.charge_points().find_by_id(charge_point_id).await?;
        let now = Utc::now();

        Ok(cp.map(|cp| {
            let is_connected = self.session_registry.is_connected(&cp.id);
            let seconds_since = cp
                .last_heartbeat
                .map(|hb| now.signed_duration_since(hb).num_seconds());

            HeartbeatStatus {
                charge_point_id: cp.id.clone(),
                last_heartbeat: cp.last_heartbeat,
                is_connected,
                status: cp.status,
                seconds_since_heartbeat: seconds_since,
            }
        }))
    }

    pub fn get_online_charge_points(&self) -> Vec<String> {
        self.session_registry.connected_ids()
    }

    pub async fn get_connection_stats(&self) -> DomainResult<ConnectionStats> {
        let charge_points = self.repos.charge_points().find_all().await?;
        let total = charge_points.len();

        let online = charge_points
            .iter()
            .filter(|cp| self.session_registry.is_connected(&cp.id))
            .count();

        let stale = charge_points
            .iter()
            .filter(|cp| match cp.last_heartbeat {
                Some(hb) => {
                    Utc::now().signed_duration_since(hb).num_seconds()
                        > self.config.offline_threshold_secs
                }
                None => true,
            })
            .count();

        Ok(ConnectionStats {
            total,
            online,
            offline: total - online,
            stale,
        })
    }
}

/// Connection statistics
#[derive(Debug, Clone)]
pub struct ConnectionStats {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub stale: usize,
}

/// Check all charge points for heartbeat timeouts
async fn check_heartbeats(
    repos: &Arc<dyn RepositoryProvider>,
    session_registry: &SharedSessionRegistry,
    config: &HeartbeatConfig,
) -> DomainResult<()> {
    let charge_points = repos.charge_points().find_all().await?;
    let now = Utc::now();

    debug!(count = charge_points.len(), "checking heartbeats");

    for mut cp in charge_points {
        let is_connected = session_registry.is_connected(&cp.id);
        let current_status = cp.status.clone();

        let new_status = if is_connected {
            match cp.last_heartbeat {
                Some(last_hb) => {
                    let elapsed = now.signed_duration_since(last_hb).num_seconds();
                    if elapsed > config.unavailable_threshold_secs {
                        ChargePointStatus::Unavailable
                    } else {
                        ChargePointStatus::Online
                    }
                }
                None => ChargePointStatus::Online,
            }
        } else {
            match cp.last_heartbeat {
                Some(last_hb) => {
                    let elapsed = now.signed_duration_since(last_hb).num_seconds();
                    if elapsed > config.unavailable_threshold_secs {
                        ChargePointStatus::Unavailable
                    } else {
                        ChargePointStatus::Offline
                    }
                }
                None => ChargePointStatus::Unknown,
            }
        };

        if new_status != current_status {
            info!(
                charge_point_id = cp.id.as_str(),
                from = ?current_status,
                to = ?new_status,
                is_connected,
                "charge point status changed"
            );

            cp.status = new_status;
            if let Err(e) = repos.charge_points().update(cp.clone()).await {
                warn!(charge_point_id = cp.id.as_str(), error = %e, "failed to persist status change");
            }
        }
    }

    Ok(())
}
