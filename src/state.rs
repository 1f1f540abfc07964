//! Application state: the in-memory session store and host configuration.
//!
//! Each `GameSession` is owned by exactly one entry in the store; handlers
//! take the write lock for the duration of a single command.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::game::GameSession;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, GameSession>>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        info!(target: "lecture_dash", feedback_delay_ms = config.feedback_delay_ms, static_dir = %config.static_dir, "App state ready");
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Insert a fresh title-screen session and return its id.
    #[instrument(level = "debug", skip(self))]
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(id.clone(), GameSession::default());
        id
    }

    /// Drop a session; false if it was already gone.
    #[instrument(level = "debug", skip(self))]
    pub async fn remove_session(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            info!(target: "lecture_dash", %id, "Session dropped");
        }
        removed
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
