//! Application state for the API server

use crate::error::{ApiError, ApiResult};
use academy_core::ServiceResult;
use log::warn;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
    started_at: Instant,
}

impl AppState {
    /// Wraps an opened and migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            started_at: Instant::now(),
        }
    }

    /// Server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Runs one service call on the blocking pool with exclusive access to
    /// the connection.
    pub async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&mut Connection) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = tokio::task::spawn_blocking(move || {
            // A panicked request already rolled its transaction back on unwind.
            let mut guard = conn.lock().unwrap_or_else(|poisoned| {
                warn!("event=db_lock module=api status=recovered reason=poisoned");
                poisoned.into_inner()
            });
            op(&mut *guard)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(ApiError::from),
            Err(err) => Err(ApiError::Internal(format!("request task failed: {err}"))),
        }
    }
}
