//! Scheduled Jobs
//!
//! Background jobs for periodic maintenance tasks.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::store::{BlogStore, StoreError};

// =========================================================================
// Session Cleanup Job
// =========================================================================

/// Delete sessions whose token has expired
pub async fn cleanup_expired_sessions(store: &dyn BlogStore) -> Result<u64, JobError> {
    let rows_deleted = store.delete_expired_sessions(Utc::now()).await?;

    if rows_deleted > 0 {
        tracing::info!(rows_deleted = rows_deleted, "Cleaned up expired sessions");
    }

    Ok(rows_deleted)
}

/// Shortest period the cleanup loop will run at
const MIN_CLEANUP_PERIOD: Duration = Duration::from_secs(1);

/// Run [`cleanup_expired_sessions`] every `period` until the task is aborted.
///
/// Periods below one second are raised to one second.
pub fn spawn_session_cleanup(store: Arc<dyn BlogStore>, period: Duration) -> JoinHandle<()> {
    if period < MIN_CLEANUP_PERIOD {
        tracing::warn!(
            requested_ms = period.as_millis() as u64,
            "Session cleanup period too short, using 1s"
        );
    }
    let period = period.max(MIN_CLEANUP_PERIOD);

    tokio::spawn(async move {
        let mut ticker = interval(period);

        loop {
            ticker.tick().await;

            if let Err(e) = cleanup_expired_sessions(store.as_ref()).await {
                tracing::error!(error = %e, "Session cleanup failed");
            }
        }
    })
}

/// Job error types
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
