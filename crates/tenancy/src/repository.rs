//! Storage vocabulary shared by every record repository.

use std::sync::atomic::{AtomicU64, Ordering};

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A unique field (username, email, catalogue name) is already in use.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("record {0} already exists")]
    DuplicateId(String),
    /// Another active tenant holds the same room at the same property.
    #[error("room taken: {0}")]
    RoomTaken(String),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Digits in the numeric suffix; keeps lexical and creation order aligned.
const RECORD_ID_WIDTH: usize = 12;

/// Allocates a process-unique record identifier such as `prop-000000000042`.
pub(crate) fn next_record_id(prefix: &str) -> String {
    let id = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:0width$}", width = RECORD_ID_WIDTH)
}

/// Moves the sequence past an externally supplied id in the generated
/// `prefix-<digits>` shape. Other shapes cannot collide and are ignored.
pub(crate) fn reserve_record_id(id: &str) {
    let Some((_, suffix)) = id.rsplit_once('-') else {
        return;
    };
    if suffix.is_empty() || !suffix.bytes().all(|byte| byte.is_ascii_digit()) {
        return;
    }
    if let Ok(taken) = suffix.parse::<u64>() {
        RECORD_SEQUENCE.fetch_max(taken.saturating_add(1), Ordering::Relaxed);
    }
}
