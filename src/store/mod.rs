//! Persistence collaborators.
//!
//! The salary engine and the HTTP layer only see these traits. Every
//! implementation reports transport or connectivity trouble as
//! [`EngineError::StoreUnavailable`](crate::error::EngineError::StoreUnavailable)
//! and leaves retry policy to itself; callers never retry.
//!
//! [`memory`] provides the in-process implementations the binary runs with.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AttendanceUpsert, Coach, Feedback, FeedbackPatch};

pub mod memory;

pub use memory::{MemoryAttendanceStore, MemoryCoachStore, MemoryFeedbackStore};

/// Read access to the coach roster.
#[async_trait]
pub trait CoachStore: Send + Sync {
    /// Returns every coach, in the store's own stable order.
    async fn list_all(&self) -> EngineResult<Vec<Coach>>;

    /// Replaces the whole roster (used when seeding).
    async fn replace_all(&self, coaches: Vec<Coach>) -> EngineResult<()>;
}

/// Attendance records, at most one per coach and calendar day.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Returns the coach's records whose day starts inside `[start, end)`.
    async fn find_in_range(
        &self,
        coach_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Creates the record for `(coach_id, date)`, or overwrites the name,
    /// status and notes of the one already there.
    async fn upsert(&self, entry: AttendanceUpsert) -> EngineResult<AttendanceRecord>;

    /// Deletes a record, failing with `NotFound` if the ID is unknown.
    async fn delete_by_id(&self, id: Uuid) -> EngineResult<()>;

    /// Returns every record, newest day first.
    async fn list_all(&self) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Player feedback entries.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Persists a new entry.
    async fn create(&self, feedback: Feedback) -> EngineResult<Feedback>;

    /// Returns every entry, newest first.
    async fn list_all(&self) -> EngineResult<Vec<Feedback>>;

    /// Applies a partial update, failing with `NotFound` if the ID is unknown.
    async fn update(&self, id: Uuid, patch: FeedbackPatch) -> EngineResult<Feedback>;

    /// Deletes an entry, failing with `NotFound` if the ID is unknown.
    async fn delete_by_id(&self, id: Uuid) -> EngineResult<()>;
}
