//! In-process store implementations.
//!
//! Each store guards its table with a `tokio::sync::RwLock`, so concurrent
//! readers (the salary fan-out) never block each other.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceDocument, AttendanceRecord, AttendanceUpsert, Coach, Feedback, FeedbackPatch,
    day_start_utc,
};

use super::{AttendanceStore, CoachStore, FeedbackStore};

/// Coach roster held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryCoachStore {
    coaches: RwLock<Vec<Coach>>,
}

impl MemoryCoachStore {
    /// Creates a store holding `coaches`, validating each one.
    pub fn new(coaches: Vec<Coach>) -> EngineResult<Self> {
        for coach in &coaches {
            coach.validate()?;
        }
        Ok(Self {
            coaches: RwLock::new(coaches),
        })
    }
}

#[async_trait]
impl CoachStore for MemoryCoachStore {
    async fn list_all(&self) -> EngineResult<Vec<Coach>> {
        Ok(self.coaches.read().await.clone())
    }

    async fn replace_all(&self, coaches: Vec<Coach>) -> EngineResult<()> {
        for coach in &coaches {
            coach.validate()?;
        }
        *self.coaches.write().await = coaches;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct AttendanceTable {
    documents: HashMap<Uuid, AttendanceDocument>,
    by_day: HashMap<(String, NaiveDate), Uuid>,
}

impl AttendanceTable {
    /// Inserts a document without upsert semantics.
    fn insert(&mut self, doc: AttendanceDocument) -> EngineResult<()> {
        let key = (doc.coach_id.clone(), doc.date);
        if self.by_day.contains_key(&key) {
            return Err(EngineError::DuplicateRecord {
                coach_id: doc.coach_id,
                date: doc.date,
            });
        }
        if self.documents.contains_key(&doc.id) {
            return Err(EngineError::DataIntegrityViolation {
                record_id: doc.id.to_string(),
                message: "record ID is already in use".to_string(),
            });
        }
        self.by_day.insert(key, doc.id);
        self.documents.insert(doc.id, doc);
        Ok(())
    }
}

/// Attendance records held in memory.
///
/// Records are kept as [`AttendanceDocument`]s and validated on every read,
/// so a corrupt status surfaces as `DataIntegrityViolation` instead of being
/// skipped.
#[derive(Debug, Default)]
pub struct MemoryAttendanceStore {
    table: RwLock<AttendanceTable>,
}

impl MemoryAttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-loads stored documents, e.g. from an export.
    ///
    /// This bypasses upsert, so two documents for the same coach and day
    /// fail with `DuplicateRecord`.
    pub fn from_documents(
        documents: impl IntoIterator<Item = AttendanceDocument>,
    ) -> EngineResult<Self> {
        let mut table = AttendanceTable::default();
        for doc in documents {
            table.insert(doc)?;
        }
        Ok(Self {
            table: RwLock::new(table),
        })
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn find_in_range(
        &self,
        coach_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let table = self.table.read().await;
        let mut records = table
            .documents
            .values()
            .filter(|doc| doc.coach_id == coach_id)
            .filter(|doc| {
                let at = day_start_utc(doc.date);
                at >= start && at < end
            })
            .cloned()
            .map(AttendanceRecord::try_from)
            .collect::<EngineResult<Vec<_>>>()?;
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    async fn upsert(&self, entry: AttendanceUpsert) -> EngineResult<AttendanceRecord> {
        let mut table = self.table.write().await;
        let key = (entry.coach_id.clone(), entry.date);

        if let Some(id) = table.by_day.get(&key).copied() {
            let doc = table
                .documents
                .get_mut(&id)
                .ok_or_else(|| EngineError::DataIntegrityViolation {
                    record_id: id.to_string(),
                    message: "day index points at a missing record".to_string(),
                })?;
            doc.coach_name = entry.coach_name;
            doc.status = entry.status.label().to_string();
            doc.notes = entry.notes;
            return AttendanceRecord::try_from(doc.clone());
        }

        let record = AttendanceRecord {
            id: Uuid::new_v4(),
            coach_id: entry.coach_id,
            coach_name: entry.coach_name,
            date: entry.date,
            status: entry.status,
            notes: entry.notes,
        };
        table.insert(record.clone().into())?;
        Ok(record)
    }

    async fn delete_by_id(&self, id: Uuid) -> EngineResult<()> {
        let mut table = self.table.write().await;
        let doc = table
            .documents
            .remove(&id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "Attendance record".to_string(),
                id: id.to_string(),
            })?;
        table.by_day.remove(&(doc.coach_id, doc.date));
        Ok(())
    }

    async fn list_all(&self) -> EngineResult<Vec<AttendanceRecord>> {
        let table = self.table.read().await;
        let mut records = table
            .documents
            .values()
            .cloned()
            .map(AttendanceRecord::try_from)
            .collect::<EngineResult<Vec<_>>>()?;
        records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.coach_id.cmp(&b.coach_id)));
        Ok(records)
    }
}

/// Feedback entries held in memory.
#[derive(Debug, Default)]
pub struct MemoryFeedbackStore {
    entries: RwLock<HashMap<Uuid, Feedback>>,
}

impl MemoryFeedbackStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn create(&self, feedback: Feedback) -> EngineResult<Feedback> {
        self.entries
            .write()
            .await
            .insert(feedback.id, feedback.clone());
        Ok(feedback)
    }

    async fn list_all(&self) -> EngineResult<Vec<Feedback>> {
        let mut entries: Vec<Feedback> = self.entries.read().await.values().cloned().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(entries)
    }

    async fn update(&self, id: Uuid, patch: FeedbackPatch) -> EngineResult<Feedback> {
        let mut entries = self.entries.write().await;
        let feedback = entries.get_mut(&id).ok_or_else(|| feedback_not_found(id))?;
        patch.apply(feedback)?;
        Ok(feedback.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> EngineResult<()> {
        self.entries
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| feedback_not_found(id))
    }
}

fn feedback_not_found(id: Uuid) -> EngineError {
    EngineError::NotFound {
        entity: "Feedback".to_string(),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, NewFeedback};
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mark(coach_id: &str, day: NaiveDate, status: AttendanceStatus) -> AttendanceUpsert {
        AttendanceUpsert {
            coach_id: coach_id.to_string(),
            coach_name: "Mr. Perera".to_string(),
            date: day,
            status,
            notes: None,
        }
    }

    fn document(coach_id: &str, day: NaiveDate, status: &str) -> AttendanceDocument {
        AttendanceDocument {
            id: Uuid::new_v4(),
            coach_id: coach_id.to_string(),
            coach_name: "Mr. Perera".to_string(),
            date: day,
            status: status.to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_same_day_keeps_one_record_with_latest_values() {
        let store = MemoryAttendanceStore::new();
        let first = store
            .upsert(mark("coach_1", date(2024, 2, 5), AttendanceStatus::FullDay))
            .await
            .unwrap();

        let mut second_entry = mark("coach_1", date(2024, 2, 5), AttendanceStatus::Absent);
        second_entry.notes = Some("Sick leave".to_string());
        let second = store.upsert(second_entry).await.unwrap();

        assert_eq!(first.id, second.id);
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, AttendanceStatus::Absent);
        assert_eq!(all[0].notes.as_deref(), Some("Sick leave"));
    }

    #[tokio::test]
    async fn test_upsert_different_coaches_same_day_are_separate() {
        let store = MemoryAttendanceStore::new();
        store
            .upsert(mark("coach_1", date(2024, 2, 5), AttendanceStatus::FullDay))
            .await
            .unwrap();
        store
            .upsert(mark("coach_2", date(2024, 2, 5), AttendanceStatus::FullDay))
            .await
            .unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_in_range_is_half_open_and_per_coach() {
        let store = MemoryAttendanceStore::new();
        for day in [date(2024, 1, 31), date(2024, 2, 1), date(2024, 2, 29), date(2024, 3, 1)] {
            store
                .upsert(mark("coach_1", day, AttendanceStatus::FullDay))
                .await
                .unwrap();
        }
        store
            .upsert(mark("coach_2", date(2024, 2, 10), AttendanceStatus::FullDay))
            .await
            .unwrap();

        let records = store
            .find_in_range(
                "coach_1",
                day_start_utc(date(2024, 2, 1)),
                day_start_utc(date(2024, 3, 1)),
            )
            .await
            .unwrap();

        let days: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(days, vec![date(2024, 2, 1), date(2024, 2, 29)]);
    }

    #[tokio::test]
    async fn test_delete_by_id_frees_the_day() {
        let store = MemoryAttendanceStore::new();
        let record = store
            .upsert(mark("coach_1", date(2024, 2, 5), AttendanceStatus::HalfDay))
            .await
            .unwrap();

        store.delete_by_id(record.id).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());

        let again = store
            .upsert(mark("coach_1", date(2024, 2, 5), AttendanceStatus::FullDay))
            .await
            .unwrap();
        assert_ne!(again.id, record.id);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let store = MemoryAttendanceStore::new();
        let result = store.delete_by_id(Uuid::new_v4()).await;
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_all_is_newest_first() {
        let store = MemoryAttendanceStore::new();
        for day in [date(2024, 2, 3), date(2024, 2, 9), date(2024, 2, 1)] {
            store
                .upsert(mark("coach_1", day, AttendanceStatus::FullDay))
                .await
                .unwrap();
        }
        let days: Vec<NaiveDate> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(days, vec![date(2024, 2, 9), date(2024, 2, 3), date(2024, 2, 1)]);
    }

    #[test]
    fn test_from_documents_rejects_duplicate_day() {
        let result = MemoryAttendanceStore::from_documents(vec![
            document("coach_1", date(2024, 2, 5), "full_day"),
            document("coach_1", date(2024, 2, 5), "absent"),
        ]);
        match result {
            Err(EngineError::DuplicateRecord { coach_id, date: d }) => {
                assert_eq!(coach_id, "coach_1");
                assert_eq!(d, date(2024, 2, 5));
            }
            other => panic!("Expected DuplicateRecord, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_corrupt_document_surfaces_on_read() {
        let store = MemoryAttendanceStore::from_documents(vec![document(
            "coach_1",
            date(2024, 2, 5),
            "Sick",
        )])
        .unwrap();

        let result = store
            .find_in_range(
                "coach_1",
                day_start_utc(date(2024, 2, 1)),
                day_start_utc(date(2024, 3, 1)),
            )
            .await;
        assert!(matches!(
            result,
            Err(EngineError::DataIntegrityViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_coach_store_keeps_order_and_replaces() {
        let coach = |id: &str, salary: i64| Coach {
            id: id.to_string(),
            name: format!("Coach {}", id),
            basic_salary: Decimal::new(salary, 0),
        };
        let store = MemoryCoachStore::new(vec![coach("b", 10), coach("a", 20)]).unwrap();
        let ids: Vec<String> = store.list_all().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["b", "a"]);

        store.replace_all(vec![coach("c", 30)]).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        let invalid = store.replace_all(vec![coach("d", -5)]).await;
        assert!(invalid.is_err());
        assert_eq!(store.list_all().await.unwrap()[0].id, "c");
    }

    fn new_feedback(rating: u8) -> NewFeedback {
        NewFeedback {
            player_id: "player_1".to_string(),
            player_name: "Alice Silva".to_string(),
            coach_id: "coach_1".to_string(),
            coach_name: "Ms. Kumari".to_string(),
            rating,
            comment: Some("Great serve".to_string()),
            player_email: "alicesilva.testplayer@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_feedback_crud() {
        let store = MemoryFeedbackStore::new();
        let now = Utc::now();
        let older = store
            .create(new_feedback(3).into_feedback(now - Duration::days(1)))
            .await
            .unwrap();
        let newer = store.create(new_feedback(5).into_feedback(now)).await.unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);

        let updated = store
            .update(
                older.id,
                FeedbackPatch {
                    rating: Some(4),
                    ..FeedbackPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.rating, 4);

        store.delete_by_id(newer.id).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
        assert!(matches!(
            store.delete_by_id(newer.id).await,
            Err(EngineError::NotFound { .. })
        ));
        assert!(matches!(
            store.update(newer.id, FeedbackPatch::default()).await,
            Err(EngineError::NotFound { .. })
        ));
    }
}
