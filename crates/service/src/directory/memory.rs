use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use models::student::{self, NewStudent, StudentPatch, StudentRecord};

use crate::directory::store::StudentStore;
use crate::errors::ServiceError;

/// Process-local student directory.
///
/// Mutations hold the write lock across the whole check-then-act sequence
/// (id assignment and push, find and merge, find and remove). Reads clone
/// a snapshot under the read lock.
#[derive(Clone, Default)]
pub struct InMemoryStudentStore {
    inner: Arc<RwLock<Vec<StudentRecord>>>,
}

impl InMemoryStudentStore {
    /// Directory pre-filled with the two seed records.
    pub fn seeded() -> Arc<Self> {
        Self::with_records(student::seed())
    }

    pub fn with_records(records: Vec<StudentRecord>) -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(records)) })
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Drop every record and restore the seed.
    pub async fn reset(&self) {
        let mut records = self.inner.write().await;
        *records = student::seed();
        info!(event = "directory_reset", count = records.len(), "student directory reset to seed");
    }
}

fn find(records: &[StudentRecord], id: u64) -> Option<usize> {
    records.iter().position(|s| s.id == id)
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn list(&self) -> Vec<StudentRecord> {
        self.inner.read().await.clone()
    }

    async fn get(&self, id: u64) -> Option<StudentRecord> {
        let records = self.inner.read().await;
        find(&records, id).map(|i| records[i].clone())
    }

    async fn create(&self, input: NewStudent) -> Result<StudentRecord, ServiceError> {
        let input = input.validate()?;
        let mut records = self.inner.write().await;
        let rec = input.into_record(student::next_id(&records));
        records.push(rec.clone());
        debug!(event = "student_created", id = rec.id, "student created");
        Ok(rec)
    }

    async fn update(&self, id: u64, patch: StudentPatch) -> Result<StudentRecord, ServiceError> {
        let mut records = self.inner.write().await;
        let idx = find(&records, id).ok_or_else(|| ServiceError::not_found("student"))?;
        let rec = &mut records[idx];
        rec.apply(patch);
        debug!(event = "student_updated", id, "student updated");
        Ok(rec.clone())
    }

    async fn delete(&self, id: u64) -> Result<StudentRecord, ServiceError> {
        let mut records = self.inner.write().await;
        let idx = find(&records, id).ok_or_else(|| ServiceError::not_found("student"))?;
        let removed = records.remove(idx);
        debug!(event = "student_deleted", id, "student deleted");
        Ok(removed)
    }
}
