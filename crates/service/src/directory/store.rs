use async_trait::async_trait;
use models::student::{NewStudent, StudentPatch, StudentRecord};

use crate::errors::ServiceError;

/// Storage abstraction for the student directory.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Vec<StudentRecord>;
    async fn get(&self, id: u64) -> Option<StudentRecord>;
    /// Validate and append a record with the next id.
    async fn create(&self, input: NewStudent) -> Result<StudentRecord, ServiceError>;
    async fn update(&self, id: u64, patch: StudentPatch) -> Result<StudentRecord, ServiceError>;
    async fn delete(&self, id: u64) -> Result<StudentRecord, ServiceError>;
}
