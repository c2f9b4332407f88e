use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// One student entry. `id` is assigned by the directory and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: u64,
    pub name: String,
    pub age: i64,
    pub course: String,
}

/// Create payload as it arrives on the wire; presence is checked by [`NewStudent::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub course: Option<String>,
}

/// Validated create input, every field present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateStudent {
    pub name: String,
    pub age: i64,
    pub course: String,
}

/// Partial update; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub course: Option<String>,
}

impl NewStudent {
    pub fn validate(self) -> Result<CreateStudent, ModelError> {
        match (self.name, self.age, self.course) {
            (Some(name), Some(age), Some(course)) => Ok(CreateStudent { name, age, course }),
            _ => Err(ModelError::Validation("missing name, age, or course".into())),
        }
    }
}

impl CreateStudent {
    pub fn into_record(self, id: u64) -> StudentRecord {
        StudentRecord { id, name: self.name, age: self.age, course: self.course }
    }
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.course.is_none()
    }
}

impl StudentRecord {
    /// Merge a patch in place. Fields absent from the patch are untouched.
    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(name) = patch.name { self.name = name; }
        if let Some(age) = patch.age { self.age = age; }
        if let Some(course) = patch.course { self.course = course; }
    }
}

/// Records every fresh directory starts with.
pub fn seed() -> Vec<StudentRecord> {
    vec![
        StudentRecord { id: 1, name: "Arun".into(), age: 21, course: "Computer Science".into() },
        StudentRecord { id: 2, name: "Arjun".into(), age: 22, course: "Information Technology".into() },
    ]
}

/// Next id for a collection: highest existing id plus one, `1` when empty.
pub fn next_id(records: &[StudentRecord]) -> u64 {
    records.iter().map(|s| s.id).max().unwrap_or(0) + 1
}
