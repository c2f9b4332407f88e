use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use common::types::Message;
use models::student::{NewStudent, StudentPatch, StudentRecord};

use crate::errors::JsonApiError;
use crate::routes::AppState;

pub const WELCOME: &str = "Welcome to the Student API";
pub const DELETED: &str = "Student deleted successfully";

/// `{id}` path segment. A segment that is not all ASCII digits is a routing
/// miss (bare 404). An integer too large for `u64` can never match a record,
/// so it is the logical "Student not found".
#[derive(Debug, Clone, Copy)]
pub struct StudentId(pub u64);

#[derive(Debug, PartialEq, Eq)]
enum IdSegment {
    Id(u64),
    TooLarge,
    NotInteger,
}

fn classify_segment(raw: &str) -> IdSegment {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return IdSegment::NotInteger;
    }
    match raw.parse::<u64>() {
        Ok(id) => IdSegment::Id(id),
        Err(_) => IdSegment::TooLarge,
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for StudentId {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND.into_response())?;
        match classify_segment(&raw) {
            IdSegment::Id(id) => Ok(StudentId(id)),
            IdSegment::TooLarge => Err(JsonApiError::not_found().into_response()),
            IdSegment::NotInteger => Err(StatusCode::NOT_FOUND.into_response()),
        }
    }
}

/// Parse a JSON object body. Blank bodies count as `{}`; the content type is not checked.
fn parse_object<T: DeserializeOwned + Default>(body: &Bytes) -> Option<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(T::default());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(v @ Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    }
}

#[utoipa::path(get, path = "/", tag = "students", responses((status = 200, description = "Welcome message")))]
pub async fn root() -> Json<Message> {
    Json(Message::new(WELCOME))
}

#[utoipa::path(get, path = "/students", tag = "students", responses((status = 200, description = "All students in insertion order")))]
pub async fn list_students(State(state): State<AppState>) -> Json<Vec<StudentRecord>> {
    Json(state.students.list().await)
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = u64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student found"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    StudentId(id): StudentId,
) -> Result<Json<StudentRecord>, JsonApiError> {
    state.students.get(id).await.map(Json).ok_or_else(JsonApiError::not_found)
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::NewStudentDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing name, age, or course")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<StudentRecord>), JsonApiError> {
    let input: NewStudent = parse_object(&body).ok_or_else(JsonApiError::missing_fields)?;
    let created = state.students.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/students/{id}", tag = "students",
    params(("id" = u64, Path, description = "Student id")),
    request_body = crate::openapi::StudentPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid name, age, or course"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    StudentId(id): StudentId,
    body: Bytes,
) -> Result<Json<StudentRecord>, JsonApiError> {
    let patch: StudentPatch = match parse_object(&body) {
        Some(p) => p,
        None => {
            // 先判断记录是否存在：未知 id 一律 404
            if state.students.get(id).await.is_none() {
                return Err(JsonApiError::not_found());
            }
            return Err(JsonApiError::invalid_fields());
        }
    };
    let updated = state.students.update(id, patch).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = u64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted successfully"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    StudentId(id): StudentId,
) -> Result<Json<Message>, JsonApiError> {
    state.students.delete(id).await?;
    Ok(Json(Message::new(DELETED)))
}
