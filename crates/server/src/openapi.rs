use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: u64,
    pub name: String,
    pub age: i64,
    pub course: String,
}

#[derive(ToSchema)]
pub struct NewStudentDoc {
    pub name: String,
    pub age: i64,
    pub course: String,
}

#[derive(ToSchema)]
pub struct StudentPatchDoc {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub course: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::root,
        crate::routes::students::list_students,
        crate::routes::students::get_student,
        crate::routes::students::create_student,
        crate::routes::students::update_student,
        crate::routes::students::delete_student,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            ErrorResponse,
            StudentDoc,
            NewStudentDoc,
            StudentPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
