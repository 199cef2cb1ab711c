use super::run_blocking;
use crate::{error::ApiError, multipart::ProjectForm, AppState};
use api_shared::{
    CreateProjectForm, DeletedRes, ErrorRes, GetProjectRes, ProjectImageForm, ProjectListRes,
    ProjectRes, UpdateProjectForm, UploadedRes,
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    response::Json,
};
use folio_core::ResourceId;

#[utoipa::path(
    get,
    path = "/projectList",
    responses(
        (status = 200, description = "Every stored project", body = ProjectListRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all projects with their descriptions and logo URLs.
#[axum::debug_handler]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectListRes>, ApiError> {
    let store = state.store.clone();
    let projects = run_blocking(move || store.projects().list()).await?;
    Ok(Json(ProjectListRes {
        result: projects.into_iter().map(ProjectRes::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "The project", body = GetProjectRes),
        (status = 400, description = "Invalid identifier", body = ErrorRes),
        (status = 404, description = "No such project", body = ErrorRes)
    )
)]
/// Read a single project.
///
/// The `images` URL is derived from the identifier and is returned even when no logo was
/// ever uploaded.
#[axum::debug_handler]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GetProjectRes>, ApiError> {
    let id = ResourceId::parse(&id)?;
    let store = state.store.clone();
    let project = run_blocking(move || store.projects().get(&id)).await?;
    Ok(Json(GetProjectRes {
        project: project.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/projects",
    request_body(content = CreateProjectForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Project created", body = ProjectRes),
        (status = 400, description = "Missing or invalid field", body = ErrorRes),
        (status = 409, description = "Project already exists", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a project from a multipart form.
///
/// # Errors
/// Returns:
/// - `400 Bad Request` if `id` or `description` is missing or the id is unsafe,
/// - `409 Conflict` if the project directory already exists, or
/// - `500 Internal Server Error` if a write fails (the new directory is rolled back).
#[axum::debug_handler]
pub async fn create_project(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProjectRes>, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let mut form = ProjectForm::read(multipart, &state.upload_dir).await?;
    let image = form.take_image();

    let store = state.store.clone();
    let project = run_blocking(move || {
        store
            .projects()
            .create(form.field("id"), form.field("description"), image)
    })
    .await?;
    Ok(Json(project.into()))
}

#[utoipa::path(
    post,
    path = "/projects/{id}/image",
    params(("id" = String, Path, description = "Project identifier")),
    request_body(content = ProjectImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Logo stored", body = UploadedRes),
        (status = 400, description = "Missing image", body = ErrorRes),
        (status = 404, description = "No such project", body = ErrorRes)
    )
)]
/// Store or replace a project's logo.
#[axum::debug_handler]
pub async fn add_project_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadedRes>, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let mut form = ProjectForm::read(multipart, &state.upload_dir).await?;
    let image = form.take_image();

    let store = state.store.clone();
    run_blocking(move || store.projects().add_image(Some(id.as_str()), image)).await?;
    Ok(Json(UploadedRes { uploaded: true }))
}

#[utoipa::path(
    put,
    path = "/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    request_body(content = UpdateProjectForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Project updated", body = ProjectRes),
        (status = 400, description = "Missing or invalid field", body = ErrorRes),
        (status = 404, description = "No such project", body = ErrorRes)
    )
)]
/// Overwrite a project's description and optionally its logo.
#[axum::debug_handler]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProjectRes>, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let mut form = ProjectForm::read(multipart, &state.upload_dir).await?;
    let image = form.take_image();

    let store = state.store.clone();
    let project = run_blocking(move || {
        store
            .projects()
            .update(Some(id.as_str()), form.field("description"), image)
    })
    .await?;
    Ok(Json(project.into()))
}

#[utoipa::path(
    delete,
    path = "/projects/{id}",
    params(("id" = String, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project removed (or already absent)", body = DeletedRes),
        (status = 400, description = "Invalid identifier", body = ErrorRes)
    )
)]
/// Delete a project and everything in its directory.
#[axum::debug_handler]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedRes>, ApiError> {
    let id = ResourceId::parse(&id)?;
    let store = state.store.clone();
    let id = run_blocking(move || store.projects().delete(&id)).await?;
    Ok(Json(id.into()))
}
