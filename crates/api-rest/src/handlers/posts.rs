use super::run_blocking;
use crate::{error::ApiError, AppState};
use api_shared::{CreatePostReq, DeletedRes, ErrorRes, PostListRes, PostRes, UpdatePostReq};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use folio_core::{ResourceId, StoreError};

#[utoipa::path(
    get,
    path = "/postList",
    responses(
        (status = 200, description = "Every stored post", body = PostListRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all posts with their content.
#[axum::debug_handler]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<PostListRes>, ApiError> {
    let store = state.store.clone();
    let posts = run_blocking(move || store.posts().list()).await?;
    Ok(Json(PostListRes {
        result: posts.into_iter().map(PostRes::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/post/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = PostRes),
        (status = 400, description = "Invalid identifier", body = ErrorRes),
        (status = 404, description = "No such post", body = ErrorRes)
    )
)]
/// Read a single post.
#[axum::debug_handler]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostRes>, ApiError> {
    let id = ResourceId::parse(&id)?;
    let store = state.store.clone();
    let post = run_blocking(move || store.posts().get(&id)).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    post,
    path = "/post",
    request_body = CreatePostReq,
    responses(
        (status = 200, description = "Post written", body = PostRes),
        (status = 400, description = "Missing or invalid field", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a post, overwriting any post with the same identifier.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not JSON,
/// - `id` is missing, empty or not a safe identifier, or
/// - `content` is missing (empty content is accepted).
#[axum::debug_handler]
pub async fn create_post(
    State(state): State<AppState>,
    body: Result<Json<CreatePostReq>, JsonRejection>,
) -> Result<Json<PostRes>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = match req.id.as_deref() {
        None | Some("") => return Err(StoreError::Validation("id is required".into()).into()),
        Some(id) => ResourceId::parse(id)?,
    };
    let content = req
        .content
        .ok_or_else(|| StoreError::Validation("content is required".into()))?;

    let store = state.store.clone();
    let post = run_blocking(move || store.posts().create(id, content)).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    put,
    path = "/post/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = UpdatePostReq,
    responses(
        (status = 200, description = "Post written", body = PostRes),
        (status = 400, description = "Missing or invalid field", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Replace a post's content. Behaves exactly like create: an absent post is written.
#[axum::debug_handler]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdatePostReq>, JsonRejection>,
) -> Result<Json<PostRes>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = ResourceId::parse(&id)?;
    let content = req
        .content
        .ok_or_else(|| StoreError::Validation("content is required".into()))?;

    let store = state.store.clone();
    let post = run_blocking(move || store.posts().update(id, content)).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    delete,
    path = "/post/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post removed", body = DeletedRes),
        (status = 404, description = "No such post", body = ErrorRes)
    )
)]
/// Delete a post.
#[axum::debug_handler]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedRes>, ApiError> {
    let id = ResourceId::parse(&id)?;
    let store = state.store.clone();
    let id = run_blocking(move || store.posts().delete(&id)).await?;
    Ok(Json(id.into()))
}
