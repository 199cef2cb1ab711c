//! # API REST
//!
//! HTTP front end of the Folio content store.
//!
//! Exposes posts and projects over JSON and multipart endpoints, serves the public tree so
//! logo URLs resolve, and publishes an OpenAPI document with Swagger UI.
//!
//! Handlers never touch the filesystem directly: every read and write goes through the
//! [`ResourceStore`] on the blocking pool.

pub mod error;
pub mod handlers;
pub mod multipart;

use api_shared::{
    CreatePostReq, CreateProjectForm, DeletedRes, ErrorRes, GetProjectRes, HealthRes,
    HealthService, PostListRes, PostRes, ProjectImageForm, ProjectListRes, ProjectRes,
    UpdatePostReq, UpdateProjectForm, UploadedRes,
};
use axum::{extract::DefaultBodyLimit, response::Json, routing::get, routing::post, Router};
use folio_core::{constants::DEFAULT_MAX_UPLOAD_BYTES, ResourceStore};
use handlers::{posts, projects};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ResourceStore>,
    /// Directory receiving temporary uploads while a request is in flight.
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: ResourceStore, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: Arc::new(store),
            upload_dir: Arc::new(upload_dir.into()),
        }
    }
}

/// Router-level settings resolved at startup.
#[derive(Clone, Debug)]
pub struct RouterOptions {
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
    /// Adds a permissive CORS layer (development only).
    pub permissive_cors: bool,
    /// Root served for any path no API route matches.
    pub static_dir: Option<PathBuf>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            permissive_cors: false,
            static_dir: None,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        posts::list_posts,
        posts::get_post,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::add_project_image,
        projects::update_project,
        projects::delete_project,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        PostRes,
        PostListRes,
        CreatePostReq,
        UpdatePostReq,
        DeletedRes,
        ProjectRes,
        ProjectListRes,
        GetProjectRes,
        UploadedRes,
        CreateProjectForm,
        UpdateProjectForm,
        ProjectImageForm,
    ))
)]
pub struct ApiDoc;

/// Builds the complete application router.
pub fn build_router(state: AppState, options: &RouterOptions) -> Router {
    let mut app: Router<AppState> = Router::new()
        .route("/health", get(health))
        .route("/postList", get(posts::list_posts))
        .route("/post", post(posts::create_post))
        .route(
            "/post/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/projectList", get(projects::list_projects))
        .route("/projects", post(projects::create_project))
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/projects/:id/image", post(projects::add_project_image))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = &options.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app = app
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if options.permissive_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Liveness probe.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}
