//! Request and response bodies of the Folio HTTP API.
//!
//! Field names are part of the public contract: clients read `result`, `images`, `project`
//! and `uploaded` exactly as spelled here.

use folio_core::{Post, Project, ResourceId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned with every non-2xx status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostRes {
    pub id: String,
    pub content: String,
}

impl From<Post> for PostRes {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into_inner(),
            content: post.content,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostListRes {
    pub result: Vec<PostRes>,
}

/// Body of `POST /post`. Fields are optional so a missing one is reported as a 400 with a
/// message rather than a deserialisation failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePostReq {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of `PUT /post/{id}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePostReq {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedRes {
    pub id: String,
}

impl From<ResourceId> for DeletedRes {
    fn from(id: ResourceId) -> Self {
        Self {
            id: id.into_inner(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectRes {
    pub id: String,
    pub description: String,
    /// Conventional logo URL; may 404 when the project has no logo.
    pub images: String,
}

impl From<Project> for ProjectRes {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.into_inner(),
            description: project.description,
            images: project.image_url,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectListRes {
    pub result: Vec<ProjectRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GetProjectRes {
    pub project: ProjectRes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedRes {
    pub uploaded: bool,
}

/// Multipart body of `POST /projects` (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateProjectForm {
    id: String,
    description: String,
    #[schema(value_type = Option<String>, format = Binary)]
    images: Option<Vec<u8>>,
}

/// Multipart body of `PUT /projects/{id}` (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UpdateProjectForm {
    description: String,
    #[schema(value_type = Option<String>, format = Binary)]
    images: Option<Vec<u8>>,
}

/// Multipart body of `POST /projects/{id}/image` (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ProjectImageForm {
    #[schema(value_type = String, format = Binary)]
    images: Vec<u8>,
}
