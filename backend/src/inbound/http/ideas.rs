//! Idea capture API handlers.
//!
//! ```text
//! GET    /ideas       List the caller's ideas, newest first
//! POST   /ideas       {"content":"..."} capture a new idea
//! DELETE /ideas/{id}  Delete an owned idea
//! ```
//!
//! Every endpoint accepts either a bearer credential or an `X-Session-Id`
//! header; with neither, the request is rejected before any service runs.

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{IdeaCommand, IdeaQuery};
use crate::domain::{Error, Idea, IdeaContent, IdeaId, IdeaValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::RequestIdentity;
use crate::inbound::http::state::HttpState;

/// Body for capturing a new idea.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateIdeaRequest {
    /// Idea text; trimmed, non-empty, at most 1000 characters.
    pub content: String,
}

/// Public idea representation.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdeaBody {
    /// Stable idea identifier.
    pub id: Uuid,
    /// Captured text.
    pub content: String,
    /// Capture timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Idea> for IdeaBody {
    fn from(idea: &Idea) -> Self {
        Self {
            id: idea.id().as_uuid(),
            content: idea.content().as_ref().to_owned(),
            created_at: idea.created_at(),
        }
    }
}

/// Deletion confirmation payload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    /// Human-readable confirmation.
    pub message: String,
}

fn map_content_error(err: IdeaValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": "content" }))
}

/// List the caller's ideas.
#[utoipa::path(
    get,
    path = "/ideas",
    responses(
        (status = 200, description = "The caller's ideas, newest first", body = [IdeaBody]),
        (status = 400, description = "No identity supplied", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    params(
        ("X-Session-Id" = Option<String>, Header, description = "Anonymous session identity")
    ),
    tags = ["ideas"],
    operation_id = "listIdeas"
)]
#[get("")]
pub async fn list_ideas(
    state: web::Data<HttpState>,
    identity: RequestIdentity,
) -> ApiResult<web::Json<Vec<IdeaBody>>> {
    let owner = identity.require()?;
    let ideas = state.idea_query.list(&owner).await?;
    Ok(web::Json(ideas.iter().map(IdeaBody::from).collect()))
}

/// Capture a new idea.
#[utoipa::path(
    post,
    path = "/ideas",
    request_body = CreateIdeaRequest,
    responses(
        (status = 201, description = "Idea captured", body = IdeaBody),
        (status = 400, description = "Invalid content or no identity", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    params(
        ("X-Session-Id" = Option<String>, Header, description = "Anonymous session identity")
    ),
    tags = ["ideas"],
    operation_id = "createIdea"
)]
#[post("")]
pub async fn create_idea(
    state: web::Data<HttpState>,
    identity: RequestIdentity,
    payload: web::Json<CreateIdeaRequest>,
) -> ApiResult<HttpResponse> {
    let owner = identity.require()?;
    let content = IdeaContent::new(&payload.content).map_err(map_content_error)?;
    let idea = state.ideas.create(content, &owner).await?;
    Ok(HttpResponse::Created().json(IdeaBody::from(&idea)))
}

/// Delete an owned idea.
#[utoipa::path(
    delete,
    path = "/ideas/{id}",
    responses(
        (status = 200, description = "Idea deleted", body = DeleteResponse),
        (status = 400, description = "No identity supplied", body = Error),
        (status = 404, description = "Idea missing or owned by someone else", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    params(
        ("id" = Uuid, Path, description = "Idea identifier"),
        ("X-Session-Id" = Option<String>, Header, description = "Anonymous session identity")
    ),
    tags = ["ideas"],
    operation_id = "deleteIdea"
)]
#[delete("/{id}")]
pub async fn delete_idea(
    state: web::Data<HttpState>,
    identity: RequestIdentity,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let owner = identity.require()?;
    state
        .ideas
        .delete(&IdeaId::from_uuid(id.into_inner()), &owner)
        .await?;
    Ok(web::Json(DeleteResponse {
        message: "idea deleted".to_owned(),
    }))
}
