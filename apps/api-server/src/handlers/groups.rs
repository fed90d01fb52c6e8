//! Group handlers: index, administrative create/delete, and group feeds.

use actix_web::{HttpResponse, web};

use quill_core::domain::{Group, PageRequest};
use quill_shared::dto::{CreateGroupRequest, GroupFeedResponse, GroupResponse, PageQuery};

use crate::handlers::posts::render_page;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(group: &Group) -> GroupResponse {
    GroupResponse {
        title: group.title.clone(),
        slug: group.slug.clone(),
        description: group.description.clone(),
    }
}

fn require_admin(identity: &Identity) -> AppResult<()> {
    if identity.has_role("admin") {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// GET /api/groups
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let groups = state.groups.list().await?;
    let body: Vec<GroupResponse> = groups.iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/groups - administrative action.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateGroupRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;

    let req = body.into_inner();
    let group = state
        .groups
        .create(&req.title, &req.slug, &req.description)
        .await?;

    Ok(HttpResponse::Created().json(to_response(&group)))
}

/// GET /api/groups/{slug}?page=N - the group and one page of its posts.
pub async fn feed(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let page_number = query.page.unwrap_or(1);

    let (group, page) = state
        .posts
        .group_feed(&slug, PageRequest::new(page_number))
        .await?;

    let body = GroupFeedResponse {
        group: to_response(&group),
        posts: render_page(&state, page, page_number).await?,
    };

    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /api/groups/{slug} - administrative action. Posts in the group
/// survive with their group reference cleared.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;

    state.groups.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
