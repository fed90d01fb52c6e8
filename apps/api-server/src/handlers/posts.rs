//! Post handlers: the main feed, creation, detail, edit and image serving.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Page, PageRequest, Post, PostForm};
use quill_shared::dto::{PageQuery, PagedResponse, PostRequest, PostResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_form(req: PostRequest) -> PostForm {
    PostForm {
        text: req.text,
        group: req.group,
        image: req.image,
    }
}

/// Render one post, resolving the author username and group slug through
/// the supplied memo maps so a page of posts costs at most one lookup per
/// distinct author/group.
async fn render_post_with(
    state: &AppState,
    post: &Post,
    authors: &mut HashMap<Uuid, String>,
    groups: &mut HashMap<Uuid, String>,
) -> AppResult<PostResponse> {
    let author = match authors.get(&post.author_id) {
        Some(name) => name.clone(),
        None => {
            let name = state
                .users
                .find_by_id(post.author_id)
                .await?
                .map(|u| u.username)
                // Authors are FK-protected; an id here is a stale read at worst.
                .unwrap_or_else(|| post.author_id.to_string());
            authors.insert(post.author_id, name.clone());
            name
        }
    };

    let group = match post.group_id {
        None => None,
        Some(group_id) => match groups.get(&group_id) {
            Some(slug) => Some(slug.clone()),
            None => {
                let slug = state
                    .group_lookup
                    .find_by_id(group_id)
                    .await?
                    .map(|g| g.slug)
                    .unwrap_or_else(|| group_id.to_string());
                groups.insert(group_id, slug.clone());
                Some(slug)
            }
        },
    };

    Ok(PostResponse {
        id: post.id.to_string(),
        author,
        text: post.text.clone(),
        pub_date: post.pub_date.to_rfc3339(),
        group,
        has_image: post.image.is_some(),
    })
}

pub(crate) async fn render_post(state: &AppState, post: &Post) -> AppResult<PostResponse> {
    let mut authors = HashMap::new();
    let mut groups = HashMap::new();
    render_post_with(state, post, &mut authors, &mut groups).await
}

pub(crate) async fn render_page(
    state: &AppState,
    page: Page<Post>,
    page_number: u64,
) -> AppResult<PagedResponse<PostResponse>> {
    let mut authors = HashMap::new();
    let mut groups = HashMap::new();

    let mut items = Vec::with_capacity(page.items.len());
    for post in &page.items {
        items.push(render_post_with(state, post, &mut authors, &mut groups).await?);
    }

    Ok(PagedResponse {
        items,
        page: page_number.max(1),
        has_next: page.has_next,
    })
}

/// GET /api/posts?page=N - the main feed, newest first.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page_number = query.page.unwrap_or(1);
    let page = state.posts.feed(PageRequest::new(page_number)).await?;

    let body = render_page(&state, page, page_number).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts - create a post as the authenticated identity.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .publish(identity.user_id, to_form(body.into_inner()))
        .await?;

    let body = render_post(&state, &post).await?;
    Ok(HttpResponse::Created().json(body))
}

/// GET /api/posts/{id}
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;

    let body = render_post(&state, &post).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// PUT /api/posts/{id} - author-only edit of text/group/image.
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .edit(
            path.into_inner(),
            identity.user_id,
            to_form(body.into_inner()),
        )
        .await?;

    let body = render_post(&state, &post).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}/image - the attached image as raw bytes.
pub async fn image(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.posts.get(id).await?;

    match post.image {
        Some(image) => Ok(HttpResponse::Ok()
            .content_type(image.content_type)
            .body(image.bytes)),
        None => Err(AppError::NotFound(format!("post {id} has no image"))),
    }
}
