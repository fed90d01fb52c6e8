//! Author profile feeds.

use actix_web::{HttpResponse, web};

use quill_core::domain::PageRequest;
use quill_shared::dto::{AuthorFeedResponse, PageQuery, UserResponse};

use crate::handlers::posts::render_page;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/users/{username}/posts?page=N - one author's posts, newest
/// first.
pub async fn author_feed(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let page_number = query.page.unwrap_or(1);

    let (author, page) = state
        .posts
        .author_feed(&username, PageRequest::new(page_number))
        .await?;

    let body = AuthorFeedResponse {
        author: UserResponse {
            id: author.id.to_string(),
            username: author.username,
        },
        posts: render_page(&state, page, page_number).await?,
    };

    Ok(HttpResponse::Ok().json(body))
}
