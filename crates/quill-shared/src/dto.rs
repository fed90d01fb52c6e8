//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Body for creating or editing a post. The image travels base64-encoded;
/// the server decodes and sniffs it before anything is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub text: String,
    /// Slug of the group the post belongs to, if any.
    #[serde(default)]
    pub group: Option<String>,
    /// Base64-encoded image payload, if any.
    #[serde(default)]
    pub image: Option<String>,
}

/// A post as rendered in feeds and detail views. Image bytes are not
/// inlined; `has_image` signals that `/api/posts/{id}/image` will serve one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub text: String,
    pub pub_date: String,
    pub group: Option<String>,
    pub has_image: bool,
}

/// Request to create a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A group as rendered in the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// `?page=N` query parameter for list endpoints; 1-based, defaults to 1.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u64>,
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub has_next: bool,
}

/// A group feed page: the group plus one page of its posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFeedResponse {
    pub group: GroupResponse,
    pub posts: PagedResponse<PostResponse>,
}

/// An author profile page: the author plus one page of their posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorFeedResponse {
    pub author: UserResponse,
    pub posts: PagedResponse<PostResponse>,
}
