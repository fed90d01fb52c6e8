//! Domain entities - the core business objects.

mod form;
mod group;
mod page;
mod post;
mod user;

pub use form::{BoundPost, PostForm, PostImage};
pub use group::Group;
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use post::Post;
pub use user::User;
