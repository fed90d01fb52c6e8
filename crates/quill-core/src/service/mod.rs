//! Domain services - the access-rule layer over the storage ports.
//!
//! Services own the contracts the handlers rely on: form binding, slug and
//! username resolution, author-only edits, and the pagination/ordering
//! guarantees of the feeds.

mod groups;
mod posts;

pub use groups::GroupService;
pub use posts::PostService;
