use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use quill_core::DomainError;
use quill_core::domain::{PageRequest, Post, PostForm, User};
use quill_core::ports::{GroupRepository, PostRepository, UserRepository};
use quill_core::service::{GroupService, PostService};

use super::{InMemoryGroupRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};

fn services() -> (PostService, GroupService, Arc<dyn UserRepository>) {
    let store = InMemoryStore::new();
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new(store.clone()));
    let groups: Arc<dyn GroupRepository> = Arc::new(InMemoryGroupRepository::new(store.clone()));
    let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new(store));

    (
        PostService::new(posts, groups.clone(), users.clone()),
        GroupService::new(groups),
        users,
    )
}

async fn register(users: &Arc<dyn UserRepository>, username: &str) -> User {
    users
        .insert(User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "hash".to_string(),
        ))
        .await
        .unwrap()
}

fn form(text: &str, group: Option<&str>) -> PostForm {
    PostForm {
        text: text.to_string(),
        group: group.map(str::to_string),
        image: None,
    }
}

#[tokio::test]
async fn publish_then_get_returns_identical_fields() {
    let (posts, _groups, users) = services();
    let author = register(&users, "auth").await;

    let created = posts
        .publish(author.id, form("Тестовый пост", None))
        .await
        .unwrap();

    let fetched = posts.get(created.id).await.unwrap();
    assert_eq!(fetched.text, "Тестовый пост");
    assert_eq!(fetched.author_id, author.id);
    assert_eq!(fetched.group_id, None);
    assert_eq!(fetched.pub_date, created.pub_date);
}

#[tokio::test]
async fn publish_binds_group_by_slug() {
    let (posts, groups, users) = services();
    let author = register(&users, "writer").await;
    let group = groups
        .create("Test group", "test-slug", "A group for tests")
        .await
        .unwrap();

    let created = posts
        .publish(author.id, form("grouped post", Some("test-slug")))
        .await
        .unwrap();

    assert_eq!(created.group_id, Some(group.id));
}

#[tokio::test]
async fn publish_with_unknown_group_is_a_field_error() {
    let (posts, _groups, users) = services();
    let author = register(&users, "writer").await;

    let err = posts
        .publish(author.id, form("text", Some("no-such-group")))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(errors) => assert!(errors.has_field("group")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn publish_by_unknown_author_fails() {
    let (posts, _groups, _users) = services();

    let err = posts
        .publish(uuid::Uuid::new_v4(), form("text", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn feed_is_newest_first_and_capped_at_page_size() {
    let (posts, _groups, users) = services();
    let author = register(&users, "prolific").await;

    for i in 0..12 {
        posts
            .publish(author.id, form(&format!("post {i}"), None))
            .await
            .unwrap();
    }

    let page = posts.feed(PageRequest::new(1)).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert!(page.has_next);

    for pair in page.items.windows(2) {
        assert!(pair[0].pub_date >= pair[1].pub_date);
    }
}

#[tokio::test]
async fn thirteen_posts_paginate_as_ten_then_three() {
    let (posts, _groups, users) = services();
    let author = register(&users, "many").await;

    for i in 0..13 {
        posts
            .publish(author.id, form(&format!("post {i}"), None))
            .await
            .unwrap();
    }

    let first = posts.feed(PageRequest::new(1)).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert!(first.has_next);

    let second = posts.feed(PageRequest::new(2)).await.unwrap();
    assert_eq!(second.items.len(), 3);
    assert!(!second.has_next);
}

#[tokio::test]
async fn page_past_the_data_is_empty_not_an_error() {
    let (posts, _groups, users) = services();
    let author = register(&users, "sparse").await;
    posts.publish(author.id, form("only one", None)).await.unwrap();

    let page = posts.feed(PageRequest::new(7)).await.unwrap();
    assert!(page.items.is_empty());
    assert!(!page.has_next);
}

#[tokio::test]
async fn absurdly_large_page_number_is_an_empty_page() {
    let (posts, _groups, users) = services();
    let author = register(&users, "pager").await;
    posts.publish(author.id, form("only one", None)).await.unwrap();

    // Large enough that a wrapping offset computation would land back
    // inside the data.
    let page = posts
        .feed(PageRequest::new(1_844_674_407_370_955_163))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert!(!page.has_next);
}

#[tokio::test]
async fn equal_timestamps_order_by_id_descending_across_pages() {
    let store = InMemoryStore::new();
    let repo = InMemoryPostRepository::new(store);

    let pub_date = chrono::Utc::now();
    let author_id = uuid::Uuid::new_v4();

    let mut ids = Vec::new();
    for i in 0..12 {
        let post = Post {
            id: uuid::Uuid::new_v4(),
            author_id,
            text: format!("post {i}"),
            pub_date,
            group_id: None,
            image: None,
        };
        ids.push(post.id);
        repo.insert(post).await.unwrap();
    }

    // All twelve share one pub_date, so the listing falls entirely to the
    // id tie-break.
    ids.sort();
    ids.reverse();

    let first = repo.list_all(PageRequest::new(1)).await.unwrap();
    let second = repo.list_all(PageRequest::new(2)).await.unwrap();

    let listed: Vec<_> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|p| p.id)
        .collect();

    assert_eq!(listed, ids);
}

#[tokio::test]
async fn post_appears_only_in_its_own_group_feed() {
    let (posts, groups, users) = services();
    let author = register(&users, "grouper").await;
    groups.create("Group A", "group-a", "first").await.unwrap();
    groups.create("Group B", "group-b", "second").await.unwrap();

    let created = posts
        .publish(author.id, form("belongs to A", Some("group-a")))
        .await
        .unwrap();

    let (_, feed_a) = posts.group_feed("group-a", PageRequest::new(1)).await.unwrap();
    assert!(feed_a.items.iter().any(|p| p.id == created.id));

    let (_, feed_b) = posts.group_feed("group-b", PageRequest::new(1)).await.unwrap();
    assert!(feed_b.items.is_empty());
}

#[tokio::test]
async fn group_feed_for_unknown_slug_is_not_found() {
    let (posts, _groups, _users) = services();

    let err = posts
        .group_feed("missing", PageRequest::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn author_feed_filters_by_username() {
    let (posts, _groups, users) = services();
    let alice = register(&users, "alice").await;
    let bob = register(&users, "bob").await;

    posts.publish(alice.id, form("by alice", None)).await.unwrap();
    posts.publish(bob.id, form("by bob", None)).await.unwrap();

    let (author, page) = posts
        .author_feed("alice", PageRequest::new(1))
        .await
        .unwrap();

    assert_eq!(author.id, alice.id);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].text, "by alice");
}

#[tokio::test]
async fn author_feed_for_unknown_username_is_not_found() {
    let (posts, _groups, _users) = services();

    let err = posts
        .author_feed("nobody", PageRequest::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn edit_by_author_replaces_editable_fields_only() {
    let (posts, groups, users) = services();
    let author = register(&users, "editor").await;
    groups.create("Group", "the-group", "desc").await.unwrap();

    let created = posts.publish(author.id, form("before", None)).await.unwrap();

    let edited = posts
        .edit(created.id, author.id, form("after", Some("the-group")))
        .await
        .unwrap();

    assert_eq!(edited.text, "after");
    assert!(edited.group_id.is_some());
    assert_eq!(edited.author_id, created.author_id);
    assert_eq!(edited.pub_date, created.pub_date);
}

#[tokio::test]
async fn edit_by_non_author_is_denied_and_post_unchanged() {
    let (posts, _groups, users) = services();
    let author = register(&users, "owner").await;
    let intruder = register(&users, "intruder").await;

    let created = posts.publish(author.id, form("original", None)).await.unwrap();

    let err = posts
        .edit(created.id, intruder.id, form("hijacked", None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PermissionDenied));

    let unchanged = posts.get(created.id).await.unwrap();
    assert_eq!(unchanged.text, "original");
    assert_eq!(unchanged.author_id, author.id);
}

#[tokio::test]
async fn edit_of_missing_post_is_not_found() {
    let (posts, _groups, users) = services();
    let author = register(&users, "someone").await;

    let err = posts
        .edit(uuid::Uuid::new_v4(), author.id, form("text", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn edit_with_empty_text_is_rejected() {
    let (posts, _groups, users) = services();
    let author = register(&users, "writer").await;
    let created = posts.publish(author.id, form("original", None)).await.unwrap();

    let err = posts
        .edit(created.id, author.id, form("   ", None))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(errors) => assert!(errors.has_field("text")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn deleting_a_group_clears_the_post_group_but_keeps_the_post() {
    let (posts, groups, users) = services();
    let author = register(&users, "survivor").await;
    groups.create("Doomed", "doomed", "soon gone").await.unwrap();

    let created = posts
        .publish(author.id, form("outlives its group", Some("doomed")))
        .await
        .unwrap();
    assert!(created.group_id.is_some());

    groups.delete("doomed").await.unwrap();

    let survived = posts.get(created.id).await.unwrap();
    assert_eq!(survived.group_id, None);
    assert_eq!(survived.text, "outlives its group");
}

#[tokio::test]
async fn duplicate_group_slug_is_rejected() {
    let (_posts, groups, _users) = services();
    groups.create("First", "same-slug", "one").await.unwrap();

    let err = groups
        .create("Second", "same-slug", "two")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Duplicate(_)));
}

#[tokio::test]
async fn group_create_validates_fields() {
    let (_posts, groups, _users) = services();

    let err = groups.create("", "bad slug!", "").await.unwrap_err();

    match err {
        DomainError::Validation(errors) => {
            assert!(errors.has_field("title"));
            assert!(errors.has_field("slug"));
            assert!(errors.has_field("description"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn published_image_round_trips_through_get() {
    let (posts, _groups, users) = services();
    let author = register(&users, "photographer").await;

    let png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";
    let created = posts
        .publish(
            author.id,
            PostForm {
                text: "with image".to_string(),
                group: None,
                image: Some(BASE64.encode(png)),
            },
        )
        .await
        .unwrap();

    let fetched = posts.get(created.id).await.unwrap();
    let image = fetched.image.unwrap();
    assert_eq!(image.content_type, "image/png");
    assert_eq!(image.bytes, png);
}
