#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::database::entity::{group, post};
    use crate::database::postgres_repo::{PostgresGroupRepository, PostgresPostRepository};
    use quill_core::domain::{PageRequest, Post};
    use quill_core::ports::{GroupRepository, PostRepository};

    fn post_row(text: &str) -> post::Model {
        post::Model {
            id: uuid::Uuid::new_v4(),
            author_id: uuid::Uuid::new_v4(),
            text: text.to_owned(),
            pub_date: chrono::Utc::now().into(),
            group_id: None,
            image: None,
            image_content_type: None,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let row = post_row("Test post");
        let post_id = row.id;
        let author_id = row.author_id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.text, "Test post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.author_id, author_id);
        assert!(post.image.is_none());
    }

    #[tokio::test]
    async fn test_list_all_overfetch_sets_has_next() {
        // The query asks for page_size + 1 rows; eleven rows back means a
        // second page exists.
        let rows: Vec<post::Model> = (0..11).map(|i| post_row(&format!("post {i}"))).collect();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![rows])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let page = repo.list_all(PageRequest::new(1)).await.unwrap();
        assert_eq!(page.items.len(), 10);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn test_find_group_by_slug() {
        let group_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![group::Model {
                id: group_id,
                title: "Test group".to_owned(),
                slug: "test-slug".to_owned(),
                description: "About the group".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresGroupRepository::new(db);

        let group = repo.find_by_slug("test-slug").await.unwrap().unwrap();
        assert_eq!(group.id, group_id);
        assert_eq!(group.title, "Test group");
    }
}
