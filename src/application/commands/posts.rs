// src/application/commands/posts.rs
use crate::application::{
    dto::{posts::post_field_map, AuthenticatedAdmin, PostDto},
    error::{ApplicationError, ApplicationResult},
    permission::ensure_permitted,
    ports::time::Clock,
    recorder::{ActivityDraft, ActivityRecorder, RequestContext},
};
use crate::domain::audit::{Action, ChangeSet};
use crate::domain::post::{NewPost, PostCategory, PostRepository, PostUpdate};
use std::sync::Arc;

pub struct CreatePostCommand {
    pub title: String,
    pub body: String,
    pub category: PostCategory,
    pub published: bool,
    pub author_name: String,
}

pub struct UpdatePostCommand {
    pub post_id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<PostCategory>,
    pub published: Option<bool>,
}

pub struct PostCommandService {
    post_repo: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
    recorder: ActivityRecorder,
}

impl PostCommandService {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        clock: Arc<dyn Clock>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            post_repo,
            clock,
            recorder,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedAdmin,
        command: CreatePostCommand,
        context: RequestContext,
    ) -> ApplicationResult<PostDto> {
        ensure_permitted(actor, "posts", "create")?;

        let new_post = NewPost {
            title: command.title,
            body: command.body,
            category: command.category,
            published: command.published,
            author_name: command.author_name,
            created_at: self.clock.now(),
        };
        new_post.validate()?;

        let post = self.post_repo.insert(new_post).await?;

        self.recorder.record(
            ActivityDraft::new(Action::Create, format!("created post '{}'", post.title))
                .by(actor.id)
                .on("posts", post.id)
                .with_context(context),
        );

        Ok(post.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedAdmin,
        command: UpdatePostCommand,
        context: RequestContext,
    ) -> ApplicationResult<PostDto> {
        ensure_permitted(actor, "posts", "update")?;

        let before = self
            .post_repo
            .find_by_id(command.post_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("post {}", command.post_id)))?;

        if command.title.is_none()
            && command.body.is_none()
            && command.category.is_none()
            && command.published.is_none()
        {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        let after = self
            .post_repo
            .update(PostUpdate {
                id: command.post_id,
                title: command.title,
                body: command.body,
                category: command.category,
                published: command.published,
                updated_at: self.clock.now(),
            })
            .await?;

        self.recorder.record(
            ActivityDraft::new(Action::Update, format!("updated post '{}'", after.title))
                .by(actor.id)
                .on("posts", after.id)
                .with_changes(ChangeSet {
                    old_values: post_field_map(&before),
                    new_values: post_field_map(&after),
                })
                .with_context(context),
        );

        Ok(after.into())
    }

    pub async fn delete(
        &self,
        actor: &AuthenticatedAdmin,
        post_id: i64,
        context: RequestContext,
    ) -> ApplicationResult<()> {
        ensure_permitted(actor, "posts", "delete")?;

        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("post {post_id}")))?;

        self.post_repo.delete(post_id).await?;

        self.recorder.record(
            ActivityDraft::new(Action::Delete, format!("deleted post '{}'", post.title))
                .by(actor.id)
                .on("posts", post.id)
                .with_context(context),
        );

        Ok(())
    }
}
