//! Post pages: list, detail, create, update and delete.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use board_core::DomainError;
use board_core::domain::Post;
use board_core::form::{FieldErrors, FormError, PostForm, PostInput};
use board_core::ports::BaseRepository;

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{
    POST_LIST_PATH, PostDetailTemplate, PostFormTemplate, PostListTemplate, redirect, render,
};

async fn find_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(id).into())
}

async fn render_form(
    state: &AppState,
    heading: &'static str,
    action: String,
    input: &PostInput,
    errors: Option<&FieldErrors>,
) -> AppResult<HttpResponse> {
    let authors = state.authors.find_all().await?;
    render(PostFormTemplate::new(heading, action, input, &authors, errors))
}

/// GET /posts/
pub async fn post_list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let authors = state.authors.find_all().await?;

    render(PostListTemplate::new(&posts, &authors))
}

/// GET /posts/{id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    let author = match post.author_id {
        Some(author_id) => state.authors.find_by_id(author_id).await?,
        None => None,
    };

    render(PostDetailTemplate::new(&post, author.as_ref()))
}

/// GET /posts/new/
pub async fn post_new(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render_form(
        &state,
        "New post",
        "/posts/new/".to_string(),
        &PostInput::default(),
        None,
    )
    .await
}

/// POST /posts/new/
pub async fn post_create(
    state: web::Data<AppState>,
    body: web::Form<PostInput>,
) -> AppResult<HttpResponse> {
    let form = PostForm::new(body.into_inner());

    match form.validate(state.authors.as_ref()).await {
        Ok(post) => {
            let post = state.posts.create(post).await?;
            tracing::info!(post_id = %post.id, "Post created");
            Ok(redirect(POST_LIST_PATH))
        }
        Err(FormError::Invalid(errors)) => {
            tracing::debug!(%errors, "Rejected new post");
            render_form(
                &state,
                "New post",
                "/posts/new/".to_string(),
                form.input(),
                Some(&errors),
            )
            .await
        }
        Err(FormError::Repo(e)) => Err(e.into()),
    }
}

/// GET /posts/{id}/edit/
pub async fn post_edit(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;

    render_form(
        &state,
        "Edit post",
        format!("/posts/{}/edit/", post.id),
        &PostInput::from_post(&post),
        None,
    )
    .await
}

/// POST /posts/{id}/edit/
pub async fn post_update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Form<PostInput>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;
    let action = format!("/posts/{}/edit/", post.id);
    let form = PostForm::with_instance(body.into_inner(), post);

    match form.validate(state.authors.as_ref()).await {
        Ok(post) => {
            let post = state.posts.update(post).await?;
            tracing::info!(post_id = %post.id, "Post updated");
            Ok(redirect(POST_LIST_PATH))
        }
        Err(FormError::Invalid(errors)) => {
            tracing::debug!(%errors, "Rejected post update");
            render_form(&state, "Edit post", action, form.input(), Some(&errors)).await
        }
        Err(FormError::Repo(e)) => Err(e.into()),
    }
}

/// POST /posts/{id}/delete/
pub async fn post_delete(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner()).await?;

    state.posts.delete(post.id).await?;
    tracing::info!(post_id = %post.id, "Post deleted");

    Ok(redirect(POST_LIST_PATH))
}
