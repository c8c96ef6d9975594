//! Author pages: list, create, and delete (which takes the author's posts along).

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use board_core::form::{AuthorForm, AuthorInput, FieldErrors, FormError};
use board_core::ports::{AuthorRepository, BaseRepository};
use board_core::{DomainError, RepoError};

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{AUTHOR_LIST_PATH, AuthorListTemplate, redirect, render};

async fn render_list(
    state: &AppState,
    input: &AuthorInput,
    errors: Option<&FieldErrors>,
) -> AppResult<HttpResponse> {
    let authors = state.authors.find_all().await?;
    let posts = state.posts.find_all().await?;

    render(AuthorListTemplate::new(&authors, &posts, input, errors))
}

/// GET /authors/
pub async fn author_list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render_list(&state, &AuthorInput::default(), None).await
}

/// POST /authors/
pub async fn author_create(
    state: web::Data<AppState>,
    body: web::Form<AuthorInput>,
) -> AppResult<HttpResponse> {
    let form = AuthorForm::new(body.into_inner());

    match form.validate() {
        Ok(author) => {
            let author = state.authors.create(author).await?;
            tracing::info!(author_id = %author.id, "Author created");
            Ok(redirect(AUTHOR_LIST_PATH))
        }
        Err(FormError::Invalid(errors)) => render_list(&state, form.input(), Some(&errors)).await,
        Err(FormError::Repo(e)) => Err(e.into()),
    }
}

/// POST /authors/{id}/delete/
pub async fn author_delete(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let removed_posts = match state.authors.delete_with_posts(id).await {
        Ok(count) => count,
        Err(RepoError::NotFound) => return Err(DomainError::author_not_found(id).into()),
        Err(e) => return Err(e.into()),
    };
    tracing::info!(author_id = %id, removed_posts, "Author deleted");

    Ok(redirect(AUTHOR_LIST_PATH))
}
