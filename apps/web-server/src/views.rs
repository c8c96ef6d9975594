//! HTML views - askama templates and the view models they render.

use std::collections::HashMap;

use actix_web::{HttpResponse, http::StatusCode, http::header::ContentType};
use askama::Template;
use uuid::Uuid;

use board_core::domain::{Author, Post};
use board_core::form::{AuthorInput, FieldErrors, PostInput};

use crate::middleware::error::AppResult;

pub const POST_LIST_PATH: &str = "/posts/";
pub const AUTHOR_LIST_PATH: &str = "/authors/";

/// Render `template` as a `200 OK` HTML page.
pub fn render<T: Template>(template: T) -> AppResult<HttpResponse> {
    let body = template.render()?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

/// `302 Found` pointing at `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((actix_web::http::header::LOCATION, location))
        .finish()
}

fn format_timestamp(post: &Post) -> String {
    post.created_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn errors_for(errors: Option<&FieldErrors>, field: &str) -> Vec<String> {
    errors.map(|e| e.get(field).to_vec()).unwrap_or_default()
}

pub struct PostRowView {
    pub title: String,
    pub author_name: String,
    pub created_at: String,
    pub detail_href: String,
    pub edit_href: String,
    pub delete_href: String,
}

impl PostRowView {
    fn new(post: &Post, author_names: &HashMap<Uuid, &str>) -> Self {
        let author_name = post
            .author_id
            .and_then(|id| author_names.get(&id).copied())
            .unwrap_or_default()
            .to_string();

        Self {
            title: post.title.clone(),
            author_name,
            created_at: format_timestamp(post),
            detail_href: format!("/posts/{}/", post.id),
            edit_href: format!("/posts/{}/edit/", post.id),
            delete_href: format!("/posts/{}/delete/", post.id),
        }
    }
}

#[derive(Template)]
#[template(path = "posts/list.html")]
pub struct PostListTemplate {
    pub page_title: &'static str,
    pub posts: Vec<PostRowView>,
}

impl PostListTemplate {
    pub fn new(posts: &[Post], authors: &[Author]) -> Self {
        let author_names: HashMap<Uuid, &str> = authors
            .iter()
            .map(|author| (author.id, author.name.as_str()))
            .collect();

        Self {
            page_title: "List of Posts",
            posts: posts
                .iter()
                .map(|post| PostRowView::new(post, &author_names))
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "posts/detail.html")]
pub struct PostDetailTemplate {
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub created_at: String,
    pub edit_href: String,
    pub delete_href: String,
}

impl PostDetailTemplate {
    pub fn new(post: &Post, author: Option<&Author>) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            author_name: author.map(|a| a.name.clone()).unwrap_or_default(),
            created_at: format_timestamp(post),
            edit_href: format!("/posts/{}/edit/", post.id),
            delete_href: format!("/posts/{}/delete/", post.id),
        }
    }
}

pub struct AuthorOptionView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "posts/form.html")]
pub struct PostFormTemplate {
    pub heading: &'static str,
    pub action: String,
    pub title: String,
    pub content: String,
    pub authors: Vec<AuthorOptionView>,
    pub title_errors: Vec<String>,
    pub content_errors: Vec<String>,
    pub author_errors: Vec<String>,
}

impl PostFormTemplate {
    pub fn new(
        heading: &'static str,
        action: String,
        input: &PostInput,
        authors: &[Author],
        errors: Option<&FieldErrors>,
    ) -> Self {
        let chosen = input.author_ref();
        let authors = authors
            .iter()
            .map(|author| {
                let id = author.id.to_string();
                AuthorOptionView {
                    selected: chosen == Some(id.as_str()),
                    id,
                    name: author.name.clone(),
                }
            })
            .collect();

        Self {
            heading,
            action,
            title: input.title.clone(),
            content: input.content.clone(),
            authors,
            title_errors: errors_for(errors, "title"),
            content_errors: errors_for(errors, "content"),
            author_errors: errors_for(errors, "author"),
        }
    }
}

pub struct AuthorRowView {
    pub name: String,
    pub post_count: usize,
    pub delete_href: String,
}

#[derive(Template)]
#[template(path = "authors/list.html")]
pub struct AuthorListTemplate {
    pub authors: Vec<AuthorRowView>,
    pub name: String,
    pub name_errors: Vec<String>,
}

impl AuthorListTemplate {
    pub fn new(
        authors: &[Author],
        posts: &[Post],
        input: &AuthorInput,
        errors: Option<&FieldErrors>,
    ) -> Self {
        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        for author_id in posts.iter().filter_map(|post| post.author_id) {
            *counts.entry(author_id).or_default() += 1;
        }

        Self {
            authors: authors
                .iter()
                .map(|author| AuthorRowView {
                    name: author.name.clone(),
                    post_count: counts.get(&author.id).copied().unwrap_or(0),
                    delete_href: format!("/authors/{}/delete/", author.id),
                })
                .collect(),
            name: input.name.clone(),
            name_errors: errors_for(errors, "name"),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub reason: String,
    pub detail: String,
}

impl ErrorTemplate {
    pub fn new(status: StatusCode, detail: &str) -> Self {
        Self {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_string(),
            detail: detail.to_string(),
        }
    }
}
