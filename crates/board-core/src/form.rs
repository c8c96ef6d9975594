//! Form binding and validation.
//!
//! Forms take raw, untrusted field values and turn them into domain entities
//! ready to persist, or into a set of field-level errors. Nothing is written
//! here; the caller decides whether to save the validated value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{AUTHOR_NAME_MAX_LENGTH, Author, Post, TITLE_MAX_LENGTH};
use crate::error::RepoError;
use crate::ports::{AuthorRepository, BaseRepository};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

fn too_long_message(max: usize, actual: usize) -> String {
    format!("Ensure this value has at most {max} characters (it has {actual}).")
}

/// Field-level validation errors, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    /// Messages recorded for `field`, empty when the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Why a form did not produce an entity.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Validation failed: {0}")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Raw post fields as submitted by a client.
///
/// Missing fields deserialize as empty so they surface as validation
/// errors rather than as a malformed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub author: Option<String>,
}

impl PostInput {
    /// Initial values for editing an existing post.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author_id.map(|id| id.to_string()),
        }
    }

    /// The submitted author reference, if one was chosen.
    pub fn author_ref(&self) -> Option<&str> {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Form for creating and updating posts.
#[derive(Debug, Clone)]
pub struct PostForm {
    input: PostInput,
    instance: Option<Post>,
}

impl PostForm {
    /// Bind input for a post that does not exist yet.
    pub fn new(input: PostInput) -> Self {
        Self {
            input,
            instance: None,
        }
    }

    /// Bind input onto an existing post. The result keeps the post's
    /// identity and creation time.
    pub fn with_instance(input: PostInput, instance: Post) -> Self {
        Self {
            input,
            instance: Some(instance),
        }
    }

    pub fn input(&self) -> &PostInput {
        &self.input
    }

    pub fn instance(&self) -> Option<&Post> {
        self.instance.as_ref()
    }

    /// Validate the bound input and build the post it describes.
    ///
    /// All field errors are collected before returning. The author
    /// reference is checked against `authors`.
    pub async fn validate(&self, authors: &dyn AuthorRepository) -> Result<Post, FormError> {
        let mut errors = FieldErrors::new();

        let title = self.input.title.trim();
        if title.is_empty() {
            errors.add("title", REQUIRED_MESSAGE);
        } else {
            let length = title.chars().count();
            if length > TITLE_MAX_LENGTH {
                errors.add("title", too_long_message(TITLE_MAX_LENGTH, length));
            }
        }

        let content = self.input.content.trim();
        if content.is_empty() {
            errors.add("content", REQUIRED_MESSAGE);
        }

        let author_id = match self.input.author_ref() {
            None => None,
            Some(raw) => {
                let known = match Uuid::parse_str(raw) {
                    Ok(id) => authors.find_by_id(id).await?.map(|author| author.id),
                    Err(_) => None,
                };
                if known.is_none() {
                    errors.add("author", INVALID_CHOICE_MESSAGE);
                }
                known
            }
        };

        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        let post = match &self.instance {
            Some(existing) => Post {
                title: title.to_string(),
                content: content.to_string(),
                author_id,
                ..existing.clone()
            },
            None => Post::new(title.to_string(), content.to_string(), author_id),
        };

        Ok(post)
    }
}

/// Raw author fields as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorInput {
    pub name: String,
}

/// Form for creating authors.
#[derive(Debug, Clone)]
pub struct AuthorForm {
    input: AuthorInput,
}

impl AuthorForm {
    pub fn new(input: AuthorInput) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &AuthorInput {
        &self.input
    }

    pub fn validate(&self) -> Result<Author, FormError> {
        let mut errors = FieldErrors::new();

        let name = self.input.name.trim();
        if name.is_empty() {
            errors.add("name", REQUIRED_MESSAGE);
        } else {
            let length = name.chars().count();
            if length > AUTHOR_NAME_MAX_LENGTH {
                errors.add("name", too_long_message(AUTHOR_NAME_MAX_LENGTH, length));
            }
        }

        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        Ok(Author::new(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Author lookup backed by a fixed list.
    struct FixedAuthors(Vec<Author>);

    #[async_trait]
    impl BaseRepository<Author, Uuid> for FixedAuthors {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
            Ok(self.0.iter().find(|a| a.id == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Author>, RepoError> {
            Ok(self.0.clone())
        }

        async fn create(&self, entity: Author) -> Result<Author, RepoError> {
            Ok(entity)
        }

        async fn update(&self, entity: Author) -> Result<Author, RepoError> {
            Ok(entity)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl AuthorRepository for FixedAuthors {
        async fn delete_with_posts(&self, _id: Uuid) -> Result<u64, RepoError> {
            Ok(0)
        }
    }

    fn input(title: &str, content: &str, author: Option<&str>) -> PostInput {
        PostInput {
            title: title.to_string(),
            content: content.to_string(),
            author: author.map(str::to_string),
        }
    }

    fn invalid(result: Result<Post, FormError>) -> FieldErrors {
        match result {
            Err(FormError::Invalid(errors)) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_valid_input_builds_new_post() {
        let authors = FixedAuthors(vec![]);
        let form = PostForm::new(input("  Hello ", "World", None));

        let post = form.validate(&authors).await.unwrap();

        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
        assert_eq!(post.author_id, None);
    }

    #[tokio::test]
    async fn test_empty_title_is_required() {
        let authors = FixedAuthors(vec![]);
        let errors = invalid(PostForm::new(input("   ", "World", None)).validate(&authors).await);

        assert_eq!(errors.get("title"), [REQUIRED_MESSAGE.to_string()]);
        assert!(errors.get("content").is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_are_all_reported() {
        let authors = FixedAuthors(vec![]);
        let errors = invalid(PostForm::new(PostInput::default()).validate(&authors).await);

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["content", "title"]);
    }

    #[tokio::test]
    async fn test_title_length_counts_characters() {
        let authors = FixedAuthors(vec![]);

        let exact = "é".repeat(TITLE_MAX_LENGTH);
        assert!(PostForm::new(input(&exact, "body", None)).validate(&authors).await.is_ok());

        let long = "a".repeat(TITLE_MAX_LENGTH + 1);
        let errors = invalid(PostForm::new(input(&long, "body", None)).validate(&authors).await);
        assert_eq!(
            errors.get("title"),
            ["Ensure this value has at most 255 characters (it has 256).".to_string()]
        );
    }

    #[tokio::test]
    async fn test_author_reference_must_exist() {
        let known = Author::new("Ada".to_string());
        let authors = FixedAuthors(vec![known.clone()]);

        let ok = PostForm::new(input("t", "c", Some(&known.id.to_string())))
            .validate(&authors)
            .await
            .unwrap();
        assert_eq!(ok.author_id, Some(known.id));

        let unknown = Uuid::new_v4().to_string();
        let errors = invalid(
            PostForm::new(input("t", "c", Some(&unknown)))
                .validate(&authors)
                .await,
        );
        assert_eq!(errors.get("author"), [INVALID_CHOICE_MESSAGE.to_string()]);

        let garbage = invalid(
            PostForm::new(input("t", "c", Some("nope")))
                .validate(&authors)
                .await,
        );
        assert_eq!(garbage.get("author"), [INVALID_CHOICE_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_blank_author_means_anonymous() {
        let authors = FixedAuthors(vec![]);
        let post = PostForm::new(input("t", "c", Some("  ")))
            .validate(&authors)
            .await
            .unwrap();

        assert_eq!(post.author_id, None);
    }

    #[tokio::test]
    async fn test_bound_instance_keeps_identity() {
        let authors = FixedAuthors(vec![]);
        let existing = Post::new("Old".to_string(), "Old body".to_string(), None);

        let form = PostForm::with_instance(input("New", "Old body", None), existing.clone());
        let updated = form.validate(&authors).await.unwrap();

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.created_at, existing.created_at);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, "Old body");
    }

    #[tokio::test]
    async fn test_from_post_prefills_author() {
        let author_id = Uuid::new_v4();
        let post = Post::new("T".to_string(), "C".to_string(), Some(author_id));

        let initial = PostInput::from_post(&post);

        assert_eq!(initial.title, "T");
        assert_eq!(initial.author_ref(), Some(author_id.to_string().as_str()));
    }

    #[test]
    fn test_author_form_rules() {
        let author = AuthorForm::new(AuthorInput {
            name: " Grace ".to_string(),
        })
        .validate()
        .unwrap();
        assert_eq!(author.name, "Grace");

        match AuthorForm::new(AuthorInput::default()).validate() {
            Err(FormError::Invalid(errors)) => {
                assert_eq!(errors.get("name"), [REQUIRED_MESSAGE.to_string()]);
                assert_eq!(errors.to_string(), "name: This field is required.");
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
    }
}
