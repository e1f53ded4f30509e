//! Blog entry model.
//!
//! A [`Blog`] records its owner by id only. Read paths pair it with the
//! owner's [`UserProfile`] through [`BlogView`].

use std::fmt;

use uuid::Uuid;

use super::{UserId, UserProfile};

/// Validation errors raised while building or changing blog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogValidationError {
    /// Identifier was not a UUID.
    InvalidId,
    /// Title was missing or blank.
    EmptyTitle,
    /// Author was missing or blank.
    EmptyAuthor,
    /// URL was missing or blank.
    EmptyUrl,
}

impl BlogValidationError {
    /// Name of the request field the failure refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyTitle => "title",
            Self::EmptyAuthor => "author",
            Self::EmptyUrl => "url",
        }
    }
}

impl fmt::Display for BlogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "blog id must be a valid UUID"),
            other => write!(f, "{} must not be empty", other.field()),
        }
    }
}

impl std::error::Error for BlogValidationError {}

/// Stable blog identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlogId(Uuid);

impl BlogId {
    /// Parse an identifier from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BlogValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| BlogValidationError::InvalidId)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn require_text(value: String, err: BlogValidationError) -> Result<String, BlogValidationError> {
    if value.trim().is_empty() {
        Err(err)
    } else {
        Ok(value)
    }
}

/// Unvalidated input for a new blog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogDraft {
    /// Entry title.
    pub title: String,
    /// Author of the linked article.
    pub author: String,
    /// Link to the article.
    pub url: String,
    /// Initial like count; zero when absent.
    pub likes: Option<u64>,
}

/// Stored blog entry.
///
/// ## Invariants
/// - `title`, `author` and `url` are non-empty once trimmed.
/// - `owner` never changes after creation.
///
/// # Examples
/// ```
/// use bloglist::domain::{Blog, BlogDraft, BlogId, UserId};
///
/// let draft = BlogDraft {
///     title: "A".into(),
///     author: "B".into(),
///     url: "C".into(),
///     likes: None,
/// };
/// let blog = Blog::create(BlogId::random(), draft, UserId::random()).unwrap();
/// assert_eq!(blog.likes(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    id: BlogId,
    title: String,
    author: String,
    url: String,
    likes: u64,
    owner: UserId,
}

impl Blog {
    /// Validate `draft` and assign ownership to `owner`.
    pub fn create(id: BlogId, draft: BlogDraft, owner: UserId) -> Result<Self, BlogValidationError> {
        let BlogDraft {
            title,
            author,
            url,
            likes,
        } = draft;
        Ok(Self {
            id,
            title: require_text(title, BlogValidationError::EmptyTitle)?,
            author: require_text(author, BlogValidationError::EmptyAuthor)?,
            url: require_text(url, BlogValidationError::EmptyUrl)?,
            likes: likes.unwrap_or(0),
            owner,
        })
    }

    /// Rehydrate an entry read back from storage without revalidating it.
    pub fn from_stored(
        id: BlogId,
        title: String,
        author: String,
        url: String,
        likes: u64,
        owner: UserId,
    ) -> Self {
        Self {
            id,
            title,
            author,
            url,
            likes,
            owner,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> BlogId {
        self.id
    }

    /// Entry title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author of the linked article.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Link to the article.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current like count.
    pub fn likes(&self) -> u64 {
        self.likes
    }

    /// User who created the entry.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Apply a partial update, leaving the entry untouched on failure.
    pub fn apply(&mut self, changes: BlogChanges) -> Result<(), BlogValidationError> {
        let BlogChanges {
            title,
            author,
            url,
            likes,
        } = changes;
        let title = title
            .map(|t| require_text(t, BlogValidationError::EmptyTitle))
            .transpose()?;
        let author = author
            .map(|a| require_text(a, BlogValidationError::EmptyAuthor))
            .transpose()?;
        let url = url
            .map(|u| require_text(u, BlogValidationError::EmptyUrl))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(author) = author {
            self.author = author;
        }
        if let Some(url) = url {
            self.url = url;
        }
        if let Some(likes) = likes {
            self.likes = likes;
        }
        Ok(())
    }
}

/// Partial update for an existing entry. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement author.
    pub author: Option<String>,
    /// Replacement URL.
    pub url: Option<String>,
    /// Replacement like count.
    pub likes: Option<u64>,
}

/// Blog entry paired with its owner's public profile.
///
/// `owner` is `None` when the owning user record no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogView {
    /// The entry itself.
    pub blog: Blog,
    /// Owner profile, when it could be resolved.
    pub owner: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    fn sample_draft() -> BlogDraft {
        BlogDraft {
            title: "Go To Statement Considered Harmful".to_owned(),
            author: "Edsger W. Dijkstra".to_owned(),
            url: "https://example.com/goto".to_owned(),
            likes: None,
        }
    }

    #[fixture]
    fn draft() -> BlogDraft {
        sample_draft()
    }

    #[fixture]
    fn blog(draft: BlogDraft) -> Blog {
        Blog::create(BlogId::random(), draft, UserId::random()).expect("valid draft")
    }

    #[rstest]
    fn create_defaults_likes_to_zero(blog: Blog) {
        assert_eq!(blog.likes(), 0);
    }

    #[rstest]
    fn create_keeps_explicit_likes(mut draft: BlogDraft) {
        draft.likes = Some(7);
        let blog = Blog::create(BlogId::random(), draft, UserId::random()).expect("valid draft");
        assert_eq!(blog.likes(), 7);
    }

    #[rstest]
    #[case::title(BlogDraft { title: " ".to_owned(), ..sample_draft() }, BlogValidationError::EmptyTitle)]
    #[case::author(BlogDraft { author: String::new(), ..sample_draft() }, BlogValidationError::EmptyAuthor)]
    #[case::url(BlogDraft { url: String::new(), ..sample_draft() }, BlogValidationError::EmptyUrl)]
    fn create_rejects_blank_fields(#[case] draft: BlogDraft, #[case] expected: BlogValidationError) {
        let err = Blog::create(BlogId::random(), draft, UserId::random())
            .expect_err("blank field must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn apply_updates_only_provided_fields(mut blog: Blog) {
        let before = blog.clone();
        blog.apply(BlogChanges {
            likes: Some(11),
            ..BlogChanges::default()
        })
        .expect("likes change is valid");

        assert_eq!(blog.likes(), 11);
        assert_eq!(blog.title(), before.title());
        assert_eq!(blog.owner(), before.owner());
    }

    #[rstest]
    fn apply_rejects_blank_strings_without_partial_writes(mut blog: Blog) {
        let before = blog.clone();
        let err = blog
            .apply(BlogChanges {
                title: Some("New title".to_owned()),
                url: Some(String::new()),
                likes: Some(3),
                ..BlogChanges::default()
            })
            .expect_err("blank url must fail");

        assert_eq!(err.field(), "url");
        assert_eq!(blog, before);
    }

    #[rstest]
    #[case("")]
    #[case("5")]
    #[case("64b7f0c2a1e4d3b2c1a09f8e")]
    fn blog_id_rejects_non_uuid_text(#[case] raw: &str) {
        assert_eq!(BlogId::new(raw), Err(BlogValidationError::InvalidId));
    }

    #[rstest]
    fn validation_message_names_field() {
        assert_eq!(
            BlogValidationError::EmptyTitle.to_string(),
            "title must not be empty"
        );
    }
}
