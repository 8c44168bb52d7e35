use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::query::{Column, ListQuery};

/// Image shown when a category has no picture of its own.
pub const CATEGORY_PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=200";

/// Domain representation of a storefront category.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// Human-readable title. Older rows call this `name`.
    pub title: String,
    /// URL-safe identifier used for routing and by products.
    pub slug: String,
    /// Optional picture of the category.
    pub image_url: Option<String>,
    /// Timestamp for when the category record was created.
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Alias of [`Category::title`] for callers that know it as the name.
    pub fn name(&self) -> &str {
        &self.title
    }

    /// Picture to display, falling back to the shared placeholder.
    pub fn image_url_or_placeholder(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(CATEGORY_PLACEHOLDER_IMAGE)
    }
}

/// Payload required to insert a new category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub title: String,
    pub slug: String,
    pub image_url: Option<String>,
}

impl NewCategory {
    /// Build a new category payload with an explicit slug.
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            image_url: None,
        }
    }

    /// Build a new category payload whose slug is derived from the title.
    pub fn from_title(title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = derive_slug(&title);
        Self::new(title, slug)
    }

    /// Attach a picture URL to the category payload.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Patch data applied when updating an existing category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCategory {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub image_url: Option<Option<String>>,
}

impl UpdateCategory {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the patch would leave the category unchanged.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Update the category title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Update the slug.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Update the picture, using `None` to fall back to the placeholder.
    pub fn image_url(mut self, image_url: Option<impl Into<String>>) -> Self {
        self.image_url = Some(image_url.map(|value| value.into()));
        self
    }
}

/// Columns of the `categories` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryColumn {
    Id,
    Title,
    Slug,
    CreatedAt,
}

impl Column for CategoryColumn {
    fn name(&self) -> &'static str {
        match self {
            CategoryColumn::Id => "id",
            CategoryColumn::Title => "title",
            CategoryColumn::Slug => "slug",
            CategoryColumn::CreatedAt => "created_at",
        }
    }
}

/// Query definition used to list categories.
pub type CategoryListQuery = ListQuery<CategoryColumn>;

/// Derive a URL-safe slug from a human-readable title.
///
/// Lower-cases the title, joins whitespace-separated words with a single
/// hyphen and drops everything outside `[a-z0-9-]`. Hyphen runs are
/// collapsed and trimmed from both ends, so the result may be empty.
pub fn derive_slug(title: &str) -> String {
    let joined = title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    let mut slug = String::with_capacity(joined.len());
    for ch in joined.chars() {
        match ch {
            'a'..='z' | '0'..='9' => slug.push(ch),
            '-' if !slug.is_empty() && !slug.ends_with('-') => slug.push('-'),
            _ => {}
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Whether `slug` only contains characters allowed in a slug.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|ch| matches!(ch, 'a'..='z' | '0'..='9' | '-'))
}
