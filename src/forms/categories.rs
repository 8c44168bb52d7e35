use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory, derive_slug, is_valid_slug};
use crate::forms::{double_option, non_blank, sanitize_inline_text};

/// Maximum length allowed for a category title.
const TITLE_MAX_LEN: usize = 128;
const TITLE_MAX_LEN_VALIDATOR: u64 = TITLE_MAX_LEN as u64;

/// Maximum length allowed for a slug.
const SLUG_MAX_LEN: usize = 128;
const SLUG_MAX_LEN_VALIDATOR: u64 = SLUG_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided title is empty after sanitization.
    #[error("category title cannot be empty")]
    EmptyTitle,
    /// An explicit slug contains characters outside `[a-z0-9-]`.
    #[error("invalid slug `{value}`")]
    InvalidSlug { value: String },
    /// The slug derived from the title has no characters left.
    #[error("cannot derive a slug from `{title}`")]
    EmptySlug { title: String },
    /// The edit form does not change anything.
    #[error("no fields to update")]
    EmptyUpdate,
}

/// Form payload emitted when submitting the "Add category" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Title entered by the admin.
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    #[serde(alias = "name")]
    pub title: String,
    /// Optional explicit slug; derived from the title when blank.
    #[validate(length(max = SLUG_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub slug: Option<String>,
    /// Optional picture URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(CategoryFormError::EmptyTitle);
        }

        let slug = resolve_slug(&title, self.slug.as_deref())?;

        let mut new_category = NewCategory::new(title, slug);
        if let Some(image_url) = non_blank(self.image_url.as_deref()) {
            new_category = new_category.with_image_url(image_url);
        }

        Ok(new_category)
    }
}

/// Form payload emitted when editing a category.
///
/// A new title without a slug re-derives the slug from that title.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditCategoryForm {
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[validate(length(max = SLUG_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let mut update = UpdateCategory::new();

        match self.title {
            Some(title) => {
                let title = sanitize_inline_text(&title);
                if title.is_empty() {
                    return Err(CategoryFormError::EmptyTitle);
                }
                let slug = resolve_slug(&title, self.slug.as_deref())?;
                update = update.title(title).slug(slug);
            }
            None => {
                if let Some(slug) = non_blank(self.slug.as_deref()) {
                    update = update.slug(check_slug(slug)?);
                }
            }
        }

        if let Some(image_url) = self.image_url {
            update = update.image_url(non_blank(image_url.as_deref()));
        }

        if update.is_empty() {
            return Err(CategoryFormError::EmptyUpdate);
        }

        Ok(update)
    }
}

fn resolve_slug(title: &str, explicit: Option<&str>) -> CategoryFormResult<String> {
    if let Some(slug) = non_blank(explicit) {
        return check_slug(slug);
    }

    let slug = derive_slug(title);
    if slug.is_empty() {
        return Err(CategoryFormError::EmptySlug {
            title: title.to_string(),
        });
    }
    Ok(slug)
}

fn check_slug(value: String) -> CategoryFormResult<String> {
    if is_valid_slug(&value) {
        Ok(value)
    } else {
        Err(CategoryFormError::InvalidSlug { value })
    }
}
