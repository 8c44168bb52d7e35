use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::repository::errors::RepositoryError;

/// Row of the `categories` table as returned by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct NewCategory<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub image_url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct UpdateCategory<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<&'a str>>,
}

impl TryFrom<Category> for DomainCategory {
    type Error = RepositoryError;

    fn try_from(value: Category) -> Result<Self, Self::Error> {
        let id = value
            .id
            .ok_or_else(|| RepositoryError::InvalidRow("category row has no `id`".into()))?;

        Ok(Self {
            id,
            title: value.title.or(value.name).unwrap_or_default(),
            slug: value.slug.unwrap_or_default(),
            image_url: value.image_url,
            created_at: value.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(value: &'a DomainNewCategory) -> Self {
        Self {
            title: value.title.as_str(),
            slug: value.slug.as_str(),
            image_url: value.image_url.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCategory> for UpdateCategory<'a> {
    fn from(value: &'a DomainUpdateCategory) -> Self {
        Self {
            title: value.title.as_deref(),
            slug: value.slug.as_deref(),
            image_url: value.image_url.as_ref().map(|inner| inner.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn row_accepts_name_alias() {
        let row: Category = serde_json::from_value(json!({
            "id": 3,
            "name": "Laptops",
            "slug": "laptops",
        }))
        .expect("row should decode");

        let category = DomainCategory::try_from(row).expect("row should convert");

        assert_eq!(category.title, "Laptops");
        assert_eq!(category.name(), "Laptops");
    }

    #[test]
    fn row_with_both_names_prefers_title() {
        let row: Category = serde_json::from_value(json!({
            "id": 3,
            "title": "Laptops",
            "name": "Notebooks",
            "slug": "laptops",
        }))
        .expect("row should decode");

        let category = DomainCategory::try_from(row).expect("row should convert");

        assert_eq!(category.title, "Laptops");
    }

    #[test]
    fn update_row_skips_untouched_fields() {
        let update = DomainUpdateCategory::new().slug("tvs");

        let value = serde_json::to_value(UpdateCategory::from(&update)).expect("serialize");

        assert_eq!(value, json!({ "slug": "tvs" }));
    }
}
