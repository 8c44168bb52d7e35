use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::repository::errors::RepositoryError;

/// Row of the `products` table as returned by the store.
///
/// Every column is optional: rows written by older clients may miss fields
/// or use `product_id`/`name` instead of `id`/`title`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct NewProduct<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub rating: f64,
    pub image_url: Option<&'a str>,
    pub category: Option<&'a str>,
    pub badge: Option<&'a str>,
}

/// Partial row sent with an update; absent fields are not serialized.
#[derive(Debug, Serialize)]
pub struct UpdateProduct<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Option<&'a str>>,
}

impl TryFrom<Product> for DomainProduct {
    type Error = RepositoryError;

    fn try_from(value: Product) -> Result<Self, Self::Error> {
        let id = value.id.or(value.product_id).ok_or_else(|| {
            RepositoryError::InvalidRow("product row has neither `id` nor `product_id`".into())
        })?;

        Ok(Self {
            id,
            title: value.title.or(value.name).unwrap_or_default(),
            description: value.description,
            price: value.price.unwrap_or_default(),
            original_price: value.original_price,
            rating: value.rating.unwrap_or_default(),
            image_url: value.image_url,
            category: value.category,
            badge: value.badge,
            created_at: value.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            title: value.title.as_str(),
            description: value.description.as_deref(),
            price: value.price,
            original_price: value.original_price,
            rating: value.rating,
            image_url: value.image_url.as_deref(),
            category: value.category.as_deref(),
            badge: value.badge.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            title: value.title.as_deref(),
            description: value.description.as_ref().map(|inner| inner.as_deref()),
            price: value.price,
            original_price: value.original_price,
            rating: value.rating,
            image_url: value.image_url.as_ref().map(|inner| inner.as_deref()),
            category: value.category.as_ref().map(|inner| inner.as_deref()),
            badge: value.badge.as_ref().map(|inner| inner.as_deref()),
        }
    }
}
