use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::query::{Column, ListQuery};

/// Image shown when a product has no picture of its own.
pub const PRODUCT_PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=300";

/// Rating stored for new products unless the admin supplies one.
pub const DEFAULT_RATING: f64 = 4.0;

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// Domain representation of a product listed in the storefront.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// Human-readable title of the product.
    pub title: String,
    /// Optional longer description shown on the product page.
    pub description: Option<String>,
    /// Current selling price.
    pub price: f64,
    /// Price before the discount, when the product is on sale.
    pub original_price: Option<f64>,
    /// Average rating between 0 and 5.
    pub rating: f64,
    /// Optional picture of the product.
    pub image_url: Option<String>,
    /// Slug of the category the product belongs to.
    pub category: Option<String>,
    /// Optional short label such as "New" or "Sale".
    pub badge: Option<String>,
    /// Timestamp for when the product record was created.
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Picture to display, falling back to the shared placeholder.
    pub fn image_url_or_placeholder(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(PRODUCT_PLACEHOLDER_IMAGE)
    }
}

/// Payload required to insert a new product.
///
/// Identity and creation timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub rating: f64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub badge: Option<String>,
}

impl NewProduct {
    /// Build a new product payload with the supplied title and price.
    pub fn new(title: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            description: None,
            price,
            original_price: None,
            rating: DEFAULT_RATING,
            image_url: None,
            category: None,
            badge: None,
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach the pre-discount price.
    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Override the default rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Attach a picture URL.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Place the product in the category identified by `slug`.
    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    /// Attach a short label.
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }
}

/// Patch data applied when updating an existing product.
///
/// `None` leaves a field untouched; `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub original_price: Option<Option<f64>>,
    pub rating: Option<f64>,
    pub image_url: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub badge: Option<Option<String>>,
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the patch would leave the product unchanged.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether the patch touches `price` or `original_price`.
    pub fn changes_prices(&self) -> bool {
        self.price.is_some() || self.original_price.is_some()
    }

    /// Update the product title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Update the description, using `None` to clear an existing value.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|value| value.into()));
        self
    }

    /// Update the price.
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Update the pre-discount price, using `None` to take the product off sale.
    pub fn original_price(mut self, original_price: Option<f64>) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Update the rating.
    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Update the picture, using `None` to fall back to the placeholder.
    pub fn image_url(mut self, image_url: Option<impl Into<String>>) -> Self {
        self.image_url = Some(image_url.map(|value| value.into()));
        self
    }

    /// Move the product to another category, using `None` to detach it.
    pub fn category(mut self, slug: Option<impl Into<String>>) -> Self {
        self.category = Some(slug.map(|value| value.into()));
        self
    }

    /// Update the label, using `None` to remove it.
    pub fn badge(mut self, badge: Option<impl Into<String>>) -> Self {
        self.badge = Some(badge.map(|value| value.into()));
        self
    }
}

/// Columns of the `products` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductColumn {
    Id,
    Title,
    Price,
    OriginalPrice,
    Rating,
    Category,
    Badge,
    CreatedAt,
}

impl Column for ProductColumn {
    fn name(&self) -> &'static str {
        match self {
            ProductColumn::Id => "id",
            ProductColumn::Title => "title",
            ProductColumn::Price => "price",
            ProductColumn::OriginalPrice => "original_price",
            ProductColumn::Rating => "rating",
            ProductColumn::Category => "category",
            ProductColumn::Badge => "badge",
            ProductColumn::CreatedAt => "created_at",
        }
    }
}

/// Query definition used to list products.
pub type ProductListQuery = ListQuery<ProductColumn>;
