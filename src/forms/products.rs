use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::is_valid_slug;
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::forms::{double_option, non_blank, sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product title.
const TITLE_MAX_LEN: usize = 200;
const TITLE_MAX_LEN_VALIDATOR: u64 = TITLE_MAX_LEN as u64;

/// Maximum allowed length for a product description.
const DESCRIPTION_MAX_LEN: usize = 4096;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Maximum allowed length for a badge label.
const BADGE_MAX_LEN: usize = 32;
const BADGE_MAX_LEN_VALIDATOR: u64 = BADGE_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided title is empty after sanitization.
    #[error("product title cannot be empty")]
    EmptyTitle,
    /// A price field holds a negative or non-finite number.
    #[error("invalid {field}")]
    InvalidPrice { field: &'static str },
    /// The pre-discount price is lower than the selling price.
    #[error("original price {original_price} is below price {price}")]
    OriginalPriceBelowPrice { price: f64, original_price: f64 },
    /// The category reference is not a slug.
    #[error("invalid category slug `{value}`")]
    InvalidCategory { value: String },
    /// The edit form does not change anything.
    #[error("no fields to update")]
    EmptyUpdate,
}

/// Payload emitted when submitting the "Add product" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Title entered by the admin.
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    pub title: String,
    /// Optional longer description.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    /// Selling price.
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Optional pre-discount price.
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub original_price: Option<f64>,
    /// Optional rating, defaulted when absent.
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: Option<f64>,
    /// Optional picture URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Optional category slug.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional short label.
    #[validate(length(max = BADGE_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub badge: Option<String>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(ProductFormError::EmptyTitle);
        }

        let price = check_price(self.price, "price")?;
        let original_price = self
            .original_price
            .map(|value| check_price(value, "original price"))
            .transpose()?;
        check_discount(Some(price), original_price)?;

        let mut new_product = NewProduct::new(title, price);

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_description(description);
        }
        if let Some(original_price) = original_price {
            new_product = new_product.with_original_price(original_price);
        }
        if let Some(rating) = self.rating {
            new_product = new_product.with_rating(rating);
        }
        if let Some(image_url) = non_blank(self.image_url.as_deref()) {
            new_product = new_product.with_image_url(image_url);
        }
        if let Some(category) = non_blank(self.category.as_deref()) {
            new_product = new_product.with_category(check_category(category)?);
        }
        if let Some(badge) = self
            .badge
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_badge(badge);
        }

        Ok(new_product)
    }
}

/// Payload emitted when editing an existing product.
///
/// Absent fields stay unchanged; an explicit `null` clears nullable fields.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1, max = TITLE_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub original_price: Option<Option<f64>>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub badge: Option<Option<String>>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let EditProductForm {
            title,
            description,
            price,
            original_price,
            rating,
            image_url,
            category,
            badge,
        } = self;

        let mut update = UpdateProduct::new();

        if let Some(title) = title {
            let title = sanitize_inline_text(&title);
            if title.is_empty() {
                return Err(ProductFormError::EmptyTitle);
            }
            update = update.title(title);
        }

        if let Some(description) = description {
            let description = description
                .as_deref()
                .map(sanitize_multiline_text)
                .filter(|value| !value.is_empty());
            update = update.description(description);
        }

        if let Some(price) = price {
            update = update.price(check_price(price, "price")?);
        }

        if let Some(original_price) = original_price {
            let original_price = original_price
                .map(|value| check_price(value, "original price"))
                .transpose()?;
            check_discount(update.price, original_price)?;
            update = update.original_price(original_price);
        }

        if let Some(rating) = rating {
            update = update.rating(rating);
        }

        if let Some(image_url) = image_url {
            update = update.image_url(non_blank(image_url.as_deref()));
        }

        if let Some(category) = category {
            let category = non_blank(category.as_deref())
                .map(check_category)
                .transpose()?;
            update = update.category(category);
        }

        if let Some(badge) = badge {
            let badge = badge
                .as_deref()
                .map(sanitize_inline_text)
                .filter(|value| !value.is_empty());
            update = update.badge(badge);
        }

        if update.is_empty() {
            return Err(ProductFormError::EmptyUpdate);
        }

        Ok(update)
    }
}

/// Checks the prices `stored` would carry once `update` is applied.
pub fn check_update_against(update: &UpdateProduct, stored: &Product) -> ProductFormResult<()> {
    let price = update.price.unwrap_or(stored.price);
    let original_price = update.original_price.unwrap_or(stored.original_price);

    check_discount(Some(price), original_price)
}

fn check_price(value: f64, field: &'static str) -> ProductFormResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ProductFormError::InvalidPrice { field })
    }
}

fn check_discount(price: Option<f64>, original_price: Option<f64>) -> ProductFormResult<()> {
    match (price, original_price) {
        (Some(price), Some(original_price)) if original_price < price => {
            Err(ProductFormError::OriginalPriceBelowPrice {
                price,
                original_price,
            })
        }
        _ => Ok(()),
    }
}

fn check_category(value: String) -> ProductFormResult<String> {
    if is_valid_slug(&value) {
        Ok(value)
    } else {
        Err(ProductFormError::InvalidCategory { value })
    }
}
