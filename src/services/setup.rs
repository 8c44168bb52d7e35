use serde::Serialize;

use crate::domain::category::{CATEGORY_PLACEHOLDER_IMAGE, NewCategory};
use crate::domain::product::{NewProduct, PRODUCT_PLACEHOLDER_IMAGE};
use crate::repository::{CategoryWriter, ProductWriter};

/// Result of inserting one batch of sample records.
#[derive(Debug, Default, Clone, Serialize, PartialEq)]
pub struct BatchOutcome {
    /// Number of rows the store reported as inserted.
    pub inserted: usize,
    /// Store message when the batch was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a catalog seeding run.
#[derive(Debug, Default, Clone, Serialize, PartialEq)]
pub struct SeedReport {
    pub categories: BatchOutcome,
    pub products: BatchOutcome,
}

/// Sample categories inserted by [`seed_catalog`].
pub fn sample_categories() -> Vec<NewCategory> {
    [
        ("Televisions", "televisions"),
        ("Laptops", "laptops"),
        ("Smartphones", "smartphones"),
        ("Refrigerators", "refrigerators"),
        ("Washing Machines", "washing-machines"),
        ("Air Conditioners", "air-conditioners"),
    ]
    .into_iter()
    .map(|(title, slug)| NewCategory::new(title, slug).with_image_url(CATEGORY_PLACEHOLDER_IMAGE))
    .collect()
}

/// Sample products inserted by [`seed_catalog`].
pub fn sample_products() -> Vec<NewProduct> {
    [
        (
            "Samsung 55-inch 4K Smart TV",
            "Experience stunning 4K resolution and smart features",
            49999.0,
            59999.0,
            4.5,
            "televisions",
        ),
        (
            "Apple iPhone 14 Pro",
            "The latest iPhone with advanced camera system",
            119900.0,
            129900.0,
            4.8,
            "smartphones",
        ),
        (
            "Dell XPS 13 Laptop",
            "Powerful and portable laptop for professionals",
            89990.0,
            99990.0,
            4.6,
            "laptops",
        ),
        (
            "Sony WH-1000XM5 Headphones",
            "Premium noise-cancelling headphones",
            29990.0,
            34990.0,
            4.7,
            "accessories",
        ),
    ]
    .into_iter()
    .map(|(title, description, price, original_price, rating, category)| {
        NewProduct::new(title, price)
            .with_description(description)
            .with_original_price(original_price)
            .with_rating(rating)
            .with_image_url(PRODUCT_PLACEHOLDER_IMAGE)
            .with_category(category)
    })
    .collect()
}

/// Inserts the sample catalog.
///
/// Each batch is attempted independently; a rejected batch is reported in
/// the summary and does not stop the other one.
pub async fn seed_catalog<R>(repo: &R) -> SeedReport
where
    R: CategoryWriter + ProductWriter + ?Sized,
{
    let categories = match repo.create_categories(&sample_categories()).await {
        Ok(rows) => {
            log::info!("Seeded {} categories", rows.len());
            BatchOutcome {
                inserted: rows.len(),
                error: None,
            }
        }
        Err(err) => {
            log::warn!("Categories may already exist, continuing: {err}");
            BatchOutcome {
                inserted: 0,
                error: Some(err.to_string()),
            }
        }
    };

    let products = match repo.create_products(&sample_products()).await {
        Ok(rows) => {
            log::info!("Seeded {} products", rows.len());
            BatchOutcome {
                inserted: rows.len(),
                error: None,
            }
        }
        Err(err) => {
            log::warn!("Products may already exist, continuing: {err}");
            BatchOutcome {
                inserted: 0,
                error: Some(err.to_string()),
            }
        }
    };

    SeedReport {
        categories,
        products,
    }
}
