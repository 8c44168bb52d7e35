use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::repository::{CategoryReader, ProductReader};
use crate::services::categories::list_category_menu;
use crate::services::products::{
    get_product, list_deals, list_featured_products, list_products_by_category,
    list_related_products,
};
use crate::services::{Listing, ServiceResult};

/// Data shown on the storefront home page.
#[derive(Debug, Serialize)]
pub struct StorefrontPage {
    /// Best rated products.
    pub featured: Listing<Product>,
    /// Discounted products.
    pub deals: Listing<Product>,
    /// Category menu in alphabetical order.
    pub categories: Listing<Category>,
}

/// Data shown on a category page.
#[derive(Debug, Serialize)]
pub struct CategoryPage {
    /// Slug requested by the visitor.
    pub slug: String,
    /// The category, when one carries that slug.
    pub category: Option<Category>,
    /// Why the category could not be looked up. `category` is then `None`
    /// without meaning that no category carries the slug.
    pub category_error: Option<String>,
    /// Products referencing the slug.
    pub products: Listing<Product>,
}

/// Data shown on a product page.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub product: Product,
    pub related: Listing<Product>,
}

/// Loads the home page: featured products, deals and the category menu.
pub async fn load_storefront<R>(repo: &R) -> StorefrontPage
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let featured = list_featured_products(repo, None).await;
    let deals = list_deals(repo, None).await;
    let categories = list_category_menu(repo).await;

    StorefrontPage {
        featured,
        deals,
        categories,
    }
}

/// Loads a category page.
///
/// Products are listed even when no category carries `slug`, since the
/// product `category` field is free text.
pub async fn load_category_page<R>(repo: &R, slug: &str) -> CategoryPage
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let (category, category_error) = match repo.get_category_by_slug(slug).await {
        Ok(category) => (category, None),
        Err(err) => {
            log::error!("Error fetching category {slug}: {err}");
            (None, Some(err.to_string()))
        }
    };

    let products = list_products_by_category(repo, slug).await;

    CategoryPage {
        slug: slug.to_string(),
        category,
        category_error,
        products,
    }
}

/// Loads a product page with its related products.
pub async fn load_product_page<R>(repo: &R, product_id: i64) -> ServiceResult<ProductPage>
where
    R: ProductReader + ?Sized,
{
    let product = get_product(repo, product_id).await?;
    let related = list_related_products(repo, &product, None).await;

    Ok(ProductPage { product, related })
}
