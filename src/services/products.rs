use crate::domain::product::{Product, ProductColumn, ProductListQuery};
use crate::domain::query::Direction;
use crate::forms::products::{AddProductForm, EditProductForm, check_update_against};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{DEFAULT_TOP_LIMIT, Envelope, Listing, ServiceError, ServiceResult};

/// Lists every product, newest first.
pub async fn list_products<R>(repo: &R) -> Listing<Product>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::new().order_by(ProductColumn::CreatedAt, Direction::Descending);

    Listing::from_result(repo.list_products(query).await, "products")
}

/// Lists the products whose `column` equals `value`, newest first.
pub async fn list_products_where<R>(repo: &R, column: ProductColumn, value: &str) -> Listing<Product>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::new()
        .eq(column, value)
        .order_by(ProductColumn::CreatedAt, Direction::Descending);

    Listing::from_result(repo.list_products(query).await, "products")
}

/// Lists the products that reference the category `slug`.
pub async fn list_products_by_category<R>(repo: &R, slug: &str) -> Listing<Product>
where
    R: ProductReader + ?Sized,
{
    list_products_where(repo, ProductColumn::Category, slug).await
}

/// Lists up to `limit` products ordered by `column`.
///
/// Rows without a value in `column` sort after every row with one.
pub async fn list_top_products<R>(
    repo: &R,
    column: ProductColumn,
    direction: Direction,
    limit: Option<usize>,
) -> Listing<Product>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::new()
        .order_by(column, direction)
        .limit(limit.unwrap_or(DEFAULT_TOP_LIMIT));

    Listing::from_result(repo.list_products(query).await, "top products")
}

/// Best rated products.
pub async fn list_featured_products<R>(repo: &R, limit: Option<usize>) -> Listing<Product>
where
    R: ProductReader + ?Sized,
{
    list_top_products(repo, ProductColumn::Rating, Direction::Descending, limit).await
}

/// Discounted products, highest pre-discount price first.
pub async fn list_deals<R>(repo: &R, limit: Option<usize>) -> Listing<Product>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::new()
        .not_null(ProductColumn::OriginalPrice)
        .order_by(ProductColumn::OriginalPrice, Direction::Descending)
        .limit(limit.unwrap_or(DEFAULT_TOP_LIMIT));

    Listing::from_result(repo.list_products(query).await, "deals")
}

/// Products shown next to `product`: up to `limit` others in store order.
///
/// One extra row is requested and `product` is dropped by its resolved key,
/// so rows keyed by either key column are excluded alike.
pub async fn list_related_products<R>(
    repo: &R,
    product: &Product,
    limit: Option<usize>,
) -> Listing<Product>
where
    R: ProductReader + ?Sized,
{
    let limit = limit.unwrap_or(DEFAULT_TOP_LIMIT);
    let query = ProductListQuery::new().limit(limit.saturating_add(1));

    let mut listing = Listing::from_result(repo.list_products(query).await, "related products");
    listing.items.retain(|other| other.id != product.id);
    listing.items.truncate(limit);
    listing
}

/// Fetches exactly one product.
pub async fn get_product<R>(repo: &R, product_id: i64) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    match repo.get_product_by_id(product_id).await {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Error fetching product {product_id}: {err}");
            Err(ServiceError::from(err))
        }
    }
}

/// Validates the form and inserts one product.
pub async fn create_product<R>(repo: &R, form: AddProductForm) -> Envelope<Vec<Product>>
where
    R: ProductWriter + ?Sized,
{
    Envelope::from_result(insert_product(repo, form).await, "creating product")
}

async fn insert_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<Vec<Product>>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_products(std::slice::from_ref(&new_product))
        .await
        .map_err(ServiceError::from)
}

/// Applies the fields present in the form to the product `product_id`.
///
/// A price change is validated against the stored product, so a patch
/// cannot leave `original_price` below `price`. A missing product yields a
/// successful envelope with no rows.
pub async fn modify_product<R>(
    repo: &R,
    product_id: i64,
    form: EditProductForm,
) -> Envelope<Vec<Product>>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    Envelope::from_result(
        patch_product(repo, product_id, form).await,
        "updating product",
    )
}

async fn patch_product<R>(
    repo: &R,
    product_id: i64,
    form: EditProductForm,
) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let update = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if update.changes_prices() {
        if let Some(stored) = repo.get_product_by_id(product_id).await? {
            check_update_against(&update, &stored)
                .map_err(|err| ServiceError::Form(err.to_string()))?;
        }
    }

    repo.update_product(product_id, &update)
        .await
        .map_err(ServiceError::from)
}

/// Deletes the product `product_id`. Deleting a missing product succeeds.
pub async fn remove_product<R>(repo: &R, product_id: i64) -> Envelope<()>
where
    R: ProductWriter + ?Sized,
{
    match repo.delete_product(product_id).await {
        Ok(()) => Envelope::done(),
        Err(err) => {
            log::error!("Error deleting product: {err}");
            Envelope::failed(ServiceError::from(err))
        }
    }
}
